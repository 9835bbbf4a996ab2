use codings::{json, zip5, Decoding, Encoding};
use quickcheck_macros::quickcheck;

#[derive(Debug, Clone, PartialEq)]
struct Profile {
    handle: String,
    followers: u32,
    bio: Option<String>,
    tags: Vec<String>,
    scores: Vec<Score>,
}

#[derive(Debug, Clone, PartialEq)]
struct Score {
    game: String,
    points: i64,
}

fn score_decoding() -> Decoding<Score> {
    Decoding::key("game")
        .zip(Decoding::key("points"))
        .map(|(game, points)| Score { game, points })
}

fn score_encoding() -> Encoding<Score> {
    Encoding::combine([
        Encoding::<String>::key("game").pullback(|s: &Score| &s.game),
        Encoding::<i64>::key("points").pullback(|s: &Score| &s.points),
    ])
}

fn profile_decoding() -> Decoding<Profile> {
    zip5(
        Decoding::key("handle"),
        Decoding::key("followers"),
        Decoding::optional_key("bio"),
        Decoding::<Vec<String>>::array().with_key("tags"),
        Decoding::array_of(score_decoding()).with_key("scores"),
    )
    .map(|(handle, followers, bio, tags, scores)| Profile {
        handle,
        followers,
        bio,
        tags,
        scores,
    })
}

fn profile_encoding() -> Encoding<Profile> {
    Encoding::combine([
        Encoding::<String>::key("handle").pullback(|p: &Profile| &p.handle),
        Encoding::<u32>::key("followers").pullback(|p: &Profile| &p.followers),
        Encoding::<String>::key("bio")
            .optional()
            .pullback(|p: &Profile| &p.bio),
        Encoding::<Vec<String>>::array()
            .with_key("tags")
            .pullback(|p: &Profile| &p.tags),
        Encoding::<Vec<Score>>::array_of(score_encoding())
            .with_key("scores")
            .pullback(|p: &Profile| &p.scores),
    ])
}

#[quickcheck]
fn profile_round_trip(
    handle: String,
    followers: u32,
    bio: Option<String>,
    tags: Vec<String>,
    scores: Vec<(String, i64)>,
) -> bool {
    let profile = Profile {
        handle,
        followers,
        bio,
        tags,
        scores: scores
            .into_iter()
            .map(|(game, points)| Score { game, points })
            .collect(),
    };

    let data = json::encode(&profile, &profile_encoding()).unwrap();
    json::decode(&data, &profile_decoding()).unwrap() == profile
}

#[quickcheck]
fn pretty_and_minified_decode_the_same(handle: String, followers: u32) -> bool {
    let profile = Profile {
        handle,
        followers,
        bio: None,
        tags: Vec::new(),
        scores: Vec::new(),
    };

    let encoding = profile_encoding();
    let pretty = json::encode_with_options(
        &profile,
        &encoding,
        json::JsonOptions::new().with_prettyprint(true),
    )
    .unwrap();
    let minified = json::encode(&profile, &encoding).unwrap();

    let decoding = profile_decoding();
    json::decode(&pretty, &decoding).unwrap() == json::decode(&minified, &decoding).unwrap()
}
