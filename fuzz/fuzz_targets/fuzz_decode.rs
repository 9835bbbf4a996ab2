#![no_main]
use codings::{json, zip4, Decoding, Encoding};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, PartialEq)]
struct Meta {
    date: String,
    player: Option<String>,
    multi_player: bool,
    campaign_stats: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq)]
struct Stat {
    id: u32,
    key: String,
}

fuzz_target!(|data: &[u8]| {
    let stat = Decoding::key("id")
        .zip(Decoding::key("key"))
        .map(|(id, key)| Stat { id, key });

    let meta = zip4(
        Decoding::key("date"),
        Decoding::optional_key("player"),
        Decoding::optional_key("multi_player").replace_nil(false),
        Decoding::array_of(stat).with_key("campaign_stats"),
    )
    .map(|(date, player, multi_player, campaign_stats)| Meta {
        date,
        player,
        multi_player,
        campaign_stats,
    });

    let Ok(decoded) = json::decode(data, &meta) else {
        return;
    };

    let stat_encoding = Encoding::combine([
        Encoding::<u32>::key("id").pullback(|s: &Stat| &s.id),
        Encoding::<String>::key("key").pullback(|s: &Stat| &s.key),
    ]);
    let encoding = Encoding::combine([
        Encoding::<String>::key("date").pullback(|m: &Meta| &m.date),
        Encoding::<String>::key("player")
            .optional()
            .pullback(|m: &Meta| &m.player),
        Encoding::<bool>::key("multi_player").pullback(|m: &Meta| &m.multi_player),
        Encoding::<Vec<Stat>>::array_of(stat_encoding)
            .with_key("campaign_stats")
            .pullback(|m: &Meta| &m.campaign_stats),
    ]);

    let out = json::encode(&decoded, &encoding).unwrap();
    assert_eq!(json::decode(&out, &meta).unwrap(), decoded);
});
