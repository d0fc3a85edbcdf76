use std::fs;
use std::path::PathBuf;

use riftdata::types::{LadderEntry, MatchData, PriorOutcome, Summoner, TeamSide, match_ordinal};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_ladder_page_fixture() {
    let raw = read_fixture("ladder_page.json");
    let entries: Vec<LadderEntry> = serde_json::from_str(&raw).expect("fixture should parse");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].summoner_name, "Faker Enjoyer");
    assert!(!entries[0].inactive);
    assert!(entries[1].inactive);
}

#[test]
fn parses_summoner_fixture() {
    let raw = read_fixture("summoner.json");
    let summoner: Summoner = serde_json::from_str(&raw).expect("fixture should parse");
    assert_eq!(summoner.name, "Faker Enjoyer");
    assert!(summoner.puuid.starts_with("wjrYLHnluS7Y"));
}

#[test]
fn parses_match_fixture() {
    let raw = read_fixture("match.json");
    let m: MatchData = serde_json::from_str(&raw).expect("fixture should parse");
    assert_eq!(m.match_id(), "EUW1_6319387550");
    assert_eq!(m.participants().len(), 10);
    assert_eq!(match_ordinal(m.match_id()).unwrap(), 6319387550);
}

#[test]
fn match_fixture_labels_both_teams() {
    let raw = read_fixture("match.json");
    let m: MatchData = serde_json::from_str(&raw).expect("fixture should parse");

    assert_eq!(m.outcome_for("puuid-blue-mid"), PriorOutcome::Victory);
    assert_eq!(m.outcome_for("puuid-red-sup"), PriorOutcome::Defeat);
    assert_eq!(m.team_for("puuid-blue-mid"), Some(TeamSide::A));
    assert_eq!(m.team_for("puuid-red-sup"), Some(TeamSide::B));

    assert_eq!(m.outcome_for("puuid-spectator"), PriorOutcome::Unknown);
}
