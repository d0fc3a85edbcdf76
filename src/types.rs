use serde::{Deserialize, Serialize};

use crate::error::CollectError;

/// One row of a ranked ladder page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LadderEntry {
    pub summoner_name: String,
    #[serde(default)]
    pub inactive: bool,
}

/// Resolved player identity. `puuid` is the durable identifier used for all
/// history lookups; `name` is only ever used once, to resolve it.
#[derive(Debug, Clone, Deserialize)]
pub struct Summoner {
    pub name: String,
    pub puuid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchData {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchInfo {
    pub participants: Vec<MatchParticipant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchParticipant {
    pub puuid: String,
    pub team_id: u32,
    pub win: bool,
}

impl MatchData {
    pub fn match_id(&self) -> &str {
        &self.metadata.match_id
    }

    pub fn participants(&self) -> &[String] {
        &self.metadata.participants
    }

    /// Win/loss of `puuid` in this match. `Unknown` when the player is
    /// absent from the participant list; by construction that should not
    /// happen, but absence is an answer here, not a fault.
    pub fn outcome_for(&self, puuid: &str) -> PriorOutcome {
        if !self.metadata.participants.iter().any(|p| p == puuid) {
            return PriorOutcome::Unknown;
        }
        match self.info.participants.iter().find(|p| p.puuid == puuid) {
            Some(p) if p.win => PriorOutcome::Victory,
            Some(_) => PriorOutcome::Defeat,
            None => PriorOutcome::Unknown,
        }
    }

    /// Team side of `puuid`, or `None` when the player is not listed.
    pub fn team_for(&self, puuid: &str) -> Option<TeamSide> {
        let participant = self.info.participants.iter().find(|p| p.puuid == puuid)?;
        TeamSide::from_team_id(participant.team_id)
    }
}

/// Parses the numeric recency ordinal out of a "{shard}_{ordinal}" match id.
/// Ordinals order matches by recency within one shard; ids from different
/// shards are never compared.
pub fn match_ordinal(match_id: &str) -> Result<u64, CollectError> {
    match_id
        .split('_')
        .nth(1)
        .and_then(|raw| raw.parse::<u64>().ok())
        .ok_or_else(|| CollectError::MalformedMatchId(match_id.to_string()))
}

/// Which side of the record a participant lands on. Riot's team ids 100
/// and 200 map to A and B; the dataset encodes the side by placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    fn from_team_id(team_id: u32) -> Option<Self> {
        match team_id {
            100 => Some(TeamSide::A),
            200 => Some(TeamSide::B),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorOutcome {
    Victory,
    Defeat,
    Unknown,
}

/// One match of a participant's pre-match history.
#[derive(Debug, Clone, Serialize)]
pub struct PriorMatchResult {
    pub match_id: String,
    pub outcome: PriorOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantHistory {
    pub puuid: String,
    /// Most-recent first, all strictly older than the record's own match.
    pub prior_matches: Vec<PriorMatchResult>,
}

/// One labeled dataset row: a match plus both teams' participant histories.
#[derive(Debug, Clone, Serialize)]
pub struct SampleRecord {
    pub match_id: String,
    pub tier: String,
    pub team_a: Vec<ParticipantHistory>,
    pub team_b: Vec<ParticipantHistory>,
}
