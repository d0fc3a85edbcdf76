use std::collections::HashSet;
use std::fmt;

use tracing::{info, warn};

use crate::api::RiotClient;
use crate::error::CollectError;
use crate::history;
use crate::ladder;
use crate::settings::Tier;
use crate::transport::Transport;
use crate::types::{
    MatchData, ParticipantHistory, PriorMatchResult, SampleRecord, TeamSide,
};

/// Length of each participant's pre-match history window.
const HISTORY_LEN: usize = 20;

/// Counts for one tier's collection run, logged by the caller.
#[derive(Debug, Clone)]
pub struct SampleSummary {
    pub tier: Tier,
    pub requested: usize,
    pub fetched: usize,
    pub unique: usize,
    pub duplicates: usize,
}

impl SampleSummary {
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.unique)
    }
}

impl fmt::Display for SampleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tier {}: {} unique matches of {} requested ({} fetched, {} duplicates discarded, missing {})",
            self.tier,
            self.unique,
            self.requested,
            self.fetched,
            self.duplicates,
            self.shortfall()
        )
    }
}

/// Builds one tier's dataset: sample a player pool, take one recent match
/// per player (more per player only when the ladder ran short), dedup by
/// match id, then attach every participant's prior-match history.
pub fn build_sample<T: Transport>(
    client: &RiotClient<T>,
    tier: Tier,
    target: usize,
) -> Result<(Vec<SampleRecord>, SampleSummary), CollectError> {
    let pool = ladder::sample_player_pool(client, tier, target)?;
    if pool.is_empty() {
        warn!("tier {tier}: empty player pool, nothing to sample");
        let summary = SampleSummary {
            tier,
            requested: target,
            fetched: 0,
            unique: 0,
            duplicates: 0,
        };
        return Ok((Vec::new(), summary));
    }

    let shares = match_shares(target, pool.len());
    let mut matches: Vec<MatchData> = Vec::new();
    for (name, share) in pool.iter().zip(shares) {
        let fetched = history::recent_matches_by_name(client, name, share)?;
        matches.extend(fetched);
    }
    let fetched = matches.len();

    let unique = dedup_by_match_id(matches);
    let summary = SampleSummary {
        tier,
        requested: target,
        fetched,
        unique: unique.len(),
        duplicates: fetched - unique.len(),
    };
    info!("{summary}");

    let mut records = Vec::with_capacity(unique.len());
    for m in &unique {
        records.push(enrich_match(client, tier, m)?);
    }
    Ok((records, summary))
}

/// How many recent matches each pool member contributes. A pool at least as
/// large as the target gets one match per player; a short pool spreads the
/// target across its members, the first `target % pool` players carrying
/// one extra.
fn match_shares(target: usize, pool_size: usize) -> Vec<usize> {
    if pool_size >= target {
        return vec![1; pool_size];
    }
    let floor = target / pool_size;
    let remainder = target % pool_size;
    (0..pool_size)
        .map(|i| if i < remainder { floor + 1 } else { floor })
        .collect()
}

/// First-seen-wins dedup, preserving order. The seen-set grows on first
/// sight of each id.
fn dedup_by_match_id(matches: Vec<MatchData>) -> Vec<MatchData> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();
    for m in matches {
        if seen.insert(m.match_id().to_string()) {
            unique.push(m);
        }
    }
    unique
}

/// Turns one fetched match into a dataset record: every participant gets
/// their 20 prior matches (strictly older than this one), labeled from
/// their own perspective, and lands on their team's side.
fn enrich_match<T: Transport>(
    client: &RiotClient<T>,
    tier: Tier,
    m: &MatchData,
) -> Result<SampleRecord, CollectError> {
    let match_id = m.match_id().to_string();
    let mut record = SampleRecord {
        match_id: match_id.clone(),
        tier: tier.to_string(),
        team_a: Vec::new(),
        team_b: Vec::new(),
    };

    for puuid in m.participants() {
        let prior = history::matches_older_than(client, puuid, &match_id, HISTORY_LEN)?;
        let prior_matches = prior
            .iter()
            .map(|prev| PriorMatchResult {
                match_id: prev.match_id().to_string(),
                outcome: prev.outcome_for(puuid),
            })
            .collect();
        let participant = ParticipantHistory {
            puuid: puuid.clone(),
            prior_matches,
        };

        match m.team_for(puuid) {
            Some(TeamSide::A) => record.team_a.push(participant),
            Some(TeamSide::B) => record.team_b.push(participant),
            None => {
                warn!("participant {puuid} has no team in match {match_id}, skipping");
            }
        }
    }
    Ok(record)
}
