use tracing::warn;

use crate::api::RiotClient;
use crate::error::CollectError;
use crate::transport::Transport;
use crate::types::{MatchData, Summoner, match_ordinal};

/// How far back one windowed lookup can see. The window never paginates
/// past this single page of ids; a reference match older than all of them
/// yields an empty history.
pub const HISTORY_PAGE_SIZE: usize = 100;

/// Resolves a display name to a durable identity. Unknown names surface as
/// `NotWaitable`; whether that is fatal is the caller's decision.
pub fn resolve_identity<T: Transport>(
    client: &RiotClient<T>,
    name: &str,
) -> Result<Summoner, CollectError> {
    client.summoner_by_name(name)
}

/// The `limit` most recent match ids of a player, newest first.
pub fn recent_match_ids<T: Transport>(
    client: &RiotClient<T>,
    puuid: &str,
    limit: usize,
) -> Result<Vec<String>, CollectError> {
    client.match_ids(puuid, limit)
}

/// The `count` most recent matches of a player, bodies included.
pub fn recent_matches<T: Transport>(
    client: &RiotClient<T>,
    puuid: &str,
    count: usize,
) -> Result<Vec<MatchData>, CollectError> {
    let ids = recent_match_ids(client, puuid, count)?;
    fetch_bodies(client, &ids)
}

/// Up to `count` of the player's matches strictly older than
/// `reference_id`, most-recent first.
///
/// Scans one page of the most recent `HISTORY_PAGE_SIZE` ids for the first
/// ordinal strictly below the reference ordinal and takes a forward window
/// from there. Nothing older within the page means an empty result.
pub fn matches_older_than<T: Transport>(
    client: &RiotClient<T>,
    puuid: &str,
    reference_id: &str,
    count: usize,
) -> Result<Vec<MatchData>, CollectError> {
    let ids = recent_match_ids(client, puuid, HISTORY_PAGE_SIZE)?;
    let reference_ordinal = match_ordinal(reference_id)?;
    let window = window_older_than(&ids, reference_ordinal, count)?;
    fetch_bodies(client, &window)
}

/// Resolve a name, then fetch its recent matches. A name that no longer
/// resolves contributes an empty list instead of failing the run; every
/// other error propagates.
pub fn recent_matches_by_name<T: Transport>(
    client: &RiotClient<T>,
    name: &str,
    count: usize,
) -> Result<Vec<MatchData>, CollectError> {
    let summoner = match resolve_identity(client, name) {
        Ok(summoner) => summoner,
        Err(err) if err.is_not_waitable() => {
            warn!("summoner {name:?} did not resolve ({err}), contributing no matches");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err),
    };
    recent_matches(client, &summoner.puuid, count)
}

fn fetch_bodies<T: Transport>(
    client: &RiotClient<T>,
    ids: &[String],
) -> Result<Vec<MatchData>, CollectError> {
    ids.iter().map(|id| client.match_by_id(id)).collect()
}

fn window_older_than(
    ids: &[String],
    reference_ordinal: u64,
    count: usize,
) -> Result<Vec<String>, CollectError> {
    for (i, id) in ids.iter().enumerate() {
        if match_ordinal(id)? < reference_ordinal {
            let end = (i + count).min(ids.len());
            return Ok(ids[i..end].to_vec());
        }
    }
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ordinals: &[u64]) -> Vec<String> {
        ordinals.iter().map(|n| format!("EUW1_{n}")).collect()
    }

    #[test]
    fn window_starts_at_first_strictly_older_id() {
        let ids = ids(&[900, 700, 500, 400, 300, 200]);
        let window = window_older_than(&ids, 500, 3).unwrap();
        assert_eq!(window, vec!["EUW1_400", "EUW1_300", "EUW1_200"]);
    }

    #[test]
    fn window_clamps_at_the_end_of_the_page() {
        let ids = ids(&[500, 400, 300]);
        let window = window_older_than(&ids, 450, 20).unwrap();
        assert_eq!(window, vec!["EUW1_400", "EUW1_300"]);
    }

    #[test]
    fn nothing_older_yields_empty_not_error() {
        let ids = ids(&[900, 800, 700, 500]);
        let window = window_older_than(&ids, 500, 20).unwrap();
        assert!(window.is_empty());
    }

    #[test]
    fn empty_id_page_yields_empty_window() {
        let window = window_older_than(&[], 500, 20).unwrap();
        assert!(window.is_empty());
    }

    #[test]
    fn malformed_id_in_page_is_an_error() {
        let ids = vec!["EUW1_900".to_string(), "garbage".to_string()];
        assert!(matches!(
            window_older_than(&ids, 500, 5),
            Err(CollectError::MalformedMatchId(_))
        ));
    }
}
