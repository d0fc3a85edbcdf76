use tracing::{info, warn};

use crate::api::RiotClient;
use crate::error::CollectError;
use crate::settings::Tier;
use crate::transport::Transport;
use crate::types::LadderEntry;

/// Samples up to `quota` active player names from a tier's ladder.
///
/// Apex tiers hold a single division; everything else splits into four, and
/// the quota splits with them by ceiling division. Each division is paged
/// independently from page 1 until its share is met, the overall quota is
/// met, or a page comes back empty (ladder exhausted). A division that runs
/// dry does not borrow from the others; falling short of the quota is
/// logged, not an error.
pub fn sample_player_pool<T: Transport>(
    client: &RiotClient<T>,
    tier: Tier,
    quota: usize,
) -> Result<Vec<String>, CollectError> {
    let divisions = tier.divisions();
    let per_division = quota.div_ceil(divisions.len());

    let mut names: Vec<String> = Vec::new();
    for division in divisions {
        let remaining = quota - names.len();
        if remaining == 0 {
            break;
        }
        let target = per_division.min(remaining);
        let collected = collect_division(target, |page| client.ladder_page(tier, *division, page))?;
        if collected.len() < target {
            info!(
                "ladder {tier} {division} exhausted at {} of {target} entries",
                collected.len()
            );
        }
        names.extend(collected);
    }

    if names.len() < quota {
        warn!(
            "player pool for tier {tier} fell short: {} of {quota}",
            names.len()
        );
    }
    Ok(names)
}

/// Pages one division until `target` active names are collected or a page
/// returns no entries. Page numbers start at 1.
fn collect_division<F>(target: usize, mut fetch_page: F) -> Result<Vec<String>, CollectError>
where
    F: FnMut(u32) -> Result<Vec<LadderEntry>, CollectError>,
{
    let mut names = Vec::new();
    let mut page = 1u32;
    while names.len() < target {
        let entries = fetch_page(page)?;
        if entries.is_empty() {
            break;
        }
        for entry in entries {
            if names.len() >= target {
                break;
            }
            if !entry.inactive {
                names.push(entry.summoner_name);
            }
        }
        page += 1;
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of<S: AsRef<str>>(names: &[S]) -> Vec<LadderEntry> {
        names
            .iter()
            .map(|name| LadderEntry {
                summoner_name: name.as_ref().to_string(),
                inactive: false,
            })
            .collect()
    }

    #[test]
    fn stops_exactly_at_target() {
        let pool = collect_division(3, |page| {
            Ok(page_of(&[format!("a{page}"), format!("b{page}")]))
        })
        .unwrap();
        assert_eq!(pool, vec!["a1", "b1", "a2"]);
    }

    #[test]
    fn empty_page_ends_the_division() {
        let pool = collect_division(100, |page| {
            if page <= 2 {
                Ok(page_of(&[format!("p{page}")]))
            } else {
                Ok(Vec::new())
            }
        })
        .unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn inactive_entries_are_skipped() {
        let pool = collect_division(10, |page| {
            if page > 1 {
                return Ok(Vec::new());
            }
            Ok(vec![
                LadderEntry {
                    summoner_name: "active".to_string(),
                    inactive: false,
                },
                LadderEntry {
                    summoner_name: "dodger".to_string(),
                    inactive: true,
                },
            ])
        })
        .unwrap();
        assert_eq!(pool, vec!["active"]);
    }

    #[test]
    fn all_inactive_page_does_not_end_paging() {
        let pool = collect_division(2, |page| match page {
            1 => Ok(vec![LadderEntry {
                summoner_name: "idle".to_string(),
                inactive: true,
            }]),
            2 => Ok(page_of(&["fresh", "keen"])),
            _ => Ok(Vec::new()),
        })
        .unwrap();
        assert_eq!(pool, vec!["fresh", "keen"]);
    }

    #[test]
    fn division_ceilings_cover_the_quota() {
        for quota in 1..=64usize {
            assert!(4 * quota.div_ceil(4) >= quota);
        }
    }

    #[test]
    fn errors_propagate() {
        let result = collect_division(5, |_page| {
            Err::<Vec<LadderEntry>, _>(CollectError::NotWaitable(
                reqwest::StatusCode::FORBIDDEN,
            ))
        });
        assert!(matches!(result, Err(CollectError::NotWaitable(_))));
    }
}
