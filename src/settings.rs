use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// The nine ranked tiers, highest first. The top three are apex tiers: a
/// single ladder division instead of four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Challenger,
    Grandmaster,
    Master,
    Diamond,
    Platinum,
    Gold,
    Silver,
    Bronze,
    Iron,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Division {
    I,
    II,
    III,
    IV,
}

const ALL_DIVISIONS: [Division; 4] = [Division::I, Division::II, Division::III, Division::IV];
const APEX_DIVISION: [Division; 1] = [Division::I];

impl Tier {
    pub fn is_apex(self) -> bool {
        matches!(self, Tier::Challenger | Tier::Grandmaster | Tier::Master)
    }

    pub fn divisions(self) -> &'static [Division] {
        if self.is_apex() {
            &APEX_DIVISION
        } else {
            &ALL_DIVISIONS
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Challenger => "CHALLENGER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Master => "MASTER",
            Tier::Diamond => "DIAMOND",
            Tier::Platinum => "PLATINUM",
            Tier::Gold => "GOLD",
            Tier::Silver => "SILVER",
            Tier::Bronze => "BRONZE",
            Tier::Iron => "IRON",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CHALLENGER" => Ok(Tier::Challenger),
            "GRANDMASTER" => Ok(Tier::Grandmaster),
            "MASTER" => Ok(Tier::Master),
            "DIAMOND" => Ok(Tier::Diamond),
            "PLATINUM" => Ok(Tier::Platinum),
            "GOLD" => Ok(Tier::Gold),
            "SILVER" => Ok(Tier::Silver),
            "BRONZE" => Ok(Tier::Bronze),
            "IRON" => Ok(Tier::Iron),
            other => bail!("tier {other:?} does not exist"),
        }
    }
}

impl Division {
    pub fn as_str(self) -> &'static str {
        match self {
            Division::I => "I",
            Division::II => "II",
            Division::III => "III",
            Division::IV => "IV",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run configuration, read once at startup. An unrecognized tier name fails
/// here, before any network activity.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tiers: Vec<Tier>,
    pub matches_per_tier: usize,
    pub data_dir: PathBuf,
}

const DEFAULT_TIERS: &str = "CHALLENGER,GRANDMASTER,MASTER";
const DEFAULT_MATCHES_PER_TIER: usize = 300;

impl Settings {
    pub fn from_env() -> Result<Self> {
        let raw_tiers =
            std::env::var("TIERS").unwrap_or_else(|_| DEFAULT_TIERS.to_string());
        let tiers = parse_tier_list(&raw_tiers)?;

        let matches_per_tier = match std::env::var("MATCHES_PER_TIER") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("invalid MATCHES_PER_TIER {raw:?}"))?,
            Err(_) => DEFAULT_MATCHES_PER_TIER,
        };

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        Ok(Self {
            tiers,
            matches_per_tier,
            data_dir,
        })
    }
}

fn parse_tier_list(raw: &str) -> Result<Vec<Tier>> {
    let tiers = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Tier::from_str)
        .collect::<Result<Vec<_>>>()?;
    if tiers.is_empty() {
        bail!("no tiers configured");
    }
    Ok(tiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apex_tiers_have_one_division() {
        for tier in [Tier::Challenger, Tier::Grandmaster, Tier::Master] {
            assert!(tier.is_apex());
            assert_eq!(tier.divisions(), &[Division::I]);
        }
    }

    #[test]
    fn regular_tiers_have_four_divisions() {
        assert_eq!(Tier::Gold.divisions().len(), 4);
        assert!(!Tier::Iron.is_apex());
    }

    #[test]
    fn tier_list_parses_and_trims() {
        let tiers = parse_tier_list("DIAMOND, gold ,IRON").unwrap();
        assert_eq!(tiers, vec![Tier::Diamond, Tier::Gold, Tier::Iron]);
    }

    #[test]
    fn unknown_tier_fails_fast() {
        let err = parse_tier_list("CHALLENGER,WOOD").unwrap_err();
        assert!(err.to_string().contains("WOOD"));
    }

    #[test]
    fn empty_tier_list_is_rejected() {
        assert!(parse_tier_list(" , ").is_err());
    }
}
