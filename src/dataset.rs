use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use crate::settings::Tier;
use crate::types::SampleRecord;

/// Writes one tier's records as a JSON array under `dir`. The filename
/// encodes the tier, the record count and a UTC timestamp, so successive
/// runs never clobber each other. Returns the final path.
pub fn write_tier_dataset(dir: &Path, tier: Tier, records: &[SampleRecord]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("create data dir {}", dir.display()))?;

    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let path = dir.join(format!("data_{tier}_{}_{stamp}.json", records.len()));

    let json = serde_json::to_string(records).context("serialize tier dataset")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("swap {}", path.display()))?;
    Ok(path)
}
