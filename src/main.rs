use anyhow::Result;
use tracing::info;

use riftdata::api::{ApiConfig, RiotClient};
use riftdata::dataset;
use riftdata::retry::RetryPolicy;
use riftdata::sample;
use riftdata::settings::Settings;
use riftdata::transport::HttpTransport;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env()?;
    let config = ApiConfig::from_env()?;
    let client = RiotClient::new(HttpTransport::new()?, config, RetryPolicy::default());

    for tier in &settings.tiers {
        let (records, summary) =
            sample::build_sample(&client, *tier, settings.matches_per_tier)?;
        let path = dataset::write_tier_dataset(&settings.data_dir, *tier, &records)?;
        info!(
            "tier {tier}: {} records ({} missing) written to {}",
            records.len(),
            summary.shortfall(),
            path.display()
        );
    }
    Ok(())
}
