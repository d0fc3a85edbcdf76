use std::env;

use anyhow::{Context, Result};
use tracing::info;

use crate::error::CollectError;
use crate::retry::{RetryPolicy, run_with_retry};
use crate::settings::{Division, Tier};
use crate::transport::Transport;
use crate::types::{LadderEntry, MatchData, Summoner};

const DEFAULT_PLATFORM_HOST: &str = "euw1.api.riotgames.com";
const DEFAULT_REGIONAL_HOST: &str = "europe.api.riotgames.com";

/// Ranked solo queue, the only queue this collector samples.
const RANKED_QUEUE: &str = "RANKED_SOLO_5x5";
const RANKED_QUEUE_ID: u32 = 420;

/// Access credential and hosts, read once at startup and immutable for the
/// run. Summoner and ladder lookups go to the platform host, match lookups
/// to the regional one.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub platform_host: String,
    pub regional_host: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("RIOT_API_KEY")
            .context("RIOT_API_KEY is not set")?
            .trim()
            .to_string();
        if api_key.is_empty() {
            anyhow::bail!("RIOT_API_KEY is empty");
        }

        let platform_host = env::var("RIOT_PLATFORM_HOST")
            .unwrap_or_else(|_| DEFAULT_PLATFORM_HOST.to_string());
        let regional_host = env::var("RIOT_REGIONAL_HOST")
            .unwrap_or_else(|_| DEFAULT_REGIONAL_HOST.to_string());

        Ok(Self {
            api_key,
            platform_host,
            regional_host,
        })
    }
}

/// The single place network calls happen. Every endpoint goes through the
/// same retry wrapper, so rate-limit cooperation and transient-failure
/// handling are uniform across the pipeline.
pub struct RiotClient<T: Transport> {
    transport: T,
    config: ApiConfig,
    policy: RetryPolicy,
}

impl<T: Transport> RiotClient<T> {
    pub fn new(transport: T, config: ApiConfig, policy: RetryPolicy) -> Self {
        Self {
            transport,
            config,
            policy,
        }
    }

    fn get_body(
        &self,
        label: &str,
        url: &str,
        extra: &[(&str, String)],
    ) -> Result<String, CollectError> {
        let mut query: Vec<(&str, String)> = vec![("api_key", self.config.api_key.clone())];
        query.extend_from_slice(extra);
        run_with_retry(&self.policy, label, || self.transport.get(url, &query))
    }

    /// One ranked ladder page. Pages are numbered from 1.
    pub fn ladder_page(
        &self,
        tier: Tier,
        division: Division,
        page: u32,
    ) -> Result<Vec<LadderEntry>, CollectError> {
        let url = format!(
            "https://{}/lol/league-exp/v4/entries/{RANKED_QUEUE}/{tier}/{division}",
            self.config.platform_host
        );
        let label = format!("ladder {tier} {division} page {page}");
        let body = self.get_body(&label, &url, &[("page", page.to_string())])?;
        let entries: Vec<LadderEntry> = serde_json::from_str(&body)?;
        info!(
            "extracted {} entries of tier {tier} division {division} page {page}",
            entries.len()
        );
        Ok(entries)
    }

    pub fn summoner_by_name(&self, name: &str) -> Result<Summoner, CollectError> {
        let url = format!(
            "https://{}/lol/summoner/v4/summoners/by-name/{}",
            self.config.platform_host,
            name.to_lowercase()
        );
        let body = self.get_body(&format!("summoner {name:?}"), &url, &[])?;
        let summoner: Summoner = serde_json::from_str(&body)?;
        info!("extracted summoner {name:?}");
        Ok(summoner)
    }

    /// The `count` most recent ranked match ids of a player, newest first.
    pub fn match_ids(&self, puuid: &str, count: usize) -> Result<Vec<String>, CollectError> {
        let url = format!(
            "https://{}/lol/match/v5/matches/by-puuid/{puuid}/ids",
            self.config.regional_host
        );
        let extra = [
            ("count", count.to_string()),
            ("queue", RANKED_QUEUE_ID.to_string()),
            ("type", "ranked".to_string()),
        ];
        let body = self.get_body(&format!("match ids of {puuid}"), &url, &extra)?;
        let ids: Vec<String> = serde_json::from_str(&body)?;
        info!("extracted {} match ids of puuid {puuid}", ids.len());
        Ok(ids)
    }

    pub fn match_by_id(&self, match_id: &str) -> Result<MatchData, CollectError> {
        let url = format!(
            "https://{}/lol/match/v5/matches/{match_id}",
            self.config.regional_host
        );
        let body = self.get_body(&format!("match {match_id}"), &url, &[])?;
        let data: MatchData = serde_json::from_str(&body)?;
        info!("extracted match {match_id}");
        Ok(data)
    }
}
