use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

use crate::error::CollectError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

fn shared_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// One blocking GET with the outcome already classified.
///
/// Returns the raw body for any status below 400. Statuses >= 429 map to
/// `Waitable`, 400..429 to `NotWaitable`, and failures before any status
/// was received (refused, reset, timed out) to `Transient`. Parsing is the
/// caller's job; retrying is the retry layer's job.
pub trait Transport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, CollectError>;
}

pub struct HttpTransport {
    client: &'static Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: shared_client()?,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, CollectError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(CollectError::Transient)?;

        let status = resp.status();
        if status.as_u16() >= 429 {
            return Err(CollectError::Waitable(status));
        }
        if status.as_u16() >= 400 {
            return Err(CollectError::NotWaitable(status));
        }
        resp.text().map_err(CollectError::Transient)
    }
}

/// Closures double as transports so tests can script responses.
impl<F> Transport for F
where
    F: Fn(&str, &[(&str, String)]) -> Result<String, CollectError>,
{
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, CollectError> {
        self(url, query)
    }
}
