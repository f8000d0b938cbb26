//! Steam Name Resolver
//!
//! Turns a Steam app ID into a store title with one GET against the public
//! `appdetails` endpoint. Every failure reads as "name unknown"; nothing here
//! returns an error to the caller.

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::slots::steam_label;
use crate::Result;

/// Public store endpoint, queried as `?appids=<id>`
pub const DEFAULT_STEAM_ENDPOINT: &str = "https://store.steampowered.com/api/appdetails";

/// Whole-request timeout for one lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// One entry of the `appdetails` response, keyed by app ID
#[derive(Debug, Deserialize)]
struct AppDetails {
    #[serde(default)]
    success: bool,
    data: Option<AppData>,
}

#[derive(Debug, Deserialize)]
struct AppData {
    name: String,
}

/// Pull the title for `appid` out of an `appdetails` response body
pub fn title_from_response(appid: &str, body: &str) -> Option<String> {
    let mut details: HashMap<String, AppDetails> = serde_json::from_str(body).ok()?;
    let entry = details.remove(appid)?;
    if !entry.success {
        return None;
    }
    entry.data.map(|d| d.name)
}

/// Blocking lookup client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SteamResolver {
    client: Option<Client>,
    endpoint: String,
}

impl Default for SteamResolver {
    fn default() -> Self {
        Self::new(DEFAULT_STEAM_ENDPOINT, DEFAULT_LOOKUP_TIMEOUT)
    }
}

impl SteamResolver {
    /// Build a resolver. If the HTTP client can't be set up every lookup
    /// falls back to the ID-based label.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = match Client::builder()
            .timeout(timeout)
            .user_agent(concat!("noksu-launcher/", env!("CARGO_PKG_VERSION")))
            .build()
        {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Steam lookups disabled, HTTP client failed to build: {}", e);
                None
            }
        };

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up the store title for `appid`
    pub fn resolve(&self, appid: &str) -> Option<String> {
        let client = self.client.as_ref()?;
        match self.fetch(client, appid) {
            Ok(body) => {
                let title = title_from_response(appid, &body);
                if title.is_none() {
                    debug!("No title in appdetails response for {}", appid);
                }
                title
            }
            Err(e) => {
                debug!("Steam lookup for {} failed: {}", appid, e);
                None
            }
        }
    }

    fn fetch(&self, client: &Client, appid: &str) -> Result<String> {
        let body = client
            .get(&self.endpoint)
            .query(&[("appids", appid)])
            .send()?
            .error_for_status()?
            .text()?;
        Ok(body)
    }
}

/// A lookup the UI wants done for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub index: usize,
    /// Row generation when the lookup was requested
    pub generation: u64,
    pub appid: String,
}

/// Finished lookup, posted back to the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    pub index: usize,
    pub generation: u64,
    pub appid: String,
    pub title: Option<String>,
}

impl LookupOutcome {
    /// Label text for the row
    pub fn label(&self) -> String {
        steam_label(&self.appid, self.title.as_deref())
    }
}

/// Run `request` on its own thread and post the outcome to `tx`. `notify` is
/// called after a successful post so the UI can wake up.
pub fn spawn_lookup<F>(
    resolver: &SteamResolver,
    request: LookupRequest,
    tx: Sender<LookupOutcome>,
    notify: F,
) where
    F: FnOnce() + Send + 'static,
{
    debug!("Looking up Steam app {} for slot {}", request.appid, request.index);

    let fallback = LookupOutcome {
        index: request.index,
        generation: request.generation,
        appid: request.appid.clone(),
        title: None,
    };
    let fallback_tx = tx.clone();
    let resolver = resolver.clone();

    let spawned = thread::Builder::new()
        .name(format!("steam-lookup-{}", request.index))
        .spawn(move || {
            let title = resolver.resolve(&request.appid);
            let outcome = LookupOutcome {
                index: request.index,
                generation: request.generation,
                appid: request.appid,
                title,
            };
            // The receiver is gone once the window has closed
            if tx.send(outcome).is_ok() {
                notify();
            }
        });

    if let Err(e) = spawned {
        warn!("Could not start Steam lookup thread: {}", e);
        let _ = fallback_tx.send(fallback);
    }
}
