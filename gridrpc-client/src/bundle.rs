//! Aggregation bundles
//!
//! A [`Bundle`] is a named, ordered set of `(key, Query)` pairs that together
//! feed one operator view. Fetching a bundle attempts every query exactly
//! once and returns an [`AggregatedResult`] holding one outcome per declared
//! key, in declaration order. A failing sub-call only fails its own key.
//!
//! # Dispatch
//!
//! Sub-calls run concurrently, at most `max_in_flight` at a time (see
//! [`RpcConfig::with_max_in_flight`](crate::RpcConfig::with_max_in_flight)).
//! With `max_in_flight = 1` they run one after another, so the total latency
//! is the sum of all calls instead of roughly the slowest one.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gridrpc_client::{Bundle, Query, RpcClient, RpcConfig};
//!
//! # async fn example() -> gridrpc_core::Result<()> {
//! let client = RpcClient::new(RpcConfig::from_env()?)?;
//!
//! let summary = Bundle::new("summary")
//!     .with("info", Query::Info)
//!     .with("balance", Query::Balance)
//!     .with("peers", Query::PeerInfo);
//!
//! let result = client.fetch_bundle(&summary).await;
//! for key in result.failed_keys() {
//!     eprintln!("{} unavailable", key);
//! }
//! # Ok(())
//! # }
//! ```

use crate::catalog::Query;
use crate::transport::Transport;
use crate::RpcClient;
use futures::stream::{self, StreamExt};
use gridrpc_core::RpcOutcome;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::time::Instant;

/// Named, ordered set of catalog queries fetched together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    name: String,
    entries: Vec<(String, Query)>,
}

impl Bundle {
    /// Create an empty bundle
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Declare a key
    ///
    /// Declaring an existing key again replaces its query and keeps its
    /// original position.
    pub fn with(mut self, key: impl Into<String>, query: Query) -> Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = query,
            None => self.entries.push((key, query)),
        }
        self
    }

    /// Overview page: status, balances and sync state
    pub fn dashboard() -> Self {
        Self::new("dashboard")
            .with("info", Query::Info)
            .with("wallet_info", Query::WalletInfo)
            .with("staking_info", Query::StakingInfo)
            .with("network_info", Query::NetworkInfo)
            .with("balance", Query::Balance)
            .with("unconfirmed_balance", Query::UnconfirmedBalance)
            .with("connection_count", Query::ConnectionCount)
            .with("superblock_age", Query::SuperblockAge)
    }

    /// Network page: node networking and connected peers
    pub fn network() -> Self {
        Self::new("network")
            .with("network_info", Query::NetworkInfo)
            .with("peer_info", Query::PeerInfo)
            .with("connection_count", Query::ConnectionCount)
    }

    /// Research page: BOINC researcher status and beacons
    pub fn research() -> Self {
        Self::new("research")
            .with("researcher_info", Query::ResearcherInfo)
            .with("research_accounts", Query::ResearchAccounts)
            .with("beacon_status", Query::BeaconStatus)
            .with("superblock_age", Query::SuperblockAge)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn entries(&self) -> &[(String, Query)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One outcome per declared bundle key, in declaration order
///
/// Serializes as a JSON object keyed by bundle key, each value an
/// [`RpcOutcome`] envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResult {
    entries: Vec<(String, RpcOutcome)>,
}

impl AggregatedResult {
    pub fn get(&self, key: &str) -> Option<&RpcOutcome> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, outcome)| outcome)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RpcOutcome)> {
        self.entries.iter().map(|(k, o)| (k.as_str(), o))
    }

    /// Keys whose sub-call failed, in declaration order
    pub fn failed_keys(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, outcome)| outcome.is_failure())
            .map(|(key, _)| key)
            .collect()
    }

    pub fn all_success(&self) -> bool {
        self.entries.iter().all(|(_, outcome)| outcome.is_success())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, RpcOutcome)> {
        self.entries
    }
}

impl IntoIterator for AggregatedResult {
    type Item = (String, RpcOutcome);
    type IntoIter = std::vec::IntoIter<(String, RpcOutcome)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for AggregatedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, outcome) in &self.entries {
            map.serialize_entry(key, outcome)?;
        }
        map.end()
    }
}

impl<T: Transport> RpcClient<T> {
    /// Fetch every query of a bundle
    ///
    /// Never short-circuits and never retries: the result always holds
    /// exactly the bundle's keys.
    #[tracing::instrument(skip(self, bundle), fields(bundle = %bundle.name(), keys = bundle.len()))]
    pub async fn fetch_bundle(&self, bundle: &Bundle) -> AggregatedResult {
        let start = Instant::now();

        let outcomes: Vec<RpcOutcome> = stream::iter(bundle.entries())
            .map(|(_, query)| self.query(query))
            .buffered(self.max_in_flight())
            .collect()
            .await;

        let entries = bundle
            .keys()
            .map(str::to_string)
            .zip(outcomes)
            .collect();
        let result = AggregatedResult { entries };

        let duration = start.elapsed().as_secs_f64();
        let failed = result.failed_keys();
        if let Some(m) = self.metrics() {
            m.record_bundle(bundle.name(), failed.len(), duration);
        }

        if failed.is_empty() {
            tracing::debug!(duration_secs = duration, "Bundle fetched");
        } else {
            tracing::warn!(failed_keys = ?failed, duration_secs = duration, "Bundle partially failed");
        }

        result
    }

    /// Fetch [`Bundle::dashboard`]
    pub async fn fetch_dashboard_bundle(&self) -> AggregatedResult {
        self.fetch_bundle(&Bundle::dashboard()).await
    }

    /// Fetch [`Bundle::network`]
    pub async fn fetch_network_bundle(&self) -> AggregatedResult {
        self.fetch_bundle(&Bundle::network()).await
    }

    /// Fetch [`Bundle::research`]
    pub async fn fetch_research_bundle(&self) -> AggregatedResult {
        self.fetch_bundle(&Bundle::research()).await
    }
}
