//! Catalog of daemon operations
//!
//! Each [`Query`] names one daemon method together with its positional
//! parameter rule. The typed wrappers on [`RpcClient`] build a `Query` and
//! return the transport outcome unmodified; result payloads are never
//! interpreted here.
//!
//! # Examples
//!
//! ```rust
//! use gridrpc_client::{Query, UnspentFilter};
//! use serde_json::json;
//!
//! let query = Query::list_transactions(None);
//! assert_eq!(query.method(), "listtransactions");
//! assert_eq!(query.params(), vec![json!("*"), json!(10)]);
//!
//! let utxos = Query::ListUnspent(UnspentFilter::for_address("SAbc"));
//! assert_eq!(utxos.params(), vec![json!(1), json!(9999999), json!(["SAbc"])]);
//! ```

use crate::transport::Transport;
use crate::RpcClient;
use gridrpc_core::RpcOutcome;
use serde_json::{json, Value};

/// Transactions returned by `listtransactions` when no count is given
pub const DEFAULT_TRANSACTION_COUNT: u32 = 10;
/// Default minimum confirmations for output and receipt queries
pub const DEFAULT_MIN_CONF: u32 = 1;
/// Default maximum confirmations for `listunspent`
pub const DEFAULT_MAX_CONF: u32 = 9_999_999;

/// Account marker meaning "all accounts" for `listtransactions`
const ALL_ACCOUNTS: &str = "*";

/// One named daemon operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `getinfo`: general wallet and chain status
    Info,
    /// `getwalletinfo`
    WalletInfo,
    /// `getblockchaininfo`
    BlockchainInfo,
    /// `getnetworkinfo`
    NetworkInfo,
    /// `getpeerinfo`
    PeerInfo,
    /// `getmininginfo`
    MiningInfo,
    /// `getmininginfo`, as shown on the research view
    ResearcherInfo,
    /// `listresearcheraccounts`
    ResearchAccounts,
    /// `getstakinginfo`
    StakingInfo,
    /// `getbalance`
    Balance,
    /// `getunconfirmedbalance`
    UnconfirmedBalance,
    /// `listtransactions "*" count`
    ListTransactions { count: u32 },
    /// `listunspent minconf maxconf [addresses]`
    ListUnspent(UnspentFilter),
    /// `listaddressgroupings`
    AddressGroupings,
    /// `getreceivedbyaddress address minconf`
    ReceivedByAddress { address: String, min_conf: u32 },
    /// `listpolls`
    Polls,
    /// `superblockage`
    SuperblockAge,
    /// `getconnectioncount`
    ConnectionCount,
    /// `beaconstatus`
    BeaconStatus,
}

impl Query {
    pub fn list_transactions(count: Option<u32>) -> Self {
        Query::ListTransactions {
            count: count.unwrap_or(DEFAULT_TRANSACTION_COUNT),
        }
    }

    pub fn received_by_address(address: impl Into<String>, min_conf: Option<u32>) -> Self {
        Query::ReceivedByAddress {
            address: address.into(),
            min_conf: min_conf.unwrap_or(DEFAULT_MIN_CONF),
        }
    }

    /// Daemon method name
    pub fn method(&self) -> &'static str {
        match self {
            Query::Info => "getinfo",
            Query::WalletInfo => "getwalletinfo",
            Query::BlockchainInfo => "getblockchaininfo",
            Query::NetworkInfo => "getnetworkinfo",
            Query::PeerInfo => "getpeerinfo",
            Query::MiningInfo | Query::ResearcherInfo => "getmininginfo",
            Query::ResearchAccounts => "listresearcheraccounts",
            Query::StakingInfo => "getstakinginfo",
            Query::Balance => "getbalance",
            Query::UnconfirmedBalance => "getunconfirmedbalance",
            Query::ListTransactions { .. } => "listtransactions",
            Query::ListUnspent(_) => "listunspent",
            Query::AddressGroupings => "listaddressgroupings",
            Query::ReceivedByAddress { .. } => "getreceivedbyaddress",
            Query::Polls => "listpolls",
            Query::SuperblockAge => "superblockage",
            Query::ConnectionCount => "getconnectioncount",
            Query::BeaconStatus => "beaconstatus",
        }
    }

    /// Positional parameters for the call
    pub fn params(&self) -> Vec<Value> {
        match self {
            Query::ListTransactions { count } => vec![json!(ALL_ACCOUNTS), json!(count)],
            Query::ListUnspent(filter) => filter.params(),
            Query::ReceivedByAddress { address, min_conf } => vec![json!(address), json!(min_conf)],
            _ => Vec::new(),
        }
    }
}

/// Confirmation window and optional address filter for `listunspent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnspentFilter {
    pub min_conf: u32,
    pub max_conf: u32,
    /// Sent only when non-empty
    pub addresses: Vec<String>,
}

impl Default for UnspentFilter {
    fn default() -> Self {
        Self {
            min_conf: DEFAULT_MIN_CONF,
            max_conf: DEFAULT_MAX_CONF,
            addresses: Vec::new(),
        }
    }
}

impl UnspentFilter {
    /// Outputs of a single address with the default confirmation window
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            addresses: vec![address.into()],
            ..Default::default()
        }
    }

    pub fn with_confirmations(mut self, min_conf: u32, max_conf: u32) -> Self {
        self.min_conf = min_conf;
        self.max_conf = max_conf;
        self
    }

    pub fn with_addresses<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.addresses = addresses.into_iter().map(Into::into).collect();
        self
    }

    fn params(&self) -> Vec<Value> {
        let mut params = vec![json!(self.min_conf), json!(self.max_conf)];
        if !self.addresses.is_empty() {
            params.push(json!(self.addresses));
        }
        params
    }
}

impl<T: Transport> RpcClient<T> {
    /// Run one catalog operation
    pub async fn query(&self, query: &Query) -> RpcOutcome {
        self.send(query.method(), query.params()).await
    }

    pub async fn get_info(&self) -> RpcOutcome {
        self.query(&Query::Info).await
    }

    pub async fn get_wallet_info(&self) -> RpcOutcome {
        self.query(&Query::WalletInfo).await
    }

    pub async fn get_blockchain_info(&self) -> RpcOutcome {
        self.query(&Query::BlockchainInfo).await
    }

    pub async fn get_network_info(&self) -> RpcOutcome {
        self.query(&Query::NetworkInfo).await
    }

    pub async fn get_peer_info(&self) -> RpcOutcome {
        self.query(&Query::PeerInfo).await
    }

    pub async fn get_mining_info(&self) -> RpcOutcome {
        self.query(&Query::MiningInfo).await
    }

    /// Researcher (BOINC) status; the daemon reports it through `getmininginfo`
    pub async fn get_researcher_info(&self) -> RpcOutcome {
        self.query(&Query::ResearcherInfo).await
    }

    pub async fn list_research_accounts(&self) -> RpcOutcome {
        self.query(&Query::ResearchAccounts).await
    }

    pub async fn get_staking_info(&self) -> RpcOutcome {
        self.query(&Query::StakingInfo).await
    }

    pub async fn get_balance(&self) -> RpcOutcome {
        self.query(&Query::Balance).await
    }

    pub async fn get_unconfirmed_balance(&self) -> RpcOutcome {
        self.query(&Query::UnconfirmedBalance).await
    }

    /// Most recent wallet transactions across all accounts
    ///
    /// `None` asks for [`DEFAULT_TRANSACTION_COUNT`] entries.
    pub async fn list_transactions(&self, count: Option<u32>) -> RpcOutcome {
        self.query(&Query::list_transactions(count)).await
    }

    pub async fn list_unspent(&self, filter: &UnspentFilter) -> RpcOutcome {
        self.query(&Query::ListUnspent(filter.clone())).await
    }

    pub async fn list_address_groupings(&self) -> RpcOutcome {
        self.query(&Query::AddressGroupings).await
    }

    pub async fn get_received_by_address(&self, address: &str, min_conf: Option<u32>) -> RpcOutcome {
        self.query(&Query::received_by_address(address, min_conf)).await
    }

    pub async fn list_polls(&self) -> RpcOutcome {
        self.query(&Query::Polls).await
    }

    pub async fn get_superblock_age(&self) -> RpcOutcome {
        self.query(&Query::SuperblockAge).await
    }

    pub async fn get_connection_count(&self) -> RpcOutcome {
        self.query(&Query::ConnectionCount).await
    }

    pub async fn get_beacon_status(&self) -> RpcOutcome {
        self.query(&Query::BeaconStatus).await
    }
}
