//! Command line flags of the indexer.

use alloy_primitives::Address;
use boba_indexer_bindings::{BridgeAddresses, CustomBridge};
use boba_indexer_service::{IndexerConfig, IndexerError};
use clap::Args;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};
use url::Url;

/// Chain endpoints and the indexing loop.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexerArgs {
    /// L1 JSON-RPC endpoint.
    #[arg(long = "l1.rpc", env = "BOBA_INDEXER_L1_RPC_URL")]
    pub(crate) l1_rpc_url: Url,
    /// L2 JSON-RPC endpoint.
    #[arg(long = "l2.rpc", env = "BOBA_INDEXER_L2_RPC_URL")]
    pub(crate) l2_rpc_url: Url,
    /// Expected L1 chain id. Startup fails if the endpoint serves another chain.
    #[arg(long = "l1.chain-id", env = "BOBA_INDEXER_L1_CHAIN_ID")]
    pub(crate) l1_chain_id: Option<u64>,
    /// Expected L2 chain id. Startup fails if the endpoint serves another chain.
    #[arg(long = "l2.chain-id", env = "BOBA_INDEXER_L2_CHAIN_ID")]
    pub(crate) l2_chain_id: Option<u64>,
    /// Confirmations an L1 block needs before it is indexed.
    #[arg(long = "l1.conf-depth", default_value_t = 1, env = "BOBA_INDEXER_L1_CONF_DEPTH")]
    pub(crate) l1_conf_depth: u64,
    /// Confirmations an L2 block needs before it is indexed.
    #[arg(long = "l2.conf-depth", default_value_t = 1, env = "BOBA_INDEXER_L2_CONF_DEPTH")]
    pub(crate) l2_conf_depth: u64,
    /// Maximum number of headers indexed per update.
    #[arg(
        long = "max-header-batch-size",
        default_value_t = 500,
        env = "BOBA_INDEXER_MAX_HEADER_BATCH_SIZE"
    )]
    pub(crate) max_header_batch_size: u64,
    /// Seconds between polls of the chain head once caught up.
    #[arg(long = "poll-interval", default_value_t = 5, env = "BOBA_INDEXER_POLL_INTERVAL")]
    pub(crate) poll_interval: u64,
    /// Height both indexers start from on an empty database.
    #[arg(long = "start-block-number", env = "BOBA_INDEXER_START_BLOCK_NUMBER")]
    pub(crate) start_block_number: Option<u64>,
    /// Height the L1 indexer starts from on an empty database.
    #[arg(long = "l1.start-block-number", env = "BOBA_INDEXER_L1_START_BLOCK_NUMBER")]
    pub(crate) l1_start_block_number: Option<u64>,
    /// Height the L2 indexer starts from on an empty database.
    #[arg(long = "l2.start-block-number", env = "BOBA_INDEXER_L2_START_BLOCK_NUMBER")]
    pub(crate) l2_start_block_number: Option<u64>,
    /// Seconds before a single RPC request times out.
    #[arg(long = "rpc-timeout", default_value_t = 30, env = "BOBA_INDEXER_RPC_TIMEOUT")]
    pub(crate) rpc_timeout: u64,
    /// Seconds the loop pauses after a failed update.
    #[arg(long = "retry-delay", default_value_t = 10, env = "BOBA_INDEXER_RETRY_DELAY")]
    pub(crate) retry_delay: u64,
    /// Only serve the API.
    #[arg(long = "disable-indexer", env = "BOBA_INDEXER_DISABLE_INDEXER")]
    pub(crate) disable_indexer: bool,
    /// Index the portal prove and finalize events instead of the state commitment chain.
    #[arg(long = "post-upgrade", env = "BOBA_INDEXER_POST_UPGRADE")]
    pub(crate) post_upgrade: bool,
}

impl IndexerArgs {
    /// Per-request RPC deadline.
    pub(crate) const fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout)
    }

    /// Configuration of the L1 indexer.
    pub(crate) fn l1_config(&self) -> IndexerConfig {
        self.config(self.l1_conf_depth, self.l1_start_block_number)
    }

    /// Configuration of the L2 indexer.
    pub(crate) fn l2_config(&self) -> IndexerConfig {
        self.config(self.l2_conf_depth, self.l2_start_block_number)
    }

    fn config(&self, conf_depth: u64, start_block_number: Option<u64>) -> IndexerConfig {
        IndexerConfig {
            conf_depth,
            max_header_batch_size: self.max_header_batch_size,
            start_block_number: start_block_number.or(self.start_block_number).unwrap_or_default(),
            poll_interval: Duration::from_secs(self.poll_interval),
            retry_delay: Duration::from_secs(self.retry_delay),
        }
    }
}

/// Database connection.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct DbArgs {
    /// Database host.
    #[arg(
        id = "db.host",
        long = "db.host",
        default_value = "localhost",
        env = "BOBA_INDEXER_DB_HOST"
    )]
    pub(crate) host: String,
    /// Database port.
    #[arg(id = "db.port", long = "db.port", default_value_t = 5432, env = "BOBA_INDEXER_DB_PORT")]
    pub(crate) port: u16,
    /// Database user.
    #[arg(long = "db.user", default_value = "postgres", env = "BOBA_INDEXER_DB_USER")]
    pub(crate) user: String,
    /// Database password.
    #[arg(long = "db.password", default_value = "", env = "BOBA_INDEXER_DB_PASSWORD")]
    pub(crate) password: String,
    /// Database name.
    #[arg(long = "db.name", default_value = "indexer", env = "BOBA_INDEXER_DB_NAME")]
    pub(crate) name: String,
    /// Size of the connection pool.
    #[arg(
        long = "db.max-connections",
        default_value_t = 10,
        env = "BOBA_INDEXER_DB_MAX_CONNECTIONS"
    )]
    pub(crate) max_connections: u32,
}

impl DbArgs {
    /// Connection URL of the database. Credentials are percent-encoded.
    pub(crate) fn url(&self) -> eyre::Result<Url> {
        let mut url = Url::parse(&format!("postgres://{}", self.host))?;
        url.set_port(Some(self.port)).map_err(|_| eyre::eyre!("invalid database host"))?;
        url.set_username(&self.user).map_err(|_| eyre::eyre!("invalid database user"))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|_| eyre::eyre!("invalid database password"))?;
        }
        url.set_path(&self.name);
        Ok(url)
    }
}

/// REST API listener.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct RestArgs {
    /// Listen address of the API.
    #[arg(
        id = "rest.host",
        long = "rest.host",
        default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST),
        env = "BOBA_INDEXER_REST_HOST"
    )]
    pub(crate) host: IpAddr,
    /// Listen port of the API.
    #[arg(
        id = "rest.port",
        long = "rest.port",
        default_value_t = 8080,
        env = "BOBA_INDEXER_REST_PORT"
    )]
    pub(crate) port: u16,
}

impl RestArgs {
    /// The socket the API listens on.
    pub(crate) const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Addresses of the bridge contracts.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct BridgeArgs {
    /// L1 standard bridge.
    #[arg(long = "bridge.l1-standard", env = "BOBA_INDEXER_BRIDGE_L1_STANDARD")]
    pub(crate) l1_standard: Address,
    /// L1 bridge emitting the ETH deposit events. Defaults to the standard bridge.
    #[arg(long = "bridge.l1-eth", env = "BOBA_INDEXER_BRIDGE_L1_ETH")]
    pub(crate) l1_eth: Option<Address>,
    /// L1 portal. Required with `--post-upgrade`.
    #[arg(long = "bridge.portal", env = "BOBA_INDEXER_BRIDGE_PORTAL")]
    pub(crate) portal: Option<Address>,
    /// Legacy state commitment chain. Required without `--post-upgrade`.
    #[arg(
        long = "bridge.state-commitment-chain",
        env = "BOBA_INDEXER_BRIDGE_STATE_COMMITMENT_CHAIN"
    )]
    pub(crate) state_commitment_chain: Option<Address>,
    /// L2 standard bridge. Defaults to the predeploy.
    #[arg(long = "bridge.l2-standard", env = "BOBA_INDEXER_BRIDGE_L2_STANDARD")]
    pub(crate) l2_standard: Option<Address>,
    /// L2-to-L1 message passer. Defaults to the predeploy.
    #[arg(long = "bridge.l2-message-passer", env = "BOBA_INDEXER_BRIDGE_L2_MESSAGE_PASSER")]
    pub(crate) l2_message_passer: Option<Address>,
    /// Additional L1 bridges emitting the standard events, as `name=address`.
    #[arg(long = "bridge.custom", env = "BOBA_INDEXER_BRIDGE_CUSTOM", value_delimiter = ',')]
    pub(crate) custom: Vec<CustomBridge>,
}

impl BridgeArgs {
    /// The address book, with predeploy defaults filled in.
    pub(crate) fn addresses(&self) -> BridgeAddresses {
        let mut addresses = BridgeAddresses::new(self.l1_standard);
        if let Some(l1_eth) = self.l1_eth {
            addresses.l1_eth_bridge = l1_eth;
        }
        if let Some(l2_standard) = self.l2_standard {
            addresses.l2_standard_bridge = l2_standard;
        }
        if let Some(message_passer) = self.l2_message_passer {
            addresses.l2_message_passer = message_passer;
        }
        addresses.optimism_portal = self.portal;
        addresses.state_commitment_chain = self.state_commitment_chain;
        addresses.custom_bridges = self.custom.clone();
        addresses
    }

    /// Checks that the contract the indexing mode depends on is configured.
    pub(crate) fn validate(&self, post_upgrade: bool) -> Result<(), IndexerError> {
        match (post_upgrade, self.portal, self.state_commitment_chain) {
            (true, None, _) => {
                Err(IndexerError::Config("--bridge.portal is required with --post-upgrade".into()))
            }
            (false, _, None) => Err(IndexerError::Config(
                "--bridge.state-commitment-chain is required without --post-upgrade".into(),
            )),
            _ => Ok(()),
        }
    }
}
