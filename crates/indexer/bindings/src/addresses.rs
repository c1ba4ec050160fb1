//! Addresses of the watched bridge contracts.

use alloy_primitives::{Address, address};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The L2 standard bridge predeploy.
pub const L2_STANDARD_BRIDGE: Address = address!("0x4200000000000000000000000000000000000010");

/// The L2-to-L1 message passer predeploy.
pub const L2_TO_L1_MESSAGE_PASSER: Address = address!("0x4200000000000000000000000000000000000016");

/// The legacy L2 representation of native ETH.
pub const LEGACY_L2_ETH: Address = address!("0xdeaddeaddeaddeaddeaddeaddeaddeaddead0000");

/// An additional L1 bridge emitting the standard bridge events, identified by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomBridge {
    /// Name used in logs.
    pub name: String,
    /// The L1 contract address.
    pub address: Address,
}

/// Error parsing a `name=address` custom bridge flag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomBridgeParseError {
    /// The value is not of the form `name=address`.
    #[error("expected `name=address`, got `{0}`")]
    Format(String),
    /// The address half is not a valid hex address.
    #[error("invalid bridge address `{0}`")]
    Address(String),
}

impl FromStr for CustomBridge {
    type Err = CustomBridgeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, address) =
            s.split_once('=').ok_or_else(|| CustomBridgeParseError::Format(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CustomBridgeParseError::Format(s.to_string()));
        }
        let address = Address::from_str(address.trim())
            .map_err(|_| CustomBridgeParseError::Address(address.to_string()))?;
        Ok(Self { name: name.to_string(), address })
    }
}

impl fmt::Display for CustomBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.address)
    }
}

/// The address book of every contract the indexer reads events from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeAddresses {
    /// L1 standard bridge, source of ERC-20 deposits.
    pub l1_standard_bridge: Address,
    /// L1 bridge emitting ETH deposits. Usually the standard bridge itself.
    pub l1_eth_bridge: Address,
    /// Additional L1 bridges emitting the standard events.
    pub custom_bridges: Vec<CustomBridge>,
    /// The L1 portal. Required after the Bedrock upgrade.
    pub optimism_portal: Option<Address>,
    /// The legacy state commitment chain. Required before the Bedrock upgrade.
    pub state_commitment_chain: Option<Address>,
    /// The L2 standard bridge.
    pub l2_standard_bridge: Address,
    /// The L2-to-L1 message passer.
    pub l2_message_passer: Address,
}

impl BridgeAddresses {
    /// Creates an address book with the L1 standard bridge and the L2 predeploys.
    pub const fn new(l1_standard_bridge: Address) -> Self {
        Self {
            l1_standard_bridge,
            l1_eth_bridge: l1_standard_bridge,
            custom_bridges: Vec::new(),
            optimism_portal: None,
            state_commitment_chain: None,
            l2_standard_bridge: L2_STANDARD_BRIDGE,
            l2_message_passer: L2_TO_L1_MESSAGE_PASSER,
        }
    }
}
