#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod abi;

mod addresses;
pub use addresses::{
    BridgeAddresses, CustomBridge, CustomBridgeParseError, L2_STANDARD_BRIDGE,
    L2_TO_L1_MESSAGE_PASSER, LEGACY_L2_ETH,
};

mod error;
pub use error::DecodeError;

mod event;
pub use event::BridgeEvent;
