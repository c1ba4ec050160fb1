//! Typed bridge events.

use crate::{
    DecodeError,
    abi::{
        IL1StandardBridge::{ERC20DepositInitiated, ETHDepositInitiated},
        IL2StandardBridge::WithdrawalInitiated,
        IL2ToL1MessagePasser::MessagePassed,
        IOptimismPortal::{WithdrawalFinalized, WithdrawalProven},
        IStateCommitmentChain::StateBatchAppended,
    },
};
use alloy_primitives::{B256, Log};
use alloy_sol_types::SolEvent;

/// A bridge event decoded from a raw log, keyed by its first topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// An ERC-20 deposit on the L1 bridge.
    Erc20DepositInitiated(ERC20DepositInitiated),
    /// An ETH deposit on the L1 bridge.
    EthDepositInitiated(ETHDepositInitiated),
    /// A withdrawal initiated on the L2 bridge.
    WithdrawalInitiated(WithdrawalInitiated),
    /// A withdrawal message recorded by the L2 message passer.
    MessagePassed(MessagePassed),
    /// A withdrawal proven on the L1 portal.
    WithdrawalProven(WithdrawalProven),
    /// A withdrawal finalized on the L1 portal.
    WithdrawalFinalized(WithdrawalFinalized),
    /// A state batch appended to the legacy state commitment chain.
    StateBatchAppended(StateBatchAppended),
}

impl BridgeEvent {
    /// Decodes `log` if its first topic is a known bridge event signature.
    ///
    /// Returns `Ok(None)` for anonymous logs and unknown signatures, and an error when the
    /// signature matches but the body does not.
    pub fn decode(log: &Log) -> Result<Option<Self>, DecodeError> {
        let Some(topic0) = log.topics().first() else {
            return Ok(None);
        };

        let event = match *topic0 {
            ERC20DepositInitiated::SIGNATURE_HASH => Self::Erc20DepositInitiated(decode(log)?),
            ETHDepositInitiated::SIGNATURE_HASH => Self::EthDepositInitiated(decode(log)?),
            WithdrawalInitiated::SIGNATURE_HASH => Self::WithdrawalInitiated(decode(log)?),
            MessagePassed::SIGNATURE_HASH => Self::MessagePassed(decode(log)?),
            WithdrawalProven::SIGNATURE_HASH => Self::WithdrawalProven(decode(log)?),
            WithdrawalFinalized::SIGNATURE_HASH => Self::WithdrawalFinalized(decode(log)?),
            StateBatchAppended::SIGNATURE_HASH => Self::StateBatchAppended(decode(log)?),
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    /// Returns the signature hash of the event.
    pub const fn signature_hash(&self) -> B256 {
        match self {
            Self::Erc20DepositInitiated(_) => ERC20DepositInitiated::SIGNATURE_HASH,
            Self::EthDepositInitiated(_) => ETHDepositInitiated::SIGNATURE_HASH,
            Self::WithdrawalInitiated(_) => WithdrawalInitiated::SIGNATURE_HASH,
            Self::MessagePassed(_) => MessagePassed::SIGNATURE_HASH,
            Self::WithdrawalProven(_) => WithdrawalProven::SIGNATURE_HASH,
            Self::WithdrawalFinalized(_) => WithdrawalFinalized::SIGNATURE_HASH,
            Self::StateBatchAppended(_) => StateBatchAppended::SIGNATURE_HASH,
        }
    }
}

fn decode<E: SolEvent>(log: &Log) -> Result<E, DecodeError> {
    E::decode_log(log)
        .map(|decoded| decoded.data)
        .map_err(|source| DecodeError::Event { event: E::SIGNATURE, source })
}
