//! Solidity interfaces of the watched bridge contracts.
//!
//! Only the events and view functions the indexer consumes are declared.

#![allow(missing_docs)]

use alloy_sol_types::sol;

sol! {
    /// The L1 standard bridge. ETH and ERC-20 deposits are both initiated here.
    #[derive(Debug, PartialEq, Eq)]
    interface IL1StandardBridge {
        event ETHDepositInitiated(
            address indexed from,
            address indexed to,
            uint256 amount,
            bytes extraData
        );

        event ERC20DepositInitiated(
            address indexed l1Token,
            address indexed l2Token,
            address indexed from,
            address to,
            uint256 amount,
            bytes extraData
        );
    }

    /// The L2 standard bridge predeploy.
    #[derive(Debug, PartialEq, Eq)]
    interface IL2StandardBridge {
        event WithdrawalInitiated(
            address indexed l1Token,
            address indexed l2Token,
            address indexed from,
            address to,
            uint256 amount,
            bytes extraData
        );
    }

    /// The L2-to-L1 message passer predeploy, introduced by the Bedrock upgrade.
    #[derive(Debug, PartialEq, Eq)]
    interface IL2ToL1MessagePasser {
        event MessagePassed(
            uint256 indexed nonce,
            address indexed sender,
            address indexed target,
            uint256 value,
            uint256 gasLimit,
            bytes data,
            bytes32 withdrawalHash
        );
    }

    /// The L1 portal that proves and finalizes withdrawals after the Bedrock upgrade.
    #[derive(Debug, PartialEq, Eq)]
    interface IOptimismPortal {
        event WithdrawalProven(
            bytes32 indexed withdrawalHash,
            address indexed from,
            address indexed to
        );

        event WithdrawalFinalized(bytes32 indexed withdrawalHash, bool success);
    }

    /// The legacy L1 state commitment chain.
    #[derive(Debug, PartialEq, Eq)]
    interface IStateCommitmentChain {
        event StateBatchAppended(
            uint256 indexed batchIndex,
            bytes32 batchRoot,
            uint256 batchSize,
            uint256 prevTotalElements,
            bytes extraData
        );
    }

    /// ERC-20 metadata accessors.
    #[derive(Debug, PartialEq, Eq)]
    interface IERC20Metadata {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
    }
}
