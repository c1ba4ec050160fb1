//! Table definitions, applied idempotently at startup.

pub(super) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS l1_blocks (
    hash        VARCHAR PRIMARY KEY NOT NULL,
    parent_hash VARCHAR NOT NULL,
    number      BIGINT NOT NULL UNIQUE,
    timestamp   BIGINT NOT NULL
);

CREATE TABLE IF NOT EXISTS l2_blocks (
    hash        VARCHAR PRIMARY KEY NOT NULL,
    parent_hash VARCHAR NOT NULL,
    number      BIGINT NOT NULL UNIQUE,
    timestamp   BIGINT NOT NULL
);

CREATE TABLE IF NOT EXISTS l1_tokens (
    address  VARCHAR PRIMARY KEY NOT NULL,
    name     VARCHAR NOT NULL,
    symbol   VARCHAR NOT NULL,
    decimals INTEGER NOT NULL CHECK (decimals >= 0 AND decimals <= 255)
);

CREATE TABLE IF NOT EXISTS l2_tokens (
    address  VARCHAR PRIMARY KEY NOT NULL,
    name     VARCHAR NOT NULL,
    symbol   VARCHAR NOT NULL,
    decimals INTEGER NOT NULL CHECK (decimals >= 0 AND decimals <= 255)
);

CREATE TABLE IF NOT EXISTS deposits (
    guid         UUID PRIMARY KEY NOT NULL,
    from_address VARCHAR NOT NULL,
    to_address   VARCHAR NOT NULL,
    l1_token     VARCHAR NOT NULL REFERENCES l1_tokens(address),
    l2_token     VARCHAR NOT NULL,
    amount       VARCHAR NOT NULL,
    data         BYTEA NOT NULL,
    log_index    BIGINT NOT NULL,
    block_hash   VARCHAR NOT NULL REFERENCES l1_blocks(hash),
    tx_hash      VARCHAR NOT NULL,
    UNIQUE (tx_hash, log_index)
);
CREATE INDEX IF NOT EXISTS deposits_from_address ON deposits(from_address);

CREATE TABLE IF NOT EXISTS withdrawals (
    guid                UUID PRIMARY KEY NOT NULL,
    from_address        VARCHAR NOT NULL,
    to_address          VARCHAR NOT NULL,
    l1_token            VARCHAR NOT NULL,
    l2_token            VARCHAR NOT NULL REFERENCES l2_tokens(address),
    amount              VARCHAR NOT NULL,
    data                BYTEA NOT NULL,
    log_index           BIGINT NOT NULL,
    block_hash          VARCHAR NOT NULL REFERENCES l2_blocks(hash),
    tx_hash             VARCHAR NOT NULL,
    withdrawal_hash     VARCHAR,
    proven_tx_hash      VARCHAR,
    proven_log_index    BIGINT,
    finalized_tx_hash   VARCHAR,
    finalized_log_index BIGINT,
    finalized_success   BOOLEAN,
    UNIQUE (tx_hash, log_index)
);
CREATE INDEX IF NOT EXISTS withdrawals_from_address ON withdrawals(from_address);
CREATE INDEX IF NOT EXISTS withdrawals_withdrawal_hash ON withdrawals(withdrawal_hash);

CREATE TABLE IF NOT EXISTS state_batches (
    index      BIGINT PRIMARY KEY NOT NULL,
    root       VARCHAR NOT NULL,
    size       BIGINT NOT NULL,
    prev_total BIGINT NOT NULL,
    extra_data BYTEA NOT NULL,
    block_hash VARCHAR NOT NULL REFERENCES l1_blocks(hash)
);

CREATE TABLE IF NOT EXISTS airdrops (
    address                VARCHAR PRIMARY KEY NOT NULL,
    voter_amount           VARCHAR NOT NULL,
    multisig_signer_amount VARCHAR NOT NULL,
    gitcoin_amount         VARCHAR NOT NULL,
    active_bridged_amount  VARCHAR NOT NULL,
    op_user_amount         VARCHAR NOT NULL,
    op_repeat_user_amount  VARCHAR NOT NULL,
    bonus_amount           VARCHAR NOT NULL,
    total_amount           VARCHAR NOT NULL
);
"#;
