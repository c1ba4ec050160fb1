#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

use clap::Parser;

mod cli;
mod flags;
mod signal;

fn main() -> eyre::Result<()> {
    boba_indexer_cli::backtrace::enable();

    let cli = cli::Cli::parse();
    tokio::runtime::Builder::new_multi_thread().enable_all().build()?.block_on(cli.run())
}
