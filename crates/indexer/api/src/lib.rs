#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod error;
pub use error::{ApiError, ApiResult};

mod handlers;

mod router;
pub use router::router;

mod server;
pub use server::serve;

mod state;
pub use state::ApiState;

mod types;
pub use types::{PageQuery, StatusResponse};
