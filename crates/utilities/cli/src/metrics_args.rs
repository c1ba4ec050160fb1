//! Prometheus exporter flags.

use crate::{PrometheusError, init_prometheus_server};
use clap::Args;
use std::net::{IpAddr, Ipv4Addr};

/// Configuration for the Prometheus metrics exporter.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MetricsArgs {
    /// Serve Prometheus metrics.
    #[arg(
        id = "metrics.enabled",
        long = "metrics.enabled",
        global = true,
        default_value_t = false,
        env = "BOBA_INDEXER_METRICS_ENABLED"
    )]
    pub enabled: bool,
    /// Listen address of the metrics server.
    #[arg(
        id = "metrics.addr",
        long = "metrics.addr",
        global = true,
        default_value = "0.0.0.0",
        env = "BOBA_INDEXER_METRICS_ADDR"
    )]
    pub addr: IpAddr,
    /// Listen port of the metrics server.
    #[arg(
        id = "metrics.port",
        long = "metrics.port",
        global = true,
        default_value_t = 7300,
        env = "BOBA_INDEXER_METRICS_PORT"
    )]
    pub port: u16,
}

impl Default for MetricsArgs {
    fn default() -> Self {
        Self { enabled: false, addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 7300 }
    }
}

impl MetricsArgs {
    /// Installs the Prometheus recorder and HTTP listener if metrics are enabled.
    ///
    /// Metrics recorded before this call, or while it is disabled, go to the no-op recorder.
    pub fn init_metrics(&self) -> Result<(), PrometheusError> {
        if self.enabled {
            init_prometheus_server(self.addr, self.port)?;
        }
        Ok(())
    }
}
