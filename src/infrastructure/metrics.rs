// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

pub const CRAWLS_STARTED: &str = "crawlrelay_crawls_started_total";
pub const CRAWL_FAILURES: &str = "crawlrelay_crawl_failures_total";
pub const WEBHOOK_EVENTS: &str = "crawlrelay_webhook_events_total";
pub const POLLS: &str = "crawlrelay_polls_total";

/// 安装 Prometheus 导出器
///
/// 未启用时计数宏不会产生任何输出
pub fn init_metrics(settings: &MetricsSettings) -> anyhow::Result<()> {
    if !settings.enabled {
        return Ok(());
    }

    let addr: SocketAddr = settings.listen_addr.parse()?;

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return Ok(());
    }

    info!("Metrics exporter listening on {}", addr);
    Ok(())
}
