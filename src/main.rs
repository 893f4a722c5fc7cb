// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crawlrelay::config::settings::Settings;
use crawlrelay::infrastructure::firecrawl::FirecrawlClient;
use crawlrelay::infrastructure::storage::JsonFileUrlStore;
use crawlrelay::presentation::routes;
use crawlrelay::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    // 1. Load configuration
    let settings = Arc::new(Settings::new()?);

    // 2. Initialize logging
    telemetry::init_telemetry(&settings.log);
    info!("Starting crawlrelay...");

    if settings.webhook.public_base_url.is_none() {
        warn!("SERVER_URL is not set; crawl requests will fail until it is configured");
    }
    if settings.firecrawl.api_key.is_none() {
        warn!("FIRECRAWL_API_KEY is not set; crawl and poll requests will fail until it is configured");
    }

    // 3. Initialize Prometheus Metrics
    crawlrelay::infrastructure::metrics::init_metrics(&settings.metrics)?;

    // 4. Open the URL store
    let store = Arc::new(JsonFileUrlStore::open(&settings.storage.path).await?);
    info!(path = %store.path().display(), "URL store ready");

    // 5. Initialize Firecrawl client
    let client = Arc::new(FirecrawlClient::from_settings(&settings.firecrawl)?);

    // 6. Start HTTP server
    let app = routes::app(store, client, settings.clone());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
