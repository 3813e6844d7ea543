//! Intentionally vulnerable HTTP handlers for exercising static scanners.
//!
//! Two fixtures share this crate: the command fixture formats query parameters
//! into shell command lines, the path fixture builds filesystem paths from them.
//! Neither sanitizes anything. Do not expose these servers to untrusted networks.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

use handler::Fixture;
use std::sync::Arc;

/// Load configuration, build the runtime and serve `fixture` until SIGINT/SIGTERM
///
/// `config_path` names the config file without extension.
pub fn run(fixture: Fixture, config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load_from(config_path)?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(fixture, cfg))
}

async fn async_main(
    fixture: Fixture,
    cfg: config::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr(fixture.default_port())?;
    let listener = server::create_listener(addr)?;
    logger::log_server_start(fixture, &addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg, fixture));
    let shutdown = Arc::new(tokio::sync::Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state, shutdown))
        .await
}
