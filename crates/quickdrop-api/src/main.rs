use quickdrop_api::{setup, telemetry};
use quickdrop_core::Config;
use quickdrop_registry::Janitor;
use tokio_util::sync::CancellationToken;

// mimalloc keeps allocator fragmentation down under concurrent uploads,
// especially on musl-based container images.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_telemetry();

    let config = Config::from_env()?;

    let (state, router) = setup::initialize_app(config.clone()).await?;

    let shutdown = CancellationToken::new();
    let janitor = Janitor::new(
        state.registry.clone(),
        state.store.clone(),
        config.cleanup_interval,
        config.link_ttl,
    );
    let janitor_handle = janitor.start(shutdown.clone());

    setup::server::start_server(&config, router).await?;

    // server has drained; stop the janitor before exiting
    shutdown.cancel();
    let _ = janitor_handle.await;

    Ok(())
}
