//! Demo server binary: seeds an in-memory store with a handful of rows per
//! family and serves the timeline HTTP layer on top of it. A real deployment
//! swaps `timeline_store::MemoryStore` for a document-store-backed `Store`
//! impl without `timeline-core` or `timeline-api` changing at all.

use std::net::SocketAddr;
use timeline_api::config::Config;
use timeline_core::model::{Block, Mosaic, MosaicAlias};
use timeline_store::MemoryStore;

fn seed_store() -> MemoryStore {
    let blocks = (1..=200).map(|height| Block { height, hash: [height as u8; 32] });
    let mosaics = [
        Mosaic { id: [0x1; 8], start_height: 1, object_id: [0x11; 12] },
        Mosaic { id: [0x2; 8], start_height: 50, object_id: [0x22; 12] },
    ];

    MemoryStore::seed()
        .with_blocks(blocks)
        .with_mosaics(mosaics)
        .with_mosaic_alias(MosaicAlias::Currency, [0x1; 8])
        .build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    tracing::info!(?config.network_id, pool_endpoint = %config.pool_endpoint, "loaded configuration");

    let store = seed_store();
    let router = timeline_api::build_router(store, config);

    let addr: SocketAddr = std::env::var("TIMELINE_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        .parse()?;

    tracing::info!(%addr, "chain-timeline listening");
    axum::Server::bind(&addr).serve(router.into_make_service()).await?;

    Ok(())
}
