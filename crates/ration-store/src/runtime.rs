//! Store runtime setup and orchestration.
//!
//! This module wires together configuration, local storage, the HTTP data
//! service, and the command dispatch loop that listens to collaborator
//! requests.

use std::{sync::Arc, thread};

use ration_api::{DataService, HttpDataService};
use ration_bridge::{StoreCommand, StoreEvent};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::app::StoreContext;
use crate::persist::{FileStore, LocalStore, StoredTokens};

/// Initialize the store and start processing collaborator commands.
async fn setup_store(rx: Receiver<StoreCommand>, tx: Sender<StoreEvent>) {
    let paths = crate::config::resolve_paths().expect("failed to resolve user's directories");
    let config = crate::config::load_config(&paths)
        .await
        .expect("failed to load config");

    let local: Arc<dyn LocalStore> = Arc::new(
        FileStore::open(paths.storage_path).expect("failed to open local storage"),
    );
    let tokens = Arc::new(StoredTokens::new(local.clone()));
    let service: Arc<dyn DataService> = Arc::new(HttpDataService::new(&config, tokens));

    let context = StoreContext::new(service, local, tx);
    context.initialize().await;
    context.consume_commands(rx).await;
}

/// Spawn the store runtime and begin processing collaborator commands.
pub fn run(rx: Receiver<StoreCommand>, tx: Sender<StoreEvent>) {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");
        runtime.block_on(async { setup_store(rx, tx).await });
    });
}
