use ration_bridge::{StoreChannels, StoreEvent};

fn main() {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .expect("failed to build logger instance");

    let channels = StoreChannels::default();
    ration_store::run(channels.store_rx, channels.store_tx);

    // Headless shell: stands in for a graphical collaborator by logging
    // store events. The command channel stays open so an attached UI can
    // take over without rewiring.
    let mut ui_rx = channels.ui_rx;
    let _ui_tx = channels.ui_tx;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime");

    runtime.block_on(async move {
        while let Some(event) = ui_rx.recv().await {
            match event {
                StoreEvent::ErrorShown(message) => log::warn!("{message}"),
                StoreEvent::SessionExpired => {
                    log::warn!("Session expired, please authenticate again")
                }
                other => log::info!("Store event: {other:?}"),
            }
        }
    });
}
