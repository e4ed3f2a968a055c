use tokio::sync::watch;

/// Spawn a task that flips the returned flag to `true` on Ctrl-C or SIGTERM.
pub fn shutdown_channel() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        wait_for_termination().await;
        log::info!("Shutdown requested, finishing the current pass.");
        tx.send_replace(true);
    });

    rx
}

#[cfg(unix)]
async fn wait_for_termination() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            log::warn!("Cannot listen for SIGTERM: {e}");
            ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = ctrl_c() => {}
        _ = sigterm.recv() => log::info!("Received SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_termination() {
    ctrl_c().await;
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Received Ctrl-C"),
        Err(e) => {
            log::warn!("Cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    }
}

/// Resolves once shutdown has been requested on `rx`.
/// Never resolves if the sending side is gone without asking for shutdown.
pub async fn requested(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
