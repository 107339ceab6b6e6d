//! Shutdown coordination for the gateway.
//!
//! One [`Shutdown`] is created at startup. The signal listener holds a clone
//! and calls [`Shutdown::trigger`]; the server holds a [`ShutdownSignal`] and
//! stops accepting once it resolves.

use std::sync::Arc;

use tokio::sync::watch;

/// Trigger side of graceful shutdown.
#[derive(Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// A signal for one server or task. Subscribing after the trigger still
    /// observes it.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Release every current and future [`ShutdownSignal`].
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait side of graceful shutdown.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown is triggered, or once every [`Shutdown`] handle
    /// is gone and no trigger can arrive.
    pub async fn wait(mut self) {
        if self.rx.wait_for(|triggered| *triggered).await.is_err() {
            tracing::debug!("Shutdown coordinator dropped");
        }
    }
}
