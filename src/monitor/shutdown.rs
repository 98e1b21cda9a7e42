//! Cooperative shutdown signal for continuous monitoring

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{info, warn};

use crate::utils::Result;

#[derive(Debug, Default)]
struct Inner {
    triggered: Mutex<bool>,
    condvar: Condvar,
}

/// Shared flag that ends continuous monitoring
///
/// Clones observe the same flag. Waiting on the signal returns as soon as it
/// is triggered, so the interval sleep never delays shutdown.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown and wake all waiters
    pub fn trigger(&self) {
        let mut triggered = self.inner.triggered.lock();
        *triggered = true;
        self.inner.condvar.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        *self.inner.triggered.lock()
    }

    /// Sleep for up to `timeout`, returning early if shutdown is requested
    ///
    /// Returns true when the signal has been triggered.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut triggered = self.inner.triggered.lock();

        // Timeouts too large to represent as an Instant wait until triggered
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            while !*triggered {
                self.inner.condvar.wait(&mut triggered);
            }
            return true;
        };

        while !*triggered {
            if self
                .inner
                .condvar
                .wait_until(&mut triggered, deadline)
                .timed_out()
            {
                break;
            }
        }
        *triggered
    }

    /// Trigger this signal on Ctrl+C
    ///
    /// The listener runs on its own thread with a current-thread tokio runtime.
    pub fn install_ctrl_c_handler(&self) -> Result<JoinHandle<()>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let signal = self.clone();

        let handle = thread::Builder::new()
            .name("ctrl-c".to_string())
            .spawn(move || {
                runtime.block_on(async {
                    match tokio::signal::ctrl_c().await {
                        Ok(()) => {
                            info!("Interrupt received, stopping after the current step");
                            signal.trigger();
                        }
                        Err(e) => warn!(error = %e, "Unable to listen for Ctrl+C"),
                    }
                });
            })?;

        Ok(handle)
    }
}
