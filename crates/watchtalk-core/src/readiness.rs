//! Single-fire readiness signal.
//!
//! A remote surface (and the provider's player API script before it) becomes
//! ready exactly once. Instead of a global "on ready" callback, the producer
//! holds a [`ReadinessTrigger`] and any number of observers hold a cloned
//! [`ReadinessSignal`]. Observers either poll [`ReadinessSignal::is_ready`]
//! synchronously on the event task or await [`ReadinessSignal::wait_ready`].
//!
//! Firing is idempotent: the second and later calls are ignored.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::Readiness;

/// Errors observed while waiting for readiness.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadinessError {
    /// The trigger was dropped without ever firing (surface unmounted).
    #[error("Readiness trigger dropped before firing")]
    Abandoned,
}

/// Producer side of a readiness signal.
#[derive(Debug)]
pub struct ReadinessTrigger {
    tx: watch::Sender<Readiness>,
}

/// Observer side of a readiness signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ReadinessSignal {
    rx: watch::Receiver<Readiness>,
}

/// Create a new, not-yet-fired readiness pair.
pub fn readiness_pair() -> (ReadinessTrigger, ReadinessSignal) {
    let (tx, rx) = watch::channel(Readiness::NotReady);
    (ReadinessTrigger { tx }, ReadinessSignal { rx })
}

impl ReadinessTrigger {
    /// Mark the resource ready.
    ///
    /// Returns `true` on the NotReady→Ready transition and `false` for any
    /// later call.
    pub fn fire(&self) -> bool {
        let fired = self.tx.send_if_modified(|readiness| {
            if readiness.is_ready() {
                false
            } else {
                *readiness = Readiness::Ready;
                true
            }
        });

        if fired {
            tracing::debug!("Readiness signal fired");
        } else {
            tracing::trace!("Readiness signal already fired, ignoring");
        }
        fired
    }

    /// Fire after `settle` has elapsed.
    ///
    /// The settle delay absorbs the window in which a freshly loaded surface
    /// reports itself loaded but still drops commands. It is a tolerance, not
    /// a guarantee callers can time against.
    pub fn fire_after(self, settle: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(settle).await;
            self.fire();
        })
    }

    /// Subscribe a new observer.
    pub fn subscribe(&self) -> ReadinessSignal {
        ReadinessSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl ReadinessSignal {
    /// A signal that is already ready, for surfaces with nothing to wait on.
    pub fn ready() -> Self {
        let (trigger, signal) = readiness_pair();
        trigger.fire();
        signal
    }

    /// Current readiness without waiting.
    pub fn current(&self) -> Readiness {
        *self.rx.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.current().is_ready()
    }

    /// Wait until the signal fires.
    ///
    /// Returns immediately if it already has.
    pub async fn wait_ready(&mut self) -> Result<(), ReadinessError> {
        self.rx
            .wait_for(|readiness| readiness.is_ready())
            .await
            .map(|_| ())
            .map_err(|_| ReadinessError::Abandoned)
    }
}

/// Fire `trigger` once every upstream signal is ready and `settle` has
/// elapsed after the last of them.
///
/// Used to chain the process-wide player-API signal and a surface's own load
/// signal into that surface's command readiness. If any upstream trigger is
/// dropped unfired, `trigger` is dropped unfired too.
pub fn fire_when_ready(
    upstream: Vec<ReadinessSignal>,
    settle: Duration,
    trigger: ReadinessTrigger,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        for mut signal in upstream {
            if let Err(e) = signal.wait_ready().await {
                tracing::warn!(error = %e, "Upstream readiness abandoned; surface will never be ready");
                return;
            }
        }
        tokio::time::sleep(settle).await;
        trigger.fire();
    })
}
