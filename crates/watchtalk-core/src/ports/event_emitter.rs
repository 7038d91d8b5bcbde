//! Event emitter trait for controller → host event delivery.
//!
//! Implementations handle transport details (channels, a terminal renderer,
//! a webview bridge, etc.).

use tokio::sync::mpsc;

use crate::events::ControllerEvent;

/// Trait for emitting controller events.
///
/// Keeps channel types out of the controllers' public API.
///
/// # Implementations
///
/// - [`NoopEmitter`] - for tests and contexts without a listener
/// - [`ChannelEmitter`] - forwards into an unbounded tokio channel
pub trait EventEmitter: Send + Sync {
    /// Emit an event. Must not block.
    fn emit(&self, event: ControllerEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn EventEmitter>;
}

/// Discards every event.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    pub const fn new() -> Self {
        Self
    }
}

impl EventEmitter for NoopEmitter {
    fn emit(&self, _event: ControllerEvent) {}

    fn clone_box(&self) -> Box<dyn EventEmitter> {
        Box::new(self.clone())
    }
}

/// Forwards events into an unbounded channel.
///
/// Delivery is best-effort: if the receiver is gone the event is logged
/// and dropped.
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<ControllerEvent>,
}

impl ChannelEmitter {
    /// Create an emitter and the receiver that observes it.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ControllerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventEmitter for ChannelEmitter {
    fn emit(&self, event: ControllerEvent) {
        if self.tx.send(event).is_err() {
            tracing::warn!("Controller event receiver dropped");
        }
    }

    fn clone_box(&self) -> Box<dyn EventEmitter> {
        Box::new(self.clone())
    }
}
