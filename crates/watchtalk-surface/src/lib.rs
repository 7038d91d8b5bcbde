#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod channel;
pub mod controller;
pub mod embed;
pub mod handle;

// Re-export key types for convenience
pub use channel::SurfaceChannel;
pub use controller::{HoldDelivery, HoldPhase, HoldState, PauseOnHoldConfig, PauseOnHoldController};
pub use embed::{EMBED_ALLOW_FEATURES, EmbedConfig};
pub use handle::RemoteSurfaceHandle;

#[cfg(test)]
use proptest as _;
