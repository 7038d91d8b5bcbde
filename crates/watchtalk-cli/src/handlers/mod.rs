//! Command handlers.
//!
//! Each handler takes the resolved settings plus its own arguments, wires
//! the controllers to console adapters, and reports through stdout.

pub mod ask;
pub mod config;
pub mod embed;
pub mod hold;
