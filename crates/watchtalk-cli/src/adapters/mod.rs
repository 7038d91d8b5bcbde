//! Console adapters for the controller ports.
//!
//! There is no browser here: the "surface" prints what it would have been
//! sent and the speech engines follow a script.

pub mod speech;
pub mod surface;

pub use speech::{ConsoleSynthesizer, ScriptedRecognizer};
pub use surface::{ConsoleMessagePort, ConsolePlayer};
