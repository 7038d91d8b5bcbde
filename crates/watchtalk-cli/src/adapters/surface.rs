//! Surface adapters that print the commands they receive.

use watchtalk_core::{MessagePort, PlayerApi, SurfaceError};

/// Stands in for a direct handle to the player API.
#[derive(Debug, Clone, Default)]
pub struct ConsolePlayer {
    fail: bool,
}

impl ConsolePlayer {
    pub const fn new() -> Self {
        Self { fail: false }
    }

    /// Every call throws, as a destroyed player would.
    #[must_use]
    pub const fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn call(&self, function: &str) -> Result<(), SurfaceError> {
        if self.fail {
            return Err(SurfaceError::SendFailed(format!(
                "player rejected {function}()"
            )));
        }
        println!("  ▶ player.{function}()");
        Ok(())
    }
}

impl PlayerApi for ConsolePlayer {
    fn pause_video(&self) -> Result<(), SurfaceError> {
        self.call("pauseVideo")
    }

    fn play_video(&self) -> Result<(), SurfaceError> {
        self.call("playVideo")
    }
}

/// Stands in for the embed frame's `postMessage` channel.
#[derive(Debug, Clone, Default)]
pub struct ConsoleMessagePort {
    fail: bool,
}

impl ConsoleMessagePort {
    pub const fn new() -> Self {
        Self { fail: false }
    }

    #[must_use]
    pub const fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl MessagePort for ConsoleMessagePort {
    fn post_message(&self, data: &str, target_origin: &str) -> Result<(), SurfaceError> {
        if self.fail {
            return Err(SurfaceError::SendFailed("frame is gone".to_string()));
        }
        println!("  ▶ postMessage({data}, \"{target_origin}\")");
        Ok(())
    }
}
