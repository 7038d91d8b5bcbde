//! Remote surface handle: identity, readiness, and command channels.

use std::time::Duration;

use tokio::task::JoinHandle;
use watchtalk_core::{
    ChannelKind, ReadinessSignal, ReadinessTrigger, SurfaceCommand, SurfaceError, SurfaceId,
    fire_when_ready, readiness_pair,
};

use crate::channel::SurfaceChannel;

/// Opaque reference to one embedded video surface.
///
/// Owned by a single [`PauseOnHoldController`](crate::PauseOnHoldController),
/// which serializes every command sent through it.
#[derive(Debug)]
pub struct RemoteSurfaceHandle {
    surface_id: SurfaceId,
    readiness: ReadinessSignal,
    /// Kept sorted by [`ChannelKind`], highest priority first.
    channels: Vec<SurfaceChannel>,
    detached: bool,
    settle_task: Option<JoinHandle<()>>,
}

impl RemoteSurfaceHandle {
    /// Create a handle whose readiness is driven by `readiness`.
    pub fn new(surface_id: impl Into<SurfaceId>, readiness: ReadinessSignal) -> Self {
        Self {
            surface_id: surface_id.into(),
            readiness,
            channels: Vec::new(),
            detached: false,
            settle_task: None,
        }
    }

    /// Mount a surface that becomes ready once the process-wide player API
    /// is ready, the embed frame has loaded, and `settle` has elapsed.
    ///
    /// Returns the handle and the trigger the host fires on the frame's
    /// load event.
    pub fn mount(
        surface_id: impl Into<SurfaceId>,
        api_ready: ReadinessSignal,
        settle: Duration,
    ) -> (Self, ReadinessTrigger) {
        let (load_trigger, loaded) = readiness_pair();
        let (surface_trigger, readiness) = readiness_pair();
        let task = fire_when_ready(vec![api_ready, loaded], settle, surface_trigger);

        let mut handle = Self::new(surface_id, readiness);
        handle.settle_task = Some(task);
        tracing::debug!(
            surface_id = %handle.surface_id,
            settle_ms = settle.as_millis(),
            "Surface mounted, waiting for readiness"
        );
        (handle, load_trigger)
    }

    /// Register a command channel.
    #[must_use]
    pub fn with_channel(mut self, channel: SurfaceChannel) -> Self {
        self.add_channel(channel);
        self
    }

    pub fn add_channel(&mut self, channel: SurfaceChannel) {
        self.channels.push(channel);
        self.channels.sort_by_key(SurfaceChannel::kind);
    }

    pub const fn surface_id(&self) -> &SurfaceId {
        &self.surface_id
    }

    pub fn is_ready(&self) -> bool {
        !self.detached && self.readiness.is_ready()
    }

    pub const fn is_detached(&self) -> bool {
        self.detached
    }

    /// A clone of the readiness signal, for hosts that want to await it.
    pub fn readiness(&self) -> ReadinessSignal {
        self.readiness.clone()
    }

    /// Kinds of the registered channels, in priority order.
    pub fn channel_kinds(&self) -> Vec<ChannelKind> {
        self.channels.iter().map(SurfaceChannel::kind).collect()
    }

    /// Send `command` over the highest-priority channel.
    ///
    /// Lower-priority channels are not tried when the first one throws: the
    /// failure is reported so the caller can keep its indicator honest.
    pub fn dispatch(&self, command: SurfaceCommand) -> Result<ChannelKind, SurfaceError> {
        if self.detached {
            return Err(SurfaceError::Detached);
        }
        if !self.readiness.is_ready() {
            return Err(SurfaceError::NotReady);
        }
        let channel = self.channels.first().ok_or(SurfaceError::NoChannel)?;

        channel.send(command)?;
        Ok(channel.kind())
    }

    /// Unmount the surface. Every later dispatch fails with `Detached`.
    pub fn detach(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.channels.clear();
        if let Some(task) = self.settle_task.take() {
            task.abort();
        }
        tracing::debug!(surface_id = %self.surface_id, "Surface detached");
    }
}

impl Drop for RemoteSurfaceHandle {
    fn drop(&mut self) {
        if let Some(task) = self.settle_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use watchtalk_core::{MessagePort, PlayerApi};

    #[derive(Default, Clone)]
    struct CountingPlayer {
        pauses: Arc<AtomicUsize>,
    }

    impl PlayerApi for CountingPlayer {
        fn pause_video(&self) -> Result<(), SurfaceError> {
            self.pauses.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn play_video(&self) -> Result<(), SurfaceError> {
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    struct CountingPort {
        posts: Arc<AtomicUsize>,
    }

    impl MessagePort for CountingPort {
        fn post_message(&self, _data: &str, _target_origin: &str) -> Result<(), SurfaceError> {
            self.posts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct ThrowingPlayer;

    impl PlayerApi for ThrowingPlayer {
        fn pause_video(&self) -> Result<(), SurfaceError> {
            Err(SurfaceError::SendFailed("player destroyed".to_string()))
        }

        fn play_video(&self) -> Result<(), SurfaceError> {
            Err(SurfaceError::SendFailed("player destroyed".to_string()))
        }
    }

    #[test]
    fn direct_handle_wins_regardless_of_registration_order() {
        let player = CountingPlayer::default();
        let port = CountingPort::default();
        let handle = RemoteSurfaceHandle::new("abc", ReadinessSignal::ready())
            .with_channel(SurfaceChannel::message(port.clone(), "https://www.youtube.com"))
            .with_channel(SurfaceChannel::direct(player.clone()));

        assert_eq!(
            handle.channel_kinds(),
            vec![ChannelKind::DirectHandle, ChannelKind::MessageChannel]
        );
        assert_eq!(
            handle.dispatch(SurfaceCommand::Pause).unwrap(),
            ChannelKind::DirectHandle
        );
        assert_eq!(player.pauses.load(Ordering::SeqCst), 1);
        assert_eq!(port.posts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn message_channel_used_without_direct_handle() {
        let port = CountingPort::default();
        let handle = RemoteSurfaceHandle::new("abc", ReadinessSignal::ready())
            .with_channel(SurfaceChannel::message(port.clone(), "https://www.youtube.com"));

        assert_eq!(
            handle.dispatch(SurfaceCommand::Pause).unwrap(),
            ChannelKind::MessageChannel
        );
        assert_eq!(port.posts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn not_ready_surface_refuses_commands() {
        let (_trigger, signal) = readiness_pair();
        let player = CountingPlayer::default();
        let handle =
            RemoteSurfaceHandle::new("abc", signal).with_channel(SurfaceChannel::direct(player.clone()));

        assert!(matches!(
            handle.dispatch(SurfaceCommand::Pause),
            Err(SurfaceError::NotReady)
        ));
        assert_eq!(player.pauses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn ready_surface_without_channels() {
        let handle = RemoteSurfaceHandle::new("abc", ReadinessSignal::ready());
        assert!(matches!(
            handle.dispatch(SurfaceCommand::Pause),
            Err(SurfaceError::NoChannel)
        ));
    }

    #[test]
    fn failing_direct_handle_does_not_fall_back() {
        let port = CountingPort::default();
        let handle = RemoteSurfaceHandle::new("abc", ReadinessSignal::ready())
            .with_channel(SurfaceChannel::direct(ThrowingPlayer))
            .with_channel(SurfaceChannel::message(port.clone(), "https://www.youtube.com"));

        assert!(matches!(
            handle.dispatch(SurfaceCommand::Pause),
            Err(SurfaceError::SendFailed(_))
        ));
        assert_eq!(port.posts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn detached_surface_refuses_commands() {
        let mut handle = RemoteSurfaceHandle::new("abc", ReadinessSignal::ready())
            .with_channel(SurfaceChannel::direct(CountingPlayer::default()));
        handle.detach();

        assert!(!handle.is_ready());
        assert!(matches!(
            handle.dispatch(SurfaceCommand::Pause),
            Err(SurfaceError::Detached)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn mount_waits_for_api_load_and_settle() {
        let (api_trigger, api_ready) = readiness_pair();
        let (handle, load_trigger) =
            RemoteSurfaceHandle::mount("abc", api_ready, Duration::from_millis(1000));

        api_trigger.fire();
        load_trigger.fire();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!handle.is_ready());

        tokio::time::sleep(Duration::from_millis(501)).await;
        assert!(handle.is_ready());
    }
}
