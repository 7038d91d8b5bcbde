//! Hold-to-pause controller.
//!
//! Binds the hold key to pause commands on one [`RemoteSurfaceHandle`].
//! All methods run on the host's event task; nothing here blocks or awaits.

use watchtalk_core::{
    ChannelKind, ControllerEvent, EventEmitter, HoldKey, InputTarget, KeyDisposition, KeyInput,
    ReleasePolicy, Settings, SurfaceCommand, SurfaceError, is_text_entry_target,
};

use crate::handle::RemoteSurfaceHandle;

/// Hold-to-pause configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseOnHoldConfig {
    pub hold_key: HoldKey,
    pub release_policy: ReleasePolicy,
}

impl Default for PauseOnHoldConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for PauseOnHoldConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            hold_key: settings.effective_hold_key(),
            release_policy: settings.effective_release_policy(),
        }
    }
}

/// What happened to the pause command issued when a hold started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldDelivery {
    /// Surface not ready; the command was dropped, not queued.
    Dropped,
    /// The channel threw.
    Failed,
    Delivered(ChannelKind),
}

/// The hold in progress. Recreated for every key-down/key-up pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldState {
    /// The key value as it was pressed (case preserved).
    pub key: String,
    pub source: InputTarget,
    pub delivery: HoldDelivery,
}

/// Externally visible phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldPhase {
    Idle,
    /// Key is down but its pause never reached the surface. Auto-repeat is
    /// swallowed until the key is released.
    Latched,
    /// Key is down and the surface was paused.
    Holding,
}

/// Pauses a remote surface while the hold key is down.
pub struct PauseOnHoldController {
    config: PauseOnHoldConfig,
    surface: RemoteSurfaceHandle,
    hold: Option<HoldState>,
    paused: bool,
    emitter: Box<dyn EventEmitter>,
}

impl PauseOnHoldController {
    pub fn new(
        config: PauseOnHoldConfig,
        surface: RemoteSurfaceHandle,
        emitter: Box<dyn EventEmitter>,
    ) -> Self {
        Self {
            config,
            surface,
            hold: None,
            paused: false,
            emitter,
        }
    }

    pub const fn surface(&self) -> &RemoteSurfaceHandle {
        &self.surface
    }

    pub const fn hold(&self) -> Option<&HoldState> {
        self.hold.as_ref()
    }

    pub const fn phase(&self) -> HoldPhase {
        match &self.hold {
            None => HoldPhase::Idle,
            Some(HoldState {
                delivery: HoldDelivery::Delivered(_),
                ..
            }) => HoldPhase::Holding,
            Some(_) => HoldPhase::Latched,
        }
    }

    /// Whether the paused indicator is showing.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Indicator text, present only while the indicator is on. The hold
    /// key is named only while it is held; a resume that failed leaves the
    /// indicator on after release.
    pub fn indicator_label(&self) -> Option<String> {
        if !self.paused {
            return None;
        }
        Some(match self.hold {
            Some(_) => format!("Video paused (holding {})", self.config.hold_key.label()),
            None => "Video paused".to_string(),
        })
    }

    /// Handle a key-down event.
    pub fn on_hold_start(&mut self, input: &KeyInput) -> KeyDisposition {
        if !self.config.hold_key.matches(&input.key) || is_text_entry_target(&input.target) {
            return KeyDisposition::Ignored;
        }
        if self.surface.is_detached() {
            return KeyDisposition::Ignored;
        }

        if self.hold.is_some() {
            // Auto-repeat (or a second down without an up): still ours.
            return KeyDisposition::Consumed;
        }
        if input.repeat {
            // The first down of this press went somewhere else (a text field).
            return KeyDisposition::Ignored;
        }

        let delivery = match self.issue_pause_command() {
            Ok(channel) => HoldDelivery::Delivered(channel),
            Err(SurfaceError::NotReady) => HoldDelivery::Dropped,
            Err(_) => HoldDelivery::Failed,
        };

        self.hold = Some(HoldState {
            key: input.key.clone(),
            source: input.target.clone(),
            delivery,
        });
        tracing::debug!(
            surface_id = %self.surface.surface_id(),
            phase = ?self.phase(),
            "Hold started"
        );
        KeyDisposition::Consumed
    }

    /// Handle a key-up event.
    ///
    /// Key-ups are not filtered by target: focus may have moved into a text
    /// field while the key was held.
    pub fn on_hold_end(&mut self, input: &KeyInput) -> KeyDisposition {
        if !self.config.hold_key.matches(&input.key) {
            return KeyDisposition::Ignored;
        }
        let Some(hold) = self.hold.take() else {
            return KeyDisposition::Ignored;
        };

        if matches!(hold.delivery, HoldDelivery::Delivered(_)) {
            match self.config.release_policy {
                ReleasePolicy::ClearIndicator => self.set_paused(false),
                ReleasePolicy::Resume => {
                    if self.send(SurfaceCommand::Play).is_ok() {
                        self.set_paused(false);
                    }
                }
            }
        }

        tracing::debug!(
            surface_id = %self.surface.surface_id(),
            delivery = ?hold.delivery,
            "Hold ended"
        );
        KeyDisposition::Consumed
    }

    /// Send a pause command over the highest-priority channel.
    ///
    /// Not-ready surfaces drop the command; nothing is queued for later.
    /// The paused indicator turns on only when the send succeeds.
    pub fn issue_pause_command(&mut self) -> Result<ChannelKind, SurfaceError> {
        let channel = self.send(SurfaceCommand::Pause)?;
        self.set_paused(true);
        Ok(channel)
    }

    /// Unmount the surface. The controller ignores all input afterwards.
    pub fn detach(&mut self) {
        self.hold = None;
        self.set_paused(false);
        self.surface.detach();
    }

    fn send(&self, command: SurfaceCommand) -> Result<ChannelKind, SurfaceError> {
        let surface_id = self.surface.surface_id().clone();

        match self.surface.dispatch(command) {
            Ok(channel) => {
                tracing::debug!(%surface_id, %command, ?channel, "Command delivered");
                self.emitter.emit(ControllerEvent::CommandDelivered {
                    surface_id,
                    command,
                    channel,
                });
                Ok(channel)
            }
            Err(SurfaceError::NotReady) => {
                tracing::info!(%surface_id, %command, "Surface not ready, command dropped");
                self.emitter
                    .emit(ControllerEvent::CommandDropped { surface_id, command });
                Err(SurfaceError::NotReady)
            }
            Err(e) => {
                tracing::warn!(%surface_id, %command, error = %e, "Command send failed");
                self.emitter.emit(ControllerEvent::CommandFailed {
                    surface_id,
                    command,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        self.emitter.emit(ControllerEvent::pause_indicator(
            self.surface.surface_id().clone(),
            paused,
        ));
    }
}

impl std::fmt::Debug for PauseOnHoldController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PauseOnHoldController")
            .field("config", &self.config)
            .field("surface", &self.surface)
            .field("hold", &self.hold)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::SurfaceChannel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use watchtalk_core::{PlayerApi, ReadinessSignal, readiness_pair};

    #[derive(Clone, Default)]
    struct RecordingEmitter {
        events: Arc<Mutex<Vec<ControllerEvent>>>,
    }

    impl RecordingEmitter {
        fn indicator_changes(&self) -> Vec<bool> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e {
                    ControllerEvent::PauseIndicatorChanged { paused, .. } => Some(*paused),
                    _ => None,
                })
                .collect()
        }
    }

    impl EventEmitter for RecordingEmitter {
        fn emit(&self, event: ControllerEvent) {
            self.events.lock().unwrap().push(event);
        }

        fn clone_box(&self) -> Box<dyn EventEmitter> {
            Box::new(self.clone())
        }
    }

    #[derive(Clone, Default)]
    struct MockPlayer {
        pauses: Arc<AtomicUsize>,
        plays: Arc<AtomicUsize>,
        fail: bool,
        fail_play: bool,
    }

    impl PlayerApi for MockPlayer {
        fn pause_video(&self) -> Result<(), SurfaceError> {
            if self.fail {
                return Err(SurfaceError::SendFailed("boom".to_string()));
            }
            self.pauses.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn play_video(&self) -> Result<(), SurfaceError> {
            if self.fail || self.fail_play {
                return Err(SurfaceError::SendFailed("boom".to_string()));
            }
            self.plays.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn controller_with(
        player: &MockPlayer,
        readiness: ReadinessSignal,
        policy: ReleasePolicy,
    ) -> (PauseOnHoldController, RecordingEmitter) {
        let emitter = RecordingEmitter::default();
        let surface = RemoteSurfaceHandle::new("abc", readiness)
            .with_channel(SurfaceChannel::direct(player.clone()));
        let config = PauseOnHoldConfig {
            release_policy: policy,
            ..PauseOnHoldConfig::default()
        };
        let controller = PauseOnHoldController::new(config, surface, Box::new(emitter.clone()));
        (controller, emitter)
    }

    fn ready_controller(player: &MockPlayer) -> (PauseOnHoldController, RecordingEmitter) {
        controller_with(player, ReadinessSignal::ready(), ReleasePolicy::ClearIndicator)
    }

    #[test]
    fn hold_pauses_and_release_clears_indicator() {
        let player = MockPlayer::default();
        let (mut controller, emitter) = ready_controller(&player);

        let disposition = controller.on_hold_start(&KeyInput::new("q"));
        assert!(disposition.prevents_default());
        assert_eq!(controller.phase(), HoldPhase::Holding);
        assert!(controller.is_paused());
        assert_eq!(
            controller.indicator_label().as_deref(),
            Some("Video paused (holding Q)")
        );

        controller.on_hold_end(&KeyInput::new("q"));
        assert_eq!(controller.phase(), HoldPhase::Idle);
        assert!(!controller.is_paused());
        assert_eq!(player.pauses.load(Ordering::SeqCst), 1);
        assert_eq!(player.plays.load(Ordering::SeqCst), 0);
        assert_eq!(emitter.indicator_changes(), vec![true, false]);
    }

    #[test]
    fn upper_case_key_matches() {
        let player = MockPlayer::default();
        let (mut controller, _) = ready_controller(&player);

        controller.on_hold_start(&KeyInput::new("Q"));
        assert_eq!(controller.phase(), HoldPhase::Holding);
        controller.on_hold_end(&KeyInput::new("q"));
        assert_eq!(controller.phase(), HoldPhase::Idle);
    }

    #[test]
    fn other_keys_are_ignored() {
        let player = MockPlayer::default();
        let (mut controller, _) = ready_controller(&player);

        assert_eq!(
            controller.on_hold_start(&KeyInput::new("w")),
            KeyDisposition::Ignored
        );
        assert_eq!(controller.phase(), HoldPhase::Idle);
        assert_eq!(player.pauses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn text_fields_receive_the_key() {
        let player = MockPlayer::default();
        let (mut controller, _) = ready_controller(&player);

        let typed = KeyInput::new("q").on(InputTarget::element("INPUT"));
        assert_eq!(controller.on_hold_start(&typed), KeyDisposition::Ignored);

        let editable = KeyInput::new("q").on(InputTarget::element("div").editable());
        assert_eq!(controller.on_hold_start(&editable), KeyDisposition::Ignored);

        assert_eq!(player.pauses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn checkbox_is_not_a_text_field() {
        let player = MockPlayer::default();
        let (mut controller, _) = ready_controller(&player);

        let input = KeyInput::new("q").on(InputTarget::element("input").with_input_type("checkbox"));
        assert_eq!(controller.on_hold_start(&input), KeyDisposition::Consumed);
        assert_eq!(player.pauses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn repeat_is_idempotent() {
        let player = MockPlayer::default();
        let (mut controller, emitter) = ready_controller(&player);

        controller.on_hold_start(&KeyInput::new("q"));
        let before = controller.hold().cloned();
        for _ in 0..20 {
            let disposition = controller.on_hold_start(&KeyInput::new("q").repeated());
            assert_eq!(disposition, KeyDisposition::Consumed);
        }
        assert_eq!(controller.hold().cloned(), before);
        assert_eq!(player.pauses.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.indicator_changes(), vec![true]);
    }

    #[test]
    fn orphan_repeat_does_not_start_a_hold() {
        let player = MockPlayer::default();
        let (mut controller, _) = ready_controller(&player);

        assert_eq!(
            controller.on_hold_start(&KeyInput::new("q").repeated()),
            KeyDisposition::Ignored
        );
        assert_eq!(controller.phase(), HoldPhase::Idle);
    }

    #[test]
    fn release_without_hold_is_noop() {
        let player = MockPlayer::default();
        let (mut controller, emitter) = ready_controller(&player);

        assert_eq!(
            controller.on_hold_end(&KeyInput::new("q")),
            KeyDisposition::Ignored
        );
        assert_eq!(
            controller.on_hold_end(&KeyInput::new("x")),
            KeyDisposition::Ignored
        );
        assert!(emitter.events.lock().unwrap().is_empty());
    }

    #[test]
    fn not_ready_press_latches_without_command() {
        let (trigger, readiness) = readiness_pair();
        let player = MockPlayer::default();
        let (mut controller, emitter) =
            controller_with(&player, readiness, ReleasePolicy::ClearIndicator);

        controller.on_hold_start(&KeyInput::new("q"));
        assert_eq!(controller.phase(), HoldPhase::Latched);
        assert!(!controller.is_paused());

        trigger.fire();
        controller.on_hold_start(&KeyInput::new("q").repeated());
        assert_eq!(player.pauses.load(Ordering::SeqCst), 0);

        controller.on_hold_end(&KeyInput::new("q"));
        controller.on_hold_start(&KeyInput::new("q"));
        assert_eq!(player.pauses.load(Ordering::SeqCst), 1);
        assert!(matches!(
            emitter.events.lock().unwrap()[0],
            ControllerEvent::CommandDropped {
                command: SurfaceCommand::Pause,
                ..
            }
        ));
    }

    #[test]
    fn failed_send_leaves_indicator_off() {
        let player = MockPlayer {
            fail: true,
            ..MockPlayer::default()
        };
        let (mut controller, emitter) = ready_controller(&player);

        assert_eq!(
            controller.on_hold_start(&KeyInput::new("q")),
            KeyDisposition::Consumed
        );
        assert_eq!(controller.phase(), HoldPhase::Latched);
        assert!(!controller.is_paused());
        assert!(controller.indicator_label().is_none());
        assert!(emitter.indicator_changes().is_empty());
        assert!(matches!(
            emitter.events.lock().unwrap()[0],
            ControllerEvent::CommandFailed { .. }
        ));
    }

    #[test]
    fn resume_policy_plays_on_release() {
        let player = MockPlayer::default();
        let (mut controller, emitter) =
            controller_with(&player, ReadinessSignal::ready(), ReleasePolicy::Resume);

        controller.on_hold_start(&KeyInput::new("q"));
        controller.on_hold_end(&KeyInput::new("q"));

        assert_eq!(player.plays.load(Ordering::SeqCst), 1);
        assert!(!controller.is_paused());
        assert_eq!(emitter.indicator_changes(), vec![true, false]);
    }

    #[test]
    fn failed_resume_keeps_indicator_without_holding_label() {
        let player = MockPlayer {
            fail_play: true,
            ..MockPlayer::default()
        };
        let (mut controller, emitter) =
            controller_with(&player, ReadinessSignal::ready(), ReleasePolicy::Resume);

        controller.on_hold_start(&KeyInput::new("q"));
        controller.on_hold_end(&KeyInput::new("q"));

        assert_eq!(controller.phase(), HoldPhase::Idle);
        assert!(controller.is_paused());
        assert_eq!(controller.indicator_label().as_deref(), Some("Video paused"));
        assert_eq!(emitter.indicator_changes(), vec![true]);
    }

    #[test]
    fn resume_policy_skips_play_for_latched_hold() {
        let (_trigger, readiness) = readiness_pair();
        let player = MockPlayer::default();
        let (mut controller, _) = controller_with(&player, readiness, ReleasePolicy::Resume);

        controller.on_hold_start(&KeyInput::new("q"));
        controller.on_hold_end(&KeyInput::new("q"));
        assert_eq!(player.plays.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn key_up_in_text_field_still_ends_hold() {
        let player = MockPlayer::default();
        let (mut controller, _) = ready_controller(&player);

        controller.on_hold_start(&KeyInput::new("q"));
        controller.on_hold_end(&KeyInput::new("q").on(InputTarget::element("textarea")));
        assert_eq!(controller.phase(), HoldPhase::Idle);
    }

    #[test]
    fn detach_clears_state_and_ignores_input() {
        let player = MockPlayer::default();
        let (mut controller, emitter) = ready_controller(&player);

        controller.on_hold_start(&KeyInput::new("q"));
        controller.detach();
        assert_eq!(controller.phase(), HoldPhase::Idle);
        assert!(!controller.is_paused());
        assert_eq!(emitter.indicator_changes(), vec![true, false]);

        assert_eq!(
            controller.on_hold_start(&KeyInput::new("q")),
            KeyDisposition::Ignored
        );
        assert_eq!(player.pauses.load(Ordering::SeqCst), 1);
    }
}
