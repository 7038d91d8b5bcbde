//! `watchtalk hold`: replay a timed key script against a mounted surface.
//!
//! The surface is mounted the way a host page mounts it: the player API is
//! already loaded, the frame reports `load` after `--load-after-ms`, and the
//! configured settle delay runs from there. Key steps are delivered on their
//! timestamps so presses before readiness show up as dropped commands.

use std::str::FromStr;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use watchtalk_core::{ChannelEmitter, ControllerEvent, KeyInput, Settings, readiness_pair};
use watchtalk_surface::{
    EmbedConfig, PauseOnHoldConfig, PauseOnHoldController, RemoteSurfaceHandle, SurfaceChannel,
};

use crate::adapters::{ConsoleMessagePort, ConsolePlayer};
use crate::commands::ChannelChoice;
use crate::error::CliError;
use crate::presentation::describe;

/// Kind of key event in a script step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Repeat,
    Up,
}

/// One scripted key event: `down@0`, `repeat@100`, `up@400`.
///
/// The hold key is used unless another is named: `down=x@50`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStep {
    pub action: KeyAction,
    pub key: Option<String>,
    pub at: Duration,
}

impl KeyStep {
    fn input(&self, hold_key: &str) -> KeyInput {
        let input = KeyInput::new(self.key.as_deref().unwrap_or(hold_key));
        match self.action {
            KeyAction::Repeat => input.repeated(),
            KeyAction::Down | KeyAction::Up => input,
        }
    }
}

impl FromStr for KeyStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, at) = s
            .split_once('@')
            .ok_or_else(|| format!("'{s}': expected ACTION@MILLIS, e.g. down@0"))?;
        let at = at
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("'{s}': invalid time: {e}"))?;

        let (action, key) = match head.split_once('=') {
            Some((action, key)) if !key.is_empty() => (action, Some(key.to_string())),
            Some(_) => return Err(format!("'{s}': empty key name")),
            None => (head, None),
        };
        let action = match action.trim().to_ascii_lowercase().as_str() {
            "down" => KeyAction::Down,
            "repeat" => KeyAction::Repeat,
            "up" => KeyAction::Up,
            other => return Err(format!("'{s}': unknown action '{other}' (down|repeat|up)")),
        };

        Ok(Self {
            action,
            key,
            at: Duration::from_millis(at),
        })
    }
}

/// Arguments of the hold command.
#[derive(Debug, Clone)]
pub struct HoldArgs {
    pub content_id: String,
    pub steps: Vec<KeyStep>,
    pub load_after: Duration,
    pub channel: ChannelChoice,
    pub fail_sends: bool,
}

/// Run the script and return every event the controller emitted, in order.
pub async fn execute(
    settings: &Settings,
    args: HoldArgs,
) -> Result<Vec<ControllerEvent>, CliError> {
    let embed = EmbedConfig::from_settings(args.content_id.as_str(), settings);
    let target_origin = embed
        .target_origin()
        .map_err(|e| CliError::Config(format!("invalid provider origin: {e}")))?;

    let (api_trigger, api_ready) = readiness_pair();
    api_trigger.fire();

    let (mut surface, load_trigger) = RemoteSurfaceHandle::mount(
        args.content_id.as_str(),
        api_ready,
        settings.effective_settle_delay(),
    );
    if matches!(args.channel, ChannelChoice::Direct | ChannelChoice::Both) {
        let player = if args.fail_sends {
            ConsolePlayer::new().failing()
        } else {
            ConsolePlayer::new()
        };
        surface.add_channel(SurfaceChannel::direct(player));
    }
    if matches!(args.channel, ChannelChoice::Message | ChannelChoice::Both) {
        let port = if args.fail_sends {
            ConsoleMessagePort::new().failing()
        } else {
            ConsoleMessagePort::new()
        };
        surface.add_channel(SurfaceChannel::message(port, target_origin));
    }

    let config = PauseOnHoldConfig::from(settings);
    let hold_key = config.hold_key.as_str().to_string();
    let (emitter, mut events) = ChannelEmitter::new();
    let mut controller = PauseOnHoldController::new(config, surface, Box::new(emitter));

    println!(
        "surface {} mounted (load at {}ms, settle {}ms)",
        args.content_id,
        args.load_after.as_millis(),
        settings.effective_settle_delay().as_millis()
    );
    let _load = load_trigger.fire_after(args.load_after);

    let mut emitted = Vec::new();
    let start = Instant::now();
    for step in &args.steps {
        tokio::time::sleep_until(start + step.at).await;

        let input = step.input(&hold_key);
        let disposition = match step.action {
            KeyAction::Down | KeyAction::Repeat => controller.on_hold_start(&input),
            KeyAction::Up => controller.on_hold_end(&input),
        };
        println!(
            "{:>6}ms {:<6} {:<3} {:?} -> {:?} (ready: {})",
            step.at.as_millis(),
            format!("{:?}", step.action).to_lowercase(),
            input.key,
            disposition,
            controller.phase(),
            controller.surface().is_ready()
        );
        print_events(&mut events, &mut emitted);
        if let Some(label) = controller.indicator_label() {
            println!("         {label}");
        }
    }

    controller.detach();
    print_events(&mut events, &mut emitted);
    Ok(emitted)
}

fn print_events(
    events: &mut mpsc::UnboundedReceiver<ControllerEvent>,
    emitted: &mut Vec<ControllerEvent>,
) {
    while let Ok(event) = events.try_recv() {
        println!("         {}", describe(&event));
        emitted.push(event);
    }
}
