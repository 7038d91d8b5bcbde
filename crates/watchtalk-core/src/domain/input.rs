//! Input filtering shared by the hold-to-pause and push-to-talk controllers.
//!
//! Keyboard and pointer events arrive here already stripped of any UI
//! framework: a key is a `KeyboardEvent.key`-style string and a target is the
//! handful of attributes needed to tell a text field from everything else.

use serde::{Deserialize, Serialize};

/// `<input type=...>` values that never accept typed text.
///
/// Any other type (including a missing one, which defaults to `text`) is
/// treated as a text-entry field.
const NON_TEXT_INPUT_TYPES: &[&str] = &[
    "button", "checkbox", "color", "file", "image", "radio", "range", "reset", "submit",
];

// ── Hold key ───────────────────────────────────────────────────────

/// The designated key whose sustained press keeps the surface paused.
///
/// Matching is case-insensitive so that Shift or Caps Lock do not break
/// the hold (`"q"` and `"Q"` are the same key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct HoldKey(String);

impl HoldKey {
    /// Create a hold key from a `KeyboardEvent.key` value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().to_lowercase())
    }

    /// Check whether a key event value refers to this hold key.
    pub fn matches(&self, key: &str) -> bool {
        key.to_lowercase() == self.0
    }

    /// The normalised (lower-case) key value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case label used in indicator text, e.g. `"Q"`.
    pub fn label(&self) -> String {
        self.0.to_uppercase()
    }
}

impl From<String> for HoldKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<HoldKey> for String {
    fn from(key: HoldKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for HoldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Event targets ──────────────────────────────────────────────────

/// The element an input event originated from.
///
/// A `None` tag means the event was dispatched on the document itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputTarget {
    /// Element tag name (`"INPUT"`, `"div"`, ...). Compared case-insensitively.
    pub tag_name: Option<String>,
    /// The `type` attribute for `<input>` elements.
    pub input_type: Option<String>,
    /// Whether the element (or an ancestor) is content-editable.
    pub content_editable: bool,
}

impl InputTarget {
    /// An event dispatched on the document body.
    pub const fn document() -> Self {
        Self {
            tag_name: None,
            input_type: None,
            content_editable: false,
        }
    }

    /// An event dispatched on an element with the given tag.
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: Some(tag_name.into()),
            ..Self::document()
        }
    }

    /// Set the `<input type=...>` attribute.
    #[must_use]
    pub fn with_input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    /// Mark the target as content-editable.
    #[must_use]
    pub const fn editable(mut self) -> Self {
        self.content_editable = true;
        self
    }
}

/// Whether keystrokes on `target` are meant for a text field.
///
/// Hold keys typed into a text field must reach the field untouched, so both
/// controllers ignore key events for which this returns `true`.
pub fn is_text_entry_target(target: &InputTarget) -> bool {
    if target.content_editable {
        return true;
    }

    let Some(tag) = target.tag_name.as_deref() else {
        return false;
    };

    if tag.eq_ignore_ascii_case("textarea") || tag.eq_ignore_ascii_case("select") {
        return true;
    }

    if tag.eq_ignore_ascii_case("input") {
        return target.input_type.as_deref().is_none_or(|input_type| {
            !NON_TEXT_INPUT_TYPES
                .iter()
                .any(|t| input_type.eq_ignore_ascii_case(t))
        });
    }

    false
}

// ── Keyboard events ────────────────────────────────────────────────

/// A key-down or key-up event as seen by the hold controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInput {
    /// `KeyboardEvent.key` value.
    pub key: String,
    /// Where the event originated.
    pub target: InputTarget,
    /// Set by the OS for auto-repeat key-downs.
    #[serde(default)]
    pub repeat: bool,
}

impl KeyInput {
    /// A first (non-repeat) key event on the document.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: InputTarget::document(),
            repeat: false,
        }
    }

    /// Attach an originating target.
    #[must_use]
    pub fn on(mut self, target: InputTarget) -> Self {
        self.target = target;
        self
    }

    /// Mark as an auto-repeat event.
    #[must_use]
    pub const fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// What the host should do with a key event after a controller saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Not ours: let the default action run.
    Ignored,
    /// Ours: suppress the default action (page scroll, shortcuts).
    Consumed,
}

impl KeyDisposition {
    /// Whether the host must call `preventDefault()` on the event.
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

// ── Pointer / touch gestures ───────────────────────────────────────

/// Raw pointer and touch events bound to the push-to-talk button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerGesture {
    PointerDown,
    PointerUp,
    PointerLeave,
    TouchStart,
    TouchEnd,
}

/// The intent a gesture expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureIntent {
    Press,
    Release,
}

impl PointerGesture {
    /// Map a raw gesture to press or release.
    pub const fn intent(self) -> GestureIntent {
        match self {
            Self::PointerDown | Self::TouchStart => GestureIntent::Press,
            Self::PointerUp | Self::PointerLeave | Self::TouchEnd => GestureIntent::Release,
        }
    }

    /// Touch gestures suppress the browser's own long-press and scroll
    /// handling; pointer gestures keep their defaults.
    pub const fn suppresses_default(self) -> bool {
        matches!(self, Self::TouchStart | Self::TouchEnd)
    }
}
