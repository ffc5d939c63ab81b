//! Key bindings for the ring's pause/resume control.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A set of keys that trigger one action, plus its help text.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Keys that trigger the binding.
    pub keys: Vec<KeyCode>,
    /// Short key label for help text, e.g. `"space/p"`.
    pub help: String,
    /// What the binding does.
    pub description: String,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding for `keys` with empty help text.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: String::new(),
            description: String::new(),
            enabled: true,
        }
    }

    /// Sets the short key label shown in help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Sets the description shown next to the key label.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the binding is enabled and has at least one key.
    pub fn enabled(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }

    /// Reports whether a key press triggers this binding. Chords with
    /// Control or Alt never match.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        if key_msg
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        self.keys.contains(&key_msg.key)
    }
}

/// Bindings understood by the ring component.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Flips between paused and running.
    pub toggle_pause: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            toggle_pause: Binding::new(vec![KeyCode::Char(' '), KeyCode::Char('p')])
                .with_help("space/p")
                .with_description("pause/resume"),
        }
    }
}

impl KeyMap {
    /// Creates the default key map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings worth showing in a one-line help footer.
    pub fn short_help(&self) -> Vec<&Binding> {
        if self.toggle_pause.enabled() {
            vec![&self.toggle_pause]
        } else {
            Vec::new()
        }
    }
}
