//! Countdown ring component for Bubble Tea applications.
//!
//! The ring advances once per tick, shows percentage and/or remaining ticks
//! in its center, can optionally be paused from the keyboard, and reports
//! completion exactly once per session through a callback and a
//! [`CompletedMsg`].
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_ring::ring::{new, with_button, with_center, with_size};
//! use bubbletea_ring::display::{CenterMode, Size};
//!
//! let ring = new(120, &[
//!     with_center(CenterMode::PercentageRemaining),
//!     with_size(Size::Small),
//!     with_button(),
//! ])
//! .unwrap();
//!
//! assert_eq!(ring.target(), 120);
//! assert_eq!(ring.percentage(), 0);
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use bubbletea_ring::ring::{new, with_completion, CompletedMsg, Model};
//!
//! struct App {
//!     ring: Model,
//!     done: bool,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let ring = new(30, &[with_completion(|finished| {
//!             assert!(finished);
//!         })])
//!         .unwrap();
//!         let cmd = ring.init();
//!         (Self { ring, done: false }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(done) = msg.downcast_ref::<CompletedMsg>() {
//!             if done.id == self.ring.id() {
//!                 self.done = true;
//!             }
//!         }
//!         self.ring.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.ring.view()
//!     }
//! }
//! ```

use crate::display::{self, CenterMode, DisplayConfig, RingView, Size};
use crate::error::Result;
use crate::key::KeyMap;
use crate::render::{RenderSink, RenderStyle, TerminalRing};
use crate::state::{ProgressState, TickOutcome};
use crate::Component;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

// Internal ID management for ring instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_TOTAL: NonZeroU64 = match NonZeroU64::new(60) {
    Some(total) => total,
    None => unreachable!(),
};

/// Callback invoked once per session when the countdown finishes.
///
/// The argument is always `true`.
pub type CompletionFunc = Arc<dyn Fn(bool) + Send + Sync>;

/// Message delivered on every tick of a ring's tick source.
///
/// Rings filter ticks by `id`, and by an internal session tag so that ticks
/// scheduled before a [`Model::restart`] are dropped.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The ring this tick belongs to.
    pub id: i64,
    tag: i64,
}

/// Message that flips a ring between paused and running.
///
/// Sent by [`Model::toggle`]. An `id` of `0` addresses every ring.
#[derive(Debug, Clone)]
pub struct ToggleMsg {
    /// The ring this message targets.
    pub id: i64,
}

/// Message emitted once when a ring's session completes.
#[derive(Debug, Clone)]
pub struct CompletedMsg {
    /// The ring that completed.
    pub id: i64,
}

/// Configuration options for [`new`].
pub enum RingOption {
    /// Sets the center text mode.
    WithCenter(CenterMode),
    /// Sets the size category.
    WithSize(Size),
    /// Sets the primary and secondary colors.
    WithColors(String, String),
    /// Shows the pause/resume control and enables its key bindings.
    WithButton,
    /// Sets the tick interval.
    WithInterval(Duration),
    /// Replaces the default rasterizer style.
    WithRenderStyle(RenderStyle),
    /// Sets the completion callback.
    WithCompletion(CompletionFunc),
}

impl RingOption {
    fn apply(&self, m: &mut Model) {
        match self {
            RingOption::WithCenter(center) => {
                m.config.center = *center;
            }
            RingOption::WithSize(size) => {
                m.config.size = *size;
            }
            RingOption::WithColors(primary, secondary) => {
                m.set_colors(primary.clone(), secondary.clone());
            }
            RingOption::WithButton => {
                m.config.button_active = true;
            }
            RingOption::WithInterval(interval) => {
                m.interval = *interval;
            }
            RingOption::WithRenderStyle(style) => {
                m.renderer = Arc::new(TerminalRing::new(style.clone()));
            }
            RingOption::WithCompletion(completion) => {
                m.completion = Some(Arc::clone(completion));
            }
        }
    }
}

/// Center text mode option.
pub fn with_center(center: CenterMode) -> RingOption {
    RingOption::WithCenter(center)
}

/// Size option.
pub fn with_size(size: Size) -> RingOption {
    RingOption::WithSize(size)
}

/// Color option: `primary` draws the arc, `secondary` the track.
pub fn with_colors(primary: impl Into<String>, secondary: impl Into<String>) -> RingOption {
    RingOption::WithColors(primary.into(), secondary.into())
}

/// Enables the pause/resume control.
pub fn with_button() -> RingOption {
    RingOption::WithButton
}

/// Tick interval option. Defaults to one second.
pub fn with_interval(interval: Duration) -> RingOption {
    RingOption::WithInterval(interval)
}

/// Rasterizer style option.
pub fn with_render_style(style: RenderStyle) -> RingOption {
    RingOption::WithRenderStyle(style)
}

/// Completion callback option.
pub fn with_completion<F>(completion: F) -> RingOption
where
    F: Fn(bool) + Send + Sync + 'static,
{
    RingOption::WithCompletion(Arc::new(completion))
}

/// A countdown ring.
///
/// Holds the session state, the display configuration and the render sink.
/// All state transitions happen in [`Model::update`] (or the direct
/// [`Model::toggle_pause`] / [`Model::restart`] calls) on the host's event
/// loop; the model itself never spawns anything.
#[derive(Clone)]
pub struct Model {
    id: i64,
    tag: i64,

    /// Display options. Colors may be swapped at any time; they are read on
    /// every render.
    pub config: DisplayConfig,

    /// Time between ticks.
    pub interval: Duration,

    /// Key bindings for the pause/resume control.
    pub keymap: KeyMap,

    state: ProgressState,
    focus: bool,
    completion: Option<CompletionFunc>,
    renderer: Arc<dyn RenderSink + Send + Sync>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("config", &self.config)
            .field("interval", &self.interval)
            .field("state", &self.state)
            .field("focus", &self.focus)
            .field("completion", &self.completion.is_some())
            .finish_non_exhaustive()
    }
}

/// Creates a ring that completes after `total_value` ticks.
///
/// # Errors
///
/// Returns [`RingError::InvalidConfiguration`](crate::RingError::InvalidConfiguration)
/// if `total_value <= 0`, and
/// [`RingError::InvalidHeight`](crate::RingError::InvalidHeight) for an
/// unusable custom size.
///
/// ```rust
/// use bubbletea_ring::ring::new;
///
/// assert!(new(10, &[]).is_ok());
/// assert!(new(0, &[]).is_err());
/// ```
pub fn new(total_value: i64, opts: &[RingOption]) -> Result<Model> {
    let state = ProgressState::new(total_value)?;
    let mut m = Model::from_state(state);

    for opt in opts {
        opt.apply(&mut m);
    }
    m.config.validate()?;

    Ok(m)
}

impl Model {
    fn from_state(state: ProgressState) -> Self {
        Self {
            id: next_id(),
            tag: 0,
            config: DisplayConfig::default(),
            interval: DEFAULT_INTERVAL,
            keymap: KeyMap::default(),
            state,
            focus: false,
            completion: None,
            renderer: Arc::new(TerminalRing::default()),
        }
    }

    /// Unique identifier of this ring.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current session state.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Ticks elapsed.
    pub fn current(&self) -> u64 {
        self.state.current()
    }

    /// Ticks required to complete.
    pub fn target(&self) -> u64 {
        self.state.target()
    }

    /// Whether the session is paused.
    pub fn paused(&self) -> bool {
        self.state.paused()
    }

    /// Whether the session has completed.
    pub fn completed(&self) -> bool {
        self.state.completed()
    }

    /// Truncated percentage of the target reached.
    pub fn percentage(&self) -> u64 {
        display::percentage(&self.state)
    }

    /// Ticks left.
    pub fn remaining(&self) -> u64 {
        display::remaining(&self.state)
    }

    /// Filled share of the ring.
    pub fn track_fraction(&self) -> f64 {
        display::track_fraction(&self.state)
    }

    /// Height of the configured size, in points.
    pub fn resolved_height(&self) -> f64 {
        display::resolved_height(self.config.size)
    }

    /// Styled center text.
    pub fn center_text(&self) -> String {
        display::center_text(&self.state, &self.config)
    }

    /// View-model for the current frame.
    pub fn view_model(&self) -> RingView {
        display::view_model(&self.state, &self.config)
    }

    /// Replaces both colors; the next render picks them up.
    pub fn set_colors(&mut self, primary: impl Into<String>, secondary: impl Into<String>) {
        self.config.primary_color = primary.into();
        self.config.secondary_color = secondary.into();
    }

    /// Replaces the completion callback.
    pub fn set_completion<F>(&mut self, completion: F)
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.completion = Some(Arc::new(completion));
    }

    /// Replaces the render sink.
    pub fn set_renderer<R>(&mut self, renderer: R)
    where
        R: RenderSink + Send + Sync + 'static,
    {
        self.renderer = Arc::new(renderer);
    }

    /// Flips between paused and running. Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.state.toggle_pause();
        debug!(id = self.id, paused, current = self.state.current(), "ring pause toggled");
        paused
    }

    /// Returns a command that toggles this ring through a [`ToggleMsg`].
    pub fn toggle(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(ToggleMsg { id }) as Msg
        })
    }

    /// Discards the current session and starts a new one with the same
    /// target. Ticks already in flight for the old session are ignored.
    pub fn restart(&mut self) -> Cmd {
        self.state.reset();
        self.tag += 1;
        debug!(id = self.id, target = self.state.target(), "ring restarted");
        self.tick()
    }

    /// Starts a new session with a different target.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidConfiguration`](crate::RingError::InvalidConfiguration)
    /// if `total_value <= 0`; the current session is left untouched.
    pub fn restart_with(&mut self, total_value: i64) -> Result<Cmd> {
        self.state = ProgressState::new(total_value)?;
        self.tag += 1;
        debug!(id = self.id, target = self.state.target(), "ring restarted");
        Ok(self.tick())
    }

    /// Starts the tick source.
    pub fn init(&self) -> Cmd {
        self.tick()
    }

    /// Handles tick, toggle and key messages.
    ///
    /// Returns the next tick command while the session is running (ticks keep
    /// flowing while paused), a [`CompletedMsg`] command on the completing
    /// tick, and `None` afterwards.
    pub fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        if let Some(toggle_msg) = msg.downcast_ref::<ToggleMsg>() {
            if toggle_msg.id != 0 && toggle_msg.id != self.id {
                return std::option::Option::None;
            }
            self.toggle_pause();
            return std::option::Option::None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.config.button_active
                && self.focus
                && self.keymap.toggle_pause.matches(key_msg)
            {
                self.toggle_pause();
            }
            return std::option::Option::None;
        }

        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != self.id || tick_msg.tag != self.tag {
                trace!(id = self.id, msg_id = tick_msg.id, "ignoring foreign or stale tick");
                return std::option::Option::None;
            }

            return match self.state.on_tick() {
                TickOutcome::Advanced | TickOutcome::Absorbed => {
                    trace!(
                        id = self.id,
                        current = self.state.current(),
                        paused = self.state.paused(),
                        "ring tick"
                    );
                    std::option::Option::Some(self.tick())
                }
                TickOutcome::Completed => {
                    debug!(id = self.id, target = self.state.target(), "ring completed");
                    if let Some(completion) = &self.completion {
                        completion(true);
                    }
                    std::option::Option::Some(self.completed_cmd())
                }
                TickOutcome::Idle => std::option::Option::None,
            };
        }

        std::option::Option::None
    }

    /// Renders the ring through the configured render sink.
    pub fn view(&self) -> String {
        self.renderer.render(&self.view_model())
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn completed_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(CompletedMsg { id }) as Msg
        })
    }
}

impl Component for Model {
    fn focus(&mut self) -> std::option::Option<Cmd> {
        self.focus = true;
        std::option::Option::None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, std::option::Option<Cmd>) {
        let model = Model::default();
        let cmd = model.init();
        (model, std::option::Option::Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::from_state(ProgressState::with_target(DEFAULT_TOTAL))
    }
}
