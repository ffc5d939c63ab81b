#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-ring/")]

//! # bubbletea-ring
//!
//! A circular countdown/progress ring for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! terminal applications.
//!
//! The ring advances once per tick, prints the percentage and/or remaining
//! ticks in its center, can expose a pause/resume control, and invokes a
//! completion callback exactly once when the countdown reaches its target.
//!
//! ## Overview
//!
//! The crate is split along the same lines as the component itself:
//!
//! - [`state`]: the countdown state machine ([`ProgressState`]). Pure, no
//!   I/O, usable from any event loop.
//! - [`display`]: display configuration and values derived from the state
//!   (percentage, remaining ticks, center text, arc fraction, height).
//! - [`render`]: the [`RenderSink`] trait and the default terminal
//!   rasterizer [`TerminalRing`].
//! - [`ring`]: the bubbletea component gluing everything to tick, toggle and
//!   key messages.
//!
//! Like other bubbletea components, the ring follows the Elm Architecture
//! with `init()`, `update()`, and `view()` methods.
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_ring::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     ring: Ring,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut ring = ring_new(90, &[
//!             with_center(CenterMode::PercentageRemaining),
//!             with_button(),
//!         ])
//!         .expect("90 is a valid target");
//!         ring.focus();
//!         let cmd = ring.init();
//!         (Self { ring }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.ring.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.ring.view()
//!     }
//! }
//! ```
//!
//! ## Driving the state machine directly
//!
//! ```rust
//! use bubbletea_ring::{display, ProgressState};
//!
//! let mut state = ProgressState::new(10).unwrap();
//! for _ in 0..4 {
//!     state.on_tick();
//! }
//! state.toggle_pause();
//! state.on_tick();
//! assert_eq!(state.current(), 4);
//! assert_eq!(display::percentage(&state), 40);
//! ```

pub mod display;
pub mod error;
pub mod key;
pub mod render;
pub mod ring;
pub mod state;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A ring only reacts to its pause/resume key bindings while focused, so a
/// host with several focusable components can route key presses the usual
/// way.
///
/// ## Focus States
///
/// - **Focused**: the component receives keyboard input
/// - **Blurred**: the component ignores keyboard input
///
/// ## Examples
///
/// ```rust
/// use bubbletea_ring::prelude::*;
///
/// let mut ring = Ring::default();
/// assert!(!ring.focused());
///
/// ring.focus();
/// assert!(ring.focused());
///
/// ring.blur();
/// assert!(!ring.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command for the bubbletea runtime; the ring returns
    /// `None`.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use display::{CenterMode, DisplayConfig, RingView, Size};
pub use error::RingError;
pub use key::{Binding, KeyMap};
pub use render::{RenderSink, RenderStyle, TerminalRing};
pub use ring::{
    new as ring_new, with_button, with_center, with_colors, with_completion, with_interval,
    with_render_style, with_size, CompletedMsg as RingCompletedMsg, CompletionFunc,
    Model as Ring, RingOption, TickMsg as RingTickMsg, ToggleMsg as RingToggleMsg,
};
pub use state::{ProgressState, TickOutcome};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_ring::prelude::*;
///
/// let ring = ring_new(10, &[with_size(Size::Large)]).unwrap();
/// assert_eq!(ring.resolved_height(), 450.0);
/// ```
pub mod prelude {
    pub use crate::display::{CenterMode, DisplayConfig, RingView, Size};
    pub use crate::error::RingError;
    pub use crate::render::{RenderSink, RenderStyle, TerminalRing};
    pub use crate::ring::{
        new as ring_new, with_button, with_center, with_colors, with_completion, with_interval,
        with_render_style, with_size, CompletedMsg as RingCompletedMsg, Model as Ring,
        RingOption, TickMsg as RingTickMsg, ToggleMsg as RingToggleMsg,
    };
    pub use crate::state::{ProgressState, TickOutcome};
    pub use crate::Component;
}
