//! Display configuration and derived values for the ring.
//!
//! Everything here is a pure function of a [`ProgressState`] and a
//! [`DisplayConfig`]. Nothing holds state of its own; the ring component
//! recomputes these values on every render.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_ring::display::{self, CenterMode, DisplayConfig, Size};
//! use bubbletea_ring::state::ProgressState;
//!
//! let mut state = ProgressState::new(50).unwrap();
//! for _ in 0..25 {
//!     state.on_tick();
//! }
//!
//! assert_eq!(display::percentage(&state), 50);
//! assert_eq!(display::remaining(&state), 25);
//! assert_eq!(display::resolved_height(Size::Large), 450.0);
//!
//! let config = DisplayConfig::default().with_center(CenterMode::Remaining);
//! let lines = display::center_lines(&state, &config);
//! assert_eq!(lines[0].text, "25 Remain");
//! ```

use crate::error::{Result, RingError};
use crate::state::ProgressState;
use lipgloss_extras::lipgloss::{Color, Style};

/// Height of [`Size::Small`], in points.
pub const SMALL_HEIGHT: f64 = 250.0;
/// Height of [`Size::Medium`], in points.
pub const MEDIUM_HEIGHT: f64 = 350.0;
/// Height of [`Size::Large`], in points.
pub const LARGE_HEIGHT: f64 = 450.0;

const DEFAULT_PRIMARY_COLOR: &str = "#FF0000";
const DEFAULT_SECONDARY_COLOR: &str = "#808080";

/// What to print in the middle of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CenterMode {
    /// `"42 %"`
    #[default]
    Percentage,
    /// `"17 Remain"`
    Remaining,
    /// Percentage on the first line, remaining ticks on the second.
    PercentageRemaining,
    /// No text.
    Nothing,
}

/// Presentation size of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Size {
    /// 250 points.
    Small,
    /// 350 points.
    #[default]
    Medium,
    /// 450 points.
    Large,
    /// An explicit height in points.
    Custom(f64),
}

impl Size {
    /// The height this size stands for, in points.
    pub fn height(self) -> f64 {
        match self {
            Size::Small => SMALL_HEIGHT,
            Size::Medium => MEDIUM_HEIGHT,
            Size::Large => LARGE_HEIGHT,
            Size::Custom(height) => height,
        }
    }
}

/// Which configured color a piece of center text is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// The progress arc color.
    Primary,
    /// The track color.
    Secondary,
}

/// One unstyled line of center text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterLine {
    /// The text to print.
    pub text: String,
    /// Which color the text is drawn in.
    pub tone: Tone,
}

/// Caller-supplied display options.
///
/// One struct covers every presentation variant. The defaults are percentage
/// text, medium size, and no pause button.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Center text mode.
    pub center: CenterMode,
    /// Size category.
    pub size: Size,
    /// Color of the progress arc, the button, and percentage text.
    pub primary_color: String,
    /// Color of the background track and remaining text in
    /// [`CenterMode::PercentageRemaining`].
    pub secondary_color: String,
    /// Whether the pause/resume control is shown and accepts input.
    pub button_active: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            center: CenterMode::default(),
            size: Size::default(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            button_active: false,
        }
    }
}

impl DisplayConfig {
    /// Sets the center text mode.
    pub fn with_center(mut self, center: CenterMode) -> Self {
        self.center = center;
        self
    }

    /// Sets the size category.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Sets both colors at once.
    pub fn with_colors(
        mut self,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        self.primary_color = primary.into();
        self.secondary_color = secondary.into();
        self
    }

    /// Enables or disables the pause/resume control.
    pub fn with_button(mut self, active: bool) -> Self {
        self.button_active = active;
        self
    }

    /// Checks that the configuration can be drawn.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidHeight`] for a custom size that is not a
    /// positive finite number.
    pub fn validate(&self) -> Result<()> {
        if let Size::Custom(height) = self.size {
            if !height.is_finite() || height <= 0.0 {
                return Err(RingError::InvalidHeight { height });
            }
        }
        Ok(())
    }

    fn color(&self, tone: Tone) -> &str {
        match tone {
            Tone::Primary => &self.primary_color,
            Tone::Secondary => &self.secondary_color,
        }
    }
}

/// Whole-number share of the target reached so far, truncated.
pub fn percentage(state: &ProgressState) -> u64 {
    // u128 keeps `current * 100` from overflowing for very large targets
    (u128::from(state.current()) * 100 / u128::from(state.target())) as u64
}

/// Ticks left until completion.
pub fn remaining(state: &ProgressState) -> u64 {
    state.target() - state.current()
}

/// Filled share of the ring, in `[0, 1]`.
pub fn track_fraction(state: &ProgressState) -> f64 {
    (state.current() as f64 / state.target() as f64).clamp(0.0, 1.0)
}

/// Height in points for a size category.
pub fn resolved_height(size: Size) -> f64 {
    size.height()
}

/// Center text as unstyled lines, selected by `config.center`.
pub fn center_lines(state: &ProgressState, config: &DisplayConfig) -> Vec<CenterLine> {
    let percentage_line = || CenterLine {
        text: format!("{} %", percentage(state)),
        tone: Tone::Primary,
    };
    let remaining_line = |tone| CenterLine {
        text: format!("{} Remain", remaining(state)),
        tone,
    };

    match config.center {
        CenterMode::Percentage => vec![percentage_line()],
        CenterMode::Remaining => vec![remaining_line(Tone::Primary)],
        CenterMode::PercentageRemaining => {
            vec![percentage_line(), remaining_line(Tone::Secondary)]
        }
        CenterMode::Nothing => Vec::new(),
    }
}

/// Styles a single center line with its configured color.
pub fn style_line(line: &CenterLine, config: &DisplayConfig) -> String {
    Style::new()
        .bold(true)
        .foreground(Color::from(config.color(line.tone)))
        .render(&line.text)
}

/// Center text styled with the configured colors, one line per row.
///
/// Returns an empty string for [`CenterMode::Nothing`].
pub fn center_text(state: &ProgressState, config: &DisplayConfig) -> String {
    center_lines(state, config)
        .iter()
        .map(|line| style_line(line, config))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Everything a render sink needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RingView {
    /// Filled share of the ring, in `[0, 1]`.
    pub fraction: f64,
    /// Truncated percentage.
    pub percentage: u64,
    /// Ticks left.
    pub remaining: u64,
    /// Unstyled center text.
    pub center: Vec<CenterLine>,
    /// Height in points.
    pub height: f64,
    /// Progress arc color.
    pub primary_color: String,
    /// Track color.
    pub secondary_color: String,
    /// Whether the session is paused.
    pub paused: bool,
    /// Whether the session has completed.
    pub completed: bool,
    /// Whether to draw the pause/resume control.
    pub button_active: bool,
}

impl RingView {
    /// Color used for a tone in this frame.
    pub fn color(&self, tone: Tone) -> &str {
        match tone {
            Tone::Primary => &self.primary_color,
            Tone::Secondary => &self.secondary_color,
        }
    }
}

/// Builds the view-model for one frame.
pub fn view_model(state: &ProgressState, config: &DisplayConfig) -> RingView {
    RingView {
        fraction: track_fraction(state),
        percentage: percentage(state),
        remaining: remaining(state),
        center: center_lines(state, config),
        height: resolved_height(config.size),
        primary_color: config.primary_color.clone(),
        secondary_color: config.secondary_color.clone(),
        paused: state.paused(),
        completed: state.completed(),
        button_active: config.button_active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipgloss_extras::lipgloss;

    fn state_at(target: i64, current: u64) -> ProgressState {
        let mut state = ProgressState::new(target).unwrap();
        for _ in 0..current {
            state.on_tick();
        }
        state
    }

    #[test]
    fn test_percentage_and_remaining_midpoint() {
        let state = state_at(50, 25);
        assert_eq!(percentage(&state), 50);
        assert_eq!(remaining(&state), 25);
        assert_eq!(track_fraction(&state), 0.5);
    }

    #[test]
    fn test_percentage_truncates() {
        // 1/3 of the way is 33, 2/3 is 66
        assert_eq!(percentage(&state_at(3, 1)), 33);
        assert_eq!(percentage(&state_at(3, 2)), 66);
        assert_eq!(percentage(&state_at(7, 1)), 14);
    }

    #[test]
    fn test_percentage_bounds_and_monotonic() {
        let mut state = ProgressState::new(37).unwrap();
        assert_eq!(percentage(&state), 0);

        let mut last = 0;
        while !state.completed() {
            state.on_tick();
            let p = percentage(&state);
            assert!(p >= last);
            assert_eq!(remaining(&state) + state.current(), state.target());
            last = p;
        }
        assert_eq!(percentage(&state), 100);
        assert_eq!(track_fraction(&state), 1.0);
        assert_eq!(remaining(&state), 0);
    }

    #[test]
    fn test_percentage_huge_target() {
        let state = state_at(i64::MAX, 0);
        assert_eq!(percentage(&state), 0);
    }

    #[test]
    fn test_resolved_height() {
        assert_eq!(resolved_height(Size::Small), 250.0);
        assert_eq!(resolved_height(Size::Medium), 350.0);
        assert_eq!(resolved_height(Size::Large), 450.0);
        assert_eq!(resolved_height(Size::Custom(123.5)), 123.5);
    }

    #[test]
    fn test_default_config() {
        let config = DisplayConfig::default();
        assert_eq!(config.center, CenterMode::Percentage);
        assert_eq!(config.size, Size::Medium);
        assert!(!config.button_active);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_custom_height() {
        assert!(DisplayConfig::default()
            .with_size(Size::Custom(80.0))
            .validate()
            .is_ok());
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let config = DisplayConfig::default().with_size(Size::Custom(bad));
            assert!(matches!(
                config.validate(),
                Err(RingError::InvalidHeight { .. })
            ));
        }
    }

    #[test]
    fn test_center_lines_by_mode() {
        let state = state_at(50, 25);
        let config = DisplayConfig::default();

        let lines = center_lines(&state, &config);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "50 %");
        assert_eq!(lines[0].tone, Tone::Primary);

        let lines = center_lines(&state, &config.clone().with_center(CenterMode::Remaining));
        assert_eq!(lines[0].text, "25 Remain");

        let lines = center_lines(
            &state,
            &config.clone().with_center(CenterMode::PercentageRemaining),
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].tone, Tone::Primary);
        assert_eq!(lines[1].text, "25 Remain");
        assert_eq!(lines[1].tone, Tone::Secondary);

        let lines = center_lines(&state, &config.with_center(CenterMode::Nothing));
        assert!(lines.is_empty());
    }

    #[test]
    fn test_center_text_styled() {
        let state = state_at(4, 1);
        let config = DisplayConfig::default().with_center(CenterMode::PercentageRemaining);
        let text = center_text(&state, &config);

        assert_eq!(lipgloss::strip_ansi(&text), "25 %\n3 Remain");
        assert_eq!(
            center_text(&state, &config.with_center(CenterMode::Nothing)),
            ""
        );
    }

    #[test]
    fn test_view_model_snapshot() {
        let mut state = state_at(10, 4);
        state.pause();
        let config = DisplayConfig::default()
            .with_colors("#00FF00", "#333333")
            .with_size(Size::Small)
            .with_button(true);

        let view = view_model(&state, &config);
        assert_eq!(view.fraction, 0.4);
        assert_eq!(view.percentage, 40);
        assert_eq!(view.remaining, 6);
        assert_eq!(view.height, 250.0);
        assert_eq!(view.color(Tone::Primary), "#00FF00");
        assert_eq!(view.color(Tone::Secondary), "#333333");
        assert!(view.paused);
        assert!(!view.completed);
        assert!(view.button_active);
    }
}
