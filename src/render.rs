//! Render sinks for the ring.
//!
//! The ring component never draws anything itself. It hands a
//! [`RingView`](crate::display::RingView) to a [`RenderSink`] and returns
//! whatever string the sink produces. [`TerminalRing`] is the default sink:
//! it rasterizes the ring into terminal cells with a track in the secondary
//! color, a clockwise arc from 12 o'clock in the primary color, the center
//! text, and an optional pause/resume button.
//!
//! All cosmetic constants live in [`RenderStyle`].
//!
//! ```rust
//! use bubbletea_ring::display::{self, DisplayConfig};
//! use bubbletea_ring::render::{RenderSink, TerminalRing};
//! use bubbletea_ring::state::ProgressState;
//!
//! let state = ProgressState::new(4).unwrap();
//! let view = display::view_model(&state, &DisplayConfig::default());
//! let frame = TerminalRing::default().render(&view);
//! assert!(!frame.is_empty());
//! ```

use crate::display::{RingView, Tone};
use lipgloss_extras::lipgloss::{Color, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Turns a view-model into printable output.
///
/// Implement this to draw the ring some other way; the ring component
/// accepts any sink through `set_renderer`.
pub trait RenderSink {
    /// Renders one frame.
    fn render(&self, view: &RingView) -> String;
}

/// Cosmetic parameters of [`TerminalRing`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Ring thickness, in the same points as the ring height.
    pub stroke_width: f64,
    /// Where the arc starts, relative to 3 o'clock. `-90.0` starts at the top.
    pub rotation_degrees: f64,
    /// Points covered by one terminal row.
    pub points_per_row: f64,
    /// Height of a terminal cell divided by its width.
    pub cell_aspect: f64,
    /// Glyph for filled arc cells.
    pub arc_glyph: char,
    /// Glyph for track cells.
    pub track_glyph: char,
    /// Button label while running.
    pub pause_icon: String,
    /// Button label while paused.
    pub play_icon: String,
    /// Upper bound on rows drawn, whatever the configured height.
    pub max_rows: usize,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            stroke_width: 30.0,
            rotation_degrees: -90.0,
            points_per_row: 25.0,
            cell_aspect: 2.0,
            arc_glyph: '█',
            track_glyph: '░',
            pause_icon: "⏸".to_string(),
            play_icon: "▶".to_string(),
            max_rows: 200,
        }
    }
}

/// Kind of a rasterized cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Blank,
    Track,
    Arc,
}

/// Default terminal rasterizer.
#[derive(Debug, Clone, Default)]
pub struct TerminalRing {
    /// Cosmetic parameters.
    pub style: RenderStyle,
}

impl TerminalRing {
    /// Creates a rasterizer with the given style.
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Rows and columns used for a ring of `height` points.
    ///
    /// Rows are capped at `style.max_rows` (never below 3), and columns
    /// follow the capped rows.
    pub fn dimensions(&self, height: f64) -> (usize, usize) {
        let max_rows = self.style.max_rows.max(3) as f64;
        let aspect = self.style.cell_aspect.clamp(0.1, 10.0);

        let rows = (height / self.style.points_per_row.max(f64::EPSILON))
            .round()
            .clamp(3.0, max_rows);
        let cols = (rows * aspect).round().max(3.0);
        (rows as usize, cols as usize)
    }

    fn grid(&self, view: &RingView) -> Vec<Vec<Cell>> {
        let (rows, cols) = self.dimensions(view.height);

        // Stroke thickness as a share of the radius, at least one row thick
        let stroke = (2.0 * self.style.stroke_width / view.height).max(2.2 / rows as f64);
        let inner = (1.0 - stroke).max(0.0);
        let sweep = view.fraction.clamp(0.0, 1.0) * 360.0;

        (0..rows)
            .map(|r| {
                let y = (r as f64 + 0.5) / rows as f64 * 2.0 - 1.0;
                (0..cols)
                    .map(|c| {
                        let x = (c as f64 + 0.5) / cols as f64 * 2.0 - 1.0;
                        let distance = x.hypot(y);
                        if distance > 1.0 || distance < inner {
                            return Cell::Blank;
                        }
                        if sweep >= 360.0 || (sweep > 0.0 && self.angle(x, y) < sweep) {
                            Cell::Arc
                        } else {
                            Cell::Track
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Clockwise angle of a point, measured from the arc start, in `[0, 360)`.
    fn angle(&self, x: f64, y: f64) -> f64 {
        // Screen y grows downwards, so atan2 already runs clockwise
        (y.atan2(x).to_degrees() - self.style.rotation_degrees).rem_euclid(360.0)
    }

    fn paint(&self, cell: Cell, run: usize, view: &RingView) -> String {
        match cell {
            Cell::Blank => " ".repeat(run),
            Cell::Track => Style::new()
                .foreground(Color::from(view.color(Tone::Secondary)))
                .render(&self.style.track_glyph.to_string().repeat(run)),
            Cell::Arc => Style::new()
                .foreground(Color::from(view.color(Tone::Primary)))
                .render(&self.style.arc_glyph.to_string().repeat(run)),
        }
    }

    fn paint_cells(&self, cells: &[Cell], view: &RingView) -> String {
        let mut out = String::new();
        let mut start = 0;
        while start < cells.len() {
            let kind = cells[start];
            let end = cells[start..]
                .iter()
                .position(|&c| c != kind)
                .map_or(cells.len(), |offset| start + offset);
            out.push_str(&self.paint(kind, end - start, view));
            start = end;
        }
        out
    }

    fn button(&self, view: &RingView) -> String {
        let icon = if view.paused {
            &self.style.play_icon
        } else {
            &self.style.pause_icon
        };
        Style::new()
            .bold(true)
            .foreground(Color::from(view.color(Tone::Primary)))
            .render(&format!("( {} )", icon))
    }
}

impl RenderSink for TerminalRing {
    fn render(&self, view: &RingView) -> String {
        let grid = self.grid(view);
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        let first_text_row = (rows / 2).saturating_sub(view.center.len() / 2);

        let mut lines: Vec<String> = Vec::with_capacity(rows + 1);
        for (r, cells) in grid.iter().enumerate() {
            let text = r
                .checked_sub(first_text_row)
                .and_then(|i| view.center.get(i));

            let line = match text {
                Some(center) => {
                    let text = truncate_to_width(&center.text, cols);
                    let width = UnicodeWidthStr::width(text.as_str());
                    let left = (cols - width) / 2;
                    let label = Style::new()
                        .bold(true)
                        .foreground(Color::from(view.color(center.tone)))
                        .render(&text);
                    format!(
                        "{}{}{}",
                        self.paint_cells(&cells[..left], view),
                        label,
                        self.paint_cells(&cells[left + width..], view)
                    )
                }
                None => self.paint_cells(cells, view),
            };
            lines.push(line);
        }

        if view.button_active {
            let button = self.button(view);
            let width = lipgloss_extras::lipgloss::width_visible(&button);
            let left = cols.saturating_sub(width) / 2;
            lines.push(format!("{}{}", " ".repeat(left), button));
        }

        lines.join("\n")
    }
}

/// Longest prefix of `text` that fits in `max_width` columns.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    text.chars()
        .take_while(|c| {
            width += UnicodeWidthChar::width(*c).unwrap_or(0);
            width <= max_width
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{self, CenterMode, DisplayConfig, Size};
    use crate::state::ProgressState;
    use lipgloss_extras::lipgloss;

    fn view_at(target: i64, current: u64, config: &DisplayConfig) -> RingView {
        let mut state = ProgressState::new(target).unwrap();
        for _ in 0..current {
            state.on_tick();
        }
        display::view_model(&state, config)
    }

    fn count(grid: &[Vec<Cell>], kind: Cell) -> usize {
        grid.iter().flatten().filter(|&&c| c == kind).count()
    }

    #[test]
    fn test_dimensions_by_size() {
        let ring = TerminalRing::default();
        assert_eq!(ring.dimensions(Size::Small.height()), (10, 20));
        assert_eq!(ring.dimensions(Size::Medium.height()), (14, 28));
        assert_eq!(ring.dimensions(Size::Large.height()), (18, 36));
        assert_eq!(ring.dimensions(10.0), (3, 6));
    }

    #[test]
    fn test_empty_ring_has_no_arc() {
        let ring = TerminalRing::default();
        let grid = ring.grid(&view_at(10, 0, &DisplayConfig::default()));
        assert_eq!(count(&grid, Cell::Arc), 0);
        assert!(count(&grid, Cell::Track) > 0);
    }

    #[test]
    fn test_full_ring_has_no_track() {
        let ring = TerminalRing::default();
        let grid = ring.grid(&view_at(10, 10, &DisplayConfig::default()));
        assert_eq!(count(&grid, Cell::Track), 0);
        assert!(count(&grid, Cell::Arc) > 0);
    }

    #[test]
    fn test_arc_grows_with_progress() {
        let ring = TerminalRing::default();
        let config = DisplayConfig::default();
        let mut last = 0;
        for current in 0..=8 {
            let grid = ring.grid(&view_at(8, current, &config));
            let arc = count(&grid, Cell::Arc);
            assert!(arc >= last);
            last = arc;
        }
    }

    #[test]
    fn test_quarter_arc_starts_at_top_and_runs_clockwise() {
        let ring = TerminalRing::default();
        let grid = ring.grid(&view_at(4, 1, &DisplayConfig::default()));
        let rows = grid.len();
        let cols = grid[0].len();

        for (r, row) in grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if *cell == Cell::Arc {
                    // Upper right quadrant only
                    assert!(r < rows / 2, "arc cell at row {r}");
                    assert!(c >= cols / 2, "arc cell at col {c}");
                }
            }
        }
        assert!(count(&grid, Cell::Arc) > 0);
    }

    fn same_angle(a: f64, b: f64) -> bool {
        let diff = (a - b).rem_euclid(360.0);
        diff < 1e-9 || diff > 360.0 - 1e-9
    }

    #[test]
    fn test_angle_orientation() {
        let ring = TerminalRing::default();
        assert!(same_angle(ring.angle(0.0, -1.0), 0.0));
        assert!(same_angle(ring.angle(1.0, 0.0), 90.0));
        assert!(same_angle(ring.angle(0.0, 1.0), 180.0));
        assert!(same_angle(ring.angle(-1.0, 0.0), 270.0));
    }

    #[test]
    fn test_render_contains_center_text() {
        let ring = TerminalRing::default();
        let config = DisplayConfig::default().with_center(CenterMode::PercentageRemaining);
        let frame = lipgloss::strip_ansi(&ring.render(&view_at(50, 25, &config)));

        assert!(frame.contains("50 %"));
        assert!(frame.contains("25 Remain"));
        assert_eq!(frame.lines().count(), 14);
    }

    #[test]
    fn test_render_lines_share_width() {
        let ring = TerminalRing::default();
        let config = DisplayConfig::default().with_size(Size::Small);
        let frame = lipgloss::strip_ansi(&ring.render(&view_at(3, 1, &config)));

        for line in frame.lines() {
            assert_eq!(UnicodeWidthStr::width(line), 20, "line {line:?}");
        }
    }

    #[test]
    fn test_render_without_text_or_button() {
        let ring = TerminalRing::default();
        let config = DisplayConfig::default().with_center(CenterMode::Nothing);
        let frame = lipgloss::strip_ansi(&ring.render(&view_at(5, 2, &config)));

        assert!(!frame.contains('%'));
        assert!(!frame.contains('('));
    }

    #[test]
    fn test_button_icon_follows_pause_state() {
        let ring = TerminalRing::default();
        let config = DisplayConfig::default().with_button(true);
        let mut view = view_at(5, 2, &config);

        let running = lipgloss::strip_ansi(&ring.render(&view));
        assert!(running.lines().last().unwrap().contains("⏸"));

        view.paused = true;
        let paused = lipgloss::strip_ansi(&ring.render(&view));
        assert!(paused.lines().last().unwrap().contains("▶"));
    }

    #[test]
    fn test_huge_height_is_bounded() {
        let ring = TerminalRing::default();
        assert_eq!(ring.dimensions(1.0e9), (200, 400));
        assert_eq!(ring.dimensions(f64::MAX), (200, 400));

        let config = DisplayConfig::default().with_size(Size::Custom(1.0e9));
        let view = view_at(10, 3, &config);
        assert_eq!(view.height, 1.0e9);

        let frame = lipgloss::strip_ansi(&ring.render(&view));
        assert_eq!(frame.lines().count(), 200);
        assert!(frame.lines().all(|line| UnicodeWidthStr::width(line) == 400));
    }

    #[test]
    fn test_max_rows_is_configurable() {
        let ring = TerminalRing::new(RenderStyle {
            max_rows: 12,
            ..RenderStyle::default()
        });
        assert_eq!(ring.dimensions(Size::Large.height()), (12, 24));
        assert_eq!(ring.dimensions(Size::Small.height()), (10, 20));
    }

    #[test]
    fn test_wide_center_text_is_truncated() {
        let ring = TerminalRing::default();
        let mut view = view_at(5, 1, &DisplayConfig::default().with_size(Size::Custom(10.0)));
        view.center[0].text = "123456789 Remain".to_string();

        let frame = lipgloss::strip_ansi(&ring.render(&view));
        for line in frame.lines() {
            assert_eq!(UnicodeWidthStr::width(line), 6, "line {line:?}");
        }
        assert!(frame.contains("123456"));
        assert!(!frame.contains("1234567"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("50 %", 10), "50 %");
        assert_eq!(truncate_to_width("25 Remain", 4), "25 R");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_custom_style() {
        let ring = TerminalRing::new(RenderStyle {
            arc_glyph: '#',
            track_glyph: '.',
            ..RenderStyle::default()
        });
        let config = DisplayConfig::default().with_center(CenterMode::Nothing);
        let frame = lipgloss::strip_ansi(&ring.render(&view_at(2, 1, &config)));

        assert!(frame.contains('#'));
        assert!(frame.contains('.'));
        assert!(!frame.contains('█'));
    }
}
