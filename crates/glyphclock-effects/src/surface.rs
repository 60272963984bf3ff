//! Terminal drawing surface addressed in virtual pixels.
//!
//! Effects simulate in a pixel space where one terminal cell spans
//! [`CELL_WIDTH`] x [`CELL_HEIGHT`] pixels. Paint calls are projected onto
//! cells and clipped; nothing here can fail.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use serde::{Deserialize, Serialize};

/// Width of one terminal cell in virtual pixels.
pub const CELL_WIDTH: f32 = 8.0;

/// Height of one terminal cell in virtual pixels.
pub const CELL_HEIGHT: f32 = 16.0;

/// Glyphs at least this large (in pixels) are drawn bold.
pub const BOLD_GLYPH_PX: f32 = 28.0;

/// Cells fading below this alpha are cleared.
const FADE_FLOOR: f32 = 0.05;

/// Upper bound on cells visited by one stroke.
const MAX_STROKE_STEPS: f32 = 4096.0;

/// An RGB color, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Scale every channel by `factor` (clamped to 0.0-1.0).
    pub fn scaled(self, factor: f32) -> Rgb {
        let f = factor.clamp(0.0, 1.0);
        Rgb(
            (self.0 as f32 * f) as u8,
            (self.1 as f32 * f) as u8,
            (self.2 as f32 * f) as u8,
        )
    }

    /// Blend towards `other`; `t` is clamped to 0.0-1.0.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Color, opacity and weight for a paint call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Rgb,
    pub alpha: f32,
    pub bold: bool,
}

impl Paint {
    pub fn new(color: Rgb, alpha: f32) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
            bold: false,
        }
    }

    /// Paint for a glyph of the given pixel size.
    pub fn sized(color: Rgb, alpha: f32, size: f32) -> Self {
        Self::new(color, alpha).bold_if(size >= BOLD_GLYPH_PX)
    }

    /// Glowing glyphs are drawn bold.
    pub fn glow(self) -> Self {
        self.bold_if(true)
    }

    pub fn bold_if(mut self, bold: bool) -> Self {
        self.bold |= bold;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}

/// A single painted terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Rgb,
    pub alpha: f32,
    pub bold: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        ch: ' ',
        color: Rgb::BLACK,
        alpha: 0.0,
        bold: false,
    };

    pub fn is_empty(&self) -> bool {
        self.alpha <= 0.0 || self.ch == ' '
    }
}

/// Full-screen drawing target for one effect.
#[derive(Debug, Clone)]
pub struct Surface {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Surface {
    /// Create an empty surface of `cols` x `rows` cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::EMPTY; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Width in virtual pixels.
    pub fn width(&self) -> f32 {
        self.cols as f32 * CELL_WIDTH
    }

    /// Height in virtual pixels.
    pub fn height(&self) -> f32 {
        self.rows as f32 * CELL_HEIGHT
    }

    /// Cell at a column and row.
    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    /// Number of non-empty cells.
    pub fn painted(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Erase every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Darken every cell as if a black overlay of opacity `overlay` was drawn.
    pub fn fade(&mut self, overlay: f32) {
        let keep = 1.0 - overlay.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            cell.alpha *= keep;
            if cell.alpha < FADE_FLOOR {
                *cell = Cell::EMPTY;
            }
        }
    }

    fn index_at(&self, x: f32, y: f32) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / CELL_WIDTH) as usize;
        let row = (y / CELL_HEIGHT) as usize;
        if col >= self.cols as usize || row >= self.rows as usize {
            return None;
        }
        Some(row * self.cols as usize + col)
    }

    fn put(&mut self, idx: usize, ch: char, paint: Paint) {
        if paint.alpha <= 0.0 {
            return;
        }
        self.cells[idx] = Cell {
            ch,
            color: paint.color,
            alpha: paint.alpha,
            bold: paint.bold,
        };
    }

    /// Draw one glyph centered on a pixel position.
    pub fn glyph(&mut self, x: f32, y: f32, ch: char, paint: Paint) {
        if let Some(idx) = self.index_at(x, y) {
            self.put(idx, ch, paint);
        }
    }

    /// Fill a pixel rectangle with `ch`.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, ch: char, paint: Paint) {
        if w <= 0.0 || h <= 0.0 || self.cells.is_empty() {
            return;
        }
        let col_lo = (x / CELL_WIDTH).floor().max(0.0) as i64;
        let row_lo = (y / CELL_HEIGHT).floor().max(0.0) as i64;
        let col_hi = (((x + w) / CELL_WIDTH).ceil() as i64).min(self.cols as i64);
        let row_hi = (((y + h) / CELL_HEIGHT).ceil() as i64).min(self.rows as i64);
        for row in row_lo..row_hi {
            for col in col_lo..col_hi {
                let idx = row as usize * self.cols as usize + col as usize;
                self.put(idx, ch, paint);
            }
        }
    }

    /// Stroke a straight line between two pixel positions.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: Paint) {
        let (c1, r1) = (x1 / CELL_WIDTH, y1 / CELL_HEIGHT);
        let (c2, r2) = (x2 / CELL_WIDTH, y2 / CELL_HEIGHT);
        let ch = stroke_char(c2 - c1, r2 - r1);
        let steps = (c2 - c1).abs().max((r2 - r1).abs()).ceil();
        if !steps.is_finite() {
            return;
        }
        let steps = (steps.min(MAX_STROKE_STEPS) as usize).max(1);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x1 + (x2 - x1) * t;
            let y = y1 + (y2 - y1) * t;
            self.glyph(x, y, ch, paint);
        }
    }

    /// Stroke connected segments through `points`.
    pub fn polyline(&mut self, points: &[(f32, f32)], paint: Paint) {
        for pair in points.windows(2) {
            let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
            self.line(x1, y1, x2, y2, paint);
        }
    }

    /// Project the surface into styled lines, dimming colors by alpha.
    pub fn lines(&self) -> Vec<Line<'static>> {
        if self.cols == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.cols as usize)
            .map(|row| {
                let spans: Vec<Span> = row.iter().map(render_cell).collect();
                Line::from(spans)
            })
            .collect()
    }
}

fn render_cell(cell: &Cell) -> Span<'static> {
    if cell.is_empty() {
        return Span::raw(" ");
    }
    let mut style = Style::new().fg(cell.color.scaled(cell.alpha).into());
    if cell.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(cell.ch.to_string(), style)
}

/// Pick a box-drawing character for a stroke with the given cell deltas.
fn stroke_char(dc: f32, dr: f32) -> char {
    let (adc, adr) = (dc.abs(), dr.abs());
    if adc > 2.0 * adr {
        '─'
    } else if adr > 2.0 * adc {
        '│'
    } else if (dc >= 0.0) == (dr >= 0.0) {
        '╲'
    } else {
        '╱'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = Rgb(0, 255, 0);

    #[test]
    fn test_lerp_blends_channels() {
        let (a, b) = (Rgb(255, 255, 0), Rgb(255, 102, 0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb(255, 179, 0));
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn test_dimensions_in_pixels() {
        let surface = Surface::new(80, 24);
        assert_eq!(surface.width(), 640.0);
        assert_eq!(surface.height(), 384.0);
    }

    #[test]
    fn test_glyph_maps_pixels_to_cells() {
        let mut surface = Surface::new(10, 5);
        surface.glyph(17.0, 33.0, 'x', Paint::new(GREEN, 1.0));
        assert_eq!(surface.cell(2, 2).map(|c| c.ch), Some('x'));
        assert_eq!(surface.painted(), 1);
    }

    #[test]
    fn test_out_of_bounds_paint_is_clipped() {
        let mut surface = Surface::new(4, 4);
        let paint = Paint::new(GREEN, 1.0);
        surface.glyph(-1.0, 5.0, 'a', paint);
        surface.glyph(1000.0, 5.0, 'a', paint);
        surface.glyph(f32::NAN, 5.0, 'a', paint);
        surface.fill_rect(-100.0, -100.0, 50.0, 50.0, '#', paint);
        surface.line(-50.0, -50.0, -10.0, -10.0, paint);
        assert_eq!(surface.painted(), 0);
    }

    #[test]
    fn test_zero_sized_surface_accepts_paint() {
        let mut surface = Surface::new(0, 0);
        surface.glyph(0.0, 0.0, 'a', Paint::new(GREEN, 1.0));
        surface.fill_rect(0.0, 0.0, 10.0, 10.0, '#', Paint::new(GREEN, 1.0));
        surface.fade(0.5);
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn test_fade_eventually_empties_cells() {
        let mut surface = Surface::new(3, 3);
        surface.glyph(0.0, 0.0, 'a', Paint::new(GREEN, 1.0));
        surface.fade(0.5);
        let alpha = surface.cell(0, 0).map(|c| c.alpha).unwrap_or_default();
        assert!((alpha - 0.5).abs() < 1e-6);
        for _ in 0..10 {
            surface.fade(0.5);
        }
        assert_eq!(surface.painted(), 0);
    }

    #[test]
    fn test_fill_rect_covers_cells() {
        let mut surface = Surface::new(10, 10);
        surface.fill_rect(8.0, 16.0, 16.0, 32.0, '#', Paint::new(GREEN, 0.5));
        assert_eq!(surface.painted(), 4);
        assert_eq!(surface.cell(1, 1).map(|c| c.ch), Some('#'));
        assert_eq!(surface.cell(2, 2).map(|c| c.ch), Some('#'));
    }

    #[test]
    fn test_line_uses_slope_characters() {
        let mut surface = Surface::new(20, 10);
        surface.line(0.0, 8.0, 120.0, 8.0, Paint::new(GREEN, 1.0));
        assert_eq!(surface.cell(5, 0).map(|c| c.ch), Some('─'));

        surface.clear();
        surface.line(4.0, 0.0, 4.0, 150.0, Paint::new(GREEN, 1.0));
        assert_eq!(surface.cell(0, 4).map(|c| c.ch), Some('│'));
        assert!(surface.painted() >= 9);
    }

    #[test]
    fn test_transparent_paint_is_skipped() {
        let mut surface = Surface::new(2, 2);
        surface.glyph(0.0, 0.0, 'a', Paint::new(GREEN, 0.0));
        assert_eq!(surface.painted(), 0);
    }

    #[test]
    fn test_lines_dim_by_alpha() {
        let mut surface = Surface::new(2, 1);
        surface.glyph(0.0, 0.0, 'a', Paint::new(Rgb(200, 100, 0), 0.5).glow());
        let lines = surface.lines();
        assert_eq!(lines.len(), 1);
        let span = &lines[0].spans[0];
        assert_eq!(span.content, "a");
        assert_eq!(span.style.fg, Some(Color::Rgb(100, 50, 0)));
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }
}
