//! Matrix rain: one falling head per column leaving a fading trail.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chars::MATRIX_CHARS;
use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::pick;
use crate::surface::{Paint, Rgb, Surface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixParams {
    /// Column spacing and row height in pixels.
    pub font_size: f32,
    /// Chance per frame that a head below the bottom restarts at the top.
    pub reset_chance: f64,
    pub fade: f32,
    pub color: Rgb,
}

impl Default for MatrixParams {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            reset_chance: 0.025,
            fade: 0.05,
            color: Rgb(0, 255, 65),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixColumn {
    /// Row the head is drawn on this frame; the glyph sits above its baseline.
    pub head: u32,
    /// Row the head moves to on the next frame.
    pub row: u32,
    /// Glyph drawn at the head this frame.
    pub glyph: char,
}

#[derive(Debug)]
pub struct MatrixEffect {
    params: MatrixParams,
    columns: Vec<MatrixColumn>,
}

impl MatrixEffect {
    pub fn new(params: MatrixParams) -> Self {
        Self {
            params,
            columns: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[MatrixColumn] {
        &self.columns
    }

    fn font_size(&self) -> f32 {
        self.params.font_size.max(1.0)
    }
}

impl Effect for MatrixEffect {
    fn name(&self) -> &'static str {
        "matrix"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Fade(self.params.fade)
    }

    fn seed(&mut self, scene: &Scene, _rng: &mut FxRng) {
        let count = (scene.width / self.font_size()) as usize;
        self.columns = vec![
            MatrixColumn {
                head: 1,
                row: 1,
                glyph: ' ',
            };
            count
        ];
    }

    fn step(&mut self, scene: &Scene, _tick: Tick, rng: &mut FxRng) {
        let size = self.font_size();
        let reset_chance = self.params.reset_chance.clamp(0.0, 1.0);
        for col in &mut self.columns {
            col.head = col.row;
            col.glyph = pick(rng, MATRIX_CHARS);
            if col.row as f32 * size > scene.height && rng.random_bool(reset_chance) {
                col.row = 0;
            }
            col.row = col.row.saturating_add(1);
        }
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        let size = self.font_size();
        let paint = Paint::new(self.params.color, 1.0);
        for (i, col) in self.columns.iter().enumerate() {
            let y = col.head as f32 * size - size / 2.0;
            surface.glyph(i as f32 * size, y, col.glyph, paint);
        }
    }

    fn clear(&mut self) {
        self.columns.clear();
    }

    fn len(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testing::{rng, run, scene};

    #[test]
    fn test_one_column_per_font_width() {
        let mut effect = MatrixEffect::new(MatrixParams::default());
        effect.seed(&scene(""), &mut rng(1));
        assert_eq!(effect.len(), 40);
    }

    #[test]
    fn test_heads_fall_one_row_per_frame() {
        let mut effect = MatrixEffect::new(MatrixParams::default());
        let scene = scene("");
        let mut rng = rng(2);
        effect.seed(&scene, &mut rng);
        run(&mut effect, &scene, &mut rng, 10, |_| {});
        assert!(effect.columns().iter().all(|c| c.head == 10 && c.row == 11));
        assert!(effect.columns().iter().all(|c| MATRIX_CHARS.contains(&c.glyph)));
    }

    #[test]
    fn test_first_frame_draws_top_row() {
        let mut effect = MatrixEffect::new(MatrixParams::default());
        let scene = scene("");
        let mut rng = rng(4);
        effect.seed(&scene, &mut rng);
        let mut surface = Surface::new(80, 24);
        effect.step(&scene, Tick::default(), &mut rng);
        effect.paint(&scene, &mut surface);
        assert!(surface.cell(0, 0).is_some_and(|c| !c.is_empty()));
        assert!(surface.cell(0, 1).is_some_and(|c| c.is_empty()));

        effect.step(&scene, Tick::default(), &mut rng);
        effect.paint(&scene, &mut surface);
        assert!(surface.cell(0, 1).is_some_and(|c| !c.is_empty()));
    }

    #[test]
    fn test_heads_restart_after_leaving_screen() {
        let params = MatrixParams {
            reset_chance: 1.0,
            ..Default::default()
        };
        let mut effect = MatrixEffect::new(params);
        let scene = scene("");
        let mut rng = rng(3);
        effect.seed(&scene, &mut rng);
        // 384 px / 16 px = 24 rows
        run(&mut effect, &scene, &mut rng, 200, |e| {
            assert!(e.columns().iter().all(|c| c.row <= 26));
        });
    }
}
