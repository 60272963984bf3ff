//! Binary grid: every cell flickers between 0 and 1 on its own timer.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{BurstTimer, spread};
use crate::surface::{Paint, Rgb, Surface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryParams {
    /// Grid pitch in pixels.
    pub cell_size: f32,
    pub min_flip_ms: u64,
    pub flip_jitter_ms: u64,
    /// Cells brighter than this glow.
    pub glow_threshold: f32,
    pub fade: f32,
    pub color: Rgb,
}

impl Default for BinaryParams {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            min_flip_ms: 50,
            flip_jitter_ms: 150,
            glow_threshold: 0.7,
            fade: 0.1,
            color: Rgb(0, 255, 0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinaryCell {
    pub value: char,
    pub opacity: f32,
    timer: BurstTimer,
}

#[derive(Debug)]
pub struct BinaryEffect {
    params: BinaryParams,
    cols: usize,
    cells: Vec<BinaryCell>,
}

fn bit(rng: &mut FxRng) -> char {
    if rng.random_bool(0.5) { '1' } else { '0' }
}

impl BinaryEffect {
    pub fn new(params: BinaryParams) -> Self {
        Self {
            params,
            cols: 0,
            cells: Vec::new(),
        }
    }

    pub fn cells(&self) -> &[BinaryCell] {
        &self.cells
    }

    fn pitch(&self) -> f32 {
        self.params.cell_size.max(1.0)
    }
}

impl Effect for BinaryEffect {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Fade(self.params.fade)
    }

    fn seed(&mut self, scene: &Scene, rng: &mut FxRng) {
        let pitch = self.pitch();
        self.cols = (scene.width / pitch) as usize;
        let rows = (scene.height / pitch) as usize;
        let (min_ms, jitter_ms) = (self.params.min_flip_ms, self.params.flip_jitter_ms);
        self.cells = (0..self.cols * rows)
            .map(|_| BinaryCell {
                value: bit(rng),
                opacity: rng.random::<f32>(),
                timer: BurstTimer::staggered(min_ms, jitter_ms, rng),
            })
            .collect();
    }

    fn step(&mut self, _scene: &Scene, tick: Tick, rng: &mut FxRng) {
        for cell in &mut self.cells {
            if cell.timer.fire(tick.delta_ms, rng) > 0 {
                cell.value = bit(rng);
                cell.opacity = spread(rng, 0.3, 1.0);
            }
        }
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        if self.cols == 0 {
            return;
        }
        let pitch = self.pitch();
        for (i, cell) in self.cells.iter().enumerate() {
            let x = (i % self.cols) as f32 * pitch + pitch / 2.0;
            let y = (i / self.cols) as f32 * pitch + pitch / 2.0;
            let paint = Paint::new(self.params.color, cell.opacity)
                .bold_if(cell.opacity > self.params.glow_threshold);
            surface.glyph(x, y, cell.value, paint);
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.cols = 0;
    }

    fn len(&self) -> usize {
        self.cells.len()
    }
}
