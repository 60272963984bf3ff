//! Glitch: bursts of translucent red and cyan blocks stamped with glyphs.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::chars::{ALPHANUMERIC, BLOCK_FILL};
use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{BurstTimer, Lifetime, count, pick, signed, spread};
use crate::store::Store;
use crate::surface::{Paint, Rgb, Surface};

/// Horizontal pitch of the glyphs stamped across a block.
const GLYPH_PITCH: f32 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchParams {
    pub min_interval_ms: u64,
    pub interval_jitter_ms: u64,
    pub min_blocks: usize,
    pub extra_blocks: usize,
    /// Only the newest blocks up to this many are kept.
    pub max_blocks: usize,
    pub min_life: u32,
    pub extra_life: u32,
    /// Opacity of the block fill relative to its glyphs.
    pub fill_alpha: f32,
    pub colors: [Rgb; 2],
}

impl Default for GlitchParams {
    fn default() -> Self {
        Self {
            min_interval_ms: 100,
            interval_jitter_ms: 200,
            min_blocks: 5,
            extra_blocks: 9,
            max_blocks: 50,
            min_life: 5,
            extra_life: 9,
            fill_alpha: 0.6,
            colors: [Rgb(255, 0, 0), Rgb(0, 255, 255)],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub color: Rgb,
    pub life: Lifetime,
}

#[derive(Debug)]
pub struct GlitchEffect {
    params: GlitchParams,
    blocks: Store<Block>,
    timer: BurstTimer,
}

impl GlitchEffect {
    pub fn new(params: GlitchParams) -> Self {
        let blocks = Store::new(params.max_blocks);
        let timer = BurstTimer::new(params.min_interval_ms, params.interval_jitter_ms);
        Self {
            params,
            blocks,
            timer,
        }
    }

    pub fn blocks(&self) -> &Store<Block> {
        &self.blocks
    }

    fn burst(&mut self, scene: &Scene, rng: &mut FxRng) {
        let p = &self.params;
        let n = count(rng, p.min_blocks, p.extra_blocks);
        trace!(blocks = n, "glitch burst");
        for _ in 0..n {
            let life = p.min_life + rng.random_range(0..=p.extra_life);
            let color = p.colors[usize::from(rng.random_bool(0.5))];
            self.blocks.push_evicting(Block {
                ch: pick(rng, ALPHANUMERIC),
                x: spread(rng, 0.0, scene.width),
                y: spread(rng, 0.0, scene.height),
                width: spread(rng, 50.0, 200.0),
                height: spread(rng, 20.0, 80.0),
                offset_x: signed(rng, 10.0),
                color,
                life: Lifetime::new(life),
            });
        }
    }
}

impl Effect for GlitchEffect {
    fn name(&self) -> &'static str {
        "glitch"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    fn seed(&mut self, _scene: &Scene, rng: &mut FxRng) {
        self.blocks.clear();
        self.timer.rearm(rng);
    }

    fn step(&mut self, scene: &Scene, tick: Tick, rng: &mut FxRng) {
        for _ in 0..self.timer.fire(tick.delta_ms, rng) {
            self.burst(scene, rng);
        }
        self.blocks.retain_mut(|block| block.life.advance());
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        for block in &self.blocks {
            let alpha = block.life.fade();
            let left = block.x + block.offset_x;
            let fill = Paint::new(block.color, alpha * self.params.fill_alpha);
            surface.fill_rect(left, block.y, block.width, block.height, BLOCK_FILL, fill);

            let glyphs = (block.width / GLYPH_PITCH) as usize;
            let mid_y = block.y + block.height / 2.0;
            for i in 0..glyphs {
                let x = left + i as f32 * GLYPH_PITCH + GLYPH_PITCH / 2.0;
                surface.glyph(x, mid_y, block.ch, Paint::new(block.color, alpha));
            }
        }
    }

    fn clear(&mut self) {
        self.blocks.clear();
    }

    fn len(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testing::{rng, run, scene};

    #[test]
    fn test_bursts_spawn_between_five_and_fourteen_blocks() {
        let mut effect = GlitchEffect::new(GlitchParams::default());
        let scene = scene("");
        let mut rng = rng(1);
        for _ in 0..50 {
            effect.clear();
            effect.burst(&scene, &mut rng);
            assert!((5..=14).contains(&effect.len()));
        }
    }

    #[test]
    fn test_blocks_are_red_or_cyan_and_die_young() {
        let mut effect = GlitchEffect::new(GlitchParams::default());
        let scene = scene("");
        let mut rng = rng(2);
        effect.seed(&scene, &mut rng);
        run(&mut effect, &scene, &mut rng, 600, |e| {
            assert!(e.len() <= 50);
            for b in e.blocks() {
                assert!(b.color == Rgb(255, 0, 0) || b.color == Rgb(0, 255, 255));
                assert!((5..=14).contains(&b.life.max_age()));
                assert!(b.life.age() <= b.life.max_age());
            }
        });
    }

    #[test]
    fn test_keeps_only_newest_blocks() {
        let params = GlitchParams {
            min_interval_ms: 0,
            interval_jitter_ms: 0,
            min_life: 1000,
            extra_life: 0,
            ..Default::default()
        };
        let mut effect = GlitchEffect::new(params);
        let scene = scene("");
        let mut rng = rng(3);
        effect.seed(&scene, &mut rng);
        run(&mut effect, &scene, &mut rng, 30, |e| assert!(e.len() <= 50));
        assert_eq!(effect.len(), 50);
        // survivors are from the latest bursts, so none is older than 10 frames
        assert!(effect.blocks().iter().all(|b| b.life.age() <= 10));
    }
}
