//! Bouncing clock digits that ricochet off the screen edges.

use serde::{Deserialize, Serialize};

use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{angle, reflect, signed, spread};
use crate::surface::{Paint, Rgb, Surface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceParams {
    /// Maximum initial speed per axis, in pixels per frame.
    pub launch_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Fraction of speed kept after hitting an edge.
    pub elasticity: f32,
    /// Per-frame velocity multiplier.
    pub damping: f32,
    /// Speed below which a glyph is kicked in a random direction.
    pub min_speed: f32,
    pub fade: f32,
    pub color: Rgb,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            launch_speed: 4.0,
            min_size: 60.0,
            max_size: 100.0,
            elasticity: 0.85,
            damping: 0.99,
            min_speed: 0.5,
            fade: 0.1,
            color: Rgb(255, 136, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BouncingGlyph {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
}

#[derive(Debug)]
pub struct BounceEffect {
    params: BounceParams,
    glyphs: Vec<BouncingGlyph>,
}

impl BounceEffect {
    pub fn new(params: BounceParams) -> Self {
        Self {
            params,
            glyphs: Vec::new(),
        }
    }

    pub fn glyphs(&self) -> &[BouncingGlyph] {
        &self.glyphs
    }

    /// Move one glyph and bounce it off the walls of `scene`.
    pub fn advance(&self, glyph: &mut BouncingGlyph, scene: &Scene, rng: &mut FxRng) {
        let p = &self.params;
        glyph.x += glyph.vx;
        glyph.y += glyph.vy;

        let margin = glyph.size / 2.0;
        reflect(&mut glyph.x, &mut glyph.vx, margin, scene.width - margin, p.elasticity);
        reflect(&mut glyph.y, &mut glyph.vy, margin, scene.height - margin, p.elasticity);

        glyph.vx *= p.damping;
        glyph.vy *= p.damping;

        if glyph.vx.hypot(glyph.vy) < p.min_speed {
            let a = angle(rng);
            glyph.vx = a.cos() * p.min_speed;
            glyph.vy = a.sin() * p.min_speed;
        }
    }
}

impl Effect for BounceEffect {
    fn name(&self) -> &'static str {
        "bounce"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Fade(self.params.fade)
    }

    fn seed(&mut self, scene: &Scene, rng: &mut FxRng) {
        let p = &self.params;
        self.glyphs = scene
            .text
            .chars()
            .map(|ch| BouncingGlyph {
                ch,
                x: spread(rng, 0.0, scene.width),
                y: spread(rng, 0.0, scene.height),
                vx: signed(rng, p.launch_speed),
                vy: signed(rng, p.launch_speed),
                size: spread(rng, p.min_size, p.max_size),
            })
            .collect();
    }

    fn step(&mut self, scene: &Scene, _tick: Tick, rng: &mut FxRng) {
        let mut glyphs = std::mem::take(&mut self.glyphs);
        for glyph in &mut glyphs {
            self.advance(glyph, scene, rng);
        }
        self.glyphs = glyphs;
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        for glyph in &self.glyphs {
            let paint = Paint::new(self.params.color, 1.0).glow();
            surface.glyph(glyph.x, glyph.y, glyph.ch, paint);
        }
    }

    fn clear(&mut self) {
        self.glyphs.clear();
    }

    fn len(&self) -> usize {
        self.glyphs.len()
    }

    fn set_text(&mut self, text: &str) {
        for (glyph, ch) in self.glyphs.iter_mut().zip(text.chars()) {
            glyph.ch = ch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testing::{rng, run, scene};

    fn glyph(x: f32, vx: f32) -> BouncingGlyph {
        BouncingGlyph {
            ch: '1',
            x,
            y: 200.0,
            vx,
            vy: 0.0,
            size: 60.0,
        }
    }

    #[test]
    fn test_one_glyph_per_clock_char() {
        let mut effect = BounceEffect::new(BounceParams::default());
        effect.seed(&scene("12:34:56:789"), &mut rng(1));
        assert_eq!(effect.len(), 12);
        let text: String = effect.glyphs().iter().map(|g| g.ch).collect();
        assert_eq!(text, "12:34:56:789");
    }

    #[test]
    fn test_crossing_right_edge_reflects_with_elasticity() {
        let effect = BounceEffect::new(BounceParams::default());
        let scene = scene("");
        let mut g = glyph(605.0, 8.0);
        effect.advance(&mut g, &scene, &mut rng(1));
        // clamped to width - size / 2, velocity flipped, scaled by 0.85 then damped
        assert_eq!(g.x, 610.0);
        assert!((g.vx - (-8.0 * 0.85 * 0.99)).abs() < 1e-5);
    }

    #[test]
    fn test_crossing_left_edge_reflects() {
        let effect = BounceEffect::new(BounceParams::default());
        let scene = scene("");
        let mut g = glyph(33.0, -6.0);
        effect.advance(&mut g, &scene, &mut rng(1));
        assert_eq!(g.x, 30.0);
        assert!((g.vx - 6.0 * 0.85 * 0.99).abs() < 1e-5);
    }

    #[test]
    fn test_slow_glyph_is_kicked_to_min_speed() {
        let effect = BounceEffect::new(BounceParams::default());
        let scene = scene("");
        let mut g = glyph(300.0, 0.1);
        effect.advance(&mut g, &scene, &mut rng(4));
        assert!((g.vx.hypot(g.vy) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_glyphs_stay_inside_walls() {
        let mut effect = BounceEffect::new(BounceParams::default());
        let scene = scene("00:00:00:000");
        let mut rng = rng(5);
        effect.seed(&scene, &mut rng);
        run(&mut effect, &scene, &mut rng, 500, |e| {
            for g in e.glyphs() {
                let m = g.size / 2.0;
                assert!(g.x >= m && g.x <= scene.width - m);
                assert!(g.y >= m && g.y <= scene.height - m);
            }
        });
    }

    #[test]
    fn test_update_text_rewrites_in_place() {
        let mut effect = BounceEffect::new(BounceParams::default());
        let mut rng = rng(6);
        effect.seed(&scene("11:11"), &mut rng);
        let positions: Vec<f32> = effect.glyphs().iter().map(|g| g.x).collect();
        effect.set_text("22:22:22");
        let text: String = effect.glyphs().iter().map(|g| g.ch).collect();
        assert_eq!(text, "22:22");
        let after: Vec<f32> = effect.glyphs().iter().map(|g| g.x).collect();
        assert_eq!(positions, after);
    }
}
