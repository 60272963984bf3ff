//! Snow: a fixed population of glyphs drifting down and swaying.

use serde::{Deserialize, Serialize};

use crate::chars::ALPHANUMERIC;
use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{angle, pick, spread, wrap};
use crate::surface::{Paint, Rgb, Surface};

/// Flakes may leave the screen by this much before wrapping.
const MARGIN: f32 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowParams {
    pub count: usize,
    pub min_size: f32,
    pub max_size: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Horizontal drift per frame at the peak of a sway.
    pub sway: f32,
    pub color: Rgb,
}

impl Default for SnowParams {
    fn default() -> Self {
        Self {
            count: 60,
            min_size: 10.0,
            max_size: 35.0,
            min_speed: 0.3,
            max_speed: 1.5,
            sway: 0.5,
            color: Rgb::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flake {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub phase: f32,
    pub phase_speed: f32,
    pub opacity: f32,
}

#[derive(Debug)]
pub struct SnowEffect {
    params: SnowParams,
    flakes: Vec<Flake>,
}

impl SnowEffect {
    pub fn new(params: SnowParams) -> Self {
        Self {
            params,
            flakes: Vec::new(),
        }
    }

    pub fn flakes(&self) -> &[Flake] {
        &self.flakes
    }
}

impl Effect for SnowEffect {
    fn name(&self) -> &'static str {
        "snow"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    fn seed(&mut self, scene: &Scene, rng: &mut FxRng) {
        let p = &self.params;
        self.flakes = (0..p.count)
            .map(|_| Flake {
                ch: pick(rng, ALPHANUMERIC),
                x: spread(rng, 0.0, scene.width),
                y: spread(rng, 0.0, scene.height),
                size: spread(rng, p.min_size, p.max_size),
                speed: spread(rng, p.min_speed, p.max_speed),
                phase: angle(rng),
                phase_speed: spread(rng, 0.02, 0.05),
                opacity: spread(rng, 0.5, 1.0),
            })
            .collect();
    }

    fn step(&mut self, scene: &Scene, _tick: Tick, rng: &mut FxRng) {
        let sway = self.params.sway;
        for flake in &mut self.flakes {
            flake.y += flake.speed;
            flake.phase += flake.phase_speed;
            flake.x += flake.phase.sin() * sway;

            if flake.y > scene.height + MARGIN {
                flake.y = -MARGIN;
                flake.x = spread(rng, 0.0, scene.width);
            }
            wrap(&mut flake.x, -MARGIN, scene.width + MARGIN);
        }
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        for flake in &self.flakes {
            let paint = Paint::sized(self.params.color, flake.opacity, flake.size);
            surface.glyph(flake.x, flake.y, flake.ch, paint);
        }
    }

    fn clear(&mut self) {
        self.flakes.clear();
    }

    fn len(&self) -> usize {
        self.flakes.len()
    }
}
