//! Wave: glyphs bob around their base lines on a shared sine clock.

use serde::{Deserialize, Serialize};

use crate::chars::ALPHANUMERIC;
use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{angle, pick, spread, wrap};
use crate::surface::{Paint, Rgb, Surface};

const MARGIN: f32 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    pub count: usize,
    /// Phase advance per frame.
    pub time_step: f32,
    /// Vertical swing around the base line, in pixels.
    pub amplitude: f32,
    /// Peak horizontal drift per frame.
    pub drift: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub color: Rgb,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            count: 80,
            time_step: 0.02,
            amplitude: 50.0,
            drift: 2.0,
            min_size: 15.0,
            max_size: 40.0,
            color: Rgb(0, 212, 255),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveParticle {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub base_y: f32,
    pub size: f32,
    pub speed: f32,
    pub offset: f32,
    pub opacity: f32,
}

#[derive(Debug)]
pub struct WaveEffect {
    params: WaveParams,
    particles: Vec<WaveParticle>,
    time: f32,
}

impl WaveEffect {
    pub fn new(params: WaveParams) -> Self {
        Self {
            params,
            particles: Vec::new(),
            time: 0.0,
        }
    }

    pub fn particles(&self) -> &[WaveParticle] {
        &self.particles
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

impl Effect for WaveEffect {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    fn seed(&mut self, scene: &Scene, rng: &mut FxRng) {
        let p = &self.params;
        self.time = 0.0;
        self.particles = (0..p.count)
            .map(|_| WaveParticle {
                ch: pick(rng, ALPHANUMERIC),
                x: spread(rng, 0.0, scene.width),
                y: spread(rng, 0.0, scene.height),
                base_y: spread(rng, 0.0, scene.height),
                size: spread(rng, p.min_size, p.max_size),
                speed: spread(rng, 0.5, 2.0),
                offset: angle(rng),
                opacity: spread(rng, 0.3, 1.0),
            })
            .collect();
    }

    fn step(&mut self, scene: &Scene, _tick: Tick, _rng: &mut FxRng) {
        let p = &self.params;
        self.time += p.time_step;
        let t = self.time;
        for particle in &mut self.particles {
            particle.y = particle.base_y + (t + particle.offset).sin() * p.amplitude;
            particle.x += (t * particle.speed + particle.offset).sin() * p.drift;
            wrap(&mut particle.x, -MARGIN, scene.width + MARGIN);
        }
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        for particle in &self.particles {
            let paint = Paint::sized(self.params.color, particle.opacity, particle.size);
            surface.glyph(particle.x, particle.y, particle.ch, paint);
        }
    }

    fn clear(&mut self) {
        self.particles.clear();
        self.time = 0.0;
    }

    fn len(&self) -> usize {
        self.particles.len()
    }
}
