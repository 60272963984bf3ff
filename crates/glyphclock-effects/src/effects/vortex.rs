//! Vortex: glyphs spiral outwards around the screen center.

use serde::{Deserialize, Serialize};

use crate::chars::ALPHANUMERIC;
use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{angle, pick, spread};
use crate::surface::{Paint, Rgb, Surface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VortexParams {
    pub count: usize,
    /// Distance particles restart at after escaping.
    pub inner_radius: f32,
    /// Extra spread of initial distances beyond `inner_radius`.
    pub initial_spread: f32,
    /// Rotation of the whole vortex per frame, in radians.
    pub spin: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub fade: f32,
    pub color: Rgb,
}

impl Default for VortexParams {
    fn default() -> Self {
        Self {
            count: 100,
            inner_radius: 50.0,
            initial_spread: 400.0,
            spin: 0.005,
            min_size: 12.0,
            max_size: 32.0,
            fade: 0.1,
            color: Rgb(68, 68, 255),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Orbiter {
    pub ch: char,
    pub distance: f32,
    pub angle: f32,
    /// Angular speed in radians per frame.
    pub speed: f32,
    /// Outward speed in pixels per frame.
    pub spiral: f32,
    pub size: f32,
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug)]
pub struct VortexEffect {
    params: VortexParams,
    orbiters: Vec<Orbiter>,
    rotation: f32,
}

impl VortexEffect {
    pub fn new(params: VortexParams) -> Self {
        Self {
            params,
            orbiters: Vec::new(),
            rotation: 0.0,
        }
    }

    pub fn orbiters(&self) -> &[Orbiter] {
        &self.orbiters
    }

    /// Distance past which an orbiter restarts near the center.
    pub fn max_distance(scene: &Scene) -> f32 {
        scene.extent() / 2.0 + 100.0
    }
}

impl Effect for VortexEffect {
    fn name(&self) -> &'static str {
        "vortex"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Fade(self.params.fade)
    }

    fn seed(&mut self, scene: &Scene, rng: &mut FxRng) {
        let p = &self.params;
        let (cx, cy) = scene.center();
        self.rotation = 0.0;
        self.orbiters = (0..p.count)
            .map(|_| Orbiter {
                ch: pick(rng, ALPHANUMERIC),
                distance: p.inner_radius + spread(rng, 0.0, p.initial_spread),
                angle: angle(rng),
                speed: spread(rng, 0.01, 0.03),
                spiral: spread(rng, 0.5, 1.5),
                size: spread(rng, p.min_size, p.max_size),
                opacity: spread(rng, 0.4, 1.0),
                x: cx,
                y: cy,
            })
            .collect();
    }

    fn step(&mut self, scene: &Scene, _tick: Tick, rng: &mut FxRng) {
        self.rotation += self.params.spin;
        let (cx, cy) = scene.center();
        let max_distance = Self::max_distance(scene);
        let inner = self.params.inner_radius;

        for o in &mut self.orbiters {
            o.angle += o.speed;
            o.distance += o.spiral;
            if o.distance > max_distance {
                o.distance = inner;
                o.angle = angle(rng);
            }
            let theta = o.angle + self.rotation;
            o.x = cx + theta.cos() * o.distance;
            o.y = cy + theta.sin() * o.distance;
        }
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        for o in &self.orbiters {
            let paint = Paint::sized(self.params.color, o.opacity, o.size);
            surface.glyph(o.x, o.y, o.ch, paint);
        }
    }

    fn clear(&mut self) {
        self.orbiters.clear();
        self.rotation = 0.0;
    }

    fn len(&self) -> usize {
        self.orbiters.len()
    }
}
