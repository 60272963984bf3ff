//! Space flight: stars stream out of the center, speeding up as they go.

use serde::{Deserialize, Serialize};

use crate::chars::STAR_CHARS;
use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{angle, pick, spread};
use crate::surface::{Paint, Rgb, Surface};

const MARGIN: f32 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceParams {
    pub count: usize,
    /// Stars are born within this distance of the center.
    pub birth_radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Distance over which a star doubles its speed.
    pub acceleration_scale: f32,
    pub max_trail: f32,
    pub fade: f32,
    pub star_color: Rgb,
    pub trail_color: Rgb,
}

impl Default for SpaceParams {
    fn default() -> Self {
        Self {
            count: 150,
            birth_radius: 100.0,
            min_speed: 0.5,
            max_speed: 1.5,
            acceleration_scale: 500.0,
            max_trail: 40.0,
            fade: 0.2,
            star_color: Rgb(200, 230, 255),
            trail_color: Rgb(180, 220, 255),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    /// Heading in radians.
    pub heading: f32,
    pub speed: f32,
    /// Speed applied on the last step.
    pub current_speed: f32,
    /// Opacity computed on the last step.
    pub opacity: f32,
}

#[derive(Debug)]
pub struct SpaceEffect {
    params: SpaceParams,
    stars: Vec<Star>,
}

impl SpaceEffect {
    pub fn new(params: SpaceParams) -> Self {
        Self {
            params,
            stars: Vec::new(),
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    fn spawn(&self, scene: &Scene, rng: &mut FxRng) -> Star {
        let p = &self.params;
        let (cx, cy) = scene.center();
        let heading = angle(rng);
        let distance = spread(rng, 0.0, p.birth_radius);
        let speed = spread(rng, p.min_speed, p.max_speed);
        Star {
            ch: pick(rng, STAR_CHARS),
            x: cx + heading.cos() * distance,
            y: cy + heading.sin() * distance,
            heading,
            speed,
            current_speed: speed,
            opacity: 1.0,
        }
    }

    fn escaped(star: &Star, scene: &Scene) -> bool {
        star.x < -MARGIN
            || star.x > scene.width + MARGIN
            || star.y < -MARGIN
            || star.y > scene.height + MARGIN
    }
}

impl Effect for SpaceEffect {
    fn name(&self) -> &'static str {
        "space"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Fade(self.params.fade)
    }

    fn seed(&mut self, scene: &Scene, rng: &mut FxRng) {
        self.stars = (0..self.params.count)
            .map(|_| self.spawn(scene, rng))
            .collect();
    }

    fn step(&mut self, scene: &Scene, _tick: Tick, rng: &mut FxRng) {
        let (cx, cy) = scene.center();
        let extent = scene.extent().max(1.0);
        let scale = self.params.acceleration_scale.max(1.0);
        let mut stars = std::mem::take(&mut self.stars);
        for star in &mut stars {
            let distance = (star.x - cx).hypot(star.y - cy);
            star.current_speed = star.speed * (1.0 + distance / scale);
            star.x += star.heading.cos() * star.current_speed;
            star.y += star.heading.sin() * star.current_speed;
            star.opacity = (1.0 - distance / extent).max(0.0);
            if Self::escaped(star, scene) {
                *star = self.spawn(scene, rng);
            }
        }
        self.stars = stars;
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        let p = &self.params;
        for star in &self.stars {
            let trail = (star.current_speed * 2.5).min(p.max_trail);
            let tail_x = star.x - star.heading.cos() * trail;
            let tail_y = star.y - star.heading.sin() * trail;
            let trail_paint = Paint::new(p.trail_color, star.opacity * 0.8);
            surface.line(tail_x, tail_y, star.x, star.y, trail_paint);
            surface.glyph(star.x, star.y, star.ch, Paint::new(p.star_color, star.opacity).glow());
        }
    }

    fn clear(&mut self) {
        self.stars.clear();
    }

    fn len(&self) -> usize {
        self.stars.len()
    }
}
