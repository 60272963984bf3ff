//! Fire: glyphs rise from beneath the clock and cool from yellow to red.

use serde::{Deserialize, Serialize};

use crate::chars::ALPHANUMERIC;
use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{BurstTimer, Lifetime, pick, signed, spread};
use crate::store::Store;
use crate::surface::{Paint, Rgb, Surface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireParams {
    /// Milliseconds between bursts.
    pub interval_ms: u64,
    pub max_particles: usize,
    pub per_burst: usize,
    /// Horizontal spawn band as a fraction of the width, centered.
    pub band: f32,
    /// Spawn height below the vertical center.
    pub rise_offset: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_life: u32,
    pub max_life: u32,
    /// Vertical velocity kept per frame.
    pub lift_damping: f32,
    /// Horizontal velocity kept per frame.
    pub damping: f32,
    /// Maximum random horizontal push per frame.
    pub turbulence: f32,
    /// Hot, warm and cool colors; the cool one fades out at the end of life.
    pub ramp: [Rgb; 3],
}

impl Default for FireParams {
    fn default() -> Self {
        Self {
            interval_ms: 30,
            max_particles: 300,
            per_burst: 3,
            band: 0.6,
            rise_offset: 50.0,
            min_size: 10.0,
            max_size: 30.0,
            min_life: 60,
            max_life: 100,
            lift_damping: 0.98,
            damping: 0.95,
            turbulence: 0.15,
            ramp: [Rgb(255, 255, 0), Rgb(255, 102, 0), Rgb(255, 0, 0)],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ember {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub life: Lifetime,
}

#[derive(Debug)]
pub struct FireEffect {
    params: FireParams,
    embers: Store<Ember>,
    timer: BurstTimer,
}

/// Color and alpha of an ember that has used `ratio` of its life.
///
/// The hot color cools to the warm one, then to the cool one, and the cool
/// color fades out over the last third.
pub fn fire_color(ramp: &[Rgb; 3], ratio: f32) -> (Rgb, f32) {
    let r = ratio.clamp(0.0, 1.0);
    let [hot, warm, cool] = *ramp;
    if r < 0.33 {
        (hot.lerp(warm, r / 0.33), 1.0)
    } else if r < 0.66 {
        (warm.lerp(cool, (r - 0.33) / 0.33), 1.0)
    } else {
        (cool, (1.0 - (r - 0.66) * 3.0).max(0.0))
    }
}

impl FireEffect {
    pub fn new(params: FireParams) -> Self {
        let embers = Store::new(params.max_particles);
        let timer = BurstTimer::new(params.interval_ms, 0);
        Self {
            params,
            embers,
            timer,
        }
    }

    pub fn embers(&self) -> &Store<Ember> {
        &self.embers
    }

    fn ignite(&mut self, scene: &Scene, rng: &mut FxRng) {
        let p = &self.params;
        let (cx, cy) = scene.center();
        let half_band = scene.width * p.band / 2.0;
        for _ in 0..p.per_burst {
            let ember = Ember {
                ch: pick(rng, ALPHANUMERIC),
                x: cx + signed(rng, half_band),
                y: cy + p.rise_offset,
                vx: signed(rng, 1.0),
                vy: -spread(rng, 2.0, 5.0),
                size: spread(rng, p.min_size, p.max_size),
                life: Lifetime::new(spread(rng, p.min_life as f32, p.max_life as f32) as u32),
            };
            if !self.embers.push(ember) {
                break;
            }
        }
    }
}

impl Effect for FireEffect {
    fn name(&self) -> &'static str {
        "fire"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    fn seed(&mut self, _scene: &Scene, _rng: &mut FxRng) {
        self.embers.clear();
        self.timer = BurstTimer::new(self.params.interval_ms, 0);
    }

    fn step(&mut self, scene: &Scene, tick: Tick, rng: &mut FxRng) {
        for _ in 0..self.timer.fire(tick.delta_ms, rng) {
            if self.embers.is_full() {
                break;
            }
            self.ignite(scene, rng);
        }

        let p = &self.params;
        let (lift_damping, damping, turbulence) = (p.lift_damping, p.damping, p.turbulence);
        self.embers.retain_mut(|e| {
            e.vy *= lift_damping;
            e.vx += signed(rng, turbulence);
            e.vx *= damping;
            e.x += e.vx;
            e.y += e.vy;
            e.life.advance()
        });
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        for ember in &self.embers {
            let ratio = ember.life.ratio();
            let (color, alpha) = fire_color(&self.params.ramp, ratio);
            let size = ember.size * (1.0 - ratio * 0.5);
            surface.glyph(ember.x, ember.y, ember.ch, Paint::sized(color, alpha, size));
        }
    }

    fn clear(&mut self) {
        self.embers.clear();
    }

    fn len(&self) -> usize {
        self.embers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testing::{rng, run, scene};
    use proptest::prelude::*;

    #[test]
    fn test_color_ramp() {
        let ramp = FireParams::default().ramp;
        assert_eq!(fire_color(&ramp, 0.0), (Rgb(255, 255, 0), 1.0));
        let (orange, alpha) = fire_color(&ramp, 0.5);
        assert_eq!(orange.0, 255);
        assert!(orange.1 < 102 && orange.1 > 0);
        assert_eq!(alpha, 1.0);
        let (red, alpha) = fire_color(&ramp, 0.8);
        assert_eq!(red, Rgb(255, 0, 0));
        assert!((alpha - 0.58).abs() < 1e-4);
        assert_eq!(fire_color(&ramp, 1.0).1, 0.0);
    }

    #[test]
    fn test_custom_ramp_is_used() {
        let ramp = [Rgb(0, 0, 255), Rgb(0, 255, 0), Rgb(10, 20, 30)];
        assert_eq!(fire_color(&ramp, 0.0).0, Rgb(0, 0, 255));
        assert_eq!(fire_color(&ramp, 0.7).0, Rgb(10, 20, 30));
    }

    #[test]
    fn test_damping_and_turbulence_from_params() {
        let params = FireParams {
            interval_ms: 0,
            per_burst: 1,
            lift_damping: 0.5,
            damping: 0.0,
            turbulence: 0.0,
            ..Default::default()
        };
        let mut effect = FireEffect::new(params);
        let scene = scene("");
        let mut rng = rng(5);
        effect.seed(&scene, &mut rng);
        effect.step(&scene, crate::effects::testing::tick(1), &mut rng);
        let first = effect.embers().get(0).cloned();
        assert!(first.is_some_and(|e| e.vx == 0.0 && e.vy >= -2.5 && e.vy <= -1.0));
    }

    #[test]
    fn test_starts_empty_and_bursts_on_interval() {
        let mut effect = FireEffect::new(FireParams::default());
        let scene = scene("");
        let mut rng = rng(1);
        effect.seed(&scene, &mut rng);
        assert!(effect.is_empty());
        // 0 ms, 16 ms, 32 ms: the first burst lands once 30 ms have passed
        run(&mut effect, &scene, &mut rng, 2, |_| {});
        assert_eq!(effect.len(), 0);
        run(&mut effect, &scene, &mut rng, 2, |_| {});
        assert_eq!(effect.len(), 3);
    }

    #[test]
    fn test_embers_rise_from_below_center() {
        let mut effect = FireEffect::new(FireParams::default());
        let scene = scene("");
        let mut rng = rng(2);
        effect.seed(&scene, &mut rng);
        run(&mut effect, &scene, &mut rng, 60, |e| {
            for ember in e.embers() {
                assert!(ember.y < 192.0 + 50.0);
                assert!(ember.vy < 0.0);
            }
        });
    }

    #[test]
    fn test_population_never_exceeds_cap() {
        let params = FireParams {
            interval_ms: 0,
            max_particles: 40,
            ..Default::default()
        };
        let mut effect = FireEffect::new(params);
        let scene = scene("");
        let mut rng = rng(3);
        effect.seed(&scene, &mut rng);
        let mut peak = 0;
        run(&mut effect, &scene, &mut rng, 300, |e| peak = peak.max(e.len()));
        assert_eq!(peak, 40);
    }

    #[test]
    fn test_default_population_stays_under_three_hundred() {
        let mut effect = FireEffect::new(FireParams::default());
        let scene = scene("");
        let mut rng = rng(6);
        effect.seed(&scene, &mut rng);
        let mut previous = 0;
        run(&mut effect, &scene, &mut rng, 2000, |e| {
            assert!(e.len() <= 300);
            // one 16 ms frame holds at most one 30 ms burst of three
            assert!(e.len() <= previous + 3);
            previous = e.len();
        });
    }

    proptest! {
        #[test]
        fn prop_ember_age_stays_within_life(seed in any::<u64>()) {
            let mut effect = FireEffect::new(FireParams::default());
            let scene = scene("");
            let mut rng = rng(seed);
            effect.seed(&scene, &mut rng);
            run(&mut effect, &scene, &mut rng, 150, |e| {
                for ember in e.embers() {
                    assert!(ember.life.age() <= ember.life.max_age());
                }
            });
        }
    }
}
