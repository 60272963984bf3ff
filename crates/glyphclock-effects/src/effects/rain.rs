//! Rain: clock digits drip from the clock and fall under gravity.
//!
//! Drops spawn faster as the minute goes on: the spawn interval is divided by
//! `second / 10 + 1`.

use serde::{Deserialize, Serialize};

use crate::chars::CLOCK_CHARS;
use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{Lifetime, pick, signed, spread};
use crate::store::Store;
use crate::surface::{Paint, Rgb, Surface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainParams {
    /// Spawn interval at intensity 1.
    pub interval_ms: u64,
    pub max_drops: usize,
    pub band: f32,
    pub gravity: f32,
    pub max_velocity: f32,
    pub life: u32,
    pub min_size: f32,
    pub max_size: f32,
    pub color: Rgb,
}

impl Default for RainParams {
    fn default() -> Self {
        Self {
            interval_ms: 50,
            max_drops: 200,
            band: 0.6,
            gravity: 0.3,
            max_velocity: 8.0,
            life: 100,
            min_size: 20.0,
            max_size: 40.0,
            color: Rgb(0, 204, 255),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drop {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub size: f32,
    pub life: Lifetime,
}

#[derive(Debug)]
pub struct RainEffect {
    params: RainParams,
    drops: Store<Drop>,
    since_ms: u64,
}

/// Spawn-rate multiplier for a second of the minute, 1 through 6.
pub fn intensity(second: u32) -> u64 {
    (second.min(59) / 10 + 1) as u64
}

impl RainEffect {
    pub fn new(params: RainParams) -> Self {
        let drops = Store::new(params.max_drops);
        Self {
            params,
            drops,
            since_ms: 0,
        }
    }

    pub fn drops(&self) -> &Store<Drop> {
        &self.drops
    }

    fn spawn(&mut self, scene: &Scene, rng: &mut FxRng) {
        let p = &self.params;
        let (cx, cy) = scene.center();
        let drop = Drop {
            ch: pick(rng, CLOCK_CHARS),
            x: cx + signed(rng, scene.width * p.band / 2.0),
            y: cy - 50.0 + spread(rng, 0.0, 100.0),
            vy: 0.0,
            size: spread(rng, p.min_size, p.max_size),
            life: Lifetime::new(p.life),
        };
        self.drops.push(drop);
    }
}

impl Effect for RainEffect {
    fn name(&self) -> &'static str {
        "rain"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    fn seed(&mut self, _scene: &Scene, _rng: &mut FxRng) {
        self.drops.clear();
        self.since_ms = 0;
    }

    fn step(&mut self, scene: &Scene, tick: Tick, rng: &mut FxRng) {
        // The threshold moves with the second, so this does not use BurstTimer.
        self.since_ms = self.since_ms.saturating_add(tick.delta_ms);
        let threshold = (self.params.interval_ms / intensity(tick.second)).max(1);
        while self.since_ms > threshold {
            if self.drops.is_full() {
                self.since_ms = 0;
                break;
            }
            self.since_ms -= threshold;
            self.spawn(scene, rng);
        }

        let (gravity, max_velocity) = (self.params.gravity, self.params.max_velocity);
        self.drops.retain_mut(|d| {
            d.vy = (d.vy + gravity).min(max_velocity);
            d.y += d.vy;
            d.life.advance() && d.y <= scene.height
        });
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        for drop in &self.drops {
            let paint = Paint::sized(self.params.color, drop.life.fade(), drop.size).glow();
            surface.glyph(drop.x, drop.y, drop.ch, paint);
        }
    }

    fn clear(&mut self) {
        self.drops.clear();
    }

    fn len(&self) -> usize {
        self.drops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testing::{rng, run, scene};

    fn tick(delta_ms: u64, second: u32) -> Tick {
        Tick {
            elapsed_ms: 0,
            delta_ms,
            second,
        }
    }

    #[test]
    fn test_intensity_by_second() {
        assert_eq!(intensity(0), 1);
        assert_eq!(intensity(9), 1);
        assert_eq!(intensity(10), 2);
        assert_eq!(intensity(59), 6);
        assert_eq!(intensity(61), 6);
    }

    #[test]
    fn test_spawn_rate_follows_intensity_at_thirty_fps() {
        let scene = scene("");
        let mut rng = rng(1);
        let spawned = |second: u32, rng: &mut FxRng| {
            let mut effect = RainEffect::new(RainParams::default());
            for _ in 0..20 {
                effect.step(&scene, tick(33, second), rng);
            }
            effect.len()
        };
        // 660 ms against thresholds of 50, 25 and 8 ms
        assert_eq!(spawned(5, &mut rng), 13);
        assert_eq!(spawned(15, &mut rng), 26);
        assert_eq!(spawned(55, &mut rng), 82);
    }

    #[test]
    fn test_full_store_drops_backlog() {
        let params = RainParams {
            max_drops: 5,
            ..Default::default()
        };
        let mut effect = RainEffect::new(params);
        let scene = scene("");
        let mut rng = rng(4);
        effect.step(&scene, tick(1000, 59), &mut rng);
        assert_eq!(effect.len(), 5);
        assert_eq!(effect.since_ms, 0);
    }

    #[test]
    fn test_drops_accelerate_to_terminal_velocity() {
        let mut effect = RainEffect::new(RainParams::default());
        let scene = scene("");
        let mut rng = rng(2);
        for _ in 0..4 {
            effect.step(&scene, tick(16, 0), &mut rng);
        }
        let first = effect.drops().get(0).cloned();
        assert!(first.is_some_and(|d| (d.vy - 0.3).abs() < 1e-6));

        for _ in 0..40 {
            effect.step(&scene, tick(16, 0), &mut rng);
        }
        assert!(effect.drops().iter().all(|d| d.vy <= 8.0));
    }

    #[test]
    fn test_drops_leave_at_bottom_and_respect_cap() {
        let mut effect = RainEffect::new(RainParams::default());
        let scene = scene("");
        let mut rng = rng(3);
        run(&mut effect, &scene, &mut rng, 2000, |e| {
            assert!(e.len() <= 200);
            for d in e.drops() {
                assert!(d.y <= scene.height);
                assert!(d.life.age() <= 100);
            }
        });
    }
}
