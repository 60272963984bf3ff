//! Pulse: a ring of glyphs expands from the center every second.
//!
//! Drifting motes swell while a ring passes over them.

use serde::{Deserialize, Serialize};

use crate::chars::ALPHANUMERIC;
use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{pick, signed, spread, wrap};
use crate::store::Store;
use crate::surface::{Paint, Rgb, Surface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseParams {
    pub max_rings: usize,
    /// Ring growth in pixels per frame.
    pub ring_speed: f32,
    /// Rings dimmer than this are dropped.
    pub min_ring_opacity: f32,
    pub motes: usize,
    /// Distance from a ring within which motes swell.
    pub influence: f32,
    pub ring_color: Rgb,
    pub mote_color: Rgb,
}

impl Default for PulseParams {
    fn default() -> Self {
        Self {
            max_rings: 5,
            ring_speed: 5.0,
            min_ring_opacity: 0.1,
            motes: 30,
            influence: 30.0,
            ring_color: Rgb(170, 0, 255),
            mote_color: Rgb(255, 0, 255),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub radius: f32,
    pub opacity: f32,
    /// Glyphs around the circumference, regenerated when their count changes.
    pub symbols: Vec<char>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mote {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub base_size: f32,
    pub size: f32,
    pub brightness: f32,
}

#[derive(Debug)]
pub struct PulseEffect {
    params: PulseParams,
    rings: Store<Ring>,
    motes: Vec<Mote>,
    last_second: Option<u32>,
}

/// Number of glyphs drawn around a ring of `radius`.
pub fn symbol_count(radius: f32) -> usize {
    ((radius / 20.0) as usize).clamp(20, 60)
}

impl PulseEffect {
    pub fn new(params: PulseParams) -> Self {
        let rings = Store::new(params.max_rings);
        Self {
            params,
            rings,
            motes: Vec::new(),
            last_second: None,
        }
    }

    pub fn rings(&self) -> &Store<Ring> {
        &self.rings
    }

    pub fn motes(&self) -> &[Mote] {
        &self.motes
    }

    fn grow_rings(&mut self, scene: &Scene, rng: &mut FxRng) {
        let max_radius = scene.extent();
        let (speed, floor) = (self.params.ring_speed, self.params.min_ring_opacity);
        self.rings.retain_mut(|ring| {
            ring.radius += speed;
            ring.opacity = 1.0 - ring.radius / max_radius;
            if ring.radius > max_radius || ring.opacity < floor {
                return false;
            }
            let n = symbol_count(ring.radius);
            if ring.symbols.len() != n {
                ring.symbols = (0..n).map(|_| pick(rng, ALPHANUMERIC)).collect();
            }
            true
        });
    }

    fn swell(&self, mote: &Mote, scene: &Scene) -> f32 {
        let (cx, cy) = scene.center();
        let distance = (mote.x - cx).hypot(mote.y - cy);
        let reach = self.params.influence.max(1.0);
        self.rings
            .iter()
            .map(|ring| {
                let gap = (distance - ring.radius).abs();
                if gap < reach {
                    (1.0 - gap / reach) * ring.opacity
                } else {
                    0.0
                }
            })
            .fold(0.0, f32::max)
    }
}

impl Effect for PulseEffect {
    fn name(&self) -> &'static str {
        "pulse"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    fn seed(&mut self, scene: &Scene, rng: &mut FxRng) {
        self.rings.clear();
        self.last_second = None;
        self.motes = (0..self.params.motes)
            .map(|_| {
                let base_size = spread(rng, 2.0, 5.0);
                Mote {
                    ch: pick(rng, ALPHANUMERIC),
                    x: spread(rng, 0.0, scene.width),
                    y: spread(rng, 0.0, scene.height),
                    vx: signed(rng, 0.25),
                    vy: signed(rng, 0.25),
                    base_size,
                    size: base_size,
                    brightness: spread(rng, 0.5, 1.0),
                }
            })
            .collect();
    }

    fn step(&mut self, scene: &Scene, tick: Tick, rng: &mut FxRng) {
        // The first frame only records the second; rings start on the next change.
        if self.last_second.is_some_and(|s| s != tick.second) {
            self.rings.push_evicting(Ring {
                radius: 0.0,
                opacity: 1.0,
                symbols: Vec::new(),
            });
        }
        self.last_second = Some(tick.second);

        self.grow_rings(scene, rng);

        let mut motes = std::mem::take(&mut self.motes);
        for mote in &mut motes {
            mote.x += mote.vx;
            mote.y += mote.vy;
            wrap(&mut mote.x, 0.0, scene.width);
            wrap(&mut mote.y, 0.0, scene.height);
            mote.size = mote.base_size * (1.0 + self.swell(mote, scene) * 2.0);
        }
        self.motes = motes;
    }

    fn paint(&self, scene: &Scene, surface: &mut Surface) {
        let (cx, cy) = scene.center();
        for ring in &self.rings {
            let paint = Paint::new(self.params.ring_color, ring.opacity);
            let step = std::f32::consts::TAU / ring.symbols.len().max(1) as f32;
            for (i, ch) in ring.symbols.iter().enumerate() {
                let a = i as f32 * step;
                surface.glyph(cx + a.cos() * ring.radius, cy + a.sin() * ring.radius, *ch, paint);
            }
        }
        for mote in &self.motes {
            let paint = Paint::sized(self.params.mote_color, mote.brightness, mote.size * 3.0);
            surface.glyph(mote.x, mote.y, mote.ch, paint);
        }
    }

    fn clear(&mut self) {
        self.rings.clear();
        self.motes.clear();
        self.last_second = None;
    }

    fn len(&self) -> usize {
        self.rings.len() + self.motes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testing::{rng, run, scene};

    fn at_second(second: u32) -> Tick {
        Tick {
            elapsed_ms: 0,
            delta_ms: 16,
            second,
        }
    }

    #[test]
    fn test_symbol_count_clamped() {
        assert_eq!(symbol_count(0.0), 20);
        assert_eq!(symbol_count(500.0), 25);
        assert_eq!(symbol_count(5000.0), 60);
    }

    #[test]
    fn test_ring_per_second_change() {
        let mut effect = PulseEffect::new(PulseParams::default());
        let scene = scene("");
        let mut rng = rng(1);
        effect.seed(&scene, &mut rng);
        assert_eq!(effect.motes().len(), 30);

        effect.step(&scene, at_second(10), &mut rng);
        assert!(effect.rings().is_empty());
        effect.step(&scene, at_second(10), &mut rng);
        assert!(effect.rings().is_empty());
        effect.step(&scene, at_second(11), &mut rng);
        assert_eq!(effect.rings().len(), 1);
        let ring = effect.rings().get(0).cloned();
        assert!(ring.is_some_and(|r| r.radius == 5.0 && r.symbols.len() == 20));
    }

    #[test]
    fn test_ring_count_capped_oldest_evicted() {
        let params = PulseParams {
            ring_speed: 0.5,
            ..Default::default()
        };
        let mut effect = PulseEffect::new(params);
        let scene = scene("");
        let mut rng = rng(2);
        effect.seed(&scene, &mut rng);
        for s in 0..10 {
            effect.step(&scene, at_second(s), &mut rng);
            assert!(effect.rings().len() <= 5);
        }
        assert_eq!(effect.rings().len(), 5);
        // the newest ring was added last and has grown once
        let newest = effect.rings().get(4).map(|r| r.radius);
        assert_eq!(newest, Some(0.5));
    }

    #[test]
    fn test_rings_fade_out() {
        let mut effect = PulseEffect::new(PulseParams::default());
        let scene = scene("");
        let mut rng = rng(3);
        effect.seed(&scene, &mut rng);
        effect.step(&scene, at_second(0), &mut rng);
        effect.step(&scene, at_second(1), &mut rng);
        for _ in 0..200 {
            effect.step(&scene, at_second(1), &mut rng);
            for ring in effect.rings() {
                assert!(ring.opacity >= 0.1);
            }
        }
        assert!(effect.rings().is_empty());
    }

    #[test]
    fn test_motes_swell_near_a_ring() {
        let mut effect = PulseEffect::new(PulseParams::default());
        let scene = scene("");
        let mut rng = rng(4);
        effect.seed(&scene, &mut rng);
        let (cx, cy) = scene.center();
        effect.rings.push(Ring {
            radius: 100.0,
            opacity: 1.0,
            symbols: Vec::new(),
        });
        let on_ring = Mote {
            ch: 'a',
            x: cx + 100.0,
            y: cy,
            vx: 0.0,
            vy: 0.0,
            base_size: 2.0,
            size: 2.0,
            brightness: 1.0,
        };
        assert!((effect.swell(&on_ring, &scene) - 1.0).abs() < 1e-6);
        let far = Mote { x: cx + 200.0, ..on_ring };
        assert_eq!(effect.swell(&far, &scene), 0.0);
    }

    #[test]
    fn test_motes_stay_on_screen() {
        let mut effect = PulseEffect::new(PulseParams::default());
        let scene = scene("");
        let mut rng = rng(5);
        effect.seed(&scene, &mut rng);
        run(&mut effect, &scene, &mut rng, 3000, |e| {
            for m in e.motes() {
                assert!(m.x >= 0.0 && m.x <= scene.width);
                assert!(m.y >= 0.0 && m.y <= scene.height);
                assert!(m.size >= m.base_size && m.size <= m.base_size * 3.0 + 1e-4);
            }
        });
    }
}
