//! Quantum: each clock character sits in superposition.
//!
//! Every character has one primary position in a row across the center and a
//! few faint ghosts that jump around on a fixed cadence. Now and then a flash
//! of entanglement links the primaries of two characters.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{BurstTimer, Lifetime, count, signed, spread, wrap};
use crate::store::Store;
use crate::surface::{Paint, Rgb, Surface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantumParams {
    /// Horizontal distance between primary positions.
    pub spacing: f32,
    /// Ghost jumps happen at this cadence.
    pub jump_interval_ms: u64,
    /// Maximum ghost jump per axis.
    pub jump: f32,
    pub min_ghosts: usize,
    pub extra_ghosts: usize,
    /// Chance of a flash on each jump.
    pub flash_chance: f64,
    pub flash_life: u32,
    pub max_flashes: usize,
    pub color: Rgb,
    pub flash_color: Rgb,
}

impl Default for QuantumParams {
    fn default() -> Self {
        Self {
            spacing: 48.0,
            jump_interval_ms: 75,
            jump: 25.0,
            min_ghosts: 2,
            extra_ghosts: 2,
            flash_chance: 0.1,
            flash_life: 20,
            max_flashes: 16,
            color: Rgb(0, 255, 255),
            flash_color: Rgb::WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState {
    pub ch: char,
    pub primary: Position,
    pub ghosts: Vec<Position>,
    /// Flicker applied to the primary.
    pub brightness: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub life: Lifetime,
}

#[derive(Debug)]
pub struct QuantumEffect {
    params: QuantumParams,
    states: Vec<QuantumState>,
    flashes: Store<Flash>,
    timer: BurstTimer,
}

impl QuantumEffect {
    pub fn new(params: QuantumParams) -> Self {
        let flashes = Store::new(params.max_flashes);
        let timer = BurstTimer::new(params.jump_interval_ms, 0);
        Self {
            params,
            states: Vec::new(),
            flashes,
            timer,
        }
    }

    pub fn states(&self) -> &[QuantumState] {
        &self.states
    }

    pub fn flashes(&self) -> &Store<Flash> {
        &self.flashes
    }

    /// Move every ghost, re-roll brightness and maybe flash.
    fn jump(&mut self, scene: &Scene, rng: &mut FxRng) {
        let reach = self.params.jump;
        for state in &mut self.states {
            for ghost in &mut state.ghosts {
                ghost.x += signed(rng, reach);
                ghost.y += signed(rng, reach);
                wrap(&mut ghost.x, 0.0, scene.width);
                wrap(&mut ghost.y, 0.0, scene.height);
            }
            state.brightness = spread(rng, 0.8, 1.2);
        }

        let n = self.states.len();
        if n >= 2 && rng.random_bool(self.params.flash_chance.clamp(0.0, 1.0)) {
            let a = rng.random_range(0..n);
            let b = rng.random_range(0..n);
            // the same character twice means no flash this time
            if a != b {
                trace!(from = a, to = b, "entanglement flash");
                let (pa, pb) = (self.states[a].primary, self.states[b].primary);
                self.flashes.push_evicting(Flash {
                    from: (pa.x, pa.y),
                    to: (pb.x, pb.y),
                    life: Lifetime::new(self.params.flash_life),
                });
            }
        }
    }
}

impl Effect for QuantumEffect {
    fn name(&self) -> &'static str {
        "quantum"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    fn seed(&mut self, scene: &Scene, rng: &mut FxRng) {
        let p = &self.params;
        let (cx, cy) = scene.center();
        let len = scene.text.chars().count() as f32;
        let start_x = cx - len * p.spacing / 2.0;

        self.flashes.clear();
        self.timer = BurstTimer::new(p.jump_interval_ms, 0);
        self.states = scene
            .text
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let ghosts = (0..count(rng, p.min_ghosts, p.extra_ghosts))
                    .map(|_| Position {
                        x: spread(rng, 0.0, scene.width),
                        y: spread(rng, 0.0, scene.height),
                        opacity: spread(rng, 0.2, 0.5),
                    })
                    .collect();
                QuantumState {
                    ch,
                    primary: Position {
                        x: start_x + i as f32 * p.spacing,
                        y: cy,
                        opacity: 1.0,
                    },
                    ghosts,
                    brightness: 1.0,
                }
            })
            .collect();
    }

    fn step(&mut self, scene: &Scene, tick: Tick, rng: &mut FxRng) {
        for _ in 0..self.timer.fire(tick.delta_ms, rng) {
            self.jump(scene, rng);
        }
        self.flashes.retain_mut(|flash| flash.life.advance());
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        let color = self.params.color;
        for state in &self.states {
            for ghost in &state.ghosts {
                surface.glyph(ghost.x, ghost.y, state.ch, Paint::new(color, ghost.opacity));
            }
            let primary = state.primary;
            let alpha = primary.opacity * state.brightness;
            surface.glyph(primary.x, primary.y, state.ch, Paint::new(color, alpha).glow());
        }
        for flash in &self.flashes {
            let paint = Paint::new(self.params.flash_color, flash.life.fade()).glow();
            surface.line(flash.from.0, flash.from.1, flash.to.0, flash.to.1, paint);
        }
    }

    fn clear(&mut self) {
        self.states.clear();
        self.flashes.clear();
    }

    fn len(&self) -> usize {
        self.states.iter().map(|s| 1 + s.ghosts.len()).sum::<usize>() + self.flashes.len()
    }

    fn set_text(&mut self, text: &str) {
        for (state, ch) in self.states.iter_mut().zip(text.chars()) {
            state.ch = ch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testing::{rng, run, scene};

    #[test]
    fn test_primaries_line_up_across_center() {
        let mut effect = QuantumEffect::new(QuantumParams::default());
        let scene = scene("12:34");
        effect.seed(&scene, &mut rng(1));
        let xs: Vec<f32> = effect.states().iter().map(|s| s.primary.x).collect();
        // 320 - 5 * 48 / 2 = 200
        assert_eq!(xs, vec![200.0, 248.0, 296.0, 344.0, 392.0]);
        for state in effect.states() {
            assert_eq!(state.primary.y, 192.0);
            assert!((2..=4).contains(&state.ghosts.len()));
            assert!(state.ghosts.iter().all(|g| (0.2..0.5).contains(&g.opacity)));
        }
    }

    #[test]
    fn test_ghosts_jump_on_cadence_only() {
        let mut effect = QuantumEffect::new(QuantumParams::default());
        let scene = scene("00:00");
        let mut rng = rng(2);
        effect.seed(&scene, &mut rng);
        let before = effect.states().to_vec();

        // 0, 16, 32, 48 and 64 ms: still below 75 ms
        run(&mut effect, &scene, &mut rng, 5, |_| {});
        assert_eq!(effect.states(), before.as_slice());

        run(&mut effect, &scene, &mut rng, 2, |_| {});
        assert_ne!(effect.states(), before.as_slice());
        for (after, was) in effect.states().iter().zip(&before) {
            assert_eq!(after.primary, was.primary);
            assert!((0.8..1.2).contains(&after.brightness));
        }
    }

    #[test]
    fn test_ghosts_stay_on_screen_and_flashes_capped() {
        let params = QuantumParams {
            flash_chance: 1.0,
            ..Default::default()
        };
        let mut effect = QuantumEffect::new(params);
        let scene = scene("00:00:00:000");
        let mut rng = rng(3);
        effect.seed(&scene, &mut rng);
        let mut peak = 0;
        run(&mut effect, &scene, &mut rng, 1000, |e| {
            peak = peak.max(e.flashes().len());
            assert!(e.flashes().len() <= 16);
            for state in e.states() {
                for g in &state.ghosts {
                    assert!(g.x >= 0.0 && g.x <= scene.width);
                    assert!(g.y >= 0.0 && g.y <= scene.height);
                }
            }
        });
        assert!(peak > 0);
    }

    #[test]
    fn test_update_text_keeps_positions() {
        let mut effect = QuantumEffect::new(QuantumParams::default());
        let mut rng = rng(4);
        effect.seed(&scene("10:00"), &mut rng);
        let before = effect.states().to_vec();
        effect.set_text("10:01");
        let chars: String = effect.states().iter().map(|s| s.ch).collect();
        assert_eq!(chars, "10:01");
        for (after, was) in effect.states().iter().zip(&before) {
            assert_eq!(after.primary, was.primary);
            assert_eq!(after.ghosts, was.ghosts);
        }
    }

    #[test]
    fn test_single_char_never_flashes() {
        let params = QuantumParams {
            flash_chance: 1.0,
            ..Default::default()
        };
        let mut effect = QuantumEffect::new(params);
        let scene = scene("7");
        let mut rng = rng(5);
        effect.seed(&scene, &mut rng);
        run(&mut effect, &scene, &mut rng, 200, |e| assert!(e.flashes().is_empty()));
    }
}
