//! Effect engine: the shared seed / step / paint loop and its lifecycle.

use std::fmt;

use glyphclock_core::DEFAULT_CLOCK_TEXT;
use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::surface::Surface;

/// Random source handed to effects. Seedable so runs can be replayed.
pub type FxRng = StdRng;

/// How the surface is prepared before each frame is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backdrop {
    /// Erase everything.
    Clear,
    /// Darken previous frames by the given overlay opacity, leaving trails.
    Fade(f32),
}

/// Geometry and display text an effect is seeded against.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Surface width in virtual pixels.
    pub width: f32,
    /// Surface height in virtual pixels.
    pub height: f32,
    /// Clock text captured at start and refreshed by `update_text`.
    pub text: String,
}

impl Scene {
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// The larger of width and height.
    pub fn extent(&self) -> f32 {
        self.width.max(self.height)
    }
}

/// Timing of one frame step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tick {
    /// Milliseconds since the app started.
    pub elapsed_ms: u64,
    /// Milliseconds since the previous frame of this run; 0 on the first.
    pub delta_ms: u64,
    /// Wall-clock second of the minute.
    pub second: u32,
}

/// One pluggable visual effect.
///
/// The engine drives an effect through `seed` (start and resize), then
/// `step` followed by `paint` once per frame.
pub trait Effect: fmt::Debug + Send {
    fn name(&self) -> &'static str;

    fn backdrop(&self) -> Backdrop;

    /// Discard existing entities and populate the store for `scene`.
    fn seed(&mut self, scene: &Scene, rng: &mut FxRng);

    /// Advance every entity by one frame.
    fn step(&mut self, scene: &Scene, tick: Tick, rng: &mut FxRng);

    /// Draw live entities in store order.
    fn paint(&self, scene: &Scene, surface: &mut Surface);

    /// Drop every entity.
    fn clear(&mut self);

    /// Number of live entities.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push new display text into existing entities without re-seeding.
    fn set_text(&mut self, _text: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Running {
        frames: u64,
        last_elapsed_ms: Option<u64>,
    },
}

/// Lifecycle controller around a single effect and its surface.
#[derive(Debug)]
pub struct EffectEngine {
    effect: Box<dyn Effect>,
    surface: Surface,
    scene: Scene,
    rng: FxRng,
    state: RunState,
}

impl EffectEngine {
    /// Bind an effect to a `cols` x `rows` surface. The engine starts idle.
    pub fn new(effect: Box<dyn Effect>, cols: u16, rows: u16, seed: u64) -> Self {
        let surface = Surface::new(cols, rows);
        let scene = Scene {
            width: surface.width(),
            height: surface.height(),
            text: DEFAULT_CLOCK_TEXT.to_string(),
        };
        Self {
            effect,
            surface,
            scene,
            rng: FxRng::seed_from_u64(seed),
            state: RunState::Idle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.effect.name()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running { .. })
    }

    /// Frames stepped since the last start.
    pub fn frames(&self) -> u64 {
        match self.state {
            RunState::Running { frames, .. } => frames,
            RunState::Idle => 0,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.effect.len()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }

    /// Seed the store and begin running.
    ///
    /// Returns `false` without touching anything if already running.
    pub fn start(&mut self, seed_text: Option<&str>) -> bool {
        if self.is_running() {
            return false;
        }
        self.scene.text = clock_text_or_default(seed_text);
        self.surface.clear();
        self.effect.seed(&self.scene, &mut self.rng);
        self.state = RunState::Running {
            frames: 0,
            last_elapsed_ms: None,
        };
        debug!(
            effect = self.effect.name(),
            entities = self.effect.len(),
            "effect started"
        );
        true
    }

    /// Halt, discard every entity and clear the surface.
    pub fn stop(&mut self) {
        let was_running = self.is_running();
        self.state = RunState::Idle;
        self.effect.clear();
        self.surface.clear();
        if was_running {
            debug!(effect = self.effect.name(), "effect stopped");
        }
    }

    /// Rebuild the surface for new dimensions, re-seeding if running.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.surface = Surface::new(cols, rows);
        self.scene.width = self.surface.width();
        self.scene.height = self.surface.height();
        if self.is_running() {
            self.effect.seed(&self.scene, &mut self.rng);
        }
        debug!(effect = self.effect.name(), cols, rows, "effect resized");
    }

    /// Push new clock text into the running effect.
    pub fn update_text(&mut self, text: &str) {
        if self.scene.text != text {
            self.scene.text = clock_text_or_default(Some(text));
            self.effect.set_text(&self.scene.text);
        }
    }

    /// Produce one frame: backdrop, step, paint.
    ///
    /// Does nothing and returns `false` while idle.
    pub fn frame(&mut self, elapsed_ms: u64, second: u32) -> bool {
        let RunState::Running {
            frames,
            last_elapsed_ms,
        } = self.state
        else {
            return false;
        };

        let delta_ms = last_elapsed_ms.map_or(0, |last| elapsed_ms.saturating_sub(last));
        let tick = Tick {
            elapsed_ms,
            delta_ms,
            second,
        };

        match self.effect.backdrop() {
            Backdrop::Clear => self.surface.clear(),
            Backdrop::Fade(overlay) => self.surface.fade(overlay),
        }
        self.effect.step(&self.scene, tick, &mut self.rng);
        self.effect.paint(&self.scene, &mut self.surface);

        self.state = RunState::Running {
            frames: frames + 1,
            last_elapsed_ms: Some(elapsed_ms),
        };
        true
    }
}

/// Clock text with blank or missing input replaced by the placeholder.
fn clock_text_or_default(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_CLOCK_TEXT.to_string(),
    }
}
