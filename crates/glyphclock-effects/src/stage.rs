//! Effect stage: owns the active engine behind the clock.

use glyphclock_core::EffectKind;
use ratatui::{Frame, widgets::Paragraph};
use tracing::info;

use crate::effects;
use crate::engine::EffectEngine;
use crate::surface::Surface;
use crate::tuning::EffectTuning;

/// Background effect state.
#[derive(Debug)]
pub struct EffectStage {
    /// Selected effect.
    kind: EffectKind,
    /// Tuning used whenever an engine is built.
    tuning: EffectTuning,
    /// Engine for `kind`, built on the first frame after a switch.
    engine: Option<EffectEngine>,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
    /// Base seed; each engine gets it plus the launch count.
    init_seed: u64,
    /// Engines built so far, mixed into each engine's seed.
    launches: u64,
}

impl EffectStage {
    /// Create a stage showing `kind` with a random seed.
    pub fn new(kind: EffectKind, tuning: EffectTuning) -> Self {
        Self::with_seed(kind, tuning, rand::random())
    }

    /// Create a stage with a fixed seed, for reproducible runs.
    pub fn with_seed(kind: EffectKind, tuning: EffectTuning, init_seed: u64) -> Self {
        Self {
            kind,
            tuning,
            engine: None,
            last_width: 0,
            last_height: 0,
            init_seed,
            launches: 0,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn engine(&self) -> Option<&EffectEngine> {
        self.engine.as_ref()
    }

    /// Stop the current effect and show `kind` from the next frame on.
    pub fn switch(&mut self, kind: EffectKind) {
        if kind == self.kind {
            return;
        }
        self.stop();
        info!(from = self.kind.name(), to = kind.name(), "switching effect");
        self.kind = kind;
    }

    /// Stop and drop the running engine, if any.
    pub fn stop(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.stop();
        }
    }

    /// Step the effect for a `width` x `height` area and return its surface.
    ///
    /// Builds and starts the engine on demand and re-seeds it when the area
    /// changes size. Returns `None` for [`EffectKind::None`].
    pub fn advance(
        &mut self,
        width: u16,
        height: u16,
        elapsed_ms: u64,
        second: u32,
        clock_text: &str,
    ) -> Option<&Surface> {
        let dimensions_changed = width != self.last_width || height != self.last_height;
        if dimensions_changed {
            self.last_width = width;
            self.last_height = height;
        }

        if self.engine.is_none() {
            let effect = effects::build(self.kind, &self.tuning)?;
            let seed = self.init_seed.wrapping_add(self.launches);
            self.launches += 1;
            info!(effect = effect.name(), width, height, "starting effect");
            self.engine = Some(EffectEngine::new(effect, width, height, seed));
        } else if dimensions_changed {
            if let Some(engine) = self.engine.as_mut() {
                engine.resize(width, height);
            }
        }

        let engine = self.engine.as_mut()?;
        if !engine.is_running() {
            engine.start(Some(clock_text));
        } else if self.kind.uses_clock_text() {
            engine.update_text(clock_text);
        }
        engine.frame(elapsed_ms, second);
        Some(engine.surface())
    }

    /// Render the effect behind everything else in the frame.
    pub fn render(&mut self, frame: &mut Frame, elapsed_ms: u64, second: u32, clock_text: &str) {
        let area = frame.area();
        if let Some(surface) = self.advance(area.width, area.height, elapsed_ms, second, clock_text)
        {
            frame.render_widget(Paragraph::new(surface.lines()), area);
        }
    }
}
