//! Particle background effects for the glyphclock terminal clock.
//!
//! Every effect plugs into one [`EffectEngine`] through the [`Effect`]
//! trait: it seeds a store of entities, steps them once per frame and paints
//! them onto a [`Surface`] measured in virtual pixels. [`EffectStage`] owns
//! the active engine and draws it behind the clock.

mod chars;
pub mod effects;
mod engine;
pub mod physics;
mod stage;
mod store;
mod surface;
mod tuning;

pub use effects::build;
pub use engine::{Backdrop, Effect, EffectEngine, FxRng, Scene, Tick};
pub use stage::EffectStage;
pub use store::Store;
pub use surface::{BOLD_GLYPH_PX, CELL_HEIGHT, CELL_WIDTH, Cell, Paint, Rgb, Surface};
pub use tuning::EffectTuning;
