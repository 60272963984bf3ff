//! The concrete effects and their factory.

pub mod binary;
pub mod bounce;
pub mod fire;
pub mod glitch;
pub mod lightning;
pub mod matrix;
pub mod pulse;
pub mod quantum;
pub mod rain;
pub mod snow;
pub mod space;
pub mod vortex;
pub mod wave;

use glyphclock_core::EffectKind;

use crate::engine::Effect;
use crate::tuning::EffectTuning;

/// Construct the effect for `kind` with its tuning. `None` has no effect.
pub fn build(kind: EffectKind, tuning: &EffectTuning) -> Option<Box<dyn Effect>> {
    let effect: Box<dyn Effect> = match kind {
        EffectKind::None => return None,
        EffectKind::Matrix => Box::new(matrix::MatrixEffect::new(tuning.matrix.clone())),
        EffectKind::Binary => Box::new(binary::BinaryEffect::new(tuning.binary.clone())),
        EffectKind::Bounce => Box::new(bounce::BounceEffect::new(tuning.bounce.clone())),
        EffectKind::Fire => Box::new(fire::FireEffect::new(tuning.fire.clone())),
        EffectKind::Rain => Box::new(rain::RainEffect::new(tuning.rain.clone())),
        EffectKind::Snow => Box::new(snow::SnowEffect::new(tuning.snow.clone())),
        EffectKind::Wave => Box::new(wave::WaveEffect::new(tuning.wave.clone())),
        EffectKind::Vortex => Box::new(vortex::VortexEffect::new(tuning.vortex.clone())),
        EffectKind::Space => Box::new(space::SpaceEffect::new(tuning.space.clone())),
        EffectKind::Pulse => Box::new(pulse::PulseEffect::new(tuning.pulse.clone())),
        EffectKind::Lightning => {
            Box::new(lightning::LightningEffect::new(tuning.lightning.clone()))
        }
        EffectKind::Glitch => Box::new(glitch::GlitchEffect::new(tuning.glitch.clone())),
        EffectKind::Quantum => Box::new(quantum::QuantumEffect::new(tuning.quantum.clone())),
    };
    Some(effect)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_but_none_builds() {
        let tuning = EffectTuning::default();
        for kind in EffectKind::ALL {
            let effect = build(kind, &tuning);
            assert_eq!(effect.is_some(), kind != EffectKind::None);
            if let Some(effect) = effect {
                assert_eq!(effect.name(), kind.name());
            }
        }
    }
}
