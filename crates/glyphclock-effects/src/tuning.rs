//! Per-effect tuning knobs, loaded from the `[tuning]` config table.

use serde::{Deserialize, Serialize};

use crate::effects::{
    binary::BinaryParams, bounce::BounceParams, fire::FireParams, glitch::GlitchParams,
    lightning::LightningParams, matrix::MatrixParams, pulse::PulseParams, quantum::QuantumParams,
    rain::RainParams, snow::SnowParams, space::SpaceParams, vortex::VortexParams,
    wave::WaveParams,
};

/// Tuning for every effect. Missing tables fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTuning {
    pub matrix: MatrixParams,
    pub binary: BinaryParams,
    pub bounce: BounceParams,
    pub fire: FireParams,
    pub rain: RainParams,
    pub snow: SnowParams,
    pub wave: WaveParams,
    pub vortex: VortexParams,
    pub space: SpaceParams,
    pub pulse: PulseParams,
    pub lightning: LightningParams,
    pub glitch: GlitchParams,
    pub quantum: QuantumParams,
}
