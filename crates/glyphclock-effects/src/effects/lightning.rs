//! Lightning: short-lived jagged bolts arc between static glyphs.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::chars::ALPHANUMERIC;
use crate::engine::{Backdrop, Effect, FxRng, Scene, Tick};
use crate::physics::{BurstTimer, Lifetime, pick, signed, spread};
use crate::store::Store;
use crate::surface::{Paint, Rgb, Surface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightningParams {
    pub nodes: usize,
    pub min_interval_ms: u64,
    pub interval_jitter_ms: u64,
    pub max_bolts: usize,
    /// Number of straight segments in a bolt.
    pub segments: usize,
    /// Maximum offset of each bolt vertex from the straight path.
    pub jitter: f32,
    pub bolt_life: u32,
    pub color: Rgb,
}

impl Default for LightningParams {
    fn default() -> Self {
        Self {
            nodes: 40,
            min_interval_ms: 300,
            interval_jitter_ms: 500,
            max_bolts: 8,
            segments: 8,
            jitter: 15.0,
            bolt_life: 10,
            color: Rgb(255, 255, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bolt {
    pub points: Vec<(f32, f32)>,
    pub life: Lifetime,
}

#[derive(Debug)]
pub struct LightningEffect {
    params: LightningParams,
    nodes: Vec<Node>,
    bolts: Store<Bolt>,
    timer: BurstTimer,
}

/// Two distinct indices below `n`, or `None` when `n < 2`.
fn distinct_pair(rng: &mut FxRng, n: usize) -> Option<(usize, usize)> {
    if n < 2 {
        return None;
    }
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n - 1);
    Some((a, if b >= a { b + 1 } else { b }))
}

impl LightningEffect {
    pub fn new(params: LightningParams) -> Self {
        let bolts = Store::new(params.max_bolts);
        let timer = BurstTimer::new(params.min_interval_ms, params.interval_jitter_ms);
        Self {
            params,
            nodes: Vec::new(),
            bolts,
            timer,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn bolts(&self) -> &Store<Bolt> {
        &self.bolts
    }

    /// Jagged path from `from` to `to`; the end points are jittered too.
    fn bolt_path(&self, from: &Node, to: &Node, rng: &mut FxRng) -> Vec<(f32, f32)> {
        let n = self.params.segments.max(1);
        (0..=n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let x = from.x + (to.x - from.x) * t + signed(rng, self.params.jitter);
                let y = from.y + (to.y - from.y) * t + signed(rng, self.params.jitter);
                (x, y)
            })
            .collect()
    }

    fn strike(&mut self, rng: &mut FxRng) {
        let Some((a, b)) = distinct_pair(rng, self.nodes.len()) else {
            return;
        };
        let points = self.bolt_path(&self.nodes[a], &self.nodes[b], rng);
        trace!(from = a, to = b, "lightning strike");
        self.bolts.push_evicting(Bolt {
            points,
            life: Lifetime::new(self.params.bolt_life),
        });
    }
}

impl Effect for LightningEffect {
    fn name(&self) -> &'static str {
        "lightning"
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Clear
    }

    fn seed(&mut self, scene: &Scene, rng: &mut FxRng) {
        self.bolts.clear();
        self.timer.rearm(rng);
        self.nodes = (0..self.params.nodes)
            .map(|_| Node {
                ch: pick(rng, ALPHANUMERIC),
                x: spread(rng, 0.0, scene.width),
                y: spread(rng, 0.0, scene.height),
                size: spread(rng, 12.0, 30.0),
                opacity: spread(rng, 0.3, 0.7),
            })
            .collect();
    }

    fn step(&mut self, _scene: &Scene, tick: Tick, rng: &mut FxRng) {
        for _ in 0..self.timer.fire(tick.delta_ms, rng) {
            self.strike(rng);
        }
        self.bolts.retain_mut(|bolt| bolt.life.advance());
    }

    fn paint(&self, _scene: &Scene, surface: &mut Surface) {
        let color = self.params.color;
        for bolt in &self.bolts {
            surface.polyline(&bolt.points, Paint::new(color, bolt.life.fade()).glow());
        }
        for node in &self.nodes {
            surface.glyph(node.x, node.y, node.ch, Paint::sized(color, node.opacity, node.size));
        }
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.bolts.clear();
    }

    fn len(&self) -> usize {
        self.nodes.len() + self.bolts.len()
    }
}
