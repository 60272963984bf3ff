//! Shared kinematics, lifetimes and burst timers.

use rand::Rng;

/// Clamp `pos` into `[lo, hi]`, sending the velocity back inwards.
///
/// When the position lies outside the range the velocity component is set to
/// point away from the crossed edge and scaled by `elasticity`. Returns
/// whether a bounce happened.
pub fn reflect(pos: &mut f32, vel: &mut f32, lo: f32, hi: f32, elasticity: f32) -> bool {
    if *pos < lo {
        *pos = lo;
        *vel = vel.abs() * elasticity;
        true
    } else if *pos > hi {
        *pos = hi;
        *vel = -vel.abs() * elasticity;
        true
    } else {
        false
    }
}

/// Re-enter `pos` from the opposite edge of `[lo, hi]`.
///
/// The distance travelled past the edge is preserved modulo the span.
/// Returns whether the position wrapped.
pub fn wrap(pos: &mut f32, lo: f32, hi: f32) -> bool {
    let span = hi - lo;
    if span <= 0.0 || !pos.is_finite() {
        *pos = lo;
        return false;
    }
    if *pos < lo || *pos > hi {
        *pos = lo + (*pos - lo).rem_euclid(span);
        true
    } else {
        false
    }
}

/// Frame-counted age of a transient entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetime {
    age: u32,
    max_age: u32,
}

impl Lifetime {
    pub fn new(max_age: u32) -> Self {
        Self { age: 0, max_age }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    /// Fraction of life used, 0.0 at birth and 1.0 at `max_age`.
    pub fn ratio(&self) -> f32 {
        if self.max_age == 0 {
            1.0
        } else {
            self.age as f32 / self.max_age as f32
        }
    }

    /// Remaining opacity, `1 - ratio`.
    pub fn fade(&self) -> f32 {
        1.0 - self.ratio()
    }

    /// Age by one frame. Returns `false` once the lifetime is spent; the
    /// age itself never exceeds `max_age`.
    pub fn advance(&mut self) -> bool {
        if self.age >= self.max_age {
            return false;
        }
        self.age += 1;
        true
    }
}

/// Upper bound on bursts a timer reports for one step, e.g. after a stall.
pub const MAX_BURSTS_PER_STEP: u32 = 64;

/// Accumulating timer that fires after a randomized threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstTimer {
    since_ms: u64,
    threshold_ms: u64,
    min_ms: u64,
    jitter_ms: u64,
}

impl BurstTimer {
    /// Timer firing every `min_ms` to `min_ms + jitter_ms` milliseconds.
    pub fn new(min_ms: u64, jitter_ms: u64) -> Self {
        Self {
            since_ms: 0,
            threshold_ms: min_ms,
            min_ms,
            jitter_ms,
        }
    }

    /// Timer whose first burst lands at a random point of its period.
    pub fn staggered<R: Rng + ?Sized>(min_ms: u64, jitter_ms: u64, rng: &mut R) -> Self {
        let mut timer = Self::new(min_ms, jitter_ms);
        timer.rearm(rng);
        timer.since_ms = rng.random_range(0..=timer.threshold_ms);
        timer
    }

    /// Milliseconds accumulated since the last burst.
    pub fn elapsed_ms(&self) -> u64 {
        self.since_ms
    }

    pub fn threshold_ms(&self) -> u64 {
        self.threshold_ms
    }

    pub fn advance(&mut self, delta_ms: u64) {
        self.since_ms = self.since_ms.saturating_add(delta_ms);
    }

    /// Whether the accumulated time exceeds the threshold.
    pub fn ready(&self) -> bool {
        self.since_ms > self.threshold_ms
    }

    /// Start a new period with a freshly rolled threshold.
    pub fn rearm<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.since_ms = 0;
        self.roll(rng);
    }

    fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.threshold_ms = self.min_ms + rng.random_range(0..=self.jitter_ms);
    }

    /// Advance and return how many bursts are due.
    ///
    /// Time left over after a burst counts towards the next one, so the rate
    /// does not depend on the frame interval. At most
    /// [`MAX_BURSTS_PER_STEP`] are reported; anything beyond is dropped.
    pub fn fire<R: Rng + ?Sized>(&mut self, delta_ms: u64, rng: &mut R) -> u32 {
        self.advance(delta_ms);
        let mut bursts = 0;
        while self.ready() {
            if bursts == MAX_BURSTS_PER_STEP {
                self.since_ms = 0;
                break;
            }
            self.since_ms -= self.threshold_ms.max(1);
            self.roll(rng);
            bursts += 1;
        }
        bursts
    }
}

/// Uniform value in `[lo, hi)`; returns `lo` for an empty range.
pub fn spread<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo).max(0.0)
}

/// Uniform value in `[-half, half)`.
pub fn signed<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * half
}

/// Random angle in radians.
pub fn angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() * std::f32::consts::TAU
}

/// Random element of a glyph set; `' '` for an empty set.
pub fn pick<R: Rng + ?Sized>(rng: &mut R, set: &[char]) -> char {
    if set.is_empty() {
        return ' ';
    }
    set[rng.random_range(0..set.len())]
}

/// Random count in `[min, min + extra]`.
pub fn count<R: Rng + ?Sized>(rng: &mut R, min: usize, extra: usize) -> usize {
    min + rng.random_range(0..=extra)
}
