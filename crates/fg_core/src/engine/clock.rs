//! Injected clock.
//!
//! Wall-clock reads are the only nondeterminism in the core (AI decision
//! timing, input-buffer timestamps), so the clock is a constructor-injected
//! trait. Production hosts may use [`WallClock`]; deterministic/replay
//! builds use [`TickClock`], which derives time purely from tick deltas.

use std::time::Instant;

pub trait SimClock: Send {
    /// Monotonic milliseconds since clock start.
    fn now_ms(&self) -> u64;

    /// Called once per tick with the (already clamped) delta. Logical
    /// clocks advance here; wall clocks ignore it.
    fn advance(&mut self, _dt_secs: f32) {}
}

/// Logical clock accumulating tick deltas. Same deltas in, same
/// timestamps out.
#[derive(Debug, Default)]
pub struct TickClock {
    elapsed_secs: f64,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimClock for TickClock {
    fn now_ms(&self) -> u64 {
        (self.elapsed_secs * 1000.0) as u64
    }

    fn advance(&mut self, dt_secs: f32) {
        self.elapsed_secs += dt_secs as f64;
    }
}

/// Real wall clock, anchored at construction.
#[derive(Debug)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimClock for WallClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_clock_accumulates_deltas() {
        let mut clock = TickClock::new();
        assert_eq!(clock.now_ms(), 0);
        for _ in 0..10 {
            clock.advance(0.016);
        }
        assert_eq!(clock.now_ms(), 160);
    }

    #[test]
    fn tick_clock_is_deterministic() {
        let mut a = TickClock::new();
        let mut b = TickClock::new();
        for _ in 0..100 {
            a.advance(1.0 / 60.0);
            b.advance(1.0 / 60.0);
        }
        assert_eq!(a.now_ms(), b.now_ms());
    }
}
