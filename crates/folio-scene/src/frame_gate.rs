//! Counter-based filter that accepts one animation tick in N.
//!
//! Only the rotation update is gated; the host still presents every frame.

/// Increment `counter` and report whether this tick should advance state.
///
/// The counter is bumped on every call, accepted or not. A `skip` of 0 is
/// treated as 1.
pub fn should_advance(counter: &mut u64, skip: u32) -> bool {
    *counter = counter.wrapping_add(1);
    *counter % u64::from(skip.max(1)) == 0
}

/// Owning wrapper around a frame counter and its skip factor.
#[derive(Debug, Clone)]
pub struct FrameGate {
    counter: u64,
    skip: u32,
}

impl FrameGate {
    pub fn new(skip: u32) -> Self {
        Self {
            counter: 0,
            skip: skip.max(1),
        }
    }

    /// Register one tick. Returns true when the caller should update.
    pub fn accept(&mut self) -> bool {
        should_advance(&mut self.counter, self.skip)
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn skip(&self) -> u32 {
        self.skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_one_accepts_every_tick() {
        let mut counter = 0;
        for _ in 0..1000 {
            assert!(should_advance(&mut counter, 1));
        }
        assert_eq!(counter, 1000);
    }

    #[test]
    fn test_skip_n_accepts_evenly_spaced() {
        for skip in 2..=7u32 {
            let mut counter = 0;
            let accepted: Vec<usize> = (0..1000)
                .filter(|_| should_advance(&mut counter, skip))
                .collect();

            let expected = 1000 / skip as usize;
            assert!(
                accepted.len().abs_diff(expected) <= 1,
                "skip {skip}: {} accepted, expected ~{expected}",
                accepted.len()
            );
            for pair in accepted.windows(2) {
                assert_eq!(pair[1] - pair[0], skip as usize, "uneven spacing");
            }
        }
    }

    #[test]
    fn test_counter_increments_on_reject() {
        let mut counter = 0;
        assert!(!should_advance(&mut counter, 2));
        assert_eq!(counter, 1);
        assert!(should_advance(&mut counter, 2));
        assert_eq!(counter, 2);
    }

    #[test]
    fn test_zero_skip_clamped() {
        let mut gate = FrameGate::new(0);
        assert_eq!(gate.skip(), 1);
        assert!(gate.accept());
        assert!(gate.accept());
        assert_eq!(gate.counter(), 2);

        let mut counter = 0;
        assert!(should_advance(&mut counter, 0));
    }

    #[test]
    fn test_gate_half_rate() {
        let mut gate = FrameGate::new(2);
        let pattern: Vec<bool> = (0..6).map(|_| gate.accept()).collect();
        assert_eq!(pattern, vec![false, true, false, true, false, true]);
    }
}
