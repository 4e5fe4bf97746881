/// A struct that triggers an event periodically at a given interval.
pub struct IntervalTrigger {
    interval: f64,
    next_trigger: f64,
}

impl IntervalTrigger {
    /// Creates a new `IntervalTrigger` with the given interval in seconds.
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            next_trigger: 0.0,
        }
    }

    /// Returns true if the event should be triggered at the given time.
    pub fn trigger(&mut self, time: f64) -> bool {
        if time >= self.next_trigger {
            self.next_trigger += self.interval;
            true
        } else {
            false
        }
    }
}

/// Continue an unbounded angle with a new reading wrapped to (−π, π], taking
/// the shortest way round.
pub fn unwrap_angle(previous: f64, wrapped: f64) -> f64 {
    use std::f64::consts::{PI, TAU};

    let delta = (wrapped - previous).rem_euclid(TAU);
    let delta = if delta > PI { delta - TAU } else { delta };
    previous + delta
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interval_trigger() {
        let mut trigger = IntervalTrigger::new(0.5);
        assert!(trigger.trigger(0.0));
        assert!(!trigger.trigger(0.2));
        assert!(trigger.trigger(0.5));
        assert!(!trigger.trigger(0.9));
    }

    #[test]
    fn test_unwrap_angle_keeps_turns() {
        assert_relative_eq!(unwrap_angle(TAU + 0.1, 0.2), TAU + 0.2, epsilon = 1e-12);
        // Crossing ±π going counter-clockwise
        assert_relative_eq!(unwrap_angle(PI - 0.1, -PI + 0.1), PI + 0.1, epsilon = 1e-12);
        assert_relative_eq!(unwrap_angle(-3.0 * TAU, -0.1), -3.0 * TAU - 0.1, epsilon = 1e-12);
    }
}
