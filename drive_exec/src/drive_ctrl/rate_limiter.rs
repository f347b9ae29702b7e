//! Demand rate limiting ("ramping")

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::time::Instant;

// Internal
use super::DriveCtrlError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The formula used to combine the requested step with the elapsed-time step
/// ceiling.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RampMode {
    /// The historical controller's formula: the applied step is the *larger*
    /// of the requested magnitude and the ceiling.
    ///
    /// This does not limit the rate in the conventional sense. A request
    /// larger than the ceiling passes through unchanged, while a request
    /// smaller than the ceiling is inflated to it, snapping the output past
    /// the desired value. Kept as the default so the module reproduces the
    /// historical behaviour exactly.
    Legacy,

    /// Conventional slew-rate limiting: the applied step is the *smaller* of
    /// the requested magnitude and the ceiling.
    Conventional
}

impl Default for RampMode {
    fn default() -> Self {
        RampMode::Legacy
    }
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A rate limiter for a single demand channel.
///
/// Each call to [`RateLimiter::apply`] moves the output from its previous
/// value towards the desired value by a step derived from the wall-clock time
/// elapsed since the last call. One limiter is owned by the controller per
/// channel and lives for the controller's lifetime, carrying the ramp state
/// across cycles.
pub struct RateLimiter {
    /// Step ceiling per second of elapsed time.
    ///
    /// Units: percent output/second
    max_rate_per_s: f64,

    /// The formula used to apply the ceiling.
    ramp_mode: RampMode,

    /// The output returned by the last `apply` call.
    last_output: f64,

    /// The time at which the output was last updated.
    last_update: Instant
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RateLimiter {

    /// Create a new rate limiter with zero initial output.
    ///
    /// A non-positive `max_rate_per_s` is a contract violation and fails
    /// construction rather than silently disabling the ramp.
    pub fn new(
        max_rate_per_s: f64,
        ramp_mode: RampMode
    ) -> Result<Self, DriveCtrlError> {
        if max_rate_per_s <= 0.0 {
            return Err(DriveCtrlError::NonPositiveRampRate(max_rate_per_s));
        }

        Ok(Self {
            max_rate_per_s,
            ramp_mode,
            last_output: 0.0,
            last_update: Instant::now()
        })
    }

    /// Move the output towards `desired` and return the new output.
    ///
    /// The elapsed time is measured with the monotonic clock since the last
    /// `apply` call (or since construction for the first call, which makes
    /// the first step ceiling effectively zero).
    pub fn apply(&mut self, desired: f64) -> f64 {
        let now = Instant::now();
        let elapsed_s = now.duration_since(self.last_update).as_secs_f64();
        self.last_update = now;

        self.step(desired, elapsed_s)
    }

    /// Advance the limiter towards `desired` by `elapsed_s` seconds worth of
    /// step ceiling.
    fn step(&mut self, desired: f64, elapsed_s: f64) -> f64 {
        // A non-monotonic clock would give a negative elapsed time, treat it
        // as zero
        let elapsed_s = elapsed_s.max(0.0);

        // Degenerate direction, the output is already at the demand
        if desired == self.last_output {
            return self.last_output;
        }

        let requested = (desired - self.last_output).abs();
        let max_allowed = self.max_rate_per_s * elapsed_s;

        let applied = match self.ramp_mode {
            RampMode::Legacy => requested.max(max_allowed),
            RampMode::Conventional => requested.min(max_allowed)
        };

        let direction = (desired - self.last_output).signum();
        self.last_output += direction * applied;

        self.last_output
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_non_positive_rate_rejected() {
        assert!(RateLimiter::new(0.0, RampMode::Legacy).is_err());
        assert!(RateLimiter::new(-0.5, RampMode::Conventional).is_err());
    }

    #[test]
    fn test_legacy_large_request_passes_through() {
        let mut ramp = RateLimiter::new(0.5, RampMode::Legacy).unwrap();

        // Requested step (1.0) exceeds the ceiling (0.5 * 1.0 s), so the full
        // request is applied in one call
        assert_eq!(ramp.step(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_legacy_small_request_overshoots() {
        let mut ramp = RateLimiter::new(0.5, RampMode::Legacy).unwrap();

        // Requested step (0.125) is below the ceiling (0.5), so the output
        // snaps past the demand by the ceiling amount
        assert_eq!(ramp.step(0.125, 1.0), 0.5);
    }

    #[test]
    fn test_no_change_when_at_demand() {
        let mut ramp = RateLimiter::new(0.5, RampMode::Legacy).unwrap();

        // Move the output to the demand with a zero-elapsed step
        assert_eq!(ramp.step(0.25, 0.0), 0.25);

        // A matching demand leaves the output untouched however much time
        // has passed
        assert_eq!(ramp.step(0.25, 100.0), 0.25);
    }

    #[test]
    fn test_conventional_ramp_up() {
        let mut ramp = RateLimiter::new(0.5, RampMode::Conventional).unwrap();

        assert_eq!(ramp.step(1.0, 1.0), 0.5);
        assert_eq!(ramp.step(1.0, 1.0), 1.0);

        // Holds at the demand once reached
        assert_eq!(ramp.step(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_conventional_ramp_down() {
        let mut ramp = RateLimiter::new(0.5, RampMode::Conventional).unwrap();
        ramp.step(1.0, 10.0);

        assert_eq!(ramp.step(-1.0, 1.0), 0.5);
        assert_eq!(ramp.step(-1.0, 2.0), -0.5);
        assert_eq!(ramp.step(-1.0, 1.0), -1.0);
    }

    #[test]
    fn test_negative_elapsed_clamped() {
        let mut ramp = RateLimiter::new(0.5, RampMode::Conventional).unwrap();

        // Negative elapsed time is treated as zero, so no movement is allowed
        assert_eq!(ramp.step(1.0, -1.0), 0.0);
    }
}
