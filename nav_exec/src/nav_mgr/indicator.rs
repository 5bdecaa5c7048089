//! Indicator LED sequences

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Duration of each phase of the completion flash.
///
/// Units: seconds
pub const FLASH_PHASE_S: f64 = 0.5;

/// Indicator levels of the completion flash, the indicator is off once they are exhausted.
const COMPLETION_FLASH: [bool; 4] = [false, true, false, true];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A timed sequence of indicator levels, evaluated once per cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSeq {
    start_s: f64,
    phases: &'static [bool],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl IndicatorSeq {
    /// Two flashes signalling that the final waypoint has been reached.
    pub fn completion_flash(start_s: f64) -> Self {
        Self {
            start_s,
            phases: &COMPLETION_FLASH,
        }
    }

    /// Level of the indicator at `now_s`, or `None` if the sequence has finished.
    pub fn level(&self, now_s: f64) -> Option<bool> {
        let elapsed_s = now_s - self.start_s;

        if elapsed_s < 0.0 {
            return self.phases.first().copied();
        }

        self.phases
            .get((elapsed_s / FLASH_PHASE_S).floor() as usize)
            .copied()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_completion_flash() {
        let seq = IndicatorSeq::completion_flash(10.0);

        assert_eq!(seq.level(10.0), Some(false));
        assert_eq!(seq.level(10.49), Some(false));
        assert_eq!(seq.level(10.5), Some(true));
        assert_eq!(seq.level(11.2), Some(false));
        assert_eq!(seq.level(11.7), Some(true));
        assert_eq!(seq.level(12.0), None);
        assert_eq!(seq.level(100.0), None);
    }
}
