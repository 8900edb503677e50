use std::fmt;

use derive_more::{Display, Into};

/// Weight moved in a set, in the unit the user trains with (kg or lb,
/// decided upstream).
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Load(f32);

impl Load {
    pub fn new(value: f32) -> Result<Self, LoadError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(LoadError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(LoadError::InvalidResolution);
        }

        Ok(Self(value))
    }

    /// Scale by `factor` and round to the nearest multiple of
    /// `increment`, clamped to the valid range.
    #[must_use]
    pub fn scaled_by(self, factor: f32, increment: LoadIncrement) -> Load {
        Load(((self.0 * factor / increment.0).round() * increment.0).clamp(0.0, 999.9))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LoadError {
    #[error("Load must be in the range 0.0 to 999.9")]
    OutOfRange,
    #[error("Load must be a multiple of 0.1")]
    InvalidResolution,
}

/// Plate granularity used when rounding prescribed loads. The default
/// of 2.5 matches common plate pairs.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct LoadIncrement(f32);

impl LoadIncrement {
    pub fn new(value: f32) -> Result<Self, LoadIncrementError> {
        if !(0.0..1000.0).contains(&value) || value == 0.0 {
            return Err(LoadIncrementError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(LoadIncrementError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl Default for LoadIncrement {
    fn default() -> Self {
        Self(2.5)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LoadIncrementError {
    #[error("Load increment must be in the range 0.1 to 999.9")]
    OutOfRange,
    #[error("Load increment must be a multiple of 0.1")]
    InvalidResolution,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl From<Reps> for f32 {
    fn from(value: Reps) -> Self {
        #[allow(clippy::cast_precision_loss)]
        {
            value.0 as f32
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
}

/// Reps-in-reserve reported for a set (0 = taken to failure).
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rir(u8);

impl Rir {
    pub const ZERO: Rir = Rir(0);
    pub const ONE: Rir = Rir(1);
    pub const TWO: Rir = Rir(2);

    pub fn new(value: u8) -> Result<Self, RirError> {
        if value > 10 {
            return Err(RirError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn avg(values: &[Rir]) -> Option<f32> {
        if values.is_empty() {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            Some(values.iter().map(|rir| u32::from(rir.0)).sum::<u32>() as f32 / values.len() as f32)
        }
    }
}

impl From<Rir> for f32 {
    fn from(value: Rir) -> Self {
        f32::from(value.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RirError {
    #[error("RIR must be in the range 0 to 10")]
    OutOfRange,
}

/// Subjective whole-day fatigue on a 0 to 10 scale.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct FatigueScore(u8);

impl FatigueScore {
    pub fn new(value: u8) -> Result<Self, FatigueScoreError> {
        if value > 10 {
            return Err(FatigueScoreError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl From<FatigueScore> for f32 {
    fn from(value: FatigueScore) -> Self {
        f32::from(value.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FatigueScoreError {
    #[error("Fatigue score must be in the range 0 to 10")]
    OutOfRange,
}

/// Inclusive target rep range for the working sets of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepRange {
    low: Reps,
    high: Reps,
}

impl RepRange {
    pub fn new(low: Reps, high: Reps) -> Result<Self, RepRangeError> {
        if u32::from(low) == 0 {
            return Err(RepRangeError::ZeroLow);
        }

        if low > high {
            return Err(RepRangeError::Inverted);
        }

        Ok(Self { low, high })
    }

    #[must_use]
    pub fn low(&self) -> Reps {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> Reps {
        self.high
    }
}

impl fmt::Display for RepRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepRangeError {
    #[error("Rep range must start at 1 or more")]
    ZeroLow,
    #[error("Rep range must not be inverted")]
    Inverted,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, Ok(Load(0.0)))]
    #[case(999.9, Ok(Load(999.9)))]
    #[case(1000.0, Err(LoadError::OutOfRange))]
    #[case(-2.5, Err(LoadError::OutOfRange))]
    #[case(1.23, Err(LoadError::InvalidResolution))]
    fn test_load_new(#[case] input: f32, #[case] expected: Result<Load, LoadError>) {
        assert_eq!(Load::new(input), expected);
    }

    #[rstest]
    #[case(100.0, 1.03, 102.5)]
    #[case(100.0, 0.95, 95.0)]
    #[case(102.5, 1.02, 105.0)]
    #[case(70.0, 1.03, 72.5)]
    #[case(0.0, 0.95, 0.0)]
    #[case(999.9, 1.03, 999.9)]
    fn test_load_scaled_by(#[case] load: f32, #[case] factor: f32, #[case] expected: f32) {
        assert_eq!(
            Load::new(load).unwrap().scaled_by(factor, LoadIncrement::default()),
            Load(expected)
        );
    }

    #[rstest]
    #[case(0.0, Err(LoadIncrementError::OutOfRange))]
    #[case(2.5, Ok(LoadIncrement(2.5)))]
    #[case(1.25, Err(LoadIncrementError::InvalidResolution))]
    fn test_load_increment_new(
        #[case] input: f32,
        #[case] expected: Result<LoadIncrement, LoadIncrementError>,
    ) {
        assert_eq!(LoadIncrement::new(input), expected);
    }

    #[rstest]
    #[case(0, Ok(Reps(0)))]
    #[case(999, Ok(Reps(999)))]
    #[case(1000, Err(RepsError::OutOfRange))]
    fn test_reps_new(#[case] input: u32, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::new(input), expected);
    }

    #[rstest]
    #[case(0, Ok(Rir(0)))]
    #[case(10, Ok(Rir(10)))]
    #[case(11, Err(RirError::OutOfRange))]
    fn test_rir_new(#[case] input: u8, #[case] expected: Result<Rir, RirError>) {
        assert_eq!(Rir::new(input), expected);
    }

    #[rstest]
    #[case(&[], None)]
    #[case(&[Rir(2)], Some(2.0))]
    #[case(&[Rir(1), Rir(2)], Some(1.5))]
    fn test_rir_avg(#[case] values: &[Rir], #[case] expected: Option<f32>) {
        assert_eq!(Rir::avg(values), expected);
    }

    #[rstest]
    #[case(7, Ok(FatigueScore(7)))]
    #[case(11, Err(FatigueScoreError::OutOfRange))]
    fn test_fatigue_score_new(
        #[case] input: u8,
        #[case] expected: Result<FatigueScore, FatigueScoreError>,
    ) {
        assert_eq!(FatigueScore::new(input), expected);
    }

    #[rstest]
    #[case(8, 12, Ok(RepRange { low: Reps(8), high: Reps(12) }))]
    #[case(8, 8, Ok(RepRange { low: Reps(8), high: Reps(8) }))]
    #[case(0, 5, Err(RepRangeError::ZeroLow))]
    #[case(12, 8, Err(RepRangeError::Inverted))]
    fn test_rep_range_new(
        #[case] low: u32,
        #[case] high: u32,
        #[case] expected: Result<RepRange, RepRangeError>,
    ) {
        assert_eq!(
            RepRange::new(Reps::new(low).unwrap(), Reps::new(high).unwrap()),
            expected
        );
    }

    #[rstest]
    #[case(RepRange { low: Reps(8), high: Reps(12) }, "8-12")]
    fn test_rep_range_display(#[case] input: RepRange, #[case] expected: &str) {
        assert_eq!(input.to_string(), expected);
    }
}
