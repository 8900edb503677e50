use thiserror::Error;

use crate::{FatigueScore, Load, LoadIncrement, RepRange, Reps, Rir};

/// Compounds progress faster and tolerate lower RIR floors than
/// accessories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseKind {
    Compound,
    Accessory,
}

/// One exercise's completed working sets within a session, the input
/// to a recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExercisePerformance {
    pub kind: ExerciseKind,
    pub target_rep_range: RepRange,
    pub sets: Vec<PerformedSet>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformedSet {
    pub load: Load,
    pub reps: Reps,
    pub rir: Rir,
}

/// Flags supplied per call, not stored.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RecommendationContext {
    pub late_mesocycle_bias: bool,
    pub fatigue_score: Option<FatigueScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    IncreaseLoad,
    IncreaseReps,
    Hold,
    ReduceLoad,
}

/// Next-session prescription. `next_sets` stays unset until a rule
/// prescribes a set-count change.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub decision: Decision,
    pub next_load: Load,
    pub next_rir: Rir,
    pub next_sets: Option<u32>,
    pub notes: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendationError {
    #[error("at least one completed set is required")]
    NoSets,
}

/// Decide the next load/RIR target from one exercise's last session.
/// Pure and deterministic. Rules apply in order, first match wins:
/// deload, progress load, progress density, hold.
pub fn recommend(
    performance: &ExercisePerformance,
    context: &RecommendationContext,
    increment: LoadIncrement,
) -> Result<Recommendation, RecommendationError> {
    let sets = &performance.sets;

    if sets.is_empty() {
        return Err(RecommendationError::NoSets);
    }

    // Working load is assumed constant per exercise; take the top set.
    let base_load = sets
        .iter()
        .map(|s| s.load)
        .fold(Load::default(), |a, b| if b > a { b } else { a });
    let min_rir = sets.iter().map(|s| s.rir).min().unwrap_or(Rir::ZERO);
    let high_fatigue = context
        .fatigue_score
        .is_some_and(|score| u8::from(score) >= 7);

    if high_fatigue || (min_rir < Rir::ONE && sets.len() >= 2) {
        return Ok(Recommendation {
            decision: Decision::ReduceLoad,
            next_load: base_load.scaled_by(0.95, increment),
            next_rir: match performance.kind {
                ExerciseKind::Compound => Rir::ONE,
                ExerciseKind::Accessory => Rir::TWO,
            },
            next_sets: None,
            notes: "Deload flag: high fatigue or sub-1 RIR detected. Drop ~5% and bias RIR up."
                .to_string(),
        });
    }

    let target_rir = if context.late_mesocycle_bias {
        match performance.kind {
            ExerciseKind::Compound => Rir::ONE,
            ExerciseKind::Accessory => Rir::TWO,
        }
    } else {
        Rir::TWO
    };

    let high = performance.target_rep_range.high();
    let rir_floor = if context.late_mesocycle_bias {
        Rir::ONE
    } else {
        Rir::TWO
    };
    let all_at_top = sets.iter().all(|s| s.reps >= high && s.rir >= rir_floor);

    if all_at_top {
        let factor = match performance.kind {
            ExerciseKind::Compound => 1.03,
            ExerciseKind::Accessory => 1.02,
        };
        return Ok(Recommendation {
            decision: Decision::IncreaseLoad,
            next_load: base_load.scaled_by(factor, increment),
            next_rir: target_rir,
            next_sets: None,
            notes: "All sets at top of range with clean RIR, nudging load upward.".to_string(),
        });
    }

    let rirs: Vec<Rir> = sets.iter().map(|s| s.rir).collect();
    let avg_rir = Rir::avg(&rirs).unwrap_or(0.0);
    #[allow(clippy::cast_precision_loss)]
    let avg_reps = sets.iter().map(|s| f32::from(s.reps)).sum::<f32>() / sets.len() as f32;

    if avg_rir > f32::from(target_rir) && avg_reps >= f32::from(high) - 1.0 {
        return Ok(Recommendation {
            decision: Decision::IncreaseReps,
            next_load: base_load,
            next_rir: target_rir,
            next_sets: None,
            notes: "Biasing density: hold load, push for +1 rep per working set.".to_string(),
        });
    }

    let notes = if avg_reps < f32::from(performance.target_rep_range.low())
        || avg_rir < f32::from(target_rir)
    {
        "Hold load; focus on tempo/rest to hit target RIR within rep range."
    } else {
        "Maintain load; aim for upper half of the rep range before adding weight."
    };

    Ok(Recommendation {
        decision: Decision::Hold,
        next_load: base_load,
        next_rir: target_rir,
        next_sets: None,
        notes: notes.to_string(),
    })
}
