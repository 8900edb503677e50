use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};

use crate::{ExerciseID, FatigueScore, Load, Name, Reps, SessionID};

pub const DEFAULT_RANGE_DAYS: u64 = 30;
pub const DEFAULT_COMPARE_DAYS: u64 = 7;

/// A set joined with its session and exercise, as returned by the
/// store for a user and date window.
#[derive(Debug, Clone, PartialEq)]
pub struct SetRow {
    pub session_id: SessionID,
    pub date: NaiveDate,
    pub fatigue_score: Option<FatigueScore>,
    pub exercise_id: ExerciseID,
    pub exercise_name: Name,
    pub load: Option<Load>,
    pub reps: Option<Reps>,
}

/// Progression metrics for one exercise over one query window,
/// ordered by exercise name in the aggregate output.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseMetrics {
    pub exercise_id: ExerciseID,
    pub exercise_name: Name,
    pub sets_performed: u32,
    pub total_volume: VolumeTotals,
    pub one_rep_max: Option<OneRepMaxTrend>,
    pub average_fatigue_score: Option<f32>,
}

/// Load times reps, summed. A set missing load or reps contributes
/// zero instead of being dropped, so `sets_performed` and the volume
/// sums always describe the same rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeTotals {
    pub range: f32,
    pub recent: f32,
}

/// Epley-style estimate, `load * (1 + reps / 30)`, for the best set
/// of one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneRepMaxEstimate {
    pub date: NaiveDate,
    pub value: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneRepMaxTrend {
    pub latest: OneRepMaxEstimate,
    pub previous: Option<OneRepMaxEstimate>,
    pub change: Option<f32>,
}

/// Aggregate joined set rows into per-exercise metrics. The rows are
/// expected to already be restricted to the query window; `recent`
/// volume covers the trailing `compare_days` before `today`
/// inclusive.
#[must_use]
pub fn progression_metrics(
    rows: &[SetRow],
    today: NaiveDate,
    compare_days: u64,
) -> Vec<ExerciseMetrics> {
    let recent_from = today
        .checked_sub_days(Days::new(compare_days))
        .unwrap_or(NaiveDate::MIN);

    let mut grouped: BTreeMap<(Name, ExerciseID), Vec<&SetRow>> = BTreeMap::new();
    for row in rows {
        grouped
            .entry((row.exercise_name.clone(), row.exercise_id))
            .or_default()
            .push(row);
    }

    grouped
        .into_iter()
        .map(|((exercise_name, exercise_id), rows)| ExerciseMetrics {
            exercise_id,
            exercise_name,
            sets_performed: u32::try_from(rows.len()).unwrap_or(u32::MAX),
            total_volume: volume_totals(&rows, recent_from),
            one_rep_max: one_rep_max_trend(&rows),
            average_fatigue_score: average_fatigue_score(&rows),
        })
        .collect()
}

fn volume_totals(rows: &[&SetRow], recent_from: NaiveDate) -> VolumeTotals {
    let mut range = 0.0;
    let mut recent = 0.0;

    for row in rows {
        let volume = f32::from(row.load.unwrap_or_default())
            * f32::from(row.reps.unwrap_or_default());
        range += volume;
        if row.date >= recent_from {
            recent += volume;
        }
    }

    VolumeTotals {
        range: round1(range),
        recent: round1(recent),
    }
}

fn one_rep_max_trend(rows: &[&SetRow]) -> Option<OneRepMaxTrend> {
    // Best estimate per session, so multiple sets of one session
    // never produce multiple trend points. Missing load or reps
    // count as zero, like in the volume sums, so every session with
    // sets contributes a point.
    let mut best: BTreeMap<SessionID, (NaiveDate, f32)> = BTreeMap::new();

    for row in rows {
        let estimate = f32::from(row.load.unwrap_or_default())
            * (1.0 + f32::from(row.reps.unwrap_or_default()) / 30.0);
        best.entry(row.session_id)
            .and_modify(|(_, value)| *value = value.max(estimate))
            .or_insert((row.date, estimate));
    }

    let mut estimates: Vec<(NaiveDate, f32)> = best.into_values().collect();
    estimates.sort_by(|a, b| b.0.cmp(&a.0));

    let (latest_date, latest_value) = *estimates.first()?;
    let previous = estimates.get(1).copied();

    Some(OneRepMaxTrend {
        latest: OneRepMaxEstimate {
            date: latest_date,
            value: round1(latest_value),
        },
        previous: previous.map(|(date, value)| OneRepMaxEstimate {
            date,
            value: round1(value),
        }),
        change: previous.map(|(_, value)| round1(latest_value - value)),
    })
}

fn average_fatigue_score(rows: &[&SetRow]) -> Option<f32> {
    let mut seen = BTreeSet::new();
    let mut sum = 0.0;
    let mut count = 0;

    for row in rows {
        if let Some(score) = row.fatigue_score
            && seen.insert(row.session_id)
        {
            sum += f32::from(score);
            count += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    (count > 0).then(|| round2(sum / count as f32))
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
