use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::{
    ExerciseRepository, FatigueScore, ProgramTemplate, ReadError, ResolutionCache, SetEntry,
    resolver,
};

/// A materialized but not yet stored training day.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSession {
    pub date: NaiveDate,
    pub day_index: u32,
    pub notes: String,
    pub fatigue_score: Option<FatigueScore>,
    pub sets: Vec<SetEntry>,
}

/// The result of expanding one template against one start date.
///
/// `skipped_codes` lists the exercise codes that resolved to nothing,
/// sorted and deduplicated. Their sets are absent from the planned
/// sessions; everything else is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub sessions: Vec<PlannedSession>,
    pub skipped_codes: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("template contains no sessions")]
    EmptyTemplate,
    #[error("schedule exceeds the supported date range")]
    DateRange,
    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Expand `template` into dated sessions, one per calendar day
/// starting at `start_date`, resolving every exercise code through
/// `repository`. No rest days are inserted; day N of the schedule is
/// `start_date + (N - 1)` days.
///
/// Resolution misses are lenient: the affected set is dropped, the
/// code is reported, the rest of the schedule goes through. An empty
/// template is an error so no write can follow it.
pub async fn plan<R: ExerciseRepository>(
    repository: &R,
    template: &ProgramTemplate,
    start_date: NaiveDate,
) -> Result<Schedule, ScheduleError> {
    let flattened = template.flattened_sessions();

    if flattened.is_empty() {
        return Err(ScheduleError::EmptyTemplate);
    }

    // Resolve each distinct code once up front; the per-set lookups
    // below are cache hits.
    let mut cache = ResolutionCache::new();
    let mut skipped_codes = BTreeSet::new();
    for code in template.exercise_codes() {
        if resolver::resolve(repository, &mut cache, code).await?.is_none() {
            skipped_codes.insert(code.to_string());
        }
    }

    let mut sessions = Vec::with_capacity(flattened.len());

    for (ordinal, session) in (1..).zip(flattened) {
        let date = start_date
            .checked_add_days(Days::new(ordinal - 1))
            .ok_or(ScheduleError::DateRange)?;

        let mut sets = Vec::with_capacity(session.sets.len());

        for set in &session.sets {
            if set.exercise_code.is_empty() {
                continue;
            }

            let Some(exercise) =
                resolver::resolve(repository, &mut cache, &set.exercise_code).await?
            else {
                continue;
            };

            sets.push(SetEntry {
                exercise_id: exercise.id,
                set_index: u32::try_from(sets.len()).unwrap_or(u32::MAX) + 1,
                load: None,
                reps: set.reps,
                rir: set.rir,
                tempo: set.tempo.clone(),
                notes: String::new(),
                is_test_set: set.is_test_set,
            });
        }

        let notes = if session.title.is_empty() {
            template.name.to_string()
        } else {
            session.title.clone()
        };

        sessions.push(PlannedSession {
            date,
            day_index: u32::try_from(ordinal).unwrap_or(u32::MAX),
            notes,
            fatigue_score: session.fatigue_score,
            sets,
        });
    }

    Ok(Schedule {
        sessions,
        skipped_codes: skipped_codes.into_iter().collect(),
    })
}
