use chrono::{Days, NaiveDate};
use log::{debug, error};
use thiserror::Error;

use crate::{
    CreateError, DeleteError, Exercise, ExerciseAlias, ExerciseID, ExerciseMetrics,
    ExerciseRepository, FatigueScore, MuscleGroup, Name, ProgramTemplate, ReadError,
    ResolutionCache, ScheduleError, Session, SessionID, SessionRepository, Set, SetEntry, SetID,
    SetPatch, Slug, UpdateError, UserID, catalog, metrics, resolver, scheduler,
};

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

/// What one template application produced: the stored sessions plus
/// the exercise codes that resolved to nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    pub created_sessions: Vec<Session>,
    pub skipped_codes: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Create(#[from] CreateError),
}

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R>
where
    R: ExerciseRepository + SessionRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    pub async fn create_exercise(
        &self,
        name: Name,
        slug: Option<Slug>,
        muscle_group: MuscleGroup,
    ) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(name, slug, muscle_group),
            CreateError,
            "create",
            "exercise"
        )
    }

    pub async fn create_alias(
        &self,
        alias: Slug,
        exercise_id: ExerciseID,
    ) -> Result<ExerciseAlias, CreateError> {
        log_on_error!(
            self.repository.create_alias(alias, exercise_id),
            CreateError,
            "create",
            "exercise alias"
        )
    }

    pub async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }

    /// Strict resolution: a miss is an error, unlike in template
    /// application where misses are collected and reported.
    pub async fn resolve_exercise(&self, name_or_code: &str) -> Result<Exercise, ReadError> {
        let mut cache = ResolutionCache::new();
        match resolver::resolve(&self.repository, &mut cache, name_or_code).await {
            Ok(Some(exercise)) => Ok(exercise),
            Ok(None) => Err(ReadError::NotFound),
            Err(err) => {
                error!("failed to resolve exercise: {err}");
                Err(err)
            }
        }
    }

    /// Insert every missing catalog exercise and its aliases. Entries
    /// whose slug already exists are left untouched, so seeding is
    /// idempotent. Returns the number of exercises created.
    pub async fn seed_catalog(&self) -> Result<u32, CreateError> {
        let mut created = 0;

        for entry in &catalog::EXERCISES {
            let slug = Slug::new(entry.code);
            let exercise = match self.repository.read_exercise_by_slug(&slug).await? {
                Some(exercise) => exercise,
                None => {
                    let name =
                        Name::new(entry.name).map_err(|err| CreateError::Other(err.into()))?;
                    created += 1;
                    self.repository
                        .create_exercise(name, Some(slug), entry.muscle_group)
                        .await?
                }
            };

            for alias in entry.aliases {
                let alias = Slug::new(alias);
                if alias == exercise.slug
                    || self.repository.read_alias(&alias).await?.is_some()
                {
                    continue;
                }
                self.repository.create_alias(alias, exercise.id).await?;
            }
        }

        Ok(created)
    }

    /// Expand a template into dated sessions for `user_id` and store
    /// the whole schedule atomically. Unresolvable exercise codes are
    /// skipped and reported, never fatal.
    pub async fn apply_program(
        &self,
        user_id: UserID,
        template: &ProgramTemplate,
        start_date: NaiveDate,
    ) -> Result<ApplyOutcome, ApplyError> {
        let schedule = scheduler::plan(&self.repository, template, start_date).await?;

        let result = self
            .repository
            .create_planned_sessions(user_id, schedule.sessions)
            .await;

        match result {
            Ok(created_sessions) => Ok(ApplyOutcome {
                created_sessions,
                skipped_codes: schedule.skipped_codes,
            }),
            Err(err) => {
                error!("failed to apply program: {err}");
                Err(err.into())
            }
        }
    }

    /// Per-exercise progression metrics over the trailing
    /// `range_days`, with recent volume over the trailing
    /// `compare_days`.
    pub async fn get_progression_metrics(
        &self,
        user_id: UserID,
        exercise_id: Option<ExerciseID>,
        today: NaiveDate,
        range_days: u64,
        compare_days: u64,
    ) -> Result<Vec<ExerciseMetrics>, ReadError> {
        let from = today
            .checked_sub_days(Days::new(range_days))
            .unwrap_or(NaiveDate::MIN);
        let rows = log_on_error!(
            self.repository.read_set_rows(user_id, from, today, exercise_id),
            ReadError,
            "get",
            "set rows"
        )?;
        Ok(metrics::progression_metrics(&rows, today, compare_days))
    }

    pub async fn get_sessions(&self, user_id: UserID) -> Result<Vec<Session>, ReadError> {
        log_on_error!(
            self.repository.read_sessions(user_id),
            ReadError,
            "get",
            "sessions"
        )
    }

    pub async fn get_sets(&self, session_id: SessionID) -> Result<Vec<Set>, ReadError> {
        log_on_error!(
            self.repository.read_sets(session_id),
            ReadError,
            "get",
            "sets"
        )
    }

    pub async fn create_session(
        &self,
        user_id: UserID,
        date: NaiveDate,
        notes: String,
        fatigue_score: Option<FatigueScore>,
        sets: Vec<SetEntry>,
    ) -> Result<Session, CreateError> {
        log_on_error!(
            self.repository
                .create_session(user_id, date, notes, fatigue_score, sets),
            CreateError,
            "create",
            "session"
        )
    }

    pub async fn modify_session(
        &self,
        id: SessionID,
        notes: Option<String>,
        fatigue_score: Option<FatigueScore>,
    ) -> Result<Session, UpdateError> {
        log_on_error!(
            self.repository.modify_session(id, notes, fatigue_score),
            UpdateError,
            "modify",
            "session"
        )
    }

    pub async fn modify_set(&self, id: SetID, patch: SetPatch) -> Result<Set, UpdateError> {
        log_on_error!(
            self.repository.modify_set(id, patch),
            UpdateError,
            "modify",
            "set"
        )
    }

    pub async fn delete_session(&self, id: SessionID) -> Result<SessionID, DeleteError> {
        log_on_error!(
            self.repository.delete_session(id),
            DeleteError,
            "delete",
            "session"
        )
    }
}
