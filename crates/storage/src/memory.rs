use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use liftlog_domain as domain;
use log::debug;
use uuid::Uuid;

#[derive(Default)]
struct State {
    exercises: Vec<domain::Exercise>,
    aliases: Vec<domain::ExerciseAlias>,
    sessions: Vec<domain::Session>,
    sets: Vec<domain::Set>,
}

/// Process-local record store. Writes go through a single lock, so a
/// batch insert is observed either completely or not at all.
#[derive(Default)]
pub struct InMemoryStorage {
    state: RwLock<State>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn validate_sets(
    state: &State,
    entries: &[domain::SetEntry],
) -> Result<(), domain::CreateError> {
    let mut indices = std::collections::BTreeSet::new();
    for entry in entries {
        if !indices.insert(entry.set_index) {
            return Err(domain::CreateError::Conflict);
        }
        if !state.exercises.iter().any(|e| e.id == entry.exercise_id) {
            return Err(domain::CreateError::Other(
                "referenced exercise does not exist".into(),
            ));
        }
    }
    Ok(())
}

fn insert_sets(
    state: &mut State,
    session_id: domain::SessionID,
    entries: Vec<domain::SetEntry>,
) {
    for entry in entries {
        state.sets.push(domain::Set {
            id: domain::SetID::from(Uuid::new_v4()),
            session_id,
            exercise_id: entry.exercise_id,
            set_index: entry.set_index,
            load: entry.load,
            reps: entry.reps,
            rir: entry.rir,
            tempo: entry.tempo,
            notes: entry.notes,
            is_test_set: entry.is_test_set,
        });
    }
}

impl domain::ExerciseRepository for InMemoryStorage {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let mut exercises = self.read().exercises.clone();
        exercises.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(exercises)
    }

    async fn read_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<Option<domain::Exercise>, domain::ReadError> {
        Ok(self.read().exercises.iter().find(|e| e.id == id).cloned())
    }

    async fn read_exercise_by_name(
        &self,
        name: &str,
    ) -> Result<Option<domain::Exercise>, domain::ReadError> {
        Ok(self
            .read()
            .exercises
            .iter()
            .find(|e| e.name.as_ref() == name)
            .cloned())
    }

    async fn read_exercise_by_slug(
        &self,
        slug: &domain::Slug,
    ) -> Result<Option<domain::Exercise>, domain::ReadError> {
        Ok(self
            .read()
            .exercises
            .iter()
            .find(|e| &e.slug == slug)
            .cloned())
    }

    async fn read_alias(
        &self,
        alias: &domain::Slug,
    ) -> Result<Option<domain::ExerciseAlias>, domain::ReadError> {
        Ok(self
            .read()
            .aliases
            .iter()
            .find(|a| &a.alias == alias)
            .cloned())
    }

    async fn create_exercise(
        &self,
        name: domain::Name,
        slug: Option<domain::Slug>,
        muscle_group: domain::MuscleGroup,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let slug = slug.unwrap_or_else(|| domain::Slug::new(name.as_ref()));
        let mut state = self.write();
        if state
            .exercises
            .iter()
            .any(|e| e.slug == slug || e.name == name)
        {
            return Err(domain::CreateError::Conflict);
        }
        let exercise = domain::Exercise {
            id: domain::ExerciseID::from(Uuid::new_v4()),
            name,
            slug,
            muscle_group,
        };
        state.exercises.push(exercise.clone());
        Ok(exercise)
    }

    async fn create_alias(
        &self,
        alias: domain::Slug,
        exercise_id: domain::ExerciseID,
    ) -> Result<domain::ExerciseAlias, domain::CreateError> {
        let mut state = self.write();
        let Some(exercise) = state.exercises.iter().find(|e| e.id == exercise_id) else {
            return Err(domain::CreateError::Other(
                "referenced exercise does not exist".into(),
            ));
        };
        // An alias equal to the canonical slug would be redundant and
        // shadow slug lookups.
        if exercise.slug == alias || state.aliases.iter().any(|a| a.alias == alias) {
            return Err(domain::CreateError::Conflict);
        }
        let alias = domain::ExerciseAlias { alias, exercise_id };
        state.aliases.push(alias.clone());
        Ok(alias)
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        let mut state = self.write();
        if state.sets.iter().any(|s| s.exercise_id == id) {
            return Err(domain::DeleteError::Other(
                "exercise is referenced by logged sets".into(),
            ));
        }
        let Some(position) = state.exercises.iter().position(|e| e.id == id) else {
            return Err(domain::DeleteError::NotFound);
        };
        state.exercises.remove(position);
        state.aliases.retain(|a| a.exercise_id != id);
        Ok(id)
    }
}

impl domain::SessionRepository for InMemoryStorage {
    async fn read_sessions(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Session>, domain::ReadError> {
        let mut sessions: Vec<domain::Session> = self
            .read()
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.date);
        Ok(sessions)
    }

    async fn read_sets(
        &self,
        session_id: domain::SessionID,
    ) -> Result<Vec<domain::Set>, domain::ReadError> {
        let mut sets: Vec<domain::Set> = self
            .read()
            .sets
            .iter()
            .filter(|s| s.session_id == session_id)
            .cloned()
            .collect();
        sets.sort_by_key(|s| s.set_index);
        Ok(sets)
    }

    async fn read_set_rows(
        &self,
        user_id: domain::UserID,
        from: NaiveDate,
        to: NaiveDate,
        exercise_id: Option<domain::ExerciseID>,
    ) -> Result<Vec<domain::SetRow>, domain::ReadError> {
        let state = self.read();
        let mut rows = Vec::new();
        for set in &state.sets {
            let Some(session) = state.sessions.iter().find(|s| s.id == set.session_id) else {
                continue;
            };
            if session.user_id != user_id || session.date < from || session.date > to {
                continue;
            }
            if exercise_id.is_some_and(|id| id != set.exercise_id) {
                continue;
            }
            let Some(exercise) = state.exercises.iter().find(|e| e.id == set.exercise_id)
            else {
                continue;
            };
            rows.push(domain::SetRow {
                session_id: session.id,
                date: session.date,
                fatigue_score: session.fatigue_score,
                exercise_id: set.exercise_id,
                exercise_name: exercise.name.clone(),
                load: set.load,
                reps: set.reps,
            });
        }
        rows.sort_by_key(|r| (r.date, r.session_id));
        Ok(rows)
    }

    async fn create_session(
        &self,
        user_id: domain::UserID,
        date: NaiveDate,
        notes: String,
        fatigue_score: Option<domain::FatigueScore>,
        sets: Vec<domain::SetEntry>,
    ) -> Result<domain::Session, domain::CreateError> {
        let mut state = self.write();
        if state
            .sessions
            .iter()
            .any(|s| s.user_id == user_id && s.date == date)
        {
            return Err(domain::CreateError::Conflict);
        }
        validate_sets(&state, &sets)?;
        let session = domain::Session {
            id: domain::SessionID::from(Uuid::new_v4()),
            user_id,
            date,
            day_index: None,
            fatigue_score,
            notes,
        };
        insert_sets(&mut state, session.id, sets);
        state.sessions.push(session.clone());
        Ok(session)
    }

    async fn create_planned_sessions(
        &self,
        user_id: domain::UserID,
        sessions: Vec<domain::PlannedSession>,
    ) -> Result<Vec<domain::Session>, domain::CreateError> {
        let mut state = self.write();

        // Validate the whole batch against the stored state before
        // touching it, so a rejected batch leaves no partial schedule.
        let mut dates: Vec<NaiveDate> = state
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.date)
            .collect();
        for planned in &sessions {
            if dates.contains(&planned.date) {
                return Err(domain::CreateError::Conflict);
            }
            dates.push(planned.date);
            validate_sets(&state, &planned.sets)?;
        }

        debug!("storing {} planned sessions", sessions.len());

        let mut created = Vec::with_capacity(sessions.len());
        for planned in sessions {
            let session = domain::Session {
                id: domain::SessionID::from(Uuid::new_v4()),
                user_id,
                date: planned.date,
                day_index: Some(planned.day_index),
                fatigue_score: planned.fatigue_score,
                notes: planned.notes,
            };
            insert_sets(&mut state, session.id, planned.sets);
            state.sessions.push(session.clone());
            created.push(session);
        }
        Ok(created)
    }

    async fn modify_session(
        &self,
        id: domain::SessionID,
        notes: Option<String>,
        fatigue_score: Option<domain::FatigueScore>,
    ) -> Result<domain::Session, domain::UpdateError> {
        let mut state = self.write();
        let Some(session) = state.sessions.iter_mut().find(|s| s.id == id) else {
            return Err(domain::UpdateError::NotFound);
        };
        if let Some(notes) = notes {
            session.notes = notes;
        }
        if let Some(fatigue_score) = fatigue_score {
            session.fatigue_score = Some(fatigue_score);
        }
        Ok(session.clone())
    }

    async fn modify_set(
        &self,
        id: domain::SetID,
        patch: domain::SetPatch,
    ) -> Result<domain::Set, domain::UpdateError> {
        let mut state = self.write();
        let Some(set) = state.sets.iter_mut().find(|s| s.id == id) else {
            return Err(domain::UpdateError::NotFound);
        };
        if let Some(load) = patch.load {
            set.load = Some(load);
        }
        if let Some(reps) = patch.reps {
            set.reps = Some(reps);
        }
        if let Some(rir) = patch.rir {
            set.rir = Some(rir);
        }
        if let Some(tempo) = patch.tempo {
            set.tempo = Some(tempo);
        }
        if let Some(notes) = patch.notes {
            set.notes = notes;
        }
        if let Some(is_test_set) = patch.is_test_set {
            set.is_test_set = is_test_set;
        }
        Ok(set.clone())
    }

    async fn delete_session(
        &self,
        id: domain::SessionID,
    ) -> Result<domain::SessionID, domain::DeleteError> {
        let mut state = self.write();
        let Some(position) = state.sessions.iter().position(|s| s.id == id) else {
            return Err(domain::DeleteError::NotFound);
        };
        state.sessions.remove(position);
        state.sets.retain(|s| s.session_id != id);
        Ok(id)
    }
}
