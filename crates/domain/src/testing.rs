use std::cell::{Cell, RefCell};

use chrono::NaiveDate;

use crate::{
    CreateError, DeleteError, Exercise, ExerciseAlias, ExerciseID, ExerciseRepository,
    FatigueScore, MuscleGroup, Name, PlannedSession, ReadError, Session, SessionID,
    SessionRepository, Set, SetEntry, SetID, SetPatch, SetRow, Slug, StorageError, UpdateError,
    UserID, catalog,
};

/// In-memory repository for single-threaded tests. Counts name
/// lookups so caching behavior can be asserted.
#[derive(Default)]
pub struct FakeRepository {
    exercises: RefCell<Vec<Exercise>>,
    aliases: RefCell<Vec<ExerciseAlias>>,
    sessions: RefCell<Vec<Session>>,
    sets: RefCell<Vec<Set>>,
    next_id: Cell<u128>,
    name_lookups: Cell<u32>,
    fail_writes: Cell<bool>,
}

impl FakeRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository pre-filled with the seed catalog and its aliases.
    #[must_use]
    pub fn with_catalog() -> Self {
        let repository = Self::new();
        for entry in &catalog::EXERCISES {
            let id = repository.add_exercise(entry.name, entry.code, entry.muscle_group);
            for alias in entry.aliases {
                repository.add_alias(alias, id);
            }
        }
        repository
    }

    pub fn add_exercise(&self, name: &str, slug: &str, muscle_group: MuscleGroup) -> ExerciseID {
        let id = ExerciseID::from(self.take_id());
        self.exercises.borrow_mut().push(Exercise {
            id,
            name: Name::new(name).unwrap(),
            slug: Slug::new(slug),
            muscle_group,
        });
        id
    }

    pub fn add_alias(&self, alias: &str, exercise_id: ExerciseID) {
        self.aliases.borrow_mut().push(ExerciseAlias {
            alias: Slug::new(alias),
            exercise_id,
        });
    }

    pub fn add_session(
        &self,
        user_id: UserID,
        date: NaiveDate,
        fatigue_score: Option<FatigueScore>,
    ) -> SessionID {
        let id = SessionID::from(self.take_id());
        self.sessions.borrow_mut().push(Session {
            id,
            user_id,
            date,
            day_index: None,
            fatigue_score,
            notes: String::new(),
        });
        id
    }

    pub fn add_set(&self, session_id: SessionID, entry: SetEntry) -> SetID {
        let id = SetID::from(self.take_id());
        self.sets.borrow_mut().push(Set {
            id,
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
        id
    }

    /// Make every subsequent write fail with a storage error.
    pub fn fail_writes(&self) {
        self.fail_writes.set(true);
    }

    #[must_use]
    pub fn name_lookups(&self) -> u32 {
        self.name_lookups.get()
    }

    fn take_id(&self) -> u128 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::NoConnection);
        }
        Ok(())
    }
}

impl ExerciseRepository for FakeRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        Ok(self.exercises.borrow().clone())
    }

    async fn read_exercise(&self, id: ExerciseID) -> Result<Option<Exercise>, ReadError> {
        Ok(self.exercises.borrow().iter().find(|e| e.id == id).cloned())
    }

    async fn read_exercise_by_name(&self, name: &str) -> Result<Option<Exercise>, ReadError> {
        self.name_lookups.set(self.name_lookups.get() + 1);
        Ok(self
            .exercises
            .borrow()
            .iter()
            .find(|e| e.name.as_ref() == name)
            .cloned())
    }

    async fn read_exercise_by_slug(&self, slug: &Slug) -> Result<Option<Exercise>, ReadError> {
        Ok(self
            .exercises
            .borrow()
            .iter()
            .find(|e| &e.slug == slug)
            .cloned())
    }

    async fn read_alias(&self, alias: &Slug) -> Result<Option<ExerciseAlias>, ReadError> {
        Ok(self
            .aliases
            .borrow()
            .iter()
            .find(|a| &a.alias == alias)
            .cloned())
    }

    async fn create_exercise(
        &self,
        name: Name,
        slug: Option<Slug>,
        muscle_group: MuscleGroup,
    ) -> Result<Exercise, CreateError> {
        self.check_writable()?;
        let slug = slug.unwrap_or_else(|| Slug::new(name.as_ref()));
        if self.exercises.borrow().iter().any(|e| e.slug == slug) {
            return Err(CreateError::Conflict);
        }
        let exercise = Exercise {
            id: ExerciseID::from(self.take_id()),
            name,
            slug,
            muscle_group,
        };
        self.exercises.borrow_mut().push(exercise.clone());
        Ok(exercise)
    }

    async fn create_alias(
        &self,
        alias: Slug,
        exercise_id: ExerciseID,
    ) -> Result<ExerciseAlias, CreateError> {
        self.check_writable()?;
        if self.aliases.borrow().iter().any(|a| a.alias == alias) {
            return Err(CreateError::Conflict);
        }
        let alias = ExerciseAlias { alias, exercise_id };
        self.aliases.borrow_mut().push(alias.clone());
        Ok(alias)
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        let mut exercises = self.exercises.borrow_mut();
        let Some(position) = exercises.iter().position(|e| e.id == id) else {
            return Err(DeleteError::NotFound);
        };
        exercises.remove(position);
        self.aliases.borrow_mut().retain(|a| a.exercise_id != id);
        Ok(id)
    }
}

impl SessionRepository for FakeRepository {
    async fn read_sessions(&self, user_id: UserID) -> Result<Vec<Session>, ReadError> {
        Ok(self
            .sessions
            .borrow()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn read_sets(&self, session_id: SessionID) -> Result<Vec<Set>, ReadError> {
        let mut sets: Vec<Set> = self
            .sets
            .borrow()
            .iter()
            .filter(|s| s.session_id == session_id)
            .cloned()
            .collect();
        sets.sort_by_key(|s| s.set_index);
        Ok(sets)
    }

    async fn read_set_rows(
        &self,
        user_id: UserID,
        from: NaiveDate,
        to: NaiveDate,
        exercise_id: Option<ExerciseID>,
    ) -> Result<Vec<SetRow>, ReadError> {
        let sessions = self.sessions.borrow();
        let exercises = self.exercises.borrow();
        let mut rows = Vec::new();
        for set in self.sets.borrow().iter() {
            let Some(session) = sessions.iter().find(|s| s.id == set.session_id) else {
                continue;
            };
            if session.user_id != user_id || session.date < from || session.date > to {
                continue;
            }
            if exercise_id.is_some_and(|id| id != set.exercise_id) {
                continue;
            }
            let Some(exercise) = exercises.iter().find(|e| e.id == set.exercise_id) else {
                continue;
            };
            rows.push(SetRow {
                session_id: session.id,
                date: session.date,
                fatigue_score: session.fatigue_score,
                exercise_id: set.exercise_id,
                exercise_name: exercise.name.clone(),
                load: set.load,
                reps: set.reps,
            });
        }
        Ok(rows)
    }

    async fn create_session(
        &self,
        user_id: UserID,
        date: NaiveDate,
        notes: String,
        fatigue_score: Option<FatigueScore>,
        sets: Vec<SetEntry>,
    ) -> Result<Session, CreateError> {
        self.check_writable()?;
        let session = Session {
            id: SessionID::from(self.take_id()),
            user_id,
            date,
            day_index: None,
            fatigue_score,
            notes,
        };
        self.sessions.borrow_mut().push(session.clone());
        for entry in sets {
            self.add_set(session.id, entry);
        }
        Ok(session)
    }

    async fn create_planned_sessions(
        &self,
        user_id: UserID,
        sessions: Vec<PlannedSession>,
    ) -> Result<Vec<Session>, CreateError> {
        self.check_writable()?;
        let mut created = Vec::with_capacity(sessions.len());
        for planned in sessions {
            let session = Session {
                id: SessionID::from(self.take_id()),
                user_id,
                date: planned.date,
                day_index: Some(planned.day_index),
                fatigue_score: planned.fatigue_score,
                notes: planned.notes,
            };
            self.sessions.borrow_mut().push(session.clone());
            for entry in planned.sets {
                self.add_set(session.id, entry);
            }
            created.push(session);
        }
        Ok(created)
    }

    async fn modify_session(
        &self,
        id: SessionID,
        notes: Option<String>,
        fatigue_score: Option<FatigueScore>,
    ) -> Result<Session, UpdateError> {
        let mut sessions = self.sessions.borrow_mut();
        let Some(session) = sessions.iter_mut().find(|s| s.id == id) else {
            return Err(UpdateError::NotFound);
        };
        if let Some(notes) = notes {
            session.notes = notes;
        }
        if let Some(fatigue_score) = fatigue_score {
            session.fatigue_score = Some(fatigue_score);
        }
        Ok(session.clone())
    }

    async fn modify_set(&self, id: SetID, patch: SetPatch) -> Result<Set, UpdateError> {
        let mut sets = self.sets.borrow_mut();
        let Some(set) = sets.iter_mut().find(|s| s.id == id) else {
            return Err(UpdateError::NotFound);
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

    async fn delete_session(&self, id: SessionID) -> Result<SessionID, DeleteError> {
        let mut sessions = self.sessions.borrow_mut();
        let Some(position) = sessions.iter().position(|s| s.id == id) else {
            return Err(DeleteError::NotFound);
        };
        sessions.remove(position);
        self.sets.borrow_mut().retain(|s| s.session_id != id);
        Ok(id)
    }
}
