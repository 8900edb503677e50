use chrono::NaiveDate;
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseID, FatigueScore, Load, PlannedSession, ReadError, Reps, Rir,
    SetRow, UpdateError,
};

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn read_sessions(&self, user_id: UserID) -> Result<Vec<Session>, ReadError>;
    async fn read_sets(&self, session_id: SessionID) -> Result<Vec<Set>, ReadError>;
    /// Sets joined with their session and exercise, restricted to one
    /// user and a date window, optionally to one exercise.
    async fn read_set_rows(
        &self,
        user_id: UserID,
        from: NaiveDate,
        to: NaiveDate,
        exercise_id: Option<ExerciseID>,
    ) -> Result<Vec<SetRow>, ReadError>;
    async fn create_session(
        &self,
        user_id: UserID,
        date: NaiveDate,
        notes: String,
        fatigue_score: Option<FatigueScore>,
        sets: Vec<SetEntry>,
    ) -> Result<Session, CreateError>;
    /// Insert a whole planned schedule in one atomic unit of work. On
    /// failure no session or set of the batch remains stored.
    async fn create_planned_sessions(
        &self,
        user_id: UserID,
        sessions: Vec<PlannedSession>,
    ) -> Result<Vec<Session>, CreateError>;
    async fn modify_session(
        &self,
        id: SessionID,
        notes: Option<String>,
        fatigue_score: Option<FatigueScore>,
    ) -> Result<Session, UpdateError>;
    async fn modify_set(&self, id: SetID, patch: SetPatch) -> Result<Set, UpdateError>;
    async fn delete_session(&self, id: SessionID) -> Result<SessionID, DeleteError>;
}

/// One training day of one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionID,
    pub user_id: UserID,
    pub date: NaiveDate,
    pub day_index: Option<u32>,
    pub fatigue_score: Option<FatigueScore>,
    pub notes: String,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionID(Uuid);

impl SessionID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// One working set, owned by exactly one session. `set_index` is the
/// 1-based position within the session and defines iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub id: SetID,
    pub session_id: SessionID,
    pub exercise_id: ExerciseID,
    pub set_index: u32,
    pub load: Option<Load>,
    pub reps: Option<Reps>,
    pub rir: Option<Rir>,
    pub tempo: Option<String>,
    pub notes: String,
    pub is_test_set: bool,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl SetID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// A set as supplied by a caller, before the store assigns
/// identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct SetEntry {
    pub exercise_id: ExerciseID,
    pub set_index: u32,
    pub load: Option<Load>,
    pub reps: Option<Reps>,
    pub rir: Option<Rir>,
    pub tempo: Option<String>,
    pub notes: String,
    pub is_test_set: bool,
}

/// Partial update of a logged set. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetPatch {
    pub load: Option<Load>,
    pub reps: Option<Reps>,
    pub rir: Option<Rir>,
    pub tempo: Option<String>,
    pub notes: Option<String>,
    pub is_test_set: Option<bool>,
}
