use std::fmt;

use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, Slug};

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn read_exercise(&self, id: ExerciseID) -> Result<Option<Exercise>, ReadError>;
    async fn read_exercise_by_name(&self, name: &str) -> Result<Option<Exercise>, ReadError>;
    async fn read_exercise_by_slug(&self, slug: &Slug) -> Result<Option<Exercise>, ReadError>;
    async fn read_alias(&self, alias: &Slug) -> Result<Option<ExerciseAlias>, ReadError>;
    async fn create_exercise(
        &self,
        name: Name,
        slug: Option<Slug>,
        muscle_group: MuscleGroup,
    ) -> Result<Exercise, CreateError>;
    async fn create_alias(
        &self,
        alias: Slug,
        exercise_id: ExerciseID,
    ) -> Result<ExerciseAlias, CreateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

/// Canonical exercise identity. The slug is the unique key program
/// templates and aliases resolve against; it never changes once sets
/// reference the exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub slug: Slug,
    pub muscle_group: MuscleGroup,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Alternative spelling or terse code that resolves to a canonical
/// exercise. An alias must never equal its exercise's own slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseAlias {
    pub alias: Slug,
    pub exercise_id: ExerciseID,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
}

impl MuscleGroup {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Core => "core",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&str> for MuscleGroup {
    type Error = MuscleGroupError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "chest" => Ok(MuscleGroup::Chest),
            "back" => Ok(MuscleGroup::Back),
            "shoulders" => Ok(MuscleGroup::Shoulders),
            "arms" => Ok(MuscleGroup::Arms),
            "legs" => Ok(MuscleGroup::Legs),
            "core" => Ok(MuscleGroup::Core),
            _ => Err(MuscleGroupError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleGroupError {
    #[error("Unknown muscle group: {0}")]
    Unknown(String),
}
