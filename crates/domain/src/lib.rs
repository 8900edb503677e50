#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod autoregulation;
pub mod catalog;
mod error;
mod exercise;
pub mod metrics;
mod name;
mod program;
mod resolver;
pub mod scheduler;
mod service;
mod session;
#[cfg(test)]
pub mod testing;
mod training;

pub use autoregulation::{
    Decision, ExerciseKind, ExercisePerformance, PerformedSet, Recommendation,
    RecommendationContext, RecommendationError, recommend,
};
pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError};
pub use exercise::{
    Exercise, ExerciseAlias, ExerciseID, ExerciseRepository, MuscleGroup, MuscleGroupError,
};
pub use metrics::{
    ExerciseMetrics, OneRepMaxEstimate, OneRepMaxTrend, SetRow, VolumeTotals, progression_metrics,
};
pub use name::{Name, NameError, Slug};
pub use program::{ProgramSession, ProgramSet, ProgramTemplate, ProgramWeek};
pub use resolver::{ResolutionCache, resolve};
pub use scheduler::{PlannedSession, Schedule, ScheduleError, plan};
pub use service::{ApplyError, ApplyOutcome, Service};
pub use session::{
    Session, SessionID, SessionRepository, Set, SetEntry, SetID, SetPatch, UserID,
};
pub use training::{
    FatigueScore, FatigueScoreError, Load, LoadError, LoadIncrement, LoadIncrementError, RepRange,
    RepRangeError, Reps, RepsError, Rir, RirError,
};
