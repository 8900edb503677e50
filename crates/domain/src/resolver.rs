use std::collections::BTreeMap;

use crate::{Exercise, ExerciseRepository, ReadError, Slug};

/// Memoized resolutions for a single materialization call.
///
/// Keyed by the raw input string so the case-sensitive exact-name
/// tier keeps its priority. Misses are memoized as well. The cache is
/// request-local state and must not be shared across calls.
#[derive(Debug, Default)]
pub struct ResolutionCache(BTreeMap<String, Option<Exercise>>);

impl ResolutionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resolve a human-entered name or terse code to a canonical
/// exercise. `Ok(None)` signals a miss; the caller decides whether
/// that is fatal.
///
/// Lookup order, first hit wins:
///
/// 1. exact, case-sensitive match on the stored name
/// 2. match on the slug of the normalized input
/// 3. match on an alias of the normalized input
pub async fn resolve<R: ExerciseRepository>(
    repository: &R,
    cache: &mut ResolutionCache,
    name_or_code: &str,
) -> Result<Option<Exercise>, ReadError> {
    if let Some(cached) = cache.0.get(name_or_code) {
        return Ok(cached.clone());
    }

    let resolved = lookup(repository, name_or_code).await?;
    cache.0.insert(name_or_code.to_string(), resolved.clone());

    Ok(resolved)
}

async fn lookup<R: ExerciseRepository>(
    repository: &R,
    name_or_code: &str,
) -> Result<Option<Exercise>, ReadError> {
    if let Some(exercise) = repository.read_exercise_by_name(name_or_code).await? {
        return Ok(Some(exercise));
    }

    let slug = Slug::new(name_or_code);

    if let Some(exercise) = repository.read_exercise_by_slug(&slug).await? {
        return Ok(Some(exercise));
    }

    if let Some(alias) = repository.read_alias(&slug).await? {
        return repository.read_exercise(alias.exercise_id).await;
    }

    Ok(None)
}
