use crate::MuscleGroup;

/// Seed definition for a canonical exercise: display name, canonical
/// code (stored as the slug) and the alternative spellings that should
/// resolve to it.
#[derive(Clone)]
pub struct CatalogExercise {
    pub name: &'static str,
    pub code: &'static str,
    pub muscle_group: MuscleGroup,
    pub aliases: &'static [&'static str],
}

pub static EXERCISES: [CatalogExercise; 20] = [
    CatalogExercise {
        name: "Flat Barbell Bench Press",
        code: "bench_barbell_flat",
        muscle_group: MuscleGroup::Chest,
        aliases: &["bench press", "barbell bench", "flat bench"],
    },
    CatalogExercise {
        name: "Barbell Back Squat",
        code: "squat_barbell_back",
        muscle_group: MuscleGroup::Legs,
        aliases: &["squat", "back squat", "barbell squat"],
    },
    CatalogExercise {
        name: "DB Lateral Raise",
        code: "lateral_raise",
        muscle_group: MuscleGroup::Shoulders,
        aliases: &["side laterals", "dumbbell lateral raise", "laterals"],
    },
    CatalogExercise {
        name: "Incline DB Press",
        code: "db_press_incline",
        muscle_group: MuscleGroup::Chest,
        aliases: &["incline dumbbell press", "incline press"],
    },
    CatalogExercise {
        name: "Cable Fly",
        code: "cable_fly",
        muscle_group: MuscleGroup::Chest,
        aliases: &["cable crossover", "pec fly"],
    },
    CatalogExercise {
        name: "Triceps Pushdown",
        code: "triceps_pushdown",
        muscle_group: MuscleGroup::Arms,
        aliases: &["cable pushdown", "rope pushdown"],
    },
    CatalogExercise {
        name: "Neutral-Grip Pulldown",
        code: "pulldown_neutral",
        muscle_group: MuscleGroup::Back,
        aliases: &["neutral pulldown"],
    },
    CatalogExercise {
        name: "Lat Pulldown",
        code: "pulldown_normal",
        muscle_group: MuscleGroup::Back,
        aliases: &["pulldown", "wide grip pulldown"],
    },
    CatalogExercise {
        name: "Chest-Supported DB Row",
        code: "db_row_supported",
        muscle_group: MuscleGroup::Back,
        aliases: &["chest supported row", "seal row"],
    },
    CatalogExercise {
        name: "Seated Cable Row",
        code: "seated_cable_row",
        muscle_group: MuscleGroup::Back,
        aliases: &["cable row"],
    },
    CatalogExercise {
        name: "Incline Rear-Delt Raise",
        code: "rear_delt_raise_inc",
        muscle_group: MuscleGroup::Shoulders,
        aliases: &["rear delt raise", "reverse fly"],
    },
    CatalogExercise {
        name: "EZ-Bar Curl",
        code: "ez_bar_curl",
        muscle_group: MuscleGroup::Arms,
        aliases: &["ez curl", "barbell curl"],
    },
    CatalogExercise {
        name: "Hammer Curl",
        code: "hammer_curl",
        muscle_group: MuscleGroup::Arms,
        aliases: &["db hammer curl"],
    },
    CatalogExercise {
        name: "Hack Squat",
        code: "hack_squat",
        muscle_group: MuscleGroup::Legs,
        aliases: &["machine hack squat"],
    },
    CatalogExercise {
        name: "Leg Extension",
        code: "leg_extension",
        muscle_group: MuscleGroup::Legs,
        aliases: &["quad extension"],
    },
    CatalogExercise {
        name: "Lying Leg Curl",
        code: "lying_leg_curl",
        muscle_group: MuscleGroup::Legs,
        aliases: &["leg curl", "hamstring curl"],
    },
    CatalogExercise {
        name: "Barbell Romanian Deadlift",
        code: "rdl_barbell",
        muscle_group: MuscleGroup::Legs,
        aliases: &["rdl", "romanian deadlift"],
    },
    CatalogExercise {
        name: "Machine Hip Thrust",
        code: "hip_thrust_machine",
        muscle_group: MuscleGroup::Legs,
        aliases: &["hip thrust"],
    },
    CatalogExercise {
        name: "Leg Press Calf Raise",
        code: "leg_press_calf",
        muscle_group: MuscleGroup::Legs,
        aliases: &["calf press"],
    },
    CatalogExercise {
        name: "Rope Crunch",
        code: "rope_crunch",
        muscle_group: MuscleGroup::Core,
        aliases: &["cable crunch"],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::Slug;

    use super::*;

    #[test]
    fn test_codes_are_slugged_and_unique() {
        let mut codes = BTreeSet::new();
        for exercise in &EXERCISES {
            assert_eq!(Slug::new(exercise.code).as_ref(), exercise.code);
            assert!(codes.insert(exercise.code), "duplicate code {}", exercise.code);
        }
    }

    #[test]
    fn test_aliases_never_equal_their_own_code() {
        for exercise in &EXERCISES {
            for alias in exercise.aliases {
                assert_ne!(
                    Slug::new(alias).as_ref(),
                    exercise.code,
                    "redundant alias {alias} on {}",
                    exercise.code
                );
            }
        }
    }
}
