use std::collections::BTreeSet;

use crate::{FatigueScore, Name, Reps, Rir};

/// Authored multi-week training template. Read-only domain data; the
/// scheduler turns it into dated sessions and sets.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramTemplate {
    pub id: String,
    pub name: Name,
    pub goal: String,
    pub duration_weeks: u32,
    pub days_per_week: u32,
    pub notes: String,
    pub weeks: Vec<ProgramWeek>,
    /// Legacy flat layout, used only when `weeks` is empty.
    pub days: Vec<ProgramSession>,
}

impl ProgramTemplate {
    /// Sessions in schedule order: week order, then session order
    /// within each week, falling back to the legacy `days` list.
    #[must_use]
    pub fn flattened_sessions(&self) -> Vec<&ProgramSession> {
        if self.weeks.is_empty() {
            self.days.iter().collect()
        } else {
            self.weeks
                .iter()
                .flat_map(|week| week.sessions.iter())
                .collect()
        }
    }

    /// Distinct non-empty exercise codes referenced anywhere in the
    /// template.
    #[must_use]
    pub fn exercise_codes(&self) -> BTreeSet<&str> {
        self.flattened_sessions()
            .iter()
            .flat_map(|session| session.sets.iter())
            .map(|set| set.exercise_code.as_str())
            .filter(|code| !code.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramWeek {
    pub sessions: Vec<ProgramSession>,
}

/// One prescribed training day. An empty title means the template
/// name is used as the session label.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSession {
    pub title: String,
    pub fatigue_score: Option<FatigueScore>,
    pub sets: Vec<ProgramSet>,
}

/// One set prescription. Load is intentionally absent; the user fills
/// it in during the session.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSet {
    pub exercise_code: String,
    pub reps: Option<Reps>,
    pub rir: Option<Rir>,
    pub tempo: Option<String>,
    pub is_test_set: bool,
}
