use liftlog_domain as domain;
use serde::Deserialize;
use thiserror::Error;

/// JSON shape of an authored program template. Current documents
/// carry `weeks`; legacy documents carry a flat `days` list that is
/// treated as a single implicit week.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateDoc {
    id: String,
    name: String,
    #[serde(default)]
    goal: String,
    duration_weeks: u32,
    days_per_week: u32,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    weeks: Vec<WeekDoc>,
    #[serde(default)]
    days: Vec<SessionDoc>,
}

#[derive(Debug, Deserialize)]
struct WeekDoc {
    sessions: Vec<SessionDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionDoc {
    #[serde(default)]
    title: String,
    fatigue_score: Option<u8>,
    sets: Vec<SetDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetDoc {
    exercise_code: String,
    reps: Option<u32>,
    rir: Option<u8>,
    tempo: Option<String>,
    #[serde(default)]
    is_test_set: bool,
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to parse template document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid template name: {0}")]
    Name(#[from] domain::NameError),
    #[error("invalid reps value: {0}")]
    Reps(#[from] domain::RepsError),
    #[error("invalid RIR value: {0}")]
    Rir(#[from] domain::RirError),
    #[error("invalid fatigue score: {0}")]
    FatigueScore(#[from] domain::FatigueScoreError),
}

pub fn parse_template(json: &str) -> Result<domain::ProgramTemplate, TemplateError> {
    let doc: TemplateDoc = serde_json::from_str(json)?;
    doc.try_into()
}

/// The bundled six week push/pull/legs starter program.
pub fn starter_template() -> Result<domain::ProgramTemplate, TemplateError> {
    parse_template(include_str!("templates/starter.json"))
}

impl TryFrom<TemplateDoc> for domain::ProgramTemplate {
    type Error = TemplateError;

    fn try_from(doc: TemplateDoc) -> Result<Self, Self::Error> {
        Ok(domain::ProgramTemplate {
            id: doc.id,
            name: domain::Name::new(&doc.name)?,
            goal: doc.goal,
            duration_weeks: doc.duration_weeks,
            days_per_week: doc.days_per_week,
            notes: doc.notes,
            weeks: doc
                .weeks
                .into_iter()
                .map(|week| {
                    Ok(domain::ProgramWeek {
                        sessions: convert_sessions(week.sessions)?,
                    })
                })
                .collect::<Result<_, TemplateError>>()?,
            days: convert_sessions(doc.days)?,
        })
    }
}

fn convert_sessions(
    sessions: Vec<SessionDoc>,
) -> Result<Vec<domain::ProgramSession>, TemplateError> {
    sessions
        .into_iter()
        .map(|session| {
            Ok(domain::ProgramSession {
                title: session.title,
                fatigue_score: session
                    .fatigue_score
                    .map(domain::FatigueScore::new)
                    .transpose()?,
                sets: session
                    .sets
                    .into_iter()
                    .map(|set| {
                        Ok(domain::ProgramSet {
                            exercise_code: set.exercise_code,
                            reps: set.reps.map(domain::Reps::new).transpose()?,
                            rir: set.rir.map(domain::Rir::new).transpose()?,
                            tempo: set.tempo,
                            is_test_set: set.is_test_set,
                        })
                    })
                    .collect::<Result<_, TemplateError>>()?,
            })
        })
        .collect()
}
