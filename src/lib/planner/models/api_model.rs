//! Module with models compatible with the inspection API's REST endpoints
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct Teacher {
    pub id: u32,
    pub title: String,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub department: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct Subject {
    #[serde(default)]
    pub subject_id: u32,
    pub subject_name: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub subject_code: String,
    #[serde(default)]
    pub subject_type: Option<String>,
}

/// Identity used to tell subjects apart. Lessons of one subject in several
/// slots come back as separate rows with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubjectKey {
    Id(u32),
    Code(String),
}

impl Subject {
    pub fn key(&self) -> SubjectKey {
        if self.subject_id != 0 {
            SubjectKey::Id(self.subject_id)
        } else {
            SubjectKey::Code(self.subject_code.clone())
        }
    }

    /// Value carried by the subject picker option.
    pub fn option_value(&self) -> String {
        match self.key() {
            SubjectKey::Id(id) => id.to_string(),
            SubjectKey::Code(code) => code,
        }
    }
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct Lesson {
    pub id: u32,
    pub time: String,
    pub building: String,
    pub room: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct Member {
    #[serde(default)]
    pub teacher_id: Option<u32>,
    pub teacher_title: String,
    pub teacher_name: String,
    pub teacher_surname: String,
    #[serde(default)]
    pub teacher_department: Option<String>,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct InspectionTeam {
    pub inspection_team_id: u32,
    #[serde(default)]
    pub inspection_team_name: Option<String>,
    pub members: Vec<Member>,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct Term {
    pub id: u32,
    pub date: String,
    pub subject: String,
    #[serde(default)]
    pub subject_type: Option<String>,
    pub teacher: String,
    pub teacher_id: u32,
    pub lesson_id: u32,
    #[serde(default)]
    pub team_id: Option<u32>,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct TermDetail {
    pub lesson_id: u32,
    pub subject_id: u32,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub subject_code: String,
    pub subject_name: String,
    #[serde(default)]
    pub subject_type: String,
    pub teacher_id: u32,
    pub teacher_name: String,
    pub teacher_surname: String,
    pub teacher_title: String,
    #[serde(default)]
    pub department: String,
    pub time: String,
    pub room: String,
    pub building: String,
}

/// Body of the term create and edit requests.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct TermAssignment {
    pub fk_lesson: u32,
    #[serde(rename = "fk_inspectionTeam")]
    pub fk_inspection_team: u32,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct DocumentSummary {
    pub id: u32,
    pub date: String,
    pub subject: String,
    #[serde(default)]
    pub subject_type: Option<String>,
    pub teacher: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct Inspector {
    pub title: String,
    pub name: String,
    #[serde(default)]
    pub surname: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct DocumentDetail {
    pub inspected_name: String,
    #[serde(default)]
    pub department_name: String,
    pub date_of_inspection: String,
    pub subject_name: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub subject_code: String,
    #[serde(default)]
    pub inspectors: Vec<Inspector>,
    #[serde(default)]
    pub lateness_minutes: Option<i64>,
    #[serde(default, alias = "students_attendance")]
    pub student_attendance: Option<i64>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub room_adaptation: String,
    #[serde(default)]
    pub content_compatibility: Option<i64>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub substantive_rating: String,
    #[serde(default)]
    pub final_rating: Option<i64>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub objection: String,
}

/// Body of the document edit request, built from a validated form.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct DocumentRatings {
    pub lateness_minutes: i64,
    pub students_attendance: i64,
    pub room_adaptation: String,
    pub content_compatibility: i64,
    pub substantive_rating: String,
    pub final_rating: i64,
    pub objection: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct TeamSummary {
    pub id: u32,
    pub name: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct TeamDetails {
    pub id: u32,
    pub name: String,
    pub teachers: Vec<Teacher>,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct TeamMemberChange {
    pub teacher_id: u32,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct PersonName {
    pub title: String,
    pub name: String,
    pub surname: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct ScheduleLesson {
    pub time: String,
    pub room: String,
    pub building: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct ScheduleSubject {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub lesson: ScheduleLesson,
    pub subject: ScheduleSubject,
    pub teacher: PersonName,
    #[serde(default)]
    pub inspection_team: Vec<PersonName>,
}

/* the API is loose about some scalar columns: codes come back as numbers,
free text may come back as null or bool */
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
