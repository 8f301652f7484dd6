//! Checks run over the inspection document form before it is submitted.
//!
//! Every field is checked, nothing short-circuits: the user gets one report
//! listing all offending fields and each of them is flagged on the surface.
use std::{fmt, num::IntErrorKind};

use log::debug;

use super::{models::api_model::DocumentRatings, surface::Surface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    NotANumber,
    BelowMinimum,
    AboveMaximum(i64),
    Empty,
    TooLong(usize),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::NotANumber => write!(f, "Value must be a number."),
            FieldError::BelowMinimum => write!(f, "Value must be greater than 0."),
            FieldError::AboveMaximum(max) => write!(f, "Value must be lower than {}.", max),
            FieldError::Empty => write!(f, "Field cannot be empty."),
            FieldError::TooLong(max) => write!(f, "Text cannot be longer than {}.", max),
        }
    }
}

pub fn check_number_input(value: &str, max: i64) -> Result<i64, FieldError> {
    let parsed = value.trim().parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => FieldError::AboveMaximum(max),
        IntErrorKind::NegOverflow => FieldError::BelowMinimum,
        _ => FieldError::NotANumber,
    })?;
    if parsed < 0 {
        Err(FieldError::BelowMinimum)
    } else if parsed > max {
        Err(FieldError::AboveMaximum(max))
    } else {
        Ok(parsed)
    }
}

pub fn check_string_input(value: &str, max: usize) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Empty)
    } else if value.chars().count() > max {
        Err(FieldError::TooLong(max))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentField {
    InspectedLateness,
    StudentAttendance,
    RoomAdaptation,
    ContentCompatibility,
    SubstantiveAssessment,
    FinalAssessment,
    Recommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Numeric(i64),
    Text(usize),
}

/// The document form, in the order fields are shown and reported.
pub const DOCUMENT_FIELDS: [(DocumentField, &str, Rule); 7] = [
    (
        DocumentField::InspectedLateness,
        "Inspected Lateness",
        Rule::Numeric(240),
    ),
    (
        DocumentField::StudentAttendance,
        "Student Attendance",
        Rule::Numeric(500),
    ),
    (
        DocumentField::RoomAdaptation,
        "Room Adaptation",
        Rule::Text(500),
    ),
    (
        DocumentField::ContentCompatibility,
        "Content Compatibility",
        Rule::Numeric(100),
    ),
    (
        DocumentField::SubstantiveAssessment,
        "Substantive Assessment",
        Rule::Text(500),
    ),
    (
        DocumentField::FinalAssessment,
        "Final Assessment",
        Rule::Numeric(100),
    ),
    (
        DocumentField::Recommendation,
        "Recommendation",
        Rule::Text(100),
    ),
];

impl Rule {
    pub fn check(self, value: &str) -> Result<(), FieldError> {
        match self {
            Rule::Numeric(max) => check_number_input(value, max).map(|_| ()),
            Rule::Text(max) => check_string_input(value, max),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    pub field: DocumentField,
    pub label: &'static str,
    pub error: FieldError,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub failures: Vec<FieldFailure>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn popup_message(&self) -> String {
        format!("Invalid input data!\n{}", self)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .failures
            .iter()
            .map(|failure| format!("{}: {}", failure.label, failure.error))
            .collect::<Vec<_>>();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Raw text of the seven document inputs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentForm {
    pub lateness_minutes: String,
    pub students_attendance: String,
    pub room_adaptation: String,
    pub content_compatibility: String,
    pub substantive_rating: String,
    pub final_rating: String,
    pub objection: String,
}

impl DocumentForm {
    pub fn value(&self, field: DocumentField) -> &str {
        match field {
            DocumentField::InspectedLateness => &self.lateness_minutes,
            DocumentField::StudentAttendance => &self.students_attendance,
            DocumentField::RoomAdaptation => &self.room_adaptation,
            DocumentField::ContentCompatibility => &self.content_compatibility,
            DocumentField::SubstantiveAssessment => &self.substantive_rating,
            DocumentField::FinalAssessment => &self.final_rating,
            DocumentField::Recommendation => &self.objection,
        }
    }

    pub fn read_from<V: Surface>(view: &V) -> DocumentForm {
        DocumentForm {
            lateness_minutes: view.input_value(DocumentField::InspectedLateness),
            students_attendance: view.input_value(DocumentField::StudentAttendance),
            room_adaptation: view.input_value(DocumentField::RoomAdaptation),
            content_compatibility: view.input_value(DocumentField::ContentCompatibility),
            substantive_rating: view.input_value(DocumentField::SubstantiveAssessment),
            final_rating: view.input_value(DocumentField::FinalAssessment),
            objection: view.input_value(DocumentField::Recommendation),
        }
    }

    pub fn validate(&self) -> ValidationReport {
        let failures = DOCUMENT_FIELDS
            .iter()
            .filter_map(|&(field, label, rule)| {
                rule.check(self.value(field))
                    .err()
                    .map(|error| FieldFailure {
                        field,
                        label,
                        error,
                    })
            })
            .collect::<Vec<_>>();
        debug!("Document form has {} invalid field(s)", failures.len());
        ValidationReport { failures }
    }

    /// Validates, flags every field on the surface and converts the form into
    /// the edit payload when nothing failed.
    pub fn validate_on<V: Surface>(&self, view: &mut V) -> Result<DocumentRatings, ValidationReport> {
        let report = self.validate();
        for (field, _, _) in DOCUMENT_FIELDS.iter() {
            let invalid = report.failures.iter().any(|failure| failure.field == *field);
            view.mark_invalid(*field, invalid);
        }
        if !report.is_valid() {
            return Err(report);
        }
        self.to_ratings().ok_or(report)
    }

    fn to_ratings(&self) -> Option<DocumentRatings> {
        Some(DocumentRatings {
            lateness_minutes: self.lateness_minutes.trim().parse().ok()?,
            students_attendance: self.students_attendance.trim().parse().ok()?,
            room_adaptation: self.room_adaptation.clone(),
            content_compatibility: self.content_compatibility.trim().parse().ok()?,
            substantive_rating: self.substantive_rating.clone(),
            final_rating: self.final_rating.trim().parse().ok()?,
            objection: self.objection.clone(),
        })
    }
}
