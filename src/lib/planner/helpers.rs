use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use log::{debug, info, warn};

use super::{
    error::PlannerError,
    models::{
        api_model::{InspectionTeam, Lesson, Member, Subject, Teacher},
        Args, Config,
    },
};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn get_config(args: &Args) -> Result<Config, PlannerError> {
    info!(
        "Reading config.json from {}",
        std::path::absolute(&args.config_json_path)
            .unwrap_or_else(|_| args.config_json_path.clone())
            .display()
    );
    let config: Config = Figment::new()
        .merge(Json::file(&args.config_json_path))
        .merge(Env::prefixed("INSPECTION_"))
        .extract()?;
    debug!(
        "Using API at {} with {}s timeout",
        config.api_base_url, config.request_timeout_secs
    );
    Ok(config)
}

/// Parses the timestamps the API hands out. Both `2025-01-01T10:00:00` and
/// `2025-01-01 10:00:00` occur, sometimes without seconds or with a fraction.
/// A bare date is read as midnight.
pub fn parse_api_time(date: &str) -> Result<NaiveDateTime, PlannerError> {
    let normalized = date.trim().replacen(' ', "T", 1);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(parsed);
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .ok_or_else(|| PlannerError::InvalidDate(date.to_owned()))
}

/// Renders an API timestamp as `YYYY-MM-DD HH:mm`, falling back to the raw
/// text when it cannot be read.
pub fn fix_string_date(date: &str) -> String {
    match parse_api_time(date) {
        Ok(parsed) => parsed.format(DISPLAY_FORMAT).to_string(),
        Err(_) => {
            warn!("Leaving unreadable date {:?} as is", date);
            date.to_owned()
        }
    }
}

/// A term is conducted once its day has come, whatever the hour.
pub fn is_inspection_conducted(date: &str, today: NaiveDate) -> Result<bool, PlannerError> {
    Ok(parse_api_time(date)?.date() <= today)
}

/* keep the first row of every subject, the rest are the same subject in other lesson slots */
pub fn remove_subjects_duplicates(subjects: Vec<Subject>) -> Vec<Subject> {
    let mut seen = HashSet::new();
    subjects
        .into_iter()
        .filter(|subject| seen.insert(subject.key()))
        .collect()
}

pub fn teacher_full_name(teacher: &Teacher) -> String {
    format!("{} {} {}", teacher.title, teacher.name, teacher.surname)
}

pub fn member_full_name(member: &Member) -> String {
    format!(
        "{} {} {}",
        member.teacher_title, member.teacher_name, member.teacher_surname
    )
}

pub fn team_option_text(team: &InspectionTeam) -> String {
    team.members
        .iter()
        .map(member_full_name)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn team_members_line(team: &InspectionTeam) -> String {
    team.members
        .iter()
        .map(member_full_name)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn lesson_location(lesson: &Lesson) -> String {
    format!("{}-{}", lesson.building, lesson.room)
}

pub fn lesson_option_text(lesson: &Lesson) -> String {
    format!(
        "{} {}",
        fix_string_date(&lesson.time),
        lesson_location(lesson)
    )
}

/// Pads every line with non-breaking spaces up to the longest one, so member
/// rows line up in proportional fonts too.
pub fn pad_names(names: &[String]) -> Vec<String> {
    let width = names
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);
    names
        .iter()
        .map(|name| {
            let padding = width - name.chars().count();
            let mut padded = name.clone();
            padded.extend(std::iter::repeat('\u{00A0}').take(padding));
            padded
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/helpers_tests.rs"]
mod tests;
