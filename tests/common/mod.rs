#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

use lib::planner::error::PlannerError;
use lib::planner::inspection_service::InspectionService;
use lib::planner::models::api_model::{
    DocumentDetail, DocumentRatings, DocumentSummary, InspectionTeam, Lesson, ScheduleEntry,
    Subject, Teacher, TeamDetails, TeamSummary, Term, TermAssignment, TermDetail,
};
use lib::planner::popup::{Popup, Popups};
use reqwest::StatusCode;
use serde::Deserialize;

/// Canned answers of the inspection API. Maps are keyed the way the
/// endpoints are addressed, e.g. `"teacher/lesson"`.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ApiData {
    pub teachers: Vec<Teacher>,
    pub subjects: HashMap<String, Vec<Subject>>,
    pub lessons: HashMap<String, Vec<Lesson>>,
    pub available_teams: HashMap<String, Vec<InspectionTeam>>,
    pub teams: Vec<TeamSummary>,
    pub team_details: HashMap<String, TeamDetails>,
    pub terms: Vec<Term>,
    pub term_details: HashMap<String, TermDetail>,
    pub documents: Vec<DocumentSummary>,
    pub document_details: HashMap<String, DocumentDetail>,
    pub schedule: HashMap<String, Vec<ScheduleEntry>>,
    pub semesters: Vec<String>,
}

pub struct TestService {
    pub data: ApiData,
    pub calls: RefCell<Vec<String>>,
    pub created_terms: RefCell<Vec<TermAssignment>>,
    pub edited_terms: RefCell<Vec<(u32, TermAssignment)>>,
    pub edited_documents: RefCell<Vec<(u32, DocumentRatings)>>,
    failing: RefCell<HashSet<String>>,
}

impl TestService {
    pub fn new(fixture_path: &str) -> TestService {
        let data = std::fs::read_to_string(fixture_path).unwrap();
        TestService {
            data: serde_json::from_str(&data).unwrap(),
            calls: RefCell::new(Vec::new()),
            created_terms: RefCell::new(Vec::new()),
            edited_terms: RefCell::new(Vec::new()),
            edited_documents: RefCell::new(Vec::new()),
            failing: RefCell::new(HashSet::new()),
        }
    }

    pub fn from_fixture() -> TestService {
        TestService::new("tests/test.api.json")
    }

    /// Every later call of `endpoint` answers 500.
    pub fn fail(&self, endpoint: &str) {
        self.failing.borrow_mut().insert(endpoint.to_owned());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, endpoint: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.split(' ').next() == Some(endpoint))
            .count()
    }

    fn hit(&self, endpoint: &str, args: String) -> Result<(), PlannerError> {
        self.calls
            .borrow_mut()
            .push(format!("{} {}", endpoint, args).trim_end().to_owned());
        if self.failing.borrow().contains(endpoint) {
            return Err(PlannerError::Status {
                url: format!("http://test/{}", endpoint),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        Ok(())
    }

    fn not_found(endpoint: &str) -> PlannerError {
        PlannerError::Status {
            url: format!("http://test/{}", endpoint),
            status: StatusCode::NOT_FOUND,
        }
    }
}

impl InspectionService for TestService {
    async fn teachers(&self) -> Result<Vec<Teacher>, PlannerError> {
        self.hit("teachers", String::new())?;
        Ok(self.data.teachers.clone())
    }

    async fn unique_subjects(&self, teacher_id: u32) -> Result<Vec<Subject>, PlannerError> {
        self.hit("unique_subjects", teacher_id.to_string())?;
        Ok(self
            .data
            .subjects
            .get(&teacher_id.to_string())
            .cloned()
            .unwrap_or_default())
    }

    async fn lessons_with_dates(
        &self,
        teacher_id: u32,
        subject_id: u32,
    ) -> Result<Vec<Lesson>, PlannerError> {
        let key = format!("{}/{}", teacher_id, subject_id);
        self.hit("lessons_with_dates", key.clone())?;
        Ok(self.data.lessons.get(&key).cloned().unwrap_or_default())
    }

    async fn available_teams(
        &self,
        teacher_id: u32,
        lesson_id: u32,
    ) -> Result<Vec<InspectionTeam>, PlannerError> {
        let key = format!("{}/{}", teacher_id, lesson_id);
        self.hit("available_teams", key.clone())?;
        Ok(self
            .data
            .available_teams
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    async fn teams(&self) -> Result<Vec<TeamSummary>, PlannerError> {
        self.hit("teams", String::new())?;
        Ok(self.data.teams.clone())
    }

    async fn team_details(&self, team_id: u32) -> Result<TeamDetails, PlannerError> {
        self.hit("team_details", team_id.to_string())?;
        self.data
            .team_details
            .get(&team_id.to_string())
            .cloned()
            .ok_or_else(|| TestService::not_found("team_details"))
    }

    async fn add_teacher_to_team(
        &self,
        team_id: u32,
        teacher_id: u32,
    ) -> Result<(), PlannerError> {
        self.hit("add_teacher_to_team", format!("{} {}", team_id, teacher_id))
    }

    async fn remove_teacher_from_team(
        &self,
        team_id: u32,
        teacher_id: u32,
    ) -> Result<(), PlannerError> {
        self.hit(
            "remove_teacher_from_team",
            format!("{} {}", team_id, teacher_id),
        )
    }

    async fn create_term(&self, assignment: &TermAssignment) -> Result<(), PlannerError> {
        self.hit("create_term", String::new())?;
        self.created_terms.borrow_mut().push(assignment.clone());
        Ok(())
    }

    async fn terms(&self) -> Result<Vec<Term>, PlannerError> {
        self.hit("terms", String::new())?;
        Ok(self.data.terms.clone())
    }

    async fn term_detail(&self, id: u32) -> Result<TermDetail, PlannerError> {
        self.hit("term_detail", id.to_string())?;
        self.data
            .term_details
            .get(&id.to_string())
            .cloned()
            .ok_or_else(|| TestService::not_found("term_detail"))
    }

    async fn edit_term(&self, id: u32, assignment: &TermAssignment) -> Result<(), PlannerError> {
        self.hit("edit_term", id.to_string())?;
        self.edited_terms
            .borrow_mut()
            .push((id, assignment.clone()));
        Ok(())
    }

    async fn remove_term(&self, id: u32) -> Result<(), PlannerError> {
        self.hit("remove_term", id.to_string())
    }

    async fn documents(&self) -> Result<Vec<DocumentSummary>, PlannerError> {
        self.hit("documents", String::new())?;
        Ok(self.data.documents.clone())
    }

    async fn document_detail(&self, id: u32) -> Result<DocumentDetail, PlannerError> {
        self.hit("document_detail", id.to_string())?;
        self.data
            .document_details
            .get(&id.to_string())
            .cloned()
            .ok_or_else(|| TestService::not_found("document_detail"))
    }

    async fn edit_document(&self, id: u32, ratings: &DocumentRatings) -> Result<(), PlannerError> {
        self.hit("edit_document", id.to_string())?;
        self.edited_documents
            .borrow_mut()
            .push((id, ratings.clone()));
        Ok(())
    }

    async fn schedule(&self, semester: &str) -> Result<Vec<ScheduleEntry>, PlannerError> {
        self.hit("schedule", semester.to_owned())?;
        Ok(self
            .data
            .schedule
            .get(semester)
            .cloned()
            .unwrap_or_default())
    }

    async fn semesters(&self) -> Result<Vec<String>, PlannerError> {
        self.hit("semesters", String::new())?;
        Ok(self.data.semesters.clone())
    }
}

/// Answers popups from a script. Popups with a single button are clicked
/// without using up an answer; once the script runs out, popups are dismissed.
#[derive(Default)]
pub struct TestPopups {
    pub answers: VecDeque<Option<usize>>,
    pub shown: Vec<Popup>,
}

impl TestPopups {
    pub fn answering(answers: &[Option<usize>]) -> TestPopups {
        TestPopups {
            answers: answers.iter().copied().collect(),
            shown: Vec::new(),
        }
    }

    pub fn yes() -> TestPopups {
        TestPopups::answering(&[Some(0)])
    }

    pub fn no() -> TestPopups {
        TestPopups::answering(&[Some(1)])
    }

    pub fn messages(&self) -> Vec<&str> {
        self.shown.iter().map(|popup| popup.message()).collect()
    }
}

impl Popups for TestPopups {
    async fn show(&mut self, popup: Popup) -> Option<usize> {
        let single = popup.buttons().len() == 1;
        self.shown.push(popup);
        if single {
            return Some(0);
        }
        self.answers.pop_front().flatten()
    }
}
