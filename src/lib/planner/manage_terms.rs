//! Page listing the planned terms, with the delete and edit flows.
use chrono::NaiveDate;
use log::{debug, error, info, warn};

use super::{
    add_term::{missing_selection_message, SaveOutcome, SAVE_TERM_FAILED, SAVE_TERM_QUESTION},
    cascade::{DATE_PLACEHOLDER, TEAM_PLACEHOLDER},
    error::PlannerError,
    helpers::{fix_string_date, is_inspection_conducted, lesson_option_text, team_option_text},
    inspection_service::InspectionService,
    list_view::{ListEntry, ListView, SortMode},
    models::api_model::{Term, TermAssignment},
    popup::{acknowledge, confirm, Popups},
    surface::{Control, ListId, Picker, SelectOption, Surface},
};

pub const CONDUCTED_TERM: &str = "This term has been conducted. You cannot delete this term";
pub const DELETE_TERM_QUESTION: &str = "Are you sure you want to delete this term?";
pub const TERM_DELETED: &str = "Term deleted successfully";
pub const DELETE_TERM_FAILED: &str = "Failed to remove term";
pub const TERM_SAVED: &str = "Term saved successfully";
pub const TERM_DATE_UNREADABLE: &str = "Failed to read the date of this term";

const EDIT_LABELS: [Control; 4] = [
    Control::InspectedName,
    Control::InspectedDepartment,
    Control::InspectedSubject,
    Control::InspectedSubjectCode,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The term already took place, nothing was sent.
    Conducted,
    Cancelled,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
struct EditSession {
    term_id: u32,
    teacher_id: u32,
    lesson_id: Option<u32>,
    team_id: Option<u32>,
}

#[derive(Debug, Default)]
pub struct ManageTermsPage {
    terms: Vec<Term>,
    list: ListView,
    sort: SortMode,
    editing: Option<EditSession>,
}

fn term_text(term: &Term) -> String {
    format!(
        "{} {} {}",
        fix_string_date(&term.date),
        term.subject,
        term.teacher
    )
}

impl ManageTermsPage {
    pub fn new() -> ManageTermsPage {
        ManageTermsPage::default()
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    /// Id of the term currently open in the edit panel.
    pub fn editing(&self) -> Option<u32> {
        self.editing.as_ref().map(|session| session.term_id)
    }

    pub async fn load<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
    ) -> Result<(), PlannerError> {
        let terms = service.terms().await.map_err(|e| {
            error!("Error loading terms: {}", e);
            view.set_text(Control::Message, "Failed to load terms.");
            e
        })?;
        info!("Loaded {} terms", terms.len());
        self.list = ListView::new(
            terms
                .iter()
                .map(|term| ListEntry::new(term.id, &term.date, term_text(term)))
                .collect(),
        );
        self.terms = terms;
        self.list.sort_by_date(self.sort);
        self.list.render(view, ListId::Items);
        Ok(())
    }

    pub fn sort<V: Surface>(&mut self, view: &mut V, mode: SortMode) {
        self.sort = mode;
        self.list.sort_by_date(mode);
        self.list.render(view, ListId::Items);
    }

    pub fn filter_by_name<V: Surface>(&mut self, view: &mut V, query: &str) {
        self.list.filter_by_name(query);
        self.list.render(view, ListId::Items);
    }

    pub fn filter_by_date<V: Surface>(&mut self, view: &mut V, query: &str) {
        self.list.filter_by_date(query);
        self.list.render(view, ListId::Items);
    }

    /// Deletes a term that has not taken place yet. The list is reloaded
    /// whether the removal worked or not.
    pub async fn delete_term<S: InspectionService, V: Surface, P: Popups>(
        &mut self,
        service: &S,
        view: &mut V,
        popups: &mut P,
        id: u32,
        today: NaiveDate,
    ) -> Result<DeleteOutcome, PlannerError> {
        let Some(term) = self.terms.iter().find(|term| term.id == id) else {
            warn!("Term {} is not listed", id);
            return Ok(DeleteOutcome::Cancelled);
        };
        let conducted = match is_inspection_conducted(&term.date, today) {
            Ok(conducted) => conducted,
            Err(e) => {
                error!("Error checking term {}: {}", id, e);
                acknowledge(popups, TERM_DATE_UNREADABLE).await;
                return Ok(DeleteOutcome::Failed);
            }
        };
        if conducted {
            let conflict = PlannerError::ConductedTerm {
                id,
                date: term.date.clone(),
            };
            info!("{}", conflict);
            acknowledge(popups, CONDUCTED_TERM).await;
            return Ok(DeleteOutcome::Conducted);
        }
        if !confirm(popups, DELETE_TERM_QUESTION).await {
            return Ok(DeleteOutcome::Cancelled);
        }
        let outcome = match service.remove_term(id).await {
            Ok(()) => {
                acknowledge(popups, TERM_DELETED).await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!("Error deleting term {}: {}", id, e);
                acknowledge(popups, DELETE_TERM_FAILED).await;
                DeleteOutcome::Failed
            }
        };
        if let Err(e) = self.load(service, view).await {
            debug!("Reload after delete failed: {}", e);
        }
        Ok(outcome)
    }

    fn close_editor<V: Surface>(&mut self, view: &mut V) {
        self.editing = None;
        view.set_visible(Control::Editable, false);
        for label in EDIT_LABELS {
            view.set_text(label, "");
        }
        view.reset_options(Picker::Date, Some(DATE_PLACEHOLDER));
        view.reset_options(Picker::Team, Some(TEAM_PLACEHOLDER));
    }

    /// Opens the edit panel with the term's lesson and team preselected.
    /// The panel stays hidden if anything fails to load or a picker would be
    /// empty.
    pub async fn edit_term<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
        id: u32,
    ) -> Result<(), PlannerError> {
        self.close_editor(view);
        let Some(term) = self.terms.iter().find(|term| term.id == id).cloned() else {
            warn!("Term {} is not listed", id);
            return Ok(());
        };

        let detail = service.term_detail(term.lesson_id).await.map_err(|e| {
            error!("Error loading term {}: {}", id, e);
            view.set_text(Control::Message, "Failed to load term.");
            e
        })?;
        view.set_text(
            Control::InspectedName,
            &format!(
                "{} {} {}",
                detail.teacher_title, detail.teacher_name, detail.teacher_surname
            ),
        );
        view.set_text(Control::InspectedDepartment, &detail.department);
        view.set_text(Control::InspectedSubject, &detail.subject_name);
        view.set_text(Control::InspectedSubjectCode, &detail.subject_code);

        let lessons = service
            .lessons_with_dates(detail.teacher_id, detail.subject_id)
            .await
            .map_err(|e| {
                error!("Error loading dates for term {}: {}", id, e);
                view.set_text(Control::Message, "Failed to load dates.");
                e
            })?;
        if lessons.is_empty() {
            info!("No lessons to move term {} to", id);
            return Ok(());
        }
        view.append_options(
            Picker::Date,
            lessons
                .iter()
                .map(|lesson| SelectOption::new(lesson_option_text(lesson), lesson.id.to_string()))
                .collect(),
        );
        view.select_value(Picker::Date, Some(&term.lesson_id.to_string()));

        self.editing = Some(EditSession {
            term_id: id,
            teacher_id: detail.teacher_id,
            lesson_id: Some(term.lesson_id),
            team_id: term.team_id,
        });
        if !self.load_teams_or_close(service, view, term.lesson_id).await? {
            return Ok(());
        }
        if let Some(team_id) = term.team_id {
            view.select_value(Picker::Team, Some(&team_id.to_string()));
        }
        view.set_visible(Control::Editable, true);
        Ok(())
    }

    /// Refills the team picker for `lesson_id`; false when no team is free.
    async fn load_teams<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
        lesson_id: u32,
    ) -> Result<bool, PlannerError> {
        let Some(session) = self.editing.as_ref() else {
            return Ok(false);
        };
        view.reset_options(Picker::Team, Some(TEAM_PLACEHOLDER));
        view.select_value(Picker::Team, None);
        let teams = service
            .available_teams(session.teacher_id, lesson_id)
            .await
            .map_err(|e| {
                error!("Error loading teams for lesson {}: {}", lesson_id, e);
                view.set_text(Control::Message, "Failed to load inspection teams.");
                e
            })?;
        if teams.is_empty() {
            return Ok(false);
        }
        view.append_options(
            Picker::Team,
            teams
                .iter()
                .map(|team| {
                    SelectOption::new(team_option_text(team), team.inspection_team_id.to_string())
                })
                .collect(),
        );
        Ok(true)
    }

    /// Like `load_teams`, but the edit panel is closed when no team can be
    /// offered.
    async fn load_teams_or_close<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
        lesson_id: u32,
    ) -> Result<bool, PlannerError> {
        match self.load_teams(service, view, lesson_id).await {
            Ok(true) => Ok(true),
            Ok(false) => {
                info!("No free team for lesson {}", lesson_id);
                self.close_editor(view);
                Ok(false)
            }
            Err(e) => {
                self.close_editor(view);
                Err(e)
            }
        }
    }

    /// New lesson picked in the edit panel: the team has to be chosen again.
    pub async fn change_edit_date<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
        value: Option<String>,
    ) -> Result<(), PlannerError> {
        let Some(session) = self.editing.as_mut() else {
            return Ok(());
        };
        session.team_id = None;
        session.lesson_id = value.and_then(|value| value.parse().ok());
        let Some(lesson_id) = session.lesson_id else {
            view.reset_options(Picker::Team, Some(TEAM_PLACEHOLDER));
            view.select_value(Picker::Team, None);
            return Ok(());
        };
        self.load_teams_or_close(service, view, lesson_id).await?;
        Ok(())
    }

    pub fn change_edit_team(&mut self, value: Option<String>) {
        if let Some(session) = self.editing.as_mut() {
            session.team_id = value.and_then(|value| value.parse().ok());
        }
    }

    pub async fn save_edit<S: InspectionService, V: Surface, P: Popups>(
        &mut self,
        service: &S,
        view: &mut V,
        popups: &mut P,
    ) -> SaveOutcome {
        let Some(session) = self.editing.clone() else {
            return SaveOutcome::Cancelled;
        };
        let (Some(lesson_id), Some(team_id)) = (session.lesson_id, session.team_id) else {
            let missing = [
                (session.lesson_id.is_none(), "Date"),
                (session.team_id.is_none(), "Inspectors"),
            ]
            .into_iter()
            .filter_map(|(missing, name)| missing.then_some(name))
            .collect::<Vec<_>>();
            acknowledge(popups, &missing_selection_message(&missing)).await;
            return SaveOutcome::Incomplete;
        };
        if !confirm(popups, SAVE_TERM_QUESTION).await {
            return SaveOutcome::Cancelled;
        }
        let assignment = TermAssignment {
            fk_lesson: lesson_id,
            fk_inspection_team: team_id,
        };
        match service.edit_term(session.term_id, &assignment).await {
            Ok(()) => {
                acknowledge(popups, TERM_SAVED).await;
                self.close_editor(view);
                if let Err(e) = self.load(service, view).await {
                    debug!("Reload after edit failed: {}", e);
                }
                SaveOutcome::Saved
            }
            Err(e) => {
                error!("Error saving term {}: {}", session.term_id, e);
                acknowledge(popups, SAVE_TERM_FAILED).await;
                SaveOutcome::Failed
            }
        }
    }

    pub fn cancel_edit<V: Surface>(&mut self, view: &mut V) {
        self.close_editor(view);
    }
}
