use log::{error, info};

use super::{
    cascade::{CascadeController, CascadeEvent},
    error::PlannerError,
    inspection_service::InspectionService,
    models::api_model::TermAssignment,
    popup::{acknowledge, confirm, Popups},
    surface::{Control, Surface},
};

pub const SAVE_TERM_QUESTION: &str = "Are you sure you want to save this term?";
pub const SAVE_TERM_FAILED: &str = "Failed to save term";

/// How a save attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The user answered `No`.
    Cancelled,
    /// Something required was missing or invalid; nothing was sent.
    Incomplete,
    Failed,
}

/// `Please select:` followed by every missing picker name.
pub fn missing_selection_message(missing: &[&str]) -> String {
    missing
        .iter()
        .fold("Please select:".to_owned(), |message, name| {
            message + " " + name
        })
}

/// Page for planning a new inspection term.
#[derive(Debug, Default)]
pub struct AddTermPage {
    cascade: CascadeController,
}

impl AddTermPage {
    pub fn new() -> AddTermPage {
        AddTermPage::default()
    }

    pub fn cascade(&self) -> &CascadeController {
        &self.cascade
    }

    /// Fetches the teachers and offers them in the first picker.
    pub async fn load<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
    ) -> Result<(), PlannerError> {
        let teachers = service.teachers().await.map_err(|e| {
            error!("Error loading teachers: {}", e);
            view.set_text(Control::Message, "Failed to load teachers.");
            e
        })?;
        self.cascade.set_teachers(view, teachers);
        Ok(())
    }

    pub async fn select<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
        event: CascadeEvent,
    ) {
        self.cascade.dispatch(service, view, event).await;
    }

    pub async fn save<S: InspectionService, P: Popups>(
        &self,
        service: &S,
        popups: &mut P,
    ) -> SaveOutcome {
        let state = self.cascade.state();
        let (Some(lesson_id), Some(team_id)) = (state.lesson_id, state.team_id) else {
            acknowledge(popups, &missing_selection_message(&state.missing())).await;
            return SaveOutcome::Incomplete;
        };
        if !confirm(popups, SAVE_TERM_QUESTION).await {
            return SaveOutcome::Cancelled;
        }
        let assignment = TermAssignment {
            fk_lesson: lesson_id,
            fk_inspection_team: team_id,
        };
        match service.create_term(&assignment).await {
            Ok(()) => {
                info!("Term saved for lesson {} with team {}", lesson_id, team_id);
                SaveOutcome::Saved
            }
            Err(e) => {
                error!("Error saving term: {}", e);
                acknowledge(popups, SAVE_TERM_FAILED).await;
                SaveOutcome::Failed
            }
        }
    }
}
