use log::{debug, error, info};

use super::{
    add_term::SaveOutcome,
    error::PlannerError,
    helpers::fix_string_date,
    inspection_service::InspectionService,
    list_view::{ListEntry, ListView, SortMode},
    models::api_model::{DocumentDetail, DocumentSummary},
    popup::{acknowledge, confirm, Popups},
    surface::{Control, ListId, Surface},
    validation::{DocumentForm, DOCUMENT_FIELDS},
};

pub const SAVE_DOCUMENT_QUESTION: &str = "Do you want to save document?";
pub const SAVE_DOCUMENT_FAILED: &str = "Failed to save document";

const DETAIL_LABELS: [Control; 6] = [
    Control::InspectedName,
    Control::InspectedDepartment,
    Control::InspectionDate,
    Control::InspectedSubject,
    Control::InspectedSubjectCode,
    Control::Inspectors,
];

fn document_text(document: &DocumentSummary) -> String {
    match &document.subject_type {
        Some(kind) => format!(
            "{} {} ({}) {}",
            fix_string_date(&document.date),
            document.subject,
            kind,
            document.teacher
        ),
        None => format!(
            "{} {} {}",
            fix_string_date(&document.date),
            document.subject,
            document.teacher
        ),
    }
}

fn optional_number(value: Option<i64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

/// The seven inputs as the detail endpoint fills them.
fn form_of(detail: &DocumentDetail) -> DocumentForm {
    DocumentForm {
        lateness_minutes: optional_number(detail.lateness_minutes),
        students_attendance: optional_number(detail.student_attendance),
        room_adaptation: detail.room_adaptation.clone(),
        content_compatibility: optional_number(detail.content_compatibility),
        substantive_rating: detail.substantive_rating.clone(),
        final_rating: optional_number(detail.final_rating),
        objection: detail.objection.clone(),
    }
}

/// Page with the inspection documents and their rating form.
#[derive(Debug, Default)]
pub struct DocumentsPage {
    list: ListView,
    sort: SortMode,
    editing: Option<u32>,
}

impl DocumentsPage {
    pub fn new() -> DocumentsPage {
        DocumentsPage::default()
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn editing(&self) -> Option<u32> {
        self.editing
    }

    pub async fn load<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
    ) -> Result<(), PlannerError> {
        let documents = service.documents().await.map_err(|e| {
            error!("Error loading documents: {}", e);
            view.set_text(Control::Message, "Failed to load documents.");
            e
        })?;
        info!("Loaded {} documents", documents.len());
        self.list = ListView::new(
            documents
                .iter()
                .map(|document| ListEntry::new(document.id, &document.date, document_text(document)))
                .collect(),
        );
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

    /// Opens the rating form of a document, filled with its current values.
    pub async fn edit<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
        id: u32,
    ) -> Result<(), PlannerError> {
        for label in DETAIL_LABELS {
            view.set_text(label, "");
        }
        for (field, _, _) in DOCUMENT_FIELDS {
            view.mark_invalid(field, false);
        }
        self.editing = Some(id);
        view.set_visible(Control::Editable, true);

        let detail = match service.document_detail(id).await {
            Ok(detail) => detail,
            Err(e) => {
                error!("Error loading document {}: {}", id, e);
                view.set_text(Control::Message, "Failed to load document.");
                self.cancel(view);
                return Err(e);
            }
        };
        let inspectors = detail
            .inspectors
            .iter()
            .map(|inspector| format!("{} {}", inspector.title, inspector.name))
            .collect::<Vec<_>>()
            .join(", ");
        for (label, text) in DETAIL_LABELS.into_iter().zip([
            detail.inspected_name.clone(),
            detail.department_name.clone(),
            fix_string_date(&detail.date_of_inspection),
            detail.subject_name.clone(),
            detail.subject_code.clone(),
            inspectors,
        ]) {
            view.set_text(label, &text);
        }
        let form = form_of(&detail);
        for (field, _, _) in DOCUMENT_FIELDS {
            view.set_input_value(field, form.value(field));
        }
        debug!("Document {} opened for editing", id);
        Ok(())
    }

    /// Validates the form on the surface and, once confirmed, sends it.
    pub async fn save<S: InspectionService, V: Surface, P: Popups>(
        &mut self,
        service: &S,
        view: &mut V,
        popups: &mut P,
    ) -> SaveOutcome {
        let Some(id) = self.editing else {
            return SaveOutcome::Cancelled;
        };
        let ratings = match DocumentForm::read_from(view).validate_on(view) {
            Ok(ratings) => ratings,
            Err(report) => {
                info!("Document {} not saved: {}", id, PlannerError::Validation(report.clone()));
                acknowledge(popups, &report.popup_message()).await;
                return SaveOutcome::Incomplete;
            }
        };
        if !confirm(popups, SAVE_DOCUMENT_QUESTION).await {
            return SaveOutcome::Cancelled;
        }
        view.set_visible(Control::Editable, false);
        match service.edit_document(id, &ratings).await {
            Ok(()) => {
                self.editing = None;
                if let Err(e) = self.load(service, view).await {
                    debug!("Reload after save failed: {}", e);
                }
                SaveOutcome::Saved
            }
            Err(e) => {
                error!("Error saving document {}: {}", id, e);
                acknowledge(popups, SAVE_DOCUMENT_FAILED).await;
                SaveOutcome::Failed
            }
        }
    }

    pub fn cancel<V: Surface>(&mut self, view: &mut V) {
        self.editing = None;
        view.set_visible(Control::Editable, false);
    }
}
