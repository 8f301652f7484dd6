use chrono::NaiveDate;
use log::info;

use super::{
    add_term::{AddTermPage, SaveOutcome},
    cascade::CascadeEvent,
    documents::DocumentsPage,
    error::PlannerError,
    inspection_service::InspectionService,
    manage_terms::ManageTermsPage,
    models::Command,
    popup::Popups,
    schedule::SchedulePage,
    surface::{Control, ListId, Picker, Surface},
    teams::TeamsPage,
    terminal::TerminalSurface,
    validation::DocumentField,
};

const SUMMARY: [(&str, Control); 5] = [
    ("Inspected", Control::InfoInspected),
    ("Department", Control::InfoDepartment),
    ("Subject", Control::InfoSubject),
    ("Date", Control::InfoDate),
    ("Inspectors", Control::InfoInspectors),
];

const DOCUMENT_HEADER: [(&str, Control); 6] = [
    ("Inspected", Control::InspectedName),
    ("Department", Control::InspectedDepartment),
    ("Date", Control::InspectionDate),
    ("Subject", Control::InspectedSubject),
    ("Subject code", Control::InspectedSubjectCode),
    ("Inspectors", Control::Inspectors),
];

fn report_save(what: &str, outcome: SaveOutcome) {
    info!("Saving {} ended with {:?}", what, outcome);
}

/// Runs one page flow against `service`, drawing on a terminal surface.
pub async fn run<S: InspectionService, P: Popups>(
    service: &S,
    view: &mut TerminalSurface,
    popups: &mut P,
    command: Command,
    today: NaiveDate,
) -> Result<(), PlannerError> {
    match command {
        Command::Plan {
            teacher,
            subject,
            lesson,
            team,
        } => {
            let mut page = AddTermPage::new();
            page.load(service, view).await?;
            for event in [
                CascadeEvent::TeacherChanged(Some(teacher.to_string())),
                CascadeEvent::SubjectChanged(Some(subject)),
                CascadeEvent::DateChanged(Some(lesson.to_string())),
                CascadeEvent::TeamChanged(Some(team.to_string())),
            ] {
                page.select(service, view, event).await;
            }
            if view.state().is_visible(Control::Editable) {
                view.print_fields(&SUMMARY);
            }
            report_save("term", page.save(service, popups).await);
        }
        Command::Terms { sort, date, name } => {
            let mut page = ManageTermsPage::new();
            page.load(service, view).await?;
            page.sort(view, sort);
            if let Some(date) = date {
                page.filter_by_date(view, &date);
            }
            if let Some(name) = name {
                page.filter_by_name(view, &name);
            }
            view.print_list(ListId::Items);
        }
        Command::DeleteTerm { id } => {
            let mut page = ManageTermsPage::new();
            page.load(service, view).await?;
            let outcome = page.delete_term(service, view, popups, id, today).await?;
            info!("Deleting term {} ended with {:?}", id, outcome);
        }
        Command::Documents { sort, name } => {
            let mut page = DocumentsPage::new();
            page.load(service, view).await?;
            page.sort(view, sort);
            if let Some(name) = name {
                page.filter_by_name(view, &name);
            }
            view.print_list(ListId::Items);
        }
        Command::EditDocument {
            id,
            lateness,
            attendance,
            room_adaptation,
            content_compatibility,
            substantive_assessment,
            final_assessment,
            recommendation,
        } => {
            let mut page = DocumentsPage::new();
            page.edit(service, view, id).await?;
            view.print_fields(&DOCUMENT_HEADER);
            for (field, value) in [
                (DocumentField::InspectedLateness, lateness),
                (DocumentField::StudentAttendance, attendance),
                (DocumentField::RoomAdaptation, room_adaptation),
                (DocumentField::ContentCompatibility, content_compatibility),
                (DocumentField::SubstantiveAssessment, substantive_assessment),
                (DocumentField::FinalAssessment, final_assessment),
                (DocumentField::Recommendation, recommendation),
            ] {
                if let Some(value) = value {
                    view.set_input_value(field, &value);
                }
            }
            report_save("document", page.save(service, view, popups).await);
        }
        Command::Teams => {
            let mut page = TeamsPage::new();
            page.load(service, view).await?;
            for team in page.teams() {
                println!("{}", team.name);
                view.print_list(ListId::TeamMembers(team.id));
            }
        }
        Command::AddMember { team, teacher } => {
            let mut page = TeamsPage::new();
            page.add_member(service, view, team, teacher).await?;
        }
        Command::RemoveMember { team, teacher } => {
            let mut page = TeamsPage::new();
            page.remove_member(service, view, team, teacher).await?;
        }
        Command::Schedule { semester } => {
            let mut page = SchedulePage::new();
            page.load_semesters(service, view).await?;
            if let Some(semester) = semester.as_deref() {
                view.select_value(Picker::Semester, Some(semester));
            }
            page.view_schedule(service, view, semester.as_deref())
                .await?;
            if semester.is_none() {
                for semester in page.semesters() {
                    println!("{}", semester);
                }
            } else {
                view.print_list(ListId::Schedule);
            }
        }
    }
    Ok(())
}
