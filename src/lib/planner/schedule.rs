use log::{error, info};

use super::{
    error::PlannerError,
    inspection_service::InspectionService,
    models::api_model::{PersonName, ScheduleEntry},
    surface::{Control, ListId, ListItem, Picker, SelectOption, Surface},
};

pub const NO_SEMESTER: &str = "Please select a semester.";
pub const SCHEDULE_FAILED: &str = "An error occurred while fetching the schedule. Please try again.";

fn person(name: &PersonName) -> String {
    format!("{} {} {}", name.title, name.name, name.surname)
}

/// One line per schedule entry: teacher, subject, time, place and inspectors.
pub fn schedule_text(entry: &ScheduleEntry) -> String {
    format!(
        "Teacher: {} | Subject: {} ({}) | Time: {} | Location: Room {}, Building {} | Inspection Team: {}",
        person(&entry.teacher),
        entry.subject.name,
        entry.subject.kind,
        entry.lesson.time,
        entry.lesson.room,
        entry.lesson.building,
        entry
            .inspection_team
            .iter()
            .map(person)
            .collect::<Vec<_>>()
            .join(", ")
    )
}

#[derive(Debug, Default)]
pub struct SchedulePage {
    semesters: Vec<String>,
}

impl SchedulePage {
    pub fn new() -> SchedulePage {
        SchedulePage::default()
    }

    pub fn semesters(&self) -> &[String] {
        &self.semesters
    }

    pub async fn load_semesters<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
    ) -> Result<(), PlannerError> {
        let semesters = service.semesters().await.map_err(|e| {
            error!("Error loading semesters: {}", e);
            view.set_text(Control::Message, "Failed to load semesters.");
            e
        })?;
        view.reset_options(Picker::Semester, None);
        view.append_options(
            Picker::Semester,
            semesters
                .iter()
                .map(|semester| SelectOption::new(semester.as_str(), semester.as_str()))
                .collect(),
        );
        view.select_value(Picker::Semester, None);
        self.semesters = semesters;
        Ok(())
    }

    pub async fn view_schedule<S: InspectionService, V: Surface>(
        &self,
        service: &S,
        view: &mut V,
        semester: Option<&str>,
    ) -> Result<(), PlannerError> {
        let Some(semester) = semester.filter(|semester| !semester.is_empty()) else {
            view.set_text(Control::Message, NO_SEMESTER);
            view.set_visible(Control::ScheduleList, false);
            return Ok(());
        };
        let schedule = service.schedule(semester).await.map_err(|e| {
            error!("Error loading schedule of {}: {}", semester, e);
            view.set_text(Control::Message, SCHEDULE_FAILED);
            e
        })?;
        if schedule.is_empty() {
            view.set_text(
                Control::Message,
                &format!("No scheduled inspections for {}.", semester),
            );
            view.set_visible(Control::ScheduleList, false);
            return Ok(());
        }
        info!("{} inspections scheduled in {}", schedule.len(), semester);
        view.set_text(Control::Message, "");
        view.set_text(Control::ChosenSemester, semester);
        view.render_list(
            ListId::Schedule,
            schedule
                .iter()
                .enumerate()
                .map(|(index, entry)| ListItem {
                    key: index.to_string(),
                    text: schedule_text(entry),
                    visible: true,
                })
                .collect(),
        );
        view.set_visible(Control::ScheduleList, true);
        Ok(())
    }
}
