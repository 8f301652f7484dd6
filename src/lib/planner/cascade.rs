//! Cascading pickers: teacher → subject → date → inspection team.
//!
//! Choosing at one level wipes everything below it and asks the service for
//! the next level's options. Transitions are synchronous: [`CascadeController::update`]
//! applies an event to the surface and returns the request the caller should
//! run; the answer comes back as another event. Every request carries a
//! [`Ticket`] and answers holding an outdated ticket are dropped, so a slow
//! reply for a previous teacher can never fill the pickers of the current one.
use log::{debug, error, info, warn};

use super::{
    error::PlannerError,
    helpers::{
        fix_string_date, lesson_location, lesson_option_text, remove_subjects_duplicates,
        team_members_line, team_option_text, teacher_full_name,
    },
    inspection_service::InspectionService,
    models::api_model::{InspectionTeam, Lesson, Subject, Teacher},
    surface::{Control, Picker, SelectOption, Surface, RESULT_FIELDS},
};

pub const TEACHER_PLACEHOLDER: &str = "Select Inspected";
pub const SUBJECT_PLACEHOLDER: &str = "Select Subject";
pub const DATE_PLACEHOLDER: &str = "Select Date";
pub const TEAM_PLACEHOLDER: &str = "Select Inspectors";

/// Picker levels whose options come from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Subject = 0,
    Date = 1,
    Team = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub level: Level,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStage {
    Empty,
    TeacherChosen,
    SubjectChosen,
    DateChosen,
    TeamChosen,
}

/// What has been picked so far, plus the texts shown in the summary panel.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SelectionState {
    pub teacher_id: Option<u32>,
    pub subject_id: Option<u32>,
    pub lesson_id: Option<u32>,
    pub team_id: Option<u32>,
    pub teacher: String,
    pub department: String,
    pub subject: String,
    pub subject_code: String,
    pub date: String,
    pub building: String,
    pub team: String,
}

impl SelectionState {
    pub fn stage(&self) -> CascadeStage {
        match (
            self.teacher_id,
            self.subject_id,
            self.lesson_id,
            self.team_id,
        ) {
            (Some(_), Some(_), Some(_), Some(_)) => CascadeStage::TeamChosen,
            (Some(_), Some(_), Some(_), None) => CascadeStage::DateChosen,
            (Some(_), Some(_), None, _) => CascadeStage::SubjectChosen,
            (Some(_), None, _, _) => CascadeStage::TeacherChosen,
            (None, _, _, _) => CascadeStage::Empty,
        }
    }

    /// Names of the pickers still waiting for a choice, in picker order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.teacher_id.is_none(), "Inspected"),
            (self.subject_id.is_none(), "Subject"),
            (self.lesson_id.is_none(), "Date"),
            (self.team_id.is_none(), "Inspectors"),
        ]
        .into_iter()
        .filter_map(|(missing, name)| missing.then_some(name))
        .collect()
    }

    fn clear_from_subject(&mut self) {
        self.subject_id = None;
        self.subject.clear();
        self.subject_code.clear();
        self.clear_from_date();
    }

    fn clear_from_date(&mut self) {
        self.lesson_id = None;
        self.date.clear();
        self.building.clear();
        self.clear_team();
    }

    fn clear_team(&mut self) {
        self.team_id = None;
        self.team.clear();
    }
}

/// A picker change coming from the user, or a service answer coming back.
/// Picker values are the option values; `None` or an empty string means the
/// placeholder was chosen.
#[derive(Debug)]
pub enum CascadeEvent {
    TeacherChanged(Option<String>),
    SubjectChanged(Option<String>),
    DateChanged(Option<String>),
    TeamChanged(Option<String>),
    SubjectsLoaded(Ticket, Result<Vec<Subject>, PlannerError>),
    LessonsLoaded(Ticket, Result<Vec<Lesson>, PlannerError>),
    TeamsLoaded(Ticket, Result<Vec<InspectionTeam>, PlannerError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CascadeRequest {
    Subjects {
        ticket: Ticket,
        teacher_id: u32,
    },
    Lessons {
        ticket: Ticket,
        teacher_id: u32,
        subject_id: u32,
    },
    Teams {
        ticket: Ticket,
        teacher_id: u32,
        lesson_id: u32,
    },
}

impl CascadeRequest {
    pub fn ticket(&self) -> Ticket {
        match self {
            CascadeRequest::Subjects { ticket, .. }
            | CascadeRequest::Lessons { ticket, .. }
            | CascadeRequest::Teams { ticket, .. } => *ticket,
        }
    }

    /// Runs the request and wraps the answer into the matching event.
    pub async fn fetch<S: InspectionService>(self, service: &S) -> CascadeEvent {
        match self {
            CascadeRequest::Subjects { ticket, teacher_id } => {
                CascadeEvent::SubjectsLoaded(ticket, service.unique_subjects(teacher_id).await)
            }
            CascadeRequest::Lessons {
                ticket,
                teacher_id,
                subject_id,
            } => CascadeEvent::LessonsLoaded(
                ticket,
                service.lessons_with_dates(teacher_id, subject_id).await,
            ),
            CascadeRequest::Teams {
                ticket,
                teacher_id,
                lesson_id,
            } => CascadeEvent::TeamsLoaded(
                ticket,
                service.available_teams(teacher_id, lesson_id).await,
            ),
        }
    }
}

#[derive(Debug, Default)]
pub struct CascadeController {
    teachers: Vec<Teacher>,
    subjects: Vec<Subject>,
    lessons: Vec<Lesson>,
    teams: Vec<InspectionTeam>,
    state: SelectionState,
    generations: [u64; 3],
}

fn chosen(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn clear_result<V: Surface>(view: &mut V) {
    for field in RESULT_FIELDS {
        view.set_text(field, "");
    }
    view.set_visible(Control::Editable, false);
}

fn reset_picker<V: Surface>(view: &mut V, picker: Picker, placeholder: &str) {
    view.reset_options(picker, Some(placeholder));
    view.select_value(picker, None);
}

impl CascadeController {
    pub fn new() -> CascadeController {
        CascadeController::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Subjects on offer, already without duplicates.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn teams(&self) -> &[InspectionTeam] {
        &self.teams
    }

    /// Fills the teacher picker and hides everything downstream.
    pub fn set_teachers<V: Surface>(&mut self, view: &mut V, teachers: Vec<Teacher>) {
        info!("Offering {} teachers", teachers.len());
        reset_picker(view, Picker::Teacher, TEACHER_PLACEHOLDER);
        view.append_options(
            Picker::Teacher,
            teachers
                .iter()
                .map(|teacher| SelectOption::new(teacher_full_name(teacher), teacher.id.to_string()))
                .collect(),
        );
        view.select_value(Picker::Teacher, None);
        self.teachers = teachers;
        self.reset_from(view, Level::Subject);
        for section in [
            Control::SelectSubject,
            Control::SelectDate,
            Control::SelectInspectors,
        ] {
            view.set_visible(section, false);
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generations[ticket.level as usize] == ticket.generation
    }

    /// Invalidates every outstanding request at `level` and below and empties
    /// those pickers.
    fn reset_from<V: Surface>(&mut self, view: &mut V, level: Level) {
        for generation in self.generations.iter_mut().skip(level as usize) {
            *generation += 1;
        }
        if level == Level::Subject {
            self.subjects.clear();
            reset_picker(view, Picker::Subject, SUBJECT_PLACEHOLDER);
        }
        if level != Level::Team {
            self.lessons.clear();
            reset_picker(view, Picker::Date, DATE_PLACEHOLDER);
        }
        self.teams.clear();
        reset_picker(view, Picker::Team, TEAM_PLACEHOLDER);
    }

    fn ticket(&self, level: Level) -> Ticket {
        Ticket {
            level,
            generation: self.generations[level as usize],
        }
    }

    pub fn update<V: Surface>(&mut self, view: &mut V, event: CascadeEvent) -> Option<CascadeRequest> {
        match event {
            CascadeEvent::TeacherChanged(value) => self.teacher_changed(view, chosen(value)),
            CascadeEvent::SubjectChanged(value) => self.subject_changed(view, chosen(value)),
            CascadeEvent::DateChanged(value) => self.date_changed(view, chosen(value)),
            CascadeEvent::TeamChanged(value) => {
                self.team_changed(view, chosen(value));
                None
            }
            CascadeEvent::SubjectsLoaded(ticket, result) => {
                if let Some(subjects) = self.accept(view, ticket, result, "subjects") {
                    self.subjects_loaded(view, subjects);
                }
                None
            }
            CascadeEvent::LessonsLoaded(ticket, result) => {
                if let Some(lessons) = self.accept(view, ticket, result, "dates") {
                    self.lessons_loaded(view, lessons);
                }
                None
            }
            CascadeEvent::TeamsLoaded(ticket, result) => {
                if let Some(teams) = self.accept(view, ticket, result, "inspection teams") {
                    self.teams_loaded(view, teams);
                }
                None
            }
        }
    }

    /// Applies an event and runs every request it leads to, one at a time.
    pub async fn dispatch<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
        event: CascadeEvent,
    ) {
        let mut next = self.update(view, event);
        while let Some(request) = next {
            let answer = request.fetch(service).await;
            next = self.update(view, answer);
        }
    }

    fn teacher_changed<V: Surface>(&mut self, view: &mut V, value: Option<String>) -> Option<CascadeRequest> {
        clear_result(view);
        view.set_text(Control::Message, "");
        for section in [
            Control::SelectSubject,
            Control::SelectDate,
            Control::SelectInspectors,
        ] {
            view.set_visible(section, false);
        }
        self.reset_from(view, Level::Subject);
        self.state = SelectionState::default();

        let value = value?;
        let Some(teacher) = self
            .teachers
            .iter()
            .find(|teacher| teacher.id.to_string() == value)
        else {
            warn!("Teacher {} is not on offer", value);
            return None;
        };
        debug!("Teacher {} chosen", teacher.id);
        self.state.teacher_id = Some(teacher.id);
        self.state.teacher = teacher_full_name(teacher);
        self.state.department = teacher.department.clone();
        Some(CascadeRequest::Subjects {
            ticket: self.ticket(Level::Subject),
            teacher_id: teacher.id,
        })
    }

    fn subject_changed<V: Surface>(&mut self, view: &mut V, value: Option<String>) -> Option<CascadeRequest> {
        clear_result(view);
        view.set_text(Control::Message, "");
        view.set_visible(Control::SelectDate, false);
        view.set_visible(Control::SelectInspectors, false);
        self.reset_from(view, Level::Date);
        self.state.clear_from_subject();

        let value = value?;
        let teacher_id = self.state.teacher_id?;
        let Some(subject) = self
            .subjects
            .iter()
            .find(|subject| subject.option_value() == value)
        else {
            warn!("Subject {} is not on offer", value);
            return None;
        };
        debug!("Subject {} chosen", subject.subject_id);
        self.state.subject_id = Some(subject.subject_id);
        self.state.subject = subject.subject_name.clone();
        self.state.subject_code = subject.subject_code.clone();
        Some(CascadeRequest::Lessons {
            ticket: self.ticket(Level::Date),
            teacher_id,
            subject_id: subject.subject_id,
        })
    }

    fn date_changed<V: Surface>(&mut self, view: &mut V, value: Option<String>) -> Option<CascadeRequest> {
        clear_result(view);
        view.set_text(Control::Message, "");
        view.set_visible(Control::SelectInspectors, false);
        self.reset_from(view, Level::Team);
        self.state.clear_from_date();

        let value = value?;
        let teacher_id = self.state.teacher_id?;
        let Some(lesson) = self
            .lessons
            .iter()
            .find(|lesson| lesson.id.to_string() == value)
        else {
            warn!("Lesson {} is not on offer", value);
            return None;
        };
        debug!("Lesson {} chosen", lesson.id);
        self.state.lesson_id = Some(lesson.id);
        self.state.date = fix_string_date(&lesson.time);
        self.state.building = lesson_location(lesson);
        Some(CascadeRequest::Teams {
            ticket: self.ticket(Level::Team),
            teacher_id,
            lesson_id: lesson.id,
        })
    }

    fn team_changed<V: Surface>(&mut self, view: &mut V, value: Option<String>) {
        clear_result(view);
        self.state.clear_team();

        let Some(value) = value else {
            return;
        };
        let Some(team) = self
            .teams
            .iter()
            .find(|team| team.inspection_team_id.to_string() == value)
        else {
            warn!("Team {} is not on offer", value);
            return;
        };
        debug!("Team {} chosen", team.inspection_team_id);
        self.state.team_id = Some(team.inspection_team_id);
        self.state.team = team_members_line(team);

        let state = &self.state;
        for (field, text) in RESULT_FIELDS.into_iter().zip([
            &state.teacher,
            &state.department,
            &state.subject,
            &state.date,
            &state.team,
        ]) {
            view.set_text(field, text);
        }
        view.set_visible(Control::Editable, true);
    }

    /// Unwraps a service answer if it still matches the current selection.
    fn accept<T, V: Surface>(
        &self,
        view: &mut V,
        ticket: Ticket,
        result: Result<Vec<T>, PlannerError>,
        what: &str,
    ) -> Option<Vec<T>> {
        if !self.is_current(ticket) {
            debug!("Dropping stale {} answer {:?}", what, ticket);
            return None;
        }
        match result {
            Ok(items) if items.is_empty() => {
                info!("No {} to offer", what);
                None
            }
            Ok(items) => Some(items),
            Err(e) => {
                error!("Error loading {}: {}", what, e);
                view.set_text(Control::Message, &format!("Failed to load {}.", what));
                None
            }
        }
    }

    fn subjects_loaded<V: Surface>(&mut self, view: &mut V, subjects: Vec<Subject>) {
        let subjects = remove_subjects_duplicates(subjects);
        view.append_options(
            Picker::Subject,
            subjects
                .iter()
                .map(|subject| {
                    SelectOption::new(
                        format!("{} {}", subject.subject_name, subject.subject_code),
                        subject.option_value(),
                    )
                })
                .collect(),
        );
        view.select_value(Picker::Subject, None);
        view.set_visible(Control::SelectSubject, true);
        self.subjects = subjects;
    }

    fn lessons_loaded<V: Surface>(&mut self, view: &mut V, lessons: Vec<Lesson>) {
        view.append_options(
            Picker::Date,
            lessons
                .iter()
                .map(|lesson| SelectOption::new(lesson_option_text(lesson), lesson.id.to_string()))
                .collect(),
        );
        view.select_value(Picker::Date, None);
        view.set_visible(Control::SelectDate, true);
        self.lessons = lessons;
    }

    fn teams_loaded<V: Surface>(&mut self, view: &mut V, teams: Vec<InspectionTeam>) {
        view.append_options(
            Picker::Team,
            teams
                .iter()
                .map(|team| {
                    SelectOption::new(team_option_text(team), team.inspection_team_id.to_string())
                })
                .collect(),
        );
        view.select_value(Picker::Team, None);
        view.set_visible(Control::SelectInspectors, true);
        self.teams = teams;
    }
}
