use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use log::{debug, error, info};

use super::{
    error::PlannerError,
    helpers::{pad_names, teacher_full_name},
    inspection_service::InspectionService,
    models::api_model::{Teacher, TeamSummary},
    surface::{Control, ListId, ListItem, Picker, SelectOption, Surface},
};

pub const TEAMS_FAILED: &str = "Error loading teams.";
pub const TEACHER_OPTIONS_FAILED: &str = "Error loading teacher options.";
pub const NO_TEACHERS_TO_ADD: &str = "No teachers available to add.";
pub const MEMBER_ADDED: &str = "Member added successfully!";
pub const ADD_MEMBER_FAILED: &str = "Error adding member.";
pub const MEMBER_REMOVED: &str = "Member removed successfully!";
pub const REMOVE_MEMBER_FAILED: &str = "Error removing member.";

/// Page for managing who sits in which inspection team.
#[derive(Debug, Default)]
pub struct TeamsPage {
    teams: Vec<TeamSummary>,
    members: HashMap<u32, Vec<Teacher>>,
    open_menus: HashSet<u32>,
}

fn member_items(members: &[Teacher]) -> Vec<ListItem> {
    let names = members.iter().map(teacher_full_name).collect::<Vec<_>>();
    members
        .iter()
        .zip(pad_names(&names))
        .map(|(member, text)| ListItem {
            key: member.id.to_string(),
            text,
            visible: true,
        })
        .collect()
}

impl TeamsPage {
    pub fn new() -> TeamsPage {
        TeamsPage::default()
    }

    pub fn teams(&self) -> &[TeamSummary] {
        &self.teams
    }

    /// Members of a team as of the last load, `None` if they failed to load.
    pub fn members(&self, team_id: u32) -> Option<&[Teacher]> {
        self.members.get(&team_id).map(Vec::as_slice)
    }

    /// Loads every team, then all member lists at once.
    pub async fn load<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
    ) -> Result<(), PlannerError> {
        self.members.clear();
        self.open_menus.clear();
        view.render_list(ListId::Teams, Vec::new());
        let teams = service.teams().await.map_err(|e| {
            error!("Error loading teams: {}", e);
            view.set_text(Control::Message, TEAMS_FAILED);
            e
        })?;
        info!("Loaded {} teams", teams.len());
        view.render_list(
            ListId::Teams,
            teams
                .iter()
                .map(|team| ListItem {
                    key: team.id.to_string(),
                    text: team.name.clone(),
                    visible: true,
                })
                .collect(),
        );

        let details = join_all(teams.iter().map(|team| service.team_details(team.id))).await;
        for (team, details) in teams.iter().zip(details) {
            match details {
                Ok(details) => {
                    view.render_list(ListId::TeamMembers(team.id), member_items(&details.teachers));
                    self.members.insert(team.id, details.teachers);
                }
                Err(e) => {
                    error!("Error loading members of team {}: {}", team.id, e);
                    view.render_list(
                        ListId::TeamMembers(team.id),
                        vec![ListItem {
                            key: String::new(),
                            text: format!("Error loading members for {}", team.name),
                            visible: true,
                        }],
                    );
                }
            }
        }
        self.teams = teams;
        Ok(())
    }

    /// Offers every teacher who is not in the team yet. Opening the menu of a
    /// team twice does nothing.
    pub async fn show_add_member_menu<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
        team_id: u32,
    ) {
        if self.open_menus.contains(&team_id) {
            debug!("Add member menu of team {} is already open", team_id);
            return;
        }
        let (teachers, details) = match (
            service.teachers().await,
            service.team_details(team_id).await,
        ) {
            (Ok(teachers), Ok(details)) => (teachers, details),
            (Err(e), _) | (_, Err(e)) => {
                error!("Error loading teacher options for team {}: {}", team_id, e);
                view.set_text(Control::Message, TEACHER_OPTIONS_FAILED);
                return;
            }
        };
        let available = teachers
            .into_iter()
            .filter(|teacher| !details.teachers.iter().any(|member| member.id == teacher.id))
            .collect::<Vec<_>>();
        if available.is_empty() {
            view.set_text(Control::Message, NO_TEACHERS_TO_ADD);
            return;
        }
        let picker = Picker::AddMember(team_id);
        view.reset_options(picker, None);
        view.append_options(
            picker,
            available
                .iter()
                .map(|teacher| SelectOption::new(teacher_full_name(teacher), teacher.id.to_string()))
                .collect(),
        );
        view.select_value(picker, None);
        self.open_menus.insert(team_id);
    }

    pub async fn add_member<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
        team_id: u32,
        teacher_id: u32,
    ) -> Result<(), PlannerError> {
        match service.add_teacher_to_team(team_id, teacher_id).await {
            Ok(()) => {
                view.set_text(Control::Message, MEMBER_ADDED);
                self.load(service, view).await
            }
            Err(e) => {
                error!("Error adding teacher {} to team {}: {}", teacher_id, team_id, e);
                view.set_text(Control::Message, ADD_MEMBER_FAILED);
                Err(e)
            }
        }
    }

    pub async fn remove_member<S: InspectionService, V: Surface>(
        &mut self,
        service: &S,
        view: &mut V,
        team_id: u32,
        teacher_id: u32,
    ) -> Result<(), PlannerError> {
        match service.remove_teacher_from_team(team_id, teacher_id).await {
            Ok(()) => {
                view.set_text(Control::Message, MEMBER_REMOVED);
                self.load(service, view).await
            }
            Err(e) => {
                error!(
                    "Error removing teacher {} from team {}: {}",
                    teacher_id, team_id, e
                );
                view.set_text(Control::Message, REMOVE_MEMBER_FAILED);
                Err(e)
            }
        }
    }
}
