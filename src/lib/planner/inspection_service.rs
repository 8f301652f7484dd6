use std::time::Duration;

use log::{debug, error, info};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{
    error::PlannerError,
    models::{
        api_model::{
            DocumentDetail, DocumentRatings, DocumentSummary, InspectionTeam, Lesson,
            ScheduleEntry, Subject, Teacher, TeamDetails, TeamMemberChange, TeamSummary, Term,
            TermAssignment, TermDetail,
        },
        Config,
    },
};

/// A trait, necessary for every entity that serves inspection data to the pages.
/// Non-success answers are errors, nothing is returned half-read.
#[allow(async_fn_in_trait)]
pub trait InspectionService {
    async fn teachers(&self) -> Result<Vec<Teacher>, PlannerError>;
    /// May contain the same subject several times, once per lesson slot.
    async fn unique_subjects(&self, teacher_id: u32) -> Result<Vec<Subject>, PlannerError>;
    async fn lessons_with_dates(
        &self,
        teacher_id: u32,
        subject_id: u32,
    ) -> Result<Vec<Lesson>, PlannerError>;
    /// Teams free to inspect this teacher's lesson.
    async fn available_teams(
        &self,
        teacher_id: u32,
        lesson_id: u32,
    ) -> Result<Vec<InspectionTeam>, PlannerError>;
    async fn teams(&self) -> Result<Vec<TeamSummary>, PlannerError>;
    async fn team_details(&self, team_id: u32) -> Result<TeamDetails, PlannerError>;
    async fn add_teacher_to_team(&self, team_id: u32, teacher_id: u32)
        -> Result<(), PlannerError>;
    async fn remove_teacher_from_team(
        &self,
        team_id: u32,
        teacher_id: u32,
    ) -> Result<(), PlannerError>;
    async fn create_term(&self, assignment: &TermAssignment) -> Result<(), PlannerError>;
    async fn terms(&self) -> Result<Vec<Term>, PlannerError>;
    async fn term_detail(&self, id: u32) -> Result<TermDetail, PlannerError>;
    async fn edit_term(&self, id: u32, assignment: &TermAssignment) -> Result<(), PlannerError>;
    async fn remove_term(&self, id: u32) -> Result<(), PlannerError>;
    async fn documents(&self) -> Result<Vec<DocumentSummary>, PlannerError>;
    async fn document_detail(&self, id: u32) -> Result<DocumentDetail, PlannerError>;
    async fn edit_document(&self, id: u32, ratings: &DocumentRatings) -> Result<(), PlannerError>;
    async fn schedule(&self, semester: &str) -> Result<Vec<ScheduleEntry>, PlannerError>;
    async fn semesters(&self) -> Result<Vec<String>, PlannerError>;
}

/// Talks to the inspection API over HTTP.
pub struct HttpService {
    client: Client,
    base_url: String,
}

impl HttpService {
    pub fn new(config: &Config) -> Result<HttpService, PlannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|source| PlannerError::Transport {
                url: config.api_base_url.clone(),
                source,
            })?;
        Ok(HttpService {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: RequestBuilder, url: &str) -> Result<Response, PlannerError> {
        let response = request.send().await.map_err(|source| {
            error!("Request to {} failed: {}", url, source);
            PlannerError::Transport {
                url: url.to_owned(),
                source,
            }
        })?;
        let status = response.status();
        if !status.is_success() {
            error!("{} responded with {}", url, status);
            return Err(PlannerError::Status {
                url: url.to_owned(),
                status,
            });
        }
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, PlannerError> {
        let response = self.execute(request, url).await?;
        response
            .json()
            .await
            .map_err(|source| PlannerError::Transport {
                url: url.to_owned(),
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PlannerError> {
        let url = self.url(path);
        debug!("GET {}", url);
        self.read_json(self.client.get(&url), &url).await
    }
}

impl InspectionService for HttpService {
    async fn teachers(&self) -> Result<Vec<Teacher>, PlannerError> {
        info!("Getting teachers");
        self.get_json("/teachers/").await
    }

    async fn unique_subjects(&self, teacher_id: u32) -> Result<Vec<Subject>, PlannerError> {
        info!("Getting subjects of teacher {}", teacher_id);
        self.get_json(&format!("/unique-subjects/{}/", teacher_id))
            .await
    }

    async fn lessons_with_dates(
        &self,
        teacher_id: u32,
        subject_id: u32,
    ) -> Result<Vec<Lesson>, PlannerError> {
        info!(
            "Getting lessons of teacher {} in subject {}",
            teacher_id, subject_id
        );
        self.get_json(&format!("/lesson_with_dates/{}/{}/", teacher_id, subject_id))
            .await
    }

    async fn available_teams(
        &self,
        teacher_id: u32,
        lesson_id: u32,
    ) -> Result<Vec<InspectionTeam>, PlannerError> {
        info!(
            "Getting teams available for lesson {} of teacher {}",
            lesson_id, teacher_id
        );
        self.get_json(&format!("/inspection-teams/{}/{}/", teacher_id, lesson_id))
            .await
    }

    async fn teams(&self) -> Result<Vec<TeamSummary>, PlannerError> {
        info!("Getting inspection teams");
        self.get_json("/inspection-teams/").await
    }

    async fn team_details(&self, team_id: u32) -> Result<TeamDetails, PlannerError> {
        debug!("Getting details of team {}", team_id);
        self.get_json(&format!("/inspection-teams/{}/", team_id))
            .await
    }

    async fn add_teacher_to_team(
        &self,
        team_id: u32,
        teacher_id: u32,
    ) -> Result<(), PlannerError> {
        info!("Adding teacher {} to team {}", teacher_id, team_id);
        let url = self.url(&format!("/inspection-teams/{}/add-teacher/", team_id));
        let request = self
            .client
            .post(&url)
            .json(&TeamMemberChange { teacher_id });
        self.execute(request, &url).await.map(|_| ())
    }

    async fn remove_teacher_from_team(
        &self,
        team_id: u32,
        teacher_id: u32,
    ) -> Result<(), PlannerError> {
        info!("Removing teacher {} from team {}", teacher_id, team_id);
        let url = self.url(&format!("/inspection-teams/{}/remove-teacher/", team_id));
        let request = self
            .client
            .delete(&url)
            .json(&TeamMemberChange { teacher_id });
        self.execute(request, &url).await.map(|_| ())
    }

    async fn create_term(&self, assignment: &TermAssignment) -> Result<(), PlannerError> {
        info!(
            "Creating term for lesson {} with team {}",
            assignment.fk_lesson, assignment.fk_inspection_team
        );
        let url = self.url("/inspection-terms/");
        let request = self.client.post(&url).json(assignment);
        self.execute(request, &url).await.map(|_| ())
    }

    async fn terms(&self) -> Result<Vec<Term>, PlannerError> {
        info!("Getting inspection terms");
        self.get_json("/inspection-terms/").await
    }

    async fn term_detail(&self, id: u32) -> Result<TermDetail, PlannerError> {
        debug!("Getting details of term {}", id);
        self.get_json(&format!("/inspection-term/{}/", id)).await
    }

    async fn edit_term(&self, id: u32, assignment: &TermAssignment) -> Result<(), PlannerError> {
        info!(
            "Moving term {} to lesson {} with team {}",
            id, assignment.fk_lesson, assignment.fk_inspection_team
        );
        let url = self.url(&format!("/inspection-term/edit/{}/", id));
        let request = self.client.post(&url).json(assignment);
        self.execute(request, &url).await.map(|_| ())
    }

    async fn remove_term(&self, id: u32) -> Result<(), PlannerError> {
        info!("Removing term {}", id);
        let url = self.url(&format!("/inspection-terms/{}/remove-term/", id));
        let request = self.client.delete(&url);
        self.execute(request, &url).await.map(|_| ())
    }

    async fn documents(&self) -> Result<Vec<DocumentSummary>, PlannerError> {
        info!("Getting inspection documents");
        self.get_json("/inspection-docs/").await
    }

    async fn document_detail(&self, id: u32) -> Result<DocumentDetail, PlannerError> {
        debug!("Getting details of document {}", id);
        self.get_json(&format!("/inspection-docs/{}/", id)).await
    }

    async fn edit_document(&self, id: u32, ratings: &DocumentRatings) -> Result<(), PlannerError> {
        info!("Saving ratings of document {}", id);
        let url = self.url(&format!("/inspection-docs/{}/edit/", id));
        let request = self.client.post(&url).json(ratings);
        self.execute(request, &url).await.map(|_| ())
    }

    async fn schedule(&self, semester: &str) -> Result<Vec<ScheduleEntry>, PlannerError> {
        info!("Getting schedule of semester {}", semester);
        let url = self.url("/schedule/");
        let request = self.client.get(&url).query(&[("semester", semester)]);
        self.read_json(request, &url).await
    }

    async fn semesters(&self) -> Result<Vec<String>, PlannerError> {
        info!("Getting semesters");
        self.get_json("/inspection-schedule/semesters/").await
    }
}
