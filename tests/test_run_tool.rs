mod common;

use chrono::NaiveDate;
use common::{TestPopups, TestService};
use lib::planner::list_view::SortMode;
use lib::planner::models::api_model::TermAssignment;
use lib::planner::models::Command;
use lib::planner::run_tool::run;
use lib::planner::surface::{Control, ListId};
use lib::planner::terminal::TerminalSurface;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[tokio::test]
async fn plan_walks_the_cascade_and_saves() {
    let service = TestService::from_fixture();
    let mut view = TerminalSurface::new();
    let mut popups = TestPopups::yes();
    let command = Command::Plan {
        teacher: 1,
        subject: "1".to_string(),
        lesson: 11,
        team: 6,
    };

    run(&service, &mut view, &mut popups, command, today())
        .await
        .unwrap();

    assert_eq!(
        view.state().text(Control::InfoInspectors),
        "Dr. Piotr Zielinski"
    );
    assert_eq!(
        *service.created_terms.borrow(),
        vec![TermAssignment {
            fk_lesson: 11,
            fk_inspection_team: 6
        }]
    );
}

#[tokio::test]
async fn plan_with_unknown_lesson_saves_nothing() {
    let service = TestService::from_fixture();
    let mut view = TerminalSurface::new();
    let mut popups = TestPopups::yes();
    let command = Command::Plan {
        teacher: 1,
        subject: "1".to_string(),
        lesson: 99,
        team: 6,
    };

    run(&service, &mut view, &mut popups, command, today())
        .await
        .unwrap();

    assert_eq!(popups.messages(), vec!["Please select: Date Inspectors"]);
    assert_eq!(service.called("create_term"), 0);
}

#[tokio::test]
async fn terms_are_sorted_and_filtered() {
    let service = TestService::from_fixture();
    let mut view = TerminalSurface::new();
    let command = Command::Terms {
        sort: SortMode::Old,
        date: None,
        name: Some("jane".to_string()),
    };

    run(&service, &mut view, &mut TestPopups::default(), command, today())
        .await
        .unwrap();

    assert_eq!(
        view.state().visible_texts(ListId::Items),
        vec![
            "2099-01-05 09:30 Geometry Dr. Jane Smith",
            "2099-03-10 08:00 Algebra Dr. Jane Smith"
        ]
    );
}

#[tokio::test]
async fn delete_of_conducted_term_is_refused() {
    let service = TestService::from_fixture();
    let mut view = TerminalSurface::new();
    let mut popups = TestPopups::yes();

    run(
        &service,
        &mut view,
        &mut popups,
        Command::DeleteTerm { id: 2 },
        today(),
    )
    .await
    .unwrap();

    assert_eq!(service.called("remove_term"), 0);
}

#[tokio::test]
async fn edit_document_overrides_given_fields() {
    let service = TestService::from_fixture();
    let mut view = TerminalSurface::new();
    let mut popups = TestPopups::yes();
    let command = Command::EditDocument {
        id: 1,
        lateness: Some("0".to_string()),
        attendance: None,
        room_adaptation: None,
        content_compatibility: None,
        substantive_assessment: None,
        final_assessment: Some("70".to_string()),
        recommendation: Some("Use the whiteboard more".to_string()),
    };

    run(&service, &mut view, &mut popups, command, today())
        .await
        .unwrap();

    let edited = service.edited_documents.borrow();
    assert_eq!(edited.len(), 1);
    let (id, ratings) = &edited[0];
    assert_eq!(*id, 1);
    assert_eq!(ratings.lateness_minutes, 0);
    assert_eq!(ratings.students_attendance, 24);
    assert_eq!(ratings.final_rating, 70);
    assert_eq!(ratings.objection, "Use the whiteboard more");
}

#[tokio::test]
async fn unreachable_api_fails_the_run() {
    let service = TestService::from_fixture();
    service.fail("terms");
    let mut view = TerminalSurface::new();

    let result = run(
        &service,
        &mut view,
        &mut TestPopups::default(),
        Command::Terms {
            sort: SortMode::New,
            date: None,
            name: None,
        },
        today(),
    )
    .await;

    assert!(result.is_err_and(|e| e.is_network_failure()));
}
