mod common;

use chrono::NaiveDate;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use greedible_auth::{AuthzError, Role};
use greedible_client::{ApiError, ScheduleBoard};
use greedible_core::StaffId;
use greedible_staff::{AssignmentState, ScheduleError, ShiftKind};

use common::{backend, session};

fn oct(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

fn month(staff: Value) -> Value {
    json!({
        "success": true,
        "schedule": [
            {"date": "2026-10-21", "shifts": []},
            {"date": "2026-10-20", "shifts": [
                {"id": 5, "shift": "Morning", "time": "08:00 - 14:00", "staff": staff}
            ]}
        ]
    })
}

#[tokio::test]
async fn sign_up_posts_then_refetches_the_month() {
    let (server, client) = backend().await;

    Mock::given(method("POST"))
        .and(path("/api/schedules/month"))
        .and(body_json(json!({"month": 10, "year": 2026})))
        .respond_with(ResponseTemplate::new(200).set_body_json(month(json!([]))))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/schedules/month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(month(json!([
            {"staff_id": "7", "schedule_id": 31, "name": "Lan"}
        ]))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/schedules"))
        .and(body_json(json!({"shift_date": "2026-10-20", "shift": "Morning", "staff_id": 7})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let session = session(7, Role::Staff);
    let mut board = ScheduleBoard::load(&client, &session, 2026, 10).await.unwrap();
    assert_eq!(board.schedule().days[0].day, oct(20));

    board.sign_up(oct(20), ShiftKind::Morning).await.unwrap();

    let slot = board.schedule().shifts_on(oct(20), ShiftKind::Morning)[0];
    assert!(matches!(
        slot.assignment_for(StaffId::new(7)),
        AssignmentState::SignedUp { .. }
    ));
}

#[tokio::test]
async fn signing_up_twice_is_refused_locally() {
    let (server, client) = backend().await;

    Mock::given(method("POST"))
        .and(path("/api/schedules/month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(month(json!([
            {"id": 7, "schedule_id": 31, "staff_name": "Lan"}
        ]))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/schedules"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let session = session(7, Role::Staff);
    let mut board = ScheduleBoard::load(&client, &session, 2026, 10).await.unwrap();
    let err = board.sign_up(oct(20), ShiftKind::Morning).await.unwrap_err();
    assert!(matches!(err, ApiError::Schedule(ScheduleError::AlreadySignedUp)));
}

#[tokio::test]
async fn unassign_deletes_the_own_schedule_row() {
    let (server, client) = backend().await;

    Mock::given(method("POST"))
        .and(path("/api/schedules/month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(month(json!([
            {"staff_id": 7, "schedule_id": 31, "name": "Lan"},
            {"staff_id": 8, "schedule_id": 32, "name": "Minh"}
        ]))))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/schedules/31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let session = session(7, Role::Staff);
    let mut board = ScheduleBoard::load(&client, &session, 2026, 10).await.unwrap();
    board.unassign(oct(20), ShiftKind::Morning).await.unwrap();
}

#[tokio::test]
async fn unassign_without_an_assignment_is_refused() {
    let (server, client) = backend().await;

    Mock::given(method("POST"))
        .and(path("/api/schedules/month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(month(json!([
            {"staff_id": 8, "schedule_id": 32, "name": "Minh"}
        ]))))
        .mount(&server)
        .await;

    let session = session(7, Role::Staff);
    let mut board = ScheduleBoard::load(&client, &session, 2026, 10).await.unwrap();

    let err = board.unassign(oct(20), ShiftKind::Morning).await.unwrap_err();
    assert_eq!(err.user_message(), "Could not find your assignment in this shift.");

    let err = board.unassign(oct(21), ShiftKind::Evening).await.unwrap_err();
    assert!(matches!(err, ApiError::Schedule(ScheduleError::AssignmentNotFound)));
}

#[tokio::test]
async fn shift_management_follows_role_capabilities() {
    let (server, client) = backend().await;

    Mock::given(method("POST"))
        .and(path("/api/schedules/month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(month(json!([]))))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/schedules"))
        .and(body_json(json!({"shift_date": "2026-10-22", "shift": "Evening"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/schedules/block"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let staff = session(8, Role::Staff);
    let mut board = ScheduleBoard::load(&client, &staff, 2026, 10).await.unwrap();
    let err = board.create_shift(oct(22), ShiftKind::Evening).await.unwrap_err();
    assert!(matches!(err, ApiError::Authz(AuthzError::Forbidden { .. })));

    let admin = session(2, Role::Admin);
    let mut board = ScheduleBoard::load(&client, &admin, 2026, 10).await.unwrap();
    board.create_shift(oct(22), ShiftKind::Evening).await.unwrap();
    let err = board.delete_shift(oct(20), ShiftKind::Morning).await.unwrap_err();
    assert!(matches!(err, ApiError::Authz(_)));
}

#[tokio::test]
async fn managers_delete_whole_shifts() {
    let (server, client) = backend().await;

    Mock::given(method("POST"))
        .and(path("/api/schedules/month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(month(json!([]))))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/schedules/block"))
        .and(body_json(json!({"shift_date": "2026-10-20", "shift": "Morning"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let manager = session(1, Role::Manager);
    let mut board = ScheduleBoard::load(&client, &manager, 2026, 10).await.unwrap();
    board.delete_shift(oct(20), ShiftKind::Morning).await.unwrap();
}
