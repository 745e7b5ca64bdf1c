#![forbid(unsafe_code)]

use serde_json::json;
use tt_core::model::{Priority, Role, TaskStatus};
use tt_service::{ProfileView, SignupRequest, TaskView};

#[test]
fn task_views_serialize_the_contract_value_sets() {
    let task = TaskView {
        id: 7,
        project: 3,
        title: "Wire check".to_string(),
        description: String::new(),
        status: TaskStatus::InProgress,
        priority: Priority::High,
        assignee: None,
        due_date: Some("2026-09-01".to_string()),
        created_by: Some(1),
        created_at: 1_700_000_000_000,
    };

    let value = serde_json::to_value(&task).expect("serialize");
    assert_eq!(value["status"], json!("inprogress"));
    assert_eq!(value["priority"], json!("high"));
    assert_eq!(value["due_date"], json!("2026-09-01"));

    let back: TaskView = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, task);
}

#[test]
fn unknown_enum_values_are_rejected_on_input() {
    let result: Result<TaskView, _> = serde_json::from_value(json!({
        "id": 1,
        "project": 1,
        "title": "bad",
        "description": "",
        "status": "in_progress",
        "priority": "med",
        "assignee": null,
        "due_date": null,
        "created_by": null,
        "created_at": 0
    }));
    assert!(result.is_err());
}

#[test]
fn profile_roles_round_trip() {
    for role in Role::ALL {
        let view = ProfileView {
            user: 1,
            role: *role,
            organization: Some(2),
        };
        let value = serde_json::to_value(&view).expect("serialize");
        assert_eq!(value["role"], json!(role.as_str()));
        let back: ProfileView = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, view);
    }
}

#[test]
fn signup_requests_parse_from_form_payloads() {
    let request: SignupRequest = serde_json::from_value(json!({
        "username": "founder",
        "email": "founder@example.com",
        "role": "admin",
        "organization_name": "Acme"
    }))
    .expect("deserialize");
    assert_eq!(request.role, Role::Admin);
    assert_eq!(request.organization_name.as_deref(), Some("Acme"));
    assert_eq!(request.organization, None);

    let request: SignupRequest = serde_json::from_value(json!({
        "username": "joiner",
        "email": "joiner@example.com",
        "role": "member",
        "organization": 4
    }))
    .expect("deserialize");
    assert_eq!(request.role, Role::Member);
    assert_eq!(request.organization, Some(4));
}
