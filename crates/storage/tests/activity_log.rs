#![forbid(unsafe_code)]

use tt_core::ids::{OrgId, UserId};
use tt_core::model::{Priority, Role, TaskStatus};
use tt_storage::{
    ProjectCreateRequest, ProvisionRequest, SqliteStore, TaskCreateRequest, TaskEditRequest,
};
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("tt_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

struct Fixture {
    store: SqliteStore,
    admin: UserId,
    org: OrgId,
    project_id: i64,
}

fn fixture(test_name: &str) -> Fixture {
    let dir = temp_dir(test_name);
    let mut store = SqliteStore::open(&dir).expect("open store");
    let user = store.create_user("admin", "admin@example.com").expect("create user");
    let admin = UserId::new(user.id);
    store.ensure_profile(admin).expect("ensure profile");
    let profile = store
        .provision(ProvisionRequest {
            user_id: admin,
            role: Role::Admin,
            org_name: Some("Acme".to_string()),
            org_choice: None,
        })
        .expect("provision");
    let org = OrgId::new(profile.org_id.expect("org id"));
    let project = store
        .create_project(
            org,
            ProjectCreateRequest {
                name: "Alpha".to_string(),
                description: String::new(),
            },
            admin,
        )
        .expect("create project");
    Fixture {
        store,
        admin,
        org,
        project_id: project.id,
    }
}

fn new_task(title: &str) -> TaskCreateRequest {
    TaskCreateRequest {
        title: title.to_string(),
        description: String::new(),
        status: TaskStatus::Todo,
        priority: Priority::Med,
        assignee_id: None,
        due_date: None,
    }
}

#[test]
fn task_creation_logs_once_with_the_title() {
    let mut fx = fixture("task_creation_logs_once_with_the_title");
    let (task, activity) = fx
        .store
        .create_task(fx.org, fx.project_id, new_task("Ship the thing"), fx.admin)
        .expect("create task");

    assert_eq!(activity.verb, "Task created: Ship the thing");
    let feed = fx.store.list_activity(fx.org, task.id).expect("list activity");
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].verb, "Task created: Ship the thing");
    assert_eq!(feed[0].actor_id, Some(fx.admin.as_i64()));
}

#[test]
fn untracked_edit_logs_task_updated() {
    let mut fx = fixture("untracked_edit_logs_task_updated");
    let (task, _) = fx
        .store
        .create_task(fx.org, fx.project_id, new_task("Polish"), fx.admin)
        .expect("create task");

    let (_, activity) = fx
        .store
        .edit_task(
            fx.org,
            task.id,
            TaskEditRequest {
                description: Some("new words".to_string()),
                ..TaskEditRequest::default()
            },
            fx.admin,
        )
        .expect("edit task");
    assert_eq!(activity.verb, "task updated");
}

#[test]
fn status_change_logs_old_and_new_values() {
    let mut fx = fixture("status_change_logs_old_and_new_values");
    let (task, _) = fx
        .store
        .create_task(fx.org, fx.project_id, new_task("Finish"), fx.admin)
        .expect("create task");

    let (updated, activity) = fx
        .store
        .edit_task(
            fx.org,
            task.id,
            TaskEditRequest {
                status: Some(TaskStatus::Done),
                ..TaskEditRequest::default()
            },
            fx.admin,
        )
        .expect("edit task");
    assert_eq!(updated.status, TaskStatus::Done);
    assert_eq!(activity.verb, "status todo -> done");
}

#[test]
fn status_and_assignee_changes_join_with_semicolon() {
    let mut fx = fixture("status_and_assignee_changes_join_with_semicolon");

    let helper = fx
        .store
        .create_user("helper", "helper@example.com")
        .expect("create helper");
    let helper_id = UserId::new(helper.id);
    fx.store.ensure_profile(helper_id).expect("ensure profile");
    fx.store
        .provision(ProvisionRequest {
            user_id: helper_id,
            role: Role::Member,
            org_name: None,
            org_choice: Some(fx.org.as_i64()),
        })
        .expect("provision helper");

    let (task, _) = fx
        .store
        .create_task(fx.org, fx.project_id, new_task("Handoff"), fx.admin)
        .expect("create task");

    let (_, activity) = fx
        .store
        .edit_task(
            fx.org,
            task.id,
            TaskEditRequest {
                status: Some(TaskStatus::InProgress),
                assignee_id: Some(Some(helper_id.as_i64())),
                ..TaskEditRequest::default()
            },
            fx.admin,
        )
        .expect("edit task");
    assert_eq!(
        activity.verb,
        "status todo -> inprogress; assignee None -> helper"
    );
}

#[test]
fn comment_verbs_truncate_to_sixty_characters() {
    let mut fx = fixture("comment_verbs_truncate_to_sixty_characters");
    let (task, _) = fx
        .store
        .create_task(fx.org, fx.project_id, new_task("Discuss"), fx.admin)
        .expect("create task");

    let content = "a".repeat(200);
    let (comment, activity) = fx
        .store
        .add_comment(fx.org, task.id, fx.admin, &content)
        .expect("add comment");

    // The comment keeps its full body; only the verb is previewed.
    assert_eq!(comment.content.chars().count(), 200);
    assert_eq!(activity.verb, format!("commented: {}", "a".repeat(60)));
}

#[test]
fn feed_holds_one_row_per_action_most_recent_first() {
    let mut fx = fixture("feed_holds_one_row_per_action_most_recent_first");
    let (task, _) = fx
        .store
        .create_task(fx.org, fx.project_id, new_task("Busy"), fx.admin)
        .expect("create task");

    fx.store
        .edit_task(
            fx.org,
            task.id,
            TaskEditRequest {
                status: Some(TaskStatus::InProgress),
                ..TaskEditRequest::default()
            },
            fx.admin,
        )
        .expect("edit");
    fx.store
        .add_comment(fx.org, task.id, fx.admin, "on it")
        .expect("comment");

    let feed = fx.store.list_activity(fx.org, task.id).expect("list activity");
    assert_eq!(feed.len(), 3);
    // ids are monotonic, so descending ids mean most recent first even when
    // actions land within the same millisecond.
    assert!(feed.windows(2).all(|pair| pair[0].id > pair[1].id));
    assert_eq!(feed[0].verb, "commented: on it");
    assert_eq!(feed[2].verb, "Task created: Busy");
}
