//! 端到端场景测试
//!
//! 通过 DeskState 走完整流程：登录 → 角色视图 → 变更 → 权限拒绝。

use std::io::Write;

use shared::ErrorCode;
use shared::models::{Role, TicketCreate, TicketPriority, TicketStatus, TicketUpdate, UserCreate};
use ticket_desk::tickets::DashboardScope;
use ticket_desk::users::UserFilter;
use ticket_desk::{Action, Config, DeskState, SeedData, TicketFilter, role_can};

fn create_state(allow_role_switch: bool) -> DeskState {
    DeskState::initialize(&Config::with_overrides(allow_role_switch, 0)).unwrap()
}

#[tokio::test]
async fn login_then_create_shows_newest_first() {
    let state = create_state(false);
    let me = state.sessions.login("jane@example.com", "password").unwrap();
    assert_eq!(me.role, Role::User);

    let ticket = state
        .tickets
        .create_ticket(
            &me,
            TicketCreate {
                subject: "A".into(),
                description: "B".into(),
                priority: TicketPriority::Medium,
            },
        )
        .await
        .unwrap();

    let visible = state.tickets.visible_tickets(&me);
    assert_eq!(visible[0].id, ticket.id);
    assert!(visible.iter().all(|t| t.author_id == me.id));
}

#[test]
fn failed_login_leaves_session_empty() {
    let state = create_state(false);
    let err = state.sessions.login("admin@x.com", "wrong").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);
    assert!(state.sessions.current_identity().is_none());

    let admin = state.sessions.login("admin@x.com", "password").unwrap();
    assert_eq!(admin.role, Role::Admin);
}

#[tokio::test]
async fn whitespace_comment_changes_nothing() {
    let state = create_state(false);
    let me = state.sessions.login("john@example.com", "password").unwrap();
    let before = state.tickets.get_ticket(&me, "1").unwrap();

    let err = state.tickets.add_comment(&me, "1", "  ").await.unwrap_err();
    assert!(err.is_validation());

    let after = state.tickets.get_ticket(&me, "1").unwrap();
    assert_eq!(after.comments.len(), before.comments.len());
    assert_eq!(after.updated_at, before.updated_at);
}

#[tokio::test]
async fn update_unknown_ticket_is_not_found() {
    let state = create_state(false);
    let admin = state.sessions.login("admin@company.com", "password").unwrap();
    let before = state.tickets.visible_tickets(&admin);

    let err = state
        .tickets
        .update_ticket(&admin, "404", TicketUpdate::status(TicketStatus::Closed))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(state.tickets.visible_tickets(&admin), before);
}

#[tokio::test]
async fn support_works_the_queue() {
    let state = create_state(false);
    let support = state.sessions.login("sarah@support.com", "password").unwrap();
    assert!(role_can(support.role, Action::ChangeStatus));

    let dashboard = state.tickets.dashboard(&support, &TicketFilter::default());
    assert_eq!(dashboard.scope, DashboardScope::All);

    let ticket = state
        .tickets
        .update_ticket(&support, "1", TicketUpdate::status(TicketStatus::InProgress))
        .await
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::InProgress);

    let filtered = state.tickets.dashboard(
        &support,
        &TicketFilter::default().with_status(TicketStatus::InProgress),
    );
    assert_eq!(filtered.stats.in_progress, 2);
    assert_eq!(filtered.tickets.len(), 2);
}

#[test]
fn role_switch_follows_config() {
    let state = create_state(false);
    state.sessions.login("john@example.com", "password").unwrap();
    let err = state.sessions.switch_role(Role::Admin).unwrap_err();
    assert_eq!(err.code, ErrorCode::FeatureDisabled);

    let state = create_state(true);
    state.sessions.login("john@example.com", "password").unwrap();
    let admin = state.sessions.switch_role(Role::Admin).unwrap();
    assert_eq!(state.sessions.current_identity(), Some(admin));

    let mut config = Config::with_overrides(true, 0);
    config.environment = "production".into();
    let state = DeskState::initialize(&config).unwrap();
    assert!(state.sessions.switch_role(Role::Support).is_err());
}

#[test]
fn user_directory_is_admin_only() {
    let state = create_state(false);
    let profiles = SeedData::demo().profiles;

    let err = state
        .users
        .list(&profiles.support, &UserFilter::default())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AdminRequired);

    let admin = state.sessions.login("admin@company.com", "password").unwrap();
    let added = state
        .users
        .add(
            &admin,
            UserCreate {
                name: "Lee Chen".into(),
                email: "lee@example.com".into(),
                role: Role::User,
            },
        )
        .unwrap();
    assert_eq!(state.users.stats(&admin).unwrap().total, 6);

    let err = state.users.delete(&admin, &admin.id).unwrap_err();
    assert_eq!(err.code, ErrorCode::UserCannotDeleteSelf);
    state.users.delete(&admin, &added.id).unwrap();
    assert_eq!(state.users.stats(&admin).unwrap().total, 5);
}

#[tokio::test]
async fn seed_file_drives_initial_state() {
    let mut seed = SeedData::demo();
    seed.tickets.truncate(1);
    seed.password = "s3cret".into();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&seed).unwrap().as_bytes())
        .unwrap();

    let mut config = Config::with_overrides(false, 0);
    config.seed_file = Some(file.path().display().to_string());
    let state = DeskState::initialize(&config).unwrap();

    assert!(state.sessions.login("admin@company.com", "password").is_err());
    let admin = state.sessions.login("admin@company.com", "s3cret").unwrap();
    assert_eq!(state.tickets.visible_tickets(&admin).len(), 1);
}
