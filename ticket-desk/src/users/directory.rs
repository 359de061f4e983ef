//! UserDirectory - admin-managed account list
//!
//! 所有操作都要求 `Action::ManageUsers`（仅管理员）。

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared::models::{Identity, Role, UserAccount, UserCreate, UserStatus};
use shared::util::snowflake_id;

use crate::auth::{Action, authorize};
use crate::core::clock::{Clock, SystemClock};
use crate::security_log;
use crate::utils::validation::{MAX_SUBJECT_LEN, validate_email, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Directory list filter (AND of all set criteria)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    /// Case-insensitive substring of name or email
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub status: Option<UserStatus>,
}

impl UserFilter {
    pub fn matches(&self, user: &UserAccount) -> bool {
        let search_ok = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                user.name.to_lowercase().contains(&term) || user.email.to_lowercase().contains(&term)
            }
        };
        search_ok
            && self.role.is_none_or(|r| user.role == r)
            && self.status.is_none_or(|s| user.status == s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub support: usize,
    pub admin: usize,
}

pub struct UserDirectory {
    /// Newest first
    users: RwLock<Vec<UserAccount>>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDirectory")
            .field("users", &self.users.read().len())
            .finish()
    }
}

impl UserDirectory {
    pub fn new(users: Vec<UserAccount>) -> AppResult<Self> {
        Self::with_clock(users, Box::new(SystemClock))
    }

    /// Seed accounts follow the same rule as `add`: emails are unique,
    /// compared case-insensitively.
    pub fn with_clock(users: Vec<UserAccount>, clock: Box<dyn Clock>) -> AppResult<Self> {
        for (idx, user) in users.iter().enumerate() {
            if users[..idx]
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(&user.email))
            {
                return Err(AppError::new(ErrorCode::UserEmailExists)
                    .with_detail("email", user.email.as_str()));
            }
        }
        Ok(Self {
            users: RwLock::new(users),
            clock,
        })
    }

    pub fn list(&self, actor: &Identity, filter: &UserFilter) -> AppResult<Vec<UserAccount>> {
        authorize(actor, Action::ManageUsers)?;
        Ok(self
            .users
            .read()
            .iter()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect())
    }

    /// Add an active account and prepend it
    pub fn add(&self, actor: &Identity, payload: UserCreate) -> AppResult<UserAccount> {
        authorize(actor, Action::ManageUsers)?;
        let name = validate_required_text(&payload.name, "name", MAX_SUBJECT_LEN)?;
        let email = validate_email(&payload.email)?;

        let mut users = self.users.write();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(AppError::new(ErrorCode::UserEmailExists).with_detail("email", email));
        }

        let mut id = snowflake_id().to_string();
        while users.iter().any(|u| u.id == id) {
            id = snowflake_id().to_string();
        }
        let now = self.clock.now_millis();
        let user = UserAccount {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: payload.role,
            status: UserStatus::Active,
            created_at: now,
            last_login: now,
        };
        users.insert(0, user.clone());
        security_log!(
            "INFO",
            "user_added",
            admin_id = actor.id.as_str(),
            user_id = user.id.as_str(),
            user_role = user.role.as_str()
        );
        Ok(user)
    }

    pub fn change_role(&self, actor: &Identity, id: &str, role: Role) -> AppResult<UserAccount> {
        authorize(actor, Action::ManageUsers)?;
        let user = self.modify(id, |u| u.role = role)?;
        security_log!(
            "INFO",
            "user_role_changed",
            admin_id = actor.id.as_str(),
            user_id = id,
            user_role = role.as_str()
        );
        Ok(user)
    }

    /// Flip active/inactive
    pub fn toggle_status(&self, actor: &Identity, id: &str) -> AppResult<UserAccount> {
        authorize(actor, Action::ManageUsers)?;
        let user = self.modify(id, |u| u.status = u.status.toggled())?;
        tracing::info!(user_id = %id, status = ?user.status, "User status toggled");
        Ok(user)
    }

    /// Remove an account. Admins cannot remove themselves.
    pub fn delete(&self, actor: &Identity, id: &str) -> AppResult<UserAccount> {
        authorize(actor, Action::ManageUsers)?;
        if actor.id == id {
            return Err(AppError::new(ErrorCode::UserCannotDeleteSelf).with_detail("user_id", id));
        }
        let mut users = self.users.write();
        let idx = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| AppError::user_not_found(id))?;
        let removed = users.remove(idx);
        security_log!(
            "WARN",
            "user_deleted",
            admin_id = actor.id.as_str(),
            user_id = id
        );
        Ok(removed)
    }

    pub fn stats(&self, actor: &Identity) -> AppResult<UserStats> {
        authorize(actor, Action::ManageUsers)?;
        let users = self.users.read();
        Ok(UserStats {
            total: users.len(),
            active: users.iter().filter(|u| u.status == UserStatus::Active).count(),
            support: users.iter().filter(|u| u.role == Role::Support).count(),
            admin: users.iter().filter(|u| u.role == Role::Admin).count(),
        })
    }

    fn modify(&self, id: &str, f: impl FnOnce(&mut UserAccount)) -> AppResult<UserAccount> {
        let mut users = self.users.write();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::user_not_found(id))?;
        f(user);
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    fn create_test_directory() -> UserDirectory {
        UserDirectory::new(SeedData::demo().users).unwrap()
    }

    fn admin() -> Identity {
        SeedData::demo().profiles.admin
    }

    #[test]
    fn test_non_admin_denied() {
        let dir = create_test_directory();
        let profiles = SeedData::demo().profiles;
        for actor in [&profiles.user, &profiles.support] {
            let err = dir.list(actor, &UserFilter::default()).unwrap_err();
            assert_eq!(err.code, ErrorCode::AdminRequired);
            assert!(dir.stats(actor).is_err());
            assert!(dir.toggle_status(actor, "4").is_err());
        }
    }

    #[test]
    fn test_list_filter() {
        let dir = create_test_directory();
        let all = dir.list(&admin(), &UserFilter::default()).unwrap();
        assert_eq!(all.len(), 5);

        let filter = UserFilter {
            search: Some("EXAMPLE.com".into()),
            status: Some(UserStatus::Active),
            ..Default::default()
        };
        let names: Vec<String> = dir
            .list(&admin(), &filter)
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["John Doe", "Jane Smith"]);

        let filter = UserFilter {
            role: Some(Role::Support),
            ..Default::default()
        };
        assert_eq!(dir.list(&admin(), &filter).unwrap().len(), 1);
    }

    #[test]
    fn test_add_user() {
        let dir = create_test_directory();
        let user = dir
            .add(
                &admin(),
                UserCreate {
                    name: "  Lee Chen ".into(),
                    email: "lee@example.com".into(),
                    role: Role::Support,
                },
            )
            .unwrap();
        assert_eq!(user.name, "Lee Chen");
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.created_at, user.last_login);

        let all = dir.list(&admin(), &UserFilter::default()).unwrap();
        assert_eq!(all[0].id, user.id);
        assert_eq!(dir.stats(&admin()).unwrap().support, 2);
    }

    #[test]
    fn test_add_rejects_blank_and_duplicate() {
        let dir = create_test_directory();
        let err = dir
            .add(
                &admin(),
                UserCreate {
                    name: " ".into(),
                    email: "x@example.com".into(),
                    role: Role::User,
                },
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = dir
            .add(
                &admin(),
                UserCreate {
                    name: "John Again".into(),
                    email: "JOHN@example.com".into(),
                    role: Role::User,
                },
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserEmailExists);
        assert_eq!(dir.stats(&admin()).unwrap().total, 5);
    }

    #[test]
    fn test_change_role_and_toggle() {
        let dir = create_test_directory();
        let user = dir.change_role(&admin(), "4", Role::Support).unwrap();
        assert_eq!(user.role, Role::Support);

        let user = dir.toggle_status(&admin(), "5").unwrap();
        assert_eq!(user.status, UserStatus::Active);
        let user = dir.toggle_status(&admin(), "5").unwrap();
        assert_eq!(user.status, UserStatus::Inactive);

        let err = dir.toggle_status(&admin(), "99").unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[test]
    fn test_delete() {
        let dir = create_test_directory();
        let err = dir.delete(&admin(), "3").unwrap_err();
        assert_eq!(err.code, ErrorCode::UserCannotDeleteSelf);

        let removed = dir.delete(&admin(), "5").unwrap();
        assert_eq!(removed.name, "Mike Johnson");
        assert_eq!(dir.delete(&admin(), "5").unwrap_err().code, ErrorCode::UserNotFound);
    }

    #[test]
    fn test_stats() {
        let dir = create_test_directory();
        assert_eq!(
            dir.stats(&admin()).unwrap(),
            UserStats {
                total: 5,
                active: 4,
                support: 1,
                admin: 1,
            }
        );
    }

    #[test]
    fn test_seed_rejects_duplicate_email() {
        let mut users = SeedData::demo().users;
        users[1].email = users[0].email.to_uppercase();
        let err = UserDirectory::new(users).unwrap_err();
        assert_eq!(err.code, ErrorCode::UserEmailExists);
    }

    #[test]
    fn test_search_term_is_not_trimmed() {
        let dir = create_test_directory();
        let filter = UserFilter {
            search: Some(" smith".into()),
            ..Default::default()
        };
        let hits = dir.list(&admin(), &filter).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Jane Smith");

        let filter = UserFilter {
            search: Some(" jane".into()),
            ..Default::default()
        };
        assert!(dir.list(&admin(), &filter).unwrap().is_empty());
    }
}
