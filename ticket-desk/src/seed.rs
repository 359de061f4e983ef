//! Seed data
//!
//! 启动时注入的初始数据：角色预置身份、工单和目录用户。
//! 与存储逻辑解耦，可以来自内置演示数据或 JSON 文件。

use std::path::Path;

use serde::{Deserialize, Serialize};
use shared::models::{
    Comment, Identity, Role, RoleProfiles, Ticket, TicketPriority, TicketStatus, UserAccount,
    UserStatus,
};
use shared::util::millis_at;

use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedData {
    /// Sentinel password accepted by the demo resolver
    #[serde(default = "default_password")]
    pub password: String,
    pub profiles: RoleProfiles,
    /// Newest first
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub users: Vec<UserAccount>,
}

fn default_password() -> String {
    "password".to_string()
}

/// UTC instant for fixture dates
fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
    millis_at(year, month, day, hour, minute).unwrap_or_default()
}

fn seed_error(msg: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::SeedLoadFailed, msg)
}

impl SeedData {
    /// Built-in demo dataset
    pub fn demo() -> Self {
        let john = Identity::new("1", "John Doe", "john@example.com", Role::User);
        let sarah = Identity::new("2", "Sarah Support", "sarah@support.com", Role::Support);
        let wilson = Identity::new("3", "Admin Wilson", "admin@company.com", Role::Admin);

        let tickets = vec![
            Ticket {
                id: "1".into(),
                subject: "Login Issue with Mobile App".into(),
                description: "I cannot login to the mobile app. It shows an error message every time I try to authenticate.".into(),
                priority: TicketPriority::High,
                status: TicketStatus::Open,
                author_id: john.id.clone(),
                author_name: john.name.clone(),
                assigned_to: Some(sarah.id.clone()),
                assigned_to_name: Some(sarah.name.clone()),
                created_at: at(2024, 1, 15, 10, 30),
                updated_at: at(2024, 1, 15, 14, 20),
                comments: vec![Comment {
                    id: "1".into(),
                    content: "Thank you for reporting this issue. I'm looking into it now.".into(),
                    author: sarah.name.clone(),
                    author_role: Role::Support,
                    timestamp: at(2024, 1, 15, 14, 20),
                }],
            },
            Ticket {
                id: "2".into(),
                subject: "Feature Request: Dark Mode".into(),
                description: "Could you please add a dark mode option to the application? It would be great for users who work in low-light environments.".into(),
                priority: TicketPriority::Medium,
                status: TicketStatus::InProgress,
                author_id: john.id.clone(),
                author_name: john.name.clone(),
                assigned_to: Some(sarah.id.clone()),
                assigned_to_name: Some(sarah.name.clone()),
                created_at: at(2024, 1, 14, 9, 15),
                updated_at: at(2024, 1, 15, 11, 30),
                comments: vec![Comment {
                    id: "2".into(),
                    content: "This is a great suggestion! I've forwarded it to our development team.".into(),
                    author: sarah.name.clone(),
                    author_role: Role::Support,
                    timestamp: at(2024, 1, 15, 11, 30),
                }],
            },
            Ticket {
                id: "3".into(),
                subject: "Payment Processing Error".into(),
                description: "Getting error code 500 when trying to process payments through the checkout.".into(),
                priority: TicketPriority::Urgent,
                status: TicketStatus::Resolved,
                author_id: john.id.clone(),
                author_name: john.name.clone(),
                assigned_to: Some(wilson.id.clone()),
                assigned_to_name: Some(wilson.name.clone()),
                created_at: at(2024, 1, 13, 16, 45),
                updated_at: at(2024, 1, 14, 8, 0),
                comments: vec![Comment {
                    id: "3".into(),
                    content: "We've identified the issue and deployed a fix. Please try again.".into(),
                    author: wilson.name.clone(),
                    author_role: Role::Admin,
                    timestamp: at(2024, 1, 14, 8, 0),
                }],
            },
        ];

        let account = |who: &Identity, status, created: i64, last_login: i64| UserAccount {
            id: who.id.clone(),
            name: who.name.clone(),
            email: who.email.clone(),
            role: who.role,
            status,
            created_at: created,
            last_login,
        };
        let jane = Identity::new("4", "Jane Smith", "jane@example.com", Role::User);
        let mike = Identity::new("5", "Mike Johnson", "mike@example.com", Role::User);
        let users = vec![
            account(&john, UserStatus::Active, at(2024, 1, 1, 0, 0), at(2024, 1, 15, 0, 0)),
            account(&sarah, UserStatus::Active, at(2023, 12, 15, 0, 0), at(2024, 1, 15, 0, 0)),
            account(&wilson, UserStatus::Active, at(2023, 11, 1, 0, 0), at(2024, 1, 15, 0, 0)),
            account(&jane, UserStatus::Active, at(2024, 1, 10, 0, 0), at(2024, 1, 14, 0, 0)),
            account(&mike, UserStatus::Inactive, at(2023, 12, 1, 0, 0), at(2023, 12, 20, 0, 0)),
        ];

        Self {
            password: default_password(),
            profiles: RoleProfiles {
                user: john,
                support: sarah,
                admin: wilson,
            },
            tickets,
            users,
        }
    }

    /// Load a seed from a JSON file
    ///
    /// I/O, parse and profile-consistency failures map to `SeedLoadFailed`.
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            seed_error(format!("Failed to read seed file: {}", e))
                .with_detail("path", path.display().to_string())
        })?;
        let seed: SeedData = serde_json::from_str(&raw).map_err(|e| {
            seed_error(format!("Invalid seed file: {}", e))
                .with_detail("path", path.display().to_string())
        })?;
        if !seed.profiles.is_consistent() {
            return Err(seed_error("Each role profile must carry its own role")
                .with_detail("path", path.display().to_string()));
        }
        tracing::info!(
            path = %path.display(),
            tickets = seed.tickets.len(),
            users = seed.users.len(),
            "Seed data loaded"
        );
        Ok(seed)
    }
}
