use anyhow::Context;
use chrono::DateTime;
use shared::models::Role;
use ticket_desk::{DeskState, TicketFilter, print_banner, setup_environment};

fn format_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment();

    print_banner();

    // 2. 初始化状态
    let state = DeskState::initialize(&config).context("failed to initialize ticket desk")?;

    // 3. 演示登录
    let email = std::env::var("DEMO_EMAIL").unwrap_or_else(|_| "john@example.com".into());
    let password = std::env::var("DEMO_PASSWORD").unwrap_or_else(|_| "password".into());
    let mut me = state
        .sessions
        .login(&email, &password)
        .with_context(|| format!("demo login failed for {}", email))?;

    // 可选: 演示角色切换 (需 ALLOW_ROLE_SWITCH=true 且非生产环境)
    if let Ok(raw) = std::env::var("DEMO_ROLE") {
        let role: Role = raw.parse().map_err(anyhow::Error::msg)?;
        match state.sessions.switch_role(role) {
            Ok(identity) => me = identity,
            Err(e) => tracing::warn!(role = %role, "Role switch skipped: {}", e),
        }
    }

    // 4. 仪表盘
    let dashboard = state.tickets.dashboard(&me, &TicketFilter::default());
    println!("Signed in as {} ({})", me.name, me.role);
    println!(
        "Tickets: {} total, {} open, {} in progress, {} resolved, {} closed",
        dashboard.stats.total,
        dashboard.stats.open,
        dashboard.stats.in_progress,
        dashboard.stats.resolved,
        dashboard.stats.closed
    );
    for ticket in &dashboard.tickets {
        println!(
            "  #{:<4} [{:<11}] [{:<6}] {} (updated {}, {} comments)",
            ticket.id,
            ticket.status,
            ticket.priority,
            ticket.subject,
            format_millis(ticket.updated_at),
            ticket.comments.len()
        );
    }

    state.sessions.logout();
    Ok(())
}
