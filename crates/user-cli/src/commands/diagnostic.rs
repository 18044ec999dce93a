//! `app:test` - store round trip check

use std::io::Write;

use tracing::{info, instrument};
use user_common::{AppError, AppResult};
use user_service::{ServiceContext, UserService};

/// Persist a default user, then print every stored username
///
/// Output is `Start`, a blank line, one username per line (id descending),
/// a blank line, and `End`.
#[instrument(skip_all)]
pub async fn run_diagnostic<W: Write>(ctx: &ServiceContext, out: &mut W) -> AppResult<()> {
    let users = UserService::new(ctx);

    let created = users.create_default().await?;
    info!(user_id = ?created.id(), "Diagnostic user persisted");

    let all = users.list().await?;

    let mut report = String::from("Start\n\n");
    for user in &all {
        report.push_str(user.username());
        report.push('\n');
    }
    report.push_str("\nEnd\n");

    out.write_all(report.as_bytes()).map_err(AppError::internal)?;
    out.flush().map_err(AppError::internal)?;

    info!(count = all.len(), "Diagnostic finished");
    Ok(())
}
