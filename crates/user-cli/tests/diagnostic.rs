//! Diagnostic command against the in-memory stores

use std::sync::Arc;

use user_cache::InMemorySessionStore;
use user_cli::run_diagnostic;
use user_core::UserRecord;
use user_db::InMemoryUserRepository;
use user_service::{placeholder_username, ServiceContext};

fn context() -> ServiceContext {
    ServiceContext::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemorySessionStore::new()),
    )
}

async fn run(ctx: &ServiceContext) -> String {
    let mut out = Vec::new();
    run_diagnostic(ctx, &mut out)
        .await
        .expect("diagnostic should succeed");
    String::from_utf8(out).expect("output is utf-8")
}

#[tokio::test]
async fn test_first_run_lists_one_user() {
    let ctx = context();
    let output = run(&ctx).await;

    let users = ctx.user_repo().query_all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(
        output,
        format!("Start\n\n{}\n\nEnd\n", users[0].username())
    );
    assert_eq!(users[0].username(), placeholder_username(&users[0]));
}

#[tokio::test]
async fn test_runs_accumulate_newest_first() {
    let ctx = context();
    run(&ctx).await;
    run(&ctx).await;
    let output = run(&ctx).await;

    let users = ctx.user_repo().query_all().await.unwrap();
    let ids: Vec<_> = users.iter().filter_map(UserRecord::id).collect();
    assert_eq!(ids, [3, 2, 1]);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.first(), Some(&"Start"));
    assert_eq!(lines.last(), Some(&"End"));
    assert_eq!(lines.len(), 3 + 4);
    assert_eq!(&lines[2..5], users.iter().map(UserRecord::username).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_persisted_user_has_defaults() {
    let ctx = context();
    run(&ctx).await;

    let user = ctx.user_repo().find_by_id(1).await.unwrap().unwrap();
    assert!(user.is_active());
    assert!(user.has_role("ROLE_USER"));
    assert_eq!(user.plain_password(), None);
    assert_eq!(user.api_key().len(), 40);
}
