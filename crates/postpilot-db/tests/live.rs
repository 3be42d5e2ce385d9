//! Live integration tests for postpilot-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/postpilot-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use chrono::{Duration, Utc};
use postpilot_core::{
    BrandColors, BrandGuideUpdate, NewBrandGuide, NewWorkspace, Platform, PostStatus,
    WorkspacePatch, WorkspaceSettings,
};
use postpilot_db::{
    create_brand_guide, create_workspace, delete_workspace, get_brand_guide, get_workspace,
    insert_connection, list_connections_for_workspace, list_workspaces_for_owner,
    update_workspace, upsert_brand_guide, DbError, NewConnection,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_workspace(owner_id: Uuid, name: &str) -> NewWorkspace {
    NewWorkspace {
        name: name.to_string(),
        kind: "business".to_string(),
        color: "from-emerald-500 to-emerald-600".to_string(),
        owner_id,
        settings: WorkspaceSettings::default().to_value(),
    }
}

fn connection(workspace_id: Uuid, platform: &'static str) -> NewConnection<'static> {
    NewConnection {
        workspace_id,
        platform,
        platform_user_id: "user-1",
        platform_username: Some("@techcorp"),
        access_token: "secret-token",
        expires_at: None,
        status: "active",
    }
}

// ---------------------------------------------------------------------------
// Workspaces
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn workspaces_list_only_owner_rows_in_creation_order(pool: sqlx::PgPool) {
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();

    let first = create_workspace(&pool, &new_workspace(owner, "First"))
        .await
        .expect("create first");
    let second = create_workspace(&pool, &new_workspace(owner, "Second"))
        .await
        .expect("create second");
    create_workspace(&pool, &new_workspace(other, "Foreign"))
        .await
        .expect("create foreign");

    let rows = list_workspaces_for_owner(&pool, owner)
        .await
        .expect("list_workspaces_for_owner failed");

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_workspace_overwrites_only_supplied_fields(pool: sqlx::PgPool) {
    let created = create_workspace(&pool, &new_workspace(Uuid::new_v4(), "TechCorp Inc."))
        .await
        .expect("create");

    let updated = update_workspace(
        &pool,
        created.id,
        created.owner_id,
        &WorkspacePatch {
            name: Some("TechCorp".to_string()),
            ..WorkspacePatch::default()
        },
    )
    .await
    .expect("update_workspace failed");

    assert_eq!(updated.name, "TechCorp");
    assert_eq!(updated.kind, created.kind);
    assert_eq!(updated.color, created.color);
    assert_eq!(updated.settings, created.settings);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_missing_workspace_is_not_found(pool: sqlx::PgPool) {
    let result = update_workspace(
        &pool,
        Uuid::new_v4(),
        Uuid::new_v4(),
        &WorkspacePatch::default(),
    )
    .await;
    assert!(matches!(result, Err(DbError::NotFound)));
}

#[sqlx::test(migrations = "../../migrations")]
async fn writes_by_another_owner_are_not_found(pool: sqlx::PgPool) {
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let ws = create_workspace(&pool, &new_workspace(owner, "Theirs"))
        .await
        .expect("create");

    let renamed = update_workspace(
        &pool,
        ws.id,
        intruder,
        &WorkspacePatch {
            name: Some("Hijacked".to_string()),
            ..WorkspacePatch::default()
        },
    )
    .await;
    assert!(matches!(renamed, Err(DbError::NotFound)));

    let deleted = delete_workspace(&pool, ws.id, intruder).await;
    assert!(matches!(deleted, Err(DbError::NotFound)));

    let stored = get_workspace(&pool, ws.id)
        .await
        .expect("get")
        .expect("workspace survives");
    assert_eq!(stored.name, "Theirs");
    assert_eq!(stored.owner_id, owner);
}

#[sqlx::test(migrations = "../../migrations")]
async fn delete_workspace_cascades_connections_and_guide(pool: sqlx::PgPool) {
    let ws = create_workspace(&pool, &new_workspace(Uuid::new_v4(), "Doomed"))
        .await
        .expect("create");
    insert_connection(&pool, &connection(ws.id, "twitter"))
        .await
        .expect("insert_connection");
    create_brand_guide(
        &pool,
        &NewBrandGuide {
            workspace_id: ws.id,
            domain: None,
        },
    )
    .await
    .expect("create_brand_guide");

    delete_workspace(&pool, ws.id, ws.owner_id)
        .await
        .expect("delete");

    assert!(get_workspace(&pool, ws.id).await.expect("get").is_none());
    assert!(list_connections_for_workspace(&pool, ws.id)
        .await
        .expect("list")
        .is_empty());
    assert!(get_brand_guide(&pool, ws.id).await.expect("guide").is_none());

    let again = delete_workspace(&pool, ws.id, ws.owner_id).await;
    assert!(matches!(again, Err(DbError::NotFound)));
}

// ---------------------------------------------------------------------------
// Platform connections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn connections_are_scoped_to_workspace(pool: sqlx::PgPool) {
    let owner = Uuid::new_v4();
    let a = create_workspace(&pool, &new_workspace(owner, "A")).await.expect("a");
    let b = create_workspace(&pool, &new_workspace(owner, "B")).await.expect("b");

    let mut linkedin = connection(a.id, "linkedin");
    linkedin.expires_at = Some(Utc::now() + Duration::days(5));
    insert_connection(&pool, &connection(a.id, "twitter")).await.expect("twitter");
    insert_connection(&pool, &linkedin).await.expect("linkedin");
    insert_connection(&pool, &connection(b.id, "instagram")).await.expect("instagram");

    let rows = list_connections_for_workspace(&pool, a.id)
        .await
        .expect("list_connections_for_workspace failed");

    let platforms: Vec<&str> = rows.iter().map(|r| r.platform.as_str()).collect();
    assert_eq!(platforms, vec!["linkedin", "twitter"]);
    assert!(rows.iter().all(|r| r.workspace_id == a.id));
    assert!(rows[0].expires_at.is_some());
}

#[sqlx::test(migrations = "../../migrations")]
async fn unknown_platform_violates_check_constraint(pool: sqlx::PgPool) {
    let ws = create_workspace(&pool, &new_workspace(Uuid::new_v4(), "A")).await.expect("a");

    let result = insert_connection(&pool, &connection(ws.id, "myspace")).await;
    assert!(matches!(result, Err(DbError::Sqlx(_))));
}

#[sqlx::test(migrations = "../../migrations")]
async fn every_known_platform_satisfies_check_constraint(pool: sqlx::PgPool) {
    let ws = create_workspace(&pool, &new_workspace(Uuid::new_v4(), "A")).await.expect("a");

    for platform in Platform::ALL {
        let row = insert_connection(&pool, &connection(ws.id, platform.as_str()))
            .await
            .expect("insert_connection failed");
        let conn = postpilot_core::PlatformConnection::from(row);
        assert_eq!(conn.platform_kind(), Some(platform));
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn every_post_status_satisfies_check_constraint(pool: sqlx::PgPool) {
    let ws = create_workspace(&pool, &new_workspace(Uuid::new_v4(), "A")).await.expect("a");

    for status in PostStatus::ALL {
        sqlx::query("INSERT INTO posts (workspace_id, content, status) VALUES ($1, 'hello', $2)")
            .bind(ws.id)
            .bind(status.as_str())
            .execute(&pool)
            .await
            .expect("insert post");
    }

    let stored: Vec<String> =
        sqlx::query_scalar("SELECT status FROM posts WHERE workspace_id = $1 ORDER BY status")
            .bind(ws.id)
            .fetch_all(&pool)
            .await
            .expect("select statuses");
    assert!(stored.iter().all(|s| PostStatus::parse(s).is_some()));
    assert_eq!(stored.len(), PostStatus::ALL.len());
}

// ---------------------------------------------------------------------------
// Brand guides
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn created_brand_guide_uses_column_defaults(pool: sqlx::PgPool) {
    let ws = create_workspace(&pool, &new_workspace(Uuid::new_v4(), "A")).await.expect("a");

    let guide = create_brand_guide(
        &pool,
        &NewBrandGuide {
            workspace_id: ws.id,
            domain: Some("acme.com".to_string()),
        },
    )
    .await
    .expect("create_brand_guide failed");

    assert_eq!(guide.colors.0, BrandColors::guide_defaults());
    assert_eq!(guide.heading_font, "inter");
    assert_eq!(guide.voice_tones, vec!["professional", "friendly"]);
    assert_eq!(guide.domain.as_deref(), Some("acme.com"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_brand_guide_inserts_then_overlays(pool: sqlx::PgPool) {
    let ws = create_workspace(&pool, &new_workspace(Uuid::new_v4(), "A")).await.expect("a");

    let inserted = upsert_brand_guide(
        &pool,
        ws.id,
        &BrandGuideUpdate {
            tagline: Some("Building the future, today.".to_string()),
            ..BrandGuideUpdate::default()
        },
    )
    .await
    .expect("first upsert");
    assert_eq!(inserted.body_font, "inter");
    assert_eq!(inserted.tagline.as_deref(), Some("Building the future, today."));

    let colors = BrandColors {
        primary: "#635BFF".to_string(),
        secondary: "#0A2540".to_string(),
        accent: "#00D4FF".to_string(),
        background: "#FFFFFF".to_string(),
    };
    let overlaid = upsert_brand_guide(
        &pool,
        ws.id,
        &BrandGuideUpdate {
            colors: Some(colors.clone()),
            heading_font: Some("Sohne".to_string()),
            ..BrandGuideUpdate::default()
        },
    )
    .await
    .expect("second upsert");

    assert_eq!(overlaid.id, inserted.id);
    assert_eq!(overlaid.colors.0, colors);
    assert_eq!(overlaid.heading_font, "Sohne");
    assert_eq!(overlaid.body_font, "inter");
    assert_eq!(
        overlaid.tagline.as_deref(),
        Some("Building the future, today.")
    );
}
