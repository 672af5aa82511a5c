//! Integration tests for link CRUD against a real database: defaults,
//! order assignment, partial updates, owner scoping, and click counting.

use sqlx::PgPool;

use flowfolio_db::models::link::{CreateLink, UpdateLink};
use flowfolio_db::models::project::CreateProject;
use flowfolio_db::models::user::CreateUser;
use flowfolio_db::repositories::{LinkRepo, ProjectRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            full_name: "Test User".into(),
            email: email.into(),
            password_hash: "$argon2id$fake".into(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_project(pool: &PgPool, user_id: i64, slug: &str) -> i64 {
    ProjectRepo::create(
        pool,
        &CreateProject {
            user_id,
            title: "My Links".into(),
            project_type: "Link Page".into(),
            slug: slug.into(),
        },
    )
    .await
    .unwrap()
    .id
}

fn new_link(project_id: i64, user_id: i64, title: &str, order: i32) -> CreateLink {
    CreateLink {
        project_id,
        user_id,
        title: title.into(),
        url: format!("https://example.com/{}", title.to_lowercase()),
        display_order: order,
        is_active: None,
        icon: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_first_link_defaults(pool: PgPool) {
    // Scenario: fresh project, one link -- order 0, active by default.
    let user_id = seed_user(&pool, "a@example.com").await;
    let project_id = seed_project(&pool, user_id, "my-links").await;

    let order = LinkRepo::next_display_order(&pool, project_id, user_id)
        .await
        .unwrap();
    assert_eq!(order, 0);

    let link = LinkRepo::create(&pool, &new_link(project_id, user_id, "Site", order))
        .await
        .unwrap();
    assert_eq!(link.display_order, 0);
    assert!(link.is_active);
    assert_eq!(link.clicks, 0);
}

#[sqlx::test]
async fn test_next_display_order_skips_gaps(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let project_id = seed_project(&pool, user_id, "my-links").await;

    LinkRepo::create(&pool, &new_link(project_id, user_id, "One", 0))
        .await
        .unwrap();
    LinkRepo::create(&pool, &new_link(project_id, user_id, "Two", 7))
        .await
        .unwrap();

    let next = LinkRepo::next_display_order(&pool, project_id, user_id)
        .await
        .unwrap();
    // max + 1, not row count.
    assert_eq!(next, 8);
}

#[sqlx::test]
async fn test_list_ordered_by_display_order(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let project_id = seed_project(&pool, user_id, "my-links").await;

    LinkRepo::create(&pool, &new_link(project_id, user_id, "Second", 1))
        .await
        .unwrap();
    LinkRepo::create(&pool, &new_link(project_id, user_id, "First", 0))
        .await
        .unwrap();

    let links = LinkRepo::list_for_project(&pool, project_id, user_id)
        .await
        .unwrap();
    let titles: Vec<&str> = links.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[sqlx::test]
async fn test_partial_update_preserves_unset_fields(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let project_id = seed_project(&pool, user_id, "my-links").await;

    let mut input = new_link(project_id, user_id, "Site", 3);
    input.icon = Some("star".into());
    let link = LinkRepo::create(&pool, &input).await.unwrap();

    let updated = LinkRepo::update(
        &pool,
        link.id,
        project_id,
        user_id,
        &UpdateLink {
            title: Some("Renamed".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.display_order, 3);
    assert_eq!(updated.icon.as_deref(), Some("star"));
    assert_eq!(updated.url, link.url);
}

#[sqlx::test]
async fn test_owner_scoping_hides_foreign_links(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let intruder = seed_user(&pool, "intruder@example.com").await;
    let project_id = seed_project(&pool, owner, "owned").await;

    let link = LinkRepo::create(&pool, &new_link(project_id, owner, "Site", 0))
        .await
        .unwrap();

    // A different user id sees nothing and mutates nothing, even with the
    // right project and link ids.
    let listed = LinkRepo::list_for_project(&pool, project_id, intruder)
        .await
        .unwrap();
    assert!(listed.is_empty());

    let updated = LinkRepo::update(
        &pool,
        link.id,
        project_id,
        intruder,
        &UpdateLink {
            title: Some("Hijacked".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(updated.is_none());

    let deleted = LinkRepo::delete(&pool, link.id, project_id, intruder)
        .await
        .unwrap();
    assert!(!deleted);

    // The owner still sees the untouched row.
    let kept = LinkRepo::find_by_id(&pool, link.id, project_id, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.title, "Site");
}

#[sqlx::test]
async fn test_delete_project_cascades_links(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let project_id = seed_project(&pool, user_id, "my-links").await;
    let link = LinkRepo::create(&pool, &new_link(project_id, user_id, "Site", 0))
        .await
        .unwrap();

    assert!(ProjectRepo::delete(&pool, project_id, user_id).await.unwrap());

    let gone = LinkRepo::find_by_id(&pool, link.id, project_id, user_id)
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[sqlx::test]
async fn test_record_click_counts_active_only(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let project_id = seed_project(&pool, user_id, "my-links").await;
    let link = LinkRepo::create(&pool, &new_link(project_id, user_id, "Site", 0))
        .await
        .unwrap();

    assert!(LinkRepo::record_click(&pool, link.id).await.unwrap());
    assert!(LinkRepo::record_click(&pool, link.id).await.unwrap());

    let counted = LinkRepo::find_by_id(&pool, link.id, project_id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(counted.clicks, 2);

    // Deactivated links stop counting.
    LinkRepo::update(
        &pool,
        link.id,
        project_id,
        user_id,
        &UpdateLink {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(!LinkRepo::record_click(&pool, link.id).await.unwrap());
}

#[sqlx::test]
async fn test_duplicate_email_rejected(pool: PgPool) {
    seed_user(&pool, "dup@example.com").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            full_name: "Other".into(),
            email: "dup@example.com".into(),
            password_hash: "$argon2id$fake".into(),
        },
    )
    .await
    .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_users_email"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}
