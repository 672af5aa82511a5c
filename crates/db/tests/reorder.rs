//! Integration tests for bulk reorder persistence and the Postgres-backed
//! editor gateway: contiguity after reorder, transactional all-or-nothing
//! semantics, and rollback observed through the link collection.

use sqlx::PgPool;

use flowfolio_core::editor::LinkCollection;
use flowfolio_core::form::LinkForm;
use flowfolio_core::gateway::{LinkGateway, LinkRecord};
use flowfolio_core::order;
use flowfolio_db::gateway::PgLinkGateway;
use flowfolio_db::models::link::CreateLink;
use flowfolio_db::models::project::CreateProject;
use flowfolio_db::models::user::CreateUser;
use flowfolio_db::repositories::{LinkRepo, ProjectRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_page(pool: &PgPool) -> (i64, i64) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            full_name: "Test User".into(),
            email: "reorder@example.com".into(),
            password_hash: "$argon2id$fake".into(),
        },
    )
    .await
    .unwrap();

    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            user_id: user.id,
            title: "My Links".into(),
            project_type: "Link Page".into(),
            slug: "reorder-page".into(),
        },
    )
    .await
    .unwrap();

    (project.id, user.id)
}

async fn seed_links(pool: &PgPool, project_id: i64, user_id: i64, titles: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for (order, title) in titles.iter().enumerate() {
        let link = LinkRepo::create(
            pool,
            &CreateLink {
                project_id,
                user_id,
                title: (*title).into(),
                url: format!("https://example.com/{order}"),
                display_order: order as i32,
                is_active: None,
                icon: None,
            },
        )
        .await
        .unwrap();
        ids.push(link.id);
    }
    ids
}

async fn ordered_titles(pool: &PgPool, project_id: i64, user_id: i64) -> Vec<String> {
    LinkRepo::list_for_project(pool, project_id, user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.title)
        .collect()
}

// ---------------------------------------------------------------------------
// Repository-level reorder
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_bulk_reorder_persists_contiguous_orders(pool: PgPool) {
    let (project_id, user_id) = seed_page(&pool).await;
    let ids = seed_links(&pool, project_id, user_id, &["A", "B", "C"]).await;

    // Drag C to the front: the permutation plan carries every changed row.
    let records: Vec<LinkRecord> = LinkRepo::list_for_project(&pool, project_id, user_id)
        .await
        .unwrap()
        .into_iter()
        .map(LinkRecord::from)
        .collect();
    let plan = order::plan_permutation(&records, &[ids[2], ids[0], ids[1]]).unwrap();

    LinkRepo::update_order_bulk(&pool, project_id, user_id, &plan.changes)
        .await
        .unwrap();

    assert_eq!(
        ordered_titles(&pool, project_id, user_id).await,
        vec!["C", "A", "B"]
    );
    let orders: Vec<i32> = LinkRepo::list_for_project(&pool, project_id, user_id)
        .await
        .unwrap()
        .iter()
        .map(|l| l.display_order)
        .collect();
    assert!(order::is_contiguous(&orders));
}

#[sqlx::test]
async fn test_bulk_reorder_is_all_or_nothing(pool: PgPool) {
    let (project_id, user_id) = seed_page(&pool).await;
    let ids = seed_links(&pool, project_id, user_id, &["A", "B", "C"]).await;

    // One assignment targets a row that no longer exists: the whole batch
    // must roll back, leaving the stored order untouched.
    let changes = vec![(ids[2], 0), (999_999, 1), (ids[1], 2)];
    let err = LinkRepo::update_order_bulk(&pool, project_id, user_id, &changes)
        .await
        .unwrap_err();
    assert!(matches!(err, sqlx::Error::RowNotFound));

    assert_eq!(
        ordered_titles(&pool, project_id, user_id).await,
        vec!["A", "B", "C"]
    );
}

// ---------------------------------------------------------------------------
// Editor over the Postgres gateway
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_collection_reorder_through_pg_gateway(pool: PgPool) {
    let (project_id, user_id) = seed_page(&pool).await;
    seed_links(&pool, project_id, user_id, &["A", "B", "C"]).await;

    let gateway = PgLinkGateway::new(pool.clone(), project_id, user_id);
    let mut collection = LinkCollection::new(gateway);
    collection.load().await.unwrap();

    // Drag C (index 2) to position 0.
    collection.reorder(2, 0).await.unwrap();

    let local: Vec<&str> = collection.links().iter().map(|l| l.title.as_str()).collect();
    assert_eq!(local, vec!["C", "A", "B"]);
    assert_eq!(
        ordered_titles(&pool, project_id, user_id).await,
        vec!["C", "A", "B"]
    );
}

#[sqlx::test]
async fn test_collection_rolls_back_when_row_vanishes(pool: PgPool) {
    let (project_id, user_id) = seed_page(&pool).await;
    let ids = seed_links(&pool, project_id, user_id, &["A", "B", "C"]).await;

    let gateway = PgLinkGateway::new(pool.clone(), project_id, user_id);
    let mut collection = LinkCollection::new(gateway);
    collection.load().await.unwrap();

    // A disappears behind the editor's back (another tab deleted it), so
    // persisting the drag fails and the visible list reverts wholesale.
    LinkRepo::delete(&pool, ids[0], project_id, user_id)
        .await
        .unwrap();

    let result = collection.reorder(2, 0).await;
    assert!(result.is_err());

    let local: Vec<&str> = collection.links().iter().map(|l| l.title.as_str()).collect();
    assert_eq!(local, vec!["A", "B", "C"]);
}

#[sqlx::test]
async fn test_collection_create_through_pg_gateway(pool: PgPool) {
    let (project_id, user_id) = seed_page(&pool).await;

    let gateway = PgLinkGateway::new(pool.clone(), project_id, user_id);
    let mut collection = LinkCollection::new(gateway);
    collection.load().await.unwrap();

    let form = LinkForm {
        title: "Site".into(),
        url: "https://example.com".into(),
        is_active: true,
        icon: None,
    };
    collection.create(&form).await.unwrap();

    assert_eq!(collection.links().len(), 1);
    assert_eq!(collection.links()[0].display_order, 0);
    assert_eq!(
        ordered_titles(&pool, project_id, user_id).await,
        vec!["Site"]
    );
}

#[sqlx::test]
async fn test_gateway_list_is_owner_scoped(pool: PgPool) {
    let (project_id, user_id) = seed_page(&pool).await;
    seed_links(&pool, project_id, user_id, &["A"]).await;

    // A gateway scoped to a different user sees an empty project.
    let foreign = PgLinkGateway::new(pool.clone(), project_id, user_id + 1);
    let links = foreign.list().await.unwrap();
    assert!(links.is_empty());
}
