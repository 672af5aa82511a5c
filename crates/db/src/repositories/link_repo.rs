//! Repository for the `links` table.
//!
//! Every owner-facing statement is scoped by `(project_id, user_id)` on top
//! of the primary key, mirroring the row-level authorization the public API
//! enforces. Only [`record_click`](LinkRepo::record_click) runs unscoped --
//! it serves the public page.

use sqlx::PgPool;

use flowfolio_core::types::DbId;

use crate::models::link::{CreateLink, Link, UpdateLink};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, title, url, display_order, \
                        is_active, icon, clicks, created_at, updated_at";

/// Provides CRUD operations for links.
pub struct LinkRepo;

impl LinkRepo {
    /// Insert a new link, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLink) -> Result<Link, sqlx::Error> {
        let query = format!(
            "INSERT INTO links (project_id, user_id, title, url, display_order, is_active, icon) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true), $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Link>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.url)
            .bind(input.display_order)
            .bind(input.is_active)
            .bind(&input.icon)
            .fetch_one(pool)
            .await
    }

    /// Find a link by ID within its project, scoped to the owner.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Link>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM links WHERE id = $1 AND project_id = $2 AND user_id = $3"
        );
        sqlx::query_as::<_, Link>(&query)
            .bind(id)
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's links, `display_order` ascending, insertion order
    /// breaking ties.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<Link>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM links \
             WHERE project_id = $1 AND user_id = $2 \
             ORDER BY display_order, id"
        );
        sqlx::query_as::<_, Link>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The `display_order` for the next appended link: `max + 1`, or 0 for
    /// an empty project. Tolerates gaps left by deletions.
    pub async fn next_display_order(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<i32, sqlx::Error> {
        let (next,): (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(display_order) + 1, 0) FROM links \
             WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(next)
    }

    /// Update a link. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row matches the scoped key.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
        user_id: DbId,
        input: &UpdateLink,
    ) -> Result<Option<Link>, sqlx::Error> {
        let query = format!(
            "UPDATE links SET \
                title = COALESCE($4, title), \
                url = COALESCE($5, url), \
                display_order = COALESCE($6, display_order), \
                is_active = COALESCE($7, is_active), \
                icon = COALESCE($8, icon), \
                updated_at = NOW() \
             WHERE id = $1 AND project_id = $2 AND user_id = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Link>(&query)
            .bind(id)
            .bind(project_id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.url)
            .bind(input.display_order)
            .bind(input.is_active)
            .bind(&input.icon)
            .fetch_optional(pool)
            .await
    }

    /// Persist a batch of `(id, display_order)` assignments in one
    /// transaction. A row that no longer exists (or belongs to someone
    /// else) aborts and rolls back the whole batch with `RowNotFound`.
    pub async fn update_order_bulk(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        changes: &[(DbId, i32)],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for &(id, display_order) in changes {
            let result = sqlx::query(
                "UPDATE links SET display_order = $4, updated_at = NOW() \
                 WHERE id = $1 AND project_id = $2 AND user_id = $3",
            )
            .bind(id)
            .bind(project_id)
            .bind(user_id)
            .bind(display_order)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(sqlx::Error::RowNotFound);
            }
        }
        tx.commit().await
    }

    /// Delete a link. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM links WHERE id = $1 AND project_id = $2 AND user_id = $3")
                .bind(id)
                .bind(project_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the click counter for a public page visit. Only active
    /// links count. Returns `true` if a row was updated.
    pub async fn record_click(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE links SET clicks = clicks + 1 WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
