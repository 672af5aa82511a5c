//! Postgres implementation of the core link gateway.
//!
//! One instance per open editor, carrying the `(project_id, user_id)` scope
//! it was constructed with -- never shared across users or requests. The
//! delegated repositories re-apply that scope on every statement.

use async_trait::async_trait;
use sqlx::PgPool;

use flowfolio_core::gateway::{
    AppearanceStore, GatewayError, LinkGateway, LinkPatch, LinkRecord, NewLink,
};
use flowfolio_core::types::DbId;

use crate::models::link::{CreateLink, UpdateLink};
use crate::repositories::{LinkRepo, ProjectRepo};

/// Owner-scoped gateway over the `links` table and the project's
/// appearance blob.
#[derive(Clone)]
pub struct PgLinkGateway {
    pool: PgPool,
    project_id: DbId,
    user_id: DbId,
}

impl PgLinkGateway {
    pub fn new(pool: PgPool, project_id: DbId, user_id: DbId) -> Self {
        Self {
            pool,
            project_id,
            user_id,
        }
    }
}

fn remote(err: sqlx::Error) -> GatewayError {
    GatewayError::Remote(err.to_string())
}

#[async_trait]
impl LinkGateway for PgLinkGateway {
    async fn list(&self) -> Result<Vec<LinkRecord>, GatewayError> {
        let links = LinkRepo::list_for_project(&self.pool, self.project_id, self.user_id)
            .await
            .map_err(remote)?;
        Ok(links.into_iter().map(LinkRecord::from).collect())
    }

    async fn insert(&self, link: &NewLink) -> Result<LinkRecord, GatewayError> {
        let input = CreateLink {
            project_id: self.project_id,
            user_id: self.user_id,
            title: link.title.clone(),
            url: link.url.clone(),
            display_order: link.display_order,
            is_active: Some(link.is_active),
            icon: link.icon.clone(),
        };
        let created = LinkRepo::create(&self.pool, &input).await.map_err(remote)?;
        Ok(created.into())
    }

    async fn update(&self, id: DbId, patch: &LinkPatch) -> Result<LinkRecord, GatewayError> {
        let input = UpdateLink {
            title: patch.title.clone(),
            url: patch.url.clone(),
            display_order: patch.display_order,
            is_active: patch.is_active,
            icon: patch.icon.clone(),
        };
        let updated = LinkRepo::update(&self.pool, id, self.project_id, self.user_id, &input)
            .await
            .map_err(remote)?;
        updated.map(LinkRecord::from).ok_or(GatewayError::NotFound(id))
    }

    async fn update_order(&self, changes: &[(DbId, i32)]) -> Result<(), GatewayError> {
        LinkRepo::update_order_bulk(&self.pool, self.project_id, self.user_id, changes)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => {
                    GatewayError::Remote("a link in the ordering no longer exists".to_string())
                }
                other => remote(other),
            })
    }

    async fn delete(&self, id: DbId) -> Result<(), GatewayError> {
        let removed = LinkRepo::delete(&self.pool, id, self.project_id, self.user_id)
            .await
            .map_err(remote)?;
        if removed {
            Ok(())
        } else {
            Err(GatewayError::NotFound(id))
        }
    }
}

#[async_trait]
impl AppearanceStore for PgLinkGateway {
    async fn save_appearance(&self, settings: &serde_json::Value) -> Result<(), GatewayError> {
        let saved =
            ProjectRepo::save_appearance(&self.pool, self.project_id, self.user_id, settings)
                .await
                .map_err(remote)?;
        if saved {
            Ok(())
        } else {
            Err(GatewayError::NotFound(self.project_id))
        }
    }
}
