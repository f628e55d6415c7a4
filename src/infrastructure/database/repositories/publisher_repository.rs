//! SeaORM implementation of PublisherRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::domain::publisher::{NewPublisher, Publisher, PublisherRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::publisher;

pub struct SeaOrmPublisherRepository {
    db: DatabaseConnection,
}

impl SeaOrmPublisherRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn model_to_domain(m: publisher::Model) -> Publisher {
    Publisher {
        id: m.id,
        name: m.name,
        siret: m.siret,
        phone: m.phone,
    }
}

fn domain_to_active(p: Publisher) -> publisher::ActiveModel {
    publisher::ActiveModel {
        id: Set(p.id),
        name: Set(p.name),
        siret: Set(p.siret),
        phone: Set(p.phone),
    }
}

// ── PublisherRepository impl ────────────────────────────────────

#[async_trait]
impl PublisherRepository for SeaOrmPublisherRepository {
    async fn insert(&self, new_publisher: NewPublisher) -> DomainResult<Publisher> {
        let p = new_publisher.with_id(uuid::Uuid::new_v4().to_string());
        debug!("Inserting publisher: {} ({})", p.id, p.name);

        domain_to_active(p.clone()).insert(&self.db).await?;
        Ok(p)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Publisher>> {
        let model = publisher::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Publisher>> {
        let models = publisher::Entity::find()
            .order_by_asc(publisher::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, p: Publisher) -> DomainResult<Publisher> {
        debug!("Updating publisher: {}", p.id);

        match domain_to_active(p.clone()).update(&self.db).await {
            Ok(_) => Ok(p),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::not_found("Publisher", p.id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        debug!("Deleting publisher: {}", id);
        publisher::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
