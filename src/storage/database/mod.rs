//! SeaORM-backed item store

pub mod entities;
pub mod migration;

use crate::config::DatabaseConfig;
use crate::core::items::types::{Item, NewItem};
use crate::storage::ItemStore;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QuerySelect, SqlErr,
};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{info, warn};

use self::entities::item;

/// Item store over a SeaORM connection pool
#[derive(Debug)]
pub struct DatabaseItemStore {
    db: DatabaseConnection,
}

impl DatabaseItemStore {
    /// Open a connection pool against the configured database
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let db = Database::connect(opt).await.map_err(ServiceError::Database)?;

        info!("Database connection established");
        Ok(Self { db })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        migration::Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            ServiceError::Database(e)
        })?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Map write errors, surfacing uniqueness violations as conflicts
    fn map_write_err(e: DbErr) -> ServiceError {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => ServiceError::Conflict(message),
            _ => ServiceError::Database(e),
        }
    }
}

#[async_trait]
impl ItemStore for DatabaseItemStore {
    async fn find_all(&self) -> Result<Vec<Item>> {
        let models = item::Entity::find()
            .all(&self.db)
            .await
            .map_err(ServiceError::Database)?;
        Ok(models.into_iter().map(item::Model::into_domain).collect())
    }

    async fn find_all_ids(&self) -> Result<Vec<i64>> {
        let ids = item::Entity::find()
            .select_only()
            .column(item::Column::Id)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(ServiceError::Database)?;
        Ok(ids)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>> {
        let model = item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ServiceError::Database)?;
        Ok(model.map(item::Model::into_domain))
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let count = item::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(ServiceError::Database)?;
        Ok(count > 0)
    }

    async fn create(&self, new_item: NewItem) -> Result<Item> {
        let model = item::Model::from_new(&new_item)
            .insert(&self.db)
            .await
            .map_err(Self::map_write_err)?;
        Ok(model.into_domain())
    }

    async fn save(&self, item_state: Item) -> Result<Item> {
        let model = item::Model::from_domain(&item_state)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => {
                    ServiceError::not_found(format!("item {} does not exist", item_state.id))
                }
                other => Self::map_write_err(other),
            })?;
        Ok(model.into_domain())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        item::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(ServiceError::Database)?;
        Ok(())
    }
}
