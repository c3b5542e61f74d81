use crate::models::catalog::{CarMake, CarModel};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::catalog::CarModelRow;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    pub async fn list_car_makes(&self) -> Result<Vec<CarMake>> {
        self.catalog_repo().list_makes().await
    }

    pub async fn get_car_make(&self, id: i32) -> Result<Option<CarMake>> {
        self.catalog_repo().get_make(id).await
    }

    pub async fn add_car_make(&self, name: &str, description: Option<&str>) -> Result<CarMake> {
        self.catalog_repo().add_make(name, description).await
    }

    pub async fn update_car_make(
        &self,
        id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<CarMake>> {
        self.catalog_repo()
            .update_make(id, name, description)
            .await
    }

    pub async fn remove_car_make(&self, id: i32) -> Result<bool> {
        self.catalog_repo().remove_make(id).await
    }

    pub async fn list_car_models(
        &self,
        car_make_id: Option<i32>,
        dealer_id: Option<i32>,
    ) -> Result<Vec<CarModel>> {
        self.catalog_repo()
            .list_models(car_make_id, dealer_id)
            .await
    }

    pub async fn get_car_model(&self, id: i32) -> Result<Option<CarModel>> {
        self.catalog_repo().get_model(id).await
    }

    pub async fn add_car_model(&self, row: &CarModelRow) -> Result<CarModel> {
        self.catalog_repo().add_model(row).await
    }

    pub async fn update_car_model(&self, id: i32, row: &CarModelRow) -> Result<Option<CarModel>> {
        self.catalog_repo().update_model(id, row).await
    }

    pub async fn remove_car_model(&self, id: i32) -> Result<bool> {
        self.catalog_repo().remove_model(id).await
    }

    pub async fn count_car_models_for_make(&self, car_make_id: i32) -> Result<u64> {
        self.catalog_repo().count_models_for_make(car_make_id).await
    }
}
