use crate::entities::{car_makes, car_models, prelude::*};
use crate::models::catalog::{BodyType, CarMake, CarModel};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{info, warn};

/// Repository for car makes and car models
pub struct CatalogRepository {
    conn: DatabaseConnection,
}

/// Column values for a car model insert or update, already validated.
#[derive(Debug, Clone)]
pub struct CarModelRow {
    pub car_make_id: Option<i32>,
    pub name: String,
    pub dealer_id: Option<i32>,
    pub model_type: BodyType,
    pub year: i32,
}

impl CatalogRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn map_make_model(m: car_makes::Model) -> CarMake {
        CarMake {
            id: m.id,
            name: m.name,
            description: m.description,
        }
    }

    fn map_model_model(m: car_models::Model) -> CarModel {
        let model_type = m.model_type.parse().unwrap_or_else(|_| {
            warn!(id = m.id, model_type = %m.model_type, "Unknown body type in database");
            BodyType::Other
        });

        CarModel {
            id: m.id,
            car_make_id: m.car_make_id,
            name: m.name,
            dealer_id: m.dealer_id,
            model_type,
            year: m.year,
        }
    }

    // ========================================================================
    // Car Makes
    // ========================================================================

    pub async fn list_makes(&self) -> Result<Vec<CarMake>> {
        let rows = CarMakes::find()
            .order_by_asc(car_makes::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_make_model).collect())
    }

    pub async fn get_make(&self, id: i32) -> Result<Option<CarMake>> {
        let result = CarMakes::find_by_id(id).one(&self.conn).await?;
        Ok(result.map(Self::map_make_model))
    }

    pub async fn add_make(&self, name: &str, description: Option<&str>) -> Result<CarMake> {
        let active_model = car_makes::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.map(ToString::to_string)),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!("Added car make {}: {}", model.id, model.name);
        Ok(Self::map_make_model(model))
    }

    pub async fn update_make(
        &self,
        id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<CarMake>> {
        let Some(existing) = CarMakes::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active_model: car_makes::ActiveModel = existing.into();
        active_model.name = Set(name.to_string());
        active_model.description = Set(description.map(ToString::to_string));

        let model = active_model.update(&self.conn).await?;
        Ok(Some(Self::map_make_model(model)))
    }

    /// Deletes a make together with every model that belongs to it.
    pub async fn remove_make(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let models = CarModels::delete_many()
            .filter(car_models::Column::CarMakeId.eq(id))
            .exec(&txn)
            .await?;

        let result = CarMakes::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        if result.rows_affected > 0 {
            info!(
                "Removed car make {} and {} model(s)",
                id, models.rows_affected
            );
        }

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Car Models
    // ========================================================================

    pub async fn list_models(
        &self,
        car_make_id: Option<i32>,
        dealer_id: Option<i32>,
    ) -> Result<Vec<CarModel>> {
        let mut query = CarModels::find();

        if let Some(make_id) = car_make_id {
            query = query.filter(car_models::Column::CarMakeId.eq(make_id));
        }
        if let Some(dealer_id) = dealer_id {
            query = query.filter(car_models::Column::DealerId.eq(dealer_id));
        }

        let rows = query
            .order_by_asc(car_models::Column::Name)
            .order_by_desc(car_models::Column::Year)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model_model).collect())
    }

    pub async fn get_model(&self, id: i32) -> Result<Option<CarModel>> {
        let result = CarModels::find_by_id(id).one(&self.conn).await?;
        Ok(result.map(Self::map_model_model))
    }

    pub async fn add_model(&self, row: &CarModelRow) -> Result<CarModel> {
        let active_model = car_models::ActiveModel {
            car_make_id: Set(row.car_make_id),
            name: Set(row.name.clone()),
            dealer_id: Set(row.dealer_id),
            model_type: Set(row.model_type.as_str().to_string()),
            year: Set(row.year),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!("Added car model {}: {}", model.id, model.name);
        Ok(Self::map_model_model(model))
    }

    pub async fn update_model(&self, id: i32, row: &CarModelRow) -> Result<Option<CarModel>> {
        let Some(existing) = CarModels::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active_model: car_models::ActiveModel = existing.into();
        active_model.car_make_id = Set(row.car_make_id);
        active_model.name = Set(row.name.clone());
        active_model.dealer_id = Set(row.dealer_id);
        active_model.model_type = Set(row.model_type.as_str().to_string());
        active_model.year = Set(row.year);

        let model = active_model.update(&self.conn).await?;
        Ok(Some(Self::map_model_model(model)))
    }

    pub async fn remove_model(&self, id: i32) -> Result<bool> {
        let result = CarModels::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count_models_for_make(&self, car_make_id: i32) -> Result<u64> {
        let count = CarModels::find()
            .filter(car_models::Column::CarMakeId.eq(car_make_id))
            .count(&self.conn)
            .await?;

        Ok(count)
    }
}
