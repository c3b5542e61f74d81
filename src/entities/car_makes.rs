use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "car_makes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::car_models::Entity")]
    CarModels,
}

impl Related<super::car_models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarModels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
