use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "car_models")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub car_make_id: Option<i32>,
    pub name: String,
    /// Key into the external dealer store; not a foreign key here.
    pub dealer_id: Option<i32>,
    /// One of the `BodyType` column values.
    pub model_type: String,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::car_makes::Entity",
        from = "Column::CarMakeId",
        to = "super::car_makes::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    CarMakes,
}

impl Related<super::car_makes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarMakes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
