pub use super::car_makes::Entity as CarMakes;
pub use super::car_models::Entity as CarModels;
