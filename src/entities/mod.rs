pub mod prelude;

pub mod car_makes;
pub mod car_models;
