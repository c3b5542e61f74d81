pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod dealers;
pub use dealers::{DealerDirectory, DealerError};

pub mod reviews;
pub use reviews::{ReviewError, ReviewService};
