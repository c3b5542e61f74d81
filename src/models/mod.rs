pub mod catalog;
pub mod dealer;
pub mod review;
pub mod upstream;
