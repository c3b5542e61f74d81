pub mod http;
pub mod nlu;
