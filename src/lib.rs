pub mod common;

pub mod env_configuration;
pub mod model;
pub mod repository;
pub mod traits;
pub mod utils_modules;
