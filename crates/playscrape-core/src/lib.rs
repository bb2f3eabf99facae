pub mod app_config;
pub mod catalog;
pub mod config;

pub use app_config::AppConfig;
pub use catalog::{
    age_range_id, category_id, collection_id, page_token, AGE_RANGES, CATEGORIES, COLLECTIONS,
    MAX_PAGE_TOKEN_INDEX, PAGE_TOKENS,
};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
