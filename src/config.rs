// src/config.rs

use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(from = "MONGODB_URI")]
    pub uri: String,

    #[envconfig(from = "DATABASE_NAME", default = "orderin")]
    pub database: String,

    #[envconfig(from = "SOURCE_COLLECTION", default = "order_in_rows")]
    pub source_collection: String,

    #[envconfig(from = "TARGET_COLLECTION", default = "order_in_documents")]
    pub target_collection: String,

    // clear the target collection before writing a run
    #[envconfig(from = "REPLACE_TARGET", default = "true")]
    pub replace_target: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, envconfig::Error> {
        dotenv::dotenv().ok();

        Self::init_from_env()
    }
}
