//! Application configuration domain model

mod app_config;

pub use app_config::{
    AirtableConfig, AppConfig, AzureConfig, BackendConfig, BackendKind, CoversConfig,
    DefinitionsConfig, GoodreadsConfig, HttpConfig, WordnikConfig,
};
