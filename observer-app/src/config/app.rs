use std::path::Path;

use common::subject_observer::NotifyPolicy;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use displays::{DisplayKind, MAX_DIGIT_COUNT};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::AppError;

const DEFAULT_CONFIG: &str = include_str!("../../resources/config/default.toml");
const DEFAULT_CONFIG_PREFIX: &str = "APP";

#[derive(Debug, Deserialize, Clone, Validate)]
#[validate(schema(function = "validate_ranges"))]
pub struct AppConfig {
    pub input_minimum: i32,
    pub input_maximum: i32,
    pub initial_value: i32,
    pub progress_minimum: i32,
    pub progress_maximum: i32,
    pub lcd_digit_count: usize,
    pub notify_policy: NotifyPolicy,
    #[validate(length(min = 1))]
    pub displays: Vec<DisplayKind>,
}

impl AppConfig {
    /// Embedded defaults overridden by `APP_*` environment variables.
    pub fn new() -> Result<Self, AppError> {
        Self::build(Self::defaults())
    }

    /// Same as [`AppConfig::new`] with `path` layered between the defaults and
    /// the environment.
    pub fn with_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        Self::build(Self::defaults().add_source(File::from(path.as_ref())))
    }

    fn defaults() -> ConfigBuilder<config::builder::DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self, AppError> {
        let config: AppConfig = builder
            .add_source(Environment::with_prefix(DEFAULT_CONFIG_PREFIX))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

fn validate_ranges(config: &AppConfig) -> Result<(), ValidationError> {
    if config.input_minimum > config.input_maximum {
        return Err(ValidationError::new("input_range"));
    }
    if config.progress_minimum > config.progress_maximum {
        return Err(ValidationError::new("progress_range"));
    }
    if !(config.input_minimum..=config.input_maximum).contains(&config.initial_value) {
        return Err(ValidationError::new("initial_value"));
    }
    if !(1..=MAX_DIGIT_COUNT).contains(&config.lcd_digit_count) {
        return Err(ValidationError::new("lcd_digit_count"));
    }
    Ok(())
}
