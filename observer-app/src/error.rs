use common::subject_observer::{NotifyError, SubjectError};
use config::ConfigError;
use displays::DisplayError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::controls::InputError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unable to load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationErrors),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error(transparent)]
    Subject(#[from] SubjectError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error("Unknown display '{0}'")]
    UnknownDisplay(String),
    #[error("Missing value after argument {0}")]
    MissingArgument(String),
}
