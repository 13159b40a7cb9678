use thiserror::Error;

use crate::{config::ConfigError, infra::error::InfraError, presentation::views::TemplateRenderError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
}
