use thiserror::Error;
use tutorbook_core::booking::Rejection;
use tutorbook_core::error::DomainError;
use tutorbook_ports::error::PortError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("port error: {0}")]
    Port(#[from] PortError),
    #[error("booking rejected: {0}")]
    Rejected(#[from] Rejection),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Port(PortError::NotFound))
    }
}
