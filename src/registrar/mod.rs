//! Registrar availability lookup module

pub mod godaddy;
pub mod validator;

pub use godaddy::GoDaddyRegistrar;
pub use validator::DomainValidator;

use crate::error::Result;
use crate::types::DomainAvailability;
use async_trait::async_trait;

/// Core trait for registrar availability providers
#[async_trait]
pub trait RegistrarProvider: Send + Sync {
    /// Check registration availability and price for the exact domain
    async fn check(&self, domain: &str) -> Result<DomainAvailability>;

    /// Get provider name
    fn name(&self) -> &'static str;
}
