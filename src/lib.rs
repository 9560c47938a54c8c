//! Domain Scout - AI-powered domain name suggestions with availability checking
//!
//! A proxy service and CLI client: suggestions come from an LLM completion
//! provider, availability and price from a registrar provider, with a
//! per-client admission gate in front of both endpoints.

pub mod client;
pub mod error;
pub mod gate;
pub mod llm;
pub mod registrar;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use error::{DomainScoutError, Result};
pub use types::{
    AdvisoryBody, AvailabilityQuery, BatchReport, CompletionConfig, DomainAvailability,
    DomainStatus, ErrorBody, RegistrarConfig, ServerConfig, SuggestionRequest, SuggestionResponse,
};

// Re-export main functionality
pub use client::SuggestionClient;
pub use gate::{Admission, AdmissionGate};
pub use llm::OpenAiCompletion;
pub use registrar::GoDaddyRegistrar;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
