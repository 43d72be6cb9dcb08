//! Candidate intake: payload validation ahead of persistence, plus the thin
//! service and HTTP adapters around it.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{CandidateId, CandidatePayload, ValidationMode};
pub use repository::{CandidateRecord, CandidateRepository, RepositoryError};
pub use router::candidate_router;
pub use service::{CandidateService, CandidateServiceError};
pub use validation::{
    CandidateValidator, IntakeLocale, IntakePolicy, PolicyError, ValidationError,
};
