//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Sign-up, sign-in and token-to-identity resolution live here; the HTTP
//! layer only moves tokens between headers/cookies and this service.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod repo;
pub mod token;

pub use service::AuthService;
