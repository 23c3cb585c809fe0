//! Core domain logic for upkeep
//!
//! All external interactions (git, HTTP) are abstracted through port
//! traits; the services only touch the local filesystem they are pointed at.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`TaskRecord`, `ValidationResult`, manifests, checksums)
//! - `services/` - The workflow steps
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
