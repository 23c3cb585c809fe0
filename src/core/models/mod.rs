//! Domain models for upkeep
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`TaskRecord`] - A markdown line that looks like outstanding work
//! - [`ValidationResult`] - A task plus the evidence found for it
//! - [`AssetManifest`] - Remote fixture files to download
//! - [`ChecksumRecord`] - One `digest  path` line of a checksum file

mod checksum;
mod manifest;
mod task;
mod validation;

pub use checksum::{ChecksumRecord, FIELD_SEPARATOR};
pub use manifest::{Asset, AssetManifest, Download};
pub use task::{TaskKind, TaskRecord};
pub use validation::{CodeEvidence, TaskStatus, ValidationResult};
