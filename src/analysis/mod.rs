//! Analysis and result aggregation modules
//!
//! Collects feature extraction output into final results:
//! - Result types
//! - Metadata

pub mod metadata;
pub mod result;
