//! Starbook — Story bounded context.
//!
//! Responsible for SAR/STAR story records: field validation, creation,
//! whole-field revision, deletion, and tag/text search over the catalogue.

pub mod application;
pub mod domain;
pub mod memory_repository;

#[cfg(test)]
pub(crate) mod test_fixtures;
