//! Shared gradpict cloud-resource primitives.
//!
//! This crate owns configuration resolution, the memory record model, the
//! table update-expression builder and the provisioning plan. It intentionally
//! excludes AWS SDK and runtime concerns; those live in `gradpict_aws`.

pub mod config;
pub mod error;
pub mod memory;
pub mod object_url;
pub mod provisioning;
pub mod update_expression;
