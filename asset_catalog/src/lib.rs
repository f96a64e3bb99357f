//! # Asset Catalog
//!
//! The content "source of truth" crate - read-only metadata about the assets
//! available in the host's content store, and the boundary through which a
//! snapshot of that metadata is fetched. This crate contains no decision
//! logic; scoring and selection live in `resolver_core`.

pub mod paths;
pub mod record;
pub mod source;

pub use paths::*;
pub use record::*;
pub use source::*;
