//! # Resolver Core
//!
//! The decision engine of the asset tools. Given a catalog snapshot from
//! `asset_catalog` and a declarative [`RolePlan`], it selects the best
//! matching asset per role, reconciles selections against structural
//! constraints, and emits the final role-to-reference mapping as a runtime
//! override artifact.
//!
//! ## Pipeline
//!
//! 1. **Fetch**: one full catalog snapshot (fatal on failure)
//! 2. **Resolve**: one selection per role, in declaration order, with
//!    fallback chains and region-map refinement
//! 3. **Reconcile**: break unwanted collisions between declared role pairs
//! 4. **Emit**: overwrite the override artifact (fatal on failure)
//!
//! Unresolved roles are values (empty references), never errors: partial
//! results are always acceptable and always emitted.

pub mod emitter;
pub mod pipeline;
pub mod reconcile;
pub mod resolver;
pub mod roles;
pub mod scoring;
pub mod selector;

pub use emitter::*;
pub use pipeline::*;
pub use reconcile::*;
pub use resolver::*;
pub use roles::*;
pub use scoring::*;
pub use selector::*;
