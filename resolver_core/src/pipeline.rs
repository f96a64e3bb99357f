//! End-to-end run: fetch catalog, resolve, reconcile, emit.

use std::path::Path;

use thiserror::Error;
use tracing::warn;

use asset_catalog::{CatalogError, CatalogSource};

use crate::emitter::{write_overrides, EmitError};
use crate::resolver::{ResolutionResult, Resolver};
use crate::roles::{PlanError, RolePlan};

/// Fatal pipeline failures. Unresolved roles are never among them.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Run one resolution pass end to end and return the emitted mapping.
///
/// Everything is attempted exactly once, sequentially: a failed catalog
/// fetch aborts before any resolution, a failed artifact write aborts after
/// it. A run where every role is unresolved is surfaced as a warning and
/// still writes the (empty) artifact.
pub fn run(
    source: &dyn CatalogSource,
    root: &str,
    plan: RolePlan,
    section: &str,
    out_path: &Path,
) -> Result<ResolutionResult, PipelineError> {
    let snapshot = source.fetch(root)?;
    let result = Resolver::new(plan).resolve(&snapshot)?;

    if result.is_fully_unresolved() {
        warn!(
            root = %root,
            records = snapshot.len(),
            "no role resolved to any asset; is the catalog empty or mis-rooted?"
        );
    }

    write_overrides(out_path, section, &result)?;
    Ok(result)
}
