//! Collision reconciliation - no two distinct roles may share one asset.
//!
//! Single pass over the declared pairs, in declared order; no iterative
//! fixpoint. An empty rerun result is accepted: an unresolved role is
//! preferable to a visually colliding one.

use tracing::{debug, warn};

use asset_catalog::AssetRecord;

use crate::resolver::{convert_reference, ResolutionResult};
use crate::roles::RolePlan;
use crate::selector::select_best;

/// Check each declared pair once; when both roles hold the same non-empty
/// reference, re-resolve the pair's `rerun_role` with its vocabulary
/// narrowed by the pair's `drop_terms` and `added_excludes`.
pub fn reconcile_collisions(
    plan: &RolePlan,
    records: &[AssetRecord],
    mut result: ResolutionResult,
) -> ResolutionResult {
    for pair in &plan.collisions {
        let keep = result.get(&pair.keep_role).unwrap_or("").to_string();
        let rerun = result.get(&pair.rerun_role).unwrap_or("");
        if keep.is_empty() || keep != rerun {
            continue;
        }

        // Validated upfront: collision pairs only name declared roles.
        let Some(role) = plan.role(&pair.rerun_role) else {
            continue;
        };

        let include = role.include_terms.without(&pair.drop_terms);
        let bonus = role.bonus_terms.without(&pair.drop_terms);
        let exclude = role.exclude_terms.merged(&pair.added_excludes);

        let replacement = select_best(
            records,
            &role.allowed_types,
            &include,
            &exclude,
            &bonus,
            role.min_score,
        )
        .map(|raw| convert_reference(&raw, role.kind))
        // The narrowed vocabulary may still rank the shared asset first;
        // an unresolved role beats a colliding one.
        .filter(|replacement| *replacement != keep)
        .unwrap_or_default();

        if replacement.is_empty() {
            warn!(
                keep = %pair.keep_role,
                rerun = %pair.rerun_role,
                "collision broken by unresolving the second role"
            );
        } else {
            debug!(
                keep = %pair.keep_role,
                rerun = %pair.rerun_role,
                reference = %replacement,
                "collision broken by re-resolution"
            );
        }
        result.set(&pair.rerun_role, replacement);
    }

    result
}
