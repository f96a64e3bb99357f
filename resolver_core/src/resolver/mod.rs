//! Role resolution - one selection per declared role, in declaration order.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use asset_catalog::{
    to_container_path, to_generated_class_reference, AssetRecord, CatalogSnapshot, TypeTag,
};

use crate::reconcile::reconcile_collisions;
use crate::roles::{PlanError, ReferenceKind, RolePlan, RoleSpec, TEMPLATE_REGION_ROOT};
use crate::selector::{select_best, select_top_n};

/// The accumulated role-to-reference mapping. An empty reference means the
/// role is unresolved; keys appear in resolution (= emission) order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionResult {
    entries: Vec<(String, String)>,
}

impl ResolutionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a role's resolved reference (empty = unresolved).
    pub fn insert(&mut self, role_id: impl Into<String>, reference: impl Into<String>) {
        self.entries.push((role_id.into(), reference.into()));
    }

    /// Replace an already-recorded role's reference, keeping its position.
    pub fn set(&mut self, role_id: &str, reference: impl Into<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|(id, _)| id == role_id) {
            entry.1 = reference.into();
        }
    }

    pub fn get(&self, role_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == role_id)
            .map(|(_, reference)| reference.as_str())
    }

    /// All entries in resolution order, unresolved roles included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(id, r)| (id.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of roles that resolved to a non-empty reference.
    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| !r.is_empty()).count()
    }

    /// True when not a single role resolved - usually an empty or
    /// mis-rooted catalog.
    pub fn is_fully_unresolved(&self) -> bool {
        self.resolved_count() == 0
    }
}

/// Apply the reference-shape conversion a role's consumer expects.
pub fn convert_reference(reference: &str, kind: ReferenceKind) -> String {
    match kind {
        ReferenceKind::DataObject => reference.to_string(),
        ReferenceKind::GeneratedClass => to_generated_class_reference(reference),
        ReferenceKind::LevelPackage => to_container_path(reference),
    }
}

/// Resolves a [`RolePlan`] against a catalog snapshot.
pub struct Resolver {
    plan: RolePlan,
}

impl Resolver {
    pub fn new(plan: RolePlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &RolePlan {
        &self.plan
    }

    /// Run the full resolution pass: non-map roles with fallback chains,
    /// then region maps, then collision reconciliation. Sequential in
    /// declaration order; the result is threaded by value through each step.
    pub fn resolve(&self, snapshot: &CatalogSnapshot) -> Result<ResolutionResult, PlanError> {
        self.plan.validate()?;

        let records = snapshot.records();
        let mut result = ResolutionResult::new();

        for role in &self.plan.roles {
            result = self.resolve_role(role, records, result);
        }
        result = self.resolve_region_maps(records, result);

        Ok(reconcile_collisions(&self.plan, records, result))
    }

    /// Resolve a single role, appending to the prior result.
    fn resolve_role(
        &self,
        role: &RoleSpec,
        records: &[AssetRecord],
        mut result: ResolutionResult,
    ) -> ResolutionResult {
        let selected = select_best(
            records,
            &role.allowed_types,
            &role.include_terms,
            &role.exclude_terms,
            &role.bonus_terms,
            role.min_score,
        );

        let reference = match selected {
            Some(raw) => {
                let converted = convert_reference(&raw, role.kind);
                debug!(role = %role.role_id, reference = %converted, "role resolved");
                converted
            }
            None => match &role.fallback_role_id {
                // Fallback targets resolve earlier by plan order, so the
                // stored value is already shape-converted.
                Some(fallback) => {
                    let substitute = result.get(fallback).unwrap_or("").to_string();
                    if substitute.is_empty() {
                        warn!(role = %role.role_id, fallback = %fallback, "role and its fallback are both unresolved");
                    } else {
                        debug!(role = %role.role_id, fallback = %fallback, "role fell back to sibling");
                    }
                    substitute
                }
                None => {
                    warn!(role = %role.role_id, "no candidate met the minimum score");
                    String::new()
                }
            },
        };

        result.insert(role.role_id.clone(), reference);
        result
    }

    /// Resolve the region-map family: a catalog-wide best guess first, then
    /// per-region refinement, with scaffold levels replaced by each region's
    /// declared default.
    fn resolve_region_maps(
        &self,
        records: &[AssetRecord],
        mut result: ResolutionResult,
    ) -> ResolutionResult {
        let search = &self.plan.map_search;
        let world_only = [TypeTag::World];

        let catalog_guess = select_top_n(
            records,
            &world_only,
            &search.include_terms,
            &search.exclude_terms,
            &search.bonus_terms,
            search.max_results,
            1,
        )
        .into_iter()
        .next()
        .map(|reference| to_container_path(&reference));

        for region in &self.plan.regions {
            let include = search.include_terms.merged(&region.region_terms);
            let refined = select_best(
                records,
                &world_only,
                &include,
                &search.exclude_terms,
                &search.bonus_terms,
                1,
            )
            .map(|reference| to_container_path(&reference));

            let chosen = refined.or_else(|| catalog_guess.clone());
            let reference = match chosen {
                Some(path) if !path.starts_with(TEMPLATE_REGION_ROOT) => {
                    debug!(role = %region.role_id, reference = %path, "region map resolved");
                    path
                }
                Some(path) => {
                    warn!(role = %region.role_id, scaffold = %path, "discovered map is a scaffold level, using region default");
                    region.default_level.clone()
                }
                None => {
                    warn!(role = %region.role_id, "no authored map found, using region default");
                    region.default_level.clone()
                }
            };

            result.insert(region.role_id.clone(), reference);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_catalog::AssetRecord;

    fn starter_resolver() -> Resolver {
        Resolver::new(RolePlan::starter_pack())
    }

    fn characters() -> Vec<AssetRecord> {
        vec![
            AssetRecord::new(
                TypeTag::SkeletalMesh,
                "SK_Jesus_Body",
                "/Game/Fab/Characters/SK_Jesus_Body",
            ),
            AssetRecord::new(
                TypeTag::SkeletalMesh,
                "SK_Roman_Guard",
                "/Game/Fab/Characters/SK_Roman_Guard",
            ),
        ]
    }

    #[test]
    fn test_player_and_enemy_meshes_resolve_apart() {
        let snapshot = CatalogSnapshot::new(characters());
        let result = starter_resolver().resolve(&snapshot).unwrap();

        assert_eq!(
            result.get("PlayerSkeletalMesh"),
            Some("/Game/Fab/Characters/SK_Jesus_Body.SK_Jesus_Body")
        );
        assert_eq!(
            result.get("EnemySkeletalMesh"),
            Some("/Game/Fab/Characters/SK_Roman_Guard.SK_Roman_Guard")
        );
    }

    #[test]
    fn test_unresolved_role_is_empty_not_error() {
        let snapshot = CatalogSnapshot::new(Vec::new());
        let result = starter_resolver().resolve(&snapshot).unwrap();
        assert_eq!(result.get("PlayerSkeletalMesh"), Some(""));
    }

    #[test]
    fn test_enemy_anim_falls_back_to_player_anim() {
        // Matches the player vocabulary (hero, locomotion) but none of the
        // enemy terms, and sits outside any import-staging path so the
        // structural bonus cannot carry the enemy role past min_score.
        let snapshot = CatalogSnapshot::new(vec![AssetRecord::new(
            TypeTag::Blueprint,
            "BP_HeroLocomotion",
            "/Game/Chars/BP_HeroLocomotion",
        )]);
        let result = starter_resolver().resolve(&snapshot).unwrap();

        let player = result.get("PlayerAnimBlueprint").unwrap();
        assert_eq!(player, "/Game/Chars/BP_HeroLocomotion.BP_HeroLocomotion_C");
        assert_eq!(result.get("EnemyAnimBlueprint"), Some(player));
    }

    #[test]
    fn test_anim_roles_emit_class_references() {
        let snapshot = CatalogSnapshot::new(vec![AssetRecord::new(
            TypeTag::AnimBlueprint,
            "ABP_Hero",
            "/Game/Fab/Anim/ABP_Hero",
        )]);
        let result = starter_resolver().resolve(&snapshot).unwrap();
        assert_eq!(
            result.get("PlayerAnimBlueprint"),
            Some("/Game/Fab/Anim/ABP_Hero.ABP_Hero_C")
        );
    }

    #[test]
    fn test_zero_world_records_use_region_defaults() {
        let snapshot = CatalogSnapshot::new(characters());
        let result = starter_resolver().resolve(&snapshot).unwrap();

        assert_eq!(
            result.get("GalileeMap"),
            Some("/Game/Maps/Regions/Galilee/L_GalileeShores")
        );
        assert_eq!(
            result.get("EmptyTombMap"),
            Some("/Game/Maps/Regions/EmptyTomb/L_EmptyTomb")
        );
    }

    #[test]
    fn test_template_scaffold_never_wins_a_region() {
        let snapshot = CatalogSnapshot::new(vec![AssetRecord::new(
            TypeTag::World,
            "L_GalileeShores",
            "/Game/Maps/Regions/Galilee/L_GalileeShores",
        )]);
        let result = starter_resolver().resolve(&snapshot).unwrap();

        // Every region keeps its own default, including Galilee itself.
        for (role_id, default_level) in [
            ("GalileeMap", "/Game/Maps/Regions/Galilee/L_GalileeShores"),
            ("DecapolisMap", "/Game/Maps/Regions/Decapolis/L_DecapolisRuins"),
            ("JerusalemMap", "/Game/Maps/Regions/Jerusalem/L_JerusalemApproach"),
        ] {
            assert_eq!(result.get(role_id), Some(default_level));
        }
    }

    #[test]
    fn test_authored_map_covers_all_regions() {
        let snapshot = CatalogSnapshot::new(vec![AssetRecord::new(
            TypeTag::World,
            "L_AncientTown_Market",
            "/Game/Fab/Maps/L_AncientTown_Market",
        )]);
        let result = starter_resolver().resolve(&snapshot).unwrap();

        for role_id in ["GalileeMap", "WildernessMap", "ViaDolorosaMap"] {
            assert_eq!(result.get(role_id), Some("/Game/Fab/Maps/L_AncientTown_Market"));
        }
    }

    #[test]
    fn test_region_specific_map_beats_generic_guess() {
        let snapshot = CatalogSnapshot::new(vec![
            AssetRecord::new(
                TypeTag::World,
                "L_AncientTown_Market",
                "/Game/Fab/Maps/L_AncientTown_Market",
            ),
            AssetRecord::new(
                TypeTag::World,
                "L_GalileeShoresFishingVillage",
                "/Game/Fab/Maps/L_GalileeShoresFishingVillage",
            ),
        ]);
        let result = starter_resolver().resolve(&snapshot).unwrap();

        assert_eq!(
            result.get("GalileeMap"),
            Some("/Game/Fab/Maps/L_GalileeShoresFishingVillage")
        );
        // A region with no matching vocabulary still gets the better
        // generic candidate.
        assert_eq!(result.get("JerusalemMap"), Some("/Game/Fab/Maps/L_AncientTown_Market"));
    }

    #[test]
    fn test_shared_env_asset_never_leaves_a_pair_colliding() {
        // A single mesh matching both the block vocabulary ("modular") and
        // the canopy vocabulary ("olive", "tree") wins both roles, and the
        // block/canopy pair's added excludes only cost it 5 points, so the
        // narrowed rerun ranks it first again.
        let snapshot = CatalogSnapshot::new(vec![AssetRecord::new(
            TypeTag::StaticMesh,
            "SM_ModularOliveTree",
            "/Game/Fab/Props/SM_ModularOliveTree",
        )]);
        let resolver = starter_resolver();
        let result = resolver.resolve(&snapshot).unwrap();

        assert_eq!(
            result.get("EnvMeshBlock"),
            Some("/Game/Fab/Props/SM_ModularOliveTree.SM_ModularOliveTree")
        );
        assert_eq!(result.get("EnvMeshCanopy"), Some(""));

        for pair in &resolver.plan().collisions {
            let keep = result.get(&pair.keep_role).unwrap_or("");
            let rerun = result.get(&pair.rerun_role).unwrap_or("");
            assert!(
                keep != rerun || keep.is_empty(),
                "{} and {} still share {keep}",
                pair.keep_role,
                pair.rerun_role
            );
        }
    }

    #[test]
    fn test_result_order_matches_declaration_order() {
        let snapshot = CatalogSnapshot::new(Vec::new());
        let result = starter_resolver().resolve(&snapshot).unwrap();

        let ids: Vec<_> = result.iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids.first().map(String::as_str), Some("PlayerSkeletalMesh"));
        assert_eq!(ids.last().map(String::as_str), Some("EmptyTombMap"));
        assert_eq!(ids.len(), 19);
    }

    #[test]
    fn test_resolution_result_accessors() {
        let mut result = ResolutionResult::new();
        result.insert("A", "/Game/X.X");
        result.insert("B", "");

        assert_eq!(result.len(), 2);
        assert_eq!(result.resolved_count(), 1);
        assert!(!result.is_fully_unresolved());

        result.set("A", "");
        assert!(result.is_fully_unresolved());
    }
}
