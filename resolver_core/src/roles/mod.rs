//! Role declarations - the "want" side of resolution.
//!
//! A [`RolePlan`] is pure data: an ordered list of roles, an ordered list of
//! region-map specs, and an ordered list of collision pairs. Ordering is the
//! execution order, so every fallback target and collision partner is
//! already resolved when needed; [`RolePlan::validate`] checks this before
//! any resolution runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use asset_catalog::TypeTag;

use crate::scoring::TermSet;

/// Reserved namespace for generated scaffold sublevels. A *discovered* map
/// under this prefix is a placeholder, never an authored region map.
pub const TEMPLATE_REGION_ROOT: &str = "/Game/Maps/Regions/";

/// What shape of reference the role's consumer expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    /// A container-path-plus-object-name data reference.
    DataObject,

    /// A runtime class reference (`ObjectName_C`), e.g. animation graphs.
    GeneratedClass,

    /// A bare container path, e.g. level packages.
    LevelPackage,
}

/// One named slot in the consuming runtime, with the vocabulary used to
/// fill it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSpec {
    pub role_id: String,
    pub kind: ReferenceKind,
    pub allowed_types: Vec<TypeTag>,
    pub include_terms: TermSet,
    pub exclude_terms: TermSet,
    pub bonus_terms: TermSet,

    /// Minimum score a candidate must reach; defaults to 1.
    pub min_score: i32,

    /// Role whose resolved reference substitutes when this role resolves to
    /// nothing. Must be declared earlier in the plan.
    pub fallback_role_id: Option<String>,
}

impl RoleSpec {
    /// Create a role with empty vocabularies and the default score cutoff.
    pub fn new(role_id: impl Into<String>, kind: ReferenceKind) -> Self {
        Self {
            role_id: role_id.into(),
            kind,
            allowed_types: Vec::new(),
            include_terms: TermSet::new(),
            exclude_terms: TermSet::new(),
            bonus_terms: TermSet::new(),
            min_score: 1,
            fallback_role_id: None,
        }
    }

    /// Set the type whitelist.
    pub fn with_types(mut self, types: impl IntoIterator<Item = TypeTag>) -> Self {
        self.allowed_types = types.into_iter().collect();
        self
    }

    /// Set the include terms.
    pub fn with_include<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_terms = TermSet::from_terms(terms);
        self
    }

    /// Set the exclude terms.
    pub fn with_exclude<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_terms = TermSet::from_terms(terms);
        self
    }

    /// Set the bonus terms.
    pub fn with_bonus<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bonus_terms = TermSet::from_terms(terms);
        self
    }

    /// Set the minimum score cutoff.
    pub fn with_min_score(mut self, min_score: i32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Declare a fallback role.
    pub fn with_fallback(mut self, role_id: impl Into<String>) -> Self {
        self.fallback_role_id = Some(role_id.into());
        self
    }
}

/// One region-map role: region-specific vocabulary plus the statically
/// declared default level used when the catalog offers nothing authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSpec {
    pub role_id: String,
    pub region_terms: TermSet,
    pub default_level: String,
}

impl RegionSpec {
    pub fn new<I, S>(role_id: impl Into<String>, terms: I, default_level: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            role_id: role_id.into(),
            region_terms: TermSet::from_terms(terms),
            default_level: default_level.into(),
        }
    }
}

/// The catalog-wide vocabulary for discovering region-map candidates before
/// per-region refinement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSearch {
    pub include_terms: TermSet,
    pub exclude_terms: TermSet,
    pub bonus_terms: TermSet,
    pub max_results: usize,
}

/// Two roles expected to resolve to distinct references. When they collide,
/// `rerun_role` is re-resolved with `drop_terms` removed from its include
/// and bonus sets and `added_excludes` appended to its exclude set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionPair {
    pub keep_role: String,
    pub rerun_role: String,
    pub drop_terms: TermSet,
    pub added_excludes: TermSet,
}

impl CollisionPair {
    pub fn new<D, A, S, T>(
        keep_role: impl Into<String>,
        rerun_role: impl Into<String>,
        drop_terms: D,
        added_excludes: A,
    ) -> Self
    where
        D: IntoIterator<Item = S>,
        A: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            keep_role: keep_role.into(),
            rerun_role: rerun_role.into(),
            drop_terms: TermSet::from_terms(drop_terms),
            added_excludes: TermSet::from_terms(added_excludes),
        }
    }
}

/// Errors found while validating a plan. All are fatal before resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("role '{role}' is declared more than once")]
    DuplicateRole { role: String },

    #[error("role '{role}' falls back to undeclared role '{fallback}'")]
    UnknownFallback { role: String, fallback: String },

    #[error("role '{role}' falls back to '{fallback}', which is not declared earlier")]
    ForwardFallback { role: String, fallback: String },

    #[error("collision pair references undeclared role '{role}'")]
    UnknownCollisionRole { role: String },
}

/// The complete declarative description of a resolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePlan {
    /// Non-map roles, in resolution and emission order.
    pub roles: Vec<RoleSpec>,

    /// Catalog-wide map discovery vocabulary.
    pub map_search: MapSearch,

    /// Region-map roles, resolved and emitted after `roles`.
    pub regions: Vec<RegionSpec>,

    /// Collision pairs, checked once each, in this order.
    pub collisions: Vec<CollisionPair>,
}

impl RolePlan {
    /// Look up a declared non-map role.
    pub fn role(&self, role_id: &str) -> Option<&RoleSpec> {
        self.roles.iter().find(|r| r.role_id == role_id)
    }

    /// Check the plan's ordering dependencies before execution: role ids
    /// unique, every fallback target declared strictly earlier, every
    /// collision pair naming declared roles.
    pub fn validate(&self) -> Result<(), PlanError> {
        let mut seen: Vec<&str> = Vec::new();
        for role in &self.roles {
            if seen.contains(&role.role_id.as_str()) {
                return Err(PlanError::DuplicateRole {
                    role: role.role_id.clone(),
                });
            }
            if let Some(fallback) = &role.fallback_role_id {
                if self.role(fallback).is_none() {
                    return Err(PlanError::UnknownFallback {
                        role: role.role_id.clone(),
                        fallback: fallback.clone(),
                    });
                }
                if !seen.contains(&fallback.as_str()) {
                    return Err(PlanError::ForwardFallback {
                        role: role.role_id.clone(),
                        fallback: fallback.clone(),
                    });
                }
            }
            seen.push(role.role_id.as_str());
        }

        for region in &self.regions {
            if seen.contains(&region.role_id.as_str()) {
                return Err(PlanError::DuplicateRole {
                    role: region.role_id.clone(),
                });
            }
            seen.push(region.role_id.as_str());
        }

        for pair in &self.collisions {
            for role in [&pair.keep_role, &pair.rerun_role] {
                if self.role(role).is_none() {
                    return Err(PlanError::UnknownCollisionRole { role: role.clone() });
                }
            }
        }

        Ok(())
    }

    /// The built-in plan for the ancient-settlement starter pack: character
    /// meshes, animation graphs, environment meshes and materials, and the
    /// seven campaign region maps.
    pub fn starter_pack() -> Self {
        let mesh_noise = ["weapon", "character", "skeletal", "vfx", "collision", "proxy"];
        let material_noise = ["character", "skin", "face", "hair", "ui", "vfx"];

        let roles = vec![
            RoleSpec::new("PlayerSkeletalMesh", ReferenceKind::DataObject)
                .with_types([TypeTag::SkeletalMesh])
                .with_include(["jesus", "hero", "pilgrim", "apostle", "prophet", "oriental", "metahuman", "male"])
                .with_exclude(["enemy", "roman", "guard", "soldier", "demon", "monster", "zombie"])
                .with_bonus(["sk_", "body"]),
            RoleSpec::new("EnemySkeletalMesh", ReferenceKind::DataObject)
                .with_types([TypeTag::SkeletalMesh])
                .with_include(["roman", "guard", "legion", "soldier", "warrior", "centurion", "bandit"])
                .with_exclude(["jesus", "hero", "metahuman", "female", "civilian"])
                .with_bonus(["sk_", "enemy"]),
            RoleSpec::new("PlayerAnimBlueprint", ReferenceKind::GeneratedClass)
                .with_types([TypeTag::AnimBlueprint, TypeTag::Blueprint])
                .with_include(["abp", "anim", "locomotion", "thirdperson", "movement", "hero", "player"])
                .with_exclude(["enemy", "test", "demo"])
                .with_bonus(["character"]),
            RoleSpec::new("EnemyAnimBlueprint", ReferenceKind::GeneratedClass)
                .with_types([TypeTag::AnimBlueprint, TypeTag::Blueprint])
                .with_include(["abp", "anim", "enemy", "roman", "legion", "guard"])
                .with_exclude(["test", "demo"])
                .with_bonus(["combat", "melee"])
                .with_fallback("PlayerAnimBlueprint"),
            RoleSpec::new("EnvMeshBlock", ReferenceKind::DataObject)
                .with_types([TypeTag::StaticMesh])
                .with_include(["block", "wall", "stone", "brick", "modular"])
                .with_exclude(mesh_noise)
                .with_bonus(["sm_", "architecture", "building", "ruin"]),
            RoleSpec::new("EnvMeshColumn", ReferenceKind::DataObject)
                .with_types([TypeTag::StaticMesh])
                .with_include(["column", "pillar", "roman", "greek", "temple"])
                .with_exclude(mesh_noise)
                .with_bonus(["sm_", "architecture", "ruin"]),
            RoleSpec::new("EnvMeshTent", ReferenceKind::DataObject)
                .with_types([TypeTag::StaticMesh])
                .with_include(["tent", "awning", "canopy", "cloth", "stall"])
                .with_exclude(mesh_noise)
                .with_bonus(["sm_", "market"]),
            RoleSpec::new("EnvMeshCanopy", ReferenceKind::DataObject)
                .with_types([TypeTag::StaticMesh])
                .with_include(["olive", "tree", "palm", "foliage", "bush"])
                .with_exclude(mesh_noise)
                .with_bonus(["sm_", "environment"]),
            RoleSpec::new("EnvMeshGround", ReferenceKind::DataObject)
                .with_types([TypeTag::StaticMesh])
                .with_include(["ground", "floor", "tile", "terrain", "road"])
                .with_exclude(mesh_noise)
                .with_bonus(["sm_", "environment", "modular"]),
            RoleSpec::new("EnvMaterialStone", ReferenceKind::DataObject)
                .with_types([TypeTag::Material, TypeTag::MaterialInstanceConstant, TypeTag::MaterialInstance])
                .with_include(["stone", "rock", "masonry", "wall", "ruin"])
                .with_exclude(material_noise)
                .with_bonus(["mi_", "master", "tile"]),
            RoleSpec::new("EnvMaterialOlive", ReferenceKind::DataObject)
                .with_types([TypeTag::Material, TypeTag::MaterialInstanceConstant, TypeTag::MaterialInstance])
                .with_include(["olive", "leaf", "foliage", "tree", "forest"])
                .with_exclude(material_noise)
                .with_bonus(["mi_", "master", "nature"]),
            RoleSpec::new("EnvMaterialSand", ReferenceKind::DataObject)
                .with_types([TypeTag::Material, TypeTag::MaterialInstanceConstant, TypeTag::MaterialInstance])
                .with_include(["sand", "desert", "dirt", "soil", "dust"])
                .with_exclude(material_noise)
                .with_bonus(["mi_", "master", "ground"]),
        ];

        let map_search = MapSearch {
            include_terms: TermSet::from_terms([
                "middle", "town", "city", "market", "village", "desert", "ruin", "ancient",
                "roman", "jerusalem", "galilee",
            ]),
            exclude_terms: TermSet::from_terms(["test", "example", "overview", "template"]),
            bonus_terms: TermSet::from_terms(["map", "level", "pcg"]),
            max_results: 4,
        };

        let regions = vec![
            RegionSpec::new(
                "GalileeMap",
                ["galilee", "shore", "sea", "fishing", "lake"],
                "/Game/Maps/Regions/Galilee/L_GalileeShores",
            ),
            RegionSpec::new(
                "DecapolisMap",
                ["decapolis", "ruin", "greek", "column"],
                "/Game/Maps/Regions/Decapolis/L_DecapolisRuins",
            ),
            RegionSpec::new(
                "WildernessMap",
                ["wilderness", "desert", "temptation", "rock"],
                "/Game/Maps/Regions/Wilderness/L_WildernessTemptation",
            ),
            RegionSpec::new(
                "JerusalemMap",
                ["jerusalem", "city", "temple", "gate"],
                "/Game/Maps/Regions/Jerusalem/L_JerusalemApproach",
            ),
            RegionSpec::new(
                "GethsemaneMap",
                ["gethsemane", "garden", "olive", "night"],
                "/Game/Maps/Regions/Gethsemane/L_GardenGethsemane",
            ),
            RegionSpec::new(
                "ViaDolorosaMap",
                ["dolorosa", "via", "street", "path"],
                "/Game/Maps/Regions/ViaDolorosa/L_ViaDolorosa",
            ),
            RegionSpec::new(
                "EmptyTombMap",
                ["tomb", "cave", "stone", "morning"],
                "/Game/Maps/Regions/EmptyTomb/L_EmptyTomb",
            ),
        ];

        let collisions = vec![
            CollisionPair::new(
                "PlayerSkeletalMesh",
                "EnemySkeletalMesh",
                Vec::<&str>::new(),
                ["jesus", "hero", "pilgrim", "apostle", "prophet"],
            ),
            CollisionPair::new(
                "EnvMeshBlock",
                "EnvMeshColumn",
                ["ruin"],
                ["block", "wall", "brick"],
            ),
            CollisionPair::new(
                "EnvMeshBlock",
                "EnvMeshCanopy",
                Vec::<&str>::new(),
                ["block", "wall", "stone", "brick", "modular"],
            ),
            CollisionPair::new(
                "EnvMeshTent",
                "EnvMeshCanopy",
                Vec::<&str>::new(),
                ["tent", "awning", "canopy", "cloth", "stall"],
            ),
        ];

        Self {
            roles,
            map_search,
            regions,
            collisions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults() {
        let role = RoleSpec::new("Test", ReferenceKind::DataObject);
        assert_eq!(role.min_score, 1);
        assert!(role.fallback_role_id.is_none());
        assert!(role.include_terms.is_empty());
    }

    #[test]
    fn test_role_builder() {
        let role = RoleSpec::new("Test", ReferenceKind::GeneratedClass)
            .with_types([TypeTag::AnimBlueprint])
            .with_include(["abp", "anim"])
            .with_exclude(["test"])
            .with_bonus(["character"])
            .with_min_score(3)
            .with_fallback("Other");

        assert_eq!(role.allowed_types, vec![TypeTag::AnimBlueprint]);
        assert_eq!(role.min_score, 3);
        assert_eq!(role.fallback_role_id.as_deref(), Some("Other"));
        assert!(role.include_terms.contains("abp"));
    }

    #[test]
    fn test_starter_pack_validates() {
        assert_eq!(RolePlan::starter_pack().validate(), Ok(()));
    }

    #[test]
    fn test_starter_pack_shape() {
        let plan = RolePlan::starter_pack();
        assert_eq!(plan.roles.len(), 12);
        assert_eq!(plan.regions.len(), 7);
        assert!(!plan.collisions.is_empty());
        assert_eq!(
            plan.role("EnemyAnimBlueprint").unwrap().fallback_role_id.as_deref(),
            Some("PlayerAnimBlueprint")
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_role() {
        let mut plan = RolePlan::starter_pack();
        plan.roles.push(RoleSpec::new("PlayerSkeletalMesh", ReferenceKind::DataObject));
        assert!(matches!(plan.validate(), Err(PlanError::DuplicateRole { .. })));
    }

    #[test]
    fn test_validate_rejects_unknown_fallback() {
        let mut plan = RolePlan::starter_pack();
        plan.roles.push(
            RoleSpec::new("Extra", ReferenceKind::DataObject).with_fallback("NoSuchRole"),
        );
        assert!(matches!(plan.validate(), Err(PlanError::UnknownFallback { .. })));
    }

    #[test]
    fn test_validate_rejects_forward_fallback() {
        let mut plan = RolePlan::starter_pack();
        // Fallback target exists but is declared later in the plan.
        plan.roles.insert(
            0,
            RoleSpec::new("Early", ReferenceKind::DataObject).with_fallback("PlayerSkeletalMesh"),
        );
        assert!(matches!(plan.validate(), Err(PlanError::ForwardFallback { .. })));
    }

    #[test]
    fn test_validate_rejects_unknown_collision_role() {
        let mut plan = RolePlan::starter_pack();
        plan.collisions.push(CollisionPair::new(
            "PlayerSkeletalMesh",
            "NoSuchRole",
            Vec::<&str>::new(),
            Vec::<&str>::new(),
        ));
        assert!(matches!(plan.validate(), Err(PlanError::UnknownCollisionRole { .. })));
    }
}
