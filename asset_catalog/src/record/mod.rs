//! Asset record definitions - the rows of the content catalog.

use serde::{Deserialize, Serialize};

/// Closed enumeration of catalog asset types.
///
/// The host reports types as free-form class-name strings; anything this
/// crate does not recognize becomes [`TypeTag::Unknown`], which no role
/// whitelist accepts. New host types therefore surface as unresolved roles
/// rather than silently matching the wrong whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    SkeletalMesh,
    StaticMesh,
    AnimBlueprint,
    Blueprint,
    Material,
    MaterialInstance,
    MaterialInstanceConstant,
    World,
    /// Any class name this crate does not recognize.
    Unknown,
}

impl TypeTag {
    /// Map a host class name onto a type tag.
    pub fn from_class_name(class_name: &str) -> Self {
        match class_name {
            "SkeletalMesh" => TypeTag::SkeletalMesh,
            "StaticMesh" => TypeTag::StaticMesh,
            "AnimBlueprint" => TypeTag::AnimBlueprint,
            "Blueprint" => TypeTag::Blueprint,
            "Material" => TypeTag::Material,
            "MaterialInstance" => TypeTag::MaterialInstance,
            "MaterialInstanceConstant" => TypeTag::MaterialInstanceConstant,
            "World" => TypeTag::World,
            _ => TypeTag::Unknown,
        }
    }

    /// The host class name for this tag.
    pub fn class_name(&self) -> &'static str {
        match self {
            TypeTag::SkeletalMesh => "SkeletalMesh",
            TypeTag::StaticMesh => "StaticMesh",
            TypeTag::AnimBlueprint => "AnimBlueprint",
            TypeTag::Blueprint => "Blueprint",
            TypeTag::Material => "Material",
            TypeTag::MaterialInstance => "MaterialInstance",
            TypeTag::MaterialInstanceConstant => "MaterialInstanceConstant",
            TypeTag::World => "World",
            TypeTag::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

/// One catalog entry. Records are unique by `(container_path, name)`;
/// names alone may repeat across containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub type_tag: TypeTag,

    /// Bare object name, e.g. `SK_Jesus_Body`.
    pub name: String,

    /// Container (package) path, e.g. `/Game/Fab/Characters/SK_Jesus_Body`.
    pub container_path: String,
}

impl AssetRecord {
    /// Create a new record.
    pub fn new(type_tag: TypeTag, name: impl Into<String>, container_path: impl Into<String>) -> Self {
        Self {
            type_tag,
            name: name.into(),
            container_path: container_path.into(),
        }
    }

    /// The fully-qualified object reference, `container_path.name`.
    pub fn reference(&self) -> String {
        format!("{}.{}", self.container_path, self.name)
    }

    /// Lowercase text the scoring function matches terms against:
    /// the bare name followed by the full reference.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.name, self.reference()).to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_from_class_name() {
        assert_eq!(TypeTag::from_class_name("SkeletalMesh"), TypeTag::SkeletalMesh);
        assert_eq!(TypeTag::from_class_name("World"), TypeTag::World);
        assert_eq!(TypeTag::from_class_name("NiagaraSystem"), TypeTag::Unknown);
        assert_eq!(TypeTag::from_class_name(""), TypeTag::Unknown);
    }

    #[test]
    fn test_type_tag_round_trip() {
        for tag in [
            TypeTag::SkeletalMesh,
            TypeTag::StaticMesh,
            TypeTag::AnimBlueprint,
            TypeTag::Blueprint,
            TypeTag::Material,
            TypeTag::MaterialInstance,
            TypeTag::MaterialInstanceConstant,
            TypeTag::World,
        ] {
            assert_eq!(TypeTag::from_class_name(tag.class_name()), tag);
        }
    }

    #[test]
    fn test_record_reference() {
        let record = AssetRecord::new(
            TypeTag::SkeletalMesh,
            "SK_Jesus_Body",
            "/Game/Fab/Characters/SK_Jesus_Body",
        );
        assert_eq!(
            record.reference(),
            "/Game/Fab/Characters/SK_Jesus_Body.SK_Jesus_Body"
        );
    }

    #[test]
    fn test_search_text_is_lowercase() {
        let record = AssetRecord::new(TypeTag::StaticMesh, "SM_RomanColumn", "/Game/Fab/Props/SM_RomanColumn");
        let text = record.search_text();
        assert_eq!(text, text.to_lowercase());
        assert!(text.contains("romancolumn"));
        assert!(text.contains("/game/fab/props/"));
    }
}
