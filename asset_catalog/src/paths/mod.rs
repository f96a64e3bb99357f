//! Pure reference-path conversions.
//!
//! Object references take the form `container_path.ObjectName`. Some role
//! consumers want only the container path (level packages); others want a
//! generated-class reference (`ObjectName_C`) instead of the data object.

/// Strip a trailing `.ObjectName` segment, keeping only the container path.
/// Idempotent.
pub fn to_container_path(reference: &str) -> String {
    match reference.split_once('.') {
        Some((container, _)) => container.to_string(),
        None => reference.to_string(),
    }
}

/// Convert an object reference into a generated-class reference by ensuring
/// the object name carries the `_C` suffix. A reference with no object-name
/// segment derives one from the last path component. Empty input stays
/// empty; already-suffixed input is returned unchanged.
pub fn to_generated_class_reference(reference: &str) -> String {
    if reference.is_empty() {
        return String::new();
    }

    match reference.split_once('.') {
        Some((container, object_name)) => {
            if object_name.ends_with("_C") {
                reference.to_string()
            } else {
                format!("{container}.{object_name}_C")
            }
        }
        None => {
            let short_name = reference.rsplit('/').next().unwrap_or(reference);
            format!("{reference}.{short_name}_C")
        }
    }
}
