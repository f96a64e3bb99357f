//! Override emission - the flat `[Section]` / `key=value` artifact consumed
//! by the runtime at startup.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::resolver::ResolutionResult;

/// Section header used by the consuming runtime.
pub const DEFAULT_SECTION: &str = "NazareneAssetOverrides";

/// A failed artifact write. Fatal: the run must not report success.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write override artifact {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Render the override block: one `[section]` header, then `key=value`
/// lines in resolution order. Unresolved roles are omitted entirely, never
/// emitted as `key=`. Newline-terminated, no quoting or escaping.
pub fn render_overrides(section: &str, result: &ResolutionResult) -> String {
    let mut lines = vec![format!("[{section}]")];
    for (role_id, reference) in result.iter() {
        if !reference.is_empty() {
            lines.push(format!("{role_id}={reference}"));
        }
    }
    let mut block = lines.join("\n");
    block.push('\n');
    block
}

/// Overwrite the destination artifact wholesale, creating parent
/// directories as needed.
pub fn write_overrides(path: &Path, section: &str, result: &ResolutionResult) -> Result<(), EmitError> {
    let wrap = |source: io::Error| EmitError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, render_overrides(section, result)).map_err(wrap)?;

    info!(path = %path.display(), keys = result.resolved_count(), "wrote override artifact");
    Ok(())
}
