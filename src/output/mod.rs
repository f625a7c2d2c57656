//! Output directory handling and result presentation

use crate::error::{Error, Result};
use crate::qr::Generated;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Ensure `path` exists as a directory, creating parents as needed.
///
/// Calling this on an existing directory is a no-op.
pub fn create_directory(path: &Path) -> Result<()> {
    match std::fs::create_dir_all(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Output directory ready");
            Ok(())
        }
        Err(source) => {
            let err = Error::Directory {
                path: path.to_path_buf(),
                source,
            };
            tracing::error!("{err}");
            Err(err)
        }
    }
}

/// Location of the PNG for `name` inside `base/directory`.
///
/// A trailing `.png` on `name` is not repeated.
pub fn output_path(base: &Path, directory: &Path, name: &str) -> PathBuf {
    let stem = name
        .strip_suffix(".png")
        .or_else(|| name.strip_suffix(".PNG"))
        .unwrap_or(name);
    base.join(directory).join(format!("{stem}.png"))
}

/// Structured and human-readable forms of a generation result
#[derive(Debug, Clone)]
pub struct RenderedResult {
    /// JSON summary for scripting
    pub json: Value,
    /// Lines for terminal presentation
    pub human: Vec<String>,
}

/// Render a generation result for printing.
pub fn render_generated(generated: &Generated) -> RenderedResult {
    let json = json!({
        "url": generated.url,
        "path": generated.path.display().to_string(),
        "width": generated.width,
        "height": generated.height,
        "verified": generated.verified,
    });

    let mut human = vec![
        format!("QR code written to {}", generated.path.display()),
        format!("  URL: {}", generated.url),
        format!("  Size: {}x{} px", generated.width, generated.height),
    ];
    if generated.verified {
        human.push("  Verified: decoded payload matches URL".to_string());
    }

    RenderedResult { json, human }
}
