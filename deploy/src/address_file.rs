use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::Builder;

use crate::error::{DeployError, Result};

pub fn render(name: &str, address: &str) -> String {
    format!("export const {name} = \"{address}\"\n")
}

/// Replaces `path` with the rendered module.
///
/// The content goes to a temporary file next to the target which is then
/// renamed over it, so readers see either the previous file or the complete
/// new one. An existing file keeps its permissions, a new one gets 0644 less
/// the umask. A symlinked `path` is written through to the file it points at.
pub fn write(path: &Path, name: &str, address: &str) -> Result<()> {
    let to_write_error = |source: std::io::Error| DeployError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    let target = match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).map_err(to_write_error)?
        }
        _ => path.to_path_buf(),
    };
    let existing = fs::metadata(&target).ok().map(|meta| meta.permissions());
    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    if existing.is_none() {
        with_default_mode(&mut builder);
    }
    let mut file = builder.tempfile_in(dir).map_err(to_write_error)?;
    file.write_all(render(name, address).as_bytes())
        .map_err(to_write_error)?;
    if let Some(permissions) = existing {
        file.as_file()
            .set_permissions(permissions)
            .map_err(to_write_error)?;
    }
    file.as_file().sync_all().map_err(to_write_error)?;
    file.persist(&target).map_err(|e| to_write_error(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn with_default_mode(builder: &mut Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt;
    // the mode passed to open(2) is still masked by the process umask
    builder.permissions(fs::Permissions::from_mode(0o644));
}

#[cfg(not(unix))]
fn with_default_mode(_: &mut Builder<'_, '_>) {}
