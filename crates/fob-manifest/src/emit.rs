//! Manifest artifact naming and persistence.
//!
//! The artifact has two names: a logical asset name relative to the output
//! directory (forward slashes, registered with the host), and an absolute
//! filesystem path used when writing it to disk.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

use crate::runtime::Runtime;
use crate::{Error, Result};

/// Logical asset name of the manifest inside the output directory.
///
/// Absolute filenames are made relative to `output_path`; relative ones are
/// kept as given. Both are lexically normalized with forward slashes.
///
/// # Examples
///
/// ```
/// use fob_manifest::emit::asset_name;
/// use std::path::Path;
///
/// let name = asset_name(Path::new("/app/dist"), Path::new("/app/dist/meta/manifest.json")).unwrap();
/// assert_eq!(name, "meta/manifest.json");
///
/// let name = asset_name(Path::new("/app/dist"), Path::new("./manifest.json")).unwrap();
/// assert_eq!(name, "manifest.json");
/// ```
pub fn asset_name(output_path: &Path, filename: &Path) -> Result<String> {
    let name = if filename.is_absolute() {
        relative_path(&output_path.clean(), &filename.clean())
    } else {
        filename.clean()
    };

    let name = unixify(&name);
    if name.is_empty() || name == "." {
        return Err(Error::InvalidOutputPath(filename.display().to_string()));
    }
    Ok(name)
}

/// Absolute location of the manifest on disk.
pub fn output_file(output_path: &Path, filename: &Path) -> PathBuf {
    if filename.is_absolute() {
        filename.clean()
    } else {
        output_path.join(filename).clean()
    }
}

/// Write `content` to `path`, creating missing parent directories first.
///
/// Resolves once the write has settled; failures surface as
/// [`Error::WriteFailure`].
pub async fn write_manifest<R: Runtime + ?Sized>(
    runtime: &R,
    path: &Path,
    content: &[u8],
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !runtime.exists(parent) {
            runtime.create_dir(parent, true).await.map_err(|e| {
                Error::WriteFailure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    runtime.write_file(path, content).await.map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to write manifest '{}': {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "manifest written");
    Ok(())
}

fn unixify(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Lexical relative path from `from` to `to`; both must be clean absolute paths.
/// Paths on different roots (e.g. Windows drives) yield `to` unchanged.
fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();

    let same_root = match (from.first(), to.first()) {
        (Some(Component::Prefix(a)), Some(Component::Prefix(b))) => a == b,
        (Some(Component::Prefix(_)), _) | (_, Some(Component::Prefix(_))) => false,
        _ => true,
    };
    if !same_root {
        return to.iter().collect();
    }

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &to[common..] {
        relative.push(component.as_os_str());
    }
    relative
}
