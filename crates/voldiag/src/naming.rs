//! Output names derived from file paths.
//!
//! The library always takes an explicit output name. Deriving it from the
//! running executable is a CLI default, exposed here as [`name_from_self`].

use std::{
    env,
    path::{Path, PathBuf},
};

use log::debug;

use crate::VoldiagError;

/// Returns the file name of `path` with its last extension removed.
///
/// Directory components are ignored, so `docs/diagram.py` and
/// `/tmp/diagram.py` both yield `diagram`. A name without an extension is
/// returned unchanged.
///
/// # Errors
///
/// Returns [`VoldiagError::Configuration`] if the path has no file name
/// (e.g. `/` or `..`), the name is not valid UTF-8, or the stem is empty.
///
/// # Examples
///
/// ```
/// use voldiag::naming::name_from_path;
///
/// assert_eq!(name_from_path("docs/diagram.py").unwrap(), "diagram");
/// assert_eq!(name_from_path("archive.tar.gz").unwrap(), "archive.tar");
/// ```
pub fn name_from_path(path: impl AsRef<Path>) -> Result<String, VoldiagError> {
    let path = path.as_ref();
    let stem = path.file_stem().ok_or_else(|| {
        VoldiagError::Configuration(format!(
            "cannot derive an output name from `{}`",
            path.display()
        ))
    })?;

    let stem = stem.to_str().ok_or_else(|| {
        VoldiagError::Configuration(format!(
            "output name derived from `{}` is not valid UTF-8",
            path.display()
        ))
    })?;

    if stem.is_empty() {
        return Err(VoldiagError::Configuration(format!(
            "output name derived from `{}` is empty",
            path.display()
        )));
    }

    Ok(stem.to_string())
}

/// Returns the running executable's name with its extension removed.
///
/// The invoked path (`argv[0]`) is preferred so a renamed or symlinked binary
/// names its output after what the user typed; the resolved executable path is
/// the fallback.
///
/// # Errors
///
/// Returns [`VoldiagError::Configuration`] if no executable path can be
/// resolved or it does not yield a usable name.
pub fn name_from_self() -> Result<String, VoldiagError> {
    let path = env::args_os()
        .next()
        .map(PathBuf::from)
        .or_else(|| env::current_exe().ok())
        .ok_or_else(|| {
            VoldiagError::Configuration("cannot resolve the path of the running program".into())
        })?;

    let name = name_from_path(&path)?;
    debug!(path:? = path, name = name; "Derived output name from executable");
    Ok(name)
}

/// Checks that `name` can be used as an output file name as-is.
///
/// The name must be a single path component: no separators, and neither `.`
/// nor `..`. Extensions are allowed; the output format's extension is
/// appended after them.
///
/// # Errors
///
/// Returns [`VoldiagError::Configuration`] naming the rejected value.
///
/// # Examples
///
/// ```
/// use voldiag::naming::check_name;
///
/// assert!(check_name("diagram").is_ok());
/// assert!(check_name("../diagram").is_err());
/// ```
pub fn check_name(name: &str) -> Result<(), VoldiagError> {
    let single_component = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.chars().any(std::path::is_separator)
        && Path::new(name).file_name() == Some(name.as_ref());

    if single_component {
        Ok(())
    } else {
        Err(VoldiagError::Configuration(format!(
            "output name `{name}` must be a plain file name without directories"
        )))
    }
}
