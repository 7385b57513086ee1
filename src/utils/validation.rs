use crate::utils::error::{Result, ScriptError};
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();
    if display.is_empty() {
        return Err(ScriptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(ScriptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScriptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A single directory or file-name component, such as `es6` or `lib`.
pub fn validate_path_segment(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if value == "." || value == ".." || value.contains(['/', '\\', '\0']) {
        return Err(ScriptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a single path segment".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list(field_name: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(ScriptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "At least one value is required".to_string(),
        });
    }
    for value in values {
        validate_non_empty_string(field_name, value)?;
    }
    Ok(())
}

/// Rejects two options pointing at the same directory.
pub fn validate_distinct_dirs(first: (&str, &Path), second: (&str, &Path)) -> Result<()> {
    if first.1 == second.1 {
        return Err(ScriptError::InvalidConfigValueError {
            field: second.0.to_string(),
            value: second.1.display().to_string(),
            reason: format!("Must differ from {}", first.0),
        });
    }
    Ok(())
}

/// Resolves `.` and `..` without touching the disk.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Checks a directory the build deletes when it finishes.
///
/// It must sit strictly inside `root` and must not hold any of `protected`.
pub fn validate_removable_dir(
    field: (&str, &Path),
    root: &Path,
    protected: &[(&str, &Path)],
) -> Result<()> {
    let (field_name, dir) = field;
    let base = normalize(root);
    let target = normalize(&root.join(dir));

    let inside_root = match target.strip_prefix(&base) {
        Ok(rest) => {
            rest.components().next().is_some()
                && !rest.components().any(|c| c == Component::ParentDir)
        }
        Err(_) => false,
    };
    if !inside_root {
        return Err(ScriptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: dir.display().to_string(),
            reason: "Must be a directory inside root_dir, not root_dir itself".to_string(),
        });
    }

    for (name, path) in protected {
        if normalize(&root.join(path)).starts_with(&target) {
            return Err(ScriptError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: dir.display().to_string(),
                reason: format!("Is removed after the build and would take {} with it", name),
            });
        }
    }
    Ok(())
}
