//! Recipe files — the configuration artifact describing a project instance.

pub mod config_php;
pub mod linter;
pub mod parser;
pub mod types;

pub use types::Recipe;

use std::path::{Path, PathBuf};

/// Default recipe file name.
pub const DEFAULT_RECIPE: &str = "recipe.yaml";

/// Find a recipe file by walking up the directory tree from `start`.
pub fn find_recipe_walking_up(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(DEFAULT_RECIPE);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Resolve the recipe path the user gave us. An explicit path is used as-is;
/// the default name falls back to walking up from the current directory so
/// the tool works from anywhere inside a project.
pub fn resolve_recipe_path(path: &Path) -> PathBuf {
    if path.exists() || path.is_absolute() || path != Path::new(DEFAULT_RECIPE) {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .ok()
        .and_then(|cwd| find_recipe_walking_up(&cwd))
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_recipe_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_RECIPE), "name: x\n").unwrap();
        let nested = dir.path().join("plugins/mod_fancy");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_recipe_walking_up(&nested).unwrap();
        assert_eq!(found, dir.path().join(DEFAULT_RECIPE));
    }

    #[test]
    fn test_find_recipe_missing() {
        let dir = tempfile::tempdir().unwrap();
        // No recipe anywhere under a fresh temp dir (nothing above it either,
        // unless the test host has one at / — accept both Some-above and None).
        let found = find_recipe_walking_up(dir.path());
        if let Some(path) = found {
            assert!(!path.starts_with(dir.path()));
        }
    }

    #[test]
    fn test_explicit_path_is_untouched() {
        let explicit = Path::new("configs/staging.yaml");
        assert_eq!(resolve_recipe_path(explicit), explicit);
    }
}
