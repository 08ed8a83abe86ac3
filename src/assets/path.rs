/// Explicit base path override.
pub const BASE_PATH_ENV: &str = "SCROLLREEL_BASE_PATH";
/// `owner/name` of the deploying repository; the site is served under `/name`.
pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

/// Prefixes root-relative asset paths with the deployment base path.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssetPaths {
    base: String,
}

impl AssetPaths {
    /// Normalizes to either `""` or `/segment[/segment..]` without a trailing slash.
    pub fn new(base: impl AsRef<str>) -> Self {
        let trimmed = base.as_ref().trim().trim_matches('/');
        let base = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { base }
    }

    /// `owner/name` serves from `/name`; anything else serves from the root.
    pub fn from_repository(repository: &str) -> Self {
        match repository.split('/').nth(1) {
            Some(name) if !name.trim().is_empty() => Self::new(name),
            _ => Self::default(),
        }
    }

    /// Resolution order: `explicit`, then [`BASE_PATH_ENV`], then
    /// [`REPOSITORY_ENV`], then the root.
    pub fn detect(explicit: Option<&str>) -> Self {
        Self::detect_with(explicit, |key| std::env::var(key).ok())
    }

    pub fn detect_with(explicit: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base) = explicit {
            return Self::new(base);
        }
        if let Some(base) = lookup(BASE_PATH_ENV) {
            return Self::new(base);
        }
        if let Some(repo) = lookup(REPOSITORY_ENV) {
            let paths = Self::from_repository(&repo);
            tracing::debug!(repository = %repo, base = %paths.base, "base path from repository");
            return paths;
        }
        Self::default()
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Prefix `path`. Absolute URLs pass through untouched.
    pub fn resolve(&self, path: &str) -> String {
        if path.contains("://") || path.starts_with("data:") {
            return path.to_owned();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/path.rs"]
mod tests;
