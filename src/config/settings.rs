use std::path::Path;

use crate::{
    assets::path::AssetPaths,
    foundation::error::{ReelError, ReelResult},
    scroll::normalizer::NormalizerConfig,
    timeline::pinned::Breakpoint,
    timeline::segment::SegmentConfig,
};

/// Smoothing applied to scrubbed sections, in seconds of lag.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrubLag {
    pub hero_secs: f64,
    pub process_secs: f64,
    pub work_secs: f64,
}

impl Default for ScrubLag {
    fn default() -> Self {
        Self {
            hero_secs: 0.7,
            process_secs: 0.6,
            work_secs: 0.7,
        }
    }
}

/// Site-wide tuning, loaded from JSON. Every field is optional.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub scroll: NormalizerConfig,
    pub breakpoint: Breakpoint,
    pub scrub: ScrubLag,
    pub process: SegmentConfig,
    pub work: SegmentConfig,
    /// Asset base path; when absent it is derived from the environment.
    pub base_path: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll: NormalizerConfig::default(),
            breakpoint: Breakpoint::default(),
            scrub: ScrubLag::default(),
            process: SegmentConfig::process(),
            work: SegmentConfig::work(),
            base_path: None,
        }
    }
}

impl SiteConfig {
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReelError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> ReelResult<()> {
        self.scroll.validate()?;
        self.breakpoint.validate()?;
        self.process.validate()?;
        self.work.validate()?;
        for (name, v) in [
            ("scrub.hero_secs", self.scrub.hero_secs),
            ("scrub.process_secs", self.scrub.process_secs),
            ("scrub.work_secs", self.scrub.work_secs),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ReelError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    pub fn asset_paths(&self) -> AssetPaths {
        AssetPaths::detect(self.base_path.as_deref())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
