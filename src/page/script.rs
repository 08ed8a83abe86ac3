use crate::{
    config::settings::SiteConfig,
    foundation::core::Viewport,
    foundation::error::{ReelError, ReelResult},
    page::layout::{PageLayout, SectionKind},
    page::site::{HostCapabilities, PageFrame, Site},
    scroll::normalizer::InputEvent,
};

/// One scripted host action.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    Input(InputEvent),
    /// Render one frame.
    Frame { now_ms: f64 },
    /// Render frames from `from_ms` to `to_ms` inclusive every `step_ms`.
    Run {
        from_ms: f64,
        to_ms: f64,
        step_ms: f64,
    },
    Anchor { href: String },
    PlayRejected { section: SectionKind },
}

/// A replayable session against a freshly mounted [`Site`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimulationScript {
    pub viewport: Viewport,
    #[serde(default)]
    pub host: HostCapabilities,
    /// Section heights in viewport units; defaults to the standard page.
    #[serde(default)]
    pub heights: Option<Vec<(SectionKind, f64)>>,
    pub steps: Vec<ScriptStep>,
}

impl SimulationScript {
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> ReelResult<()> {
        Viewport::new(self.viewport.width, self.viewport.height)?;
        for step in &self.steps {
            if let ScriptStep::Run {
                from_ms,
                to_ms,
                step_ms,
            } = *step
            {
                if !(step_ms.is_finite() && step_ms > 0.0) {
                    return Err(ReelError::validation("run step_ms must be finite and > 0"));
                }
                if !(from_ms.is_finite() && to_ms.is_finite() && from_ms <= to_ms) {
                    return Err(ReelError::validation(
                        "run needs finite from_ms <= to_ms",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Mount, replay every step, unmount. Returns the rendered frames in order.
    #[tracing::instrument(level = "debug", skip_all, fields(steps = self.steps.len()))]
    pub fn run(&self, config: SiteConfig) -> ReelResult<Vec<PageFrame>> {
        self.validate()?;
        let heights = self
            .heights
            .clone()
            .unwrap_or_else(PageLayout::default_heights);
        let mut site = Site::mount_with_heights(config, self.viewport, self.host, heights)?;
        let mut frames = Vec::new();
        for step in &self.steps {
            match step {
                ScriptStep::Input(event) => site.handle(*event)?,
                ScriptStep::Frame { now_ms } => frames.push(site.frame(*now_ms)),
                ScriptStep::Run {
                    from_ms,
                    to_ms,
                    step_ms,
                } => {
                    let mut i = 0u64;
                    loop {
                        let t = from_ms + i as f64 * step_ms;
                        if t > *to_ms {
                            break;
                        }
                        frames.push(site.frame(t));
                        i += 1;
                    }
                }
                ScriptStep::Anchor { href } => {
                    site.scroll_to_anchor(href);
                }
                ScriptStep::PlayRejected { section } => site.play_rejected(*section),
            }
        }
        let released = site.unmount();
        tracing::debug!(frames = frames.len(), released, "script finished");
        Ok(frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/script.rs"]
mod tests;
