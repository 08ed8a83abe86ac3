use crate::{
    assets::path::AssetPaths,
    config::settings::SiteConfig,
    content::catalog::CatalogSnapshot,
    foundation::core::{Viewport, VisualState},
    foundation::error::ReelResult,
    page::layout::{PageLayout, SectionKind},
    page::sections::{Section, SectionFrame, build_sections},
    scroll::driver::TimelineDriver,
    scroll::normalizer::{InputEvent, ScrollMetrics, ScrollNormalizer},
    timeline::scrub::BackgroundDrift,
};

/// What the host environment can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HostCapabilities {
    /// Per-display-frame callbacks are available.
    pub frame_callbacks: bool,
    /// A scrollable document container exists.
    pub scroll_container: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            frame_callbacks: true,
            scroll_container: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionOutput {
    pub section: SectionKind,
    pub top: f64,
    pub frame: SectionFrame,
}

/// Everything the host applies for one display frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageFrame {
    pub now_ms: f64,
    pub offset: f64,
    pub navbar_scrolled: bool,
    pub background: [VisualState; BackgroundDrift::ORBS],
    pub sections: Vec<SectionOutput>,
}

/// The whole page: one driver, one layout, every section mounted against them.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    assets: AssetPaths,
    heights: Vec<(SectionKind, f64)>,
    driver: TimelineDriver,
    layout: PageLayout,
    sections: Vec<Box<dyn Section>>,
    drift: BackgroundDrift,
    mounted: bool,
}

impl Site {
    /// Offset past which the navigation bar switches to its solid style.
    pub const NAVBAR_SCROLLED_PX: f64 = 40.0;

    pub fn mount(
        config: SiteConfig,
        viewport: Viewport,
        host: HostCapabilities,
    ) -> ReelResult<Self> {
        Self::mount_with_heights(config, viewport, host, PageLayout::default_heights())
    }

    /// Mount with measured section heights (viewport-height units, page order).
    #[tracing::instrument(level = "debug", skip(config, heights))]
    pub fn mount_with_heights(
        config: SiteConfig,
        viewport: Viewport,
        host: HostCapabilities,
        heights: Vec<(SectionKind, f64)>,
    ) -> ReelResult<Self> {
        config.validate()?;
        let assets = config.asset_paths();
        let mut sections = build_sections(&config)?;

        let metrics = host.scroll_container.then_some(ScrollMetrics {
            viewport,
            content_height: viewport.height,
        });
        let normalizer = ScrollNormalizer::new(config.scroll, metrics)?;
        let mut driver = if host.frame_callbacks {
            TimelineDriver::new(normalizer, viewport)
        } else {
            TimelineDriver::headless(normalizer, viewport)
        };

        for s in &mut sections {
            s.sync(&mut driver);
        }
        let layout = build_layout(&sections, viewport, &heights, driver.is_static())?;
        driver.relayout(viewport, layout.content_height());

        let mut drift = BackgroundDrift::new();
        for s in &mut sections {
            s.mount(&mut driver, &layout)?;
        }
        drift.mount(&mut driver)?;

        tracing::info!(
            sections = sections.len(),
            timelines = driver.len(),
            content_height = layout.content_height(),
            base_path = assets.base(),
            "site mounted"
        );
        Ok(Self {
            config,
            assets,
            heights,
            driver,
            layout,
            sections,
            drift,
            mounted: true,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn assets(&self) -> &AssetPaths {
        &self.assets
    }

    pub fn driver(&self) -> &TimelineDriver {
        &self.driver
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn sections(&self) -> impl Iterator<Item = SectionKind> + '_ {
        self.sections.iter().map(|s| s.kind())
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Static content with asset URLs under this site's base path.
    pub fn catalog(&self) -> CatalogSnapshot {
        CatalogSnapshot::resolve(&self.assets)
    }

    /// Feed one host input event.
    pub fn handle(&mut self, event: InputEvent) -> ReelResult<()> {
        match event {
            InputEvent::Resize { viewport, .. } if self.mounted => self.relayout(viewport),
            other => {
                self.driver.handle(other);
                Ok(())
            }
        }
    }

    /// Smooth-scroll to a navigation anchor such as `"#work"`.
    pub fn scroll_to_anchor(&mut self, href: &str) -> bool {
        match self.layout.anchor_offset(href) {
            Some(offset) => {
                self.driver.handle(InputEvent::ScrollTo {
                    offset,
                    immediate: false,
                });
                true
            }
            None => {
                tracing::debug!(href, "unknown anchor");
                false
            }
        }
    }

    /// The host refused to play a section's media.
    pub fn play_rejected(&mut self, kind: SectionKind) {
        if let Some(s) = self.sections.iter_mut().find(|s| s.kind() == kind) {
            s.play_rejected();
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn relayout(&mut self, viewport: Viewport) -> ReelResult<()> {
        // Sections check the breakpoint against the new viewport first.
        self.driver
            .relayout(viewport, self.layout.content_height());
        let mut downgraded = 0;
        for s in &mut self.sections {
            if s.sync(&mut self.driver) {
                downgraded += 1;
            }
        }

        self.layout = build_layout(
            &self.sections,
            viewport,
            &self.heights,
            self.driver.is_static(),
        )?;
        self.driver
            .relayout(viewport, self.layout.content_height());
        for s in &mut self.sections {
            s.remeasure(&mut self.driver, &self.layout);
        }
        self.drift.remeasure(&mut self.driver);
        tracing::debug!(
            downgraded,
            content_height = self.layout.content_height(),
            "layout rebuilt"
        );
        Ok(())
    }

    /// Advance the frame clock and collect every section's state.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn frame(&mut self, now_ms: f64) -> PageFrame {
        let offset = self.driver.tick(now_ms).offset;
        let driver = &self.driver;
        let layout = &self.layout;
        let sections = self
            .sections
            .iter_mut()
            .map(|s| {
                let kind = s.kind();
                SectionOutput {
                    section: kind,
                    top: layout.slot(kind).map_or(0.0, |slot| slot.top),
                    frame: s.frame(driver, now_ms),
                }
            })
            .collect();
        PageFrame {
            now_ms,
            offset,
            navbar_scrolled: offset > Self::NAVBAR_SCROLLED_PX,
            background: self.drift.frame(driver),
            sections,
        }
    }

    /// Tear down every timeline. Returns how many were released; later calls return 0.
    pub fn unmount(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        let released = self.driver.len();
        for s in &mut self.sections {
            s.unmount(&mut self.driver);
        }
        self.drift.unmount(&mut self.driver);
        let stray = self.driver.shutdown();
        if stray > 0 {
            tracing::warn!(stray, "timelines left after section teardown");
        }
        self.mounted = false;
        tracing::info!(released, "site unmounted");
        released
    }
}

impl Drop for Site {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Layout with each section's current pin spacer. Static hosts never pin.
fn build_layout(
    sections: &[Box<dyn Section>],
    viewport: Viewport,
    heights: &[(SectionKind, f64)],
    is_static: bool,
) -> ReelResult<PageLayout> {
    PageLayout::build(viewport, heights, |kind| {
        if is_static {
            return 0.0;
        }
        sections
            .iter()
            .find(|s| s.kind() == kind)
            .map_or(0.0, |s| s.pin_spacer_px(viewport))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/page/site.rs"]
mod tests;
