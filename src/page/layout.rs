use crate::foundation::{
    core::{ElementRect, Viewport},
    error::{ReelError, ReelResult},
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Hero,
    LogoStrip,
    Video,
    Problem,
    Stats,
    Solution,
    Testimonials,
    Process,
    Work,
    CallToAction,
    Footer,
}

impl SectionKind {
    pub const PAGE_ORDER: [SectionKind; 11] = [
        SectionKind::Hero,
        SectionKind::LogoStrip,
        SectionKind::Video,
        SectionKind::Problem,
        SectionKind::Stats,
        SectionKind::Solution,
        SectionKind::Testimonials,
        SectionKind::Process,
        SectionKind::Work,
        SectionKind::CallToAction,
        SectionKind::Footer,
    ];

    /// Navigation anchor targeting this section.
    pub fn anchor(self) -> Option<&'static str> {
        match self {
            Self::Video => Some("#demo"),
            Self::Solution => Some("#solutions"),
            Self::Process => Some("#process"),
            Self::Work => Some("#work"),
            Self::CallToAction => Some("#contact"),
            _ => None,
        }
    }

    /// Typical rendered height in viewport-height units.
    pub fn default_height_vh(self) -> f64 {
        match self {
            Self::LogoStrip => 20.0,
            Self::Stats => 60.0,
            Self::Testimonials => 80.0,
            Self::Footer => 40.0,
            _ => 100.0,
        }
    }
}

/// One section's box plus the pin spacer that follows it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SectionSlot {
    pub kind: SectionKind,
    pub top: f64,
    pub height: f64,
    pub spacer: f64,
}

impl SectionSlot {
    pub fn rect(&self) -> ElementRect {
        ElementRect::new(self.top, self.height)
    }
}

/// Vertical stacking of the page's sections in document pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageLayout {
    viewport: Viewport,
    slots: Vec<SectionSlot>,
    content_height: f64,
}

impl PageLayout {
    /// `heights_vh` in page order; `spacer` reports each section's pin spacer in px.
    pub fn build(
        viewport: Viewport,
        heights_vh: &[(SectionKind, f64)],
        mut spacer: impl FnMut(SectionKind) -> f64,
    ) -> ReelResult<Self> {
        let mut slots = Vec::with_capacity(heights_vh.len());
        let mut top = 0.0;
        for &(kind, vh) in heights_vh {
            if !(vh.is_finite() && vh >= 0.0) {
                return Err(ReelError::layout(format!(
                    "section {kind:?} height must be finite and >= 0 (got {vh})"
                )));
            }
            if slots.iter().any(|s: &SectionSlot| s.kind == kind) {
                return Err(ReelError::layout(format!("section {kind:?} appears twice")));
            }
            let height = viewport.height_pct(vh);
            let pad = spacer(kind).max(0.0);
            slots.push(SectionSlot {
                kind,
                top,
                height,
                spacer: pad,
            });
            top += height + pad;
        }
        Ok(Self {
            viewport,
            slots,
            content_height: top,
        })
    }

    /// Every section of the page at its default height.
    pub fn default_heights() -> Vec<(SectionKind, f64)> {
        SectionKind::PAGE_ORDER
            .iter()
            .map(|&k| (k, k.default_height_vh()))
            .collect()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    pub fn slots(&self) -> &[SectionSlot] {
        &self.slots
    }

    pub fn slot(&self, kind: SectionKind) -> Option<&SectionSlot> {
        self.slots.iter().find(|s| s.kind == kind)
    }

    /// `None` when the section is not on the page.
    pub fn rect(&self, kind: SectionKind) -> Option<ElementRect> {
        self.slot(kind).map(SectionSlot::rect)
    }

    /// Scroll offset that brings an anchored section to the top.
    pub fn anchor_offset(&self, href: &str) -> Option<f64> {
        self.slots
            .iter()
            .find(|s| s.kind.anchor() == Some(href))
            .map(|s| s.top)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/layout.rs"]
mod tests;
