use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Vec2};

/// Visible browser viewport in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> ReelResult<Self> {
        if !width.is_finite() || !height.is_finite() {
            return Err(ReelError::validation("Viewport dimensions must be finite"));
        }
        if width < 0.0 || height < 0.0 {
            return Err(ReelError::validation(
                "Viewport dimensions must be non-negative",
            ));
        }
        Ok(Self { width, height })
    }

    /// Resolve a percentage of the viewport height to pixels.
    pub fn height_pct(self, pct: f64) -> f64 {
        self.height * pct / 100.0
    }
}

/// Vertical placement of an element in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementRect {
    pub top: f64,
    pub height: f64,
}

impl ElementRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    pub fn center(self) -> f64 {
        self.top + self.height * 0.5
    }
}

/// Per-element output of every timeline: what the host writes to style.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    pub opacity: f64,
    pub translate: Vec2,
    pub scale: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self::RESTING
    }
}

impl VisualState {
    /// Fully visible, untransformed.
    pub const RESTING: Self = Self {
        opacity: 1.0,
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            ..Self::RESTING
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_translate(mut self, x: f64, y: f64) -> Self {
        self.translate = Vec2::new(x, y);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn is_resting(&self) -> bool {
        *self == Self::RESTING
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Translate then scale about the element origin.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: a.opacity + (b.opacity - a.opacity) * t,
            translate: a.translate.lerp(b.translate, t),
            scale: a.scale + (b.scale - a.scale) * t,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
