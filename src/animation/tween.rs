use crate::{
    animation::ease::Ease,
    foundation::core::VisualState,
    foundation::error::{ReelError, ReelResult},
    foundation::math::{clamp01, ensure_finite, lerp},
};

/// Index of an animated element inside one [`Timeline`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TargetId(pub usize);

/// Animatable property of a [`VisualState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Prop {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
}

impl Prop {
    pub fn read(self, s: &VisualState) -> f64 {
        match self {
            Self::Opacity => s.opacity,
            Self::TranslateX => s.translate.x,
            Self::TranslateY => s.translate.y,
            Self::Scale => s.scale,
        }
    }

    pub fn write(self, s: &mut VisualState, v: f64) {
        match self {
            Self::Opacity => s.opacity = clamp01(v),
            Self::TranslateX => s.translate.x = v,
            Self::TranslateY => s.translate.y = v,
            Self::Scale => s.scale = v,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    pub target: TargetId,
    pub prop: Prop,
    pub from: f64,
    pub to: f64,
    pub position: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn end(&self) -> f64 {
        self.position + self.duration
    }

    fn value_at(&self, t: f64) -> Option<f64> {
        if t < self.position {
            return None;
        }
        if self.duration <= 0.0 {
            return Some(self.to);
        }
        let local = clamp01((t - self.position) / self.duration);
        Some(lerp(self.from, self.to, self.ease.apply(local)))
    }
}

/// Ordered set of property tweens over a fixed group of targets.
///
/// Sampling is stateless: every call rebuilds all target states from the
/// initial values, applying tweens by start position. Tweens that share a
/// position apply in insertion order, so the later one wins on overlap.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    initial: Vec<VisualState>,
    tweens: Vec<Tween>, // sorted by position, stable
}

impl Timeline {
    pub fn new(initial: Vec<VisualState>) -> Self {
        Self {
            initial,
            tweens: Vec::new(),
        }
    }

    pub fn targets(&self) -> usize {
        self.initial.len()
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn initial(&self, target: TargetId) -> Option<&VisualState> {
        self.initial.get(target.0)
    }

    /// End of the last tween, or 0 for an empty timeline.
    pub fn duration(&self) -> f64 {
        self.tweens.iter().map(Tween::end).fold(0.0, f64::max)
    }

    /// Tween `prop` of `target` to `value`, starting from whatever the timeline
    /// already produces at `position`.
    pub fn to(
        &mut self,
        target: TargetId,
        prop: Prop,
        value: f64,
        position: f64,
        duration: f64,
        ease: Ease,
    ) -> ReelResult<&mut Self> {
        self.check(target, value, position, duration)?;
        let from = self.value_at(target, prop, position);
        self.insert(Tween {
            target,
            prop,
            from,
            to: value,
            position,
            duration,
            ease,
        });
        Ok(self)
    }

    /// Tween with an explicit start value. When no earlier tween animates the
    /// same property, `from` also becomes the rendered value before `position`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_to(
        &mut self,
        target: TargetId,
        prop: Prop,
        from: f64,
        value: f64,
        position: f64,
        duration: f64,
        ease: Ease,
    ) -> ReelResult<&mut Self> {
        self.check(target, value, position, duration)?;
        ensure_finite("tween from", from)?;
        let animated_before = self
            .tweens
            .iter()
            .any(|tw| tw.target == target && tw.prop == prop && tw.position <= position);
        if !animated_before {
            prop.write(&mut self.initial[target.0], from);
        }
        self.insert(Tween {
            target,
            prop,
            from,
            to: value,
            position,
            duration,
            ease,
        });
        Ok(self)
    }

    /// Value of one property at timeline time `t`.
    pub fn value_at(&self, target: TargetId, prop: Prop, t: f64) -> f64 {
        let mut v = self
            .initial
            .get(target.0)
            .map(|s| prop.read(s))
            .unwrap_or_default();
        for tw in self
            .tweens
            .iter()
            .filter(|tw| tw.target == target && tw.prop == prop)
        {
            if let Some(x) = tw.value_at(t) {
                v = x;
            }
        }
        v
    }

    pub fn sample(&self, t: f64) -> Vec<VisualState> {
        let mut out = Vec::with_capacity(self.initial.len());
        self.sample_into(t, &mut out);
        out
    }

    pub fn sample_into(&self, t: f64, out: &mut Vec<VisualState>) {
        out.clear();
        out.extend_from_slice(&self.initial);
        for tw in &self.tweens {
            if let Some(v) = tw.value_at(t) {
                tw.prop.write(&mut out[tw.target.0], v);
            }
        }
    }

    fn check(&self, target: TargetId, value: f64, position: f64, duration: f64) -> ReelResult<()> {
        if target.0 >= self.initial.len() {
            return Err(ReelError::timeline(format!(
                "tween target {} is out of range (timeline has {} targets)",
                target.0,
                self.initial.len()
            )));
        }
        ensure_finite("tween value", value)?;
        if !(position.is_finite() && position >= 0.0) {
            return Err(ReelError::timeline("tween position must be finite and >= 0"));
        }
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(ReelError::timeline("tween duration must be finite and >= 0"));
        }
        Ok(())
    }

    fn insert(&mut self, tween: Tween) {
        let idx = self
            .tweens
            .partition_point(|tw| tw.position <= tween.position);
        self.tweens.insert(idx, tween);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
