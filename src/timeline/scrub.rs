use std::f64::consts::PI;

use crate::{
    animation::tween::Timeline,
    foundation::core::{ElementRect, Viewport, VisualState},
    foundation::error::{ReelError, ReelResult},
    foundation::math::clamp01,
    scroll::driver::{TimelineDriver, TimelineId},
    timeline::binding::{PinState, TimelineBinding},
    timeline::trigger::TriggerSpec,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneFrame {
    pub progress: f64,
    pub targets: Vec<VisualState>,
    pub pin: PinState,
}

/// A tween [`Timeline`] on a normalized `[0, 1]` axis, sampled at the
/// progress of a scrubbed binding.
#[derive(Clone, Debug)]
pub struct ScrubScene {
    trigger: TriggerSpec,
    lag_secs: f64,
    pin: bool,
    timeline: Timeline,
    id: Option<TimelineId>,
}

impl ScrubScene {
    pub fn new(
        trigger: TriggerSpec,
        lag_secs: f64,
        pin: bool,
        timeline: Timeline,
    ) -> ReelResult<Self> {
        trigger.validate()?;
        if timeline.duration() > 1.0 {
            return Err(ReelError::timeline(
                "scrub scene tweens must fit the [0, 1] progress axis",
            ));
        }
        Ok(Self {
            trigger,
            lag_secs,
            pin,
            timeline,
            id: None,
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn id(&self) -> Option<TimelineId> {
        self.id
    }

    pub fn pin_spacer_px(&self, viewport: Viewport) -> f64 {
        if self.pin {
            self.trigger.relative_len(viewport).unwrap_or(0.0)
        } else {
            0.0
        }
    }

    pub fn mount(&mut self, driver: &mut TimelineDriver, rect: Option<ElementRect>) -> ReelResult<()> {
        if self.id.is_some() {
            return Ok(());
        }
        let binding = TimelineBinding::scrub(self.trigger, self.lag_secs, self.pin)?;
        self.id = Some(driver.register_measured(binding, rect));
        Ok(())
    }

    pub fn frame(&self, driver: &TimelineDriver) -> SceneFrame {
        match self.id.and_then(|id| driver.binding(id)) {
            Some(b) if !b.is_detached() && !driver.is_static() => SceneFrame {
                progress: b.progress(),
                targets: self.timeline.sample(b.progress()),
                pin: b.pin(),
            },
            _ => SceneFrame {
                progress: 0.0,
                targets: vec![VisualState::RESTING; self.timeline.targets()],
                pin: PinState::default(),
            },
        }
    }

    pub fn remeasure(&self, driver: &mut TimelineDriver, rect: Option<ElementRect>) {
        if let Some(id) = self.id {
            driver.remeasure(id, rect);
        }
    }

    pub fn unmount(&mut self, driver: &mut TimelineDriver) {
        if let Some(id) = self.id.take() {
            driver.unregister(id);
        }
    }
}

/// Decorative orbs drifting with whole-page scroll progress.
#[derive(Clone, Debug, Default)]
pub struct BackgroundDrift {
    id: Option<TimelineId>,
}

impl BackgroundDrift {
    pub const ORBS: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Orb poses at page progress `p`.
    pub fn orbs(p: f64) -> [VisualState; Self::ORBS] {
        let p = clamp01(p);
        [
            VisualState::RESTING.with_translate(-60.0 * p, -120.0 * p),
            VisualState::RESTING.with_translate(80.0 * p, 60.0 * p),
            VisualState::RESTING.with_opacity(0.04 + (PI * p).sin() * 0.04),
        ]
    }

    pub fn mount(&mut self, driver: &mut TimelineDriver) -> ReelResult<()> {
        if self.id.is_some() {
            return Ok(());
        }
        let binding = TimelineBinding::scrub(TriggerSpec::parse("0", "max")?, 0.0, false)?;
        // Page-wide triggers do not depend on any element.
        self.id = Some(driver.register_measured(binding, Some(ElementRect::new(0.0, 0.0))));
        Ok(())
    }

    pub fn frame(&self, driver: &TimelineDriver) -> [VisualState; Self::ORBS] {
        let p = self
            .id
            .and_then(|id| driver.binding(id))
            .filter(|_| !driver.is_static())
            .map_or(0.0, |b| b.progress());
        Self::orbs(p)
    }

    /// The page limit moves with layout; re-resolve the `max` end.
    pub fn remeasure(&self, driver: &mut TimelineDriver) {
        if let Some(id) = self.id {
            driver.remeasure(id, Some(ElementRect::new(0.0, 0.0)));
        }
    }

    pub fn unmount(&mut self, driver: &mut TimelineDriver) {
        if let Some(id) = self.id.take() {
            driver.unregister(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scrub.rs"]
mod tests;
