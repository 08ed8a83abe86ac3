use crate::{
    foundation::core::{ElementRect, Viewport},
    foundation::error::{ReelError, ReelResult},
    scroll::driver::{TimelineDriver, TimelineId},
    timeline::binding::{PinState, TimelineBinding},
    timeline::segment::{
        IndicatorState, SegmentConfig, SegmentTable, StepVisualState, compute_visual_state,
    },
    timeline::trigger::TriggerSpec,
};

/// Viewport width at or below which pinned sequences fall back to static content.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Breakpoint {
    pub max_width_px: f64,
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self { max_width_px: 767.0 }
    }
}

impl Breakpoint {
    pub fn is_compact(&self, width: f64) -> bool {
        width <= self.max_width_px
    }

    pub fn validate(&self) -> ReelResult<()> {
        if !(self.max_width_px.is_finite() && self.max_width_px >= 0.0) {
            return Err(ReelError::validation(
                "breakpoint max_width_px must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Rendered state of a pinned multi-step section.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SequenceFrame {
    pub progress: f64,
    pub steps: Vec<StepVisualState>,
    pub indicator: IndicatorState,
    pub section_opacity: f64,
    pub pin: PinState,
    pub downgraded: bool,
}

/// A pinned section whose steps are choreographed by a [`SegmentTable`].
#[derive(Clone, Debug)]
pub struct PinnedSequence {
    table: SegmentTable,
    trigger: TriggerSpec,
    lag_secs: f64,
    breakpoint: Breakpoint,
    timeline: Option<TimelineId>,
    downgraded: bool,
}

impl PinnedSequence {
    pub fn new(
        steps: usize,
        config: SegmentConfig,
        trigger: TriggerSpec,
        lag_secs: f64,
        breakpoint: Breakpoint,
    ) -> ReelResult<Self> {
        trigger.validate()?;
        breakpoint.validate()?;
        Ok(Self {
            table: SegmentTable::partition(steps, config)?,
            trigger,
            lag_secs,
            breakpoint,
            timeline: None,
            downgraded: false,
        })
    }

    pub fn table(&self) -> &SegmentTable {
        &self.table
    }

    pub fn timeline(&self) -> Option<TimelineId> {
        self.timeline
    }

    pub fn is_downgraded(&self) -> bool {
        self.downgraded
    }

    /// Layout space the pin reserves after the section.
    pub fn pin_spacer_px(&self, viewport: Viewport) -> f64 {
        if self.downgraded {
            0.0
        } else {
            self.trigger.relative_len(viewport).unwrap_or(0.0)
        }
    }

    /// Register the pinned scrub binding, unless the viewport is already compact.
    pub fn mount(
        &mut self,
        driver: &mut TimelineDriver,
        rect: Option<ElementRect>,
    ) -> ReelResult<()> {
        if self.timeline.is_some() || self.downgraded {
            return Ok(());
        }
        if self.breakpoint.is_compact(driver.viewport().width) {
            self.downgraded = true;
            tracing::debug!("compact viewport at mount; sequence renders statically");
            return Ok(());
        }
        let binding = TimelineBinding::scrub(self.trigger, self.lag_secs, true)?;
        self.timeline = Some(driver.register_measured(binding, rect));
        Ok(())
    }

    /// Check the current viewport; crossing into compact kills the pin for good.
    pub fn sync(&mut self, driver: &mut TimelineDriver) -> bool {
        if self.downgraded || !self.breakpoint.is_compact(driver.viewport().width) {
            return false;
        }
        self.downgraded = true;
        if let Some(id) = self.timeline.take() {
            driver.unregister(id);
        }
        tracing::info!(
            width = driver.viewport().width,
            "compact viewport; pinned sequence downgraded"
        );
        true
    }

    pub fn frame(&self, driver: &TimelineDriver) -> SequenceFrame {
        let binding = self.timeline.and_then(|id| driver.binding(id));
        match binding {
            Some(b) if !b.is_detached() && !driver.is_static() => {
                let p = b.progress();
                SequenceFrame {
                    progress: p,
                    steps: compute_visual_state(p, &self.table),
                    indicator: self.table.indicator(p),
                    section_opacity: self.table.section_opacity(p),
                    pin: b.pin(),
                    downgraded: false,
                }
            }
            _ => self.resting_frame(),
        }
    }

    fn resting_frame(&self) -> SequenceFrame {
        SequenceFrame {
            progress: 0.0,
            steps: self.table.resting_states(),
            indicator: self.table.indicator(0.0),
            section_opacity: 1.0,
            pin: PinState::default(),
            downgraded: self.downgraded,
        }
    }

    pub fn remeasure(&self, driver: &mut TimelineDriver, rect: Option<ElementRect>) {
        if let Some(id) = self.timeline {
            driver.remeasure(id, rect);
        }
    }

    /// Idempotent.
    pub fn unmount(&mut self, driver: &mut TimelineDriver) {
        if let Some(id) = self.timeline.take() {
            driver.unregister(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/pinned.rs"]
mod tests;
