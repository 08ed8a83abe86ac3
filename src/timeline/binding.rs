use crate::{
    foundation::core::{ElementRect, Viewport},
    foundation::error::{ReelError, ReelResult},
    foundation::math::{clamp01, inverse_lerp},
    timeline::trigger::{TriggerRange, TriggerSpec},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TimelineState {
    /// Trigger range not measured yet.
    Unarmed,
    /// Progress parked at 0 or 1.
    Idle,
    /// Progress strictly inside (0, 1), or a play-once tween running.
    Active,
    /// Terminal state of play-once bindings.
    Complete,
    Disposed,
}

/// How progress follows the scroll position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BindingMode {
    /// Progress tracks scroll position, optionally lagging behind it.
    Scrub { lag_secs: f64 },
    /// Fires once when the start position is reached, then plays for a
    /// fixed time regardless of scrolling.
    Once { play_secs: f64 },
}

impl BindingMode {
    pub fn scrub() -> Self {
        Self::Scrub { lag_secs: 0.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BindingOptions {
    pub mode: BindingMode,
    pub pin: bool,
}

/// Layout effect of a pinned section.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinState {
    pub pinned: bool,
    /// Extra layout space reserved after the section while the pin exists.
    pub spacer_px: f64,
    /// Translation that holds the section still while pinned.
    pub offset_px: f64,
}

/// Inputs shared by every timeline within one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameCtx {
    pub offset: f64,
    pub viewport: Viewport,
    pub dt_secs: f64,
    pub now_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BindingSnapshot {
    pub state: TimelineState,
    pub progress: f64,
    pub pin: PinState,
    /// No layout target was found; the section renders at rest.
    pub detached: bool,
}

/// One scroll-linked timeline: maps a scroll interval to progress in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineBinding {
    trigger: TriggerSpec,
    options: BindingOptions,
    state: TimelineState,
    range: Option<TriggerRange>,
    detached: bool,
    raw_progress: f64,
    progress: f64,
    pin: PinState,
    pin_released: bool,
    triggered_at_ms: Option<f64>,
}

impl TimelineBinding {
    pub fn new(trigger: TriggerSpec, options: BindingOptions) -> ReelResult<Self> {
        trigger.validate()?;
        let secs = match options.mode {
            BindingMode::Scrub { lag_secs } => lag_secs,
            BindingMode::Once { play_secs } => play_secs,
        };
        if !(secs.is_finite() && secs >= 0.0) {
            return Err(ReelError::timeline(
                "binding lag/play time must be finite and >= 0",
            ));
        }
        if options.pin && matches!(options.mode, BindingMode::Once { .. }) {
            return Err(ReelError::timeline("play-once bindings cannot pin"));
        }
        Ok(Self {
            trigger,
            options,
            state: TimelineState::Unarmed,
            range: None,
            detached: false,
            raw_progress: 0.0,
            progress: 0.0,
            pin: PinState::default(),
            pin_released: false,
            triggered_at_ms: None,
        })
    }

    pub fn scrub(trigger: TriggerSpec, lag_secs: f64, pin: bool) -> ReelResult<Self> {
        Self::new(
            trigger,
            BindingOptions {
                mode: BindingMode::Scrub { lag_secs },
                pin,
            },
        )
    }

    pub fn once(trigger: TriggerSpec, play_secs: f64) -> ReelResult<Self> {
        Self::new(
            trigger,
            BindingOptions {
                mode: BindingMode::Once { play_secs },
                pin: false,
            },
        )
    }

    pub fn trigger(&self) -> &TriggerSpec {
        &self.trigger
    }

    pub fn options(&self) -> &BindingOptions {
        &self.options
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn range(&self) -> Option<TriggerRange> {
        self.range
    }

    /// Displayed progress (after scrub lag).
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress straight from the scroll offset; monotonic in the offset.
    pub fn raw_progress(&self) -> f64 {
        self.raw_progress
    }

    pub fn pin(&self) -> PinState {
        self.pin
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn is_disposed(&self) -> bool {
        self.state == TimelineState::Disposed
    }

    pub fn snapshot(&self) -> BindingSnapshot {
        BindingSnapshot {
            state: self.state,
            progress: self.progress,
            pin: self.pin,
            detached: self.detached,
        }
    }

    /// Resolve the trigger against layout. `None` means the trigger element
    /// could not be measured; the binding then stays idle at rest for good.
    pub fn measure(&mut self, rect: Option<ElementRect>, viewport: Viewport, limit: f64) {
        if self.is_disposed() {
            return;
        }
        let Some(rect) = rect else {
            if !self.detached {
                tracing::warn!(trigger = ?self.trigger, "trigger element missing; rendering at rest");
            }
            self.detached = true;
            self.range = None;
            self.pin = PinState::default();
            if self.state == TimelineState::Unarmed {
                self.state = TimelineState::Idle;
            }
            return;
        };

        let range = self.trigger.resolve(rect, viewport, limit);
        self.range = Some(range);
        self.detached = false;
        if self.options.pin && !self.pin_released {
            self.pin.spacer_px = range.len();
        }
        if self.state == TimelineState::Unarmed {
            tracing::debug!(start = range.start_px, end = range.end_px, "timeline armed");
            self.state = TimelineState::Idle;
        }
    }

    /// Recompute progress for this frame. Returns the new state when it changed.
    pub fn update(&mut self, ctx: &FrameCtx) -> Option<TimelineState> {
        if self.detached {
            return None;
        }
        let range = match self.state {
            TimelineState::Unarmed | TimelineState::Complete | TimelineState::Disposed => {
                return None;
            }
            TimelineState::Idle | TimelineState::Active => self.range?,
        };
        let before = self.state;

        match self.options.mode {
            BindingMode::Scrub { lag_secs } => self.update_scrub(range, ctx, lag_secs),
            BindingMode::Once { play_secs } => self.update_once(range, ctx, play_secs),
        }

        if self.options.pin && !self.pin_released {
            self.pin = PinState {
                pinned: self.state == TimelineState::Active && range.contains(ctx.offset),
                spacer_px: range.len(),
                offset_px: (ctx.offset - range.start_px).clamp(0.0, range.len().max(0.0)),
            };
        }

        if self.state != before {
            tracing::debug!(from = ?before, to = ?self.state, progress = self.progress, "timeline state");
            Some(self.state)
        } else {
            None
        }
    }

    fn update_scrub(&mut self, range: TriggerRange, ctx: &FrameCtx, lag_secs: f64) {
        let raw = inverse_lerp(range.start_px, range.end_px, ctx.offset);
        self.raw_progress = raw;

        if !range.contains(ctx.offset) {
            // Leaving the range snaps to the nearest boundary, however far we jumped.
            self.progress = raw;
            self.state = TimelineState::Idle;
            return;
        }

        self.state = TimelineState::Active;
        if lag_secs <= 0.0 {
            self.progress = raw;
        } else {
            let k = 1.0 - (-ctx.dt_secs.max(0.0) / lag_secs).exp();
            self.progress = clamp01(self.progress + (raw - self.progress) * k);
        }
    }

    fn update_once(&mut self, range: TriggerRange, ctx: &FrameCtx, play_secs: f64) {
        let started = match self.triggered_at_ms {
            Some(t) => t,
            None => {
                if ctx.offset < range.start_px {
                    return;
                }
                self.triggered_at_ms = Some(ctx.now_ms);
                self.state = TimelineState::Active;
                ctx.now_ms
            }
        };
        let elapsed = ((ctx.now_ms - started) / 1000.0).max(0.0);
        self.progress = if play_secs > 0.0 {
            clamp01(elapsed / play_secs)
        } else {
            1.0
        };
        self.raw_progress = self.progress;
        if self.progress >= 1.0 {
            self.state = TimelineState::Complete;
        }
    }

    /// When a play-once binding fired, if it has.
    pub fn triggered_at_ms(&self) -> Option<f64> {
        self.triggered_at_ms
    }

    /// Drop the pin and its spacer; later frames never pin again.
    pub fn release_pin(&mut self) -> bool {
        let held = self.options.pin && !self.pin_released;
        self.pin_released = true;
        self.pin = PinState::default();
        held
    }

    /// Detach from scrolling for good. Returns false when already disposed.
    pub fn dispose(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.release_pin();
        self.state = TimelineState::Disposed;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/binding.rs"]
mod tests;
