use crate::{
    animation::ease::Ease,
    foundation::core::Viewport,
    foundation::error::{ReelError, ReelResult},
    foundation::math::clamp01,
};

/// Smooth-scroll tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Time for one retarget to settle.
    pub duration_secs: f64,
    pub easing: Ease,
    /// When false, wheel input jumps straight to the target.
    pub smooth_wheel: bool,
    pub wheel_multiplier: f64,
    pub touch_multiplier: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            duration_secs: 1.25,
            easing: Ease::ScrollExpo,
            smooth_wheel: true,
            wheel_multiplier: 0.9,
            touch_multiplier: 1.5,
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.duration_secs.is_finite() && self.duration_secs >= 0.0) {
            return Err(ReelError::validation(
                "scroll.duration_secs must be finite and >= 0",
            ));
        }
        for (name, v) in [
            ("scroll.wheel_multiplier", self.wheel_multiplier),
            ("scroll.touch_multiplier", self.touch_multiplier),
        ] {
            if !v.is_finite() {
                return Err(ReelError::validation(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

/// Size of the scrollable document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollMetrics {
    pub viewport: Viewport,
    pub content_height: f64,
}

impl ScrollMetrics {
    /// Largest reachable offset.
    pub fn limit(&self) -> f64 {
        let l = self.content_height - self.viewport.height;
        if l.is_finite() { l.max(0.0) } else { 0.0 }
    }
}

/// Raw host input consumed by the normalizer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Wheel { delta_y: f64 },
    Touch { delta_y: f64 },
    /// Offset reported by the host's own scroll position.
    Native { offset: f64 },
    Resize { viewport: Viewport, content_height: f64 },
    Visibility { hidden: bool },
    ScrollTo { offset: f64, immediate: bool },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollState {
    pub virtual_offset: f64,
    pub target_offset: f64,
    /// Offset delta of the last frame.
    pub velocity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScrollMode {
    Smooth,
    /// No scroll container was found; follows host scroll without smoothing.
    Native,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug)]
struct Retarget {
    from: f64,
    to: f64,
    elapsed_secs: f64,
    duration_secs: f64,
    easing: Ease,
}

impl Retarget {
    fn advance(&mut self, dt_secs: f64) -> (f64, bool) {
        self.elapsed_secs += dt_secs;
        let linear = if self.duration_secs > 0.0 {
            clamp01(self.elapsed_secs / self.duration_secs)
        } else {
            1.0
        };
        if linear >= 1.0 {
            return (self.to, true);
        }
        let eased = self.easing.apply(linear);
        (self.from + (self.to - self.from) * eased, false)
    }
}

type FrameCallback = Box<dyn FnMut(f64)>;

/// Turns discrete wheel/touch deltas into an eased virtual scroll offset.
pub struct ScrollNormalizer {
    config: NormalizerConfig,
    mode: ScrollMode,
    metrics: Option<ScrollMetrics>,
    state: ScrollState,
    retarget: Option<Retarget>,
    hidden: bool,
    last_time_ms: Option<f64>,
    pending_notify: bool,
    native_writes: u64,
    subscribers: Vec<(SubscriptionId, FrameCallback)>,
    next_subscription: u64,
}

impl std::fmt::Debug for ScrollNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollNormalizer")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("hidden", &self.hidden)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl ScrollNormalizer {
    /// `metrics` is `None` when the host has no scrollable container; the
    /// normalizer then runs in [`ScrollMode::Native`].
    pub fn new(config: NormalizerConfig, metrics: Option<ScrollMetrics>) -> ReelResult<Self> {
        config.validate()?;
        let mode = match metrics {
            Some(_) => ScrollMode::Smooth,
            None => {
                tracing::warn!("no scroll container; falling back to native scrolling");
                ScrollMode::Native
            }
        };
        Ok(Self {
            config,
            mode,
            metrics,
            state: ScrollState::default(),
            retarget: None,
            hidden: false,
            last_time_ms: None,
            pending_notify: false,
            native_writes: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn current_offset(&self) -> f64 {
        self.state.virtual_offset
    }

    pub fn metrics(&self) -> Option<ScrollMetrics> {
        self.metrics
    }

    pub fn limit(&self) -> f64 {
        self.metrics.map(|m| m.limit()).unwrap_or(f64::INFINITY)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_animating(&self) -> bool {
        self.retarget.is_some()
    }

    /// How many times the smoothed offset was written back to the host.
    pub fn native_writes(&self) -> u64 {
        self.native_writes
    }

    /// Subscribe to the smoothed offset; fires once per frame that moved it.
    pub fn on_frame(&mut self, callback: impl FnMut(f64) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false when `id` was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        before != self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Wheel { delta_y } => {
                if self.mode == ScrollMode::Native || !delta_y.is_finite() {
                    return;
                }
                let target = self.state.target_offset + delta_y * self.config.wheel_multiplier;
                self.scroll_to(target, !self.config.smooth_wheel);
            }
            InputEvent::Touch { delta_y } => {
                if self.mode == ScrollMode::Native || !delta_y.is_finite() {
                    return;
                }
                let target = self.state.target_offset + delta_y * self.config.touch_multiplier;
                self.scroll_to(target, false);
            }
            InputEvent::Native { offset } => {
                if !offset.is_finite() {
                    return;
                }
                // While smoothing, native scroll events echo our own writes.
                if self.retarget.is_some() {
                    return;
                }
                let offset = self.clamp_offset(offset);
                self.state.velocity = offset - self.state.virtual_offset;
                self.state.virtual_offset = offset;
                self.state.target_offset = offset;
                self.pending_notify = true;
            }
            InputEvent::Resize {
                viewport,
                content_height,
            } => self.resize(viewport, content_height),
            InputEvent::Visibility { hidden } => {
                if self.hidden != hidden {
                    tracing::debug!(hidden, "document visibility changed");
                }
                self.hidden = hidden;
                // Re-base the clock so the hidden interval does not count.
                self.last_time_ms = None;
            }
            InputEvent::ScrollTo { offset, immediate } => {
                if offset.is_finite() {
                    self.scroll_to(offset, immediate);
                }
            }
        }
    }

    fn resize(&mut self, viewport: Viewport, content_height: f64) {
        let metrics = ScrollMetrics {
            viewport,
            content_height: if content_height.is_finite() {
                content_height.max(0.0)
            } else {
                0.0
            },
        };
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            limit = metrics.limit(),
            "scroll metrics updated"
        );
        self.metrics = Some(metrics);
        let limit = metrics.limit();
        if self.state.virtual_offset > limit || self.state.target_offset > limit {
            self.state.virtual_offset = self.state.virtual_offset.min(limit);
            self.state.target_offset = self.state.target_offset.min(limit);
            if let Some(r) = &mut self.retarget {
                r.from = r.from.min(limit);
                r.to = r.to.min(limit);
            }
            self.pending_notify = true;
        }
    }

    fn scroll_to(&mut self, offset: f64, immediate: bool) {
        let target = self.clamp_offset(offset);
        self.state.target_offset = target;
        if immediate || self.mode == ScrollMode::Native {
            self.retarget = None;
            self.state.velocity = target - self.state.virtual_offset;
            self.state.virtual_offset = target;
            self.pending_notify = true;
            return;
        }
        self.retarget = Some(Retarget {
            from: self.state.virtual_offset,
            to: target,
            elapsed_secs: 0.0,
            duration_secs: self.config.duration_secs,
            easing: self.config.easing,
        });
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.limit())
    }

    /// Advance one display frame. Returns true when the offset changed.
    pub fn raf(&mut self, now_ms: f64) -> bool {
        let dt_secs = match self.last_time_ms {
            Some(prev) if now_ms.is_finite() => ((now_ms - prev) / 1000.0).max(0.0),
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_time_ms = Some(now_ms);
        }
        if self.hidden {
            return false;
        }

        let prev = self.state.virtual_offset;
        if let Some(r) = &mut self.retarget {
            let (value, done) = r.advance(dt_secs);
            self.state.virtual_offset = value;
            if done {
                self.retarget = None;
            }
            self.state.velocity = value - prev;
        } else if !self.pending_notify {
            self.state.velocity = 0.0;
        }

        let changed = self.state.virtual_offset != prev || self.pending_notify;
        self.pending_notify = false;
        if !changed {
            return false;
        }
        if self.mode == ScrollMode::Smooth {
            self.native_writes += 1;
        }
        let offset = self.state.virtual_offset;
        for (_, cb) in &mut self.subscribers {
            cb(offset);
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/normalizer.rs"]
mod tests;
