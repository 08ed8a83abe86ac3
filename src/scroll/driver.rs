use std::collections::BTreeMap;

use crate::{
    foundation::core::{ElementRect, Viewport},
    scroll::normalizer::{InputEvent, ScrollNormalizer},
    timeline::binding::{BindingSnapshot, FrameCtx, TimelineBinding},
};

/// Handle to a binding registered with a [`TimelineDriver`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimelineId(pub u64);

/// How the host delivers frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DriverMode {
    Animated,
    /// No frame callbacks (e.g. non-visual rendering); everything renders at rest.
    Static,
}

/// Per-binding result of one tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TimelineFrame {
    pub id: TimelineId,
    #[serde(flatten)]
    pub snapshot: BindingSnapshot,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct DriverFrame {
    /// Scroll offset every timeline observed this frame.
    pub offset: f64,
    pub timelines: Vec<TimelineFrame>,
}

/// The shared frame clock: advances the scroll normalizer, then every
/// registered binding, from one offset read per frame.
#[derive(Debug)]
pub struct TimelineDriver {
    mode: DriverMode,
    normalizer: ScrollNormalizer,
    viewport: Viewport,
    bindings: BTreeMap<TimelineId, TimelineBinding>,
    next_id: u64,
    last_now_ms: Option<f64>,
}

impl TimelineDriver {
    pub fn new(normalizer: ScrollNormalizer, viewport: Viewport) -> Self {
        Self::with_mode(normalizer, viewport, DriverMode::Animated)
    }

    pub fn headless(normalizer: ScrollNormalizer, viewport: Viewport) -> Self {
        tracing::warn!("no frame callbacks available; animations render at rest");
        Self::with_mode(normalizer, viewport, DriverMode::Static)
    }

    fn with_mode(normalizer: ScrollNormalizer, viewport: Viewport, mode: DriverMode) -> Self {
        Self {
            mode,
            normalizer,
            viewport,
            bindings: BTreeMap::new(),
            next_id: 0,
            last_now_ms: None,
        }
    }

    pub fn mode(&self) -> DriverMode {
        self.mode
    }

    pub fn is_static(&self) -> bool {
        self.mode == DriverMode::Static
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn normalizer(&self) -> &ScrollNormalizer {
        &self.normalizer
    }

    pub fn offset(&self) -> f64 {
        self.normalizer.current_offset()
    }

    /// Document scroll limit, or the viewport height when unknown.
    pub fn limit(&self) -> f64 {
        let l = self.normalizer.limit();
        if l.is_finite() { l } else { self.viewport.height }
    }

    pub fn handle(&mut self, event: InputEvent) {
        if let InputEvent::Resize { viewport, .. } = event {
            self.viewport = viewport;
        }
        self.normalizer.handle(event);
    }

    /// Forward a layout change to the normalizer.
    pub fn relayout(&mut self, viewport: Viewport, content_height: f64) {
        self.handle(InputEvent::Resize {
            viewport,
            content_height,
        });
    }

    pub fn register(&mut self, binding: TimelineBinding) -> TimelineId {
        let id = TimelineId(self.next_id);
        self.next_id += 1;
        self.bindings.insert(id, binding);
        tracing::debug!(id = id.0, total = self.bindings.len(), "timeline registered");
        id
    }

    /// Register and measure in one step.
    pub fn register_measured(
        &mut self,
        mut binding: TimelineBinding,
        rect: Option<ElementRect>,
    ) -> TimelineId {
        binding.measure(rect, self.viewport, self.limit());
        self.register(binding)
    }

    /// Dispose and remove a binding. Unknown or already removed ids yield `None`.
    pub fn unregister(&mut self, id: TimelineId) -> Option<TimelineBinding> {
        let mut binding = self.bindings.remove(&id)?;
        binding.dispose();
        tracing::debug!(id = id.0, total = self.bindings.len(), "timeline unregistered");
        Some(binding)
    }

    pub fn is_registered(&self, id: TimelineId) -> bool {
        self.bindings.contains_key(&id)
    }

    pub fn binding(&self, id: TimelineId) -> Option<&TimelineBinding> {
        self.bindings.get(&id)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Re-measure one binding after a layout change.
    pub fn remeasure(&mut self, id: TimelineId, rect: Option<ElementRect>) {
        let (viewport, limit) = (self.viewport, self.limit());
        if let Some(b) = self.bindings.get_mut(&id) {
            b.measure(rect, viewport, limit);
        }
    }

    /// Advance one display frame.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, now_ms: f64) -> DriverFrame {
        let dt_secs = match self.last_now_ms {
            Some(prev) => ((now_ms - prev) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_now_ms = Some(now_ms);

        if self.bindings.is_empty() || self.is_static() {
            return DriverFrame {
                offset: self.offset(),
                timelines: Vec::new(),
            };
        }

        self.normalizer.raf(now_ms);
        let ctx = FrameCtx {
            offset: self.normalizer.current_offset(),
            viewport: self.viewport,
            dt_secs,
            now_ms,
        };

        let mut timelines = Vec::with_capacity(self.bindings.len());
        for (&id, binding) in &mut self.bindings {
            binding.update(&ctx);
            timelines.push(TimelineFrame {
                id,
                snapshot: binding.snapshot(),
            });
        }

        DriverFrame {
            offset: ctx.offset,
            timelines,
        }
    }

    /// Tear down every registration.
    pub fn shutdown(&mut self) -> usize {
        let ids: Vec<TimelineId> = self.bindings.keys().copied().collect();
        let n = ids.len();
        for id in ids {
            self.unregister(id);
        }
        n
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/driver.rs"]
mod tests;
