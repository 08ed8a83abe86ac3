//! Headless scroll choreography for a long-form marketing page.
//!
//! Hosts feed input events (wheel, touch, native scroll, resize, visibility)
//! and a frame clock into a [`Site`]; every frame comes back as plain data
//! (opacity, translation, scale, pin offsets, counter text) for each section.
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod config;
pub mod content;
pub mod foundation;
pub mod page;
pub mod scroll;
pub mod timeline;

pub use animation::ease::Ease;
pub use animation::tween::{Prop, TargetId, Timeline, Tween};
pub use assets::path::AssetPaths;
pub use config::settings::{ScrubLag, SiteConfig};
pub use content::catalog::CatalogSnapshot;
pub use foundation::core::{Affine, ElementRect, Vec2, Viewport, VisualState};
pub use foundation::error::{ReelError, ReelResult};
pub use page::layout::{PageLayout, SectionKind};
pub use page::media::{MediaAutoplay, MediaCommand, PlaybackState};
pub use page::sections::{Section, SectionFrame};
pub use page::script::{ScriptStep, SimulationScript};
pub use page::site::{HostCapabilities, PageFrame, SectionOutput, Site};
pub use scroll::driver::{DriverFrame, DriverMode, TimelineDriver, TimelineId};
pub use scroll::normalizer::{
    InputEvent, NormalizerConfig, ScrollMetrics, ScrollMode, ScrollNormalizer, ScrollState,
};
pub use timeline::binding::{BindingMode, PinState, TimelineBinding, TimelineState};
pub use timeline::countup::CountUp;
pub use timeline::entrance::{Direction, Entrance};
pub use timeline::pinned::{Breakpoint, PinnedSequence, SequenceFrame};
pub use timeline::scrub::{BackgroundDrift, SceneFrame, ScrubScene};
pub use timeline::segment::{
    IndicatorState, IndicatorStyle, Segment, SegmentConfig, SegmentTable, StepVisualState,
    compute_visual_state,
};
pub use timeline::trigger::{TriggerRange, TriggerSpec};
