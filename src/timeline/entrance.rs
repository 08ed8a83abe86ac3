use crate::{
    animation::ease::Ease,
    animation::tween::{Prop, TargetId, Timeline},
    foundation::core::{ElementRect, Vec2, VisualState},
    foundation::error::ReelResult,
    scroll::driver::{TimelineDriver, TimelineId},
    timeline::binding::TimelineBinding,
    timeline::trigger::TriggerSpec,
};

/// Side an element enters from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Rises into place from below.
    #[default]
    Up,
    Down,
    /// Slides in from the right.
    Left,
    Right,
    None,
}

impl Direction {
    pub const DISTANCE_PX: f64 = 48.0;

    /// Starting offset relative to the resting position.
    pub fn offset(self, distance: f64) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, distance),
            Self::Down => Vec2::new(0.0, -distance),
            Self::Left => Vec2::new(distance, 0.0),
            Self::Right => Vec2::new(-distance, 0.0),
            Self::None => Vec2::ZERO,
        }
    }
}

/// One element of an entrance: where it starts and when it settles.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntranceItem {
    pub from: VisualState,
    pub at_secs: f64,
    pub duration_secs: f64,
}

const PROPS: [Prop; 4] = [Prop::Opacity, Prop::TranslateX, Prop::TranslateY, Prop::Scale];

/// A play-once reveal: elements start hidden and settle at rest after the
/// trigger fires, on the clock rather than the scroll position.
#[derive(Clone, Debug)]
pub struct Entrance {
    trigger: TriggerSpec,
    timeline: Timeline,
    id: Option<TimelineId>,
}

impl Entrance {
    pub const DEFAULT_START: &'static str = "top 88%";
    pub const DEFAULT_DURATION_SECS: f64 = 1.1;

    pub fn new(trigger: TriggerSpec, items: &[EntranceItem], ease: Ease) -> ReelResult<Self> {
        trigger.validate()?;
        let mut timeline = Timeline::new(items.iter().map(|i| i.from).collect());
        for (i, item) in items.iter().enumerate() {
            for prop in PROPS {
                let rest = prop.read(&VisualState::RESTING);
                if prop.read(&item.from) != rest {
                    timeline.to(
                        TargetId(i),
                        prop,
                        rest,
                        item.at_secs,
                        item.duration_secs,
                        ease,
                    )?;
                }
            }
        }
        Ok(Self {
            trigger,
            timeline,
            id: None,
        })
    }

    /// Single element fading in from `direction` once its top passes 88% of the viewport.
    pub fn fade_in(direction: Direction, delay_secs: f64, duration_secs: f64) -> ReelResult<Self> {
        Self::fade_group(&[(direction, delay_secs)], duration_secs)
    }

    /// Fade-ins sharing the default trigger, each with its own direction and delay.
    pub fn fade_group(parts: &[(Direction, f64)], duration_secs: f64) -> ReelResult<Self> {
        let items: Vec<EntranceItem> = parts
            .iter()
            .map(|&(direction, delay_secs)| {
                let off = direction.offset(Direction::DISTANCE_PX);
                EntranceItem {
                    from: VisualState::hidden().with_translate(off.x, off.y),
                    at_secs: delay_secs,
                    duration_secs,
                }
            })
            .collect();
        Self::new(
            TriggerSpec::parse(Self::DEFAULT_START, "bottom top")?,
            &items,
            Ease::OutQuint,
        )
    }

    /// `count` elements sharing one starting pose, each starting `stagger_secs` after the previous.
    pub fn staggered(
        trigger: TriggerSpec,
        count: usize,
        from: VisualState,
        delay_secs: f64,
        duration_secs: f64,
        stagger_secs: f64,
    ) -> ReelResult<Self> {
        let items: Vec<EntranceItem> = (0..count)
            .map(|i| EntranceItem {
                from,
                at_secs: delay_secs + i as f64 * stagger_secs,
                duration_secs,
            })
            .collect();
        Self::new(trigger, &items, Ease::OutQuint)
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn id(&self) -> Option<TimelineId> {
        self.id
    }

    pub fn len(&self) -> usize {
        self.timeline.targets()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.targets() == 0
    }

    pub fn mount(&mut self, driver: &mut TimelineDriver, rect: Option<ElementRect>) -> ReelResult<()> {
        if self.id.is_some() {
            return Ok(());
        }
        let binding = TimelineBinding::once(self.trigger, self.timeline.duration())?;
        self.id = Some(driver.register_measured(binding, rect));
        Ok(())
    }

    /// Current pose of every element. Without a live binding everything is at rest.
    pub fn frame(&self, driver: &TimelineDriver) -> Vec<VisualState> {
        match self.id.and_then(|id| driver.binding(id)) {
            Some(b) if !b.is_detached() && !driver.is_static() => {
                self.timeline.sample(b.progress() * self.timeline.duration())
            }
            _ => vec![VisualState::RESTING; self.len()],
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

#[cfg(test)]
#[path = "../../tests/unit/timeline/entrance.rs"]
mod tests;
