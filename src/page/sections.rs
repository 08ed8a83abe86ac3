use crate::{
    animation::ease::Ease,
    animation::tween::{Prop, TargetId, Timeline},
    config::settings::SiteConfig,
    content::catalog,
    foundation::core::{ElementRect, Viewport, VisualState},
    foundation::error::ReelResult,
    page::layout::{PageLayout, SectionKind},
    page::media::{MediaAutoplay, MediaCommand, PlaybackState, visible_fraction},
    scroll::driver::{TimelineDriver, TimelineId},
    timeline::binding::TimelineBinding,
    timeline::countup::CountUp,
    timeline::entrance::{Direction, Entrance, EntranceItem},
    timeline::pinned::{PinnedSequence, SequenceFrame},
    timeline::scrub::{SceneFrame, ScrubScene},
    timeline::trigger::TriggerSpec,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct VideoFrame {
    pub state: PlaybackState,
    /// Set on the frame where playback should start or stop.
    pub command: Option<MediaCommand>,
}

/// What one section renders this frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SectionFrame {
    Reveal {
        items: Vec<VisualState>,
    },
    Hero {
        entrance: Vec<VisualState>,
        exit: SceneFrame,
        video: VideoFrame,
    },
    Problem {
        entrance: Vec<VisualState>,
        glow: SceneFrame,
    },
    Stats {
        reveal: Vec<VisualState>,
        values: Vec<String>,
    },
    Solution {
        reveal: Vec<VisualState>,
        visual: SceneFrame,
    },
    Sequence(SequenceFrame),
    Static,
}

/// A page section driving its own timelines through the shared driver.
pub trait Section: std::fmt::Debug {
    fn kind(&self) -> SectionKind;

    /// Layout space reserved after the section by its pin.
    fn pin_spacer_px(&self, _viewport: Viewport) -> f64 {
        0.0
    }

    /// React to the driver's viewport before layout is rebuilt.
    /// Returns true when the section changed mode.
    fn sync(&mut self, _driver: &mut TimelineDriver) -> bool {
        false
    }

    fn mount(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) -> ReelResult<()>;

    fn remeasure(&mut self, driver: &mut TimelineDriver, layout: &PageLayout);

    fn frame(&mut self, driver: &TimelineDriver, now_ms: f64) -> SectionFrame;

    fn unmount(&mut self, driver: &mut TimelineDriver);

    /// The host refused to start this section's media.
    fn play_rejected(&mut self) {}
}

/// Every section of the page, in page order.
pub fn build_sections(config: &SiteConfig) -> ReelResult<Vec<Box<dyn Section>>> {
    let mut out: Vec<Box<dyn Section>> = Vec::with_capacity(SectionKind::PAGE_ORDER.len());
    for kind in SectionKind::PAGE_ORDER {
        let section: Box<dyn Section> = match kind {
            SectionKind::Hero => Box::new(Hero::new(config.scrub.hero_secs)?),
            SectionKind::LogoStrip => Box::new(Reveal::logo_strip()?),
            SectionKind::Video => Box::new(Reveal::video()?),
            SectionKind::Problem => Box::new(Problem::new()?),
            SectionKind::Stats => Box::new(Stats::new()?),
            SectionKind::Solution => Box::new(Solution::new()?),
            SectionKind::Testimonials => Box::new(Reveal::testimonials()?),
            SectionKind::Process => Box::new(Sequence::process(config)?),
            SectionKind::Work => Box::new(Sequence::work(config)?),
            SectionKind::CallToAction => Box::new(Reveal::call_to_action()?),
            SectionKind::Footer => Box::new(StaticSection(SectionKind::Footer)),
        };
        out.push(section);
    }
    Ok(out)
}

/// Pinned exit scrub plus a load-time entrance and an autoplaying card video.
#[derive(Debug)]
pub struct Hero {
    entrance: Entrance,
    exit: ScrubScene,
    video: MediaAutoplay,
    rect: Option<ElementRect>,
}

impl Hero {
    /// Eyebrow, headline, subline and call-to-action row.
    pub const TEXT_ITEMS: usize = 4;

    pub fn new(lag_secs: f64) -> ReelResult<Self> {
        let mut items: Vec<EntranceItem> = (0..Self::TEXT_ITEMS)
            .map(|i| EntranceItem {
                from: VisualState::hidden().with_translate(0.0, 40.0),
                at_secs: 0.15 + i as f64 * 0.14,
                duration_secs: 1.15,
            })
            .collect();
        items.push(EntranceItem {
            from: VisualState::hidden()
                .with_translate(0.0, 24.0)
                .with_scale(1.06),
            at_secs: 0.97,
            duration_secs: 1.3,
        });
        let entrance = Entrance::new(TriggerSpec::parse("0", "max")?, &items, Ease::OutQuint)?;

        // Target 0 is the text group, target 1 the card.
        let mut exit = Timeline::new(vec![VisualState::RESTING; 2]);
        exit.to(TargetId(0), Prop::TranslateY, -70.0, 0.0, 1.0, Ease::Linear)?
            .to(TargetId(0), Prop::Opacity, 0.0, 0.0, 1.0, Ease::Linear)?
            .to(TargetId(1), Prop::Scale, 0.92, 0.0, 1.0, Ease::Linear)?
            .to(TargetId(1), Prop::Opacity, 0.0, 0.0, 1.0, Ease::Linear)?;
        let exit = ScrubScene::new(TriggerSpec::parse("top top", "+=80%")?, lag_secs, true, exit)?;

        Ok(Self {
            entrance,
            exit,
            video: MediaAutoplay::default(),
            rect: None,
        })
    }
}

impl Section for Hero {
    fn kind(&self) -> SectionKind {
        SectionKind::Hero
    }

    fn pin_spacer_px(&self, viewport: Viewport) -> f64 {
        self.exit.pin_spacer_px(viewport)
    }

    fn mount(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) -> ReelResult<()> {
        self.rect = layout.rect(SectionKind::Hero);
        self.entrance.mount(driver, self.rect)?;
        self.exit.mount(driver, self.rect)
    }

    fn remeasure(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) {
        self.rect = layout.rect(SectionKind::Hero);
        self.entrance.remeasure(driver, self.rect);
        self.exit.remeasure(driver, self.rect);
    }

    fn frame(&mut self, driver: &TimelineDriver, _now_ms: f64) -> SectionFrame {
        let exit = self.exit.frame(driver);
        // While pinned the section sits `offset_px` lower in the document.
        let command = self.rect.and_then(|rect| {
            let offset = driver.offset() - exit.pin.offset_px;
            self.video
                .observe(visible_fraction(rect, offset, driver.viewport()))
        });
        SectionFrame::Hero {
            entrance: self.entrance.frame(driver),
            exit,
            video: VideoFrame {
                state: self.video.state(),
                command,
            },
        }
    }

    fn unmount(&mut self, driver: &mut TimelineDriver) {
        self.entrance.unmount(driver);
        self.exit.unmount(driver);
    }

    fn play_rejected(&mut self) {
        self.video.play_rejected();
    }
}

/// A section whose only motion is a one-shot entrance.
#[derive(Debug)]
pub struct Reveal {
    kind: SectionKind,
    entrance: Entrance,
}

impl Reveal {
    pub fn new(kind: SectionKind, entrance: Entrance) -> Self {
        Self { kind, entrance }
    }

    pub fn logo_strip() -> ReelResult<Self> {
        Ok(Self::new(
            SectionKind::LogoStrip,
            Entrance::fade_in(Direction::Up, 0.0, Entrance::DEFAULT_DURATION_SECS)?,
        ))
    }

    /// Heading, player and feature cards.
    pub fn video() -> ReelResult<Self> {
        Ok(Self::new(
            SectionKind::Video,
            Entrance::fade_group(
                &[(Direction::Up, 0.0), (Direction::Up, 0.1), (Direction::Up, 0.2)],
                Entrance::DEFAULT_DURATION_SECS,
            )?,
        ))
    }

    /// Heading, then one card per testimonial alternating sides.
    pub fn testimonials() -> ReelResult<Self> {
        let mut parts = vec![(Direction::Up, 0.0)];
        parts.extend((0..catalog::TESTIMONIALS.len()).map(|i| {
            let dir = if i == 0 {
                Direction::Left
            } else {
                Direction::Right
            };
            (dir, i as f64 * 0.15)
        }));
        Ok(Self::new(
            SectionKind::Testimonials,
            Entrance::fade_group(&parts, Entrance::DEFAULT_DURATION_SECS)?,
        ))
    }

    /// Heading, subline and buttons rising in sequence.
    pub fn call_to_action() -> ReelResult<Self> {
        Ok(Self::new(
            SectionKind::CallToAction,
            Entrance::staggered(
                TriggerSpec::parse("top 78%", "bottom top")?,
                3,
                VisualState::hidden().with_translate(0.0, 44.0),
                0.0,
                1.2,
                0.15,
            )?,
        ))
    }
}

impl Section for Reveal {
    fn kind(&self) -> SectionKind {
        self.kind
    }

    fn mount(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) -> ReelResult<()> {
        self.entrance.mount(driver, layout.rect(self.kind))
    }

    fn remeasure(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) {
        self.entrance.remeasure(driver, layout.rect(self.kind));
    }

    fn frame(&mut self, driver: &TimelineDriver, _now_ms: f64) -> SectionFrame {
        SectionFrame::Reveal {
            items: self.entrance.frame(driver),
        }
    }

    fn unmount(&mut self, driver: &mut TimelineDriver) {
        self.entrance.unmount(driver);
    }
}

/// Opposing-side entrance over a parallax background glow.
#[derive(Debug)]
pub struct Problem {
    entrance: Entrance,
    glow: ScrubScene,
}

fn parallax(y: f64) -> ReelResult<ScrubScene> {
    let mut tl = Timeline::new(vec![VisualState::RESTING]);
    tl.to(TargetId(0), Prop::TranslateY, y, 0.0, 1.0, Ease::Linear)?;
    ScrubScene::new(TriggerSpec::parse("top bottom", "bottom top")?, 0.0, false, tl)
}

impl Problem {
    pub fn new() -> ReelResult<Self> {
        let side = |x: f64, at_secs: f64| EntranceItem {
            from: VisualState::hidden().with_translate(x, 0.0),
            at_secs,
            duration_secs: 1.2,
        };
        Ok(Self {
            entrance: Entrance::new(
                TriggerSpec::parse("top 75%", "bottom top")?,
                &[side(-64.0, 0.0), side(64.0, 0.1)],
                Ease::OutQuint,
            )?,
            glow: parallax(-80.0)?,
        })
    }
}

impl Section for Problem {
    fn kind(&self) -> SectionKind {
        SectionKind::Problem
    }

    fn mount(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) -> ReelResult<()> {
        let rect = layout.rect(SectionKind::Problem);
        self.entrance.mount(driver, rect)?;
        self.glow.mount(driver, rect)
    }

    fn remeasure(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) {
        let rect = layout.rect(SectionKind::Problem);
        self.entrance.remeasure(driver, rect);
        self.glow.remeasure(driver, rect);
    }

    fn frame(&mut self, driver: &TimelineDriver, _now_ms: f64) -> SectionFrame {
        SectionFrame::Problem {
            entrance: self.entrance.frame(driver),
            glow: self.glow.frame(driver),
        }
    }

    fn unmount(&mut self, driver: &mut TimelineDriver) {
        self.entrance.unmount(driver);
        self.glow.unmount(driver);
    }
}

/// Headline numbers that count up the first time the section is seen.
#[derive(Debug)]
pub struct Stats {
    reveal: Entrance,
    counters: Vec<CountUp>,
    seen: Option<TimelineId>,
}

impl Stats {
    pub const SEEN_AT: &'static str = "top 90%";

    pub fn new() -> ReelResult<Self> {
        let mut parts = vec![(Direction::Up, 0.0)];
        parts.extend((0..catalog::STATS.len()).map(|i| (Direction::Up, i as f64 * 0.12)));
        let counters = catalog::STATS
            .iter()
            .map(|s| s.count_up())
            .collect::<ReelResult<Vec<_>>>()?;
        Ok(Self {
            reveal: Entrance::fade_group(&parts, Entrance::DEFAULT_DURATION_SECS)?,
            counters,
            seen: None,
        })
    }

    pub fn counters(&self) -> &[CountUp] {
        &self.counters
    }
}

impl Section for Stats {
    fn kind(&self) -> SectionKind {
        SectionKind::Stats
    }

    fn mount(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) -> ReelResult<()> {
        let rect = layout.rect(SectionKind::Stats);
        self.reveal.mount(driver, rect)?;
        if self.seen.is_none() {
            let binding = TimelineBinding::once(TriggerSpec::parse(Self::SEEN_AT, "bottom top")?, 0.0)?;
            self.seen = Some(driver.register_measured(binding, rect));
        }
        Ok(())
    }

    fn remeasure(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) {
        let rect = layout.rect(SectionKind::Stats);
        self.reveal.remeasure(driver, rect);
        if let Some(id) = self.seen {
            driver.remeasure(id, rect);
        }
    }

    fn frame(&mut self, driver: &TimelineDriver, now_ms: f64) -> SectionFrame {
        let binding = self.seen.and_then(|id| driver.binding(id));
        let at_rest = driver.is_static() || binding.is_none_or(|b| b.is_detached());
        let started = binding.and_then(TimelineBinding::triggered_at_ms);
        for c in &mut self.counters {
            if at_rest {
                // Without motion the final figures are shown straight away.
                c.trigger(now_ms - c.duration_ms);
            } else if let Some(t) = started {
                c.trigger(t);
            }
        }
        SectionFrame::Stats {
            reveal: self.reveal.frame(driver),
            values: self.counters.iter().map(|c| c.display(now_ms)).collect(),
        }
    }

    fn unmount(&mut self, driver: &mut TimelineDriver) {
        self.reveal.unmount(driver);
        if let Some(id) = self.seen.take() {
            driver.unregister(id);
        }
    }
}

/// Copy and visual sliding in from both sides, the visual drifting on scroll.
#[derive(Debug)]
pub struct Solution {
    reveal: Entrance,
    visual: ScrubScene,
}

impl Solution {
    pub fn new() -> ReelResult<Self> {
        Ok(Self {
            reveal: Entrance::fade_group(
                &[(Direction::Left, 0.0), (Direction::Right, 0.0)],
                Entrance::DEFAULT_DURATION_SECS,
            )?,
            visual: parallax(40.0)?,
        })
    }
}

impl Section for Solution {
    fn kind(&self) -> SectionKind {
        SectionKind::Solution
    }

    fn mount(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) -> ReelResult<()> {
        let rect = layout.rect(SectionKind::Solution);
        self.reveal.mount(driver, rect)?;
        self.visual.mount(driver, rect)
    }

    fn remeasure(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) {
        let rect = layout.rect(SectionKind::Solution);
        self.reveal.remeasure(driver, rect);
        self.visual.remeasure(driver, rect);
    }

    fn frame(&mut self, driver: &TimelineDriver, _now_ms: f64) -> SectionFrame {
        SectionFrame::Solution {
            reveal: self.reveal.frame(driver),
            visual: self.visual.frame(driver),
        }
    }

    fn unmount(&mut self, driver: &mut TimelineDriver) {
        self.reveal.unmount(driver);
        self.visual.unmount(driver);
    }
}

/// A pinned multi-step section (process steps, project showcase).
#[derive(Debug)]
pub struct Sequence {
    kind: SectionKind,
    inner: PinnedSequence,
}

impl Sequence {
    pub const TRIGGER: (&'static str, &'static str) = ("top top", "+=200%");

    pub fn process(config: &SiteConfig) -> ReelResult<Self> {
        Self::new(
            SectionKind::Process,
            catalog::PROCESS_STEPS.len(),
            config,
        )
    }

    pub fn work(config: &SiteConfig) -> ReelResult<Self> {
        Self::new(SectionKind::Work, catalog::PROJECTS.len(), config)
    }

    fn new(kind: SectionKind, steps: usize, config: &SiteConfig) -> ReelResult<Self> {
        let (segments, lag_secs) = match kind {
            SectionKind::Work => (config.work, config.scrub.work_secs),
            _ => (config.process, config.scrub.process_secs),
        };
        let (start, end) = Self::TRIGGER;
        Ok(Self {
            kind,
            inner: PinnedSequence::new(
                steps,
                segments,
                TriggerSpec::parse(start, end)?,
                lag_secs,
                config.breakpoint,
            )?,
        })
    }

    pub fn pinned(&self) -> &PinnedSequence {
        &self.inner
    }
}

impl Section for Sequence {
    fn kind(&self) -> SectionKind {
        self.kind
    }

    fn pin_spacer_px(&self, viewport: Viewport) -> f64 {
        self.inner.pin_spacer_px(viewport)
    }

    fn sync(&mut self, driver: &mut TimelineDriver) -> bool {
        self.inner.sync(driver)
    }

    fn mount(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) -> ReelResult<()> {
        self.inner.mount(driver, layout.rect(self.kind))
    }

    fn remeasure(&mut self, driver: &mut TimelineDriver, layout: &PageLayout) {
        self.inner.remeasure(driver, layout.rect(self.kind));
    }

    fn frame(&mut self, driver: &TimelineDriver, _now_ms: f64) -> SectionFrame {
        SectionFrame::Sequence(self.inner.frame(driver))
    }

    fn unmount(&mut self, driver: &mut TimelineDriver) {
        self.inner.unmount(driver);
    }
}

/// A section with no scroll-linked motion.
#[derive(Debug)]
pub struct StaticSection(pub SectionKind);

impl Section for StaticSection {
    fn kind(&self) -> SectionKind {
        self.0
    }

    fn mount(&mut self, _driver: &mut TimelineDriver, _layout: &PageLayout) -> ReelResult<()> {
        Ok(())
    }

    fn remeasure(&mut self, _driver: &mut TimelineDriver, _layout: &PageLayout) {}

    fn frame(&mut self, _driver: &TimelineDriver, _now_ms: f64) -> SectionFrame {
        SectionFrame::Static
    }

    fn unmount(&mut self, _driver: &mut TimelineDriver) {}
}

#[cfg(test)]
#[path = "../../tests/unit/page/sections.rs"]
mod tests;
