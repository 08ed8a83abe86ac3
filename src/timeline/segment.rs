use crate::{
    foundation::core::VisualState,
    foundation::error::{ReelError, ReelResult},
    foundation::math::{clamp01, inverse_lerp, lerp},
};

/// Unit of [`StepMotion`] vertical offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslateUnit {
    Px,
    /// Percent of the step element's own height.
    Percent,
}

/// What a step looks like while waiting to enter and after leaving.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepMotion {
    pub unit: TranslateUnit,
    pub enter_y: f64,
    pub exit_y: f64,
    pub exit_scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStyle {
    /// Numbered markers that dim/brighten with their step, plus a fill bar.
    Numbered,
    /// Dots keyed to the nearest step.
    Dots,
}

/// Choreography of a multi-step pinned section.
///
/// Window fields are fractions of one segment's width.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentConfig {
    /// Trailing share of progress kept for the section exit fade.
    pub trailing_reserve: f64,
    pub outgoing_len: f64,
    pub incoming_start: f64,
    pub incoming_len: f64,
    /// Length of the incoming marker's brighten window, from `incoming_start`.
    #[serde(default = "SegmentConfig::default_mark_len")]
    pub mark_len: f64,
    pub motion: StepMotion,
    pub indicator: IndicatorStyle,
}

impl SegmentConfig {
    /// Process timeline: 15% exit reserve, quick fade out, delayed fade in.
    pub fn process() -> Self {
        Self {
            trailing_reserve: 0.15,
            outgoing_len: 0.30,
            incoming_start: 0.35,
            incoming_len: 0.35,
            mark_len: 0.30,
            motion: StepMotion {
                unit: TranslateUnit::Px,
                enter_y: 36.0,
                exit_y: -36.0,
                exit_scale: 1.0,
            },
            indicator: IndicatorStyle::Numbered,
        }
    }

    /// Work slides: scenes shrink away while the next one slides up.
    pub fn work() -> Self {
        Self {
            trailing_reserve: 0.0,
            outgoing_len: 0.50,
            incoming_start: 0.15,
            incoming_len: 0.50,
            mark_len: Self::default_mark_len(),
            motion: StepMotion {
                unit: TranslateUnit::Percent,
                enter_y: 8.0,
                exit_y: 0.0,
                exit_scale: 0.93,
            },
            indicator: IndicatorStyle::Dots,
        }
    }

    fn default_mark_len() -> f64 {
        0.30
    }

    pub fn validate(&self) -> ReelResult<()> {
        let fields = [
            ("trailing_reserve", self.trailing_reserve),
            ("outgoing_len", self.outgoing_len),
            ("incoming_start", self.incoming_start),
            ("incoming_len", self.incoming_len),
            ("mark_len", self.mark_len),
            ("motion.enter_y", self.motion.enter_y),
            ("motion.exit_y", self.motion.exit_y),
            ("motion.exit_scale", self.motion.exit_scale),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(ReelError::validation(format!("segment {name} must be finite")));
            }
        }
        if !(0.0..1.0).contains(&self.trailing_reserve) {
            return Err(ReelError::validation(
                "segment trailing_reserve must be in [0, 1)",
            ));
        }
        if !(0.0..=1.0).contains(&self.outgoing_len) {
            return Err(ReelError::validation(
                "segment outgoing_len must be in [0, 1]",
            ));
        }
        if self.incoming_start < 0.0
            || self.incoming_len < 0.0
            || self.incoming_start + self.incoming_len > 1.0
        {
            return Err(ReelError::validation(
                "segment incoming window must fit inside the segment",
            ));
        }
        if self.mark_len < 0.0 || self.incoming_start + self.mark_len > 1.0 {
            return Err(ReelError::validation(
                "segment mark window must fit inside the segment",
            ));
        }
        Ok(())
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self::process()
    }
}

/// Transition between step `index` and step `index + 1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    pub index: usize,
    pub range_start: f64,
    pub range_end: f64,
}

impl Segment {
    pub fn width(&self) -> f64 {
        self.range_end - self.range_start
    }

    /// Progress window in which the outgoing step fades out.
    pub fn outgoing_window(&self, cfg: &SegmentConfig) -> (f64, f64) {
        let w = self.width();
        (self.range_start, self.range_start + cfg.outgoing_len * w)
    }

    /// Progress window in which the incoming step fades in.
    pub fn incoming_window(&self, cfg: &SegmentConfig) -> (f64, f64) {
        let w = self.width();
        let a = self.range_start + cfg.incoming_start * w;
        (a, a + cfg.incoming_len * w)
    }

    /// Progress window in which the incoming step's marker brightens.
    pub fn mark_window(&self, cfg: &SegmentConfig) -> (f64, f64) {
        let w = self.width();
        let a = self.range_start + cfg.incoming_start * w;
        (a, a + cfg.mark_len * w)
    }
}

/// Visual state of one content step, in the motion's translate unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StepVisualState {
    pub index: usize,
    pub opacity: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl StepVisualState {
    pub fn resting(index: usize) -> Self {
        Self {
            index,
            opacity: 1.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }

    fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self {
            index: a.index,
            opacity: clamp01(lerp(a.opacity, b.opacity, t)),
            translate_y: lerp(a.translate_y, b.translate_y, t),
            scale: lerp(a.scale, b.scale, t),
        }
    }

    pub fn is_resting(&self) -> bool {
        *self == Self::resting(self.index)
    }

    /// Convert to pixels; percent offsets scale with `element_height`.
    pub fn to_visual(&self, unit: TranslateUnit, element_height: f64) -> VisualState {
        let y = match unit {
            TranslateUnit::Px => self.translate_y,
            TranslateUnit::Percent => self.translate_y * element_height / 100.0,
        };
        VisualState::RESTING
            .with_opacity(self.opacity)
            .with_translate(0.0, y)
            .with_scale(self.scale)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MarkState {
    pub opacity: f64,
    pub scale: f64,
}

/// Step counter, per-step markers and fill bar.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IndicatorState {
    pub active: usize,
    pub label: String,
    pub marks: Vec<MarkState>,
    /// Fill of the progress bar in [0, 1].
    pub fill: f64,
}

const DIM_MARK: f64 = 0.3;
const SMALL_DOT: f64 = 0.8;

/// Deterministic partition of [0, usable] into `steps - 1` segments.
///
/// Positions live on a timeline that ends at `end`: 1.0 when a trailing
/// reserve holds the exit fade, otherwise where the last window finishes.
/// Scroll progress maps linearly onto that timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SegmentTable {
    steps: usize,
    usable: f64,
    width: f64,
    end: f64,
    segments: Vec<Segment>,
    config: SegmentConfig,
}

impl SegmentTable {
    pub fn partition(steps: usize, config: SegmentConfig) -> ReelResult<Self> {
        config.validate()?;
        if steps == 0 {
            return Err(ReelError::validation(
                "a multi-step section needs at least one step",
            ));
        }
        let usable = 1.0 - config.trailing_reserve;
        let count = steps - 1;
        let width = if count == 0 { 0.0 } else { usable / count as f64 };
        // Shared boundaries come from one expression; the last one is pinned to `usable`.
        let boundary = |i: usize| {
            if i == count {
                usable
            } else {
                i as f64 * width
            }
        };
        let segments = (0..count)
            .map(|i| Segment {
                index: i,
                range_start: boundary(i),
                range_end: boundary(i + 1),
            })
            .collect::<Vec<_>>();
        let end = match segments.last() {
            Some(last) if config.trailing_reserve == 0.0 => {
                let (_, out) = last.outgoing_window(&config);
                let (_, inc) = last.incoming_window(&config);
                let (_, mark) = last.mark_window(&config);
                let reach = out.max(inc).max(mark);
                if reach > 0.0 { reach } else { 1.0 }
            }
            _ => 1.0,
        };
        Ok(Self {
            steps,
            usable,
            width,
            end,
            segments,
            config,
        })
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn usable(&self) -> f64 {
        self.usable
    }

    pub fn segment_width(&self) -> f64 {
        self.width
    }

    pub fn timeline_end(&self) -> f64 {
        self.end
    }

    /// Timeline position reached at scroll `progress`.
    pub fn time_at(&self, progress: f64) -> f64 {
        clamp01(progress) * self.end
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    pub fn resting_states(&self) -> Vec<StepVisualState> {
        (0..self.steps).map(StepVisualState::resting).collect()
    }

    /// Section-wide opacity: fades out over the trailing reserve.
    pub fn section_opacity(&self, progress: f64) -> f64 {
        if self.segments.is_empty() {
            return 1.0;
        }
        let p = self.time_at(progress);
        if p <= self.usable {
            1.0
        } else {
            1.0 - inverse_lerp(self.usable, 1.0, p)
        }
    }

    pub fn indicator(&self, progress: f64) -> IndicatorState {
        let p = clamp01(progress);
        let t = self.time_at(p);
        let n = self.steps;
        let (active, marks) = match self.config.indicator {
            IndicatorStyle::Numbered => {
                let marks = (0..n).map(|j| self.numbered_mark(j, t)).collect();
                let active = self
                    .segments
                    .iter()
                    .filter(|s| t >= s.incoming_window(&self.config).0)
                    .count();
                (active, marks)
            }
            IndicatorStyle::Dots => {
                let active = ((p * (n - 1) as f64).round() as usize).min(n - 1);
                let marks = (0..n)
                    .map(|j| {
                        if j == active {
                            MarkState {
                                opacity: 1.0,
                                scale: 1.0,
                            }
                        } else {
                            MarkState {
                                opacity: DIM_MARK,
                                scale: SMALL_DOT,
                            }
                        }
                    })
                    .collect();
                (active, marks)
            }
        };
        let fill = if self.segments.is_empty() {
            1.0
        } else {
            clamp01(t / self.usable)
        };
        IndicatorState {
            active,
            label: format!("{:02}", active + 1),
            marks,
            fill,
        }
    }

    fn numbered_mark(&self, j: usize, p: f64) -> MarkState {
        let mut opacity = if j == 0 { 1.0 } else { DIM_MARK };
        if j > 0 {
            let (a, b) = self.segments[j - 1].mark_window(&self.config);
            if p >= a {
                opacity = lerp(DIM_MARK, 1.0, inverse_lerp(a, b, p));
            }
        }
        if j + 1 < self.steps {
            let (a, b) = self.segments[j].outgoing_window(&self.config);
            if p >= a {
                opacity = lerp(1.0, DIM_MARK, inverse_lerp(a, b, p));
            }
        }
        MarkState {
            opacity,
            scale: 1.0,
        }
    }
}

/// Per-step visual state at `progress`. Pure: no state is carried between calls.
pub fn compute_visual_state(progress: f64, table: &SegmentTable) -> Vec<StepVisualState> {
    let p = table.time_at(progress);
    let cfg = &table.config;
    let n = table.steps;
    (0..n)
        .map(|j| {
            let visible = StepVisualState::resting(j);
            let waiting = StepVisualState {
                index: j,
                opacity: 0.0,
                translate_y: cfg.motion.enter_y,
                scale: 1.0,
            };
            let exited = StepVisualState {
                index: j,
                opacity: 0.0,
                translate_y: cfg.motion.exit_y,
                scale: cfg.motion.exit_scale,
            };

            let mut state = if j == 0 { visible } else { waiting };
            if j > 0 {
                let (a, b) = table.segments[j - 1].incoming_window(cfg);
                if p >= a {
                    state = StepVisualState::lerp(waiting, visible, inverse_lerp(a, b, p));
                }
            }
            if j + 1 < n {
                let (a, b) = table.segments[j].outgoing_window(cfg);
                if p >= a {
                    state = StepVisualState::lerp(visible, exited, inverse_lerp(a, b, p));
                }
            }
            state
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/segment.rs"]
mod tests;
