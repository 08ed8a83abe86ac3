use crate::foundation::core::{ElementRect, Viewport};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
    /// The host refused to play (e.g. autoplay policy); retried on the next entry.
    Blocked,
}

/// What the host should do with the media element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCommand {
    Play,
    Pause,
}

/// Share of `rect` inside the viewport at scroll `offset`, in [0, 1].
pub fn visible_fraction(rect: ElementRect, offset: f64, viewport: Viewport) -> f64 {
    if rect.height <= 0.0 {
        return 0.0;
    }
    let top = rect.top.max(offset);
    let bottom = rect.bottom().min(offset + viewport.height);
    ((bottom - top).max(0.0) / rect.height).min(1.0)
}

/// Plays a muted background video while enough of it is on screen.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MediaAutoplay {
    threshold: f64,
    state: PlaybackState,
    rejections: u32,
}

impl Default for MediaAutoplay {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl MediaAutoplay {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            state: PlaybackState::Paused,
            rejections: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn rejections(&self) -> u32 {
        self.rejections
    }

    /// Feed the current visible fraction; returns a command on threshold crossings.
    pub fn observe(&mut self, fraction: f64) -> Option<MediaCommand> {
        let visible = fraction >= self.threshold && fraction > 0.0;
        match (visible, self.state) {
            (true, PlaybackState::Paused) => {
                self.state = PlaybackState::Playing;
                Some(MediaCommand::Play)
            }
            (false, PlaybackState::Playing) => {
                self.state = PlaybackState::Paused;
                Some(MediaCommand::Pause)
            }
            (false, PlaybackState::Blocked) => {
                self.state = PlaybackState::Paused;
                None
            }
            _ => None,
        }
    }

    /// The host rejected the last play request. Never an error.
    pub fn play_rejected(&mut self) {
        self.rejections += 1;
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Blocked;
        }
        tracing::debug!(rejections = self.rejections, "media play rejected; ignoring");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/media.rs"]
mod tests;
