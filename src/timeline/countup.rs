use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
    foundation::math::round_to_decimals,
};

/// A number that counts from zero to its target once, after it is first seen.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CountUp {
    pub target: f64,
    pub decimals: u32,
    pub duration_ms: f64,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(skip)]
    started_at_ms: Option<f64>,
}

impl CountUp {
    pub const DEFAULT_DURATION_MS: f64 = 2200.0;

    pub fn new(target: f64, decimals: u32, duration_ms: f64) -> ReelResult<Self> {
        if !target.is_finite() {
            return Err(ReelError::validation("count-up target must be finite"));
        }
        if !(duration_ms.is_finite() && duration_ms >= 0.0) {
            return Err(ReelError::validation(
                "count-up duration must be finite and >= 0",
            ));
        }
        Ok(Self {
            target,
            decimals,
            duration_ms,
            prefix: String::new(),
            suffix: String::new(),
            started_at_ms: None,
        })
    }

    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    /// Start counting. Only the first call has any effect.
    pub fn trigger(&mut self, now_ms: f64) -> bool {
        if self.started_at_ms.is_some() {
            return false;
        }
        self.started_at_ms = Some(now_ms);
        true
    }

    pub fn started_at_ms(&self) -> Option<f64> {
        self.started_at_ms
    }

    fn linear(&self, now_ms: f64) -> Option<f64> {
        let start = self.started_at_ms?;
        if self.duration_ms <= 0.0 {
            return Some(1.0);
        }
        Some(((now_ms - start) / self.duration_ms).clamp(0.0, 1.0))
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.linear(now_ms).is_some_and(|p| p >= 1.0)
    }

    pub fn value(&self, now_ms: f64) -> f64 {
        match self.linear(now_ms) {
            None => 0.0,
            Some(p) if p >= 1.0 => self.target,
            Some(p) => round_to_decimals(self.target * Ease::OutCubic.apply(p), self.decimals),
        }
    }

    pub fn display(&self, now_ms: f64) -> String {
        let v = self.value(now_ms);
        let number = if self.decimals > 0 {
            format!("{:.*}", self.decimals as usize, v)
        } else {
            format!("{}", v.floor() as i64)
        };
        format!("{}{}{}", self.prefix, number, self.suffix)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/countup.rs"]
mod tests;
