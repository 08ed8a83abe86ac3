use std::{fmt, str::FromStr};

use crate::{
    foundation::core::{ElementRect, Viewport},
    foundation::error::{ReelError, ReelResult},
};

/// A reference line on the element or on the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    /// Percent of the element/viewport height, measured from its top.
    Percent(f64),
    /// Pixels from the top.
    Px(f64),
}

impl Edge {
    fn on_element(self, rect: ElementRect) -> f64 {
        match self {
            Self::Top => rect.top,
            Self::Center => rect.center(),
            Self::Bottom => rect.bottom(),
            Self::Percent(p) => rect.top + rect.height * p / 100.0,
            Self::Px(px) => rect.top + px,
        }
    }

    fn on_viewport(self, viewport: Viewport) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => viewport.height * 0.5,
            Self::Bottom => viewport.height,
            Self::Percent(p) => viewport.height_pct(p),
            Self::Px(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = ReelError;

    fn from_str(s: &str) -> ReelResult<Self> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "top" => return Ok(Self::Top),
            "center" => return Ok(Self::Center),
            "bottom" => return Ok(Self::Bottom),
            _ => {}
        }
        if let Some(p) = s.strip_suffix('%') {
            return parse_number(p).map(Self::Percent);
        }
        let px = s.strip_suffix("px").unwrap_or(&s);
        parse_number(px).map(Self::Px)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Center => f.write_str("center"),
            Self::Bottom => f.write_str("bottom"),
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Px(px) => write!(f, "{px}px"),
        }
    }
}

/// Distance for `+=` end positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Span {
    /// Percent of the viewport height.
    Percent(f64),
    Px(f64),
}

impl Span {
    fn to_px(self, viewport: Viewport) -> f64 {
        match self {
            Self::Percent(p) => viewport.height_pct(p),
            Self::Px(px) => px,
        }
    }
}

/// Where a trigger starts or ends, in the `"<element> <viewport>"` notation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Fires when the element edge meets the viewport edge.
    Edges { element: Edge, viewport: Edge },
    /// An absolute scroll offset.
    Absolute(f64),
    /// Relative to the resolved start (end positions only).
    After(Span),
    /// The document scroll limit (end positions only).
    Max,
}

impl Position {
    pub fn edges(element: Edge, viewport: Edge) -> Self {
        Self::Edges { element, viewport }
    }

    fn resolve(self, rect: ElementRect, viewport: Viewport, limit: f64, start: f64) -> f64 {
        match self {
            Self::Edges {
                element,
                viewport: vp_edge,
            } => element.on_element(rect) - vp_edge.on_viewport(viewport),
            Self::Absolute(px) => px,
            Self::After(span) => start + span.to_px(viewport),
            Self::Max => limit,
        }
    }

    fn is_relative(self) -> bool {
        matches!(self, Self::After(_))
    }
}

impl FromStr for Position {
    type Err = ReelError;

    fn from_str(s: &str) -> ReelResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ReelError::validation("trigger position must be non-empty"));
        }
        if trimmed.eq_ignore_ascii_case("max") {
            return Ok(Self::Max);
        }
        if let Some(rest) = trimmed.strip_prefix("+=") {
            let rest = rest.trim();
            let span = match rest.strip_suffix('%') {
                Some(p) => Span::Percent(parse_number(p)?),
                None => Span::Px(parse_number(rest.strip_suffix("px").unwrap_or(rest))?),
            };
            return Ok(Self::After(span));
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        match parts.as_slice() {
            [single] => {
                // A bare keyword pairs with the same viewport edge; a bare number is absolute.
                match single.parse::<f64>() {
                    Ok(px) if px.is_finite() => Ok(Self::Absolute(px)),
                    _ => {
                        let edge: Edge = single.parse()?;
                        Ok(Self::edges(edge, edge))
                    }
                }
            }
            [element, viewport] => Ok(Self::edges(element.parse()?, viewport.parse()?)),
            _ => Err(ReelError::validation(format!(
                "trigger position '{trimmed}' must be '<element> <viewport>'"
            ))),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edges { element, viewport } => write!(f, "{element} {viewport}"),
            Self::Absolute(px) => write!(f, "{px}"),
            Self::After(Span::Percent(p)) => write!(f, "+={p}%"),
            Self::After(Span::Px(px)) => write!(f, "+={px}px"),
            Self::Max => f.write_str("max"),
        }
    }
}

impl serde::Serialize for Position {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Position {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn parse_number(s: &str) -> ReelResult<f64> {
    let s = s.trim();
    let v: f64 = s
        .parse()
        .map_err(|_| ReelError::validation(format!("invalid trigger number '{s}'")))?;
    if !v.is_finite() {
        return Err(ReelError::validation(format!(
            "trigger number '{s}' must be finite"
        )));
    }
    Ok(v)
}

/// Start/end pair for a scroll-linked timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerSpec {
    pub start: Position,
    pub end: Position,
}

impl TriggerSpec {
    pub fn parse(start: &str, end: &str) -> ReelResult<Self> {
        let spec = Self {
            start: start.parse()?,
            end: end.parse()?,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.start.is_relative() {
            return Err(ReelError::validation(
                "trigger start cannot be relative ('+=')",
            ));
        }
        Ok(())
    }

    /// Length of a relative (`+=`) end, which is known without measuring the element.
    pub fn relative_len(&self, viewport: Viewport) -> Option<f64> {
        match self.end {
            Position::After(span) => Some(span.to_px(viewport).max(0.0)),
            _ => None,
        }
    }

    /// Resolve to scroll offsets. `end` never lands before `start`.
    pub fn resolve(&self, rect: ElementRect, viewport: Viewport, limit: f64) -> TriggerRange {
        let start_px = self.start.resolve(rect, viewport, limit, 0.0);
        let end_px = self.end.resolve(rect, viewport, limit, start_px);
        TriggerRange {
            start_px,
            end_px: end_px.max(start_px),
        }
    }
}

/// Scroll offsets between which a timeline's progress runs from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerRange {
    pub start_px: f64,
    pub end_px: f64,
}

impl TriggerRange {
    pub fn len(&self) -> f64 {
        self.end_px - self.start_px
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    pub fn contains(&self, offset: f64) -> bool {
        self.start_px < offset && offset < self.end_px
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/trigger.rs"]
mod tests;
