use crate::{foundation::error::ReelResult, timeline::countup::CountUp};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NavLink {
    pub label: &'static str,
    /// In-page anchor, e.g. `#process`.
    pub href: &'static str,
}

/// Headline metric rendered with a count-up.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Stat {
    pub prefix: &'static str,
    pub target: f64,
    pub suffix: &'static str,
    pub decimals: u32,
    pub label: &'static str,
    pub description: &'static str,
}

impl Stat {
    pub fn count_up(&self) -> ReelResult<CountUp> {
        Ok(CountUp::new(self.target, self.decimals, CountUp::DEFAULT_DURATION_MS)?
            .with_affixes(self.prefix, self.suffix))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ProcessStep {
    pub number: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

/// Case study shown as one slide of the work section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Project {
    pub number: &'static str,
    pub category: &'static str,
    pub title: &'static str,
    pub stat: &'static str,
    pub detail: &'static str,
    /// Root-relative asset path; prefix with [`crate::AssetPaths`] before use.
    pub image: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Testimonial {
    pub quote: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub company: &'static str,
    pub avatar: &'static str,
}
