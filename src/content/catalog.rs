use crate::{
    assets::path::AssetPaths,
    content::model::{NavLink, ProcessStep, Project, Stat, Testimonial},
};

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { label: "Demo", href: "#demo" },
    NavLink { label: "Solutions", href: "#solutions" },
    NavLink { label: "Process", href: "#process" },
    NavLink { label: "Work", href: "#work" },
    NavLink { label: "Contact", href: "#contact" },
];

pub const STATS: &[Stat] = &[
    Stat {
        prefix: "",
        target: 3.2,
        suffix: "x",
        decimals: 1,
        label: "Average ROAS",
        description: "Return on ad spend achieved by enterprise clients within 90 days of launch",
    },
    Stat {
        prefix: "",
        target: 47.0,
        suffix: "%",
        decimals: 0,
        label: "Lower CAC",
        description: "Reduction in customer acquisition cost versus prior channel benchmarks",
    },
    Stat {
        prefix: "",
        target: 2.8,
        suffix: "x",
        decimals: 1,
        label: "Pipeline Growth",
        description: "Average qualified pipeline increase generated within the first quarter",
    },
];

pub const PROCESS_STEPS: &[ProcessStep] = &[
    ProcessStep {
        number: "01",
        title: "Discovery & Strategy",
        description: "We audit your existing digital footprint: channels, spend, attribution and \
            competitive positioning. From there we design a demand architecture built around your \
            market, buyers and growth targets.",
        tags: &["Audit", "Competitive Analysis", "Goal Mapping"],
    },
    ProcessStep {
        number: "02",
        title: "Audience Intelligence",
        description: "Behavioral signals across millions of touchpoints build a precise picture of \
            your ideal buyers, surfacing high-intent segments before your competitors find them.",
        tags: &["AI Segmentation", "Intent Scoring", "Identity Resolution"],
    },
    ProcessStep {
        number: "03",
        title: "Campaign Execution",
        description: "Campaigns deploy across channels with every creative, bid and placement \
            calibrated against your revenue objectives rather than platform vanity metrics.",
        tags: &["Multi-Channel Activation", "Creative Strategy", "Bid Optimization"],
    },
    ProcessStep {
        number: "04",
        title: "Optimization & Scale",
        description: "Real-time attribution dashboards give full-funnel visibility from first touch \
            to closed revenue. We iterate weekly until the acquisition machine sustains itself.",
        tags: &["Attribution Modeling", "Incremental Lift", "Scale Playbooks"],
    },
];

pub const PROJECTS: &[Project] = &[
    Project {
        number: "01",
        category: "Demand Generation",
        title: "Enterprise SaaS Platform Scales Pipeline 3.2x",
        stat: "+3.2x pipeline",
        detail: "90 days to results",
        image: "/images/work-01-saas.jpg",
    },
    Project {
        number: "02",
        category: "Performance Marketing",
        title: "Global Financial Services Firm Reduces CAC by 47%",
        stat: "47% lower CAC",
        detail: "Full-funnel attribution",
        image: "/images/work-02-finance.jpg",
    },
    Project {
        number: "03",
        category: "Growth Strategy",
        title: "Healthcare Leader Achieves 2.8x ROAS in 90 Days",
        stat: "2.8x ROAS",
        detail: "Zero wasted impressions",
        image: "/images/work-03-health.jpg",
    },
];

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "Over twelve months they became our highest-ROAS channel, outperforming paid search, \
            paid social and everything else in our mix.",
        name: "Sarah Chen",
        role: "VP of Growth",
        company: "Meridian Capital Group",
        avatar: "/images/avatar-sarah.jpg",
    },
    Testimonial {
        quote: "They built the entire demand architecture from the ground up. Pipeline quality \
            improved dramatically and our sales team finally had leads worth calling.",
        name: "Marcus Rivera",
        role: "Chief Marketing Officer",
        company: "Arclight Technologies",
        avatar: "/images/avatar-marcus.jpg",
    },
];

/// Media referenced directly by sections.
pub mod media {
    pub const HERO_VIDEO: &str = "/hero-bg.mp4";
    pub const HERO_POSTER: &str = "/images/work-01-saas.jpg";
    pub const DEMO_VIDEO: &str = "/demo-video.mp4";
    pub const PROBLEM_BACKGROUND: &str = "/images/problem-bg.jpg";
    pub const SOLUTION_VISUAL: &str = "/images/solution-analytics.jpg";
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub image_url: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TestimonialView {
    #[serde(flatten)]
    pub testimonial: Testimonial,
    pub avatar_url: String,
}

/// Every static record with asset URLs resolved against one base path.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CatalogSnapshot {
    pub base_path: String,
    pub nav_links: &'static [NavLink],
    pub stats: &'static [Stat],
    pub process_steps: &'static [ProcessStep],
    pub projects: Vec<ProjectView>,
    pub testimonials: Vec<TestimonialView>,
    pub media: Vec<String>,
}

impl CatalogSnapshot {
    pub fn resolve(assets: &AssetPaths) -> Self {
        Self {
            base_path: assets.base().to_owned(),
            nav_links: NAV_LINKS,
            stats: STATS,
            process_steps: PROCESS_STEPS,
            projects: PROJECTS
                .iter()
                .map(|p| ProjectView {
                    project: *p,
                    image_url: assets.resolve(p.image),
                })
                .collect(),
            testimonials: TESTIMONIALS
                .iter()
                .map(|t| TestimonialView {
                    testimonial: *t,
                    avatar_url: assets.resolve(t.avatar),
                })
                .collect(),
            media: [
                media::HERO_VIDEO,
                media::HERO_POSTER,
                media::DEMO_VIDEO,
                media::PROBLEM_BACKGROUND,
                media::SOLUTION_VISUAL,
            ]
            .iter()
            .map(|m| assets.resolve(m))
            .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/catalog.rs"]
mod tests;
