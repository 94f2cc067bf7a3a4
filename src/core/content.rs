//! Static portfolio content: profile, projects and skills.
//!
//! Everything here is defined once at startup and only read afterwards.

use std::collections::HashSet;

use thiserror::Error;

/// One project card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
    /// Technology tags, in display order.  May be empty.
    pub tech: &'static [&'static str],
}

/// One skill badge.  `icon` is a short glyph drawn before the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    pub name: &'static str,
    pub icon: &'static str,
}

/// Owner details used by the hero, about, resume and contact sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub greeting: &'static str,
    pub tagline: &'static str,
    pub about: &'static str,
    pub summary: &'static str,
    pub education: &'static str,
    pub email: &'static str,
    pub github: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("project #{index} has an empty title")]
    EmptyTitle { index: usize },
    #[error("project '{title}' has an empty link")]
    EmptyLink { title: &'static str },
    #[error("skill '{name}' is listed more than once")]
    DuplicateSkill { name: &'static str },
}

/// Everything the page renders.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub profile: Profile,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<SkillEntry>,
}

impl Portfolio {
    /// Build a portfolio and check its invariants.
    pub fn new(
        profile: Profile,
        projects: Vec<ProjectEntry>,
        skills: Vec<SkillEntry>,
    ) -> Result<Self, ContentError> {
        let portfolio = Self {
            profile,
            projects,
            skills,
        };
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// The built-in portfolio shipped with the binary.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::new(PROFILE, PROJECTS.to_vec(), SKILLS.to_vec())
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        for (index, p) in self.projects.iter().enumerate() {
            if p.title.trim().is_empty() {
                return Err(ContentError::EmptyTitle { index });
            }
            if p.link.trim().is_empty() {
                return Err(ContentError::EmptyLink { title: p.title });
            }
        }
        let mut seen = HashSet::new();
        for s in &self.skills {
            if !seen.insert(s.name) {
                return Err(ContentError::DuplicateSkill { name: s.name });
            }
        }
        Ok(())
    }

    pub fn project(&self, index: usize) -> Option<&ProjectEntry> {
        self.projects.get(index)
    }
}

// ───────────────────────────────────────── built-in data ─────

pub const PROFILE: Profile = Profile {
    name: "Aayushman Singh",
    greeting: "Hi, I'm Aayushman",
    tagline: "Aspiring MERN Developer | 7th Grade",
    about: "I'm a young web developer learning HTML, CSS, JavaScript, React, \
            Tailwind CSS, and Node.js. I love building real-world projects and \
            learning new skills every day.",
    summary: "A young MERN stack developer passionate about creating modern web applications.",
    education: "Currently studying in 7th Grade",
    email: "aayushmaansingh726@gmail.com",
    github: "github.com/ap-afk",
};

pub const PROJECTS: &[ProjectEntry] = &[
    ProjectEntry {
        title: "Omnimins",
        description: "Landing page for a fictional smartwatch brand.",
        link: "https://omnimins.netlify.app/",
        tech: &["HTML", "CSS", "JavaScript"],
    },
    ProjectEntry {
        title: "Landing Page Gules Omega",
        description: "Built with React and Tailwind CSS.",
        link: "https://landing-page-gules-omega.vercel.app/",
        tech: &["React", "Tailwind CSS"],
    },
    ProjectEntry {
        title: "Code Review & Docs",
        description: "Improving code quality and writing documentation.",
        link: "https://github.com/ap-afk",
        tech: &["GitHub", "Documentation"],
    },
    ProjectEntry {
        title: "FoodReels",
        description: "Recipe exploring app with interactive UI.",
        link: "https://foodreels.netlify.app/",
        tech: &["React", "API", "CSS"],
    },
];

pub const SKILLS: &[SkillEntry] = &[
    SkillEntry { name: "HTML", icon: "<>" },
    SkillEntry { name: "CSS", icon: "#" },
    SkillEntry { name: "JavaScript", icon: "JS" },
    SkillEntry { name: "React", icon: "⚛" },
    SkillEntry { name: "Tailwind", icon: "≈" },
    SkillEntry { name: "Node.js", icon: "⬢" },
];
