//! Portfolio content loaded from TOML.

#![allow(missing_docs)]

use std::path::Path;

use serde::Deserialize;

use crate::error::FolioError;

/// Content shipped with the binary when no `--content` file is given.
pub const DEFAULT_PORTFOLIO: &str = include_str!("../assets/portfolio.toml");

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub socials: Socials,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub total_experience: String,
    #[serde(default = "default_resume")]
    pub resume: String,
    #[serde(default)]
    pub bio: Vec<String>,
    #[serde(default)]
    pub tagline: String,
}

fn default_resume() -> String {
    "resume.pdf".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Socials {
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub linkedin: String,
    pub twitter: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experience {
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub link: String,
    pub period: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Role {
    pub title: String,
    pub period: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
    #[serde(default)]
    pub description: String,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub github: Option<String>,
    pub demo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    pub name: String,
    pub score: u8,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Certificate {
    pub name: String,
    pub issuer: String,
    pub date: Option<String>,
    pub credential: Option<String>,
}

impl Portfolio {
    pub fn builtin() -> Result<Self, FolioError> {
        Self::from_toml(DEFAULT_PORTFOLIO)
    }

    pub fn from_toml(text: &str) -> Result<Self, FolioError> {
        let portfolio: Portfolio = toml::from_str(text)
            .map_err(|err| FolioError::InvalidContent(err.to_string().into()))?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FolioError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| FolioError::io(path, err))?;
        Self::from_toml(&text).map_err(|err| match err {
            FolioError::InvalidContent(message) => {
                FolioError::InvalidContent(format!("{}: {message}", path.display()).into())
            }
            other => other,
        })
    }

    pub fn validate(&self) -> Result<(), FolioError> {
        if self.profile.name.trim().is_empty() {
            return Err(FolioError::InvalidContent("profile.name is empty".into()));
        }
        for skill in &self.skills {
            if !(1..=10).contains(&skill.score) {
                return Err(FolioError::InvalidContent(
                    format!(
                        "skill '{}' has score {} (expected 1..=10)",
                        skill.name, skill.score
                    )
                    .into(),
                ));
            }
        }
        for job in &self.experience {
            if job.roles.iter().any(|role| role.title.trim().is_empty()) {
                return Err(FolioError::InvalidContent(
                    format!("experience at '{}' has a role without title", job.company).into(),
                ));
            }
        }
        Ok(())
    }

    /// Skills grouped by category, categories in first-appearance order.
    pub fn skills_by_category(&self) -> indexmap::IndexMap<&str, Vec<&Skill>> {
        let mut groups: indexmap::IndexMap<&str, Vec<&Skill>> = indexmap::IndexMap::new();
        for skill in &self.skills {
            groups.entry(skill.category.as_str()).or_default().push(skill);
        }
        groups
    }

    /// File name offered when the resume is "downloaded".
    pub fn resume_download_name(&self) -> String {
        format!(
            "resume_{}.pdf",
            self.profile.name.trim().to_lowercase().replace(' ', "_")
        )
    }
}
