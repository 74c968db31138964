use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row id of the one and only profile.
pub const PROFILE_ID: i64 = 1;

pub const DEFAULT_LANGUAGE: &str = "fr";
pub const DEFAULT_THEME: &str = "auto";
pub const DEFAULT_SKILL_LEVEL: i64 = 50;
pub const DEFAULT_SKILL_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    /// Original name of the uploaded résumé, used as the download name.
    pub cv_filename: Option<String>,
    /// Public link to the stored résumé, `/uploads/<stored name>`.
    pub cv_url: Option<String>,
    pub language: String,
    pub theme: String,
    pub updated_at: DateTime<Utc>,
}

/// Full set of profile fields accepted by a profile update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub cv_filename: Option<String>,
    #[serde(default)]
    pub cv_url: Option<String>,
    /// Left unchanged when absent; [`DEFAULT_LANGUAGE`] on first save.
    #[serde(default)]
    pub language: Option<String>,
    /// Left unchanged when absent; [`DEFAULT_THEME`] on first save.
    #[serde(default)]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub level: i64,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub order_index: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSkill {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub order_index: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Free-text technology list, stored as sent.
    pub technologies: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub order_index: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order_index: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: i64,
    pub degree: String,
    pub institution: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub gpa: Option<String>,
    pub honors: Option<String>,
    pub courses: Vec<String>,
    pub achievements: Vec<String>,
    pub featured: bool,
    pub order_index: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEducation {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub honors: Option<String>,
    #[serde(default)]
    pub courses: Option<Vec<String>>,
    #[serde(default)]
    pub achievements: Option<Vec<String>>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order_index: Option<i64>,
}
