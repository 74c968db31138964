pub mod mapper;
pub mod patch;
mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Profile operations (single row)
    fn get_profile(&self) -> Result<Option<Profile>>;
    fn save_profile(&self, input: &ProfileInput) -> Result<Profile>;
    /// Points the profile at a stored résumé. Returns `false` when there is
    /// no profile to link to.
    fn set_profile_cv(&self, filename: &str, url: &str) -> Result<bool>;

    // Skill operations
    fn list_skills(&self) -> Result<Vec<Skill>>;
    fn get_skill(&self, id: i64) -> Result<Option<Skill>>;
    fn create_skill(&self, skill: &NewSkill) -> Result<Skill>;
    fn update_skill(&self, id: i64, patch: SkillPatch) -> Result<bool>;
    fn delete_skill(&self, id: i64) -> Result<bool>;

    // Project operations
    fn list_projects(&self) -> Result<Vec<Project>>;
    fn get_project(&self, id: i64) -> Result<Option<Project>>;
    fn create_project(&self, project: &NewProject) -> Result<Project>;
    fn update_project(&self, id: i64, patch: ProjectPatch) -> Result<bool>;
    fn delete_project(&self, id: i64) -> Result<bool>;

    // Education operations
    fn list_education(&self) -> Result<Vec<Education>>;
    fn get_education(&self, id: i64) -> Result<Option<Education>>;
    fn create_education(&self, education: &NewEducation) -> Result<Education>;
    fn update_education(&self, id: i64, patch: EducationPatch) -> Result<bool>;
    fn delete_education(&self, id: i64) -> Result<bool>;
}
