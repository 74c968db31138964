//! Partial updates.
//!
//! A patch is turned into a list of `(column, value)` pairs and written with a
//! single `UPDATE ... WHERE id = ?` statement, so either every supplied column
//! changes or none does. Column names only ever come from the per-entity
//! column enums below.

use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

use super::mapper::{encode_flag, encode_list};
use crate::error::Result;
use crate::types::{EducationPatch, ProjectPatch, SkillPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Skills,
    Projects,
    Education,
}

impl Table {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Table::Skills => "skills",
            Table::Projects => "projects",
            Table::Education => "education",
        }
    }
}

pub trait Column: Copy {
    fn name(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillColumn {
    Name,
    Category,
    Level,
    Icon,
    Color,
    OrderIndex,
}

impl Column for SkillColumn {
    fn name(self) -> &'static str {
        match self {
            SkillColumn::Name => "name",
            SkillColumn::Category => "category",
            SkillColumn::Level => "level",
            SkillColumn::Icon => "icon",
            SkillColumn::Color => "color",
            SkillColumn::OrderIndex => "order_index",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectColumn {
    Title,
    Description,
    Technologies,
    GithubUrl,
    LiveUrl,
    Featured,
    OrderIndex,
}

impl Column for ProjectColumn {
    fn name(self) -> &'static str {
        match self {
            ProjectColumn::Title => "title",
            ProjectColumn::Description => "description",
            ProjectColumn::Technologies => "technologies",
            ProjectColumn::GithubUrl => "github_url",
            ProjectColumn::LiveUrl => "live_url",
            ProjectColumn::Featured => "featured",
            ProjectColumn::OrderIndex => "order_index",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationColumn {
    Degree,
    Institution,
    Location,
    StartDate,
    EndDate,
    Description,
    Gpa,
    Honors,
    Courses,
    Achievements,
    Featured,
    OrderIndex,
}

impl Column for EducationColumn {
    fn name(self) -> &'static str {
        match self {
            EducationColumn::Degree => "degree",
            EducationColumn::Institution => "institution",
            EducationColumn::Location => "location",
            EducationColumn::StartDate => "start_date",
            EducationColumn::EndDate => "end_date",
            EducationColumn::Description => "description",
            EducationColumn::Gpa => "gpa",
            EducationColumn::Honors => "honors",
            EducationColumn::Courses => "courses",
            EducationColumn::Achievements => "achievements",
            EducationColumn::Featured => "featured",
            EducationColumn::OrderIndex => "order_index",
        }
    }
}

/// Ordered column assignments for one row.
#[derive(Debug, Clone)]
pub struct Changes<C> {
    entries: Vec<(C, Value)>,
}

impl<C: Column> Changes<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn set(&mut self, column: C, value: impl Into<Value>) {
        self.entries.push((column, value.into()));
    }

    fn set_opt<T: Into<Value>>(&mut self, column: C, value: Option<T>) {
        if let Some(value) = value {
            self.set(column, value);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(c, _)| c.name())
    }
}

impl<C: Column> Default for Changes<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sparse update body bound to one table.
pub trait Patch {
    type Column: Column;
    const TABLE: Table;

    fn into_changes(self) -> Result<Changes<Self::Column>>;
}

impl Patch for SkillPatch {
    type Column = SkillColumn;
    const TABLE: Table = Table::Skills;

    fn into_changes(self) -> Result<Changes<SkillColumn>> {
        let mut changes = Changes::new();
        changes.set_opt(SkillColumn::Name, self.name);
        changes.set_opt(SkillColumn::Category, self.category);
        changes.set_opt(SkillColumn::Level, self.level);
        changes.set_opt(SkillColumn::Icon, self.icon);
        changes.set_opt(SkillColumn::Color, self.color);
        changes.set_opt(SkillColumn::OrderIndex, self.order_index);
        Ok(changes)
    }
}

impl Patch for ProjectPatch {
    type Column = ProjectColumn;
    const TABLE: Table = Table::Projects;

    fn into_changes(self) -> Result<Changes<ProjectColumn>> {
        let mut changes = Changes::new();
        changes.set_opt(ProjectColumn::Title, self.title);
        changes.set_opt(ProjectColumn::Description, self.description);
        changes.set_opt(ProjectColumn::Technologies, self.technologies);
        changes.set_opt(ProjectColumn::GithubUrl, self.github_url);
        changes.set_opt(ProjectColumn::LiveUrl, self.live_url);
        changes.set_opt(ProjectColumn::Featured, self.featured.map(encode_flag));
        changes.set_opt(ProjectColumn::OrderIndex, self.order_index);
        Ok(changes)
    }
}

impl Patch for EducationPatch {
    type Column = EducationColumn;
    const TABLE: Table = Table::Education;

    fn into_changes(self) -> Result<Changes<EducationColumn>> {
        let mut changes = Changes::new();
        changes.set_opt(EducationColumn::Degree, self.degree);
        changes.set_opt(EducationColumn::Institution, self.institution);
        changes.set_opt(EducationColumn::Location, self.location);
        changes.set_opt(EducationColumn::StartDate, self.start_date);
        changes.set_opt(EducationColumn::EndDate, self.end_date);
        changes.set_opt(EducationColumn::Description, self.description);
        changes.set_opt(EducationColumn::Gpa, self.gpa);
        changes.set_opt(EducationColumn::Honors, self.honors);
        if let Some(courses) = self.courses {
            changes.set(EducationColumn::Courses, encode_list(courses.as_deref())?);
        }
        if let Some(achievements) = self.achievements {
            changes.set(
                EducationColumn::Achievements,
                encode_list(achievements.as_deref())?,
            );
        }
        changes.set_opt(EducationColumn::Featured, self.featured.map(encode_flag));
        changes.set_opt(EducationColumn::OrderIndex, self.order_index);
        Ok(changes)
    }
}

/// Builds the update statement for `changes`; the row id is always the last
/// parameter. An empty change set yields a statement that matches the row
/// but changes nothing.
pub(crate) fn update_sql<C: Column>(table: Table, changes: &Changes<C>) -> String {
    if changes.is_empty() {
        return format!("UPDATE {} SET id = id WHERE id = ?1", table.name());
    }

    let assignments: Vec<String> = changes
        .columns()
        .enumerate()
        .map(|(i, column)| format!("{column} = ?{}", i + 1))
        .collect();

    format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        table.name(),
        assignments.join(", "),
        changes.len() + 1
    )
}

/// Applies `patch` to row `id` and returns the number of rows touched.
pub(crate) fn apply_partial_update<P: Patch>(conn: &Connection, id: i64, patch: P) -> Result<usize> {
    let changes = patch.into_changes()?;
    let sql = update_sql(P::TABLE, &changes);

    let values = changes
        .entries
        .into_iter()
        .map(|(_, value)| value)
        .chain(std::iter::once(Value::Integer(id)));

    let rows = conn.execute(&sql, params_from_iter(values))?;
    tracing::debug!("{sql} -> {rows} row(s)");
    Ok(rows)
}
