use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Store;
use super::mapper::{encode_flag, encode_list, flag_column, list_column};
use super::patch::apply_partial_update;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

const PROFILE_COLUMNS: &str = "id, name, title, description, email, phone, location, about, \
     github_url, linkedin_url, cv_filename, cv_url, language, theme, updated_at";

const SKILL_COLUMNS: &str = "id, name, category, level, icon, color, order_index, created_at";

const PROJECT_COLUMNS: &str =
    "id, title, description, technologies, github_url, live_url, featured, order_index, created_at";

const EDUCATION_COLUMNS: &str = "id, degree, institution, location, start_date, end_date, \
     description, gpa, honors, courses, achievements, featured, order_index, created_at";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        name: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        email: row.get(4)?,
        phone: row.get(5)?,
        location: row.get(6)?,
        about: row.get(7)?,
        github_url: row.get(8)?,
        linkedin_url: row.get(9)?,
        cv_filename: row.get(10)?,
        cv_url: row.get(11)?,
        language: row.get(12)?,
        theme: row.get(13)?,
        updated_at: parse_datetime(&row.get::<_, String>(14)?),
    })
}

fn skill_from_row(row: &Row<'_>) -> rusqlite::Result<Skill> {
    Ok(Skill {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        level: row.get(3)?,
        icon: row.get(4)?,
        color: row.get(5)?,
        order_index: row.get(6)?,
        created_at: parse_datetime(&row.get::<_, String>(7)?),
    })
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        technologies: row.get(3)?,
        github_url: row.get(4)?,
        live_url: row.get(5)?,
        featured: flag_column(row, 6)?,
        order_index: row.get(7)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}

fn education_from_row(row: &Row<'_>) -> rusqlite::Result<Education> {
    Ok(Education {
        id: row.get(0)?,
        degree: row.get(1)?,
        institution: row.get(2)?,
        location: row.get(3)?,
        start_date: row.get(4)?,
        end_date: row.get(5)?,
        description: row.get(6)?,
        gpa: row.get(7)?,
        honors: row.get(8)?,
        courses: list_column(row, 9)?,
        achievements: list_column(row, 10)?,
        featured: flag_column(row, 11)?,
        order_index: row.get(12)?,
        created_at: parse_datetime(&row.get::<_, String>(13)?),
    })
}

fn query_profile(conn: &Connection) -> Result<Option<Profile>> {
    conn.query_row(
        &format!("SELECT {PROFILE_COLUMNS} FROM profile WHERE id = ?1"),
        params![PROFILE_ID],
        profile_from_row,
    )
    .optional()
    .map_err(Error::from)
}

fn query_by_id<T>(
    conn: &Connection,
    table: &str,
    columns: &str,
    id: i64,
    from_row: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Option<T>> {
    conn.query_row(
        &format!("SELECT {columns} FROM {table} WHERE id = ?1"),
        params![id],
        from_row,
    )
    .optional()
    .map_err(Error::from)
}

fn query_ordered<T>(
    conn: &Connection,
    table: &str,
    columns: &str,
    from_row: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {columns} FROM {table} ORDER BY order_index ASC, id ASC"
    ))?;

    let rows = stmt.query_map([], from_row)?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

fn delete_by_id(conn: &Connection, table: &str, id: i64) -> Result<bool> {
    let rows = conn.execute(&format!("DELETE FROM {table} WHERE id = ?1"), params![id])?;
    Ok(rows > 0)
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Profile operations

    fn get_profile(&self) -> Result<Option<Profile>> {
        query_profile(&self.conn())
    }

    fn save_profile(&self, input: &ProfileInput) -> Result<Profile> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO profile (id, name, title, description, email, phone, location, about,
                                  github_url, linkedin_url, cv_filename, cv_url, language, theme, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                     COALESCE(?13, ?16), COALESCE(?14, ?17), ?15)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                title = excluded.title,
                description = excluded.description,
                email = excluded.email,
                phone = excluded.phone,
                location = excluded.location,
                about = excluded.about,
                github_url = excluded.github_url,
                linkedin_url = excluded.linkedin_url,
                cv_filename = excluded.cv_filename,
                cv_url = excluded.cv_url,
                language = COALESCE(?13, profile.language),
                theme = COALESCE(?14, profile.theme),
                updated_at = excluded.updated_at",
            params![
                PROFILE_ID,
                input.name,
                input.title,
                input.description,
                input.email,
                input.phone,
                input.location,
                input.about,
                input.github_url,
                input.linkedin_url,
                input.cv_filename,
                input.cv_url,
                input.language,
                input.theme,
                format_datetime(&Utc::now()),
                DEFAULT_LANGUAGE,
                DEFAULT_THEME,
            ],
        )?;

        query_profile(&conn)?.ok_or(Error::NotFound)
    }

    fn set_profile_cv(&self, filename: &str, url: &str) -> Result<bool> {
        let rows = self.conn().execute(
            "UPDATE profile SET cv_filename = ?1, cv_url = ?2, updated_at = ?3 WHERE id = ?4",
            params![filename, url, format_datetime(&Utc::now()), PROFILE_ID],
        )?;
        Ok(rows > 0)
    }

    // Skill operations

    fn list_skills(&self) -> Result<Vec<Skill>> {
        query_ordered(&self.conn(), "skills", SKILL_COLUMNS, skill_from_row)
    }

    fn get_skill(&self, id: i64) -> Result<Option<Skill>> {
        query_by_id(&self.conn(), "skills", SKILL_COLUMNS, id, skill_from_row)
    }

    fn create_skill(&self, skill: &NewSkill) -> Result<Skill> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO skills (name, category, level, icon, color, order_index, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                skill.name,
                skill.category,
                skill.level.unwrap_or(DEFAULT_SKILL_LEVEL),
                skill.icon,
                skill.color.as_deref().unwrap_or(DEFAULT_SKILL_COLOR),
                skill.order_index.unwrap_or(0),
                format_datetime(&Utc::now()),
            ],
        )?;

        let id = conn.last_insert_rowid();
        query_by_id(&conn, "skills", SKILL_COLUMNS, id, skill_from_row)?.ok_or(Error::NotFound)
    }

    fn update_skill(&self, id: i64, patch: SkillPatch) -> Result<bool> {
        let rows = apply_partial_update(&self.conn(), id, patch)?;
        Ok(rows > 0)
    }

    fn delete_skill(&self, id: i64) -> Result<bool> {
        delete_by_id(&self.conn(), "skills", id)
    }

    // Project operations

    fn list_projects(&self) -> Result<Vec<Project>> {
        query_ordered(&self.conn(), "projects", PROJECT_COLUMNS, project_from_row)
    }

    fn get_project(&self, id: i64) -> Result<Option<Project>> {
        query_by_id(&self.conn(), "projects", PROJECT_COLUMNS, id, project_from_row)
    }

    fn create_project(&self, project: &NewProject) -> Result<Project> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO projects (title, description, technologies, github_url, live_url, featured, order_index, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                project.title,
                project.description,
                project.technologies,
                project.github_url,
                project.live_url,
                encode_flag(project.featured),
                project.order_index.unwrap_or(0),
                format_datetime(&Utc::now()),
            ],
        )?;

        let id = conn.last_insert_rowid();
        query_by_id(&conn, "projects", PROJECT_COLUMNS, id, project_from_row)?
            .ok_or(Error::NotFound)
    }

    fn update_project(&self, id: i64, patch: ProjectPatch) -> Result<bool> {
        let rows = apply_partial_update(&self.conn(), id, patch)?;
        Ok(rows > 0)
    }

    fn delete_project(&self, id: i64) -> Result<bool> {
        delete_by_id(&self.conn(), "projects", id)
    }

    // Education operations

    fn list_education(&self) -> Result<Vec<Education>> {
        query_ordered(&self.conn(), "education", EDUCATION_COLUMNS, education_from_row)
    }

    fn get_education(&self, id: i64) -> Result<Option<Education>> {
        query_by_id(&self.conn(), "education", EDUCATION_COLUMNS, id, education_from_row)
    }

    fn create_education(&self, education: &NewEducation) -> Result<Education> {
        let courses = encode_list(education.courses.as_deref())?;
        let achievements = encode_list(education.achievements.as_deref())?;

        let conn = self.conn();
        conn.execute(
            "INSERT INTO education (degree, institution, location, start_date, end_date, description,
                                    gpa, honors, courses, achievements, featured, order_index, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                education.degree,
                education.institution,
                education.location,
                education.start_date,
                education.end_date,
                education.description,
                education.gpa,
                education.honors,
                courses,
                achievements,
                encode_flag(education.featured),
                education.order_index.unwrap_or(0),
                format_datetime(&Utc::now()),
            ],
        )?;

        let id = conn.last_insert_rowid();
        query_by_id(&conn, "education", EDUCATION_COLUMNS, id, education_from_row)?
            .ok_or(Error::NotFound)
    }

    fn update_education(&self, id: i64, patch: EducationPatch) -> Result<bool> {
        let rows = apply_partial_update(&self.conn(), id, patch)?;
        Ok(rows > 0)
    }

    fn delete_education(&self, id: i64) -> Result<bool> {
        delete_by_id(&self.conn(), "education", id)
    }
}
