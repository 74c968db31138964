pub const SCHEMA: &str = r#"
-- The portfolio owner; at most one row
CREATE TABLE IF NOT EXISTS profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    name TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    email TEXT,
    phone TEXT,
    location TEXT,
    about TEXT,
    github_url TEXT,
    linkedin_url TEXT,

    -- Résumé link, written by the upload endpoint
    cv_filename TEXT,
    cv_url TEXT,

    language TEXT NOT NULL DEFAULT 'fr',
    theme TEXT NOT NULL DEFAULT 'auto',
    updated_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS skills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    level INTEGER NOT NULL DEFAULT 50,
    icon TEXT,
    color TEXT DEFAULT '#3B82F6',
    order_index INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    technologies TEXT,             -- free text, not a list
    github_url TEXT,
    live_url TEXT,
    featured INTEGER NOT NULL DEFAULT 0,
    order_index INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS education (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    degree TEXT NOT NULL,
    institution TEXT NOT NULL,
    location TEXT,
    start_date TEXT,               -- free text, never parsed
    end_date TEXT,
    description TEXT,
    gpa TEXT,
    honors TEXT,
    courses TEXT,                  -- JSON array of strings
    achievements TEXT,             -- JSON array of strings
    featured INTEGER NOT NULL DEFAULT 0,
    order_index INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_skills_order ON skills(order_index, id);
CREATE INDEX IF NOT EXISTS idx_projects_order ON projects(order_index, id);
CREATE INDEX IF NOT EXISTS idx_education_order ON education(order_index, id);
"#;
