//! SQL schema for the Crewboard SQLite store.
//!
//! Executed at connection startup. Foreign keys must be switched on per
//! connection for the cascade rules to apply.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS construction_sites (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    manager       TEXT NOT NULL DEFAULT '',
    phone         TEXT,
    creation_date TEXT NOT NULL,   -- YYYY-MM-DD
    status        TEXT NOT NULL CHECK (status IN ('Active', 'Inactive'))
);

CREATE TABLE IF NOT EXISTS employees (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    surname       TEXT NOT NULL,
    employee_id   TEXT NOT NULL UNIQUE,
    creation_date TEXT NOT NULL,   -- YYYY-MM-DD
    status        TEXT NOT NULL CHECK (status IN ('Active', 'Inactive'))
);

CREATE TABLE IF NOT EXISTS assignments (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    site_id         INTEGER NOT NULL
                    REFERENCES construction_sites(id) ON DELETE CASCADE,
    employee_id     INTEGER NOT NULL
                    REFERENCES employees(id) ON DELETE CASCADE,
    assignment_date TEXT NOT NULL, -- YYYY-MM-DD HH:MM:SS
    UNIQUE (site_id, employee_id)
);

CREATE INDEX IF NOT EXISTS assignments_employee_idx ON assignments(employee_id);

PRAGMA user_version = 1;
";
