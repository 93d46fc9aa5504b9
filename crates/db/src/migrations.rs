/// Inline SQL migrations for the levellog database schema.
///
/// Simple inline migrations rather than sqlx migration files — the schema
/// is small and self-contained.
pub const MIGRATIONS: &[&str] = &[
    // Migration 1: characters table
    r#"
CREATE TABLE IF NOT EXISTS characters (
    id         TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    world      TEXT NOT NULL,
    vocation   TEXT NOT NULL,
    category   TEXT NOT NULL DEFAULT '',
    created_at INTEGER
);
"#,
    // Migration 2: xp_logs table. One snapshot per character per day —
    // the composite primary key enforces it; ingestion upserts on conflict.
    r#"
CREATE TABLE IF NOT EXISTS xp_logs (
    character_id TEXT NOT NULL,
    date         TEXT NOT NULL,
    level        INTEGER NOT NULL DEFAULT 0 CHECK (level >= 0),
    xp           INTEGER NOT NULL DEFAULT 0 CHECK (xp >= 0),
    created_at   INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (character_id, date)
);
"#,
    // Migration 3: windowed ranking queries scan by date across characters
    r#"CREATE INDEX IF NOT EXISTS idx_xp_logs_date ON xp_logs(date);"#,
];
