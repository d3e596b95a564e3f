//! Embedded SQL migrations
//!
//! Migrations are embedded at compile time using include_str!

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// Get all embedded migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_runs_revisions",
            sql: include_str!("../../migrations/001_runs_revisions.sql"),
        },
        Migration {
            id: "002_snapshots",
            sql: include_str!("../../migrations/002_snapshots.sql"),
        },
        Migration {
            id: "003_diffs_amendments",
            sql: include_str!("../../migrations/003_diffs_amendments.sql"),
        },
    ]
}
