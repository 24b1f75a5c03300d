//! Process-wide constants shared by the dump and restore engines

/// Migration-tracking tables maintained by ORMs and migration runners.
///
/// These are never dumped: restoring them would replay stale migration state
/// over the freshly migrated schema.
pub const EXCLUDED_TABLES: &[&str] = &[
    "_prisma_migrations",
    "__drizzle_migrations",
    "knex_migrations",
    "knex_migrations_lock",
    "typeorm_migrations",
    "SequelizeMeta",
    "SequelizeData",
    "mikro_orm_migrations",
    "objection_migrations",
    "_cf_KV",
];

/// Default directory for dumps, relative to the working directory.
pub const DEFAULT_DUMP_DIR: &str = "./db-backup";

/// Name of the manifest file inside a dump directory.
pub const METADATA_FILENAME: &str = "_metadata.json";

/// Extension of every file written into a dump directory.
pub const DUMP_FILE_EXTENSION: &str = "json";

/// Current dump format version.
pub const DUMP_FORMAT_VERSION: u32 = 1;

/// Maximum number of rows passed to a single upsert call.
pub const BATCH_SIZE: usize = 500;

/// Returns true when `table` is on the exclusion list.
pub fn is_excluded_table(table: &str) -> bool {
    EXCLUDED_TABLES.contains(&table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_tables() {
        assert!(is_excluded_table("_prisma_migrations"));
        assert!(is_excluded_table("SequelizeMeta"));
        assert!(!is_excluded_table("users"));
        // Matching is exact, not case-folded
        assert!(!is_excluded_table("sequelizemeta"));
    }

    #[test]
    fn test_constants() {
        assert_eq!(METADATA_FILENAME, "_metadata.json");
        assert_eq!(BATCH_SIZE, 500);
        assert_eq!(DUMP_FORMAT_VERSION, 1);
    }
}
