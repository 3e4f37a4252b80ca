//! Call record database schema.
//!
//! The `calls` table is keyed by the `UNIQUE` `call_sid` column. That
//! constraint is what rejects a second creation for the same call under
//! concurrent delivery.

use sqlx::migrate::Migrator;

/// Embedded migrations that create the `calls` table.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");
