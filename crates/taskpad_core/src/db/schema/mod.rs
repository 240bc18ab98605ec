//! Ordered schema steps for the key-value database.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(version, sql)`; versions start at 1 and increase by one.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_entries.sql"))];

/// Highest schema version this build can read and write.
pub const SUPPORTED_VERSION: u32 = STEPS.len() as u32;

pub fn read_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Brings `conn` up to `SUPPORTED_VERSION`. Returns how many steps ran.
///
/// All pending steps share one transaction, so a failing step leaves the
/// database at its previous version.
pub fn upgrade(conn: &mut Connection) -> DbResult<usize> {
    let found = read_version(conn)?;
    if found > SUPPORTED_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SUPPORTED_VERSION,
        });
    }

    let pending: Vec<_> = STEPS
        .iter()
        .filter(|(version, _)| *version > found)
        .collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for (version, sql) in &pending {
        tx.execute_batch(sql)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(|source| DbError::Migration {
                version: *version,
                source,
            })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from={found} to={SUPPORTED_VERSION} steps={}",
        pending.len()
    );
    Ok(pending.len())
}
