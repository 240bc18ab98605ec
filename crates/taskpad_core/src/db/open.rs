//! Connection bootstrap.

use super::schema;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) the store file at `path`.
pub fn open_file(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    bootstrap(&path.display().to_string(), Connection::open(path))
}

/// Opens a private in-memory store; contents vanish with the connection.
pub fn open_memory() -> DbResult<Connection> {
    bootstrap(":memory:", Connection::open_in_memory())
}

fn bootstrap(target: &str, opened: rusqlite::Result<Connection>) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = opened
        .and_then(|conn| conn.busy_timeout(BUSY_TIMEOUT).map(|()| conn))
        .map_err(|source| DbError::Open {
            target: target.to_string(),
            source,
        })
        .and_then(|mut conn| schema::upgrade(&mut conn).map(|_| conn));

    let elapsed_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok target={target} duration_ms={elapsed_ms}"),
        Err(err) => error!(
            "event=db_open module=db status=error target={target} duration_ms={elapsed_ms} error={err}"
        ),
    }
    result
}
