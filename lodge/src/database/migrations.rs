//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_AVAILABILITY_BOOKING_INDEX, CREATE_AVAILABILITY_TABLE, CREATE_BOOKINGS_GUEST_INDEX,
    CREATE_BOOKINGS_PROPERTY_INDEX, CREATE_BOOKINGS_TABLE, CREATE_METADATA_TABLE,
    CREATE_PROPERTIES_TABLE, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION,
    SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// All statements are idempotent, so two processes racing to initialize a
/// fresh database both succeed.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use lodge::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    conn.execute(CREATE_PROPERTIES_TABLE, [])?;
    conn.execute(CREATE_BOOKINGS_TABLE, [])?;
    conn.execute(CREATE_AVAILABILITY_TABLE, [])?;

    conn.execute(CREATE_AVAILABILITY_BOOKING_INDEX, [])?;
    conn.execute(CREATE_BOOKINGS_GUEST_INDEX, [])?;
    conn.execute(CREATE_BOOKINGS_PROPERTY_INDEX, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    log::info!("initialized database schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Gets the current schema version from the database.
///
/// Returns `Ok(0)` if the metadata table is missing or holds no version.
///
/// # Errors
///
/// Returns an error if the query fails for any other reason.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value.parse::<i32>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::SqliteFailure(ref err, Some(ref message)))
            if err.code == rusqlite::ErrorCode::Unknown && message.contains("no such table") =>
        {
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

/// Fails unless the database is at exactly the current schema version.
///
/// # Errors
///
/// Returns `UnsupportedSchemaVersion` on any mismatch, including an
/// uninitialized database.
pub fn verify_schema_version(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;
    if version == CURRENT_SCHEMA_VERSION {
        Ok(())
    } else {
        Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        })
    }
}

/// Checks schema compatibility and initializes a fresh database.
///
/// # Errors
///
/// Returns `UnsupportedSchemaVersion` if the stored version differs from the
/// current one, or any error from initialization.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    if get_schema_version(conn)? == 0 {
        initialize_schema(conn)?;
    }
    verify_schema_version(conn)
}
