//! Database schema definitions and SQL constants.

/// Current schema version, stored in the metadata table.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value metadata, including the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Properties registered by the property collaborator.
///
/// Prices are stored in minor units.
pub const CREATE_PROPERTIES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS properties (
        id TEXT PRIMARY KEY NOT NULL,
        owner_id TEXT NOT NULL,
        price INTEGER NOT NULL CHECK (price >= 0)
    )";

/// Bookings. `AUTOINCREMENT` keeps ids of deleted bookings from being reused.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        property_id TEXT NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
        guest_id TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('PENDING', 'CONFIRMED', 'CANCELLED')),
        total_price INTEGER NOT NULL CHECK (total_price >= 0),
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        CHECK (start_date <= end_date)
    )";

/// One row per property-day. Dates are `YYYY-MM-DD` text.
///
/// `booking_id` has no delete action: a booking cannot be deleted while it
/// still holds days.
pub const CREATE_AVAILABILITY_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS availability (
        property_id TEXT NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        is_available INTEGER NOT NULL CHECK (is_available IN (0, 1)),
        price INTEGER CHECK (price IS NULL OR price >= 0),
        booking_id INTEGER REFERENCES bookings(id),
        PRIMARY KEY (property_id, date),
        CHECK (is_available = 0 OR booking_id IS NULL)
    )";

/// Speeds up releasing a booking's days.
pub const CREATE_AVAILABILITY_BOOKING_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_availability_booking ON availability(booking_id)";

/// Speeds up listing a guest's bookings.
pub const CREATE_BOOKINGS_GUEST_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_guest ON bookings(guest_id)";

/// Speeds up listing a property's bookings.
pub const CREATE_BOOKINGS_PROPERTY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_property ON bookings(property_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
