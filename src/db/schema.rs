pub const SCHEMA_VERSION: i32 = 1;

/// V1 schema: the notes table plus migration bookkeeping.
///
/// Timestamps are RFC 3339 text. `drawing` holds the flattened sketch as a
/// base64 PNG data URI; NULL means the note has no sketch (never an empty
/// image).
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    drawing TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
