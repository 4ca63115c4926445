//! # Fixed Sample Values
//!
//! Literal placeholders emitted by the sample synthesizer and the
//! parameter presentation overrides. Nothing here is random or derived
//! from the clock, so two runs over the same documents produce the same
//! bytes.

use uuid::Uuid;

/// Canonical example UUID used for `format: uuid` strings and `id` parameters.
pub const CANONICAL_UUID: Uuid = Uuid::from_u128(0x123e4567_e89b_12d3_a456_426614174000);

/// Example address for `format: email`.
pub const EXAMPLE_EMAIL: &str = "builder@example.com";

/// Example instant for `format: date-time`.
pub const EXAMPLE_DATE_TIME: &str = "2025-11-06T12:00:00Z";

/// Example URL for `format: uri`.
pub const EXAMPLE_URI: &str = "https://api.example.com/resource/123";

/// Example ISO-8601 duration for `format: duration`.
pub const EXAMPLE_DURATION: &str = "PT1H";

/// String emitted when a string schema has neither a known format nor a pattern.
pub const PLACEHOLDER_STRING: &str = "string-value";

/// Opaque token rendered for pagination cursor parameters.
pub const CURSOR_TOKEN: &str = "opaqueCursor123";

/// Page size rendered for `limit` / `page_size` parameters.
pub const PAGE_SIZE: i64 = 25;

/// Fallback for a string-ish parameter whose schema synthesised to null.
pub const PARAMETER_PLACEHOLDER: &str = "example";

/// Hyphenated lower-case rendering of [`CANONICAL_UUID`].
pub fn canonical_uuid() -> String {
    CANONICAL_UUID.hyphenated().to_string()
}
