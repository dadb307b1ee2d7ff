// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timezone-qualified timestamp format shared by guide and schedule files
//!
//! Timestamps use the XMLTV layout `20261016203000 +0200`. Sub-second
//! instants carry a fraction (`20261016203002.300 +0200`); whole seconds are
//! written without one. The offset is kept as written so that a schedule
//! survives a load/persist round trip byte for byte.
//!
//! Usable as a serde `with` module:
//!
//! ```ignore
//! #[serde(with = "dvr_core::timestamp")]
//! start: DateTime<FixedOffset>,
//! ```

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Deserializer, Serializer};

/// Textual layout of persisted timestamps
pub const FORMAT: &str = "%Y%m%d%H%M%S%.f %z";

/// Parse a persisted timestamp
pub fn parse(text: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_str(text.trim(), FORMAT)
}

/// Render a timestamp in the persisted layout
pub fn format<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant.format(FORMAT).to_string()
}

/// Compact form without the separating space, used in file names
pub fn compact<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant.format("%Y%m%d%H%M%S%z").to_string()
}

/// Short wall-clock form (`20h30`) for console listings
pub fn hour_minute<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant.format("%Hh%M").to_string()
}

pub fn serialize<S>(instant: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(instant))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(|e| serde::de::Error::custom(format!("invalid timestamp {text:?}: {e}")))
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
