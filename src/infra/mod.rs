//! Infrastructure: HTTP fetching, telemetry, and the preference file.

pub mod error;
pub mod http;
pub mod prefs;
pub mod telemetry;
