//! Date parsing and presentation for the ISO dates carried by the indexes.

use time::{Date, Month, format_description::FormatItem, macros::format_description};

const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse an ISO `YYYY-MM-DD` string. Malformed input yields `None` so a
/// single bad record cannot poison a whole index.
pub fn parse_iso(value: &str) -> Option<Date> {
    Date::parse(value.trim(), ISO_DATE).ok()
}

/// German long form, e.g. `27. November 2025`.
pub fn german_long(date: Date) -> String {
    format!(
        "{}. {} {}",
        date.day(),
        german_month(date.month()),
        date.year()
    )
}

/// Formats an optional date, rendering missing dates as an empty string the
/// way the site's meta line does.
pub fn german_long_opt(date: Option<Date>) -> String {
    date.map(german_long).unwrap_or_default()
}

fn german_month(month: Month) -> &'static str {
    match month {
        Month::January => "Januar",
        Month::February => "Februar",
        Month::March => "März",
        Month::April => "April",
        Month::May => "Mai",
        Month::June => "Juni",
        Month::July => "Juli",
        Month::August => "August",
        Month::September => "September",
        Month::October => "Oktober",
        Month::November => "November",
        Month::December => "Dezember",
    }
}

/// Serde helper for the optional ISO date fields on posts and pages.
pub mod iso_date_option {
    use serde::{Deserialize, Deserializer};
    use time::Date;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_iso))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_iso("2025-11-27"), Some(date!(2025 - 11 - 27)));
        assert_eq!(parse_iso(" 2025-11-27 "), Some(date!(2025 - 11 - 27)));
        assert_eq!(parse_iso("27.11.2025"), None);
        assert_eq!(parse_iso(""), None);
    }

    #[test]
    fn formats_german_long_dates() {
        assert_eq!(german_long(date!(2025 - 11 - 27)), "27. November 2025");
        assert_eq!(german_long(date!(2024 - 03 - 01)), "1. März 2024");
    }

    #[test]
    fn missing_date_renders_empty() {
        assert_eq!(german_long_opt(None), "");
    }
}
