use std::str::FromStr;

use chrono::{Datelike, NaiveDate, ParseError};
use serde::Deserialize;

/// A plain `YYYY-MM-DD` date written as a TOML local date.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TomlDate(pub NaiveDate);

impl TomlDate {
    /// Whole years elapsed between this date and `today`.
    pub fn years_until(&self, today: NaiveDate) -> i64 {
        let TomlDate(start) = *self;
        let mut years = (today.year() - start.year()) as i64;
        if (today.month(), today.day()) < (start.month(), start.day()) {
            years -= 1;
        }
        years.max(0)
    }

    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (today - self.0).num_days()
    }
}

impl<'de> Deserialize<'de> for TomlDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let value = toml::value::Datetime::deserialize(deserializer)?;
        let date = TomlDate::from_str(&value.to_string()).map_err(Error::custom)?;
        Ok(date)
    }
}

impl FromStr for TomlDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let naive = NaiveDate::from_str(s)?;
        Ok(Self(naive))
    }
}
