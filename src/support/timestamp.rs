// RFC 3339 timestamp flags.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat};

use super::flags::FlagValue;

/// Point in time given as RFC 3339 text; unset until the flag is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamp(Option<DateTime<FixedOffset>>);

impl Timestamp {
    pub fn time(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(time) => f.write_str(&time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => Ok(()),
        }
    }
}

impl FlagValue for Timestamp {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        let time = DateTime::parse_from_rfc3339(raw).map_err(|err| err.to_string())?;
        self.0 = Some(time);
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        "timestamp"
    }
}
