// Enumerated string flags.
//
// Allowed lists include undocumented legacy spellings; help text only
// advertises the documented ones.

use std::collections::BTreeMap;
use std::fmt;

use super::flags::FlagValue;

/// Single value restricted to an allowed list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringEnum {
    pub allowed: Vec<String>,
    pub value: String,
    pub changed_from_default: bool,
}

impl StringEnum {
    pub fn new(allowed: &[&str], value: &str) -> Self {
        Self {
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
            value: value.to_string(),
            changed_from_default: false,
        }
    }
}

impl fmt::Display for StringEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FlagValue for StringEnum {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        if self.allowed.iter().any(|allowed| allowed == raw) {
            self.value = raw.to_string();
            self.changed_from_default = true;
            return Ok(());
        }
        Err(format!(
            "{raw} is not one of required values of {}",
            self.allowed.join(", ")
        ))
    }

    fn type_name(&self) -> &'static str {
        "string"
    }
}

/// Repeatable enum flag; matching is case-insensitive and the canonical
/// spelling is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringEnumArray {
    /// Lower-cased spelling -> canonical spelling
    pub allowed: BTreeMap<String, String>,
    pub values: Vec<String>,
}

impl StringEnumArray {
    pub fn new(allowed: &[&str], values: &[&str]) -> Self {
        Self {
            allowed: allowed
                .iter()
                .map(|s| (s.to_lowercase(), s.to_string()))
                .collect(),
            values: values.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Display for StringEnumArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.values.join(","))
    }
}

impl FlagValue for StringEnumArray {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        match self.allowed.get(&raw.to_lowercase()) {
            Some(canonical) => {
                self.values.push(canonical.clone());
                Ok(())
            }
            None => Err(format!(
                "invalid value: {raw}, allowed values are: {}",
                self.allowed.values().cloned().collect::<Vec<_>>().join(", ")
            )),
        }
    }

    fn type_name(&self) -> &'static str {
        "string"
    }
}
