//! Parsing and display of `name=value` / `name=~regex` matchers.

use std::fmt;
use std::str::FromStr;

use crate::error::CliError;
use crate::types::Matcher;

impl FromStr for Matcher {
    type Err = CliError;

    /// Splits on the first `=`. A value starting with `~` is a regex.
    ///
    /// Regex syntax is not checked here; the server validates it.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (name, value) = input
            .split_once('=')
            .ok_or_else(|| CliError::InvalidMatcher {
                input: input.to_string(),
                reason: "expected name=value or name=~regex".into(),
            })?;

        let (value, is_regex) = match value.strip_prefix('~') {
            Some(pattern) => (pattern, true),
            None => (value, false),
        };

        Ok(Self {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
            is_regex,
        })
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.is_regex { "=~" } else { "=" };
        write!(f, "{}{op}{}", self.name, self.value)
    }
}
