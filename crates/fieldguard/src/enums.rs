// File: src/enums.rs
// Purpose: Fixed constant sets used as field choices

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Yes/No answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Wire values, usable as `FieldKind::Choice(YesNo::VALUES)`
    pub const VALUES: &'static [&'static str] = &["YES", "NO"];

    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "YES",
            YesNo::No => "NO",
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YesNo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YES" => Ok(YesNo::Yes),
            "NO" => Ok(YesNo::No),
            other => Err(format!("'{}' is not YES or NO", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_str() {
        for value in [YesNo::Yes, YesNo::No] {
            assert_eq!(value.as_str().parse::<YesNo>(), Ok(value));
        }
        assert!("yes".parse::<YesNo>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_values() {
        assert_eq!(serde_json::to_string(&YesNo::Yes).unwrap(), "\"YES\"");
        let parsed: YesNo = serde_json::from_str("\"NO\"").unwrap();
        assert_eq!(parsed, YesNo::No);
    }

    #[test]
    fn test_values_match_variants() {
        assert_eq!(YesNo::VALUES, &[YesNo::Yes.as_str(), YesNo::No.as_str()]);
    }
}
