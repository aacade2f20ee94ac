use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids;

/// What a matching policy asks the Executor to do.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Alert,
    Delete,
    Tag,
    Stop,
    Archive,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Alert,
        Action::Delete,
        Action::Tag,
        Action::Stop,
        Action::Archive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Alert => ids::ACTION_ALERT,
            Action::Delete => ids::ACTION_DELETE,
            Action::Tag => ids::ACTION_TAG,
            Action::Stop => ids::ACTION_STOP,
            Action::Archive => ids::ACTION_ARCHIVE,
        }
    }

    /// Case-insensitive parse of a rule-file action name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Action::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_any_case() {
        assert_eq!(Action::parse("DELETE"), Some(Action::Delete));
        assert_eq!(Action::parse(" archive "), Some(Action::Archive));
        assert_eq!(Action::parse("nuke"), None);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Action::Stop).expect("serialize");
        assert_eq!(json, "\"stop\"");
        for a in Action::ALL {
            assert_eq!(Action::parse(a.as_str()), Some(a));
        }
    }
}
