use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Declares an opaque string identifier.
///
/// Identifiers are assigned by the editing surface and are only compared,
/// never interpreted. They serialize as bare strings.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse an identifier, rejecting empty or whitespace-only input.
            pub fn parse(id: &str) -> Result<Self, TypeError> {
                if id.trim().is_empty() {
                    return Err(TypeError::EmptyId { kind: $label });
                }
                Ok(Self(id.to_string()))
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identity of a targeting rule. Stable across edits.
    RuleId,
    "rule"
);

string_id!(
    /// Identity of a clause. Unique within its rule.
    ClauseId,
    "clause"
);

string_id!(
    /// Identity of one of a feature's variations.
    VariationId,
    "variation"
);

string_id!(
    /// Identity of a feature flag, used to key prerequisites.
    FeatureId,
    "feature"
);

string_id!(
    /// An end-user identifier pinned to a variation.
    UserId,
    "user"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_blank_ids() {
        assert_eq!(
            RuleId::parse("  "),
            Err(TypeError::EmptyId { kind: "rule" })
        );
        assert_eq!(
            UserId::parse(""),
            Err(TypeError::EmptyId { kind: "user" })
        );
    }

    #[test]
    fn parse_keeps_the_raw_value() {
        let id = ClauseId::parse("clause-1").unwrap();
        assert_eq!(id.as_str(), "clause-1");
    }

    #[test]
    fn display_and_debug() {
        let id = VariationId::new("v1");
        assert_eq!(id.to_string(), "v1");
        assert_eq!(format!("{id:?}"), "VariationId(v1)");
    }

    #[test]
    fn serializes_as_bare_string() {
        let id = FeatureId::from("checkout-v2");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"checkout-v2\"");
        let parsed: FeatureId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn ordering_follows_string_order() {
        assert!(RuleId::from("a") < RuleId::from("b"));
    }
}
