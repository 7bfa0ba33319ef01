use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new id from its raw value.
            #[must_use]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value.
            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>().map($name::new).map_err(|_| ParseIdError {
                    kind: stringify!($name),
                })
            }
        }
    };
}

id_type!(
    /// Unique identifier for a user account.
    UserId
);
id_type!(
    /// Unique identifier for a training.
    TrainingId
);
id_type!(
    /// Unique identifier for a training assignment.
    AssignmentId
);
id_type!(
    /// Unique identifier for a team.
    TeamId
);
id_type!(
    /// Unique identifier for a technology tag.
    TechnologyId
);
id_type!(
    /// Unique identifier for a study material.
    MaterialId
);
id_type!(
    /// Unique identifier for a checklist progress record.
    ProgressId
);

/// Stable identifier for an instructor-supplied link.
///
/// The backend has no table for these links; progress records key them on a
/// client-derived string of the form `{assignment_id}_url_{index}`. The only
/// way to construct one is [`LinkId::derive`], so every id in the system uses
/// the same derivation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(String);

impl LinkId {
    /// Derives the id for the link at `index` within an assignment.
    #[must_use]
    pub fn derive(assignment_id: AssignmentId, index: usize) -> Self {
        Self(format!("{}_url_{index}", assignment_id.value()))
    }

    /// Wraps an id string that came back from the server unchanged.
    #[must_use]
    pub fn from_wire(raw: String) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinkId({})", self.0)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing an id from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_display_roundtrip() {
        let id = UserId::new(42);
        assert_eq!(id.to_string(), "42");
        let parsed: UserId = "42".parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn id_from_str_rejects_garbage() {
        assert!("not-a-number".parse::<TrainingId>().is_err());
    }

    #[test]
    fn link_id_derivation_is_stable() {
        let a = LinkId::derive(AssignmentId::new(7), 0);
        let b = LinkId::derive(AssignmentId::new(7), 0);
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "7_url_0");
    }

    #[test]
    fn link_id_distinguishes_index() {
        let a = LinkId::derive(AssignmentId::new(7), 0);
        let b = LinkId::derive(AssignmentId::new(7), 1);
        assert_ne!(a, b);
    }
}
