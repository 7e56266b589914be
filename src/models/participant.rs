// Participant and role identities

//! # Participant Models
//!
//! Identities the privilege registry works with. The directory that knows
//! who these people are lives outside this crate (see [`crate::directory`]);
//! here they are just opaque, comparable identifiers.
//!
//! - [`ParticipantId`]: identifies one human actor
//! - [`RoleId`]: identifies a named group of participants
//! - [`Participant`]: a resolved directory entry

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier of an individual participant
///
/// ```rust
/// # use yawl_privileges::ParticipantId;
/// let id = ParticipantId::from("PA-1001");
/// assert_eq!(id.as_str(), "PA-1001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        ParticipantId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        ParticipantId(s.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        ParticipantId(s)
    }
}

impl From<&ParticipantId> for ParticipantId {
    fn from(id: &ParticipantId) -> Self {
        id.clone()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Identifier of an organisational role
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

impl RoleId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        RoleId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoleId {
    fn from(s: &str) -> Self {
        RoleId(s.to_string())
    }
}

impl From<String> for RoleId {
    fn from(s: String) -> Self {
        RoleId(s)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A participant as returned by the directory.
///
/// Two `Participant` values are the same participant when their ids match;
/// the display name plays no part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,

    #[serde(default)]
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }

    /// A participant known only by id, as authoring tools create them
    pub fn with_id(id: impl Into<ParticipantId>) -> Self {
        Self::new(id, String::new())
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
