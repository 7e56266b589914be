// Participant directory abstraction
// The registry asks this interface who participants are and who holds a role

//! # Participant Directory
//!
//! Participants and roles are owned by the resourcing service, not by this
//! crate. The privilege registry only needs two questions answered:
//!
//! - does this participant id exist?
//! - who currently holds this role?
//!
//! [`ParticipantDirectory`] is that interface. Callers pass it into the
//! grant and decode operations explicitly, so nothing here depends on a
//! global directory instance.
//!
//! [`InMemoryDirectory`] is a simple implementation for tests, tooling and
//! the command-line inspector. It can be loaded from a JSON file:
//!
//! ```json
//! {
//!   "participants": [{ "id": "PA-1", "name": "Alice" }],
//!   "roles": [{ "id": "RO-1", "name": "Clerks", "members": ["PA-1"] }]
//! }
//! ```
//!
//! ## Rust Learning Notes:
//!
//! ### Trait Objects
//! The registry takes `&dyn ParticipantDirectory`, so any backend (an LDAP
//! adapter, a database, the in-memory map below) can be plugged in without
//! making the registry generic.
//!
//! ### `Send + Sync`
//! Loaded specifications are queried from many work-item handlers at once,
//! and the directory may be shared the same way.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, warn};

use crate::models::{Participant, ParticipantId, RoleId};
use crate::{PrivilegeError, Result};

/// Lookup interface onto the external participant/role directory.
///
/// Both lookups are infallible from the registry's point of view: an
/// unknown participant is `None` and an unknown role has no members.
pub trait ParticipantDirectory: Send + Sync {
    /// Resolve a participant by id
    fn participant(&self, id: &ParticipantId) -> Option<Participant>;

    /// Current members of a role; empty if the role is unknown
    fn role_members(&self, role: &RoleId) -> Vec<Participant>;
}

impl<T: ParticipantDirectory + ?Sized> ParticipantDirectory for std::sync::Arc<T> {
    fn participant(&self, id: &ParticipantId) -> Option<Participant> {
        (**self).participant(id)
    }

    fn role_members(&self, role: &RoleId) -> Vec<Participant> {
        (**self).role_members(role)
    }
}

#[derive(Debug, Clone, Default)]
struct RoleEntry {
    name: String,
    members: BTreeSet<ParticipantId>,
}

/// Directory held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    participants: HashMap<ParticipantId, Participant>,
    roles: HashMap<RoleId, RoleEntry>,
}

/// On-disk form of a directory
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DirectoryFile {
    #[serde(default)]
    pub participants: Vec<Participant>,

    #[serde(default)]
    pub roles: Vec<RoleRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: RoleId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub members: Vec<ParticipantId>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from its JSON form.
    ///
    /// Role members that are not listed as participants are dropped with a
    /// warning, so every role member can be resolved afterwards.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DirectoryFile = serde_json::from_str(json)?;
        Ok(Self::from_file(file))
    }

    /// Read and parse a JSON directory file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            PrivilegeError::Directory(format!("cannot read {}: {}", path.display(), e))
        })?;
        let directory = Self::from_json(&json)?;
        debug!(path = %path.display(), participants = directory.participant_count(),
            roles = directory.role_count(), "loaded directory");
        Ok(directory)
    }

    pub fn from_file(file: DirectoryFile) -> Self {
        let mut directory = Self::new();
        for participant in file.participants {
            directory.add_participant(participant);
        }
        for role in file.roles {
            directory.add_role(role.id.clone(), role.name);
            for member in &role.members {
                if !directory.add_role_member(&role.id, member) {
                    warn!(role = %role.id, participant = %member, "role member is not a known participant");
                }
            }
        }
        directory
    }

    /// Add or replace a participant
    pub fn add_participant(&mut self, participant: Participant) {
        self.participants.insert(participant.id.clone(), participant);
    }

    /// Remove a participant and its role memberships
    pub fn remove_participant(&mut self, id: &ParticipantId) -> Option<Participant> {
        for role in self.roles.values_mut() {
            role.members.remove(id);
        }
        self.participants.remove(id)
    }

    /// Declare a role; an existing role keeps its members
    pub fn add_role(&mut self, id: impl Into<RoleId>, name: impl Into<String>) {
        let entry = self.roles.entry(id.into()).or_default();
        entry.name = name.into();
    }

    /// Make a known participant a member of a role, declaring the role if needed.
    ///
    /// Returns `false` if the participant is unknown.
    pub fn add_role_member(&mut self, role: &RoleId, participant: &ParticipantId) -> bool {
        if !self.participants.contains_key(participant) {
            return false;
        }
        self.roles
            .entry(role.clone())
            .or_default()
            .members
            .insert(participant.clone());
        true
    }

    pub fn remove_role_member(&mut self, role: &RoleId, participant: &ParticipantId) -> bool {
        self.roles
            .get_mut(role)
            .map_or(false, |entry| entry.members.remove(participant))
    }

    pub fn role_name(&self, role: &RoleId) -> Option<&str> {
        self.roles.get(role).map(|entry| entry.name.as_str())
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}

impl ParticipantDirectory for InMemoryDirectory {
    fn participant(&self, id: &ParticipantId) -> Option<Participant> {
        self.participants.get(id).cloned()
    }

    fn role_members(&self, role: &RoleId) -> Vec<Participant> {
        self.roles
            .get(role)
            .map(|entry| {
                entry
                    .members
                    .iter()
                    .filter_map(|id| self.participants.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}
