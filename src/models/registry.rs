// Task privilege registry - who may do what to a task's work items

//! # Privilege Registry
//!
//! A [`PrivilegeRegistry`] belongs to exactly one task and records, for each
//! of the seven [`PrivilegeKind`]s:
//!
//! - a set of granted participant ids
//! - an allow-all flag
//! - the role ids whose members were expanded into the grant set
//!
//! ## The Authorization Rule
//!
//! ```text
//! allowed = allow_all[kind] XOR (participant ∈ grants[kind])
//! ```
//!
//! With allow-all off the grant set is an **inclusion list**: only listed
//! participants may act. With allow-all on it becomes an **exclusion list**:
//! everyone may act except the listed participants. Allow-all is not an
//! override; a listed participant is denied when it is set.
//!
//! ## Role Origins
//!
//! Role ids are remembered only so that the `<role>` tags of the original
//! specification can be written back out. Authorization never looks at them.
//! Role membership is captured at expansion time, so if the directory changes
//! afterwards the grant set is stale until the specification is re-read.
//!
//! ## Rust Learning Notes:
//!
//! ### Fixed-Size Arrays Indexed by an Enum
//! `grants: [PrivilegeGrants; PrivilegeKind::COUNT]` always holds all seven
//! entries. Indexing with `kind.index()` can never go out of bounds because
//! `PrivilegeKind` only has seven variants.
//!
//! ### Read-Only Views
//! Query methods return iterators over borrowed data. Callers can look at
//! the sets but the borrow checker stops them from mutating the registry
//! behind the grant methods' back.
//!
//! ### `serde(from, into)`
//! The in-memory layout is an array, but JSON readers would rather see a map
//! keyed by privilege name. `RegistryRepr` is the wire shape and the
//! `From` impls convert between the two.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::participant::{Participant, ParticipantId, RoleId};
use super::privilege::PrivilegeKind;
use crate::directory::ParticipantDirectory;

/// Grants recorded for a single privilege kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeGrants {
    #[serde(default)]
    allow_all: bool,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    participants: BTreeSet<ParticipantId>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    roles: BTreeSet<RoleId>,
}

impl PrivilegeGrants {
    pub fn is_allow_all(&self) -> bool {
        self.allow_all
    }

    pub fn participants(&self) -> impl Iterator<Item = &ParticipantId> + '_ {
        self.participants.iter()
    }

    pub fn roles(&self) -> impl Iterator<Item = &RoleId> + '_ {
        self.roles.iter()
    }

    /// Anything worth writing out for this kind
    pub fn is_declared(&self) -> bool {
        self.allow_all || !self.participants.is_empty() || !self.roles.is_empty()
    }

    fn permits(&self, id: &ParticipantId) -> bool {
        self.allow_all ^ self.participants.contains(id)
    }

    fn insert_participant(&mut self, id: ParticipantId) -> bool {
        match normalize_id(id.0) {
            Some(id) => self.participants.insert(ParticipantId(id)),
            None => false,
        }
    }

    fn insert_role(&mut self, role: RoleId) -> bool {
        match normalize_id(role.0) {
            Some(role) => self.roles.insert(RoleId(role)),
            None => false,
        }
    }
}

/// Ids are stored trimmed, the same form the XML decoder produces; blank ids are rejected
fn normalize_id(id: String) -> Option<String> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == id.len() {
        Some(id)
    } else {
        Some(trimmed.to_string())
    }
}

/// The privileges of one workflow task.
///
/// Starts out denying every privilege to everyone. It is mutated while a
/// specification is authored or loaded, and after that is only queried, so
/// a loaded registry is typically shared behind an `Arc`.
///
/// ```rust
/// use yawl_privileges::{PrivilegeKind, PrivilegeRegistry};
///
/// let mut privileges = PrivilegeRegistry::new("approve_invoice");
///
/// // Inclusion: only alice may delegate
/// privileges.grant_unchecked(PrivilegeKind::CanDelegate, "alice");
/// assert!(privileges.authorize(PrivilegeKind::CanDelegate, &"alice".into()));
/// assert!(!privileges.authorize(PrivilegeKind::CanDelegate, &"bob".into()));
///
/// // Exclusion: everyone but carol may pile
/// privileges.allow_all(PrivilegeKind::CanPile);
/// privileges.grant_unchecked(PrivilegeKind::CanPile, "carol");
/// assert!(!privileges.authorize(PrivilegeKind::CanPile, &"carol".into()));
/// assert!(privileges.authorize(PrivilegeKind::CanPile, &"dave".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RegistryRepr", into = "RegistryRepr")]
pub struct PrivilegeRegistry {
    owner_task_id: String,
    grants: [PrivilegeGrants; PrivilegeKind::COUNT],
}

impl PrivilegeRegistry {
    /// Create an empty registry for the given task
    pub fn new(owner_task_id: impl Into<String>) -> Self {
        PrivilegeRegistry {
            owner_task_id: owner_task_id.into(),
            grants: Default::default(),
        }
    }

    pub fn owner_task_id(&self) -> &str {
        &self.owner_task_id
    }

    pub fn set_owner_task_id(&mut self, owner_task_id: impl Into<String>) {
        self.owner_task_id = owner_task_id.into();
    }

    /// All grants recorded for a kind
    pub fn grants(&self, kind: PrivilegeKind) -> &PrivilegeGrants {
        &self.grants[kind.index()]
    }

    fn grants_mut(&mut self, kind: PrivilegeKind) -> &mut PrivilegeGrants {
        &mut self.grants[kind.index()]
    }

    // ---- granting -------------------------------------------------------

    /// Grant a privilege to a participant the directory knows about.
    ///
    /// Ids the directory cannot resolve are silently skipped. Returns whether
    /// the id resolved.
    pub fn grant(
        &mut self,
        kind: PrivilegeKind,
        id: &ParticipantId,
        directory: &dyn ParticipantDirectory,
    ) -> bool {
        match directory.participant(id) {
            Some(participant) => {
                self.grant_participant(kind, &participant);
                true
            }
            None => {
                debug!(task = %self.owner_task_id, privilege = %kind, participant = %id,
                    "participant not in directory, grant skipped");
                false
            }
        }
    }

    /// Grant a privilege to an already resolved participant.
    ///
    /// Returns `true` if the participant was not already in the grant set.
    pub fn grant_participant(&mut self, kind: PrivilegeKind, participant: &Participant) -> bool {
        self.grants_mut(kind).insert_participant(participant.id.clone())
    }

    /// Grant a privilege without asking the directory whether the id exists.
    ///
    /// For tooling that writes specifications before the directory is
    /// populated. Surrounding whitespace is trimmed and blank ids are ignored.
    /// Returns `true` if the id was newly added.
    pub fn grant_unchecked(&mut self, kind: PrivilegeKind, id: impl Into<ParticipantId>) -> bool {
        self.grants_mut(kind).insert_participant(id.into())
    }

    /// Bulk version of [`grant`](Self::grant). Returns how many ids resolved.
    pub fn grant_all<'a, I>(
        &mut self,
        kind: PrivilegeKind,
        ids: I,
        directory: &dyn ParticipantDirectory,
    ) -> usize
    where
        I: IntoIterator<Item = &'a ParticipantId>,
    {
        ids.into_iter()
            .filter(|id| self.grant(kind, id, directory))
            .count()
    }

    /// Bulk version of [`grant_unchecked`](Self::grant_unchecked)
    pub fn grant_all_unchecked<I, T>(&mut self, kind: PrivilegeKind, ids: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<ParticipantId>,
    {
        let grants = self.grants_mut(kind);
        for id in ids {
            grants.insert_participant(id.into());
        }
    }

    /// Bulk version of [`grant_participant`](Self::grant_participant)
    pub fn grant_participants<'a, I>(&mut self, kind: PrivilegeKind, participants: I)
    where
        I: IntoIterator<Item = &'a Participant>,
    {
        let grants = self.grants_mut(kind);
        for participant in participants {
            grants.insert_participant(participant.id.clone());
        }
    }

    /// Grant a privilege to every current member of a role.
    ///
    /// The role id is remembered for serialization even when the directory
    /// reports no members for it. Returns the number of members expanded.
    pub fn grant_role(
        &mut self,
        kind: PrivilegeKind,
        role: &RoleId,
        directory: &dyn ParticipantDirectory,
    ) -> usize {
        let members = directory.role_members(role);
        debug!(task = %self.owner_task_id, privilege = %kind, role = %role,
            members = members.len(), "expanding role");

        self.grant_participants(kind, &members);
        self.add_role_unchecked(kind, role.clone());
        members.len()
    }

    /// Record a role id without expanding its members; blank ids are ignored
    pub fn add_role_unchecked(&mut self, kind: PrivilegeKind, role: impl Into<RoleId>) {
        self.grants_mut(kind).insert_role(role.into());
    }

    pub fn set_allow_all(&mut self, kind: PrivilegeKind, enabled: bool) {
        self.grants_mut(kind).allow_all = enabled;
    }

    /// Turn the grant set for `kind` into an exclusion list
    pub fn allow_all(&mut self, kind: PrivilegeKind) {
        self.set_allow_all(kind, true);
    }

    /// Turn the grant set for `kind` back into an inclusion list
    pub fn disallow_all(&mut self, kind: PrivilegeKind) {
        self.set_allow_all(kind, false);
    }

    // ---- querying -------------------------------------------------------

    /// Decide whether a participant holds a privilege.
    ///
    /// `allow_all XOR member`: see the module docs.
    pub fn authorize(&self, kind: PrivilegeKind, id: &ParticipantId) -> bool {
        self.grants(kind).permits(id)
    }

    pub fn authorize_participant(&self, kind: PrivilegeKind, participant: &Participant) -> bool {
        self.authorize(kind, &participant.id)
    }

    pub fn is_allow_all(&self, kind: PrivilegeKind) -> bool {
        self.grants(kind).allow_all
    }

    /// True if at least one participant is in the grant set
    pub fn has_any_grant(&self, kind: PrivilegeKind) -> bool {
        !self.grants(kind).participants.is_empty()
    }

    /// True if at least one role id was recorded
    pub fn has_roles(&self, kind: PrivilegeKind) -> bool {
        !self.grants(kind).roles.is_empty()
    }

    pub fn is_declared(&self, kind: PrivilegeKind) -> bool {
        self.grants(kind).is_declared()
    }

    pub fn participants(&self, kind: PrivilegeKind) -> impl Iterator<Item = &ParticipantId> + '_ {
        self.grants(kind).participants()
    }

    pub fn roles(&self, kind: PrivilegeKind) -> impl Iterator<Item = &RoleId> + '_ {
        self.grants(kind).roles()
    }

    /// Every kind the participant is authorized for, in ordinal order
    pub fn granted_kinds(&self, id: &ParticipantId) -> Vec<PrivilegeKind> {
        PrivilegeKind::ALL
            .into_iter()
            .filter(|kind| self.authorize(*kind, id))
            .collect()
    }

    /// Kinds carrying any allow-all flag, grant or role, in ordinal order
    pub fn declared_kinds(&self) -> Vec<PrivilegeKind> {
        PrivilegeKind::ALL
            .into_iter()
            .filter(|kind| self.is_declared(*kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.iter().all(|grants| !grants.is_declared())
    }
}

/// JSON shape of a registry: only declared kinds, keyed by canonical name
#[derive(Serialize, Deserialize)]
struct RegistryRepr {
    #[serde(default)]
    owner_task_id: String,

    #[serde(default)]
    privileges: BTreeMap<PrivilegeKind, PrivilegeGrants>,
}

impl From<RegistryRepr> for PrivilegeRegistry {
    fn from(repr: RegistryRepr) -> Self {
        let mut registry = PrivilegeRegistry::new(repr.owner_task_id);
        for (kind, grants) in repr.privileges {
            let target = registry.grants_mut(kind);
            target.allow_all = grants.allow_all;
            for id in grants.participants {
                target.insert_participant(id);
            }
            for role in grants.roles {
                target.insert_role(role);
            }
        }
        registry
    }
}

impl From<PrivilegeRegistry> for RegistryRepr {
    fn from(registry: PrivilegeRegistry) -> Self {
        let privileges = PrivilegeKind::ALL
            .into_iter()
            .zip(registry.grants)
            .filter(|(_, grants)| grants.is_declared())
            .collect();

        RegistryRepr {
            owner_task_id: registry.owner_task_id,
            privileges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use proptest::prelude::*;

    fn pid(id: &str) -> ParticipantId {
        ParticipantId::from(id)
    }

    fn test_directory() -> InMemoryDirectory {
        let mut directory = InMemoryDirectory::new();
        directory.add_participant(Participant::new("alice", "Alice"));
        directory.add_participant(Participant::new("bob", "Bob"));
        directory.add_participant(Participant::new("carol", "Carol"));
        directory.add_role("reviewers", "Reviewers");
        directory.add_role_member(&RoleId::from("reviewers"), &pid("alice"));
        directory.add_role_member(&RoleId::from("reviewers"), &pid("bob"));
        directory
    }

    #[test]
    fn test_new_registry_denies_everything() {
        let registry = PrivilegeRegistry::new("task_1");

        assert_eq!(registry.owner_task_id(), "task_1");
        assert!(registry.is_empty());
        for kind in PrivilegeKind::ALL {
            assert!(!registry.authorize(kind, &pid("alice")));
            assert!(!registry.is_allow_all(kind));
            assert!(!registry.has_any_grant(kind));
        }
    }

    #[test]
    fn test_owner_can_be_set_after_construction() {
        let mut registry = PrivilegeRegistry::default();
        assert_eq!(registry.owner_task_id(), "");

        registry.set_owner_task_id("late_bound");
        assert_eq!(registry.owner_task_id(), "late_bound");
    }

    #[test]
    fn test_inclusion_semantics() {
        let mut registry = PrivilegeRegistry::new("t");
        registry.grant_unchecked(PrivilegeKind::CanDelegate, "alice");

        assert!(registry.authorize(PrivilegeKind::CanDelegate, &pid("alice")));
        assert!(!registry.authorize(PrivilegeKind::CanDelegate, &pid("bob")));
    }

    #[test]
    fn test_exclusion_semantics() {
        let mut registry = PrivilegeRegistry::new("t");
        registry.allow_all(PrivilegeKind::CanPile);
        assert!(registry.authorize(PrivilegeKind::CanPile, &pid("carol")));

        registry.grant_unchecked(PrivilegeKind::CanPile, "carol");
        assert!(!registry.authorize(PrivilegeKind::CanPile, &pid("carol")));
        assert!(registry.authorize(PrivilegeKind::CanPile, &pid("dave")));

        // Back to inclusion: carol is now the only one allowed
        registry.disallow_all(PrivilegeKind::CanPile);
        assert!(registry.authorize(PrivilegeKind::CanPile, &pid("carol")));
        assert!(!registry.authorize(PrivilegeKind::CanPile, &pid("dave")));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut registry = PrivilegeRegistry::new("t");
        registry.allow_all(PrivilegeKind::CanSkip);
        registry.grant_unchecked(PrivilegeKind::CanSuspend, "alice");

        assert!(registry.authorize(PrivilegeKind::CanSkip, &pid("alice")));
        assert!(registry.authorize(PrivilegeKind::CanSuspend, &pid("alice")));
        assert!(!registry.authorize(PrivilegeKind::CanSuspend, &pid("bob")));
        assert!(!registry.authorize(PrivilegeKind::CanDeallocate, &pid("alice")));
        assert_eq!(
            registry.declared_kinds(),
            vec![PrivilegeKind::CanSuspend, PrivilegeKind::CanSkip]
        );
    }

    #[test]
    fn test_checked_grant_skips_unknown_participants() {
        let directory = test_directory();
        let mut registry = PrivilegeRegistry::new("t");

        assert!(registry.grant(PrivilegeKind::CanSuspend, &pid("alice"), &directory));
        assert!(!registry.grant(PrivilegeKind::CanSuspend, &pid("mallory"), &directory));

        assert!(registry.authorize(PrivilegeKind::CanSuspend, &pid("alice")));
        assert!(!registry.authorize(PrivilegeKind::CanSuspend, &pid("mallory")));
        assert_eq!(registry.participants(PrivilegeKind::CanSuspend).count(), 1);
    }

    #[test]
    fn test_unchecked_grant_accepts_unknown_participants() {
        let mut registry = PrivilegeRegistry::new("t");
        registry.grant_unchecked(PrivilegeKind::CanSuspend, "not-yet-hired");

        assert!(registry.authorize(PrivilegeKind::CanSuspend, &pid("not-yet-hired")));
    }

    #[test]
    fn test_unchecked_ids_are_trimmed_and_blanks_ignored() {
        let mut registry = PrivilegeRegistry::new("t");

        assert!(registry.grant_unchecked(PrivilegeKind::CanSkip, " alice "));
        assert!(!registry.grant_unchecked(PrivilegeKind::CanSkip, "alice"));
        assert!(!registry.grant_unchecked(PrivilegeKind::CanSuspend, ""));
        assert!(!registry.grant_unchecked(PrivilegeKind::CanSuspend, "   "));
        registry.grant_all_unchecked(PrivilegeKind::CanPile, ["\tbob\n", " "]);
        registry.add_role_unchecked(PrivilegeKind::CanDelegate, " managers ");
        registry.add_role_unchecked(PrivilegeKind::CanDelegate, "");

        assert!(registry.authorize(PrivilegeKind::CanSkip, &pid("alice")));
        assert!(!registry.has_any_grant(PrivilegeKind::CanSuspend));
        assert!(!registry.is_declared(PrivilegeKind::CanSuspend));
        let piled: Vec<&str> = registry.participants(PrivilegeKind::CanPile).map(ParticipantId::as_str).collect();
        assert_eq!(piled, vec!["bob"]);
        let roles: Vec<&str> = registry.roles(PrivilegeKind::CanDelegate).map(RoleId::as_str).collect();
        assert_eq!(roles, vec!["managers"]);
    }

    #[test]
    fn test_json_ids_are_normalized() {
        let json = serde_json::json!({
            "owner_task_id": "t",
            "privileges": { "canSkip": { "participants": [" alice ", ""], "roles": [" R "] } }
        });

        let registry: PrivilegeRegistry = serde_json::from_value(json).unwrap();
        assert!(registry.authorize(PrivilegeKind::CanSkip, &pid("alice")));
        assert_eq!(registry.participants(PrivilegeKind::CanSkip).count(), 1);
        assert_eq!(registry.roles(PrivilegeKind::CanSkip).map(RoleId::as_str).collect::<Vec<_>>(), vec!["R"]);
    }

    #[test]
    fn test_bulk_grants() {
        let directory = test_directory();
        let mut registry = PrivilegeRegistry::new("t");

        let ids = vec![pid("alice"), pid("ghost"), pid("bob"), pid("alice")];
        let resolved = registry.grant_all(PrivilegeKind::CanDeallocate, &ids, &directory);
        assert_eq!(resolved, 3);
        assert_eq!(registry.participants(PrivilegeKind::CanDeallocate).count(), 2);

        registry.grant_all_unchecked(PrivilegeKind::CanSkip, ["x", "y", "x"]);
        assert_eq!(registry.participants(PrivilegeKind::CanSkip).count(), 2);

        let people = [Participant::new("carol", "Carol"), Participant::with_id("dave")];
        registry.grant_participants(PrivilegeKind::CanPile, &people);
        assert!(registry.authorize(PrivilegeKind::CanPile, &pid("dave")));
    }

    #[test]
    fn test_grant_is_idempotent() {
        let directory = test_directory();
        let mut registry = PrivilegeRegistry::new("t");

        registry.grant(PrivilegeKind::CanDelegate, &pid("bob"), &directory);
        registry.grant(PrivilegeKind::CanDelegate, &pid("bob"), &directory);
        assert!(!registry.grant_unchecked(PrivilegeKind::CanDelegate, "bob"));

        assert_eq!(registry.participants(PrivilegeKind::CanDelegate).count(), 1);
    }

    #[test]
    fn test_role_expansion() {
        let directory = test_directory();
        let mut registry = PrivilegeRegistry::new("t");

        let expanded = registry.grant_role(PrivilegeKind::CanSkip, &RoleId::from("reviewers"), &directory);
        assert_eq!(expanded, 2);

        assert!(registry.authorize(PrivilegeKind::CanSkip, &pid("alice")));
        assert!(registry.authorize(PrivilegeKind::CanSkip, &pid("bob")));
        assert!(!registry.authorize(PrivilegeKind::CanSkip, &pid("carol")));
        assert!(registry.has_roles(PrivilegeKind::CanSkip));
        assert_eq!(
            registry.roles(PrivilegeKind::CanSkip).collect::<Vec<_>>(),
            vec![&RoleId::from("reviewers")]
        );
    }

    #[test]
    fn test_unknown_role_is_still_recorded() {
        let directory = test_directory();
        let mut registry = PrivilegeRegistry::new("t");

        let expanded = registry.grant_role(PrivilegeKind::CanSkip, &RoleId::from("auditors"), &directory);
        assert_eq!(expanded, 0);
        assert!(!registry.has_any_grant(PrivilegeKind::CanSkip));
        assert!(registry.has_roles(PrivilegeKind::CanSkip));
        assert!(registry.is_declared(PrivilegeKind::CanSkip));
    }

    #[test]
    fn test_role_expansion_is_a_snapshot() {
        let mut directory = test_directory();
        let mut registry = PrivilegeRegistry::new("t");
        let reviewers = RoleId::from("reviewers");

        registry.grant_role(PrivilegeKind::CanSkip, &reviewers, &directory);

        // Membership changes afterwards do not reach the registry
        directory.add_role_member(&reviewers, &pid("carol"));
        directory.remove_role_member(&reviewers, &pid("bob"));

        assert!(!registry.authorize(PrivilegeKind::CanSkip, &pid("carol")));
        assert!(registry.authorize(PrivilegeKind::CanSkip, &pid("bob")));
    }

    #[test]
    fn test_role_expansion_respects_allow_all() {
        let directory = test_directory();
        let mut registry = PrivilegeRegistry::new("t");
        registry.allow_all(PrivilegeKind::CanReallocateStateful);
        registry.grant_role(PrivilegeKind::CanReallocateStateful, &RoleId::from("reviewers"), &directory);

        // Role members become exclusions
        assert!(!registry.authorize(PrivilegeKind::CanReallocateStateful, &pid("alice")));
        assert!(registry.authorize(PrivilegeKind::CanReallocateStateful, &pid("carol")));
    }

    #[test]
    fn test_granted_kinds() {
        let mut registry = PrivilegeRegistry::new("t");
        registry.grant_unchecked(PrivilegeKind::CanSuspend, "alice");
        registry.allow_all(PrivilegeKind::CanPile);
        registry.grant_unchecked(PrivilegeKind::CanPile, "bob");

        assert_eq!(
            registry.granted_kinds(&pid("alice")),
            vec![PrivilegeKind::CanSuspend, PrivilegeKind::CanPile]
        );
        assert!(registry.granted_kinds(&pid("bob")).is_empty());
    }

    #[test]
    fn test_json_shape_is_keyed_by_privilege_name() {
        let mut registry = PrivilegeRegistry::new("review");
        registry.allow_all(PrivilegeKind::CanSkip);
        registry.grant_unchecked(PrivilegeKind::CanSkip, "bob");
        registry.add_role_unchecked(PrivilegeKind::CanDelegate, "managers");

        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["owner_task_id"], "review");
        assert_eq!(json["privileges"]["canSkip"]["allow_all"], true);
        assert_eq!(json["privileges"]["canSkip"]["participants"][0], "bob");
        assert_eq!(json["privileges"]["canDelegate"]["roles"][0], "managers");
        assert!(json["privileges"].get("canSuspend").is_none());

        let restored: PrivilegeRegistry = serde_json::from_value(json).unwrap();
        assert_eq!(restored, registry);
    }

    proptest! {
        #[test]
        fn property_authorize_is_allow_all_xor_membership(
            allow_all in any::<bool>(),
            granted in proptest::collection::btree_set("[a-e]", 0..5),
            probe in "[a-e]",
            kind_index in 0..PrivilegeKind::COUNT,
        ) {
            let kind = PrivilegeKind::ALL[kind_index];
            let mut registry = PrivilegeRegistry::new("prop");
            registry.set_allow_all(kind, allow_all);
            registry.grant_all_unchecked(kind, granted.iter().cloned());

            let expected = allow_all ^ granted.contains(&probe);
            prop_assert_eq!(registry.authorize(kind, &ParticipantId::from(probe.as_str())), expected);

            for other in PrivilegeKind::ALL.into_iter().filter(|k| *k != kind) {
                prop_assert!(!registry.authorize(other, &ParticipantId::from(probe.as_str())));
            }
        }
    }
}
