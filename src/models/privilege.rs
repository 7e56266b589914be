// Privilege kinds - the fixed set of user-task privileges

//! # Privilege Kinds
//!
//! A task's privileges control which participants may perform privileged
//! operations on the work items created from that task. There are exactly
//! seven of them and the set is closed:
//!
//! | Kind | Canonical name | Operation |
//! |------|----------------|-----------|
//! | [`PrivilegeKind::CanSuspend`] | `canSuspend` | suspend a started work item |
//! | [`PrivilegeKind::CanReallocateStateless`] | `canReallocateStateless` | hand a work item to someone else, discarding its data |
//! | [`PrivilegeKind::CanReallocateStateful`] | `canReallocateStateful` | hand a work item to someone else, keeping its data |
//! | [`PrivilegeKind::CanDeallocate`] | `canDeallocate` | give an allocated work item back |
//! | [`PrivilegeKind::CanDelegate`] | `canDelegate` | pass an allocated work item to a subordinate |
//! | [`PrivilegeKind::CanSkip`] | `canSkip` | complete a work item without executing it |
//! | [`PrivilegeKind::CanPile`] | `canPile` | queue every future instance of the task to oneself |
//!
//! ## Rust Learning Notes:
//!
//! ### Closed Enums Instead of Integer Codes
//! Each kind is an enum variant, so an out-of-range privilege simply cannot
//! be constructed. `kind as usize` gives a dense index (0..7) that the
//! registry uses to address its per-kind storage without any bounds worry.
//!
//! ### Strings Only at the Edges
//! The canonical names exist for the XML and JSON boundaries. Everything
//! inside the crate works with `PrivilegeKind` values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PrivilegeError;

/// One of the seven user-task privileges.
///
/// The declaration order is the ordinal order used for iteration and for
/// the order of `<privilege>` blocks in serialized XML.
///
/// ```rust
/// use yawl_privileges::PrivilegeKind;
///
/// assert_eq!(PrivilegeKind::CanPile.name(), "canPile");
/// assert_eq!(PrivilegeKind::from_name("CANPILE"), Some(PrivilegeKind::CanPile));
/// assert_eq!(PrivilegeKind::from_name("canFly"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrivilegeKind {
    CanSuspend,
    CanReallocateStateless,
    CanReallocateStateful,
    CanDeallocate,
    CanDelegate,
    CanSkip,
    CanPile,
}

impl PrivilegeKind {
    /// Number of privilege kinds
    pub const COUNT: usize = 7;

    /// Every kind, in ordinal order
    pub const ALL: [PrivilegeKind; Self::COUNT] = [
        PrivilegeKind::CanSuspend,
        PrivilegeKind::CanReallocateStateless,
        PrivilegeKind::CanReallocateStateful,
        PrivilegeKind::CanDeallocate,
        PrivilegeKind::CanDelegate,
        PrivilegeKind::CanSkip,
        PrivilegeKind::CanPile,
    ];

    /// Dense index of this kind, always `< COUNT`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical name as written in specification XML
    pub fn name(self) -> &'static str {
        match self {
            PrivilegeKind::CanSuspend => "canSuspend",
            PrivilegeKind::CanReallocateStateless => "canReallocateStateless",
            PrivilegeKind::CanReallocateStateful => "canReallocateStateful",
            PrivilegeKind::CanDeallocate => "canDeallocate",
            PrivilegeKind::CanDelegate => "canDelegate",
            PrivilegeKind::CanSkip => "canSkip",
            PrivilegeKind::CanPile => "canPile",
        }
    }

    /// Resolve a privilege name, ignoring ASCII case and surrounding whitespace.
    ///
    /// Returns `None` for anything that is not one of the seven names. This is
    /// the lenient entry point used when reading specification documents, where
    /// a miss means "ignore this block" rather than an error.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Short human-readable description of the operation this kind governs
    pub fn description(self) -> &'static str {
        match self {
            PrivilegeKind::CanSuspend => "suspend a work item",
            PrivilegeKind::CanReallocateStateless => "reallocate a work item, discarding its data",
            PrivilegeKind::CanReallocateStateful => "reallocate a work item, keeping its data",
            PrivilegeKind::CanDeallocate => "deallocate a work item",
            PrivilegeKind::CanDelegate => "delegate a work item",
            PrivilegeKind::CanSkip => "skip a work item",
            PrivilegeKind::CanPile => "pile all instances of the task",
        }
    }
}

impl fmt::Display for PrivilegeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Strict parsing for interactive callers: a miss is an error, not a no-op.
impl FromStr for PrivilegeKind {
    type Err = PrivilegeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PrivilegeError::UnknownPrivilege(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense_and_ordered() {
        for (position, kind) in PrivilegeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
        assert!(PrivilegeKind::CanSuspend < PrivilegeKind::CanPile);
    }

    #[test]
    fn test_name_lookup_ignores_case_and_whitespace() {
        for kind in PrivilegeKind::ALL {
            assert_eq!(PrivilegeKind::from_name(kind.name()), Some(kind));
            assert_eq!(PrivilegeKind::from_name(&kind.name().to_uppercase()), Some(kind));
        }
        assert_eq!(
            PrivilegeKind::from_name("  canReallocateStateful\n"),
            Some(PrivilegeKind::CanReallocateStateful)
        );
        assert_eq!(PrivilegeKind::from_name(""), None);
        assert_eq!(PrivilegeKind::from_name("canReallocate"), None);
    }

    #[test]
    fn test_strict_parse_reports_unknown_name() {
        assert_eq!("canskip".parse::<PrivilegeKind>().ok(), Some(PrivilegeKind::CanSkip));

        let err = "canTeleport".parse::<PrivilegeKind>().unwrap_err();
        assert!(matches!(err, PrivilegeError::UnknownPrivilege(ref name) if name == "canTeleport"));
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&PrivilegeKind::CanReallocateStateless).unwrap();
        assert_eq!(json, "\"canReallocateStateless\"");

        let kind: PrivilegeKind = serde_json::from_str("\"canDelegate\"").unwrap();
        assert_eq!(kind, PrivilegeKind::CanDelegate);
    }
}
