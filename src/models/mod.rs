// Core domain models for YAWL task privileges
// Plain data structures with no XML or directory I/O of their own

//! # Domain Models Module
//!
//! The types a task's privilege configuration is built from:
//!
//! - [`PrivilegeKind`]: the seven privileged work-item operations
//! - [`ParticipantId`] / [`RoleId`] / [`Participant`]: directory identities
//! - [`PrivilegeRegistry`]: per-task grants and the authorization rule
//!
//! ## Rust Learning Notes:
//!
//! ### Re-exports for Clean APIs
//! The `pub use` statements at the bottom create a flat API, so callers write
//! `use yawl_privileges::models::PrivilegeRegistry` instead of reaching into
//! `models::registry`.

// Contains PrivilegeKind - the closed set of privileged operations
pub mod privilege;

// Contains ParticipantId, RoleId and Participant
pub mod participant;

// Contains PrivilegeRegistry and PrivilegeGrants
pub mod registry;

/// Re-export the privilege enumeration
pub use privilege::PrivilegeKind;

/// Re-export identity types
/// - ParticipantId / RoleId: opaque directory keys
/// - Participant: a resolved directory entry
pub use participant::{Participant, ParticipantId, RoleId};

/// Re-export the registry
/// - PrivilegeRegistry: all seven kinds for one task
/// - PrivilegeGrants: the grants recorded for a single kind
pub use registry::{PrivilegeGrants, PrivilegeRegistry};
