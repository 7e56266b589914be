// YAWL Task Privileges - Rust Edition
// Who may suspend, reallocate, deallocate, delegate, skip or pile a task's work items

//! # YAWL Task Privileges Library
//!
//! Every task in a YAWL specification can carry a `<privileges>` block that
//! says which participants may perform the privileged work-item operations
//! on it. This crate models those blocks, reads and writes their XML form and
//! answers authorization checks.
//!
//! ## Core Components
//!
//! ### Domain Models
//! - [`PrivilegeKind`]: the seven privileged operations
//! - [`PrivilegeRegistry`]: grants for one task, and the authorization rule
//! - [`ParticipantId`] / [`RoleId`] / [`Participant`]: directory identities
//!
//! ### Participant Directory
//! - [`ParticipantDirectory`]: the lookup interface onto the resourcing
//!   service, injected wherever ids or roles must be resolved
//! - [`InMemoryDirectory`]: a JSON-loadable implementation
//!
//! ### Engine
//! - [`PrivilegeCodec`] / [`encode`]: the `<privileges>` XML codec
//! - [`PrivilegeTable`]: all tasks of a specification, with fail-closed
//!   [`PrivilegeTable::check`]
//!
//! ## The Authorization Rule
//!
//! For each privilege a task stores an `allow_all` flag and a set of
//! participants. The set is an inclusion list when the flag is clear and an
//! exclusion list when it is set:
//!
//! ```text
//! allowed = allow_all XOR (participant in set)
//! ```
//!
//! **Usage Example:**
//! ```rust
//! use yawl_privileges::{ParticipantId, PrivilegeKind, PrivilegeRegistry};
//!
//! let mut registry = PrivilegeRegistry::new("review");
//! registry.allow_all(PrivilegeKind::CanPile);
//! registry.grant_unchecked(PrivilegeKind::CanPile, "carol");
//!
//! assert!(registry.authorize(PrivilegeKind::CanPile, &ParticipantId::from("dave")));
//! assert!(!registry.authorize(PrivilegeKind::CanPile, &ParticipantId::from("carol")));
//! ```
//!
//! ## Rust Learning Notes:
//!
//! ### Re-exports
//! `pub use` statements create shortcuts so users don't need to know the
//! internal module structure. Instead of
//! `use yawl_privileges::models::registry::PrivilegeRegistry`, users can write
//! `use yawl_privileges::PrivilegeRegistry`.

// Core domain models
pub mod models;

// Directory lookup interface and the in-memory implementation
pub mod directory;

// XML codec and the specification-wide privilege table
pub mod engine;

// Layered settings for the command-line tool
pub mod config;

pub use models::{Participant, ParticipantId, PrivilegeGrants, PrivilegeKind, PrivilegeRegistry, RoleId};

pub use directory::{InMemoryDirectory, ParticipantDirectory};

pub use engine::{
    encode, DecodeMode, ParticipantEvaluation, PrivilegeCodec, PrivilegeTable, TaskEvaluation,
    XmlElement,
};

pub use self::config::Settings;

// Core error types
use thiserror::Error;

/// Errors produced by privilege operations
///
/// ## Rust Learning Notes:
///
/// ### The `thiserror` Crate
/// - `#[derive(Error)]` implements the `std::error::Error` trait
/// - `#[error("...")]` provides human-readable error messages
/// - `#[from]` enables automatic conversion with the `?` operator
///
/// Unresolvable participants and malformed privilege blocks are *not*
/// errors: they are skipped and logged. Errors are reserved for input that
/// cannot be read at all, and for explicit denials.
#[derive(Error, Debug)]
pub enum PrivilegeError {
    /// A privilege name that matches none of the seven kinds
    #[error("Unknown privilege: {0}")]
    UnknownPrivilege(String),

    /// An authorization check failed
    #[error("Participant {participant} does not hold {privilege} on task {task_id}")]
    Denied {
        task_id: String,
        privilege: PrivilegeKind,
        participant: ParticipantId,
    },

    /// The XML tokenizer rejected the document
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Well-formed tokens that don't form a single-rooted element tree
    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    /// The participant directory could not be loaded
    #[error("Directory error: {0}")]
    Directory(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results that use the crate error type
pub type Result<T> = std::result::Result<T, PrivilegeError>;
