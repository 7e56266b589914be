// Privilege engine
// XML decoding/encoding and specification-wide authorization checks

//! # Privilege Engine Module
//!
//! The layer between the domain models and the outside world:
//!
//! - **Models** (`models/`): registries and the authorization rule
//! - **Engine** (this module): reading and writing the `<privileges>` XML,
//!   and answering checks across every task of a specification
//! - **CLI** (`bin/`): inspection tooling on top of both
//!
//! ## Engine Components
//!
//! ### XML Elements (`xml` module)
//! - Owned element tree parsed with quick-xml
//! - Local names only, so namespaced YAWL documents read the same way
//!
//! ### Codec (`codec` module)
//! - Decodes `<privileges>` blocks into registries, expanding roles
//! - Encodes registries back into canonical XML
//! - Finds every task's block in a whole specification
//!
//! ### Privilege Table (`table` module)
//! - Registries of all tasks of one specification
//! - Authorization checks that fail closed for unknown tasks
//! - Per-participant evaluation reports

/// Minimal XML element tree
pub mod xml;

/// `<privileges>` decoder and encoder
///
/// Contains:
/// - PrivilegeCodec with lenient and strict decode modes
/// - encode for canonical output
/// - decode_specification for whole YAWL documents
pub mod codec;

/// Task-keyed registry table with authorization checks
pub mod table;

/// Re-export codec types
pub use codec::{encode, DecodeMode, PrivilegeCodec};

/// Re-export table and evaluation report types
pub use table::{ParticipantEvaluation, PrivilegeTable, TaskEvaluation};

/// Re-export the element tree
pub use xml::XmlElement;
