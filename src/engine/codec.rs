// XML encoding and decoding of task privileges

//! # Privileges XML Codec
//!
//! Reads and writes the `<privileges>` block that a YAWL specification
//! embeds in each task's resourcing section:
//!
//! ```text
//! <privileges>
//!   <privilege>
//!     <name>canSkip</name>
//!     <allowall>true</allowall>          optional
//!     <set>                              optional
//!       <participant>PA-1</participant>  zero or more
//!       <role>RO-1</role>                zero or more
//!     </set>
//!   </privilege>
//! </privileges>
//! ```
//!
//! ## Decoding Is Best Effort
//!
//! A single bad `<privilege>` block (no `<name>`, or a name that is not one
//! of the seven privileges) is skipped and logged; the rest of the block
//! list still decodes. Unknown participants and roles never fail a decode.
//! Only a document that is not well-formed XML is an error.
//!
//! ## Participants and Roles
//!
//! `<participant>` ids are the persisted grant set. In the default
//! [`DecodeMode::Lenient`] they are taken as written (trimmed), which is what makes
//! `decode(encode(r)) == r`. [`DecodeMode::Strict`] resolves each one through
//! the directory and drops the ones it does not know.
//!
//! `<role>` ids are expanded through the directory at decode time and the id
//! itself is recorded so that it is written back out. Without a directory
//! only the id is recorded.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::table::PrivilegeTable;
use super::xml::XmlElement;
use crate::directory::ParticipantDirectory;
use crate::models::{ParticipantId, PrivilegeKind, PrivilegeRegistry, RoleId};
use crate::Result;

pub const PRIVILEGES: &str = "privileges";
pub const PRIVILEGE: &str = "privilege";
pub const NAME: &str = "name";
pub const ALLOW_ALL: &str = "allowall";
pub const SET: &str = "set";
pub const PARTICIPANT: &str = "participant";
pub const ROLE: &str = "role";
pub const TASK: &str = "task";

/// How `<participant>` ids are treated while decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Accept ids as written
    #[default]
    Lenient,

    /// Keep only ids the directory resolves (needs a directory)
    Strict,
}

/// Decoder for `<privileges>` blocks.
///
/// ```rust
/// use yawl_privileges::{PrivilegeCodec, PrivilegeKind};
///
/// let xml = "<privileges><privilege><name>canSkip</name>\
///            <set><participant>PA-1</participant></set></privilege></privileges>";
///
/// let registry = PrivilegeCodec::new().decode_str("review", xml).unwrap();
/// assert!(registry.authorize(PrivilegeKind::CanSkip, &"PA-1".into()));
/// ```
#[derive(Clone, Copy, Default)]
pub struct PrivilegeCodec<'d> {
    directory: Option<&'d dyn ParticipantDirectory>,
    mode: DecodeMode,
}

impl<'d> PrivilegeCodec<'d> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve roles (and, in strict mode, participants) through this directory
    pub fn with_directory(mut self, directory: &'d dyn ParticipantDirectory) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Decode a `<privileges>` element into a new registry for `task_id`
    pub fn decode(&self, task_id: &str, element: &XmlElement) -> PrivilegeRegistry {
        let mut registry = PrivilegeRegistry::new(task_id);
        self.decode_into(&mut registry, element);
        registry
    }

    /// Decode a `<privileges>` element into an existing registry.
    ///
    /// Grants are added to what is already there; an `<allowall>` element
    /// overwrites the flag for its kind.
    pub fn decode_into(&self, registry: &mut PrivilegeRegistry, element: &XmlElement) {
        for block in element.children_named(PRIVILEGE) {
            let Some(name) = block.child_text(NAME) else {
                warn!(task = registry.owner_task_id(), "privilege without a name, skipped");
                continue;
            };
            let Some(kind) = PrivilegeKind::from_name(name) else {
                warn!(task = registry.owner_task_id(), privilege = name, "unknown privilege, skipped");
                continue;
            };

            if let Some(flag) = block.child_text(ALLOW_ALL) {
                registry.set_allow_all(kind, flag.eq_ignore_ascii_case("true"));
            }
            if let Some(set) = block.child(SET) {
                self.decode_set(registry, kind, set);
            }
        }
    }

    fn decode_set(&self, registry: &mut PrivilegeRegistry, kind: PrivilegeKind, set: &XmlElement) {
        for entry in set.children() {
            let id = entry.text();
            if id.is_empty() {
                continue;
            }
            match entry.name() {
                PARTICIPANT => self.decode_participant(registry, kind, id),
                ROLE => self.decode_role(registry, kind, RoleId::from(id)),
                other => debug!(element = other, "unexpected element in privilege set"),
            }
        }
    }

    fn decode_participant(&self, registry: &mut PrivilegeRegistry, kind: PrivilegeKind, id: &str) {
        match (self.mode, self.directory) {
            (DecodeMode::Strict, Some(directory)) => {
                registry.grant(kind, &ParticipantId::from(id), directory);
            }
            _ => {
                registry.grant_unchecked(kind, id);
            }
        }
    }

    fn decode_role(&self, registry: &mut PrivilegeRegistry, kind: PrivilegeKind, role: RoleId) {
        match self.directory {
            Some(directory) => {
                registry.grant_role(kind, &role, directory);
            }
            None => registry.add_role_unchecked(kind, role),
        }
    }

    /// Parse an XML string and decode the first `<privileges>` element in it.
    ///
    /// A document without a `<privileges>` element yields an empty registry.
    pub fn decode_str(&self, task_id: &str, xml: &str) -> Result<PrivilegeRegistry> {
        let root = XmlElement::parse(xml)?;
        Ok(match root.find_first(PRIVILEGES) {
            Some(element) => self.decode(task_id, element),
            None => PrivilegeRegistry::new(task_id),
        })
    }

    /// Decode the privileges of every task in a specification document.
    ///
    /// Each `<task>` with an `id` attribute contributes the first
    /// `<privileges>` element nested inside it. Tasks without one get no
    /// entry, which the table treats as "nobody holds any privilege".
    pub fn decode_specification(&self, xml: &str) -> Result<PrivilegeTable> {
        let root = XmlElement::parse(xml)?;
        let mut table = PrivilegeTable::new();

        for task in root.find_all(TASK) {
            let Some(task_id) = task.attribute("id") else {
                debug!("task without id attribute, skipped");
                continue;
            };
            if let Some(element) = task.find_first(PRIVILEGES) {
                table.insert(self.decode(task_id, element));
            }
        }

        debug!(tasks = table.len(), "decoded specification privileges");
        Ok(table)
    }
}

/// Encode a registry as a `<privileges>` element.
///
/// Kinds with no allow-all flag, no participants and no roles are left out
/// entirely. Participants precede roles inside each `<set>`, and ids come
/// out sorted so that encoding is deterministic.
pub fn encode(registry: &PrivilegeRegistry) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    let declared = registry.declared_kinds();

    if declared.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(PRIVILEGES)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(PRIVILEGES)))?;
        for kind in declared {
            write_privilege(&mut writer, registry, kind)?;
        }
        writer.write_event(Event::End(BytesEnd::new(PRIVILEGES)))?;
    }

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_privilege(writer: &mut Writer<Vec<u8>>, registry: &PrivilegeRegistry, kind: PrivilegeKind) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(PRIVILEGE)))?;
    write_text_element(writer, NAME, kind.name())?;

    if registry.is_allow_all(kind) {
        write_text_element(writer, ALLOW_ALL, "true")?;
    }

    if registry.has_any_grant(kind) || registry.has_roles(kind) {
        writer.write_event(Event::Start(BytesStart::new(SET)))?;
        for participant in registry.participants(kind) {
            write_text_element(writer, PARTICIPANT, participant.as_str())?;
        }
        for role in registry.roles(kind) {
            write_text_element(writer, ROLE, role.as_str())?;
        }
        writer.write_event(Event::End(BytesEnd::new(SET)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(PRIVILEGE)))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
