// Privilege table - per-specification authorization checks

//! # Privilege Table
//!
//! A specification has many tasks, each with its own [`PrivilegeRegistry`].
//! [`PrivilegeTable`] keeps them together and answers the question a
//! work-item transition handler asks: may this participant perform this
//! privileged operation on a work item of this task?
//!
//! ## Failing Closed
//!
//! A task the table knows nothing about is treated like a task with an empty
//! registry: every privilege is denied.
//!
//! ## Sharing
//!
//! Registries are stored behind `Arc`, so once a specification is loaded the
//! table (or individual registries) can be handed to any number of request
//! handlers without copying.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

use super::codec;
use crate::models::{ParticipantId, PrivilegeKind, PrivilegeRegistry};
use crate::{PrivilegeError, Result};

/// The privileges of every task in one specification, keyed by task id
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrivilegeTable {
    tasks: BTreeMap<String, Arc<PrivilegeRegistry>>,
}

/// Per-task outcome of [`PrivilegeTable::evaluate_participant`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEvaluation {
    pub task_id: String,
    pub allowed: Vec<PrivilegeKind>,
    pub denied: Vec<PrivilegeKind>,
}

/// Every privilege one participant holds across a specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantEvaluation {
    pub participant: ParticipantId,

    /// One entry per task, in task id order
    pub tasks: Vec<TaskEvaluation>,

    /// Total number of (task, privilege) pairs allowed
    pub allowed_count: usize,

    /// Total number of (task, privilege) pairs denied
    pub denied_count: usize,
}

impl ParticipantEvaluation {
    /// Tasks on which the participant holds at least one privilege
    pub fn privileged_tasks(&self) -> impl Iterator<Item = &TaskEvaluation> + '_ {
        self.tasks.iter().filter(|task| !task.allowed.is_empty())
    }
}

impl PrivilegeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registry under its owner task id, returning any registry it replaces
    pub fn insert(&mut self, registry: PrivilegeRegistry) -> Option<Arc<PrivilegeRegistry>> {
        let task_id = registry.owner_task_id().to_string();
        self.tasks.insert(task_id, Arc::new(registry))
    }

    pub fn get(&self, task_id: &str) -> Option<&PrivilegeRegistry> {
        self.tasks.get(task_id).map(Arc::as_ref)
    }

    /// A shared handle onto a task's registry
    pub fn shared(&self, task_id: &str) -> Option<Arc<PrivilegeRegistry>> {
        self.tasks.get(task_id).cloned()
    }

    pub fn task_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.tasks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrivilegeRegistry> + '_ {
        self.tasks.values().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether `participant` holds `kind` on `task_id`; unknown tasks deny
    pub fn is_authorized(&self, task_id: &str, kind: PrivilegeKind, participant: &ParticipantId) -> bool {
        self.get(task_id)
            .map_or(false, |registry| registry.authorize(kind, participant))
    }

    /// Authorization check for a requested work-item operation.
    ///
    /// Returns [`PrivilegeError::Denied`] when the participant does not hold
    /// the privilege, including when the task is unknown.
    pub fn check(&self, task_id: &str, kind: PrivilegeKind, participant: &ParticipantId) -> Result<()> {
        if self.is_authorized(task_id, kind, participant) {
            trace!(task = task_id, privilege = %kind, participant = %participant, "privilege granted");
            return Ok(());
        }

        debug!(task = task_id, privilege = %kind, participant = %participant,
            known_task = self.tasks.contains_key(task_id), "privilege denied");
        Err(PrivilegeError::Denied {
            task_id: task_id.to_string(),
            privilege: kind,
            participant: participant.clone(),
        })
    }

    /// Evaluate every privilege of every task for one participant
    pub fn evaluate_participant(&self, participant: &ParticipantId) -> ParticipantEvaluation {
        let tasks: Vec<TaskEvaluation> = self
            .tasks
            .iter()
            .map(|(task_id, registry)| {
                let (allowed, denied): (Vec<PrivilegeKind>, Vec<PrivilegeKind>) = PrivilegeKind::ALL
                    .into_iter()
                    .partition(|kind| registry.authorize(*kind, participant));
                TaskEvaluation {
                    task_id: task_id.clone(),
                    allowed,
                    denied,
                }
            })
            .collect();

        let allowed_count = tasks.iter().map(|task| task.allowed.len()).sum();
        let denied_count = tasks.iter().map(|task| task.denied.len()).sum();

        ParticipantEvaluation {
            participant: participant.clone(),
            tasks,
            allowed_count,
            denied_count,
        }
    }

    /// Canonical `<privileges>` XML of one task
    pub fn encode_task(&self, task_id: &str) -> Option<Result<String>> {
        self.get(task_id).map(codec::encode)
    }
}

impl FromIterator<PrivilegeRegistry> for PrivilegeTable {
    fn from_iter<I: IntoIterator<Item = PrivilegeRegistry>>(iter: I) -> Self {
        let mut table = PrivilegeTable::new();
        for registry in iter {
            table.insert(registry);
        }
        table
    }
}
