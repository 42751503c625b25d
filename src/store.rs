use serde::{Deserialize, Serialize};

use crate::model::{
    Admission, Class, DashboardMetrics, Event, Fee, LogEntry, Notification, Salary, Student,
    Teacher, User,
};

/// A record that can live in a [`Collection`]. Ids are opaque strings; the
/// store enforces uniqueness but never generates them (creation handlers do).
pub trait Entity {
    fn id(&self) -> &str;
}

macro_rules! impl_entity {
    ($($ty:ty),+ $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })+
    };
}

impl_entity!(
    Student,
    Teacher,
    Class,
    Fee,
    Salary,
    Event,
    Admission,
    Notification,
    LogEntry,
);

/// Outcome of a write. Not-found and duplicate-id conditions are no-ops, not
/// errors; callers that care can branch on the outcome, the rest ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WriteOutcome {
    Applied,
    NotFound,
    DuplicateId,
}

impl WriteOutcome {
    pub fn applied(self) -> bool {
        self == WriteOutcome::Applied
    }
}

/// An ordered, most-recent-first collection of records of one entity type.
/// Display order carries no meaning beyond "new rows show up on top".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T>(Vec<T>);

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection(Vec::new())
    }
}

impl<T: Entity> Collection<T> {
    /// Replaces the whole collection. No validation; used for initial load.
    pub fn set(&mut self, items: Vec<T>) {
        self.0 = items;
    }

    /// Prepends a record. Rejected (no-op) when the id is already taken.
    pub fn add(&mut self, item: T) -> WriteOutcome {
        if self.0.iter().any(|e| e.id() == item.id()) {
            return WriteOutcome::DuplicateId;
        }
        self.0.insert(0, item);
        WriteOutcome::Applied
    }

    /// Patches the record with the given id in place. Missing id is a no-op.
    pub fn update(&mut self, id: &str, patch: impl FnOnce(&mut T)) -> WriteOutcome {
        match self.0.iter_mut().find(|e| e.id() == id) {
            Some(item) => {
                patch(item);
                WriteOutcome::Applied
            }
            None => WriteOutcome::NotFound,
        }
    }

    pub fn delete(&mut self, id: &str) -> WriteOutcome {
        let before = self.0.len();
        self.0.retain(|e| e.id() != id);
        if self.0.len() < before {
            WriteOutcome::Applied
        } else {
            WriteOutcome::NotFound
        }
    }

    /// Removes every record whose id appears in `ids`; missing ids are
    /// ignored. Returns how many records were actually removed.
    pub fn bulk_delete(&mut self, ids: &[String]) -> usize {
        let before = self.0.len();
        self.0.retain(|e| !ids.iter().any(|id| id == e.id()));
        before - self.0.len()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.0.iter().find(|e| e.id() == id)
    }

    pub fn items(&self) -> &[T] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Every entity collection plus the session fields, i.e. everything the UI
/// reads and writes through the IPC surface. UI state lives elsewhere and is
/// never persisted.
#[derive(Debug, Default)]
pub struct Store {
    pub current_user: Option<User>,
    pub is_authenticated: bool,
    pub dashboard_metrics: DashboardMetrics,
    pub students: Collection<Student>,
    pub teachers: Collection<Teacher>,
    pub classes: Collection<Class>,
    pub fees: Collection<Fee>,
    pub salaries: Collection<Salary>,
    pub events: Collection<Event>,
    pub admissions: Collection<Admission>,
    pub notifications: Collection<Notification>,
    pub logs: Collection<LogEntry>,
}
