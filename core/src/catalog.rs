//! The set of registered classes.

use crate::date::ClassDate;
use crate::snapshot::StorageError;
use crate::types::{ClassDefinition, ClassId, NewClass};

/// Registered classes in insertion order.
///
/// Not synchronized on its own; the admission controller owns the only
/// mutable handle.
#[derive(Debug, Clone)]
pub struct Catalog {
    classes: Vec<ClassDefinition>,
    next_id: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// An empty catalog whose first class gets id 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            classes: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a catalog from a loaded snapshot.
    ///
    /// Order is kept as given. The next id continues after the highest
    /// stored one, so ids are never handed out twice across restarts.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if the snapshot already holds
    /// id `u64::MAX`, which leaves no id for the next class.
    pub fn from_snapshot(classes: Vec<ClassDefinition>) -> Result<Self, StorageError> {
        let highest = classes.iter().map(|c| c.id.value()).max().unwrap_or(0);
        let next_id = highest.checked_add(1).ok_or_else(|| {
            StorageError::Serialization(format!("class id {highest} leaves no room for new ids"))
        })?;
        Ok(Self { classes, next_id })
    }

    /// Assigns the next id and appends.
    pub fn add(&mut self, class: NewClass) -> ClassDefinition {
        let stored = ClassDefinition {
            id: ClassId::new(self.next_id),
            name: class.name,
            start_date: class.start_date,
            end_date: class.end_date,
            capacity: class.capacity,
        };
        self.next_id = self.next_id.saturating_add(1);
        self.classes.push(stored.clone());
        stored
    }

    /// First class, in insertion order, named `name` and active on `date`.
    ///
    /// Same-named classes with overlapping ranges are not an error; the
    /// earliest registered one wins.
    #[must_use]
    pub fn find_active_on(&self, name: &str, date: &ClassDate) -> Option<&ClassDefinition> {
        self.classes
            .iter()
            .find(|c| c.name == name && c.is_active_on(date))
    }

    /// All classes in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[ClassDefinition] {
        &self.classes
    }

    /// Number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
