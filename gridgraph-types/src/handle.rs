//! Shared handles to stored entities.
//!
//! Stores are single-writer and not synchronized, so entities live behind
//! `Rc<RefCell<_>>`. Relationship fields hold mRIDs, never handles, which keeps
//! the graph free of ownership cycles.

use crate::{Entity, Identified, Kind};
use std::any::Any;
use std::cell::{BorrowError, BorrowMutError, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// A typed shared entity, as held by callers.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a concrete entity for handing to a store.
pub fn shared<T: Entity>(entity: T) -> Shared<T> {
    Rc::new(RefCell::new(entity))
}

/// A type-erased handle to one entity instance.
///
/// Cloning a handle clones the pointer, not the entity. Two handles are the
/// *same instance* when [`EntityHandle::ptr_eq`] holds.
#[derive(Clone)]
pub struct EntityHandle {
    cell: Rc<RefCell<dyn Identified>>,
    typed: Rc<dyn Any>,
    kind: Kind,
}

impl EntityHandle {
    /// Wraps an owned entity in a fresh handle.
    pub fn new<T: Entity>(entity: T) -> Self {
        Self::from_shared(shared(entity))
    }

    /// Builds a handle around an existing shared entity.
    pub fn from_shared<T: Entity>(entity: Shared<T>) -> Self {
        let typed: Rc<dyn Any> = entity.clone();
        Self {
            cell: entity,
            typed,
            kind: T::KIND,
        }
    }

    /// The concrete kind of the wrapped entity.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// A copy of the wrapped entity's mRID.
    #[must_use]
    pub fn mrid(&self) -> String {
        self.cell.borrow().mrid().to_string()
    }

    /// Immutably borrows the entity.
    ///
    /// # Panics
    ///
    /// Panics if the entity is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, dyn Identified> {
        self.cell.borrow()
    }

    /// Mutably borrows the entity.
    ///
    /// # Panics
    ///
    /// Panics if the entity is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, dyn Identified> {
        self.cell.borrow_mut()
    }

    /// Immutably borrows the entity, failing if it is mutably borrowed.
    pub fn try_borrow(&self) -> Result<Ref<'_, dyn Identified>, BorrowError> {
        self.cell.try_borrow()
    }

    /// Mutably borrows the entity, failing if it is borrowed.
    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, dyn Identified>, BorrowMutError> {
        self.cell.try_borrow_mut()
    }

    /// Recovers the typed shared entity, if it is a `T`.
    #[must_use]
    pub fn downcast<T: Entity>(&self) -> Option<Shared<T>> {
        self.typed.clone().downcast::<RefCell<T>>().ok()
    }

    /// Returns true if both handles point at the same entity instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &EntityHandle) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.typed), Rc::as_ptr(&other.typed))
    }
}

impl<T: Entity> From<Shared<T>> for EntityHandle {
    fn from(entity: Shared<T>) -> Self {
        Self::from_shared(entity)
    }
}

impl fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.try_borrow() {
            Ok(entity) => write!(f, "EntityHandle({} {:?})", self.kind, entity.mrid()),
            Err(_) => write!(f, "EntityHandle({} <borrowed>)", self.kind),
        }
    }
}
