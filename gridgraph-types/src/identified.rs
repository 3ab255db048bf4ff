//! The identity contract every stored entity satisfies.

use crate::{Kind, Result, TypesError};
use std::any::{Any, TypeId};
use std::fmt;

/// Object-safe view of a stored entity.
///
/// The store only ever needs an entity's mRID and concrete [`Kind`]. Anything
/// else is reached through *facets*: the capability structs an entity is
/// composed of (for example the "equipment" fields shared by every piece of
/// equipment), looked up by their Rust type.
pub trait Identified: Any + fmt::Debug {
    /// The entity's master resource identifier. Unique across a store.
    fn mrid(&self) -> &str;

    /// The entity's concrete kind.
    fn kind(&self) -> Kind;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the capability struct of type `facet`, if this entity has one.
    fn facet(&self, facet: TypeId) -> Option<&dyn Any> {
        let _ = facet;
        None
    }

    /// Mutable counterpart of [`Identified::facet`].
    fn facet_mut(&mut self, facet: TypeId) -> Option<&mut dyn Any> {
        let _ = facet;
        None
    }
}

/// A concrete, statically typed entity.
pub trait Entity: Identified + Sized {
    /// The kind shared by every instance of this type.
    const KIND: Kind;
}

impl<'a> dyn Identified + 'a {
    /// Downcasts to a concrete entity type.
    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Mutable downcast to a concrete entity type.
    pub fn downcast_mut<T: Entity>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// Returns the capability struct `F` this entity is composed of.
    ///
    /// The entity itself counts as a facet, so `facet_of::<Breaker>()` on a
    /// breaker returns the breaker.
    pub fn facet_of<F: 'static>(&self) -> Option<&F> {
        if let Some(own) = self.as_any().downcast_ref::<F>() {
            return Some(own);
        }
        self.facet(TypeId::of::<F>())?.downcast_ref()
    }

    /// Mutable counterpart of [`facet_of`](Self::facet_of).
    pub fn facet_of_mut<F: 'static>(&mut self) -> Option<&mut F> {
        if self.as_any().is::<F>() {
            return self.as_any_mut().downcast_mut();
        }
        self.facet_mut(TypeId::of::<F>())?.downcast_mut()
    }

    /// Like [`facet_of`](Self::facet_of), failing with
    /// [`TypesError::FacetMissing`] when the facet is absent.
    pub fn require_facet<F: 'static>(&self) -> Result<&F> {
        let kind = self.kind();
        self.facet_of::<F>().ok_or(TypesError::FacetMissing {
            kind,
            facet: std::any::type_name::<F>(),
        })
    }

    /// Mutable counterpart of [`require_facet`](Self::require_facet).
    pub fn require_facet_mut<F: 'static>(&mut self) -> Result<&mut F> {
        let kind = self.kind();
        self.facet_of_mut::<F>().ok_or(TypesError::FacetMissing {
            kind,
            facet: std::any::type_name::<F>(),
        })
    }
}

/// Implements [`Identified`] and [`Entity`] for a struct composed of facets.
///
/// ```ignore
/// impl_entity!(Breaker, BREAKER, ce.equipment.psr.io.mrid, {
///     IdentifiedObjectData => ce.equipment.psr.io,
///     PowerSystemResourceData => ce.equipment.psr,
///     EquipmentData => ce.equipment,
///     ConductingEquipmentData => ce,
/// });
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($ty:ty, $kind:expr, $($mrid:ident).+, { $($facet:ty => $($path:ident).+),* $(,)? }) => {
        impl $crate::Identified for $ty {
            fn mrid(&self) -> &str {
                &self.$($mrid).+
            }

            fn kind(&self) -> $crate::Kind {
                $kind
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn facet(&self, facet: ::std::any::TypeId) -> Option<&dyn ::std::any::Any> {
                let _ = &facet;
                $(
                    if facet == ::std::any::TypeId::of::<$facet>() {
                        return Some(&self.$($path).+ as &dyn ::std::any::Any);
                    }
                )*
                None
            }

            fn facet_mut(&mut self, facet: ::std::any::TypeId) -> Option<&mut dyn ::std::any::Any> {
                let _ = &facet;
                $(
                    if facet == ::std::any::TypeId::of::<$facet>() {
                        return Some(&mut self.$($path).+ as &mut dyn ::std::any::Any);
                    }
                )*
                None
            }
        }

        impl $crate::Entity for $ty {
            const KIND: $crate::Kind = $kind;
        }
    };
}
