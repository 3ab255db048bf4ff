//! The comparator registry and the comparison primitives.
//!
//! A [`Comparator`] maps each concrete kind to one comparison function. The
//! function receives an [`ObjectDiff`] over a source/target pair of the same
//! kind and records differing fields through its primitives. Capability
//! layers are compared by projecting into the layer with
//! [`ObjectDiff::facet`] and calling the layer's own function, so every
//! concrete kind reuses the comparisons of the layers it is built from.

use crate::report::{Difference, IndexChange, ObjectDifference};
use crate::value::floats_match;
use crate::{
    ComparatorOptions, DiffError, DiffResult, DifferenceReport, FieldValue, NameTypeDifferences,
};
use gridgraph_store::{NameType, ObjectStore, StoreSchema};
use gridgraph_types::{Entity, Identified, Kind, IDENTIFIED_OBJECT};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A comparison function for one entity type or capability layer.
pub type CompareFn<T> = fn(&mut ObjectDiff<'_, T>);

type ErasedCompare =
    Box<dyn Fn(&dyn Identified, &dyn Identified, &ComparatorOptions, &mut ObjectDifference)>;

/// A source/target pair being compared, plus the differences found so far.
pub struct ObjectDiff<'a, T> {
    source: &'a T,
    target: &'a T,
    options: &'a ComparatorOptions,
    out: &'a mut ObjectDifference,
}

impl<'a, T> ObjectDiff<'a, T> {
    pub fn new(
        source: &'a T,
        target: &'a T,
        options: &'a ComparatorOptions,
        out: &'a mut ObjectDifference,
    ) -> Self {
        Self {
            source,
            target,
            options,
            out,
        }
    }

    pub fn source(&self) -> &'a T {
        self.source
    }

    pub fn target(&self) -> &'a T {
        self.target
    }

    pub fn options(&self) -> &'a ComparatorOptions {
        self.options
    }

    /// Records a difference directly.
    pub fn record(&mut self, field: &str, difference: Difference) -> &mut Self {
        self.out.fields_mut().insert(field.to_string(), difference);
        self
    }

    /// Compares a scalar field.
    pub fn value<V: Into<FieldValue>>(&mut self, field: &str, get: impl Fn(&T) -> V) -> &mut Self {
        let source: FieldValue = get(self.source).into();
        let target: FieldValue = get(self.target).into();
        if !source.matches(&target, self.options.float_tolerance) {
            self.record(field, Difference::Value { source, target });
        }
        self
    }

    /// Compares a float field, treating NaN as equal to NaN.
    pub fn float(&mut self, field: &str, get: impl Fn(&T) -> f64) -> &mut Self {
        let source = get(self.source);
        let target = get(self.target);
        if !floats_match(source, target, self.options.float_tolerance) {
            self.record(
                field,
                Difference::Value {
                    source: source.into(),
                    target: target.into(),
                },
            );
        }
        self
    }

    /// Compares a single-valued reference by target mRID.
    pub fn reference(&mut self, field: &str, get: impl Fn(&T) -> Option<&str>) -> &mut Self {
        let source = get(self.source);
        let target = get(self.target);
        if source != target {
            self.record(
                field,
                Difference::Reference {
                    source: source.map(str::to_string),
                    target: target.map(str::to_string),
                },
            );
        }
        self
    }

    /// Compares an unordered reference collection by member mRID.
    pub fn unordered(
        &mut self,
        field: &str,
        get: impl Fn(&T) -> &BTreeSet<String>,
    ) -> &mut Self {
        let source = get(self.source);
        let target = get(self.target);
        let missing_from_target: BTreeSet<String> = source.difference(target).cloned().collect();
        let missing_from_source: BTreeSet<String> = target.difference(source).cloned().collect();
        if !missing_from_target.is_empty() || !missing_from_source.is_empty() {
            self.record(
                field,
                Difference::Collection {
                    missing_from_target,
                    missing_from_source,
                },
            );
        }
        self
    }

    /// Compares an ordered list index by index.
    ///
    /// Elements present on both sides but different are modifications; extra
    /// trailing elements are missing from the shorter side.
    pub fn ordered<V>(&mut self, field: &str, get: impl Fn(&T) -> &[V]) -> &mut Self
    where
        V: Clone + Into<FieldValue>,
    {
        let source = get(self.source);
        let target = get(self.target);
        let tolerance = self.options.float_tolerance;
        let changes: Vec<IndexChange> = (0..source.len().max(target.len()))
            .filter_map(|index| {
                let s: Option<FieldValue> = source.get(index).cloned().map(Into::into);
                let t: Option<FieldValue> = target.get(index).cloned().map(Into::into);
                match (&s, &t) {
                    (Some(a), Some(b)) if a.matches(b, tolerance) => None,
                    _ => Some(IndexChange {
                        index,
                        source: s,
                        target: t,
                    }),
                }
            })
            .collect();
        if !changes.is_empty() {
            self.record(field, Difference::Indexed { changes });
        }
        self
    }

    /// Compares a capability layer of `T` with that layer's own function.
    pub fn facet<F>(&mut self, get: impl Fn(&T) -> &F, compare: CompareFn<F>) -> &mut Self {
        let mut layer = ObjectDiff {
            source: get(self.source),
            target: get(self.target),
            options: self.options,
            out: &mut *self.out,
        };
        compare(&mut layer);
        self
    }
}

/// Builds a [`Comparator`]; duplicates are reported by [`ComparatorBuilder::build`].
pub struct ComparatorBuilder {
    options: ComparatorOptions,
    compares: BTreeMap<Kind, ErasedCompare>,
    duplicate: Option<Kind>,
}

impl ComparatorBuilder {
    /// Registers the comparison function for the concrete type `T`.
    #[must_use]
    pub fn register<T: Entity>(mut self, compare: CompareFn<T>) -> Self {
        let erased: ErasedCompare = Box::new(move |source, target, options, out| {
            if let (Some(source), Some(target)) =
                (source.downcast_ref::<T>(), target.downcast_ref::<T>())
            {
                compare(&mut ObjectDiff::new(source, target, options, out));
            }
        });
        if self.compares.insert(T::KIND, erased).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(T::KIND);
        }
        self
    }

    #[must_use]
    pub fn options(mut self, options: ComparatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> DiffResult<Comparator> {
        if let Some(kind) = self.duplicate {
            return Err(DiffError::DuplicateComparator(kind));
        }
        Ok(Comparator {
            options: self.options,
            compares: self.compares,
        })
    }
}

/// Compares two stores entity by entity.
pub struct Comparator {
    options: ComparatorOptions,
    compares: BTreeMap<Kind, ErasedCompare>,
}

impl Comparator {
    pub fn builder() -> ComparatorBuilder {
        ComparatorBuilder {
            options: ComparatorOptions::default(),
            compares: BTreeMap::new(),
            duplicate: None,
        }
    }

    pub fn options(&self) -> &ComparatorOptions {
        &self.options
    }

    pub fn supports(&self, kind: Kind) -> bool {
        self.compares.contains_key(&kind)
    }

    /// The kinds with a registered function, ordered by name.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.compares.keys().copied()
    }

    /// Fails unless every kind `schema` stores has a comparison function.
    pub fn validate_against(&self, schema: &StoreSchema) -> DiffResult<()> {
        let uncovered: Vec<Kind> = schema.kinds().filter(|k| !self.supports(*k)).collect();
        if uncovered.is_empty() {
            Ok(())
        } else {
            Err(DiffError::UncoveredKinds(uncovered))
        }
    }

    /// Compares `source` with `target`.
    ///
    /// An id present in both stores under different kinds is recorded only as
    /// missing from the target.
    pub fn compare(&self, source: &ObjectStore, target: &ObjectStore) -> DiffResult<DifferenceReport> {
        let mut report = DifferenceReport::default();

        for entity in source.all_of(IDENTIFIED_OBJECT) {
            let kind = entity.kind();
            let compare = self.compare_fn(kind)?;
            let mrid = entity.mrid();
            let Some(other) = target.lookup(&mrid) else {
                report.missing_from_target.insert(mrid);
                continue;
            };
            if other.kind() != kind {
                debug!(%mrid, from_kind = %kind, to_kind = %other.kind(), "kind changed between stores");
                report.missing_from_target.insert(mrid);
                continue;
            }

            let mut difference = ObjectDifference::default();
            compare(&*entity.borrow(), &*other.borrow(), &self.options, &mut difference);
            if !difference.is_empty() {
                report.modifications.insert(mrid, difference);
            }
        }

        for entity in target.all_of(IDENTIFIED_OBJECT) {
            self.compare_fn(entity.kind())?;
            let mrid = entity.mrid();
            if !source.contains(&mrid) {
                report.missing_from_source.insert(mrid);
            }
        }

        if self.options.compare_names {
            report.name_types = self.compare_name_types(source, target);
        }

        debug!(
            missing_from_target = report.missing_from_target.len(),
            missing_from_source = report.missing_from_source.len(),
            modified = report.modifications.len(),
            "comparison finished"
        );
        Ok(report)
    }

    fn compare_fn(&self, kind: Kind) -> DiffResult<&ErasedCompare> {
        self.compares
            .get(&kind)
            .ok_or(DiffError::MissingComparator(kind))
    }

    fn compare_name_types(&self, source: &ObjectStore, target: &ObjectStore) -> NameTypeDifferences {
        let mut differences = NameTypeDifferences::default();
        for name_type in source.name_types() {
            match target.get_name_type(name_type.name()) {
                None => {
                    differences
                        .missing_from_target
                        .insert(name_type.name().to_string());
                }
                Some(other) => {
                    let mut difference = ObjectDifference::default();
                    compare_name_type(&mut ObjectDiff::new(
                        name_type,
                        other,
                        &self.options,
                        &mut difference,
                    ));
                    if !difference.is_empty() {
                        differences
                            .modifications
                            .insert(name_type.name().to_string(), difference);
                    }
                }
            }
        }
        for name_type in target.name_types() {
            if source.get_name_type(name_type.name()).is_none() {
                differences
                    .missing_from_source
                    .insert(name_type.name().to_string());
            }
        }
        differences
    }
}

/// Compares the description and names of a name type.
///
/// Names are matched by their text within the type; each name's entity set is
/// compared as an unordered collection under `names[<name>]`.
pub fn compare_name_type(diff: &mut ObjectDiff<'_, NameType>) {
    diff.value("description", |t| t.description().to_string());

    let source = diff.source();
    let target = diff.target();
    let names: BTreeSet<&str> = source
        .iter()
        .chain(target.iter())
        .map(|(name, _)| name)
        .collect();
    for name in names {
        let of = |t: &NameType| -> BTreeSet<String> {
            t.entities_named(name).map(str::to_string).collect()
        };
        let (s, t) = (of(source), of(target));
        if s != t {
            diff.record(
                &format!("names[{name}]"),
                Difference::Collection {
                    missing_from_target: s.difference(&t).cloned().collect(),
                    missing_from_source: t.difference(&s).cloned().collect(),
                },
            );
        }
    }
}
