//! Field resolution
//!
//! Turns a static [`Schema`] into the per-call map from row-set name to
//! destination collection.

use super::types::{Access, Destination, Schema, Storage, Tag};
use crate::error::{Error, Result};
use crate::record::RowSink;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

// ============================================================================
// Field Map
// ============================================================================

/// Row-set name to collection accessor, valid for one decode call
pub struct FieldMap<'s, D> {
    entries: HashMap<&'s str, &'s dyn Access<D>>,
}

impl<'s, D: 'static> FieldMap<'s, D> {
    /// Resolve a schema into a field map.
    ///
    /// Fails when a tagged field does not hold rows.
    pub fn resolve(schema: &'s Schema<D>) -> Result<Self> {
        let mut entries: HashMap<&'s str, &'s dyn Access<D>> = HashMap::new();

        for field in &schema.fields {
            if !field.writable {
                continue;
            }

            let explicit = match field.tag {
                Tag::Skip => continue,
                Tag::Name(name) => Some(name),
                Tag::Untagged => None,
            };

            let access = match (&field.storage, explicit) {
                (Storage::Sequence(access), _) => &**access,
                (Storage::Value, None) => continue,
                (Storage::Value, Some(name)) => {
                    return Err(Error::schema(format!(
                        "annotated field '{}' (row set '{name}') is not a sequence type",
                        field.ident
                    )));
                }
            };

            let name = explicit.unwrap_or(field.ident);
            if entries.contains_key(name) {
                warn!(
                    "Row set '{}' is already bound; ignoring field '{}'",
                    name, field.ident
                );
                continue;
            }
            entries.insert(name, access);
        }

        Ok(Self { entries })
    }

    /// Check if a row-set name is bound
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of bound row sets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bound row-set names, sorted
    pub fn names(&self) -> Vec<&'s str> {
        let mut names: Vec<&'s str> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Borrow the collection bound to `name` inside `dest`
    pub fn sink<'a>(&self, name: &str, dest: &'a mut D) -> Option<&'a mut dyn RowSink> {
        self.entries.get(name).map(|access| access.sink(dest))
    }
}

impl<D> fmt::Debug for FieldMap<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMap")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// Bindings
// ============================================================================

/// A destination record bound to its resolved field map
pub(crate) trait Bindings {
    /// Collection for a row-set name, if one is bound
    fn sink(&mut self, name: &str) -> Option<&mut dyn RowSink>;
}

/// Typed [`Bindings`] over a caller's record
pub(crate) struct Bound<'d, D: Destination> {
    dest: &'d mut D,
    fields: FieldMap<'static, D>,
}

impl<'d, D: Destination> Bound<'d, D> {
    pub(crate) fn new(dest: &'d mut D) -> Result<Self> {
        let fields = FieldMap::resolve(D::schema())?;
        Ok(Self { dest, fields })
    }
}

impl<D: Destination> Bindings for Bound<'_, D> {
    fn sink(&mut self, name: &str) -> Option<&mut dyn RowSink> {
        self.fields.sink(name, self.dest)
    }
}

// ============================================================================
// Registry
// ============================================================================

type Binder = for<'a> fn(&'a mut dyn Any) -> Option<Result<Box<dyn Bindings + 'a>>>;

fn bind_any<D: Destination>(target: &mut dyn Any) -> Option<Result<Box<dyn Bindings + '_>>> {
    let dest = target.downcast_mut::<D>()?;
    Some(Bound::new(dest).map(|bound| Box::new(bound) as Box<dyn Bindings + '_>))
}

/// Type-erased table of destination record types.
///
/// Used to decode into a target whose concrete type is only known at
/// runtime. Targets of unregistered types are rejected.
#[derive(Default)]
pub struct Registry {
    binders: HashMap<TypeId, (&'static str, Binder)>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a destination type
    pub fn register<D: Destination>(&mut self) -> &mut Self {
        self.binders.insert(
            TypeId::of::<D>(),
            (std::any::type_name::<D>(), bind_any::<D> as Binder),
        );
        self
    }

    /// Register a destination type (builder style)
    #[must_use]
    pub fn with<D: Destination>(mut self) -> Self {
        self.register::<D>();
        self
    }

    /// Check if a type is registered
    pub fn contains<D: Destination>(&self) -> bool {
        self.binders.contains_key(&TypeId::of::<D>())
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.binders.len()
    }

    /// True when no types are registered
    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }

    /// Bind a runtime-typed target, or fail with `InvalidTarget`
    pub(crate) fn bind<'a>(&self, target: &'a mut dyn Any) -> Result<Box<dyn Bindings + 'a>> {
        let type_id = (*target).type_id();
        let (_, binder) = self.binders.get(&type_id).ok_or_else(|| {
            Error::invalid_target("pointer to a non-record type passed to decode")
        })?;

        binder(target).unwrap_or_else(|| {
            Err(Error::invalid_target(
                "registered binder does not match target type",
            ))
        })
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.binders.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("types", &names).finish()
    }
}
