//! Destination declaration types

use crate::record::RowSink;
use std::fmt;
use std::marker::PhantomData;

/// Tag value that excludes a field from decoding
pub const SKIP_MARKER: &str = "-";

// ============================================================================
// Tag
// ============================================================================

/// Row-set annotation on a destination field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tag {
    /// No annotation; the field binds by its own identifier
    #[default]
    Untagged,
    /// Bind to the row set with this name
    Name(&'static str),
    /// Never bind this field
    Skip,
}

impl From<&'static str> for Tag {
    fn from(tag: &'static str) -> Self {
        match tag {
            "" => Tag::Untagged,
            SKIP_MARKER => Tag::Skip,
            name => Tag::Name(name),
        }
    }
}

impl From<Option<&'static str>> for Tag {
    fn from(tag: Option<&'static str>) -> Self {
        tag.map_or(Tag::Untagged, Tag::from)
    }
}

// ============================================================================
// Field Accessors
// ============================================================================

/// Mutable access to one sequence field of a destination record
pub(crate) trait Access<D>: Send + Sync {
    fn sink<'a>(&self, dest: &'a mut D) -> &'a mut dyn RowSink;
}

struct SeqAccessor<F, S> {
    f: F,
    _sink: PhantomData<fn() -> S>,
}

impl<D, S, F> Access<D> for SeqAccessor<F, S>
where
    S: RowSink + 'static,
    F: Fn(&mut D) -> &mut S,
    F: Send + Sync,
{
    fn sink<'a>(&self, dest: &'a mut D) -> &'a mut dyn RowSink {
        (self.f)(dest)
    }
}

/// What a declared field stores
pub(crate) enum Storage<D> {
    /// A growable row collection
    Sequence(Box<dyn Access<D>>),
    /// Anything else
    Value,
}

/// One declared field of a destination record
pub(crate) struct FieldDecl<D> {
    pub(crate) ident: &'static str,
    pub(crate) tag: Tag,
    pub(crate) writable: bool,
    pub(crate) storage: Storage<D>,
}

impl<D> FieldDecl<D> {
    pub(crate) fn is_sequence(&self) -> bool {
        matches!(self.storage, Storage::Sequence(_))
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Static field declaration for a destination record type.
///
/// Fields are kept in declaration order; resolution walks them in that
/// order, so the first field claiming a row-set name wins.
pub struct Schema<D> {
    pub(crate) fields: Vec<FieldDecl<D>>,
}

impl<D: 'static> Schema<D> {
    /// Create a new schema builder
    pub fn builder() -> SchemaBuilder<D> {
        SchemaBuilder::default()
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields were declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declared field identifiers, in declaration order
    pub fn idents(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.ident)
    }
}

impl<D> fmt::Debug for Schema<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for field in &self.fields {
            list.entry(&(field.ident, field.tag, field.writable, field.is_sequence()));
        }
        list.finish()
    }
}

/// Builder for [`Schema`]
pub struct SchemaBuilder<D> {
    fields: Vec<FieldDecl<D>>,
}

impl<D> Default for SchemaBuilder<D> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<D: 'static> SchemaBuilder<D> {
    /// Declare a row collection field.
    ///
    /// `accessor` must return the field itself so rows land in the
    /// caller's record.
    #[must_use]
    pub fn rows<S, F>(mut self, ident: &'static str, tag: impl Into<Tag>, accessor: F) -> Self
    where
        S: RowSink + 'static,
        F: Fn(&mut D) -> &mut S,
        F: Send + Sync + 'static,
    {
        self.fields.push(FieldDecl {
            ident,
            tag: tag.into(),
            writable: true,
            storage: Storage::Sequence(Box::new(SeqAccessor {
                f: accessor,
                _sink: PhantomData,
            })),
        });
        self
    }

    /// Declare a field that does not hold rows.
    ///
    /// Untagged value fields are ignored; tagging one is a schema error at
    /// decode time.
    #[must_use]
    pub fn value(mut self, ident: &'static str, tag: impl Into<Tag>) -> Self {
        self.fields.push(FieldDecl {
            ident,
            tag: tag.into(),
            writable: true,
            storage: Storage::Value,
        });
        self
    }

    /// Declare a field the decoder may not write to
    #[must_use]
    pub fn hidden(mut self, ident: &'static str) -> Self {
        self.fields.push(FieldDecl {
            ident,
            tag: Tag::Untagged,
            writable: false,
            storage: Storage::Value,
        });
        self
    }

    /// Build the schema
    pub fn build(self) -> Schema<D> {
        Schema {
            fields: self.fields,
        }
    }
}

// ============================================================================
// Destination
// ============================================================================

/// Trait for record types that receive decoded row sets
pub trait Destination: Sized + 'static {
    /// The type's field declaration, built once and shared by every call
    fn schema() -> &'static Schema<Self>;
}
