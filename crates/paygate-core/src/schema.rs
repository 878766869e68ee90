//! # Field Schemas
//!
//! Field-name-to-type tables governing what a [`Container`](crate::Container)
//! may hold. Schemas are immutable `static` tables constructed once and shared
//! by reference; they are never mutated after construction.

/// Declared type of a single schema field
#[derive(Debug, PartialEq, Eq)]
pub enum FieldType {
    /// Free-form string
    Str,
    /// Signed integer (monetary amounts are minor units)
    Int,
    /// Boolean flag
    Bool,
    /// RFC 3339 timestamp on the wire
    DateTime,
    /// String restricted to a fixed set of values
    Enum(&'static [&'static str]),
    /// Nested container with its own schema
    Object(&'static Schema),
    /// Homogeneous list of the given element type
    List(&'static FieldType),
}

impl FieldType {
    /// Human-readable name of the expected type, for error messages
    pub fn expected(&self) -> &'static str {
        match self {
            FieldType::Str => "string",
            FieldType::Int => "integer",
            FieldType::Bool => "boolean",
            FieldType::DateTime => "datetime",
            FieldType::Enum(_) => "enumerated string",
            FieldType::Object(schema) => schema.name,
            FieldType::List(_) => "list",
        }
    }
}

/// A field-name-to-type table for one entity
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    /// Entity name, used in error messages
    pub name: &'static str,
    /// Declared fields, in declaration order
    pub fields: &'static [(&'static str, FieldType)],
}

impl Schema {
    /// Look up a declared field by name.
    ///
    /// Returns the canonical key (the `'static` str from the table) alongside
    /// the type descriptor so stores can key off the schema's own strings.
    pub fn field(&self, key: &str) -> Option<(&'static str, &'static FieldType)> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(k, t)| (*k, t))
    }

    /// Check whether a field name is declared
    pub fn declares(&self, key: &str) -> bool {
        self.field(key).is_some()
    }
}
