//! Core schema definition types.
//!
//! Provides a backend-agnostic type system for describing the relational schema.
//! These types feed both the Cozo DDL compiler and the DOT diagram compiler.

/// Represents a database data type.
///
/// Maps to the Cozo type system via `cozo_type()` and to the labels shown in
/// the entity-relationship diagram via `diagram_type()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// String/text data
    String,
    /// Integer data
    Int,
}

impl DataType {
    /// Returns the Cozo type name for this data type.
    pub fn cozo_type(&self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::Int => "Int",
        }
    }

    /// Returns the SQL-flavoured type name shown in diagrams.
    pub fn diagram_type(&self) -> &'static str {
        match self {
            DataType::String => "VARCHAR",
            DataType::Int => "INTEGER",
        }
    }
}

/// Foreign key target of a field: `relation.field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced relation name (e.g., "user")
    pub relation: &'static str,

    /// Referenced field name (e.g., "id")
    pub field: &'static str,
}

/// Represents a field in a schema relation.
#[derive(Debug, Clone)]
pub struct SchemaField {
    /// Field name (e.g., "username", "post_id")
    pub name: &'static str,

    /// Field data type
    pub data_type: DataType,

    /// Whether the column accepts null.
    pub nullable: bool,

    /// Maximum length for string columns.
    pub max_len: Option<usize>,

    /// Closed set of accepted values. Empty means unconstrained.
    pub allowed_values: &'static [&'static str],

    /// Foreign key target, if this column references another relation.
    pub references: Option<ForeignKey>,
}

impl SchemaField {
    /// True when the field is restricted to an enumerated set of literals.
    pub fn is_enumerated(&self) -> bool {
        !self.allowed_values.is_empty()
    }
}

/// Cardinality of a relationship accessor, seen from the declaring relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    /// The declaring row is referenced by many target rows (`user.posts`).
    OneToMany,
    /// The declaring row references exactly one target row (`post.user`).
    ManyToOne,
}

/// Represents a navigable relationship between two relations.
///
/// Relationships never hold live references; they name the foreign key that
/// backs them and are resolved by lookup at query time.
#[derive(Debug, Clone)]
pub struct SchemaRelationship {
    /// Accessor name (e.g., "posts", "followers")
    pub name: &'static str,

    /// Target relation name
    pub target: &'static str,

    /// Cardinality seen from the declaring relation
    pub kind: RelationshipKind,

    /// Foreign key column backing the relationship. For `OneToMany` this lives
    /// on the target relation, for `ManyToOne` on the declaring relation.
    pub foreign_key: &'static str,

    /// Accessor on the target relation that mirrors this one, if any.
    pub back_populates: Option<&'static str>,
}

/// Represents a complete database relation/table.
#[derive(Debug, Clone)]
pub struct SchemaRelation {
    /// Relation name (e.g., "user", "post")
    pub name: &'static str,

    /// Entity name used in diagrams (e.g., "User")
    pub entity: &'static str,

    /// Fields that form the key (must be unique)
    pub key_fields: &'static [SchemaField],

    /// Fields that are associated values
    pub value_fields: &'static [SchemaField],

    /// Relationships to other relations
    pub relationships: &'static [SchemaRelationship],
}

impl SchemaRelation {
    /// Returns all fields in this relation (key + value).
    pub fn all_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.key_fields.iter().chain(self.value_fields.iter())
    }

    /// Returns the total number of fields.
    pub fn field_count(&self) -> usize {
        self.key_fields.len() + self.value_fields.len()
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.all_fields().find(|f| f.name == name)
    }

    /// Returns the fields that reference another relation.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&SchemaField, ForeignKey)> {
        self.all_fields()
            .filter_map(|f| f.references.map(|fk| (f, fk)))
    }

    /// Look up a relationship accessor by name.
    pub fn relationship(&self, name: &str) -> Option<&SchemaRelationship> {
        self.relationships.iter().find(|r| r.name == name)
    }
}
