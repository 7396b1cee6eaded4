//! Cozo Datalog compiler.
//!
//! Generates Cozo Datalog DDL (`:create relation { ... }`) and the parameterised
//! scripts used by the store (put, remove, select) from backend-agnostic schema
//! definitions. The output format is deterministic.

use crate::db::schema::definition::{SchemaField, SchemaRelation};

/// Compiler for generating Cozo Datalog scripts from schema definitions.
pub struct CozoCompiler;

impl CozoCompiler {
    fn column_type(field: &SchemaField) -> String {
        if field.nullable {
            format!("{}?", field.data_type.cozo_type())
        } else {
            field.data_type.cozo_type().to_string()
        }
    }

    fn join_names<'a>(fields: impl Iterator<Item = &'a SchemaField>) -> String {
        fields.map(|f| f.name).collect::<Vec<_>>().join(", ")
    }

    /// Generate Cozo DDL for a single relation.
    ///
    /// Produces output in the format:
    /// ```cozo
    /// :create relation_name {
    ///     key_field: Type
    ///     =>
    ///     value_field1: Type,
    ///     nullable_field: Type?
    /// }
    /// ```
    pub fn compile_relation(relation: &SchemaRelation) -> String {
        let render = |fields: &[SchemaField]| {
            fields
                .iter()
                .map(|f| format!("    {}: {}", f.name, Self::column_type(f)))
                .collect::<Vec<_>>()
                .join(",\n")
        };

        format!(
            ":create {} {{\n{}\n    =>\n{}\n}}",
            relation.name,
            render(relation.key_fields),
            render(relation.value_fields)
        )
    }

    /// Generate DDL for all relations.
    pub fn compile_all(relations: &[&SchemaRelation]) -> Vec<String> {
        relations
            .iter()
            .map(|rel| Self::compile_relation(rel))
            .collect()
    }

    /// Generate a single-row `:put` bound to one parameter per column.
    ///
    /// ```cozo
    /// ?[id, user_id] := id = $id, user_id = $user_id
    /// :put post { id => user_id }
    /// ```
    pub fn compile_put(relation: &SchemaRelation) -> String {
        let bindings = relation
            .all_fields()
            .map(|f| format!("{0} = ${0}", f.name))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "?[{}] := {}\n:put {} {{ {} => {} }}",
            Self::join_names(relation.all_fields()),
            bindings,
            relation.name,
            Self::join_names(relation.key_fields.iter()),
            Self::join_names(relation.value_fields.iter()),
        )
    }

    /// Generate a `:rm` of the row whose key matches `$id`.
    pub fn compile_delete(relation: &SchemaRelation) -> String {
        let keys = Self::join_names(relation.key_fields.iter());
        format!(
            "?[{keys}] := {keys} = $id\n:rm {} {{ {keys} }}",
            relation.name
        )
    }

    /// Select every column of the rows where `column == $value`, ordered by id.
    pub fn compile_select_where(relation: &SchemaRelation, column: &str) -> String {
        let columns = Self::join_names(relation.all_fields());
        format!(
            "?[{columns}] := *{}{{{columns}}}, {column} = $value\n:order id",
            relation.name
        )
    }

    /// Select every column of every row, ordered by id.
    pub fn compile_select_all(relation: &SchemaRelation) -> String {
        let columns = Self::join_names(relation.all_fields());
        format!("?[{columns}] := *{}{{{columns}}}\n:order id", relation.name)
    }

    /// Select at most one id where `column == $value`; used for existence checks.
    pub fn compile_exists_where(relation: &SchemaRelation, column: &str) -> String {
        let bound = if column == "id" {
            "id".to_string()
        } else {
            format!("id, {column}")
        };
        format!(
            "?[id] := *{}{{{bound}}}, {column} = $value\n:limit 1",
            relation.name
        )
    }

    /// Highest identifier currently stored; no rows when the relation is empty.
    pub fn compile_max_id(relation: &SchemaRelation) -> String {
        format!("?[id] := *{}{{id}}\n:order -id\n:limit 1", relation.name)
    }

    /// Rows whose `field` points at no row of the referenced relation.
    ///
    /// ```cozo
    /// ?[id, value] := *post{id, user_id: value}, not *user{id: value}
    /// ```
    pub fn compile_orphans(relation: &SchemaRelation, field: &SchemaField) -> Option<String> {
        let fk = field.references?;
        Some(format!(
            "?[id, value] := *{}{{id, {}: value}}, not *{}{{{}: value}}\n:order id",
            relation.name, field.name, fk.relation, fk.field
        ))
    }

    /// Remove every row of the relation.
    pub fn compile_clear(relation: &SchemaRelation) -> String {
        let keys = Self::join_names(relation.key_fields.iter());
        format!(
            "?[{keys}] := *{}{{{keys}}}\n:rm {} {{ {keys} }}",
            relation.name, relation.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::relations::*;

    /// Helper to normalize whitespace for comparison.
    fn normalize_whitespace(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_user_compilation() {
        let compiled = CozoCompiler::compile_relation(&USER);

        assert!(compiled.contains(":create user"));
        assert!(compiled.contains("id: Int"));
        assert!(compiled.contains("username: String,"));
        assert!(compiled.contains("firstname: String?"));
        assert!(compiled.contains("lastname: String?"));
        assert!(compiled.contains("=>"));

        assert_eq!(
            normalize_whitespace(&compiled),
            normalize_whitespace(
                ":create user { id: Int => username: String, firstname: String?, lastname: String?, email: String }"
            )
        );
    }

    #[test]
    fn test_media_compilation() {
        let compiled = CozoCompiler::compile_relation(&MEDIA);
        assert_eq!(
            normalize_whitespace(&compiled),
            ":create media { id: Int => type: String, url: String, post_id: Int }"
        );
    }

    #[test]
    fn test_compile_all() {
        let compiled = CozoCompiler::compile_all(ALL_RELATIONS);
        assert_eq!(compiled.len(), 5);
        assert!(compiled[0].starts_with(":create user"));
        assert!(compiled[4].starts_with(":create comment"));
    }

    #[test]
    fn test_compile_put() {
        let script = CozoCompiler::compile_put(&POST);
        assert_eq!(
            script,
            "?[id, user_id] := id = $id, user_id = $user_id\n:put post { id => user_id }"
        );
    }

    #[test]
    fn test_compile_delete() {
        let script = CozoCompiler::compile_delete(&COMMENT);
        assert_eq!(script, "?[id] := id = $id\n:rm comment { id }");
    }

    #[test]
    fn test_compile_select_where() {
        let script = CozoCompiler::compile_select_where(&FOLLOWER, "user_to_id");
        assert_eq!(
            script,
            "?[id, user_from_id, user_to_id] := *follower{id, user_from_id, user_to_id}, user_to_id = $value\n:order id"
        );
    }

    #[test]
    fn test_compile_exists_and_max() {
        assert_eq!(
            CozoCompiler::compile_exists_where(&POST, "user_id"),
            "?[id] := *post{id, user_id}, user_id = $value\n:limit 1"
        );
        assert_eq!(
            CozoCompiler::compile_max_id(&USER),
            "?[id] := *user{id}\n:order -id\n:limit 1"
        );
    }

    #[test]
    fn test_compile_orphans() {
        let script = CozoCompiler::compile_orphans(&COMMENT, COMMENT.field("post_id").unwrap());
        assert_eq!(
            script.as_deref(),
            Some("?[id, value] := *comment{id, post_id: value}, not *post{id: value}\n:order id")
        );
        assert!(CozoCompiler::compile_orphans(&COMMENT, COMMENT.field("comment_text").unwrap()).is_none());
    }

    #[test]
    fn test_compile_exists_on_key() {
        assert_eq!(
            CozoCompiler::compile_exists_where(&USER, "id"),
            "?[id] := *user{id}, id = $value\n:limit 1"
        );
    }
}
