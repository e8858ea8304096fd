//! Schema loading from GraphQL SDL or an introspection result.
//!
//! Both sources are assumed to be valid already. Anything that does not fit
//! the model (directives, subscriptions, descriptions) is dropped here.

use graphql_parser::schema::{self as sdl, Definition, TypeDefinition, TypeExtension};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::{FieldDef, InputValue, NamedType, Schema, TypeKind, TypeRef};
use crate::error::{Result, SchemaMapError};

impl Schema {
    /// Load a schema file. `.json` files are read as introspection results,
    /// everything else as SDL.
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "loading schema");

        let source = fs::read_to_string(path)?;
        let schema = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_introspection(&source)?,
            _ => Self::from_sdl(&source)?,
        };

        debug!(types = schema.type_count(), "schema loaded");
        Ok(schema)
    }

    /// Parse GraphQL SDL.
    pub fn from_sdl(source: &str) -> Result<Self> {
        let document = sdl::parse_schema::<String>(source)
            .map_err(|e| SchemaMapError::SchemaParse(e.to_string()))?;

        let mut schema = Schema::new();
        let mut query_type = None;
        let mut mutation_type = None;
        let mut explicit_roots = false;

        for definition in &document.definitions {
            match definition {
                Definition::SchemaDefinition(def) => {
                    explicit_roots = true;
                    query_type = def.query.clone();
                    mutation_type = def.mutation.clone();
                }
                Definition::TypeDefinition(def) => schema.add_type(named_type_from_sdl(def)),
                Definition::TypeExtension(_) | Definition::DirectiveDefinition(_) => {}
            }
        }

        // Extensions may precede the type they extend.
        for definition in &document.definitions {
            if let Definition::TypeExtension(ext) = definition {
                extend_from_sdl(&mut schema, ext);
            }
        }

        if !explicit_roots {
            query_type = schema.get("Query").map(|t| t.name.clone());
            mutation_type = schema.get("Mutation").map(|t| t.name.clone());
        }
        schema.set_query_type(query_type);
        schema.set_mutation_type(mutation_type);

        Ok(schema)
    }

    /// Parse an introspection result, with or without the `data` envelope.
    pub fn from_introspection(source: &str) -> Result<Self> {
        let raw: IntrospectionDocument = serde_json::from_str(source)?;
        let introspection = match raw {
            IntrospectionDocument::Envelope { data } => data.schema,
            IntrospectionDocument::Bare { schema } => schema,
        };

        let mut schema = Schema::new();
        for full in introspection.types {
            let Some(name) = full.name else {
                debug!("skipping introspection type without a name");
                continue;
            };
            let kind = match full.kind.as_str() {
                "OBJECT" | "INTERFACE" | "UNION" => TypeKind::Composite,
                "SCALAR" => TypeKind::Scalar,
                "ENUM" => TypeKind::Enum,
                "INPUT_OBJECT" => TypeKind::Input,
                other => {
                    debug!(name = %name, kind = other, "skipping unsupported type kind");
                    continue;
                }
            };

            let mut ty = NamedType::new(name, kind);
            for field in full.fields.unwrap_or_default() {
                ty.fields.insert(
                    field.name.clone(),
                    FieldDef {
                        name: field.name,
                        ty: field.ty.and_then(|t| t.into_type_ref()),
                        arguments: field
                            .args
                            .into_iter()
                            .filter_map(|arg| {
                                Some(InputValue {
                                    name: arg.name,
                                    ty: arg.ty?.into_type_ref()?,
                                })
                            })
                            .collect(),
                    },
                );
            }
            schema.add_type(ty);
        }

        schema.set_query_type(introspection.query_type.map(|r| r.name));
        schema.set_mutation_type(introspection.mutation_type.map(|r| r.name));
        Ok(schema)
    }
}

fn named_type_from_sdl(def: &TypeDefinition<'_, String>) -> NamedType {
    match def {
        TypeDefinition::Object(obj) => {
            fields_from_sdl(NamedType::new(&obj.name, TypeKind::Composite), &obj.fields)
        }
        TypeDefinition::Interface(iface) => {
            fields_from_sdl(NamedType::new(&iface.name, TypeKind::Composite), &iface.fields)
        }
        TypeDefinition::Union(union) => NamedType::new(&union.name, TypeKind::Composite),
        TypeDefinition::Scalar(scalar) => NamedType::new(&scalar.name, TypeKind::Scalar),
        TypeDefinition::Enum(en) => NamedType::new(&en.name, TypeKind::Enum),
        TypeDefinition::InputObject(input) => NamedType::new(&input.name, TypeKind::Input),
    }
}

fn extend_from_sdl(schema: &mut Schema, ext: &TypeExtension<'_, String>) {
    let (name, fields) = match ext {
        TypeExtension::Object(obj) => (&obj.name, &obj.fields),
        TypeExtension::Interface(iface) => (&iface.name, &iface.fields),
        _ => return,
    };

    let Some(existing) = schema.get(name).cloned() else {
        debug!(name = %name, "extension of unknown type ignored");
        return;
    };
    schema.add_type(fields_from_sdl(existing, fields));
}

fn fields_from_sdl(mut ty: NamedType, fields: &[sdl::Field<'_, String>]) -> NamedType {
    for field in fields {
        let mut def = FieldDef::new(&field.name, type_ref_from_sdl(&field.field_type));
        for arg in &field.arguments {
            def = def.with_argument(&arg.name, type_ref_from_sdl(&arg.value_type));
        }
        ty.fields.insert(def.name.clone(), def);
    }
    ty
}

fn type_ref_from_sdl(ty: &sdl::Type<'_, String>) -> TypeRef {
    match ty {
        sdl::Type::NamedType(name) => TypeRef::Named(name.clone()),
        sdl::Type::ListType(inner) => TypeRef::List(Box::new(type_ref_from_sdl(inner))),
        sdl::Type::NonNullType(inner) => TypeRef::NonNull(Box::new(type_ref_from_sdl(inner))),
    }
}

// ─── Introspection JSON ────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum IntrospectionDocument {
    Envelope { data: IntrospectionData },
    Bare {
        #[serde(rename = "__schema")]
        schema: IntrospectionSchema,
    },
}

#[derive(Deserialize)]
struct IntrospectionData {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: Option<TypeName>,
    mutation_type: Option<TypeName>,
    types: Vec<FullType>,
}

#[derive(Deserialize)]
struct TypeName {
    name: String,
}

#[derive(Deserialize)]
struct FullType {
    kind: String,
    name: Option<String>,
    fields: Option<Vec<IntrospectionField>>,
}

#[derive(Deserialize)]
struct IntrospectionField {
    name: String,
    #[serde(default)]
    args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    ty: Option<IntrospectionTypeRef>,
}

#[derive(Deserialize)]
struct IntrospectionInputValue {
    name: String,
    #[serde(rename = "type")]
    ty: Option<IntrospectionTypeRef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionTypeRef {
    kind: String,
    name: Option<String>,
    of_type: Option<Box<IntrospectionTypeRef>>,
}

impl IntrospectionTypeRef {
    fn into_type_ref(self) -> Option<TypeRef> {
        match self.kind.as_str() {
            "NON_NULL" => Some(TypeRef::NonNull(Box::new(self.of_type?.into_type_ref()?))),
            "LIST" => Some(TypeRef::List(Box::new(self.of_type?.into_type_ref()?))),
            _ => self.name.map(TypeRef::Named),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OperationKind;
    use std::io::Write;

    const SDL: &str = r#"
        type Query {
            loadItem(id: ID!, status: ItemStatus): Item
            search(term: String!, cursor: Cursor): [Item!]!
        }

        type Item {
            id: ID!
            audio: Audio
        }

        type Audio {
            url: String!
        }

        enum ItemStatus { ACTIVE ARCHIVED }
        scalar Cursor
        union Media = Item | Audio
        input ItemFilter { id: ID }
    "#;

    #[test]
    fn test_sdl_kinds_and_fields() {
        let schema = Schema::from_sdl(SDL).unwrap();

        assert_eq!(schema.kind_of("Item"), Some(TypeKind::Composite));
        assert_eq!(schema.kind_of("Media"), Some(TypeKind::Composite));
        assert_eq!(schema.kind_of("ItemStatus"), Some(TypeKind::Enum));
        assert_eq!(schema.kind_of("Cursor"), Some(TypeKind::Scalar));
        assert_eq!(schema.kind_of("ItemFilter"), Some(TypeKind::Input));

        let item = schema.get("Item").unwrap();
        let names: Vec<&str> = item.fields.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["id", "audio"]);

        let query = schema.get("Query").unwrap();
        let load = &query.fields["loadItem"];
        assert_eq!(load.arguments.len(), 2);
        assert_eq!(load.arguments[0].ty.to_string(), "ID!");
    }

    #[test]
    fn test_sdl_conventional_roots() {
        let schema = Schema::from_sdl(SDL).unwrap();
        assert_eq!(schema.query_type(), Some("Query"));
        assert_eq!(schema.mutation_type(), None);
    }

    #[test]
    fn test_sdl_explicit_schema_definition() {
        let schema = Schema::from_sdl(
            r#"
            schema { query: RootQuery mutation: RootMutation }
            type RootQuery { ping: String }
            type RootMutation { pong: String }
            "#,
        )
        .unwrap();

        let roots = schema.root_types();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].0, OperationKind::Query);
        assert_eq!(roots[0].1.name, "RootQuery");
        assert_eq!(roots[1].1.name, "RootMutation");
    }

    #[test]
    fn test_sdl_extension_before_definition() {
        let schema = Schema::from_sdl(
            r#"
            extend type Query { b: Int }
            type Query { a: String }
            "#,
        )
        .unwrap();

        let query = schema.get("Query").unwrap();
        let names: Vec<&str> = query.fields.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_sdl_type_extension_appends_fields() {
        let schema = Schema::from_sdl(
            r#"
            type Query { a: String }
            extend type Query { b: Int }
            "#,
        )
        .unwrap();

        let query = schema.get("Query").unwrap();
        assert_eq!(query.fields.len(), 2);
        assert!(query.fields.contains_key("b"));
    }

    #[test]
    fn test_sdl_parse_error() {
        let result = Schema::from_sdl("type Query {");
        assert!(matches!(result, Err(SchemaMapError::SchemaParse(_))));
    }

    #[test]
    fn test_introspection_with_envelope() {
        let json = r#"{
          "data": {
            "__schema": {
              "queryType": { "name": "Query" },
              "mutationType": null,
              "types": [
                {
                  "kind": "OBJECT",
                  "name": "Query",
                  "fields": [
                    {
                      "name": "item",
                      "args": [
                        { "name": "id", "type": { "kind": "NON_NULL", "name": null,
                          "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } } }
                      ],
                      "type": { "kind": "OBJECT", "name": "Item", "ofType": null }
                    }
                  ]
                },
                {
                  "kind": "OBJECT",
                  "name": "Item",
                  "fields": [
                    { "name": "id", "args": [],
                      "type": { "kind": "SCALAR", "name": "ID", "ofType": null } },
                    { "name": "broken", "args": [], "type": null }
                  ]
                },
                { "kind": "OBJECT", "name": "__Type", "fields": [] },
                { "kind": "ENUM", "name": "Color", "fields": null }
              ]
            }
          }
        }"#;

        let schema = Schema::from_introspection(json).unwrap();
        assert_eq!(schema.query_type(), Some("Query"));
        assert_eq!(schema.kind_of("Color"), Some(TypeKind::Enum));

        let item = schema.get("Item").unwrap();
        assert_eq!(item.fields["broken"].ty, None);

        let arg = &schema.get("Query").unwrap().fields["item"].arguments[0];
        assert_eq!(arg.ty.to_string(), "ID!");
    }

    #[test]
    fn test_introspection_bare() {
        let json = r#"{ "__schema": { "queryType": null, "types": [] } }"#;
        let schema = Schema::from_introspection(json).unwrap();
        assert!(schema.root_types().is_empty());
    }

    #[test]
    fn test_load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.graphql");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(SDL.as_bytes()).unwrap();

        let schema = Schema::load(&path).unwrap();
        assert!(schema.get("Audio").is_some());

        let missing = Schema::load(&dir.path().join("missing.graphql"));
        assert!(matches!(missing, Err(SchemaMapError::Io(_))));
    }
}
