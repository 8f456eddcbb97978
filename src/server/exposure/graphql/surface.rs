//! Declared API surface and its check against the built schema
//!
//! Resolver bindings are already checked by the compiler, but names,
//! nullability and list cardinality come from attributes and return types.
//! [`verify_sdl`] parses the SDL the engine exports and compares it with the
//! tables below, so a drift fails at startup rather than on a client.

use crate::core::ConfigError;
use graphql_parser::schema::{Definition, Document, Type, TypeDefinition, parse_schema};
use std::collections::HashMap;

/// `(type, field, signature)` for every output and input field
pub const FIELDS: &[(&str, &str, &str)] = &[
    ("User", "email", "String!"),
    ("User", "id", "ID!"),
    ("User", "name", "String"),
    ("User", "posts", "[Post!]!"),
    ("Post", "content", "String"),
    ("Post", "id", "ID!"),
    ("Post", "published", "Boolean!"),
    ("Post", "title", "String!"),
    ("Post", "author", "User"),
    ("Query", "feed", "[Post!]!"),
    ("Query", "post", "Post"),
    ("Query", "getUser", "User"),
    ("Mutation", "createUser", "User!"),
    ("Mutation", "createDraft", "Post!"),
    ("Mutation", "publish", "Post"),
    ("Mutation", "associateUserWithPost", "User"),
    ("UserCreateInput", "email", "String!"),
    ("UserCreateInput", "name", "String"),
    ("UserCreateInput", "posts", "[PostCreateManyWithoutAuthorInput!]"),
    ("PostCreateManyWithoutAuthorInput", "content", "String"),
    ("PostCreateManyWithoutAuthorInput", "published", "Boolean"),
    ("PostCreateManyWithoutAuthorInput", "title", "String!"),
];

/// `(type, field, argument, signature)` for every root field argument
pub const ARGUMENTS: &[(&str, &str, &str, &str)] = &[
    ("Query", "post", "id", "ID!"),
    ("Query", "getUser", "email", "String!"),
    ("Mutation", "createUser", "data", "UserCreateInput!"),
    ("Mutation", "createDraft", "authorEmail", "String"),
    ("Mutation", "createDraft", "content", "String"),
    ("Mutation", "createDraft", "title", "String!"),
    ("Mutation", "publish", "id", "ID!"),
    ("Mutation", "associateUserWithPost", "email", "String!"),
    ("Mutation", "associateUserWithPost", "postId", "ID!"),
];

/// Field signatures and argument signatures of one type in the SDL
#[derive(Debug, Default)]
struct TypeShape {
    fields: HashMap<String, String>,
    arguments: HashMap<(String, String), String>,
}

fn render(ty: &Type<'_, String>) -> String {
    match ty {
        Type::NamedType(name) => name.clone(),
        Type::ListType(inner) => format!("[{}]", render(inner)),
        Type::NonNullType(inner) => format!("{}!", render(inner)),
    }
}

fn collect_shapes(document: &Document<'_, String>) -> HashMap<String, TypeShape> {
    let mut shapes = HashMap::new();

    for definition in &document.definitions {
        let Definition::TypeDefinition(type_def) = definition else {
            continue;
        };

        match type_def {
            TypeDefinition::Object(object) => {
                let shape: &mut TypeShape = shapes.entry(object.name.clone()).or_default();
                for field in &object.fields {
                    shape
                        .fields
                        .insert(field.name.clone(), render(&field.field_type));
                    for arg in &field.arguments {
                        shape.arguments.insert(
                            (field.name.clone(), arg.name.clone()),
                            render(&arg.value_type),
                        );
                    }
                }
            }
            TypeDefinition::InputObject(input) => {
                let shape: &mut TypeShape = shapes.entry(input.name.clone()).or_default();
                for field in &input.fields {
                    shape
                        .fields
                        .insert(field.name.clone(), render(&field.value_type));
                }
            }
            _ => {}
        }
    }

    shapes
}

/// Compare exported SDL with the declared surface
///
/// Every mismatch is reported in a single [`ConfigError::SchemaMismatch`].
pub fn verify_sdl(sdl: &str) -> Result<(), ConfigError> {
    let document = parse_schema::<String>(sdl).map_err(|e| ConfigError::SchemaMismatch {
        message: format!("exported SDL does not parse: {}", e),
    })?;
    let shapes = collect_shapes(&document);

    let mut problems = Vec::new();

    for (type_name, field, expected) in FIELDS {
        let actual = shapes
            .get(*type_name)
            .and_then(|shape| shape.fields.get(*field));
        match actual {
            Some(actual) if actual == expected => {}
            Some(actual) => problems.push(format!(
                "{}.{} is {}, expected {}",
                type_name, field, actual, expected
            )),
            None => problems.push(format!("{}.{} is missing", type_name, field)),
        }
    }

    for (type_name, field, arg, expected) in ARGUMENTS {
        let actual = shapes.get(*type_name).and_then(|shape| {
            shape
                .arguments
                .get(&(field.to_string(), arg.to_string()))
        });
        match actual {
            Some(actual) if actual == expected => {}
            Some(actual) => problems.push(format!(
                "{}.{}({}) is {}, expected {}",
                type_name, field, arg, actual, expected
            )),
            None => problems.push(format!("{}.{}({}) is missing", type_name, field, arg)),
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::SchemaMismatch {
            message: problems.join("; "),
        })
    }
}
