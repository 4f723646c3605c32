//! Round-trip tests for the schema-driven codec
//!
//! Test Categories:
//! 1. End-to-end encoding of a flat resource
//! 2. Nested and referenced resources
//! 3. Array order
//! 4. Unknown-field tolerance
//! 5. Concurrent use

mod common;

use std::thread;

use serde_json::json;

use common::{codec, petstore, rex, tag, Owner, Pet, Tag, TreeNode};
use schemacodec::codec::{ObjectSerializer, Serializer};
use schemacodec::resolver::TypeRegistry;
use schemacodec::resource::{FieldValue, Value};
use schemacodec::schema::{ObjectSchema, SchemaNode, Specification};

schemacodec::resource! {
    struct Person {
        name: String,
        age: i64,
    }
}

schemacodec::resource! {
    struct Counter {
        hits: u64,
        delta: i64,
    }
}

// =============================================================================
// END-TO-END
// =============================================================================

/// Test: An empty string field is omitted, the rest is kept.
#[test]
fn test_person_encodes_sparse() {
    let specification = Specification::with_definitions([(
        "Person",
        SchemaNode::from(
            ObjectSchema::new()
                .with_property("name", SchemaNode::string())
                .with_property("age", SchemaNode::integer()),
        ),
    )]);
    let mut registry = TypeRegistry::new();
    registry.register::<Person>("Person").unwrap();
    let codec = ObjectSerializer::new(registry);

    let person = Person {
        name: String::new(),
        age: 5,
    };
    let text = codec.serialize(&person, &specification).unwrap();
    assert_eq!(text, r#"{"age":5}"#);

    let back: Person = codec.deserialize_as(&text, &specification).unwrap();
    assert_eq!(back, person);
}

/// Test: Every field kind survives a round trip when non-empty.
#[test]
fn test_pet_round_trip() {
    let codec = codec();
    let specification = petstore();

    let text = codec.serialize(&rex(), &specification).unwrap();
    let back: Pet = codec.deserialize_as(&text, &specification).unwrap();
    assert_eq!(back, rex());
}

/// Test: Integers at both ends of the u64 and i64 ranges are carried exactly.
#[test]
fn test_integer_extremes_round_trip() {
    let specification = Specification::with_definitions([(
        "Counter",
        SchemaNode::from(
            ObjectSchema::new()
                .with_property("hits", SchemaNode::integer())
                .with_property("delta", SchemaNode::integer()),
        ),
    )]);
    let mut registry = TypeRegistry::new();
    registry.register::<Counter>("Counter").unwrap();
    let codec = ObjectSerializer::new(registry);

    let counter = Counter {
        hits: u64::MAX,
        delta: i64::MIN,
    };
    let text = codec.serialize(&counter, &specification).unwrap();
    assert_eq!(
        text,
        r#"{"hits":18446744073709551615,"delta":-9223372036854775808}"#
    );

    let back: Counter = codec.deserialize_as(&text, &specification).unwrap();
    assert_eq!(back, counter);
}

/// Test: Output keys follow declaration order and wire names.
#[test]
fn test_pet_wire_form() {
    let text = codec().serialize(&rex(), &petstore()).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"{"id":7,"name":"Rex","type":"dog","born":"2015-03-07","#,
            r#""adopted":"2016-01-01T12:30:00+0200","vaccinated":true,"weight":4.5,"#,
            r#""tags":[{"id":1,"label":"good"},{"id":2,"label":"loud"}],"#,
            r#""owner":{"name":"Sam"}}"#
        )
    );
}

// =============================================================================
// NESTING
// =============================================================================

/// Test: Mutually referencing definitions nest through `$ref`.
#[test]
fn test_owner_with_pets() {
    let codec = codec();
    let specification = petstore();

    let owner = Owner {
        name: "Sam".into(),
        pets: vec![Pet {
            name: "Rex".into(),
            ..Default::default()
        }],
    };

    let text = codec.serialize(&owner, &specification).unwrap();
    assert_eq!(text, r#"{"name":"Sam","pets":[{"name":"Rex"}]}"#);

    let back: Owner = codec.deserialize_as(&text, &specification).unwrap();
    assert_eq!(back, owner);
}

/// Test: A self-referential schema encodes a tree of any depth.
#[test]
fn test_self_referential_tree() {
    let codec = codec();
    let specification = petstore();

    let tree = TreeNode {
        label: "root".into(),
        children: vec![
            TreeNode {
                label: "a".into(),
                children: vec![TreeNode {
                    label: "a1".into(),
                    children: Vec::new(),
                }],
            },
            TreeNode {
                label: "b".into(),
                children: Vec::new(),
            },
        ],
    };

    let text = codec.serialize(&tree, &specification).unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&text).unwrap(),
        json!({
            "label": "root",
            "children": [
                {"label": "a", "children": [{"label": "a1"}]},
                {"label": "b"}
            ]
        })
    );

    let back: TreeNode = codec.deserialize_as(&text, &specification).unwrap();
    assert_eq!(back, tree);
}

// =============================================================================
// ARRAYS
// =============================================================================

/// Test: Array-typed root definitions keep element order.
#[test]
fn test_array_root_order() {
    let codec = codec();
    let specification = petstore();

    let tags = Value::Array(vec![
        tag(3, "c").to_value(),
        tag(1, "a").to_value(),
        tag(2, "b").to_value(),
    ]);
    let text = codec.serialize_as(&tags, "Tags", &specification).unwrap();
    assert_eq!(
        text,
        r#"[{"id":3,"label":"c"},{"id":1,"label":"a"},{"id":2,"label":"b"}]"#
    );

    let back = codec.deserialize(&text, "Tags", &specification).unwrap();
    let back = Vec::<Tag>::from_value(back).unwrap();
    let ids: Vec<i64> = back.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

/// Test: An empty array root encodes and decodes as an empty array.
#[test]
fn test_empty_array_root() {
    let codec = codec();
    let specification = petstore();

    let text = codec
        .serialize_as(&Value::Array(Vec::new()), "Tags", &specification)
        .unwrap();
    assert_eq!(text, "[]");

    let back = codec.deserialize("[]", "Tags", &specification).unwrap();
    assert_eq!(back, Value::Array(Vec::new()));
}

// =============================================================================
// UNKNOWN FIELDS
// =============================================================================

/// Test: Keys without a matching field are skipped silently.
#[test]
fn test_unknown_fields_ignored() {
    let pet: Pet = codec()
        .deserialize_as(
            r#"{"name":"Rex","nickname":"R","extra":{"deep":[1,2,3]}}"#,
            &petstore(),
        )
        .unwrap();
    assert_eq!(pet.name, "Rex");
    assert_eq!(pet.id, 0);
}

/// Test: JSON null assigns the zero value or `None`.
#[test]
fn test_null_fields() {
    let pet: Pet = codec()
        .deserialize_as(
            r#"{"name":null,"born":null,"tags":null,"owner":null}"#,
            &petstore(),
        )
        .unwrap();
    assert_eq!(pet, Pet::default());
}

/// Test: Input key order does not matter.
#[test]
fn test_input_key_order_irrelevant() {
    let pet: Pet = codec()
        .deserialize_as(r#"{"type":"cat","id":3,"name":"Tom"}"#, &petstore())
        .unwrap();
    assert_eq!((pet.id, pet.name.as_str(), pet.kind.as_str()), (3, "Tom", "cat"));
}

// =============================================================================
// CONCURRENCY
// =============================================================================

/// Test: One serializer and specification serve many threads.
#[test]
fn test_concurrent_use() {
    let codec = codec();
    let specification = petstore();

    thread::scope(|scope| {
        for i in 0..8 {
            let codec = &codec;
            let specification = &specification;
            scope.spawn(move || {
                let pet = Pet {
                    id: i + 1,
                    name: format!("pet-{}", i),
                    ..rex()
                };
                for _ in 0..50 {
                    let text = codec.serialize(&pet, specification).unwrap();
                    let back: Pet = codec.deserialize_as(&text, specification).unwrap();
                    assert_eq!(back, pet);
                }
            });
        }
    });
}
