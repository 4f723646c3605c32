//! Shared fixtures for integration tests
#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::json;

use schemacodec::codec::ObjectSerializer;
use schemacodec::resolver::TypeRegistry;
use schemacodec::resource;
use schemacodec::schema::Specification;

resource! {
    pub struct Tag {
        pub id: i64,
        pub label: String,
    }
}

resource! {
    pub struct Owner {
        pub name: String,
        pub pets: Vec<Pet>,
    }
}

resource! {
    pub struct Pet {
        pub id: i64,
        pub name: String,
        pub kind: String => "type",
        pub born: Option<NaiveDate>,
        pub adopted: Option<DateTime<FixedOffset>>,
        pub vaccinated: bool,
        pub weight: f64,
        pub tags: Vec<Tag>,
        pub owner: Option<Owner>,
    }
}

resource! {
    pub struct TreeNode {
        pub label: String,
        pub children: Vec<TreeNode>,
    }
}

/// Swagger 2 petstore covering every node kind
pub fn petstore() -> Specification {
    Specification::from_document(&json!({
        "swagger": "2.0",
        "info": {"title": "petstore", "version": "1.0"},
        "definitions": {
            "Pet": {
                "type": "object",
                "properties": {
                    "id": {"type": "integer", "format": "int64"},
                    "name": {"type": "string"},
                    "type": {"type": "string"},
                    "born": {"type": "string", "format": "date"},
                    "adopted": {"type": "string", "format": "date-time"},
                    "vaccinated": {"type": "boolean"},
                    "weight": {"type": "number", "format": "double"},
                    "tags": {"type": "array", "items": {"$ref": "#/definitions/Tag"}},
                    "owner": {"$ref": "#/definitions/Owner"}
                }
            },
            "Tag": {
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "label": {"type": "string"}
                }
            },
            "Owner": {
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "pets": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}
                }
            },
            "TreeNode": {
                "type": "object",
                "properties": {
                    "label": {"type": "string"},
                    "children": {"type": "array", "items": {"$ref": "#/definitions/TreeNode"}}
                }
            },
            "Tags": {"type": "array", "items": {"$ref": "#/definitions/Tag"}}
        }
    }))
    .unwrap()
}

/// Registry with every fixture type
pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<Pet>("Pet").unwrap();
    registry.register::<Tag>("Tag").unwrap();
    registry.register::<Owner>("Owner").unwrap();
    registry.register::<TreeNode>("TreeNode").unwrap();
    registry
}

pub fn codec() -> ObjectSerializer<TypeRegistry> {
    ObjectSerializer::new(registry())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn timestamp(text: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(text).unwrap()
}

pub fn tag(id: i64, label: &str) -> Tag {
    Tag {
        id,
        label: label.to_string(),
    }
}

/// A pet with every field populated
pub fn rex() -> Pet {
    Pet {
        id: 7,
        name: "Rex".into(),
        kind: "dog".into(),
        born: Some(date(2015, 3, 7)),
        adopted: Some(timestamp("2016-01-01T12:30:00+02:00")),
        vaccinated: true,
        weight: 4.5,
        tags: vec![tag(1, "good"), tag(2, "loud")],
        owner: Some(Owner {
            name: "Sam".into(),
            pets: Vec::new(),
        }),
    }
}
