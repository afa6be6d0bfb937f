//! The contract entity model.
//!
//! Typed mirror of the contract specification file: named requests and named
//! type declarations, each with nested scalar and list-valued fields. All
//! values are immutable once loaded; equality is deep structural equality
//! with order-sensitive lists.
//!
//! Each struct implements [`Entity`], exposing its fields to the diff engine
//! under the names declared in the schema registry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::{Entity, EntityKind};

/// One version of a contract specification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiSpec {
    #[serde(default)]
    pub requests: Vec<Request>,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// HTTP verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Head => "HEAD",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API family a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Amazons3,
    Spectrads3,
    Spectrainternal,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Amazons3 => "amazons3",
            Classification::Spectrads3 => "spectrads3",
            Classification::Spectrainternal => "spectrainternal",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a request requires or forbids a bucket/object path component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Requirement {
    Required,
    NotAllowed,
}

impl Requirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Requirement::Required => "REQUIRED",
            Requirement::NotAllowed => "NOT_ALLOWED",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cardinality of the resource a request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Singleton,
    NonSingleton,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Singleton => "SINGLETON",
            ResourceType::NonSingleton => "NON_SINGLETON",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named request definition.
///
/// `action`, `resource` and `operation` are open vocabularies upstream, so
/// they stay plain strings rather than closed enums.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Request {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_verb: Option<HttpVerb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_requirement: Option<Requirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_requirement: Option<Requirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(default)]
    pub include_in_path: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response_codes: Vec<ResponseCode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional_query_params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_query_params: Vec<Param>,
}

/// A named type declaration: structured elements and/or enum constants.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_to_marshal: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_constants: Vec<EnumConstant>,
}

/// A query parameter of a request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub nullable: bool,
}

/// One response status of a request, with its payload types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseCode {
    pub code: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response_types: Vec<ResponseType>,
}

/// One payload type of a response code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseType {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_type_name: Option<String>,
}

/// A structured member of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub nullable: bool,
}

/// A marker annotation attached to an element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<AnnotationElement>,
}

/// One key/value entry of an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnotationElement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

/// One constant of an enum type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnumConstant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

/// An auxiliary property of an enum constant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

fn dyn_refs<T: Entity>(items: &[T]) -> Vec<&dyn Entity> {
    items.iter().map(|e| e as &dyn Entity).collect()
}

impl Entity for Request {
    fn kind(&self) -> EntityKind {
        EntityKind::Request
    }

    fn scalar(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "http_verb" => self.http_verb.map(|v| v.to_string()),
            "classification" => self.classification.map(|v| v.to_string()),
            "bucket_requirement" => self.bucket_requirement.map(|v| v.to_string()),
            "object_requirement" => self.object_requirement.map(|v| v.to_string()),
            "action" => self.action.clone(),
            "resource" => self.resource.clone(),
            "resource_type" => self.resource_type.map(|v| v.to_string()),
            "operation" => self.operation.clone(),
            "include_in_path" => Some(self.include_in_path.to_string()),
            _ => None,
        }
    }

    fn elements(&self, field: &str) -> Vec<&dyn Entity> {
        match field {
            "response_codes" => dyn_refs(&self.response_codes),
            "optional_query_params" => dyn_refs(&self.optional_query_params),
            "required_query_params" => dyn_refs(&self.required_query_params),
            _ => Vec::new(),
        }
    }
}

impl Entity for TypeDef {
    fn kind(&self) -> EntityKind {
        EntityKind::TypeDef
    }

    fn scalar(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "name_to_marshal" => self.name_to_marshal.clone(),
            _ => None,
        }
    }

    fn elements(&self, field: &str) -> Vec<&dyn Entity> {
        match field {
            "elements" => dyn_refs(&self.elements),
            "enum_constants" => dyn_refs(&self.enum_constants),
            _ => Vec::new(),
        }
    }
}

impl Entity for Param {
    fn kind(&self) -> EntityKind {
        EntityKind::Param
    }

    fn scalar(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "type" => self.type_name.clone(),
            "nullable" => Some(self.nullable.to_string()),
            _ => None,
        }
    }

    fn elements(&self, _field: &str) -> Vec<&dyn Entity> {
        Vec::new()
    }
}

impl Entity for ResponseCode {
    fn kind(&self) -> EntityKind {
        EntityKind::ResponseCode
    }

    fn scalar(&self, field: &str) -> Option<String> {
        match field {
            "code" => Some(self.code.to_string()),
            _ => None,
        }
    }

    fn elements(&self, field: &str) -> Vec<&dyn Entity> {
        match field {
            "response_types" => dyn_refs(&self.response_types),
            _ => Vec::new(),
        }
    }
}

impl Entity for ResponseType {
    fn kind(&self) -> EntityKind {
        EntityKind::ResponseType
    }

    fn scalar(&self, field: &str) -> Option<String> {
        match field {
            "type" => Some(self.type_name.clone()),
            "component_type" => self.component_type.clone(),
            "original_type_name" => self.original_type_name.clone(),
            _ => None,
        }
    }

    fn elements(&self, _field: &str) -> Vec<&dyn Entity> {
        Vec::new()
    }
}

impl Entity for Element {
    fn kind(&self) -> EntityKind {
        EntityKind::Element
    }

    fn scalar(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "type" => self.type_name.clone(),
            "component_type" => self.component_type.clone(),
            "nullable" => Some(self.nullable.to_string()),
            _ => None,
        }
    }

    fn elements(&self, field: &str) -> Vec<&dyn Entity> {
        match field {
            "annotations" => dyn_refs(&self.annotations),
            _ => Vec::new(),
        }
    }
}

impl Entity for Annotation {
    fn kind(&self) -> EntityKind {
        EntityKind::Annotation
    }

    fn scalar(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }

    fn elements(&self, field: &str) -> Vec<&dyn Entity> {
        match field {
            "elements" => dyn_refs(&self.elements),
            _ => Vec::new(),
        }
    }
}

impl Entity for AnnotationElement {
    fn kind(&self) -> EntityKind {
        EntityKind::AnnotationElement
    }

    fn scalar(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "value" => self.value.clone(),
            "value_type" => self.value_type.clone(),
            _ => None,
        }
    }

    fn elements(&self, _field: &str) -> Vec<&dyn Entity> {
        Vec::new()
    }
}

impl Entity for EnumConstant {
    fn kind(&self) -> EntityKind {
        EntityKind::EnumConstant
    }

    fn scalar(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }

    fn elements(&self, field: &str) -> Vec<&dyn Entity> {
        match field {
            "properties" => dyn_refs(&self.properties),
            _ => Vec::new(),
        }
    }
}

impl Entity for Property {
    fn kind(&self) -> EntityKind {
        EntityKind::Property
    }

    fn scalar(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "value" => self.value.clone(),
            "value_type" => self.value_type.clone(),
            _ => None,
        }
    }

    fn elements(&self, _field: &str) -> Vec<&dyn Entity> {
        Vec::new()
    }
}
