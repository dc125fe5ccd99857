//! Language-neutral service definition model consumed by the naming pass.
//!
//! The model is produced by an upstream schema parser (or loaded from JSON)
//! and is never mutated by this crate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NamingError;
use crate::position::SourcePosition;

/// Kind of a definition element, used for attribute rules and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Service,
    Method,
    Dto,
    Enum,
    EnumValue,
    ErrorSet,
    Error,
    Field,
}

impl ElementKind {
    /// Human-readable noun used in validation messages.
    pub fn describe(self) -> &'static str {
        match self {
            ElementKind::Service => "service",
            ElementKind::Method => "method",
            ElementKind::Dto => "data object",
            ElementKind::Enum => "enumeration",
            ElementKind::EnumValue => "enumeration value",
            ElementKind::ErrorSet => "error set",
            ElementKind::Error => "error",
            ElementKind::Field => "field",
        }
    }
}

/// Common view over every element that can carry extension attributes.
pub trait Element {
    fn kind(&self) -> ElementKind;
    fn name(&self) -> &str;
    fn position(&self) -> &SourcePosition;
    fn attributes(&self) -> &[AttributeDef];

    /// Attribute declarations whose tag equals `tag` exactly, in source order.
    fn attributes_with_tag(&self, tag: &str) -> Vec<&AttributeDef> {
        self.attributes()
            .iter()
            .filter(|attribute| attribute.name == tag)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One `name: value` pair inside an attribute declaration.
pub struct AttributeParameter {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Extension attribute declaration, e.g. `[csharp(namespace: Acme.Widgets)]`.
pub struct AttributeDef {
    /// Attribute tag; target-language attributes use the language identifier.
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<AttributeParameter>,
    #[serde(default)]
    pub position: SourcePosition,
}

impl AttributeDef {
    pub fn new(name: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            position,
        }
    }

    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        position: SourcePosition,
    ) -> Self {
        self.parameters.push(AttributeParameter {
            name: name.into(),
            value: value.into(),
            position,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Root of the definition model.
pub struct ServiceDefinition {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
    #[serde(default)]
    pub members: Vec<ServiceMember>,
    #[serde(default)]
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
/// Top-level member of a service, in schema declaration order.
pub enum ServiceMember {
    Method(MethodDef),
    Dto(DtoDef),
    Enum(EnumDef),
    ErrorSet(ErrorSetDef),
    /// Member of a kind this crate does not know about.
    #[serde(other)]
    Unrecognized,
}

impl ServiceMember {
    /// The member as a generic element; `None` for unrecognized members.
    pub fn as_element(&self) -> Option<&dyn Element> {
        match self {
            ServiceMember::Method(method) => Some(method),
            ServiceMember::Dto(dto) => Some(dto),
            ServiceMember::Enum(enum_def) => Some(enum_def),
            ServiceMember::ErrorSet(error_set) => Some(error_set),
            ServiceMember::Unrecognized => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDef {
    pub name: String,
    #[serde(default)]
    pub request_fields: Vec<FieldDef>,
    #[serde(default)]
    pub response_fields: Vec<FieldDef>,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
    #[serde(default)]
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Data transfer object (a named record of fields).
pub struct DtoDef {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
    #[serde(default)]
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValueDef>,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
    #[serde(default)]
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueDef {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
    #[serde(default)]
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSetDef {
    pub name: String,
    #[serde(default)]
    pub errors: Vec<ErrorDef>,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
    #[serde(default)]
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDef {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
    #[serde(default)]
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,
    /// Schema type of the field; carried through for emitters, unused here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
    #[serde(default)]
    pub position: SourcePosition,
}

macro_rules! impl_element {
    ($ty:ty, $kind:expr) => {
        impl Element for $ty {
            fn kind(&self) -> ElementKind {
                $kind
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn position(&self) -> &SourcePosition {
                &self.position
            }

            fn attributes(&self) -> &[AttributeDef] {
                &self.attributes
            }
        }

        impl $ty {
            pub fn with_attribute(mut self, attribute: AttributeDef) -> Self {
                self.attributes.push(attribute);
                self
            }
        }
    };
}

impl_element!(ServiceDefinition, ElementKind::Service);
impl_element!(MethodDef, ElementKind::Method);
impl_element!(DtoDef, ElementKind::Dto);
impl_element!(EnumDef, ElementKind::Enum);
impl_element!(EnumValueDef, ElementKind::EnumValue);
impl_element!(ErrorSetDef, ElementKind::ErrorSet);
impl_element!(ErrorDef, ElementKind::Error);
impl_element!(FieldDef, ElementKind::Field);

impl ServiceDefinition {
    pub fn new(name: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            members: Vec::new(),
            position,
        }
    }

    pub fn with_member(mut self, member: ServiceMember) -> Self {
        self.members.push(member);
        self
    }

    /// Loads a definition model from its JSON representation.
    pub fn from_json_str(input: &str) -> Result<Self, NamingError> {
        serde_json::from_str(input).map_err(|e| NamingError::ModelError(e.to_string()))
    }

    /// Every field of every method and data object, in declaration order.
    pub fn fields(&self) -> Vec<FieldRef<'_>> {
        self.members
            .iter()
            .enumerate()
            .flat_map(|(index, member)| member.fields(index))
            .collect()
    }
}

impl ServiceMember {
    /// Fields owned by this member, identified by `member_index` (the
    /// member's position in [`ServiceDefinition::members`]).
    pub fn fields(&self, member_index: usize) -> Vec<FieldRef<'_>> {
        match self {
            ServiceMember::Method(method) => {
                let request = field_refs(
                    member_index,
                    FieldGroup::Request,
                    &method.name,
                    &method.request_fields,
                );
                let response = field_refs(
                    member_index,
                    FieldGroup::Response,
                    &method.name,
                    &method.response_fields,
                );
                request.chain(response).collect()
            }
            ServiceMember::Dto(dto) => {
                field_refs(member_index, FieldGroup::Dto, &dto.name, &dto.fields).collect()
            }
            ServiceMember::Enum(_) | ServiceMember::ErrorSet(_) | ServiceMember::Unrecognized => {
                Vec::new()
            }
        }
    }
}

fn field_refs<'a>(
    member: usize,
    group: FieldGroup,
    owner: &'a str,
    fields: &'a [FieldDef],
) -> impl Iterator<Item = FieldRef<'a>> + 'a {
    fields.iter().enumerate().map(move |(index, field)| FieldRef {
        id: FieldId {
            member,
            group,
            index,
            owner: owner.to_string(),
            field: field.name.clone(),
        },
        field,
    })
}

impl MethodDef {
    pub fn new(name: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            name: name.into(),
            request_fields: Vec::new(),
            response_fields: Vec::new(),
            attributes: Vec::new(),
            position,
        }
    }

    pub fn with_request_field(mut self, field: FieldDef) -> Self {
        self.request_fields.push(field);
        self
    }

    pub fn with_response_field(mut self, field: FieldDef) -> Self {
        self.response_fields.push(field);
        self
    }
}

impl DtoDef {
    pub fn new(name: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            attributes: Vec::new(),
            position,
        }
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}

impl EnumDef {
    pub fn new(name: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            attributes: Vec::new(),
            position,
        }
    }

    pub fn with_value(mut self, value: EnumValueDef) -> Self {
        self.values.push(value);
        self
    }
}

impl EnumValueDef {
    pub fn new(name: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            position,
        }
    }
}

impl ErrorSetDef {
    pub fn new(name: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            name: name.into(),
            errors: Vec::new(),
            attributes: Vec::new(),
            position,
        }
    }

    pub fn with_error(mut self, error: ErrorDef) -> Self {
        self.errors.push(error);
        self
    }
}

impl ErrorDef {
    pub fn new(name: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            position,
        }
    }
}

impl FieldDef {
    pub fn new(name: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            name: name.into(),
            type_name: None,
            attributes: Vec::new(),
            position,
        }
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

/// Which field list of a member a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldGroup {
    Request,
    Response,
    Dto,
}

/// Stable identity of a field: its position in the definition tree.
///
/// `member` and `index` locate the field; `owner` and `field` carry the
/// schema names for display (`getWidget.request.id`, `widget.id`) and do not
/// need to be unique.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FieldId {
    pub member: usize,
    pub group: FieldGroup,
    pub index: usize,
    pub owner: String,
    pub field: String,
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.group {
            FieldGroup::Request => write!(f, "{}.request.{}", self.owner, self.field),
            FieldGroup::Response => write!(f, "{}.response.{}", self.owner, self.field),
            FieldGroup::Dto => write!(f, "{}.{}", self.owner, self.field),
        }
    }
}

/// A field paired with its identity, as yielded by [`ServiceDefinition::fields`].
#[derive(Debug, Clone)]
pub struct FieldRef<'a> {
    pub id: FieldId,
    pub field: &'a FieldDef,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Element, FieldGroup, ServiceDefinition, ServiceMember};

    #[test]
    fn loads_members_by_kind_tag() {
        let raw = json!({
            "name": "widgetApi",
            "members": [
                { "kind": "method", "name": "getWidget",
                  "requestFields": [{ "name": "id", "typeName": "string" }],
                  "responseFields": [{ "name": "widget" }] },
                { "kind": "dto", "name": "widget", "fields": [{ "name": "name" }] },
                { "kind": "enum", "name": "color", "values": [{ "name": "red" }] },
                { "kind": "errorSet", "name": "widgetErrors", "errors": [{ "name": "notFound" }] },
                { "kind": "event", "name": "widgetChanged" }
            ]
        });

        let service = ServiceDefinition::from_json_str(&raw.to_string()).unwrap();
        assert_eq!(service.members.len(), 5);
        assert!(matches!(service.members[0], ServiceMember::Method(_)));
        assert!(matches!(service.members[3], ServiceMember::ErrorSet(_)));
        assert_eq!(service.members[4], ServiceMember::Unrecognized);
        assert!(service.members[4].as_element().is_none());
    }

    #[test]
    fn malformed_json_is_a_model_error() {
        let err = ServiceDefinition::from_json_str("{ \"members\": [] }").unwrap_err();
        assert!(err.to_string().starts_with("model error:"));
    }

    #[test]
    fn fields_are_listed_in_declaration_order_with_owner_identity() {
        let raw = json!({
            "name": "widgetApi",
            "members": [
                { "kind": "dto", "name": "widget", "fields": [{ "name": "name" }] },
                { "kind": "method", "name": "getWidget",
                  "requestFields": [{ "name": "id" }],
                  "responseFields": [{ "name": "widget" }] }
            ]
        });

        let service = ServiceDefinition::from_json_str(&raw.to_string()).unwrap();
        let ids: Vec<String> = service.fields().iter().map(|f| f.id.to_string()).collect();
        assert_eq!(
            ids,
            vec!["widget.name", "getWidget.request.id", "getWidget.response.widget"]
        );
        let request_id = &service.fields()[1].id;
        assert_eq!(
            (request_id.member, request_id.group, request_id.index),
            (1, FieldGroup::Request, 0)
        );
    }

    #[test]
    fn same_named_fields_get_distinct_ids() {
        let raw = json!({
            "name": "widgetApi",
            "members": [
                { "kind": "dto", "name": "widget", "fields": [{ "name": "id" }, { "name": "id" }] },
                { "kind": "dto", "name": "widget", "fields": [{ "name": "id" }] }
            ]
        });

        let service = ServiceDefinition::from_json_str(&raw.to_string()).unwrap();
        let fields = service.fields();
        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|f| f.id.to_string() == "widget.id"));
        assert_ne!(fields[0].id, fields[1].id);
        assert_ne!(fields[0].id, fields[2].id);
        assert_ne!(fields[1].id, fields[2].id);
    }

    #[test]
    fn attributes_with_tag_matches_case_sensitively() {
        let raw = json!({
            "name": "widgetApi",
            "attributes": [
                { "name": "csharp", "parameters": [{ "name": "namespace", "value": "Acme" }] },
                { "name": "CSharp" },
                { "name": "http", "parameters": [{ "name": "url", "value": "/v1" }] }
            ]
        });

        let service = ServiceDefinition::from_json_str(&raw.to_string()).unwrap();
        assert_eq!(service.attributes_with_tag("csharp").len(), 1);
        assert_eq!(service.attributes_with_tag("http").len(), 1);
        assert!(service.attributes_with_tag("python").is_empty());
    }
}
