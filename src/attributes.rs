//! Extraction and validation of target-language extension attributes.
//!
//! Recognized parameters:
//! - Service: `namespace`
//! - Field: `name`
//!
//! Parameters on methods and data objects are reported one by one; every
//! other element kind rejects target-language attributes outright.
//! Problems are appended to the caller's error list; extraction never stops
//! early.

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use crate::ast::{
    AttributeDef, AttributeParameter, Element, ElementKind, FieldId, FieldRef, ServiceDefinition,
    ServiceMember,
};
use crate::error::{ValidationError, ValidationErrorKind};

/// Override decoded from a recognized (element kind, parameter) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    /// `namespace` on a service.
    Namespace(String),
    /// `name` on a field.
    PropertyName(String),
}

impl Override {
    /// Decodes a parameter for the given element kind; `None` when the pair is
    /// not recognized.
    pub fn decode(kind: ElementKind, parameter: &AttributeParameter) -> Option<Self> {
        match (kind, parameter.name.as_str()) {
            (ElementKind::Service, "namespace") => {
                Some(Override::Namespace(parameter.value.clone()))
            }
            (ElementKind::Field, "name") => Some(Override::PropertyName(parameter.value.clone())),
            _ => None,
        }
    }
}

/// A decoded override together with the declaration it was read from.
#[derive(Debug, Clone)]
pub struct DecodedOverride<'a> {
    pub value: Override,
    pub attribute: &'a AttributeDef,
    pub parameter: &'a AttributeParameter,
}

/// Overrides collected from one pass over a service definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedOverrides {
    pub namespace: Option<String>,
    pub property_names: BTreeMap<FieldId, String>,
}

/// Whether any target-language parameter is recognized on an element kind.
pub fn accepts_parameters(kind: ElementKind) -> bool {
    matches!(kind, ElementKind::Service | ElementKind::Field)
}

/// Whether attributes on an element kind are checked parameter by parameter.
///
/// Methods and data objects get one error per parameter; enumerations, error
/// sets, and their children reject the whole declaration.
fn checks_parameters(kind: ElementKind) -> bool {
    matches!(
        kind,
        ElementKind::Service | ElementKind::Method | ElementKind::Dto | ElementKind::Field
    )
}

/// Walks the service and every descendant, decoding attributes tagged `tag`.
pub fn extract_overrides(
    service: &ServiceDefinition,
    tag: &str,
    errors: &mut Vec<ValidationError>,
) -> ExtractedOverrides {
    let mut extracted = ExtractedOverrides::default();

    for decoded in decode_element(service, tag, errors) {
        if let Override::Namespace(namespace) = decoded.value {
            trace!(
                attribute = %decoded.attribute.position,
                parameter = %decoded.parameter.position,
                %namespace,
                "namespace override"
            );
            extracted.namespace.get_or_insert(namespace);
        }
    }

    for (index, member) in service.members.iter().enumerate() {
        // Unrecognized members are reported as fatal by the collision pass.
        let Some(element) = member.as_element() else {
            continue;
        };
        decode_element(element, tag, errors);

        for field in member.fields(index) {
            extract_field(field, tag, &mut extracted, errors);
        }

        match member {
            ServiceMember::Enum(enum_def) => {
                for value in &enum_def.values {
                    decode_element(value, tag, errors);
                }
            }
            ServiceMember::ErrorSet(error_set) => {
                for error in &error_set.errors {
                    decode_element(error, tag, errors);
                }
            }
            ServiceMember::Method(_) | ServiceMember::Dto(_) | ServiceMember::Unrecognized => {}
        }
    }

    extracted
}

fn extract_field(
    field: FieldRef<'_>,
    tag: &str,
    extracted: &mut ExtractedOverrides,
    errors: &mut Vec<ValidationError>,
) {
    for decoded in decode_element(field.field, tag, errors) {
        if let Override::PropertyName(name) = decoded.value {
            trace!(
                field = %field.id,
                attribute = %decoded.attribute.position,
                %name,
                "property name override"
            );
            extracted.property_names.insert(field.id.clone(), name);
        }
    }
}

/// Decodes the first attribute tagged `tag` on `element`.
///
/// Any later attribute with the same tag produces a single duplicate error at
/// the second declaration and is never applied.
pub fn decode_element<'a>(
    element: &'a dyn Element,
    tag: &str,
    errors: &mut Vec<ValidationError>,
) -> Vec<DecodedOverride<'a>> {
    let declarations = element.attributes_with_tag(tag);
    let Some((&first, rest)) = declarations.split_first() else {
        return Vec::new();
    };

    let kind = element.kind();
    let decoded = if checks_parameters(kind)
        && (accepts_parameters(kind) || !first.parameters.is_empty())
    {
        decode_parameters(element, first, errors)
    } else {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnexpectedAttribute,
            format!(
                "unexpected '{}' attribute on {} '{}'",
                first.name,
                element.kind().describe(),
                element.name()
            ),
            first.position.clone(),
        ));
        Vec::new()
    };

    if let Some(second) = rest.first() {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateAttribute,
            format!(
                "duplicate '{}' attribute on {} '{}'",
                second.name,
                element.kind().describe(),
                element.name()
            ),
            second.position.clone(),
        ));
    }

    decoded
}

fn decode_parameters<'a>(
    element: &dyn Element,
    attribute: &'a AttributeDef,
    errors: &mut Vec<ValidationError>,
) -> Vec<DecodedOverride<'a>> {
    let mut seen = HashSet::new();
    let mut decoded = Vec::new();

    for parameter in &attribute.parameters {
        if !seen.insert(parameter.name.as_str()) {
            trace!(
                parameter = %parameter.name,
                position = %parameter.position,
                "ignoring repeated parameter"
            );
            continue;
        }

        match Override::decode(element.kind(), parameter) {
            Some(value) => decoded.push(DecodedOverride {
                value,
                attribute,
                parameter,
            }),
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnexpectedParameter,
                format!(
                    "unexpected '{}' parameter '{}' on {} '{}'",
                    attribute.name,
                    parameter.name,
                    element.kind().describe(),
                    element.name()
                ),
                parameter.position.clone(),
            )),
        }
    }

    decoded
}
