//! Default generated names derived from schema names.
//!
//! These are pure transforms; overrides are applied by [`crate::naming_info`].

use crate::ast::{ServiceDefinition, ServiceMember};
use crate::options::NamingOptions;

/// Upper-cases the first character and keeps the rest verbatim.
pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generated name of the service's root type.
pub fn service_type_name(service: &ServiceDefinition) -> String {
    capitalize(&service.name)
}

/// Default namespace for a service's generated code.
pub fn default_namespace(service: &ServiceDefinition) -> String {
    capitalize(&service.name)
}

/// Default property name for a field.
pub fn default_property_name(field_name: &str) -> String {
    capitalize(field_name)
}

/// Request and response type names of a method.
pub fn method_type_names(method_name: &str, options: &NamingOptions) -> [String; 2] {
    let base = capitalize(method_name);
    [
        format!("{base}{}", options.request_suffix),
        format!("{base}{}", options.response_suffix),
    ]
}

/// Top-level type names a service member generates, in emission order.
///
/// Returns `None` for members whose kind is not recognized.
pub fn member_type_names(member: &ServiceMember, options: &NamingOptions) -> Option<Vec<String>> {
    match member {
        ServiceMember::Method(method) => Some(method_type_names(&method.name, options).to_vec()),
        ServiceMember::Dto(dto) => Some(vec![capitalize(&dto.name)]),
        ServiceMember::Enum(enum_def) => Some(vec![capitalize(&enum_def.name)]),
        ServiceMember::ErrorSet(error_set) => Some(vec![capitalize(&error_set.name)]),
        ServiceMember::Unrecognized => None,
    }
}
