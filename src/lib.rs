//! Generated-symbol naming and validation for service definitions.
//!
//! Given a parsed service definition and a target language, this crate
//! decides what each generated type and property is called, honoring
//! per-element overrides declared through extension attributes tagged with
//! the language, and reports every naming problem with its source position.

pub mod ast;
pub mod attributes;
pub mod collisions;
pub mod error;
pub mod names;
pub mod naming_info;
pub mod options;
pub mod position;

pub use ast::{
    AttributeDef, AttributeParameter, DtoDef, Element, ElementKind, EnumDef, EnumValueDef,
    ErrorDef, ErrorSetDef, FieldDef, FieldGroup, FieldId, FieldRef, MethodDef,
    ServiceDefinition, ServiceMember,
};
pub use error::{NamingError, ValidationError, ValidationErrorKind};
pub use naming_info::{NamingInfo, NamingOutcome};
pub use options::NamingOptions;
pub use position::SourcePosition;

/// Resolves names with default options, failing on any validation error.
pub fn resolve_names(service: &ServiceDefinition) -> Result<NamingInfo, NamingError> {
    NamingInfo::create(service, &NamingOptions::default())
}

/// Resolves names with default options, returning errors alongside the result.
pub fn try_resolve_names(service: &ServiceDefinition) -> Result<NamingOutcome, NamingError> {
    NamingInfo::try_create(service, &NamingOptions::default())
}

/// Loads a JSON definition model and validates its names for `options`.
pub fn validate_service_json(
    input: &str,
    options: &NamingOptions,
) -> Result<NamingOutcome, NamingError> {
    let service = ServiceDefinition::from_json_str(input)?;
    NamingInfo::try_create(&service, options)
}
