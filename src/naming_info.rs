//! Resolved naming information for one service and target language.

use std::collections::BTreeMap;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::ast::{FieldId, FieldRef, ServiceDefinition};
use crate::attributes::extract_overrides;
use crate::collisions::detect_collisions;
use crate::error::{NamingError, ValidationError};
use crate::names::{default_namespace, default_property_name};
use crate::options::NamingOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Generated names for a service, after applying attribute overrides.
///
/// Only overridden property names are stored; other fields fall back to the
/// default transform when queried.
pub struct NamingInfo {
    language: String,
    namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace_override: Option<String>,
    #[serde(serialize_with = "serialize_property_names")]
    property_names: BTreeMap<FieldId, String>,
    type_names: Vec<String>,
}

#[derive(Serialize)]
struct PropertyNameEntry<'a> {
    path: String,
    field: &'a FieldId,
    name: &'a str,
}

/// Field keys are structured, so overrides serialize as a list of entries.
fn serialize_property_names<S: Serializer>(
    names: &BTreeMap<FieldId, String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(names.len()))?;
    for (field, name) in names {
        seq.serialize_element(&PropertyNameEntry {
            path: field.to_string(),
            field,
            name,
        })?;
    }
    seq.end()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Best-effort naming information plus every validation error found.
pub struct NamingOutcome {
    pub info: NamingInfo,
    pub errors: Vec<ValidationError>,
}

impl NamingInfo {
    /// Runs the naming pass and fails with [`NamingError::Invalid`] if any
    /// validation error was found.
    pub fn create(
        service: &ServiceDefinition,
        options: &NamingOptions,
    ) -> Result<Self, NamingError> {
        Self::try_create(service, options)?.into_result()
    }

    /// Runs the naming pass, returning the result alongside its validation
    /// errors. Only an unrecognized member kind makes this fail.
    pub fn try_create(
        service: &ServiceDefinition,
        options: &NamingOptions,
    ) -> Result<NamingOutcome, NamingError> {
        debug!(service = %service.name, language = %options.language, "resolving generated names");

        let mut errors = Vec::new();
        let overrides = extract_overrides(service, &options.language, &mut errors);
        let type_names = detect_collisions(service, options, &mut errors)?;

        let info = NamingInfo {
            language: options.language.clone(),
            namespace: overrides
                .namespace
                .clone()
                .unwrap_or_else(|| default_namespace(service)),
            namespace_override: overrides.namespace,
            property_names: overrides.property_names,
            type_names,
        };

        debug!(service = %service.name, errors = errors.len(), "resolved generated names");
        Ok(NamingOutcome { info, errors })
    }

    /// Attribute tag the names were resolved for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Effective namespace: the service override, else the capitalized
    /// service name.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn namespace_override(&self) -> Option<&str> {
        self.namespace_override.as_deref()
    }

    /// Effective property name for a field: its override verbatim, else the
    /// capitalized field name.
    pub fn property_name(&self, field: &FieldRef<'_>) -> String {
        match self.property_names.get(&field.id) {
            Some(name) => name.clone(),
            None => default_property_name(&field.field.name),
        }
    }

    pub fn property_name_override(&self, id: &FieldId) -> Option<&str> {
        self.property_names.get(id).map(String::as_str)
    }

    /// Generated top-level type names in registration order: the service's
    /// root type, then each member's types. Colliding names appear once.
    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }
}

impl NamingOutcome {
    /// `true` when no validation error was found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Splits into `(info, errors, is_valid)`.
    pub fn into_parts(self) -> (NamingInfo, Vec<ValidationError>, bool) {
        let valid = self.is_valid();
        (self.info, self.errors, valid)
    }

    /// Converts into the strict form, failing when errors were found.
    pub fn into_result(self) -> Result<NamingInfo, NamingError> {
        if self.errors.is_empty() {
            Ok(self.info)
        } else {
            Err(NamingError::Invalid {
                errors: self.errors,
            })
        }
    }

    /// Serializes the info and errors to JSON text.
    ///
    /// When `pretty` is `true`, output is formatted with indentation.
    pub fn to_json_string(&self, pretty: bool) -> Result<String, NamingError> {
        if pretty {
            serde_json::to_string_pretty(self)
                .map_err(|e| NamingError::SerializationError(e.to_string()))
        } else {
            serde_json::to_string(self).map_err(|e| NamingError::SerializationError(e.to_string()))
        }
    }
}
