//! Case-insensitive collision detection for generated top-level type names.

use std::collections::HashMap;

use tracing::trace;

use crate::ast::ServiceDefinition;
use crate::error::{NamingError, ValidationError, ValidationErrorKind};
use crate::names::{member_type_names, service_type_name};
use crate::options::NamingOptions;

/// Set of generated type names compared case-insensitively.
///
/// Keys are lower-cased; the first registered spelling is kept for messages.
#[derive(Debug, Clone, Default)]
pub struct TypeNameRegistry {
    by_folded: HashMap<String, String>,
    ordered: Vec<String>,
}

impl TypeNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`. On collision, returns the spelling that already
    /// occupies the name and leaves the registry unchanged.
    pub fn try_insert(&mut self, name: &str) -> Option<&str> {
        let folded = name.to_lowercase();
        if self.by_folded.contains_key(&folded) {
            return self.by_folded.get(&folded).map(String::as_str);
        }
        self.by_folded.insert(folded, name.to_string());
        self.ordered.push(name.to_string());
        None
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_folded.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Registered names in insertion order.
    pub fn into_names(self) -> Vec<String> {
        self.ordered
    }
}

/// Registers the service's root type and then every member's generated
/// names in declaration order, reporting each name that is already taken.
///
/// Returns the successfully registered names. An unrecognized member kind is
/// a fatal [`NamingError::UnrecognizedMember`].
pub fn detect_collisions(
    service: &ServiceDefinition,
    options: &NamingOptions,
    errors: &mut Vec<ValidationError>,
) -> Result<Vec<String>, NamingError> {
    let mut registry = TypeNameRegistry::new();
    registry.try_insert(&service_type_name(service));

    for (index, member) in service.members.iter().enumerate() {
        let (Some(element), Some(names)) =
            (member.as_element(), member_type_names(member, options))
        else {
            return Err(NamingError::UnrecognizedMember {
                service: service.name.clone(),
                index,
            });
        };

        for name in names {
            let Some(existing) = registry.try_insert(&name) else {
                continue;
            };
            trace!(%name, %existing, "generated type collision");

            let mut message = format!(
                "duplicate generated type '{}' for {} '{}'",
                name,
                element.kind().describe(),
                element.name()
            );
            if existing != name {
                message.push_str(&format!(" (conflicts with '{existing}')"));
            }
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateGeneratedType,
                message,
                element.position().clone(),
            ));
        }
    }

    Ok(registry.into_names())
}
