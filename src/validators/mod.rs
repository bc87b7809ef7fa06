/// Checks `@fires` tags against declared and inherited events.
pub mod fires;

/// Checks inline `{@link ...}` references in comment text.
pub mod links;

/// Checks that overloaded signatures carry `@label` tags.
pub mod overloads;

/// Checks `@see` tag references on classes and methods.
pub mod see;

mod utils;

pub use utils::{reflection_source, signature_source};

use crate::config::ValidatorConfig;
use crate::errors::Result;
use crate::index::ReflectionIndex;
use crate::model::Project;
use crate::resolution::ReferenceResolver;
use crate::types::ValidationError;

/// Runs every enabled validator over the project, reporting each violation
/// through `on_error`.
///
/// The index is built once per call and shared read-only by all validators.
pub fn run(
    project: &Project,
    config: &ValidatorConfig,
    on_error: &mut dyn FnMut(ValidationError),
) -> Result<()> {
    let index = ReflectionIndex::build(project)?;
    let resolver = ReferenceResolver::new(project, &index);

    if config.validators.overloads {
        overloads::validate(project, on_error);
    }
    if config.validators.see {
        see::validate(project, &resolver, on_error);
    }
    if config.validators.links {
        links::validate(project, &resolver, on_error);
    }
    if config.validators.fires {
        fires::validate(project, &resolver, on_error);
    }

    Ok(())
}

/// Convenience wrapper collecting every validation error into a vector.
pub fn collect(project: &Project, config: &ValidatorConfig) -> Result<Vec<ValidationError>> {
    let mut errors = Vec::new();
    run(project, config, &mut |error| errors.push(error))?;
    Ok(errors)
}
