use tracing::debug;

use crate::identifier::{self, ParsedReference};
use crate::model::Project;
use crate::resolution::ReferenceResolver;
use crate::types::{ReflectionKind, ValidationError};
use crate::validators::utils::{error_at, reflection_source};

/// Checks that every `@see` reference on classes and methods resolves to a
/// reflection.
///
/// List markers and external links inside tag content are skipped, never
/// reported. Failures are attributed to the owning reflection's source.
pub fn validate(
    project: &Project,
    resolver: &ReferenceResolver<'_>,
    on_error: &mut dyn FnMut(ValidationError),
) {
    let mut reported = 0usize;

    for reflection in
        project.reflections_by_kind(&[ReflectionKind::Class, ReflectionKind::Method])
    {
        if !project.is_own(reflection) {
            continue;
        }

        let Some(comment) = &reflection.comment else {
            continue;
        };

        for tag in comment.get_tags("see") {
            for item in &tag.content {
                let text = item.trim();

                let ident = match identifier::parse_reference(text) {
                    ParsedReference::ExternalLink | ParsedReference::Fragment => continue,
                    ParsedReference::Reference(ident) => ident,
                };

                if resolver.resolve(&ident, reflection.id).is_none() {
                    reported += 1;
                    on_error(error_at(
                        format!("Target doclet for \"{}\" link is not found", text),
                        reflection_source(reflection),
                    ));
                }
            }
        }
    }

    debug!(errors = reported, "see tag validation finished");
}
