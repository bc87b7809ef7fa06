use tracing::debug;

use crate::identifier::{self, MODULE_PREFIX};
use crate::model::Project;
use crate::resolution::ReferenceResolver;
use crate::types::{Identifier, MemberMarker, ReflectionKind, ValidationError};
use crate::validators::utils::{error_at, reflection_source};

/// Checks that every `@fires` tag on classes and methods names an event
/// that exists on the owning container or one of its base types.
///
/// Event references may be bare (`eventName`), container-relative
/// (`#event:eventName`), or fully qualified
/// (`module:...~Type#event:eventName`). Reported identifiers are
/// normalized: relative forms display as `#event:<name>`, absolute forms
/// verbatim.
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

        for tag in comment.get_tags("fires") {
            for item in &tag.content {
                let raw = item.trim();
                if raw.is_empty() {
                    continue;
                }

                let (ident, display) = if raw.starts_with(MODULE_PREFIX) {
                    (identifier::parse(raw), raw.to_string())
                } else if let Some(name) = raw.strip_prefix("#event:") {
                    (Identifier::event(name), raw.to_string())
                } else {
                    (Identifier::event(raw), format!("#event:{}", raw))
                };

                // An absolute reference must actually address an event;
                // `module:...~Type` alone names a type, not an event.
                let is_event_ref = ident
                    .member
                    .as_ref()
                    .is_some_and(|member| member.marker == MemberMarker::Event);

                let resolved = is_event_ref
                    && resolver.resolve(&ident, reflection.id).is_some();

                if !resolved {
                    reported += 1;
                    on_error(error_at(
                        format!("Event \"{}\" is not found", display),
                        reflection_source(reflection),
                    ));
                }
            }
        }
    }

    debug!(errors = reported, "fires tag validation finished");
}
