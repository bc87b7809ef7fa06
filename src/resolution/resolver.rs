use crate::index::ReflectionIndex;
use crate::model::Project;
use crate::types::*;

/// Outcome of a successful resolution: a whole reflection, or one signature
/// of an overloaded member selected by its `@label` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Reflection(ReflectionId),
    Signature {
        reflection: ReflectionId,
        /// Position of the labeled signature in the member's signature list.
        index: usize,
    },
}

impl Resolution {
    /// Returns the reflection this resolution points into.
    pub fn reflection_id(&self) -> ReflectionId {
        match self {
            Resolution::Reflection(id) => *id,
            Resolution::Signature { reflection, .. } => *reflection,
        }
    }
}

/// Resolves parsed identifiers to reflections using the index.
///
/// A pure query surface: no mutation, and a miss at any step (container not
/// found, member not found, label not found) is `None`, never an error.
pub struct ReferenceResolver<'a> {
    project: &'a Project,
    index: &'a ReflectionIndex,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(project: &'a Project, index: &'a ReflectionIndex) -> Self {
        Self { project, index }
    }

    /// Resolves an identifier relative to the reflection it appeared in.
    ///
    /// Container precedence:
    /// 1. Absolute `module:path~Type` prefixes resolve through the index
    ///    directly, ignoring the context. A module-only identifier resolves
    ///    to the module reflection itself.
    /// 2. A bare `~Type` (or unprefixed name) resolves within the context
    ///    reflection's own module.
    /// 3. With no type prefix at all, the container is the context
    ///    reflection's own enclosing container.
    ///
    /// A member marker then dispatches to the index: instance/static
    /// members by name and slot, events through the inheritance-aware
    /// event lookup. When an overload label is supplied the member must
    /// carry a signature whose `@label` tag equals it; when no label is
    /// supplied, a member with multiple signatures still resolves --
    /// ambiguity is the overload-label validator's concern, not a
    /// resolution failure.
    pub fn resolve(&self, ident: &Identifier, context: ReflectionId) -> Option<Resolution> {
        let container = self.resolve_container(ident, context)?;

        let Some(member) = &ident.member else {
            return Some(Resolution::Reflection(container));
        };

        match member.marker {
            MemberMarker::Instance | MemberMarker::Static => {
                let is_static = member.marker == MemberMarker::Static;
                let target = self.index.find_member(container, &member.name, is_static)?;

                match &member.label {
                    Some(label) => self
                        .find_labeled_signature(target, label)
                        .map(|index| Resolution::Signature {
                            reflection: target,
                            index,
                        }),
                    None => Some(Resolution::Reflection(target)),
                }
            }
            MemberMarker::Event => self
                .index
                .find_event(container, &member.name)
                .map(Resolution::Reflection),
        }
    }

    /// Resolves the container portion of an identifier.
    fn resolve_container(&self, ident: &Identifier, context: ReflectionId) -> Option<ReflectionId> {
        if let Some(module_path) = &ident.module_path {
            return match &ident.type_name {
                Some(type_name) => self.index.find_type(module_path, type_name),
                None => self.index.find_module(module_path),
            };
        }

        if let Some(type_name) = &ident.type_name {
            let module_id = self.project.module_of(context)?;
            let module_name = &self.project.get(module_id).name;
            return self.index.find_type(module_name, type_name);
        }

        self.project.container_of(context)
    }

    /// Finds the signature of a member whose `@label` tag equals the given
    /// label.
    fn find_labeled_signature(&self, id: ReflectionId, label: &str) -> Option<usize> {
        self.project.get(id).signatures.iter().position(|signature| {
            signature
                .comment
                .as_ref()
                .and_then(|comment| comment.get_tag("label"))
                .and_then(|tag| tag.content.first())
                .is_some_and(|value| value.trim() == label)
        })
    }
}
