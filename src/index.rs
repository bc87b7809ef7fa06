use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::errors::{DocrefError, Result};
use crate::identifier;
use crate::model::Project;
use crate::types::*;

/// Precomputed lookup structures over a reflection model.
///
/// Built once per model snapshot with a single pass over all reflections,
/// then queried read-only by the resolver and validators. On name
/// collisions the first declaration wins, keeping every lookup
/// deterministic under declaration order.
pub struct ReflectionIndex {
    /// Module path -> module reflection.
    modules: HashMap<String, ReflectionId>,
    /// (module path, exported name) -> class/interface/function reflection.
    types: HashMap<(String, String), ReflectionId>,
    /// (container, member name, is_static) -> member reflection. Overloads
    /// share one reflection with multiple signatures, so at most one
    /// reflection matches a key.
    members: HashMap<(ReflectionId, String, bool), ReflectionId>,
    /// Container -> event name -> declaring event reflection, covering the
    /// container's own events and the closure of its inherited/mixed-in
    /// events. First match in breadth order wins, so the blamed declaring
    /// reflection is deterministic.
    events: HashMap<ReflectionId, HashMap<String, ReflectionId>>,
}

impl ReflectionIndex {
    /// Builds the index from a project.
    ///
    /// Fails only on model-contract violations (a member reflection without
    /// a parent); unresolvable supertype references are skipped, not fatal.
    pub fn build(project: &Project) -> Result<Self> {
        let mut modules: HashMap<String, ReflectionId> = HashMap::new();
        let mut types: HashMap<(String, String), ReflectionId> = HashMap::new();
        let mut members: HashMap<(ReflectionId, String, bool), ReflectionId> = HashMap::new();
        let mut own_events: HashMap<ReflectionId, Vec<(String, ReflectionId)>> = HashMap::new();

        for reflection in project.reflections() {
            match reflection.kind {
                ReflectionKind::Module => {
                    modules.entry(reflection.name.clone()).or_insert(reflection.id);
                }
                ReflectionKind::Class | ReflectionKind::Interface | ReflectionKind::Function => {
                    let parent = required_parent(reflection)?;
                    if project.get(parent).kind == ReflectionKind::Module {
                        let module_name = project.get(parent).name.clone();
                        types
                            .entry((module_name, reflection.name.clone()))
                            .or_insert(reflection.id);
                    }
                }
                ReflectionKind::Method
                | ReflectionKind::Property
                | ReflectionKind::Accessor => {
                    let parent = required_parent(reflection)?;
                    members
                        .entry((parent, reflection.name.clone(), reflection.is_static))
                        .or_insert(reflection.id);
                }
                ReflectionKind::Event => {
                    let parent = required_parent(reflection)?;
                    own_events
                        .entry(parent)
                        .or_default()
                        .push((reflection.name.clone(), reflection.id));
                }
            }
        }

        // Supertype adjacency per container, in declaration order. Supertype
        // references use the identifier grammar (absolute or relative to the
        // container's own module) and are resolved against the maps built
        // above.
        let mut supertypes: HashMap<ReflectionId, Vec<ReflectionId>> = HashMap::new();
        for reflection in project.reflections() {
            if !reflection.kind.is_container() || reflection.extends.is_empty() {
                continue;
            }

            let mut bases = Vec::new();
            for raw in &reflection.extends {
                let ident = identifier::parse(raw);
                let resolved = match (&ident.module_path, &ident.type_name) {
                    (Some(module_path), Some(type_name)) => types
                        .get(&(module_path.clone(), type_name.clone()))
                        .copied(),
                    (None, Some(type_name)) => project.module_of(reflection.id).and_then(|module_id| {
                        let module_name = project.get(module_id).name.clone();
                        types.get(&(module_name, type_name.clone())).copied()
                    }),
                    _ => None,
                };
                if let Some(base) = resolved {
                    bases.push(base);
                }
            }
            supertypes.insert(reflection.id, bases);
        }

        // Event closure per container: own events first, then a
        // breadth-first walk over the supertype graph (direct bases before
        // further ancestors). Cached here so no query ever re-walks the
        // graph in a way that could reorder results.
        let mut events: HashMap<ReflectionId, HashMap<String, ReflectionId>> = HashMap::new();
        for reflection in project.reflections() {
            if !reflection.kind.is_container() && !own_events.contains_key(&reflection.id) {
                continue;
            }

            let mut closure: HashMap<String, ReflectionId> = HashMap::new();
            let mut visited: HashSet<ReflectionId> = HashSet::new();
            let mut queue: VecDeque<ReflectionId> = VecDeque::new();

            visited.insert(reflection.id);
            queue.push_back(reflection.id);

            while let Some(current) = queue.pop_front() {
                if let Some(declared) = own_events.get(&current) {
                    for (name, event_id) in declared {
                        closure.entry(name.clone()).or_insert(*event_id);
                    }
                }

                for &base in supertypes.get(&current).map(Vec::as_slice).unwrap_or(&[]) {
                    if visited.insert(base) {
                        queue.push_back(base);
                    }
                }
            }

            if !closure.is_empty() {
                events.insert(reflection.id, closure);
            }
        }

        debug!(
            modules = modules.len(),
            types = types.len(),
            members = members.len(),
            event_containers = events.len(),
            "reflection index built"
        );

        Ok(Self {
            modules,
            types,
            members,
            events,
        })
    }

    /// Looks up a module reflection by its path.
    pub fn find_module(&self, path: &str) -> Option<ReflectionId> {
        self.modules.get(path).copied()
    }

    /// Looks up an exported type (class, interface, or function) by its
    /// qualified name.
    pub fn find_type(&self, module_path: &str, name: &str) -> Option<ReflectionId> {
        self.types
            .get(&(module_path.to_string(), name.to_string()))
            .copied()
    }

    /// Looks up an instance or static member of a container.
    ///
    /// The returned reflection may carry multiple signatures; overload
    /// disambiguation is the resolver's concern.
    pub fn find_member(
        &self,
        container: ReflectionId,
        name: &str,
        is_static: bool,
    ) -> Option<ReflectionId> {
        self.members
            .get(&(container, name.to_string(), is_static))
            .copied()
    }

    /// Looks up an event on a container, searching its own declared events
    /// first and then the inheritance/mixin chain in breadth order.
    /// Absence is a valid outcome.
    pub fn find_event(&self, container: ReflectionId, name: &str) -> Option<ReflectionId> {
        self.events.get(&container)?.get(name).copied()
    }
}

/// Extracts the parent a non-module reflection is contractually guaranteed
/// to have.
fn required_parent(reflection: &Reflection) -> Result<ReflectionId> {
    reflection.parent.ok_or_else(|| DocrefError::Model {
        message: format!(
            "{} reflection '{}' has no parent",
            reflection.kind.as_str(),
            reflection.name
        ),
    })
}
