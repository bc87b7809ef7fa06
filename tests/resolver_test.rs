use docref::identifier::parse;
use docref::index::ReflectionIndex;
use docref::model::Project;
use docref::resolution::{ReferenceResolver, Resolution};
use docref::types::*;

fn reflection(id: u32, kind: ReflectionKind, name: &str, parent: Option<u32>) -> Reflection {
    Reflection {
        id: ReflectionId(id),
        kind,
        name: name.to_string(),
        parent: parent.map(ReflectionId),
        comment: None,
        signatures: Vec::new(),
        sources: Vec::new(),
        is_static: false,
        inherited_from: None,
        extends: Vec::new(),
    }
}

fn labeled_signature(name: &str, label: Option<&str>) -> Signature {
    Signature {
        name: name.to_string(),
        comment: label.map(|value| Comment {
            summary: String::new(),
            tags: vec![CommentTag {
                name: "label".to_string(),
                content: vec![value.to_string()],
            }],
        }),
        sources: Vec::new(),
    }
}

/// Two modules. `core/editor` exports `Editor` with an instance property, a
/// static `create`, an overloaded `setData` (labels `STRING` / `OBJECT`),
/// an unlabeled overloaded `exec`, and a `change` event. `utils/emitter`
/// exports `Emitter` declaring event `fire`; `Editor` mixes it in.
fn setup_project() -> Project {
    let mut editor = reflection(1, ReflectionKind::Class, "Editor", Some(0));
    editor.extends = vec!["module:utils/emitter~Emitter".to_string()];

    let mut create = reflection(3, ReflectionKind::Property, "create", Some(1));
    create.is_static = true;

    let mut set_data = reflection(4, ReflectionKind::Method, "setData", Some(1));
    set_data.signatures = vec![
        labeled_signature("setData", Some("STRING")),
        labeled_signature("setData", Some("OBJECT")),
    ];

    let mut exec = reflection(5, ReflectionKind::Method, "exec", Some(1));
    exec.signatures = vec![
        labeled_signature("exec", None),
        labeled_signature("exec", None),
    ];

    let reflections = vec![
        reflection(0, ReflectionKind::Module, "core/editor", None),
        editor,
        reflection(2, ReflectionKind::Property, "content", Some(1)),
        create,
        set_data,
        exec,
        reflection(6, ReflectionKind::Event, "change", Some(1)),
        reflection(7, ReflectionKind::Module, "utils/emitter", None),
        reflection(8, ReflectionKind::Class, "Emitter", Some(7)),
        reflection(9, ReflectionKind::Event, "fire", Some(8)),
    ];
    Project::new(reflections, Vec::new()).expect("project should build")
}

fn resolve(project: &Project, index: &ReflectionIndex, raw: &str, context: u32) -> Option<Resolution> {
    let resolver = ReferenceResolver::new(project, index);
    resolver.resolve(&parse(raw), ReflectionId(context))
}

#[test]
fn resolves_absolute_type_reference() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    // Context is irrelevant for absolute references.
    let resolution = resolve(&project, &index, "module:core/editor~Editor", 8)
        .expect("absolute reference should resolve");
    assert_eq!(resolution, Resolution::Reflection(ReflectionId(1)));
}

#[test]
fn resolves_module_only_reference() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    let resolution = resolve(&project, &index, "module:utils/emitter", 2)
        .expect("module reference should resolve");
    assert_eq!(resolution, Resolution::Reflection(ReflectionId(7)));
}

#[test]
fn missing_type_in_existing_module_is_a_miss() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    assert!(resolve(&project, &index, "module:core/editor~Missing#member", 2).is_none());
    assert!(resolve(&project, &index, "module:missing/module~Editor#content", 2).is_none());
}

#[test]
fn resolves_relative_type_within_context_module() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    // From inside core/editor, "~Editor" and bare "Editor" both name the class.
    let tilde = resolve(&project, &index, "~Editor#content", 4)
        .expect("tilde reference should resolve");
    assert_eq!(tilde, Resolution::Reflection(ReflectionId(2)));

    let bare =
        resolve(&project, &index, "Editor", 4).expect("bare type reference should resolve");
    assert_eq!(bare, Resolution::Reflection(ReflectionId(1)));

    // From the other module the same reference misses.
    assert!(resolve(&project, &index, "~Editor#content", 9).is_none());
}

#[test]
fn resolves_members_of_enclosing_container() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    // From a method of Editor, "#content" finds the instance property.
    let resolution = resolve(&project, &index, "#content", 4)
        .expect("container-relative reference should resolve");
    assert_eq!(resolution, Resolution::Reflection(ReflectionId(2)));

    // From the class itself.
    let from_class = resolve(&project, &index, "#content", 1)
        .expect("reference from the container itself should resolve");
    assert_eq!(from_class, Resolution::Reflection(ReflectionId(2)));
}

#[test]
fn static_and_instance_markers_are_distinct() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    let static_hit = resolve(&project, &index, ".create", 2)
        .expect("static reference should resolve");
    assert_eq!(static_hit, Resolution::Reflection(ReflectionId(3)));

    assert!(
        resolve(&project, &index, "#create", 2).is_none(),
        "a static member must not resolve through the instance marker"
    );
    assert!(
        resolve(&project, &index, ".content", 2).is_none(),
        "an instance member must not resolve through the static marker"
    );
}

#[test]
fn label_selects_the_matching_signature() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    let resolution = resolve(&project, &index, "#setData:OBJECT", 2)
        .expect("labeled overload should resolve");
    assert_eq!(
        resolution,
        Resolution::Signature {
            reflection: ReflectionId(4),
            index: 1,
        }
    );
    assert_eq!(resolution.reflection_id(), ReflectionId(4));
}

#[test]
fn unknown_label_is_a_miss() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    assert!(resolve(&project, &index, "#setData:LABEL-NON-EXISTING", 2).is_none());
    assert!(
        resolve(&project, &index, "#exec:LABEL-NON-EXISTING", 2).is_none(),
        "labels never match signatures without @label tags"
    );
    assert!(
        resolve(&project, &index, "#content:LABEL-NON-EXISTING", 2).is_none(),
        "a label on a signature-less member cannot match"
    );
}

#[test]
fn ambiguous_overload_without_label_still_resolves() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    let resolution = resolve(&project, &index, "#exec", 2)
        .expect("plain link resolution must not fail on ambiguity");
    assert_eq!(resolution, Resolution::Reflection(ReflectionId(5)));
}

#[test]
fn resolves_events_including_mixed_in_ones() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    let own = resolve(&project, &index, "#event:change", 4)
        .expect("own event should resolve");
    assert_eq!(own, Resolution::Reflection(ReflectionId(6)));

    let mixed = resolve(&project, &index, "#event:fire", 4)
        .expect("mixed-in event should resolve");
    assert_eq!(mixed, Resolution::Reflection(ReflectionId(9)));

    let absolute = resolve(&project, &index, "module:core/editor~Editor#event:fire", 9)
        .expect("absolute event reference should resolve");
    assert_eq!(absolute, Resolution::Reflection(ReflectionId(9)));
}

#[test]
fn event_names_do_not_resolve_as_members() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    assert!(
        resolve(&project, &index, "#change", 2).is_none(),
        "an event must not resolve through the instance marker"
    );
    assert!(
        resolve(&project, &index, "#event:content", 2).is_none(),
        "a property must not resolve through the event marker"
    );
}

#[test]
fn misses_are_none_not_errors() {
    let project = setup_project();
    let index = ReflectionIndex::build(&project).expect("index should build");

    assert!(resolve(&project, &index, "#property-non-existing", 1).is_none());
    assert!(resolve(&project, &index, "~ClassNonExisting#property", 1).is_none());
    assert!(resolve(&project, &index, ".missing", 1).is_none());
}
