#![forbid(unsafe_code)]

use ej_codec::hydration::{self, DATA_SCRIPT_ID, HydrationError};
use ej_codec::{ComponentType, DecodingError, Element, EncodingError, TypeRegistry, Value};

struct SiteNav;
struct LinkToTask;
struct TaskList;
struct TaskHistoryList;
struct Input;

fn app_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register(ComponentType::of::<SiteNav>(), "1").unwrap();
    registry.register(ComponentType::of::<LinkToTask>(), "2").unwrap();
    registry.register(ComponentType::of::<TaskList>(), "3").unwrap();
    registry.register(ComponentType::of::<TaskHistoryList>(), "4").unwrap();
    registry.register(ComponentType::of::<Input>(), "7").unwrap();
    registry
}

fn task_page() -> Element {
    let tasks = (1..=3).map(|id| {
        Element::host("li").key(id.to_string()).child(
            Element::custom(ComponentType::of::<LinkToTask>())
                .prop("id", id)
                .prop("title", format!("Task #{id} — “quoted” </script>")),
        )
    });
    Element::fragment()
        .child(
            Element::custom(ComponentType::of::<SiteNav>())
                .prop("username", "someone")
                .prop("csrfToken", Value::Undefined),
        )
        .child(
            Element::custom(ComponentType::of::<TaskList>())
                .prop(
                    "filter",
                    Value::object([
                        ("status", Value::array([Value::from("open")])),
                        ("limit", Value::from(50)),
                        ("ratio", Value::from(0.25)),
                    ]),
                )
                .prop(
                    "emptyState",
                    Element::host("p").child("Nothing to do 🦦"),
                )
                .child(Element::host("ul").children(tasks)),
        )
        .child(
            Element::custom(ComponentType::of::<TaskHistoryList>())
                .prop("rows", Value::array([]))
                .prop(
                    "editor",
                    Element::custom(ComponentType::of::<Input>())
                        .prop("name", "title")
                        .prop(ej_codec::TYPE_KEY, "kept as a prop"),
                ),
        )
        .build()
}

/// The page as the client sees it: undefined props never made it across.
fn task_page_without_undefined() -> Value {
    let page = task_page();
    let mut children = page.children();
    let nav = children[0].as_element().expect("nav").clone();
    let mut props = nav.props().clone();
    props.shift_remove("csrfToken");
    children[0] = Element::from_parts(nav.kind().clone(), props, None).into();
    Element::fragment().children(children).build().into()
}

#[test]
fn rendered_page_hydrates_to_the_same_tree() {
    let registry = app_registry();
    let payload = hydration::render(&task_page(), &registry).expect("render");
    let hydrated = hydration::hydrate(&payload, &registry).expect("hydrate");
    assert_eq!(hydrated, task_page_without_undefined());
}

#[test]
fn payload_survives_embedding_in_a_script_tag() {
    let registry = app_registry();
    let payload = hydration::render(&task_page(), &registry).expect("render");
    let tag = hydration::script_tag(&payload);

    assert!(tag.starts_with(&format!(
        r#"<script id="{DATA_SCRIPT_ID}" type="application/json">"#
    )));
    assert_eq!(tag.matches("</script>").count(), 1);

    let inner = tag
        .split_once('>')
        .and_then(|(_, rest)| rest.strip_suffix("</script>"))
        .expect("script body");
    assert_eq!(inner, payload);
    assert_eq!(
        hydration::hydrate(&format!("\n  {inner}\n"), &registry).expect("hydrate"),
        task_page_without_undefined()
    );
}

#[test]
fn render_refuses_unregistered_components() {
    struct Stranger;
    let page = Element::host("main")
        .child(Element::custom(ComponentType::of::<Stranger>()))
        .build();
    let err = hydration::render(&page, &app_registry()).unwrap_err();
    let HydrationError::Encoding(EncodingError::NoEncoding { component, .. }) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(component, "Stranger");
}

#[test]
fn client_with_a_smaller_registry_fails_loudly() {
    let payload = hydration::render(&task_page(), &app_registry()).expect("render");

    let mut partial = TypeRegistry::new();
    partial
        .register(ComponentType::of::<SiteNav>(), "1")
        .unwrap();
    let err = hydration::hydrate(&payload, &partial).unwrap_err();
    let HydrationError::Decoding(DecodingError::Unregistered { .. }) = &err else {
        panic!("unexpected error: {err}");
    };
    assert!(err.to_string().contains("no component registered as"));
}

#[test]
fn corrupt_payload_is_a_payload_error() {
    let err = hydration::hydrate("%%%", &app_registry()).unwrap_err();
    assert!(matches!(err, HydrationError::Payload(_)));
}
