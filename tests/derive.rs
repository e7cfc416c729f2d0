use rust_data_shaping::{project, Shape, ToValue, Value};

#[derive(Shape)]
pub struct Author {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    #[shape(skip)]
    pub password_hash: String,
    internal_notes: String,
    #[shape(include, rename = "Category")]
    main_category: Option<String>,
    pub(crate) crate_only: bool,
}

impl Author {
    fn berry() -> Self {
        Self {
            id: 1,
            first_name: "Berry".to_string(),
            last_name: "Griffin Beak Eldritch".to_string(),
            password_hash: "secret".to_string(),
            internal_notes: "n/a".to_string(),
            main_category: Some("Ships".to_string()),
            crate_only: true,
        }
    }
}

#[derive(Shape)]
#[shape(rename_all = "camelCase")]
pub struct Event {
    pub event_id: u64,
    pub r#type: String,
    pub tags: Vec<String>,
    pub score: f64,
}

#[derive(Shape)]
pub struct Wrapper<T> {
    pub inner: T,
    pub label: &'static str,
}

#[derive(Shape)]
pub struct Nothing {}

#[test]
fn only_public_or_included_fields_are_exposed() {
    assert_eq!(
        Author::field_names(),
        vec!["id", "first_name", "last_name", "Category"]
    );
    assert_eq!(Author::type_name(), "Author");

    let author = Author::berry();
    assert_eq!(author.field_value("category"), Some(Value::Utf8("Ships".to_string())));
    assert_eq!(author.field_value("password_hash"), None);
    assert_eq!(author.field_value("internal_notes"), None);
    assert_eq!(author.field_value("crate_only"), None);
    assert_eq!(author.internal_notes, "n/a");
    assert!(author.crate_only);
}

#[test]
fn skipped_fields_cannot_be_requested() {
    let authors = vec![Author::berry()];
    let err = project(&authors, Some("id,password_hash")).unwrap_err();
    assert_eq!(err.field(), Some("password_hash"));
}

#[test]
fn rename_all_applies_and_raw_identifiers_are_unescaped() {
    assert_eq!(Event::field_names(), vec!["eventId", "type", "tags", "score"]);

    let events = vec![Event {
        event_id: 42,
        r#type: "created".to_string(),
        tags: vec!["a".to_string(), "b".to_string()],
        score: 0.5,
    }];
    let shaped = project(&events, Some("TYPE, tags, EventId")).unwrap();
    assert_eq!(shaped[0].keys().collect::<Vec<_>>(), vec!["type", "tags", "eventId"]);
    assert_eq!(
        shaped[0].get("tags"),
        Some(&Value::List(vec![
            Value::Utf8("a".to_string()),
            Value::Utf8("b".to_string())
        ]))
    );
    assert_eq!(shaped[0].get("eventId"), Some(&Value::UInt64(42)));
}

#[test]
fn generic_structs_shape_through_to_value() {
    let items = vec![
        Wrapper {
            inner: 7i32,
            label: "seven",
        },
        Wrapper {
            inner: 8i32,
            label: "eight",
        },
    ];
    let shaped = project(&items, None).unwrap();
    assert_eq!(shaped[1].get("inner"), Some(&8i32.to_value()));
    assert_eq!(shaped[1].get("label"), Some(&Value::Utf8("eight".to_string())));
    assert_eq!(Wrapper::<i32>::type_name(), "Wrapper");
}

#[test]
fn struct_without_fields_shapes_to_empty_records() {
    let items = vec![Nothing {}, Nothing {}];
    let shaped = project(&items, None).unwrap();
    assert_eq!(shaped.len(), 2);
    assert!(shaped.iter().all(|r| r.is_empty()));

    let err = project(&items, Some("anything")).unwrap_err();
    assert_eq!(err.to_string(), "field 'anything' was not found on type 'Nothing'");
}
