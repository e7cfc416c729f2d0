use rust_data_shaping::{
    project, project_optional, project_with_options, DuplicateFields, ShapeError, ShapeOptions,
    Shape, Value,
};

#[derive(Shape)]
#[shape(rename_all = "PascalCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub author_id: i64,
}

fn courses() -> Vec<Course> {
    vec![
        Course {
            id: 1,
            title: "Commandeering a Ship Without Getting Caught".to_string(),
            description: Some("Commandeering a ship in rough waters isn't easy.".to_string()),
            author_id: 10,
        },
        Course {
            id: 2,
            title: "Overthrowing Mutiny".to_string(),
            description: None,
            author_id: 10,
        },
        Course {
            id: 3,
            title: "Avoid Brawling with Pirates".to_string(),
            description: None,
            author_id: 11,
        },
    ]
}

#[derive(Shape)]
pub struct Pair {
    pub id: i64,
    pub title: String,
}

#[test]
fn blank_fields_select_every_public_field_in_declaration_order() {
    let source = courses();
    for fields in [None, Some(""), Some("   ")] {
        let shaped = project(&source, fields).unwrap();
        assert_eq!(shaped.len(), source.len());
        for record in &shaped {
            assert_eq!(
                record.keys().collect::<Vec<_>>(),
                vec!["Id", "Title", "Description", "AuthorId"]
            );
        }
    }
}

#[test]
fn named_fields_are_trimmed_case_insensitive_and_ordered() {
    let source = courses();
    let shaped = project(&source, Some("authorId, TITLE ,id")).unwrap();

    assert_eq!(shaped.len(), 3);
    for (record, course) in shaped.iter().zip(&source) {
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["AuthorId", "Title", "Id"]);
        assert_eq!(record.get("AuthorId"), Some(&Value::Int64(course.author_id)));
        assert_eq!(record.get("Title"), Some(&Value::Utf8(course.title.clone())));
        assert_eq!(record.get("Id"), Some(&Value::Int64(course.id)));
    }
}

#[test]
fn none_fields_become_null_values() {
    let source = courses();
    let shaped = project(&source, Some("description")).unwrap();
    assert!(matches!(shaped[0].get("Description"), Some(Value::Utf8(_))));
    assert_eq!(shaped[1].get("Description"), Some(&Value::Null));
}

#[test]
fn unknown_field_fails_and_names_field_and_type() {
    let source = courses();
    let err = project(&source, Some("Title,DoesNotExist")).unwrap_err();
    match &err {
        ShapeError::UnknownField { field, type_name } => {
            assert_eq!(field, "DoesNotExist");
            assert_eq!(type_name, "Course");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("DoesNotExist"));
    assert!(err.to_string().contains("Course"));
}

#[test]
fn empty_source_yields_empty_output_but_still_resolves_fields() {
    let empty: Vec<Course> = Vec::new();
    assert!(project(&empty, Some("title")).unwrap().is_empty());
    assert!(project(&empty, None).unwrap().is_empty());

    let err = project(&empty, Some("nope")).unwrap_err();
    assert!(matches!(err, ShapeError::UnknownField { .. }));
}

#[test]
fn missing_source_is_an_invalid_argument() {
    let err = project_optional::<Course, &Vec<Course>>(None, Some("title")).unwrap_err();
    assert!(matches!(err, ShapeError::MissingSource));

    let source = courses();
    let shaped = project_optional(Some(&source), Some("title")).unwrap();
    assert_eq!(shaped.len(), 3);
}

#[test]
fn repeated_calls_are_deeply_equal() {
    let source = courses();
    let a = project(&source, Some("id,description")).unwrap();
    let b = project(&source, Some("id,description")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn duplicate_fields_are_kept_in_order_by_default() {
    let source = courses();
    let shaped = project(&source, Some("Id,Title,id")).unwrap();
    assert_eq!(shaped[0].keys().collect::<Vec<_>>(), vec!["Id", "Title", "Id"]);
    assert_eq!(
        shaped[0].values().cloned().collect::<Vec<_>>(),
        vec![
            Value::Int64(1),
            Value::Utf8(source[0].title.clone()),
            Value::Int64(1)
        ]
    );
}

#[test]
fn duplicate_policy_can_collapse_or_reject() {
    let source = courses();

    let collapse = ShapeOptions {
        duplicates: DuplicateFields::Collapse,
        ..Default::default()
    };
    let shaped = project_with_options(Some(&source), Some("Id,Title,id"), &collapse).unwrap();
    assert_eq!(shaped[0].keys().collect::<Vec<_>>(), vec!["Id", "Title"]);

    let reject = ShapeOptions {
        duplicates: DuplicateFields::Reject,
        ..Default::default()
    };
    let err = project_with_options(Some(&source), Some("Id,Title,id"), &reject).unwrap_err();
    assert!(matches!(err, ShapeError::DuplicateField { ref field, .. } if field == "id"));
}

#[test]
fn source_is_left_untouched_and_output_is_independent() {
    let source = courses();
    let mut shaped = project(&source, Some("title")).unwrap();
    shaped[0].insert("Extra", Value::Bool(true));

    assert_eq!(shaped[0].len(), 2);
    assert_eq!(shaped[1].len(), 1);
    assert_eq!(source[0].title, "Commandeering a Ship Without Getting Caught");
}

#[test]
fn title_only_example_serializes_to_json() {
    let source = vec![
        Pair {
            id: 1,
            title: "A".to_string(),
        },
        Pair {
            id: 2,
            title: "B".to_string(),
        },
    ];

    let shaped = project(&source, Some("Title")).unwrap();
    let json = rust_data_shaping::output::to_json_string(&shaped).unwrap();
    assert_eq!(json, r#"[{"title":"A"},{"title":"B"}]"#);
    assert_eq!(source[0].id, 1);
}
