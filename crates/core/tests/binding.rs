use std::sync::Arc;
use std::thread;

use sqlbind_core::prelude::*;
use sqlbind_macros::ty;

fn person() -> Type {
    ty!(r#"{
        name: string,
        age: int,
        address: {
            city: string,
            zip: int,
            country: string
        }
    }"#)
}

fn build(descriptors: Vec<ParameterDescriptor>, kind: OperatorKind) -> ParameterContext {
    let names = DeclaredNames::new(&descriptors);
    ParameterContext::new(descriptors, &names, kind).expect("signature should be bindable")
}

#[test]
fn type_literals_match_constructors() {
    assert_eq!(ty!("null"), Type::null());
    assert_eq!(ty!("bool"), Type::bool());
    assert_eq!(ty!("int"), Type::int());
    assert_eq!(ty!("float"), Type::float());
    assert_eq!(ty!("decimal"), Type::decimal());
    assert_eq!(ty!("bytes"), Type::bytes());
    assert_eq!(ty!("timestamp"), Type::timestamp());
    assert_eq!(ty!("any"), Type::any());
    assert_eq!(ty!("unknown"), Type::unknown());
    assert_eq!(ty!("list<string>"), Type::list(Type::string()));
    assert_eq!(ty!("set<uuid>"), Type::set(Type::uuid()));
    assert_eq!(ty!("{}"), Type::empty_object());
    assert_eq!(
        ty!("{ name: string, age: int }"),
        Type::object_with(vec![("name", Type::string()), ("age", Type::int())])
    );
    assert_eq!(
        ty!("list<{ id: int }>"),
        Type::list(Type::object_with(vec![("id", Type::int())]))
    );
}

#[test]
fn values_convert_from_primitives() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(42), Value::Int(42));
    assert_eq!(Value::from(1.5), Value::Float(1.5));
    assert_eq!(Value::from("Ada"), Value::Text("Ada".to_string()));
    assert_eq!(Value::from("Ada".to_string()), Value::Text("Ada".to_string()));
}

#[test]
fn declared_types_resolve_by_logical_name() {
    let context = build(
        vec![
            ParameterDescriptor::named(0, Type::int(), "id"),
            ParameterDescriptor::named(1, person(), "user"),
        ],
        OperatorKind::Query,
    );

    assert_eq!(context.resolve_type("id", "").unwrap(), Type::int());
    assert_eq!(context.resolve_type("user", "").unwrap(), person());
    assert_eq!(
        context.resolve_type("user", "address.city").unwrap(),
        Type::string()
    );
}

#[test]
fn bare_property_names_find_their_owner() {
    let context = build(
        vec![
            ParameterDescriptor::named(0, Type::int(), "id"),
            ParameterDescriptor::named(1, person(), "user"),
            ParameterDescriptor::named(2, ty!("{ name: string, country: string }"), "company"),
        ],
        OperatorKind::Query,
    );

    assert_eq!(context.owner_of("age").unwrap(), Some("user"));
    assert_eq!(context.owner_of("country").unwrap(), Some("company"));
    assert_eq!(context.owner_of("salary").unwrap(), None);

    let err = context.owner_of("name").unwrap_err();
    match err {
        BindError::AmbiguousProperty {
            property,
            parameters,
        } => {
            assert_eq!(property, "name");
            assert_eq!(parameters, vec!["user".to_string(), "company".to_string()]);
        }
        other => panic!("expected AmbiguousProperty, got {other:?}"),
    }
}

#[test]
fn batch_declarations_are_validated_up_front() {
    // Two declared parameters.
    let descriptors = vec![
        ParameterDescriptor::named(0, ty!("list<{ id: int }>"), "rows"),
        ParameterDescriptor::named(1, Type::int(), "id"),
    ];
    let names = DeclaredNames::new(&descriptors);
    let err = ParameterContext::new(descriptors, &names, OperatorKind::BatchUpdate).unwrap_err();
    assert!(matches!(
        err,
        BindError::IncorrectParameterCount { found: 2 }
    ));
    assert!(err.is_declaration_error());

    // One parameter, but not iterable.
    let descriptors = vec![ParameterDescriptor::named(0, person(), "user")];
    let names = DeclaredNames::new(&descriptors);
    let err = ParameterContext::new(descriptors, &names, OperatorKind::BatchUpdate).unwrap_err();
    assert!(matches!(err, BindError::IncorrectParameterType { .. }));

    // One list parameter: the context sees one logical row.
    let descriptors = vec![ParameterDescriptor::named(
        0,
        Type::list(person()),
        "rows",
    )];
    let names = DeclaredNames::new(&descriptors);
    let context = ParameterContext::new(descriptors, &names, OperatorKind::BatchUpdate).unwrap();
    assert_eq!(context.descriptors().len(), 1);
    assert_eq!(context.descriptors()[0].ty, person());
    assert_eq!(context.resolve_type("rows", "age").unwrap(), Type::int());
}

#[test]
fn failed_walks_name_the_resolvable_parent() {
    let context = build(
        vec![ParameterDescriptor::named(0, person(), "user")],
        OperatorKind::Query,
    );

    let err = context
        .resolve_type("user", "address.city.length")
        .unwrap_err();
    match &err {
        BindError::NotReadableProperty {
            parameter,
            path,
            parent_path,
            parent_type,
        } => {
            assert_eq!(parameter, "user");
            assert_eq!(path, "address.city.length");
            assert_eq!(parent_path, "address.city");
            assert_eq!(parent_type, &Type::string());
        }
        other => panic!("expected NotReadableProperty, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "property :user.address.city.length is not readable, \
         the type of :user.address.city is string"
    );
    assert!(err.report().contains("Suggestion:"));
}

#[test]
fn repeat_resolution_does_not_rewalk() {
    let context = build(
        vec![ParameterDescriptor::named(0, person(), "user")],
        OperatorKind::Query,
    );

    let first = context.resolve_type("user", "address.zip").unwrap();
    let second = context.resolve_type("user", "address.zip").unwrap();
    assert_eq!(first, second);

    let stats = context.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.entries, 1);
}

#[test]
fn registered_descriptors_build_signatures() {
    let mut registry = TypeRegistry::new();
    registry.register("Person", person());
    assert!(registry.contains("Person"));
    assert!(!registry.contains("Order"));

    let descriptor = ParameterDescriptor::named(
        0,
        registry.get("Person").cloned().expect("registered"),
        "user",
    );
    let context = build(vec![descriptor], OperatorKind::Query);
    assert_eq!(context.resolve_type("user", "name").unwrap(), Type::string());
}

#[test]
fn concurrent_resolution_matches_the_single_threaded_reference() {
    let context = Arc::new(build(
        vec![
            ParameterDescriptor::named(0, Type::int(), "id"),
            ParameterDescriptor::named(1, person(), "user"),
        ],
        OperatorKind::Query,
    ));

    let paths: Vec<(&str, &str, Type)> = vec![
        ("id", "", Type::int()),
        ("user", "", person()),
        ("user", "name", Type::string()),
        ("user", "age", Type::int()),
        ("user", "address", ty!("{ city: string, zip: int, country: string }")),
        ("user", "address.city", Type::string()),
        ("user", "address.zip", Type::int()),
        ("user", "address.country", Type::string()),
    ];

    let handles: Vec<_> = (0..8)
        .map(|offset| {
            let context = Arc::clone(&context);
            let paths = paths.clone();
            thread::spawn(move || {
                for round in 0..50 {
                    let (parameter, path, expected) = &paths[(offset + round) % paths.len()];
                    let resolved = context
                        .resolve_type(parameter, path)
                        .expect("resolution should succeed");
                    assert_eq!(&resolved, expected);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }

    // Each distinct pair was computed at least once; everything else hit.
    let stats = context.cache_stats();
    assert_eq!(stats.entries, paths.len());
    assert!(stats.misses >= paths.len() as u64);
    assert_eq!(stats.hits + stats.misses, 400);
}
