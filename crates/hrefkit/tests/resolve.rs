use hrefkit::{
    AnyModel, AnyModelSequence, Catalog, ContextMap, Error, FnResolver, IdentityResolver, ModelPath,
    ModelType, PlaceholderResolver, ResourceDescriptor, TemplateError, model_path,
};
use proptest::prelude::*;
use std::sync::Arc;

struct A;
struct B;
struct C;

fn descriptor(path: &str, pattern: ModelPath) -> ResourceDescriptor {
    ResourceDescriptor::resource_type("Resource", path, pattern, Arc::new(IdentityResolver)).unwrap()
}

fn catalog(descriptors: Vec<ResourceDescriptor>) -> Catalog {
    let mut builder = Catalog::builder();
    for descriptor in descriptors {
        builder.add_descriptor(descriptor);
    }
    builder.validate().unwrap()
}

fn resolve(catalog: &Catalog, query: ModelPath) -> hrefkit::Result<String> {
    catalog.resolve_path(&ContextMap::new(), &query)
}

#[test]
fn test_single_candidate_wins() {
    let catalog = catalog(vec![
        descriptor("/a", model_path![A]),
        descriptor("/b", model_path![B]),
    ]);
    assert_eq!(resolve(&catalog, model_path![B]).unwrap(), "/b");
}

#[test]
fn test_exact_beats_wildcard() {
    let catalog = catalog(vec![
        descriptor("/any", model_path![AnyModel]),
        descriptor("/a", model_path![A]),
        descriptor("/tail", model_path![AnyModelSequence, A]),
    ]);
    assert_eq!(resolve(&catalog, model_path![A]).unwrap(), "/a");
}

#[test]
fn test_longest_pattern_wins() {
    let catalog = catalog(vec![
        descriptor("/short", model_path![AnyModelSequence, B]),
        descriptor("/long", model_path![AnyModelSequence, A, B]),
    ]);
    assert_eq!(resolve(&catalog, model_path![C, A, B]).unwrap(), "/long");
}

#[test]
fn test_positional_tie_break() {
    let catalog = catalog(vec![
        descriptor("/any", model_path![AnyModel, AnyModelSequence, C]),
        descriptor("/all", model_path![AnyModelSequence, B, C]),
    ]);
    assert_eq!(resolve(&catalog, model_path![A, B, C]).unwrap(), "/any");

    let catalog = catalog_of_later_exact();
    assert_eq!(resolve(&catalog, model_path![A, B, C]).unwrap(), "/b");
}

#[test]
fn test_exact_first_position_beats_single_wildcard() {
    let catalog = catalog(vec![
        descriptor("/wild", model_path![AnyModel, AnyModelSequence]),
        descriptor("/exact", model_path![A, AnyModelSequence]),
    ]);
    assert_eq!(resolve(&catalog, model_path![A]).unwrap(), "/exact");
}

#[test]
fn test_declared_length_counts_unconsumed_sequence() {
    let catalog = catalog(vec![
        descriptor("/all", model_path![AnyModelSequence]),
        descriptor("/pair", model_path![A, A]),
        descriptor("/padded", model_path![A, A, AnyModelSequence]),
    ]);
    assert_eq!(resolve(&catalog, model_path![A, A]).unwrap(), "/pair");
    assert_eq!(resolve(&catalog, model_path![A, A, B]).unwrap(), "/padded");
    assert_eq!(resolve(&catalog, model_path![B]).unwrap(), "/all");
}

fn catalog_of_later_exact() -> Catalog {
    catalog(vec![
        descriptor("/q", model_path![AnyModel, AnyModel, C]),
        descriptor("/b", model_path![AnyModel, B, C]),
    ])
}

#[test]
fn test_true_ambiguity() {
    let catalog = catalog(vec![
        descriptor("/first", model_path![AnyModelSequence, A, AnyModelSequence]),
        descriptor("/second", model_path![AnyModelSequence, B, AnyModelSequence]),
    ]);
    let err = resolve(&catalog, model_path![A, B]).unwrap_err();
    match err {
        Error::AmbiguousMatch {
            model_path,
            candidates,
        } => {
            assert_eq!(model_path, model_path![A, B]);
            let paths: Vec<_> = candidates.iter().map(|d| d.path()).collect();
            assert_eq!(paths, vec!["/first", "/second"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_not_found() {
    let empty = Catalog::builder().validate().unwrap();
    assert!(matches!(
        resolve(&empty, model_path![A]),
        Err(Error::ResourceNotFound { .. })
    ));

    let catalog = catalog(vec![descriptor("/a", model_path![A])]);
    let err = resolve(&catalog, model_path![A, B]).unwrap_err();
    assert!(err.to_string().contains("[A, B]"));
    assert!(!err.is_configuration());
}

#[test]
fn test_empty_query_matches_sequence_wildcard() {
    let catalog = catalog(vec![
        descriptor("/root", model_path![AnyModelSequence]),
        descriptor("/a", model_path![A]),
    ]);
    assert_eq!(resolve(&catalog, ModelPath::empty()).unwrap(), "/root");
}

#[test]
fn test_duplicate_patterns_rejected() {
    let mut builder = Catalog::builder();
    builder
        .add_descriptor(descriptor("/one", model_path![A, AnyModel]))
        .add_descriptor(descriptor("/two", model_path![A, AnyModelSequence]))
        .add_descriptor(descriptor("/three", model_path![B]))
        .add_descriptor(descriptor("/four", model_path![B]));

    let err = builder.validate().unwrap_err();
    assert!(err.is_configuration());
    let Error::DuplicatePattern { duplicates } = err else {
        panic!("expected duplicate pattern error");
    };
    assert_eq!(duplicates.len(), 2);
    assert_eq!(duplicates[0].pattern, model_path![A, AnyModel]);
    assert_eq!(duplicates[1].descriptors[1].path(), "/four");
}

#[test]
fn test_template_errors_propagate() {
    let failing = FnResolver::new("failing", |template: &str, _: &dyn hrefkit::PathTemplateContext| {
        Err(TemplateError::Failed {
            resolver: "failing".to_string(),
            message:  format!("refusing {}", template),
        })
    });
    let catalog = catalog(vec![
        ResourceDescriptor::resource_type("Resource", "/a", model_path![A], Arc::new(failing)).unwrap(),
        ResourceDescriptor::resource_type("Resource", "/b/{id}", model_path![B], Arc::new(PlaceholderResolver))
            .unwrap(),
    ]);

    assert!(matches!(
        resolve(&catalog, model_path![A]),
        Err(Error::Template(TemplateError::Failed { .. }))
    ));
    assert!(matches!(
        resolve(&catalog, model_path![B]),
        Err(Error::Template(TemplateError::Unresolved { .. }))
    ));
}

#[test]
fn test_resolve_fills_template() {
    let catalog = catalog(vec![
        ResourceDescriptor::method(
            "OrdersResource",
            "get",
            "/customers/{customerId}/orders/{orderId}",
            model_path![AnyModelSequence, B],
            Arc::new(PlaceholderResolver),
        )
        .unwrap(),
    ]);
    let context = ContextMap::new()
        .with_segment("customerId", "c-1")
        .with_segment("orderId", 7);

    let path = catalog
        .resolve(&context, &[ModelType::of::<A>(), ModelType::of::<B>()])
        .unwrap();
    assert_eq!(path, "/customers/c-1/orders/7");
}

#[test]
fn test_catalog_shared_across_threads() {
    let catalog = catalog(vec![descriptor("/a", model_path![AnyModelSequence, A])]);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let catalog = catalog.clone();
            std::thread::spawn(move || resolve(&catalog, model_path![B, A]).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "/a");
    }
}

fn patterns() -> Vec<(&'static str, ModelPath)> {
    vec![
        ("/a", model_path![A]),
        ("/ab", model_path![A, B]),
        ("/any-b", model_path![AnyModel, B]),
        ("/all-c", model_path![AnyModelSequence, C]),
        ("/all-a-b", model_path![AnyModelSequence, A, B]),
        ("/all", model_path![AnyModelSequence]),
        ("/all-a-all", model_path![AnyModelSequence, A, AnyModelSequence, C]),
        ("/all-b-all", model_path![AnyModelSequence, B, AnyModelSequence, C]),
    ]
}

fn query_strategy() -> impl Strategy<Value = ModelPath> {
    let token = prop_oneof![
        Just(ModelType::of::<A>()),
        Just(ModelType::of::<B>()),
        Just(ModelType::of::<C>()),
    ];
    proptest::collection::vec(token, 0..5).prop_map(ModelPath::from)
}

fn outcome(result: hrefkit::Result<String>) -> Result<String, Vec<String>> {
    match result {
        Ok(path) => Ok(path),
        Err(Error::AmbiguousMatch { mut candidates, .. }) => {
            let mut paths: Vec<String> = candidates.drain(..).map(|d| d.path().to_string()).collect();
            paths.sort();
            Err(paths)
        }
        Err(other) => Err(vec![other.to_string()]),
    }
}

proptest! {
    #[test]
    fn registration_order_does_not_change_outcome(
        order in Just((0..patterns().len()).collect::<Vec<_>>()).prop_shuffle(),
        query in query_strategy(),
    ) {
        let all = patterns();
        let baseline = catalog(all.iter().map(|(path, pattern)| descriptor(path, pattern.clone())).collect());
        let shuffled = catalog(
            order
                .iter()
                .map(|&i| descriptor(all[i].0, all[i].1.clone()))
                .collect(),
        );

        prop_assert_eq!(outcome(resolve(&baseline, query.clone())), outcome(resolve(&shuffled, query)));
    }

    #[test]
    fn resolved_descriptor_matches_query(query in query_strategy()) {
        let all = patterns();
        let catalog = catalog(all.iter().map(|(path, pattern)| descriptor(path, pattern.clone())).collect());
        if let Ok(path) = resolve(&catalog, query.clone()) {
            let (_, pattern) = all.iter().find(|(p, _)| *p == path).unwrap();
            prop_assert!(hrefkit::GlobMatcher::new(pattern.clone()).matches(&query));
        }
    }
}
