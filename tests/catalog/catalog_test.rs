use semql::catalog::{CatalogError, MetadataSnapshot, SemanticCatalog};
use semql::model::{Datasource, Dimension, Model, SensitivityLevel};

fn model(id: u64, name: &str) -> Model {
    Model {
        id,
        name: name.to_string(),
        biz_name: name.to_string(),
        aliases: vec![],
        primary_datasource: Datasource {
            name: name.to_string(),
            table_ref: format!("dw.{name}"),
        },
        joined_datasources: vec![],
    }
}

fn dimension(id: u64, model_id: u64, name: &str) -> Dimension {
    Dimension {
        id,
        model_id,
        name: name.to_string(),
        biz_name: name.to_string(),
        aliases: vec![],
        value_aliases: vec![],
        sensitivity: SensitivityLevel::Low,
        use_count: 0,
    }
}

#[test]
fn refresh_activates_a_valid_snapshot() {
    let catalog = SemanticCatalog::new();
    assert!(catalog.get_model(1).is_err());

    let snapshot = MetadataSnapshot {
        models: vec![model(1, "orders")],
        dimensions: vec![dimension(10, 1, "region")],
        metrics: vec![],
    };
    catalog.refresh(snapshot).unwrap();

    let orders = catalog.get_model(1).unwrap();
    assert_eq!(orders.name, "orders");
}

#[test]
fn unknown_model_lookup_fails_with_not_found() {
    let catalog = SemanticCatalog::new();
    catalog
        .refresh(MetadataSnapshot {
            models: vec![model(1, "orders")],
            ..Default::default()
        })
        .unwrap();

    let err = catalog.get_model(42).unwrap_err();
    assert_eq!(err, CatalogError::ModelNotFound(42));
}

#[test]
fn invalid_snapshot_is_rejected_and_previous_stays_active() {
    let catalog = SemanticCatalog::new();
    catalog
        .refresh(MetadataSnapshot {
            models: vec![model(1, "orders")],
            ..Default::default()
        })
        .unwrap();

    // Dimension references a model that doesn't exist.
    let bad = MetadataSnapshot {
        models: vec![model(2, "users")],
        dimensions: vec![dimension(10, 99, "region")],
        metrics: vec![],
    };
    let err = catalog.refresh(bad).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidMetadata(_)));

    // The previous snapshot is still queryable.
    assert!(catalog.get_model(1).is_ok());
    assert!(catalog.get_model(2).is_err());
}

#[test]
fn readers_keep_their_snapshot_across_a_refresh() {
    let catalog = SemanticCatalog::new();
    catalog
        .refresh(MetadataSnapshot {
            models: vec![model(1, "orders")],
            ..Default::default()
        })
        .unwrap();

    // A reader pins the current index for its whole request.
    let pinned = catalog.snapshot();

    catalog
        .refresh(MetadataSnapshot {
            models: vec![model(2, "users")],
            ..Default::default()
        })
        .unwrap();

    // The pinned view is unchanged; new lookups see the new snapshot.
    assert!(pinned.get_model(1).is_ok());
    assert!(pinned.get_model(2).is_err());
    assert!(catalog.get_model(2).is_ok());
    assert!(catalog.get_model(1).is_err());
}

#[test]
fn malformed_snapshot_json_is_rejected() {
    let err = MetadataSnapshot::from_json("{not json").unwrap_err();
    assert!(matches!(err, CatalogError::MalformedSnapshot(_)));
}

#[test]
fn column_sensitivity_resolves_by_name_and_biz_name() {
    let mut dim = dimension(10, 1, "customer phone");
    dim.biz_name = "customer_phone".to_string();
    dim.sensitivity = SensitivityLevel::High;

    let catalog = SemanticCatalog::from_snapshot(MetadataSnapshot {
        models: vec![model(1, "orders")],
        dimensions: vec![dim],
        metrics: vec![],
    })
    .unwrap();
    let index = catalog.snapshot();

    assert_eq!(
        index.column_sensitivity(1, "customer_phone"),
        Some(SensitivityLevel::High)
    );
    assert_eq!(
        index.column_sensitivity(1, "Customer Phone"),
        Some(SensitivityLevel::High)
    );
    assert_eq!(index.column_sensitivity(1, "amount"), None);
}

#[test]
fn column_sensitivity_takes_the_strictest_of_duplicate_names() {
    // Two declarations may share a normalized column name. Whichever the
    // internal map happens to yield first must not decide the level; the
    // strictest declaration wins.
    let mut duplicates = Vec::new();
    for i in 0..16u64 {
        let mut low = dimension(100 + i * 2, 1, &format!("field_{i}"));
        low.sensitivity = SensitivityLevel::Low;
        let mut high = dimension(101 + i * 2, 1, &format!("Field_{i}"));
        high.biz_name = format!("field_{i}");
        high.sensitivity = SensitivityLevel::High;
        duplicates.push(low);
        duplicates.push(high);
    }

    let catalog = SemanticCatalog::from_snapshot(MetadataSnapshot {
        models: vec![model(1, "orders")],
        dimensions: duplicates,
        metrics: vec![],
    })
    .unwrap();
    let index = catalog.snapshot();

    for i in 0..16u64 {
        assert_eq!(
            index.column_sensitivity(1, &format!("field_{i}")),
            Some(SensitivityLevel::High)
        );
    }
}
