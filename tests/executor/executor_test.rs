use std::sync::Arc;
use std::time::Duration;

use semql::catalog::{MetadataSnapshot, SemanticCatalog};
use semql::executor::{
    ColumnInfo, ExecuteError, MockConnector, QueryExecutor, RetryPolicy, RowSet, Value,
};
use semql::model::{Datasource, Dimension, Model, SensitivityLevel, UserContext};

fn catalog_with_phone_dimension() -> Arc<SemanticCatalog> {
    let snapshot = MetadataSnapshot {
        models: vec![Model {
            id: 1,
            name: "orders".to_string(),
            biz_name: "orders".to_string(),
            aliases: vec![],
            primary_datasource: Datasource {
                name: "orders".to_string(),
                table_ref: "dw.orders".to_string(),
            },
            joined_datasources: vec![],
        }],
        dimensions: vec![
            Dimension {
                id: 10,
                model_id: 1,
                name: "region".to_string(),
                biz_name: "region".to_string(),
                aliases: vec![],
                value_aliases: vec![],
                sensitivity: SensitivityLevel::Low,
                use_count: 0,
            },
            Dimension {
                id: 11,
                model_id: 1,
                name: "customer phone".to_string(),
                biz_name: "customer_phone".to_string(),
                aliases: vec![],
                value_aliases: vec![],
                sensitivity: SensitivityLevel::High,
                use_count: 0,
            },
        ],
        metrics: vec![],
    };
    Arc::new(SemanticCatalog::from_snapshot(snapshot).unwrap())
}

fn executor(connector: Arc<MockConnector>, catalog: Arc<SemanticCatalog>) -> QueryExecutor {
    QueryExecutor::new(
        connector,
        catalog,
        RetryPolicy {
            max_retries: 2,
            initial_backoff: Duration::from_millis(10),
        },
    )
}

fn sample_rows() -> RowSet {
    RowSet::new(
        vec![
            ColumnInfo::new("region", "text"),
            ColumnInfo::new("customer_phone", "text"),
        ],
        vec![
            vec![Value::text("US"), Value::text("555-0100")],
            vec![Value::text("CA"), Value::text("555-0199")],
        ],
    )
}

fn low_user() -> UserContext {
    UserContext::new("analyst", SensitivityLevel::Low)
}

#[tokio::test]
async fn success_returns_rows() {
    let connector = Arc::new(MockConnector::new().with_text_column("region", &["US", "CA"]));
    let exec = executor(Arc::clone(&connector), catalog_with_phone_dimension());

    let rows = exec
        .execute("SELECT 1", 1, &low_user(), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(rows.row_count(), 2);
    assert_eq!(connector.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried_with_backoff() {
    let connector = Arc::new(
        MockConnector::new()
            .with_text_column("region", &["US"])
            .failing_transiently(2),
    );
    let exec = executor(Arc::clone(&connector), catalog_with_phone_dimension());

    let rows = exec
        .execute("SELECT 1", 1, &low_user(), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(rows.row_count(), 1);
    assert_eq!(connector.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_surface_connection_failure() {
    let connector = Arc::new(
        MockConnector::new()
            .with_text_column("region", &["US"])
            .failing_transiently(10),
    );
    let exec = executor(Arc::clone(&connector), catalog_with_phone_dimension());

    let err = exec
        .execute("SELECT 1", 1, &low_user(), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, ExecuteError::ConnectionFailed(_)));
    // Initial attempt plus two retries.
    assert_eq!(connector.call_count(), 3);
}

#[tokio::test]
async fn rejected_statement_fails_immediately_without_retry() {
    let connector = Arc::new(MockConnector::new().rejecting("syntax error near FROM"));
    let exec = executor(Arc::clone(&connector), catalog_with_phone_dimension());

    let err = exec
        .execute("SELECT 1", 1, &low_user(), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, ExecuteError::ExecutionError(_)));
    assert_eq!(connector.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn deadline_cancels_the_call() {
    let connector = Arc::new(
        MockConnector::new()
            .with_text_column("region", &["US"])
            .with_delay(Duration::from_secs(60)),
    );
    let exec = executor(Arc::clone(&connector), catalog_with_phone_dimension());

    let err = exec
        .execute("SELECT 1", 1, &low_user(), Duration::from_millis(100))
        .await
        .unwrap_err();
    assert_eq!(err, ExecuteError::Timeout(Duration::from_millis(100)));
    assert_eq!(connector.call_count(), 1);
}

#[tokio::test]
async fn sensitive_columns_are_masked_below_clearance() {
    let connector = Arc::new(MockConnector::new().with_result(sample_rows()));
    let exec = executor(connector, catalog_with_phone_dimension());

    let rows = exec
        .execute("SELECT 1", 1, &low_user(), Duration::from_secs(5))
        .await
        .unwrap();

    // The region column is untouched, the phone column is masked.
    assert_eq!(rows.rows[0][0], Value::text("US"));
    assert_eq!(rows.rows[0][1], Value::text("******"));
    assert_eq!(rows.rows[1][1], Value::text("******"));
}

#[tokio::test]
async fn duplicate_named_column_is_masked_at_the_stricter_level() {
    // A Low and a High dimension share the normalized column name; the
    // post-filter must mask for a Low-clearance user no matter which
    // declaration a lookup sees first.
    let snapshot = MetadataSnapshot {
        models: vec![Model {
            id: 1,
            name: "orders".to_string(),
            biz_name: "orders".to_string(),
            aliases: vec![],
            primary_datasource: Datasource {
                name: "orders".to_string(),
                table_ref: "dw.orders".to_string(),
            },
            joined_datasources: vec![],
        }],
        dimensions: vec![
            Dimension {
                id: 10,
                model_id: 1,
                name: "contact".to_string(),
                biz_name: "contact".to_string(),
                aliases: vec![],
                value_aliases: vec![],
                sensitivity: SensitivityLevel::Low,
                use_count: 0,
            },
            Dimension {
                id: 11,
                model_id: 1,
                name: "Contact".to_string(),
                biz_name: "contact".to_string(),
                aliases: vec![],
                value_aliases: vec![],
                sensitivity: SensitivityLevel::High,
                use_count: 0,
            },
        ],
        metrics: vec![],
    };
    let catalog = Arc::new(SemanticCatalog::from_snapshot(snapshot).unwrap());

    let rows = RowSet::new(
        vec![ColumnInfo::new("contact", "text")],
        vec![vec![Value::text("555-0100")]],
    );
    let connector = Arc::new(MockConnector::new().with_result(rows));
    let exec = executor(connector, catalog);

    let rows = exec
        .execute("SELECT 1", 1, &low_user(), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(rows.rows[0][0], Value::text("******"));
}

#[tokio::test]
async fn high_clearance_sees_sensitive_columns() {
    let connector = Arc::new(MockConnector::new().with_result(sample_rows()));
    let exec = executor(connector, catalog_with_phone_dimension());

    let admin = UserContext::new("admin", SensitivityLevel::High);
    let rows = exec
        .execute("SELECT 1", 1, &admin, Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(rows.rows[0][1], Value::text("555-0100"));
}
