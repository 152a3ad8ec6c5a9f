use super::*;
use chrono::TimeZone;
use shared::domain::{CustomerId, CustomerStatus};

struct FailingDirectory;

#[async_trait]
impl CustomerDirectory for FailingDirectory {
    async fn all_customers(&self) -> anyhow::Result<Vec<Customer>> {
        Err(anyhow::anyhow!("backing store unavailable"))
    }
}

fn customer(id: &str, name: &str) -> Customer {
    Customer {
        id: CustomerId::from(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        status: CustomerStatus::Active,
        address: "1 Main St".to_string(),
        joined_at: "2024-01-15T08:30:00Z".to_string(),
        notes: String::new(),
    }
}

fn context(directory: Arc<dyn CustomerDirectory>) -> ApiContext {
    ApiContext {
        directory,
        response_delay: Duration::ZERO,
    }
}

#[test]
fn seed_data_loads_ten_unique_customers() {
    let directory = StaticDirectory::from_seed().expect("seed");
    assert_eq!(directory.len(), 10);
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = StaticDirectory::new(vec![customer("1", "Alice"), customer("1", "Bob")])
        .err()
        .expect("duplicate should fail");
    assert!(err.to_string().contains("duplicate customer id '1'"));
}

#[test]
fn malformed_json_is_rejected() {
    assert!(StaticDirectory::from_json("{\"customers\": 3}").is_err());
}

#[tokio::test]
async fn list_customers_returns_collection_unmodified() {
    let directory = StaticDirectory::new(vec![customer("2", "Bob"), customer("1", "Alice")])
        .expect("directory");
    let response = list_customers(&context(Arc::new(directory)))
        .await
        .expect("customers");
    let names: Vec<_> = response.customers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Bob", "Alice"]);
}

#[tokio::test]
async fn directory_fault_maps_to_generic_error() {
    let err = list_customers(&context(Arc::new(FailingDirectory)))
        .await
        .expect_err("should fail");
    assert_eq!(err, ErrorBody::new(FETCH_FAILED_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn list_customers_waits_for_configured_delay() {
    let ctx = ApiContext {
        directory: Arc::new(StaticDirectory::from_seed().expect("seed")),
        response_delay: Duration::from_millis(500),
    };
    let started = tokio::time::Instant::now();
    list_customers(&ctx).await.expect("customers");
    assert!(started.elapsed() >= Duration::from_millis(500));
}

#[test]
fn health_report_uses_millisecond_utc_timestamp() {
    let now = Utc
        .with_ymd_and_hms(2024, 3, 5, 10, 15, 0)
        .single()
        .expect("timestamp");
    let report = health_report(now);
    assert_eq!(report.status, "OK");
    assert_eq!(report.timestamp, "2024-03-05T10:15:00.000Z");
}
