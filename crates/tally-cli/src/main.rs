use serde::Deserialize;
use tokio::time::{Duration, sleep};

use tally_core::domain::{Report, TallyError};

#[derive(Debug, Deserialize)]
struct Customer {
    id: i64,
    name: String,
}

/// Pretend data-access call: decode a "row" after a short round trip.
async fn load_customer(raw: &str) -> Report<Customer> {
    let mut report = Report::new();

    // simulated wire latency so elapsed_ms has something to show
    sleep(Duration::from_millis(25)).await;

    match serde_json::from_str::<Customer>(raw) {
        Ok(customer) => {
            report.set_id(customer.id);
            report.set_data(customer);
        }
        Err(e) => report.capture(TallyError::with_source("customer row could not be decoded", e)),
    }
    report
}

/// Pretend update call: on success the row count comes back; otherwise the
/// validation findings land in the alternate payload, and that assignment
/// by itself marks the report failed.
async fn rename_customer(new_name: &str) -> Report<u64, Vec<String>> {
    let mut report = Report::new();

    sleep(Duration::from_millis(10)).await;

    let mut findings = Vec::new();
    if new_name.trim().is_empty() {
        findings.push("name must not be blank".to_string());
    }
    if new_name.len() > 64 {
        findings.push("name is longer than 64 characters".to_string());
    }

    if findings.is_empty() {
        report.set_affected_rows(1);
        report.set_data(1);
    } else {
        report.set_alternative(findings);
    }
    report
}

#[tokio::main]
async fn main() {
    // 1) happy path: typed payload plus generated id
    let loaded = load_customer(r#"{"id": 42, "name": "Ada"}"#).await;
    println!("loaded: {:?}", loaded.data());
    println!(
        "{}",
        serde_json::to_string_pretty(&loaded.view()).expect("view serializes")
    );

    // 2) failure path: the decode error chain becomes the message
    let broken = load_customer(r#"{"id": "not-a-number"}"#).await;
    println!(
        "success={} is_error={} message:\n{}",
        broken.success(),
        broken.is_error(),
        broken.message()
    );

    // 3) alternate payload path: findings come back, and the report is
    // marked failed by the assignment itself
    let rejected = rename_customer("").await;
    println!("findings: {:?}", rejected.alternative());
    println!(
        "{}",
        serde_json::to_string_pretty(&rejected.view()).expect("view serializes")
    );
}
