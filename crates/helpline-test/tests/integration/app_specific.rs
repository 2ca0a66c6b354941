//! Service-level endpoints.

use salvo::http::StatusCode;

use helpline_test::component::constants::APP_ROUTE_PREFIX;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn healthcheck_reports_database() {
    let test_db = test_db_or_skip!();
    let service = test_db.service().await;

    let health = TestRequest::get(&format!("{APP_ROUTE_PREFIX}/healthcheck"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(health, serde_json::json!({"status": "ok", "database": "ok"}));
}

#[test_log::test(tokio::test)]
async fn whoami_echoes_the_proxy_identity() {
    let test_db = test_db_or_skip!();
    let service = test_db.service().await;
    let admin = TestCaller::admin("Support");

    let me = TestRequest::get(&format!("{APP_ROUTE_PREFIX}/whoami"))
        .as_caller(&admin)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        me,
        serde_json::json!({
            "id": admin.id.to_string(),
            "name": "Support",
            "email": "support@example.com",
            "role": "administrator",
        })
    );
}

#[test_log::test(tokio::test)]
async fn whoami_refreshes_the_directory_entry() {
    let test_db = test_db_or_skip!();
    let service = test_db.service().await;
    let mut alice = TestCaller::user("Alice");

    let created = create_ticket_as(&service, &alice, "Before rename", "Owner name changes later.").await;

    alice.name = "Alice Liddell".to_string();
    let _me = TestRequest::get(&format!("{APP_ROUTE_PREFIX}/whoami"))
        .as_caller(&alice)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let fetched = TestRequest::get(&ticket_path(json_str(&created, "id")))
        .as_caller(&alice)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched["owner"]["name"], "Alice Liddell");
}

#[test_log::test(tokio::test)]
async fn whoami_requires_identity() {
    let test_db = test_db_or_skip!();
    let service = test_db.service().await;

    let _response = TestRequest::get(&format!("{APP_ROUTE_PREFIX}/whoami"))
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
