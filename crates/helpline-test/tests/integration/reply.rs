//! Replies over HTTP.

use salvo::http::StatusCode;

use super::helpers::*;

fn reply_path(id: &str) -> String {
    format!("{}/reply", ticket_path(id))
}

fn status_path(id: &str) -> String {
    format!("{}/status", ticket_path(id))
}

#[test_log::test(tokio::test)]
async fn reply_appends_message_and_refreshes_recency() {
    let test_db = test_db_or_skip!();
    let service = test_db.service().await;
    let alice = TestCaller::user("Alice");

    let created = create_ticket_as(&service, &alice, "Login fails", "Cannot sign in since today.").await;
    let id = json_str(&created, "id");

    let message = TestRequest::post(&reply_path(id))
        .as_caller(&alice)
        .form(&[("message", "Still happening after a restart.")])
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(message["ticketId"], id);
    assert_eq!(message["senderType"], "USER");
    assert_eq!(message["senderId"], alice.id.to_string());
    assert_eq!(message["message"], "Still happening after a restart.");

    let fetched = TestRequest::get(&ticket_path(id))
        .as_caller(&alice)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let messages = fetched["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1]["id"], message["id"]);
    assert_eq!(fetched["updatedAt"], message["createdAt"]);

    let before: chrono::DateTime<chrono::Utc> =
        json_str(&created, "updatedAt").parse().expect("timestamp");
    let after: chrono::DateTime<chrono::Utc> =
        json_str(&fetched, "updatedAt").parse().expect("timestamp");
    assert!(after > before, "updatedAt must move forward: {before} -> {after}");
}

#[test_log::test(tokio::test)]
async fn consecutive_replies_keep_thread_order() {
    let test_db = test_db_or_skip!();
    let service = test_db.service().await;
    let alice = TestCaller::user("Alice");
    let admin = TestCaller::admin("Support");

    let created = create_ticket_as(&service, &alice, "Order question", "Where is my parcel now?").await;
    let id = json_str(&created, "id");

    for (caller, text) in [
        (&admin, "Let me check with the courier."),
        (&alice, "Thanks, waiting."),
        (&admin, "It arrives tomorrow."),
    ] {
        let _message = TestRequest::post(&reply_path(id))
            .as_caller(caller)
            .form(&[("message", text)])
            .send(&service)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let fetched = TestRequest::get(&ticket_path(id))
        .as_caller(&alice)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let thread: Vec<(&str, &str)> = fetched["messages"]
        .as_array()
        .expect("messages array")
        .iter()
        .map(|m| (json_str(m, "senderType"), json_str(m, "message")))
        .collect();
    assert_eq!(
        thread,
        [
            ("USER", "Where is my parcel now?"),
            ("ADMIN", "Let me check with the courier."),
            ("USER", "Thanks, waiting."),
            ("ADMIN", "It arrives tomorrow."),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn admin_reply_is_marked_admin() {
    let test_db = test_db_or_skip!();
    let service = test_db.service().await;
    let alice = TestCaller::user("Alice");
    let admin = TestCaller::admin("Support");

    let created = create_ticket_as(&service, &alice, "Need help", "Please call me back soon.").await;

    let message = TestRequest::post(&reply_path(json_str(&created, "id")))
        .as_caller(&admin)
        .form(&[("message", "We will call you at noon."), ("senderType", "USER")])
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(message["senderType"], "ADMIN");
    assert_eq!(message["senderId"], admin.id.to_string());
}

#[test_log::test(tokio::test)]
async fn blank_reply_is_rejected() {
    let test_db = test_db_or_skip!();
    let service = test_db.service().await;
    let alice = TestCaller::user("Alice");

    let created = create_ticket_as(&service, &alice, "Blank reply", "Testing whitespace replies.").await;
    let id = json_str(&created, "id");

    let _response = TestRequest::post(&reply_path(id))
        .as_caller(&alice)
        .form(&[("message", "   \n\t ")])
        .send(&service)
        .await
        .assert_invalid_field("message");

    let ticket_id = id.parse().expect("uuid");
    assert_eq!(test_db.count_messages(ticket_id).await.expect("count"), 1);
}

#[test_log::test(tokio::test)]
async fn reply_to_resolved_ticket_is_accepted_without_reopening() {
    let test_db = test_db_or_skip!();
    let service = test_db.service().await;
    let alice = TestCaller::user("Alice");
    let admin = TestCaller::admin("Support");

    let created = create_ticket_as(&service, &alice, "Resolved one", "This got fixed already.").await;
    let id = json_str(&created, "id");

    let _resolved = TestRequest::patch(&status_path(id))
        .as_caller(&admin)
        .json(serde_json::json!({"status": "RESOLVED"}))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let _message = TestRequest::post(&reply_path(id))
        .as_caller(&alice)
        .form(&[("message", "It broke again.")])
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let status = TestRequest::get(&status_path(id))
        .as_caller(&alice)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(status["status"], "RESOLVED");
}

#[test_log::test(tokio::test)]
async fn reply_to_resolved_ticket_conflicts_under_reject_policy() {
    let test_db = test_db_or_skip!();
    let mut settings = test_config();
    settings.tickets.resolved_reply_policy =
        helpline_test::component::config::ResolvedReplyPolicy::Reject;
    let service = test_db.service_with(settings).await;
    let alice = TestCaller::user("Alice");
    let admin = TestCaller::admin("Support");

    let created = create_ticket_as(&service, &alice, "Closed one", "This one will be closed.").await;
    let id = json_str(&created, "id");

    let _closed = TestRequest::patch(&status_path(id))
        .as_caller(&admin)
        .json(serde_json::json!({"status": "CLOSED"}))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let _response = TestRequest::post(&reply_path(id))
        .as_caller(&alice)
        .form(&[("message", "Please reopen this.")])
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn reply_to_unknown_ticket_is_not_found() {
    let test_db = test_db_or_skip!();
    let service = test_db.service().await;
    let admin = TestCaller::admin("Support");

    let _response = TestRequest::post(&reply_path(&uuid::Uuid::now_v7().to_string()))
        .as_caller(&admin)
        .form(&[("message", "Anyone there?")])
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn reply_carries_attachment() {
    let test_db = test_db_or_skip!();
    let service = test_db.service().await;
    let alice = TestCaller::user("Alice");

    let created = create_ticket_as(&service, &alice, "Log file", "I will attach the logs next.").await;

    let message = TestRequest::post(&reply_path(json_str(&created, "id")))
        .as_caller(&alice)
        .multipart(&[("message", "Logs attached.")], ("attachment", "app.log", b"line one\nline two\n"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let url = json_str(&message, "attachmentUrl");
    assert!(url.starts_with("/attachments/") && url.ends_with(".log"), "unexpected url {url}");
}
