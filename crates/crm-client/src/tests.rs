//! Gateway and Resource Client Tests
//!
//! Drive the clients against a recording transport.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::executor::block_on;

use crate::audit::TaskEditSession;
use crate::credentials::CredentialStore;
use crate::error::TransportError;
use crate::gateway::{HttpMethod, HttpResponse, MultipartField, RequestBody};
use crate::models::{Attachment, LoginRequest, Task};
use crate::pagination::PaginationParams;
use crate::resources::{AuthClient, CommentClient, ReportClient, TaskClient, UserClient};
use crate::response::{codes, ApiResponse, NO_CONTENT_MESSAGE};
use crate::testing::{gateway, MockTransport, BASE_URL};

const TASK_40: &str = r#"{"success":true,"data":{"id":5,"name":"Migrate","percent":40,"startDate":"2024-05-01","expiredAt":"2024-05-20","userId":8}}"#;

#[test]
fn test_bearer_token_attached() {
    let transport = MockTransport::fixed(200, TASK_40);
    let (gateway, _) = gateway(transport.clone());
    let response = block_on(TaskClient::new(gateway).get_by_id(5));

    assert!(response.success);
    let request = &transport.requests()[0];
    assert_eq!(request.url, format!("{}taskItem/5", BASE_URL));
    assert_eq!(request.header("authorization"), Some("Bearer tok-123"));
}

#[test]
fn test_no_token_no_header() {
    let transport = MockTransport::fixed(200, TASK_40);
    let (gateway, credentials) = gateway(transport.clone());
    credentials.clear();
    block_on(TaskClient::new(gateway).get_by_id(5));
    assert_eq!(transport.requests()[0].header("Authorization"), None);
}

#[test]
fn test_unauthorized_clears_session_on_any_endpoint() {
    for endpoint in ["tasks", "users", "report"] {
        let transport = MockTransport::fixed(401, "");
        let (gateway, credentials) = gateway(transport.clone());
        let invalidated = Arc::new(AtomicUsize::new(0));
        let counter = invalidated.clone();
        let gateway = gateway.on_session_invalidated(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let error = match endpoint {
            "tasks" => block_on(TaskClient::new(gateway).get_all(&PaginationParams::default())).error(),
            "users" => block_on(UserClient::new(gateway).get_by_id(1)).error(),
            _ => block_on(ReportClient::new(gateway).expired_tasks(&PaginationParams::default())).error(),
        };

        assert_eq!(error.map(|e| e.code), Some(codes::http_error(401)));
        assert!(!credentials.is_authenticated());
        assert_eq!(invalidated.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn test_no_content_is_success_without_data() {
    let transport = MockTransport::fixed(204, "");
    let (gateway, _) = gateway(transport.clone());
    let response = block_on(TaskClient::new(gateway).delete(5));

    assert!(response.success);
    assert!(response.data.is_none());
    assert_eq!(response.message.as_deref(), Some(NO_CONTENT_MESSAGE));
    assert_eq!(transport.calls(), vec![format!("DELETE {}taskItem/5", BASE_URL)]);
}

#[test]
fn test_http_error_uses_body_fields() {
    let transport = MockTransport::fixed(409, r#"{"success":false,"errorCode":"USER_EXISTS","message":"Name taken"}"#);
    let (gateway, _) = gateway(transport);
    let response: ApiResponse<serde_json::Value> = block_on(gateway.get("user"));

    assert!(!response.success);
    assert_eq!(response.error_code.as_deref(), Some("USER_EXISTS"));
    assert_eq!(response.message.as_deref(), Some("Name taken"));
}

#[test]
fn test_http_error_synthesized_from_status() {
    let transport = MockTransport::fixed(500, "<html>oops</html>");
    let (gateway, _) = gateway(transport);
    let response: ApiResponse<serde_json::Value> = block_on(gateway.get("user"));

    assert_eq!(response.error_code.as_deref(), Some("HTTP_ERROR_500"));
    assert_eq!(response.message.as_deref(), Some("HTTP error 500"));
    assert!(response.data.is_none());
}

#[test]
fn test_network_failure() {
    let transport = MockTransport::new(|_| Err(TransportError::Network("connection refused".into())));
    let (gateway, credentials) = gateway(transport);
    let response = block_on(UserClient::new(gateway).get_by_id(1));

    assert_eq!(response.error_code.as_deref(), Some(codes::NETWORK_ERROR));
    assert!(response.message.unwrap().contains("connection refused"));
    assert!(credentials.is_authenticated());
}

#[test]
fn test_unreadable_success_body() {
    let transport = MockTransport::fixed(200, "not json");
    let (gateway, _) = gateway(transport);
    let response = block_on(TaskClient::new(gateway).get_by_id(1));
    assert_eq!(response.error_code.as_deref(), Some(codes::INVALID_RESPONSE));
}

#[test]
fn test_list_query_and_filter() {
    let transport = MockTransport::fixed(200, r#"{"success":true,"data":[],"pagination":{"totalCount":0}}"#);
    let (gateway, _) = gateway(transport.clone());
    let users = UserClient::new(gateway.clone());
    let params = PaginationParams::default().with_page(2).toggle_sort("position");

    block_on(users.get_all(&params, Some("Ivanov")));
    block_on(users.get_all(&params, Some("")));
    block_on(TaskClient::new(gateway).get_by_user(3, &params));

    assert_eq!(
        transport.calls(),
        vec![
            format!("GET {}user?PageNumber=1&PageSize=10&SortBy=position&SortDirection=asc&fio=Ivanov", BASE_URL),
            format!("GET {}user?PageNumber=1&PageSize=10&SortBy=position&SortDirection=asc", BASE_URL),
            format!("GET {}TaskItem/user/3?PageNumber=1&PageSize=10&SortBy=position&SortDirection=asc", BASE_URL),
        ]
    );
}

#[test]
fn test_json_body_and_content_type() {
    let transport = MockTransport::fixed(200, TASK_40);
    let (gateway, _) = gateway(transport.clone());
    let task: Task = serde_json::from_str::<ApiResponse<Task>>(TASK_40).unwrap().data.unwrap();
    block_on(TaskClient::new(gateway).update(5, &task));

    let request = &transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    let RequestBody::Json(body) = &request.body else {
        panic!("expected a JSON body");
    };
    let sent: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(sent["percent"], 40);
    assert_eq!(sent["userId"], 8);
}

#[test]
fn test_upload_is_multipart() {
    let transport = MockTransport::fixed(200, r#"{"success":true}"#);
    let (gateway, _) = gateway(transport.clone());
    let attachment = Attachment {
        file_name: "scan.png".into(),
        content_type: "image/png".into(),
        bytes: vec![137, 80, 78, 71],
    };
    block_on(CommentClient::new(gateway).upload(&attachment, 5, 8, "signed & scanned"));

    let request = &transport.requests()[0];
    assert_eq!(
        request.url,
        format!("{}Comment/upload?taskItemId=5&userId=8&text=signed%20%26%20scanned", BASE_URL)
    );
    assert_eq!(request.header("Content-Type"), None);
    assert!(matches!(
        &request.body,
        RequestBody::Multipart(fields) if matches!(&fields[..], [MultipartField::File { name, file_name, .. }] if name == "file" && file_name == "scan.png")
    ));
}

#[test]
fn test_file_url() {
    let transport = MockTransport::fixed(200, "");
    let (gateway, _) = gateway(transport);
    assert_eq!(CommentClient::new(gateway).file_url(11), format!("{}Comment/file/11", BASE_URL));
}

#[test]
fn test_login_persists_session() {
    let transport = MockTransport::fixed(
        200,
        r#"{"success":true,"data":{"token":"fresh","expiresAt":"2030-01-01T00:00:00Z","userId":3,"username":"petrov","fio":"Petrov"}}"#,
    );
    let (gateway, credentials) = gateway(transport.clone());
    credentials.clear();
    let auth = AuthClient::new(gateway);

    let response = block_on(auth.login(&LoginRequest { username: "petrov".into(), password: "Secret123".into() }));
    assert!(response.success);
    assert!(auth.is_authenticated());
    assert_eq!(credentials.token().as_deref(), Some("fresh"));
    assert_eq!(auth.current_session().map(|s| s.user_id), Some(3));
    assert_eq!(transport.calls(), vec![format!("POST {}user/login", BASE_URL)]);

    auth.logout();
    assert!(!auth.is_authenticated());
}

#[test]
fn test_login_accepts_bare_session() {
    let replies = [
        r#"{"token":"fresh","expiresAt":"2030-01-01T00:00:00Z","userId":3,"username":"petrov"}"#,
        r#"{"token":"fresh","user":{"id":3,"name":"petrov","fio":"Petrov P."}}"#,
    ];
    for reply in replies {
        let transport = MockTransport::fixed(200, reply);
        let (gateway, credentials) = gateway(transport);
        credentials.clear();
        let auth = AuthClient::new(gateway);

        let response = block_on(auth.login(&LoginRequest { username: "petrov".into(), password: "Secret123".into() }));
        assert!(response.success, "{}", reply);
        assert_eq!(credentials.token().as_deref(), Some("fresh"));
        let session = auth.current_session().unwrap();
        assert_eq!(session.user_id, 3);
        assert_eq!(session.username, "petrov");
    }
}

#[test]
fn test_login_without_token_is_rejected() {
    let transport = MockTransport::fixed(200, r#"{"userId":3}"#);
    let (gateway, credentials) = gateway(transport);
    credentials.clear();
    let auth = AuthClient::new(gateway);
    let response = block_on(auth.login(&LoginRequest { username: "x".into(), password: "y".into() }));
    assert_eq!(response.error().map(|e| e.code), Some(codes::INVALID_RESPONSE.to_string()));
    assert!(!auth.is_authenticated());
}

#[test]
fn test_bare_list_body_and_null_deadline() {
    let transport = MockTransport::fixed(
        200,
        r#"{"success":true,"data":[
            {"id":1,"name":"a","percent":10,"startDate":"2024-05-01","expiredAt":"2024-05-09","userId":2},
            {"id":2,"name":"b","percent":20,"startDate":"2024-05-01","expiredAt":null,"userId":2}
        ]}"#,
    );
    let (enveloped, _) = gateway(transport);
    let response = block_on(TaskClient::new(enveloped).get_all(&PaginationParams::default()));
    assert!(response.success);
    assert_eq!(response.data.map(|rows| rows.len()), Some(2));

    let transport = MockTransport::fixed(200, r#"[{"id":4,"name":"c","percent":0,"startDate":"2024-05-01","userId":2}]"#);
    let (bare, _) = gateway(transport);
    let response = block_on(TaskClient::new(bare).get_all(&PaginationParams::default()));
    assert_eq!(response.data.map(|rows| rows[0].id), Some(4));
}

#[test]
fn test_failed_login_keeps_store_empty() {
    let transport = MockTransport::fixed(400, r#"{"success":false,"errorCode":"BAD_CREDENTIALS","message":"Wrong password"}"#);
    let (gateway, credentials) = gateway(transport);
    credentials.clear();
    let auth = AuthClient::new(gateway);
    let response = block_on(auth.login(&LoginRequest { username: "x".into(), password: "y".into() }));
    assert_eq!(response.error().unwrap().code, "BAD_CREDENTIALS");
    assert!(!auth.is_authenticated());
}

#[test]
fn test_task_edit_audit_comment_before_update() {
    let transport = MockTransport::new(|request| {
        let body = match request.method {
            HttpMethod::Get => TASK_40.to_string(),
            HttpMethod::Put => TASK_40.replace("\"percent\":40", "\"percent\":70"),
            _ => r#"{"success":true}"#.to_string(),
        };
        Ok(HttpResponse::new(200, body))
    });
    let (gateway, _) = gateway(transport.clone());
    let tasks = TaskClient::new(gateway.clone());
    let comments = CommentClient::new(gateway);

    let loaded = block_on(tasks.get_by_id(5)).data.unwrap();
    let mut session = TaskEditSession::new(loaded);
    let mut form = session.form();
    form.percent = "70".into();

    let plan = session.plan_save(&form, "", None).unwrap();
    let outcome = block_on(session.execute(plan, &tasks, &comments, chrono::Utc::now())).unwrap();

    assert_eq!(outcome.task.percent.value(), 70);
    assert!(outcome.comment_errors.is_empty());
    assert_eq!(session.initial_percent().value(), 70);

    let requests = transport.requests();
    assert_eq!(
        transport.calls(),
        vec![
            format!("GET {}taskItem/5", BASE_URL),
            format!("POST {}Comment", BASE_URL),
            format!("PUT {}taskItem/5", BASE_URL),
        ]
    );
    let RequestBody::Json(comment) = &requests[1].body else {
        panic!("expected comment JSON");
    };
    let comment: serde_json::Value = serde_json::from_str(comment).unwrap();
    let text = comment["text"].as_str().unwrap();
    assert!(text.contains("40") && text.contains("70"));
    assert_eq!(comment["taskItemId"], 5);
    assert_eq!(comment["userId"], 8);
}

#[test]
fn test_invalid_form_makes_no_request() {
    let transport = MockTransport::fixed(200, TASK_40);
    let (gateway, _) = gateway(transport.clone());
    let task = block_on(TaskClient::new(gateway).get_by_id(5)).data.unwrap();
    let session = TaskEditSession::new(task);
    let mut form = session.form();
    form.percent = "250".into();

    assert!(session.plan_save(&form, "", None).is_err());
    assert_eq!(transport.requests().len(), 1);
}
