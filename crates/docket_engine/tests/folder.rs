use docket_engine::{ApiError, ApiSettings, ArchiveApi, ReqwestArchiveApi};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestArchiveApi {
    let settings = ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    };
    ReqwestArchiveApi::new(&settings).expect("client")
}

#[tokio::test]
async fn open_posts_the_path_and_accepts_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/open_folder"))
        .and(body_json(serde_json::json!({ "path": "/archive/7" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"status": "success"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    api_for(&server).open_folder("/archive/7").await.expect("open ok");
}

#[tokio::test]
async fn non_success_status_field_is_a_server_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/open_folder"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status": "error", "message": "share offline"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = api_for(&server).open_folder("/archive/7").await.unwrap_err();
    assert_eq!(err, ApiError::Server("share offline".to_string()));
}

#[tokio::test]
async fn failing_status_code_with_envelope_keeps_the_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/open_folder"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(
            r#"{"status": "error", "message": "no handler for path"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = api_for(&server).open_folder("/archive/7").await.unwrap_err();
    assert_eq!(err, ApiError::Server("no handler for path".to_string()));
}

#[tokio::test]
async fn failing_status_code_without_envelope_keeps_the_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/open_folder"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = api_for(&server).open_folder("/archive/7").await.unwrap_err();
    assert_eq!(err, ApiError::HttpStatus(502));
}
