use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Store, ACCOUNT_ID, AUTH_CODE, CLIENT_ID, CLIENT_SECRET, PAGE_SIZE, TOKEN};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn api(path: &str) -> String {
    format!("/{ACCOUNT_ID}/api/v1/{path}")
}

fn authed(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(http::header::CONTENT_TYPE, "application/json; charset=utf-8")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_is_401() {
    let resp = app()
        .oneshot(Request::builder().uri(api("projects.json")).body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_token_is_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri(api("people/me.json"))
                .header(http::header::AUTHORIZATION, "Bearer nope")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_account_is_404() {
    let resp = app()
        .oneshot(authed("GET", "/1/api/v1/projects.json", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- projects ---

#[tokio::test]
async fn list_projects_empty() {
    let resp = app().oneshot(authed("GET", &api("projects.json"), "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!([]));
}

#[tokio::test]
async fn create_project_returns_201() {
    let resp = app()
        .oneshot(authed("POST", &api("projects.json"), r#"{"name":"Launch","description":null}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let project = body_json(resp).await;
    assert_eq!(project["name"], "Launch");
    assert_eq!(project["archived"], false);
}

#[tokio::test]
async fn create_project_without_name_is_422() {
    let resp = app()
        .oneshot(authed("POST", &api("projects.json"), r#"{"description":"x"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_project_not_found() {
    let resp = app().oneshot(authed("GET", &api("projects/404.json"), "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_project_not_found() {
    let resp = app().oneshot(authed("DELETE", &api("projects/404.json"), "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn project_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("POST", &api("projects.json"), r#"{"name":"Walk dog"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body_json(resp).await["id"].as_u64().unwrap();

    // archive
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("PUT", &api(&format!("projects/{id}.json")), r#"{"archived":true}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["archived"], true);

    // archived list holds it, active list does not
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("GET", &api("projects/archived.json"), ""))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("GET", &api("projects.json"), ""))
        .await
        .unwrap();
    assert!(body_json(resp).await.as_array().unwrap().is_empty());

    // grant, then revoke
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed(
            "POST",
            &api(&format!("projects/{id}/accesses.json")),
            r#"{"ids":[77],"email_addresses":[]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("DELETE", &api(&format!("projects/{id}/accesses/77.json")), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("DELETE", &api(&format!("projects/{id}.json")), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("GET", &api(&format!("projects/{id}.json")), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- events ---

#[tokio::test]
async fn events_are_paged_fifty_at_a_time() {
    let app = app_with(Store::with_events(PAGE_SIZE + 5));

    let resp = app
        .clone()
        .oneshot(authed("GET", &api("events.json?page=1"), ""))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), PAGE_SIZE);

    let resp = app.oneshot(authed("GET", &api("events.json?page=2"), "")).await.unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn events_since_filters_older_entries() {
    let app = app_with(Store::with_events(10));
    let resp = app
        .oneshot(authed("GET", &api("events.json?page=1&since=2024-01-01T00:04:00%2B00:00"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn events_with_bad_since_is_400() {
    let resp = app()
        .oneshot(authed("GET", &api("events.json?since=yesterday"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- attachments ---

#[tokio::test]
async fn upload_records_content_type_and_size() {
    let req = Request::builder()
        .method("POST")
        .uri(api("attachments.json"))
        .header(http::header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(http::header::CONTENT_TYPE, "image/png")
        .body(String::from("PNGDATA"))
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pending = body_json(resp).await;
    assert_eq!(pending["content_type"], "image/png");
    assert_eq!(pending["byte_size"], 7);
    assert!(!pending["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn upload_with_unknown_token_is_422() {
    use tower::Service;

    let mut app = app().into_service();
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("POST", &api("projects.json"), r#"{"name":"Files"}"#))
        .await
        .unwrap();
    let id = body_json(resp).await["id"].as_u64().unwrap();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed(
            "POST",
            &api(&format!("projects/{id}/uploads.json")),
            r#"{"content":null,"attachments":[{"token":"missing","name":"a.txt"}]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- people ---

#[tokio::test]
async fn me_resolves_to_the_token_owner() {
    let resp = app().oneshot(authed("GET", &api("people/me.json"), "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["id"], mock_server::ME_ID);
}

// --- launchpad ---

#[tokio::test]
async fn authorization_lists_accounts() {
    let resp = app().oneshot(authed("GET", "/authorization.json", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await;
    assert_eq!(doc["accounts"][0]["id"], ACCOUNT_ID);
    assert_eq!(doc["accounts"][0]["product"], "bcx");
}

#[tokio::test]
async fn token_exchange_accepts_the_known_code() {
    let uri = format!(
        "/authorization/token?type=web_server&client_id={CLIENT_ID}&redirect_uri=http%3A%2F%2Flocalhost\
         &client_secret={CLIENT_SECRET}&code={AUTH_CODE}"
    );
    let resp = app()
        .oneshot(Request::builder().method("POST").uri(uri).body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["access_token"], TOKEN);
}

#[tokio::test]
async fn token_exchange_rejects_a_bad_code() {
    let uri = format!(
        "/authorization/token?type=web_server&client_id={CLIENT_ID}&redirect_uri=x\
         &client_secret={CLIENT_SECRET}&code=wrong"
    );
    let resp = app()
        .oneshot(Request::builder().method("POST").uri(uri).body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
