//! Dispatch through the axum router, without a socket.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use krystal::http::X_REQUEST_ID;
use krystal::HttpServer;

mod common;

fn router() -> Router {
    HttpServer::new(common::bootstrap(common::test_config()))
        .unwrap()
        .router()
}

async fn send(router: Router, method: &str, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_home_page() {
    assert_eq!(send(router(), "GET", "/").await, (StatusCode::OK, "Welcome".into()));
}

#[tokio::test]
async fn test_route_variables() {
    assert_eq!(
        send(router(), "GET", "/post/42").await,
        (StatusCode::OK, "Post 42".into())
    );
    assert_eq!(
        send(router(), "GET", "/posts/2024/05").await,
        (StatusCode::OK, "archive 2024-05".into())
    );
}

#[tokio::test]
async fn test_query_string_is_not_a_variable() {
    assert_eq!(
        send(router(), "GET", "/post/42?highlight=1").await,
        (StatusCode::OK, "Post 42".into())
    );
}

#[tokio::test]
async fn test_unknown_path_renders_not_found_page() {
    assert_eq!(
        send(router(), "GET", "/no/such/page").await,
        (StatusCode::NOT_FOUND, "Page not found".into())
    );
}

#[tokio::test]
async fn test_declined_action_renders_not_found_page() {
    assert_eq!(
        send(router(), "GET", "/post/404").await,
        (StatusCode::NOT_FOUND, "Page not found".into())
    );
}

#[tokio::test]
async fn test_method_restricted_route() {
    assert_eq!(send(router(), "POST", "/posts/2024/05").await.0, StatusCode::NOT_FOUND);
    // Unrestricted routes accept any method.
    assert_eq!(send(router(), "POST", "/post/1").await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_permanent_redirect() {
    let request = Request::builder()
        .uri("/old-home")
        .body(Body::empty())
        .unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let response = router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let generated = response.headers()[X_REQUEST_ID].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let response = router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(X_REQUEST_ID, "client-supplied")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()[X_REQUEST_ID], "client-supplied");
}

#[tokio::test]
async fn test_reload_swaps_application() {
    let server = HttpServer::new(common::bootstrap(common::test_config())).unwrap();
    let router = server.router();
    assert_eq!(send(router.clone(), "GET", "/post/1").await.0, StatusCode::OK);

    let mut config = common::test_config();
    config.modules.names = vec!["Site".into()];
    server.reload(config).unwrap();
    assert_eq!(send(router.clone(), "GET", "/post/1").await.0, StatusCode::NOT_FOUND);

    // A broken config is rejected and the current application keeps serving.
    let mut broken = common::test_config();
    broken.application.core_modules.push("Admin".into());
    assert!(server.reload(broken).is_err());
    assert_eq!(server.application().modules().loaded_module_names(), vec!["Site"]);
    assert_eq!(send(router, "GET", "/").await.0, StatusCode::OK);
}
