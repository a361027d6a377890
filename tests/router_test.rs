//! HTTP-level tests driving the full router with `oneshot`.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use common::TestContext;
use delicias::api::{create_router, AppState};

fn router(ctx: &TestContext) -> Router {
    let state = AppState::from_container(&ctx.services, ctx.database.clone());
    create_router(state, ctx.config.max_upload_bytes)
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

const BOUNDARY: &str = "delicias-test-boundary";

/// Multipart POST with a single part
fn post_multipart(
    uri: &str,
    field: &str,
    filename: &str,
    content: &[u8],
    cookie: &str,
) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::COOKIE, cookie)
        .body(Body::from(body))
        .unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// `name=value` of a cookie set by the response
fn set_cookie(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{name}=")))
        .map(str::to_string)
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_form(
            "/auth/login",
            "username=admin&password=admin123",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");
    set_cookie(&response, "session").expect("session cookie")
}

// =============================================================================
// Public pages
// =============================================================================

#[tokio::test]
async fn test_home_shows_featured_products() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);

    let response = app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Bolo de Chocolate"));
    assert!(html.contains("R$ 35,00"));
    assert!(html.contains("/categoria/bolos-vulcao"));
}

#[tokio::test]
async fn test_category_page() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);

    let response = app
        .clone()
        .oneshot(get("/categoria/bolos-piscininha", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Piscininha de Leite Ninho"));

    let response = app.oneshot(get("/categoria/unknown", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_menu_and_contact_pages() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);

    for uri in ["/menu", "/contato"] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::empty().await;

    let response = router(&ctx).oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("healthy"));
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_admin_requires_login() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);

    for uri in ["/admin", "/admin/", "/admin/products", "/admin/upload"] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/auth/login", "{uri}");
    }

    let response = app
        .oneshot(post_form("/admin/products/delete/1", "", Some("session=forged")))
        .await
        .unwrap();
    assert_eq!(location(&response), "/auth/login");
    assert!(ctx.product_exists(1).await);
}

#[tokio::test]
async fn test_login_then_dashboard() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);
    let cookie = login(&app).await;

    let response = app.oneshot(get("/admin", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Painel administrativo"));
}

#[tokio::test]
async fn test_wrong_password_flashes_error() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);

    let response = app
        .oneshot(post_form(
            "/auth/login",
            "username=admin&password=nope",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
    assert!(set_cookie(&response, "session").is_none());
    assert_eq!(
        set_cookie(&response, "flash").as_deref(),
        Some("flash=invalid-credentials")
    );
}

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);
    let cookie = login(&app).await;

    let response = app
        .oneshot(post_form("/auth/logout", "", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(location(&response), "/");
    assert_eq!(set_cookie(&response, "session").as_deref(), Some("session="));
}

// =============================================================================
// Admin forms
// =============================================================================

#[tokio::test]
async fn test_blocked_category_delete_redirects_with_message() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);
    let cookie = login(&app).await;

    let response = app
        .oneshot(post_form("/admin/categories/delete/1", "", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/categories");
    assert_eq!(
        set_cookie(&response, "flash").as_deref(),
        Some("flash=category-has-products")
    );
}

#[tokio::test]
async fn test_invalid_product_returns_to_form() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);
    let cookie = login(&app).await;

    let response = app
        .oneshot(post_form(
            "/admin/products/add",
            "name=Bolo&price=abc&category_id=1",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(location(&response), "/admin/products/add");
    assert_eq!(
        set_cookie(&response, "flash").as_deref(),
        Some("flash=invalid-price")
    );
}

#[tokio::test]
async fn test_create_product_and_show_flash() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/admin/products/add",
            "name=Bolo+de+Milho&description=&price=28.50&category_id=1&image_filename=",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(location(&response), "/admin/products");
    let flash = set_cookie(&response, "flash").expect("flash cookie");

    let response = app
        .oneshot(get(
            "/admin/products",
            Some(&format!("{cookie}; {flash}")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Bolo de Milho"));
    assert!(html.contains("Produto adicionado com sucesso!"));
}

// =============================================================================
// Uploads
// =============================================================================

#[tokio::test]
async fn test_upload_stores_sanitized_name() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(post_multipart(
            "/admin/upload",
            "file",
            "../../bolo de milho.png",
            b"\x89PNG fake",
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/upload");
    assert_eq!(
        set_cookie(&response, "flash").as_deref(),
        Some("flash=file-uploaded")
    );
    assert!(ctx.config.upload_dir.join("bolo_de_milho.png").is_file());

    let response = app
        .oneshot(post_multipart("/admin/upload", "file", "a.exe", b"MZ", &cookie))
        .await
        .unwrap();
    assert_eq!(
        set_cookie(&response, "flash").as_deref(),
        Some("flash=disallowed-type")
    );
    assert!(!ctx.config.upload_dir.join("a.exe").exists());
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let ctx = TestContext::seeded().await;
    let app = router(&ctx);
    let cookie = login(&app).await;

    let response = app
        .oneshot(post_multipart(
            "/admin/upload",
            "other",
            "bolo.png",
            b"data",
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/upload");
    assert_eq!(
        set_cookie(&response, "flash").as_deref(),
        Some("flash=no-file")
    );
}

#[tokio::test]
async fn test_upload_over_body_limit_is_file_too_large() {
    let ctx = TestContext::seeded().await;
    let state = AppState::from_container(&ctx.services, ctx.database.clone());
    let app = create_router(state, 10);
    let cookie = login(&app).await;

    let content = vec![b'x'; 200 * 1024];
    let response = app
        .oneshot(post_multipart(
            "/admin/upload",
            "file",
            "grande.png",
            &content,
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/upload");
    assert_eq!(
        set_cookie(&response, "flash").as_deref(),
        Some("flash=file-too-large")
    );
    assert!(!ctx.config.upload_dir.join("grande.png").exists());
}
