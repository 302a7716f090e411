//! URL verification against a local HTTP server.

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::routing::{get, head};
use axum::Router;

use tw_images::{GoogleImageSearch, ImageSearch};

async fn jpeg() -> ([(header::HeaderName, &'static str); 1], &'static [u8]) {
    ([(header::CONTENT_TYPE, "image/jpeg")], b"\xff\xd8\xff")
}

async fn serve() -> String {
    let app = Router::new()
        .route("/cat.jpg", get(jpeg))
        .route("/page.html", get(|| async { axum::response::Html("<p>hi</p>") }))
        .route(
            "/no-head.jpg",
            head(|| async { StatusCode::METHOD_NOT_ALLOWED }).get(jpeg),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client() -> GoogleImageSearch {
    GoogleImageSearch::new(
        "http://127.0.0.1:9/unused",
        "key".into(),
        "cx".into(),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn image_content_type_is_verified() {
    let base = serve().await;
    assert!(client().verify(&format!("{base}/cat.jpg")).await);
}

#[tokio::test]
async fn html_page_is_rejected() {
    let base = serve().await;
    assert!(!client().verify(&format!("{base}/page.html")).await);
}

#[tokio::test]
async fn head_not_allowed_falls_back_to_get() {
    let base = serve().await;
    assert!(client().verify(&format!("{base}/no-head.jpg")).await);
}

#[tokio::test]
async fn missing_url_is_rejected() {
    let base = serve().await;
    assert!(!client().verify(&format!("{base}/gone.jpg")).await);
}
