//! 内嵌浏览器表单
//!
//! `static/` 目录在编译期嵌入二进制，由 `/ui` 路由提供

use axum::{
    Router,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "static/"]
struct UiAssets;

/// 创建表单页面路由
pub fn create_ui_router() -> Router {
    Router::new()
        .route("/ui", get(serve_asset))
        .route("/ui/", get(serve_asset))
        .route("/ui/{*path}", get(serve_asset))
}

/// 根据请求路径返回静态资源，`/ui` 本身对应 index.html
async fn serve_asset(uri: Uri) -> Response {
    let path = uri
        .path()
        .trim_start_matches("/ui")
        .trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match UiAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
