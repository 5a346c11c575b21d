use ntex::http::StatusCode;
use serde_json::{json, Value};
use spdlog::error;

use crate::blog_store::BlogStore;

/// Status and JSON body of an `/api` response.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        ApiResponse { status: StatusCode::OK, body }
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        ApiResponse { status, body: json!({ "error": message }) }
    }
}

/// Every post, drafts included, for the admin dashboard.
pub fn blogs_response(store: &BlogStore) -> ApiResponse {
    let blogs = match store.all_posts() {
        Ok(blogs) => blogs,
        Err(e) => {
            error!("Error fetching blogs: {}", e);
            return ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch blogs");
        }
    };

    ApiResponse::ok(json!({
        "success": true,
        "blogs": blogs,
    }))
}
