use ntex::http::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use spdlog::{error, info};

use crate::api::ApiResponse;
use crate::blog_store::BlogStore;
use crate::content::BlogPost;

pub const MEDIUM_MAX_TAGS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Platform {
    Substack,
    Medium,
}

impl Platform {
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Substack => "Substack",
            Platform::Medium => "Medium",
        }
    }

    fn data(&self, post: &BlogPost, site_url: &str) -> Value {
        let canonical_url = post.canonical_url_or(site_url);
        match self {
            Platform::Substack => json!({
                "title": post.title,
                "slug": post.slug,
                "excerpt": post.excerpt,
                "canonical_url": canonical_url,
            }),
            Platform::Medium => json!({
                "title": post.title,
                "slug": post.slug,
                "tags": post.tags.iter().take(MEDIUM_MAX_TAGS).collect::<Vec<_>>(),
                "canonical_url": canonical_url,
            }),
        }
    }
}

#[derive(Deserialize)]
struct PublishRequest {
    #[serde(default)]
    slug: Value,
}

/// Slug named by a request. Empty, null, `false` and `0` name nothing; any
/// other value is looked up by its text.
fn requested_slug(slug: Value) -> Option<String> {
    match slug {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(ref n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Checks that the post named in `body` exists and acknowledges it.
///
/// Nothing is sent to the platform yet.
pub fn publish(platform: Platform, store: &BlogStore, site_url: &str, body: &[u8]) -> ApiResponse {
    let failure = || ApiResponse::error(
        StatusCode::INTERNAL_SERVER_ERROR,
        &format!("Failed to publish to {}", platform.name()));

    let request: PublishRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            error!("Error publishing to {}: {}", platform.name(), e);
            return failure();
        }
    };

    let slug = match requested_slug(request.slug) {
        Some(slug) => slug,
        None => return ApiResponse::error(StatusCode::BAD_REQUEST, "Slug is required"),
    };

    let post = match store.post_by_slug(&slug) {
        Ok(Some(post)) => post,
        Ok(None) => return ApiResponse::error(StatusCode::NOT_FOUND, "Blog post not found"),
        Err(e) => {
            error!("Error publishing to {}: {}", platform.name(), e);
            return failure();
        }
    };

    info!("Post {} ready to publish to {}", post.slug, platform.name());

    ApiResponse::ok(json!({
        "success": true,
        "message": format!("Blog post \"{}\" ready to publish to {} (API integration pending)", post.title, platform.name()),
        "data": platform.data(&post, site_url),
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_data::{TempContentDir, POST_RAG};

    use super::*;

    const SITE_URL: &str = "https://janedoe.dev";

    #[test]
    fn test_publish_substack() {
        let dir = TempContentDir::sample();
        let store = BlogStore::new(dir.path());

        let res = publish(Platform::Substack, &store, SITE_URL, br#"{"slug":"chunking-strategies"}"#);
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["success"], true);
        assert_eq!(res.body["message"], "Blog post \"Chunking strategies\" ready to publish to Substack (API integration pending)");
        assert_eq!(res.body["data"]["excerpt"], "Split documents the right way");
        assert_eq!(res.body["data"]["canonical_url"], "https://janedoe.dev/blog/chunking-strategies");
        assert!(res.body["data"].get("tags").is_none());
    }

    #[test]
    fn test_publish_medium() {
        let dir = TempContentDir::sample();
        dir.write("many-tags.mdx", "---\ntitle: Many\ntags: [a, b, c, d, e, f, g]\n---\nbody");
        let store = BlogStore::new(dir.path());

        let res = publish(Platform::Medium, &store, SITE_URL, br#"{"slug":"many-tags"}"#);
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["data"]["tags"], json!(["a", "b", "c", "d", "e"]));
        assert!(res.body["data"].get("excerpt").is_none());

        let res = publish(Platform::Medium, &store, SITE_URL, br#"{"slug":"positioning-ai-products"}"#);
        assert_eq!(res.body["data"]["canonical_url"], "https://medium.com/@jane/positioning");
    }

    #[test]
    fn test_missing_slug() {
        let dir = TempContentDir::with_posts(&[("rag", POST_RAG)]);
        let store = BlogStore::new(dir.path());

        let bodies: [&[u8]; 5] = [br#"{}"#, br#"{"slug":""}"#, br#"{"slug":null}"#, br#"{"slug":0}"#, br#"{"slug":false}"#];
        for body in bodies {
            let res = publish(Platform::Substack, &store, SITE_URL, body);
            assert_eq!(res.status, StatusCode::BAD_REQUEST);
            assert_eq!(res.body["error"], "Slug is required");
        }
    }

    #[test]
    fn test_unknown_slug() {
        let dir = TempContentDir::with_posts(&[("rag", POST_RAG)]);
        let store = BlogStore::new(dir.path());

        let res = publish(Platform::Medium, &store, SITE_URL, br#"{"slug":"nope"}"#);
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.body["error"], "Blog post not found");

        let bodies: [&[u8]; 3] = [br#"{"slug":123}"#, br#"{"slug":true}"#, br#"{"slug":["rag"]}"#];
        for body in bodies {
            let res = publish(Platform::Substack, &store, SITE_URL, body);
            assert_eq!(res.status, StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_malformed_body() {
        let dir = TempContentDir::with_posts(&[("rag", POST_RAG)]);
        let store = BlogStore::new(dir.path());

        let res = publish(Platform::Medium, &store, SITE_URL, b"not json");
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body["error"], "Failed to publish to Medium");
    }
}
