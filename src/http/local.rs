//! Endpoints answered by the gateway itself.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::localization::{MessageCatalog, MessageKey};
use crate::routing::{LocalEndpoint, RouteTable};

#[derive(Debug, Serialize)]
pub struct IndexResponse<'a> {
    pub message: &'a str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse<'a> {
    pub status: &'a str,
    pub service: &'a str,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: u32,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
}

/// The two demo posts.
pub fn demo_posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            title: "First Post".to_string(),
            content: "This is the first post".to_string(),
        },
        Post {
            id: 2,
            title: "Second Post".to_string(),
            content: "This is the second post".to_string(),
        },
    ]
}

/// A post labelled with whatever the caller put in the path.
pub fn labelled_post(label: &str) -> Post {
    Post {
        id: 1,
        title: format!("Post {label}"),
        content: format!("This is post number {label}"),
    }
}

/// Everything a local endpoint may read.
pub struct LocalContext<'a> {
    pub routes: &'a RouteTable,
    pub catalog: &'a MessageCatalog,
    pub locale: &'a str,
    /// Path remainder captured by the route pattern.
    pub suffix: &'a str,
}

pub fn respond(endpoint: LocalEndpoint, ctx: &LocalContext<'_>) -> Response {
    match endpoint {
        LocalEndpoint::Index => Json(IndexResponse {
            message: ctx.catalog.message(ctx.locale, MessageKey::ApiRunning),
            version: env!("CARGO_PKG_VERSION"),
            endpoints: ctx.routes.listed_endpoints(),
        })
        .into_response(),
        LocalEndpoint::Health => Json(HealthResponse {
            status: ctx.catalog.message(ctx.locale, MessageKey::Healthy),
            service: ctx.catalog.message(ctx.locale, MessageKey::ApiService),
            timestamp: chrono::Utc::now().timestamp(),
        })
        .into_response(),
        LocalEndpoint::Posts => Json(PostsResponse {
            posts: demo_posts(),
        })
        .into_response(),
        LocalEndpoint::Post => {
            let label = percent_decode_str(ctx.suffix).decode_utf8_lossy();
            Json(labelled_post(&label)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_post_echoes_any_label() {
        let post = labelled_post("42");
        assert_eq!(post.title, "Post 42");
        assert_eq!(post.content, "This is post number 42");

        let post = labelled_post("abc");
        assert_eq!(post.id, 1);
        assert_eq!(post.title, "Post abc");
        assert_eq!(post.content, "This is post number abc");
    }

    #[test]
    fn test_posts_fixture() {
        let json = serde_json::to_value(PostsResponse { posts: demo_posts() }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "posts": [
                    {"id": 1, "title": "First Post", "content": "This is the first post"},
                    {"id": 2, "title": "Second Post", "content": "This is the second post"},
                ]
            })
        );
    }
}
