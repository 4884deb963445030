//! Comment endpoints
//!
//! Comments are listed and created under their post; deletion addresses the
//! comment directly.

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;

use error_types::{ClientError, Result};

use crate::gateway::Gateway;
use crate::models::Comment;

pub struct CommentsApi {
    gateway: Arc<dyn Gateway>,
}

impl CommentsApi {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// `GET /posts/{id}/comments/`
    pub async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let path = format!("/posts/{post_id}/comments/");
        let body = self.gateway.send(Method::GET, &path, None).await?;
        Ok(serde_json::from_value(body.into_json()?)?)
    }

    /// `POST /posts/{id}/comments/` with `{content}`.
    pub async fn create(&self, post_id: i64, content: &str) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(ClientError::Validation(
                "comment text is required".to_string(),
            ));
        }
        let path = format!("/posts/{post_id}/comments/");
        let body = json!({ "content": content });
        let response = self.gateway.send(Method::POST, &path, Some(body)).await?;
        Ok(serde_json::from_value(response.into_json()?)?)
    }

    /// `DELETE /comments/{id}/`
    pub async fn delete(&self, comment_id: i64) -> Result<()> {
        let path = format!("/comments/{comment_id}/");
        self.gateway.send(Method::DELETE, &path, None).await?;
        Ok(())
    }
}
