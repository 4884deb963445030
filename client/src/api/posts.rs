//! Post endpoints

use std::sync::Arc;

use reqwest::Method;
use tracing::info;

use error_types::{ClientError, Result};

use crate::gateway::{FormPayload, Gateway};
use crate::models::{ImageUpload, Post};

const BASE: &str = "/posts/";

pub struct PostsApi {
    gateway: Arc<dyn Gateway>,
}

impl PostsApi {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// `GET /posts/`
    pub async fn list(&self) -> Result<Vec<Post>> {
        let body = self.gateway.send(Method::GET, BASE, None).await?;
        Ok(serde_json::from_value(body.into_json()?)?)
    }

    /// `GET /posts/{id}/`
    pub async fn get(&self, id: i64) -> Result<Post> {
        let path = format!("{BASE}{id}/");
        let body = self.gateway.send(Method::GET, &path, None).await?;
        Ok(serde_json::from_value(body.into_json()?)?)
    }

    /// `POST /posts/` as multipart: content, optional workout plan link,
    /// optional image.
    pub async fn create(
        &self,
        content: &str,
        workout_plan: Option<i64>,
        image: Option<ImageUpload>,
    ) -> Result<Post> {
        if content.trim().is_empty() {
            return Err(ClientError::Validation(
                "post content is required".to_string(),
            ));
        }

        let mut form = FormPayload::new().text("content", content);
        if let Some(plan) = workout_plan {
            form = form.text("workout_plan", plan.to_string());
        }
        if let Some(image) = image {
            form = form.file("image", image.file_name, image.content_type, image.bytes);
        }

        let body = self.gateway.send_form(Method::POST, BASE, form).await?;
        let post: Post = serde_json::from_value(body.into_json()?)?;
        info!(post_id = post.id, "created post");
        Ok(post)
    }

    /// `DELETE /posts/{id}/`
    pub async fn delete(&self, id: i64) -> Result<()> {
        let path = format!("{BASE}{id}/");
        self.gateway.send(Method::DELETE, &path, None).await?;
        info!(post_id = id, "deleted post");
        Ok(())
    }
}
