//! Auth and profile endpoints

use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};
use tracing::info;

use error_types::{ClientError, Result};
use token_store::TokenStore;

use crate::gateway::{FormPayload, Gateway};
use crate::models::{AccountUser, AuthResponse, ImageUpload, Profile, ProfileUpdate};

const BASE: &str = "/users/";

pub struct UsersApi {
    gateway: Arc<dyn Gateway>,
    tokens: Arc<dyn TokenStore>,
}

impl UsersApi {
    pub fn new(gateway: Arc<dyn Gateway>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { gateway, tokens }
    }

    /// `POST /users/signup/`. Persists the credential on success, clears it
    /// on any failure.
    pub async fn signup(&self, username: &str, password: &str) -> Result<AccountUser> {
        self.authenticate("signup/", username, password).await
    }

    /// `POST /users/login/`. Persists the credential on success, clears it
    /// on any failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<AccountUser> {
        self.authenticate("login/", username, password).await
    }

    async fn authenticate(
        &self,
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> Result<AccountUser> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "username and password are required".to_string(),
            ));
        }

        let body = json!({ "username": username, "password": password });
        let path = format!("{BASE}{endpoint}");
        let response = match self.gateway.send(Method::POST, &path, Some(body)).await {
            Ok(body) => body,
            Err(err) => {
                self.tokens.clear();
                return Err(err);
            }
        };

        match serde_json::from_value::<AuthResponse>(response.into_json()?) {
            Ok(auth) => {
                self.tokens.set(&auth.access);
                info!(username = %auth.user.username, "authenticated");
                Ok(auth.user)
            }
            Err(_) => {
                self.tokens.clear();
                Err(ClientError::Unauthorized("Invalid credentials".to_string()))
            }
        }
    }

    /// Discard the stored credential.
    pub fn logout(&self) {
        self.tokens.clear();
    }

    /// `GET /users/profile/`
    pub async fn get_profile(&self) -> Result<Profile> {
        let path = format!("{BASE}profile/");
        let body = self.gateway.send(Method::GET, &path, None).await?;
        Ok(serde_json::from_value(body.into_json()?)?)
    }

    /// `PUT /users/profile/` with a JSON body.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        let path = format!("{BASE}profile/");
        let body = serde_json::to_value(update)?;
        let response = self.gateway.send(Method::PUT, &path, Some(body)).await?;
        Ok(serde_json::from_value(response.into_json()?)?)
    }

    /// `PUT /users/profile/` as multipart, for picture changes.
    ///
    /// `picture: None` sends an empty `profile_picture` field, which the
    /// backend treats as removal.
    pub async fn update_profile_with_picture(
        &self,
        update: &ProfileUpdate,
        picture: Option<ImageUpload>,
    ) -> Result<Profile> {
        let mut form = FormPayload::new();
        if let Some(bio) = &update.bio {
            form = form.text("bio", bio.clone());
        }
        if let Some(goal) = &update.goal {
            form = form.text("goal", goal.clone());
        }
        if let Some(weight) = &update.current_weight {
            form = form.text("current_weight", weight.clone());
        }
        if let Some(weight) = &update.target_weight {
            form = form.text("target_weight", weight.clone());
        }
        form = match picture {
            Some(image) => form.file(
                "profile_picture",
                image.file_name,
                image.content_type,
                image.bytes,
            ),
            None => form.text("profile_picture", ""),
        };

        let path = format!("{BASE}profile/");
        let response = self.gateway.send_form(Method::PUT, &path, form).await?;
        Ok(serde_json::from_value(response.into_json()?)?)
    }

    /// `PUT /users/profile/` selecting or clearing the workout plan.
    pub async fn set_workout_plan(&self, plan: Option<i64>) -> Result<Profile> {
        let value = match plan {
            Some(id) => Value::from(id),
            None => Value::from(""),
        };
        let body = json!({ "selected_workout_plan": value });
        let path = format!("{BASE}profile/");
        let response = self.gateway.send(Method::PUT, &path, Some(body)).await?;
        Ok(serde_json::from_value(response.into_json()?)?)
    }
}
