//! Wire models for the FitLife backend
//!
//! Field sets mirror the backend's JSON representations. Unknown fields are
//! ignored and optional fields default so older server payloads and terse
//! creation echoes both deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assets::resolve_asset_url;

/// A user's post in the shared feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    /// Owning user id.
    pub user: i64,
    #[serde(default)]
    pub user_username: String,
    #[serde(default)]
    pub user_profile_picture: Option<String>,
    pub content: String,
    /// Relative media path, as stored by the backend.
    #[serde(default)]
    pub image: Option<String>,
    /// Absolute media URL, when the backend serves one.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub workout_plan: Option<i64>,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Displayable image URL: `image_url` wins over `image`, and the winner
    /// is normalized to an absolute or root-relative URL.
    pub fn image_source(&self) -> Option<String> {
        resolve_asset_url(self.image_url.as_deref().or(self.image.as_deref()))
    }
}

/// A comment on a post.
///
/// Creation echoes may omit `post` and `user`, so both are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub post: Option<i64>,
    /// Authoring user id.
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub user_username: String,
    pub content: String,
}

/// The authenticated user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    /// Free-text weight fields; see [`crate::progress`].
    #[serde(default)]
    pub current_weight: Option<String>,
    #[serde(default)]
    pub target_weight: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub selected_workout_plan: Option<i64>,
    /// Denormalized snapshot of the selected plan, when the server sends it.
    #[serde(default)]
    pub selected_workout_plan_detail: Option<WorkoutPlan>,
}

impl Profile {
    pub fn picture_source(&self) -> Option<String> {
        resolve_asset_url(self.profile_picture.as_deref())
    }
}

/// A workout plan from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: i64,
    pub title: String,
    pub goal_type: GoalType,
    /// Duration in weeks.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub equipment_needed: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Workout plan categories, as the backend encodes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Cut,
    Bulk,
    Maintain,
    Home,
}

impl GoalType {
    /// Human-readable label shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            GoalType::Cut => "Weight Loss",
            GoalType::Bulk => "Muscle Building",
            GoalType::Maintain => "Weight Maintenance",
            GoalType::Home => "Home Workouts",
        }
    }

    /// Value used in the `goal_type` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            GoalType::Cut => "cut",
            GoalType::Bulk => "bulk",
            GoalType::Maintain => "maintain",
            GoalType::Home => "home",
        }
    }
}

/// Minimal account identity returned alongside the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUser {
    pub id: i64,
    pub username: String,
}

/// `{access, user}` response of the auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access: String,
    pub user: AccountUser,
}

/// Partial profile update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<String>,
}

/// Image attachment for multipart uploads.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terse_comment_echo_deserializes() {
        let comment: Comment =
            serde_json::from_str(r#"{"id":9,"user_username":"bob","content":"nice!"}"#).unwrap();
        assert_eq!(comment.id, 9);
        assert_eq!(comment.user, None);
        assert_eq!(comment.post, None);
        assert_eq!(comment.content, "nice!");
    }

    #[test]
    fn post_defaults_cover_missing_counters() {
        let post: Post = serde_json::from_str(
            r#"{"id":1,"user":7,"user_username":"amal","content":"leg day"}"#,
        )
        .unwrap();
        assert_eq!(post.comments_count, 0);
        assert_eq!(post.image_source(), None);
    }

    #[test]
    fn image_url_wins_over_relative_image() {
        let post: Post = serde_json::from_str(
            r#"{"id":1,"user":7,"content":"x",
                "image":"media/a.jpg","image_url":"https://cdn.fitlife.dev/a.jpg"}"#,
        )
        .unwrap();
        assert_eq!(
            post.image_source().as_deref(),
            Some("https://cdn.fitlife.dev/a.jpg")
        );
    }

    #[test]
    fn goal_type_round_trips_and_labels() {
        let plan: WorkoutPlan = serde_json::from_str(
            r#"{"id":3,"title":"Shred","goal_type":"cut","duration":8}"#,
        )
        .unwrap();
        assert_eq!(plan.goal_type, GoalType::Cut);
        assert_eq!(plan.goal_type.label(), "Weight Loss");
        assert_eq!(plan.goal_type.as_query(), "cut");
    }
}
