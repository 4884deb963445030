//! Profile view controller
//!
//! Owns the authenticated user's profile, their posts, and the comment list
//! of the currently opened post. Also tracks weight progress so the
//! celebration fires exactly once per threshold crossing.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use error_types::{ClientError, Result};
use token_store::TokenStore;

use crate::api::{CommentsApi, PostsApi, UsersApi};
use crate::gateway::Gateway;
use crate::models::{Comment, ImageUpload, Post, Profile, ProfileUpdate};
use crate::progress::calculate_progress;
use crate::state::Confirmer;

/// How long the goal-reached celebration stays up before auto-dismissing.
pub const CELEBRATION_SECS: i64 = 6;

pub struct ProfileController {
    users_api: UsersApi,
    posts_api: PostsApi,
    comments_api: CommentsApi,
    confirmer: Arc<dyn Confirmer>,
    profile: Option<Profile>,
    /// The user's own posts, newest first.
    posts: Vec<Post>,
    /// Post opened in the detail view, with its own comment list.
    selected_post: Option<Post>,
    post_comments: Vec<Comment>,
    error: Option<String>,
    notice: Option<String>,
    /// Previous progress value, kept to detect the <100 -> 100 crossing.
    previous_progress: u8,
    celebration_until: Option<DateTime<Utc>>,
}

impl ProfileController {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        tokens: Arc<dyn TokenStore>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            users_api: UsersApi::new(gateway.clone(), tokens),
            posts_api: PostsApi::new(gateway.clone()),
            comments_api: CommentsApi::new(gateway),
            confirmer,
            profile: None,
            posts: Vec::new(),
            selected_post: None,
            post_comments: Vec::new(),
            error: None,
            notice: None,
            previous_progress: 0,
            celebration_until: None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.selected_post.as_ref()
    }

    pub fn post_comments(&self) -> &[Comment] {
        &self.post_comments
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Load the profile, then the user's own posts.
    pub async fn load_profile(&mut self) -> Result<()> {
        match self.users_api.get_profile().await {
            Ok(profile) => {
                self.profile = Some(profile);
                self.refresh_progress();
                self.load_user_posts().await;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch all posts and keep the ones belonging to the profile's user.
    /// Failures only log; the existing list stays.
    pub async fn load_user_posts(&mut self) {
        let Some(username) = self.profile.as_ref().map(|p| p.username.clone()) else {
            return;
        };
        match self.posts_api.list().await {
            Ok(all) => {
                self.posts = all
                    .into_iter()
                    .filter(|post| post.user_username == username)
                    .collect();
                info!(count = self.posts.len(), "loaded user posts");
            }
            Err(err) => warn!("failed to load user posts: {err}"),
        }
    }

    /// JSON profile update; the echo replaces the local profile.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<()> {
        match self.users_api.update_profile(&update).await {
            Ok(profile) => {
                self.profile = Some(profile);
                self.refresh_progress();
                self.notice = Some("Profile updated successfully!".to_string());
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Multipart profile update with a new picture. When the echo omits the
    /// picture field the previous one is kept rather than discarded.
    pub async fn update_profile_with_picture(
        &mut self,
        update: ProfileUpdate,
        picture: ImageUpload,
    ) -> Result<()> {
        match self
            .users_api
            .update_profile_with_picture(&update, Some(picture))
            .await
        {
            Ok(mut updated) => {
                if updated.profile_picture.is_none() {
                    updated.profile_picture = self
                        .profile
                        .as_ref()
                        .and_then(|p| p.profile_picture.clone());
                }
                self.profile = Some(updated);
                self.refresh_progress();
                self.notice = Some("Profile updated successfully!".to_string());
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Remove the profile picture after confirmation.
    pub async fn remove_picture(&mut self) -> Result<bool> {
        if !self
            .confirmer
            .confirm("Are you sure you want to remove your profile picture?")
        {
            return Ok(false);
        }

        let update = ProfileUpdate {
            bio: self.profile.as_ref().and_then(|p| p.bio.clone()),
            ..ProfileUpdate::default()
        };
        match self
            .users_api
            .update_profile_with_picture(&update, None)
            .await
        {
            Ok(_) => {
                if let Some(profile) = &mut self.profile {
                    profile.profile_picture = None;
                }
                self.notice = Some("Picture removed successfully!".to_string());
                Ok(true)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Select a workout plan; the echo carries the denormalized detail.
    pub async fn select_workout_plan(&mut self, plan_id: i64) -> Result<()> {
        match self.users_api.set_workout_plan(Some(plan_id)).await {
            Ok(profile) => {
                self.profile = Some(profile);
                self.notice = Some("Workout plan selected successfully!".to_string());
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Remove the selected workout plan after confirmation, clearing both
    /// the id and the detail snapshot locally.
    pub async fn remove_workout_plan(&mut self) -> Result<bool> {
        if !self
            .confirmer
            .confirm("Are you sure you want to remove this workout plan?")
        {
            return Ok(false);
        }

        match self.users_api.set_workout_plan(None).await {
            Ok(_) => {
                if let Some(profile) = &mut self.profile {
                    profile.selected_workout_plan = None;
                    profile.selected_workout_plan_detail = None;
                }
                self.notice = Some("Workout plan removed successfully".to_string());
                Ok(true)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Open a post's detail view and load its comments. A failed comment
    /// load leaves the list empty; the detail stays open.
    pub async fn open_post(&mut self, post_id: i64) -> Result<()> {
        let Some(post) = self.posts.iter().find(|p| p.id == post_id).cloned() else {
            return Err(ClientError::NotFound(format!("post {post_id}")));
        };
        self.selected_post = Some(post);
        self.post_comments.clear();

        match self.comments_api.list_for_post(post_id).await {
            Ok(comments) => self.post_comments = comments,
            Err(err) => warn!(post_id, "failed to load comments: {err}"),
        }
        Ok(())
    }

    pub fn close_post(&mut self) {
        self.selected_post = None;
        self.post_comments.clear();
    }

    /// Add a comment to the opened post. Blank text never issues a request;
    /// the echo is prepended and both counter copies updated in the same
    /// transition.
    pub async fn add_comment(&mut self, text: &str) -> Result<Option<Comment>> {
        let Some(post_id) = self.selected_post.as_ref().map(|p| p.id) else {
            return Ok(None);
        };
        if text.trim().is_empty() {
            return Ok(None);
        }

        let comment = match self.comments_api.create(post_id, text).await {
            Ok(comment) => comment,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        self.post_comments.insert(0, comment.clone());
        if let Some(post) = &mut self.selected_post {
            post.comments_count += 1;
        }
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) {
            post.comments_count += 1;
        }
        Ok(Some(comment))
    }

    /// Delete a comment from the opened post after confirmation.
    pub async fn delete_comment(&mut self, comment_id: i64) -> Result<bool> {
        let Some(post_id) = self.selected_post.as_ref().map(|p| p.id) else {
            return Ok(false);
        };
        if !self
            .confirmer
            .confirm("Are you sure you want to delete this comment?")
        {
            return Ok(false);
        }

        if let Err(err) = self.comments_api.delete(comment_id).await {
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.post_comments.retain(|c| c.id != comment_id);
        if let Some(post) = &mut self.selected_post {
            post.comments_count = post.comments_count.saturating_sub(1);
        }
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) {
            post.comments_count = post.comments_count.saturating_sub(1);
        }
        Ok(true)
    }

    /// Delete one of the user's posts after confirmation; closes the detail
    /// view when it showed the deleted post.
    pub async fn delete_post(&mut self, post_id: i64) -> Result<bool> {
        if !self
            .confirmer
            .confirm("Are you sure you want to delete this post?")
        {
            return Ok(false);
        }

        if let Err(err) = self.posts_api.delete(post_id).await {
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.posts.retain(|post| post.id != post_id);
        if self.selected_post.as_ref().is_some_and(|p| p.id == post_id) {
            self.close_post();
        }
        Ok(true)
    }

    /// Create a new post. Blank content is a local validation failure shown
    /// inline (returned, not put in the banner).
    pub async fn create_post(
        &mut self,
        content: &str,
        workout_plan: Option<i64>,
        image: Option<ImageUpload>,
    ) -> Result<Post> {
        let post = match self.posts_api.create(content, workout_plan, image).await {
            Ok(post) => post,
            Err(err) => {
                if !err.is_local() {
                    self.error = Some(err.to_string());
                }
                return Err(err);
            }
        };

        let mine = self
            .profile
            .as_ref()
            .is_some_and(|p| p.username == post.user_username);
        if mine {
            self.posts.insert(0, post.clone());
        }
        self.notice = Some("Post created successfully!".to_string());
        Ok(post)
    }

    /// Current 0-100 progress score from the profile's weight fields.
    pub fn progress(&self) -> u8 {
        let Some(profile) = &self.profile else {
            return 0;
        };
        let (Some(current), Some(target)) =
            (profile.current_weight.as_deref(), profile.target_weight.as_deref())
        else {
            return 0;
        };
        calculate_progress(current, target, profile.goal.as_deref())
    }

    /// Recompute progress and arm the celebration on a <100 -> 100
    /// crossing. Recomputing while already at 100 never re-triggers.
    pub fn refresh_progress(&mut self) {
        self.refresh_progress_at(Utc::now());
    }

    pub fn refresh_progress_at(&mut self, now: DateTime<Utc>) {
        let progress = self.progress();
        if progress == 100 && self.previous_progress < 100 {
            info!("goal reached, showing celebration");
            self.celebration_until = Some(now + Duration::seconds(CELEBRATION_SECS));
        }
        self.previous_progress = progress;
    }

    /// Whether the celebration is still showing; it auto-dismisses after
    /// [`CELEBRATION_SECS`].
    pub fn celebration_active(&self, now: DateTime<Utc>) -> bool {
        self.celebration_until.is_some_and(|until| now < until)
    }

    pub fn dismiss_celebration(&mut self) {
        self.celebration_until = None;
    }
}
