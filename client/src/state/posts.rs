//! Optimistic reconciler for the posts feed
//!
//! Keeps the displayed post list and per-post comment lists consistent with
//! user actions before server round-trips complete. The invariant: a post's
//! `comments_count` always equals the true local count after any add or
//! delete, applied in the same state transition as the list mutation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, warn};

use error_types::Result;

use crate::api::{CommentsApi, PostsApi};
use crate::gateway::Gateway;
use crate::models::{Comment, Post};
use crate::state::Confirmer;

pub struct PostsController {
    posts_api: PostsApi,
    comments_api: CommentsApi,
    confirmer: Arc<dyn Confirmer>,
    /// Acting user, for advisory delete checks.
    current_user: Option<i64>,
    posts: Vec<Post>,
    /// Cached comments, keyed by post id; lazily loaded on first expansion.
    comments: HashMap<i64, Vec<Comment>>,
    expanded: HashSet<i64>,
    /// Posts whose comments have been fetched this session.
    comments_loaded: HashSet<i64>,
    /// Page-level error banner; the previous good state stays visible.
    error: Option<String>,
}

impl PostsController {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        confirmer: Arc<dyn Confirmer>,
        current_user: Option<i64>,
    ) -> Self {
        Self {
            posts_api: PostsApi::new(gateway.clone()),
            comments_api: CommentsApi::new(gateway),
            confirmer,
            current_user,
            posts: Vec::new(),
            comments: HashMap::new(),
            expanded: HashSet::new(),
            comments_loaded: HashSet::new(),
            error: None,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, post_id: i64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    pub fn comments_for(&self, post_id: i64) -> Option<&[Comment]> {
        self.comments.get(&post_id).map(Vec::as_slice)
    }

    pub fn is_expanded(&self, post_id: i64) -> bool {
        self.expanded.contains(&post_id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Fetch the full post collection and replace local state wholesale.
    ///
    /// On failure the previous state is untouched and the error surfaces in
    /// the page-level banner.
    pub async fn load_posts(&mut self) -> Result<()> {
        match self.posts_api.list().await {
            Ok(posts) => {
                info!(count = posts.len(), "loaded posts");
                self.posts = posts;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Flip a post's comment panel. The first expansion fetches that post's
    /// comments; the fetched marker is set before the await so a toggle
    /// storm issues at most one fetch per post per session.
    pub async fn toggle_comments(&mut self, post_id: i64) -> Result<()> {
        if !self.expanded.insert(post_id) {
            self.expanded.remove(&post_id);
            return Ok(());
        }
        if self.comments_loaded.contains(&post_id) {
            return Ok(());
        }
        self.comments_loaded.insert(post_id);

        match self.comments_api.list_for_post(post_id).await {
            Ok(list) => {
                self.comments.insert(post_id, list);
                Ok(())
            }
            Err(err) => {
                // allow a retry on the next expansion
                self.comments_loaded.remove(&post_id);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Submit a comment. Whitespace-only text is rejected locally with no
    /// network call and no state change; a successful echo is prepended and
    /// the post's counter incremented in the same transition.
    pub async fn submit_comment(&mut self, post_id: i64, text: &str) -> Result<Option<Comment>> {
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

        self.comments
            .entry(post_id)
            .or_default()
            .insert(0, comment.clone());
        if let Some(post) = self.posts.iter_mut().find(|post| post.id == post_id) {
            post.comments_count += 1;
        }
        Ok(Some(comment))
    }

    /// Delete a comment after confirmation. Returns `false` when the user
    /// declined; no request is issued in that case.
    pub async fn delete_comment(&mut self, comment_id: i64, post_id: i64) -> Result<bool> {
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

        if let Some(list) = self.comments.get_mut(&post_id) {
            let before = list.len();
            list.retain(|comment| comment.id != comment_id);
            info!(comment_id, post_id, "deleted comment, {} -> {}", before, list.len());
        }
        if let Some(post) = self.posts.iter_mut().find(|post| post.id == post_id) {
            post.comments_count = post.comments_count.saturating_sub(1);
        }
        Ok(true)
    }

    /// Delete a post after confirmation, discarding its cached comments and
    /// expansion state so nothing dangles.
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

        let before = self.posts.len();
        self.posts.retain(|post| post.id != post_id);
        self.comments.remove(&post_id);
        self.expanded.remove(&post_id);
        self.comments_loaded.remove(&post_id);
        info!(post_id, "deleted post, {} -> {}", before, self.posts.len());
        Ok(true)
    }

    /// Advisory ownership check; the server remains authoritative.
    pub fn can_delete_post(&self, post: &Post) -> bool {
        self.current_user.is_some_and(|me| post.user == me)
    }

    /// Advisory check: the comment author or the post owner may delete.
    pub fn can_delete_comment(&self, comment: &Comment, post: &Post) -> bool {
        let Some(me) = self.current_user else {
            return false;
        };
        comment.user == Some(me) || post.user == me
    }

    /// Swallowed-error variant of [`Self::load_posts`] for fire-and-forget
    /// refreshes; failures only log.
    pub async fn refresh(&mut self) {
        if let Err(err) = self.load_posts().await {
            warn!("feed refresh failed: {err}");
        }
    }
}

impl std::fmt::Debug for PostsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostsController")
            .field("posts", &self.posts.len())
            .field("expanded", &self.expanded.len())
            .field("error", &self.error)
            .finish()
    }
}
