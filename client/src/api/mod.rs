//! Resource clients: thin endpoint mappings over the [`crate::Gateway`].

pub mod comments;
pub mod posts;
pub mod users;
pub mod workouts;

pub use comments::CommentsApi;
pub use posts::PostsApi;
pub use users::UsersApi;
pub use workouts::WorkoutsApi;
