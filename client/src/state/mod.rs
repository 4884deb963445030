//! View-state controllers
//!
//! The only stateful components of the client: they own in-memory
//! collections, drive optimistic mutations, and reconcile server responses
//! into local state. All mutations are read-modify-write transitions keyed
//! by entity id so interleaved completions never clobber unrelated keys.

pub mod posts;
pub mod profile;

pub use posts::PostsController;
pub use profile::ProfileController;

/// Confirmation step for destructive actions.
///
/// The UI supplies the prompt mechanics; controllers refuse to issue the
/// request until this returns `true`.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmer that accepts everything, for non-interactive use.
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
