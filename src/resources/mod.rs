//! Effect primitives behind each action (describe + apply pattern).
pub mod command;
pub mod directory;
pub mod symlink;

use anyhow::Result;

/// Minimal interface for effects that can be described and applied.
///
/// `description` is pure and is what gets logged before anything happens;
/// `apply` performs the effect exactly once.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// A target that already exists is reported as
    /// [`ResourceChange::Skipped`]; anything else that goes wrong is an error.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failures other than "already exists", on a
    /// missing parent directory, or when a command cannot run or fails.
    fn apply(&self) -> Result<ResourceChange>;
}

/// Result of performing an action.
///
/// # Examples
///
/// ```
/// use dotfiles_bootstrap::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let skipped = ResourceChange::Skipped { reason: "File exists (os error 17)".into() };
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, skipped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// The effect was carried out.
    Applied,
    /// Dry-run: the effect was announced but not carried out.
    Planned,
    /// The target already existed and was left untouched.
    Skipped {
        /// The OS error message explaining why.
        reason: String,
    },
}

/// Turn an "already exists" I/O error into [`ResourceChange::Skipped`] and
/// pass every other error through.
fn skip_if_exists(result: std::io::Result<()>) -> std::io::Result<ResourceChange> {
    match result {
        Ok(()) => Ok(ResourceChange::Applied),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(ResourceChange::Skipped {
            reason: e.to_string(),
        }),
        Err(e) => Err(e),
    }
}
