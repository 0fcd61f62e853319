//! Editing surface contract
//!
//! The rich-text editor lives in a WebView the engine cannot reach directly.
//! Hosts hand the session an explicit handle implementing this trait instead
//! of sharing a global editor reference.

/// Handle to the editing surface currently bound to a session.
///
/// Content crosses this boundary as an opaque serialized blob; the engine
/// only pushes adopted revisions in and asks the surface to drop focus when
/// the content changes underneath the user.
pub trait EditorSurface: Send + Sync {
    /// Replace the surface's content with `content`.
    fn set_content(&self, content: &str);

    /// Read the surface's current serialized content.
    fn content(&self) -> String;

    /// Leave any focused/editing state.
    fn blur(&self);
}
