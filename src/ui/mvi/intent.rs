//! Base trait for intents in the MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (typing, submitting a search, changing page or sort)
/// - System events (timer expiry, fetch resolution, location edits)
pub trait Intent: Send + 'static {}
