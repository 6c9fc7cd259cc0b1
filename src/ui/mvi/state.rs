//! Base trait for UI state in the MVI architecture.

/// Marker trait for UI state objects.
///
/// States are plain values: cloned to derive new states, compared to
/// detect changes, and defaulted to their initial screen state.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
