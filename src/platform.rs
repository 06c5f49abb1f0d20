//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Modifier for the submit shortcut
/// - macOS: SUPER (Cmd key), Ctrl also accepted
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";
