//! Caller-supplied extension seams for a generation pass

use crate::error::GenError;
use crate::projector::Projector;

/// Hooks an external caller may supply to inject extra declarations before
/// the pass and rewrite the final output after it.
pub trait TypeHooks {
    /// Called with the fresh projector before any schema is registered.
    fn register_types(&self, ts: &mut Projector<'_>) -> Result<(), GenError> {
        let _ = ts;
        Ok(())
    }

    /// Called with the assembled output text before it is returned.
    fn post_process(&self, code: String) -> String {
        code
    }
}

/// Default no-op hooks.
pub struct NoHooks;

impl TypeHooks for NoHooks {}

/// Best-effort source formatter capability.
///
/// Availability is decided at construction, never probed inside the pass.
/// `None` means unavailable or failed; callers fall back to the unformatted
/// text.
pub trait Formatter {
    fn format(&self, code: &str) -> Option<String>;
}

/// The always-unavailable formatter.
pub struct NullFormatter;

impl Formatter for NullFormatter {
    fn format(&self, _code: &str) -> Option<String> {
        None
    }
}
