//! Domain factories for identifier generation.

use uuid::Uuid;

/// Factory for document identifiers.
///
/// Room and message ids are generated here when the caller does not supply
/// one. A caller-supplied id (including an explicitly empty one, which
/// delegates id generation to the remote store) is always passed through.
pub struct DocumentIdFactory;

impl DocumentIdFactory {
    /// Generate a new random UUID v4 identifier.
    pub fn generate() -> String {
        Uuid::new_v4().to_string()
    }
}
