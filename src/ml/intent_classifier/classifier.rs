//! Intent classifier trait definition.

use crate::error::Result;

/// Intent classifier trait.
///
/// The chat bot only depends on this trait, so tests can swap the trained
/// model for a stub.
pub trait IntentClassifier: Send + Sync {
    /// Predict the intent tag for the given text.
    ///
    /// For a trained classifier this never fails because of the input: empty
    /// or unknown text still yields one of [`labels`](Self::labels).
    fn predict(&self, text: &str) -> Result<String>;

    /// The closed set of tags this classifier can return.
    fn labels(&self) -> Vec<String>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
