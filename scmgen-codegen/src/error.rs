// Typed fatal errors of the reconciliation engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// A required structural marker was not found in the input file.
    /// Raised before any output is written.
    #[error("could not find `{0}` in the input file - cannot add missing handlers")]
    MarkerNotFound(&'static str),

    /// The structural markers appear in the wrong order in the input file.
    /// Raised before any output is written.
    #[error("found `{0}` before `{1}` in the input file - cannot add missing handlers")]
    MarkerOutOfOrder(&'static str, &'static str),
}
