/// Error type for rejected arguments to the percolation model and the
/// experiment driver.
///
/// Every public entry point validates its arguments before touching any
/// state, so a returned error always leaves the receiver unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercolationError {
    /// A grid size, site coordinate, trial count or confidence level was
    /// out of range.
    InvalidArgument(String),
}

impl std::fmt::Display for PercolationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PercolationError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for PercolationError {}
