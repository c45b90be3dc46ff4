use crate::graph_error::GraphError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), GraphError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
///
/// Checks are compiled only with the `check-invariants` feature.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(feature = "check-invariants")]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
