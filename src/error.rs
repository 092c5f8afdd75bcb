//! Error type shared by the arithmetic core and every filter built on it

/// Errors raised by fixed-point arithmetic.
///
/// Degenerate geometry (a zero-length gravity vector, a magnetic field
/// parallel to gravity) is not an error: the affected outputs are reported
/// as `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A divisor or reciprocal operand was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A widened intermediate did not fit back into its destination format.
    #[error("fixed-point result out of range")]
    ArithmeticOverflow,

    /// Square root of a negative value.
    #[error("square root of a negative value")]
    NegativeSqrt,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
