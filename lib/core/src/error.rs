//! Shared `Result` alias for lodestar crates.
//!
//! Domain errors stay plain enums next to the code that raises them
//! (`ApiError`, `SubmissionBlocked`); fallible constructors and service
//! calls wrap them in a rootcause `Report`.

use rootcause::Report;

/// `Result` whose error is a rootcause `Report` over context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
