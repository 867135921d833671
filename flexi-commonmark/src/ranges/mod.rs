//! Addressable spans of lines used to number and highlight code.
//!
//! A [`LineRange`] may address lines from either end of a sequence, so it
//! only becomes comparable once normalized against a concrete line count.
//! [`validate_ranges`] performs that normalization for whole collections and
//! rejects out-of-bounds, overlapping or misordered ranges.

pub mod error;
pub mod line_number_range;
pub mod line_range;
pub mod validator;

pub use error::{RangeError, RangeKind, RangeResult};
pub use line_number_range::{LineNumberRange, NumberedSpan};
pub use line_range::{LineRange, NormalizedRange, RelativePosition};
pub use validator::{ValidatedRanges, validate_ranges};
