pub mod constants;
pub mod string_utils;
pub mod url_utils;

pub use constants::*;
pub use string_utils::{normalize_whitespace, split_ordered_numeral, strip_leading_numeral};
pub use url_utils::normalize_reference_url;
