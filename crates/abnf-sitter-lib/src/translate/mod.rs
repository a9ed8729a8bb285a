//! ABNF to combinator grammar translation.
//!
//! - `translator`: walks the CST, one combinator per ABNF construct
//! - `repetition`: lowers repeat operators to repeat/repeat1/optional sequences
//! - `values`: decodes quoted strings and `%x` numeric values

mod repetition;
mod translator;
mod values;


pub use repetition::{MAX_REPEAT_COUNT, RepeatBounds, RepeatError};
pub use translator::{START_RULE, translate};
pub use values::{ValueError, decode_char_val, decode_num_val};
