//! Built-in value adapters.
//!
//! Each adapter is a small [`Value`](crate::Value) implementation for
//! one storage type. Custom adapters plug in the same way; nothing in
//! the parser is specific to the types here.

mod boolean;
mod count;
mod duration;
mod map;
mod num;
mod slice;
mod string;

pub use boolean::BoolValue;
pub use count::CountValue;
pub use duration::DurationValue;
pub use map::StringMapValue;
pub use num::{F64Value, I64Value, U64Value};
pub use slice::{I64SliceValue, StringSliceValue};
pub use string::StringValue;

pub(crate) use boolean::parse_bool_literal;
