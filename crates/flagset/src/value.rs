//! The value contract between flag declarations and the parser.

use std::any::Any;

/// Error type produced by value adapters when text fails to parse.
pub type ValueError = Box<dyn std::error::Error + Send + Sync>;

/// How a flag's value interacts with the token stream.
///
/// Resolved once when the flag is constructed and cached on the flag
/// record; the parser never re-probes the adapter per token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueArity {
    /// A value text must be resolvable or parsing fails.
    #[default]
    Required,
    /// The flag may appear bare; the adapter receives empty text.
    Optional,
    /// No value needed; presence toggles, `--no-` negates, and a
    /// following boolean literal may be coerced into the value.
    Boolean,
}

/// The dynamic value stored in a flag.
///
/// Implementations must be `Send` so a whole set can move across
/// threads (see [`command_line`](crate::command_line)).
pub trait Value: Send {
    /// Parse `text` and store the result.
    fn set(&mut self, text: &str) -> Result<(), ValueError>;

    /// Serialize the current value back to text.
    fn text(&self) -> String;

    /// Type label shown in usage output and error messages.
    fn type_name(&self) -> &'static str;

    /// Capability tag controlling value resolution during parsing.
    fn arity(&self) -> ValueArity {
        ValueArity::Required
    }

    /// Typed access for the `FlagSet::get_*` family.
    fn as_any(&self) -> &dyn Any;

    /// Multi-valued adapters expose their element interface here.
    fn as_slice_value(&mut self) -> Option<&mut dyn SliceValue> {
        None
    }
}

/// Element-level control over multi-valued flags.
pub trait SliceValue {
    /// Append one element parsed from `text`.
    fn append(&mut self, text: &str) -> Result<(), ValueError>;

    /// Replace the whole list with elements parsed from `items`.
    fn replace(&mut self, items: &[String]) -> Result<(), ValueError>;

    /// The current list, serialized element-wise.
    fn items(&self) -> Vec<String>;
}
