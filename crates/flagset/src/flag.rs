//! A single flag declaration.

use std::fmt;

use crate::value::{Value, ValueArity};

/// One declared flag: a name, an optional shorthand, and a typed value.
///
/// Construct with [`Flag::new`] and tune with the builder methods, then
/// hand it to [`FlagSet::add_flag`](crate::FlagSet::add_flag):
///
/// ```
/// use flagset::Flag;
/// use flagset::values::BoolValue;
///
/// let flag = Flag::new("verbose", "chatty output", BoolValue::new(false))
///     .shorthand('v')
///     .negatable();
/// assert_eq!(flag.name(), "verbose");
/// assert_eq!(flag.short(), Some('v'));
/// ```
pub struct Flag {
    pub(crate) name: String,
    pub(crate) shorthand: Option<char>,
    pub(crate) usage: String,
    pub(crate) value: Box<dyn Value>,
    pub(crate) def_value: String,
    pub(crate) arity: ValueArity,
    pub(crate) changed: bool,
    pub(crate) required: bool,
    pub(crate) hidden: bool,
    pub(crate) deprecated: Option<String>,
    pub(crate) shorthand_deprecated: Option<String>,
    pub(crate) shorthand_only: bool,
    pub(crate) negatable: bool,
}

impl Flag {
    /// Declare a flag. The default text and the value's arity are
    /// captured here, once, from the freshly constructed value.
    pub fn new(
        name: impl Into<String>,
        usage: impl Into<String>,
        value: impl Value + 'static,
    ) -> Self {
        let value: Box<dyn Value> = Box::new(value);
        let def_value = value.text();
        let arity = value.arity();
        Flag {
            name: name.into(),
            shorthand: None,
            usage: usage.into(),
            value,
            def_value,
            arity,
            changed: false,
            required: false,
            hidden: false,
            deprecated: None,
            shorthand_deprecated: None,
            shorthand_only: false,
            negatable: false,
        }
    }

    /// Single-character alias reachable as `-c` and in clusters.
    pub fn shorthand(mut self, c: char) -> Self {
        self.shorthand = Some(c);
        self
    }

    /// The flag must be set during a parse pass or validation fails.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Exclude the flag from usage output.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Print a deprecation notice every time the flag is set.
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }

    /// Print a deprecation notice when the shorthand form is used.
    pub fn shorthand_deprecated(mut self, message: impl Into<String>) -> Self {
        self.shorthand_deprecated = Some(message.into());
        self
    }

    /// The flag is only reachable via its shorthand on the command line;
    /// the long name still works for lookups.
    pub fn shorthand_only(mut self) -> Self {
        self.shorthand_only = true;
        self
    }

    /// Accept `--no-<name>` as a synonym setting a boolean flag to false.
    pub fn negatable(mut self) -> Self {
        self.negatable = true;
        self
    }

    /// Canonical (normalized) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shorthand character, if any.
    pub fn short(&self) -> Option<char> {
        self.shorthand
    }

    /// Help text.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The live value.
    pub fn value(&self) -> &dyn Value {
        self.value.as_ref()
    }

    /// Default value text captured at declaration time.
    pub fn default_text(&self) -> &str {
        &self.def_value
    }

    /// Whether the flag was explicitly set during a parse pass.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Value resolution behavior, cached from the adapter.
    pub fn arity(&self) -> ValueArity {
        self.arity
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_negatable(&self) -> bool {
        self.negatable
    }

    pub fn is_shorthand_only(&self) -> bool {
        self.shorthand_only
    }

    /// Whether the default text is the zero form for its type, in which
    /// case usage output omits the `[default: ...]` suffix.
    pub fn default_is_zero(&self) -> bool {
        matches!(self.def_value.as_str(), "" | "0" | "false" | "[]" | "0s")
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("shorthand", &self.shorthand)
            .field("type", &self.value.type_name())
            .field("default", &self.def_value)
            .field("changed", &self.changed)
            .finish()
    }
}
