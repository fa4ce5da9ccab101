//! GNU-style command-line flag parsing.
//!
//! A [`FlagSet`] is a named collection of typed flags. Declare flags up
//! front, let [`FlagSet::parse`] walk an argument vector, then read the
//! results back through the typed `get_*` accessors; whatever was not a
//! flag is available from [`FlagSet::args`].
//!
//! ```
//! use flagset::values::{BoolValue, I64Value};
//! use flagset::{ErrorHandling, Flag, FlagSet};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut flags = FlagSet::new("demo", ErrorHandling::Continue);
//! flags.add_flag(
//!     Flag::new("verbose", "chatty output", BoolValue::new(false))
//!         .shorthand('v')
//!         .negatable(),
//! )?;
//! flags.add_flag(Flag::new("jobs", "worker count", I64Value::new(1)).shorthand('j'))?;
//!
//! flags.parse(["-v", "--jobs=4", "input.txt"])?;
//! assert!(flags.get_bool("verbose")?);
//! assert_eq!(flags.get_i64("jobs")?, 4);
//! assert_eq!(flags.args(), ["input.txt"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Accepted forms
//!
//! - `--flag`, `--flag=value`, `--flag value`
//! - `--no-flag` for booleans declared [`negatable`](Flag::negatable)
//! - `-f`, `-f=value`, `-fvalue`, `-f value`, and clusters like `-vjx`
//! - `--` ends flag recognition; everything after it is positional
//! - `--help` / `-h` print usage and return [`ParseOutcome::Help`]
//!   unless disabled or shadowed by a registered flag
//!
//! Boolean flags never require a value: bare presence means true, and a
//! following token is only coerced into the value when it is a boolean
//! literal (`true`, `0`, `F`, ...). Whether a parse failure is returned,
//! exits the process, or panics is chosen per set via [`ErrorHandling`].

pub mod command_line;
mod error;
mod flag;
mod parser;
mod set;
mod usage;
mod value;
pub mod values;

pub use error::{ConfigError, Error};
pub use flag::Flag;
pub use parser::ParseOutcome;
pub use set::{ErrorAllowList, ErrorHandling, FlagSet, NormalizeFn, UsageFn};
pub use value::{SliceValue, Value, ValueArity, ValueError};
