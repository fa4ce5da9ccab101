//! Registration-time and parse-time error types.

use thiserror::Error;

/// Errors raised while declaring flags.
///
/// These indicate a broken flag declaration rather than bad user input,
/// so most callers unwrap them during startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Flags must have a non-empty name.
    #[error("flag name cannot be empty")]
    EmptyName,

    /// A flag with the same normalized name is already registered.
    #[error("{set} flag redefined: {flag}")]
    Redefined { set: String, flag: String },

    /// The shorthand character is already taken by another flag.
    #[error(
        "unable to redefine {shorthand:?} shorthand in {set:?} flag set: it's already used for {existing:?} flag"
    )]
    ShorthandRedefined {
        set: String,
        shorthand: char,
        existing: String,
    },
}

/// Errors raised while parsing an argument vector or reading values back.
#[derive(Debug, Error)]
pub enum Error {
    /// A long flag that is not registered (and not tolerated).
    #[error("unknown flag: --{name}")]
    UnknownFlag { name: String },

    /// A shorthand character with no registered flag behind it.
    #[error("unknown shorthand flag: {shorthand:?} in -{cluster}")]
    UnknownShorthand { shorthand: char, cluster: String },

    /// A token such as `---x` or `--=v` that cannot name a flag.
    #[error("bad flag syntax: {token}")]
    BadSyntax { token: String },

    /// The value text did not parse for the flag's declared type.
    #[error("invalid argument {value:?} for --{flag} flag: {source}")]
    InvalidValue {
        flag: String,
        type_name: &'static str,
        value: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The flag requires a value and none was resolvable.
    #[error("flag needs an argument: {token}")]
    MissingArgument { token: String },

    /// An explicit `=value` where none is accepted (a negated boolean).
    #[error("flag cannot have a value: {token}")]
    UnexpectedValue { token: String },

    /// Aggregate of every required flag left unset after a parse pass.
    #[error("required flag(s) {} not set", quote_flags(.0))]
    MissingFlags(Vec<String>),

    /// A typed getter was called against a flag of another type.
    #[error("trying to read {requested} out of --{flag} flag of type {actual}")]
    TypeMismatch {
        flag: String,
        requested: &'static str,
        actual: &'static str,
    },
}

fn quote_flags(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("\"--{n}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
