//! The flag registry.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::time::Duration;

use indexmap::IndexMap;

use crate::error::{ConfigError, Error};
use crate::flag::Flag;
use crate::value::Value;
use crate::values::{
    BoolValue, CountValue, DurationValue, F64Value, I64SliceValue, I64Value, StringMapValue,
    StringSliceValue, StringValue, U64Value,
};

/// What to do when a parse pass fails. Chosen once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorHandling {
    /// Return the error to the caller.
    #[default]
    Continue,
    /// Print usage plus the error, then exit the process with status 2
    /// (status 0 for a help request).
    Exit,
    /// Panic with the error message.
    Panic,
}

/// Error categories tolerated during parsing instead of failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorAllowList {
    /// Record unknown flags (see [`FlagSet::unknown_flags`]) and keep
    /// parsing instead of failing on them.
    pub unknown_flags: bool,
    /// Skip the missing-required check after parsing.
    pub required_flags: bool,
}

/// Pure name-normalization function applied at registration, lookup,
/// and parse time. Must be idempotent.
pub type NormalizeFn = fn(&str) -> String;

/// Override for the usage text printed on `--help` and parse errors.
pub type UsageFn = fn(&FlagSet) -> String;

/// A named collection of flags plus the state of its last parse pass.
///
/// Registration is additive across parses; a parse pass resets the
/// positional arguments and the terminator index but never unregisters
/// anything. A `FlagSet` is not meant to be shared between threads
/// while a parse is in flight; independent sets are fully independent.
pub struct FlagSet {
    /// Sort flags lexicographically in usage output and visits; when
    /// false, declaration order is used.
    pub sort_flags: bool,
    /// Error categories to tolerate rather than fail on.
    pub allowed: ErrorAllowList,
    /// Disable the built-in `--help`/`-h` handling.
    pub disable_builtin_help: bool,
    /// Replaces the default usage text when set.
    pub usage_fn: Option<UsageFn>,

    name: String,
    pub(crate) error_handling: ErrorHandling,
    pub(crate) formal: IndexMap<String, Flag>,
    pub(crate) shorthands: HashMap<char, String>,
    set_order: Vec<String>,
    normalize_fn: Option<NormalizeFn>,
    output: Option<Box<dyn Write + Send>>,
    pub(crate) interspersed: bool,
    pub(crate) args: Vec<String>,
    pub(crate) args_len_at_dash: Option<usize>,
    pub(crate) unknown: Vec<String>,
    pub(crate) parsed: bool,
}

impl FlagSet {
    /// Create an empty set. `name` appears in the usage header.
    pub fn new(name: impl Into<String>, error_handling: ErrorHandling) -> Self {
        FlagSet {
            sort_flags: true,
            allowed: ErrorAllowList::default(),
            disable_builtin_help: false,
            usage_fn: None,
            name: name.into(),
            error_handling,
            formal: IndexMap::new(),
            shorthands: HashMap::new(),
            set_order: Vec::new(),
            normalize_fn: None,
            output: None,
            interspersed: true,
            args: Vec::new(),
            args_len_at_dash: None,
            unknown: Vec::new(),
            parsed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn normalize(&self, name: &str) -> String {
        match self.normalize_fn {
            Some(f) => f(name),
            None => name.to_string(),
        }
    }

    /// Install a name-normalization function and re-key every existing
    /// entry through it. Already-set state survives; if the new function
    /// maps two previously distinct names together, the later entry wins.
    pub fn set_normalize_fn(&mut self, f: NormalizeFn) {
        self.normalize_fn = Some(f);
        let old = std::mem::take(&mut self.formal);
        for (_, mut flag) in old {
            let key = f(&flag.name);
            flag.name = key.clone();
            self.formal.insert(key, flag);
        }
        for target in self.shorthands.values_mut() {
            *target = f(target);
        }
        for key in &mut self.set_order {
            *key = f(key);
        }
    }

    /// Register a flag. Duplicate normalized names or shorthands are
    /// configuration errors and leave the set untouched.
    pub fn add_flag(&mut self, mut flag: Flag) -> Result<(), ConfigError> {
        if flag.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let key = self.normalize(&flag.name);
        if self.formal.contains_key(&key) {
            return Err(ConfigError::Redefined {
                set: self.name.clone(),
                flag: flag.name,
            });
        }
        if let Some(c) = flag.shorthand {
            if let Some(existing) = self.shorthands.get(&c) {
                return Err(ConfigError::ShorthandRedefined {
                    set: self.name.clone(),
                    shorthand: c,
                    existing: existing.clone(),
                });
            }
            self.shorthands.insert(c, key.clone());
        }
        flag.name = key.clone();
        self.formal.insert(key, flag);
        Ok(())
    }

    /// Look up a flag by (raw or canonical) name.
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.formal.get(&self.normalize(name))
    }

    /// Look up a flag by its shorthand character.
    pub fn lookup_shorthand(&self, c: char) -> Option<&Flag> {
        self.shorthands.get(&c).and_then(|key| self.formal.get(key))
    }

    /// Set the named flag from text, as the parser does.
    ///
    /// The first successful set marks the flag changed and records it in
    /// set order; a deprecation notice, if declared, is written to the
    /// output sink on every successful set.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let key = self.normalize(name);
        let Some(flag) = self.formal.get_mut(&key) else {
            return Err(Error::UnknownFlag {
                name: name.to_string(),
            });
        };
        if let Err(source) = flag.value.set(value) {
            return Err(Error::InvalidValue {
                flag: flag.name.clone(),
                type_name: flag.value.type_name(),
                value: value.to_string(),
                source,
            });
        }
        let flag_name = flag.name.clone();
        let deprecated = flag.deprecated.clone();
        if !flag.changed {
            flag.changed = true;
            self.set_order.push(key);
        }
        tracing::trace!(flag = %flag_name, value, "flag set");
        if let Some(message) = deprecated {
            self.write_output(&format!("Flag --{flag_name} has been deprecated, {message}\n"));
        }
        Ok(())
    }

    /// Check that every required flag was set during the last parse
    /// pass, reporting all missing flags in one error.
    pub fn validate(&self) -> Result<(), Error> {
        if self.allowed.required_flags {
            return Ok(());
        }
        let missing: Vec<String> = self
            .ordered_flags()
            .into_iter()
            .filter(|f| f.required && !f.changed)
            .map(|f| f.name.clone())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingFlags(missing))
        }
    }

    /// Visit every flag, sorted or in declaration order per
    /// [`sort_flags`](Self::sort_flags).
    pub fn visit_all(&self, mut f: impl FnMut(&Flag)) {
        for flag in self.ordered_flags() {
            f(flag);
        }
    }

    /// Visit only the flags set during the current parse pass, sorted or
    /// in first-set order per [`sort_flags`](Self::sort_flags).
    pub fn visit(&self, mut f: impl FnMut(&Flag)) {
        let mut flags: Vec<&Flag> = self
            .set_order
            .iter()
            .filter_map(|key| self.formal.get(key))
            .collect();
        if self.sort_flags {
            flags.sort_by(|a, b| a.name.cmp(&b.name));
        }
        for flag in flags {
            f(flag);
        }
    }

    fn ordered_flags(&self) -> Vec<&Flag> {
        let mut flags: Vec<&Flag> = self.formal.values().collect();
        if self.sort_flags {
            flags.sort_by(|a, b| a.name.cmp(&b.name));
        }
        flags
    }

    pub fn has_flags(&self) -> bool {
        !self.formal.is_empty()
    }

    /// Whether any flag would show up in usage output.
    pub fn has_available_flags(&self) -> bool {
        self.formal.values().any(|f| !f.hidden)
    }

    /// Whether the named flag was explicitly set during a parse pass.
    pub fn changed(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|f| f.changed)
    }

    /// Positional arguments left over from the last parse pass.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The i'th leftover positional argument.
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(String::as_str)
    }

    /// Number of positionals collected before a `--` terminator was
    /// seen, or `None` if the last parse saw no terminator.
    pub fn args_len_at_dash(&self) -> Option<usize> {
        self.args_len_at_dash
    }

    /// Unknown flag tokens tolerated so far (requires
    /// [`ErrorAllowList::unknown_flags`]). Additive across parses.
    pub fn unknown_flags(&self) -> &[String] {
        &self.unknown
    }

    /// Whether a parse pass has run.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// Allow or forbid flags after the first positional argument.
    /// Forbidden means the first positional stops flag recognition and
    /// everything after it is positional. Defaults to allowed.
    pub fn set_interspersed(&mut self, interspersed: bool) {
        self.interspersed = interspersed;
    }

    /// Redirect usage text, errors, and deprecation notices. Defaults to
    /// standard error.
    pub fn set_output(&mut self, output: impl Write + Send + 'static) {
        self.output = Some(Box::new(output));
    }

    pub(crate) fn write_output(&mut self, text: &str) {
        match &mut self.output {
            Some(w) => {
                let _ = w.write_all(text.as_bytes());
            }
            None => eprint!("{text}"),
        }
    }

    fn typed_value<V: Value + 'static>(
        &self,
        name: &str,
        requested: &'static str,
    ) -> Result<&V, Error> {
        let flag = self.lookup(name).ok_or_else(|| Error::UnknownFlag {
            name: name.to_string(),
        })?;
        flag.value
            .as_any()
            .downcast_ref::<V>()
            .ok_or_else(|| Error::TypeMismatch {
                flag: flag.name.clone(),
                requested,
                actual: flag.value.type_name(),
            })
    }
}

/// Typed registration and retrieval, one pair per built-in adapter.
impl FlagSet {
    pub fn bool(&mut self, name: &str, default: bool, usage: &str) -> Result<(), ConfigError> {
        self.add_flag(Flag::new(name, usage, BoolValue::new(default)))
    }

    pub fn string(&mut self, name: &str, default: &str, usage: &str) -> Result<(), ConfigError> {
        self.add_flag(Flag::new(name, usage, StringValue::new(default)))
    }

    pub fn i64(&mut self, name: &str, default: i64, usage: &str) -> Result<(), ConfigError> {
        self.add_flag(Flag::new(name, usage, I64Value::new(default)))
    }

    pub fn u64(&mut self, name: &str, default: u64, usage: &str) -> Result<(), ConfigError> {
        self.add_flag(Flag::new(name, usage, U64Value::new(default)))
    }

    pub fn f64(&mut self, name: &str, default: f64, usage: &str) -> Result<(), ConfigError> {
        self.add_flag(Flag::new(name, usage, F64Value::new(default)))
    }

    pub fn duration(
        &mut self,
        name: &str,
        default: Duration,
        usage: &str,
    ) -> Result<(), ConfigError> {
        self.add_flag(Flag::new(name, usage, DurationValue::new(default)))
    }

    pub fn count(&mut self, name: &str, usage: &str) -> Result<(), ConfigError> {
        self.add_flag(Flag::new(name, usage, CountValue::new(0)))
    }

    pub fn string_slice(
        &mut self,
        name: &str,
        default: &[&str],
        usage: &str,
    ) -> Result<(), ConfigError> {
        self.add_flag(Flag::new(
            name,
            usage,
            StringSliceValue::new(default.iter().copied()),
        ))
    }

    pub fn i64_slice(
        &mut self,
        name: &str,
        default: &[i64],
        usage: &str,
    ) -> Result<(), ConfigError> {
        self.add_flag(Flag::new(
            name,
            usage,
            I64SliceValue::new(default.iter().copied()),
        ))
    }

    pub fn string_map(
        &mut self,
        name: &str,
        default: &[(&str, &str)],
        usage: &str,
    ) -> Result<(), ConfigError> {
        self.add_flag(Flag::new(
            name,
            usage,
            StringMapValue::new(default.iter().copied()),
        ))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, Error> {
        Ok(self.typed_value::<BoolValue>(name, "bool")?.get())
    }

    pub fn get_string(&self, name: &str) -> Result<String, Error> {
        Ok(self.typed_value::<StringValue>(name, "string")?.get().to_string())
    }

    pub fn get_i64(&self, name: &str) -> Result<i64, Error> {
        Ok(self.typed_value::<I64Value>(name, "i64")?.get())
    }

    pub fn get_u64(&self, name: &str) -> Result<u64, Error> {
        Ok(self.typed_value::<U64Value>(name, "u64")?.get())
    }

    pub fn get_f64(&self, name: &str) -> Result<f64, Error> {
        Ok(self.typed_value::<F64Value>(name, "f64")?.get())
    }

    pub fn get_duration(&self, name: &str) -> Result<Duration, Error> {
        Ok(self.typed_value::<DurationValue>(name, "duration")?.get())
    }

    pub fn get_count(&self, name: &str) -> Result<i64, Error> {
        Ok(self.typed_value::<CountValue>(name, "count")?.get())
    }

    pub fn get_string_slice(&self, name: &str) -> Result<Vec<String>, Error> {
        Ok(self
            .typed_value::<StringSliceValue>(name, "strings")?
            .get()
            .to_vec())
    }

    pub fn get_i64_slice(&self, name: &str) -> Result<Vec<i64>, Error> {
        Ok(self.typed_value::<I64SliceValue>(name, "ints")?.get().to_vec())
    }

    pub fn get_string_map(&self, name: &str) -> Result<IndexMap<String, String>, Error> {
        Ok(self.typed_value::<StringMapValue>(name, "map")?.get().clone())
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field("flags", &self.formal.len())
            .field("parsed", &self.parsed)
            .finish()
    }
}
