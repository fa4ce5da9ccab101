//! The argument-vector parser.
//!
//! One parse pass walks the token list, classifies each token as a long
//! flag, a shorthand cluster, a positional, or the `--` terminator, and
//! resolves values through a layered precedence: explicit `=value`,
//! synthesized boolean text, optional-argument empty text, then a
//! following token that does not look like a flag.

use crate::error::Error;
use crate::flag::Flag;
use crate::set::{ErrorHandling, FlagSet};
use crate::value::ValueArity;
use crate::values::parse_bool_literal;

/// Result of a successful parse pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The argument vector was fully processed.
    Parsed,
    /// Built-in help was requested; usage has already been printed to
    /// the output sink. Not an error.
    Help,
}

type Setter<'a> = &'a mut dyn FnMut(&mut FlagSet, &str, &str) -> Result<(), Error>;

/// Flag facts the token handlers need after the registry borrow ends.
struct Resolved {
    key: String,
    arity: ValueArity,
    shorthand: Option<char>,
    shorthand_deprecated: Option<String>,
}

impl Resolved {
    fn of(flag: &Flag) -> Self {
        Resolved {
            key: flag.name.clone(),
            arity: flag.arity,
            shorthand: flag.shorthand,
            shorthand_deprecated: flag.shorthand_deprecated.clone(),
        }
    }
}

enum Continuation {
    Proceed,
    Help,
}

enum ShortStep<'t> {
    /// Cluster characters still to process (may be empty).
    Rest(&'t str),
    Help,
}

impl FlagSet {
    /// Parse an argument vector (not including the program name).
    ///
    /// Values are delivered through [`FlagSet::set`], so `changed`
    /// markers and deprecation notices apply. On completion the
    /// leftover positionals are available from [`FlagSet::args`].
    pub fn parse<I, S>(&mut self, args: I) -> Result<ParseOutcome, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_with(args, |fs, name, value| fs.set(name, value))
    }

    /// Parse the process argument vector.
    pub fn parse_env(&mut self) -> Result<ParseOutcome, Error> {
        self.parse(std::env::args().skip(1))
    }

    /// Parse with a custom setter invoked for every resolved flag/value
    /// pair instead of [`FlagSet::set`].
    pub fn parse_with<I, S, F>(&mut self, args: I, mut setter: F) -> Result<ParseOutcome, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&mut FlagSet, &str, &str) -> Result<(), Error>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        match self.parse_args(args, &mut setter) {
            Ok(ParseOutcome::Help) => {
                if self.error_handling == ErrorHandling::Exit {
                    std::process::exit(0);
                }
                Ok(ParseOutcome::Help)
            }
            Ok(outcome) => Ok(outcome),
            Err(err) => match self.error_handling {
                ErrorHandling::Continue => Err(err),
                ErrorHandling::Exit => std::process::exit(2),
                ErrorHandling::Panic => panic!("{err}"),
            },
        }
    }

    fn parse_args(&mut self, args: Vec<String>, setter: Setter) -> Result<ParseOutcome, Error> {
        self.parsed = true;
        self.args = Vec::new();
        self.args_len_at_dash = None;
        tracing::debug!(set = %self.name(), tokens = args.len(), "parsing arguments");

        let mut cursor = 0usize;
        while cursor < args.len() {
            let token = &args[cursor];
            cursor += 1;

            if !looks_like_flag(token) {
                self.args.push(token.clone());
                if !self.interspersed {
                    // The first positional ends flag recognition.
                    self.args.extend(args[cursor..].iter().cloned());
                    break;
                }
                continue;
            }

            if let Some(body) = token.strip_prefix("--") {
                if body.is_empty() {
                    // Terminator: everything after is positional.
                    self.args_len_at_dash = Some(self.args.len());
                    self.args.extend(args[cursor..].iter().cloned());
                    break;
                }
                match self.parse_long(token, body, &args, &mut cursor, setter)? {
                    Continuation::Help => return Ok(ParseOutcome::Help),
                    Continuation::Proceed => {}
                }
            } else {
                match self.parse_short_cluster(token, &args, &mut cursor, setter)? {
                    Continuation::Help => return Ok(ParseOutcome::Help),
                    Continuation::Proceed => {}
                }
            }
        }

        if let Err(err) = self.validate() {
            return Err(self.fail(err));
        }
        Ok(ParseOutcome::Parsed)
    }

    /// `--name`, `--name=value`, `--no-name`.
    fn parse_long(
        &mut self,
        token: &str,
        body: &str,
        args: &[String],
        cursor: &mut usize,
        setter: Setter,
    ) -> Result<Continuation, Error> {
        if body.starts_with('-') || body.starts_with('=') {
            return Err(self.fail(Error::BadSyntax {
                token: token.to_string(),
            }));
        }

        let (candidate, eq_value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let mut name = candidate;
        let mut negated = false;
        let mut found = self.formal.get(&self.normalize(name));
        if found.is_none() {
            // `--no-x` retargets to a negatable boolean `x`.
            if let Some(base) = name.strip_prefix("no-") {
                if !base.is_empty() {
                    if let Some(flag) = self.formal.get(&self.normalize(base)) {
                        if flag.negatable && flag.arity == ValueArity::Boolean {
                            negated = true;
                            name = base;
                            found = Some(flag);
                        }
                    }
                }
            }
        }
        let found_any = found.is_some();
        let resolved = found.filter(|f| !f.shorthand_only).map(Resolved::of);

        let Some(resolved) = resolved else {
            if !found_any && name == "help" && !self.disable_builtin_help {
                self.print_usage();
                return Ok(Continuation::Help);
            }
            if self.allowed.unknown_flags {
                self.add_unknown(token);
                if eq_value.is_none() {
                    self.swallow_unknown_value(args, cursor);
                }
                return Ok(Continuation::Proceed);
            }
            return Err(self.fail(Error::UnknownFlag {
                name: name.to_string(),
            }));
        };

        let is_bool = resolved.arity == ValueArity::Boolean;
        let value: String = if let Some(v) = eq_value {
            if negated {
                // `--no-x=value` makes no sense; negation already is the value.
                return Err(self.fail(Error::UnexpectedValue {
                    token: token.to_string(),
                }));
            }
            v.to_string()
        } else if is_bool {
            (!negated).to_string()
        } else if resolved.arity == ValueArity::Optional {
            String::new()
        } else if next_is_value(args, *cursor) {
            let v = args[*cursor].clone();
            *cursor += 1;
            v
        } else {
            return Err(self.fail(Error::MissingArgument {
                token: token.to_string(),
            }));
        };

        if let Err(err) = setter(self, &resolved.key, &value) {
            return Err(self.fail(err));
        }
        Ok(Continuation::Proceed)
    }

    /// `-f`, `-f=value`, `-fvalue`, `-f value`, `-abc`.
    fn parse_short_cluster(
        &mut self,
        token: &str,
        args: &[String],
        cursor: &mut usize,
        setter: Setter,
    ) -> Result<Continuation, Error> {
        let mut cluster = &token[1..];
        while !cluster.is_empty() {
            match self.parse_one_short(cluster, args, cursor, setter)? {
                ShortStep::Rest(rest) => cluster = rest,
                ShortStep::Help => return Ok(Continuation::Help),
            }
        }
        Ok(Continuation::Proceed)
    }

    fn parse_one_short<'t>(
        &mut self,
        cluster: &'t str,
        args: &[String],
        cursor: &mut usize,
        setter: Setter,
    ) -> Result<ShortStep<'t>, Error> {
        let mut chars = cluster.chars();
        let Some(c) = chars.next() else {
            return Ok(ShortStep::Rest(""));
        };
        let rest = chars.as_str();

        let resolved = match self
            .shorthands
            .get(&c)
            .and_then(|key| self.formal.get(key))
            .map(Resolved::of)
        {
            Some(resolved) => resolved,
            None => {
                if c == 'h' && !self.disable_builtin_help {
                    self.print_usage();
                    return Ok(ShortStep::Help);
                }
                if self.allowed.unknown_flags {
                    if rest.is_empty() {
                        self.add_unknown(&format!("-{c}"));
                        self.swallow_unknown_value(args, cursor);
                    } else {
                        // Keep the unrecognized tail in one piece.
                        self.add_unknown(&format!("-{cluster}"));
                    }
                    return Ok(ShortStep::Rest(""));
                }
                // Fall back to a single-character long name.
                let fallback = self
                    .formal
                    .get(&self.normalize(&c.to_string()))
                    .filter(|f| f.shorthand.is_none() || f.shorthand == Some(c))
                    .map(Resolved::of);
                match fallback {
                    Some(resolved) => resolved,
                    None => {
                        return Err(self.fail(Error::UnknownShorthand {
                            shorthand: c,
                            cluster: cluster.to_string(),
                        }));
                    }
                }
            }
        };

        let is_bool = resolved.arity == ValueArity::Boolean;
        let mut out_rest = rest;
        let value: String;
        if let Some(v) = rest.strip_prefix('=').filter(|v| !v.is_empty()) {
            // '-f=value'
            value = v.to_string();
            out_rest = "";
        } else if !rest.is_empty()
            && !self.rest_starts_with_shorthand(rest)
            && (!is_bool || parse_bool_literal(rest).is_some())
        {
            // '-fvalue': the remainder is this flag's value unless it
            // opens with another registered shorthand, or the flag is a
            // boolean and the remainder is not a boolean literal.
            value = rest.to_string();
            out_rest = "";
        } else if rest.is_empty()
            && next_is_value(args, *cursor)
            && (!is_bool || parse_bool_literal(&args[*cursor]).is_some())
        {
            // '-f value'
            value = args[*cursor].clone();
            *cursor += 1;
        } else if is_bool || resolved.arity == ValueArity::Optional {
            // '-f' with the value optional.
            value = String::new();
        } else {
            return Err(self.fail(Error::MissingArgument {
                token: format!("{c:?} in -{cluster}"),
            }));
        }

        if let Some(message) = &resolved.shorthand_deprecated {
            let shorthand = resolved.shorthand.unwrap_or(c);
            let notice =
                format!("Flag shorthand -{shorthand} has been deprecated, {message}\n");
            self.write_output(&notice);
        }

        if let Err(err) = setter(self, &resolved.key, &value) {
            return Err(self.fail(err));
        }
        Ok(ShortStep::Rest(out_rest))
    }

    fn rest_starts_with_shorthand(&self, rest: &str) -> bool {
        rest.chars()
            .next()
            .is_some_and(|c| self.shorthands.contains_key(&c))
    }

    fn add_unknown(&mut self, token: &str) {
        tracing::debug!(token, "tolerating unknown flag");
        self.unknown.push(token.to_string());
    }

    /// The next token is taken as an unknown flag's value only when it
    /// does not look like a flag itself and further tokens follow it, so
    /// a final positional argument is never lost.
    fn swallow_unknown_value(&mut self, args: &[String], cursor: &mut usize) {
        let Some(next) = args.get(*cursor) else {
            return;
        };
        if looks_like_flag(next) {
            return;
        }
        if args.len() - *cursor > 1 {
            *cursor += 1;
        }
    }
}

/// Anything except the empty token and the bare `-` (both positionals by
/// convention) opens flag interpretation when it leads with a dash.
fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

fn next_is_value(args: &[String], cursor: usize) -> bool {
    args.get(cursor).is_some_and(|a| !looks_like_flag(a))
}
