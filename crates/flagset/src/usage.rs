//! Usage text rendering.

use crate::error::Error;
use crate::flag::Flag;
use crate::set::FlagSet;
use crate::value::ValueArity;

impl FlagSet {
    /// One aligned row per visible flag, sorted or in declaration order
    /// per [`sort_flags`](Self::sort_flags).
    pub fn flag_usages(&self) -> String {
        let mut rows: Vec<(String, String)> = Vec::new();
        self.visit_all(|flag| {
            if flag.is_hidden() {
                return;
            }
            rows.push((usage_left(flag), usage_right(flag)));
        });

        let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
        let mut out = String::new();
        for (left, right) in rows {
            if right.is_empty() {
                out.push_str(&format!("  {left}\n"));
            } else {
                out.push_str(&format!("  {left:width$}  {right}\n"));
            }
        }
        out
    }

    /// The default usage text: a header naming the set plus the table.
    pub fn default_usage(&self) -> String {
        if self.name().is_empty() {
            format!("Usage:\n{}", self.flag_usages())
        } else {
            format!("Usage of {}:\n{}", self.name(), self.flag_usages())
        }
    }

    /// Print usage (the override, if installed) to the output sink.
    pub fn print_usage(&mut self) {
        let text = match self.usage_fn {
            Some(f) => f(self),
            None => self.default_usage(),
        };
        self.write_output(&text);
    }

    /// Report a terminal parse error: usage first, then the message.
    pub(crate) fn fail(&mut self, err: Error) -> Error {
        self.print_usage();
        self.write_output(&format!("\n{err}\n"));
        err
    }
}

fn usage_left(flag: &Flag) -> String {
    let long = if flag.is_negatable() && flag.arity() == ValueArity::Boolean {
        format!("--[no-]{}", flag.name())
    } else {
        format!("--{}", flag.name())
    };
    let mut left = match flag.short() {
        Some(c) if flag.is_shorthand_only() => format!("-{c}"),
        Some(c) => format!("-{c}, {long}"),
        None => format!("    {long}"),
    };
    if flag.arity() != ValueArity::Boolean {
        left.push(' ');
        left.push_str(flag.value().type_name());
    }
    left
}

fn usage_right(flag: &Flag) -> String {
    let mut right = flag.usage().trim().to_string();
    if flag.is_required() {
        if right.is_empty() {
            right.push_str("required");
        } else {
            right.push_str(" (required)");
        }
    }
    if !flag.default_is_zero() {
        if right.is_empty() {
            right.push_str(&format!("[default: {}]", flag.default_text()));
        } else {
            right.push_str(&format!(" [default: {}]", flag.default_text()));
        }
    }
    right
}
