use std::any::Any;

use super::num::parse_i64_auto;
use crate::value::{Value, ValueArity, ValueError};

/// Occurrence counter: each bare occurrence increments, an explicit
/// value replaces the count (`-vvv` gives 3, `--verbosity=5` gives 5).
#[derive(Debug, Clone, Copy, Default)]
pub struct CountValue(i64);

impl CountValue {
    pub fn new(default: i64) -> Self {
        Self(default)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl Value for CountValue {
    fn set(&mut self, text: &str) -> Result<(), ValueError> {
        let text = text.trim();
        if text.is_empty() {
            self.0 += 1;
            return Ok(());
        }
        self.0 = parse_i64_auto(text)?;
        Ok(())
    }

    fn text(&self) -> String {
        self.0.to_string()
    }

    fn type_name(&self) -> &'static str {
        "count"
    }

    fn arity(&self) -> ValueArity {
        ValueArity::Optional
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
