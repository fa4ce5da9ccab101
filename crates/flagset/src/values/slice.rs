use std::any::Any;

use super::num::parse_i64_auto;
use crate::value::{SliceValue, Value, ValueError};

/// One string element per flag occurrence.
///
/// The registration default survives until the first parse-time set,
/// which clears it; later occurrences append.
#[derive(Debug, Clone, Default)]
pub struct StringSliceValue {
    items: Vec<String>,
    changed: bool,
}

impl StringSliceValue {
    pub fn new<I, S>(default: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: default.into_iter().map(Into::into).collect(),
            changed: false,
        }
    }

    pub fn get(&self) -> &[String] {
        &self.items
    }
}

impl Value for StringSliceValue {
    fn set(&mut self, text: &str) -> Result<(), ValueError> {
        if !self.changed {
            self.items.clear();
            self.changed = true;
        }
        self.items.push(text.to_string());
        Ok(())
    }

    fn text(&self) -> String {
        format!("[{}]", self.items.join(","))
    }

    fn type_name(&self) -> &'static str {
        "strings"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_slice_value(&mut self) -> Option<&mut dyn SliceValue> {
        Some(self)
    }
}

impl SliceValue for StringSliceValue {
    fn append(&mut self, text: &str) -> Result<(), ValueError> {
        self.items.push(text.to_string());
        Ok(())
    }

    fn replace(&mut self, items: &[String]) -> Result<(), ValueError> {
        self.items = items.to_vec();
        Ok(())
    }

    fn items(&self) -> Vec<String> {
        self.items.clone()
    }
}

/// One integer element per flag occurrence; same reset semantics as
/// [`StringSliceValue`].
#[derive(Debug, Clone, Default)]
pub struct I64SliceValue {
    items: Vec<i64>,
    changed: bool,
}

impl I64SliceValue {
    pub fn new<I>(default: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            items: default.into_iter().collect(),
            changed: false,
        }
    }

    pub fn get(&self) -> &[i64] {
        &self.items
    }
}

impl Value for I64SliceValue {
    fn set(&mut self, text: &str) -> Result<(), ValueError> {
        let parsed = parse_i64_auto(text)?;
        if !self.changed {
            self.items.clear();
            self.changed = true;
        }
        self.items.push(parsed);
        Ok(())
    }

    fn text(&self) -> String {
        let body = self
            .items
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!("[{body}]")
    }

    fn type_name(&self) -> &'static str {
        "ints"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_slice_value(&mut self) -> Option<&mut dyn SliceValue> {
        Some(self)
    }
}

impl SliceValue for I64SliceValue {
    fn append(&mut self, text: &str) -> Result<(), ValueError> {
        self.items.push(parse_i64_auto(text)?);
        Ok(())
    }

    fn replace(&mut self, items: &[String]) -> Result<(), ValueError> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(parse_i64_auto(item)?);
        }
        self.items = out;
        Ok(())
    }

    fn items(&self) -> Vec<String> {
        self.items.iter().map(|n| n.to_string()).collect()
    }
}
