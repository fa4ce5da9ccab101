use std::any::Any;

use crate::value::{Value, ValueError};

/// String flag value, stored verbatim.
#[derive(Debug, Clone, Default)]
pub struct StringValue(String);

impl StringValue {
    pub fn new(default: impl Into<String>) -> Self {
        Self(default.into())
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Value for StringValue {
    fn set(&mut self, text: &str) -> Result<(), ValueError> {
        self.0 = text.to_string();
        Ok(())
    }

    fn text(&self) -> String {
        self.0.clone()
    }

    fn type_name(&self) -> &'static str {
        "string"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
