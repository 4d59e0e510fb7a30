//! Pagination types
//!
//! The accumulator owns the merged document of one pagination sequence.

use crate::error::{Error, Result};
use crate::merge::merge;
use crate::types::json_kind;
use serde_json::Value;

/// Top-level shape of a paginated JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageShape {
    /// `[...]` pages, concatenated
    Array,
    /// `{...}` pages, deep merged
    Object,
}

impl PageShape {
    /// Shape of a decoded page, `None` for scalars
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Array(_) => Some(Self::Array),
            Value::Object(_) => Some(Self::Object),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for PageShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged state of one pagination sequence
///
/// The shape is fixed by the first page; every later page must match it.
#[derive(Debug, Clone)]
pub struct Accumulator {
    shape: PageShape,
    value: Value,
    pages: u32,
}

impl Accumulator {
    /// Start from the first decoded page, fetched from `url`
    pub fn new(first_page: Value, url: &str) -> Result<Self> {
        let shape = PageShape::of(&first_page).ok_or_else(|| Error::UnexpectedShape {
            url: url.to_string(),
            found: json_kind(&first_page),
        })?;
        Ok(Self {
            shape,
            value: first_page,
            pages: 1,
        })
    }

    /// Merge the next decoded page, fetched from `url`
    pub fn absorb(&mut self, page: Value, url: &str) -> Result<()> {
        match PageShape::of(&page) {
            None => {
                return Err(Error::UnexpectedShape {
                    url: url.to_string(),
                    found: json_kind(&page),
                })
            }
            Some(shape) if shape != self.shape => {
                return Err(Error::ShapeMismatch {
                    url: url.to_string(),
                    expected: self.shape.as_str(),
                    found: shape.as_str(),
                })
            }
            Some(_) => {}
        }

        self.value = merge(self.value.take(), page);
        self.pages += 1;
        Ok(())
    }

    pub fn shape(&self) -> PageShape {
        self.shape
    }

    /// Number of pages merged so far
    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}
