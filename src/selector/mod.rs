mod error;
mod grammar;

use std::fmt;
use std::str::FromStr;

pub use error::ParseError;

use crate::host::Element;
use crate::matcher::{class_list_contains, tag_name_equals};

/// A structural selector: an optional tag name plus attribute tests.
///
/// Supported syntax is deliberately small: `tag`, `*`, `[attr]`,
/// `[attr="value"]`, `[attr*="value"]` and combinations such as
/// `button[aria-label="Not Now"]`. There are no combinators; selectors are
/// always applied to the descendants of a scope element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    attributes: Vec<AttributeMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttributeMatch {
    pub(crate) name: String,
    pub(crate) test: Option<AttributeTest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttributeTest {
    Equals(String),
    Contains(String),
}

impl Selector {
    /// Parse selector text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the input is not a valid selector.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        use winnow::Parser;
        grammar::selector
            .parse(input)
            .map_err(|e| ParseError::new(input, e.to_string()))
    }

    /// Matches every element.
    #[must_use]
    pub fn any() -> Self {
        Self {
            tag: None,
            attributes: Vec::new(),
        }
    }

    /// Matches elements with the given tag name, ignoring case.
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            tag: Some(name.into()),
            attributes: Vec::new(),
        }
    }

    /// Additionally require the attribute to be present.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(AttributeMatch {
            name: name.into(),
            test: None,
        });
        self
    }

    /// Additionally require the attribute to equal `value` exactly.
    #[must_use]
    pub fn with_attribute_eq(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(AttributeMatch {
            name: name.into(),
            test: Some(AttributeTest::Equals(value.into())),
        });
        self
    }

    /// Additionally require the attribute to contain `value` literally.
    #[must_use]
    pub fn with_attribute_containing(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.push(AttributeMatch {
            name: name.into(),
            test: Some(AttributeTest::Contains(value.into())),
        });
        self
    }

    /// The required tag name, or `None` for `*` / attribute-only selectors.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Test a single element against this selector.
    pub fn matches<E: Element>(&self, element: &E) -> bool {
        if let Some(tag) = &self.tag {
            if !tag_name_equals(&element.tag_name(), tag) {
                return false;
            }
        }
        self.attributes.iter().all(|attr| {
            let Some(actual) = element.attribute(&attr.name) else {
                return false;
            };
            match &attr.test {
                None => true,
                Some(AttributeTest::Equals(expected)) => actual == *expected,
                Some(AttributeTest::Contains(needle)) => class_list_contains(&actual, needle),
            }
        })
    }
}

impl FromStr for Selector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => f.write_str(tag)?,
            None if self.attributes.is_empty() => f.write_str("*")?,
            None => {}
        }
        for attr in &self.attributes {
            match &attr.test {
                None => write!(f, "[{}]", attr.name)?,
                Some(AttributeTest::Equals(v)) => write!(f, "[{}=\"{}\"]", attr.name, escape(v))?,
                Some(AttributeTest::Contains(v)) => {
                    write!(f, "[{}*=\"{}\"]", attr.name, escape(v))?;
                }
            }
        }
        Ok(())
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
