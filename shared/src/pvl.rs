//! Parameter Value Language records.
//!
//! Cube labels, run summaries, and failure logs are all expressed as PVL:
//! named groups of `Keyword = value` pairs, optionally wrapped in a named
//! object. Keywords may carry several values (`Line = (10.5, 200.5)`) and any
//! item may be preceded by `#` comments.
//!
//! Records are persisted inside cube files with serde and rendered as PVL
//! text through [`fmt::Display`]. Lookups are case-insensitive, matching how
//! keyword names are treated by the tools that produce these labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when reading values out of a PVL record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PvlError {
    #[error("Unable to find PVL group [{0}]")]
    MissingGroup(String),
    #[error("Unable to find keyword [{keyword}] in group [{group}]")]
    MissingKeyword { group: String, keyword: String },
    #[error("Index {index} is out of range for keyword [{keyword}] with {len} values")]
    IndexOutOfRange {
        keyword: String,
        index: usize,
        len: usize,
    },
    #[error("Keyword [{keyword}] value [{value}] is not a valid {expected}")]
    Parse {
        keyword: String,
        value: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, PvlError>;

/// A single keyword with one or more values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvlKeyword {
    pub name: String,
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl PvlKeyword {
    /// Keyword with a single value
    pub fn new(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            values: vec![value.to_string()],
            comments: Vec::new(),
        }
    }

    /// Keyword holding an array of values
    pub fn with_values<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(|v| v.to_string()).collect(),
            comments: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    /// Raw string value at `index`.
    pub fn as_str(&self, index: usize) -> Result<&str> {
        self.values
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| PvlError::IndexOutOfRange {
                keyword: self.name.clone(),
                index,
                len: self.values.len(),
            })
    }

    /// Value at `index` parsed as a double.
    pub fn as_f64(&self, index: usize) -> Result<f64> {
        let raw = self.as_str(index)?;
        raw.trim().parse::<f64>().map_err(|_| PvlError::Parse {
            keyword: self.name.clone(),
            value: raw.to_string(),
            expected: "double",
        })
    }

    /// Value at `index` parsed as an integer.
    ///
    /// Decimal values are accepted and truncated toward zero.
    pub fn as_i32(&self, index: usize) -> Result<i32> {
        let raw = self.as_str(index)?;
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<i32>() {
            return Ok(value);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value.abs() < i32::MAX as f64 => Ok(value as i32),
            _ => Err(PvlError::Parse {
                keyword: self.name.clone(),
                value: raw.to_string(),
                expected: "integer",
            }),
        }
    }

    /// Iterate every value parsed as a double.
    pub fn f64_values(&self) -> Result<Vec<f64>> {
        (0..self.len()).map(|i| self.as_f64(i)).collect()
    }

    fn write_value(f: &mut fmt::Formatter, value: &str) -> fmt::Result {
        let needs_quotes = value.is_empty()
            || value.chars().any(|c| {
                c.is_whitespace()
                    || matches!(c, ',' | '(' | ')' | '{' | '}' | '=' | '#' | '"' | '\'')
            });
        if !needs_quotes {
            return write!(f, "{value}");
        }
        match (value.contains('"'), value.contains('\'')) {
            (true, false) => write!(f, "'{value}'"),
            (true, true) => write!(f, "\"{}\"", value.replace('"', "\\\"")),
            (false, _) => write!(f, "\"{value}\""),
        }
    }

    fn write_padded(&self, f: &mut fmt::Formatter, indent: usize, width: usize) -> fmt::Result {
        for comment in &self.comments {
            writeln!(f, "{:indent$}# {comment}", "")?;
        }
        write!(f, "{:indent$}{:<width$} = ", "", self.name)?;
        match self.values.as_slice() {
            [single] => Self::write_value(f, single)?,
            values => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    Self::write_value(f, value)?;
                }
                write!(f, ")")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for PvlKeyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_padded(f, 0, 0)
    }
}

/// A named group of keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvlGroup {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<PvlKeyword>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl PvlGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keywords: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Add a keyword, replacing any existing keyword of the same name.
    pub fn add_keyword(&mut self, keyword: PvlKeyword) {
        match self
            .keywords
            .iter_mut()
            .find(|k| k.name.eq_ignore_ascii_case(&keyword.name))
        {
            Some(existing) => *existing = keyword,
            None => self.keywords.push(keyword),
        }
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    pub fn has_keyword(&self, name: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| k.name.eq_ignore_ascii_case(name))
    }

    pub fn find_keyword(&self, name: &str) -> Result<&PvlKeyword> {
        self.keywords
            .iter()
            .find(|k| k.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| self.missing(name))
    }

    fn missing(&self, keyword: &str) -> PvlError {
        PvlError::MissingKeyword {
            group: self.name.clone(),
            keyword: keyword.to_string(),
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        for comment in &self.comments {
            writeln!(f, "{:indent$}# {comment}", "")?;
        }
        writeln!(f, "{:indent$}Group = {}", "", self.name)?;
        let width = self
            .keywords
            .iter()
            .map(|k| k.name.len())
            .max()
            .unwrap_or(0);
        for keyword in &self.keywords {
            keyword.write_padded(f, indent + 2, width)?;
        }
        writeln!(f, "{:indent$}End_Group", "")
    }
}

impl fmt::Display for PvlGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// A collection of groups, rendered inside an object when it has a name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pvl {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub groups: Vec<PvlGroup>,
}

impl Pvl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    pub fn add_group(&mut self, group: PvlGroup) {
        self.groups.push(group);
    }

    pub fn find_group(&self, name: &str) -> Result<&PvlGroup> {
        self.groups
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| PvlError::MissingGroup(name.to_string()))
    }

    pub fn find_group_mut(&mut self, name: &str) -> Result<&mut PvlGroup> {
        self.groups
            .iter_mut()
            .find(|g| g.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| PvlError::MissingGroup(name.to_string()))
    }

    /// Write the rendered PVL text to `path`.
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_string())
    }
}

impl fmt::Display for Pvl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let indent = if self.name.is_empty() {
            0
        } else {
            writeln!(f, "Object = {}", self.name)?;
            2
        };
        for group in &self.groups {
            group.write_indented(f, indent)?;
        }
        if !self.name.is_empty() {
            writeln!(f, "End_Object")?;
        }
        writeln!(f, "End")
    }
}
