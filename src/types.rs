//! Data types shared by the locator, the resolver and the driver.
//!
//! This module contains the "model" structs that cross module boundaries:
//! byte spans, the [`DefinitionDescriptor`] produced by a query, and the
//! single [`NotFound`] failure a query can end in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open byte interval `[start, end)` inside one source file.
///
/// Offsets are 0-based and stored as `u32`, limiting files to 4GB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A span of `len` bytes starting at `start`, clamped to `u32::MAX`.
    pub const fn at(start: u32, len: usize) -> Self {
        let len = if len > u32::MAX as usize { u32::MAX } else { len as u32 };
        Self {
            start,
            end: start.saturating_add(len),
        }
    }

    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` lies entirely inside `self`.
    pub const fn encloses(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

/// The canonical definition of the identifier under the cursor.
///
/// `container` is set if and only if `name` denotes a method or a struct
/// field; `name` is absent when the query lands on an import path or a
/// package name, in which case only the package is reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DefinitionDescriptor {
    /// Import path of the declaring package, or `"builtin"` for
    /// predeclared identifiers.
    pub package: String,
    /// Name of the declaring type, for methods and fields.
    pub container: Option<String>,
    pub name: Option<String>,
}

impl DefinitionDescriptor {
    /// Describe a whole package (import specs, package names).
    pub fn package(path: impl Into<String>) -> Self {
        Self {
            package: path.into(),
            container: None,
            name: None,
        }
    }

    /// Describe a package-level declaration.
    pub fn top_level(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            container: None,
            name: Some(name.into()),
        }
    }

    /// Describe a method or field declared on `container`.
    pub fn member(
        package: impl Into<String>,
        container: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            container: Some(container.into()),
            name: Some(name.into()),
        }
    }

    /// Parse the plain-text form produced by the [`fmt::Display`] impl.
    ///
    /// One field is a package, two are `package name`, three are
    /// `package container name`.  Returns `None` for empty input or more
    /// than three fields.
    pub fn parse_text(text: &str) -> Option<Self> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        match fields.as_slice() {
            [package] => Some(Self::package(*package)),
            [package, name] => Some(Self::top_level(*package, *name)),
            [package, container, name] => Some(Self::member(*package, *container, *name)),
            _ => None,
        }
    }
}

impl fmt::Display for DefinitionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.package)?;
        if let Some(container) = &self.container {
            write!(f, " {}", container)?;
        }
        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }
        Ok(())
    }
}

/// The offset does not land on a resolvable identifier, or resolution ran
/// out of cases.
///
/// This is the only failure a query can end in; it always carries a
/// human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct NotFound {
    pub reason: String,
}

impl NotFound {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
