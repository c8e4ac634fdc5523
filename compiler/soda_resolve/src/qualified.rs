//! Dotted names.

use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

/// A name with no segments, or with an empty segment (`a..b`, `.a`, `a.`).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
#[error("cannot lookup empty symbol")]
pub struct EmptySymbol;

/// A name split on `.` into one or more non-empty segments.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct QualifiedName<'a> {
    segments: SmallVec<[&'a str; 4]>,
}

impl<'a> QualifiedName<'a> {
    pub fn parse(name: &'a str) -> Result<Self, EmptySymbol> {
        let segments: SmallVec<[&'a str; 4]> = name.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(EmptySymbol);
        }
        Ok(QualifiedName { segments })
    }

    #[inline]
    pub fn first(&self) -> &'a str {
        self.segments[0]
    }

    /// Segments after the first.
    #[inline]
    pub fn rest(&self) -> &[&'a str] {
        &self.segments[1..]
    }

    #[inline]
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; parsing rejects empty names.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn is_qualified(&self) -> bool {
        self.segments.len() > 1
    }

    /// The first `n` segments joined with `.`.
    pub fn prefix(&self, n: usize) -> String {
        self.segments[..n.min(self.segments.len())].join(".")
    }
}

impl fmt::Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
