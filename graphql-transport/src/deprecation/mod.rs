//! Static detection of deprecated schema elements used by a document.
//!
//! ```text
//! GRAPHQL DEPRECATION WARNING: User.nickname is deprecated with reason: 'No longer supported': app/views/users.rb:13
//! ```

use std::fmt;

use apollo_compiler::Schema;
use apollo_compiler::ast;

use crate::error::DeprecationError;

mod traverse;
#[cfg(test)]
mod tests;

/// Reason used when `@deprecated` has no `reason` argument.
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// A deprecated field or enum value used by a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeprecationNotice {
    /// `Type.field` or `Enum.VALUE`.
    pub qualified_name: String,
    pub reason: String,
    pub source_file: String,
    /// Line of the usage, offset by the visitor's base line.
    pub line_number: usize,
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GRAPHQL DEPRECATION WARNING: {} is deprecated with reason: '{}': {}:{}",
            self.qualified_name, self.reason, self.source_file, self.line_number
        )
    }
}

/// Receives notices as a traversal finds them.
pub trait DeprecationReporter {
    fn report(&mut self, notice: DeprecationNotice);
}

impl DeprecationReporter for Vec<DeprecationNotice> {
    fn report(&mut self, notice: DeprecationNotice) {
        self.push(notice);
    }
}

impl<R: DeprecationReporter + ?Sized> DeprecationReporter for &mut R {
    fn report(&mut self, notice: DeprecationNotice) {
        (**self).report(notice);
    }
}

/// Logs every notice as a `WARN` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl DeprecationReporter for TracingReporter {
    fn report(&mut self, notice: DeprecationNotice) {
        tracing::warn!(
            qualified_name = %notice.qualified_name,
            source_file = %notice.source_file,
            line_number = notice.line_number,
            "{notice}"
        );
    }
}

/// Walks documents against a schema to find deprecated fields and enum values.
///
/// The visitor keeps no state between traversals and can be shared.
#[derive(Clone, Debug)]
pub struct DeprecationVisitor<'a> {
    schema: &'a Schema,
    source_file: String,
    line_number: usize,
}

impl<'a> DeprecationVisitor<'a> {
    /// `line_number` is added to the 1-based line of each usage, for documents
    /// embedded at an offset in `source_file`.
    pub fn new(schema: &'a Schema, source_file: impl Into<String>, line_number: usize) -> Self {
        Self {
            schema,
            source_file: source_file.into(),
            line_number,
        }
    }

    /// Returns every notice for `document`, in document order.
    pub fn visit(&self, document: &ast::Document) -> Result<Deprecations, DeprecationError> {
        let mut notices = Vec::new();
        self.report(document, &mut notices)?;
        Ok(Deprecations(notices.into_iter()))
    }

    /// Hands each notice to `reporter` as soon as it is found.
    ///
    /// On a schema mismatch the error is returned right away; notices found
    /// before it have already been reported.
    pub fn report<R>(
        &self,
        document: &ast::Document,
        reporter: &mut R,
    ) -> Result<(), DeprecationError>
    where
        R: DeprecationReporter + ?Sized,
    {
        traverse::Traversal::new(
            self.schema,
            document,
            &self.source_file,
            self.line_number,
            reporter,
        )
        .document()
    }
}

/// The notices found by [`DeprecationVisitor::visit`].
#[derive(Debug)]
pub struct Deprecations(std::vec::IntoIter<DeprecationNotice>);

impl Iterator for Deprecations {
    type Item = DeprecationNotice;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Deprecations {}
