//! Lossless syntax trees for a C# dialect with the preview `closed` modifier.
//!
//! Entry points:
//! - [`parse_tree`]: parses a compilation unit with explicit [`ParseOptions`]
//!   and runs the language-version feature gate pass over the result.
//! - [`parse_compilation_unit`]: same, with default options.
//! - [`parse_member_declaration`]: parses one member in isolation, for
//!   incremental and embedded callers.
//! - [`check_declarations`]: declaration checks that a binder would report
//!   (invalid modifiers, misplaced `partial`, reserved type names).
//!
//! Parsing never fails. Every input produces a tree whose text is exactly the
//! input, plus a list of [`Diagnostic`]s.

pub mod ast;
mod check;
mod diagnostics;
mod feature_gate;
mod language_version;
mod lexer;
mod options;
mod parser;
mod stack;
mod syntax_kind;

use rowan::{GreenNode, Language};
use serde::{Deserialize, Serialize};

pub use ast::AstNode;
pub use diagnostics::{Diagnostic, ErrorCode, Severity};
pub use language_version::{Feature, FeatureAvailability, LanguageVersion, LanguageVersionParseError};
pub use lexer::{lex, lex_with_errors, LexError, Lexer, Token};
pub use options::{OptionsError, ParseOptions, SourceKind};
pub use parser::{debug_dump, SyntaxElement, SyntaxNode, SyntaxToken};
pub use syntax_kind::{SharpLanguage, SyntaxKind};

/// A half-open byte range within a source file (`start..end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: u32,
    pub end: u32,
}

impl TextRange {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    #[inline]
    pub fn len(self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl From<text_size::TextRange> for TextRange {
    fn from(range: text_size::TextRange) -> Self {
        Self {
            start: u32::from(range.start()),
            end: u32::from(range.end()),
        }
    }
}

/// A parsed compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub green: GreenNode,
    /// Lexical, syntax and feature gate diagnostics, ordered by position.
    pub diagnostics: Vec<Diagnostic>,
    pub options: ParseOptions,
}

impl SyntaxTree {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn root(&self) -> Option<ast::CompilationUnit> {
        ast::CompilationUnit::cast(self.syntax())
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// A member parsed on its own; ranges are relative to the start offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberParse {
    pub green: GreenNode,
    pub diagnostics: Vec<Diagnostic>,
    /// Byte offset in the original text where the member parse started.
    pub offset: usize,
}

impl MemberParse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn member(&self) -> Option<ast::MemberDeclaration> {
        ast::MemberDeclaration::cast(self.syntax())
    }
}

/// Parse `text` as a compilation unit.
pub fn parse_tree(text: &str, options: &ParseOptions) -> SyntaxTree {
    let output = parser::parse_compilation_unit(text, *options);
    let mut diagnostics = output.diagnostics;
    if !output.too_deep {
        let root = SyntaxNode::new_root(output.green.clone());
        diagnostics.extend(feature_gate::feature_gate_diagnostics(&root, options));
        diagnostics::sort_diagnostics(&mut diagnostics);
    }

    tracing::debug!(
        target: "sharp_syntax",
        len = text.len(),
        top_level = output.green.children().len(),
        diagnostics = diagnostics.len(),
        language_version = %options.language_version,
        too_deep = output.too_deep,
        "parsed compilation unit"
    );

    SyntaxTree {
        green: output.green,
        diagnostics,
        options: *options,
    }
}

/// Parse `text` with default options (preview language version, regular code).
pub fn parse_compilation_unit(text: &str) -> SyntaxTree {
    parse_tree(text, &ParseOptions::default())
}

/// Parse one member declaration starting at byte `offset` of `text`.
///
/// Returns `None` when the text at `offset` is empty, is not a member (a
/// namespace, a stray token) or `offset` is not a character boundary.
pub fn parse_member_declaration(
    text: &str,
    offset: usize,
    options: &ParseOptions,
) -> Option<MemberParse> {
    let slice = text.get(offset..)?;
    let output = parser::parse_member(slice, *options)?;
    let mut diagnostics = output.diagnostics;
    if !output.too_deep {
        let root = SyntaxNode::new_root(output.green.clone());
        diagnostics.extend(feature_gate::feature_gate_diagnostics(&root, options));
        diagnostics::sort_diagnostics(&mut diagnostics);
    }
    tracing::debug!(
        target: "sharp_syntax",
        offset,
        len = slice.len(),
        kind = ?SharpLanguage::kind_from_raw(output.green.kind()),
        diagnostics = diagnostics.len(),
        "parsed member declaration"
    );
    Some(MemberParse {
        green: output.green,
        diagnostics,
        offset,
    })
}

/// Declaration checks over an already parsed tree.
pub fn check_declarations(root: &SyntaxNode, options: &ParseOptions) -> Vec<Diagnostic> {
    check::check_declarations(root, options)
}

#[cfg(test)]
mod tests;
