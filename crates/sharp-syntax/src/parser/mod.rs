//! Recursive-descent parser producing a lossless rowan green tree.
//!
//! Trivia and skipped tokens stay in the tree, missing tokens are zero-width
//! tokens with empty text, so the concatenated text of the root always equals
//! the input.

use std::collections::VecDeque;

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, NodeOrToken};

use crate::diagnostics::{sort_diagnostics, Diagnostic, ErrorCode};
use crate::language_version::LanguageVersion;
use crate::lexer::{lex_with_errors, LexError, Token};
use crate::options::ParseOptions;
use crate::stack::{ensure_sufficient_stack, MAX_NESTING_DEPTH};
use crate::syntax_kind::{SharpLanguage, SyntaxKind};
use crate::TextRange;

mod constraints;
mod declarations;
mod expressions;
mod lookahead;
mod modifiers;
mod names;
mod statements;

use lookahead::{Cursor, ModifierScope};

pub type SyntaxNode = rowan::SyntaxNode<SharpLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<SharpLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<SharpLanguage>;

/// Indented dump of a tree: one line per node, `Kind "text"` per token.
pub fn debug_dump(node: &SyntaxNode) -> String {
    fn go(node: &SyntaxNode, indent: usize, out: &mut String) {
        use std::fmt::Write;
        let _ = writeln!(out, "{:indent$}{:?}", "", node.kind(), indent = indent);
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => go(&n, indent + 2, out),
                NodeOrToken::Token(t) => {
                    let _ = writeln!(
                        out,
                        "{:indent$}{:?} {:?}",
                        "",
                        t.kind(),
                        t.text(),
                        indent = indent + 2
                    );
                }
            }
        }
    }

    let mut out = String::new();
    go(node, 0, &mut out);
    out
}

pub(crate) struct ParseOutput {
    pub(crate) green: GreenNode,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// The nesting limit was hit and the rest of the input was skipped.
    pub(crate) too_deep: bool,
}

pub(crate) fn parse_compilation_unit(input: &str, options: ParseOptions) -> ParseOutput {
    let (tokens, lex_errors) = lex_with_errors(input);
    let mut parser = Parser::new(input, tokens, options);
    parser.compilation_unit();
    parser.finish(&lex_errors)
}

/// Parse a single member as if it appeared in a type body.
///
/// Returns `None` when nothing at the start of `input` can begin a member.
pub(crate) fn parse_member(input: &str, options: ParseOptions) -> Option<ParseOutput> {
    let (tokens, lex_errors) = lex_with_errors(input);
    let mut parser = Parser::new(input, tokens, options);
    if !parser.at_member_start() {
        return None;
    }

    parser.builder.start_node(SyntaxKind::CompilationUnit.into());
    parser.member_declaration(DeclContext::TypeBody);
    if !parser.at(SyntaxKind::EndOfFileToken) {
        parser.error_here(ErrorCode::EOFExpected);
        parser.skip_remaining();
    }
    parser.eat_trivia();
    parser.bump_any();
    parser.builder.finish_node();

    let output = parser.finish(&lex_errors);
    let green = hoist_single_member(&output.green)?;
    Some(ParseOutput { green, ..output })
}

/// Turn `Wrapper[trivia.., Member[..], rest..]` into `Member[trivia.., .., rest..]`.
fn hoist_single_member(wrapper: &GreenNode) -> Option<GreenNode> {
    let member = wrapper.children().find_map(|child| child.into_node())?;
    let mut children = Vec::new();
    let mut seen_member = false;
    for child in wrapper.children() {
        match child {
            NodeOrToken::Node(node) if !seen_member => {
                seen_member = true;
                children.extend(member.children().map(|grandchild| match grandchild {
                    NodeOrToken::Node(n) => NodeOrToken::Node(n.to_owned()),
                    NodeOrToken::Token(t) => NodeOrToken::Token(t.to_owned()),
                }));
                debug_assert_eq!(node.kind(), member.kind());
            }
            NodeOrToken::Node(node) => children.push(NodeOrToken::Node(node.to_owned())),
            NodeOrToken::Token(token) => children.push(NodeOrToken::Token(token.to_owned())),
        }
    }
    Some(GreenNode::new(member.kind(), children))
}

/// Where a declaration is being parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DeclContext {
    CompilationUnit,
    Namespace,
    TypeBody,
}

impl DeclContext {
    fn modifier_scope(self) -> ModifierScope {
        match self {
            DeclContext::CompilationUnit => ModifierScope::CompilationUnit,
            DeclContext::Namespace | DeclContext::TypeBody => ModifierScope::Member,
        }
    }

    fn is_namespace_level(self) -> bool {
        matches!(self, DeclContext::CompilationUnit | DeclContext::Namespace)
    }
}

pub(crate) struct Parser<'a> {
    input: &'a str,
    tokens: VecDeque<Token>,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Vec<Diagnostic>,
    options: ParseOptions,
    /// End offset of the last significant token added to the tree.
    last_token_end: usize,
    depth: u32,
    too_deep: bool,
    bailout_offset: Option<u32>,
    /// A namespace or type declaration was seen at the top level.
    seen_type_or_namespace: bool,
    reported_late_statement: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, tokens: Vec<Token>, options: ParseOptions) -> Self {
        Self {
            input,
            tokens: VecDeque::from(tokens),
            builder: GreenNodeBuilder::new(),
            diagnostics: Vec::new(),
            options,
            last_token_end: 0,
            depth: 0,
            too_deep: false,
            bailout_offset: None,
            seen_type_or_namespace: false,
            reported_late_statement: false,
        }
    }

    fn finish(self, lex_errors: &[LexError]) -> ParseOutput {
        let mut diagnostics = self.diagnostics;
        let cutoff = self.bailout_offset;
        diagnostics.extend(
            lex_errors
                .iter()
                .filter(|e| cutoff.map_or(true, |cutoff| e.range.start < cutoff))
                .map(|e| e.to_diagnostic(self.input)),
        );
        sort_diagnostics(&mut diagnostics);
        ParseOutput {
            green: self.builder.finish(),
            diagnostics,
            too_deep: self.too_deep,
        }
    }

    // --- lookahead ---

    fn lookahead(&self) -> Cursor<'_> {
        Cursor::new(&self.tokens)
    }

    fn current(&self) -> SyntaxKind {
        self.lookahead().kind()
    }

    fn current_contextual(&self) -> SyntaxKind {
        self.lookahead().contextual()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.lookahead().nth(n)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_contextual(&self, kind: SyntaxKind) -> bool {
        self.lookahead().is_contextual(kind)
    }

    fn at_ident(&self) -> bool {
        self.at(SyntaxKind::IdentifierToken)
    }

    fn version(&self) -> LanguageVersion {
        self.options.language_version
    }

    fn current_token(&self) -> Option<&Token> {
        let idx = lookahead::skip_trivia(&self.tokens, 0);
        self.tokens.get(idx)
    }

    fn current_text(&self) -> &'a str {
        let input = self.input;
        self.current_token().map_or("", |t| t.text(input))
    }

    fn current_range(&self) -> TextRange {
        match self.current_token() {
            Some(tok) => tok.range,
            None => TextRange::new(self.input.len(), self.input.len()),
        }
    }

    /// Where a missing token is reported: the current token, unless a line
    /// break separates it from the previous token, in which case the empty
    /// range right after the previous token.
    fn missing_range(&self) -> TextRange {
        let idx = lookahead::skip_trivia(&self.tokens, 0);
        let line_break = self
            .tokens
            .iter()
            .take(idx)
            .any(|t| t.kind == SyntaxKind::EndOfLineTrivia);
        if line_break {
            return TextRange::new(self.last_token_end, self.last_token_end);
        }
        match self.tokens.get(idx) {
            Some(tok) if tok.kind != SyntaxKind::EndOfFileToken => tok.range,
            Some(tok) => TextRange::new(tok.range.start as usize, tok.range.start as usize),
            None => TextRange::new(self.input.len(), self.input.len()),
        }
    }

    // --- tree building ---

    fn eat_trivia(&mut self) {
        while self.tokens.front().map_or(false, |t| t.kind.is_trivia()) {
            self.bump_any();
        }
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn bump(&mut self) {
        self.eat_trivia();
        self.bump_any();
    }

    /// Bump the current token, re-tagged as `kind` (contextual keywords).
    fn bump_as(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        if let Some(tok) = self.tokens.pop_front() {
            let text = tok.text(self.input);
            self.builder.token(kind.into(), text);
            self.last_token_end = tok.range.end as usize;
        }
    }

    fn bump_any(&mut self) {
        if let Some(tok) = self.tokens.pop_front() {
            let text = tok.text(self.input);
            self.builder.token(tok.kind.into(), text);
            if !tok.kind.is_trivia() {
                self.last_token_end = tok.range.end as usize;
            }
        }
    }

    fn missing(&mut self, kind: SyntaxKind) {
        self.builder.token(kind.into(), "");
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Bump `kind` or insert it as a missing token with one diagnostic.
    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            return true;
        }
        self.report_missing(kind);
        self.missing(kind);
        false
    }

    fn expect_identifier(&mut self) -> bool {
        self.expect(SyntaxKind::IdentifierToken)
    }

    fn report_missing(&mut self, kind: SyntaxKind) {
        let range = self.missing_range();
        let diagnostic = match kind {
            SyntaxKind::IdentifierToken => Diagnostic::new(ErrorCode::IdentifierExpected, range),
            SyntaxKind::SemicolonToken => Diagnostic::new(ErrorCode::SemicolonExpected, range),
            SyntaxKind::CloseParenToken => Diagnostic::new(ErrorCode::CloseParenExpected, range),
            SyntaxKind::OpenBraceToken => Diagnostic::new(ErrorCode::LbraceExpected, range),
            SyntaxKind::CloseBraceToken => Diagnostic::new(ErrorCode::RbraceExpected, range),
            _ => Diagnostic::with_args(
                ErrorCode::SyntaxError,
                range,
                [kind.token_text().unwrap_or("token")],
            ),
        };
        self.push_diagnostic(diagnostic);
    }

    // --- diagnostics ---

    fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        if !self.too_deep {
            self.diagnostics.push(diagnostic);
        }
    }

    fn error(&mut self, code: ErrorCode, range: TextRange) {
        self.push_diagnostic(Diagnostic::new(code, range));
    }

    fn error_with_args(&mut self, code: ErrorCode, range: TextRange, args: &[&str]) {
        self.push_diagnostic(Diagnostic::with_args(code, range, args.iter().copied()));
    }

    fn error_here(&mut self, code: ErrorCode) {
        let range = self.current_range();
        self.error(code, range);
    }

    // --- recovery ---

    /// Wrap the current token in a `SkippedTokens` node.
    fn skip_token(&mut self) {
        self.start_node(SyntaxKind::SkippedTokens);
        self.bump_any();
        self.finish_node();
    }

    /// Skip every remaining token except the end of file.
    fn skip_remaining(&mut self) {
        if self.at(SyntaxKind::EndOfFileToken) {
            return;
        }
        self.start_node(SyntaxKind::SkippedTokens);
        while self
            .tokens
            .front()
            .map_or(false, |t| t.kind != SyntaxKind::EndOfFileToken)
        {
            self.bump_any();
        }
        self.finish_node();
    }

    /// Run a recursive production with a depth check and stack growth.
    ///
    /// Past [`MAX_NESTING_DEPTH`] the parser reports `ERR_InsufficientStack`
    /// once, skips the rest of the input and stops reporting.
    fn guarded(&mut self, f: impl FnOnce(&mut Self)) {
        if self.too_deep {
            return;
        }
        if self.depth >= MAX_NESTING_DEPTH {
            self.bail_out_too_deep();
            return;
        }
        self.depth += 1;
        ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
    }

    fn bail_out_too_deep(&mut self) {
        let range = self.current_range();
        self.error(ErrorCode::InsufficientStack, range);
        self.too_deep = true;
        self.bailout_offset = Some(range.start);
        tracing::warn!(
            target: "sharp_syntax",
            depth = self.depth,
            offset = range.start,
            "nesting too deep; skipping the rest of the input"
        );
        self.skip_remaining();
    }
}
