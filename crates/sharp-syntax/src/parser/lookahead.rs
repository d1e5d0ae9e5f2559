//! Side-effect free lookahead over the pending token queue.
//!
//! Every decision that needs to peek past the current token goes through a
//! [`Cursor`]. A cursor is a plain value, so backing out of a speculative scan
//! is simply dropping it.

use std::collections::VecDeque;

use crate::language_version::{Feature, LanguageVersion};
use crate::lexer::Token;
use crate::syntax_kind::SyntaxKind;

#[derive(Clone, Copy)]
pub(crate) struct Cursor<'t> {
    tokens: &'t VecDeque<Token>,
    idx: usize,
}

impl<'t> Cursor<'t> {
    pub(crate) fn new(tokens: &'t VecDeque<Token>) -> Self {
        Self {
            tokens,
            idx: skip_trivia(tokens, 0),
        }
    }

    pub(crate) fn kind(&self) -> SyntaxKind {
        self.tokens
            .get(self.idx)
            .map_or(SyntaxKind::EndOfFileToken, |t| t.kind)
    }

    /// Keyword an identifier may act as, or the token kind itself.
    pub(crate) fn contextual(&self) -> SyntaxKind {
        self.tokens
            .get(self.idx)
            .map_or(SyntaxKind::EndOfFileToken, |t| t.contextual_kind)
    }

    pub(crate) fn is(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn is_contextual(&self, kind: SyntaxKind) -> bool {
        self.kind() == SyntaxKind::IdentifierToken && self.contextual() == kind
    }

    pub(crate) fn is_ident(&self) -> bool {
        self.kind() == SyntaxKind::IdentifierToken
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.kind() == SyntaxKind::EndOfFileToken
    }

    #[must_use]
    pub(crate) fn next(self) -> Self {
        if self.is_eof() {
            return self;
        }
        Self {
            tokens: self.tokens,
            idx: skip_trivia(self.tokens, self.idx + 1),
        }
    }

    pub(crate) fn nth(self, n: usize) -> SyntaxKind {
        let mut c = self;
        for _ in 0..n {
            c = c.next();
        }
        c.kind()
    }

    pub(crate) fn same_position(&self, other: &Cursor<'_>) -> bool {
        self.idx == other.idx
    }
}

pub(crate) fn skip_trivia(tokens: &VecDeque<Token>, mut idx: usize) -> usize {
    while tokens.get(idx).map_or(false, |t| t.kind.is_trivia()) {
        idx += 1;
    }
    idx
}

/// Where a run of modifiers is being recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ModifierScope {
    /// Directly inside the compilation unit, where statements compete with members.
    CompilationUnit,
    /// Namespace or type body.
    Member,
}

/// Tuple types nested deeper than this are not recognized by lookahead.
const MAX_SCANNED_TUPLE_DEPTH: u8 = 16;

/// Skip a type without building anything. Returns the position after it.
pub(crate) fn scan_type(c: Cursor<'_>) -> Option<Cursor<'_>> {
    scan_type_nested(c, 0)
}

fn scan_type_nested(c: Cursor<'_>, tuple_depth: u8) -> Option<Cursor<'_>> {
    let mut c = match c.kind() {
        kind if kind.is_predefined_type() => c.next(),
        SyntaxKind::IdentifierToken => scan_name(c)?,
        SyntaxKind::RefKeyword => {
            let mut inner = c.next();
            if inner.is(SyntaxKind::ReadOnlyKeyword) {
                inner = inner.next();
            }
            return scan_type_nested(inner, tuple_depth);
        }
        SyntaxKind::OpenParenToken if tuple_depth < MAX_SCANNED_TUPLE_DEPTH => {
            scan_tuple_type(c, tuple_depth + 1)?
        }
        SyntaxKind::DelegateKeyword if c.nth(1) == SyntaxKind::AsteriskToken => {
            let after_star = c.next().next();
            if !after_star.is(SyntaxKind::LessThanToken) {
                return None;
            }
            scan_type_argument_list(after_star)?
        }
        _ => return None,
    };

    loop {
        match c.kind() {
            SyntaxKind::QuestionToken | SyntaxKind::AsteriskToken => c = c.next(),
            SyntaxKind::OpenBracketToken => {
                let mut inner = c.next();
                while inner.is(SyntaxKind::CommaToken) {
                    inner = inner.next();
                }
                if !inner.is(SyntaxKind::CloseBracketToken) {
                    break;
                }
                c = inner.next();
            }
            _ => break,
        }
    }
    Some(c)
}

/// `(T, U)` or `(T a, U b)`; a single parenthesized type is not a tuple.
fn scan_tuple_type(c: Cursor<'_>, tuple_depth: u8) -> Option<Cursor<'_>> {
    debug_assert!(c.is(SyntaxKind::OpenParenToken));
    let mut c = c.next();
    let mut elements = 0;
    loop {
        c = scan_type_nested(c, tuple_depth)?;
        if c.is_ident() {
            c = c.next();
        }
        elements += 1;
        if !c.is(SyntaxKind::CommaToken) {
            break;
        }
        c = c.next();
    }
    (elements >= 2 && c.is(SyntaxKind::CloseParenToken)).then(|| c.next())
}

/// `A`, `A<T>`, `A.B<T>.C`, `a::B`.
pub(crate) fn scan_name(c: Cursor<'_>) -> Option<Cursor<'_>> {
    if !c.is_ident() {
        return None;
    }
    let mut c = c.next();
    loop {
        if c.is(SyntaxKind::LessThanToken) {
            match scan_type_argument_list(c) {
                Some(after) => c = after,
                None => return Some(c),
            }
        }
        let separator = matches!(c.kind(), SyntaxKind::DotToken | SyntaxKind::ColonColonToken);
        if separator && c.next().is_ident() {
            c = c.next().next();
            continue;
        }
        return Some(c);
    }
}

/// Shallow, depth-counting match of `<...>` that only admits tokens which can
/// appear inside a type argument list.
pub(crate) fn scan_type_argument_list(c: Cursor<'_>) -> Option<Cursor<'_>> {
    debug_assert!(c.is(SyntaxKind::LessThanToken));
    let mut depth: i32 = 0;
    let mut c = c;
    loop {
        match c.kind() {
            SyntaxKind::LessThanToken => depth += 1,
            SyntaxKind::GreaterThanToken => depth -= 1,
            SyntaxKind::GreaterThanGreaterThanToken => depth -= 2,
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => depth -= 3,
            SyntaxKind::IdentifierToken
            | SyntaxKind::DotToken
            | SyntaxKind::ColonColonToken
            | SyntaxKind::CommaToken
            | SyntaxKind::QuestionToken
            | SyntaxKind::AsteriskToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::OpenParenToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::InKeyword
            | SyntaxKind::OutKeyword => {}
            kind if kind.is_predefined_type() => {}
            _ => return None,
        }
        c = c.next();
        if depth < 0 {
            return None;
        }
        if depth == 0 {
            return Some(c);
        }
    }
}

pub(crate) fn is_possible_member_name(c: Cursor<'_>) -> bool {
    c.is_ident() || c.is(SyntaxKind::ThisKeyword)
}

/// Keywords that can only begin a type declaration (or its modifiers).
fn is_type_declaration_or_modifier_start(c: Cursor<'_>) -> bool {
    matches!(
        c.kind(),
        SyntaxKind::EnumKeyword
            | SyntaxKind::DelegateKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::InternalKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::SealedKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::UnsafeKeyword
    )
}

/// Decide whether a contextual keyword (`async`, `required`, ...) at `c` acts
/// as a modifier, by looking at what follows it.
pub(crate) fn should_contextual_keyword_be_modifier(c: Cursor<'_>) -> bool {
    let next = c.next();
    if next.kind().is_non_contextual_modifier() {
        return true;
    }

    let mut c = next;
    if c.is_contextual(SyntaxKind::PartialKeyword) {
        c = c.next();
    }

    if is_type_declaration_or_modifier_start(c) || c.is(SyntaxKind::EventKeyword) {
        return true;
    }
    if matches!(c.kind(), SyntaxKind::ImplicitKeyword | SyntaxKind::ExplicitKeyword)
        && c.nth(1) == SyntaxKind::OperatorKeyword
    {
        return true;
    }

    match scan_type(c) {
        Some(after) => {
            is_possible_member_name(after)
                || after.kind().is_predefined_type()
                || after.kind().is_non_contextual_modifier()
                || is_type_declaration_or_modifier_start(after)
                || matches!(
                    after.kind(),
                    SyntaxKind::EndOfFileToken
                        | SyntaxKind::CloseBraceToken
                        | SyntaxKind::NamespaceKeyword
                        | SyntaxKind::OperatorKeyword
                )
        }
        None => false,
    }
}

fn is_partial_modifier(c: Cursor<'_>, version: LanguageVersion) -> bool {
    let next = c.next();
    match next.kind() {
        SyntaxKind::ClassKeyword
        | SyntaxKind::StructKeyword
        | SyntaxKind::InterfaceKeyword
        | SyntaxKind::EnumKeyword
        | SyntaxKind::DelegateKeyword
        | SyntaxKind::NamespaceKeyword => return true,
        kind if kind.is_non_contextual_modifier() => return true,
        _ => {}
    }
    if next.is_contextual(SyntaxKind::RecordKeyword) && version.supports_records() {
        return true;
    }
    scan_type(next).map_or(false, is_possible_member_name)
}

/// `ref` is only a modifier in `ref struct`, `ref partial struct` and friends.
fn is_ref_modifier(c: Cursor<'_>) -> bool {
    let mut next = c.next();
    if next.is_contextual(SyntaxKind::PartialKeyword) {
        next = next.next();
    }
    next.is(SyntaxKind::StructKeyword) || next.is_contextual(SyntaxKind::RecordKeyword)
}

/// Classify the token at `c` as a modifier for the given scope.
///
/// Pure: the answer only depends on the tokens at and after `c`, so a run of
/// modifiers can be recognized in one pass.
pub(crate) fn modifier_at(
    c: Cursor<'_>,
    scope: ModifierScope,
    version: LanguageVersion,
) -> Option<SyntaxKind> {
    let kind = c.kind();
    if kind.is_non_contextual_modifier() {
        return Some(kind);
    }
    if kind == SyntaxKind::RefKeyword {
        return is_ref_modifier(c).then_some(kind);
    }
    if kind != SyntaxKind::IdentifierToken {
        return None;
    }

    let contextual = c.contextual();
    let is_modifier = match contextual {
        SyntaxKind::PartialKeyword => is_partial_modifier(c, version),
        SyntaxKind::AsyncKeyword | SyntaxKind::RequiredKeyword => {
            should_contextual_keyword_be_modifier(c)
        }
        SyntaxKind::ClosedKeyword => {
            (version.is_enabled(Feature::ClosedClasses) && scope == ModifierScope::Member)
                || should_contextual_keyword_be_modifier(c)
        }
        SyntaxKind::FileKeyword => {
            (version.is_enabled(Feature::FileTypes) && scope == ModifierScope::Member)
                || should_contextual_keyword_be_modifier(c)
        }
        _ => false,
    };
    is_modifier.then_some(contextual)
}

/// Position after the maximal modifier run starting at `c`.
pub(crate) fn skip_modifiers(
    c: Cursor<'_>,
    scope: ModifierScope,
    version: LanguageVersion,
) -> Cursor<'_> {
    let mut c = c;
    while modifier_at(c, scope, version).is_some() {
        c = c.next();
    }
    c
}

/// `record X`, `record class X` or `record struct X` with records enabled.
pub(crate) fn is_record_start(c: Cursor<'_>, version: LanguageVersion) -> bool {
    if !c.is_contextual(SyntaxKind::RecordKeyword) || !version.supports_records() {
        return false;
    }
    let next = c.next();
    match next.kind() {
        SyntaxKind::IdentifierToken => true,
        SyntaxKind::ClassKeyword | SyntaxKind::StructKeyword => next.next().is_ident(),
        _ => false,
    }
}

pub(crate) fn is_type_declaration_start(c: Cursor<'_>, version: LanguageVersion) -> bool {
    match c.kind() {
        SyntaxKind::ClassKeyword
        | SyntaxKind::StructKeyword
        | SyntaxKind::InterfaceKeyword
        | SyntaxKind::EnumKeyword => true,
        SyntaxKind::DelegateKeyword => c.nth(1) != SyntaxKind::AsteriskToken,
        SyntaxKind::IdentifierToken => is_record_start(c, version),
        _ => false,
    }
}

/// `Type Name(` or `Type Name<`.
pub(crate) fn is_local_function_shape(c: Cursor<'_>) -> bool {
    match scan_type(c) {
        Some(after) if after.is_ident() => matches!(
            after.nth(1),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ),
        _ => false,
    }
}

/// Skip a balanced `(...)`, `[...]` or `{...}` group starting at `c`.
pub(crate) fn skip_balanced(c: Cursor<'_>) -> Cursor<'_> {
    let (open, close) = match c.kind() {
        SyntaxKind::OpenParenToken => (SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken),
        SyntaxKind::OpenBracketToken => {
            (SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken)
        }
        SyntaxKind::OpenBraceToken => (SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken),
        _ => return c,
    };
    let mut depth = 0usize;
    let mut c = c;
    loop {
        let kind = c.kind();
        if kind == SyntaxKind::EndOfFileToken {
            return c;
        }
        c = c.next();
        if kind == open {
            depth += 1;
        } else if kind == close {
            depth -= 1;
            if depth == 0 {
                return c;
            }
        }
    }
}

/// Modifiers a local function may carry.
pub(crate) fn is_local_function_modifier(c: Cursor<'_>) -> bool {
    match c.kind() {
        SyntaxKind::StaticKeyword | SyntaxKind::ExternKeyword => true,
        SyntaxKind::UnsafeKeyword => !c.next().is(SyntaxKind::OpenBraceToken),
        SyntaxKind::IdentifierToken if c.contextual() == SyntaxKind::AsyncKeyword => {
            let next = c.next();
            matches!(
                next.kind(),
                SyntaxKind::StaticKeyword | SyntaxKind::ExternKeyword | SyntaxKind::UnsafeKeyword
            ) || next.is_contextual(SyntaxKind::AsyncKeyword)
                || is_local_function_shape(next)
        }
        _ => false,
    }
}

pub(crate) fn skip_local_function_modifiers(c: Cursor<'_>) -> Cursor<'_> {
    let mut c = c;
    while is_local_function_modifier(c) {
        c = c.next();
    }
    c
}
