use crate::diagnostics::ErrorCode;
use crate::lexer::Token;
use crate::syntax_kind::SyntaxKind;

use super::expressions::can_start_expression;
use super::lookahead::{self, Cursor};
use super::Parser;

/// How a type is being parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TypeMode {
    Normal,
    /// After `is`/`as`: a `?` may start a conditional and `*` is multiplication.
    Expression,
    /// Element type of an array creation; rank specifiers belong to the caller.
    ArrayCreation,
}

impl Parser<'_> {
    pub(super) fn parse_type(&mut self) {
        self.parse_type_ex(TypeMode::Normal);
    }

    pub(super) fn parse_type_ex(&mut self, mode: TypeMode) {
        self.guarded(|p| p.type_inner(mode));
    }

    fn type_inner(&mut self, mode: TypeMode) {
        let checkpoint = self.checkpoint();
        match self.current() {
            kind if kind.is_predefined_type() => {
                self.start_node(SyntaxKind::PredefinedType);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IdentifierToken => self.parse_name_ex(true),
            SyntaxKind::DelegateKeyword if self.nth(1) == SyntaxKind::AsteriskToken => {
                self.parse_function_pointer_type();
            }
            SyntaxKind::OpenParenToken => self.parse_tuple_type(),
            SyntaxKind::RefKeyword => {
                // `ref T` and `ref readonly T` take no suffixes of their own.
                self.start_node(SyntaxKind::RefType);
                self.bump();
                self.eat(SyntaxKind::ReadOnlyKeyword);
                self.parse_type_ex(mode);
                self.finish_node();
                return;
            }
            _ => {
                let range = self.missing_range();
                self.error(ErrorCode::TypeExpected, range);
                self.start_node(SyntaxKind::IdentifierName);
                self.missing(SyntaxKind::IdentifierToken);
                self.finish_node();
                // `[]`, `*` and `?` still attach to the missing type.
                if !self.at_type_suffix() {
                    return;
                }
            }
        }

        loop {
            match self.current() {
                SyntaxKind::QuestionToken => {
                    if mode == TypeMode::Expression && can_start_expression(self.nth(1)) {
                        break;
                    }
                    self.start_node_at(checkpoint, SyntaxKind::NullableType);
                    self.bump();
                    self.finish_node();
                }
                SyntaxKind::AsteriskToken if mode == TypeMode::Normal => {
                    self.start_node_at(checkpoint, SyntaxKind::PointerType);
                    self.bump();
                    self.finish_node();
                }
                SyntaxKind::OpenBracketToken
                    if mode != TypeMode::ArrayCreation && self.at_omitted_rank_specifier() =>
                {
                    self.start_node_at(checkpoint, SyntaxKind::ArrayType);
                    while self.at_omitted_rank_specifier() {
                        self.parse_omitted_rank_specifier();
                    }
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    /// `?`, `*` or an omitted rank specifier.
    pub(super) fn at_type_suffix(&self) -> bool {
        match self.current() {
            SyntaxKind::QuestionToken | SyntaxKind::AsteriskToken => true,
            SyntaxKind::OpenBracketToken => self.at_omitted_rank_specifier(),
            _ => false,
        }
    }

    /// `[]`, `[,]`, ...
    fn at_omitted_rank_specifier(&self) -> bool {
        let c = self.lookahead();
        if !c.is(SyntaxKind::OpenBracketToken) {
            return false;
        }
        let mut c = c.next();
        while c.is(SyntaxKind::CommaToken) {
            c = c.next();
        }
        c.is(SyntaxKind::CloseBracketToken)
    }

    fn parse_omitted_rank_specifier(&mut self) {
        self.start_node(SyntaxKind::ArrayRankSpecifier);
        self.bump();
        loop {
            self.builder
                .start_node(SyntaxKind::OmittedArraySizeExpression.into());
            self.builder.finish_node();
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect(SyntaxKind::CloseBracketToken);
        self.finish_node();
    }

    /// `(int, string)` or `(int count, string name)`.
    fn parse_tuple_type(&mut self) {
        self.start_node(SyntaxKind::TupleType);
        self.bump();
        loop {
            self.start_node(SyntaxKind::TupleElement);
            self.parse_type();
            if self.at_ident() {
                self.bump();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect(SyntaxKind::CloseParenToken);
        self.finish_node();
    }

    /// `delegate*<int, void>`
    fn parse_function_pointer_type(&mut self) {
        self.start_node(SyntaxKind::FunctionPointerType);
        self.bump();
        self.bump();
        self.start_node(SyntaxKind::FunctionPointerParameterList);
        if self.expect(SyntaxKind::LessThanToken) {
            loop {
                self.start_node(SyntaxKind::FunctionPointerParameter);
                while matches!(
                    self.current(),
                    SyntaxKind::RefKeyword | SyntaxKind::InKeyword | SyntaxKind::OutKeyword
                ) {
                    self.bump();
                }
                self.parse_type();
                self.finish_node();
                if !self.eat(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.expect_greater_than();
        }
        self.finish_node();
        self.finish_node();
    }

    /// A possibly qualified name in a type or namespace position.
    pub(super) fn parse_name(&mut self) {
        self.parse_name_ex(true);
    }

    pub(super) fn parse_name_ex(&mut self, type_context: bool) {
        let checkpoint = self.checkpoint();
        let generic = self.parse_simple_name(type_context);

        if self.at(SyntaxKind::ColonColonToken) && !generic && self.nth(1) == SyntaxKind::IdentifierToken
        {
            self.start_node_at(checkpoint, SyntaxKind::AliasQualifiedName);
            self.bump();
            self.parse_simple_name(type_context);
            self.finish_node();
        }

        loop {
            if self.nth(1) != SyntaxKind::IdentifierToken {
                break;
            }
            match self.current() {
                SyntaxKind::DotToken => {
                    self.start_node_at(checkpoint, SyntaxKind::QualifiedName);
                    self.bump();
                    self.parse_simple_name(type_context);
                    self.finish_node();
                }
                SyntaxKind::ColonColonToken => {
                    self.error_here(ErrorCode::UnexpectedAliasedName);
                    self.start_node_at(checkpoint, SyntaxKind::AliasQualifiedName);
                    self.bump();
                    self.parse_simple_name(type_context);
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    /// `Name` or `Name<...>`. Returns whether a generic name was built.
    pub(super) fn parse_simple_name(&mut self, type_context: bool) -> bool {
        if !self.at_ident() {
            self.parse_identifier_name();
            return false;
        }
        let generic = self.nth(1) == SyntaxKind::LessThanToken
            && (type_context || self.at_generic_name_in_expression());
        if generic {
            self.start_node(SyntaxKind::GenericName);
            self.bump();
            self.parse_type_argument_list();
            self.finish_node();
        } else {
            self.parse_identifier_name();
        }
        generic
    }

    /// `IdentifierName` around the current identifier, or around a missing one.
    pub(super) fn parse_identifier_name(&mut self) {
        self.start_node(SyntaxKind::IdentifierName);
        self.expect_identifier();
        self.finish_node();
    }

    /// In an expression, `a<b>` is a generic name only when the token after
    /// the closing `>` could not continue a relational expression.
    pub(super) fn at_generic_name_in_expression(&self) -> bool {
        let after_name = self.lookahead().next();
        let Some(after) = lookahead::scan_type_argument_list(after_name) else {
            return false;
        };
        matches!(
            after.kind(),
            SyntaxKind::OpenParenToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::ColonToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CommaToken
                | SyntaxKind::DotToken
                | SyntaxKind::QuestionToken
                | SyntaxKind::EqualsEqualsToken
                | SyntaxKind::ExclamationEqualsToken
                | SyntaxKind::BarToken
                | SyntaxKind::CaretToken
                | SyntaxKind::AmpersandAmpersandToken
                | SyntaxKind::BarBarToken
                | SyntaxKind::AmpersandToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::EndOfFileToken
        )
    }

    fn parse_type_argument_list(&mut self) {
        self.start_node(SyntaxKind::TypeArgumentList);
        self.bump();
        loop {
            if !matches!(
                self.current(),
                SyntaxKind::CommaToken | SyntaxKind::GreaterThanToken
            ) {
                self.parse_type();
            }
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect_greater_than();
        self.finish_node();
    }

    /// Expect `>`, splitting `>>`, `>>>`, `>=` and friends when needed.
    pub(super) fn expect_greater_than(&mut self) -> bool {
        let rest = match self.current() {
            SyntaxKind::GreaterThanToken => None,
            SyntaxKind::GreaterThanGreaterThanToken => Some(SyntaxKind::GreaterThanToken),
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
                Some(SyntaxKind::GreaterThanGreaterThanToken)
            }
            SyntaxKind::GreaterThanEqualsToken => Some(SyntaxKind::EqualsToken),
            SyntaxKind::GreaterThanGreaterThanEqualsToken => {
                Some(SyntaxKind::GreaterThanEqualsToken)
            }
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => {
                Some(SyntaxKind::GreaterThanGreaterThanEqualsToken)
            }
            _ => return self.expect(SyntaxKind::GreaterThanToken),
        };
        if let Some(rest) = rest {
            self.split_current(SyntaxKind::GreaterThanToken, rest);
        }
        self.bump();
        true
    }

    /// Replace the current one-byte-prefixed compound token by `first` and `rest`.
    pub(super) fn split_current(&mut self, first: SyntaxKind, rest: SyntaxKind) {
        let idx = lookahead::skip_trivia(&self.tokens, 0);
        let Some(tok) = self.tokens.get(idx).copied() else {
            return;
        };
        let start = tok.range.start as usize;
        let end = tok.range.end as usize;
        self.tokens[idx] = Token::new(first, start, start + 1);
        self.tokens.insert(idx + 1, Token::new(rest, start + 1, end));
    }

    /// `I.`, `I<T>.`, `N.I.`, `N::I.` (and the malformed `I::`, `I..`) ahead.
    pub(super) fn at_explicit_interface_specifier(&self) -> bool {
        segment_then_separator(self.lookahead())
    }

    pub(super) fn parse_explicit_interface_specifier(&mut self) {
        self.start_node(SyntaxKind::ExplicitInterfaceSpecifier);
        let checkpoint = self.checkpoint();
        let mut simple = !self.parse_simple_name(true);

        loop {
            if self.at(SyntaxKind::DotDotToken) {
                self.split_current(SyntaxKind::DotToken, SyntaxKind::DotToken);
            }
            let continues = segment_then_separator(self.lookahead().next());
            match self.current() {
                SyntaxKind::ColonColonToken => {
                    if !(simple && continues) {
                        self.error_here(ErrorCode::UnexpectedAliasedName);
                    }
                    if !continues {
                        self.bump();
                        break;
                    }
                    self.start_node_at(checkpoint, SyntaxKind::AliasQualifiedName);
                    self.bump();
                    self.parse_simple_name(true);
                    self.finish_node();
                }
                SyntaxKind::DotToken if continues => {
                    self.start_node_at(checkpoint, SyntaxKind::QualifiedName);
                    self.bump();
                    self.parse_simple_name(true);
                    self.finish_node();
                }
                SyntaxKind::DotToken
                    if matches!(self.nth(1), SyntaxKind::DotToken | SyntaxKind::DotDotToken) =>
                {
                    self.start_node_at(checkpoint, SyntaxKind::QualifiedName);
                    self.bump();
                    self.parse_identifier_name();
                    self.finish_node();
                }
                SyntaxKind::DotToken => {
                    self.bump();
                    break;
                }
                _ => {
                    self.expect(SyntaxKind::DotToken);
                    break;
                }
            }
            simple = false;
        }
        self.finish_node();
    }
}

/// `ident` (with optional type arguments) followed by `.`, `::` or `..`.
fn segment_then_separator(c: Cursor<'_>) -> bool {
    if !c.is_ident() {
        return false;
    }
    let mut after = c.next();
    if after.is(SyntaxKind::LessThanToken) {
        match lookahead::scan_type_argument_list(after) {
            Some(next) => after = next,
            None => return false,
        }
    }
    matches!(
        after.kind(),
        SyntaxKind::DotToken | SyntaxKind::ColonColonToken | SyntaxKind::DotDotToken
    )
}
