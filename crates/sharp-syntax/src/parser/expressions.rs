use rowan::Checkpoint;

use crate::diagnostics::ErrorCode;
use crate::syntax_kind::SyntaxKind;

use super::lookahead;
use super::names::TypeMode;
use super::Parser;

/// Binding power of prefix operators, casts and `await`.
const PREFIX_BP: u8 = 90;

pub(super) fn can_start_expression(kind: SyntaxKind) -> bool {
    match kind {
        SyntaxKind::IdentifierToken
        | SyntaxKind::NumericLiteralToken
        | SyntaxKind::CharacterLiteralToken
        | SyntaxKind::StringLiteralToken
        | SyntaxKind::InterpolatedStringToken
        | SyntaxKind::TrueKeyword
        | SyntaxKind::FalseKeyword
        | SyntaxKind::NullKeyword
        | SyntaxKind::ThisKeyword
        | SyntaxKind::BaseKeyword
        | SyntaxKind::NewKeyword
        | SyntaxKind::TypeOfKeyword
        | SyntaxKind::DefaultKeyword
        | SyntaxKind::OpenParenToken
        | SyntaxKind::PlusToken
        | SyntaxKind::MinusToken
        | SyntaxKind::ExclamationToken
        | SyntaxKind::TildeToken
        | SyntaxKind::PlusPlusToken
        | SyntaxKind::MinusMinusToken
        | SyntaxKind::AmpersandToken
        | SyntaxKind::AsteriskToken
        | SyntaxKind::RefKeyword => true,
        kind => kind.is_predefined_type() && kind != SyntaxKind::VoidKeyword,
    }
}

impl Parser<'_> {
    pub(super) fn parse_expression(&mut self) {
        self.parse_expression_bp(0);
    }

    fn parse_expression_bp(&mut self, min_bp: u8) {
        self.guarded(|p| p.expression_inner(min_bp));
    }

    fn expression_inner(&mut self, min_bp: u8) {
        let checkpoint = self.checkpoint();
        if self.at_lambda_start() {
            self.parse_lambda(checkpoint);
            return;
        }

        match self.current() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::AsteriskToken => {
                self.start_node(SyntaxKind::PrefixUnaryExpression);
                self.bump();
                self.parse_expression_bp(PREFIX_BP);
                self.finish_node();
            }
            SyntaxKind::RefKeyword => {
                self.start_node(SyntaxKind::RefExpression);
                self.bump();
                self.parse_expression_bp(PREFIX_BP);
                self.finish_node();
            }
            SyntaxKind::IdentifierToken
                if self.at_contextual(SyntaxKind::AwaitKeyword)
                    && can_start_expression(self.nth(1)) =>
            {
                self.start_node(SyntaxKind::AwaitExpression);
                self.bump_as(SyntaxKind::AwaitKeyword);
                self.parse_expression_bp(PREFIX_BP);
                self.finish_node();
            }
            SyntaxKind::OpenParenToken if self.at_cast() => {
                self.start_node(SyntaxKind::CastExpression);
                self.bump();
                self.parse_type();
                self.expect(SyntaxKind::CloseParenToken);
                self.parse_expression_bp(PREFIX_BP);
                self.finish_node();
            }
            _ => {
                self.parse_primary();
                self.parse_postfix(checkpoint);
            }
        }

        loop {
            let op = self.current();

            if matches!(op, SyntaxKind::IsKeyword | SyntaxKind::AsKeyword) {
                if RELATIONAL_BP < min_bp {
                    break;
                }
                let kind = if op == SyntaxKind::IsKeyword {
                    SyntaxKind::IsExpression
                } else {
                    SyntaxKind::AsExpression
                };
                self.start_node_at(checkpoint, kind);
                self.bump();
                self.parse_type_ex(TypeMode::Expression);
                self.finish_node();
                continue;
            }

            if let Some((l_bp, r_bp, kind)) = infix_binding_power(op) {
                if l_bp < min_bp {
                    break;
                }
                self.start_node_at(checkpoint, kind);
                self.bump();
                self.parse_expression_bp(r_bp);
                self.finish_node();
                continue;
            }

            if op == SyntaxKind::QuestionToken {
                let (l_bp, r_bp) = (2, 1);
                if l_bp < min_bp {
                    break;
                }
                self.start_node_at(checkpoint, SyntaxKind::ConditionalExpression);
                self.bump();
                self.parse_expression();
                self.expect(SyntaxKind::ColonToken);
                self.parse_expression_bp(r_bp);
                self.finish_node();
                continue;
            }

            break;
        }
    }

    fn parse_primary(&mut self) {
        let literal = match self.current() {
            SyntaxKind::NumericLiteralToken => Some(SyntaxKind::NumericLiteralExpression),
            SyntaxKind::StringLiteralToken => Some(SyntaxKind::StringLiteralExpression),
            SyntaxKind::CharacterLiteralToken => Some(SyntaxKind::CharacterLiteralExpression),
            SyntaxKind::InterpolatedStringToken => Some(SyntaxKind::InterpolatedStringExpression),
            SyntaxKind::TrueKeyword => Some(SyntaxKind::TrueLiteralExpression),
            SyntaxKind::FalseKeyword => Some(SyntaxKind::FalseLiteralExpression),
            SyntaxKind::NullKeyword => Some(SyntaxKind::NullLiteralExpression),
            SyntaxKind::ThisKeyword => Some(SyntaxKind::ThisExpression),
            SyntaxKind::BaseKeyword => Some(SyntaxKind::BaseExpression),
            SyntaxKind::DefaultKeyword if self.nth(1) != SyntaxKind::OpenParenToken => {
                Some(SyntaxKind::DefaultLiteralExpression)
            }
            _ => None,
        };
        if let Some(kind) = literal {
            self.start_node(kind);
            self.bump();
            self.finish_node();
            return;
        }

        match self.current() {
            SyntaxKind::IdentifierToken => {
                self.parse_simple_name(false);
            }
            SyntaxKind::OpenParenToken => {
                self.start_node(SyntaxKind::ParenthesizedExpression);
                self.bump();
                self.parse_expression();
                self.expect(SyntaxKind::CloseParenToken);
                self.finish_node();
            }
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::TypeOfKeyword | SyntaxKind::DefaultKeyword => {
                let kind = if self.at(SyntaxKind::TypeOfKeyword) {
                    SyntaxKind::TypeOfExpression
                } else {
                    SyntaxKind::DefaultExpression
                };
                self.start_node(kind);
                self.bump();
                self.expect(SyntaxKind::OpenParenToken);
                self.parse_type();
                self.expect(SyntaxKind::CloseParenToken);
                self.finish_node();
            }
            kind if kind.is_predefined_type() => {
                self.start_node(SyntaxKind::PredefinedType);
                self.bump();
                self.finish_node();
            }
            _ => {
                self.report_invalid_expression_term();
                self.start_node(SyntaxKind::IdentifierName);
                self.missing(SyntaxKind::IdentifierToken);
                self.finish_node();
            }
        }
    }

    /// `ERR_InvalidExprTerm` for the current token, which is left in place.
    pub(super) fn report_invalid_expression_term(&mut self) {
        let text = self.current_text();
        let range = if self.at(SyntaxKind::EndOfFileToken) {
            self.missing_range()
        } else {
            self.current_range()
        };
        self.error_with_args(ErrorCode::InvalidExprTerm, range, &[text]);
    }

    fn parse_postfix(&mut self, checkpoint: Checkpoint) {
        loop {
            match self.current() {
                SyntaxKind::DotToken => {
                    self.start_node_at(checkpoint, SyntaxKind::SimpleMemberAccessExpression);
                    self.bump();
                    self.parse_simple_name(false);
                    self.finish_node();
                }
                SyntaxKind::OpenParenToken => {
                    self.start_node_at(checkpoint, SyntaxKind::InvocationExpression);
                    self.parse_argument_list();
                    self.finish_node();
                }
                SyntaxKind::OpenBracketToken => {
                    self.start_node_at(checkpoint, SyntaxKind::ElementAccessExpression);
                    self.parse_bracketed_argument_list();
                    self.finish_node();
                }
                SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                    self.start_node_at(checkpoint, SyntaxKind::PostfixUnaryExpression);
                    self.bump();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    /// `(T)x`: a parenthesized type followed by something that can only be
    /// an operand.
    fn at_cast(&self) -> bool {
        let inner = self.lookahead().next();
        let Some(after) = lookahead::scan_type(inner) else {
            return false;
        };
        if !after.is(SyntaxKind::CloseParenToken) {
            return false;
        }
        let next = after.next().kind();
        if inner.kind().is_predefined_type() {
            return can_start_expression(next);
        }
        matches!(
            next,
            SyntaxKind::IdentifierToken
                | SyntaxKind::NumericLiteralToken
                | SyntaxKind::CharacterLiteralToken
                | SyntaxKind::StringLiteralToken
                | SyntaxKind::InterpolatedStringToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::ThisKeyword
                | SyntaxKind::BaseKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TildeToken
        ) || next.is_predefined_type()
    }

    // --- lambdas ---

    fn at_lambda_start(&self) -> bool {
        let mut c = self.lookahead();
        if c.is_contextual(SyntaxKind::AsyncKeyword)
            && matches!(
                c.nth(1),
                SyntaxKind::IdentifierToken | SyntaxKind::OpenParenToken
            )
        {
            c = c.next();
        }
        match c.kind() {
            SyntaxKind::IdentifierToken if c.nth(1) == SyntaxKind::EqualsGreaterThanToken => true,
            SyntaxKind::OpenParenToken => {
                lookahead::skip_balanced(c).is(SyntaxKind::EqualsGreaterThanToken)
            }
            _ => match lookahead::scan_type(c) {
                // Explicit return type: `T (x) => ...`.
                Some(after) if after.is(SyntaxKind::OpenParenToken) => {
                    lookahead::skip_balanced(after).is(SyntaxKind::EqualsGreaterThanToken)
                }
                _ => false,
            },
        }
    }

    fn parse_lambda(&mut self, checkpoint: Checkpoint) {
        let is_async = self.at_contextual(SyntaxKind::AsyncKeyword)
            && self.nth(1) != SyntaxKind::EqualsGreaterThanToken;
        let offset = usize::from(is_async);
        let simple = self.lookahead().nth(offset) == SyntaxKind::IdentifierToken
            && self.lookahead().nth(offset + 1) == SyntaxKind::EqualsGreaterThanToken;

        if simple {
            self.start_node_at(checkpoint, SyntaxKind::SimpleLambdaExpression);
            if is_async {
                self.bump_as(SyntaxKind::AsyncKeyword);
            }
            self.start_node(SyntaxKind::Parameter);
            self.bump();
            self.finish_node();
        } else {
            self.start_node_at(checkpoint, SyntaxKind::ParenthesizedLambdaExpression);
            if is_async {
                self.bump_as(SyntaxKind::AsyncKeyword);
            }
            if !self.at(SyntaxKind::OpenParenToken) {
                self.parse_type();
            }
            self.parse_lambda_parameter_list();
        }
        self.expect(SyntaxKind::EqualsGreaterThanToken);
        if self.at(SyntaxKind::OpenBraceToken) {
            self.parse_block();
        } else {
            self.parse_expression();
        }
        self.finish_node();
    }

    fn parse_lambda_parameter_list(&mut self) {
        self.start_node(SyntaxKind::ParameterList);
        self.expect(SyntaxKind::OpenParenToken);
        while !self.at(SyntaxKind::CloseParenToken) && !self.at(SyntaxKind::EndOfFileToken) {
            self.start_node(SyntaxKind::Parameter);
            self.parse_attribute_lists();
            while matches!(
                self.current(),
                SyntaxKind::RefKeyword
                    | SyntaxKind::OutKeyword
                    | SyntaxKind::InKeyword
                    | SyntaxKind::ParamsKeyword
            ) {
                self.bump();
            }
            let typed = matches!(
                lookahead::scan_type(self.lookahead()),
                Some(after) if after.is_ident()
            );
            if typed {
                self.parse_type();
            }
            self.expect_identifier();
            if self.at(SyntaxKind::EqualsToken) {
                self.parse_equals_value_clause();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect(SyntaxKind::CloseParenToken);
        self.finish_node();
    }

    // --- object and array creation ---

    fn parse_new_expression(&mut self) {
        match self.nth(1) {
            SyntaxKind::OpenParenToken => {
                self.start_node(SyntaxKind::ImplicitObjectCreationExpression);
                self.bump();
                self.parse_argument_list();
                if self.at(SyntaxKind::OpenBraceToken) {
                    self.parse_initializer(SyntaxKind::ObjectInitializerExpression);
                }
                self.finish_node();
            }
            SyntaxKind::OpenBracketToken => {
                self.start_node(SyntaxKind::ArrayCreationExpression);
                self.bump();
                self.parse_sized_rank_specifier();
                if self.at(SyntaxKind::OpenBraceToken) {
                    self.parse_initializer(SyntaxKind::ArrayInitializerExpression);
                }
                self.finish_node();
            }
            _ => {
                let checkpoint = self.checkpoint();
                self.bump();
                let type_checkpoint = self.checkpoint();
                self.parse_type_ex(TypeMode::ArrayCreation);
                if self.at(SyntaxKind::OpenBracketToken) {
                    self.start_node_at(checkpoint, SyntaxKind::ArrayCreationExpression);
                    self.start_node_at(type_checkpoint, SyntaxKind::ArrayType);
                    while self.at(SyntaxKind::OpenBracketToken) {
                        self.parse_sized_rank_specifier();
                    }
                    self.finish_node();
                    if self.at(SyntaxKind::OpenBraceToken) {
                        self.parse_initializer(SyntaxKind::ArrayInitializerExpression);
                    }
                } else {
                    self.start_node_at(checkpoint, SyntaxKind::ObjectCreationExpression);
                    if self.at(SyntaxKind::OpenParenToken) {
                        self.parse_argument_list();
                    }
                    if self.at(SyntaxKind::OpenBraceToken) {
                        self.parse_initializer(SyntaxKind::ObjectInitializerExpression);
                    }
                }
                self.finish_node();
            }
        }
    }

    /// `[5]`, `[n, m]` or `[,]` in an array creation.
    fn parse_sized_rank_specifier(&mut self) {
        self.start_node(SyntaxKind::ArrayRankSpecifier);
        self.bump();
        loop {
            if matches!(
                self.current(),
                SyntaxKind::CommaToken | SyntaxKind::CloseBracketToken
            ) {
                self.builder
                    .start_node(SyntaxKind::OmittedArraySizeExpression.into());
                self.builder.finish_node();
            } else {
                self.parse_expression();
            }
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect(SyntaxKind::CloseBracketToken);
        self.finish_node();
    }

    fn parse_initializer(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.guarded(|p| {
            while !p.at(SyntaxKind::CloseBraceToken) && !p.at(SyntaxKind::EndOfFileToken) {
                p.parse_variable_initializer();
                if !p.eat(SyntaxKind::CommaToken) {
                    break;
                }
            }
        });
        self.expect(SyntaxKind::CloseBraceToken);
        self.finish_node();
    }

    /// An expression or a nested `{ ... }` initializer.
    pub(super) fn parse_variable_initializer(&mut self) {
        if self.at(SyntaxKind::OpenBraceToken) {
            self.parse_initializer(SyntaxKind::ArrayInitializerExpression);
        } else {
            self.parse_expression();
        }
    }

    // --- arguments ---

    pub(super) fn parse_argument_list(&mut self) {
        self.start_node(SyntaxKind::ArgumentList);
        if self.expect(SyntaxKind::OpenParenToken) {
            self.parse_arguments(SyntaxKind::CloseParenToken);
        }
        self.expect(SyntaxKind::CloseParenToken);
        self.finish_node();
    }

    pub(super) fn parse_bracketed_argument_list(&mut self) {
        self.start_node(SyntaxKind::BracketedArgumentList);
        self.bump();
        self.parse_arguments(SyntaxKind::CloseBracketToken);
        self.expect(SyntaxKind::CloseBracketToken);
        self.finish_node();
    }

    fn parse_arguments(&mut self, close: SyntaxKind) {
        while !self.at(close) && !self.at(SyntaxKind::EndOfFileToken) {
            self.start_node(SyntaxKind::Argument);
            if matches!(
                self.current(),
                SyntaxKind::RefKeyword | SyntaxKind::OutKeyword | SyntaxKind::InKeyword
            ) {
                self.bump();
            }
            self.parse_expression();
            self.finish_node();
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
    }
}

/// `<`, `>`, `<=`, `>=`, `is` and `as`.
const RELATIONAL_BP: u8 = 50;

fn infix_binding_power(op: SyntaxKind) -> Option<(u8, u8, SyntaxKind)> {
    // Returns (left_bp, right_bp, node_kind). Larger binds tighter.
    let (l, r, kind) = match op {
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            (70, 71, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => (60, 61, SyntaxKind::BinaryExpression),
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
            (55, 56, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::LessThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::GreaterThanEqualsToken => {
            (RELATIONAL_BP, RELATIONAL_BP + 1, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => {
            (45, 46, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::AmpersandToken => (40, 41, SyntaxKind::BinaryExpression),
        SyntaxKind::CaretToken => (39, 40, SyntaxKind::BinaryExpression),
        SyntaxKind::BarToken => (38, 39, SyntaxKind::BinaryExpression),
        SyntaxKind::AmpersandAmpersandToken => (30, 31, SyntaxKind::BinaryExpression),
        SyntaxKind::BarBarToken => (20, 21, SyntaxKind::BinaryExpression),
        // Right-associative.
        SyntaxKind::QuestionQuestionToken => (15, 14, SyntaxKind::BinaryExpression),

        SyntaxKind::EqualsToken => (1, 0, SyntaxKind::SimpleAssignmentExpression),
        SyntaxKind::PlusEqualsToken
        | SyntaxKind::MinusEqualsToken
        | SyntaxKind::AsteriskEqualsToken
        | SyntaxKind::SlashEqualsToken
        | SyntaxKind::PercentEqualsToken
        | SyntaxKind::AmpersandEqualsToken
        | SyntaxKind::BarEqualsToken
        | SyntaxKind::CaretEqualsToken
        | SyntaxKind::LessThanLessThanEqualsToken
        | SyntaxKind::GreaterThanGreaterThanEqualsToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
        | SyntaxKind::QuestionQuestionEqualsToken => {
            (1, 0, SyntaxKind::CompoundAssignmentExpression)
        }

        _ => return None,
    };
    Some((l, r, kind))
}
