use crate::diagnostics::ErrorCode;
use crate::syntax_kind::SyntaxKind;

use super::expressions::can_start_expression;
use super::lookahead::{self, Cursor};
use super::Parser;

/// Whether a statement can begin at `c`.
pub(super) fn can_start_statement(c: Cursor<'_>) -> bool {
    match c.kind() {
        SyntaxKind::OpenBraceToken
        | SyntaxKind::SemicolonToken
        | SyntaxKind::IfKeyword
        | SyntaxKind::WhileKeyword
        | SyntaxKind::DoKeyword
        | SyntaxKind::ForKeyword
        | SyntaxKind::ForEachKeyword
        | SyntaxKind::ReturnKeyword
        | SyntaxKind::BreakKeyword
        | SyntaxKind::ContinueKeyword
        | SyntaxKind::ThrowKeyword
        | SyntaxKind::TryKeyword
        | SyntaxKind::SwitchKeyword
        | SyntaxKind::UsingKeyword
        | SyntaxKind::LockKeyword
        | SyntaxKind::ConstKeyword => true,
        kind => can_start_expression(kind) || lookahead::is_local_function_modifier(c),
    }
}

/// Tokens that end a variable declarator list without being part of it.
fn is_declarator_terminator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::SemicolonToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::EqualsGreaterThanToken
            | SyntaxKind::EndOfFileToken
            | SyntaxKind::InKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::DelegateKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ForEachKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::UsingKeyword
            | SyntaxKind::LockKeyword
    ) || (kind.is_non_contextual_modifier() && kind != SyntaxKind::ReadOnlyKeyword)
}

impl Parser<'_> {
    pub(super) fn parse_statement(&mut self) {
        self.guarded(|p| p.statement_inner());
    }

    fn statement_inner(&mut self) {
        match self.current() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                self.start_node(SyntaxKind::EmptyStatement);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => {
                self.start_node(SyntaxKind::WhileStatement);
                self.bump();
                self.parse_parenthesized_condition();
                self.parse_embedded_statement();
                self.finish_node();
            }
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ForEachKeyword => self.parse_foreach_statement(),
            SyntaxKind::ReturnKeyword => self.parse_jump_with_expression(SyntaxKind::ReturnStatement),
            SyntaxKind::ThrowKeyword => self.parse_jump_with_expression(SyntaxKind::ThrowStatement),
            SyntaxKind::BreakKeyword => self.parse_jump(SyntaxKind::BreakStatement),
            SyntaxKind::ContinueKeyword => self.parse_jump(SyntaxKind::ContinueStatement),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::LockKeyword => {
                self.start_node(SyntaxKind::LockStatement);
                self.bump();
                self.parse_parenthesized_condition();
                self.parse_embedded_statement();
                self.finish_node();
            }
            SyntaxKind::UsingKeyword => self.parse_using_statement(),
            SyntaxKind::ConstKeyword => {
                let checkpoint = self.checkpoint();
                self.bump();
                self.parse_local_declaration(checkpoint);
            }
            _ if lookahead::is_local_function_modifier(self.lookahead()) => {
                let checkpoint = self.checkpoint();
                self.parse_local_function_modifiers();
                if lookahead::is_local_function_shape(self.lookahead()) {
                    self.parse_local_function(checkpoint);
                } else {
                    self.parse_local_declaration(checkpoint);
                }
            }
            SyntaxKind::IdentifierToken
                if self.at_contextual(SyntaxKind::AwaitKeyword)
                    && can_start_expression(self.nth(1)) =>
            {
                self.parse_expression_statement();
            }
            kind if kind == SyntaxKind::IdentifierToken || kind.is_predefined_type() => {
                self.parse_declaration_or_expression_statement();
            }
            // `ref int r = ref x;`, `(int, int) t = default;` and local functions returning them.
            SyntaxKind::RefKeyword | SyntaxKind::OpenParenToken
                if matches!(lookahead::scan_type(self.lookahead()), Some(after) if after.is_ident()) =>
            {
                self.parse_declaration_or_expression_statement();
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_declaration_or_expression_statement(&mut self) {
        let c = self.lookahead();
        if lookahead::is_local_function_shape(c) {
            let checkpoint = self.checkpoint();
            self.parse_local_function(checkpoint);
            return;
        }
        let declaration = match lookahead::scan_type(c) {
            Some(after) => {
                after.is_ident()
                    || matches!(
                        after.kind(),
                        SyntaxKind::EndOfFileToken
                            | SyntaxKind::NamespaceKeyword
                            | SyntaxKind::ClassKeyword
                            | SyntaxKind::StructKeyword
                            | SyntaxKind::InterfaceKeyword
                            | SyntaxKind::EnumKeyword
                            | SyntaxKind::DelegateKeyword
                    )
            }
            None => false,
        };
        if declaration {
            let checkpoint = self.checkpoint();
            self.parse_local_declaration(checkpoint);
        } else {
            self.parse_expression_statement();
        }
    }

    /// Everything after the modifiers of a local declaration.
    fn parse_local_declaration(&mut self, checkpoint: rowan::Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::LocalDeclarationStatement);
        self.parse_variable_declaration();
        self.expect(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    fn parse_variable_declaration(&mut self) {
        self.start_node(SyntaxKind::VariableDeclaration);
        self.parse_type();
        self.parse_variable_declarators();
        self.finish_node();
    }

    fn parse_local_function(&mut self, checkpoint: rowan::Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::LocalFunctionStatement);
        self.parse_type();
        self.expect_identifier();
        if self.at(SyntaxKind::LessThanToken) {
            self.parse_type_parameter_list();
        }
        self.parse_parameter_list();
        self.parse_constraint_clauses();
        self.parse_body_or_semicolon();
        self.finish_node();
    }

    /// Declarators of a field, event field or local: `a`, `b = 1`, `c[4]`.
    pub(super) fn parse_variable_declarators(&mut self) {
        loop {
            self.start_node(SyntaxKind::VariableDeclarator);
            self.expect_identifier();
            if self.at(SyntaxKind::OpenBracketToken) {
                self.parse_bracketed_argument_list();
            }
            if self.at(SyntaxKind::EqualsToken) {
                self.parse_equals_value_clause();
            }
            self.finish_node();

            if self.eat(SyntaxKind::CommaToken) {
                continue;
            }
            if is_declarator_terminator(self.current()) {
                break;
            }
            self.report_missing(SyntaxKind::CommaToken);
            if self.at_ident() {
                self.missing(SyntaxKind::CommaToken);
                continue;
            }
            self.start_node(SyntaxKind::SkippedTokens);
            while !self.at(SyntaxKind::CommaToken)
                && !self.at_ident()
                && !is_declarator_terminator(self.current())
            {
                self.bump_any();
            }
            self.finish_node();
            if self.eat(SyntaxKind::CommaToken) || self.at_ident() {
                continue;
            }
            break;
        }
    }

    fn parse_expression_statement(&mut self) {
        self.start_node(SyntaxKind::ExpressionStatement);
        self.parse_expression();
        self.expect(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    pub(super) fn parse_block(&mut self) {
        self.start_node(SyntaxKind::Block);
        if self.expect(SyntaxKind::OpenBraceToken) {
            self.guarded(|p| p.block_statements());
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.finish_node();
    }

    fn block_statements(&mut self) {
        loop {
            match self.current() {
                SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
                | SyntaxKind::NamespaceKeyword => break,
                _ if can_start_statement(self.lookahead()) => {
                    let pending = self.tokens.len();
                    self.parse_statement();
                    if self.tokens.len() == pending {
                        self.skip_invalid_statement_token();
                    }
                }
                _ => self.skip_invalid_statement_token(),
            }
        }
    }

    fn skip_invalid_statement_token(&mut self) {
        if self.at(SyntaxKind::EndOfFileToken) {
            return;
        }
        let text = self.current_text();
        let range = self.current_range();
        self.error_with_args(ErrorCode::InvalidExprTerm, range, &[text]);
        self.skip_token();
    }

    /// The body of `if`, `while`, `for`, ...: a missing statement becomes an
    /// expression statement with a missing name and a missing `;`.
    fn parse_embedded_statement(&mut self) {
        if can_start_statement(self.lookahead()) {
            self.parse_statement();
            return;
        }
        self.start_node(SyntaxKind::ExpressionStatement);
        self.report_invalid_expression_term();
        self.start_node(SyntaxKind::IdentifierName);
        self.missing(SyntaxKind::IdentifierToken);
        self.finish_node();
        self.expect(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    fn parse_parenthesized_condition(&mut self) {
        self.expect(SyntaxKind::OpenParenToken);
        self.parse_expression();
        self.expect(SyntaxKind::CloseParenToken);
    }

    fn parse_if_statement(&mut self) {
        self.start_node(SyntaxKind::IfStatement);
        self.bump();
        self.parse_parenthesized_condition();
        self.parse_embedded_statement();
        if self.at(SyntaxKind::ElseKeyword) {
            self.start_node(SyntaxKind::ElseClause);
            self.bump();
            self.parse_embedded_statement();
            self.finish_node();
        }
        self.finish_node();
    }

    fn parse_do_statement(&mut self) {
        self.start_node(SyntaxKind::DoStatement);
        self.bump();
        self.parse_embedded_statement();
        self.expect(SyntaxKind::WhileKeyword);
        self.parse_parenthesized_condition();
        self.expect(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    fn parse_for_statement(&mut self) {
        self.start_node(SyntaxKind::ForStatement);
        self.bump();
        self.expect(SyntaxKind::OpenParenToken);

        if !self.at(SyntaxKind::SemicolonToken) {
            let declaration =
                matches!(lookahead::scan_type(self.lookahead()), Some(after) if after.is_ident());
            if declaration {
                self.parse_variable_declaration();
            } else {
                self.parse_expression_list(SyntaxKind::SemicolonToken);
            }
        }
        self.expect(SyntaxKind::SemicolonToken);
        if !self.at(SyntaxKind::SemicolonToken) {
            self.parse_expression();
        }
        self.expect(SyntaxKind::SemicolonToken);
        if !self.at(SyntaxKind::CloseParenToken) {
            self.parse_expression_list(SyntaxKind::CloseParenToken);
        }
        self.expect(SyntaxKind::CloseParenToken);

        self.parse_embedded_statement();
        self.finish_node();
    }

    fn parse_expression_list(&mut self, close: SyntaxKind) {
        loop {
            self.parse_expression();
            if self.at(close) || !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
    }

    fn parse_foreach_statement(&mut self) {
        self.start_node(SyntaxKind::ForEachStatement);
        self.bump();
        self.expect(SyntaxKind::OpenParenToken);
        self.parse_type();
        self.expect_identifier();
        self.expect(SyntaxKind::InKeyword);
        self.parse_expression();
        self.expect(SyntaxKind::CloseParenToken);
        self.parse_embedded_statement();
        self.finish_node();
    }

    fn parse_jump(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.expect(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    fn parse_jump_with_expression(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        if !self.at(SyntaxKind::SemicolonToken) && can_start_expression(self.current()) {
            self.parse_expression();
        }
        self.expect(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    fn parse_try_statement(&mut self) {
        self.start_node(SyntaxKind::TryStatement);
        self.bump();
        self.parse_block();
        while self.at(SyntaxKind::CatchKeyword) {
            self.start_node(SyntaxKind::CatchClause);
            self.bump();
            if self.at(SyntaxKind::OpenParenToken) {
                self.start_node(SyntaxKind::CatchDeclaration);
                self.bump();
                self.parse_type();
                if self.at_ident() {
                    self.bump();
                }
                self.expect(SyntaxKind::CloseParenToken);
                self.finish_node();
            }
            self.parse_block();
            self.finish_node();
        }
        if self.at(SyntaxKind::FinallyKeyword) {
            self.start_node(SyntaxKind::FinallyClause);
            self.bump();
            self.parse_block();
            self.finish_node();
        }
        self.finish_node();
    }

    fn parse_switch_statement(&mut self) {
        self.start_node(SyntaxKind::SwitchStatement);
        self.bump();
        self.parse_parenthesized_condition();
        if self.expect(SyntaxKind::OpenBraceToken) {
            loop {
                match self.current() {
                    SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => break,
                    _ if self.at_switch_label() => self.parse_switch_section(),
                    _ => self.skip_invalid_statement_token(),
                }
            }
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.finish_node();
    }

    fn at_switch_label(&self) -> bool {
        match self.current() {
            SyntaxKind::CaseKeyword => true,
            SyntaxKind::DefaultKeyword => self.nth(1) == SyntaxKind::ColonToken,
            _ => false,
        }
    }

    fn parse_switch_section(&mut self) {
        self.start_node(SyntaxKind::SwitchSection);
        while self.at_switch_label() {
            if self.at(SyntaxKind::CaseKeyword) {
                self.start_node(SyntaxKind::CaseSwitchLabel);
                self.bump();
                self.parse_expression();
            } else {
                self.start_node(SyntaxKind::DefaultSwitchLabel);
                self.bump();
            }
            self.expect(SyntaxKind::ColonToken);
            self.finish_node();
        }
        loop {
            match self.current() {
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => break,
                _ if self.at_switch_label() => break,
                _ if can_start_statement(self.lookahead()) => {
                    let pending = self.tokens.len();
                    self.parse_statement();
                    if self.tokens.len() == pending {
                        self.skip_invalid_statement_token();
                    }
                }
                _ => self.skip_invalid_statement_token(),
            }
        }
        self.finish_node();
    }

    fn parse_using_statement(&mut self) {
        if self.nth(1) != SyntaxKind::OpenParenToken {
            // `using var x = ...;`
            let checkpoint = self.checkpoint();
            self.bump();
            self.parse_local_declaration(checkpoint);
            return;
        }
        self.start_node(SyntaxKind::UsingStatement);
        self.bump();
        self.bump();
        let declaration =
            matches!(lookahead::scan_type(self.lookahead()), Some(after) if after.is_ident());
        if declaration {
            self.parse_variable_declaration();
        } else {
            self.parse_expression();
        }
        self.expect(SyntaxKind::CloseParenToken);
        self.parse_embedded_statement();
        self.finish_node();
    }
}
