//! Compilation unit, namespaces, type declarations and members.

use rowan::Checkpoint;

use crate::diagnostics::ErrorCode;
use crate::options::SourceKind;
use crate::syntax_kind::SyntaxKind;
use crate::TextRange;

use super::lookahead::{self, Cursor, ModifierScope};
use super::statements::can_start_statement;
use super::{DeclContext, Parser};

impl Parser<'_> {
    pub(super) fn compilation_unit(&mut self) {
        self.builder.start_node(SyntaxKind::CompilationUnit.into());
        self.namespace_body(DeclContext::CompilationUnit, false);
        self.eat_trivia();
        self.bump_any();
        self.builder.finish_node();
    }

    fn namespace_body(&mut self, ctx: DeclContext, in_block: bool) {
        loop {
            match self.current() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CloseBraceToken if in_block => break,
                SyntaxKind::CloseBraceToken => {
                    self.error_here(ErrorCode::EOFExpected);
                    self.skip_token();
                }
                _ => {
                    let pending = self.tokens.len();
                    self.namespace_member(ctx);
                    if self.tokens.len() == pending && !self.at(SyntaxKind::EndOfFileToken) {
                        self.error_here(ErrorCode::EOFExpected);
                        self.skip_token();
                    }
                }
            }
        }
    }

    fn namespace_member(&mut self, ctx: DeclContext) {
        if self.at_using_directive() {
            self.parse_using_directive();
            return;
        }
        if self.at(SyntaxKind::NamespaceKeyword) {
            self.parse_namespace_declaration();
            return;
        }
        if ctx == DeclContext::CompilationUnit {
            if self.at_global_attribute_list() {
                self.parse_attribute_list();
                return;
            }
            if self.at_global_statement_start() {
                self.parse_global_statement();
                return;
            }
        }
        self.member_declaration(ctx);
    }

    // --- usings & namespaces ---

    fn at_using_directive(&self) -> bool {
        let c = self.lookahead();
        let c = if c.is_contextual(SyntaxKind::GlobalKeyword) && c.nth(1) == SyntaxKind::UsingKeyword {
            c.next()
        } else {
            c
        };
        if !c.is(SyntaxKind::UsingKeyword) {
            return false;
        }
        let next = c.next();
        if next.is(SyntaxKind::OpenParenToken) {
            return false;
        }
        // `using var x = ...;` is a statement.
        !matches!(lookahead::scan_type(next), Some(after) if after.is_ident())
    }

    fn parse_using_directive(&mut self) {
        self.start_node(SyntaxKind::UsingDirective);
        if self.at_contextual(SyntaxKind::GlobalKeyword) {
            self.bump_as(SyntaxKind::GlobalKeyword);
        }
        self.bump();
        self.eat(SyntaxKind::StaticKeyword);
        if self.at_ident() && self.nth(1) == SyntaxKind::EqualsToken {
            self.start_node(SyntaxKind::NameEquals);
            self.parse_identifier_name();
            self.bump();
            self.finish_node();
        }
        self.parse_type();
        self.expect(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    fn parse_namespace_declaration(&mut self) {
        self.seen_type_or_namespace = true;
        if self.options.kind == SourceKind::Script {
            self.error_here(ErrorCode::NamespaceNotAllowedInScript);
        }
        let checkpoint = self.checkpoint();
        self.bump();
        self.parse_namespace_name();

        if self.at(SyntaxKind::SemicolonToken) {
            self.start_node_at(checkpoint, SyntaxKind::FileScopedNamespaceDeclaration);
            self.bump();
            self.namespace_body(DeclContext::Namespace, false);
            self.finish_node();
            return;
        }

        self.start_node_at(checkpoint, SyntaxKind::NamespaceDeclaration);
        if self.expect(SyntaxKind::OpenBraceToken) {
            self.guarded(|p| p.namespace_body(DeclContext::Namespace, true));
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.eat(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    /// Namespace names never take an alias qualifier.
    fn parse_namespace_name(&mut self) {
        let start = self.current_range().start as usize;
        let mut c = self.lookahead();
        let mut aliased = false;
        while matches!(
            c.kind(),
            SyntaxKind::IdentifierToken | SyntaxKind::DotToken | SyntaxKind::ColonColonToken
        ) {
            aliased |= c.is(SyntaxKind::ColonColonToken);
            c = c.next();
        }
        self.parse_name();
        if aliased {
            let range = TextRange::new(start, self.last_token_end.max(start));
            self.error(ErrorCode::UnexpectedAliasedName, range);
        }
    }

    // --- top-level statements ---

    fn at_global_statement_start(&self) -> bool {
        let c = self.lookahead();
        if self.options.kind == SourceKind::Script {
            return self.at_script_statement_start(c);
        }
        if c.is(SyntaxKind::OpenBracketToken) {
            return false;
        }
        if c.is(SyntaxKind::ConstKeyword) {
            return true;
        }

        let version = self.version();
        let after_modifiers = lookahead::skip_modifiers(c, ModifierScope::CompilationUnit, version);
        if !after_modifiers.same_position(&c) {
            let after_local = lookahead::skip_local_function_modifiers(c);
            return after_local.same_position(&after_modifiers)
                && lookahead::is_local_function_shape(after_modifiers);
        }
        if lookahead::is_type_declaration_start(c, version) {
            return false;
        }
        if let Some(after) = lookahead::scan_type(c) {
            if is_operator_member_follower(after) {
                return false;
            }
        }
        // `void M() { }` cannot start an expression but is still a local function.
        lookahead::is_local_function_shape(c) || can_start_statement(c)
    }

    /// In scripts, declaration-shaped input is a member and everything else a statement.
    fn at_script_statement_start(&self, c: Cursor<'_>) -> bool {
        if c.is(SyntaxKind::OpenBracketToken) {
            return false;
        }
        let version = self.version();
        let after_modifiers = lookahead::skip_modifiers(c, ModifierScope::Member, version);
        if !after_modifiers.same_position(&c) || lookahead::is_type_declaration_start(c, version) {
            return false;
        }
        if let Some(after) = lookahead::scan_type(c) {
            if lookahead::is_possible_member_name(after) || is_operator_member_follower(after) {
                return false;
            }
        }
        can_start_statement(c)
    }

    fn parse_global_statement(&mut self) {
        let start = self.current_range().start as usize;
        self.start_node(SyntaxKind::GlobalStatement);
        self.parse_statement();
        self.finish_node();

        if self.seen_type_or_namespace && !self.reported_late_statement {
            self.reported_late_statement = true;
            let range = TextRange::new(start, self.last_token_end.max(start));
            self.error(ErrorCode::TopLevelStatementAfterNamespaceOrType, range);
        }
    }

    // --- members ---

    /// Whether the current token can begin a member or type declaration.
    pub(super) fn at_member_start(&self) -> bool {
        match self.current() {
            SyntaxKind::OpenBracketToken
            | SyntaxKind::TildeToken
            | SyntaxKind::IdentifierToken
            | SyntaxKind::DelegateKeyword
            | SyntaxKind::EventKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::ImplicitKeyword
            | SyntaxKind::ExplicitKeyword
            | SyntaxKind::OperatorKeyword => true,
            SyntaxKind::RefKeyword => {
                lookahead::modifier_at(self.lookahead(), ModifierScope::Member, self.version())
                    .is_some()
                    || lookahead::scan_type(self.lookahead()).is_some()
            }
            SyntaxKind::OpenParenToken => lookahead::scan_type(self.lookahead()).is_some(),
            kind => kind.is_predefined_type() || kind.is_non_contextual_modifier(),
        }
    }

    pub(super) fn member_declaration(&mut self, ctx: DeclContext) {
        if !self.at_member_start() {
            if ctx == DeclContext::TypeBody {
                let text = self.current_text();
                let range = self.current_range();
                self.error_with_args(ErrorCode::InvalidMemberDecl, range, &[text]);
            } else {
                self.error_here(ErrorCode::EOFExpected);
            }
            if !self.at(SyntaxKind::EndOfFileToken) {
                self.skip_token();
            }
            return;
        }
        self.guarded(|p| p.member_declaration_inner(ctx));
    }

    fn member_declaration_inner(&mut self, ctx: DeclContext) {
        let checkpoint = self.checkpoint();
        let member_start = self.current_range();
        self.parse_attribute_lists();
        let modifiers = self.parse_modifiers(ctx.modifier_scope());

        if lookahead::is_type_declaration_start(self.lookahead(), self.version()) {
            self.parse_type_declaration(checkpoint, ctx);
            return;
        }

        let misplaced_at = match self.current() {
            SyntaxKind::EventKeyword => Some(self.parse_event(checkpoint)),
            SyntaxKind::TildeToken => {
                self.parse_destructor(checkpoint);
                Some(member_start)
            }
            SyntaxKind::ImplicitKeyword | SyntaxKind::ExplicitKeyword => {
                self.parse_conversion_operator(checkpoint);
                None
            }
            SyntaxKind::IdentifierToken if self.nth(1) == SyntaxKind::OpenParenToken => {
                self.parse_constructor(checkpoint);
                Some(member_start)
            }
            // `closed[] x;`: the modifiers are followed by the suffix of a missing type.
            _ if modifiers > 0 && self.at_type_suffix() => self.parse_typed_member(checkpoint, ctx),
            _ if !self.at_member_type_start() => {
                self.start_node_at(checkpoint, SyntaxKind::IncompleteMember);
                self.finish_node();
                if ctx.is_namespace_level() {
                    Some(member_start)
                } else {
                    self.report_invalid_member_token();
                    None
                }
            }
            _ => self.parse_typed_member(checkpoint, ctx),
        };

        if let Some(range) = misplaced_at {
            if ctx.is_namespace_level() {
                self.error(ErrorCode::NamespaceUnexpected, range);
            }
        }
    }

    fn at_member_type_start(&self) -> bool {
        match self.current() {
            SyntaxKind::IdentifierToken | SyntaxKind::OperatorKeyword => true,
            SyntaxKind::DelegateKeyword => self.nth(1) == SyntaxKind::AsteriskToken,
            // Ref returns and tuples.
            SyntaxKind::RefKeyword | SyntaxKind::OpenParenToken => {
                lookahead::scan_type(self.lookahead()).is_some()
            }
            kind => kind.is_predefined_type(),
        }
    }

    fn report_invalid_member_token(&mut self) {
        if self.at(SyntaxKind::EndOfFileToken) {
            let range = self.missing_range();
            self.error(ErrorCode::IdentifierExpected, range);
        } else {
            let text = self.current_text();
            let range = self.current_range();
            self.error_with_args(ErrorCode::InvalidMemberDecl, range, &[text]);
        }
    }

    /// Members that start with a type. Returns where a namespace-level member
    /// is reported, `None` for operators and already reported members.
    fn parse_typed_member(&mut self, checkpoint: Checkpoint, ctx: DeclContext) -> Option<TextRange> {
        let type_checkpoint = self.checkpoint();
        let type_start = self.current_range().start as usize;
        self.parse_type();
        let type_range = TextRange::new(type_start, self.last_token_end.max(type_start));

        match self.current() {
            SyntaxKind::DotToken | SyntaxKind::ColonColonToken | SyntaxKind::DotDotToken
                if at_operator_after_interface_separator(self.lookahead()) =>
            {
                // No return type: what looked like one names the interface.
                self.start_node_at(type_checkpoint, SyntaxKind::ExplicitInterfaceSpecifier);
                if self.at(SyntaxKind::DotDotToken) {
                    self.split_current(SyntaxKind::DotToken, SyntaxKind::DotToken);
                }
                if self.at(SyntaxKind::DotToken) && self.nth(1) == SyntaxKind::DotToken {
                    // `I..operator`: a segment is missing between the dots.
                    self.start_node_at(type_checkpoint, SyntaxKind::QualifiedName);
                    self.bump();
                    self.parse_identifier_name();
                    self.finish_node();
                }
                if self.at(SyntaxKind::ColonColonToken) {
                    self.error_here(ErrorCode::UnexpectedAliasedName);
                }
                self.bump();
                self.finish_node();
                if self.at(SyntaxKind::OperatorKeyword) {
                    self.parse_operator_rest(checkpoint);
                } else {
                    self.parse_bad_conversion_operator(checkpoint, type_range);
                }
                None
            }
            SyntaxKind::ImplicitKeyword | SyntaxKind::ExplicitKeyword => {
                self.parse_bad_conversion_operator(checkpoint, type_range);
                None
            }
            SyntaxKind::OperatorKeyword => {
                self.parse_operator_rest(checkpoint);
                None
            }
            SyntaxKind::ThisKeyword => {
                self.parse_indexer_rest(checkpoint);
                Some(type_range)
            }
            _ if self.at_explicit_interface_specifier() => {
                self.parse_explicit_interface_specifier();
                match self.current() {
                    SyntaxKind::OperatorKeyword => {
                        self.parse_operator_rest(checkpoint);
                        None
                    }
                    SyntaxKind::ImplicitKeyword | SyntaxKind::ExplicitKeyword => {
                        self.parse_bad_conversion_operator(checkpoint, type_range);
                        None
                    }
                    SyntaxKind::ThisKeyword => {
                        self.parse_indexer_rest(checkpoint);
                        Some(type_range)
                    }
                    current => {
                        let method = if self.at_ident() {
                            matches!(
                                self.nth(1),
                                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                            )
                        } else {
                            matches!(current, SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
                        };
                        if method {
                            self.parse_method_rest(checkpoint);
                        } else {
                            self.parse_property_rest(checkpoint);
                        }
                        Some(type_range)
                    }
                }
            }
            SyntaxKind::IdentifierToken => {
                match self.nth(1) {
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                        self.parse_method_rest(checkpoint);
                    }
                    SyntaxKind::OpenBraceToken | SyntaxKind::EqualsGreaterThanToken => {
                        self.parse_property_rest(checkpoint);
                    }
                    _ => self.parse_field_rest(checkpoint, type_checkpoint),
                }
                Some(type_range)
            }
            _ => {
                self.start_node_at(checkpoint, SyntaxKind::IncompleteMember);
                self.finish_node();
                if ctx.is_namespace_level() {
                    return Some(type_range);
                }
                self.report_invalid_member_token();
                None
            }
        }
    }

    fn parse_method_rest(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::MethodDeclaration);
        self.expect_identifier();
        if self.at(SyntaxKind::LessThanToken) {
            self.parse_type_parameter_list();
        }
        self.parse_parameter_list();
        self.parse_constraint_clauses();
        self.parse_body_or_semicolon();
        self.finish_node();
    }

    fn parse_property_rest(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::PropertyDeclaration);
        self.expect_identifier();
        if self.at(SyntaxKind::EqualsGreaterThanToken) {
            self.parse_arrow_expression_clause();
            self.expect(SyntaxKind::SemicolonToken);
        } else {
            self.parse_accessor_list(false);
            if self.at(SyntaxKind::EqualsToken) {
                self.parse_equals_value_clause();
                self.expect(SyntaxKind::SemicolonToken);
            }
        }
        self.finish_node();
    }

    fn parse_field_rest(&mut self, checkpoint: Checkpoint, type_checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::FieldDeclaration);
        self.start_node_at(type_checkpoint, SyntaxKind::VariableDeclaration);
        self.parse_variable_declarators();
        self.finish_node();
        self.expect(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    fn parse_indexer_rest(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::IndexerDeclaration);
        self.bump();
        self.parse_bracketed_parameter_list();
        if self.at(SyntaxKind::EqualsGreaterThanToken) {
            self.parse_arrow_expression_clause();
            self.expect(SyntaxKind::SemicolonToken);
        } else {
            self.parse_accessor_list(false);
        }
        self.finish_node();
    }

    fn parse_event(&mut self, checkpoint: Checkpoint) -> TextRange {
        self.bump();
        let type_checkpoint = self.checkpoint();
        let type_start = self.current_range().start as usize;
        self.parse_type();
        let type_range = TextRange::new(type_start, self.last_token_end.max(type_start));

        let with_accessors = self.at_explicit_interface_specifier()
            || (self.at_ident() && self.nth(1) == SyntaxKind::OpenBraceToken);
        if with_accessors {
            self.start_node_at(checkpoint, SyntaxKind::EventDeclaration);
            if self.at_explicit_interface_specifier() {
                self.parse_explicit_interface_specifier();
            }
            self.expect_identifier();
            self.parse_accessor_list(true);
            self.finish_node();
        } else {
            self.start_node_at(checkpoint, SyntaxKind::EventFieldDeclaration);
            self.start_node_at(type_checkpoint, SyntaxKind::VariableDeclaration);
            self.parse_variable_declarators();
            self.finish_node();
            self.expect(SyntaxKind::SemicolonToken);
            self.finish_node();
        }
        type_range
    }

    fn parse_constructor(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::ConstructorDeclaration);
        self.bump();
        self.parse_parameter_list();
        if self.at(SyntaxKind::ColonToken) {
            let this = self.nth(1) == SyntaxKind::ThisKeyword;
            self.start_node(if this {
                SyntaxKind::ThisConstructorInitializer
            } else {
                SyntaxKind::BaseConstructorInitializer
            });
            self.bump();
            if this {
                self.bump();
            } else {
                self.expect(SyntaxKind::BaseKeyword);
            }
            self.parse_argument_list();
            self.finish_node();
        }
        self.parse_body_or_semicolon();
        self.finish_node();
    }

    fn parse_destructor(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::DestructorDeclaration);
        self.bump();
        self.expect_identifier();
        self.parse_parameter_list();
        self.parse_body_or_semicolon();
        self.finish_node();
    }

    // --- operators ---

    fn parse_operator_rest(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::OperatorDeclaration);
        self.bump();
        self.eat(SyntaxKind::CheckedKeyword);
        let missing_operator = if is_overloadable_operator(self.current()) {
            self.bump();
            None
        } else {
            let range = self.missing_range();
            self.missing(SyntaxKind::PlusToken);
            Some(range)
        };
        let parameters = self.parse_parameter_list();
        if let Some(range) = missing_operator {
            self.report_overloadable_operator_expected(range, parameters);
        }
        self.parse_body_or_semicolon();
        self.finish_node();
    }

    /// `Type implicit ...` or `I.explicit ...`: the conversion keyword is
    /// skipped and the declaration continues as an operator with missing
    /// `operator` keyword and operator token.
    fn parse_bad_conversion_operator(&mut self, checkpoint: Checkpoint, type_range: TextRange) {
        self.start_node_at(checkpoint, SyntaxKind::OperatorDeclaration);
        self.error_with_args(ErrorCode::BadOperatorSyntax, type_range, &["+"]);
        let keyword_range = self.current_range();
        self.error_with_args(ErrorCode::SyntaxError, keyword_range, &["operator"]);

        self.start_node(SyntaxKind::SkippedTokens);
        self.bump_any();
        if self.at(SyntaxKind::OperatorKeyword) {
            self.bump();
        }
        self.finish_node();

        self.missing(SyntaxKind::OperatorKeyword);
        self.missing(SyntaxKind::PlusToken);
        let parameters = self.parse_parameter_list();
        self.report_overloadable_operator_expected(keyword_range, parameters);
        self.parse_body_or_semicolon();
        self.finish_node();
    }

    fn report_overloadable_operator_expected(&mut self, range: TextRange, parameters: usize) {
        let code = match parameters {
            1 => ErrorCode::OvlUnaryOperatorExpected,
            2 => ErrorCode::OvlBinaryOperatorExpected,
            _ => ErrorCode::OvlOperatorExpected,
        };
        self.error(code, range);
    }

    fn parse_conversion_operator(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::ConversionOperatorDeclaration);
        self.bump();
        if self.at_explicit_interface_specifier() {
            self.parse_explicit_interface_specifier();
        }
        self.expect(SyntaxKind::OperatorKeyword);
        self.eat(SyntaxKind::CheckedKeyword);
        if self.at(SyntaxKind::OpenParenToken) {
            self.parse_identifier_name();
        } else {
            self.parse_type();
        }
        self.parse_parameter_list();
        self.parse_body_or_semicolon();
        self.finish_node();
    }

    // --- type declarations ---

    fn parse_type_declaration(&mut self, checkpoint: Checkpoint, ctx: DeclContext) {
        if ctx.is_namespace_level() {
            self.seen_type_or_namespace = true;
        }
        match self.current() {
            SyntaxKind::EnumKeyword => self.parse_enum_rest(checkpoint),
            SyntaxKind::DelegateKeyword => self.parse_delegate_rest(checkpoint),
            _ => self.parse_class_like_rest(checkpoint),
        }
    }

    /// Classes, structs, interfaces and records.
    fn parse_class_like_rest(&mut self, checkpoint: Checkpoint) {
        let kind = match self.current() {
            SyntaxKind::ClassKeyword => {
                self.bump();
                SyntaxKind::ClassDeclaration
            }
            SyntaxKind::StructKeyword => {
                self.bump();
                SyntaxKind::StructDeclaration
            }
            SyntaxKind::InterfaceKeyword => {
                self.bump();
                SyntaxKind::InterfaceDeclaration
            }
            _ => {
                self.bump_as(SyntaxKind::RecordKeyword);
                if self.eat(SyntaxKind::StructKeyword) {
                    SyntaxKind::RecordStructDeclaration
                } else {
                    self.eat(SyntaxKind::ClassKeyword);
                    SyntaxKind::RecordDeclaration
                }
            }
        };
        self.start_node_at(checkpoint, kind);
        self.expect_identifier();
        if self.at(SyntaxKind::LessThanToken) {
            self.parse_type_parameter_list();
        }
        if self.at(SyntaxKind::OpenParenToken) {
            self.parse_parameter_list();
        }
        if self.at(SyntaxKind::ColonToken) {
            self.parse_base_list();
        }
        self.parse_constraint_clauses();

        if self.eat(SyntaxKind::SemicolonToken) {
            self.finish_node();
            return;
        }
        if self.expect(SyntaxKind::OpenBraceToken) {
            self.guarded(|p| p.type_body());
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.eat(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    fn type_body(&mut self) {
        loop {
            match self.current() {
                SyntaxKind::EndOfFileToken | SyntaxKind::CloseBraceToken => break,
                _ => self.member_declaration(DeclContext::TypeBody),
            }
        }
    }

    fn parse_enum_rest(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::EnumDeclaration);
        self.bump();
        self.expect_identifier();
        if self.at(SyntaxKind::ColonToken) {
            self.parse_base_list();
        }
        if self.expect(SyntaxKind::OpenBraceToken) {
            loop {
                match self.current() {
                    SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => break,
                    SyntaxKind::IdentifierToken | SyntaxKind::OpenBracketToken => {}
                    _ => {
                        self.error_here(ErrorCode::IdentifierExpected);
                        self.skip_token();
                        continue;
                    }
                }
                self.start_node(SyntaxKind::EnumMemberDeclaration);
                self.parse_attribute_lists();
                self.expect_identifier();
                if self.at(SyntaxKind::EqualsToken) {
                    self.parse_equals_value_clause();
                }
                self.finish_node();

                if self.eat(SyntaxKind::CommaToken) {
                    continue;
                }
                if self.at_ident() {
                    self.report_missing(SyntaxKind::CommaToken);
                    self.missing(SyntaxKind::CommaToken);
                }
            }
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.eat(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    fn parse_delegate_rest(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::DelegateDeclaration);
        self.bump();
        self.parse_type();
        self.expect_identifier();
        if self.at(SyntaxKind::LessThanToken) {
            self.parse_type_parameter_list();
        }
        self.parse_parameter_list();
        self.parse_constraint_clauses();
        self.expect(SyntaxKind::SemicolonToken);
        self.finish_node();
    }

    fn parse_base_list(&mut self) {
        self.start_node(SyntaxKind::BaseList);
        self.bump();
        loop {
            let checkpoint = self.checkpoint();
            self.parse_type();
            if self.at(SyntaxKind::OpenParenToken) {
                self.start_node_at(checkpoint, SyntaxKind::PrimaryConstructorBaseType);
                self.parse_argument_list();
            } else {
                self.start_node_at(checkpoint, SyntaxKind::SimpleBaseType);
            }
            self.finish_node();
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.finish_node();
    }

    pub(super) fn parse_type_parameter_list(&mut self) {
        self.start_node(SyntaxKind::TypeParameterList);
        self.bump();
        loop {
            self.start_node(SyntaxKind::TypeParameter);
            self.parse_attribute_lists();
            if matches!(self.current(), SyntaxKind::InKeyword | SyntaxKind::OutKeyword) {
                self.bump();
            }
            self.expect_identifier();
            self.finish_node();
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect_greater_than();
        self.finish_node();
    }

    // --- parameters ---

    /// Returns the number of parameters parsed.
    pub(super) fn parse_parameter_list(&mut self) -> usize {
        self.start_node(SyntaxKind::ParameterList);
        let count = if self.expect(SyntaxKind::OpenParenToken) {
            self.parse_parameters(SyntaxKind::CloseParenToken)
        } else {
            0
        };
        self.expect(SyntaxKind::CloseParenToken);
        self.finish_node();
        count
    }

    fn parse_bracketed_parameter_list(&mut self) {
        self.start_node(SyntaxKind::BracketedParameterList);
        if self.expect(SyntaxKind::OpenBracketToken) {
            self.parse_parameters(SyntaxKind::CloseBracketToken);
        }
        self.expect(SyntaxKind::CloseBracketToken);
        self.finish_node();
    }

    fn parse_parameters(&mut self, close: SyntaxKind) -> usize {
        let mut count = 0;
        if self.at(close) {
            return count;
        }
        loop {
            if self.at(SyntaxKind::EndOfFileToken) {
                break;
            }
            self.parse_parameter();
            count += 1;
            if self.eat(SyntaxKind::CommaToken) {
                continue;
            }
            if self.at(close) {
                break;
            }
            if self.at_parameter_start() {
                self.report_missing(SyntaxKind::CommaToken);
                self.missing(SyntaxKind::CommaToken);
                continue;
            }
            break;
        }
        count
    }

    fn at_parameter_start(&self) -> bool {
        match self.current() {
            SyntaxKind::IdentifierToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::RefKeyword
            | SyntaxKind::OutKeyword
            | SyntaxKind::InKeyword
            | SyntaxKind::ParamsKeyword
            | SyntaxKind::ThisKeyword => true,
            kind => kind.is_predefined_type(),
        }
    }

    fn parse_parameter(&mut self) {
        self.start_node(SyntaxKind::Parameter);
        self.parse_attribute_lists();
        while is_parameter_modifier(self.current()) {
            self.bump();
        }
        self.parse_type();
        self.expect_identifier();
        if self.at(SyntaxKind::EqualsToken) {
            self.parse_equals_value_clause();
        }
        self.finish_node();
    }

    // --- bodies ---

    fn parse_accessor_list(&mut self, event: bool) {
        self.start_node(SyntaxKind::AccessorList);
        if self.expect(SyntaxKind::OpenBraceToken) {
            while !self.at(SyntaxKind::CloseBraceToken) && !self.at(SyntaxKind::EndOfFileToken) {
                self.parse_accessor(event);
            }
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.finish_node();
    }

    fn parse_accessor(&mut self, event: bool) {
        let checkpoint = self.checkpoint();
        let attributes = self.parse_attribute_lists();
        let modifiers = self.parse_modifiers(ModifierScope::Member);

        let (node, keyword) = match self.current_contextual() {
            _ if !self.at_ident() => (SyntaxKind::UnknownAccessorDeclaration, None),
            SyntaxKind::GetKeyword => (SyntaxKind::GetAccessorDeclaration, Some(SyntaxKind::GetKeyword)),
            SyntaxKind::SetKeyword => (SyntaxKind::SetAccessorDeclaration, Some(SyntaxKind::SetKeyword)),
            SyntaxKind::InitKeyword => {
                (SyntaxKind::InitAccessorDeclaration, Some(SyntaxKind::InitKeyword))
            }
            SyntaxKind::AddKeyword => (SyntaxKind::AddAccessorDeclaration, Some(SyntaxKind::AddKeyword)),
            SyntaxKind::RemoveKeyword => {
                (SyntaxKind::RemoveAccessorDeclaration, Some(SyntaxKind::RemoveKeyword))
            }
            _ => (SyntaxKind::UnknownAccessorDeclaration, None),
        };

        let Some(keyword) = keyword else {
            self.error_here(if event {
                ErrorCode::AddOrRemoveExpected
            } else {
                ErrorCode::GetOrSetExpected
            });
            if self.at_ident() {
                self.start_node_at(checkpoint, node);
                self.bump();
                if matches!(
                    self.current(),
                    SyntaxKind::OpenBraceToken
                        | SyntaxKind::EqualsGreaterThanToken
                        | SyntaxKind::SemicolonToken
                ) {
                    self.parse_body_or_semicolon();
                }
                self.finish_node();
            } else if attributes || modifiers > 0 {
                self.start_node_at(checkpoint, node);
                self.missing(SyntaxKind::IdentifierToken);
                self.finish_node();
            } else {
                self.skip_token();
            }
            return;
        };

        self.start_node_at(checkpoint, node);
        self.bump_as(keyword);
        self.parse_body_or_semicolon();
        self.finish_node();
    }

    pub(super) fn parse_body_or_semicolon(&mut self) {
        match self.current() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::EqualsGreaterThanToken => {
                self.parse_arrow_expression_clause();
                self.expect(SyntaxKind::SemicolonToken);
            }
            _ => {
                self.expect(SyntaxKind::SemicolonToken);
            }
        }
    }

    fn parse_arrow_expression_clause(&mut self) {
        self.start_node(SyntaxKind::ArrowExpressionClause);
        self.bump();
        self.parse_expression();
        self.finish_node();
    }

    pub(super) fn parse_equals_value_clause(&mut self) {
        self.start_node(SyntaxKind::EqualsValueClause);
        self.bump();
        self.parse_variable_initializer();
        self.finish_node();
    }
}

/// `Type operator`, `Type implicit`, `Type explicit` or `I.operator`.
fn is_operator_member_follower(c: Cursor<'_>) -> bool {
    match c.kind() {
        SyntaxKind::OperatorKeyword | SyntaxKind::ImplicitKeyword | SyntaxKind::ExplicitKeyword => {
            true
        }
        SyntaxKind::IdentifierToken => {
            matches!(
                c.nth(1),
                SyntaxKind::DotToken | SyntaxKind::ColonColonToken | SyntaxKind::DotDotToken
            ) && at_operator_after_interface_separator(c.next())
        }
        _ => false,
    }
}

/// `.operator`, `::operator`, `..operator` or `. .operator` (or `implicit`/`explicit`).
fn at_operator_after_interface_separator(c: Cursor<'_>) -> bool {
    let after = match c.kind() {
        SyntaxKind::DotToken if c.nth(1) == SyntaxKind::DotToken => c.next().next(),
        _ => c.next(),
    };
    matches!(
        after.kind(),
        SyntaxKind::OperatorKeyword | SyntaxKind::ImplicitKeyword | SyntaxKind::ExplicitKeyword
    )
}

fn is_parameter_modifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::RefKeyword
            | SyntaxKind::OutKeyword
            | SyntaxKind::InKeyword
            | SyntaxKind::ParamsKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::ReadOnlyKeyword
    )
}

fn is_overloadable_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::AsteriskToken
            | SyntaxKind::SlashToken
            | SyntaxKind::PercentToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::BarToken
            | SyntaxKind::CaretToken
            | SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken
            | SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
    )
}
