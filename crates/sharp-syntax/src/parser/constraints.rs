//! `where T : ...` clauses.

use crate::diagnostics::ErrorCode;
use crate::syntax_kind::SyntaxKind;

use super::Parser;

impl Parser<'_> {
    pub(super) fn parse_constraint_clauses(&mut self) {
        while self.at_contextual(SyntaxKind::WhereKeyword) && self.nth(1) == SyntaxKind::IdentifierToken
        {
            self.parse_constraint_clause();
        }
    }

    fn parse_constraint_clause(&mut self) {
        self.start_node(SyntaxKind::TypeParameterConstraintClause);
        self.bump_as(SyntaxKind::WhereKeyword);
        self.parse_identifier_name();
        self.expect(SyntaxKind::ColonToken);
        loop {
            self.parse_constraint();
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.finish_node();
    }

    fn parse_constraint(&mut self) {
        match self.current() {
            SyntaxKind::ClassKeyword => {
                self.start_node(SyntaxKind::ClassConstraint);
                self.bump();
                self.eat(SyntaxKind::QuestionToken);
                self.finish_node();
            }
            SyntaxKind::StructKeyword => {
                self.start_node(SyntaxKind::StructConstraint);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::DefaultKeyword => {
                self.start_node(SyntaxKind::DefaultConstraint);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::NewKeyword => {
                self.start_node(SyntaxKind::ConstructorConstraint);
                self.bump();
                self.expect(SyntaxKind::OpenParenToken);
                self.expect(SyntaxKind::CloseParenToken);
                self.finish_node();
            }
            SyntaxKind::EnumKeyword => {
                self.degenerate_type_constraint(ErrorCode::NoEnumConstraint, "struct, System.Enum");
            }
            SyntaxKind::DelegateKeyword => {
                self.degenerate_type_constraint(ErrorCode::NoDelegateConstraint, "System.Delegate");
            }
            SyntaxKind::IdentifierToken
                if self.at_keyword_constraint(SyntaxKind::UnmanagedKeyword) =>
            {
                self.start_node(SyntaxKind::UnmanagedConstraint);
                self.bump_as(SyntaxKind::UnmanagedKeyword);
                self.finish_node();
            }
            SyntaxKind::IdentifierToken if self.at_keyword_constraint(SyntaxKind::NotNullKeyword) => {
                self.start_node(SyntaxKind::NotNullConstraint);
                self.bump_as(SyntaxKind::NotNullKeyword);
                self.finish_node();
            }
            _ => {
                self.start_node(SyntaxKind::TypeConstraint);
                self.parse_type();
                self.finish_node();
            }
        }
    }

    fn at_keyword_constraint(&self, keyword: SyntaxKind) -> bool {
        self.at_contextual(keyword) && at_constraint_end(self.nth(1))
    }

    /// `enum` and `delegate` are consumed into a `TypeConstraint` whose name is
    /// missing; the keyword itself becomes a skipped token.
    fn degenerate_type_constraint(&mut self, code: ErrorCode, suggestion: &str) {
        let range = self.current_range();
        self.error_with_args(code, range, &[suggestion]);
        self.start_node(SyntaxKind::TypeConstraint);
        self.skip_token();
        self.start_node(SyntaxKind::IdentifierName);
        self.missing(SyntaxKind::IdentifierToken);
        self.finish_node();
        self.finish_node();
    }
}

fn at_constraint_end(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CommaToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::EqualsGreaterThanToken
            | SyntaxKind::EndOfFileToken
            | SyntaxKind::IdentifierToken
    )
}
