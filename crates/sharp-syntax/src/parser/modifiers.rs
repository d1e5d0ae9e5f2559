use crate::syntax_kind::SyntaxKind;

use super::lookahead::{self, ModifierScope};
use super::Parser;

impl Parser<'_> {
    /// Consume the maximal run of modifiers. Each one becomes a direct child
    /// token of the enclosing declaration, in source order, duplicates kept.
    pub(super) fn parse_modifiers(&mut self, scope: ModifierScope) -> usize {
        let mut count = 0;
        while let Some(kind) = lookahead::modifier_at(self.lookahead(), scope, self.version()) {
            self.bump_as(kind);
            count += 1;
        }
        count
    }

    /// `static`, `async`, `extern`, `unsafe` in front of a local function.
    pub(super) fn parse_local_function_modifiers(&mut self) {
        while lookahead::is_local_function_modifier(self.lookahead()) {
            let kind = match self.current() {
                SyntaxKind::IdentifierToken => self.current_contextual(),
                kind => kind,
            };
            self.bump_as(kind);
        }
    }

    pub(super) fn parse_attribute_lists(&mut self) -> bool {
        let mut any = false;
        while self.at(SyntaxKind::OpenBracketToken) {
            self.parse_attribute_list();
            any = true;
        }
        any
    }

    pub(super) fn at_global_attribute_list(&self) -> bool {
        let c = self.lookahead();
        c.is(SyntaxKind::OpenBracketToken)
            && c.next().is_ident()
            && matches!(c.next().contextual(), SyntaxKind::IdentifierToken)
            && matches!(self.nth_text(1), "assembly" | "module")
            && c.nth(2) == SyntaxKind::ColonToken
    }

    fn nth_text(&self, n: usize) -> &str {
        let mut idx = lookahead::skip_trivia(&self.tokens, 0);
        for _ in 0..n {
            idx = lookahead::skip_trivia(&self.tokens, idx + 1);
        }
        self.tokens.get(idx).map_or("", |t| t.text(self.input))
    }

    pub(super) fn parse_attribute_list(&mut self) {
        self.start_node(SyntaxKind::AttributeList);
        self.expect(SyntaxKind::OpenBracketToken);

        let target_like = self.at_ident() || self.current().is_keyword();
        if target_like && self.nth(1) == SyntaxKind::ColonToken {
            self.start_node(SyntaxKind::AttributeTargetSpecifier);
            self.bump();
            self.bump();
            self.finish_node();
        }

        loop {
            self.parse_attribute();
            if self.at(SyntaxKind::CommaToken) {
                self.bump();
                if self.at(SyntaxKind::CloseBracketToken) {
                    break;
                }
                continue;
            }
            break;
        }
        self.expect(SyntaxKind::CloseBracketToken);
        self.finish_node();
    }

    fn parse_attribute(&mut self) {
        self.start_node(SyntaxKind::Attribute);
        self.parse_name();
        if self.at(SyntaxKind::OpenParenToken) {
            self.start_node(SyntaxKind::AttributeArgumentList);
            self.bump();
            while !self.at(SyntaxKind::CloseParenToken) && !self.at(SyntaxKind::EndOfFileToken) {
                self.start_node(SyntaxKind::AttributeArgument);
                if self.at_ident() && self.nth(1) == SyntaxKind::EqualsToken {
                    self.start_node(SyntaxKind::NameEquals);
                    self.parse_identifier_name();
                    self.bump();
                    self.finish_node();
                }
                self.parse_expression();
                self.finish_node();
                if !self.eat(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.expect(SyntaxKind::CloseParenToken);
            self.finish_node();
        }
        self.finish_node();
    }
}
