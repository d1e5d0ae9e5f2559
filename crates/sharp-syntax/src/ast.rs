use crate::parser::SyntaxNode;
use crate::syntax_kind::SyntaxKind;

pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(syntax: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

pub mod support {
    use crate::ast::AstNode;
    use crate::parser::{SyntaxNode, SyntaxToken};
    use crate::syntax_kind::SyntaxKind;

    pub fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
        node.children().find_map(N::cast)
    }

    pub fn children<'a, N: AstNode + 'a>(node: &'a SyntaxNode) -> impl Iterator<Item = N> + 'a {
        node.children().filter_map(N::cast)
    }

    pub fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        node.children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|tok| tok.kind() == kind)
    }

    pub fn tokens<'a>(
        node: &'a SyntaxNode,
        kind: SyntaxKind,
    ) -> impl Iterator<Item = SyntaxToken> + 'a {
        node.children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(move |tok| tok.kind() == kind)
    }

    /// The leading run of modifier tokens among the node's direct children.
    ///
    /// Attribute lists in front of the modifiers are skipped; the run ends at
    /// the first child that is neither trivia nor a modifier.
    pub fn modifiers(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
        node.children_with_tokens()
            .skip_while(|it| it.kind() == SyntaxKind::AttributeList || it.kind().is_trivia())
            .filter(|it| !it.kind().is_trivia())
            .map_while(|it| it.into_token().filter(|tok| tok.kind().is_modifier()))
    }

    /// The declared identifier: the first direct `IdentifierToken` child.
    pub fn ident_token(node: &SyntaxNode) -> Option<SyntaxToken> {
        token(node, SyntaxKind::IdentifierToken)
    }

    /// Identifier text with a verbatim `@` prefix removed.
    pub fn identifier_value(text: &str) -> &str {
        text.strip_prefix('@').unwrap_or(text)
    }
}

mod nodes;

pub use nodes::*;
