//! Declaration-level checks that need more than the shape of one token run:
//! modifier validity, type names and member placement.

use std::collections::HashSet;

use crate::ast::{support, AstNode, MemberDeclaration, TypeDeclaration};
use crate::diagnostics::{sort_diagnostics, Diagnostic, ErrorCode};
use crate::feature_gate::feature_error;
use crate::language_version::{Feature, LanguageVersion};
use crate::options::ParseOptions;
use crate::parser::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;
use crate::TextRange;

const CLOSED: &str = "closed";

pub(crate) fn check_declarations(root: &SyntaxNode, options: &ParseOptions) -> Vec<Diagnostic> {
    let version = options.language_version;
    let mut diagnostics = Vec::new();

    for node in root.descendants() {
        if let Some(member) = MemberDeclaration::cast(node.clone()) {
            check_member(&member, version, &mut diagnostics);
        } else if node.kind() == SyntaxKind::UsingDirective {
            check_using_alias(&node, version, &mut diagnostics);
        }
    }
    check_file_scoped_namespace_position(root, &mut diagnostics);

    sort_diagnostics(&mut diagnostics);
    tracing::debug!(
        target: "sharp_syntax",
        language_version = %version,
        diagnostics = diagnostics.len(),
        "checked declarations"
    );
    diagnostics
}

fn check_member(member: &MemberDeclaration, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    // Incomplete members were already reported by the parser.
    if matches!(
        member,
        MemberDeclaration::IncompleteMember(_)
            | MemberDeclaration::GlobalStatement(_)
            | MemberDeclaration::NamespaceDeclaration(_)
            | MemberDeclaration::FileScopedNamespaceDeclaration(_)
    ) {
        return;
    }

    let modifiers: Vec<SyntaxToken> = member.modifiers().collect();
    let name_range = member
        .name_token()
        .map(|tok| TextRange::from(tok.text_range()))
        .unwrap_or_else(|| TextRange::from(member.syntax().text_range()));

    check_duplicate_modifiers(&modifiers, out);
    check_partial(member, &modifiers, name_range, out);

    if modifiers.iter().any(|m| m.kind() == SyntaxKind::ClosedKeyword) {
        let allowed = member
            .as_type_declaration()
            .map_or(false, TypeDeclaration::is_class_like);
        if !allowed {
            out.push(Diagnostic::with_args(ErrorCode::BadMemberFlag, name_range, [CLOSED]));
        } else if !version.is_enabled(Feature::ClosedClasses) {
            out.push(feature_error(version, Feature::ClosedClasses, name_range));
        }
    }

    match member {
        MemberDeclaration::TypeDeclaration(decl) => check_type_name(decl, version, out),
        MemberDeclaration::ConstructorDeclaration(ctor) => {
            check_constructor_name(ctor.syntax(), ctor.name_token(), out);
        }
        _ => {}
    }
}

/// One report per declaration, at the first modifier that repeats an earlier one.
fn check_duplicate_modifiers(modifiers: &[SyntaxToken], out: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();
    if let Some(repeat) = modifiers.iter().find(|m| !seen.insert(m.kind())) {
        out.push(Diagnostic::with_args(
            ErrorCode::DuplicateModifier,
            TextRange::from(repeat.text_range()),
            [repeat.text()],
        ));
    }
}

/// `partial` must come right before the type keyword or return type, and is
/// never valid on enums, delegates or fields.
fn check_partial(
    member: &MemberDeclaration,
    modifiers: &[SyntaxToken],
    name_range: TextRange,
    out: &mut Vec<Diagnostic>,
) {
    let Some(position) = modifiers
        .iter()
        .position(|m| m.kind() == SyntaxKind::PartialKeyword)
    else {
        return;
    };

    let never_partial = matches!(
        member,
        MemberDeclaration::TypeDeclaration(TypeDeclaration::EnumDeclaration(_))
            | MemberDeclaration::TypeDeclaration(TypeDeclaration::DelegateDeclaration(_))
            | MemberDeclaration::FieldDeclaration(_)
            | MemberDeclaration::EventFieldDeclaration(_)
    );
    if never_partial {
        out.push(Diagnostic::new(ErrorCode::PartialMisplaced, name_range));
    } else if position + 1 != modifiers.len() {
        out.push(Diagnostic::new(
            ErrorCode::PartialMisplaced,
            TextRange::from(modifiers[position].text_range()),
        ));
    }
}

fn check_type_name(decl: &TypeDeclaration, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if let Some(name) = decl.name_token() {
        check_closed_name(&name, version, out);
    }
}

fn check_using_alias(node: &SyntaxNode, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    let alias = node
        .children()
        .find(|n| n.kind() == SyntaxKind::NameEquals)
        .and_then(|n| n.children().next())
        .and_then(|n| support::ident_token(&n));
    if let Some(alias) = alias {
        check_closed_name(&alias, version, out);
    }
}

/// `closed` became a contextual keyword in C# 14; a verbatim `@closed` is fine.
fn check_closed_name(name: &SyntaxToken, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if name.text() != CLOSED {
        return;
    }
    let range = TextRange::from(name.text_range());
    if version >= LanguageVersion::CSharp14 {
        out.push(Diagnostic::new(ErrorCode::ClosedTypeNameDisallowed, range));
    } else {
        out.push(Diagnostic::with_args(ErrorCode::LowerCaseTypeName, range, [CLOSED]));
    }
}

/// A constructor-shaped member must be named after its enclosing type.
fn check_constructor_name(
    ctor: &SyntaxNode,
    name: Option<SyntaxToken>,
    out: &mut Vec<Diagnostic>,
) {
    let Some(name) = name.filter(|tok| !tok.text().is_empty()) else {
        return;
    };
    let Some(enclosing) = ctor.parent().and_then(TypeDeclaration::cast) else {
        return;
    };
    let Some(type_name) = enclosing.name_token() else {
        return;
    };
    if support::identifier_value(name.text()) != support::identifier_value(type_name.text()) {
        out.push(Diagnostic::new(
            ErrorCode::MemberNeedsType,
            TextRange::from(name.text_range()),
        ));
    }
}

/// A file-scoped namespace may only be preceded by usings and attributes.
fn check_file_scoped_namespace_position(root: &SyntaxNode, out: &mut Vec<Diagnostic>) {
    let mut seen_member = false;
    for child in root.children() {
        match child.kind() {
            SyntaxKind::UsingDirective | SyntaxKind::AttributeList | SyntaxKind::SkippedTokens => {}
            SyntaxKind::FileScopedNamespaceDeclaration if seen_member => {
                let range = child
                    .children()
                    .next()
                    .map_or_else(|| child.text_range(), |name| name.text_range());
                out.push(Diagnostic::new(
                    ErrorCode::FileScopedNamespaceNotBeforeAllMembers,
                    TextRange::from(range),
                ));
            }
            _ => seen_member = true,
        }
    }
}
