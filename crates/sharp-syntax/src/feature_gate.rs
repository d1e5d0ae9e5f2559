use crate::ast::support;
use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::language_version::{Feature, FeatureAvailability, LanguageVersion};
use crate::options::{ParseOptions, SourceKind};
use crate::parser::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;
use crate::TextRange;

/// Report constructs the parser accepts but the configured language version
/// does not have yet.
pub(crate) fn feature_gate_diagnostics(root: &SyntaxNode, options: &ParseOptions) -> Vec<Diagnostic> {
    let version = options.language_version;
    let mut diagnostics = Vec::new();

    gate_global_usings(root, version, &mut diagnostics);
    gate_file_scoped_namespaces(root, version, &mut diagnostics);
    if options.kind == SourceKind::Regular {
        gate_top_level_statements(root, version, &mut diagnostics);
    }
    gate_record_structs(root, version, &mut diagnostics);
    gate_init_accessors(root, version, &mut diagnostics);
    gate_static_abstract_members(root, version, &mut diagnostics);
    gate_modifier(root, version, Feature::FileTypes, SyntaxKind::FileKeyword, &mut diagnostics);
    gate_modifier(
        root,
        version,
        Feature::RequiredMembers,
        SyntaxKind::RequiredKeyword,
        &mut diagnostics,
    );
    gate_primary_constructors(root, version, &mut diagnostics);
    gate_default_constraint(root, version, &mut diagnostics);
    gate_ref_structs(root, version, &mut diagnostics);
    gate_static_local_functions(root, version, &mut diagnostics);

    diagnostics
}

fn gate_global_usings(root: &SyntaxNode, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if version.is_enabled(Feature::GlobalUsingDirectives) {
        return;
    }

    for node in root.descendants().filter(|n| n.kind() == SyntaxKind::UsingDirective) {
        if let Some(global) = child_token(&node, SyntaxKind::GlobalKeyword) {
            out.push(feature_error(version, Feature::GlobalUsingDirectives, token_range(&global)));
        }
    }
}

fn gate_file_scoped_namespaces(root: &SyntaxNode, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if version.is_enabled(Feature::FileScopedNamespaces) {
        return;
    }

    for node in root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::FileScopedNamespaceDeclaration)
    {
        let Some(name) = node.children().next() else {
            continue;
        };
        out.push(feature_error(
            version,
            Feature::FileScopedNamespaces,
            TextRange::from(name.text_range()),
        ));
    }
}

fn gate_top_level_statements(root: &SyntaxNode, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if version.is_enabled(Feature::TopLevelStatements) {
        return;
    }

    // One report per file, at the first statement.
    if let Some(first) = root.children().find(|n| n.kind() == SyntaxKind::GlobalStatement) {
        out.push(feature_error(
            version,
            Feature::TopLevelStatements,
            TextRange::from(first.text_range()),
        ));
    }
}

/// `record struct` and the explicit `record class` spelling.
fn gate_record_structs(root: &SyntaxNode, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if version.is_enabled(Feature::RecordStructs) {
        return;
    }

    for node in root.descendants() {
        let keyword = match node.kind() {
            SyntaxKind::RecordStructDeclaration => child_token(&node, SyntaxKind::StructKeyword),
            SyntaxKind::RecordDeclaration => child_token(&node, SyntaxKind::ClassKeyword),
            _ => None,
        };
        if let Some(keyword) = keyword {
            out.push(feature_error(version, Feature::RecordStructs, token_range(&keyword)));
        }
    }
}

fn gate_init_accessors(root: &SyntaxNode, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if version.is_enabled(Feature::InitOnlySetters) {
        return;
    }

    for node in root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::InitAccessorDeclaration)
    {
        if let Some(init) = child_token(&node, SyntaxKind::InitKeyword) {
            out.push(feature_error(version, Feature::InitOnlySetters, token_range(&init)));
        }
    }
}

/// Explicitly implemented operators (`int I.operator +(...)`) and
/// `static abstract`/`static virtual` interface members.
fn gate_static_abstract_members(root: &SyntaxNode, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if version.is_enabled(Feature::StaticAbstractMembersInInterfaces) {
        return;
    }

    for node in root.descendants() {
        match node.kind() {
            SyntaxKind::OperatorDeclaration | SyntaxKind::ConversionOperatorDeclaration => {
                if !node
                    .children()
                    .any(|n| n.kind() == SyntaxKind::ExplicitInterfaceSpecifier)
                {
                    continue;
                }
                let Some(operator) = child_token(&node, SyntaxKind::OperatorKeyword)
                    .filter(|tok| !tok.text().is_empty())
                else {
                    continue;
                };
                out.push(feature_error(
                    version,
                    Feature::StaticAbstractMembersInInterfaces,
                    token_range(&operator),
                ));
            }
            SyntaxKind::InterfaceDeclaration => {
                for member in node.children() {
                    let modifiers: Vec<SyntaxToken> = support::modifiers(&member).collect();
                    let is_static = modifiers.iter().any(|m| m.kind() == SyntaxKind::StaticKeyword);
                    let overridable = modifiers.iter().find(|m| {
                        matches!(m.kind(), SyntaxKind::AbstractKeyword | SyntaxKind::VirtualKeyword)
                    });
                    if let (true, Some(keyword)) = (is_static, overridable) {
                        out.push(feature_error(
                            version,
                            Feature::StaticAbstractMembersInInterfaces,
                            token_range(keyword),
                        ));
                    }
                }
            }
            _ => {}
        }
    }
}

/// Declaration modifiers introduced by a language version (`file`, `required`).
fn gate_modifier(
    root: &SyntaxNode,
    version: LanguageVersion,
    feature: Feature,
    modifier: SyntaxKind,
    out: &mut Vec<Diagnostic>,
) {
    if version.is_enabled(feature) {
        return;
    }

    for node in root.descendants() {
        for tok in support::modifiers(&node).filter(|t| t.kind() == modifier) {
            out.push(feature_error(version, feature, token_range(&tok)));
        }
    }
}

fn gate_primary_constructors(root: &SyntaxNode, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if version.is_enabled(Feature::PrimaryConstructors) {
        return;
    }

    for node in root.descendants().filter(|n| {
        matches!(n.kind(), SyntaxKind::ClassDeclaration | SyntaxKind::StructDeclaration)
    }) {
        if let Some(list) = node.children().find(|n| n.kind() == SyntaxKind::ParameterList) {
            out.push(feature_error(
                version,
                Feature::PrimaryConstructors,
                TextRange::from(list.text_range()),
            ));
        }
    }
}

fn gate_default_constraint(root: &SyntaxNode, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if version.is_enabled(Feature::DefaultTypeParameterConstraint) {
        return;
    }

    for node in root.descendants().filter(|n| n.kind() == SyntaxKind::DefaultConstraint) {
        out.push(feature_error(
            version,
            Feature::DefaultTypeParameterConstraint,
            TextRange::from(node.text_range()),
        ));
    }
}

fn gate_ref_structs(root: &SyntaxNode, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if version.is_enabled(Feature::RefStructs) {
        return;
    }

    for node in root.descendants().filter(|n| {
        matches!(n.kind(), SyntaxKind::StructDeclaration | SyntaxKind::RecordStructDeclaration)
    }) {
        let ref_kw = support::modifiers(&node).find(|t| t.kind() == SyntaxKind::RefKeyword);
        if let Some(ref_kw) = ref_kw {
            out.push(feature_error(version, Feature::RefStructs, token_range(&ref_kw)));
        }
    }
}

fn gate_static_local_functions(root: &SyntaxNode, version: LanguageVersion, out: &mut Vec<Diagnostic>) {
    if version.is_enabled(Feature::StaticLocalFunctions) {
        return;
    }

    for node in root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::LocalFunctionStatement)
    {
        if let Some(static_kw) = child_token(&node, SyntaxKind::StaticKeyword) {
            out.push(feature_error(version, Feature::StaticLocalFunctions, token_range(&static_kw)));
        }
    }
}

fn child_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

fn token_range(token: &SyntaxToken) -> TextRange {
    TextRange::from(token.text_range())
}

/// `ERR_FeatureInPreview` for preview-only features, otherwise
/// `ERR_FeatureNotAvailableInVersion` naming the first version that has it.
pub(crate) fn feature_error(version: LanguageVersion, feature: Feature, range: TextRange) -> Diagnostic {
    match (version.availability(feature), feature.stable_since()) {
        (FeatureAvailability::Unavailable, Some(min)) => Diagnostic::with_args(
            ErrorCode::FeatureNotAvailableInVersion,
            range,
            [feature.diagnostic_name(), min.as_str()],
        ),
        _ => Diagnostic::with_args(ErrorCode::FeatureInPreview, range, [feature.diagnostic_name()]),
    }
}
