use pretty_assertions::assert_eq;
use sharp_syntax::{
    check_declarations, parse_tree, AstNode, ErrorCode, LanguageVersion, ParseOptions, SyntaxKind,
};

fn permutations(items: &[&'static str]) -> Vec<Vec<&'static str>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for (idx, first) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(idx);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            out.push(tail);
        }
    }
    out
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn closed_in_any_modifier_position_at_top_level() {
    init_tracing();
    let options = ParseOptions::regular(LanguageVersion::Preview);

    for order in permutations(&["public", "closed", "abstract"]) {
        let text = format!("{} partial class C {{ }}", order.join(" "));
        let tree = parse_tree(&text, &options);
        assert_eq!(tree.diagnostics, Vec::new(), "{text}");

        let root = tree.root().unwrap();
        let member = root.members().next().unwrap();
        assert_eq!(member.syntax().kind(), SyntaxKind::ClassDeclaration, "{text}");
        let modifiers: Vec<String> = member.modifiers().map(|m| m.text().to_string()).collect();
        let mut expected: Vec<String> = order.iter().map(|m| m.to_string()).collect();
        expected.push("partial".to_string());
        assert_eq!(modifiers, expected, "{text}");

        assert_eq!(check_declarations(&tree.syntax(), &options), Vec::new(), "{text}");
    }
}

#[test]
fn closed_in_any_modifier_position_in_type_body() {
    init_tracing();
    let options = ParseOptions::regular(LanguageVersion::Preview);

    for order in permutations(&["internal", "closed", "sealed"]) {
        let text = format!("class Outer {{ {} class C {{ }} }}", order.join(" "));
        let tree = parse_tree(&text, &options);
        assert_eq!(tree.diagnostics, Vec::new(), "{text}");

        let nested = tree
            .syntax()
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::ClassDeclaration)
            .nth(1)
            .unwrap();
        let closed = nested
            .children_with_tokens()
            .filter(|el| el.kind() == SyntaxKind::ClosedKeyword)
            .count();
        assert_eq!(closed, 1, "{text}");
        assert_eq!(check_declarations(&tree.syntax(), &options), Vec::new(), "{text}");
    }
}

#[test]
fn closed_modifier_before_preview_reports_feature() {
    init_tracing();
    let options = ParseOptions::regular(LanguageVersion::CSharp14);

    for order in permutations(&["public", "closed"]) {
        let text = format!("{} class C {{ }}", order.join(" "));
        let tree = parse_tree(&text, &options);
        assert_eq!(tree.diagnostics, Vec::new(), "{text}");

        let codes: Vec<ErrorCode> = check_declarations(&tree.syntax(), &options)
            .into_iter()
            .map(|d| d.code)
            .collect();
        assert_eq!(codes, vec![ErrorCode::FeatureInPreview], "{text}");
    }
}

#[test]
fn repeated_closed_is_a_duplicate() {
    init_tracing();
    let options = ParseOptions::default();
    let tree = parse_tree("closed public closed class C { }", &options);
    assert_eq!(tree.diagnostics, Vec::new());

    let diagnostics = check_declarations(&tree.syntax(), &options);
    let codes: Vec<(ErrorCode, u32)> = diagnostics.iter().map(|d| (d.code, d.range.start)).collect();
    assert_eq!(codes, vec![(ErrorCode::DuplicateModifier, 14)]);
}
