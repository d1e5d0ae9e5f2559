use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sharp_syntax::{check_declarations, parse_tree, LanguageVersion, ParseOptions, SourceKind};

const MAX_FRAGMENTS: usize = 256;

fn fragment() -> impl Strategy<Value = String> {
    const FRAGMENTS: &[&str] = &[
        " ", "\n", "\r\n", "\t", "closed", "partial", "record", "class", "struct", "interface",
        "enum", "namespace", "using", "global", "file", "required", "async", "ref", "static",
        "public", "abstract", "void", "int", "var", "new", "return", "if", "else", "while",
        "where", "get", "set", "init", "operator", "this", "C", "x", "@closed", "1", "\"s\"",
        "'c'", "{", "}", "(", ")", "[", "]", "<", ">", ",", ";", ":", ".", "=", "=>", "+", "?",
        "//c\n", "/* c */", "/*", "#if X\n", "\"", "$\"{x}\"",
    ];
    proptest::sample::select(FRAGMENTS).prop_map(ToString::to_string)
}

fn source() -> impl Strategy<Value = String> {
    proptest::collection::vec(fragment(), 0..MAX_FRAGMENTS).prop_map(|fragments| fragments.concat())
}

fn version() -> impl Strategy<Value = LanguageVersion> {
    proptest::sample::select(LanguageVersion::ALL.to_vec())
}

fn kind() -> impl Strategy<Value = SourceKind> {
    prop_oneof![Just(SourceKind::Regular), Just(SourceKind::Script)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn tree_text_matches_input(input in source(), version in version(), kind in kind()) {
        let options = ParseOptions::new(version, kind);
        let tree = parse_tree(&input, &options);
        prop_assert_eq!(tree.syntax().text().to_string(), input);
    }

    #[test]
    fn parsing_is_deterministic(input in source(), version in version()) {
        let options = ParseOptions::regular(version);
        let first = parse_tree(&input, &options);
        let second = parse_tree(&input, &options);
        prop_assert_eq!(&first.green, &second.green);
        prop_assert_eq!(&first.diagnostics, &second.diagnostics);
        prop_assert_eq!(
            check_declarations(&first.syntax(), &options),
            check_declarations(&second.syntax(), &options)
        );
    }

    #[test]
    fn diagnostics_are_ordered_and_in_bounds(input in source(), version in version()) {
        let tree = parse_tree(&input, &ParseOptions::regular(version));
        let len = input.len() as u32;
        let mut last = 0;
        for diagnostic in &tree.diagnostics {
            prop_assert!(diagnostic.range.start <= diagnostic.range.end);
            prop_assert!(diagnostic.range.end <= len);
            prop_assert!(diagnostic.range.start >= last);
            last = diagnostic.range.start;
        }
    }
}

#[test]
fn regression_unterminated_comment_after_closed() {
    let input = "closed /*";
    let tree = parse_tree(input, &ParseOptions::default());
    assert_eq!(tree.syntax().text().to_string(), input);
}
