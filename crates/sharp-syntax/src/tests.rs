use pretty_assertions::assert_eq;
use rowan::NodeOrToken;

use crate::{
    check_declarations, debug_dump, lex, lex_with_errors, parse_compilation_unit,
    parse_member_declaration, parse_tree, ast, Diagnostic, ErrorCode, Feature,
    FeatureAvailability, LanguageVersion, OptionsError, ParseOptions, Severity, SourceKind,
    SyntaxKind, SyntaxNode, SyntaxTree, TextRange,
};

/// Trivia-free outline of a tree. Zero-width tokens are the parser's
/// placeholders for missing tokens and are prefixed with `M`.
fn shape(node: &SyntaxNode) -> Vec<String> {
    fn go(node: &SyntaxNode, indent: usize, out: &mut Vec<String>) {
        out.push(format!("{:indent$}{:?}", "", node.kind(), indent = indent));
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => go(&n, indent + 2, out),
                NodeOrToken::Token(t) if t.kind().is_trivia() => {}
                NodeOrToken::Token(t) if t.kind() == SyntaxKind::EndOfFileToken => {
                    out.push(format!("{:indent$}EndOfFileToken", "", indent = indent + 2));
                }
                NodeOrToken::Token(t) if t.text().is_empty() => {
                    out.push(format!("{:indent$}M {:?}", "", t.kind(), indent = indent + 2));
                }
                NodeOrToken::Token(t) => {
                    out.push(format!(
                        "{:indent$}{:?} {:?}",
                        "",
                        t.kind(),
                        t.text(),
                        indent = indent + 2
                    ));
                }
            }
        }
    }

    let mut out = Vec::new();
    go(node, 0, &mut out);
    out
}

fn lines(expected: &[&str]) -> Vec<String> {
    expected.iter().map(|line| line.to_string()).collect()
}

fn parse_at(text: &str, version: LanguageVersion) -> SyntaxTree {
    parse_tree(text, &ParseOptions::regular(version))
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<(ErrorCode, u32, u32)> {
    diagnostics
        .iter()
        .map(|d| (d.code, d.range.start, d.range.end))
        .collect()
}

fn checked(text: &str, version: LanguageVersion) -> Vec<Diagnostic> {
    let tree = parse_at(text, version);
    check_declarations(&tree.syntax(), &tree.options)
}

fn root_kinds(tree: &SyntaxTree) -> Vec<SyntaxKind> {
    tree.syntax().children().map(|n| n.kind()).collect()
}

fn assert_lossless(text: &str, tree: &SyntaxTree) {
    assert_eq!(tree.syntax().text().to_string(), text);
}

#[test]
fn syntax_kind_raw_roundtrip() {
    use rowan::Language;

    for raw in 0..(SyntaxKind::__Last as u16) {
        let kind = crate::SharpLanguage::kind_from_raw(rowan::SyntaxKind(raw));
        assert_eq!(crate::SharpLanguage::kind_to_raw(kind).0, raw);
    }
}

#[test]
fn syntax_kind_classification() {
    assert!(SyntaxKind::WhitespaceTrivia.is_trivia());
    assert!(SyntaxKind::PublicKeyword.is_modifier());
    assert!(SyntaxKind::ClosedKeyword.is_modifier());
    assert!(SyntaxKind::PartialKeyword.is_modifier());
    assert!(!SyntaxKind::ClassKeyword.is_modifier());
    assert!(!SyntaxKind::IdentifierToken.is_trivia());
}

#[test]
fn lexer_tags_contextual_keywords_on_identifiers() {
    let input = "closed class @closed partial";
    let tokens: Vec<(SyntaxKind, SyntaxKind, &str)> = lex(input)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| (t.kind, t.contextual_kind, t.text(input)))
        .collect();

    assert_eq!(
        tokens,
        vec![
            (SyntaxKind::IdentifierToken, SyntaxKind::ClosedKeyword, "closed"),
            (SyntaxKind::ClassKeyword, SyntaxKind::ClassKeyword, "class"),
            (SyntaxKind::IdentifierToken, SyntaxKind::IdentifierToken, "@closed"),
            (SyntaxKind::IdentifierToken, SyntaxKind::PartialKeyword, "partial"),
            (SyntaxKind::EndOfFileToken, SyntaxKind::EndOfFileToken, ""),
        ]
    );
}

#[test]
fn lexer_trivia_kinds() {
    let input = "// c\n/* m */ x\n#region r\n/// doc\n";
    let kinds: Vec<SyntaxKind> = lex(input).into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::SingleLineCommentTrivia,
            SyntaxKind::EndOfLineTrivia,
            SyntaxKind::MultiLineCommentTrivia,
            SyntaxKind::WhitespaceTrivia,
            SyntaxKind::IdentifierToken,
            SyntaxKind::EndOfLineTrivia,
            SyntaxKind::PreprocessorDirectiveTrivia,
            SyntaxKind::EndOfLineTrivia,
            SyntaxKind::SingleLineDocumentationCommentTrivia,
            SyntaxKind::EndOfLineTrivia,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn lexer_reports_unterminated_comment_and_string() {
    let (_, errors) = lex_with_errors("/* open");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::OpenEndedComment);
    assert_eq!(errors[0].range, TextRange::new(0, 2));

    let (tokens, errors) = lex_with_errors("\"abc");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::NewlineInConst);
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteralToken);
    assert_eq!(tokens[0].range, TextRange::new(0, 4));
}

#[test]
fn lexer_error_becomes_parse_diagnostic() {
    let tree = parse_compilation_unit("class C { } /* open");
    assert_eq!(
        codes(&tree.diagnostics),
        vec![(ErrorCode::OpenEndedComment, 12, 14)]
    );
    assert_lossless("class C { } /* open", &tree);
}

#[test]
fn debug_dump_includes_trivia_and_eof() {
    let tree = parse_compilation_unit("class C{}");
    assert_eq!(
        debug_dump(&tree.syntax()),
        "CompilationUnit\n  ClassDeclaration\n    ClassKeyword \"class\"\n    WhitespaceTrivia \" \"\n    IdentifierToken \"C\"\n    OpenBraceToken \"{\"\n    CloseBraceToken \"}\"\n  EndOfFileToken \"\"\n"
    );
}

#[test]
fn closed_class_parses_as_modifier() {
    let text = "closed class C { }";
    let tree = parse_compilation_unit(text);
    assert_eq!(
        shape(&tree.syntax()),
        lines(&[
            "CompilationUnit",
            "  ClassDeclaration",
            "    ClosedKeyword \"closed\"",
            "    ClassKeyword \"class\"",
            "    IdentifierToken \"C\"",
            "    OpenBraceToken \"{\"",
            "    CloseBraceToken \"}\"",
            "  EndOfFileToken",
        ])
    );
    assert_eq!(tree.diagnostics, Vec::new());
    assert_eq!(check_declarations(&tree.syntax(), &tree.options), Vec::new());

    let root = tree.root().unwrap();
    let member = root.members().next().unwrap();
    assert!(member.has_modifier(SyntaxKind::ClosedKeyword));
    assert_eq!(member.name_token().unwrap().text(), "C");
}

#[test]
fn closed_struct_parses_but_fails_declaration_check() {
    let tree = parse_compilation_unit("closed struct C { }");
    assert_eq!(tree.diagnostics, Vec::new());
    assert_eq!(
        root_kinds(&tree),
        vec![SyntaxKind::StructDeclaration]
    );

    let diagnostics = check_declarations(&tree.syntax(), &tree.options);
    assert_eq!(codes(&diagnostics), vec![(ErrorCode::BadMemberFlag, 14, 15)]);
    assert_eq!(diagnostics[0].args, vec!["closed".to_string()]);
    assert_eq!(
        diagnostics[0].message(),
        "the modifier 'closed' is not valid for this item"
    );
}

#[test]
fn closed_on_non_class_types() {
    for (text, start) in [
        ("closed interface C { }", 17),
        ("closed enum C { }", 12),
        ("closed struct C { }", 14),
    ] {
        assert_eq!(
            codes(&checked(text, LanguageVersion::Preview)),
            vec![(ErrorCode::BadMemberFlag, start, start + 1)],
            "{text}"
        );
    }
    assert_eq!(checked("closed record C { }", LanguageVersion::Preview), Vec::new());
}

#[test]
fn partial_before_closed_is_a_local_declaration() {
    let text = "partial closed class C { }";
    let tree = parse_compilation_unit(text);
    assert_eq!(
        shape(&tree.syntax()),
        lines(&[
            "CompilationUnit",
            "  GlobalStatement",
            "    LocalDeclarationStatement",
            "      VariableDeclaration",
            "        IdentifierName",
            "          IdentifierToken \"partial\"",
            "        VariableDeclarator",
            "          IdentifierToken \"closed\"",
            "      M SemicolonToken",
            "  ClassDeclaration",
            "    ClassKeyword \"class\"",
            "    IdentifierToken \"C\"",
            "    OpenBraceToken \"{\"",
            "    CloseBraceToken \"}\"",
            "  EndOfFileToken",
        ])
    );
    assert_eq!(
        codes(&tree.diagnostics),
        vec![(ErrorCode::SemicolonExpected, 15, 20)]
    );
    assert_lossless(text, &tree);
}

#[test]
fn long_run_of_closed_identifiers() {
    let text = vec!["closed"; 100_000].join(" ");
    let tree = parse_compilation_unit(&text);

    assert_eq!(root_kinds(&tree), vec![SyntaxKind::IncompleteMember]);
    assert_eq!(
        codes(&tree.diagnostics),
        vec![(ErrorCode::NamespaceUnexpected, 699_993, 699_999)]
    );
    let modifiers = tree
        .syntax()
        .descendants_with_tokens()
        .filter(|el| el.kind() == SyntaxKind::ClosedKeyword)
        .count();
    assert_eq!(modifiers, 99_999);
    assert_lossless(&text, &tree);
    assert_eq!(check_declarations(&tree.syntax(), &tree.options), Vec::new());
}

#[test]
fn long_run_of_closed_modifiers_before_class() {
    let text = format!("{} class {{ }}", vec!["closed"; 100_000].join(" "));
    let tree = parse_compilation_unit(&text);

    assert_eq!(root_kinds(&tree), vec![SyntaxKind::ClassDeclaration]);
    assert_eq!(
        codes(&tree.diagnostics),
        vec![(ErrorCode::IdentifierExpected, 700_006, 700_007)]
    );
    let diagnostics = check_declarations(&tree.syntax(), &tree.options);
    assert_eq!(codes(&diagnostics), vec![(ErrorCode::DuplicateModifier, 7, 13)]);
    assert_eq!(diagnostics[0].args, vec!["closed".to_string()]);
    assert_lossless(&text, &tree);
}

#[test]
fn closed_partial_enum_reports_partial_then_flag() {
    let diagnostics = checked("closed partial enum C { }", LanguageVersion::Preview);
    assert_eq!(
        codes(&diagnostics),
        vec![
            (ErrorCode::PartialMisplaced, 20, 21),
            (ErrorCode::BadMemberFlag, 20, 21),
        ]
    );
}

#[test]
fn partial_must_be_last_modifier() {
    assert_eq!(
        codes(&checked("partial closed record C { }", LanguageVersion::Preview)),
        vec![(ErrorCode::PartialMisplaced, 0, 7)]
    );
    assert_eq!(checked("closed partial class C { }", LanguageVersion::Preview), Vec::new());
}

#[test]
fn closed_class_below_preview_is_a_preview_feature() {
    for version in [LanguageVersion::CSharp10, LanguageVersion::CSharp14] {
        let diagnostics = checked("closed class C {}", version);
        assert_eq!(codes(&diagnostics), vec![(ErrorCode::FeatureInPreview, 13, 14)]);
        assert_eq!(diagnostics[0].args, vec!["closed classes".to_string()]);
    }
}

#[test]
fn closed_on_members_is_rejected() {
    for (text, start) in [
        ("class C { closed void M() { } }", 22),
        ("class C { closed int x; }", 21),
        ("class C { closed int P { get; set; } }", 21),
        ("class C { closed event Action E; }", 30),
    ] {
        let tree = parse_compilation_unit(text);
        assert_eq!(tree.diagnostics, Vec::new(), "{text}");
        assert_eq!(
            codes(&check_declarations(&tree.syntax(), &tree.options)),
            vec![(ErrorCode::BadMemberFlag, start, start + 1)],
            "{text}"
        );
    }
}

#[test]
fn closed_record_call_in_class_depends_on_version() {
    let text = "class C { closed record(); }";

    let preview = parse_at(text, LanguageVersion::Preview);
    let ctor = preview
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::ConstructorDeclaration)
        .unwrap();
    assert_eq!(
        shape(&ctor),
        lines(&[
            "ConstructorDeclaration",
            "  ClosedKeyword \"closed\"",
            "  IdentifierToken \"record\"",
            "  ParameterList",
            "    OpenParenToken \"(\"",
            "    CloseParenToken \")\"",
            "  SemicolonToken \";\"",
        ])
    );
    assert_eq!(
        codes(&check_declarations(&preview.syntax(), &preview.options)),
        vec![
            (ErrorCode::BadMemberFlag, 17, 23),
            (ErrorCode::MemberNeedsType, 17, 23),
        ]
    );

    let csharp8 = parse_at(text, LanguageVersion::CSharp8);
    let method = csharp8
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::MethodDeclaration)
        .unwrap();
    assert_eq!(
        shape(&method),
        lines(&[
            "MethodDeclaration",
            "  IdentifierName",
            "    IdentifierToken \"closed\"",
            "  IdentifierToken \"record\"",
            "  ParameterList",
            "    OpenParenToken \"(\"",
            "    CloseParenToken \")\"",
            "  SemicolonToken \";\"",
        ])
    );
    assert_eq!(csharp8.diagnostics, Vec::new());
    assert_eq!(check_declarations(&csharp8.syntax(), &csharp8.options), Vec::new());
}

#[test]
fn closed_record_declaration_in_class_depends_on_version() {
    let text = "class C { closed record X(); }";

    let preview = parse_at(text, LanguageVersion::Preview);
    let record = preview
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::RecordDeclaration)
        .unwrap();
    assert_eq!(
        shape(&record),
        lines(&[
            "RecordDeclaration",
            "  ClosedKeyword \"closed\"",
            "  RecordKeyword \"record\"",
            "  IdentifierToken \"X\"",
            "  ParameterList",
            "    OpenParenToken \"(\"",
            "    CloseParenToken \")\"",
            "  SemicolonToken \";\"",
        ])
    );
    assert_eq!(check_declarations(&preview.syntax(), &preview.options), Vec::new());

    let csharp8 = parse_at(text, LanguageVersion::CSharp8);
    let method = csharp8
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::MethodDeclaration)
        .unwrap();
    assert_eq!(
        shape(&method),
        lines(&[
            "MethodDeclaration",
            "  ClosedKeyword \"closed\"",
            "  IdentifierName",
            "    IdentifierToken \"record\"",
            "  IdentifierToken \"X\"",
            "  ParameterList",
            "    OpenParenToken \"(\"",
            "    CloseParenToken \")\"",
            "  SemicolonToken \";\"",
        ])
    );
    assert_eq!(
        codes(&check_declarations(&csharp8.syntax(), &csharp8.options)),
        vec![(ErrorCode::BadMemberFlag, 24, 25)]
    );
}

#[test]
fn type_named_closed() {
    let text = "class closed { }";
    assert_eq!(
        codes(&checked(text, LanguageVersion::Preview)),
        vec![(ErrorCode::ClosedTypeNameDisallowed, 6, 12)]
    );
    assert_eq!(
        codes(&checked(text, LanguageVersion::CSharp14)),
        vec![(ErrorCode::ClosedTypeNameDisallowed, 6, 12)]
    );

    let older = checked(text, LanguageVersion::CSharp10);
    assert_eq!(codes(&older), vec![(ErrorCode::LowerCaseTypeName, 6, 12)]);
    assert_eq!(older[0].severity, Severity::Warning);
    assert!(!older[0].is_error());

    assert_eq!(checked("class @closed { }", LanguageVersion::Preview), Vec::new());
}

#[test]
fn using_alias_named_closed() {
    assert_eq!(
        codes(&checked("using closed = System.Object;", LanguageVersion::Preview)),
        vec![(ErrorCode::ClosedTypeNameDisallowed, 6, 12)]
    );
}

#[test]
fn lone_closed_statement() {
    let tree = parse_compilation_unit("closed");
    assert_eq!(root_kinds(&tree), vec![SyntaxKind::GlobalStatement]);
    assert_eq!(
        codes(&tree.diagnostics),
        vec![
            (ErrorCode::IdentifierExpected, 6, 6),
            (ErrorCode::SemicolonExpected, 6, 6),
        ]
    );

    let tree = parse_compilation_unit("closed;");
    assert!(tree
        .syntax()
        .descendants()
        .any(|n| n.kind() == SyntaxKind::ExpressionStatement));
    assert_eq!(tree.diagnostics, Vec::new());
}

#[test]
fn closed_before_file_scoped_namespace() {
    let text = "closed namespace NS;";
    let tree = parse_compilation_unit(text);
    assert_eq!(
        root_kinds(&tree),
        vec![
            SyntaxKind::GlobalStatement,
            SyntaxKind::FileScopedNamespaceDeclaration,
        ]
    );
    assert_eq!(
        codes(&tree.diagnostics),
        vec![
            (ErrorCode::IdentifierExpected, 7, 16),
            (ErrorCode::SemicolonExpected, 7, 16),
        ]
    );
    assert_eq!(
        codes(&check_declarations(&tree.syntax(), &tree.options)),
        vec![(ErrorCode::FileScopedNamespaceNotBeforeAllMembers, 17, 19)]
    );
    assert_lossless(text, &tree);
}

#[test]
fn closed_as_identifier_in_statements() {
    for text in [
        "void M() { closed closed; }",
        "closed closed;",
        "bool closed; closed = true;",
        "_ = closed () => { };",
    ] {
        let tree = parse_compilation_unit(text);
        assert_eq!(tree.diagnostics, Vec::new(), "{text}");
        assert!(
            root_kinds(&tree)
                .iter()
                .all(|kind| *kind == SyntaxKind::GlobalStatement),
            "{text}"
        );
        assert_lossless(text, &tree);
    }

    let tree = parse_compilation_unit("bool closed; closed = true;");
    assert!(tree
        .syntax()
        .descendants()
        .any(|n| n.kind() == SyntaxKind::SimpleAssignmentExpression));

    let tree = parse_compilation_unit("_ = closed () => { };");
    assert!(tree
        .syntax()
        .descendants()
        .any(|n| n.kind() == SyntaxKind::ParenthesizedLambdaExpression));
}

#[test]
fn closed_as_local_function_return_type() {
    let tree = parse_compilation_unit("closed local() { };");
    let function = tree
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::LocalFunctionStatement)
        .unwrap();
    assert_eq!(
        shape(&function)[..4].to_vec(),
        lines(&[
            "LocalFunctionStatement",
            "  IdentifierName",
            "    IdentifierToken \"closed\"",
            "  IdentifierToken \"local\"",
        ])
    );
    assert_eq!(tree.diagnostics, Vec::new());
}

#[test]
fn closed_modifier_in_parameter_list() {
    let text = "class C { void M(closed int x) { } }";
    let tree = parse_compilation_unit(text);
    assert_eq!(
        codes(&tree.diagnostics),
        vec![
            (ErrorCode::IdentifierExpected, 24, 27),
            (ErrorCode::SyntaxError, 24, 27),
        ]
    );
    assert_eq!(tree.diagnostics[1].args, vec![",".to_string()]);
    assert_lossless(text, &tree);

    let tree = parse_compilation_unit("class C { void M(closed x) { } }");
    assert_eq!(tree.diagnostics, Vec::new());
}

#[test]
fn closed_after_unterminated_base_list() {
    let text = "class C : B\nclosed class D\n{\n}";
    let tree = parse_compilation_unit(text);
    assert_eq!(
        codes(&tree.diagnostics),
        vec![
            (ErrorCode::LbraceExpected, 11, 11),
            (ErrorCode::RbraceExpected, 11, 11),
        ]
    );
    assert_eq!(
        root_kinds(&tree),
        vec![SyntaxKind::ClassDeclaration, SyntaxKind::ClassDeclaration]
    );
    let second = tree.root().unwrap().members().nth(1).unwrap();
    assert!(second.has_modifier(SyntaxKind::ClosedKeyword));
    assert_lossless(text, &tree);
}

#[test]
fn closed_as_base_type_and_type_name() {
    let text = "class C : B, closed\n{\n}\nclass closed\n{\n}";
    let tree = parse_compilation_unit(text);
    assert_eq!(tree.diagnostics, Vec::new());
    assert!(tree
        .syntax()
        .descendants()
        .any(|n| n.kind() == SyntaxKind::BaseList));
    assert_eq!(
        codes(&check_declarations(&tree.syntax(), &tree.options)),
        vec![(ErrorCode::ClosedTypeNameDisallowed, 30, 36)]
    );
}

#[test]
fn feature_gates_report_at_older_versions() {
    let cases: &[(&str, LanguageVersion, (u32, u32), [&str; 2])] = &[
        ("global using System;", LanguageVersion::CSharp9, (0, 6), ["global using directive", "10.0"]),
        ("namespace N;", LanguageVersion::CSharp9, (10, 11), ["file-scoped namespace", "10.0"]),
        ("System.Console.WriteLine();", LanguageVersion::CSharp8, (0, 27), ["top-level statements", "9.0"]),
        ("record struct R(int X);", LanguageVersion::CSharp9, (7, 13), ["record structs", "10.0"]),
        ("ref struct S { }", LanguageVersion::CSharp7, (0, 3), ["ref structs", "7.2"]),
        ("class C { int P { get; init; } }", LanguageVersion::CSharp8, (23, 27), ["init-only setters", "9.0"]),
        ("class C(int x) { }", LanguageVersion::CSharp11, (7, 14), ["primary constructors", "12.0"]),
        ("file class C { }", LanguageVersion::CSharp10, (0, 4), ["file types", "11.0"]),
        ("class C { required int P { get; set; } }", LanguageVersion::CSharp10, (10, 18), ["required members", "11.0"]),
        ("class C { void M() { static void L() { } } }", LanguageVersion::CSharp7_3, (21, 27), ["static local functions", "8.0"]),
        ("class C { void M<T>() where T : default { } }", LanguageVersion::CSharp8, (32, 39), ["default type parameter constraints", "9.0"]),
        ("class C { static I.operator +(C a, C b) => a; }", LanguageVersion::CSharp10, (19, 27), ["static abstract members in interfaces", "11.0"]),
    ];

    for (text, version, (start, end), args) in cases {
        let tree = parse_at(text, *version);
        assert_eq!(
            codes(&tree.diagnostics),
            vec![(ErrorCode::FeatureNotAvailableInVersion, *start, *end)],
            "{text}"
        );
        assert_eq!(tree.diagnostics[0].args, args.to_vec(), "{text}");

        let latest = parse_at(text, LanguageVersion::Preview);
        assert_eq!(latest.diagnostics, Vec::new(), "{text}");
    }
}

#[test]
fn top_level_statements_are_not_gated_in_scripts() {
    let options = ParseOptions::script(LanguageVersion::CSharp8);
    let tree = parse_tree("System.Console.WriteLine();", &options);
    assert_eq!(tree.diagnostics, Vec::new());
}

#[test]
fn language_version_ordering_and_availability() {
    assert!(LanguageVersion::Preview > LanguageVersion::LATEST);
    assert!(LanguageVersion::CSharp7_3 < LanguageVersion::CSharp8);
    assert_eq!(LanguageVersion::default(), LanguageVersion::Preview);

    assert_eq!(
        LanguageVersion::CSharp14.availability(Feature::ClosedClasses),
        FeatureAvailability::Preview
    );
    assert_eq!(
        LanguageVersion::Preview.availability(Feature::ClosedClasses),
        FeatureAvailability::Stable
    );
    assert_eq!(
        LanguageVersion::CSharp8.availability(Feature::Records),
        FeatureAvailability::Unavailable
    );
    assert!(LanguageVersion::CSharp9.supports_records());
    assert!(!LanguageVersion::CSharp14.supports_closed_classes());
    assert!(LanguageVersion::CSharp11.supports_file_types());
}

#[test]
fn language_version_from_str() {
    for (text, expected) in [
        ("7", LanguageVersion::CSharp7),
        ("7.3", LanguageVersion::CSharp7_3),
        ("CSharp7_3", LanguageVersion::CSharp7_3),
        ("10.0", LanguageVersion::CSharp10),
        ("latest", LanguageVersion::LATEST),
        ("Preview", LanguageVersion::Preview),
    ] {
        assert_eq!(text.parse::<LanguageVersion>().unwrap(), expected, "{text}");
    }
    let err = "6".parse::<LanguageVersion>().unwrap_err();
    assert_eq!(err.to_string(), "unknown language version `6`");
}

#[test]
fn options_from_toml() {
    let options = ParseOptions::from_toml_str("language_version = \"10\"\n").unwrap();
    assert_eq!(options, ParseOptions::regular(LanguageVersion::CSharp10));

    let options = ParseOptions::from_toml_str("langversion = \"preview\"\nkind = \"script\"\n").unwrap();
    assert_eq!(options, ParseOptions::script(LanguageVersion::Preview));

    let options =
        ParseOptions::from_toml_str("[parse]\nlanguage_version = 9\n").unwrap();
    assert_eq!(options.language_version, LanguageVersion::CSharp9);
    assert_eq!(options.kind, SourceKind::Regular);

    assert_eq!(ParseOptions::from_toml_str("").unwrap(), ParseOptions::default());

    let err = ParseOptions::from_toml_str("language_version = \"6\"\n").unwrap_err();
    assert!(matches!(err, OptionsError::Toml(_)), "{err:?}");
}

#[test]
fn options_from_missing_path() {
    let err = ParseOptions::from_path("/definitely/not/here/sharp.toml").unwrap_err();
    assert!(matches!(err, OptionsError::Io { .. }), "{err:?}");
}

#[test]
fn parse_member_declaration_at_offset() {
    let text = "class C { }\nclosed void M() { }";
    let member = parse_member_declaration(text, 12, &ParseOptions::default()).unwrap();
    assert_eq!(member.offset, 12);
    assert_eq!(member.diagnostics, Vec::new());
    assert_eq!(member.syntax().kind(), SyntaxKind::MethodDeclaration);
    assert_eq!(member.syntax().text().to_string(), "closed void M() { }");

    let decl = member.member().unwrap();
    assert!(decl.has_modifier(SyntaxKind::ClosedKeyword));
    assert_eq!(decl.name_token().unwrap().text(), "M");
}

#[test]
fn parse_member_declaration_rejects_non_members() {
    let options = ParseOptions::default();
    assert!(parse_member_declaration("", 0, &options).is_none());
    assert!(parse_member_declaration("namespace N {}", 0, &options).is_none());
    assert!(parse_member_declaration(")", 0, &options).is_none());
    assert!(parse_member_declaration("class C {}", 42, &options).is_none());
}

#[test]
fn ast_accessors() {
    let text = "using static System.Math;\nusing Alias = A.B;\nclass C<T> : Base where T : class { int a, b; C() { } }";
    let tree = parse_compilation_unit(text);
    assert_eq!(tree.diagnostics, Vec::new());
    let root = tree.root().unwrap();

    let usings: Vec<ast::UsingDirective> = root.usings().collect();
    assert_eq!(usings.len(), 2);
    assert!(usings[0].is_static());
    assert_eq!(usings[0].name().unwrap().text(), "System.Math");
    assert!(usings[1].alias().is_some());
    assert_eq!(usings[1].name().unwrap().text(), "A.B");

    let class = root.members().next().unwrap();
    let decl = class.as_type_declaration().unwrap();
    assert!(decl.is_class_like());
    assert_eq!(decl.name_token().unwrap().text(), "C");
    assert_eq!(decl.type_parameter_list().unwrap().parameters().count(), 1);
    assert!(decl.base_list().is_some());
    assert_eq!(decl.constraint_clauses().count(), 1);

    let members: Vec<ast::MemberDeclaration> = decl.members().collect();
    assert_eq!(members.len(), 2);
    assert!(matches!(members[0], ast::MemberDeclaration::FieldDeclaration(_)));
    assert_eq!(members[0].name_token().unwrap().text(), "a");
    assert!(matches!(members[1], ast::MemberDeclaration::ConstructorDeclaration(_)));
    assert_eq!(check_declarations(&tree.syntax(), &tree.options), Vec::new());
}

#[test]
fn constructor_named_after_other_type() {
    assert_eq!(
        codes(&checked("class C { D() { } }", LanguageVersion::Preview)),
        vec![(ErrorCode::MemberNeedsType, 10, 11)]
    );
}

#[test]
fn diagnostics_are_sorted_and_displayed() {
    let tree = parse_compilation_unit("class { } class D : { }");
    let starts: Vec<u32> = tree.diagnostics.iter().map(|d| d.range.start).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
    assert!(tree.has_errors());

    let diagnostic = Diagnostic::with_args(ErrorCode::DuplicateModifier, TextRange::new(7, 13), ["closed"]);
    assert_eq!(
        diagnostic.to_string(),
        "7..13: ERR_DuplicateModifier: duplicate 'closed' modifier"
    );
}

#[test]
fn parse_is_lossless_for_messy_input() {
    for text in [
        "",
        "   \n// only trivia\n",
        "closed closed closed",
        "class C { closed closed closed }",
        "namespace N { closed class C : closed where closed : closed { } }",
        "class C { void M() { closed (); } } }}} ((",
        "#region x\nclosed record R(int X) : Base(X);\n#endregion",
        "enum E { A, B = 1, } closed partial class P { int this[int i] => i; }",
    ] {
        let tree = parse_compilation_unit(text);
        assert_lossless(text, &tree);
    }
}

#[test]
fn void_local_function_at_top_level() {
    let tree = parse_at("void M() { }", LanguageVersion::CSharp9);
    assert_eq!(tree.diagnostics, Vec::new());
    assert_eq!(
        shape(&tree.syntax())[..10].to_vec(),
        lines(&[
            "CompilationUnit",
            "  GlobalStatement",
            "    LocalFunctionStatement",
            "      PredefinedType",
            "        VoidKeyword \"void\"",
            "      IdentifierToken \"M\"",
            "      ParameterList",
            "        OpenParenToken \"(\"",
            "        CloseParenToken \")\"",
            "      Block",
        ])
    );
}

const TYPE_NAMED_CLOSED: &str = "public struct closed { public int item; }\n\npublic unsafe class C\n{\n    public closed _closed;\n    public closed[] _array;\n    public closed* _ptr;\n    public closed? _nullable;\n    public delegate*<closed, closed> _funcPtr;\n    public (closed, closed) _tuple;\n}\n";

fn field_type_kinds(tree: &SyntaxTree) -> Vec<SyntaxKind> {
    tree.syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::VariableDeclaration)
        .filter_map(|n| n.first_child())
        .map(|n| n.kind())
        .collect()
}

#[test]
fn fields_typed_closed_before_preview() {
    let tree = parse_at(TYPE_NAMED_CLOSED, LanguageVersion::CSharp14);
    assert_eq!(tree.diagnostics, Vec::new());
    assert_eq!(
        field_type_kinds(&tree),
        vec![
            SyntaxKind::PredefinedType,
            SyntaxKind::IdentifierName,
            SyntaxKind::ArrayType,
            SyntaxKind::PointerType,
            SyntaxKind::NullableType,
            SyntaxKind::FunctionPointerType,
            SyntaxKind::TupleType,
        ]
    );
    assert_eq!(
        codes(&check_declarations(&tree.syntax(), &tree.options)),
        vec![(ErrorCode::ClosedTypeNameDisallowed, 14, 20)]
    );
}

#[test]
fn fields_typed_closed_in_preview() {
    let tree = parse_at(TYPE_NAMED_CLOSED, LanguageVersion::Preview);
    assert_eq!(
        codes(&tree.diagnostics),
        vec![
            (ErrorCode::InvalidMemberDecl, 92, 93),
            (ErrorCode::InvalidMemberDecl, 92, 93),
            (ErrorCode::TypeExpected, 111, 112),
            (ErrorCode::TypeExpected, 139, 140),
            (ErrorCode::TypeExpected, 164, 165),
        ]
    );
    assert_lossless(TYPE_NAMED_CLOSED, &tree);

    let array_field = tree
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::FieldDeclaration)
        .find(|n| n.text().to_string().contains("_array"))
        .unwrap();
    assert_eq!(
        shape(&array_field),
        lines(&[
            "FieldDeclaration",
            "  PublicKeyword \"public\"",
            "  ClosedKeyword \"closed\"",
            "  VariableDeclaration",
            "    ArrayType",
            "      IdentifierName",
            "        M IdentifierToken",
            "      ArrayRankSpecifier",
            "        OpenBracketToken \"[\"",
            "        OmittedArraySizeExpression",
            "        CloseBracketToken \"]\"",
            "    VariableDeclarator",
            "      IdentifierToken \"_array\"",
            "  SemicolonToken \";\"",
        ])
    );

    assert_eq!(
        codes(&check_declarations(&tree.syntax(), &tree.options)),
        vec![
            (ErrorCode::ClosedTypeNameDisallowed, 14, 20),
            (ErrorCode::BadMemberFlag, 114, 120),
            (ErrorCode::BadMemberFlag, 141, 145),
            (ErrorCode::BadMemberFlag, 166, 175),
        ]
    );
}

#[test]
fn closed_modifier_before_type_suffix() {
    for (text, suffix) in [
        ("class C { public closed[] _array; }", 23),
        ("class C { public closed* _ptr; }", 23),
        ("class C { public closed? _nullable; }", 23),
    ] {
        let tree = parse_at(text, LanguageVersion::Preview);
        assert_eq!(
            codes(&tree.diagnostics),
            vec![(ErrorCode::TypeExpected, suffix, suffix + 1)],
            "{text}"
        );
        assert_lossless(text, &tree);

        let tree = parse_at(text, LanguageVersion::CSharp14);
        assert_eq!(tree.diagnostics, Vec::new(), "{text}");
    }
}

#[test]
fn tuple_return_type() {
    let tree = parse_compilation_unit("class C { (int, string) M() => default; }");
    assert_eq!(tree.diagnostics, Vec::new());
    let method = tree
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::MethodDeclaration)
        .unwrap();
    assert_eq!(
        shape(&method)[..12].to_vec(),
        lines(&[
            "MethodDeclaration",
            "  TupleType",
            "    OpenParenToken \"(\"",
            "    TupleElement",
            "      PredefinedType",
            "        IntKeyword \"int\"",
            "    CommaToken \",\"",
            "    TupleElement",
            "      PredefinedType",
            "        StringKeyword \"string\"",
            "    CloseParenToken \")\"",
            "  IdentifierToken \"M\"",
        ])
    );
}

#[test]
fn tuple_types_in_other_positions() {
    let named = parse_compilation_unit("class C { (int count, string name) P => default; }");
    assert_eq!(named.diagnostics, Vec::new());
    let elements: Vec<String> = named
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::TupleElement)
        .map(|n| n.text().to_string().trim().to_string())
        .collect();
    assert_eq!(elements, vec!["int count".to_string(), "string name".to_string()]);
    assert!(named
        .syntax()
        .descendants()
        .any(|n| n.kind() == SyntaxKind::PropertyDeclaration));

    for text in [
        "class C { void M() { (int, int) t = default; } }",
        "class C { void M() { List<(int, string)> xs = null; } }",
    ] {
        let tree = parse_compilation_unit(text);
        assert_eq!(tree.diagnostics, Vec::new(), "{text}");
        let local = tree
            .syntax()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::LocalDeclarationStatement);
        assert!(local.is_some(), "{text}");
        assert!(
            tree.syntax().descendants().any(|n| n.kind() == SyntaxKind::TupleType),
            "{text}"
        );
    }

    let top_level = parse_at("(int, string) M() => default;", LanguageVersion::CSharp9);
    assert_eq!(top_level.diagnostics, Vec::new());
    assert_eq!(root_kinds(&top_level), vec![SyntaxKind::GlobalStatement]);
    assert!(top_level
        .syntax()
        .descendants()
        .any(|n| n.kind() == SyntaxKind::LocalFunctionStatement));
}

#[test]
fn ref_readonly_return() {
    let tree = parse_compilation_unit("class C { public ref readonly int M() => ref x; }");
    assert_eq!(tree.diagnostics, Vec::new());
    let method = tree
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::MethodDeclaration)
        .unwrap();
    assert_eq!(
        shape(&method)[..7].to_vec(),
        lines(&[
            "MethodDeclaration",
            "  PublicKeyword \"public\"",
            "  RefType",
            "    RefKeyword \"ref\"",
            "    ReadOnlyKeyword \"readonly\"",
            "    PredefinedType",
            "      IntKeyword \"int\"",
        ])
    );
    let arrow = method
        .children()
        .find(|n| n.kind() == SyntaxKind::ArrowExpressionClause)
        .unwrap();
    assert_eq!(
        shape(&arrow),
        lines(&[
            "ArrowExpressionClause",
            "  EqualsGreaterThanToken \"=>\"",
            "  RefExpression",
            "    RefKeyword \"ref\"",
            "    IdentifierName",
            "      IdentifierToken \"x\"",
        ])
    );
}

#[test]
fn ref_locals_and_returns() {
    let text = "class C { int[] a; ref int First() { ref int r = ref a[0]; return ref r; } }";
    let tree = parse_compilation_unit(text);
    assert_eq!(tree.diagnostics, Vec::new());
    let count = |kind| tree.syntax().descendants().filter(|n| n.kind() == kind).count();
    assert_eq!(count(SyntaxKind::RefType), 2);
    assert_eq!(count(SyntaxKind::RefExpression), 2);
    assert_eq!(count(SyntaxKind::LocalDeclarationStatement), 1);
}

#[test]
fn interface_operator_without_return_type() {
    let tree = parse_compilation_unit("class C { static I.operator +(C a, C b) => a; }");
    assert_eq!(tree.diagnostics, Vec::new());
    assert!(tree
        .syntax()
        .descendants()
        .any(|n| n.kind() == SyntaxKind::OperatorDeclaration));

    let text = "class C { static I..operator +(C a, C b) => a; }";
    let tree = parse_compilation_unit(text);
    assert_eq!(codes(&tree.diagnostics), vec![(ErrorCode::IdentifierExpected, 19, 20)]);
    assert_lossless(text, &tree);
    let specifier = tree
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::ExplicitInterfaceSpecifier)
        .unwrap();
    assert_eq!(
        shape(&specifier),
        lines(&[
            "ExplicitInterfaceSpecifier",
            "  QualifiedName",
            "    IdentifierName",
            "      IdentifierToken \"I\"",
            "    DotToken \".\"",
            "    IdentifierName",
            "      M IdentifierToken",
            "  DotToken \".\"",
        ])
    );
    let operator = specifier.parent().unwrap();
    assert_eq!(operator.kind(), SyntaxKind::OperatorDeclaration);
}

#[test]
fn malformed_interface_operator_separators() {
    let cases: &[(&str, ErrorCode, (u32, u32))] = &[
        ("class C { static I::operator +(C a, C b) => a; }", ErrorCode::UnexpectedAliasedName, (18, 20)),
        ("class C { static I . . operator +(C a, C b) => a; }", ErrorCode::IdentifierExpected, (21, 22)),
        ("class C { static int I..operator +(C a, C b) => a; }", ErrorCode::IdentifierExpected, (23, 24)),
        ("class C { static explicit I.operator (int x) => x; }", ErrorCode::IdentifierExpected, (37, 38)),
    ];
    for (text, code, (start, end)) in cases {
        let tree = parse_compilation_unit(text);
        assert_eq!(codes(&tree.diagnostics), vec![(*code, *start, *end)], "{text}");
        assert_lossless(text, &tree);
    }
}

#[test]
fn conversion_keyword_in_operator_position() {
    let text = "class C { static N.I.implicit (int x) => x; }";
    let tree = parse_compilation_unit(text);
    assert_eq!(
        codes(&tree.diagnostics),
        vec![
            (ErrorCode::BadOperatorSyntax, 17, 20),
            (ErrorCode::SyntaxError, 21, 29),
            (ErrorCode::OvlUnaryOperatorExpected, 21, 29),
        ]
    );
    assert_eq!(tree.diagnostics[0].args, vec!["+".to_string()]);
    assert_eq!(tree.diagnostics[1].args, vec!["operator".to_string()]);
    assert_lossless(text, &tree);
}

#[test]
fn enum_and_delegate_constraints() {
    let tree = parse_compilation_unit("class C<T> where T : enum { }");
    assert_eq!(codes(&tree.diagnostics), vec![(ErrorCode::NoEnumConstraint, 21, 25)]);
    assert_eq!(tree.diagnostics[0].args, vec!["struct, System.Enum".to_string()]);
    let constraint = tree
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::TypeConstraint)
        .unwrap();
    assert_eq!(
        shape(&constraint),
        lines(&[
            "TypeConstraint",
            "  SkippedTokens",
            "    EnumKeyword \"enum\"",
            "  IdentifierName",
            "    M IdentifierToken",
        ])
    );

    let tree = parse_compilation_unit("class C<T> where T : delegate { }");
    assert_eq!(codes(&tree.diagnostics), vec![(ErrorCode::NoDelegateConstraint, 21, 29)]);
    assert_eq!(tree.diagnostics[0].args, vec!["System.Delegate".to_string()]);
}
