//! Diagnostic catalog shared by the lexer, the parser, the feature gate pass and
//! the declaration checker.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TextRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Closed set of diagnostic kinds.
///
/// Only the kind, the location and the arguments are a stable contract; the
/// rendered message text is informational.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Lexical.
    UnexpectedCharacter,
    NewlineInConst,
    UnterminatedStringLit,
    EmptyCharConst,
    OpenEndedComment,

    // Syntax.
    IdentifierExpected,
    SemicolonExpected,
    CloseParenExpected,
    LbraceExpected,
    RbraceExpected,
    SyntaxError,
    InvalidMemberDecl,
    InvalidExprTerm,
    TypeExpected,
    GetOrSetExpected,
    AddOrRemoveExpected,
    NamespaceUnexpected,
    EOFExpected,
    BadOperatorSyntax,
    OvlUnaryOperatorExpected,
    OvlBinaryOperatorExpected,
    OvlOperatorExpected,
    UnexpectedAliasedName,
    NoEnumConstraint,
    NoDelegateConstraint,
    TopLevelStatementAfterNamespaceOrType,
    NamespaceNotAllowedInScript,
    InsufficientStack,

    // Language version.
    FeatureInPreview,
    FeatureNotAvailableInVersion,

    // Declarations.
    BadMemberFlag,
    DuplicateModifier,
    ClosedTypeNameDisallowed,
    LowerCaseTypeName,
    PartialMisplaced,
    MemberNeedsType,
    FileScopedNamespaceNotBeforeAllMembers,
}

impl ErrorCode {
    /// Catalog name, e.g. `ERR_SemicolonExpected`.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnexpectedCharacter => "ERR_UnexpectedCharacter",
            ErrorCode::NewlineInConst => "ERR_NewlineInConst",
            ErrorCode::UnterminatedStringLit => "ERR_UnterminatedStringLit",
            ErrorCode::EmptyCharConst => "ERR_EmptyCharConst",
            ErrorCode::OpenEndedComment => "ERR_OpenEndedComment",
            ErrorCode::IdentifierExpected => "ERR_IdentifierExpected",
            ErrorCode::SemicolonExpected => "ERR_SemicolonExpected",
            ErrorCode::CloseParenExpected => "ERR_CloseParenExpected",
            ErrorCode::LbraceExpected => "ERR_LbraceExpected",
            ErrorCode::RbraceExpected => "ERR_RbraceExpected",
            ErrorCode::SyntaxError => "ERR_SyntaxError",
            ErrorCode::InvalidMemberDecl => "ERR_InvalidMemberDecl",
            ErrorCode::InvalidExprTerm => "ERR_InvalidExprTerm",
            ErrorCode::TypeExpected => "ERR_TypeExpected",
            ErrorCode::GetOrSetExpected => "ERR_GetOrSetExpected",
            ErrorCode::AddOrRemoveExpected => "ERR_AddOrRemoveExpected",
            ErrorCode::NamespaceUnexpected => "ERR_NamespaceUnexpected",
            ErrorCode::EOFExpected => "ERR_EOFExpected",
            ErrorCode::BadOperatorSyntax => "ERR_BadOperatorSyntax",
            ErrorCode::OvlUnaryOperatorExpected => "ERR_OvlUnaryOperatorExpected",
            ErrorCode::OvlBinaryOperatorExpected => "ERR_OvlBinaryOperatorExpected",
            ErrorCode::OvlOperatorExpected => "ERR_OvlOperatorExpected",
            ErrorCode::UnexpectedAliasedName => "ERR_UnexpectedAliasedName",
            ErrorCode::NoEnumConstraint => "ERR_NoEnumConstraint",
            ErrorCode::NoDelegateConstraint => "ERR_NoDelegateConstraint",
            ErrorCode::TopLevelStatementAfterNamespaceOrType => {
                "ERR_TopLevelStatementAfterNamespaceOrType"
            }
            ErrorCode::NamespaceNotAllowedInScript => "ERR_NamespaceNotAllowedInScript",
            ErrorCode::InsufficientStack => "ERR_InsufficientStack",
            ErrorCode::FeatureInPreview => "ERR_FeatureInPreview",
            ErrorCode::FeatureNotAvailableInVersion => "ERR_FeatureNotAvailableInVersion",
            ErrorCode::BadMemberFlag => "ERR_BadMemberFlag",
            ErrorCode::DuplicateModifier => "ERR_DuplicateModifier",
            ErrorCode::ClosedTypeNameDisallowed => "ERR_ClosedTypeNameDisallowed",
            ErrorCode::LowerCaseTypeName => "WRN_LowerCaseTypeName",
            ErrorCode::PartialMisplaced => "ERR_PartialMisplaced",
            ErrorCode::MemberNeedsType => "ERR_MemberNeedsType",
            ErrorCode::FileScopedNamespaceNotBeforeAllMembers => {
                "ERR_FileScopedNamespaceNotBeforeAllMembers"
            }
        }
    }

    pub const fn default_severity(self) -> Severity {
        match self {
            ErrorCode::LowerCaseTypeName => Severity::Warning,
            _ => Severity::Error,
        }
    }

    fn template(self) -> &'static str {
        match self {
            ErrorCode::UnexpectedCharacter => "unexpected character '{0}'",
            ErrorCode::NewlineInConst => "newline in constant",
            ErrorCode::UnterminatedStringLit => "unterminated string literal",
            ErrorCode::EmptyCharConst => "empty character literal",
            ErrorCode::OpenEndedComment => "end-of-file found, '*/' expected",
            ErrorCode::IdentifierExpected => "identifier expected",
            ErrorCode::SemicolonExpected => "; expected",
            ErrorCode::CloseParenExpected => ") expected",
            ErrorCode::LbraceExpected => "{ expected",
            ErrorCode::RbraceExpected => "} expected",
            ErrorCode::SyntaxError => "syntax error, '{0}' expected",
            ErrorCode::InvalidMemberDecl => "invalid token '{0}' in a member declaration",
            ErrorCode::InvalidExprTerm => "invalid expression term '{0}'",
            ErrorCode::TypeExpected => "type expected",
            ErrorCode::GetOrSetExpected => "a get or set accessor expected",
            ErrorCode::AddOrRemoveExpected => "an add or remove accessor expected",
            ErrorCode::NamespaceUnexpected => {
                "a namespace cannot directly contain members such as fields, methods or statements"
            }
            ErrorCode::EOFExpected => "type or namespace definition, or end-of-file expected",
            ErrorCode::BadOperatorSyntax => "overloaded operator declaration expected, e.g. '{0}'",
            ErrorCode::OvlUnaryOperatorExpected => "overloadable unary operator expected",
            ErrorCode::OvlBinaryOperatorExpected => "overloadable binary operator expected",
            ErrorCode::OvlOperatorExpected => "overloadable operator expected",
            ErrorCode::UnexpectedAliasedName => "unexpected use of an aliased name",
            ErrorCode::NoEnumConstraint => {
                "keyword 'enum' cannot be used as a constraint. Did you mean '{0}'?"
            }
            ErrorCode::NoDelegateConstraint => {
                "keyword 'delegate' cannot be used as a constraint. Did you mean '{0}'?"
            }
            ErrorCode::TopLevelStatementAfterNamespaceOrType => {
                "top-level statements must precede namespace and type declarations"
            }
            ErrorCode::NamespaceNotAllowedInScript => {
                "cannot use a namespace declaration in a script"
            }
            ErrorCode::InsufficientStack => {
                "an expression or declaration is too long or complex to parse"
            }
            ErrorCode::FeatureInPreview => "the feature '{0}' is currently in preview",
            ErrorCode::FeatureNotAvailableInVersion => {
                "feature '{0}' is not available; use language version {1} or greater"
            }
            ErrorCode::BadMemberFlag => "the modifier '{0}' is not valid for this item",
            ErrorCode::DuplicateModifier => "duplicate '{0}' modifier",
            ErrorCode::ClosedTypeNameDisallowed => "types and aliases cannot be named 'closed'",
            ErrorCode::LowerCaseTypeName => {
                "the type name '{0}' only contains lower-cased ascii characters"
            }
            ErrorCode::PartialMisplaced => {
                "the 'partial' modifier can only appear immediately before 'class', 'record', \
                 'struct', 'interface', or a method return type"
            }
            ErrorCode::MemberNeedsType => "method must have a return type",
            ErrorCode::FileScopedNamespaceNotBeforeAllMembers => {
                "file-scoped namespace must precede all other members in a file"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    pub range: TextRange,
    pub args: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, range: TextRange) -> Self {
        Self {
            severity: code.default_severity(),
            code,
            range,
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(code: ErrorCode, range: TextRange, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::new(code, range)
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Human-readable message with `{n}` placeholders filled from `args`.
    pub fn message(&self) -> String {
        let mut out = self.code.template().to_string();
        for (idx, arg) in self.args.iter().enumerate() {
            out = out.replace(&format!("{{{idx}}}"), arg);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}: {}: {}",
            self.range.start,
            self.range.end,
            self.code,
            self.message()
        )
    }
}

/// Stable sort by start offset; diagnostics at the same offset keep emission order.
pub(crate) fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|d| d.range.start);
}
