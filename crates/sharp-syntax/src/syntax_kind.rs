use rowan::Language;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Unified syntax kind for tokens, trivia and nodes.
///
/// Contextual keywords (`closed`, `partial`, `record`, ...) are lexed as
/// [`SyntaxKind::IdentifierToken`]; the parser re-emits them with their keyword
/// kind once it has decided they act as keywords.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_repr, Deserialize_repr,
)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Trivia ---
    WhitespaceTrivia,
    EndOfLineTrivia,
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    SingleLineDocumentationCommentTrivia,
    PreprocessorDirectiveTrivia,

    // --- Identifiers & literals ---
    IdentifierToken,
    NumericLiteralToken,
    CharacterLiteralToken,
    StringLiteralToken,
    InterpolatedStringToken,
    /// A character the lexer could not make sense of.
    BadToken,
    EndOfFileToken,

    // --- Keywords (reserved) ---
    AbstractKeyword,
    AsKeyword,
    BaseKeyword,
    BoolKeyword,
    BreakKeyword,
    ByteKeyword,
    CaseKeyword,
    CatchKeyword,
    CharKeyword,
    CheckedKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DecimalKeyword,
    DefaultKeyword,
    DelegateKeyword,
    DoKeyword,
    DoubleKeyword,
    ElseKeyword,
    EnumKeyword,
    EventKeyword,
    ExplicitKeyword,
    ExternKeyword,
    FalseKeyword,
    FinallyKeyword,
    FixedKeyword,
    FloatKeyword,
    ForKeyword,
    ForEachKeyword,
    GotoKeyword,
    IfKeyword,
    ImplicitKeyword,
    InKeyword,
    IntKeyword,
    InterfaceKeyword,
    InternalKeyword,
    IsKeyword,
    LockKeyword,
    LongKeyword,
    NamespaceKeyword,
    NewKeyword,
    NullKeyword,
    ObjectKeyword,
    OperatorKeyword,
    OutKeyword,
    OverrideKeyword,
    ParamsKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadOnlyKeyword,
    RefKeyword,
    ReturnKeyword,
    SByteKeyword,
    SealedKeyword,
    ShortKeyword,
    SizeOfKeyword,
    StackAllocKeyword,
    StaticKeyword,
    StringKeyword,
    StructKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    UIntKeyword,
    ULongKeyword,
    UncheckedKeyword,
    UnsafeKeyword,
    UShortKeyword,
    UsingKeyword,
    VirtualKeyword,
    VoidKeyword,
    VolatileKeyword,
    WhileKeyword,

    // --- Contextual keywords ---
    AddKeyword,
    AsyncKeyword,
    AwaitKeyword,
    ClosedKeyword,
    FileKeyword,
    GetKeyword,
    GlobalKeyword,
    InitKeyword,
    NotNullKeyword,
    PartialKeyword,
    RecordKeyword,
    RemoveKeyword,
    RequiredKeyword,
    SetKeyword,
    UnmanagedKeyword,
    WhereKeyword,

    // --- Punctuation / operators ---
    TildeToken,
    ExclamationToken,
    PercentToken,
    CaretToken,
    AmpersandToken,
    AsteriskToken,
    OpenParenToken,
    CloseParenToken,
    MinusToken,
    PlusToken,
    EqualsToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    BarToken,
    ColonToken,
    SemicolonToken,
    LessThanToken,
    CommaToken,
    GreaterThanToken,
    DotToken,
    QuestionToken,
    SlashToken,
    DotDotToken,
    BarBarToken,
    AmpersandAmpersandToken,
    MinusMinusToken,
    PlusPlusToken,
    ColonColonToken,
    QuestionQuestionToken,
    MinusGreaterThanToken,
    ExclamationEqualsToken,
    EqualsEqualsToken,
    EqualsGreaterThanToken,
    LessThanEqualsToken,
    LessThanLessThanToken,
    LessThanLessThanEqualsToken,
    GreaterThanEqualsToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    SlashEqualsToken,
    AsteriskEqualsToken,
    BarEqualsToken,
    AmpersandEqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    CaretEqualsToken,
    PercentEqualsToken,
    QuestionQuestionEqualsToken,

    // --- Nodes: compilation unit & declarations ---
    CompilationUnit,
    UsingDirective,
    NameEquals,
    NamespaceDeclaration,
    FileScopedNamespaceDeclaration,
    GlobalStatement,
    AttributeList,
    AttributeTargetSpecifier,
    Attribute,
    AttributeArgumentList,
    AttributeArgument,
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    EnumMemberDeclaration,
    RecordDeclaration,
    RecordStructDeclaration,
    DelegateDeclaration,
    BaseList,
    SimpleBaseType,
    PrimaryConstructorBaseType,
    TypeParameterList,
    TypeParameter,
    TypeParameterConstraintClause,
    ClassConstraint,
    StructConstraint,
    ConstructorConstraint,
    DefaultConstraint,
    UnmanagedConstraint,
    NotNullConstraint,
    TypeConstraint,
    FieldDeclaration,
    EventFieldDeclaration,
    EventDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    BaseConstructorInitializer,
    ThisConstructorInitializer,
    DestructorDeclaration,
    PropertyDeclaration,
    IndexerDeclaration,
    OperatorDeclaration,
    ConversionOperatorDeclaration,
    ExplicitInterfaceSpecifier,
    AccessorList,
    GetAccessorDeclaration,
    SetAccessorDeclaration,
    InitAccessorDeclaration,
    AddAccessorDeclaration,
    RemoveAccessorDeclaration,
    UnknownAccessorDeclaration,
    ArrowExpressionClause,
    ParameterList,
    BracketedParameterList,
    Parameter,
    VariableDeclaration,
    VariableDeclarator,
    EqualsValueClause,
    IncompleteMember,
    SkippedTokens,

    // --- Nodes: names & types ---
    IdentifierName,
    GenericName,
    TypeArgumentList,
    QualifiedName,
    AliasQualifiedName,
    PredefinedType,
    ArrayType,
    ArrayRankSpecifier,
    OmittedArraySizeExpression,
    NullableType,
    PointerType,
    FunctionPointerType,
    FunctionPointerParameterList,
    FunctionPointerParameter,
    TupleType,
    TupleElement,
    RefType,

    // --- Nodes: statements ---
    Block,
    LocalDeclarationStatement,
    LocalFunctionStatement,
    ExpressionStatement,
    EmptyStatement,
    IfStatement,
    ElseClause,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForEachStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    TryStatement,
    CatchClause,
    CatchDeclaration,
    FinallyClause,
    SwitchStatement,
    SwitchSection,
    CaseSwitchLabel,
    DefaultSwitchLabel,
    UsingStatement,
    LockStatement,

    // --- Nodes: expressions ---
    NumericLiteralExpression,
    StringLiteralExpression,
    CharacterLiteralExpression,
    InterpolatedStringExpression,
    TrueLiteralExpression,
    FalseLiteralExpression,
    NullLiteralExpression,
    DefaultLiteralExpression,
    ThisExpression,
    BaseExpression,
    ParenthesizedExpression,
    SimpleMemberAccessExpression,
    InvocationExpression,
    ElementAccessExpression,
    ArgumentList,
    BracketedArgumentList,
    Argument,
    ObjectCreationExpression,
    ImplicitObjectCreationExpression,
    ArrayCreationExpression,
    ObjectInitializerExpression,
    ArrayInitializerExpression,
    CastExpression,
    TypeOfExpression,
    DefaultExpression,
    AwaitExpression,
    RefExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    IsExpression,
    AsExpression,
    ConditionalExpression,
    SimpleAssignmentExpression,
    CompoundAssignmentExpression,
    SimpleLambdaExpression,
    ParenthesizedLambdaExpression,

    // --- Special ---
    /// Fallback used for raw values outside the known range.
    Error,

    __Last,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WhitespaceTrivia
                | SyntaxKind::EndOfLineTrivia
                | SyntaxKind::SingleLineCommentTrivia
                | SyntaxKind::MultiLineCommentTrivia
                | SyntaxKind::SingleLineDocumentationCommentTrivia
                | SyntaxKind::PreprocessorDirectiveTrivia
        )
    }

    pub fn is_reserved_keyword(self) -> bool {
        (SyntaxKind::AbstractKeyword as u16..=SyntaxKind::WhileKeyword as u16)
            .contains(&(self as u16))
    }

    pub fn is_contextual_keyword(self) -> bool {
        (SyntaxKind::AddKeyword as u16..=SyntaxKind::WhereKeyword as u16).contains(&(self as u16))
    }

    pub fn is_keyword(self) -> bool {
        self.is_reserved_keyword() || self.is_contextual_keyword()
    }

    pub fn is_punctuation(self) -> bool {
        (SyntaxKind::TildeToken as u16..=SyntaxKind::QuestionQuestionEqualsToken as u16)
            .contains(&(self as u16))
    }

    pub fn is_token(self) -> bool {
        (self as u16) < SyntaxKind::CompilationUnit as u16
    }

    pub fn is_predefined_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::BoolKeyword
                | SyntaxKind::ByteKeyword
                | SyntaxKind::SByteKeyword
                | SyntaxKind::ShortKeyword
                | SyntaxKind::UShortKeyword
                | SyntaxKind::IntKeyword
                | SyntaxKind::UIntKeyword
                | SyntaxKind::LongKeyword
                | SyntaxKind::ULongKeyword
                | SyntaxKind::DoubleKeyword
                | SyntaxKind::FloatKeyword
                | SyntaxKind::DecimalKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::CharKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::VoidKeyword
        )
    }

    /// Modifiers that are always keywords, regardless of what follows them.
    pub fn is_non_contextual_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::InternalKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::SealedKeyword
                | SyntaxKind::VirtualKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::ExternKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::ReadOnlyKeyword
                | SyntaxKind::UnsafeKeyword
                | SyntaxKind::VolatileKeyword
                | SyntaxKind::FixedKeyword
                | SyntaxKind::ConstKeyword
        )
    }

    /// Any kind the parser emits as a declaration modifier.
    pub fn is_modifier(self) -> bool {
        self.is_non_contextual_modifier()
            || matches!(
                self,
                SyntaxKind::RefKeyword
                    | SyntaxKind::PartialKeyword
                    | SyntaxKind::AsyncKeyword
                    | SyntaxKind::ClosedKeyword
                    | SyntaxKind::FileKeyword
                    | SyntaxKind::RequiredKeyword
            )
    }

    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            "abstract" => SyntaxKind::AbstractKeyword,
            "as" => SyntaxKind::AsKeyword,
            "base" => SyntaxKind::BaseKeyword,
            "bool" => SyntaxKind::BoolKeyword,
            "break" => SyntaxKind::BreakKeyword,
            "byte" => SyntaxKind::ByteKeyword,
            "case" => SyntaxKind::CaseKeyword,
            "catch" => SyntaxKind::CatchKeyword,
            "char" => SyntaxKind::CharKeyword,
            "checked" => SyntaxKind::CheckedKeyword,
            "class" => SyntaxKind::ClassKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "decimal" => SyntaxKind::DecimalKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "delegate" => SyntaxKind::DelegateKeyword,
            "do" => SyntaxKind::DoKeyword,
            "double" => SyntaxKind::DoubleKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "enum" => SyntaxKind::EnumKeyword,
            "event" => SyntaxKind::EventKeyword,
            "explicit" => SyntaxKind::ExplicitKeyword,
            "extern" => SyntaxKind::ExternKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "finally" => SyntaxKind::FinallyKeyword,
            "fixed" => SyntaxKind::FixedKeyword,
            "float" => SyntaxKind::FloatKeyword,
            "for" => SyntaxKind::ForKeyword,
            "foreach" => SyntaxKind::ForEachKeyword,
            "goto" => SyntaxKind::GotoKeyword,
            "if" => SyntaxKind::IfKeyword,
            "implicit" => SyntaxKind::ImplicitKeyword,
            "in" => SyntaxKind::InKeyword,
            "int" => SyntaxKind::IntKeyword,
            "interface" => SyntaxKind::InterfaceKeyword,
            "internal" => SyntaxKind::InternalKeyword,
            "is" => SyntaxKind::IsKeyword,
            "lock" => SyntaxKind::LockKeyword,
            "long" => SyntaxKind::LongKeyword,
            "namespace" => SyntaxKind::NamespaceKeyword,
            "new" => SyntaxKind::NewKeyword,
            "null" => SyntaxKind::NullKeyword,
            "object" => SyntaxKind::ObjectKeyword,
            "operator" => SyntaxKind::OperatorKeyword,
            "out" => SyntaxKind::OutKeyword,
            "override" => SyntaxKind::OverrideKeyword,
            "params" => SyntaxKind::ParamsKeyword,
            "private" => SyntaxKind::PrivateKeyword,
            "protected" => SyntaxKind::ProtectedKeyword,
            "public" => SyntaxKind::PublicKeyword,
            "readonly" => SyntaxKind::ReadOnlyKeyword,
            "ref" => SyntaxKind::RefKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "sbyte" => SyntaxKind::SByteKeyword,
            "sealed" => SyntaxKind::SealedKeyword,
            "short" => SyntaxKind::ShortKeyword,
            "sizeof" => SyntaxKind::SizeOfKeyword,
            "stackalloc" => SyntaxKind::StackAllocKeyword,
            "static" => SyntaxKind::StaticKeyword,
            "string" => SyntaxKind::StringKeyword,
            "struct" => SyntaxKind::StructKeyword,
            "switch" => SyntaxKind::SwitchKeyword,
            "this" => SyntaxKind::ThisKeyword,
            "throw" => SyntaxKind::ThrowKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "try" => SyntaxKind::TryKeyword,
            "typeof" => SyntaxKind::TypeOfKeyword,
            "uint" => SyntaxKind::UIntKeyword,
            "ulong" => SyntaxKind::ULongKeyword,
            "unchecked" => SyntaxKind::UncheckedKeyword,
            "unsafe" => SyntaxKind::UnsafeKeyword,
            "ushort" => SyntaxKind::UShortKeyword,
            "using" => SyntaxKind::UsingKeyword,
            "virtual" => SyntaxKind::VirtualKeyword,
            "void" => SyntaxKind::VoidKeyword,
            "volatile" => SyntaxKind::VolatileKeyword,
            "while" => SyntaxKind::WhileKeyword,
            _ => return None,
        })
    }

    pub fn from_contextual_keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            "add" => SyntaxKind::AddKeyword,
            "async" => SyntaxKind::AsyncKeyword,
            "await" => SyntaxKind::AwaitKeyword,
            "closed" => SyntaxKind::ClosedKeyword,
            "file" => SyntaxKind::FileKeyword,
            "get" => SyntaxKind::GetKeyword,
            "global" => SyntaxKind::GlobalKeyword,
            "init" => SyntaxKind::InitKeyword,
            "notnull" => SyntaxKind::NotNullKeyword,
            "partial" => SyntaxKind::PartialKeyword,
            "record" => SyntaxKind::RecordKeyword,
            "remove" => SyntaxKind::RemoveKeyword,
            "required" => SyntaxKind::RequiredKeyword,
            "set" => SyntaxKind::SetKeyword,
            "unmanaged" => SyntaxKind::UnmanagedKeyword,
            "where" => SyntaxKind::WhereKeyword,
            _ => return None,
        })
    }

    /// Source text of fixed-spelling tokens, used for diagnostics arguments.
    pub fn token_text(self) -> Option<&'static str> {
        Some(match self {
            SyntaxKind::TildeToken => "~",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::BarToken => "|",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::DotToken => ".",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::DotDotToken => "..",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::ColonColonToken => "::",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::MinusGreaterThanToken => "->",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            SyntaxKind::OperatorKeyword => "operator",
            SyntaxKind::IdentifierToken => "identifier",
            _ => return self.keyword_text(),
        })
    }

    fn keyword_text(self) -> Option<&'static str> {
        Some(match self {
            SyntaxKind::ClassKeyword => "class",
            SyntaxKind::StructKeyword => "struct",
            SyntaxKind::InterfaceKeyword => "interface",
            SyntaxKind::EnumKeyword => "enum",
            SyntaxKind::DelegateKeyword => "delegate",
            SyntaxKind::NamespaceKeyword => "namespace",
            SyntaxKind::WhileKeyword => "while",
            SyntaxKind::NewKeyword => "new",
            SyntaxKind::InKeyword => "in",
            SyntaxKind::ThisKeyword => "this",
            SyntaxKind::BaseKeyword => "base",
            SyntaxKind::CatchKeyword => "catch",
            SyntaxKind::FinallyKeyword => "finally",
            SyntaxKind::RecordKeyword => "record",
            SyntaxKind::ClosedKeyword => "closed",
            SyntaxKind::PartialKeyword => "partial",
            _ => return None,
        })
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(value: SyntaxKind) -> Self {
        rowan::SyntaxKind(value as u16)
    }
}

/// Rowan language marker for the C# dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SharpLanguage {}

impl Language for SharpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        if raw.0 < SyntaxKind::__Last as u16 {
            // SAFETY: We've verified the numeric value is within the enum range.
            unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
        } else {
            SyntaxKind::Error
        }
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}
