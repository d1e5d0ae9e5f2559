//! Typed wrappers over the declaration-level tree shapes.

use crate::ast::{support, AstNode};
use crate::parser::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

macro_rules! ast_node {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $name {
                syntax: SyntaxNode,
            }

            impl AstNode for $name {
                fn can_cast(kind: SyntaxKind) -> bool {
                    kind == SyntaxKind::$name
                }

                fn cast(syntax: SyntaxNode) -> Option<Self> {
                    Self::can_cast(syntax.kind()).then_some(Self { syntax })
                }

                fn syntax(&self) -> &SyntaxNode {
                    &self.syntax
                }
            }
        )*
    };
}

macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident($ty:ty)),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant($ty)),*
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                false $(|| <$ty>::can_cast(kind))*
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                let kind = syntax.kind();
                $(
                    if <$ty>::can_cast(kind) {
                        return <$ty>::cast(syntax).map(Self::$variant);
                    }
                )*
                None
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $(Self::$variant(it) => it.syntax()),*
                }
            }
        }
    };
}

ast_node!(
    CompilationUnit,
    UsingDirective,
    NameEquals,
    NamespaceDeclaration,
    FileScopedNamespaceDeclaration,
    GlobalStatement,
    AttributeList,
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    EnumMemberDeclaration,
    RecordDeclaration,
    RecordStructDeclaration,
    DelegateDeclaration,
    BaseList,
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
    DestructorDeclaration,
    PropertyDeclaration,
    IndexerDeclaration,
    OperatorDeclaration,
    ConversionOperatorDeclaration,
    IncompleteMember,
    ExplicitInterfaceSpecifier,
    AccessorList,
    ParameterList,
    BracketedParameterList,
    Parameter,
    VariableDeclaration,
    VariableDeclarator,
    LocalFunctionStatement,
    IdentifierName,
    GenericName,
    QualifiedName,
    AliasQualifiedName,
);

ast_enum!(
    /// A name as written in `using` directives, namespaces and interface specifiers.
    Name {
        IdentifierName(IdentifierName),
        GenericName(GenericName),
        QualifiedName(QualifiedName),
        AliasQualifiedName(AliasQualifiedName),
    }
);

ast_enum!(
    TypeDeclaration {
        ClassDeclaration(ClassDeclaration),
        StructDeclaration(StructDeclaration),
        InterfaceDeclaration(InterfaceDeclaration),
        EnumDeclaration(EnumDeclaration),
        RecordDeclaration(RecordDeclaration),
        RecordStructDeclaration(RecordStructDeclaration),
        DelegateDeclaration(DelegateDeclaration),
    }
);

ast_enum!(
    /// Anything that can appear in a namespace or type body.
    MemberDeclaration {
        TypeDeclaration(TypeDeclaration),
        FieldDeclaration(FieldDeclaration),
        EventFieldDeclaration(EventFieldDeclaration),
        EventDeclaration(EventDeclaration),
        MethodDeclaration(MethodDeclaration),
        ConstructorDeclaration(ConstructorDeclaration),
        DestructorDeclaration(DestructorDeclaration),
        PropertyDeclaration(PropertyDeclaration),
        IndexerDeclaration(IndexerDeclaration),
        OperatorDeclaration(OperatorDeclaration),
        ConversionOperatorDeclaration(ConversionOperatorDeclaration),
        IncompleteMember(IncompleteMember),
        NamespaceDeclaration(NamespaceDeclaration),
        FileScopedNamespaceDeclaration(FileScopedNamespaceDeclaration),
        GlobalStatement(GlobalStatement),
    }
);

ast_enum!(
    TypeParameterConstraint {
        ClassConstraint(ClassConstraint),
        StructConstraint(StructConstraint),
        ConstructorConstraint(ConstructorConstraint),
        DefaultConstraint(DefaultConstraint),
        UnmanagedConstraint(UnmanagedConstraint),
        NotNullConstraint(NotNullConstraint),
        TypeConstraint(TypeConstraint),
    }
);

impl CompilationUnit {
    pub fn usings(&self) -> impl Iterator<Item = UsingDirective> + '_ {
        support::children::<UsingDirective>(&self.syntax)
    }

    pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
        support::children::<AttributeList>(&self.syntax)
    }

    pub fn members(&self) -> impl Iterator<Item = MemberDeclaration> + '_ {
        support::children::<MemberDeclaration>(&self.syntax)
    }

    pub fn eof_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::EndOfFileToken)
    }
}

impl UsingDirective {
    pub fn global_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::GlobalKeyword)
    }

    pub fn is_static(&self) -> bool {
        support::token(&self.syntax, SyntaxKind::StaticKeyword).is_some()
    }

    pub fn alias(&self) -> Option<NameEquals> {
        support::child::<NameEquals>(&self.syntax)
    }

    pub fn name(&self) -> Option<Name> {
        support::child::<Name>(&self.syntax)
    }
}

impl NameEquals {
    pub fn name(&self) -> Option<IdentifierName> {
        support::child::<IdentifierName>(&self.syntax)
    }
}

impl NamespaceDeclaration {
    pub fn name(&self) -> Option<Name> {
        support::child::<Name>(&self.syntax)
    }

    pub fn members(&self) -> impl Iterator<Item = MemberDeclaration> + '_ {
        support::children::<MemberDeclaration>(&self.syntax)
    }
}

impl FileScopedNamespaceDeclaration {
    pub fn name(&self) -> Option<Name> {
        support::child::<Name>(&self.syntax)
    }

    pub fn members(&self) -> impl Iterator<Item = MemberDeclaration> + '_ {
        support::children::<MemberDeclaration>(&self.syntax)
    }
}

impl Name {
    /// Source text without trivia, e.g. `A.B<C>`.
    pub fn text(&self) -> String {
        self.syntax()
            .descendants_with_tokens()
            .filter_map(|el| el.into_token())
            .filter(|tok| !tok.kind().is_trivia())
            .map(|tok| tok.text().to_string())
            .collect()
    }
}

impl IdentifierName {
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }
}

impl GenericName {
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }
}

impl TypeDeclaration {
    /// The `class`, `struct`, `interface`, `enum`, `record` or `delegate` keyword.
    pub fn keyword(&self) -> Option<SyntaxToken> {
        let kind = match self {
            TypeDeclaration::ClassDeclaration(_) => SyntaxKind::ClassKeyword,
            TypeDeclaration::StructDeclaration(_) => SyntaxKind::StructKeyword,
            TypeDeclaration::InterfaceDeclaration(_) => SyntaxKind::InterfaceKeyword,
            TypeDeclaration::EnumDeclaration(_) => SyntaxKind::EnumKeyword,
            TypeDeclaration::RecordDeclaration(_) | TypeDeclaration::RecordStructDeclaration(_) => {
                SyntaxKind::RecordKeyword
            }
            TypeDeclaration::DelegateDeclaration(_) => SyntaxKind::DelegateKeyword,
        };
        support::token(self.syntax(), kind)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(self.syntax())
    }

    pub fn type_parameter_list(&self) -> Option<TypeParameterList> {
        support::child::<TypeParameterList>(self.syntax())
    }

    /// Record and primary constructor parameters, or the delegate's parameters.
    pub fn parameter_list(&self) -> Option<ParameterList> {
        support::child::<ParameterList>(self.syntax())
    }

    pub fn base_list(&self) -> Option<BaseList> {
        support::child::<BaseList>(self.syntax())
    }

    pub fn constraint_clauses(&self) -> impl Iterator<Item = TypeParameterConstraintClause> + '_ {
        support::children::<TypeParameterConstraintClause>(self.syntax())
    }

    pub fn members(&self) -> impl Iterator<Item = MemberDeclaration> + '_ {
        support::children::<MemberDeclaration>(self.syntax())
    }

    /// `class` and `record class` declarations: the only places `closed` is valid.
    pub fn is_class_like(&self) -> bool {
        matches!(
            self,
            TypeDeclaration::ClassDeclaration(_) | TypeDeclaration::RecordDeclaration(_)
        )
    }
}

impl EnumDeclaration {
    pub fn variants(&self) -> impl Iterator<Item = EnumMemberDeclaration> + '_ {
        support::children::<EnumMemberDeclaration>(&self.syntax)
    }
}

impl RecordDeclaration {
    /// `record class` spelled out.
    pub fn class_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::ClassKeyword)
    }
}

impl RecordStructDeclaration {
    pub fn struct_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::StructKeyword)
    }
}

impl TypeParameterList {
    pub fn parameters(&self) -> impl Iterator<Item = TypeParameter> + '_ {
        support::children::<TypeParameter>(&self.syntax)
    }
}

impl TypeParameter {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }
}

impl TypeParameterConstraintClause {
    pub fn name(&self) -> Option<IdentifierName> {
        support::child::<IdentifierName>(&self.syntax)
    }

    pub fn constraints(&self) -> impl Iterator<Item = TypeParameterConstraint> + '_ {
        support::children::<TypeParameterConstraint>(&self.syntax)
    }
}

impl MemberDeclaration {
    /// Modifier tokens in source order, duplicates included.
    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        support::modifiers(self.syntax())
    }

    pub fn has_modifier(&self, kind: SyntaxKind) -> bool {
        self.modifiers().any(|tok| tok.kind() == kind)
    }

    pub fn as_type_declaration(&self) -> Option<&TypeDeclaration> {
        match self {
            MemberDeclaration::TypeDeclaration(it) => Some(it),
            _ => None,
        }
    }

    /// The token naming the declaration, where diagnostics about the whole
    /// declaration are reported.
    ///
    /// Fields and field-like events are named by their first declarator,
    /// indexers by `this` and operators by their `operator` keyword.
    pub fn name_token(&self) -> Option<SyntaxToken> {
        match self {
            MemberDeclaration::TypeDeclaration(it) => it.name_token(),
            MemberDeclaration::FieldDeclaration(it) => first_declarator_name(&it.syntax),
            MemberDeclaration::EventFieldDeclaration(it) => first_declarator_name(&it.syntax),
            MemberDeclaration::IndexerDeclaration(it) => {
                support::token(&it.syntax, SyntaxKind::ThisKeyword)
            }
            MemberDeclaration::OperatorDeclaration(it) => {
                support::token(&it.syntax, SyntaxKind::OperatorKeyword)
            }
            MemberDeclaration::ConversionOperatorDeclaration(it) => {
                support::token(&it.syntax, SyntaxKind::OperatorKeyword)
            }
            MemberDeclaration::EventDeclaration(_)
            | MemberDeclaration::MethodDeclaration(_)
            | MemberDeclaration::ConstructorDeclaration(_)
            | MemberDeclaration::DestructorDeclaration(_)
            | MemberDeclaration::PropertyDeclaration(_) => support::ident_token(self.syntax()),
            MemberDeclaration::IncompleteMember(_)
            | MemberDeclaration::NamespaceDeclaration(_)
            | MemberDeclaration::FileScopedNamespaceDeclaration(_)
            | MemberDeclaration::GlobalStatement(_) => None,
        }
    }

    pub fn explicit_interface_specifier(&self) -> Option<ExplicitInterfaceSpecifier> {
        support::child::<ExplicitInterfaceSpecifier>(self.syntax())
    }
}

fn first_declarator_name(node: &SyntaxNode) -> Option<SyntaxToken> {
    let declaration = support::child::<VariableDeclaration>(node)?;
    let name = declaration.declarators().next()?.name_token();
    name
}

impl MethodDeclaration {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn type_parameter_list(&self) -> Option<TypeParameterList> {
        support::child::<TypeParameterList>(&self.syntax)
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        support::child::<ParameterList>(&self.syntax)
    }

    pub fn constraint_clauses(&self) -> impl Iterator<Item = TypeParameterConstraintClause> + '_ {
        support::children::<TypeParameterConstraintClause>(&self.syntax)
    }
}

impl ConstructorDeclaration {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        support::child::<ParameterList>(&self.syntax)
    }
}

impl PropertyDeclaration {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn accessor_list(&self) -> Option<AccessorList> {
        support::child::<AccessorList>(&self.syntax)
    }
}

impl IndexerDeclaration {
    pub fn parameter_list(&self) -> Option<BracketedParameterList> {
        support::child::<BracketedParameterList>(&self.syntax)
    }

    pub fn accessor_list(&self) -> Option<AccessorList> {
        support::child::<AccessorList>(&self.syntax)
    }
}

impl EventDeclaration {
    pub fn accessor_list(&self) -> Option<AccessorList> {
        support::child::<AccessorList>(&self.syntax)
    }
}

impl FieldDeclaration {
    pub fn declaration(&self) -> Option<VariableDeclaration> {
        support::child::<VariableDeclaration>(&self.syntax)
    }
}

impl EventFieldDeclaration {
    pub fn declaration(&self) -> Option<VariableDeclaration> {
        support::child::<VariableDeclaration>(&self.syntax)
    }
}

impl OperatorDeclaration {
    pub fn operator_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::OperatorKeyword)
    }
}

impl ConversionOperatorDeclaration {
    pub fn operator_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::OperatorKeyword)
    }
}

impl ExplicitInterfaceSpecifier {
    pub fn name(&self) -> Option<Name> {
        support::child::<Name>(&self.syntax)
    }

    pub fn dot_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::DotToken)
    }
}

impl AccessorList {
    /// Accessor declarations, including unknown ones.
    pub fn accessors(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.syntax.children().filter(|n| {
            matches!(
                n.kind(),
                SyntaxKind::GetAccessorDeclaration
                    | SyntaxKind::SetAccessorDeclaration
                    | SyntaxKind::InitAccessorDeclaration
                    | SyntaxKind::AddAccessorDeclaration
                    | SyntaxKind::RemoveAccessorDeclaration
                    | SyntaxKind::UnknownAccessorDeclaration
            )
        })
    }
}

impl ParameterList {
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        support::children::<Parameter>(&self.syntax)
    }
}

impl BracketedParameterList {
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        support::children::<Parameter>(&self.syntax)
    }
}

impl Parameter {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }
}

impl VariableDeclaration {
    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> + '_ {
        support::children::<VariableDeclarator>(&self.syntax)
    }
}

impl VariableDeclarator {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }
}

impl LocalFunctionStatement {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        support::modifiers(&self.syntax)
    }
}
