//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(Rule, Rule);
ast_node!(DefinedAs, DefinedAs);
ast_node!(Alternation, Alternation);
ast_node!(Concatenation, Concatenation);
ast_node!(Repetition, Repetition);
ast_node!(Repeat, Repeat);
ast_node!(Element, Element);
ast_node!(Group, Group);
ast_node!(Opt, Opt);
ast_node!(CharVal, CharVal);
ast_node!(NumVal, NumVal);
ast_node!(ProseVal, ProseVal);

/// What an element holds: a rule name or one of the bracketed/terminal forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementValue {
    RuleName(SyntaxToken),
    Group(Group),
    Opt(Opt),
    CharVal(CharVal),
    NumVal(NumVal),
    ProseVal(ProseVal),
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(|t| !t.kind().is_trivia())
}

impl Root {
    pub fn rules(&self) -> impl Iterator<Item = Rule> + '_ {
        self.0.children().filter_map(Rule::cast)
    }
}

impl Rule {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn defined_as(&self) -> Option<DefinedAs> {
        self.0.children().find_map(DefinedAs::cast)
    }

    pub fn body(&self) -> Option<Alternation> {
        self.0.children().find_map(Alternation::cast)
    }
}

impl DefinedAs {
    /// `=/` adds alternatives to an earlier definition.
    pub fn is_incremental(&self) -> bool {
        tokens(&self.0).any(|t| t.kind() == SyntaxKind::EqualsSlash)
    }
}

impl Alternation {
    pub fn concatenations(&self) -> impl Iterator<Item = Concatenation> + '_ {
        self.0.children().filter_map(Concatenation::cast)
    }
}

impl Concatenation {
    pub fn repetitions(&self) -> impl Iterator<Item = Repetition> + '_ {
        self.0.children().filter_map(Repetition::cast)
    }
}

impl Repetition {
    pub fn repeat(&self) -> Option<Repeat> {
        self.0.children().find_map(Repeat::cast)
    }

    pub fn element(&self) -> Option<Element> {
        self.0.children().find_map(Element::cast)
    }
}

impl Repeat {
    /// Digit run before `*`, or the exact count when there is no `*`.
    pub fn lower(&self) -> Option<SyntaxToken> {
        tokens(&self.0)
            .take_while(|t| t.kind() != SyntaxKind::Star)
            .find(|t| t.kind() == SyntaxKind::Number)
    }

    pub fn star(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Star)
    }

    /// Digit run after `*`.
    pub fn upper(&self) -> Option<SyntaxToken> {
        tokens(&self.0)
            .skip_while(|t| t.kind() != SyntaxKind::Star)
            .find(|t| t.kind() == SyntaxKind::Number)
    }
}

impl Element {
    pub fn value(&self) -> Option<ElementValue> {
        if let Some(name) = tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id) {
            return Some(ElementValue::RuleName(name));
        }
        self.0.children().find_map(|node| match node.kind() {
            SyntaxKind::Group => Group::cast(node).map(ElementValue::Group),
            SyntaxKind::Opt => Opt::cast(node).map(ElementValue::Opt),
            SyntaxKind::CharVal => CharVal::cast(node).map(ElementValue::CharVal),
            SyntaxKind::NumVal => NumVal::cast(node).map(ElementValue::NumVal),
            SyntaxKind::ProseVal => ProseVal::cast(node).map(ElementValue::ProseVal),
            _ => None,
        })
    }
}

impl Group {
    pub fn body(&self) -> Option<Alternation> {
        self.0.children().find_map(Alternation::cast)
    }
}

impl Opt {
    pub fn bodies(&self) -> impl Iterator<Item = Alternation> + '_ {
        self.0.children().filter_map(Alternation::cast)
    }
}

impl CharVal {
    /// Text between the quotes. `None` for `""`.
    pub fn value(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::StrVal)
    }
}

impl NumVal {
    pub fn base(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::NumBase)
    }

    /// Digit runs and their `.`/`-` separators, in source order.
    pub fn parts(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0).filter(|t| {
            matches!(
                t.kind(),
                SyntaxKind::NumDigits | SyntaxKind::Dot | SyntaxKind::Dash
            )
        })
    }
}
