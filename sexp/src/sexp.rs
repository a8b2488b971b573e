//! The s-expression tree.
use std::fmt;
use std::str::FromStr;

use proptest::arbitrary::Arbitrary;
use smol_str::SmolStr;
use tracing::debug;

use crate::error::{AddExpressionError, SexpError};
use crate::escape::unescape;
use crate::parser::{self, ParseError, ParseOptions};
use crate::printer::{Print, Printer};

/// Which of the two shapes a [`Sexp`] has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SexpKind {
    Atom,
    List,
}

/// An s-expression: either an atom holding text or a list of children.
///
/// The default value is the empty list, also called nil.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sexp {
    Atom(SmolStr),
    List(Vec<Sexp>),
}

impl Default for Sexp {
    fn default() -> Self {
        Sexp::List(Vec::new())
    }
}

/// Tears the tree down with a heap stack, so that dropping a deeply nested
/// tree does not recurse once per level.
impl Drop for Sexp {
    fn drop(&mut self) {
        let Sexp::List(children) = self else {
            return;
        };
        if children.iter().all(|child| child.child_count() == 0) {
            return;
        }

        let mut stack = std::mem::take(children);
        while let Some(mut child) = stack.pop() {
            if let Sexp::List(grandchildren) = &mut child {
                stack.append(grandchildren);
            }
        }
    }
}

impl Sexp {
    /// Creates nil, the empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an atom holding `text` exactly, without interpreting any
    /// escape sequences in it.
    pub fn unescaped(text: impl Into<SmolStr>) -> Self {
        Sexp::Atom(text.into())
    }

    /// Creates a list from its children.
    pub fn list(children: impl IntoIterator<Item = Sexp>) -> Self {
        Sexp::List(children.into_iter().collect())
    }

    pub fn kind(&self) -> SexpKind {
        match self {
            Sexp::Atom(_) => SexpKind::Atom,
            Sexp::List(_) => SexpKind::List,
        }
    }

    /// Appends a child to a list.
    ///
    /// Atoms are never promoted to lists: calling this on an atom fails with
    /// [`SexpError::NotAList`] and leaves the atom untouched.
    pub fn add_child(&mut self, child: impl Into<Sexp>) -> Result<(), SexpError> {
        self.children_mut()?.push(child.into());
        Ok(())
    }

    /// Appends an atom holding `text` verbatim.
    pub fn add_child_unescaped(&mut self, text: impl Into<SmolStr>) -> Result<(), SexpError> {
        self.add_child(Sexp::unescaped(text))
    }

    /// Parses `source` and appends every top-level expression in it.
    ///
    /// Nothing is appended when `source` fails to parse.
    pub fn add_expression(&mut self, source: &str) -> Result<(), AddExpressionError> {
        let children = self.children_mut()?;
        children.extend(parser::parse_expressions(source, &ParseOptions::default())?);
        Ok(())
    }

    pub fn children(&self) -> Result<&[Sexp], SexpError> {
        match self {
            Sexp::List(children) => Ok(children.as_slice()),
            Sexp::Atom(_) => Err(SexpError::NotAList),
        }
    }

    pub fn children_mut(&mut self) -> Result<&mut Vec<Sexp>, SexpError> {
        match self {
            Sexp::List(children) => Ok(children),
            Sexp::Atom(_) => Err(SexpError::NotAList),
        }
    }

    /// The first child of a list.
    pub fn head(&self) -> Result<&Sexp, SexpError> {
        self.children()?.first().ok_or(SexpError::EmptyList)
    }

    pub fn head_mut(&mut self) -> Result<&mut Sexp, SexpError> {
        self.children_mut()?
            .first_mut()
            .ok_or(SexpError::EmptyList)
    }

    /// Number of direct children; zero for an atom.
    pub fn child_count(&self) -> usize {
        match self {
            Sexp::List(children) => children.len(),
            Sexp::Atom(_) => 0,
        }
    }

    pub fn child(&self, index: usize) -> Result<&Sexp, SexpError> {
        let children = self.children()?;
        let len = children.len();
        children
            .get(index)
            .ok_or(SexpError::IndexOutOfRange { index, len })
    }

    pub fn child_mut(&mut self, index: usize) -> Result<&mut Sexp, SexpError> {
        let children = self.children_mut()?;
        let len = children.len();
        children
            .get_mut(index)
            .ok_or(SexpError::IndexOutOfRange { index, len })
    }

    /// The text of an atom.
    pub fn as_str(&self) -> Result<&str, SexpError> {
        match self {
            Sexp::Atom(text) => Ok(text.as_str()),
            Sexp::List(_) => Err(SexpError::NotAnAtom),
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Sexp::Atom(_))
    }

    pub fn is_sexp(&self) -> bool {
        matches!(self, Sexp::List(_))
    }

    /// Whether this is the empty list.
    pub fn is_nil(&self) -> bool {
        matches!(self, Sexp::List(children) if children.is_empty())
    }

    /// Whether this is an atom whose text is an integer.
    pub fn is_number(&self) -> bool {
        self.to_number().is_ok()
    }

    pub fn to_number(&self) -> Result<i64, SexpError> {
        let text = self.as_str()?;
        text.parse()
            .map_err(|_| SexpError::NotANumber(SmolStr::new(text)))
    }

    /// Deep structural equality, the same as `==`.
    pub fn equal(&self, other: &Sexp) -> bool {
        self == other
    }

    /// The atom text of this list's head, if it has one.
    pub(crate) fn head_str(&self) -> Option<&str> {
        self.head().ok()?.as_str().ok()
    }
}

/// Builds an atom, interpreting escape sequences such as `\n` in `text`.
///
/// Text with a malformed escape sequence is stored verbatim.
impl From<&str> for Sexp {
    fn from(text: &str) -> Self {
        match unescape(text) {
            Ok(unescaped) => Sexp::Atom(unescaped.into()),
            Err(err) => {
                debug!("keeping atom text verbatim: {err}");
                Sexp::Atom(text.into())
            }
        }
    }
}

impl From<String> for Sexp {
    fn from(text: String) -> Self {
        Sexp::from(text.as_str())
    }
}

impl From<SmolStr> for Sexp {
    fn from(text: SmolStr) -> Self {
        Sexp::from(text.as_str())
    }
}

impl From<Vec<Sexp>> for Sexp {
    fn from(children: Vec<Sexp>) -> Self {
        Sexp::List(children)
    }
}

impl FromIterator<Sexp> for Sexp {
    fn from_iter<I: IntoIterator<Item = Sexp>>(iter: I) -> Self {
        Sexp::list(iter)
    }
}

impl FromStr for Sexp {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        parser::parse(source)
    }
}

impl Print for Sexp {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        match self {
            Sexp::Atom(text) => printer.atom(text),
            Sexp::List(children) => printer.list(|printer| printer.print(children)),
        }
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::printer::to_string(self))
    }
}

impl Arbitrary for Sexp {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        let leaf = any::<String>().prop_map(|text| Sexp::unescaped(text));
        leaf.prop_recursive(8, 256, 10, |inner| {
            proptest::collection::vec(inner, 0..10).prop_map(Sexp::List)
        })
        .boxed()
    }
}

#[cfg(test)]
mod test {
    use super::{Sexp, SexpKind};
    use crate::error::{AddExpressionError, SexpError};
    use crate::parser::ParseErrorKind;
    use rstest::rstest;

    #[test]
    fn nil() {
        let nil = Sexp::new();
        assert!(nil.is_nil());
        assert!(nil.is_sexp());
        assert!(!nil.is_string());
        assert_eq!(nil.child_count(), 0);
        assert_eq!(nil.kind(), SexpKind::List);
        assert_eq!(nil, Sexp::default());
        assert_eq!(nil.head(), Err(SexpError::EmptyList));
    }

    #[test]
    fn escaped_and_unescaped_construction() {
        assert_eq!(Sexp::from(r"a\tb").as_str(), Ok("a\tb"));
        assert_eq!(Sexp::unescaped(r"a\tb").as_str(), Ok(r"a\tb"));
        assert_eq!(Sexp::from(r"bad\q").as_str(), Ok(r"bad\q"));
    }

    #[test]
    fn add_children() {
        let mut list = Sexp::new();
        list.add_child("op").unwrap();
        list.add_child(Sexp::from(vec![Sexp::from("x")])).unwrap();
        list.add_child_unescaped(r"\n").unwrap();

        assert_eq!(list.child_count(), 3);
        assert_eq!(list.head().unwrap().as_str(), Ok("op"));
        assert_eq!(list.child(1).unwrap().child_count(), 1);
        assert_eq!(list.child(2).unwrap().as_str(), Ok(r"\n"));
        assert_eq!(
            list.child(3),
            Err(SexpError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn add_child_to_atom_is_rejected() {
        let mut atom = Sexp::from("x");
        assert_eq!(atom.add_child("y"), Err(SexpError::NotAList));
        assert_eq!(atom, Sexp::from("x"));
    }

    #[test]
    fn add_expression() {
        let mut list = Sexp::from(vec![Sexp::from("begin")]);
        list.add_expression("(f 1) g").unwrap();
        assert_eq!(list.to_string(), "(begin (f 1) g)");

        let err = list.add_expression("(broken").unwrap_err();
        assert!(matches!(
            err,
            AddExpressionError::Parse(ref parse) if parse.kind() == ParseErrorKind::UnclosedList
        ));
        assert_eq!(list.child_count(), 3);

        let err = Sexp::from("atom").add_expression("x").unwrap_err();
        assert!(matches!(err, AddExpressionError::Sexp(SexpError::NotAList)));
    }

    #[test]
    fn wrong_kind_access() {
        let atom = Sexp::from("x");
        assert_eq!(atom.child_count(), 0);
        assert_eq!(atom.child(0), Err(SexpError::NotAList));
        assert_eq!(atom.head(), Err(SexpError::NotAList));
        assert_eq!(Sexp::new().as_str(), Err(SexpError::NotAnAtom));
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case("-7", Some(-7))]
    #[case("+3", Some(3))]
    #[case("0x10", None)]
    #[case("1.5", None)]
    #[case("", None)]
    fn numbers(#[case] text: &str, #[case] expected: Option<i64>) {
        let atom = Sexp::unescaped(text);
        assert_eq!(atom.is_number(), expected.is_some());
        assert_eq!(atom.to_number().ok(), expected);
    }

    #[test]
    fn list_is_not_a_number() {
        assert!(!Sexp::new().is_number());
        assert_eq!(Sexp::new().to_number(), Err(SexpError::NotAnAtom));
    }

    #[test]
    fn drop_deeply_nested_list() {
        let mut sexp = Sexp::from("leaf");
        for _ in 0..200_000 {
            sexp = Sexp::from(vec![sexp, Sexp::from("tail")]);
        }
        assert_eq!(sexp.child_count(), 2);
        drop(sexp);
    }

    #[test]
    fn structural_equality() {
        let a: Sexp = "(x (y z))".parse().unwrap();
        let b: Sexp = "(x (y z))".parse().unwrap();
        let c: Sexp = "(x (y \"z \"))".parse().unwrap();
        assert!(a.equal(&b));
        assert!(!a.equal(&c));
        assert!(!Sexp::from("()").equal(&Sexp::new()));
    }
}
