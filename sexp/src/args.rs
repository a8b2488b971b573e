//! The arguments of a list: everything after its head.
use std::fmt;
use std::slice;

use delegate::delegate;

use crate::printer::{Print, Printer};
use crate::Sexp;

/// A borrowed view over the children of a list, minus its head.
///
/// The view is empty for atoms, for nil, and for lists holding only a head.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    items: &'a [Sexp],
}

impl<'a> Arguments<'a> {
    pub(crate) fn new(sexp: &'a Sexp) -> Self {
        let items: &'a [Sexp] = match sexp {
            Sexp::List(children) => children.get(1..).unwrap_or_default(),
            Sexp::Atom(_) => &[],
        };
        Self { items }
    }

    pub fn as_slice(&self) -> &'a [Sexp] {
        self.items
    }

    delegate! {
        to self.items {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn get(&self, index: usize) -> Option<&'a Sexp>;
            pub fn first(&self) -> Option<&'a Sexp>;
            pub fn last(&self) -> Option<&'a Sexp>;
            pub fn iter(&self) -> slice::Iter<'a, Sexp>;
        }
    }
}

impl<'a> IntoIterator for Arguments<'a> {
    type Item = &'a Sexp;
    type IntoIter = slice::Iter<'a, Sexp>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Print for Arguments<'_> {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.print(self.items)
    }
}

impl fmt::Display for Arguments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::printer::to_string(self))
    }
}

impl Sexp {
    /// The arguments of this list, that is every child but the head.
    pub fn arguments(&self) -> Arguments<'_> {
        Arguments::new(self)
    }

    /// Mutable access to the arguments of this list.
    pub fn arguments_mut(&mut self) -> &mut [Sexp] {
        match self {
            Sexp::List(children) => children.get_mut(1..).unwrap_or_default(),
            Sexp::Atom(_) => &mut [],
        }
    }
}

#[cfg(test)]
mod test {
    use crate::Sexp;
    use rstest::rstest;

    #[rstest]
    #[case("(add 1 2)", &["1", "2"])]
    #[case("(nullary)", &[])]
    #[case("()", &[])]
    #[case("atom", &[])]
    fn arguments(#[case] source: &str, #[case] expected: &[&str]) {
        let root: Sexp = source.parse().unwrap();
        let sexp = root.head().unwrap();
        let args: Vec<&str> = sexp
            .arguments()
            .into_iter()
            .map(|arg| arg.as_str().unwrap())
            .collect();
        assert_eq!(args, expected);
        assert_eq!(sexp.arguments().len(), expected.len());
    }

    #[test]
    fn nested_arguments_and_display() {
        let root: Sexp = "(f (g x) \"y z\")".parse().unwrap();
        let args = root.head().unwrap().arguments();
        assert_eq!(args.first().unwrap().child_count(), 2);
        assert_eq!(args.to_string(), "(g x) \"y z\"");
    }

    #[test]
    fn mutate_arguments() {
        let mut root: Sexp = "(inc 1 2)".parse().unwrap();
        let call = root.head_mut().unwrap();
        for arg in call.arguments_mut() {
            let n = arg.to_number().unwrap();
            *arg = Sexp::unescaped((n + 1).to_string());
        }
        assert_eq!(root.to_string(), "((inc 2 3))");
    }
}
