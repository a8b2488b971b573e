//! Post-order traversal over a tree.
use std::fmt;
use std::iter::FusedIterator;
use std::vec;

use crate::Sexp;

/// One step of a [`PostOrder`] traversal: a node and the list holding it.
#[derive(Debug, Clone, Copy)]
pub struct PostOrderView<'a> {
    node: &'a Sexp,
    parent: Option<&'a Sexp>,
}

impl<'a> PostOrderView<'a> {
    pub fn node(&self) -> &'a Sexp {
        self.node
    }

    /// The list containing this node; `None` for the root of the traversal.
    pub fn parent(&self) -> Option<&'a Sexp> {
        self.parent
    }

    /// Whether this node is the head of its parent.
    pub fn is_head(&self) -> bool {
        self.parent
            .and_then(|parent| parent.head().ok())
            .is_some_and(|head| std::ptr::eq(head, self.node))
    }

    /// For a list, its own first child (`None` for nil). For an atom, the
    /// head of the nearest enclosing list (`None` for a root atom).
    pub fn head(&self) -> Option<&'a Sexp> {
        match self.node {
            Sexp::List(children) => children.first(),
            Sexp::Atom(_) => self.parent?.head().ok(),
        }
    }
}

impl fmt::Display for PostOrderView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elem: {}, parent: ", self.node)?;
        match self.parent {
            Some(parent) => write!(f, "{parent}")?,
            None => f.write_str("nil")?,
        }
        f.write_str(", head: ")?;
        match self.head() {
            Some(head) => write!(f, "{head}"),
            None => f.write_str("nil"),
        }
    }
}

/// Visits every node of a tree, children before their parent.
///
/// The whole visitation order is materialised when the traversal is created:
/// an explicit stack walks the tree root first, pushing children in order, and
/// the resulting work-list is then yielded back to front. Siblings thus come
/// out left to right, each after all of its own descendants.
#[derive(Debug, Clone)]
pub struct PostOrder<'a> {
    worklist: vec::IntoIter<PostOrderView<'a>>,
}

impl<'a> PostOrder<'a> {
    pub fn new(root: &'a Sexp) -> Self {
        let mut worklist = Vec::new();
        let mut stack = vec![PostOrderView {
            node: root,
            parent: None,
        }];

        while let Some(view) = stack.pop() {
            worklist.push(view);
            if let Sexp::List(children) = view.node {
                stack.extend(children.iter().map(|child| PostOrderView {
                    node: child,
                    parent: Some(view.node),
                }));
            }
        }

        Self {
            worklist: worklist.into_iter(),
        }
    }
}

impl<'a> Iterator for PostOrder<'a> {
    type Item = PostOrderView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.worklist.next_back()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.worklist.size_hint()
    }
}

impl DoubleEndedIterator for PostOrder<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.worklist.next()
    }
}

impl ExactSizeIterator for PostOrder<'_> {}

impl FusedIterator for PostOrder<'_> {}

impl Sexp {
    /// Post-order traversal of this tree.
    pub fn post_order(&self) -> PostOrder<'_> {
        PostOrder::new(self)
    }
}

#[cfg(test)]
mod test {
    use super::PostOrder;
    use crate::Sexp;

    #[test]
    fn children_before_parents() {
        let root: Sexp = "(a (b c) d)".parse().unwrap();
        let order: Vec<String> = root
            .post_order()
            .map(|view| view.node().to_string())
            .collect();
        assert_eq!(
            order,
            vec!["a", "b", "c", "(b c)", "d", "(a (b c) d)", "((a (b c) d))"]
        );
    }

    #[test]
    fn heads_and_parents() {
        let root: Sexp = "(op x (inner y))".parse().unwrap();
        let views: Vec<_> = PostOrder::new(&root).collect();

        let op = &views[0];
        assert_eq!(op.node().as_str(), Ok("op"));
        assert!(op.is_head());
        assert_eq!(op.head().unwrap().as_str(), Ok("op"));

        let x = &views[1];
        assert!(!x.is_head());
        assert_eq!(x.head().unwrap().as_str(), Ok("op"));

        let y = &views[3];
        assert_eq!(y.node().as_str(), Ok("y"));
        assert_eq!(y.head().unwrap().as_str(), Ok("inner"));

        let inner = &views[4];
        assert_eq!(inner.node().to_string(), "(inner y)");
        assert!(!inner.is_head());
        assert_eq!(inner.head().unwrap().as_str(), Ok("inner"));
        assert!(std::ptr::eq(inner.parent().unwrap(), root.head().unwrap()));

        let last = views.last().unwrap();
        assert!(std::ptr::eq(last.node(), &root));
        assert!(last.parent().is_none());
        assert!(std::ptr::eq(last.head().unwrap(), root.head().unwrap()));
        assert!(!last.is_head());
    }

    #[test]
    fn head_of_nil_and_root_atom() {
        let root: Sexp = "(() x)".parse().unwrap();
        let nil = root.post_order().next().unwrap();
        assert!(nil.node().is_nil());
        assert!(nil.is_head());
        assert!(nil.head().is_none());

        let atom = Sexp::from("solo");
        let view = atom.post_order().next().unwrap();
        assert!(view.head().is_none());
        assert!(!view.is_head());
    }

    #[test]
    fn identical_atoms_are_distinguished() {
        let root: Sexp = "(x x)".parse().unwrap();
        let heads: Vec<bool> = root.post_order().map(|view| view.is_head()).collect();
        assert_eq!(heads, vec![true, false, true, false]);
    }

    #[test]
    fn display() {
        let root: Sexp = "(f a)".parse().unwrap();
        let view = root.post_order().nth(1).unwrap();
        assert_eq!(view.to_string(), "elem: a, parent: (f a), head: f");
        let view = root.post_order().nth(2).unwrap();
        assert_eq!(view.to_string(), "elem: (f a), parent: ((f a)), head: f");
        let view = root.post_order().last().unwrap();
        assert_eq!(view.to_string(), "elem: ((f a)), parent: nil, head: (f a)");
    }

    #[test]
    fn single_atom_and_reverse() {
        let atom = Sexp::from("solo");
        assert_eq!(atom.post_order().len(), 1);

        let root: Sexp = "(a b)".parse().unwrap();
        let reversed: Vec<String> = root
            .post_order()
            .rev()
            .map(|view| view.node().to_string())
            .collect();
        assert_eq!(reversed, vec!["((a b))", "(a b)", "b", "a"]);
    }
}
