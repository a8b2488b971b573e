//! Navigate a tree by dotted paths such as `config.window.width`.
//!
//! Each segment of a path selects a child of the current list, trying in turn:
//!
//! 1. the first list child whose head is an atom equal to the segment,
//! 2. on the last segment only, the first atom child equal to the segment,
//! 3. the child at the segment's position, when the segment is a decimal
//!    index.
//!
//! Empty segments are ignored, so the empty path names the starting node
//! itself.
use tracing::trace;

use crate::error::SexpError;
use crate::Sexp;

/// Separator between the segments of a path.
pub const PATH_SEPARATOR: char = '.';

fn split_path(path: &str) -> Vec<&str> {
    path.split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Position of the child of `node` selected by `segment`.
fn select(node: &Sexp, segment: &str, last: bool) -> Option<usize> {
    let children = node.children().ok()?;
    children
        .iter()
        .position(|child| child.head_str() == Some(segment))
        .or_else(|| {
            last.then(|| {
                children
                    .iter()
                    .position(|child| matches!(child, Sexp::Atom(text) if text == segment))
            })
            .flatten()
        })
        .or_else(|| {
            segment
                .parse::<usize>()
                .ok()
                .filter(|&index| index < children.len())
        })
}

impl Sexp {
    /// Positions of the children visited while walking `segments`.
    fn resolve_path(&self, segments: &[&str]) -> Option<Vec<usize>> {
        let mut node = self;
        let mut indices = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            let index = select(node, segment, i + 1 == segments.len())?;
            node = node.child(index).ok()?;
            indices.push(index);
        }
        Some(indices)
    }

    /// Finds the descendant named by `path`, or `None` if any segment fails
    /// to resolve.
    pub fn get_child_by_path(&self, path: &str) -> Option<&Sexp> {
        let mut node = self;
        for index in self.resolve_path(&split_path(path))? {
            node = node.child(index).ok()?;
        }
        Some(node)
    }

    pub fn get_child_by_path_mut(&mut self, path: &str) -> Option<&mut Sexp> {
        let indices = self.resolve_path(&split_path(path))?;
        let mut node = self;
        for index in indices {
            node = node.child_mut(index).ok()?;
        }
        Some(node)
    }

    /// Like [`Sexp::get_child_by_path`], but appends a `(segment)` list for
    /// every segment that does not resolve, and returns the final list.
    ///
    /// Only head matches are followed, so calling this again with the same
    /// path returns the node created the first time.
    pub fn create_path(&mut self, path: &str) -> Result<&mut Sexp, SexpError> {
        self.create_path_segments(split_path(path).as_slice())
    }

    /// [`Sexp::create_path`] for a path that is already split into segments.
    pub fn create_path_segments<S: AsRef<str>>(
        &mut self,
        segments: &[S],
    ) -> Result<&mut Sexp, SexpError> {
        let mut node = self;
        for segment in segments {
            let segment = segment.as_ref();
            let children = node.children_mut()?;
            let index = match children
                .iter()
                .position(|child| child.head_str() == Some(segment))
            {
                Some(index) => index,
                None => {
                    trace!(segment, "creating path segment");
                    children.push(Sexp::List(vec![Sexp::unescaped(segment)]));
                    children.len() - 1
                }
            };
            node = &mut children[index];
        }
        Ok(node)
    }
}
