//! Single child or list of children
//!
//! Group, repeat and optional accept `!group digit` as well as `!group [digit]` or
//! `!group []`. The decoder keeps whichever shape it was given, so the field is a
//! two-case sum instead of a plain node.

use super::node::Node;

#[derive(Debug, Clone)]
pub enum Children {
    Single(Box<Node>),
    Many(Vec<Node>),
}

impl Children {
    pub fn single(node: Node) -> Self {
        Children::Single(Box::new(node))
    }

    pub fn many(nodes: Vec<Node>) -> Self {
        Children::Many(nodes)
    }

    /// The children as a slice, a single child being a one element slice
    pub fn as_slice(&self) -> &[Node] {
        match self {
            Children::Single(node) => std::slice::from_ref(node.as_ref()),
            Children::Many(nodes) => nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Children::Single(_))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.as_slice().iter()
    }
}

// `Single(x)` and `Many([x])` denote the same grammar. The encoder always writes the
// list shape, so equality has to see through the difference for round trips to hold.
impl PartialEq for Children {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Children {}

impl From<Node> for Children {
    fn from(node: Node) -> Self {
        Children::single(node)
    }
}

impl From<Vec<Node>> for Children {
    fn from(nodes: Vec<Node>) -> Self {
        Children::Many(nodes)
    }
}

impl<'a> IntoIterator for &'a Children {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
