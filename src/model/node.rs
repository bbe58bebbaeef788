//! Node module for the prefix tree representation.

/// Index of a node in a [PrefixTree](crate::model::PrefixTree) (arena).
pub type NodeIndex = usize;

// =#========================================================================#=
// BIT
// =#========================================================================#=
/// A single code bit, selecting the left (`Zero`) or right (`One`) child.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Parses a bit from its ASCII representation `b'0'` or `b'1'`.
    ///
    /// # Returns
    /// `None` for any other byte.
    #[inline(always)]
    pub fn from_byte(byte: u8) -> Option<Bit> {
        match byte {
            b'0' => Some(Bit::Zero),
            b'1' => Some(Bit::One),
            _ => None,
        }
    }

    /// Returns the ASCII character of this bit.
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl TryFrom<char> for Bit {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(other),
        }
    }
}

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// Represents a node in a prefix tree.
///
/// A node is either:
/// - **Leaf**: carries a token and has no children; end of exactly one code
/// - **Internal**: carries no token, has up to two children; shared prefix
///
/// # Invariants
/// - A leaf token is never empty (rejected while building).
/// - After a successful build, every internal node has at least one child.
///   An internal node without children only exists transiently while a path
///   is being inserted.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Node {
    /// Internal node (no token, children for bit `0` and bit `1`)
    Internal {
        /// Index of the child reached by bit `0`
        left: Option<NodeIndex>,
        /// Index of the child reached by bit `1`
        right: Option<NodeIndex>,
    },
    /// Leaf node (token, no children)
    Leaf {
        /// Token emitted when the decoder reaches this leaf
        token: String,
    },
}

impl Node {
    /// Creates a new internal node without children.
    pub fn new_internal() -> Self {
        Node::Internal {
            left: None,
            right: None,
        }
    }

    /// Creates a new leaf carrying `token`.
    pub fn new_leaf(token: String) -> Self {
        Node::Leaf { token }
    }

    /// Returns `true` if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Returns `true` if this node is an internal node.
    pub fn is_internal(&self) -> bool {
        matches!(self, Node::Internal { .. })
    }

    /// Returns the token if this is a leaf, else `None`.
    pub fn token(&self) -> Option<&str> {
        match self {
            Node::Leaf { token } => Some(token),
            Node::Internal { .. } => None,
        }
    }

    /// Returns the child selected by `bit`, or `None` for leaves and missing children.
    #[inline(always)]
    pub fn child(&self, bit: Bit) -> Option<NodeIndex> {
        match (self, bit) {
            (Node::Internal { left, .. }, Bit::Zero) => *left,
            (Node::Internal { right, .. }, Bit::One) => *right,
            (Node::Leaf { .. }, _) => None,
        }
    }

    /// Returns both children if this is an internal node, else `None`.
    pub fn children(&self) -> Option<(Option<NodeIndex>, Option<NodeIndex>)> {
        match self {
            Node::Internal { left, right } => Some((*left, *right)),
            Node::Leaf { .. } => None,
        }
    }

    /// Returns `true` if this node has at least one child.
    pub fn has_children(&self) -> bool {
        matches!(self.children(), Some((Some(_), _)) | Some((_, Some(_))))
    }

    /// Sets the child selected by `bit`.
    ///
    /// # Panics
    /// Panics if called on a leaf.
    pub(crate) fn set_child(&mut self, bit: Bit, child: NodeIndex) {
        match (self, bit) {
            (Node::Internal { left, .. }, Bit::Zero) => *left = Some(child),
            (Node::Internal { right, .. }, Bit::One) => *right = Some(child),
            (Node::Leaf { .. }, _) => panic!("Cannot attach child to leaf"),
        }
    }
}
