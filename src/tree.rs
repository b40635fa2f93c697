//! N-ary Huffman tree.
//!
//! Generalizes the classic binary construction to a fixed branching factor
//! (the *arity*). Each merge step pops exactly `arity` minimum nodes and
//! joins them under a fresh internal node. For the merges to come out even,
//! the leaf set is padded with zero-frequency placeholder leaves until
//! `(leaves - 1) % (arity - 1) == 0`.
//!
//! Codes are strings over the alphabet `0-9a-z`: the `i`-th child of a node
//! is reached with the base-36 digit of `i`, so arities up to 36 can be
//! represented.
//!
//! # Determinism
//!
//! Every node is stamped with a creation `order` from a counter that runs in
//! input order for the leaves, then through the padding leaves and merged
//! nodes. The queue orders nodes by `(freq, order)`, a total order, so the
//! tree shape depends only on the input sequence and never on heap internals.
//! Ties are not broken to minimize code length variance.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::heap::PriorityQueue;
use crate::table::CodeTable;

/// Largest arity the code alphabet can express.
pub const MAX_ARITY: usize = 36;

/// Returned by decoders when a code cannot be walked: the textual escape of a
/// NUL byte, four characters long.
pub const DECODE_SENTINEL: &str = "\\x00";

/// Branching factor of a Huffman tree, in `2..=36`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Arity(usize);

impl Arity {
    /// Classic binary Huffman.
    pub const BINARY: Arity = Arity(2);

    /// Validate `arity`.
    ///
    /// # Errors
    /// Returns `Error::InvalidArity` outside `2..=36`.
    pub fn new(arity: usize) -> Result<Self> {
        if (2..=MAX_ARITY).contains(&arity) {
            Ok(Self(arity))
        } else {
            Err(Error::InvalidArity(arity))
        }
    }

    /// The branching factor as a plain number.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Arity {
    fn default() -> Self {
        Self::BINARY
    }
}

impl TryFrom<usize> for Arity {
    type Error = Error;

    fn try_from(arity: usize) -> Result<Self> {
        Self::new(arity)
    }
}

/// Code character for child index `index`: `0-9`, then `a-z`.
pub fn code_char(index: usize) -> Option<char> {
    u32::try_from(index)
        .ok()
        .and_then(|i| char::from_digit(i, MAX_ARITY as u32))
}

/// Child index for code character `c`. Uppercase letters are rejected.
pub fn code_index(c: char) -> Option<usize> {
    match c {
        '0'..='9' | 'a'..='z' => c.to_digit(MAX_ARITY as u32).map(|d| d as usize),
        _ => None,
    }
}

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol, or a padding placeholder when `symbol` is `None`.
    Leaf {
        /// Encoded character; `None` for padding.
        symbol: Option<char>,
        /// Occurrence count.
        freq: u64,
        /// Creation stamp used for tie-breaking.
        order: u64,
    },
    /// Merge of up to `arity` nodes, kept in pop order.
    Internal {
        /// Sum of the children's frequencies.
        freq: u64,
        /// Creation stamp used for tie-breaking.
        order: u64,
        /// Owned children, never empty.
        children: Vec<Node>,
    },
}

impl Node {
    /// Frequency of this subtree.
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => *freq,
        }
    }

    /// Creation stamp.
    pub fn order(&self) -> u64 {
        match self {
            Node::Leaf { order, .. } | Node::Internal { order, .. } => *order,
        }
    }

    /// Symbol of a non-padding leaf.
    pub fn symbol(&self) -> Option<char> {
        match self {
            Node::Leaf { symbol, .. } => *symbol,
            Node::Internal { .. } => None,
        }
    }

    /// Children in code order; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Internal { children, .. } => children,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Whether this node is a padding leaf.
    pub fn is_padding(&self) -> bool {
        matches!(self, Node::Leaf { symbol: None, .. })
    }
}

fn huffman_compare(a: &Node, b: &Node) -> Ordering {
    a.freq()
        .cmp(&b.freq())
        .then_with(|| a.order().cmp(&b.order()))
}

type NodeQueue = PriorityQueue<Node, fn(&Node, &Node) -> Ordering>;

/// Huffman tree with a fixed arity.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: Option<Node>,
    arity: Arity,
}

impl HuffmanTree {
    /// Create an empty tree.
    pub fn new(arity: Arity) -> Self {
        Self { root: None, arity }
    }

    /// Rebuild the tree from `(symbol, frequency)` pairs.
    ///
    /// Any previous tree is dropped first. Input order matters: it fixes the
    /// creation stamps, and thus the tie-breaks among equal frequencies.
    ///
    /// # Errors
    /// Returns `Error::Allocation` if the node queue cannot grow.
    pub fn build(&mut self, symbol_freqs: &[(char, u64)]) -> Result<()> {
        self.root = None;
        if symbol_freqs.is_empty() {
            debug!("no symbols, huffman tree left empty");
            return Ok(());
        }

        let arity = self.arity.get();
        let mut queue: NodeQueue = PriorityQueue::with_capacity(
            symbol_freqs.len() + arity,
            huffman_compare as fn(&Node, &Node) -> Ordering,
        );
        let mut order = 0u64;
        let mut stamp = || {
            let current = order;
            order += 1;
            current
        };

        for &(symbol, freq) in symbol_freqs {
            queue.push(Node::Leaf {
                symbol: Some(symbol),
                freq,
                order: stamp(),
            })?;
        }

        let rem = (symbol_freqs.len() - 1) % (arity - 1);
        let padding = if rem == 0 { 0 } else { arity - 1 - rem };
        for _ in 0..padding {
            queue.push(Node::Leaf {
                symbol: None,
                freq: 0,
                order: stamp(),
            })?;
        }
        debug!(
            leaves = symbol_freqs.len(),
            padding, arity, "building huffman tree"
        );

        while queue.len() >= arity {
            let children = (0..arity)
                .map(|_| queue.pop())
                .collect::<Result<Vec<_>>>()?;
            let freq: u64 = children.iter().map(Node::freq).sum();
            let order = stamp();
            trace!(freq, order, "merged {} nodes", children.len());
            queue.push(Node::Internal {
                freq,
                order,
                children,
            })?;
        }

        self.root = match queue.len() {
            0 => None,
            1 => Some(queue.pop()?),
            n => {
                let children = (0..n)
                    .map(|_| queue.pop())
                    .collect::<Result<Vec<_>>>()?;
                let freq: u64 = children.iter().map(Node::freq).sum();
                Some(Node::Internal {
                    freq,
                    order: stamp(),
                    children,
                })
            }
        };

        if let Some(root) = &self.root {
            debug!(freq = root.freq(), "huffman tree built");
        }
        Ok(())
    }

    /// Publish `symbol -> code` for every non-padding leaf into `table`.
    ///
    /// A tree made of a single leaf gives that symbol the empty code.
    pub fn generate_codes<T: CodeTable + ?Sized>(&self, table: &mut T) {
        if let Some(root) = &self.root {
            let mut path = String::new();
            traverse(root, &mut path, table);
        }
    }

    /// Walk `code` through the tree and return the decoded symbols.
    ///
    /// Returns `None`, the sentinel case, when the tree or the code is empty,
    /// when a character is outside the alphabet or the current node's child
    /// range, or when the walk lands on a padding leaf. A code that runs out
    /// in the middle of the tree is not an error: the symbols decoded so far
    /// are returned.
    pub fn decode(&self, code: &str) -> Option<String> {
        let decoded = self.walk(code);
        if decoded.is_none() {
            debug!(code_len = code.len(), "huffman decode failed");
        }
        decoded
    }

    /// [`decode`](Self::decode), with failure mapped to [`DECODE_SENTINEL`].
    pub fn decode_or_sentinel(&self, code: &str) -> String {
        self.decode(code)
            .unwrap_or_else(|| DECODE_SENTINEL.to_string())
    }

    fn walk(&self, code: &str) -> Option<String> {
        let root = self.root.as_ref()?;
        if code.is_empty() {
            return None;
        }

        let mut out = String::new();
        let mut node = root;
        for c in code.chars() {
            node = node.children().get(code_index(c)?)?;
            if node.is_leaf() {
                out.push(node.symbol()?);
                node = root;
            }
        }
        Some(out)
    }

    /// The root node, if any symbols were built.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Branching factor.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Whether the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl Default for HuffmanTree {
    fn default() -> Self {
        Self::new(Arity::default())
    }
}

fn traverse<T: CodeTable + ?Sized>(node: &Node, path: &mut String, table: &mut T) {
    match node {
        Node::Leaf {
            symbol: Some(symbol),
            ..
        } => table.put(*symbol, path.clone()),
        Node::Leaf { symbol: None, .. } => {}
        Node::Internal { children, .. } => {
            for (i, child) in children.iter().enumerate() {
                let Some(digit) = code_char(i) else { break };
                path.push(digit);
                traverse(child, path, table);
                path.pop();
            }
        }
    }
}
