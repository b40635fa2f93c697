//! # N-ary Huffman Coding
//!
//! *Prefix codes over any branching factor from 2 to 36.*
//!
//! ## Intuition First
//!
//! Binary Huffman coding keeps merging the two rarest symbols until one tree
//! remains; the path from the root to a symbol, read as left/right turns, is
//! its code. Nothing about the idea needs exactly two branches. With `k`
//! branches per node, each step merges the `k` rarest subtrees and a path is
//! written as a string of base-`k` digits.
//!
//! ## The Problem
//!
//! A `k`-ary merge consumes `k` nodes and returns one, shrinking the queue by
//! `k - 1`. Starting from `L` leaves, the merges only finish on a single root
//! when `(L - 1) % (k - 1) == 0`. Otherwise the last merge is short and the
//! rarest symbols end up with needlessly long codes, so the leaf set is
//! padded with zero-frequency placeholders first.
//!
//! ## Historical Context
//!
//! ```text
//! 1952  Huffman     Minimum-redundancy codes, including the D-ary case
//! 1973  Hu, Tucker  Optimal alphabetic binary trees
//! 1976  Schwartz    Canonical codes: lengths alone describe the code
//! 1985  Vitter      Adaptive (one-pass) Huffman coding
//! ```
//!
//! Huffman's original paper already treated code alphabets of size `D`, with
//! the same dummy-symbol padding used here.
//!
//! ## Mathematical Formulation
//!
//! For frequencies `f_s` and code lengths `l_s` (in base-`k` digits), the tree
//! minimizes `sum_s f_s * l_s` among prefix codes, subject to Kraft:
//!
//! ```text
//! sum_s k^(-l_s) <= 1
//! ```
//!
//! ## Complexity Analysis
//!
//! - **Build**: `O(L log L)` heap operations for `L` symbols.
//! - **Encode**: `O(n)` table lookups.
//! - **Decode**: `O(c)` for a code of `c` digits.
//!
//! ## Failure Modes
//!
//! 1. **Unknown symbols**: encoding a character absent from the table fails
//!    with [`Error::SymbolNotFound`]; rebuild over data that contains it.
//! 2. **Undecodable codes**: decoding never panics or errors. It reports a
//!    [`DecodeFailure`] in-band, textually [`DECODE_SENTINEL`] for codes the
//!    tree rejects and the empty string for text that is not a record.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **[`PriorityQueue`]**: array-backed min-heap with an injected
//!   [`Comparator`], arbitrary removal, heapify and heapsort.
//! - **[`HuffmanTree`]**: deterministic N-ary construction (ties broken by
//!   creation order), code generation and decoding.
//! - **[`InventoryCompressor`]**: counts symbols over serialized product
//!   records and encodes or decodes single records.
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Cormen, T. H., et al. (2009). *Introduction to Algorithms*, ch. 6 and 16.3.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compressor;
pub mod error;
pub mod heap;
pub mod record;
pub mod table;
pub mod tree;

pub use compressor::{DecodedProduct, InventoryCompressor};
pub use error::{DecodeFailure, Error, Result};
pub use heap::{Comparator, NaturalOrder, PriorityQueue};
pub use record::{Attribute, Inventory, Product, RecordSource};
pub use table::CodeTable;
pub use tree::{Arity, HuffmanTree, Node, DECODE_SENTINEL};
