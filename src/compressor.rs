//! Huffman compression of inventory records.
//!
//! [`InventoryCompressor`] counts characters over the serialized form of
//! every record in a [`RecordSource`], builds an N-ary tree from those
//! counts and encodes or decodes single records against it.
//!
//! ```
//! use nary_huffman::{Arity, Attribute, Inventory, InventoryCompressor};
//!
//! let mut inventory = Inventory::new();
//! inventory.add_product(vec![Attribute::new("speed", 88.0)], "Car", 1);
//!
//! let mut compressor = InventoryCompressor::new(&inventory, Arity::new(4)?);
//! compressor.build_huffman()?;
//!
//! let code = compressor.encode_huffman(&[Attribute::new("speed", 88.0)], "Car")?;
//! let decoded = compressor.decode_huffman(&code).unwrap();
//! assert_eq!(decoded.name, "Car");
//! assert_eq!(decoded.text, "Car:(speed: 88.000000)");
//! # Ok::<(), nary_huffman::Error>(())
//! ```

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::{DecodeFailure, Error, Result};
use crate::record::{self, Attribute, RecordSource};
use crate::table::CodeTable;
use crate::tree::{Arity, HuffmanTree};

/// A record recovered from a code.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedProduct {
    /// The decoded text, in serialized form.
    pub text: String,
    /// Record name.
    pub name: String,
    /// Record attributes.
    pub attributes: Vec<Attribute>,
}

impl fmt::Display for DecodedProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Huffman coder over the records of `S`, publishing codes into `T`.
#[derive(Debug, Clone)]
pub struct InventoryCompressor<S, T = HashMap<char, String>> {
    source: S,
    tree: HuffmanTree,
    table: T,
}

impl<S: RecordSource> InventoryCompressor<S> {
    /// Create a compressor with an empty tree and a hash-map table; call
    /// [`build_huffman`](Self::build_huffman) before encoding.
    pub fn new(source: S, arity: Arity) -> Self {
        Self::with_table(source, arity)
    }
}

impl<S: RecordSource, T: CodeTable + Default> InventoryCompressor<S, T> {
    /// Like [`new`](InventoryCompressor::new), publishing codes into a `T`.
    pub fn with_table(source: S, arity: Arity) -> Self {
        Self {
            source,
            tree: HuffmanTree::new(arity),
            table: T::default(),
        }
    }

    /// Recount symbols over every record and rebuild the tree and table.
    ///
    /// Symbols enter the tree sorted by character value, which fixes the
    /// tie-breaks. The current tree and table stay in place until the new
    /// ones are complete.
    ///
    /// # Errors
    /// Returns `Error::Allocation` if the tree's node queue cannot grow.
    pub fn build_huffman(&mut self) -> Result<()> {
        let mut counts: HashMap<char, u64> = HashMap::new();
        for index in 0..self.source.len() {
            let Some((name, attributes)) = self.source.record(index) else {
                continue;
            };
            for c in record::serialize(name, attributes).chars() {
                *counts.entry(c).or_insert(0) += 1;
            }
        }

        let mut symbol_freqs: Vec<(char, u64)> = counts.into_iter().collect();
        symbol_freqs.sort_by_key(|&(symbol, _)| symbol);

        let mut tree = HuffmanTree::new(self.tree.arity());
        tree.build(&symbol_freqs)?;
        let mut table = T::default();
        tree.generate_codes(&mut table);

        self.tree = tree;
        self.table = table;
        debug!(
            records = self.source.len(),
            symbols = symbol_freqs.len(),
            "huffman table rebuilt"
        );
        Ok(())
    }

    /// Serialized form of a record, the text that gets encoded.
    pub fn product_to_string(&self, attributes: &[Attribute], name: &str) -> String {
        record::serialize(name, attributes)
    }

    /// Encode a record as the concatenation of its characters' codes.
    ///
    /// # Errors
    /// Returns `Error::SymbolNotFound` with the first character that has no
    /// code; nothing is emitted in that case.
    pub fn encode_huffman(&self, attributes: &[Attribute], name: &str) -> Result<String> {
        let text = record::serialize(name, attributes);
        let mut code = String::new();
        for c in text.chars() {
            let symbol_code = self.table.get(c).ok_or(Error::SymbolNotFound(c))?;
            code.push_str(symbol_code);
        }
        Ok(code)
    }

    /// Decode a code back into a record.
    ///
    /// # Errors
    /// `DecodeFailure::Sentinel` when the tree rejects the code,
    /// `DecodeFailure::GrammarMismatch` when the decoded text is not a record.
    pub fn decode_huffman(
        &self,
        code: &str,
    ) -> std::result::Result<DecodedProduct, DecodeFailure> {
        let text = self.tree.decode(code).ok_or(DecodeFailure::Sentinel)?;
        let Some((name, attributes)) = record::parse(&text) else {
            debug!(text = %text, "decoded text is not a record");
            return Err(DecodeFailure::GrammarMismatch);
        };
        Ok(DecodedProduct {
            text,
            name,
            attributes,
        })
    }

    /// `(symbol, code)` pairs sorted by symbol.
    pub fn table_entries(&self) -> Vec<(char, String)> {
        let mut entries: Vec<(char, String)> = self
            .table
            .keys()
            .into_iter()
            .filter_map(|symbol| {
                self.table
                    .get(symbol)
                    .map(|code| (symbol, code.to_string()))
            })
            .collect();
        entries.sort_by_key(|&(symbol, _)| symbol);
        entries
    }

    /// The current code table.
    pub fn code_table(&self) -> &T {
        &self.table
    }

    /// The current tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// The record source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the record source; rebuild afterwards to pick up
    /// new symbols.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
