//! Symbol to code mapping.
//!
//! The tree only needs a narrow associative interface to publish its codes,
//! so any map can stand in as the table.

use std::collections::{BTreeMap, HashMap};

/// Minimal associative container holding `symbol -> code` pairs.
pub trait CodeTable {
    /// Insert or overwrite the code for `symbol`.
    fn put(&mut self, symbol: char, code: String);

    /// Look up the code for `symbol`.
    fn get(&self, symbol: char) -> Option<&str>;

    /// Whether `symbol` has a code.
    fn contains_key(&self, symbol: char) -> bool {
        self.get(symbol).is_some()
    }

    /// All symbols with a code, in the container's iteration order.
    fn keys(&self) -> Vec<char>;
}

impl CodeTable for HashMap<char, String> {
    fn put(&mut self, symbol: char, code: String) {
        self.insert(symbol, code);
    }

    fn get(&self, symbol: char) -> Option<&str> {
        HashMap::get(self, &symbol).map(String::as_str)
    }

    fn contains_key(&self, symbol: char) -> bool {
        HashMap::contains_key(self, &symbol)
    }

    fn keys(&self) -> Vec<char> {
        HashMap::keys(self).copied().collect()
    }
}

impl CodeTable for BTreeMap<char, String> {
    fn put(&mut self, symbol: char, code: String) {
        self.insert(symbol, code);
    }

    fn get(&self, symbol: char) -> Option<&str> {
        BTreeMap::get(self, &symbol).map(String::as_str)
    }

    fn contains_key(&self, symbol: char) -> bool {
        BTreeMap::contains_key(self, &symbol)
    }

    fn keys(&self) -> Vec<char> {
        BTreeMap::keys(self).copied().collect()
    }
}
