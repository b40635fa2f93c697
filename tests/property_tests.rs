use std::collections::BTreeMap;

use nary_huffman::record::{parse, serialize};
use nary_huffman::{
    Arity, Attribute, DecodeFailure, Error, HuffmanTree, Inventory, InventoryCompressor,
    NaturalOrder, PriorityQueue, DECODE_SENTINEL,
};
use proptest::prelude::*;

fn attribute() -> impl Strategy<Value = Attribute> {
    ("[a-z_]{1,10}", -1.0e6f64..1.0e6).prop_map(|(name, value)| Attribute::new(name, value))
}

fn product() -> impl Strategy<Value = (String, Vec<Attribute>)> {
    (
        "[A-Za-z][A-Za-z0-9 _-]{0,11}",
        prop::collection::vec(attribute(), 0..5),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_inventory_roundtrip(
        products in prop::collection::vec(product(), 1..8),
        arity in 2usize..=36,
    ) {
        let mut inventory = Inventory::new();
        for (name, attributes) in &products {
            inventory.add_product(attributes.clone(), name.clone(), 1);
        }

        let mut compressor = InventoryCompressor::new(&inventory, Arity::new(arity).unwrap());
        compressor.build_huffman().unwrap();

        for (name, attributes) in &products {
            let text = serialize(name, attributes);
            let code = compressor.encode_huffman(attributes, name).unwrap();
            let decoded = compressor.decode_huffman(&code).unwrap();
            prop_assert_eq!(&decoded.text, &text);
            prop_assert_eq!(&decoded.name, name);
            let (_, reparsed) = parse(&text).unwrap();
            prop_assert_eq!(decoded.attributes, reparsed);
        }
    }

    #[test]
    fn test_rebuild_is_deterministic(
        products in prop::collection::vec(product(), 1..6),
        arity in 2usize..=36,
    ) {
        let mut inventory = Inventory::new();
        for (name, attributes) in &products {
            inventory.add_product(attributes.clone(), name.clone(), 1);
        }
        let arity = Arity::new(arity).unwrap();

        let mut first = InventoryCompressor::new(&inventory, arity);
        first.build_huffman().unwrap();
        let mut second = InventoryCompressor::new(&inventory, arity);
        second.build_huffman().unwrap();
        prop_assert_eq!(first.table_entries(), second.table_entries());

        first.build_huffman().unwrap();
        prop_assert_eq!(first.table_entries(), second.table_entries());
    }

    #[test]
    fn test_pop_returns_minimum(
        items in prop::collection::vec(any::<u32>(), 1..200),
    ) {
        let mut heap = PriorityQueue::new(NaturalOrder);
        for &item in &items {
            heap.push(item).unwrap();
        }
        let mut sorted = items.clone();
        sorted.sort_unstable();
        for expected in sorted {
            prop_assert_eq!(*heap.peek().unwrap(), expected);
            prop_assert_eq!(heap.pop().unwrap(), expected);
            prop_assert!(heap.is_heap());
        }
        prop_assert!(matches!(heap.pop(), Err(Error::Underflow)));
    }
}

#[test]
fn test_empty_tree_decodes_to_sentinel() {
    let mut tree = HuffmanTree::default();
    tree.build(&[]).unwrap();
    let mut table: BTreeMap<char, String> = BTreeMap::new();
    tree.generate_codes(&mut table);
    assert!(table.is_empty());
    assert_eq!(tree.decode_or_sentinel(""), DECODE_SENTINEL);
}

#[test]
fn test_unseen_symbol_then_empty_decode() {
    let mut inventory = Inventory::new();
    inventory.add_product(vec![Attribute::new("weight", 2.5)], "gadget", 50);
    let mut compressor = InventoryCompressor::new(&inventory, Arity::new(4).unwrap());
    compressor.build_huffman().unwrap();

    let encoded = match compressor.encode_huffman(&[Attribute::new("weight", 2.5)], "Gadget") {
        Ok(code) => code,
        Err(Error::SymbolNotFound(c)) => {
            assert_eq!(c, 'G');
            String::new()
        }
        Err(other) => panic!("unexpected error: {other}"),
    };
    let failure = compressor.decode_huffman(&encoded).unwrap_err();
    assert_eq!(failure, DecodeFailure::Sentinel);
    assert_eq!(failure.as_str(), "\\x00");
}
