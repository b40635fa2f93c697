#![no_main]
use libfuzzer_sys::fuzz_target;
use nary_huffman::{Arity, Attribute, Inventory, InventoryCompressor};

fuzz_target!(|data: (String, u8, String)| {
    let (name, arity, code) = data;
    let arity = (arity as usize % 35) + 2; // 2 to 36
    if name.contains(':') {
        return;
    }

    let attributes = vec![Attribute::new("w", 1.5)];
    let mut inventory = Inventory::new();
    inventory.add_product(attributes.clone(), name.clone(), 1);

    let Ok(arity) = Arity::new(arity) else {
        return;
    };
    let mut compressor = InventoryCompressor::new(&inventory, arity);
    if compressor.build_huffman().is_err() {
        return;
    }

    let encoded = compressor.encode_huffman(&attributes, &name).unwrap();
    let decoded = compressor.decode_huffman(&encoded).unwrap();
    assert_eq!(decoded.name, name);

    // Arbitrary codes must never panic.
    let _ = compressor.decode_huffman(&code);
});
