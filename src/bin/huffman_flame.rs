use nary_huffman::{Arity, Attribute, Inventory, InventoryCompressor};
use tracing_subscriber::EnvFilter;

fn main() -> nary_huffman::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let mut inventory = Inventory::new();
    for i in 0..500 {
        let attributes = vec![
            Attribute::new("rpm", 1230.5 + i as f64),
            Attribute::new("noise", (i % 40) as f64 * 0.33),
        ];
        inventory.add_product(attributes, format!("fan_{i}"), 1);
    }

    let mut compressor = InventoryCompressor::new(&inventory, Arity::new(12)?);
    let mut code_digits = 0usize;
    for _ in 0..200 {
        compressor.build_huffman()?;
        for product in &inventory {
            let code = compressor.encode_huffman(&product.attributes, &product.name)?;
            code_digits += code.len();
            if compressor.decode_huffman(&code).is_err() {
                tracing::warn!(name = %product.name, "record failed to round-trip");
            }
        }
    }

    for (symbol, code) in compressor.table_entries() {
        println!("'{symbol}' : {code}");
    }
    println!("total code digits: {code_digits}");
    Ok(())
}
