//! Product records and their textual form.
//!
//! A record serializes as `name:(attr: value), (attr: value)` with every
//! value printed to six decimal places; a record without attributes is just
//! `name:`. The compressor counts symbols over this text and decoding parses
//! it back.

use std::fmt;

/// A named numeric product attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute key.
    pub name: String,
    /// Attribute value.
    pub value: f64,
}

impl Attribute {
    /// Create an attribute.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.6}", self.name, self.value)
    }
}

/// Serialize a record.
pub fn serialize(name: &str, attributes: &[Attribute]) -> String {
    let body = attributes
        .iter()
        .map(|attr| format!("({attr})"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{name}:{body}")
}

/// Parse text produced by [`serialize`] back into `(name, attributes)`.
///
/// Text with no `(` is a record without attributes and must end in `:`; the
/// name is everything before that trailing `:`. Otherwise the name runs up
/// to the first `:` and each `(...)` group in the remainder is one
/// attribute, split on its first `:` into a trimmed key and a numeric value.
/// Text between groups is skipped. Returns `None` when there is no `:`,
/// text trails a record without attributes, a group is not closed, or a
/// group has no key or a non-numeric value.
pub fn parse(text: &str) -> Option<(String, Vec<Attribute>)> {
    let (name, mut rest) = text.split_once(':')?;
    if !rest.contains('(') {
        let name = text.strip_suffix(':')?;
        return Some((name.to_string(), Vec::new()));
    }
    let mut attributes = Vec::new();
    while let Some(open) = rest.find('(') {
        let group = &rest[open + 1..];
        let close = group.find(')')?;
        attributes.push(parse_attribute(&group[..close])?);
        rest = &group[close + 1..];
    }
    Some((name.to_string(), attributes))
}

fn parse_attribute(group: &str) -> Option<Attribute> {
    let (key, value) = group.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = value.trim().parse::<f64>().ok()?;
    Some(Attribute::new(key, value))
}

/// Read access to a sequence of named records.
pub trait RecordSource {
    /// Number of records.
    fn len(&self) -> usize;

    /// Whether there are no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name and attributes of record `index`.
    fn record(&self, index: usize) -> Option<(&str, &[Attribute])>;
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn record(&self, index: usize) -> Option<(&str, &[Attribute])> {
        (**self).record(index)
    }
}

/// One inventory line.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product name.
    pub name: String,
    /// Product attributes, in insertion order.
    pub attributes: Vec<Attribute>,
    /// Units in stock.
    pub quantity: i64,
}

/// In-memory product store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a product.
    pub fn add_product(
        &mut self,
        attributes: Vec<Attribute>,
        name: impl Into<String>,
        quantity: i64,
    ) {
        self.products.push(Product {
            name: name.into(),
            attributes,
            quantity,
        });
    }

    /// Remove and return product `index`.
    pub fn remove_product(&mut self, index: usize) -> Option<Product> {
        (index < self.products.len()).then(|| self.products.remove(index))
    }

    /// Set the quantity of product `index`, returning the old one.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> Option<i64> {
        let product = self.products.get_mut(index)?;
        Some(std::mem::replace(&mut product.quantity, quantity))
    }

    /// Product `index`.
    pub fn product(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    /// Name of product `index`.
    pub fn product_name(&self, index: usize) -> Option<&str> {
        self.product(index).map(|p| p.name.as_str())
    }

    /// Attributes of product `index`.
    pub fn product_attributes(&self, index: usize) -> Option<&[Attribute]> {
        self.product(index).map(|p| p.attributes.as_slice())
    }

    /// Quantity of product `index`.
    pub fn product_quantity(&self, index: usize) -> Option<i64> {
        self.product(index).map(|p| p.quantity)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the inventory is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate over products in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Fold products with equal name and attributes into their first
    /// occurrence, summing quantities.
    pub fn remove_duplicates(&mut self) {
        let mut kept: Vec<Product> = Vec::with_capacity(self.products.len());
        for product in self.products.drain(..) {
            match kept
                .iter_mut()
                .find(|k| k.name == product.name && k.attributes == product.attributes)
            {
                Some(existing) => existing.quantity += product.quantity,
                None => kept.push(product),
            }
        }
        self.products = kept;
    }

    /// Concatenate two inventories.
    pub fn merge(first: &Inventory, second: &Inventory) -> Inventory {
        Inventory {
            products: first.iter().chain(second.iter()).cloned().collect(),
        }
    }
}

impl RecordSource for Inventory {
    fn len(&self) -> usize {
        self.products.len()
    }

    fn record(&self, index: usize) -> Option<(&str, &[Attribute])> {
        self.product(index)
            .map(|p| (p.name.as_str(), p.attributes.as_slice()))
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
