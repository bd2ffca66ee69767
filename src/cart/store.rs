use crate::domain::{CartItem, Product};

/// Cart line items in the order they were added.
///
/// Every operation is total: unknown ids are ignored rather than reported.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `product` with quantity 1. Returns `false` if it was already in
    /// the cart, in which case nothing changes.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.items.push(CartItem::new(product));
        true
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    /// A quantity of zero removes the line.
    pub fn set_quantity(&mut self, id: u64, quantity: u32) -> bool {
        if quantity < 1 {
            return self.remove(id);
        }
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn get(&self, id: u64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }
}
