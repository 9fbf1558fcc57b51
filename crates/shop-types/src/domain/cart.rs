use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner used when a request does not name a user.
pub const GUEST_USER_ID: &str = "guest";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub size: f32,
    pub color: String,
}

impl CartItem {
    /// Lines are merged when product, size and color all match.
    /// Colors compare case-insensitively, as product colors do.
    pub fn same_key(&self, product_id: &str, size: f32, color: &str) -> bool {
        self.product_id == product_id
            && self.size == size
            && self.color.eq_ignore_ascii_case(color)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: String,
    pub quantity: u32,
    pub size: f32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Outcome of patching a line.
#[derive(Debug, Clone, PartialEq)]
pub enum CartItemChange {
    /// The line (or the line it was folded into) after the change.
    Updated(CartItem),
    /// Quantity dropped to zero or below and the line is gone.
    Removed(CartItem),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            items: Vec::new(),
        }
    }

    /// Adds a line, or bumps the quantity of the line with the same key.
    /// Callers reject zero quantities before getting here.
    pub fn add(&mut self, new: NewCartItem) -> CartItem {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|it| it.same_key(&new.product_id, new.size, &new.color))
        {
            existing.quantity = existing.quantity.saturating_add(new.quantity);
            return existing.clone();
        }
        let item = CartItem {
            id: Uuid::new_v4(),
            user_id: self.user_id.clone(),
            product_id: new.product_id,
            quantity: new.quantity,
            size: new.size,
            color: new.color,
        };
        self.items.push(item.clone());
        item
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.items.iter().any(|it| it.id == id)
    }

    pub fn update(&mut self, id: Uuid, patch: CartItemPatch) -> Option<CartItemChange> {
        let idx = self.items.iter().position(|it| it.id == id)?;
        let mut item = self.items[idx].clone();
        let quantity = patch.quantity.unwrap_or(i64::from(item.quantity));
        if let Some(size) = patch.size {
            item.size = size;
        }
        if let Some(color) = patch.color {
            item.color = color;
        }

        if quantity <= 0 {
            return Some(CartItemChange::Removed(self.items.remove(idx)));
        }
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let twin = self
            .items
            .iter()
            .position(|it| it.id != id && it.same_key(&item.product_id, item.size, &item.color));
        if let Some(twin) = twin {
            let target = &mut self.items[twin];
            target.quantity = target.quantity.saturating_add(item.quantity);
            let merged = target.clone();
            self.items.remove(idx);
            return Some(CartItemChange::Updated(merged));
        }

        self.items[idx] = item.clone();
        Some(CartItemChange::Updated(item))
    }

    pub fn remove(&mut self, id: Uuid) -> Option<CartItem> {
        let idx = self.items.iter().position(|it| it.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Empties the cart and hands back what was in it.
    pub fn take_items(&mut self) -> Vec<CartItem> {
        std::mem::take(&mut self.items)
    }

    /// Puts lines handed out by [`Cart::take_items`] back in front, ids
    /// intact. A line added in the meantime with the same key is folded
    /// into the restored one.
    pub fn restore(&mut self, items: Vec<CartItem>) {
        let added = std::mem::replace(&mut self.items, items);
        for line in added {
            let twin = self
                .items
                .iter()
                .position(|it| it.same_key(&line.product_id, line.size, &line.color));
            match twin {
                Some(idx) => {
                    let existing = &mut self.items[idx];
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => self.items.push(line),
            }
        }
    }

    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, it| acc.saturating_add(it.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: &str, qty: u32, size: f32, color: &str) -> NewCartItem {
        NewCartItem {
            product_id: product.into(),
            quantity: qty,
            size,
            color: color.into(),
        }
    }

    #[test]
    fn same_key_increments_instead_of_duplicating() {
        let mut cart = Cart::new("user1");
        let first = cart.add(line("1", 1, 9.0, "White"));
        let second = cart.add(line("1", 2, 9.0, "White"));
        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 3);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].user_id, "user1");
    }

    #[test]
    fn different_size_or_color_adds_a_line() {
        let mut cart = Cart::new("user1");
        cart.add(line("1", 1, 9.0, "White"));
        cart.add(line("1", 1, 9.5, "White"));
        cart.add(line("1", 1, 9.0, "Black"));
        cart.add(line("2", 1, 9.0, "White"));
        assert_eq!(cart.items.len(), 4);
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn update_to_zero_removes_the_line() {
        let mut cart = Cart::new("user1");
        let item = cart.add(line("1", 2, 9.0, "White"));
        let change = cart
            .update(
                item.id,
                CartItemPatch {
                    quantity: Some(0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(matches!(change, CartItemChange::Removed(ref it) if it.id == item.id));
        assert!(cart.items.is_empty());
    }

    #[test]
    fn update_into_existing_key_merges_lines() {
        let mut cart = Cart::new("user1");
        let white = cart.add(line("1", 2, 9.0, "White"));
        let black = cart.add(line("1", 1, 9.0, "Black"));
        let change = cart
            .update(
                black.id,
                CartItemPatch {
                    color: Some("White".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        match change {
            CartItemChange::Updated(it) => {
                assert_eq!(it.id, white.id);
                assert_eq!(it.quantity, 3);
            }
            other => panic!("unexpected change {other:?}"),
        }
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn update_and_remove_unknown_ids() {
        let mut cart = Cart::new("user1");
        cart.add(line("1", 1, 9.0, "White"));
        assert!(cart
            .update(Uuid::new_v4(), CartItemPatch::default())
            .is_none());
        assert!(cart.remove(Uuid::new_v4()).is_none());
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn same_key_ignores_color_case() {
        let mut cart = Cart::new("user1");
        cart.add(line("1", 1, 9.0, "Black"));
        let merged = cart.add(line("1", 1, 9.0, "black"));
        assert_eq!(merged.quantity, 2);
        assert_eq!(merged.color, "Black");
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn restore_keeps_ids_and_folds_lines_added_meanwhile() {
        let mut cart = Cart::new("user1");
        let white = cart.add(line("1", 2, 9.0, "White"));
        let black = cart.add(line("1", 1, 9.0, "Black"));
        let taken = cart.take_items();

        cart.add(line("1", 3, 9.0, "White"));
        let fresh = cart.add(line("2", 1, 9.0, "Red"));
        cart.restore(taken);

        let ids: Vec<_> = cart.items.iter().map(|it| it.id).collect();
        assert_eq!(ids, [white.id, black.id, fresh.id]);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.total_quantity(), 7);
    }

    #[test]
    fn take_items_empties_cart() {
        let mut cart = Cart::new("user1");
        cart.add(line("1", 1, 9.0, "White"));
        cart.add(line("2", 1, 9.0, "White"));
        let taken = cart.take_items();
        assert_eq!(taken.len(), 2);
        assert!(cart.items.is_empty());
    }
}
