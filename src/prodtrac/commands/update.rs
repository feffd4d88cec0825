use crate::commands::{CmdMessage, CmdResult, UPDATED_MESSAGE};
use crate::error::Result;
use crate::model::{Product, ProductPayload};
use crate::store::ProductStore;

/// Replaces the record at `id`. The path id is authoritative over the body's.
pub fn run<S: ProductStore>(store: &mut S, id: i64, payload: &ProductPayload) -> Result<CmdResult> {
    store.update_product(id, payload)?;

    let mut updated = Product::from(payload);
    updated.id = id;
    let mut result = CmdResult::default().with_affected_products(vec![updated]);
    result.add_message(CmdMessage::success(UPDATED_MESSAGE));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{payload, seeded_store};

    #[test]
    fn updates_product_in_place() {
        let mut store = seeded_store();
        let result = run(&mut store, 3, &payload(3, "Gel Pen", 2.49, 80)).unwrap();

        assert_eq!(result.messages, vec![CmdMessage::success(UPDATED_MESSAGE)]);
        let pen = store.get_product(3).unwrap();
        assert_eq!(pen.name, "Gel Pen");
        assert_eq!(pen.price, Some(2.49));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn missing_product_is_reported() {
        let mut store = seeded_store();
        let err = run(&mut store, 77, &payload(77, "Ghost", 1.0, 1)).unwrap_err();
        assert_eq!(err.to_string(), "Product not found");
    }
}
