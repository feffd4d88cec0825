use crate::commands::{CmdMessage, CmdResult, CREATED_MESSAGE};
use crate::error::Result;
use crate::model::{Product, ProductPayload};
use crate::store::ProductStore;

pub fn run<S: ProductStore>(store: &mut S, payload: &ProductPayload) -> Result<CmdResult> {
    store.create_product(payload)?;

    let mut result = CmdResult::default().with_affected_products(vec![Product::from(payload)]);
    result.add_message(CmdMessage::success(CREATED_MESSAGE));
    Ok(result)
}
