use crate::commands::{CmdMessage, CmdResult, DELETED_MESSAGE};
use crate::error::Result;
use crate::store::ProductStore;

pub fn run<S: ProductStore>(store: &mut S, id: i64) -> Result<CmdResult> {
    store.delete_product(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(DELETED_MESSAGE));
    Ok(result)
}
