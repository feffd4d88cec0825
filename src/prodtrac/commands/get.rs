use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::ProductStore;

pub fn run<S: ProductStore>(store: &S, id: i64) -> Result<CmdResult> {
    let product = store.get_product(id)?;
    Ok(CmdResult::default().with_listed_products(vec![product], 1))
}
