use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::ProductStore;
use crate::view::{project, ViewState};

/// Fetches the whole collection and returns the projected rows.
pub fn run<S: ProductStore>(store: &S, view: &ViewState) -> Result<CmdResult> {
    let products = store.list_products()?;
    let total = products.len();
    let rows = project(&products, view).into_iter().cloned().collect();
    Ok(CmdResult::default().with_listed_products(rows, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::seeded_store;
    use crate::store::memory::InMemoryStore;
    use crate::view::{SortDirection, SortField};

    #[test]
    fn lists_projected_rows_with_total() {
        let store = seeded_store();
        let view = ViewState::new("L", SortField::Price, SortDirection::Desc);
        let result = run(&store, &view).unwrap();

        let ids: Vec<i64> = result.listed_products.iter().map(|p| p.id).collect();
        // Laptop, Table and Pen ("blue"); Phone has no "l"
        assert_eq!(ids, vec![2, 4, 3]);
        assert_eq!(result.total, 4);
    }

    #[test]
    fn empty_store_is_not_an_error() {
        let store = InMemoryStore::new();
        let result = run(&store, &ViewState::new("x", SortField::Id, SortDirection::Asc)).unwrap();
        assert!(result.listed_products.is_empty());
        assert_eq!(result.total, 0);
    }
}
