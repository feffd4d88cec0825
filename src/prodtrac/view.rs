//! # View Projection
//!
//! The listing the user sees is never stored: it is derived on demand from the
//! last-fetched product list and the [`ViewState`] (filter text plus sort
//! column and direction). [`project`] is that derivation. It is pure, so the
//! renderer simply calls it again whenever any input changes.
//!
//! ## Filtering
//!
//! The filter is trimmed and lowercased. A blank filter keeps everything;
//! otherwise a product is kept when the filter is a substring of its id (as
//! decimal text), its lowercased name, or its lowercased description.
//!
//! ## Sorting
//!
//! - `id`, `price` and `quantity` compare numerically, `name` and
//!   `description` compare as lowercased text.
//! - Descending reverses the comparison, not the sequence, so products with
//!   equal keys keep their filtered order in both directions (`sort_by` is a
//!   stable sort).
//! - An absent price or quantity always sorts after every present value,
//!   whichever the direction.

use crate::model::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Id,
    Name,
    Description,
    Price,
    Quantity,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Id,
        SortField::Name,
        SortField::Description,
        SortField::Price,
        SortField::Quantity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Description => "description",
            SortField::Price => "price",
            SortField::Quantity => "quantity",
        }
    }

    fn key(&self, product: &Product) -> SortKey {
        match self {
            SortField::Id => SortKey::Integer(Some(product.id)),
            SortField::Price => SortKey::Number(product.price.filter(|p| !p.is_nan())),
            SortField::Quantity => SortKey::Integer(product.quantity),
            SortField::Name => SortKey::Text(product.name.to_lowercase()),
            SortField::Description => SortKey::Text(product.description.to_lowercase()),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "description" | "desc" => Ok(SortField::Description),
            "price" => Ok(SortField::Price),
            "quantity" | "qty" => Ok(SortField::Quantity),
            other => Err(format!(
                "Unknown sort field: {} (expected one of id, name, description, price, quantity)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// The user's search and ordering preferences.
///
/// Survives refetches and mutations; only the user changes it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub filter: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl ViewState {
    pub fn new(filter: impl Into<String>, sort_field: SortField, sort_direction: SortDirection) -> Self {
        Self {
            filter: filter.into(),
            sort_field,
            sort_direction,
        }
    }

    /// Column-header click: same column flips, new column starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let query = self.filter.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        product.id.to_string().contains(&query)
            || product.name.to_lowercase().contains(&query)
            || product.description.to_lowercase().contains(&query)
    }

    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let (ka, kb) = (self.sort_field.key(a), self.sort_field.key(b));
        ka.compare(&kb, self.sort_direction)
    }
}

enum SortKey {
    Integer(Option<i64>),
    Number(Option<f64>),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &SortKey, direction: SortDirection) -> Ordering {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => {
                absent_last(a, b, |a, b| directed(a.cmp(b), direction))
            }
            (SortKey::Number(a), SortKey::Number(b)) => {
                absent_last(a, b, |a, b| directed(a.total_cmp(b), direction))
            }
            (SortKey::Text(a), SortKey::Text(b)) => directed(a.cmp(b), direction),
            // Keys always come from the same field.
            _ => Ordering::Equal,
        }
    }
}

/// Present values order among themselves; absent ones trail in either direction.
fn absent_last<T>(a: &Option<T>, b: &Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// Filters and orders `products` for display.
pub fn project<'a>(products: &'a [Product], view: &ViewState) -> Vec<&'a Product> {
    let mut rows: Vec<&Product> = products.iter().filter(|p| view.matches(p)).collect();
    rows.sort_by(|a, b| view.compare(a, b));
    rows
}
