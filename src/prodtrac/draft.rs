//! The add/edit form as data.
//!
//! A [`FormDraft`] holds raw text exactly as typed; nothing is parsed until the
//! draft is submitted. [`FormDraft::to_payload`] performs the per-field
//! checks the form enforces before any request goes out.

use crate::error::{ProdtracError, Result};
use crate::model::{Product, ProductPayload};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Id,
    Name,
    Description,
    Price,
    Quantity,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::Id,
        DraftField::Name,
        DraftField::Description,
        DraftField::Price,
        DraftField::Quantity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Id => "ID",
            DraftField::Name => "Name",
            DraftField::Description => "Description",
            DraftField::Price => "Price",
            DraftField::Quantity => "Quantity",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(DraftField::Id),
            "name" => Ok(DraftField::Name),
            "description" => Ok(DraftField::Description),
            "price" => Ok(DraftField::Price),
            "quantity" | "qty" => Ok(DraftField::Quantity),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    /// Set when the draft targets an existing record.
    pub edit_id: Option<i64>,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills the form from an existing record and locks its id.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.map(|p| p.to_string()).unwrap_or_default(),
            quantity: product.quantity.map(|q| q.to_string()).unwrap_or_default(),
            edit_id: Some(product.id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_id.is_some()
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Id => &self.id,
            DraftField::Name => &self.name,
            DraftField::Description => &self.description,
            DraftField::Price => &self.price,
            DraftField::Quantity => &self.quantity,
        }
    }

    /// Sets one field. The id is read-only while editing.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        match field {
            DraftField::Id => {
                if self.is_editing() {
                    return Err(ProdtracError::Invalid(
                        "ID cannot be changed while editing".to_string(),
                    ));
                }
                self.id = value;
            }
            DraftField::Name => self.name = value,
            DraftField::Description => self.description = value,
            DraftField::Price => self.price = value,
            DraftField::Quantity => self.quantity = value,
        }
        Ok(())
    }

    pub fn to_payload(&self) -> Result<ProductPayload> {
        for field in DraftField::ALL {
            if self.get(field).trim().is_empty() {
                return Err(ProdtracError::Invalid(format!("{} is required", field.label())));
            }
        }

        let id = match self.edit_id {
            Some(id) => id,
            None => self
                .id
                .trim()
                .parse::<i64>()
                .map_err(|_| ProdtracError::Invalid("ID must be a whole number".to_string()))?,
        };

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| ProdtracError::Invalid("Price must be a number".to_string()))?;
        if price < 0.0 {
            return Err(ProdtracError::Invalid(
                "Price cannot be negative".to_string(),
            ));
        }

        // Stored quantities are i64, so the payload stays within that range.
        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|q| u64::try_from(q).ok())
            .ok_or_else(|| {
                ProdtracError::Invalid("Quantity must be a non-negative whole number".to_string())
            })?;

        Ok(ProductPayload {
            id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormDraft {
        FormDraft {
            id: "5".into(),
            name: " Lamp ".into(),
            description: "Desk lamp".into(),
            price: "24.5".into(),
            quantity: "3".into(),
            edit_id: None,
        }
    }

    #[test]
    fn builds_payload_from_text() {
        let payload = filled().to_payload().unwrap();
        assert_eq!(
            payload,
            ProductPayload {
                id: 5,
                name: "Lamp".into(),
                description: "Desk lamp".into(),
                price: 24.5,
                quantity: 3,
            }
        );
    }

    #[test]
    fn every_field_is_required() {
        for field in DraftField::ALL {
            let mut draft = filled();
            draft.set(field, "  ").unwrap();
            let err = draft.to_payload().unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Invalid input: {} is required", field.label())
            );
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        let mut draft = filled();
        draft.price = "abc".into();
        assert!(draft.to_payload().is_err());

        let mut draft = filled();
        draft.price = "-1".into();
        assert!(draft.to_payload().is_err());

        let mut draft = filled();
        draft.quantity = "2.5".into();
        assert!(draft.to_payload().is_err());

        let mut draft = filled();
        draft.quantity = "-3".into();
        assert!(draft.to_payload().is_err());

        let mut draft = filled();
        draft.id = "x1".into();
        assert!(draft.to_payload().is_err());
    }

    #[test]
    fn quantity_beyond_i64_is_rejected() {
        let mut draft = filled();
        draft.quantity = "9223372036854775808".into();
        let err = draft.to_payload().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: Quantity must be a non-negative whole number"
        );

        draft.quantity = "9223372036854775807".into();
        assert_eq!(draft.to_payload().unwrap().quantity, i64::MAX as u64);
    }

    #[test]
    fn zero_price_passes_local_checks() {
        let mut draft = filled();
        draft.price = "0".into();
        assert_eq!(draft.to_payload().unwrap().price, 0.0);
    }

    #[test]
    fn editing_locks_the_id() {
        let product = Product::new(9, "Pen", "Blue pen", 1.99, 100);
        let mut draft = FormDraft::from_product(&product);
        assert!(draft.is_editing());
        assert_eq!(draft.price, "1.99");
        assert!(draft.set(DraftField::Id, "10").is_err());
        assert_eq!(draft.id, "9");

        draft.set(DraftField::Quantity, "90").unwrap();
        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.id, 9);
        assert_eq!(payload.quantity, 90);
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("Name".parse::<DraftField>().unwrap(), DraftField::Name);
        assert_eq!("qty".parse::<DraftField>().unwrap(), DraftField::Quantity);
        assert!("colour".parse::<DraftField>().is_err());
    }
}
