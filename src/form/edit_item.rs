use crate::api::WarehouseStore;
use crate::combo::FieldValue;
use crate::model::{Currency, ItemStatus, WarehouseItem, WarehouseItemUpdate};

use super::fields::{
    FieldErrors, FormField, SubmitError, optional_text, price, required_choice, required_text,
};

/// State of the "edit warehouse item" form for one stored item
#[derive(Debug, Clone)]
pub struct EditItemForm {
    pub id: u64,
    pub name: FieldValue,
    pub price: FieldValue,
    pub currency: Option<Currency>,
    pub supplier: FieldValue,
    pub status: Option<ItemStatus>,
    pub serial_number: FieldValue,
}

impl EditItemForm {
    /// Prefill from the stored item. The product name stands in for the
    /// item name. Keys this build does not know leave their choice empty.
    pub fn from_item(item: &WarehouseItem) -> Self {
        let currency = match item.currency_key.parse::<Currency>() {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("item #{}: {}", item.id, e);
                None
            }
        };
        let status = match item.status_key.parse::<ItemStatus>() {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("item #{}: {}", item.id, e);
                None
            }
        };
        EditItemForm {
            id: item.id,
            name: FieldValue::new(item.product.name.as_str()),
            price: FieldValue::new(item.price.to_string()),
            currency,
            supplier: FieldValue::new(item.supplier.name.as_str()),
            status,
            serial_number: FieldValue::new(item.serial_number.as_str()),
        }
    }

    pub fn text_field_mut(&mut self, field: FormField) -> Option<&mut FieldValue> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Price => Some(&mut self.price),
            FormField::Supplier => Some(&mut self.supplier),
            FormField::SerialNumber => Some(&mut self.serial_number),
            _ => None,
        }
    }

    pub fn text_field(&self, field: FormField) -> Option<&FieldValue> {
        match field {
            FormField::Name => Some(&self.name),
            FormField::Price => Some(&self.price),
            FormField::Supplier => Some(&self.supplier),
            FormField::SerialNumber => Some(&self.serial_number),
            _ => None,
        }
    }

    /// Check every field and build the update, or report all problems at once.
    pub fn validate(&self) -> Result<WarehouseItemUpdate, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required_text(
            &self.name,
            FormField::Name,
            "Product name is required.",
            &mut errors,
        );
        let status = required_choice(
            self.status,
            FormField::Status,
            "Status is not set.",
            &mut errors,
        );
        let price = price(&self.price, &mut errors);
        let currency = required_choice(
            self.currency,
            FormField::Currency,
            "Choose a currency.",
            &mut errors,
        );
        let supplier = required_text(
            &self.supplier,
            FormField::Supplier,
            "Choose a supplier.",
            &mut errors,
        );

        match (name, status, price, currency, supplier) {
            (Some(name), Some(status_key), Some(price), Some(currency_key), Some(supplier)) => {
                Ok(WarehouseItemUpdate {
                    name,
                    price,
                    currency_key,
                    supplier,
                    status_key,
                    serial_number: optional_text(&self.serial_number),
                })
            }
            _ => Err(errors),
        }
    }

    /// Validate and save. The values stay put either way.
    pub fn submit(
        &mut self,
        store: &dyn WarehouseStore,
    ) -> Result<WarehouseItemUpdate, SubmitError> {
        let update = self.validate().map_err(SubmitError::Invalid)?;
        if let Err(e) = store.update_item(self.id, &update) {
            log::warn!("updating item #{} failed: {}", self.id, e);
            return Err(e.into());
        }
        Ok(update)
    }
}
