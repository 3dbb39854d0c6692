use crate::api::WarehouseStore;
use crate::combo::FieldValue;
use crate::model::{Currency, NewWarehouseItem};

use super::fields::{
    FieldErrors, FormField, SubmitError, optional_text, price, required_choice, required_text,
};

/// State of the "add warehouse item" form
#[derive(Debug, Clone, Default)]
pub struct AddItemForm {
    pub name: FieldValue,
    pub quantity: FieldValue,
    pub price: FieldValue,
    pub currency: Option<Currency>,
    pub supplier: FieldValue,
    pub serial_numbers: FieldValue,
}

impl AddItemForm {
    /// The string cell behind a text field (None for choices and edit-only fields)
    pub fn text_field_mut(&mut self, field: FormField) -> Option<&mut FieldValue> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Quantity => Some(&mut self.quantity),
            FormField::Price => Some(&mut self.price),
            FormField::Supplier => Some(&mut self.supplier),
            FormField::SerialNumbers => Some(&mut self.serial_numbers),
            _ => None,
        }
    }

    pub fn text_field(&self, field: FormField) -> Option<&FieldValue> {
        match field {
            FormField::Name => Some(&self.name),
            FormField::Quantity => Some(&self.quantity),
            FormField::Price => Some(&self.price),
            FormField::Supplier => Some(&self.supplier),
            FormField::SerialNumbers => Some(&self.serial_numbers),
            _ => None,
        }
    }

    /// Check every field and build the payload, or report all problems at once.
    pub fn validate(&self) -> Result<NewWarehouseItem, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required_text(
            &self.name,
            FormField::Name,
            "Product name is required.",
            &mut errors,
        );

        let quantity = if self.quantity.is_blank() {
            None
        } else {
            match self.quantity.as_str().trim().parse::<u32>() {
                Ok(q) => Some(q),
                Err(_) => {
                    errors.insert(FormField::Quantity, "Quantity must be a whole number.".into());
                    None
                }
            }
        };

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

        match (name, price, currency, supplier) {
            (Some(name), Some(price), Some(currency_key), Some(supplier)) if errors.is_empty() => {
                Ok(NewWarehouseItem {
                    name,
                    quantity,
                    price,
                    currency_key,
                    supplier,
                    serial_numbers: optional_text(&self.serial_numbers),
                })
            }
            _ => Err(errors),
        }
    }

    /// Validate, store, and reset on success. On failure the values stay put.
    pub fn submit(
        &mut self,
        store: &dyn WarehouseStore,
    ) -> Result<NewWarehouseItem, SubmitError> {
        let item = self.validate().map_err(SubmitError::Invalid)?;
        if let Err(e) = store.store_item(&item) {
            log::warn!("storing {:?} failed: {}", item.name, e);
            return Err(e.into());
        }
        self.reset();
        Ok(item)
    }

    pub fn reset(&mut self) {
        *self = AddItemForm::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::form::test_store::RecordingStore;
    use pretty_assertions::assert_eq;

    fn filled() -> AddItemForm {
        AddItemForm {
            name: FieldValue::new("Receipt printer"),
            quantity: FieldValue::new("3"),
            price: FieldValue::new("120.50"),
            currency: Some(Currency::Usd),
            supplier: FieldValue::new("Acme Trading"),
            serial_numbers: FieldValue::new("  RP-1\nRP-2  "),
        }
    }

    #[test]
    fn test_valid_form_builds_payload() {
        let item = filled().validate().unwrap();
        assert_eq!(
            item,
            NewWarehouseItem {
                name: "Receipt printer".into(),
                quantity: Some(3),
                price: 120.5,
                currency_key: Currency::Usd,
                supplier: "Acme Trading".into(),
                serial_numbers: Some("RP-1\nRP-2".into()),
            }
        );
    }

    #[test]
    fn test_empty_form_reports_every_required_field_in_order() {
        let errors = AddItemForm::default().validate().unwrap_err();
        let fields: Vec<FormField> = errors.keys().copied().collect();
        assert_eq!(
            fields,
            vec![
                FormField::Name,
                FormField::Price,
                FormField::Currency,
                FormField::Supplier
            ]
        );
        assert_eq!(errors[&FormField::Price], "Enter the purchase price.");
    }

    #[test]
    fn test_bad_numbers() {
        let mut form = filled();
        form.quantity = FieldValue::new("2.5");
        form.price = FieldValue::new("-4");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[&FormField::Quantity], "Quantity must be a whole number.");
        assert_eq!(errors[&FormField::Price], "Price must be a non-negative number.");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_optional_fields_may_be_blank() {
        let mut form = filled();
        form.quantity = FieldValue::default();
        form.serial_numbers = FieldValue::new("   ");
        let item = form.validate().unwrap();
        assert_eq!(item.quantity, None);
        assert_eq!(item.serial_numbers, None);
    }

    #[test]
    fn test_submit_stores_and_resets() {
        let store = RecordingStore::default();
        let mut form = filled();
        let item = form.submit(&store).unwrap();
        assert_eq!(store.stored.lock().unwrap().as_slice(), &[item]);
        assert!(form.name.is_blank());
        assert_eq!(form.currency, None);
    }

    #[test]
    fn test_failed_store_keeps_values() {
        let store = RecordingStore {
            reject: true,
            ..Default::default()
        };
        let mut form = filled();
        let err = form.submit(&store).unwrap_err();
        assert!(matches!(err, SubmitError::Store(ApiError::Rejected(_))));
        assert_eq!(form.name.as_str(), "Receipt printer");
        assert_eq!(form.currency, Some(Currency::Usd));
    }

    #[test]
    fn test_invalid_submit_does_not_store() {
        let store = RecordingStore::default();
        let mut form = filled();
        form.supplier = FieldValue::default();
        let err = form.submit(&store).unwrap_err();
        assert_eq!(err.to_string(), "1 field(s) need attention");
        assert!(store.stored.lock().unwrap().is_empty());
        assert_eq!(form.name.as_str(), "Receipt printer");
    }
}
