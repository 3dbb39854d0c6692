pub mod add_item;
pub mod edit_item;
pub mod fields;

#[cfg(test)]
pub mod test_store;

pub use add_item::AddItemForm;
pub use edit_item::EditItemForm;
pub use fields::{FieldErrors, FormField, SubmitError};

use crate::api::WarehouseStore;
use crate::combo::FieldValue;
use crate::model::{Currency, ItemStatus, NewWarehouseItem, WarehouseItemUpdate};

/// The form the interactive front end is showing
#[derive(Debug, Clone)]
pub enum ItemForm {
    Add(AddItemForm),
    Edit(EditItemForm),
}

/// What a successful submit did
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    Added(NewWarehouseItem),
    Updated { id: u64, update: WarehouseItemUpdate },
}

impl ItemForm {
    /// Fields in display and Tab order
    pub fn fields(&self) -> &'static [FormField] {
        match self {
            ItemForm::Add(_) => &FormField::ADD_ORDER,
            ItemForm::Edit(_) => &FormField::EDIT_ORDER,
        }
    }

    pub fn name(&self) -> &FieldValue {
        match self {
            ItemForm::Add(f) => &f.name,
            ItemForm::Edit(f) => &f.name,
        }
    }

    pub fn name_mut(&mut self) -> &mut FieldValue {
        match self {
            ItemForm::Add(f) => &mut f.name,
            ItemForm::Edit(f) => &mut f.name,
        }
    }

    pub fn supplier(&self) -> &FieldValue {
        match self {
            ItemForm::Add(f) => &f.supplier,
            ItemForm::Edit(f) => &f.supplier,
        }
    }

    pub fn supplier_mut(&mut self) -> &mut FieldValue {
        match self {
            ItemForm::Add(f) => &mut f.supplier,
            ItemForm::Edit(f) => &mut f.supplier,
        }
    }

    pub fn text_field(&self, field: FormField) -> Option<&FieldValue> {
        match self {
            ItemForm::Add(f) => f.text_field(field),
            ItemForm::Edit(f) => f.text_field(field),
        }
    }

    pub fn text_field_mut(&mut self, field: FormField) -> Option<&mut FieldValue> {
        match self {
            ItemForm::Add(f) => f.text_field_mut(field),
            ItemForm::Edit(f) => f.text_field_mut(field),
        }
    }

    pub fn currency(&self) -> Option<Currency> {
        match self {
            ItemForm::Add(f) => f.currency,
            ItemForm::Edit(f) => f.currency,
        }
    }

    pub fn set_currency(&mut self, currency: Currency) {
        match self {
            ItemForm::Add(f) => f.currency = Some(currency),
            ItemForm::Edit(f) => f.currency = Some(currency),
        }
    }

    /// Always None on the add form
    pub fn status(&self) -> Option<ItemStatus> {
        match self {
            ItemForm::Add(_) => None,
            ItemForm::Edit(f) => f.status,
        }
    }

    /// Ignored on the add form
    pub fn set_status(&mut self, status: ItemStatus) {
        if let ItemForm::Edit(f) = self {
            f.status = Some(status);
        }
    }

    pub fn submit(&mut self, store: &dyn WarehouseStore) -> Result<Submitted, SubmitError> {
        match self {
            ItemForm::Add(f) => f.submit(store).map(Submitted::Added),
            ItemForm::Edit(f) => {
                let id = f.id;
                f.submit(store).map(|update| Submitted::Updated { id, update })
            }
        }
    }
}

impl Default for ItemForm {
    fn default() -> Self {
        ItemForm::Add(AddItemForm::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::test_store::{RecordingStore, scanner};

    #[test]
    fn test_status_only_on_edit_form() {
        let mut add = ItemForm::default();
        add.set_status(ItemStatus::Sold);
        assert_eq!(add.status(), None);
        assert!(!add.fields().contains(&FormField::Status));

        let mut edit = ItemForm::Edit(EditItemForm::from_item(&scanner()));
        edit.set_status(ItemStatus::Sold);
        assert_eq!(edit.status(), Some(ItemStatus::Sold));
        assert_eq!(edit.fields()[1], FormField::Status);
    }

    #[test]
    fn test_submit_reports_which_write_happened() {
        let store = RecordingStore::default();
        let mut edit = ItemForm::Edit(EditItemForm::from_item(&scanner()));
        match edit.submit(&store).unwrap() {
            Submitted::Updated { id, update } => {
                assert_eq!(id, 3);
                assert_eq!(update.supplier, "Tashkent Tech");
            }
            other => panic!("expected an update, got {:?}", other),
        }
        assert!(store.stored.lock().unwrap().is_empty());
    }
}
