//! New transaction form state

use super::field::FormField;
use super::schema::{TransactionField, TransactionInput};
use crate::state::TransactionType;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
}

/// Index of the submit button row
pub const SUBMIT_ROW: usize = 4;

// New Transaction Form
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransactionForm {
    pub description: FormField,
    pub price: FormField,
    pub category: FormField,
    pub kind: FormField,
    pub active_field_index: usize,
}

impl NewTransactionForm {
    pub fn new(default_type: Option<TransactionType>) -> Self {
        Self {
            description: FormField::text("Description"),
            price: FormField::numeric("Price"),
            category: FormField::text("Category"),
            kind: FormField::choice("Type", default_type),
            active_field_index: 0,
        }
    }

    /// Returns true if the submit button is focused
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == SUBMIT_ROW
    }

    pub fn field(&self, field: TransactionField) -> &FormField {
        match field {
            TransactionField::Description => &self.description,
            TransactionField::Price => &self.price,
            TransactionField::Category => &self.category,
            TransactionField::Type => &self.kind,
        }
    }

    /// Snapshot of the raw values for validation
    pub fn input(&self) -> TransactionInput {
        TransactionInput {
            description: self.description.raw_value(),
            price: self.price.raw_value(),
            category: self.category.raw_value(),
            kind: self.kind.raw_value(),
        }
    }

    /// Clear every field and move focus back to the first one
    pub fn reset(&mut self) {
        self.description.clear();
        self.price.clear();
        self.category.clear();
        self.kind.clear();
        self.active_field_index = 0;
    }
}

impl Default for NewTransactionForm {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Form for NewTransactionForm {
    fn field_count(&self) -> usize {
        5 // description, price, category, type, submit
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT_ROW);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.description),
            1 => Some(&mut self.price),
            2 => Some(&mut self.category),
            3 => Some(&mut self.kind),
            // Submit row has no FormField
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_has_correct_defaults() {
        let form = NewTransactionForm::new(None);
        assert_eq!(form.active_field_index, 0);
        assert_eq!(form.description.as_text(), "");
        assert_eq!(form.price.as_text(), "");
        assert_eq!(form.category.as_text(), "");
        assert_eq!(form.kind.as_choice(), None);
    }

    #[test]
    fn test_default_type_is_preselected() {
        let form = NewTransactionForm::new(Some(TransactionType::Outcome));
        assert_eq!(form.kind.as_choice(), Some(TransactionType::Outcome));
        assert_eq!(form.input().kind, "outcome");
    }

    #[test]
    fn test_field_count() {
        assert_eq!(NewTransactionForm::default().field_count(), 5);
    }

    #[test]
    fn test_next_field_cycles() {
        let mut form = NewTransactionForm::default();
        for _ in 0..5 {
            form.next_field();
        }
        assert_eq!(form.active_field_index, 0);
    }

    #[test]
    fn test_prev_field_wraps_to_submit() {
        let mut form = NewTransactionForm::default();
        form.prev_field();
        assert!(form.is_submit_row_active());
    }

    #[test]
    fn test_set_active_field_clamps() {
        let mut form = NewTransactionForm::default();
        form.set_active_field(100);
        assert_eq!(form.active_field_index, SUBMIT_ROW);
    }

    #[test]
    fn test_field_lookup_matches_labels() {
        let form = NewTransactionForm::default();
        let labels: Vec<_> = TransactionField::ALL
            .iter()
            .map(|field| form.field(*field).label.as_str())
            .collect();
        assert_eq!(labels, vec!["Description", "Price", "Category", "Type"]);
    }

    #[test]
    fn test_active_field_mut_on_submit_row_is_none() {
        let mut form = NewTransactionForm::default();
        form.set_active_field(SUBMIT_ROW);
        assert!(form.get_active_field_mut().is_none());
    }

    #[test]
    fn test_input_snapshot() {
        let mut form = NewTransactionForm::default();
        form.description.set_text("Salary".to_string());
        form.price.set_text("2500".to_string());
        form.category.set_text("Job".to_string());
        form.kind.set_choice(TransactionType::Income);
        assert_eq!(
            form.input(),
            TransactionInput {
                description: "Salary".to_string(),
                price: "2500".to_string(),
                category: "Job".to_string(),
                kind: "income".to_string(),
            }
        );
    }

    #[test]
    fn test_reset_matches_fresh_form() {
        let mut form = NewTransactionForm::new(Some(TransactionType::Income));
        form.description.set_text("Salary".to_string());
        form.kind.set_choice(TransactionType::Outcome);
        form.set_active_field(3);
        form.reset();
        assert_eq!(form, NewTransactionForm::new(Some(TransactionType::Income)));
    }
}
