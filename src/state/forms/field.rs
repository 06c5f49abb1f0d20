//! Form field value objects

use crate::state::TransactionType;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Binary income/outcome selector, `None` until the user picks one
    Choice(Option<TransactionType>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Keeps the raw-input kind of a text field, used to filter keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Free,
    Numeric,
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: String,
    pub value: FieldValue,
    pub text_kind: TextKind,
    /// Value restored by `clear`
    initial: FieldValue,
}

impl FormField {
    /// Create a new free text field
    pub fn text(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            text_kind: TextKind::Free,
            initial: FieldValue::Text(String::new()),
        }
    }

    /// Create a new numeric text field
    pub fn numeric(label: &str) -> Self {
        Self {
            text_kind: TextKind::Numeric,
            ..Self::text(label)
        }
    }

    /// Create a new type selector with an optional preselected value
    pub fn choice(label: &str, initial: Option<TransactionType>) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Choice(initial),
            text_kind: TextKind::Free,
            initial: FieldValue::Choice(initial),
        }
    }

    /// Get the text value (returns empty string for choice fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice(_) => "",
        }
    }

    /// Get the selected type (returns None for text fields)
    pub fn as_choice(&self) -> Option<TransactionType> {
        match &self.value {
            FieldValue::Choice(c) => *c,
            FieldValue::Text(_) => None,
        }
    }

    /// Raw string handed to the validator
    pub fn raw_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice(Some(t)) => t.as_str().to_string(),
            FieldValue::Choice(None) => String::new(),
        }
    }

    /// Set the text value
    pub fn set_text(&mut self, value: String) {
        self.value = FieldValue::Text(value);
    }

    /// Set the selected type
    pub fn set_choice(&mut self, value: TransactionType) {
        self.value = FieldValue::Choice(Some(value));
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => match self.text_kind {
                TextKind::Free => s.push(c),
                TextKind::Numeric => {
                    if c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E') {
                        s.push(c);
                    }
                }
            },
            FieldValue::Choice(choice) => match c {
                'i' | 'I' => *choice = Some(TransactionType::Income),
                'o' | 'O' => *choice = Some(TransactionType::Outcome),
                ' ' => *choice = Some(choice.map_or(TransactionType::Income, |t| t.toggle())),
                _ => {}
            },
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Reset the field to the value it was created with
    pub fn clear(&mut self) {
        self.value = self.initial.clone();
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice(Some(t)) => t.label().to_string(),
            FieldValue::Choice(None) => String::new(),
        }
    }
}
