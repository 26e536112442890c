//! Phone-number entry model shared by the onboarding screen and the
//! sign-in sheet.

use serde::{Deserialize, Serialize};

/// Maximum digits in an E.164 number, prefix included.
const MAX_E164_DIGITS: usize = 15;

/// A selectable country calling code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonePrefix {
    /// Calling code with leading `+` (e.g. `+39`).
    pub code: String,
    pub country: String,
}

impl PhonePrefix {
    pub fn new(code: &str, country: &str) -> Self {
        Self {
            code: code.to_string(),
            country: country.to_string(),
        }
    }

    /// Menu label, e.g. `+39 Italy`.
    pub fn label(&self) -> String {
        format!("{} {}", self.code, self.country)
    }

    fn digit_count(&self) -> usize {
        self.code.chars().filter(char::is_ascii_digit).count()
    }
}

pub fn default_prefixes() -> Vec<PhonePrefix> {
    vec![
        PhonePrefix::new("+39", "Italy"),
        PhonePrefix::new("+44", "UK"),
        PhonePrefix::new("+1", "USA"),
    ]
}

/// Prefix selection plus a digits-only number field.
#[derive(Debug, Clone)]
pub struct PhoneForm {
    prefixes: Vec<PhonePrefix>,
    selected: usize,
    digits: String,
}

impl PhoneForm {
    /// Creates an empty form with `default_code` selected (or the first
    /// prefix if it is not in the list).
    pub fn new(prefixes: Vec<PhonePrefix>, default_code: &str) -> Self {
        let prefixes = if prefixes.is_empty() {
            default_prefixes()
        } else {
            prefixes
        };
        let selected = prefixes
            .iter()
            .position(|p| p.code == default_code)
            .unwrap_or(0);
        Self {
            prefixes,
            selected,
            digits: String::new(),
        }
    }

    /// Appends a digit. Anything else, or input past the E.164 limit, is
    /// ignored and returns false.
    pub fn push_char(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        if self.prefix().digit_count() + self.digits.len() >= MAX_E164_DIGITS {
            return false;
        }
        self.digits.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Selects the prefix at `index`. Out-of-range indices are ignored.
    pub fn select_prefix(&mut self, index: usize) {
        if index < self.prefixes.len() {
            self.selected = index;
            let limit = MAX_E164_DIGITS.saturating_sub(self.prefix().digit_count());
            self.digits.truncate(limit);
        }
    }

    pub fn prefix(&self) -> &PhonePrefix {
        &self.prefixes[self.selected]
    }

    pub fn prefixes(&self) -> &[PhonePrefix] {
        &self.prefixes
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Full number in E.164 form, or `None` while the field is empty.
    pub fn e164(&self) -> Option<String> {
        if self.digits.is_empty() {
            None
        } else {
            Some(format!("{}{}", self.prefix().code, self.digits))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_requested_prefix() {
        let form = PhoneForm::new(default_prefixes(), "+44");
        assert_eq!(form.prefix().label(), "+44 UK");
        assert_eq!(form.selected_index(), 1);

        let form = PhoneForm::new(default_prefixes(), "+99");
        assert_eq!(form.prefix().code, "+39");
    }

    #[test]
    fn accepts_digits_only() {
        let mut form = PhoneForm::new(default_prefixes(), "+39");
        for c in "33a3-12 4".chars() {
            form.push_char(c);
        }
        assert_eq!(form.digits(), "333124");
        assert_eq!(form.e164().as_deref(), Some("+39333124"));

        form.backspace();
        assert_eq!(form.digits(), "33312");
    }

    #[test]
    fn caps_length_at_e164_limit() {
        let mut form = PhoneForm::new(default_prefixes(), "+1");
        let accepted = (0..20).filter(|_| form.push_char('5')).count();
        assert_eq!(accepted, 14);

        // Longer prefix trims what no longer fits.
        form.select_prefix(0);
        assert_eq!(form.digits().len(), 13);
    }

    #[test]
    fn empty_field_has_no_number() {
        let mut form = PhoneForm::new(Vec::new(), "+39");
        assert!(form.e164().is_none());
        form.push_char('1');
        form.clear();
        assert!(form.e164().is_none());
        form.select_prefix(42);
        assert_eq!(form.prefix().code, "+39");
    }
}
