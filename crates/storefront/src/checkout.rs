//! Checkout form validation.
//!
//! There is no payment backend: the form is validated and the order summary
//! shown, nothing is charged or submitted anywhere.

use serde::Deserialize;

use crate::cart::CartStore;

/// Checkout form fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    /// Optional second address line.
    pub address2: String,
    pub country: String,
    pub state: String,
    pub zip: String,
    pub card_name: String,
    pub card_number: String,
    pub card_expiration: String,
    pub card_cvv: String,
}

impl CheckoutForm {
    /// Labels of required fields that are blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("First name", &self.first_name),
            ("Last name", &self.last_name),
            ("Email", &self.email),
            ("Address", &self.address),
            ("Country", &self.country),
            ("State", &self.state),
            ("Zip", &self.zip),
            ("Name on card", &self.card_name),
            ("Credit card number", &self.card_number),
            ("Expiration", &self.card_expiration),
            ("CVV", &self.card_cvv),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
    }

    /// Whether every required field has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Whether the checkout form may be submitted.
///
/// Submitting is disabled whenever the cart is empty or a required field is
/// blank.
#[must_use]
pub fn can_submit(cart: &CartStore, form: &CheckoutForm) -> bool {
    !cart.is_empty() && form.is_complete()
}

#[cfg(test)]
mod tests {
    use fakestore_core::{Price, ProductId};

    use super::*;
    use crate::cart::CartState;
    use crate::models::CartItem;

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address: "12 St James's Square".to_string(),
            address2: String::new(),
            country: "United Kingdom".to_string(),
            state: "London".to_string(),
            zip: "SW1Y 4JH".to_string(),
            card_name: "A Lovelace".to_string(),
            card_number: "4242424242424242".to_string(),
            card_expiration: "12/30".to_string(),
            card_cvv: "123".to_string(),
        }
    }

    fn one_item_cart() -> CartStore {
        CartStore::with_state(CartState::from_items([CartItem {
            id: ProductId::new(1),
            title: "Product 1".to_string(),
            price: Price::from_dollars(10),
            image: None,
            qty: 1,
        }]))
    }

    #[test]
    fn test_blank_form_lists_every_required_field() {
        let form = CheckoutForm::default();
        assert_eq!(form.missing_fields().len(), 11);
        assert!(!form.missing_fields().contains(&"Address 2"));
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let mut form = filled_form();
        form.email = "   ".to_string();
        assert_eq!(form.missing_fields(), vec!["Email"]);
    }

    #[test]
    fn test_complete_form() {
        assert!(filled_form().is_complete());
    }

    #[test]
    fn test_submit_disabled_for_empty_cart() {
        assert!(!can_submit(&CartStore::new(), &filled_form()));
    }

    #[test]
    fn test_submit_disabled_for_blank_fields() {
        assert!(!can_submit(&one_item_cart(), &CheckoutForm::default()));
    }

    #[test]
    fn test_submit_enabled() {
        assert!(can_submit(&one_item_cart(), &filled_form()));
    }
}
