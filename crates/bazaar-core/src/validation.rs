//! # Validation Module
//!
//! Input validation for data entering the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Boundaries                              │
//! │                                                                         │
//! │  Catalog boundary                                                      │
//! │  └── validate_product: one canonical Product shape before it is        │
//! │      stored or handed to the cart                                      │
//! │                                                                         │
//! │  Form boundary                                                         │
//! │  └── validate_contact_message, validate_email                          │
//! │                                                                         │
//! │  CLI boundary                                                          │
//! │  └── validate_search_query, validate_category                          │
//! │                                                                         │
//! │  NOT validated here: cart quantities. The cart normalizes those        │
//! │  itself (see cart::QuantityUpdate).                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::catalog::CATEGORIES;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{ContactMessage, Product};
use crate::MAX_CONTACT_MESSAGE_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Helpers
// =============================================================================

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a product record at the catalog boundary.
///
/// ## Rules
/// - `id` and `name` are required, name at most 200 characters
/// - `category` must be one of the storefront categories (not "All")
/// - `price` must be non-negative
///
/// ## Example
/// ```rust
/// use bazaar_core::{Money, Product};
/// use bazaar_core::validation::validate_product;
///
/// let ok = Product::new("7", "Yoga Mat", Money::from_major(799)).with_category("Sports");
/// assert!(validate_product(&ok).is_ok());
///
/// let free_lunch = Product::new("8", "Lunch", Money::from_minor(-1)).with_category("Sports");
/// assert!(validate_product(&free_lunch).is_err());
/// ```
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    required("id", &product.id)?;
    required("name", &product.name)?;
    max_len("name", product.name.trim(), 200)?;
    validate_price(product.price)?;
    validate_category(&product.category)?;
    Ok(())
}

/// Validates a price: zero (free items) and above.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a product category. "All" is a filter value, not a category.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    required("category", category)?;

    if !CATEGORIES.iter().skip(1).any(|c| *c == category) {
        return Err(ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: CATEGORIES.iter().skip(1).map(|c| c.to_string()).collect(),
        });
    }
    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();
    max_len("query", query, 100)?;
    Ok(query.to_string())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates an email address shape: `local@domain.tld`, no whitespace.
///
/// This only catches typos; deliverability is the mail provider's problem.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    required("email", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing '@'"))?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must be of the form name@example.com"));
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid("domain must contain a dot")),
    }
}

/// Validates a contact form submission.
///
/// ## Rules
/// - All fields are required
/// - Email must pass [`validate_email`]
/// - Message at most 2000 characters
pub fn validate_contact_message(message: &ContactMessage) -> ValidationResult<()> {
    required("name", &message.name)?;
    validate_email(&message.email)?;
    required("subject", &message.subject)?;
    max_len("subject", message.subject.trim(), 200)?;
    required("message", &message.message)?;
    max_len("message", message.message.trim(), MAX_CONTACT_MESSAGE_LEN)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactMessage {
        ContactMessage {
            name: "Asha".into(),
            email: "asha@example.in".into(),
            subject: "Order question".into(),
            message: "Where is my order?".into(),
        }
    }

    #[test]
    fn test_validate_product() {
        let product = Product::new("1", "Headphones", Money::from_major(2499)).with_category("Electronics");
        assert!(validate_product(&product).is_ok());

        let mut missing_id = product.clone();
        missing_id.id = "  ".into();
        assert_eq!(
            validate_product(&missing_id),
            Err(ValidationError::Required { field: "id".into() })
        );

        let mut long_name = product.clone();
        long_name.name = "A".repeat(201);
        assert!(validate_product(&long_name).is_err());

        let uncategorized = Product::new("2", "Mystery", Money::zero());
        assert!(validate_product(&uncategorized).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_major(899)).is_ok());
        assert!(validate_price(Money::from_minor(-100)).is_err());
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category("Home & Living").is_ok());
        assert!(validate_category("All").is_err());
        assert!(validate_category("Groceries").is_err());
        assert!(validate_category("").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  shoes ").unwrap(), "shoes");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("asha@example.in").is_ok());
        assert!(validate_email("first.last@mail.co.uk").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("asha.example.in").is_err());
        assert!(validate_email("@example.in").is_err());
        assert!(validate_email("asha@example").is_err());
        assert!(validate_email("asha@@example.in").is_err());
        assert!(validate_email("asha @example.in").is_err());
    }

    #[test]
    fn test_validate_contact_message() {
        assert!(validate_contact_message(&contact()).is_ok());

        let mut blank_subject = contact();
        blank_subject.subject = String::new();
        assert_eq!(
            validate_contact_message(&blank_subject),
            Err(ValidationError::Required {
                field: "subject".into()
            })
        );

        let mut long_body = contact();
        long_body.message = "a".repeat(MAX_CONTACT_MESSAGE_LEN + 1);
        assert!(matches!(
            validate_contact_message(&long_body),
            Err(ValidationError::TooLong { .. })
        ));
    }
}
