//! Outbound enquiry messages: per-product order links and the footer form.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

use crate::config::StorefrontConfig;
use crate::product::{NOT_AVAILABLE, Price, ProductRecord};

/// One-line confirmation shown after a successful form submission.
pub const SUBMIT_CONFIRMATION: &str = "Thanks. We will contact you soon.";

const MIN_CONTACT_DIGITS: usize = 7;
const MAX_CONTACT_DIGITS: usize = 15;

/// `"NA"` for unknown prices, otherwise the rounded value grouped in thousands.
pub fn format_price_label(price: Price) -> String {
    let Some(value) = price.value() else {
        return NOT_AVAILABLE.to_string();
    };

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Prefilled order message for a product's "order on WhatsApp" link.
pub fn compose_order_message(record: &ProductRecord) -> String {
    format!(
        "Hello, I would like to order {name}.\nPrice: {price}\nPackaging: {packaging}\nPlease confirm availability.",
        name = record.name(),
        price = format_price_label(record.price()),
        packaging = record.packaging(),
    )
}

/// Deep link that opens the messaging service with the order message.
pub fn order_link(record: &ProductRecord, config: &StorefrontConfig) -> String {
    config.deep_link(&compose_order_message(record))
}

/// Text dropped into the enquiry form when "Buy Now" is clicked.
pub fn compose_interest_message(record: &ProductRecord) -> String {
    format!(
        "I am interested in {}. Please share availability and order details.",
        record.name()
    )
}

/// Footer enquiry form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnquiryForm {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub location: String,
    pub message: String,
}

/// Result of an accepted form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnquirySubmission {
    pub message: String,
    pub deep_link: String,
    pub confirmation: &'static str,
}

fn or_na(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() { NOT_AVAILABLE } else { value }
}

/// Multi-line enquiry message; blank fields render as `NA`.
pub fn compose_enquiry_message(form: &EnquiryForm, page_label: &str) -> String {
    format!(
        "New enquiry from {page}\nName: {name}\nEmail: {email}\nContact: {contact}\nLocation: {location}\nMessage: {message}",
        page = or_na(page_label),
        name = or_na(&form.name),
        email = or_na(&form.email),
        contact = or_na(&form.contact),
        location = or_na(&form.location),
        message = or_na(&form.message),
    )
}

fn validate_email(email: &str) -> DomainResult<()> {
    let invalid = |reason: &str| Err(DomainError::validation("email", reason));

    if email.chars().any(char::is_whitespace) {
        return invalid("must not contain spaces");
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return invalid("must contain a single @");
    };
    if local.is_empty() {
        return invalid("missing name before @");
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return invalid("domain must look like example.com");
    }
    Ok(())
}

fn validate_contact(contact: &str) -> DomainResult<()> {
    let digits_part = contact.strip_prefix('+').unwrap_or(contact);
    if !digits_part
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return Err(DomainError::validation(
            "contact",
            "only digits, spaces, hyphens and a leading + are allowed",
        ));
    }
    let digits = digits_part.chars().filter(char::is_ascii_digit).count();
    if !(MIN_CONTACT_DIGITS..=MAX_CONTACT_DIGITS).contains(&digits) {
        return Err(DomainError::validation(
            "contact",
            format!("expected {MIN_CONTACT_DIGITS} to {MAX_CONTACT_DIGITS} digits, got {digits}"),
        ));
    }
    Ok(())
}

impl EnquiryForm {
    /// Prefill the message field from a product's "Buy Now" button.
    pub fn prefill_interest(&mut self, record: &ProductRecord) {
        self.message = compose_interest_message(record);
    }

    /// Name is required; email and contact are checked only when filled in.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name", "is required"));
        }
        let email = self.email.trim();
        if !email.is_empty() {
            validate_email(email)?;
        }
        let contact = self.contact.trim();
        if !contact.is_empty() {
            validate_contact(contact)?;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate, compose and reset.
    ///
    /// A rejected form is left untouched so the user can correct it.
    pub fn submit(
        &mut self,
        document_title: &str,
        config: &StorefrontConfig,
    ) -> DomainResult<EnquirySubmission> {
        if let Err(err) = self.validate() {
            tracing::warn!(error = %err, "enquiry rejected");
            return Err(err);
        }

        let message = compose_enquiry_message(self, config.page_label(document_title));
        let deep_link = config.deep_link(&message);
        self.reset();

        tracing::info!(page = %config.page_label(document_title), "enquiry composed");
        Ok(EnquirySubmission {
            message,
            deep_link,
            confirmation: SUBMIT_CONFIRMATION,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{ProductIndex, ProductSource};

    fn record(name: &str, detail: &str) -> ProductRecord {
        ProductRecord::new(ProductIndex(0), ProductSource::new(name, detail))
    }

    #[test]
    fn price_label_groups_thousands() {
        assert_eq!(format_price_label(Price::known(250.0)), "250");
        assert_eq!(format_price_label(Price::known(1250.0)), "1,250");
        assert_eq!(format_price_label(Price::known(1234567.6)), "1,234,568");
        assert_eq!(format_price_label(Price::known(999.4)), "999");
        assert_eq!(format_price_label(Price::unknown()), "NA");
    }

    #[test]
    fn order_message_interpolates_name_price_packaging() {
        let msg = compose_order_message(&record("Ashwagandha Capsules", "Price: 250 Packaging: 60 caps"));
        assert!(msg.contains("Ashwagandha Capsules"));
        assert!(msg.contains("Price: 250"));
        assert!(msg.contains("Packaging: 60 caps"));
    }

    #[test]
    fn order_message_uses_na_for_unknown_price() {
        let msg = compose_order_message(&record("Herbal Tonic", "Packaging: 200ml"));
        assert!(msg.contains("Price: NA"));
        assert!(msg.contains("Packaging: 200ml"));
    }

    #[test]
    fn order_link_targets_configured_recipient() {
        let link = order_link(&record("Neem Oil", "Price: 99"), &StorefrontConfig::default());
        assert!(link.starts_with("https://wa.me/919999999999?text=Hello%2C%20I%20would%20like%20to%20order%20Neem%20Oil."));
        assert!(link.contains("Packaging%3A%20NA"));
    }

    #[test]
    fn interest_message_names_product() {
        assert_eq!(
            compose_interest_message(&record("Amla Juice", "")),
            "I am interested in Amla Juice. Please share availability and order details."
        );
    }

    #[test]
    fn enquiry_message_fills_blank_fields_with_na() {
        let form = EnquiryForm {
            name: "Asha".to_string(),
            ..EnquiryForm::default()
        };
        let msg = compose_enquiry_message(&form, "Products");
        assert!(msg.contains("Name: Asha"));
        assert!(msg.contains("Email: NA"));
        assert!(msg.contains("Contact: NA"));
        assert!(msg.starts_with("New enquiry from Products\n"));
    }

    #[test]
    fn submit_composes_link_and_resets_form() {
        let mut form = EnquiryForm {
            name: " Asha ".to_string(),
            contact: "+91 98765-43210".to_string(),
            location: "Pune".to_string(),
            ..EnquiryForm::default()
        };
        form.prefill_interest(&record("Brahmi Oil", "Price: 450"));

        let submission = form.submit("", &StorefrontConfig::default()).unwrap();
        assert!(submission.message.starts_with("New enquiry from Website\nName: Asha\n"));
        assert!(submission.message.contains("Message: I am interested in Brahmi Oil."));
        assert!(submission.deep_link.starts_with("https://wa.me/919999999999?text=New%20enquiry"));
        assert_eq!(submission.confirmation, SUBMIT_CONFIRMATION);
        assert_eq!(form, EnquiryForm::default());
    }

    #[test]
    fn submit_rejects_missing_name_and_keeps_fields() {
        let mut form = EnquiryForm {
            email: "asha@example.com".to_string(),
            ..EnquiryForm::default()
        };
        let err = form.submit("Home", &StorefrontConfig::default()).unwrap_err();
        assert_eq!(err.field(), Some("name"));
        assert_eq!(form.email, "asha@example.com");
    }

    #[test]
    fn malformed_email_and_contact_are_rejected() {
        let bad_emails = ["asha", "asha@", "@example.com", "a@b@c.com", "asha@example", "as ha@x.com"];
        for email in bad_emails {
            let form = EnquiryForm {
                name: "Asha".to_string(),
                email: email.to_string(),
                ..EnquiryForm::default()
            };
            assert_eq!(form.validate().unwrap_err().field(), Some("email"), "{email}");
        }

        for contact in ["12345", "98765x4321", "1234567890123456", "91+9876543"] {
            let form = EnquiryForm {
                name: "Asha".to_string(),
                contact: contact.to_string(),
                ..EnquiryForm::default()
            };
            assert_eq!(form.validate().unwrap_err().field(), Some("contact"), "{contact}");
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 300,
                ..ProptestConfig::default()
            })]

            /// Property: order message always names the product and its packaging.
            #[test]
            fn order_message_contains_name_and_packaging(
                name in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]",
                packaging in "[a-z0-9]{1,10}",
                price in proptest::option::of(0u32..100_000)
            ) {
                let detail = match price {
                    Some(p) => format!("Price: {p}\nPackaging: {packaging}"),
                    None => format!("Packaging: {packaging}"),
                };
                let r = record(&name, &detail);
                let msg = compose_order_message(&r);
                prop_assert!(msg.contains(&name));
                prop_assert!(msg.contains(&packaging));
                prop_assert_eq!(price.is_none(), msg.contains("Price: NA"));
            }
        }
    }
}
