//! # Contact Command
//!
//! Validates a contact form submission and records it in the log.
//! There is no delivery backend.

use bazaar_core::validation::validate_contact_message;
use bazaar_core::ContactMessage;
use serde::Serialize;
use tracing::info;

use super::Render;
use crate::cli::ContactArgs;
use crate::config::StoreSettings;
use crate::error::AppResult;
use crate::state::AppContext;

#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub received: bool,
    pub name: String,
    pub email: String,
    pub subject: String,
}

impl Render for ContactReceipt {
    fn render(&self, store: &StoreSettings) -> String {
        format!(
            "Thanks, {}! {} will reply to {} about \"{}\".",
            self.name, store.name, self.email, self.subject
        )
    }
}

impl From<ContactArgs> for ContactMessage {
    fn from(args: ContactArgs) -> Self {
        ContactMessage {
            name: args.name,
            email: args.email,
            subject: args.subject,
            message: args.message,
        }
    }
}

/// Accepts a contact message.
pub fn submit_contact(ctx: &AppContext, message: ContactMessage) -> AppResult<ContactReceipt> {
    validate_contact_message(&message)?;

    info!(
        store = %ctx.config.store.name,
        name = %message.name.trim(),
        email = %message.email.trim(),
        subject = %message.subject.trim(),
        length = message.message.trim().chars().count(),
        "Contact message received"
    );

    Ok(ContactReceipt {
        received: true,
        name: message.name.trim().to_string(),
        email: message.email.trim().to_string(),
        subject: message.subject.trim().to_string(),
    })
}
