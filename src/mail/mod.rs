//! Email delivery seam.
//!
//! Actual delivery is an external collaborator; this module only defines
//! the boundary trait the HTTP handlers depend on, plus the logging
//! implementation used when no delivery backend is configured.

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::http::forms::{ContactForm, PricingForm};

/// Trait for delivering form submissions by email.
///
/// Implementations return the delivery id of the admin notification so the
/// handler can echo it back to the submitter.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a contact form submission to the admin inbox.
    async fn send_contact(&self, form: &ContactForm) -> Result<String>;

    /// Deliver a pricing request to the admin inbox.
    async fn send_pricing(&self, form: &PricingForm) -> Result<String>;

    /// Send a confirmation to the submitter.
    async fn send_confirmation(&self, to: &str, first_name: &str, context: &str) -> Result<()>;
}

/// Mailer used when no delivery backend is configured: logs the submission
/// and mints a synthetic delivery id.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_contact(&self, form: &ContactForm) -> Result<String> {
        warn!("No mail backend configured; contact submission will only be logged");
        let id = Uuid::new_v4().to_string();
        info!(
            id = %id,
            email = %form.email,
            practice = %form.practice,
            practice_type = %form.practice_type,
            providers = %form.providers,
            services = ?form.services,
            "Contact form submission"
        );
        Ok(id)
    }

    async fn send_pricing(&self, form: &PricingForm) -> Result<String> {
        warn!("No mail backend configured; pricing request will only be logged");
        let id = Uuid::new_v4().to_string();
        info!(
            id = %id,
            email = %form.email,
            practice_name = %form.practice_name,
            free_audit = form.free_audit,
            services = ?form.services,
            "Pricing request submission"
        );
        Ok(id)
    }

    async fn send_confirmation(&self, to: &str, first_name: &str, context: &str) -> Result<()> {
        info!(
            to = %to,
            first_name = %first_name,
            context = %context,
            "Confirmation email"
        );
        Ok(())
    }
}
