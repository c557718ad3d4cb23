//! Request handlers for the form-submission endpoints.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::ratelimit::client_identifier;

use super::forms::{ContactForm, PricingForm};
use super::server::AppState;

const THROTTLED_MESSAGE: &str = "Too many requests. Please try again later.";
const DELIVERY_FAILED_MESSAGE: &str = "Failed to process your request. Please try again.";

/// Health check endpoint.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// `POST /api/contact` — contact form submission.
pub async fn contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<ContactForm>,
) -> (StatusCode, Json<Value>) {
    let identifier = client_identifier(&headers);

    // The quota check happens before any other work; a denial
    // short-circuits the whole handler.
    if !state
        .limiter
        .check(&identifier, state.limits.contact_limit, state.limits.window())
    {
        debug!(identifier = %identifier, "Contact submission throttled");
        return throttled();
    }

    if let Err(e) = form.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })));
    }
    let form = form.sanitized();

    let id = match state.mailer.send_contact(&form).await {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "Failed to deliver contact submission");
            return delivery_failed();
        }
    };

    // The submission already went through; a lost confirmation should not
    // fail the request.
    if let Err(e) = state
        .mailer
        .send_confirmation(&form.email, &form.first_name, "contact form submission")
        .await
    {
        error!(error = %e, "Failed to send contact confirmation");
    }

    info!(identifier = %identifier, id = %id, "Contact submission accepted");
    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Thank you! We received your message and will be in touch within 2 business hours.",
            "id": id,
        })),
    )
}

/// `POST /api/pricing` — pricing request submission.
pub async fn pricing(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<PricingForm>,
) -> (StatusCode, Json<Value>) {
    let identifier = client_identifier(&headers);

    if !state
        .limiter
        .check(&identifier, state.limits.pricing_limit, state.limits.window())
    {
        debug!(identifier = %identifier, "Pricing request throttled");
        return throttled();
    }

    if let Err(e) = form.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })));
    }
    let form = form.sanitized();

    let id = match state.mailer.send_pricing(&form).await {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "Failed to deliver pricing request");
            return delivery_failed();
        }
    };

    if let Err(e) = state
        .mailer
        .send_confirmation(&form.email, form.first_name(), "pricing request")
        .await
    {
        error!(error = %e, "Failed to send pricing confirmation");
    }

    info!(identifier = %identifier, id = %id, "Pricing request accepted");
    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Thank you! We received your pricing request and will respond within 2 business hours.",
            "id": id,
        })),
    )
}

fn throttled() -> (StatusCode, Json<Value>) {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({ "error": THROTTLED_MESSAGE })),
    )
}

fn delivery_failed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": DELIVERY_FAILED_MESSAGE })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateLimitingConfig;
    use crate::mail::LogMailer;
    use crate::ratelimit::RateLimiter;
    use axum::http::HeaderValue;
    use std::sync::Arc;

    fn test_state(limits: RateLimitingConfig) -> AppState {
        AppState {
            limiter: Arc::new(RateLimiter::new()),
            mailer: Arc::new(LogMailer),
            limits,
        }
    }

    fn headers_for(ip: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_str(ip).unwrap());
        headers
    }

    fn contact_form() -> ContactForm {
        ContactForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            practice: "Example Clinic".to_string(),
            practice_type: "primary-care".to_string(),
            providers: "2-5".to_string(),
            services: vec!["billing".to_string()],
            message: None,
        }
    }

    fn pricing_form() -> PricingForm {
        PricingForm {
            practice_name: "Example Clinic".to_string(),
            name: "Jane Doe".to_string(),
            phone: "555-0100".to_string(),
            email: "jane@example.com".to_string(),
            free_audit: false,
            problems: None,
            services: vec![],
        }
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_contact_accepts_valid_submission() {
        let state = test_state(RateLimitingConfig::default());

        let (status, Json(body)) =
            contact(State(state), headers_for("1.2.3.4"), Json(contact_form())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn test_contact_rejects_missing_fields() {
        let state = test_state(RateLimitingConfig::default());
        let mut form = contact_form();
        form.email = String::new();

        let (status, Json(body)) =
            contact(State(state), headers_for("1.2.3.4"), Json(form)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_contact_throttles_after_quota() {
        let limits = RateLimitingConfig {
            contact_limit: 2,
            ..RateLimitingConfig::default()
        };
        let state = test_state(limits);

        for _ in 0..2 {
            let (status, _) = contact(
                State(state.clone()),
                headers_for("203.0.113.5"),
                Json(contact_form()),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, Json(body)) = contact(
            State(state.clone()),
            headers_for("203.0.113.5"),
            Json(contact_form()),
        )
        .await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], THROTTLED_MESSAGE);

        // Another client is unaffected
        let (status, _) = contact(
            State(state),
            headers_for("198.51.100.7"),
            Json(contact_form()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_throttle_applies_before_validation() {
        let limits = RateLimitingConfig {
            contact_limit: 1,
            ..RateLimitingConfig::default()
        };
        let state = test_state(limits);

        let (status, _) = contact(
            State(state.clone()),
            headers_for("1.2.3.4"),
            Json(contact_form()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // Over quota, even an invalid payload gets the 429, not a 400
        let (status, _) = contact(
            State(state),
            headers_for("1.2.3.4"),
            Json(ContactForm::default()),
        )
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_pricing_accepts_valid_submission() {
        let state = test_state(RateLimitingConfig::default());

        let (status, Json(body)) =
            pricing(State(state), headers_for("1.2.3.4"), Json(pricing_form())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_pricing_rejects_invalid_email() {
        let state = test_state(RateLimitingConfig::default());
        let mut form = pricing_form();
        form.email = "not-an-email".to_string();

        let (status, Json(body)) =
            pricing(State(state), headers_for("1.2.3.4"), Json(form)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid email format");
    }

    #[tokio::test]
    async fn test_pricing_throttles_after_quota() {
        let state = test_state(RateLimitingConfig::default());

        for _ in 0..3 {
            let (status, _) = pricing(
                State(state.clone()),
                headers_for("203.0.113.9"),
                Json(pricing_form()),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, _) = pricing(
            State(state),
            headers_for("203.0.113.9"),
            Json(pricing_form()),
        )
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }
}
