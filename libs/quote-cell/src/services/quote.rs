use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use notification_cell::{strip_tags, MailerClient, MessageTemplates, OutboundEmail};
use shared_config::AppConfig;
use shared_database::rest::RestClient;

use crate::models::{CreateQuoteRequest, NewQuote, QuoteError, QuoteRequest};
use crate::services::pricing;
use crate::store::{QuoteStore, RestQuoteStore};

pub struct QuoteService {
    store: Arc<dyn QuoteStore>,
    mailer: Arc<MailerClient>,
    templates: Arc<MessageTemplates>,
    copy_to: Option<String>,
}

impl QuoteService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_parts(
            Arc::new(RestQuoteStore::new(RestClient::new(config))),
            MailerClient::new(config),
            MessageTemplates::default(),
            config.mail_copy_to.clone(),
        )
    }

    pub fn with_parts(
        store: Arc<dyn QuoteStore>,
        mailer: MailerClient,
        templates: MessageTemplates,
        copy_to: Option<String>,
    ) -> Self {
        Self {
            store,
            mailer: Arc::new(mailer),
            templates: Arc::new(templates),
            copy_to,
        }
    }

    /// Persist a quote request from the public simulator and return it with
    /// its automatic estimate.
    pub async fn create_quote(
        &self,
        request: CreateQuoteRequest,
    ) -> Result<(QuoteRequest, u64), QuoteError> {
        if request.name.trim().is_empty() {
            return Err(QuoteError::Validation("Name is required".to_string()));
        }
        if request.email.trim().is_empty() {
            return Err(QuoteError::Validation("Email is required".to_string()));
        }

        let new = NewQuote {
            name: request.name,
            phone: request.phone,
            email: request.email,
            event_type: request.event_type,
            guest_count: request.guest_count,
            venue: request.venue,
            package: request.package,
            services: request.services,
            ideas: request.ideas,
        };

        let quote = self.store.insert(&new).await?;
        let estimate = pricing::estimate(&quote.package, quote.guest_count, &quote.services);

        info!(
            "Quote request {} created ({}, estimate {})",
            quote.id, quote.package, estimate
        );

        Ok((quote, estimate))
    }

    pub async fn get(&self, id: Uuid) -> Result<QuoteRequest, QuoteError> {
        self.store.fetch(id).await?.ok_or(QuoteError::NotFound)
    }

    pub async fn list(&self) -> Result<Vec<QuoteRequest>, QuoteError> {
        self.store.list().await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), QuoteError> {
        self.store.delete(id).await
    }

    /// Record the administrator's final price and notify the customer.
    ///
    /// The input is Brazilian currency text; anything that does not parse to
    /// a positive value is rejected. The notice email runs detached, so the
    /// transition is visible to the admin immediately.
    pub async fn set_final_price(
        &self,
        id: Uuid,
        input: &str,
    ) -> Result<QuoteRequest, QuoteError> {
        let price = pricing::parse_currency(input);
        if price <= 0.0 {
            return Err(QuoteError::Validation(format!(
                "Invalid final price '{}'",
                input
            )));
        }

        let updated = self.store.set_final_price(id, price).await?;

        let mailer = Arc::clone(&self.mailer);
        let templates = Arc::clone(&self.templates);
        let copy_to = self.copy_to.clone();
        let quote = updated.clone();
        drop(tokio::spawn(async move {
            send_final_price_notice(mailer, templates, copy_to, quote, price).await;
        }));

        Ok(updated)
    }
}

/// Background notice for a final price. Failures are logged and dropped;
/// the price is already persisted.
async fn send_final_price_notice(
    mailer: Arc<MailerClient>,
    templates: Arc<MessageTemplates>,
    copy_to: Option<String>,
    quote: QuoteRequest,
    price: f64,
) {
    let estimate = pricing::estimate(&quote.package, quote.guest_count, &quote.services);

    let services_text = if quote.services.is_empty() {
        "Nenhum".to_string()
    } else {
        quote
            .services
            .iter()
            .map(|key| pricing::service_label(key).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let package_name = pricing::package_info(&quote.package)
        .map(|p| p.name.to_string())
        .unwrap_or_else(|| quote.package.clone());

    let context = [
        ("nome", quote.name.clone()),
        ("tipo_evento", quote.event_type.label().to_string()),
        ("pacote", package_name),
        ("convidados", quote.guest_count.to_string()),
        ("servicos", services_text),
        ("estimativa", pricing::format_currency(estimate as f64)),
        ("preco_final", pricing::format_currency(price)),
    ];

    let email = match templates.render("quote_final_price", &context) {
        Ok(html) => OutboundEmail {
            subject: "Preço Final do Orçamento - Sabina Decorações".to_string(),
            to: vec![quote.email.clone()],
            text: strip_tags(&html),
            html: Some(html),
        },
        Err(e) => {
            warn!("Final price template failed ({}), using plain text", e);
            OutboundEmail {
                subject: "Preço Final do Orçamento - Sabina Decorações".to_string(),
                to: vec![quote.email.clone()],
                text: format!(
                    "Olá {},\n\nO preço final do seu orçamento foi definido: {}.\n\n\
                     Atenciosamente,\nSabina Decorações",
                    quote.name,
                    pricing::format_currency(price)
                ),
                html: None,
            }
        }
    };

    if let Err(e) = mailer.send(&email).await {
        error!("Final price notice for quote {} failed: {}", quote.id, e);
    } else {
        info!("Final price notice for quote {} delivered", quote.id);
    }

    // The studio gets its own short summary, not the customer's mail.
    if let Some(copy) = copy_to {
        let summary = OutboundEmail {
            subject: format!("Cópia: Preço Final Enviado - Orçamento {}", quote.id),
            to: vec![copy],
            text: format!(
                "Preço final de {} enviado para {}.",
                pricing::format_currency(price),
                quote.name
            ),
            html: None,
        };
        if let Err(e) = mailer.send(&summary).await {
            error!("Studio copy for quote {} failed: {}", quote.id, e);
        }
    }
}
