use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notification_cell::{
    DispatchOutcome, DispatchRateLimiter, MailerClient, MessageTemplates, NotificationDispatcher,
    NotificationError, NotificationKind, RestAppointmentLookup,
};
use shared_config::AppConfig;
use shared_database::rest::RestClient;

struct TestSetup {
    dispatcher: Arc<NotificationDispatcher>,
    rest_server: MockServer,
    mail_server: MockServer,
    appointment_id: Uuid,
}

impl TestSetup {
    async fn new(templates: MessageTemplates) -> Self {
        Self::with_cooldown(templates, Duration::from_secs(1)).await
    }

    async fn with_cooldown(templates: MessageTemplates, cooldown: Duration) -> Self {
        let rest_server = MockServer::start().await;
        let mail_server = MockServer::start().await;

        let config = AppConfig {
            rest_base_url: rest_server.uri(),
            rest_service_key: "test-key".to_string(),
            admin_jwt_secret: "test-secret".to_string(),
            mail_api_url: mail_server.uri(),
            mail_api_token: "test-token".to_string(),
            mail_from: "contato@sabinadecor.com.br".to_string(),
            mail_copy_to: None,
            local_utc_offset_hours: -3,
        };

        let lookup = Arc::new(RestAppointmentLookup::new(RestClient::new(&config)));
        let dispatcher = Arc::new(NotificationDispatcher::with_parts(
            lookup,
            MailerClient::new(&config),
            templates,
            DispatchRateLimiter::new(cooldown),
        ));

        Self {
            dispatcher,
            rest_server,
            mail_server,
            appointment_id: Uuid::new_v4(),
        }
    }

    async fn mock_appointment_row(&self) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/appointments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![serde_json::json!({
                "id": self.appointment_id,
                "name": "Maria Silva",
                "email": "maria@example.com",
                "phone": "(11) 99999-8888",
                "date": "2026-09-10",
                "time": "14:00:00",
                "message": ""
            })]))
            .mount(&self.rest_server)
            .await;
    }

    async fn mock_missing_appointment(&self) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/appointments"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()),
            )
            .mount(&self.rest_server)
            .await;
    }

    async fn mock_mail_accepting(&self, expected_sends: u64) {
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg-1",
                "status": "queued"
            })))
            .expect(expected_sends)
            .mount(&self.mail_server)
            .await;
    }

    async fn sent_mail_bodies(&self) -> Vec<serde_json::Value> {
        self.mail_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|req| serde_json::from_slice(&req.body).unwrap())
            .collect()
    }
}

#[tokio::test]
async fn dispatch_delivers_templated_email() {
    let setup = TestSetup::new(MessageTemplates::default()).await;
    setup.mock_appointment_row().await;
    setup.mock_mail_accepting(1).await;

    let outcome = setup
        .dispatcher
        .dispatch(setup.appointment_id, NotificationKind::Accepted)
        .await;

    assert_eq!(outcome, DispatchOutcome::Delivered);

    let bodies = setup.sent_mail_bodies().await;
    assert_eq!(bodies.len(), 1);
    let html = bodies[0]["html"].as_str().unwrap();
    assert!(html.contains("Maria Silva"));
    assert!(html.contains("10/09/2026"));
    assert!(html.contains("14:00"));
    // Empty free-text message renders as the placeholder.
    assert!(html.contains("Não informada"));
}

#[tokio::test]
async fn second_dispatch_within_cooldown_is_dropped() {
    let setup = TestSetup::new(MessageTemplates::default()).await;
    setup.mock_appointment_row().await;
    setup.mock_mail_accepting(1).await;

    let first = setup
        .dispatcher
        .dispatch(setup.appointment_id, NotificationKind::Accepted)
        .await;
    let second = setup
        .dispatcher
        .dispatch(setup.appointment_id, NotificationKind::Accepted)
        .await;

    assert_eq!(first, DispatchOutcome::Delivered);
    assert_eq!(second, DispatchOutcome::RateLimited);
}

#[tokio::test]
async fn render_failure_still_delivers_exactly_one_fallback_email() {
    // Template references a placeholder the dispatcher never supplies, so
    // rendering fails and the plain-text fallback goes out instead.
    let mut broken = HashMap::new();
    broken.insert(
        "appointment_accepted".to_string(),
        "<p>Olá {{nome}}, ref {{campo_inexistente}}</p>".to_string(),
    );
    broken.insert(
        "appointment_rejected".to_string(),
        "<p>{{campo_inexistente}}</p>".to_string(),
    );

    let setup = TestSetup::new(MessageTemplates::with_templates(broken)).await;
    setup.mock_appointment_row().await;
    setup.mock_mail_accepting(1).await;

    let outcome = setup
        .dispatcher
        .dispatch(setup.appointment_id, NotificationKind::Accepted)
        .await;

    assert_eq!(outcome, DispatchOutcome::FallbackDelivered);

    let bodies = setup.sent_mail_bodies().await;
    assert_eq!(bodies.len(), 1);
    let text = bodies[0]["text"].as_str().unwrap();
    assert!(text.contains("Maria Silva"));
    assert!(text.contains("10/09/2026"));
    assert!(text.contains("14:00"));
    assert!(bodies[0].get("html").is_none());
}

#[tokio::test]
async fn rejection_fallback_mentions_contact_alternatives() {
    let setup = TestSetup::new(MessageTemplates::with_templates(HashMap::new())).await;
    setup.mock_appointment_row().await;
    setup.mock_mail_accepting(1).await;

    let outcome = setup
        .dispatcher
        .dispatch(setup.appointment_id, NotificationKind::Rejected)
        .await;

    assert_eq!(outcome, DispatchOutcome::FallbackDelivered);

    let bodies = setup.sent_mail_bodies().await;
    let text = bodies[0]["text"].as_str().unwrap();
    assert!(text.contains("RECUSADO"));
    assert!(text.contains("alternativas"));
}

#[tokio::test]
async fn missing_appointment_records_lookup_failure_without_sending() {
    let setup = TestSetup::new(MessageTemplates::default()).await;
    setup.mock_missing_appointment().await;
    setup.mock_mail_accepting(0).await;

    let outcome = setup
        .dispatcher
        .dispatch(setup.appointment_id, NotificationKind::Accepted)
        .await;

    assert_eq!(
        outcome,
        DispatchOutcome::Failed(NotificationError::LookupFailure)
    );
}

#[tokio::test]
async fn transport_failure_on_both_attempts_is_recorded() {
    let setup = TestSetup::new(MessageTemplates::default()).await;
    setup.mock_appointment_row().await;

    // Both the templated send and the fallback hit the same failing endpoint.
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("relay down"))
        .expect(2)
        .mount(&setup.mail_server)
        .await;

    let outcome = setup
        .dispatcher
        .dispatch(setup.appointment_id, NotificationKind::Accepted)
        .await;

    assert_matches!(
        outcome,
        DispatchOutcome::Failed(NotificationError::TransportFailure(_))
    );
}

#[tokio::test]
async fn cooldown_reopens_after_the_window_passes() {
    let setup =
        TestSetup::with_cooldown(MessageTemplates::default(), Duration::from_millis(50)).await;
    setup.mock_appointment_row().await;
    setup.mock_mail_accepting(2).await;

    let first = setup
        .dispatcher
        .dispatch(setup.appointment_id, NotificationKind::Accepted)
        .await;
    tokio::time::sleep(Duration::from_millis(80)).await;
    let second = setup
        .dispatcher
        .dispatch(setup.appointment_id, NotificationKind::Rejected)
        .await;

    assert_eq!(first, DispatchOutcome::Delivered);
    assert_eq!(second, DispatchOutcome::Delivered);
}
