use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use mockall::mock;
use serde_json::json;

use contact_backend::{
    email::{MailError, Mailer, OutboundEmail},
    routes,
    settings::AppConfig,
    AppState,
};

mock! {
    pub MailTransport {}

    #[async_trait]
    impl Mailer for MailTransport {
        async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
    }
}

fn app_state(mailer: MockMailTransport) -> web::Data<AppState<MockMailTransport>> {
    web::Data::new(AppState::with_mailer(&AppConfig::default(), mailer))
}

fn valid_body() -> serde_json::Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "+14065550123",
        "service": "Custom Built-ins",
        "details": "Bookshelves for the study."
    })
}

macro_rules! contact_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .configure(routes::configure_routes::<MockMailTransport>),
        )
        .await
    };
}

#[actix_web::test]
async fn valid_submission_returns_200() {
    let mut mailer = MockMailTransport::new();
    mailer.expect_send().times(2).returning(|_| Ok(()));
    let app = contact_app!(app_state(mailer));

    let req = test::TestRequest::post()
        .uri("/contact")
        .insert_header(("x-forwarded-for", "9.9.9.9"))
        .set_json(valid_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("Thank you"));
}

#[actix_web::test]
async fn missing_name_and_bad_email_return_400_with_per_field_details() {
    let mut mailer = MockMailTransport::new();
    mailer.expect_send().times(0);
    let app = contact_app!(app_state(mailer));

    let req = test::TestRequest::post()
        .uri("/contact")
        .set_json(json!({ "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
}

#[actix_web::test]
async fn camel_case_referral_key_reaches_the_business_alert() {
    let mut mailer = MockMailTransport::new();
    let mut seq = mockall::Sequence::new();
    mailer
        .expect_send()
        .withf(|email| {
            email.to == "info@montanafinishcarpenter.com"
                && email.html.contains("Referral from a neighbor")
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    mailer
        .expect_send()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    let app = contact_app!(app_state(mailer));

    let mut body = valid_body();
    body["hearAbout"] = json!("Referral from a neighbor");

    let req = test::TestRequest::post()
        .uri("/contact")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn honeypot_submission_returns_200_and_sends_no_email() {
    let mut mailer = MockMailTransport::new();
    mailer.expect_send().times(0);
    let app = contact_app!(app_state(mailer));

    let mut body = valid_body();
    body["website_url"] = json!("http://bot.example");

    let req = test::TestRequest::post()
        .uri("/contact")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn sixth_submission_in_the_window_is_rate_limited() {
    let mut mailer = MockMailTransport::new();
    // Five accepted submissions, two sends each.
    mailer.expect_send().times(10).returning(|_| Ok(()));
    let app = contact_app!(app_state(mailer));

    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/contact")
            .insert_header(("x-forwarded-for", "1.2.3.4"))
            .set_json(valid_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri("/contact")
        .insert_header(("x-forwarded-for", "1.2.3.4"))
        .set_json(valid_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["retryAfter"].as_u64().unwrap() > 0);
}

#[actix_web::test]
async fn rate_limit_buckets_are_per_client() {
    let mut mailer = MockMailTransport::new();
    mailer.expect_send().times(12).returning(|_| Ok(()));
    let app = contact_app!(app_state(mailer));

    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/contact")
            .insert_header(("x-forwarded-for", "1.2.3.4"))
            .set_json(valid_body())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    // A different identifier still has a full quota.
    let req = test::TestRequest::post()
        .uri("/contact")
        .insert_header(("x-forwarded-for", "5.6.7.8"))
        .set_json(valid_body())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn primary_notification_failure_returns_500_with_fallback_hint() {
    let mut mailer = MockMailTransport::new();
    mailer
        .expect_send()
        .times(1)
        .returning(|_| Err(MailError::Transport("provider down".to_string())));
    let app = contact_app!(app_state(mailer));

    let req = test::TestRequest::post()
        .uri("/contact")
        .set_json(valid_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("call us"));
}

#[actix_web::test]
async fn acknowledgment_failure_still_returns_200() {
    let mut mailer = MockMailTransport::new();
    let mut seq = mockall::Sequence::new();
    mailer
        .expect_send()
        .withf(|email| email.to == "info@montanafinishcarpenter.com")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    mailer
        .expect_send()
        .withf(|email| email.to == "jane@example.com")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(MailError::Rejected("bounced".to_string())));
    let app = contact_app!(app_state(mailer));

    let req = test::TestRequest::post()
        .uri("/contact")
        .set_json(valid_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn malformed_json_returns_400_error_envelope() {
    let mut mailer = MockMailTransport::new();
    mailer.expect_send().times(0);
    let app = contact_app!(app_state(mailer));

    let req = test::TestRequest::post()
        .uri("/contact")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().is_some());
}

#[actix_web::test]
async fn cors_preflight_allows_only_the_configured_origin() {
    let mut mailer = MockMailTransport::new();
    mailer.expect_send().times(0);
    let state = app_state(mailer);

    let origins = vec!["https://montanafinishcarpenter.com".to_string()];
    let app = test::init_service(
        App::new()
            .app_data(state)
            .wrap(routes::cors_for(&origins))
            .configure(routes::configure_routes::<MockMailTransport>),
    )
    .await;

    let req = test::TestRequest::with_uri("/contact")
        .method(actix_web::http::Method::OPTIONS)
        .insert_header(("Origin", "https://montanafinishcarpenter.com"))
        .insert_header(("Access-Control-Request-Method", "POST"))
        .insert_header(("Access-Control-Request-Headers", "content-type"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let allow_origin = resp
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok());
    assert_eq!(allow_origin, Some("https://montanafinishcarpenter.com"));

    let disallowed = test::TestRequest::with_uri("/contact")
        .method(actix_web::http::Method::OPTIONS)
        .insert_header(("Origin", "https://evil.example"))
        .insert_header(("Access-Control-Request-Method", "POST"))
        .to_request();
    let resp = test::try_call_service(&app, disallowed).await;
    match resp {
        Ok(resp) => assert!(resp
            .headers()
            .get("access-control-allow-origin")
            .is_none()),
        Err(_) => {} // actix-cors rejects the preflight outright
    }
}
