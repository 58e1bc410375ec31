use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reschedule_cell::{reschedule_routes, RescheduleState};
use shared_utils::test_utils::{MockTwilioResponses, TestConfig};

async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn sms(from: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/sms-webhook")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "From={}&Body={}",
            urlencoding::encode(from),
            urlencoding::encode(body)
        )))
        .unwrap()
}

fn confirm(token: &str, time: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/confirm-time")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "token": token, "time": time }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_missed_appointment_reschedule_flow() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MockTwilioResponses::messages_path()))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(MockTwilioResponses::message_created("+16155551212", "Hello")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let static_dir = tempfile::tempdir().unwrap();
    let config = TestConfig::with_twilio_url(&mock_server.uri())
        .static_dir(static_dir.path())
        .to_arc();
    let router = reschedule_routes(Arc::new(RescheduleState::from_config(config).unwrap()));

    // Office sends the initial text
    let response = send(
        &router,
        Request::builder()
            .method("POST")
            .uri("/send-initial-message")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "phone=%2B16155551212&name=Alice\
                 &missed_time=Monday%2C+January+06%2C+2025+at+09%3A00+AM\
                 &facility_name=Green+Hills+Clinic",
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = json_body(response).await["token"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 8);

    let requests = mock_server.received_requests().await.unwrap();
    let outbound = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(outbound.contains("To=%2B16155551212"));
    assert!(outbound.contains("Hello+Alice"));

    // Patient replies 1 from a differently formatted number
    let response = send(&router, sms("(615) 555-1212", "1")).await;
    let xml = text_body(response).await;
    let link = format!("http://localhost:3000/secure_link_page/?token={}", token);
    assert!(xml.contains(&link));

    // Link resolves to the reschedule page
    let response = send(
        &router,
        Request::builder()
            .uri(format!("/choose-time/{}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], link.as_str());

    // Page loads branding
    let response = send(
        &router,
        Request::builder()
            .uri(format!("/get-branding/{}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let branding = json_body(response).await;
    assert_eq!(branding["facility_name"], "Green Hills Clinic");
    assert_eq!(branding["logo_url"], Value::Null);
    assert_eq!(branding["option1"], "Tuesday, January 07, 2025 at 10:00 AM");

    // Neither slot works, ask for more
    let response = send(&router, confirm(&token, "3")).await;
    let body = json_body(response).await;
    assert_eq!(body["message"], "New options generated");
    let new_option = body["newOptions"][1].as_str().unwrap().to_string();
    assert!(new_option.ends_with("at 02:30 PM"));

    // Pick the second new slot
    let response = send(&router, confirm(&token, &new_option)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "message": "Appointment confirmed" }));

    // A later text still reaches the session
    let response = send(&router, sms("+16155551212", "2")).await;
    assert!(text_body(response)
        .await
        .contains("A member of our team will call you soon. Or call us now at 615-867-5309."));
}
