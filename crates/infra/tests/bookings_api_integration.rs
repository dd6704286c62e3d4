//! Integration tests for the typed API facades

mod support;

use bookings_domain::{
    BookingError, BookingStatus, CreateBooking, CreateService, Credentials, PageRequest, Role,
};
use chrono::{TimeZone, Utc};
use serde_json::json;
use support::{api_for, booking_json, service_json, BOOKING_ID, SERVICE_ID, USER_ID};
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn health_reports_service_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "service": "api"})))
        .expect(1)
        .mount(&server)
        .await;

    let health = api_for(&server).health().await.unwrap();

    assert!(health.is_ok());
    assert_eq!(health.service, "api");
}

#[tokio::test]
async fn register_returns_the_new_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({"email": "ada@example.com", "password": "correct-horse"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": USER_ID, "email": "ada@example.com", "role": "admin"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let account = api_for(&server)
        .register(&Credentials::new("ada@example.com", "correct-horse"))
        .await
        .unwrap();

    assert_eq!(account.role, Role::Admin);
    assert_eq!(account.id.to_string(), USER_ID);
}

#[tokio::test]
async fn register_surfaces_duplicate_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already in use"})),
        )
        .mount(&server)
        .await;

    let err = api_for(&server)
        .register(&Credentials::new("ada@example.com", "correct-horse"))
        .await
        .unwrap_err();

    assert_eq!(err, BookingError::http(400, "Email already in use"));
}

#[tokio::test]
async fn logout_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server).logout().await.unwrap();
}

#[tokio::test]
async fn list_bookings_sends_page_and_decodes_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [booking_json("confirmed")],
            "pagination": {"page": 2, "limit": 10, "total": 11, "totalPages": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = api_for(&server).list_bookings(PageRequest::new(2, 10)).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].status, BookingStatus::Confirmed);
    assert_eq!(page.pagination.total_pages, 2);
}

#[tokio::test]
async fn create_booking_posts_camel_case_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(body_json(json!({
            "serviceId": SERVICE_ID,
            "startTime": "2025-10-20T09:00:00Z",
            "endTime": "2025-10-20T10:00:00Z",
            "notes": "first visit"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(booking_json("pending")))
        .expect(1)
        .mount(&server)
        .await;

    let booking = CreateBooking {
        service_id: Uuid::parse_str(SERVICE_ID).unwrap(),
        start_time: Utc.with_ymd_and_hms(2025, 10, 20, 9, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2025, 10, 20, 10, 0, 0).unwrap(),
        notes: Some("first visit".into()),
    };
    let created = api_for(&server).create_booking(&booking).await.unwrap();

    assert_eq!(created.status, BookingStatus::Pending);
    assert_eq!(created.id.to_string(), BOOKING_ID);
}

#[tokio::test]
async fn cancel_booking_patches_status() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("/bookings/{BOOKING_ID}")))
        .and(body_json(json!({"status": "cancelled"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json("cancelled")))
        .expect(1)
        .mount(&server)
        .await;

    let cancelled =
        api_for(&server).cancel_booking(Uuid::parse_str(BOOKING_ID).unwrap()).await.unwrap();

    assert_eq!(cancelled.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn missing_booking_is_a_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/bookings/{BOOKING_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Booking not found"})))
        .mount(&server)
        .await;

    let err = api_for(&server).get_booking(Uuid::parse_str(BOOKING_ID).unwrap()).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.label(), "http_client");
}

#[tokio::test]
async fn get_service_decodes_contract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/services/{SERVICE_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(service_json()))
        .expect(1)
        .mount(&server)
        .await;

    let service = api_for(&server).get_service(Uuid::parse_str(SERVICE_ID).unwrap()).await.unwrap();

    assert_eq!(service.name, "Haircut");
    assert_eq!(service.duration, 30);
    assert!(service.is_active);
}

#[tokio::test]
async fn invalid_service_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(201).set_body_json(service_json()))
        .expect(0)
        .mount(&server)
        .await;

    let service = CreateService { name: String::new(), description: None, duration: 30, price: 10.0 };
    let err = api_for(&server).create_service(&service).await.unwrap_err();

    assert!(matches!(err, BookingError::InvalidInput(_)));
}
