//! End-to-end coverage of the REST surface over in-memory adapters.

mod support;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use little_lemon::domain::TRACE_ID_HEADER;
use serde_json::{Value, json};
use support::{PASSWORD, app, memory_state, token_header};

async fn send<S>(service: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(service, request).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

async fn sign_up<S>(service: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, _) = send(
        service,
        test::TestRequest::post()
            .uri("/auth/users/")
            .set_json(json!({ "username": username, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        service,
        test::TestRequest::post()
            .uri("/auth/token/login/")
            .set_json(json!({ "username": username, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["auth_token"]
        .as_str()
        .expect("auth token")
        .to_owned()
}

#[actix_web::test]
async fn menu_walkthrough_from_signup_to_listing() {
    let service = test::init_service(app(memory_state())).await;
    let token = sign_up(&service, "alice").await;

    let (status, category) = send(
        &service,
        test::TestRequest::post()
            .uri("/restaurant/categories/")
            .insert_header(token_header(&token))
            .set_json(json!({ "title": "Beverages" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(category["slug"], "beverages");
    let category_id = category["id"].as_i64().expect("category id");

    let (status, item) = send(
        &service,
        test::TestRequest::post()
            .uri("/restaurant/menu/")
            .insert_header(token_header(&token))
            .set_json(json!({
                "title": "Tea",
                "price": "2.50",
                "inventory": 20,
                "category": category_id
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["price"], "2.50");
    let item_id = item["id"].as_i64().expect("item id");

    let (status, listing) = send(
        &service,
        test::TestRequest::get().uri("/restaurant/menu/").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = listing.as_array().expect("menu listing");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Tea");
    assert_eq!(items[0]["category"], category_id);

    let (status, fetched) = send(
        &service,
        test::TestRequest::get()
            .uri(&format!("/restaurant/menu/{item_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, item);
}

#[actix_web::test]
async fn partial_update_keeps_untouched_fields() {
    let service = test::init_service(app(memory_state())).await;
    let token = sign_up(&service, "alice").await;

    let (_, item) = send(
        &service,
        test::TestRequest::post()
            .uri("/restaurant/menu/")
            .insert_header(token_header(&token))
            .set_json(json!({ "name": "Lemonade", "price": 3, "inventory": 5 }))
            .to_request(),
    )
    .await;
    let id = item["id"].as_i64().expect("item id");

    let (status, patched) = send(
        &service,
        test::TestRequest::patch()
            .uri(&format!("/restaurant/menu/{id}/"))
            .insert_header(token_header(&token))
            .set_json(json!({ "price": "3.25" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["price"], "3.25");
    assert_eq!(patched["title"], "Lemonade");
    assert_eq!(patched["inventory"], 5);
}

#[actix_web::test]
async fn duplicate_category_title_conflicts() {
    let service = test::init_service(app(memory_state())).await;
    let token = sign_up(&service, "alice").await;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let (status, body) = send(
            &service,
            test::TestRequest::post()
                .uri("/restaurant/categories/")
                .insert_header(token_header(&token))
                .set_json(json!({ "title": "Desserts" }))
                .to_request(),
        )
        .await;
        assert_eq!(status, expected);
        if expected == StatusCode::CONFLICT {
            assert_eq!(body["code"], "conflict");
        }
    }
}

#[actix_web::test]
async fn menu_writes_require_a_token() {
    let service = test::init_service(app(memory_state())).await;

    let (status, body) = send(
        &service,
        test::TestRequest::post()
            .uri("/restaurant/menu/")
            .set_json(json!({ "title": "Tea", "price": "2.50" }))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn unknown_menu_item_is_not_found() {
    let service = test::init_service(app(memory_state())).await;

    let (status, body) = send(
        &service,
        test::TestRequest::get().uri("/restaurant/menu/999/").to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn malformed_json_is_rejected_with_details() {
    let service = test::init_service(app(memory_state())).await;
    let token = sign_up(&service, "alice").await;

    let (status, body) = send(
        &service,
        test::TestRequest::post()
            .uri("/restaurant/categories/")
            .insert_header(token_header(&token))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"title\":")
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "malformed_body");
}

#[actix_web::test]
async fn bookings_require_authentication() {
    let service = test::init_service(app(memory_state())).await;

    let response = test::call_service(
        &service,
        test::TestRequest::get()
            .uri("/restaurant/booking/tables/")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
}

#[actix_web::test]
async fn bookings_are_private_to_their_owner() {
    let service = test::init_service(app(memory_state())).await;
    let alice = sign_up(&service, "alice").await;
    let bob = sign_up(&service, "bob").await;

    let (status, booking) = send(
        &service,
        test::TestRequest::post()
            .uri("/restaurant/booking/tables/")
            .insert_header(token_header(&alice))
            .set_json(json!({
                "name": "Alice",
                "table_number": 4,
                "no_of_guests": 2,
                "booking_date": "2026-07-04T19:00:00Z"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = booking["id"].as_i64().expect("booking id");
    let path = format!("/restaurant/booking/tables/{id}/");

    let (status, listing) = send(
        &service,
        test::TestRequest::get()
            .uri("/restaurant/booking/tables/")
            .insert_header(token_header(&bob))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing, json!([]));

    let (status, _) = send(
        &service,
        test::TestRequest::get()
            .uri(&path)
            .insert_header(token_header(&bob))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &service,
        test::TestRequest::delete()
            .uri(&path)
            .insert_header(token_header(&bob))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, own) = send(
        &service,
        test::TestRequest::get()
            .uri(&path)
            .insert_header(token_header(&alice))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own["name"], "Alice");
}

#[actix_web::test]
async fn logout_revokes_the_token() {
    let service = test::init_service(app(memory_state())).await;
    let token = sign_up(&service, "alice").await;

    let (status, me) = send(
        &service,
        test::TestRequest::get()
            .uri("/auth/users/me/")
            .insert_header(token_header(&token))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "alice");

    let (status, _) = send(
        &service,
        test::TestRequest::post()
            .uri("/auth/token/logout/")
            .insert_header(token_header(&token))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &service,
        test::TestRequest::get()
            .uri("/auth/users/me/")
            .insert_header(token_header(&token))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logging_in_again_rotates_the_token() {
    let service = test::init_service(app(memory_state())).await;
    let first = sign_up(&service, "alice").await;

    let (status, body) = send(
        &service,
        test::TestRequest::post()
            .uri("/auth/token/login/")
            .set_json(json!({ "username": "alice", "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let second = body["auth_token"].as_str().expect("auth token").to_owned();
    assert_ne!(first, second);

    for (token, expected) in [
        (&first, StatusCode::UNAUTHORIZED),
        (&second, StatusCode::OK),
    ] {
        let (status, _) = send(
            &service,
            test::TestRequest::get()
                .uri("/auth/users/me/")
                .insert_header(token_header(token))
                .to_request(),
        )
        .await;
        assert_eq!(status, expected);
    }
}
