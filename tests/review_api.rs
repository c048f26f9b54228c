// tests/review_api.rs
// HTTP-level tests for review and restroom routes

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{seeded_db, USER_HEADER};
use serde_json::{json, Value};

fn create_request(user: &str, restroom_id: i64, rating: i32) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/review")
        .insert_header((USER_HEADER, user))
        .set_json(json!({
            "restroomId": restroom_id,
            "reviewContent": format!("rated {}", rating),
            "rating": rating
        }))
}

/// POST a review through `$app` and return the envelope's data
macro_rules! create {
    ($app:expr, $user:expr, $restroom:expr, $rating:expr) => {{
        let req = create_request($user, $restroom, $rating).to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        assert_eq!(body["code"], "00", "create failed: {}", body);
        body["data"].clone()
    }};
}

#[actix_web::test]
async fn test_create_review_updates_average() {
    let db = seeded_db().await;
    let app = test_app!(db);

    let review = create!(app, "1", 1, 5);
    assert_eq!(review["reviewId"], 1);
    assert_eq!(review["userId"], 1);
    assert_eq!(review["restroomId"], 1);
    assert_eq!(review["reviewContent"], "rated 5");
    create!(app, "2", 1, 3);
    create!(app, "1", 1, 4);

    let req = test::TestRequest::get().uri("/api/restroom/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["msg"], "success");
    assert_eq!(body["data"]["averageRating"], 4.0);
}

#[actix_web::test]
async fn test_envelope_on_missing_principal() {
    let db = seeded_db().await;
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/review")
        .set_json(json!({"restroomId": 1, "reviewContent": "x", "rating": 3}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "06");
    assert_eq!(body["msg"], "fail");
    assert_eq!(body["data"]["status"], "INVALID_TOKEN_EXCEPTION");
    assert_eq!(db.review_row_count().await, 0);
}

#[actix_web::test]
async fn test_create_review_rejects_bad_input() {
    let db = seeded_db().await;
    let app = test_app!(db);

    let cases = [
        (json!({"restroomId": 1, "reviewContent": "x", "rating": 9}), StatusCode::BAD_REQUEST, "23"),
        (json!({"restroomId": 1, "reviewContent": "   ", "rating": 2}), StatusCode::BAD_REQUEST, "23"),
        (json!({"restroomId": 1, "rating": 2}), StatusCode::BAD_REQUEST, "23"),
        (json!({"restroomId": 99, "reviewContent": "x", "rating": 2}), StatusCode::NOT_FOUND, "17"),
    ];

    for (payload, status, code) in cases {
        let req = test::TestRequest::post()
            .uri("/api/review")
            .insert_header((USER_HEADER, "1"))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status, "payload {}", payload);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], code, "payload {}", payload);
    }

    assert_eq!(db.review_row_count().await, 0);
}

#[actix_web::test]
async fn test_malformed_json_body() {
    let db = seeded_db().await;
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/review")
        .insert_header((USER_HEADER, "1"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"restroomId\": 1,")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "JSON_PARSE_EXCEPTION");
}

#[actix_web::test]
async fn test_non_positive_and_malformed_ids() {
    let db = seeded_db().await;
    let app = test_app!(db);

    let cases = [
        ("/api/review/get/0", "VALIDATION_EXCEPTION"),
        ("/api/review/list/latest/-1", "VALIDATION_EXCEPTION"),
        ("/api/review/get/abc", "INVALID_PARAMETER"),
    ];

    for (uri, status) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], status, "{}", uri);
    }
}

#[actix_web::test]
async fn test_only_author_can_modify() {
    let db = seeded_db().await;
    let app = test_app!(db);
    create!(app, "1", 1, 5);

    let req = test::TestRequest::patch()
        .uri("/api/review/1")
        .insert_header((USER_HEADER, "2"))
        .set_json(json!({"reviewContent": "hijacked", "rating": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "05");

    let req = test::TestRequest::delete()
        .uri("/api/review/1")
        .insert_header((USER_HEADER, "2"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get().uri("/api/review/get/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["reviewContent"], "rated 5");
}

#[actix_web::test]
async fn test_update_and_delete_review() {
    let db = seeded_db().await;
    let app = test_app!(db);
    create!(app, "1", 2, 5);
    create!(app, "1", 2, 3);

    let req = test::TestRequest::patch()
        .uri("/api/review/1")
        .insert_header((USER_HEADER, "1"))
        .set_json(json!({"reviewContent": "changed my mind", "rating": 1}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["rating"], 1);
    assert_eq!(body["data"]["reviewContent"], "changed my mind");

    let req = test::TestRequest::get().uri("/api/restroom/2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["averageRating"], 2.0);

    let req = test::TestRequest::delete()
        .uri("/api/review/2")
        .insert_header((USER_HEADER, "1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], "00");
    assert_eq!(body["data"], "Review deleted");

    let req = test::TestRequest::get().uri("/api/review/get/2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "REVIEW_NOT_FOUND");

    let req = test::TestRequest::get().uri("/api/restroom/2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["averageRating"], 1.0);
}

#[actix_web::test]
async fn test_list_orders() {
    let db = seeded_db().await;
    let app = test_app!(db);
    for (user, rating) in [("1", 3), ("2", 5), ("1", 1), ("2", 3)] {
        create!(app, user, 1, rating);
    }

    let ids = |body: &Value| -> Vec<i64> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["reviewId"].as_i64().unwrap())
            .collect()
    };

    let req = test::TestRequest::get().uri("/api/review/list/latest/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![4, 3, 2, 1]);

    let req = test::TestRequest::get().uri("/api/review/list/low-rating/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![3, 1, 4, 2]);

    let req = test::TestRequest::get().uri("/api/review/list/high-rating/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![2, 4, 1, 3]);

    let req = test::TestRequest::get()
        .uri("/api/review/list")
        .insert_header((USER_HEADER, "2"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![4, 2]);

    let req = test::TestRequest::get().uri("/api/review/list/latest/2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!([]));

    let req = test::TestRequest::get().uri("/api/review/list/latest/77").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health() {
    let db = seeded_db().await;
    let app = test_app!(db);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "chamjimayo");
}
