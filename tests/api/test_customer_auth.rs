//! Customer registration, sign-in and profile.

use actix_web::test;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_register_then_me() {
    let state = create_test_state();
    let app = create_test_app(&state).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "fullname": "Jane Doe",
            "email": "jane@shop.test",
            "password": "hunter22",
            "shippingAddress": "1 Main St",
            "phone": "555-0100"
        }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 201, "register failed: {}", body);
    assert_eq!(body["success"], true);
    let token = body["token"].as_str().expect("token").to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["email"], "jane@shop.test");
    assert_eq!(body["data"]["shippingAddress"], "1 Main St");
    assert_eq!(body["data"]["phone"], "555-0100");
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("passwordHash").is_none());
}

#[actix_rt::test]
async fn test_register_reports_all_missing_fields() {
    let state = create_test_state();
    let app = create_test_app(&state).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "fullname": "Jane Doe" }));
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 400);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": {
                "status": 400,
                "type": "invalidArgument",
                "message": "invalid one or more argument(s)",
                "detail": [
                    { "code": "missingEmail", "message": "email field is missing" },
                    { "code": "missingPassword", "message": "password field is missing" },
                    { "code": "missingShippingAddress", "message": "shippingAddress field is missing" }
                ]
            }
        })
    );
}

#[actix_rt::test]
async fn test_register_rejects_bad_email() {
    let state = create_test_state();
    let app = create_test_app(&state).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "fullname": "Jane Doe",
            "email": "not-an-email",
            "password": "hunter22",
            "shippingAddress": "1 Main St"
        }));
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"]["type"], "invalidArgument");
    assert_eq!(body["error"]["message"], "email is not valid");
    assert!(body["error"].get("detail").is_none());
}

#[actix_rt::test]
async fn test_register_duplicate_email_is_already_exists() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    seed_customer(&state, "jane@shop.test").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "fullname": "Other Jane",
            "email": "jane@shop.test",
            "password": "hunter22",
            "shippingAddress": "2 Side St"
        }));
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        json!({ "status": 400, "type": "alreadyExists", "message": "email already exists" })
    );
}

#[actix_rt::test]
async fn test_login_success_and_wrong_password() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    seed_customer(&state, "a@x.com").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "a@x.com", "password": TEST_PASSWORD }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert!(body["token"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "a@x.com", "password": "wrong" }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"]["type"], "unauthenticated");
    assert_eq!(body["error"]["message"], "email or password is incorrect");
}

#[actix_rt::test]
async fn test_login_missing_field_subsets() {
    let state = create_test_state();
    let app = create_test_app(&state).await;

    let cases = [
        (json!({}), vec!["missingEmail", "missingPassword"]),
        (json!({ "password": "p" }), vec!["missingEmail"]),
        (json!({ "email": "a@x.com" }), vec!["missingPassword"]),
        (json!({ "email": "", "password": "" }), vec!["missingEmail", "missingPassword"]),
    ];

    for (payload, expected) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(&payload);
        let (status, body) = send(&app, req).await;
        assert_eq!(status, 400, "payload {}", payload);

        let codes: Vec<&str> = body["error"]["detail"]
            .as_array()
            .expect("detail array")
            .iter()
            .map(|d| d["code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, expected, "payload {}", payload);
    }
}

#[actix_rt::test]
async fn test_update_details_echoes_changes() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let customer = seed_customer(&state, "jane@shop.test").await;
    let token = customer_token(&state, &customer);

    let req = test::TestRequest::put()
        .uri("/api/v1/auth/update-details")
        .insert_header(bearer(&token))
        .set_json(json!({ "shippingAddress": "9 New Rd" }));
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 200, "update failed: {}", body);
    assert_eq!(body["data"]["shippingAddress"], "9 New Rd");
    assert!(body["data"].get("fullname").is_none());
    assert!(body["data"]["updatedAt"].is_string());

    let req = test::TestRequest::put()
        .uri("/api/v1/auth/update-details")
        .insert_header(bearer(&token))
        .set_json(json!({ "email": "bad" }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["message"], "email is not valid");
}

#[actix_rt::test]
async fn test_change_password_flow() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let customer = seed_customer(&state, "jane@shop.test").await;
    let token = customer_token(&state, &customer);

    let req = test::TestRequest::put()
        .uri("/api/v1/auth/change-password")
        .insert_header(bearer(&token))
        .set_json(json!({ "currentPassword": "nope", "newPassword": "n3w-pass" }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"]["message"], "current password is incorrect");

    let req = test::TestRequest::put()
        .uri("/api/v1/auth/change-password")
        .insert_header(bearer(&token))
        .set_json(json!({ "currentPassword": TEST_PASSWORD, "newPassword": "n3w-pass" }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "success": true, "message": "password has been updated" })
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "jane@shop.test", "password": "n3w-pass" }));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);
}
