//! Admin sign-in, self-service and SUPERADMIN account management.

use actix_web::test;
use serde_json::json;
use storefront_lib::models::AdminRole;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_admin_login_and_me() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    seed_admin(&state, "a@x.com", AdminRole::Moderator).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admins/login")
        .set_json(json!({ "email": "a@x.com", "password": TEST_PASSWORD }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let token = body["token"].as_str().expect("token").to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/admins/me")
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(
        body["data"],
        json!({ "id": 1, "username": "a", "email": "a@x.com", "role": "MODERATOR" })
    );
}

#[actix_rt::test]
async fn test_admin_on_superadmin_route_is_forbidden() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let admin = seed_admin(&state, "ops@shop.test", AdminRole::Admin).await;
    let token = admin_token(&state, &admin);

    let req = test::TestRequest::get()
        .uri("/api/v1/admins")
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 403);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": {
                "status": 403,
                "type": "unauthorized",
                "message": "not authorized to perform this action"
            }
        })
    );
}

#[actix_rt::test]
async fn test_superadmin_creates_lists_and_deletes() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let root = seed_admin(&state, "root@shop.test", AdminRole::Superadmin).await;
    let token = admin_token(&state, &root);

    let req = test::TestRequest::post()
        .uri("/api/v1/admins")
        .insert_header(bearer(&token))
        .set_json(json!({
            "username": "ops",
            "email": "ops@shop.test",
            "password": "s3cret-pass"
        }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 201, "create failed: {}", body);
    assert_eq!(body["data"]["role"], "ADMIN");
    assert!(body["data"].get("password").is_none());
    let created_id = body["data"]["id"].as_i64().expect("id");

    let req = test::TestRequest::get()
        .uri("/api/v1/admins")
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 2);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/admins/{}", created_id))
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["email"], "ops@shop.test");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admins/{}", created_id))
        .insert_header(bearer(&token));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/admins/{}", created_id))
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["message"], "admin not found");
}

#[actix_rt::test]
async fn test_create_admin_validation() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let root = seed_admin(&state, "root@shop.test", AdminRole::Superadmin).await;
    let token = admin_token(&state, &root);

    let req = test::TestRequest::post()
        .uri("/api/v1/admins")
        .insert_header(bearer(&token))
        .set_json(json!({
            "username": "ops",
            "email": "ops@shop.test",
            "password": "pw",
            "role": "DUMMY"
        }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        json!({
            "status": 400,
            "type": "invalidArgument",
            "message": "role type is not valid",
            "detail": [{
                "code": "invalidRole",
                "message": "role must be one of 'SUPERADMIN', 'ADMIN', and 'MODERATOR'"
            }]
        })
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/admins")
        .insert_header(bearer(&token))
        .set_json(json!({
            "username": "again",
            "email": "root@shop.test",
            "password": "pw"
        }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["type"], "alreadyExists");
    assert_eq!(body["error"]["message"], "email already exists");
}

#[actix_rt::test]
async fn test_self_update_advances_updated_at() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let admin = seed_admin(&state, "a@x.com", AdminRole::Moderator).await;
    assert!(admin.updated_at.is_none());
    let token = admin_token(&state, &admin);

    let req = test::TestRequest::put()
        .uri("/api/v1/admins")
        .insert_header(bearer(&token))
        .set_json(json!({ "username": "new" }));
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 200, "self update failed: {}", body);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "new");
    assert!(body["data"].get("email").is_none());
    let updated_at: chrono::DateTime<chrono::Utc> = body["data"]["updatedAt"]
        .as_str()
        .expect("updatedAt")
        .parse()
        .unwrap();
    assert!(updated_at >= admin.created_at);

    let req = test::TestRequest::get()
        .uri("/api/v1/admins/me")
        .insert_header(bearer(&token));
    let (_, body) = send(&app, req).await;
    assert_eq!(body["data"]["username"], "new");
}

#[actix_rt::test]
async fn test_superadmin_changes_role_and_it_applies_immediately() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let root = seed_admin(&state, "root@shop.test", AdminRole::Superadmin).await;
    let ops = seed_admin(&state, "ops@shop.test", AdminRole::Admin).await;
    let root_token = admin_token(&state, &root);
    let ops_token = admin_token(&state, &ops);

    let req = test::TestRequest::get()
        .uri("/api/v1/customers")
        .insert_header(bearer(&ops_token));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admins/{}", ops.id))
        .insert_header(bearer(&root_token))
        .set_json(json!({ "role": "MODERATOR" }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["role"], "MODERATOR");

    // Same token, role re-read from the store
    let req = test::TestRequest::get()
        .uri("/api/v1/customers")
        .insert_header(bearer(&ops_token));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 403);
}

#[actix_rt::test]
async fn test_superadmin_is_not_implicitly_admin() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let root = seed_admin(&state, "root@shop.test", AdminRole::Superadmin).await;
    let mod_ = seed_admin(&state, "mod@shop.test", AdminRole::Moderator).await;

    // Customer management admits SUPERADMIN and ADMIN, not MODERATOR
    let req = test::TestRequest::get()
        .uri("/api/v1/customers")
        .insert_header(bearer(&admin_token(&state, &root)));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);

    let req = test::TestRequest::get()
        .uri("/api/v1/customers")
        .insert_header(bearer(&admin_token(&state, &mod_)));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 403);
}

#[actix_rt::test]
async fn test_admin_change_password() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let admin = seed_admin(&state, "a@x.com", AdminRole::Admin).await;
    let token = admin_token(&state, &admin);

    let req = test::TestRequest::put()
        .uri("/api/v1/admins/change-password")
        .insert_header(bearer(&token))
        .set_json(json!({ "newPassword": "x" }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["detail"][0]["code"], "missingCurrentPassword");

    let req = test::TestRequest::put()
        .uri("/api/v1/admins/change-password")
        .insert_header(bearer(&token))
        .set_json(json!({ "currentPassword": TEST_PASSWORD, "newPassword": "rotated" }));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);

    let req = test::TestRequest::post()
        .uri("/api/v1/admins/login")
        .set_json(json!({ "email": "a@x.com", "password": "rotated" }));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);
}

#[actix_rt::test]
async fn test_empty_body_reports_missing_fields() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let root = seed_admin(&state, "root@shop.test", AdminRole::Superadmin).await;
    let token = admin_token(&state, &root);

    // No body and no Content-Type at all
    let req = test::TestRequest::post().uri("/api/v1/admins/login");
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        json!({
            "status": 400,
            "type": "invalidArgument",
            "message": "invalid one or more argument(s)",
            "detail": [
                { "code": "missingEmail", "message": "email field is missing" },
                { "code": "missingPassword", "message": "password field is missing" }
            ]
        })
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/admins")
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    let codes: Vec<&str> = body["error"]["detail"]
        .as_array()
        .expect("detail array")
        .iter()
        .map(|d| d["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["missingUsername", "missingEmail", "missingPassword"]);
}

#[actix_rt::test]
async fn test_update_missing_admin_with_taken_email_is_not_found() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let root = seed_admin(&state, "root@shop.test", AdminRole::Superadmin).await;
    let token = admin_token(&state, &root);

    let req = test::TestRequest::put()
        .uri("/api/v1/admins/999")
        .insert_header(bearer(&token))
        .set_json(json!({ "email": "root@shop.test" }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["type"], "notFound");
    assert_eq!(body["error"]["message"], "admin not found");
}
