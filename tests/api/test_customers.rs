//! Back-office customer management.

use actix_web::test;
use storefront_lib::models::AdminRole;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_admin_lists_gets_and_deletes_customers() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let admin = seed_admin(&state, "ops@shop.test", AdminRole::Admin).await;
    let token = admin_token(&state, &admin);
    let jane = seed_customer(&state, "jane@shop.test").await;
    seed_customer(&state, "john@shop.test").await;

    let req = test::TestRequest::get()
        .uri("/api/v1/customers")
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["email"], "jane@shop.test");
    assert!(body["data"][0].get("passwordHash").is_none());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/customers/{}", jane.id))
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["fullname"], "Jane Doe");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/customers/{}", jane.id))
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 204);
    assert!(body.is_null());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/customers/{}", jane.id))
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["type"], "notFound");
    assert_eq!(body["error"]["message"], "customer not found");
}

#[actix_rt::test]
async fn test_moderator_cannot_manage_customers() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let moderator = seed_admin(&state, "mod@shop.test", AdminRole::Moderator).await;
    let token = admin_token(&state, &moderator);
    let jane = seed_customer(&state, "jane@shop.test").await;

    let requests = [
        test::TestRequest::get().uri("/api/v1/customers"),
        test::TestRequest::get().uri(&format!("/api/v1/customers/{}", jane.id)),
        test::TestRequest::delete().uri(&format!("/api/v1/customers/{}", jane.id)),
    ];
    for req in requests {
        let (status, body) = send(&app, req.insert_header(bearer(&token))).await;
        assert_eq!(status, 403);
        assert_eq!(body["error"]["type"], "unauthorized");
        assert_eq!(body["error"]["message"], "not authorized to perform this action");
    }

    // Nothing was deleted
    let admin = seed_admin(&state, "ops@shop.test", AdminRole::Admin).await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/customers/{}", jane.id))
        .insert_header(bearer(&admin_token(&state, &admin)));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);
}

#[actix_rt::test]
async fn test_customer_token_cannot_manage_customers() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    // Admin 1 and customer 1 share a numeric id
    seed_admin(&state, "root@shop.test", AdminRole::Superadmin).await;
    let customer = seed_customer(&state, "jane@shop.test").await;
    let token = customer_token(&state, &customer);

    let req = test::TestRequest::get()
        .uri("/api/v1/customers")
        .insert_header(bearer(&token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"]["message"], "authentication required");
}

#[actix_rt::test]
async fn test_deleted_customer_token_stops_working() {
    let state = create_test_state();
    let app = create_test_app(&state).await;
    let admin = seed_admin(&state, "ops@shop.test", AdminRole::Admin).await;
    let customer = seed_customer(&state, "jane@shop.test").await;
    let customer_token = customer_token(&state, &customer);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&customer_token));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/customers/{}", customer.id))
        .insert_header(bearer(&admin_token(&state, &admin)));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 204);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&customer_token));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"]["type"], "unauthenticated");
}
