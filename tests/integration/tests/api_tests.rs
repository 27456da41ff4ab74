//! API Integration Tests
//!
//! Each test spawns the full Axum application (routes, middleware, error
//! envelope) over in-memory repositories and talks to it over HTTP.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_envelope, assert_ok, assert_status, create_named_room, create_room, join_room,
    string_field, LoginRequest, RegisterRequest, TestServer, TestUser, TEST_PASSWORD,
};
use reqwest::StatusCode;
use serde_json::json;
use trpg_common::{Claims, Environment};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready_without_database() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health/ready").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_returns_envelope() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/does-not-exist").await.unwrap();
    let envelope = assert_envelope(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(envelope["message"], "Route not found");
    assert!(envelope["data"].is_null());
}

#[tokio::test]
async fn test_production_app_serves_requests() {
    let mut config = integration_tests::test_config().unwrap();
    config.app.env = Environment::Production;
    let server = TestServer::start_with_config(config).await.unwrap();

    let response = server.get("/health").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = server.get("/api/v1/does-not-exist").await.unwrap();
    assert_envelope(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/rooms").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique("Alice");

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();

    assert_eq!(envelope["message"], "User registered successfully");
    assert_eq!(envelope["data"]["email"], request.email.as_str());
    assert_eq!(envelope["data"]["nickname"], "Alice");
    assert!(envelope["data"]["user_id"].is_string());
    assert!(envelope["data"].get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique("Alice");

    assert_ok(server.post("/api/v1/auth/register", &request).await.unwrap())
        .await
        .unwrap();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let envelope = assert_envelope(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(envelope["message"], "Email already registered");
}

#[tokio::test]
async fn test_register_duplicate_email_is_case_insensitive() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique("Alice");
    assert_ok(server.post("/api/v1/auth/register", &request).await.unwrap())
        .await
        .unwrap();

    let shouting = RegisterRequest {
        email: request.email.to_uppercase(),
        ..request.clone()
    };
    let response = server.post("/api/v1/auth/register", &shouting).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_validation_errors() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/register",
            &json!({ "email": "not-an-email", "password": "secret123", "nickname": "Bob" }),
        )
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope["message"], "Validation failed");
    assert!(envelope["data"].get("email").is_some());

    let response = server
        .post(
            "/api/v1/auth/register",
            &json!({ "email": "bob@example.com", "password": "abc", "nickname": "Bob" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .client
        .post(format!("{}/api/v1/auth/register", server.base_url()))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    let server = TestServer::start().await.unwrap();
    let register = RegisterRequest::unique("Alice");

    let registered = assert_ok(server.post("/api/v1/auth/register", &register).await.unwrap())
        .await
        .unwrap();

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_register(&register))
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();

    assert_eq!(envelope["message"], "Login successful");
    let data = &envelope["data"];
    assert_eq!(data["user_id"], registered["user_id"]);
    assert_eq!(data["email"], register.email.as_str());
    assert_eq!(data["nickname"], "Alice");
    assert_eq!(data["token_type"], "Bearer");
    assert!(!string_field(data, "token").unwrap().is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();

    let wrong_password = LoginRequest {
        email: alice.email.clone(),
        password: "wrongpass".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &wrong_password).await.unwrap();
    let envelope = assert_envelope(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let unknown = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "wrongpass".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &unknown).await.unwrap();
    let other = assert_envelope(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Same message whether or not the account exists
    assert_eq!(envelope["message"], other["message"]);
}

#[tokio::test]
async fn test_missing_and_invalid_tokens() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/user/profile").await.unwrap();
    let envelope = assert_envelope(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(envelope["message"], "Authorization header required");

    let response = server
        .get_auth("/api/v1/user/profile", "not.a.jwt")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .client
        .get(format!("{}/api/v1/user/profile", server.base_url()))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: alice.user_id.clone(),
        email: alice.email.clone(),
        iat: now - 7200,
        exp: now - 3600,
        jti: "expired".to_string(),
    };
    let token = server.jwt_service().encode_claims(&claims).unwrap();

    let response = server.get_auth("/api/v1/user/profile", &token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_get_and_update() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();

    let profile = assert_ok(
        server
            .get_auth("/api/v1/user/profile", &alice.token)
            .await
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(profile["user_id"], alice.user_id.as_str());
    assert_eq!(profile["nickname"], "Alice");
    assert!(profile["avatar"].is_null());

    let response = server
        .put_auth(
            "/api/v1/user/profile",
            &alice.token,
            &json!({ "nickname": "", "avatar": "https://img.example.com/a.png" }),
        )
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "Profile updated successfully");
    // Empty nickname is ignored
    assert_eq!(envelope["data"]["nickname"], "Alice");
    assert_eq!(envelope["data"]["avatar"], "https://img.example.com/a.png");
}

#[tokio::test]
async fn test_password_change() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();

    let response = server
        .put_auth(
            "/api/v1/user/password",
            &alice.token,
            &json!({ "old_password": "not-my-password", "new_password": "newsecret" }),
        )
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope["message"], "Old password is incorrect");

    let response = server
        .put_auth(
            "/api/v1/user/password",
            &alice.token,
            &json!({ "old_password": TEST_PASSWORD, "new_password": "abc" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .put_auth(
            "/api/v1/user/password",
            &alice.token,
            &json!({ "old_password": TEST_PASSWORD, "new_password": "newsecret" }),
        )
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "Password updated successfully");

    let old_login = LoginRequest {
        email: alice.email.clone(),
        password: TEST_PASSWORD.to_string(),
    };
    let response = server.post("/api/v1/auth/login", &old_login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let new_login = LoginRequest {
        email: alice.email.clone(),
        password: "newsecret".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &new_login).await.unwrap();
    assert_ok(response).await.unwrap();
}

// ============================================================================
// Room Scenarios
// ============================================================================

#[tokio::test]
async fn test_room_lifecycle_scenario() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let bob = TestUser::create(&server, "Bob").await.unwrap();

    let response = server
        .post_auth("/api/v1/rooms", &alice.token, &json!({ "name": "Game" }))
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "Room created successfully");

    let room = &envelope["data"];
    assert_eq!(room["dm_id"], alice.user_id.as_str());
    assert_eq!(room["max_players"], 10);
    assert_eq!(room["is_public"], false);
    assert_eq!(room["has_password"], false);
    let code = string_field(room, "invite_code").unwrap();
    assert_eq!(code.len(), 8);
    assert!(code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

    let room_id = string_field(room, "id").unwrap();

    let membership = join_room(&server, &bob, &room_id).await.unwrap();
    assert_eq!(membership["role"], "player");
    assert_eq!(membership["user_id"], bob.user_id.as_str());

    let response = server
        .post_auth_empty(&format!("/api/v1/rooms/{room_id}/leave"), &bob.token)
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "Left room successfully");

    let response = server
        .post_auth_empty(&format!("/api/v1/rooms/{room_id}/leave"), &alice.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_single_seat_room_is_full() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let bob = TestUser::create(&server, "Bob").await.unwrap();

    let room = create_room(&server, &alice, json!({ "name": "Solo", "max_players": 1 }))
        .await
        .unwrap();
    let room_id = string_field(&room, "id").unwrap();

    let response = server
        .post_auth_empty(&format!("/api/v1/rooms/{room_id}/join"), &bob.token)
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(envelope["message"], "Room is full");
}

#[tokio::test]
async fn test_capacity_counts_the_dm() {
    let server = TestServer::start().await.unwrap();
    let dm = TestUser::create(&server, "Dm").await.unwrap();
    let room = create_room(&server, &dm, json!({ "name": "Trio", "max_players": 3 }))
        .await
        .unwrap();
    let room_id = string_field(&room, "id").unwrap();

    let mut players = Vec::new();
    for nickname in ["P1", "P2"] {
        let player = TestUser::create(&server, nickname).await.unwrap();
        join_room(&server, &player, &room_id).await.unwrap();
        players.push(player);
    }

    let late = TestUser::create(&server, "Late").await.unwrap();
    let response = server
        .post_auth_empty(&format!("/api/v1/rooms/{room_id}/join"), &late.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // capacity is reported before membership
    let response = server
        .post_auth_empty(&format!("/api/v1/rooms/{room_id}/join"), &players[0].token)
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(envelope["message"], "Room is full");

    let members = assert_ok(
        server
            .get(&format!("/api/v1/rooms/{room_id}/members"))
            .await
            .unwrap(),
    )
    .await
    .unwrap();
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 3);
    assert_eq!(members[0]["role"], "dm");
    assert_eq!(members[0]["nickname"], "Dm");
}

#[tokio::test]
async fn test_join_twice_and_leave_when_not_member() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let bob = TestUser::create(&server, "Bob").await.unwrap();
    let room_id = string_field(&create_named_room(&server, &alice, "Game").await.unwrap(), "id")
        .unwrap();

    let response = server
        .post_auth_empty(&format!("/api/v1/rooms/{room_id}/leave"), &bob.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    join_room(&server, &bob, &room_id).await.unwrap();
    let response = server
        .post_auth_empty(&format!("/api/v1/rooms/{room_id}/join"), &bob.token)
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(envelope["message"], "Already in room");
}

#[tokio::test]
async fn test_room_not_found_and_bad_id() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();

    let response = server.get("/api/v1/rooms/123456789").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get("/api/v1/rooms/not-a-number").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post_auth_empty("/api/v1/rooms/123456789/join", &alice.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_public_listing_and_invite_code_visibility() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let bob = TestUser::create(&server, "Bob").await.unwrap();

    let public = create_room(&server, &alice, json!({ "name": "Open", "is_public": true }))
        .await
        .unwrap();
    create_named_room(&server, &alice, "Hidden").await.unwrap();
    let public_id = string_field(&public, "id").unwrap();

    let rooms = assert_ok(server.get("/api/v1/rooms").await.unwrap())
        .await
        .unwrap();
    let rooms = rooms.as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["name"], "Open");
    assert!(rooms[0].get("invite_code").is_none());

    // Anonymous and non-member viewers do not see the code
    let anonymous = assert_ok(server.get(&format!("/api/v1/rooms/{public_id}")).await.unwrap())
        .await
        .unwrap();
    assert!(anonymous.get("invite_code").is_none());

    let outsider = assert_ok(
        server
            .get_auth(&format!("/api/v1/rooms/{public_id}"), &bob.token)
            .await
            .unwrap(),
    )
    .await
    .unwrap();
    assert!(outsider.get("invite_code").is_none());

    let member = assert_ok(
        server
            .get_auth(&format!("/api/v1/rooms/{public_id}"), &alice.token)
            .await
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(member["invite_code"], public["invite_code"]);
}

#[tokio::test]
async fn test_password_room_and_invite_code_join() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let bob = TestUser::create(&server, "Bob").await.unwrap();
    let carol = TestUser::create(&server, "Carol").await.unwrap();

    let room = create_room(&server, &alice, json!({ "name": "Locked", "password": "hunter2" }))
        .await
        .unwrap();
    assert_eq!(room["has_password"], true);
    assert!(room.get("password").is_none());
    let room_id = string_field(&room, "id").unwrap();
    let code = string_field(&room, "invite_code").unwrap();

    // Joining by id does not ask for the room password
    let response = server
        .post_auth_empty(&format!("/api/v1/rooms/{room_id}/join"), &bob.token)
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "Joined room successfully");
    assert_eq!(envelope["data"]["role"], "player");

    // Invite codes are case-insensitive
    let response = server
        .post_auth_empty(
            &format!("/api/v1/rooms/join/{}", code.to_lowercase()),
            &carol.token,
        )
        .await
        .unwrap();
    let membership = assert_ok(response).await.unwrap();
    assert_eq!(membership["room_id"], room_id.as_str());

    let response = server
        .post_auth_empty("/api/v1/rooms/join/ZZZZZZZZ", &carol.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_only_dm_can_manage_room() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let bob = TestUser::create(&server, "Bob").await.unwrap();
    let carol = TestUser::create(&server, "Carol").await.unwrap();
    let room_id = string_field(&create_named_room(&server, &alice, "Game").await.unwrap(), "id")
        .unwrap();
    join_room(&server, &bob, &room_id).await.unwrap();
    join_room(&server, &carol, &room_id).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/rooms/{room_id}"), &bob.token)
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(envelope["message"], "Only the DM can perform this action");

    let response = server
        .put_auth_empty(
            &format!("/api/v1/rooms/{room_id}/members/{}/kick", carol.user_id),
            &bob.token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(
            &format!("/api/v1/rooms/{room_id}/transfer-dm"),
            &bob.token,
            &json!({ "user_id": bob.user_id }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_kick_member() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let bob = TestUser::create(&server, "Bob").await.unwrap();
    let carol = TestUser::create(&server, "Carol").await.unwrap();
    let room_id = string_field(&create_named_room(&server, &alice, "Game").await.unwrap(), "id")
        .unwrap();
    join_room(&server, &bob, &room_id).await.unwrap();

    let kick = |target: &str| format!("/api/v1/rooms/{room_id}/members/{target}/kick");

    let response = server
        .put_auth_empty(&kick(&alice.user_id), &alice.token)
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope["message"], "Cannot kick the DM");

    let response = server
        .put_auth_empty(&kick(&carol.user_id), &alice.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .put_auth_empty(&kick(&bob.user_id), &alice.token)
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "Member kicked successfully");

    let members = assert_ok(
        server
            .get(&format!("/api/v1/rooms/{room_id}/members"))
            .await
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(members.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_transfer_dm() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let bob = TestUser::create(&server, "Bob").await.unwrap();
    let carol = TestUser::create(&server, "Carol").await.unwrap();
    let room_id = string_field(&create_named_room(&server, &alice, "Game").await.unwrap(), "id")
        .unwrap();
    join_room(&server, &bob, &room_id).await.unwrap();
    let transfer = format!("/api/v1/rooms/{room_id}/transfer-dm");

    let response = server
        .put_auth(&transfer, &alice.token, &json!({ "user_id": alice.user_id }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .put_auth(&transfer, &alice.token, &json!({ "user_id": carol.user_id }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .put_auth(&transfer, &alice.token, &json!({ "user_id": bob.user_id }))
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "DM transferred successfully");

    let room = assert_ok(server.get(&format!("/api/v1/rooms/{room_id}")).await.unwrap())
        .await
        .unwrap();
    assert_eq!(room["dm_id"], bob.user_id.as_str());

    let members = assert_ok(
        server
            .get(&format!("/api/v1/rooms/{room_id}/members"))
            .await
            .unwrap(),
    )
    .await
    .unwrap();
    let members = members.as_array().unwrap();
    assert_eq!(members[0]["user_id"], bob.user_id.as_str());
    assert_eq!(members[0]["role"], "dm");
    assert_eq!(members[1]["role"], "player");

    // The former DM is now an ordinary player and may leave
    let response = server
        .post_auth_empty(&format!("/api/v1/rooms/{room_id}/leave"), &alice.token)
        .await
        .unwrap();
    assert_ok(response).await.unwrap();
}

#[tokio::test]
async fn test_delete_room_cascades() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let room_id = string_field(&create_named_room(&server, &alice, "Game").await.unwrap(), "id")
        .unwrap();

    let character = assert_ok(
        server
            .post_auth(
                &format!("/api/v1/rooms/{room_id}/characters"),
                &alice.token,
                &json!({ "name": "Npc" }),
            )
            .await
            .unwrap(),
    )
    .await
    .unwrap();
    let character_id = string_field(&character, "id").unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/rooms/{room_id}"), &alice.token)
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "Room deleted successfully");

    let response = server.get(&format!("/api/v1/rooms/{room_id}")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/rooms/{room_id}/characters/{character_id}"),
            &alice.token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(server.store.character_count(), 0);
}

// ============================================================================
// Character Sheet Tests
// ============================================================================

#[tokio::test]
async fn test_character_create_and_get_with_defaults() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let room_id = string_field(&create_named_room(&server, &alice, "Game").await.unwrap(), "id")
        .unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/rooms/{room_id}/characters"),
            &alice.token,
            &json!({
                "name": "Thorin",
                "race": "Dwarf",
                "class": "Fighter",
                "strength": 16,
                "equipment": ["axe", "shield"]
            }),
        )
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "Character created successfully");
    let character_id = string_field(&envelope["data"], "id").unwrap();

    let sheet = assert_ok(
        server
            .get_auth(
                &format!("/api/v1/rooms/{room_id}/characters/{character_id}"),
                &alice.token,
            )
            .await
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(sheet["name"], "Thorin");
    assert_eq!(sheet["race"], "Dwarf");
    assert_eq!(sheet["strength"], 16);
    assert_eq!(sheet["dexterity"], 10);
    assert_eq!(sheet["level"], 1);
    assert_eq!(sheet["armor_class"], 10);
    assert_eq!(sheet["hit_points"], 10);
    assert_eq!(sheet["speed"], 30);
    assert_eq!(sheet["proficiency_bonus"], 2);
    assert_eq!(sheet["equipment"], json!(["axe", "shield"]));
    assert_eq!(sheet["user_id"], alice.user_id.as_str());
    assert_eq!(sheet["room_id"], room_id.as_str());

    let list = assert_ok(
        server
            .get_auth(&format!("/api/v1/rooms/{room_id}/characters"), &alice.token)
            .await
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_character_requires_membership_and_valid_values() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let bob = TestUser::create(&server, "Bob").await.unwrap();
    let room_id = string_field(&create_named_room(&server, &alice, "Game").await.unwrap(), "id")
        .unwrap();
    let path = format!("/api/v1/rooms/{room_id}/characters");

    let response = server
        .post_auth(&path, &bob.token, &json!({ "name": "Intruder" }))
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(envelope["message"], "You are not a member of this room");

    // membership is checked before the body
    let response = server
        .post_auth(&path, &bob.token, &json!({ "name": "" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth(&path, &alice.token, &json!({ "name": "Thorin", "level": 21 }))
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(envelope["data"].get("level").is_some());

    let response = server
        .post_auth(&path, &alice.token, &json!({ "race": "Elf" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/rooms/999/characters",
            &alice.token,
            &json!({ "name": "" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_only_owner_can_modify_character() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let bob = TestUser::create(&server, "Bob").await.unwrap();
    let room_id = string_field(&create_named_room(&server, &alice, "Game").await.unwrap(), "id")
        .unwrap();
    join_room(&server, &bob, &room_id).await.unwrap();

    let character = assert_ok(
        server
            .post_auth(
                &format!("/api/v1/rooms/{room_id}/characters"),
                &bob.token,
                &json!({ "name": "Legolas", "class": "Ranger", "dexterity": 18, "level": 5 }),
            )
            .await
            .unwrap(),
    )
    .await
    .unwrap();
    let path = format!(
        "/api/v1/rooms/{room_id}/characters/{}",
        string_field(&character, "id").unwrap()
    );

    // Not even the DM may edit another player's sheet
    let response = server
        .put_auth(&path, &alice.token, &json!({ "name": "Hijacked" }))
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(
        envelope["message"],
        "Only the character owner can modify this character"
    );

    let response = server.delete_auth(&path, &alice.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Full replace: omitted fields fall back to defaults
    let response = server
        .put_auth(&path, &bob.token, &json!({ "name": "Legolas", "level": 6 }))
        .await
        .unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "Character updated successfully");
    assert_eq!(envelope["data"]["level"], 6);
    assert_eq!(envelope["data"]["class"], "");
    assert_eq!(envelope["data"]["dexterity"], 10);

    let response = server.delete_auth(&path, &bob.token).await.unwrap();
    let envelope = assert_envelope(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "Character deleted successfully");

    let response = server.get_auth(&path, &bob.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_character_in_other_room_is_not_found() {
    let server = TestServer::start().await.unwrap();
    let alice = TestUser::create(&server, "Alice").await.unwrap();
    let first = string_field(&create_named_room(&server, &alice, "One").await.unwrap(), "id")
        .unwrap();
    let second = string_field(&create_named_room(&server, &alice, "Two").await.unwrap(), "id")
        .unwrap();

    let character = assert_ok(
        server
            .post_auth(
                &format!("/api/v1/rooms/{first}/characters"),
                &alice.token,
                &json!({ "name": "Thorin" }),
            )
            .await
            .unwrap(),
    )
    .await
    .unwrap();
    let character_id = string_field(&character, "id").unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/rooms/{second}/characters/{character_id}"),
            &alice.token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/rooms/{first}/characters/abc"),
            &alice.token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
