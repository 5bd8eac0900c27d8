mod common;

use axum::http::StatusCode;
use bookflow::bookflow_auth::verify_token;
use common::{
    body_json, empty_request, json_request, send, setup_test_app, test_jwt_config, unique_username,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_success(pool: PgPool) {
    let app = setup_test_app(pool);
    let username = unique_username();
    let body = json!({
        "username": format!("  {username} "),
        "email": format!("{username}@example.com"),
        "password": "hunter22"
    });

    let response = send(&app, json_request("POST", "/api/v1/signup", &body, None)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User successfully created");
    assert_eq!(body["result"]["username"], username.as_str());
    assert!(body["result"].get("password").is_none());
    assert!(body["result"]["id"].is_string());
}

async fn count_users(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_duplicate(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let username = unique_username();
    let body = json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "hunter22"
    });

    let first = send(&app, json_request("POST", "/api/v1/signup", &body, None)).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(count_users(&pool).await, 1);

    let second = send(&app, json_request("POST", "/api/v1/signup", &body, None)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await, json!({ "message": "User already exists" }));
    assert_eq!(count_users(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_duplicate_email_only(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let username = unique_username();
    let email = format!("{username}@example.com");
    let first = json!({ "username": username, "email": email, "password": "hunter22" });
    let response = send(&app, json_request("POST", "/api/v1/signup", &first, None)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let second = json!({ "username": unique_username(), "email": email, "password": "hunter22" });
    let response = send(&app, json_request("POST", "/api/v1/signup", &second, None)).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["message"], "User already exists");
    assert_eq!(count_users(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signin_success(pool: PgPool) {
    let app = setup_test_app(pool);
    let username = unique_username();
    let email = format!("{username}@example.com");
    let signup = json!({ "username": username, "email": email, "password": "hunter22" });
    send(&app, json_request("POST", "/api/v1/signup", &signup, None)).await;

    let signin = json!({ "username": username, "password": "hunter22" });
    let response = send(&app, json_request("POST", "/api/v1/signin", &signin, None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"], json!({ "username": username, "email": email }));

    let claims = verify_token(body["token"].as_str().unwrap(), &test_jwt_config()).unwrap();
    assert_eq!(claims.username, username);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signin_wrong_password_and_unknown_user(pool: PgPool) {
    let app = setup_test_app(pool);
    let username = unique_username();
    let signup = json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "hunter22"
    });
    send(&app, json_request("POST", "/api/v1/signup", &signup, None)).await;

    let wrong = json!({ "username": username, "password": "hunter23" });
    let response = send(&app, json_request("POST", "/api/v1/signin", &wrong, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let wrong_body = body_json(response).await;

    let unknown = json!({ "username": "nobody", "password": "hunter22" });
    let response = send(&app, json_request("POST", "/api/v1/signin", &unknown, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(wrong_body, body_json(response).await);
    assert_eq!(wrong_body["message"], "Invalid username or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_new_reader_starts_with_empty_shelf(pool: PgPool) {
    let app = setup_test_app(pool);
    let signup = json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "wonderland"
    });
    let response = send(&app, json_request("POST", "/api/v1/signup", &signup, None)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let wrong = json!({ "username": "alice", "password": "looking-glass" });
    let response = send(&app, json_request("POST", "/api/v1/signin", &wrong, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let signin = json!({ "username": "alice", "password": "wonderland" });
    let response = send(&app, json_request("POST", "/api/v1/signin", &signin, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"].as_str().unwrap().to_string();

    let response = send(&app, empty_request("GET", "/api/user-books", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_and_delete_users(pool: PgPool) {
    let app = setup_test_app(pool);
    let username = unique_username();
    let signup = json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "hunter22"
    });
    let response = send(&app, json_request("POST", "/api/v1/signup", &signup, None)).await;
    let created = body_json(response).await;
    let id = created["result"]["id"].as_str().unwrap().to_string();

    let users = body_json(send(&app, empty_request("GET", "/api/users", None)).await).await;
    assert!(users.as_array().unwrap().iter().any(|u| u["id"] == id.as_str()));
    assert!(users[0].get("password").is_none());

    let uri = format!("/api/users/{id}");
    let response = send(&app, empty_request("DELETE", &uri, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = body_json(response).await;
    assert_eq!(deleted["message"], "User successfully deleted");
    assert_eq!(deleted["deletedUser"]["id"], id.as_str());
    assert_eq!(deleted["deletedUser"]["username"], username.as_str());
    assert!(deleted["deletedUser"].get("password").is_none());

    let response = send(&app, empty_request("DELETE", &uri, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "User not found");
}
