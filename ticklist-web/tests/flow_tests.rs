/// End-to-end tests for the registration, login and task flows
///
/// These drive the full router through tower's `oneshot`, with real
/// password hashing, session cookies, and a live PostgreSQL store.
mod common;

use axum::http::{header, StatusCode};
use common::{body_string, session_cookie, TestContext};
use ticklist_shared::models::{task::Task, user::User};

#[tokio::test]
async fn test_register_login_task_lifecycle() {
    let ctx = TestContext::new().await.expect("test context");
    let email = TestContext::unique_email("lifecycle");

    // Register lands on /login with a flash message
    let body = format!(
        "username=alice&email={}&password=correct-horse",
        common::urlencode(&email)
    );
    let response = ctx.post_form("/register", &body, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login"
    );

    // The flash cookie is consumed by the next GET /login
    let flash = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("ticklist_flash="))
        .map(|v| v.split(';').next().unwrap().to_string())
        .expect("register should flash a message");
    let response = ctx.get("/login", Some(&flash)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("Account created"));

    // Wrong password is a 401 with the generic message
    let body = format!(
        "email={}&password=wrong-horse",
        common::urlencode(&email)
    );
    let response = ctx.post_form("/login", &body, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let page = body_string(response).await;
    assert!(page.contains("Invalid email or password."));

    // Correct password sets the session cookie and redirects home
    let body = format!(
        "email={}&password=correct-horse",
        common::urlencode(&email)
    );
    let response = ctx.post_form("/login", &body, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    let session = session_cookie(&response).expect("session cookie");

    // Empty list to start
    let response = ctx.get("/", Some(&session)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("No tasks yet"));

    // Create a task; it shows up incomplete
    let response = ctx
        .post_form(
            "/add",
            "title=buy+milk&description=two+litres",
            Some(&session),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = ctx.get("/", Some(&session)).await;
    let page = body_string(response).await;
    assert!(page.contains("buy milk"));
    assert!(page.contains("[ ]"));

    // Look the task up through the store to drive the edit and delete URLs
    let user = User::find_by_email(&ctx.db, &email)
        .await
        .expect("query")
        .expect("user exists");
    let tasks = Task::list_by_owner(&ctx.db, user.id).await.expect("query");
    assert_eq!(tasks.len(), 1);
    let task_id = tasks[0].id;

    // The edit form comes back pre-filled
    let response = ctx
        .get(&format!("/edit/{}", task_id), Some(&session))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("buy milk"));
    assert!(page.contains("two litres"));

    // Mark it complete
    let response = ctx
        .post_form(
            &format!("/edit/{}", task_id),
            "title=buy+milk&description=two+litres&completed=on",
            Some(&session),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = ctx.get("/", Some(&session)).await;
    let page = body_string(response).await;
    assert!(page.contains("[x]"));

    // Delete it; the list is empty again and a second delete is harmless
    let response = ctx
        .get(&format!("/delete/{}", task_id), Some(&session))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = ctx
        .get(&format!("/delete/{}", task_id), Some(&session))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = ctx.get("/", Some(&session)).await;
    let page = body_string(response).await;
    assert!(page.contains("No tasks yet"));
}

#[tokio::test]
async fn test_users_cannot_touch_each_others_tasks() {
    let ctx = TestContext::new().await.expect("test context");

    let alice_email = TestContext::unique_email("alice");
    let bob_email = TestContext::unique_email("bob");
    let alice = ctx.login_user(&alice_email, "alice-secret").await;
    let bob = ctx.login_user(&bob_email, "bob-secret").await;

    // Alice creates a task
    let response = ctx
        .post_form("/add", "title=private&description=", Some(&alice))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let alice_user = User::find_by_email(&ctx.db, &alice_email)
        .await
        .expect("query")
        .expect("user exists");
    let task_id = Task::list_by_owner(&ctx.db, alice_user.id)
        .await
        .expect("query")[0]
        .id;

    // Bob's list does not contain it
    let response = ctx.get("/", Some(&bob)).await;
    let page = body_string(response).await;
    assert!(!page.contains("private"));

    // Bob cannot open the edit form
    let response = ctx.get(&format!("/edit/{}", task_id), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Bob's edit POST is swallowed without touching the task
    let response = ctx
        .post_form(
            &format!("/edit/{}", task_id),
            "title=hijacked&description=&completed=on",
            Some(&bob),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // As is his delete
    let response = ctx.get(&format!("/delete/{}", task_id), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let task = Task::find_by_id_and_owner(&ctx.db, task_id, alice_user.id)
        .await
        .expect("query")
        .expect("task still exists");
    assert_eq!(task.title, "private");
    assert!(!task.completed);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let ctx = TestContext::new().await.expect("test context");
    let email = TestContext::unique_email("dup");

    let body = format!(
        "username=first&email={}&password=pw",
        common::urlencode(&email)
    );
    let response = ctx.post_form("/register", &body, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = format!(
        "username=second&email={}&password=pw",
        common::urlencode(&email)
    );
    let response = ctx.post_form("/register", &body, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let page = body_string(response).await;
    assert!(page.contains("already registered"));
}

#[tokio::test]
async fn test_register_rejects_incomplete_forms() {
    let ctx = TestContext::new().await.expect("test context");

    let response = ctx.post_form("/register", "", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx
        .post_form("/register", "username=alice&password=pw", None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_missing_field_is_bad_request() {
    let ctx = TestContext::new().await.expect("test context");

    let response = ctx.post_form("/login", "email=a@example.com", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_email_gets_the_same_message_as_bad_password() {
    let ctx = TestContext::new().await.expect("test context");

    let response = ctx
        .post_form(
            "/login",
            "email=nobody@example.com&password=whatever",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let page = body_string(response).await;
    assert!(page.contains("Invalid email or password."));
}

#[tokio::test]
async fn test_protected_routes_redirect_anonymous_callers() {
    let ctx = TestContext::new().await.expect("test context");

    for uri in ["/", "/add", "/logout"] {
        let response = ctx.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "uri {}", uri);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login",
            "uri {}",
            uri
        );
    }
}

#[tokio::test]
async fn test_garbage_session_cookie_is_cleared_and_redirected() {
    let ctx = TestContext::new().await.expect("test context");

    let response = ctx
        .get("/", Some("ticklist_session=not-a-real-token"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");

    // The bogus cookie gets expired on the way out
    let cleared = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("ticklist_session="));
    assert!(cleared);
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let ctx = TestContext::new().await.expect("test context");
    let email = TestContext::unique_email("logout");
    let session = ctx.login_user(&email, "pw").await;

    let response = ctx.get("/logout", Some(&session)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn test_health_endpoint_is_public() {
    let ctx = TestContext::new().await.expect("test context");

    let response = ctx.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("healthy"));
}
