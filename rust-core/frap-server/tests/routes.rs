//! End-to-end behaviour of the demo site through the server adapter.

use frap_core::{LoggingMiddleware, Method, MessageBoard, Orm, Request, Server, Templates};
use frap_server::site::{self, FEEDBACK_TABLE};
use frap_server::Site;
use std::sync::Arc;

fn server_with(board: MessageBoard) -> Server {
    let app = Site::new(board, Arc::new(Templates::new().unwrap()))
        .build()
        .unwrap();
    let mut server = Server::new(app);
    server.add_middleware(LoggingMiddleware);
    server
}

fn server() -> Server {
    server_with(MessageBoard::new())
}

#[test]
fn index_renders_welcome_page() {
    let resp = server().test_request(&Request::new(Method::Get, "/"));
    assert_eq!(resp.status, 200);
    assert!(resp.content_type.starts_with("text/html"));
    assert!(resp.body.contains("Welcome to the site hosted on Frap server"));
}

#[test]
fn unknown_path_is_404() {
    let resp = server().test_request(&Request::new(Method::Get, "/nope"));
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body, "Not Found");
}

#[test]
fn wrong_method_is_404() {
    let resp = server().test_request(&Request::new(Method::Get, "/submit"));
    assert_eq!(resp.status, 404);
}

#[test]
fn login_with_valid_credentials_redirects() {
    let req = Request::new(Method::Post, "/login").with_form([("username", "monika"), ("pw", "moni")]);
    let resp = server().test_request(&req);
    assert_eq!(resp.status, 303);
    assert_eq!(resp.header("Location"), Some("/message"));
    assert!(resp.body.is_empty());
}

#[test]
fn login_with_invalid_credentials_shows_form() {
    let req = Request::new(Method::Post, "/login").with_form([("username", "x"), ("pw", "y")]);
    let resp = server().test_request(&req);
    assert_eq!(resp.status, 200);
    assert!(resp.body.contains("Login Page"));
    assert!(resp.body.contains(r#"name="pw""#));
    assert!(resp.body.contains(r#"<p class="error">Invalid username or password</p>"#));
}

#[test]
fn login_get_shows_navigation() {
    let resp = server().test_request(&Request::new(Method::Get, "/login"));
    assert_eq!(resp.status, 200);
    assert!(resp.body.contains(r#"<div class="navbar""#));
    assert!(resp.body.contains(r#"<div class="sidebar""#));
    assert!(!resp.body.contains("Invalid username or password"));
}

#[test]
fn posted_messages_appear_on_board() {
    let board = MessageBoard::new();
    let server = server_with(board.clone());

    let post = Request::new(Method::Post, "/message").with_form([("message", "hello")]);
    let resp = server.test_request(&post);
    assert_eq!(resp.status, 303);
    assert_eq!(resp.header("Location"), Some("/message"));
    assert_eq!(board.messages(), vec!["hello".to_string()]);

    let resp = server.test_request(&Request::new(Method::Get, "/message"));
    assert_eq!(resp.status, 200);
    assert!(resp.body.contains("Message Board"));
    assert!(resp.body.contains("<li>hello</li>"));
}

#[test]
fn message_body_is_url_decoded() {
    let board = MessageBoard::new();
    let server = server_with(board.clone());
    let post = Request::new(Method::Post, "/message")
        .with_header("content-type", "application/x-www-form-urlencoded")
        .with_body("message=good+morning%21");
    server.test_request(&post);
    assert_eq!(board.messages(), vec!["good morning!".to_string()]);
}

#[test]
fn slider_value_is_echoed() {
    let req = Request::new(Method::Post, "/submit").with_form([("Slider", "75")]);
    let resp = server().test_request(&req);
    assert_eq!(resp.status, 200);
    assert!(resp.content_type.starts_with("text/plain"));
    assert_eq!(resp.body, "Slider Value: 75");
}

#[test]
fn missing_slider_value_reads_empty() {
    let resp = server().test_request(&Request::new(Method::Post, "/submit"));
    assert_eq!(resp.body, "Slider Value: ");
}

#[tokio::test]
async fn feedback_is_stored() {
    let orm = Orm::memory().await.unwrap();
    site::prepare_feedback_table(&orm).await.unwrap();
    let site = Site::new(MessageBoard::new(), Arc::new(Templates::new().unwrap()))
        .with_feedback_store(orm.clone());
    let app = site.clone().build().unwrap();
    let server = Server::new(app);

    let req = Request::new(Method::Post, "/submit_feedback").with_form([
        ("name", "Ann"),
        ("email", "ann@example.com"),
        ("feedback", "nice"),
        ("stars", "4"),
    ]);
    let resp = server.test_request(&req);
    assert_eq!(resp.status, 200);
    assert!(resp.body.contains("Welcome to the site hosted on Frap server"));

    site.flush_feedback().await;
    let rows = orm.fetch(FEEDBACK_TABLE, None).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0].1, frap_core::DbValue::String("Ann".to_string()));
    assert_eq!(rows[0][3].1, frap_core::DbValue::Int(4));
    orm.close().await;
}
