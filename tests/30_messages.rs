mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use common::{RequestBuilder, TestApp};
use serde_json::{json, Value};
use uuid::Uuid;

fn bodies(list: &Value) -> Vec<(String, String)> {
    list.as_array()
        .expect("message list")
        .iter()
        .map(|m| (m["sender"].as_str().unwrap().to_string(), m["message"].as_str().unwrap().to_string()))
        .collect()
}

#[tokio::test]
async fn conversation_is_listed_in_insertion_order() -> Result<()> {
    let app = TestApp::new();
    let alice = app.admin("alice").await?;
    let token = app.token_for(&alice);
    let session = app.start_session().await?;

    let steps = [
        ("user", "hello"),
        ("admin", "hi, how can I help?"),
        ("user", "my order is late"),
        ("admin", "let me check"),
    ];

    for (sender, text) in steps {
        let res = match sender {
            "user" => {
                app.send(
                    RequestBuilder::new(Method::POST, "/api/user/message")
                        .json(json!({ "message": text, "sessionId": session })),
                )
                .await?
            }
            _ => {
                app.send(
                    RequestBuilder::new(Method::POST, "/api/admin/message")
                        .bearer(&token)
                        .session(session)
                        .json(json!({ "message": text })),
                )
                .await?
            }
        };
        assert_eq!(res.status, StatusCode::OK, "{} {}", sender, text);
    }

    let res = app
        .send(RequestBuilder::new(Method::GET, "/api/messages").session(session).empty())
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    let expected: Vec<(String, String)> = steps
        .iter()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect();
    assert_eq!(bodies(&res.body), expected);

    let ids: Vec<i64> = res.body.as_array().unwrap().iter().map(|m| m["id"].as_i64().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert!(res.body.as_array().unwrap().iter().all(|m| m["sessionId"] == json!(session)));
    Ok(())
}

#[tokio::test]
async fn messages_are_scoped_to_their_session() -> Result<()> {
    let app = TestApp::new();
    app.admin("alice").await?;
    let first = app.start_session().await?;
    let second = app.start_session().await?;

    for (session, text) in [(first, "one"), (second, "two"), (first, "three")] {
        app.send(
            RequestBuilder::new(Method::POST, "/api/user/message")
                .json(json!({ "message": text, "sessionId": session })),
        )
        .await?;
    }

    let res = app
        .send(RequestBuilder::new(Method::GET, "/api/messages").session(second).empty())
        .await?;
    assert_eq!(bodies(&res.body), vec![("user".to_string(), "two".to_string())]);

    let res = app
        .send(RequestBuilder::new(Method::GET, "/api/messages").session(Uuid::new_v4()).empty())
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn user_message_falls_back_to_session_header() -> Result<()> {
    let app = TestApp::new();
    app.admin("alice").await?;
    let session = app.start_session().await?;

    let res = app
        .send(
            RequestBuilder::new(Method::POST, "/api/user/message")
                .session(session)
                .json(json!({ "message": "via header" })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["sessionId"], json!(session));
    assert_eq!(res.body["sender"], "user");
    Ok(())
}

#[tokio::test]
async fn missing_or_malformed_session_id_is_400() -> Result<()> {
    let app = TestApp::new();

    let res = app
        .send(RequestBuilder::new(Method::POST, "/api/user/message").json(json!({ "message": "hi" })))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.send(RequestBuilder::new(Method::GET, "/api/messages").empty()).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .send(
            RequestBuilder::new(Method::GET, "/api/messages")
                .header("SessionId", "definitely-not-a-uuid")
                .empty(),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn empty_message_is_400() -> Result<()> {
    let app = TestApp::new();
    app.admin("alice").await?;
    let session = app.start_session().await?;

    let res = app
        .send(
            RequestBuilder::new(Method::POST, "/api/user/message")
                .json(json!({ "message": "   ", "sessionId": session })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn message_to_unknown_session_is_404() -> Result<()> {
    let app = TestApp::new();

    let res = app
        .send(
            RequestBuilder::new(Method::POST, "/api/user/message")
                .json(json!({ "message": "hello?", "sessionId": Uuid::new_v4() })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn embedded_admin_token_upgrades_sender() -> Result<()> {
    let app = TestApp::new();
    let alice = app.admin("alice").await?;
    let session = app.start_session().await?;

    let res = app
        .send(
            RequestBuilder::new(Method::POST, "/api/user/message").json(json!({
                "message": "sent from the user widget by staff",
                "sessionId": session,
                "token": app.token_for(&alice),
            })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["sender"], "admin");
    Ok(())
}

#[tokio::test]
async fn blank_or_null_token_sends_as_user() -> Result<()> {
    let app = TestApp::new();
    app.admin("alice").await?;
    let session = app.start_session().await?;

    for token in [json!(""), json!("   "), json!(null)] {
        let res = app
            .send(
                RequestBuilder::new(Method::POST, "/api/user/message")
                    .json(json!({ "message": "hi", "sessionId": session, "token": token })),
            )
            .await?;
        assert_eq!(res.status, StatusCode::OK, "token {token}");
        assert_eq!(res.body["sender"], "user");
    }
    Ok(())
}

#[tokio::test]
async fn embedded_bad_tokens_are_rejected_not_downgraded() -> Result<()> {
    let app = TestApp::new();
    let alice = app.admin("alice").await?;
    let session = app.start_session().await?;

    let cases = [
        (app.expired_token_for(&alice), StatusCode::UNAUTHORIZED),
        ("garbage".to_string(), StatusCode::UNAUTHORIZED),
        (app.user_role_token(), StatusCode::FORBIDDEN),
    ];

    for (token, expected) in cases {
        let res = app
            .send(
                RequestBuilder::new(Method::POST, "/api/user/message")
                    .json(json!({ "message": "hi", "sessionId": session, "token": token })),
            )
            .await?;
        assert_eq!(res.status, expected);
    }

    let res = app
        .send(RequestBuilder::new(Method::GET, "/api/messages").session(session).empty())
        .await?;
    assert_eq!(res.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn admin_message_requires_token_and_session() -> Result<()> {
    let app = TestApp::new();
    let alice = app.admin("alice").await?;
    let session = app.start_session().await?;

    let res = app
        .send(
            RequestBuilder::new(Method::POST, "/api/admin/message")
                .session(session)
                .json(json!({ "message": "hi" })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app
        .send(
            RequestBuilder::new(Method::POST, "/api/admin/message")
                .bearer(&app.token_for(&alice))
                .json(json!({ "message": "hi" })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .send(
            RequestBuilder::new(Method::POST, "/api/admin/message")
                .bearer(&app.token_for(&alice))
                .session(Uuid::new_v4())
                .json(json!({ "message": "hi" })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}
