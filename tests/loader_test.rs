// tests/loader_test.rs

use eduflex_cli::{
    client::RobustClient,
    config::AppConfig,
    content::{ApiContentSource, ContentLoader, LoadScope, loader::Collection},
    models::ContentType,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

fn loader_for(server_url: &str) -> ContentLoader {
    let config = AppConfig {
        base_url: server_url.to_string(),
        ..AppConfig::default()
    };
    let client = RobustClient::new(Arc::new(config))
        .expect("Failed to create client")
        .with_token(Some("token".to_string()));
    ContentLoader::new(Arc::new(ApiContentSource::new(Arc::new(client))))
}

#[tokio::test]
async fn test_quiz_failure_does_not_hide_materials() {
    let mut server = mockito::Server::new_async().await;

    let materials = json!([
        {
            "id": 1,
            "title": "Introduktion",
            "type": "LESSON",
            "content": "{\"outline\":[{\"title\":\"Start\",\"content\":\"Hej\"}]}"
        },
        {
            "id": 2,
            "name": "Videogenomgång",
            "type": "VIDEO",
            "link": "https://youtu.be/dQw4w9WgXcQ"
        }
    ]);
    let materials_mock = server
        .mock("GET", "/api/courses/5/materials")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(materials.to_string())
        .create_async()
        .await;
    let quizzes_mock = server
        .mock("GET", "/api/quizzes/course/5")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let loaded = loader_for(&server.url()).load(LoadScope::Course(5)).await;

    assert_eq!(loaded.materials.len(), 2);
    assert!(loaded.quizzes.is_empty());
    assert_eq!(loaded.failures.len(), 1);
    assert_eq!(loaded.failures[0].collection, Collection::Quizzes);
    assert!(loaded.toast_message().is_some());

    assert_eq!(loaded.materials[0].content, "## Start\nHej");
    assert_eq!(loaded.materials[1].title, "Videogenomgång");
    assert_eq!(loaded.materials[1].content_type, ContentType::Video);

    materials_mock.assert_async().await;
    quizzes_mock.assert_async().await;
}

#[tokio::test]
async fn test_global_scope_uses_personal_endpoints() {
    let mut server = mockito::Server::new_async().await;

    let lessons_mock = server
        .mock("GET", "/api/lessons/my")
        .match_query(Matcher::UrlEncoded("userId".into(), "7".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 11, "title": "Egen lektion"}]"#)
        .create_async()
        .await;
    let quizzes_mock = server
        .mock("GET", "/api/quizzes/my")
        .match_query(Matcher::UrlEncoded("userId".into(), "7".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{
                "id": 21,
                "title": "Eget prov",
                "availableFrom": "2020-01-01T08:00:00",
                "questions": [
                    { "id": 1, "text": "2+2?", "options": [
                        { "id": 1, "text": "3", "isCorrect": false },
                        { "id": 2, "text": "4", "isCorrect": true }
                    ]}
                ]
            }])
            .to_string(),
        )
        .create_async()
        .await;

    let loaded = loader_for(&server.url())
        .load(LoadScope::Global { user_id: 7 })
        .await;

    assert!(loaded.failures.is_empty());
    assert!(loaded.toast_message().is_none());
    assert_eq!(loaded.find_material(11).unwrap().title, "Egen lektion");
    let quiz = loaded.find_quiz(21).unwrap();
    assert_eq!(quiz.questions[0].correct_option().unwrap().id, 2);
    assert!(quiz.available_from.is_some());

    lessons_mock.assert_async().await;
    quizzes_mock.assert_async().await;
}
