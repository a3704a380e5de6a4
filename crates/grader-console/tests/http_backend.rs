//! The console driven through the real `GradingClient` against a scripted
//! local server.

use std::{
    io::Read,
    sync::{Arc, Mutex},
    thread::JoinHandle,
};

use grader_client::GradingClient;
use grader_config::GraderConfig;
use grader_console::{GradingConsole, OutcomeStatus};
use grader_core::{ActionKind, FieldId, messages};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

/// Answers each request with the next `(status, body)` and records
/// `(url, body)` pairs.
struct ScriptedServer {
    config: GraderConfig,
    recorded: Arc<Mutex<Vec<(String, String)>>>,
    thread: Option<JoinHandle<()>>,
}

impl ScriptedServer {
    fn start(script: Vec<(u16, &'static str)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind scripted server");
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .expect("ip listener");
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&recorded);

        let thread = std::thread::spawn(move || {
            for (status, body) in script {
                let Ok(mut request) = server.recv() else {
                    return;
                };
                let mut payload = String::new();
                let _ = request.as_reader().read_to_string(&mut payload);
                sink.lock().unwrap().push((request.url().to_string(), payload));
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        let mut config = GraderConfig::default();
        config.api.base_url = format!("http://127.0.0.1:{port}/");
        Self {
            config,
            recorded,
            thread: Some(thread),
        }
    }

    fn console(&self) -> GradingConsole<GradingClient> {
        let client = GradingClient::from_config(&self.config.api).expect("client builds");
        GradingConsole::new(client, &self.config)
    }

    fn finish(mut self) -> Vec<(String, Value)> {
        if let Some(thread) = self.thread.take() {
            thread.join().expect("server thread");
        }
        self.recorded
            .lock()
            .unwrap()
            .iter()
            .map(|(url, body)| (url.clone(), serde_json::from_str(body).expect("JSON body")))
            .collect()
    }
}

#[tokio::test]
async fn upload_server_error_shows_fixed_message() {
    let server = ScriptedServer::start(vec![(500, r#"{"detail":"pinecone unavailable"}"#)]);
    let console = server.console();
    console.edit(FieldId::RubricText, "1 pt per pillar").unwrap();

    let outcome = console.embed_rubric().await.unwrap();
    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.message.as_deref(), Some(messages::UPLOAD_FAILED));

    let snapshot = console.snapshot();
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Upload failed. Check the backend server status.")
    );
    assert!(snapshot.toast.is_none());
    assert!(!snapshot.uploading);
    assert!(!console.is_busy(ActionKind::EmbedRubric));

    let recorded = server.finish();
    assert_eq!(
        recorded,
        vec![(
            "/upload-text".to_string(),
            json!({ "user_id": "demo-user", "text": "1 pt per pillar" })
        )]
    );
}

#[tokio::test]
async fn grade_over_http_opens_dialog_with_model_response() {
    let server = ScriptedServer::start(vec![(200, r#"{"response":"Score: 3/3"}"#)]);
    let console = server.console();

    let outcome = console.grade_answer().await.unwrap();
    assert_eq!(outcome.status, OutcomeStatus::Succeeded);

    let snapshot = console.snapshot();
    assert!(snapshot.dialog_visible);
    assert_eq!(snapshot.preview_text, "Score: 3/3");
    assert_eq!(
        snapshot.toast.map(|toast| toast.message).as_deref(),
        Some(messages::GRADING_COMPLETE)
    );

    let recorded = server.finish();
    assert_eq!(recorded[0].0, "/grade-answer");
    assert_eq!(
        recorded[0].1,
        json!({
            "user_id": "demo-user",
            "question": messages::DEFAULT_QUESTION_PROMPT,
            "student_response": messages::DEFAULT_STUDENT_ANSWER,
        })
    );
}
