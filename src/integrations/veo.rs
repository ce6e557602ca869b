//! Cinematic video synthesis through the Veo models.
//!
//! The flow is: key-selection gate, prompt augmentation, job submission,
//! a fixed-interval poll of the returned operation handle, then an
//! authenticated fetch of the finished bytes re-wrapped as a typed
//! artifact. Veo requires a paid project, so "entity not found" platform
//! errors are reclassified into an actionable access error instead of a
//! generic failure.

use std::path::Path;
use std::time::Duration;

use serde_json::json;

use crate::config::{Config, DEFAULT_POLL_INTERVAL_SECS};
use crate::integrations::gemini::GeminiClient;
use crate::{Error, Result};

/// Appended to every animation prompt to keep output consistent with the
/// site's aesthetic, whether the user typed a sentence or a keyword.
const PROMPT_MODIFIERS: &str = "cinematic slow motion portrait, high quality, 4k, photorealistic";

/// Host capability for selecting a paid project/API key. Only the video
/// path consults it; absence means the environment offers no picker.
pub trait KeySelection: Send + Sync {
    /// Whether a key has already been selected in the host environment.
    fn has_selected_key(&self) -> bool;

    /// Ask the host to prompt the user for key selection.
    fn open_select_key(&self);
}

/// Finished video bytes with a declared container type, so downstream
/// players recognize the format reliably.
#[derive(Debug, Clone)]
pub struct VideoArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl VideoArtifact {
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        tokio::fs::write(path, &self.bytes).await?;
        Ok(())
    }
}

/// Video generation front-end.
///
/// Construct with [`VideoStudio::from_env`] immediately before each
/// generation so a freshly selected credential is picked up.
pub struct VideoStudio {
    gemini: GeminiClient,
    keys: Option<Box<dyn KeySelection>>,
    poll_interval: Duration,
}

impl VideoStudio {
    /// Rebuild the platform client with the current credential.
    pub fn from_env(config: &Config) -> Result<Self> {
        let gemini = GeminiClient::from_env(&config.video_model)?;
        Ok(Self::new(gemini))
    }

    pub fn new(gemini: GeminiClient) -> Self {
        Self {
            gemini,
            keys: None,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }

    /// Attach the host's key-selection capability.
    pub fn with_key_selection(mut self, keys: Box<dyn KeySelection>) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Override the operation poll interval (tests, impatient hosts).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Animate a generated still into a short vertical video.
    ///
    /// Does not return until the platform reports the operation complete;
    /// abandoning (dropping) the future is the way to cancel the wait.
    pub async fn generate_video(&self, image_base64: &str, prompt: &str) -> Result<VideoArtifact> {
        // Veo requires a paid key; give the host a chance to select one
        // before submitting.
        if let Some(keys) = &self.keys {
            if !keys.has_selected_key() {
                keys.open_select_key();
            }
        }

        match self.run_generation(image_base64, prompt).await {
            Ok(artifact) => Ok(artifact),
            Err(err) if is_entity_not_found(&err) => {
                tracing::error!("Error generating video: {}", err);
                if let Some(keys) = &self.keys {
                    tracing::warn!(
                        "Veo entity not found or access denied. Prompting user to select API key."
                    );
                    keys.open_select_key();
                    Err(Error::ProjectAccessRequired)
                } else {
                    Err(err)
                }
            }
            Err(err) => {
                tracing::error!("Error generating video: {}", err);
                Err(err)
            }
        }
    }

    async fn run_generation(&self, image_base64: &str, prompt: &str) -> Result<VideoArtifact> {
        let clean_base64 = image_base64
            .split_once(',')
            .map(|(_, payload)| payload)
            .unwrap_or(image_base64);

        let veo_prompt = format!("{}, {}", prompt, PROMPT_MODIFIERS);

        // Portrait output for the barber mirror effect
        let body = json!({
            "instances": [{
                "prompt": veo_prompt,
                "image": {
                    "bytesBase64Encoded": clean_base64,
                    "mimeType": "image/png",
                },
            }],
            "parameters": {
                "sampleCount": 1,
                "resolution": "720p",
                "aspectRatio": "9:16",
            },
        });

        let mut operation = self.gemini.start_video_generation(&body).await?;

        while !operation.done {
            tokio::time::sleep(self.poll_interval).await;
            operation = self.gemini.get_video_operation(&operation.name).await?;
        }

        if let Some(op_err) = operation.error {
            let message = op_err.message.unwrap_or_else(|| "operation failed".to_string());
            let status = op_err.status.unwrap_or_default();
            return Err(Error::GeminiError(format!("{} {}", status, message).trim().to_string()));
        }

        let uri = operation
            .first_video_uri()
            .ok_or_else(|| Error::VideoError("no video URI in completed operation".to_string()))?;

        let bytes = self.gemini.download(&uri).await?;

        Ok(VideoArtifact {
            bytes,
            mime_type: "video/mp4",
        })
    }
}

/// The platform exposes no stable code for "requested entity was not
/// found", so both the message and the serialized form are probed for the
/// known markers.
fn is_entity_not_found(err: &Error) -> bool {
    let message = err.to_string();
    let serialized = format!("{:?}", err);

    ["404", "Requested entity was not found", "NOT_FOUND"]
        .iter()
        .any(|marker| message.contains(marker) || serialized.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[derive(Default)]
    struct RecordingKeys {
        selected: bool,
        prompts: AtomicUsize,
    }

    impl RecordingKeys {
        fn selected() -> Self {
            Self {
                selected: true,
                prompts: AtomicUsize::new(0),
            }
        }

        fn prompt_count(&self) -> usize {
            self.prompts.load(Ordering::SeqCst)
        }
    }

    impl KeySelection for Arc<RecordingKeys> {
        fn has_selected_key(&self) -> bool {
            self.selected
        }

        fn open_select_key(&self) {
            self.prompts.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn studio(server: &MockServer) -> VideoStudio {
        let gemini = GeminiClient::new(Some("test_key".to_string()), "veo-3.1-fast-generate-preview")
            .expect("client")
            .with_base_url(&server.base_url());
        VideoStudio::new(gemini).with_poll_interval(Duration::from_millis(30))
    }

    #[test]
    fn test_default_poll_interval_is_five_seconds() {
        let gemini = GeminiClient::new(Some("k".to_string()), "veo-3.1-fast-generate-preview")
            .expect("client");
        let studio = VideoStudio::new(gemini);
        assert_eq!(studio.poll_interval(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn polls_until_operation_reports_done() {
        let server = MockServer::start_async().await;
        let op_name = "models/veo-3.1-fast-generate-preview/operations/op1";
        let video_uri = server.url("/files/video1?alt=media");

        let submit_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/veo-3.1-fast-generate-preview:predictLongRunning");
            then.status(200)
                .json_body(json!({ "name": op_name, "done": false }));
        });

        // First two polls report the job still running, the third completes.
        let poll_counter = Arc::new(AtomicUsize::new(0));
        let pending_gate = poll_counter.clone();
        let pending_mock = server.mock(|when, then| {
            when.method(GET)
                .path(format!("/{}", op_name))
                .is_true(move |_req| pending_gate.fetch_add(1, Ordering::SeqCst) < 2);
            then.status(200)
                .json_body(json!({ "name": op_name, "done": false }));
        });

        let done_gate = poll_counter.clone();
        let done_mock = server.mock(|when, then| {
            when.method(GET)
                .path(format!("/{}", op_name))
                .is_true(move |_req| done_gate.load(Ordering::SeqCst) >= 2);
            then.status(200).json_body(json!({
                "name": op_name,
                "done": true,
                "response": {
                    "generateVideoResponse": {
                        "generatedSamples": [ { "video": { "uri": video_uri } } ]
                    }
                }
            }));
        });

        let download_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/files/video1")
                .query_param("alt", "media")
                .query_param("key", "test_key");
            then.status(200).body("MP4DATA");
        });

        let studio = studio(&server);
        let start = Instant::now();
        let artifact = studio
            .generate_video("data:image/png;base64,QUJDRA==", "Pompadour")
            .await
            .unwrap();
        let elapsed = start.elapsed();

        assert_eq!(artifact.bytes, b"MP4DATA");
        assert_eq!(artifact.mime_type, "video/mp4");
        // One sleep precedes every poll
        assert!(elapsed >= 3 * studio.poll_interval());
        submit_mock.assert_calls(1);
        pending_mock.assert_calls(2);
        done_mock.assert_calls(1);
        download_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn submission_carries_cinematic_modifiers_and_fixed_parameters() {
        let server = MockServer::start_async().await;

        let submit_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/veo-3.1-fast-generate-preview:predictLongRunning")
                .is_true(|req| {
                    let body = String::from_utf8_lossy(req.body().as_ref());
                    body.contains(
                        "Mullet, cinematic slow motion portrait, high quality, 4k, photorealistic",
                    ) && body.contains("\"bytesBase64Encoded\":\"QUJDRA==\"")
                        && body.contains("\"aspectRatio\":\"9:16\"")
                        && body.contains("\"resolution\":\"720p\"")
                        && body.contains("\"sampleCount\":1")
                        && !body.contains("data:image/png")
                });
            then.status(200).json_body(json!({
                "name": "models/veo-3.1-fast-generate-preview/operations/op2",
                "done": true,
                "response": {
                    "generatedVideos": [ { "video": { "uri": server.url("/files/video2") } } ]
                }
            }));
        });

        server.mock(|when, then| {
            when.method(GET).path("/files/video2").query_param("key", "test_key");
            then.status(200).body("MP4");
        });

        let artifact = studio(&server)
            .generate_video("data:image/png;base64,QUJDRA==", "Mullet")
            .await
            .unwrap();

        assert_eq!(artifact.bytes, b"MP4");
        submit_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn not_found_reclassifies_and_reprompts_key_selection() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST)
                .path("/models/veo-3.1-fast-generate-preview:predictLongRunning");
            then.status(404)
                .body("{\"error\":{\"message\":\"Requested entity was not found.\",\"status\":\"NOT_FOUND\"}}");
        });

        let keys = Arc::new(RecordingKeys::selected());
        let studio = studio(&server).with_key_selection(Box::new(keys.clone()));

        let err = studio
            .generate_video("QUJDRA==", "Slicked Back")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ProjectAccessRequired));
        assert_ne!(
            err.to_string(),
            Error::VideoError("generic".to_string()).to_string()
        );
        assert_eq!(keys.prompt_count(), 1);
    }

    #[tokio::test]
    async fn operation_level_not_found_is_also_reclassified() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST)
                .path("/models/veo-3.1-fast-generate-preview:predictLongRunning");
            then.status(200).json_body(json!({
                "name": "models/veo-3.1-fast-generate-preview/operations/op3",
                "done": true,
                "error": {
                    "code": 5,
                    "message": "Requested entity was not found.",
                    "status": "NOT_FOUND"
                }
            }));
        });

        let keys = Arc::new(RecordingKeys::selected());
        let studio = studio(&server).with_key_selection(Box::new(keys.clone()));

        let err = studio.generate_video("QUJDRA==", "Undercut").await.unwrap_err();

        assert!(matches!(err, Error::ProjectAccessRequired));
        assert_eq!(keys.prompt_count(), 1);
    }

    #[tokio::test]
    async fn not_found_without_key_capability_propagates_original_error() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST)
                .path("/models/veo-3.1-fast-generate-preview:predictLongRunning");
            then.status(404).body("Requested entity was not found.");
        });

        let err = studio(&server)
            .generate_video("QUJDRA==", "Bald")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::GeminiError(_)));
    }

    #[tokio::test]
    async fn unselected_key_triggers_prompt_before_submission() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST)
                .path("/models/veo-3.1-fast-generate-preview:predictLongRunning");
            then.status(200).json_body(json!({
                "name": "models/veo-3.1-fast-generate-preview/operations/op4",
                "done": true,
                "response": {
                    "generatedVideos": [ { "video": { "uri": server.url("/files/video4") } } ]
                }
            }));
        });

        server.mock(|when, then| {
            when.method(GET).path("/files/video4");
            then.status(200).body("MP4");
        });

        let keys = Arc::new(RecordingKeys::default());
        let studio = studio(&server).with_key_selection(Box::new(keys.clone()));

        studio.generate_video("QUJDRA==", "Buzz Cut").await.unwrap();

        assert_eq!(keys.prompt_count(), 1);
    }

    #[tokio::test]
    async fn other_errors_propagate_unmodified() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST)
                .path("/models/veo-3.1-fast-generate-preview:predictLongRunning");
            then.status(500).body("internal failure");
        });

        let keys = Arc::new(RecordingKeys::selected());
        let studio = studio(&server).with_key_selection(Box::new(keys.clone()));

        let err = studio.generate_video("QUJDRA==", "Pompadour").await.unwrap_err();

        assert!(matches!(err, Error::GeminiError(_)));
        assert!(err.to_string().contains("internal failure"));
        // No access prompt for unrelated failures
        assert_eq!(keys.prompt_count(), 0);
    }

    #[tokio::test]
    async fn completed_operation_without_uri_is_a_video_error() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST)
                .path("/models/veo-3.1-fast-generate-preview:predictLongRunning");
            then.status(200).json_body(json!({
                "name": "models/veo-3.1-fast-generate-preview/operations/op5",
                "done": true,
                "response": {}
            }));
        });

        let err = studio(&server)
            .generate_video("QUJDRA==", "Undercut")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::VideoError(_)));
        assert!(err.to_string().contains("no video URI"));
    }

    #[tokio::test]
    async fn artifact_save_writes_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("look.mp4");

        let artifact = VideoArtifact {
            bytes: b"MP4DATA".to_vec(),
            mime_type: "video/mp4",
        };
        artifact.save(&path).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"MP4DATA");
    }

    #[test]
    fn test_entity_not_found_markers() {
        assert!(is_entity_not_found(&Error::GeminiError(
            "404 Not Found: nope".to_string()
        )));
        assert!(is_entity_not_found(&Error::GeminiError(
            "Requested entity was not found.".to_string()
        )));
        assert!(is_entity_not_found(&Error::GeminiError(
            "NOT_FOUND something".to_string()
        )));
        assert!(!is_entity_not_found(&Error::GeminiError(
            "500: internal".to_string()
        )));
    }
}
