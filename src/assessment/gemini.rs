// src/assessment/gemini.rs
// =============================================================================
// Google Gemini `generateContent` client.
//
// Sends the assessment prompt together with a response schema, so the model
// answers with a JSON document containing exactly the five Assessment
// fields. The schema is our only lever on the response shape; what comes
// back is still decoded strictly.
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::github::RepositoryMetadata;

use super::prompt::build_prompt;
use super::types::Assessment;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate, if there is any text
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Output schema: five required fields mirroring [`Assessment`]
fn assessment_schema() -> Value {
    let string_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "potentialIssues": string_list,
            "recommendations": string_list,
            "score": { "type": "NUMBER" },
            "techStackInsights": string_list,
        },
        "required": ["summary", "potentialIssues", "recommendations", "score", "techStackInsights"],
    })
}

/// Requests structured assessments from Gemini
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> AnalyzerResult<Self> {
        let mut key =
            HeaderValue::from_str(&config.api_key).map_err(|_| AnalyzerError::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key);

        let client = Client::builder().default_headers(headers).build()?;
        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.gemini_api_url, config.model
        );

        Ok(Self { client, endpoint })
    }

    /// Asks the model to assess a repository
    ///
    /// Fails with Generation when the model returns no text, and with
    /// Schema when the text is not a valid assessment.
    pub async fn request_assessment(
        &self,
        metadata: &RepositoryMetadata,
        language_names: &[String],
    ) -> AnalyzerResult<Assessment> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(metadata, language_names),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: assessment_schema(),
            },
        };

        info!(repo = %metadata.full_name, "requesting assessment");
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AnalyzerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let generated: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| AnalyzerError::schema("model response", e))?;

        let text = generated.text().ok_or(AnalyzerError::Generation)?;
        debug!(bytes = text.len(), "model returned assessment text");

        serde_json::from_str(&text).map_err(|e| AnalyzerError::schema("assessment", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::RepositoryOwner;
    use url::Url;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENDPOINT: &str = "/models/gemini-3-flash-preview:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        let mut config = Config::new("test-key");
        config.gemini_api_url = server.uri();
        GeminiClient::new(&config).unwrap()
    }

    fn metadata() -> RepositoryMetadata {
        RepositoryMetadata {
            name: "colisseum".to_string(),
            full_name: "levy01/colisseum".to_string(),
            description: None,
            stargazers_count: 42,
            forks_count: 7,
            language: None,
            languages_url: Url::parse("https://api.github.com/repos/levy01/colisseum/languages")
                .unwrap(),
            html_url: Url::parse("https://github.com/levy01/colisseum").unwrap(),
            owner: RepositoryOwner {
                login: "levy01".to_string(),
                avatar_url: Url::parse("https://avatars.githubusercontent.com/u/1").unwrap(),
            },
            topics: vec![],
        }
    }

    fn candidate_with_text(text: &str) -> Value {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
    }

    async fn mount(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[test]
    fn test_key_with_control_characters_is_invalid() {
        let result = GeminiClient::new(&Config::new("abc\ndef"));
        assert!(matches!(result, Err(AnalyzerError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn test_request_assessment_success() {
        let server = MockServer::start().await;
        let assessment = json!({
            "summary": "An arena game.",
            "potentialIssues": ["No tests"],
            "recommendations": ["Add CI", "Add tests", "Write docs"],
            "score": 67,
            "techStackInsights": ["Plain JavaScript"]
        });

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {
                        "required": [
                            "summary",
                            "potentialIssues",
                            "recommendations",
                            "score",
                            "techStackInsights"
                        ]
                    }
                }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate_with_text(&assessment.to_string())),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .request_assessment(&metadata(), &["JavaScript".to_string()])
            .await
            .unwrap();

        assert_eq!(result.summary, "An arena game.");
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.score, 67.0);
    }

    #[tokio::test]
    async fn test_text_split_across_parts() {
        let server = MockServer::start().await;
        let body = json!({ "candidates": [{ "content": { "parts": [
            { "text": "{\"summary\":\"s\",\"potentialIssues\":[]," },
            { "text": "\"recommendations\":[],\"score\":12,\"techStackInsights\":[]}" }
        ] } }] });
        mount(&server, ResponseTemplate::new(200).set_body_json(body)).await;

        let result = client_for(&server)
            .request_assessment(&metadata(), &[])
            .await
            .unwrap();
        assert_eq!(result.score, 12.0);
    }

    #[tokio::test]
    async fn test_empty_payload_is_generation_error() {
        for body in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            candidate_with_text(""),
        ] {
            let server = MockServer::start().await;
            mount(&server, ResponseTemplate::new(200).set_body_json(body)).await;

            let result = client_for(&server).request_assessment(&metadata(), &[]).await;
            assert!(matches!(result, Err(AnalyzerError::Generation)));
        }
    }

    #[tokio::test]
    async fn test_malformed_assessment_is_schema_error() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(candidate_with_text(r#"{"summary": "only a summary"}"#)),
        )
        .await;

        let result = client_for(&server).request_assessment(&metadata(), &[]).await;
        assert!(matches!(
            result,
            Err(AnalyzerError::Schema { payload: "assessment", .. })
        ));
    }

    #[tokio::test]
    async fn test_api_error_carries_status() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(400).set_body_string("API key not valid"),
        )
        .await;

        let result = client_for(&server).request_assessment(&metadata(), &[]).await;
        match result {
            Err(AnalyzerError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
