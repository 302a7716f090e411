//! Google Gemini adapter.
//!
//! Implements the Gemini `generateContent` and `batchEmbedContents` APIs.
//! Auth is via an API key passed as a query parameter (`key={api_key}`).
//! Search grounding maps to the `google_search` tool and the thinking
//! budget to `generationConfig.thinkingConfig`.

use crate::auth::KeyRing;
use crate::traits::{
    EmbeddingsRequest, EmbeddingsResponse, GenerateRequest, GenerateResponse, LlmProvider, Usage,
};
use crate::util::{from_reqwest, redact_url_key};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tw_domain::config::ProviderConfig;
use tw_domain::conversation::Role;
use tw_domain::error::{Error, Result};
use tw_domain::trace::TraceEvent;

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_EMBEDDING_MODEL: &str = "gemini-embedding-exp-03-07";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct GoogleProvider {
    id: String,
    base_url: String,
    keys: Arc<KeyRing>,
    default_model: String,
    client: reqwest::Client,
}

impl GoogleProvider {
    /// Create a new provider from the deserialized provider config.
    pub fn from_config(cfg: &ProviderConfig, timeout_ms: u64) -> Result<Self> {
        let keys = Arc::new(KeyRing::from_auth_config(&cfg.auth)?);
        let default_model = cfg
            .default_model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.into());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            id: cfg.id.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            keys,
            default_model,
            client,
        })
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn generate_url(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, api_key
        )
    }

    fn embed_url(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:batchEmbedContents?key={}",
            self.base_url, model, api_key
        )
    }

    /// POST a JSON body, rotating the key on quota or server errors.
    async fn post_json(&self, url_for: impl Fn(&str) -> String, body: &Value) -> Result<Value> {
        let entry = self.keys.next_key();
        let url = url_for(&entry.key);

        tracing::debug!(provider = %self.id, url = %redact_url_key(&url), "google request");

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            if status.as_u16() == 429 || status.is_server_error() {
                self.keys.mark_failed(entry.index);
            }
            return Err(Error::Provider {
                provider: self.id.clone(),
                message: format!("HTTP {} - {}", status.as_u16(), resp_text),
            });
        }

        Ok(serde_json::from_str(&resp_text)?)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request serialization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn build_generate_body(req: &GenerateRequest) -> Value {
    let contents: Vec<Value> = req
        .conversation
        .turns()
        .iter()
        .map(|turn| {
            let role = match turn.role {
                Role::User => "user",
                Role::Model => "model",
            };
            json!({ "role": role, "parts": [{ "text": turn.content }] })
        })
        .collect();

    let mut body = json!({ "contents": contents });

    if req.grounding {
        body["tools"] = json!([{ "google_search": {} }]);
    }

    let mut gen_config = json!({});
    if let Some(temp) = req.temperature {
        gen_config["temperature"] = json!(temp);
    }
    if let Some(budget) = req.thinking_budget {
        gen_config["thinkingConfig"] = json!({ "thinkingBudget": budget });
    }
    if gen_config.as_object().is_some_and(|o| !o.is_empty()) {
        body["generationConfig"] = gen_config;
    }

    body
}

fn build_embed_body(req: &EmbeddingsRequest, model: &str) -> Value {
    let requests: Vec<Value> = req
        .input
        .iter()
        .map(|text| {
            let mut r = json!({
                "model": format!("models/{}", model),
                "content": { "parts": [{ "text": text }] },
            });
            if let Some(ref task) = req.task_type {
                r["taskType"] = json!(task);
            }
            r
        })
        .collect();
    json!({ "requests": requests })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Response deserialization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn parse_gemini_response(body: &Value, model: &str) -> Result<GenerateResponse> {
    if let Some(reason) = body
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|r| r.as_str())
    {
        return Err(Error::Generation(format!("prompt blocked: {reason}")));
    }

    let candidate = body
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .ok_or_else(|| Error::Generation("no candidates in response".into()))?;

    let text: String = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|v| v.as_str()))
                .collect()
        })
        .unwrap_or_default();

    let finish_reason = candidate
        .get("finishReason")
        .and_then(|v| v.as_str())
        .map(|s| match s {
            "STOP" => "stop".to_string(),
            "MAX_TOKENS" => "length".to_string(),
            other => other.to_lowercase(),
        });

    if text.trim().is_empty() {
        return Err(Error::Generation(format!(
            "response has no text (finish_reason: {})",
            finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    let usage = body.get("usageMetadata").and_then(parse_gemini_usage);

    Ok(GenerateResponse {
        text,
        usage,
        model: model.to_string(),
        finish_reason,
    })
}

fn parse_gemini_usage(v: &Value) -> Option<Usage> {
    let prompt = v.get("promptTokenCount")?.as_u64()? as u32;
    let completion = v
        .get("candidatesTokenCount")
        .and_then(|c| c.as_u64())
        .unwrap_or(0) as u32;
    let total = v
        .get("totalTokenCount")
        .and_then(|v| v.as_u64())
        .unwrap_or((prompt + completion) as u64) as u32;
    Some(Usage {
        prompt_tokens: prompt,
        completion_tokens: completion,
        total_tokens: total,
    })
}

fn parse_embeddings(body: &Value) -> Option<Vec<Vec<f32>>> {
    let items = body.get("embeddings")?.as_array()?;
    items
        .iter()
        .map(|item| {
            let values = item.get("values")?.as_array()?;
            Some(
                values
                    .iter()
                    .filter_map(|v| v.as_f64().map(|f| f as f32))
                    .collect(),
            )
        })
        .collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
impl LlmProvider for GoogleProvider {
    async fn generate(&self, req: GenerateRequest) -> Result<GenerateResponse> {
        let model = req
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());
        let body = build_generate_body(&req);
        let started = Instant::now();

        let resp_json = self
            .post_json(|key| self.generate_url(&model, key), &body)
            .await?;
        let resp = parse_gemini_response(&resp_json, &model)?;

        TraceEvent::LlmRequest {
            provider: self.id.clone(),
            model: model.clone(),
            grounding: req.grounding,
            thinking_budget: req.thinking_budget,
            turns: req.conversation.len(),
            duration_ms: started.elapsed().as_millis() as u64,
            prompt_tokens: resp.usage.map(|u| u.prompt_tokens),
            completion_tokens: resp.usage.map(|u| u.completion_tokens),
        }
        .emit();

        Ok(resp)
    }

    async fn embeddings(&self, req: EmbeddingsRequest) -> Result<EmbeddingsResponse> {
        let model = req
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.into());
        let body = build_embed_body(&req, &model);

        let resp_json = self.post_json(|key| self.embed_url(&model, key), &body).await?;
        let embeddings = parse_embeddings(&resp_json).ok_or_else(|| Error::Provider {
            provider: self.id.clone(),
            message: "missing or malformed 'embeddings' array in response".into(),
        })?;

        if embeddings.len() != req.input.len() {
            return Err(Error::Provider {
                provider: self.id.clone(),
                message: format!(
                    "expected {} embeddings, got {}",
                    req.input.len(),
                    embeddings.len()
                ),
            });
        }

        Ok(EmbeddingsResponse { embeddings })
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use tw_domain::conversation::Conversation;

    #[test]
    fn body_maps_roles_and_omits_optional_sections() {
        let req = GenerateRequest {
            conversation: Conversation::from_user("plan").append_model("ok"),
            ..Default::default()
        };
        let body = build_generate_body(&req);
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(body["contents"][1]["parts"][0]["text"], "ok");
        assert!(body.get("tools").is_none());
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn grounding_adds_search_tool() {
        let req = GenerateRequest {
            conversation: Conversation::from_user("attractions in Kyoto"),
            grounding: true,
            ..Default::default()
        };
        let body = build_generate_body(&req);
        assert!(body["tools"][0].get("google_search").is_some());
    }

    #[test]
    fn thinking_budget_is_forwarded_verbatim() {
        for budget in [-1, 0, 2048] {
            let req = GenerateRequest {
                conversation: Conversation::from_user("x"),
                thinking_budget: Some(budget),
                ..Default::default()
            };
            let body = build_generate_body(&req);
            assert_eq!(
                body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
                json!(budget)
            );
        }
    }

    #[test]
    fn parse_concatenates_text_parts() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
        });
        let resp = parse_gemini_response(&body, "gemini-2.0-flash").unwrap();
        assert_eq!(resp.text, "{\"a\": 1}");
        assert_eq!(resp.finish_reason.as_deref(), Some("stop"));
        assert_eq!(resp.usage.unwrap().total_tokens, 14);
    }

    #[test]
    fn parse_without_candidates_is_generation_error() {
        let err = parse_gemini_response(&json!({}), "m").unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn parse_with_empty_text_is_generation_error() {
        let body = json!({
            "candidates": [{"content": {"parts": []}, "finishReason": "SAFETY"}]
        });
        let err = parse_gemini_response(&body, "m").unwrap_err();
        assert!(err.to_string().contains("safety"));
    }

    #[test]
    fn blocked_prompt_is_generation_error() {
        let body = json!({"promptFeedback": {"blockReason": "OTHER"}});
        assert!(matches!(
            parse_gemini_response(&body, "m"),
            Err(Error::Generation(_))
        ));
    }

    #[test]
    fn embed_body_carries_task_type() {
        let req = EmbeddingsRequest {
            input: vec!["museums".into(), "hiking".into()],
            model: None,
            task_type: Some("SEMANTIC_SIMILARITY".into()),
        };
        let body = build_embed_body(&req, "gemini-embedding-exp-03-07");
        assert_eq!(body["requests"].as_array().unwrap().len(), 2);
        assert_eq!(body["requests"][1]["taskType"], "SEMANTIC_SIMILARITY");
        assert_eq!(body["requests"][0]["model"], "models/gemini-embedding-exp-03-07");
    }

    #[test]
    fn parse_embeddings_reads_values() {
        let body = json!({"embeddings": [{"values": [0.5, -0.5]}, {"values": [1.0, 0.0]}]});
        let e = parse_embeddings(&body).unwrap();
        assert_eq!(e, vec![vec![0.5, -0.5], vec![1.0, 0.0]]);
        assert!(parse_embeddings(&json!({"embeddings": [{}]})).is_none());
    }
}
