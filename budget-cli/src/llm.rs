//! Savings suggestions from a chat-completion provider.

use anyhow::{anyhow, bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::AuthState;
use crate::config::LlmSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

impl Provider {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "anthropic" => Ok(Provider::Anthropic),
            other => bail!("unknown llm provider '{other}' (expected openai or anthropic)"),
        }
    }
}

const SYSTEM_PROMPT: &str = "You are a personal finance advisor. Analyze the user's spending habits and financial goals to provide personalized savings suggestions.";

/// What the advisor sees: a spending summary and the user's goals
#[derive(Debug, Clone)]
pub struct SuggestionInput {
    pub spending_data: String,
    pub financial_goals: String,
}

impl SuggestionInput {
    pub fn validate(&self) -> Result<()> {
        if self.spending_data.trim().chars().count() < 10 {
            bail!("please provide some details about your spending");
        }
        if self.financial_goals.trim().chars().count() < 5 {
            bail!("please describe your financial goals (at least 5 characters)");
        }
        Ok(())
    }

    pub fn prompt(&self) -> String {
        format!(
            "Spending Data: {}\nFinancial Goals: {}\n\nProvide specific, actionable advice to help the user save money and achieve their goals. List the suggestions in bullet points.",
            self.spending_data.trim(),
            self.financial_goals.trim()
        )
    }
}

/// Split the advisor's answer into individual suggestions.
///
/// Bulleted or numbered lines are taken with their markers stripped; an
/// answer without any list markers falls back to its non-empty lines.
pub fn parse_suggestions(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let bullets: Vec<String> = lines.iter().filter_map(|l| strip_list_marker(l)).collect();
    if !bullets.is_empty() {
        return bullets;
    }
    lines.into_iter().map(str::to_string).collect()
}

fn strip_list_marker(line: &str) -> Option<String> {
    let rest = if let Some(r) = line.strip_prefix(['-', '*', '•']) {
        r
    } else {
        let digits = line.find(|c: char| !c.is_ascii_digit())?;
        if digits == 0 {
            return None;
        }
        line[digits..].strip_prefix(['.', ')'])?
    };
    let item = rest.trim().trim_matches('*').trim();
    (!item.is_empty()).then(|| item.to_string())
}

pub async fn savings_suggestions(
    cfg: &LlmSection,
    auth: &AuthState,
    input: &SuggestionInput,
) -> Result<Vec<String>> {
    input.validate()?;
    let provider = Provider::parse(&cfg.provider)?;
    let prompt = input.prompt();
    debug!(?provider, model = %cfg.model, chars = prompt.len(), "requesting savings suggestions");

    let answer = match provider {
        Provider::OpenAI => openai_complete(cfg, auth, &prompt).await?,
        Provider::Anthropic => anthropic_complete(cfg, auth, &prompt).await?,
    };

    let suggestions = parse_suggestions(&answer);
    if suggestions.is_empty() {
        warn!("advisor returned no suggestions");
    }
    Ok(suggestions)
}

async fn anthropic_complete(cfg: &LlmSection, auth: &AuthState, prompt: &str) -> Result<String> {
    let token = auth
        .anthropic_token
        .as_deref()
        .ok_or_else(|| anyhow!("missing anthropic key; run: budget auth paste-anthropic-token"))?;

    #[derive(Serialize)]
    struct Msg<'a> {
        role: &'a str,
        content: &'a str,
    }

    #[derive(Serialize)]
    struct Req<'a> {
        model: &'a str,
        max_tokens: u32,
        temperature: f32,
        system: &'a str,
        messages: Vec<Msg<'a>>,
    }

    #[derive(Deserialize)]
    struct Resp {
        content: Vec<ContentBlock>,
    }

    #[derive(Deserialize)]
    struct ContentBlock {
        #[serde(rename = "type")]
        t: String,
        text: Option<String>,
    }

    let body = Req {
        model: &cfg.model,
        max_tokens: cfg.max_tokens,
        temperature: cfg.temperature,
        system: SYSTEM_PROMPT,
        messages: vec![Msg {
            role: "user",
            content: prompt,
        }],
    };

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", HeaderValue::from_str(token)?);
    headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::new();
    let resp = client
        .post("https://api.anthropic.com/v1/messages")
        .headers(headers)
        .json(&body)
        .send()
        .await
        .context("anthropic request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("anthropic error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse anthropic response")?;
    let text: String = out
        .content
        .into_iter()
        .filter(|b| b.t == "text")
        .filter_map(|b| b.text)
        .collect();
    Ok(text.trim().to_string())
}

async fn openai_complete(cfg: &LlmSection, auth: &AuthState, prompt: &str) -> Result<String> {
    let key = auth
        .openai_api_key
        .as_deref()
        .ok_or_else(|| anyhow!("missing openai_api_key; run: budget auth paste-openai-api-key"))?;

    #[derive(Serialize)]
    struct Msg<'a> {
        role: &'a str,
        content: &'a str,
    }

    #[derive(Serialize)]
    struct Req<'a> {
        model: &'a str,
        messages: Vec<Msg<'a>>,
        temperature: f32,
        max_tokens: u32,
    }

    #[derive(Deserialize)]
    struct Resp {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: MsgOut,
    }

    #[derive(Deserialize)]
    struct MsgOut {
        content: Option<String>,
    }

    let body = Req {
        model: &cfg.model,
        messages: vec![
            Msg {
                role: "system",
                content: SYSTEM_PROMPT,
            },
            Msg {
                role: "user",
                content: prompt,
            },
        ],
        temperature: cfg.temperature,
        max_tokens: cfg.max_tokens,
    };

    let url = format!("{}/v1/chat/completions", cfg.base_url.trim_end_matches('/'));
    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .bearer_auth(key)
        .json(&body)
        .send()
        .await
        .context("openai request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("openai error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse openai response")?;
    let content = out
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    Ok(content.trim().to_string())
}
