use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::state::ensure_budget_home;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AuthState {
    pub anthropic_token: Option<String>,
    pub openai_api_key: Option<String>,
}

impl AuthState {
    /// Environment variables win over the stored values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(k) = std::env::var("OPENAI_API_KEY") {
            if !k.trim().is_empty() {
                self.openai_api_key = Some(k.trim().to_string());
            }
        }
        if let Ok(k) = std::env::var("ANTHROPIC_API_KEY") {
            if !k.trim().is_empty() {
                self.anthropic_token = Some(k.trim().to_string());
            }
        }
        self
    }
}

fn auth_path() -> Result<PathBuf> {
    Ok(ensure_budget_home()?.join("auth.json"))
}

pub fn load_auth_from(p: &Path) -> Result<AuthState> {
    if !p.exists() {
        return Ok(AuthState::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn load_auth() -> Result<AuthState> {
    Ok(load_auth_from(&auth_path()?)?.with_env_overrides())
}

pub fn save_auth(auth: &AuthState) -> Result<()> {
    let p = auth_path()?;
    let s = serde_json::to_string_pretty(auth)?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

fn prompt_secret(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

pub fn anthropic_paste_token() -> Result<()> {
    let mut auth = load_auth_from(&auth_path()?)?;
    let token = prompt_secret("Paste Anthropic API key (starts with sk-ant-)")?;
    if !token.starts_with("sk-ant-") {
        bail!("key didn't look like an Anthropic key (expected prefix sk-ant-)");
    }
    auth.anthropic_token = Some(token);
    save_auth(&auth)?;
    println!("Saved Anthropic key to {}", auth_path()?.display());
    Ok(())
}

pub fn openai_paste_api_key() -> Result<()> {
    let mut auth = load_auth_from(&auth_path()?)?;
    let key = prompt_secret("Paste OpenAI API key (starts with sk-)")?;
    if !key.starts_with("sk-") {
        bail!("key didn't look like an OpenAI API key (expected prefix sk-)");
    }
    auth.openai_api_key = Some(key);
    save_auth(&auth)?;
    println!("Saved OpenAI API key to {}", auth_path()?.display());
    Ok(())
}
