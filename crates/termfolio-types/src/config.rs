//! Site configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working portfolio with placeholder content.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, TermfolioError};

/// Top-level configuration (`termfolio.toml`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TermfolioConfig {
    /// Prompt drawn before every command-bearing line.
    pub prompt: String,
    /// Host part of the window title.
    pub host: String,
    /// Window title template. `{whoami}` and `{host}` are substituted.
    pub window_title: String,
    /// Lines of the welcome banner shown when the session starts.
    pub welcome: Vec<String>,
    /// Where log output goes while the UI owns the terminal.
    pub log_file: Option<PathBuf>,
    /// Render tick in milliseconds.
    pub frame_ms: u64,
    pub profile: Profile,
    pub background: BackgroundConfig,
}

impl Default for TermfolioConfig {
    fn default() -> Self {
        Self {
            prompt: "~ >".to_string(),
            host: "termfolio".to_string(),
            window_title: "terminal \u{2014} {whoami}@{host} \u{2014} ~ -zsh".to_string(),
            welcome: vec![
                "Welcome to Ubuntu 22.04 (GNU/Linux 5.15.0-125-generic x86_64)".to_string(),
                "Last login: Thu Apr 10 12:00:00 2025 from 127.0.0.1".to_string(),
                "Type 'help' to see available commands.".to_string(),
            ],
            log_file: None,
            frame_ms: 16,
            profile: Profile::default(),
            background: BackgroundConfig::default(),
        }
    }
}

impl TermfolioConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| TermfolioError::Config(e.to_string()))
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        toml::from_str(&source)
            .map_err(|e| TermfolioError::Config(format!("{}: {e}", path.display())))
    }

    /// The window title with the profile substituted in.
    pub fn window_title(&self) -> String {
        self.window_title
            .replace("{whoami}", &self.profile.whoami)
            .replace("{host}", &self.host)
    }
}

/// Portfolio content behind the informational commands.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    /// One-line introduction printed by `about`.
    pub headline: String,
    /// Identity string printed by `whoami`.
    pub whoami: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
    /// Second line of the simulated `resume` download.
    pub resume_note: String,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Alex Example".to_string(),
            headline: "Alex Example - Software Engineer".to_string(),
            whoami: "guest".to_string(),
            email: "alex@example.com".to_string(),
            linkedin: "linkedin.com/in/alex-example".to_string(),
            github: "github.com/alex-example".to_string(),
            resume_note: "In a real implementation, this would trigger a download of a PDF resume."
                .to_string(),
            projects: vec![Project {
                name: "termfolio".to_string(),
                tech: "Rust, crossterm".to_string(),
                description: "A portfolio presented as a simulated terminal.".to_string(),
            }],
            experience: vec![Experience {
                role: "Software Engineer".to_string(),
                company: "Example Corp".to_string(),
                period: "2020 - Present".to_string(),
                description: "Builds and operates developer tooling.".to_string(),
            }],
        }
    }
}

/// A project listed by `projects`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub tech: String,
    #[serde(default)]
    pub description: String,
}

/// A work-experience record listed by `experience`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Experience {
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
}

/// Settings for the animated background layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub enabled: bool,
    /// Show hidden messages (dimmed) from the start instead of waiting for the
    /// pointer to uncover them.
    pub reveal_hidden: bool,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            reveal_hidden: false,
        }
    }
}
