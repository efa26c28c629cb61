use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::nm::AccessPoint;
use crate::plugin::{CurrentBssid, Response};

/// A response ready to be printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub to_stderr: bool,
    pub success: bool,
}

impl Rendered {
    pub fn print(&self) {
        if self.to_stderr {
            eprintln!("{}", self.text);
        } else {
            println!("{}", self.text);
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.success { 0 } else { 1 }
    }
}

/// JSON prints the envelope as is; text prints `render(payload)` or the error
pub fn render_response<T: Serialize>(
    response: &Response<T>,
    format: OutputFormat,
    render: impl FnOnce(&T) -> String,
) -> Result<Rendered> {
    let success = response.is_success();
    let rendered = match format {
        OutputFormat::Json => Rendered {
            text: serde_json::to_string_pretty(response)
                .context("Failed to serialize response")?,
            to_stderr: false,
            success,
        },
        OutputFormat::Text => match response {
            Response::Success(payload) => Rendered {
                text: render(payload),
                to_stderr: false,
                success,
            },
            Response::Failure(message) => Rendered {
                text: error_text(message),
                to_stderr: true,
                success,
            },
        },
    };
    Ok(rendered)
}

// nmcli already prefixes most of its messages
fn error_text(message: &str) -> String {
    let message = message.strip_prefix("Error: ").unwrap_or(message);
    format!("Error: {}", message)
}

/// Strongest first, one access point per line
pub fn render_access_points(access_points: &[AccessPoint]) -> String {
    let mut sorted = access_points.to_vec();
    sorted.sort_by(|a, b| b.signal.cmp(&a.signal));

    sorted
        .iter()
        .map(|ap| format!("{}  {:>3}%  {}", ap.bssid, ap.signal, ap.quality()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_current(current: &CurrentBssid) -> String {
    current
        .bssid
        .clone()
        .unwrap_or_else(|| "automatic".to_string())
}

pub fn render_applied(bssid: Option<&str>) -> String {
    match bssid {
        Some(bssid) => format!("Pinned to {}", bssid),
        None => "Pin removed, roaming enabled".to_string(),
    }
}
