use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data) = data {
                response["data"] = data;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Split a `username:password` pair; the password may itself contain colons
pub fn parse_credentials(raw: &str) -> anyhow::Result<(&str, &str)> {
    match raw.split_once(':') {
        Some((username, password)) if !username.is_empty() && !password.is_empty() => Ok((username, password)),
        _ => anyhow::bail!("expected USERNAME:PASSWORD, got '{}'", raw),
    }
}
