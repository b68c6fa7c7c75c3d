use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::models::UserSummary;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

pub fn output_users(output_format: OutputFormat, users: &[UserSummary]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "users": users }))?);
        }
        OutputFormat::Text => {
            if users.is_empty() {
                println!("No users found");
                return Ok(());
            }
            println!("{:<6} {:<40} {}", "ID", "EMAIL", "ADMIN");
            for user in users {
                println!("{:<6} {:<40} {}", user.id, user.email, if user.is_admin { "yes" } else { "no" });
            }
        }
    }
    Ok(())
}
