use crate::runner::CommandRunner;
use std::time::Duration;
use tracing::debug;

const SENSORS_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn collect<R: CommandRunner>(runner: &R) -> Option<i32> {
    let output = match runner.run("sensors", &[], SENSORS_TIMEOUT).await {
        Ok(output) => output,
        Err(err) => {
            debug!(error = %err, "sensors unavailable");
            return None;
        }
    };
    if !output.success {
        debug!("sensors exited with an error");
        return None;
    }

    parse_sensors(&output.stdout)
}

// The temp1 channel is authoritative: if a temp1 line exists but does not
// parse, the reading is unavailable and the fallback scan is not attempted.
pub fn parse_sensors(text: &str) -> Option<i32> {
    if let Some(line) = text.lines().find(|line| line.contains("temp1")) {
        let token = line.split_whitespace().nth(1)?;
        return parse_celsius_token(token);
    }

    for line in text.lines() {
        if line.contains("°C") && (line.contains("Core") || line.contains("temp")) {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let token = if tokens.len() > 1 {
                tokens[1]
            } else {
                *tokens.first()?
            };
            return parse_celsius_token(token);
        }
    }

    None
}

// "+45.7°C" -> 45. Truncates toward zero, never rounds.
fn parse_celsius_token(token: &str) -> Option<i32> {
    let cleaned = token.replace('+', "").replace("°C", "");
    let value: f64 = cleaned.parse().ok()?;
    Some(value as i32)
}
