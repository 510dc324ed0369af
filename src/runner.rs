use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time;

#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub success: bool,
    pub stdout: String,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("не удалось запустить {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} не завершился за {timeout_ms} мс")]
    Timeout { program: String, timeout_ms: u64 },
}

// Single-threaded runtime, no Send bound needed on the returned futures.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CmdOutput, RunError>;
}

pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CmdOutput, RunError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match time::timeout(timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(RunError::Launch {
                    program: program.to_string(),
                    source,
                })
            }
            Err(_elapsed) => {
                return Err(RunError::Timeout {
                    program: program.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
        };

        Ok(CmdOutput {
            success: output.status.success(),
            stdout: decode_stdout(&output.stdout),
        })
    }
}

fn decode_stdout(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(utf8) => utf8.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).to_string(),
    }
}
