//! Running external tools.

use std::io::{ErrorKind, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{ManuscriptError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A single captured invocation of an external tool.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    /// Tool name used in error messages
    pub tool: String,
    pub binary: String,
    pub args: Vec<String>,
    /// Text fed to the tool's stdin
    pub stdin: Option<String>,
    pub timeout: Option<Duration>,
}

impl ToolInvocation {
    pub fn new(tool: impl Into<String>, binary: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            binary: binary.into(),
            args: Vec::new(),
            stdin: None,
            timeout: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Captured result of a finished tool.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

fn spawn_error(tool: &str, binary: &str, e: std::io::Error) -> ManuscriptError {
    let reason = if e.kind() == ErrorKind::NotFound {
        format!("'{}' not found on PATH", binary)
    } else {
        format!("failed to execute '{}': {}", binary, e)
    };
    ManuscriptError::ToolUnavailable {
        tool: tool.to_string(),
        reason,
    }
}

fn drain<R: Read + Send + 'static>(reader: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut r) = reader {
            let _ = r.read_to_end(&mut buf);
        }
        buf
    })
}

fn to_text(tool: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| ManuscriptError::InvalidOutput {
        tool: tool.to_string(),
        detail: e.to_string(),
    })
}

/// Run a tool to completion, capturing stdout and stderr.
///
/// A non-zero exit is returned as `ToolFailed`.
pub fn run_tool(invocation: &ToolInvocation) -> Result<ToolOutput> {
    let output = run_tool_unchecked(invocation)?;
    if !output.status.success() {
        return Err(ManuscriptError::tool_failed(
            &invocation.tool,
            output.status,
            &output.stderr,
        ));
    }
    Ok(output)
}

/// Like [`run_tool`] but leaves exit status interpretation to the caller.
pub fn run_tool_unchecked(invocation: &ToolInvocation) -> Result<ToolOutput> {
    let tool = invocation.tool.as_str();
    debug!(tool, binary = %invocation.binary, args = ?invocation.args, "spawning tool");

    let mut child = Command::new(&invocation.binary)
        .args(&invocation.args)
        .stdin(if invocation.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(tool, &invocation.binary, e))?;

    // stdin is fed on its own thread while stdout/stderr drain.
    let writer = match (child.stdin.take(), invocation.stdin.clone()) {
        (Some(mut pipe), Some(input)) => Some(thread::spawn(move || {
            let result = pipe.write_all(input.as_bytes());
            drop(pipe);
            result
        })),
        _ => None,
    };
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match invocation.timeout {
        None => child.wait()?,
        Some(timeout) => {
            let deadline = Instant::now() + timeout;
            loop {
                if let Some(status) = child.try_wait()? {
                    break status;
                }
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ManuscriptError::Timeout {
                        tool: tool.to_string(),
                        secs: timeout.as_secs(),
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    };

    if let Some(writer) = writer {
        // Tools may exit without reading all of stdin.
        if let Ok(Err(e)) = writer.join() {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(ManuscriptError::Io(e));
            }
        }
    }

    let stdout = stdout.join().unwrap_or_default();
    let stderr = String::from_utf8_lossy(&stderr.join().unwrap_or_default()).to_string();

    debug!(tool, status = ?status.code(), stdout_bytes = stdout.len(), "tool finished");

    Ok(ToolOutput {
        status,
        stdout: to_text(tool, stdout)?,
        stderr,
    })
}

/// Run a tool attached to the user's terminal and wait for it.
pub fn run_interactive(tool: &str, binary: &str, args: &[String]) -> Result<()> {
    debug!(tool, binary, ?args, "starting interactive tool");
    let status = Command::new(binary)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(tool, binary, e))?;

    if !status.success() {
        return Err(ManuscriptError::tool_failed(tool, status, ""));
    }
    Ok(())
}

/// First line of `<binary> <flag>`, used to report tool versions.
pub fn probe_version(tool: &str, binary: &str, flag: &str) -> Result<String> {
    let invocation = ToolInvocation::new(tool, binary)
        .args([flag])
        .timeout(Some(Duration::from_secs(10)));
    let output = run_tool_unchecked(&invocation)?;
    // hunspell prints its banner on stdout, some builds on stderr
    let text = if output.stdout.trim().is_empty() {
        output.stderr
    } else {
        output.stdout
    };
    Ok(text.lines().next().unwrap_or_default().trim().to_string())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_tool_pipes_stdin_to_stdout() {
        let inv = ToolInvocation::new("cat", "cat").stdin("hello\nworld\n");
        let out = run_tool(&inv).unwrap();
        assert_eq!(out.stdout, "hello\nworld\n");
    }

    #[test]
    fn test_run_tool_large_input_does_not_deadlock() {
        let input = "x".repeat(1024 * 1024);
        let inv = ToolInvocation::new("cat", "cat").stdin(input.clone());
        let out = run_tool(&inv).unwrap();
        assert_eq!(out.stdout.len(), input.len());
    }

    #[test]
    fn test_run_tool_nonzero_exit() {
        let inv = ToolInvocation::new("sh", "sh").args(["-c", "echo broken >&2; exit 3"]);
        let err = run_tool(&inv).unwrap_err();
        match err {
            ManuscriptError::ToolFailed { tool, status, stderr } => {
                assert_eq!(tool, "sh");
                assert_eq!(status, "status 3");
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_tool_missing_binary() {
        let inv = ToolInvocation::new("pandoc", "definitely-not-a-real-binary-xyz");
        let err = run_tool(&inv).unwrap_err();
        assert!(matches!(err, ManuscriptError::ToolUnavailable { .. }));
        assert!(err.to_string().contains("not found on PATH"));
    }

    #[test]
    fn test_run_tool_timeout() {
        let inv = ToolInvocation::new("sleep", "sleep")
            .args(["5"])
            .timeout(Some(Duration::from_millis(200)));
        let err = run_tool(&inv).unwrap_err();
        assert!(matches!(err, ManuscriptError::Timeout { .. }));
    }

    #[test]
    fn test_unchecked_keeps_status() {
        let inv = ToolInvocation::new("sh", "sh").args(["-c", "echo out; exit 1"]);
        let out = run_tool_unchecked(&inv).unwrap();
        assert!(!out.status.success());
        assert_eq!(out.stdout, "out\n");
    }
}
