//! Run a child process with captured output and a wall-clock limit.
//!
//! Shared by captured shell commands and the tool-backed probes. The call
//! blocks the caller until the child exits or the deadline passes. Pipes
//! are drained on short-lived reader threads so a chatty child cannot
//! fill a pipe and stall.
//!
//! The deadline also covers the pipes: a backgrounded grandchild that keeps
//! stdout open counts against the same limit as the child itself.

use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug)]
pub enum Finished {
    Exited(Captured),
    TimedOut,
}

/// Spawn `cmd`, wait at most `timeout`, and collect stdout/stderr.
///
/// On timeout the child's whole process group is killed and the child is
/// reaped; output gathered so far is discarded.
pub fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> io::Result<Finished> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let mut child = cmd.spawn()?;
    let (tx, rx) = mpsc::channel();
    let mut pending = 0;
    if let Some(pipe) = child.stdout.take() {
        drain(pipe, Stream::Stdout, tx.clone());
        pending += 1;
    }
    if let Some(pipe) = child.stderr.take() {
        drain(pipe, Stream::Stderr, tx.clone());
        pending += 1;
    }
    drop(tx);
    let deadline = Instant::now() + timeout;

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            kill_group(child.id());
            let _ = child.kill();
            let _ = child.wait();
            return Ok(Finished::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    };

    let mut stdout = String::new();
    let mut stderr = String::new();
    while pending > 0 {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok((Stream::Stdout, text)) => stdout = text,
            Ok((Stream::Stderr, text)) => stderr = text,
            Err(RecvTimeoutError::Timeout) => {
                // The child is gone but something it started still holds a pipe.
                kill_group(child.id());
                return Ok(Finished::TimedOut);
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
        pending -= 1;
    }

    Ok(Finished::Exited(Captured {
        status,
        stdout,
        stderr,
    }))
}

/// Convenience for probes: stdout of a successful run, or `None`.
pub fn stdout_of(cmd: &mut Command, timeout: Duration) -> Option<String> {
    match run_with_timeout(cmd, timeout) {
        Ok(Finished::Exited(captured)) if captured.status.success() => Some(captured.stdout),
        Ok(Finished::Exited(_)) | Ok(Finished::TimedOut) => None,
        Err(err) => {
            tracing::debug!(?cmd, %err, "tool unavailable");
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

fn drain<R: Read + Send + 'static>(mut pipe: R, stream: Stream, tx: Sender<(Stream, String)>) {
    thread::spawn(move || {
        let mut bytes = Vec::new();
        let _ = pipe.read_to_end(&mut bytes);
        // The receiver is gone once the caller gave up on the deadline.
        let _ = tx.send((stream, String::from_utf8_lossy(&bytes).into_owned()));
    });
}

#[cfg(unix)]
fn kill_group(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;
    let _ = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL);
}

#[cfg(not(unix))]
fn kill_group(_pid: u32) {}

#[cfg(all(test, unix))]
mod tests {
    use super::{run_with_timeout, stdout_of, Finished};
    use std::process::Command;
    use std::time::{Duration, Instant};

    #[test]
    fn captures_both_streams() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo out; echo err >&2; exit 3"]);
        let Finished::Exited(captured) =
            run_with_timeout(&mut cmd, Duration::from_secs(5)).expect("spawn sh")
        else {
            panic!("unexpected timeout");
        };
        assert_eq!(captured.stdout, "out\n");
        assert_eq!(captured.stderr, "err\n");
        assert_eq!(captured.status.code(), Some(3));
    }

    #[test]
    fn kills_child_after_deadline() {
        let started = Instant::now();
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "sleep 5; echo late"]);
        let result = run_with_timeout(&mut cmd, Duration::from_millis(200)).expect("spawn sh");
        assert!(matches!(result, Finished::TimedOut));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn background_grandchild_cannot_outlive_deadline() {
        let started = Instant::now();
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "sleep 6 & echo hi"]);
        let result = run_with_timeout(&mut cmd, Duration::from_millis(500)).expect("spawn sh");
        assert!(matches!(result, Finished::TimedOut));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn stdout_of_hides_failures() {
        let mut missing = Command::new("definitely-not-a-real-tool-spectre");
        assert_eq!(stdout_of(&mut missing, Duration::from_secs(1)), None);
        let mut failing = Command::new("sh");
        failing.args(["-c", "echo nope; exit 1"]);
        assert_eq!(stdout_of(&mut failing, Duration::from_secs(5)), None);
    }
}
