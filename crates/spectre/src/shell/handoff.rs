//! Display surface handoff for interactive children.
//!
//! While an interactive program runs it owns the real terminal: raw mode,
//! the alternate screen and mouse capture are released before the spawn
//! and restored afterwards. Restoration lives in `Drop` on [`Suspended`],
//! so it happens on every exit path, including a failed release and a
//! failed spawn.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use nix::sys::signal::{signal, SigHandler, Signal};

use super::ShellError;

/// Whatever the dashboard draws on. Released for the lifetime of an
/// interactive child and reacquired once it exits.
pub trait DisplaySurface {
    fn release(&mut self) -> io::Result<()>;
    fn reacquire(&mut self) -> io::Result<()>;
}

/// Scoped release of a display surface.
pub struct Suspended<'a> {
    surface: &'a mut dyn DisplaySurface,
}

impl<'a> Suspended<'a> {
    pub fn new(surface: &'a mut dyn DisplaySurface) -> Self {
        if let Err(err) = surface.release() {
            // Partially released is still released; Drop restores everything.
            tracing::warn!(%err, "failed to release display surface");
        }
        Self { surface }
    }
}

impl Drop for Suspended<'_> {
    fn drop(&mut self) {
        match self.surface.reacquire() {
            Ok(()) => tracing::debug!("display surface reacquired"),
            Err(err) => tracing::error!(%err, "failed to reacquire display surface"),
        }
    }
}

/// Ignores SIGINT in this process until dropped, so Ctrl+C typed at the
/// child does not also kill the dashboard.
struct IgnoreInterrupt {
    previous: Option<SigHandler>,
}

impl IgnoreInterrupt {
    fn install() -> Self {
        // SAFETY: SigIgn installs no Rust handler; nothing runs in signal context.
        let previous = unsafe { signal(Signal::SIGINT, SigHandler::SigIgn) };
        if let Err(err) = &previous {
            tracing::warn!(%err, "could not ignore SIGINT during handoff");
        }
        Self {
            previous: previous.ok(),
        }
    }
}

impl Drop for IgnoreInterrupt {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            // SAFETY: restores the disposition returned by the install call.
            let restored = unsafe { signal(Signal::SIGINT, previous) };
            if let Err(err) = restored {
                tracing::warn!(%err, "could not restore SIGINT after handoff");
            }
        }
    }
}

/// Run `command` through `program -c` with inherited stdio in `cwd`,
/// handing the terminal over for the child's lifetime.
///
/// Any exit status counts as success. The surface is reacquired before
/// this returns, whatever happened.
pub fn run_interactive(
    surface: &mut dyn DisplaySurface,
    program: &str,
    command: &str,
    cwd: &Path,
) -> Result<ExitStatus, ShellError> {
    tracing::info!(command, cwd = %cwd.display(), "interactive handoff");
    let _suspended = Suspended::new(surface);
    let _interrupt = IgnoreInterrupt::install();

    let mut cmd = Command::new(program);
    cmd.arg("-c").arg(command).current_dir(cwd);
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // SAFETY: only async-signal-safe calls between fork and exec.
        unsafe {
            cmd.pre_exec(|| {
                signal(Signal::SIGINT, SigHandler::SigDfl)
                    .map(|_| ())
                    .map_err(io::Error::from)
            });
        }
    }

    let mut child = cmd.spawn().map_err(ShellError::Spawn)?;
    let status = child.wait().map_err(ShellError::Wait)?;
    tracing::info!(command, ?status, "interactive child exited");
    Ok(status)
}
