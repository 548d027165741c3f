//! Usage: Open the widget source in the platform's plain-text editor ("Change Tickers").

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditorCommand {
    pub program: &'static str,
    pub args: Vec<OsString>,
}

/// `os` takes the values of `std::env::consts::OS`.
pub(crate) fn editor_command(os: &str, path: &Path) -> EditorCommand {
    let file = path.as_os_str().to_os_string();
    match os {
        "windows" => EditorCommand {
            program: "notepad.exe",
            args: vec![file],
        },
        "macos" => EditorCommand {
            program: "open",
            args: vec![OsString::from("-e"), file],
        },
        _ => EditorCommand {
            program: "xdg-open",
            args: vec![file],
        },
    }
}

/// Spawns the editor and returns immediately; failures are only logged.
pub(crate) fn open_in_text_editor(path: &Path) {
    let command = editor_command(std::env::consts::OS, path);
    let mut child = match Command::new(command.program).args(&command.args).spawn() {
        Ok(child) => child,
        Err(err) => {
            tracing::warn!(
                program = command.program,
                path = %path.display(),
                "failed to launch text editor: {}",
                err
            );
            return;
        }
    };

    // Reap the child so it does not linger as a zombie; report a failing exit like a launch error.
    std::thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => {
            tracing::warn!(program = command.program, %status, "text editor exited with failure");
        }
        Ok(_) => {}
        Err(err) => {
            tracing::warn!(program = command.program, "failed to wait for text editor: {}", err);
        }
    });
}
