//! Launch Dispatcher
//!
//! Classifies a path string and hands it to the matching OS facility. The OS
//! side sits behind [`SystemShell`] so batches can be driven without starting
//! anything real.

use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::slots::Slot;
use crate::{LauncherError, Result};

/// How long to wait after handing a `steam://` link to the OS so the Steam
/// client can take over before the next row starts
pub const DEFAULT_STEAM_HANDOFF: Duration = Duration::from_secs(3);

/// What a path string turned out to be. First match wins, in declaration
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchTarget {
    /// `steam://...`
    Steam,
    /// `http://...` or `https://...`
    Web,
    /// Existing regular file
    File,
    /// Existing directory
    Directory,
    /// Anything else, opened anyway
    Other,
}

impl LaunchTarget {
    pub fn classify(path: &str) -> Self {
        if path.starts_with("steam://") {
            LaunchTarget::Steam
        } else if path.starts_with("http://") || path.starts_with("https://") {
            LaunchTarget::Web
        } else {
            let p = Path::new(path);
            if p.is_file() {
                LaunchTarget::File
            } else if p.is_dir() {
                LaunchTarget::Directory
            } else {
                LaunchTarget::Other
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LaunchTarget::Steam => "steam",
            LaunchTarget::Web => "url",
            LaunchTarget::File => "file",
            LaunchTarget::Directory => "directory",
            LaunchTarget::Other => "other",
        }
    }
}

/// OS integration used by the dispatcher
pub trait SystemShell {
    /// Hand a URI to the default scheme handler
    fn open_uri(&self, uri: &str) -> io::Result<()>;

    /// Default "open" action for a file system path
    fn open_path(&self, path: &Path) -> io::Result<()>;

    /// Start a file as a new process in `working_dir`
    fn start_file(&self, path: &Path, working_dir: Option<&Path>) -> io::Result<()>;
}

/// Dispatcher tuning
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub steam_handoff: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            steam_handoff: DEFAULT_STEAM_HANDOFF,
        }
    }
}

/// A row that failed to launch
#[derive(Debug)]
pub struct LaunchFailure {
    pub index: usize,
    pub error: LauncherError,
}

impl LaunchFailure {
    /// Path that failed, as typed by the user
    pub fn path(&self) -> &str {
        match &self.error {
            LauncherError::Launch { path, .. } => path,
            _ => "",
        }
    }

    /// Underlying OS message
    pub fn message(&self) -> String {
        match &self.error {
            LauncherError::Launch { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}

/// Outcome of one "Launch Selected" batch
#[derive(Debug, Default)]
pub struct LaunchReport {
    /// Checked rows with a non-blank path
    pub attempted: usize,
    /// Indices handed to the OS successfully, in launch order
    pub launched: Vec<usize>,
    pub failures: Vec<LaunchFailure>,
}

/// Launch a single path. Blank paths must be filtered by the caller.
pub fn launch<S: SystemShell + ?Sized>(
    shell: &S,
    path: &str,
    options: &LaunchOptions,
) -> Result<LaunchTarget> {
    let target = LaunchTarget::classify(path);
    debug!("Launching {} as {}", path, target.label());

    let outcome = match target {
        LaunchTarget::Steam => shell.open_uri(path).map(|()| {
            // Give the Steam client time to pick the link up
            thread::sleep(options.steam_handoff);
        }),
        LaunchTarget::Web => shell.open_uri(path),
        LaunchTarget::File => {
            let file = Path::new(path);
            let working_dir = file.parent().filter(|d| !d.as_os_str().is_empty());
            shell.start_file(file, working_dir)
        }
        LaunchTarget::Directory | LaunchTarget::Other => shell.open_path(Path::new(path)),
    };

    outcome
        .map(|()| target)
        .map_err(|e| LauncherError::launch(path, e))
}

/// Launch every checked row in index order. Each failure is passed to
/// `on_failure` as it happens and never stops the batch.
pub fn launch_checked<S: SystemShell + ?Sized>(
    slots: &[Slot],
    shell: &S,
    options: &LaunchOptions,
    mut on_failure: impl FnMut(&LaunchFailure),
) -> LaunchReport {
    let mut report = LaunchReport::default();

    for (index, slot) in slots.iter().enumerate() {
        if !slot.checked {
            continue;
        }
        let path = slot.path.trim();
        if path.is_empty() {
            continue;
        }

        report.attempted += 1;
        match launch(shell, path, options) {
            Ok(target) => {
                info!("Launched slot {} ({}): {}", index, target.label(), path);
                report.launched.push(index);
            }
            Err(error) => {
                warn!("Slot {}: {}", index, error);
                let failure = LaunchFailure { index, error };
                on_failure(&failure);
                report.failures.push(failure);
            }
        }
    }

    report
}

/// The real OS: `open` for URIs and paths, direct process creation for files
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeShell;

impl SystemShell for NativeShell {
    fn open_uri(&self, uri: &str) -> io::Result<()> {
        open::that(uri)
    }

    fn open_path(&self, path: &Path) -> io::Result<()> {
        open::that(path)
    }

    #[cfg(windows)]
    fn start_file(&self, path: &Path, working_dir: Option<&Path>) -> io::Result<()> {
        shell_execute_open(path, working_dir)
    }

    #[cfg(not(windows))]
    fn start_file(&self, path: &Path, working_dir: Option<&Path>) -> io::Result<()> {
        // Documents and other non-executables go to their associated app,
        // the same thing the Windows shell does for them
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(path)?.permissions().mode();
            if mode & 0o111 == 0 {
                return open::that(path);
            }
        }

        let mut command = std::process::Command::new(path);
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }
        command.spawn().map(|_child| ())
    }
}

/// `ShellExecuteExW` with the "open" verb. Follows `.lnk` shortcuts and file
/// associations without going through a command interpreter.
#[cfg(windows)]
fn shell_execute_open(path: &Path, working_dir: Option<&Path>) -> io::Result<()> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::Shell::{
        ShellExecuteExW, SEE_MASK_FLAG_NO_UI, SEE_MASK_NOASYNC, SHELLEXECUTEINFOW,
    };
    use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

    fn wide(s: &OsStr) -> Vec<u16> {
        s.encode_wide().chain(std::iter::once(0)).collect()
    }

    let verb = wide(OsStr::new("open"));
    let file = wide(path.as_os_str());
    let directory = working_dir.map(|d| wide(d.as_os_str()));

    let mut sei = SHELLEXECUTEINFOW {
        cbSize: std::mem::size_of::<SHELLEXECUTEINFOW>() as u32,
        fMask: SEE_MASK_NOASYNC | SEE_MASK_FLAG_NO_UI,
        hwnd: HWND::default(),
        lpVerb: PCWSTR(verb.as_ptr()),
        lpFile: PCWSTR(file.as_ptr()),
        lpParameters: PCWSTR::null(),
        lpDirectory: directory
            .as_ref()
            .map_or(PCWSTR::null(), |d| PCWSTR(d.as_ptr())),
        nShow: SW_SHOWNORMAL.0,
        ..Default::default()
    };

    unsafe { ShellExecuteExW(&mut sei) }.map_err(|e| io::Error::other(e.to_string()))
}
