//! File-watch rebuild loop with debounce.
//!
//! Watches a directory for content changes on matching files and invokes an
//! external build command, debounced so rapid-fire editor events do not
//! trigger a rebuild storm. The loop has three effective states: idle,
//! building, and cooldown. A change event passing the debounce gate runs
//! the build synchronously; events arriving while the build runs or during
//! cooldown are logged and skipped, and the first event after cooldown
//! expiry triggers the next build.
//!
//! Event delivery happens on the notify backend's thread, so the debounce
//! decision is a mutex-guarded timestamp check-and-set. The lock is held
//! across the build itself, which is what coalesces overlapping deliveries
//! instead of queueing them.

use crate::error::{DocsweepError, DocsweepResult};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Default debounce interval between accepted builds.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(2);

/// Options for the watch loop.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Directory to watch recursively.
    pub dir: PathBuf,
    /// Build script invoked on change.
    pub build_script: PathBuf,
    /// Minimum time between the start of one build and acceptance of the next.
    pub debounce: Duration,
    /// Extensions (without dot) that trigger a rebuild.
    pub extensions: Vec<String>,
}

impl WatchOptions {
    pub fn new(dir: impl Into<PathBuf>, build_script: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            build_script: build_script.into(),
            debounce: DEFAULT_DEBOUNCE,
            extensions: vec!["md".to_string()],
        }
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}

/// Debounced build trigger shared with the event-delivery thread.
pub struct RebuildHandler {
    build_script: PathBuf,
    debounce: Duration,
    extensions: Vec<String>,
    last_run: Mutex<Option<Instant>>,
}

impl RebuildHandler {
    pub fn new(options: &WatchOptions) -> Self {
        Self {
            build_script: options.build_script.clone(),
            debounce: options.debounce,
            extensions: options.extensions.clone(),
            last_run: Mutex::new(None),
        }
    }

    /// React to one filesystem notification.
    ///
    /// Only create and modify events on files with a matching extension are
    /// considered; everything else (directories, removals, metadata-only
    /// events) is ignored.
    pub fn handle_event(&self, event: &Event) {
        if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
            return;
        }
        let Some(path) = event.paths.iter().find(|p| self.matches(p)) else {
            return;
        };
        tracing::info!(path = %path.display(), kind = ?event.kind, "change detected");
        self.debounced_build();
    }

    fn matches(&self, path: &Path) -> bool {
        // a directory can carry a matching name, e.g. notes.md/
        if path.is_dir() {
            return false;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Run the build if the debounce interval has elapsed since the start
    /// of the previous accepted build.
    ///
    /// The timestamp is set before the build starts and the lock is held
    /// until it finishes, so two near-simultaneous deliveries cannot both
    /// pass the gate.
    pub fn debounced_build(&self) {
        let mut last = self
            .last_run
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let expired = match *last {
            Some(started) => now.duration_since(started) > self.debounce,
            None => true,
        };
        if expired {
            *last = Some(now);
            self.run_build();
        } else {
            tracing::info!("change detected, but build skipped due to debounce interval");
        }
    }

    /// Invoke the build script synchronously, capturing its output.
    ///
    /// The exit status is the only signal consulted; neither a nonzero exit
    /// nor an invocation failure stops the loop.
    fn run_build(&self) {
        tracing::info!(script = %self.build_script.display(), "running build");
        let cwd = self
            .build_script
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        match Command::new("bash")
            .arg(&self.build_script)
            .current_dir(cwd)
            .output()
        {
            Ok(output) if output.status.success() => {
                tracing::info!("build completed successfully");
            }
            Ok(output) => {
                tracing::warn!(
                    code = ?output.status.code(),
                    stderr = %String::from_utf8_lossy(&output.stderr),
                    "build failed"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to invoke build script");
            }
        }
    }
}

/// Run the watch loop until `stop` is set.
///
/// Events are delivered by the notify backend on its own thread; this
/// function blocks the caller, polling the stop flag. On shutdown the
/// watcher is dropped, which stops the event source; a build already in
/// flight finishes naturally on the delivery thread.
pub fn watch(options: WatchOptions, stop: &AtomicBool) -> DocsweepResult<()> {
    let handler = Arc::new(RebuildHandler::new(&options));

    let event_handler = {
        let handler = Arc::clone(&handler);
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => handler.handle_event(&event),
            Err(e) => tracing::warn!(error = %e, "watch event error"),
        }
    };

    let mut watcher = notify::recommended_watcher(event_handler)
        .map_err(|e| DocsweepError::watch(format!("failed to create watcher: {e}")))?;
    watcher
        .watch(&options.dir, RecursiveMode::Recursive)
        .map_err(|e| {
            DocsweepError::watch(format!("failed to watch {}: {e}", options.dir.display()))
        })?;

    tracing::info!(
        dir = %options.dir.display(),
        extensions = ?options.extensions,
        "watching for changes"
    );

    while !stop.load(Ordering::Relaxed) {
        std::thread::sleep(Duration::from_millis(100));
    }

    tracing::info!("stopping watcher");
    drop(watcher);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "docsweep_watch_{}_{}",
            tag,
            std::process::id()
        ));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn counting_handler(dir: &Path, debounce: Duration) -> RebuildHandler {
        let script = dir.join("make.sh");
        fs::write(&script, "echo run >> build.log\n").unwrap();
        RebuildHandler::new(&WatchOptions::new(dir, &script).debounce(debounce))
    }

    fn build_count(dir: &Path) -> usize {
        fs::read_to_string(dir.join("build.log"))
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }

    #[test]
    fn test_rapid_events_coalesce_into_one_build() {
        let dir = temp_dir("coalesce");
        let handler = counting_handler(&dir, Duration::from_millis(500));

        handler.debounced_build();
        std::thread::sleep(Duration::from_millis(50));
        handler.debounced_build();

        assert_eq!(build_count(&dir), 1);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_event_after_cooldown_triggers_second_build() {
        let dir = temp_dir("cooldown");
        let handler = counting_handler(&dir, Duration::from_millis(200));

        handler.debounced_build();
        std::thread::sleep(Duration::from_millis(100));
        handler.debounced_build(); // inside cooldown, skipped
        std::thread::sleep(Duration::from_millis(200));
        handler.debounced_build(); // past cooldown, builds

        assert_eq!(build_count(&dir), 2);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_build_failure_does_not_panic() {
        let dir = temp_dir("failure");
        let script = dir.join("make.sh");
        fs::write(&script, "exit 3\n").unwrap();
        let handler =
            RebuildHandler::new(&WatchOptions::new(&dir, &script).debounce(Duration::ZERO));

        handler.debounced_build();
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_extension_filter() {
        let dir = temp_dir("filter");
        let handler = counting_handler(&dir, Duration::from_millis(500));

        assert!(handler.matches(Path::new("draft/notes.md")));
        assert!(!handler.matches(Path::new("draft/main.tex")));
        assert!(!handler.matches(Path::new("draft/subdir")));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_directory_with_matching_name_does_not_trigger() {
        let dir = temp_dir("dirname");
        let handler = counting_handler(&dir, Duration::from_millis(500));

        let fake = dir.join("notes.md");
        fs::create_dir_all(&fake).unwrap();
        assert!(!handler.matches(&fake));

        let real = dir.join("real.md");
        fs::write(&real, "# notes\n").unwrap();
        assert!(handler.matches(&real));

        fs::remove_dir_all(&dir).ok();
    }
}
