//! Route table file watcher for hot reload.
//!
//! Editors usually emit several modify events per save, so the watcher only
//! forwards a table whose file contents actually changed, and logs how the
//! route set moved.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::{RouteConfig, RouterConfig};

/// How a reloaded route table differs from the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteTableChange {
    pub added: usize,
    pub removed: usize,
}

impl RouteTableChange {
    fn between(previous: &[RouteConfig], current: &[RouteConfig]) -> Self {
        Self {
            added: current.iter().filter(|r| !previous.contains(r)).count(),
            removed: previous.iter().filter(|r| !current.contains(r)).count(),
        }
    }
}

/// Remembers the last file contents seen and the last table forwarded.
#[derive(Debug, Default)]
pub struct ReloadTracker {
    contents: Option<String>,
    routes: Vec<RouteConfig>,
}

impl ReloadTracker {
    /// Start from whatever the file holds right now.
    pub fn seed(path: &Path) -> Self {
        let contents = fs::read_to_string(path).ok();
        let routes = contents
            .as_deref()
            .and_then(|c| parse_config(c).ok())
            .map(|config| config.routes)
            .unwrap_or_default();
        Self { contents, routes }
    }

    /// Re-read `path`.
    ///
    /// Returns the new configuration only when the contents changed and the
    /// table is valid. Rejected contents are remembered too, so repeated
    /// events for the same broken file are reported once.
    pub fn reload(&mut self, path: &Path) -> Option<(RouterConfig, RouteTableChange)> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!(path = ?path, error = %e, "Failed to read route table");
                return None;
            }
        };

        if self.contents.as_deref() == Some(contents.as_str()) {
            tracing::debug!(path = ?path, "Route table unchanged, skipping reload");
            return None;
        }

        let parsed = parse_config(&contents);
        self.contents = Some(contents);

        match parsed {
            Ok(config) => {
                let change = RouteTableChange::between(&self.routes, &config.routes);
                tracing::info!(
                    routes = config.routes.len(),
                    added = change.added,
                    removed = change.removed,
                    "Route table reloaded"
                );
                self.routes = config.routes.clone();
                Some((config, change))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to reload route table, keeping current one");
                None
            }
        }
    }
}

/// Watches the route table file and emits re-validated configurations.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RouterConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`.
    ///
    /// Returns the watcher and the receiver new configurations arrive on.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouterConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned handle must be kept alive.
    ///
    /// The receiver only ever sees valid route tables that differ from the
    /// one loaded before.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();
        let mut tracker = ReloadTracker::seed(&path);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    if let Some((config, _)) = tracker.reload(&path) {
                        if tx.send(config).is_err() {
                            tracing::debug!("Reload receiver dropped");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?self.path, "Route table watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ROUTE: &str = r#"
        [[routes]]
        kind = "composite"
        pattern = "app://h/webview"
        target = "Web"
    "#;

    const TWO_ROUTES: &str = r#"
        [[routes]]
        kind = "composite"
        pattern = "app://h/webview"
        target = "Web"

        [[routes]]
        kind = "action"
        pattern = "app://h/files/i:{fileId}"
        target = "Download"
    "#;

    fn temp_table(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("uri_router_watch_{}_{}.toml", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_unchanged_contents_are_skipped() {
        let path = temp_table("unchanged", ONE_ROUTE);
        let mut tracker = ReloadTracker::seed(&path);

        assert!(tracker.reload(&path).is_none());
        assert!(tracker.reload(&path).is_none());

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_reload_reports_route_changes() {
        let path = temp_table("changes", ONE_ROUTE);
        let mut tracker = ReloadTracker::seed(&path);

        fs::write(&path, TWO_ROUTES).unwrap();
        let (config, change) = tracker.reload(&path).unwrap();
        assert_eq!(config.routes.len(), 2);
        assert_eq!(change, RouteTableChange { added: 1, removed: 0 });

        // Same save reported twice by the OS.
        assert!(tracker.reload(&path).is_none());

        fs::write(&path, ONE_ROUTE).unwrap();
        let (_, change) = tracker.reload(&path).unwrap();
        assert_eq!(change, RouteTableChange { added: 0, removed: 1 });

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_invalid_table_is_not_forwarded() {
        let path = temp_table("invalid", ONE_ROUTE);
        let mut tracker = ReloadTracker::seed(&path);

        fs::write(&path, "[[routes]]\nkind = \"direct\"\npattern = \"app://h/i:{id\"\ntarget = \"X\"\n").unwrap();
        assert!(tracker.reload(&path).is_none());
        assert!(tracker.reload(&path).is_none());

        fs::write(&path, TWO_ROUTES).unwrap();
        let (_, change) = tracker.reload(&path).unwrap();
        assert_eq!(change, RouteTableChange { added: 1, removed: 0 });

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_missing_file_seeds_empty() {
        let path = std::env::temp_dir().join(format!("uri_router_watch_missing_{}.toml", std::process::id()));
        let mut tracker = ReloadTracker::seed(&path);
        assert!(tracker.reload(&path).is_none());
    }
}
