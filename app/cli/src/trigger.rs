//! Scheduled trigger binding.
//!
//! A slideshow has no in-process loop: rotation is driven by an external
//! recurring trigger that re-invokes this binary. The [`TriggerBinding`]
//! trait models that facility as an opaque resource keyed by name, and
//! [`SystemdTriggerBinding`] realizes it with user-level systemd timer units.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use crate::error::WallshowError;

/// A registered recurring trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTrigger {
    /// The trigger's identifier (the unit name, without extension).
    pub name: String,
}

/// Registration interface for the external scheduler facility.
pub trait TriggerBinding {
    /// Creates or overwrites one recurring trigger under `name` that runs
    /// `command` every `interval_minutes`, first firing one full interval
    /// after installation.
    ///
    /// # Errors
    ///
    /// Returns an error if the trigger cannot be registered.
    fn install(
        &self,
        name: &str,
        command: &[String],
        interval_minutes: u32,
    ) -> Result<(), WallshowError>;

    /// Returns every registered trigger whose name starts with `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be enumerated.
    fn find_all(&self, pattern: &str) -> Result<Vec<ScheduledTrigger>, WallshowError>;

    /// Stops and deletes one trigger. Removing an absent trigger is not an
    /// error at this layer.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing trigger cannot be removed.
    fn remove(&self, trigger: &ScheduledTrigger) -> Result<(), WallshowError>;
}

/// Trigger binding backed by user-level systemd timer units.
///
/// Each trigger is a `<name>.service` / `<name>.timer` pair in the user unit
/// directory. The timer carries `Persistent=true`, the catch-up policy: a
/// tick missed while the host was off fires once on next availability rather
/// than being dropped.
pub struct SystemdTriggerBinding {
    unit_dir: PathBuf,
}

impl SystemdTriggerBinding {
    /// Creates a binding against the default user unit directory.
    #[must_use]
    pub fn new() -> Self { Self { unit_dir: crate::paths::systemd_user_unit_dir() } }

    /// Creates a binding against a custom unit directory.
    #[must_use]
    pub const fn with_unit_dir(unit_dir: PathBuf) -> Self { Self { unit_dir } }

    fn systemctl(args: &[&str]) -> Result<(), WallshowError> {
        let status = Command::new("systemctl")
            .arg("--user")
            .args(args)
            .status()
            .map_err(|err| WallshowError::Os(format!("failed to run systemctl: {err}")))?;
        if status.success() {
            Ok(())
        } else {
            Err(WallshowError::Os(format!(
                "systemctl --user {} exited with {status}",
                args.join(" ")
            )))
        }
    }
}

impl Default for SystemdTriggerBinding {
    fn default() -> Self { Self::new() }
}

impl TriggerBinding for SystemdTriggerBinding {
    fn install(
        &self,
        name: &str,
        command: &[String],
        interval_minutes: u32,
    ) -> Result<(), WallshowError> {
        fs::create_dir_all(&self.unit_dir)?;
        fs::write(
            self.unit_dir.join(format!("{name}.service")),
            render_service_unit(name, command),
        )?;
        fs::write(
            self.unit_dir.join(format!("{name}.timer")),
            render_timer_unit(name, interval_minutes),
        )?;

        Self::systemctl(&["daemon-reload"])?;
        Self::systemctl(&["enable", "--now", &format!("{name}.timer")])?;
        tracing::info!(name, interval_minutes, "scheduled trigger installed");
        Ok(())
    }

    fn find_all(&self, pattern: &str) -> Result<Vec<ScheduledTrigger>, WallshowError> {
        let Ok(entries) = fs::read_dir(&self.unit_dir) else {
            return Ok(Vec::new());
        };

        let mut triggers = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "timer")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && stem.starts_with(pattern)
            {
                triggers.push(ScheduledTrigger { name: stem.to_string() });
            }
        }
        triggers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(triggers)
    }

    fn remove(&self, trigger: &ScheduledTrigger) -> Result<(), WallshowError> {
        // The unit may already be gone or never have been enabled; stopping
        // is best-effort and only the file removal is authoritative.
        let _ = Self::systemctl(&["disable", "--now", &format!("{}.timer", trigger.name)]);

        for extension in ["timer", "service"] {
            let path = self.unit_dir.join(format!("{}.{extension}", trigger.name));
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        tracing::info!(name = %trigger.name, "scheduled trigger removed");
        Ok(())
    }
}

/// Renders the oneshot service unit executing the advance command.
fn render_service_unit(name: &str, command: &[String]) -> String {
    let exec_start =
        command.iter().map(|arg| quote_unit_arg(arg)).collect::<Vec<_>>().join(" ");
    format!(
        "[Unit]\n\
         Description=Wallshow slideshow tick ({name})\n\
         \n\
         [Service]\n\
         Type=oneshot\n\
         ExecStart={exec_start}\n"
    )
}

/// Renders the recurring timer unit.
///
/// `OnActiveSec` delays the first fire by one full interval (no immediate
/// re-trigger on installation) and `OnUnitActiveSec` repeats from there.
fn render_timer_unit(name: &str, interval_minutes: u32) -> String {
    format!(
        "[Unit]\n\
         Description=Wallshow slideshow schedule ({name})\n\
         \n\
         [Timer]\n\
         OnActiveSec={interval_minutes}min\n\
         OnUnitActiveSec={interval_minutes}min\n\
         Persistent=true\n\
         Unit={name}.service\n\
         \n\
         [Install]\n\
         WantedBy=timers.target\n"
    )
}

/// Quotes one `ExecStart` argument if it contains whitespace.
fn quote_unit_arg(arg: &str) -> String {
    if arg.chars().any(char::is_whitespace) {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_unit_contains_interval_and_catch_up() {
        let unit = render_timer_unit("wallshow-slideshow", 30);
        assert!(unit.contains("OnActiveSec=30min"));
        assert!(unit.contains("OnUnitActiveSec=30min"));
        assert!(unit.contains("Persistent=true"));
        assert!(unit.contains("Unit=wallshow-slideshow.service"));
    }

    #[test]
    fn test_service_unit_contains_command() {
        let command = vec!["/usr/bin/wallshow".to_string(), "next".to_string()];
        let unit = render_service_unit("wallshow-slideshow", &command);
        assert!(unit.contains("Type=oneshot"));
        assert!(unit.contains("ExecStart=/usr/bin/wallshow next"));
    }

    #[test]
    fn test_service_unit_quotes_spaced_paths() {
        let command = vec!["/opt/my tools/wallshow".to_string(), "next".to_string()];
        let unit = render_service_unit("wallshow-slideshow", &command);
        assert!(unit.contains("ExecStart=\"/opt/my tools/wallshow\" next"));
    }

    #[test]
    fn test_find_all_empty_when_unit_dir_missing() {
        let binding = SystemdTriggerBinding::with_unit_dir(PathBuf::from("/nonexistent/units"));
        assert!(binding.find_all("wallshow-slideshow").unwrap().is_empty());
    }

    #[test]
    fn test_find_all_matches_by_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("wallshow-slideshow.timer"), "").unwrap();
        fs::write(dir.path().join("wallshow-slideshow.service"), "").unwrap();
        fs::write(dir.path().join("unrelated.timer"), "").unwrap();

        let binding = SystemdTriggerBinding::with_unit_dir(dir.path().to_path_buf());
        let found = binding.find_all("wallshow-slideshow").unwrap();
        assert_eq!(found, vec![ScheduledTrigger { name: "wallshow-slideshow".to_string() }]);
    }
}
