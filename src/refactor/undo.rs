use super::log::{CleanupLog, DeletionAction};
use miette::{IntoDiagnostic, Result};
use std::path::Path;

/// Generates a shell script that copies every backup of a cleanup run back into place
pub struct RestoreScript {
    /// (backup, original), both relative to the project root
    restores: Vec<(String, String)>,
}

impl RestoreScript {
    pub fn new() -> Self {
        Self {
            restores: Vec::new(),
        }
    }

    pub fn from_log(log: &CleanupLog) -> Self {
        let mut script = Self::new();
        for entry in &log.deletions {
            if entry.action != DeletionAction::Deleted {
                continue;
            }
            if let Some(backup) = &entry.backup_path {
                script.record(backup, &entry.path);
            }
        }
        script
    }

    pub fn record(&mut self, backup: &str, original: &str) {
        self.restores.push((backup.to_string(), original.to_string()));
    }

    /// Write the script. It must be run from the project root.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut script = String::new();

        script.push_str("#!/bin/bash\n");
        script.push_str("# assetaudit restore script\n");
        script.push_str("# Run from the project root to restore files removed by cleanup\n");
        script.push('\n');
        script.push_str("set -e\n");
        script.push('\n');
        script.push_str("echo 'Restoring deleted files...'\n");
        script.push('\n');

        for (backup, original) in &self.restores {
            let backup = quote(backup);
            let original = quote(original);
            script.push_str(&format!("mkdir -p \"$(dirname {})\"\n", original));
            script.push_str(&format!("cp -p {} {}\n", backup, original));
            script.push_str(&format!("echo '  Restored: '{}\n", original));
            script.push('\n');
        }

        script.push_str("echo 'Done! All files restored.'\n");

        std::fs::write(path, &script).into_diagnostic()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path).into_diagnostic()?.permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(path, perms).into_diagnostic()?;
        }

        Ok(())
    }

    pub fn file_count(&self) -> usize {
        self.restores.len()
    }
}

impl Default for RestoreScript {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-quote for a POSIX shell
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
