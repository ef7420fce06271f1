use crate::analysis::DetectorReport;
use crate::audit::{AuditArtifact, Priority, Severity};
use crate::inventory::AssetRecord;
use crate::refactor::{CleanupLog, DeletionAction, ExecutionMode};
use colored::Colorize;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Maximum items listed per category
    max_items: usize,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { max_items: 20 }
    }

    /// Findings of the in-process unused detectors
    pub fn report_unused(&self, reports: &[DetectorReport]) {
        println!();
        println!("{}", "Unused Assets".bold());
        println!("{}", "─".repeat(60).dimmed());

        for report in reports {
            let label = format!("Unused {}:", report.category.label());
            println!("{:<20} {}", label, count_badge(report.count()));
        }

        let total: u64 = reports.iter().map(|r| r.total_unused_size).sum();
        if total > 0 {
            println!("{:<20} {}", "Total unused size:", format_size(total).yellow());
        }

        for report in reports.iter().filter(|r| r.count() > 0) {
            println!();
            println!("{}", format!("Unused {}", report.category.label()).cyan().bold());
            self.print_items(&report.unused_items);
        }
        println!();
    }

    /// The merged audit summary and recommendations
    pub fn report_audit(&self, artifact: &AuditArtifact) {
        let s = &artifact.summary;

        println!();
        println!("{}", "Asset Audit Summary".bold());
        println!("{}", "─".repeat(60).dimmed());
        println!("{:<24} {}", "Content duplicates:", count_badge(s.content_duplicates));
        println!("{:<24} {}", "Name duplicates:", count_badge(s.name_duplicates));
        println!("{:<24} {}", "Unused images:", count_badge(s.unused_images));
        println!("{:<24} {}", "Unused components:", count_badge(s.unused_components));
        println!("{:<24} {}", "Unused animations:", count_badge(s.unused_animations));
        println!("{:<24} {}", "Moodboard duplicates:", count_badge(s.moodboard_duplicates));
        println!("{:<24} {}", "SVG duplicates:", count_badge(s.svg_exact_duplicates));

        if s.total_wasted_space > 0 {
            println!();
            println!("Wasted space: {}", format_size(s.total_wasted_space).yellow());
        }
        if s.total_unused_size > 0 {
            println!("Unused size:  {}", format_size(s.total_unused_size).yellow());
        }

        if !artifact.recommendations.is_empty() {
            println!();
            println!("{}", "Recommendations:".bold());
            for (i, rec) in artifact.recommendations.iter().enumerate() {
                let priority = match rec.priority {
                    Priority::High => "HIGH".red().bold(),
                    Priority::Medium => "MEDIUM".yellow().bold(),
                    Priority::Low => "LOW".blue().bold(),
                };
                println!();
                println!("{}. [{}] {}", i + 1, priority, rec.message);
                println!("   {} {}", "Action:".dimmed(), rec.action);
            }
        }

        let severity = match s.severity {
            Severity::High => "HIGH".red().bold(),
            Severity::Medium => "MEDIUM".yellow().bold(),
            Severity::Low => "LOW".green().bold(),
        };
        println!();
        println!("Severity: {}", severity);
        println!();
    }

    /// Outcome of a cleanup run
    pub fn report_cleanup(&self, log: &CleanupLog) {
        println!();
        println!("{}", "Cleanup Summary".bold());
        println!("{}", "─".repeat(60).dimmed());

        for entry in log.deletions.iter().take(self.max_items) {
            let marker = match entry.action {
                DeletionAction::Deleted => "✓".green(),
                DeletionAction::WouldDelete => "→".yellow(),
            };
            println!(
                "  {} {} {}",
                marker,
                entry.path.white(),
                format!("({})", entry.reason).dimmed()
            );
        }
        self.print_more(log.deletions.len());

        for entry in log.skipped.iter().take(self.max_items) {
            println!("  {} {} {}", "-".dimmed(), entry.path, format!("({})", entry.reason).dimmed());
        }
        self.print_more(log.skipped.len());

        for entry in &log.errors {
            println!("  {} {}: {}", "✗".red(), entry.path, entry.error);
        }

        let summary = &log.summary;
        println!();
        println!("Mode:          {}", log.mode.as_str().cyan());
        println!("Deleted:       {}", summary.deleted);
        println!("Would delete:  {}", summary.would_delete);
        println!("Skipped:       {}", summary.skipped);
        if summary.failed > 0 {
            println!("Failed:        {}", summary.failed.to_string().red());
        }
        if summary.total_size > 0 {
            println!("Total size:    {}", format_size(summary.total_size));
        }

        if !log.deferred.is_empty() {
            println!();
            println!(
                "{}",
                format!(
                    "⚠ {} unused components/animations need manual review; they were not deleted.",
                    log.deferred.len()
                )
                .yellow()
            );
        }

        if let Some(location) = &log.backup_location {
            if summary.deleted > 0 {
                println!();
                println!("{} Backups saved to: {}", "→".dimmed(), location);
            }
        }

        if log.interrupted {
            println!("{}", "Cleanup stopped early; the log covers processed files only.".yellow());
        }

        if log.mode == ExecutionMode::DryRun {
            println!();
            println!("{}", "Tip: Run with --interactive or --auto to actually delete files".dimmed());
        }
    }

    fn print_items(&self, items: &[AssetRecord]) {
        for item in items.iter().take(self.max_items) {
            println!("  {} {}", item.path.white(), format_size(item.size_bytes).dimmed());
        }
        self.print_more(items.len());
    }

    fn print_more(&self, total: usize) {
        if total > self.max_items {
            println!("  {}", format!("... and {} more", total - self.max_items).dimmed());
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn count_badge(count: usize) -> colored::ColoredString {
    if count == 0 {
        "0 ✓".green()
    } else {
        format!("{} ⚠", count).yellow()
    }
}

/// Human-readable byte size
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let value = bytes as f64;
    if value >= MB {
        format!("{:.2} MB", value / MB)
    } else if value >= KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{} B", bytes)
    }
}
