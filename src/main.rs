use assetaudit::analysis::{find_unused, UnusedAssetsReport};
use assetaudit::audit::AuditAggregator;
use assetaudit::config::Config;
use assetaudit::discovery::SourceWalker;
use assetaudit::graph::{scan_files, ReferenceKind, ReferenceSet};
use assetaudit::inventory::AssetCategory;
use assetaudit::refactor::{
    load_findings, CleanupPlan, CleanupRun, CleanupScope, ExecutionMode, RestoreScript, SafeCleanup,
    TerminalPrompter,
};
use assetaudit::report::{write_artifact, TerminalReporter};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use tracing::info;

/// assetaudit - Find unused and duplicate assets in web projects
#[derive(Parser, Debug)]
#[command(name = "assetaudit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every enabled detector and write the audit report
    Audit(AuditArgs),

    /// Find unused images, components and animations
    Unused(UnusedArgs),

    /// Delete findings of a previous audit (dry run by default)
    Clean(CleanArgs),
}

#[derive(Args, Debug)]
struct ProjectArgs {
    /// Path to the project directory
    #[arg(default_value = ".")]
    path: PathBuf,
}

#[derive(Args, Debug)]
struct AuditArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Skip the content/name duplicate detector
    #[arg(long)]
    skip_duplicates: bool,

    /// Skip unused image and component detection
    #[arg(long)]
    skip_unused: bool,

    /// Skip the moodboard duplicate detector
    #[arg(long)]
    skip_moodboards: bool,

    /// Skip the SVG duplicate detector
    #[arg(long)]
    skip_svgs: bool,

    /// Skip unused animation detection
    #[arg(long)]
    skip_animations: bool,

    /// Extract references in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Args, Debug)]
struct UnusedArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Only check images
    #[arg(long, conflicts_with_all = ["components_only", "animations_only"])]
    images_only: bool,

    /// Only check components
    #[arg(long, conflicts_with = "animations_only")]
    components_only: bool,

    /// Only check animations
    #[arg(long)]
    animations_only: bool,

    /// Extract references in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Args, Debug)]
struct CleanArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Show what would be deleted without making changes (default)
    #[arg(long, conflicts_with_all = ["interactive", "auto"])]
    dry_run: bool,

    /// Confirm each deletion
    #[arg(long, conflicts_with = "auto")]
    interactive: bool,

    /// Confirm once, then delete every candidate
    #[arg(long)]
    auto: bool,

    /// Only remove unused files
    #[arg(long, conflicts_with = "duplicates_only")]
    unused_only: bool,

    /// Only remove duplicates
    #[arg(long)]
    duplicates_only: bool,

    /// Write a script restoring every deleted file from its backup
    #[arg(long, value_name = "FILE")]
    undo_script: Option<PathBuf>,
}

impl CleanArgs {
    fn mode(&self) -> ExecutionMode {
        match (self.dry_run, self.interactive, self.auto) {
            (false, true, _) => ExecutionMode::Interactive,
            (false, _, true) => ExecutionMode::Auto,
            _ => ExecutionMode::DryRun,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("assetaudit v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Audit(args) => run_audit(&cli, args),
        Command::Unused(args) => run_unused(&cli, args),
        Command::Clean(args) => run_clean(&cli, args),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

fn project_root(project: &ProjectArgs) -> Result<PathBuf> {
    project
        .path
        .canonicalize()
        .into_diagnostic()
        .wrap_err_with(|| format!("Project directory not found: {}", project.path.display()))
}

fn load_config(cli: &Cli, project_root: &Path) -> Result<Config> {
    if let Some(config_path) = &cli.config {
        Config::from_file(config_path)
    } else {
        // Try to load from default locations
        Config::from_default_locations(project_root)
    }
}

fn run_audit(cli: &Cli, args: &AuditArgs) -> Result<()> {
    let root = project_root(&args.project)?;
    let mut config = load_config(cli, &root)?;

    // Override with CLI arguments
    let detectors = &mut config.detectors;
    detectors.duplicates &= !args.skip_duplicates;
    detectors.unused &= !args.skip_unused;
    detectors.moodboards &= !args.skip_moodboards;
    detectors.svgs &= !args.skip_svgs;
    detectors.animations &= !args.skip_animations;

    let mut categories = Vec::new();
    if config.detectors.unused {
        categories.extend([AssetCategory::Image, AssetCategory::Component]);
    }
    if config.detectors.animations {
        categories.push(AssetCategory::Animation);
    }

    let unused = if categories.is_empty() {
        None
    } else {
        Some(detect_unused(&config, &root, &categories, args.parallel, cli.quiet)?)
    };

    let artifact = AuditAggregator::new(&config, &root).aggregate(unused);
    let report_path = artifact
        .write(&config.report_dir(&root))
        .into_diagnostic()?;

    TerminalReporter::new().report_audit(&artifact);
    println!("{} Audit report saved to: {}", "✓".green(), report_path.display());

    Ok(())
}

fn run_unused(cli: &Cli, args: &UnusedArgs) -> Result<()> {
    let root = project_root(&args.project)?;
    let config = load_config(cli, &root)?;

    let categories = if args.images_only {
        vec![AssetCategory::Image]
    } else if args.components_only {
        vec![AssetCategory::Component]
    } else if args.animations_only {
        vec![AssetCategory::Animation]
    } else {
        vec![AssetCategory::Image, AssetCategory::Component, AssetCategory::Animation]
    };

    let report = detect_unused(&config, &root, &categories, args.parallel, cli.quiet)?;
    TerminalReporter::new().report_unused(&report.into_reports());

    Ok(())
}

/// Scan, match and persist `unused-assets-report.json`
fn detect_unused(
    config: &Config,
    root: &Path,
    categories: &[AssetCategory],
    parallel: bool,
    quiet: bool,
) -> Result<UnusedAssetsReport> {
    let references = collect_references(config, root, parallel, quiet)?;
    let reports = find_unused(config, root, &references, categories);

    let report = UnusedAssetsReport::from_reports(&reports);
    let path = config.report_dir(root).join(UnusedAssetsReport::FILE_NAME);
    write_artifact(&path, &report).into_diagnostic()?;
    info!("Unused assets report written to {}", path.display());

    Ok(report)
}

fn collect_references(config: &Config, root: &Path, parallel: bool, quiet: bool) -> Result<ReferenceSet> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;

    let start_time = Instant::now();

    // Step 1: Discover files
    info!("Discovering source files...");
    let files = SourceWalker::new(config, root).find_files();
    info!("Found {} source files", files.len());

    if files.is_empty() {
        println!("{}", "No source files found.".yellow());
    }

    // Step 2: Extract references
    if parallel && !quiet {
        println!(
            "{}",
            format!("⚡ Parallel mode: scanning {} files...", files.len()).cyan()
        );
    }

    let pb = if quiet || parallel {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(files.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .into_diagnostic()?
            .progress_chars("#>-"),
    );

    let references = scan_files(config, &files, parallel, || pb.inc(1))?;
    pb.finish_with_message("Scan complete");

    info!(
        "Collected {} references ({} module, {} dynamic) in {:.2}s",
        references.len(),
        references.module_edges().count(),
        references.count_kind(ReferenceKind::DynamicImport),
        start_time.elapsed().as_secs_f64()
    );

    Ok(references)
}

fn run_clean(cli: &Cli, args: &CleanArgs) -> Result<()> {
    let root = project_root(&args.project)?;
    let config = load_config(cli, &root)?;
    let mode = args.mode();

    match mode {
        ExecutionMode::DryRun => println!("{}", "DRY-RUN MODE: No files will be deleted".cyan()),
        ExecutionMode::Interactive => {
            println!("{}", "INTERACTIVE MODE: You will be prompted before each deletion".cyan())
        }
        ExecutionMode::Auto => println!("{}", "AUTO MODE: Files will be deleted after one confirmation".yellow()),
    }

    let findings = load_findings(&config, &root)?;
    let plan = CleanupPlan::from_details(&findings, CleanupScope::from_flags(args.unused_only, args.duplicates_only));

    let mut prompter = TerminalPrompter::new();
    let run = SafeCleanup::new(&config, &root, mode, &mut prompter).run(&plan)?;

    match run {
        CleanupRun::Aborted => {
            println!("Cleanup cancelled.");
        }
        CleanupRun::Completed { log, log_path } => {
            TerminalReporter::new().report_cleanup(&log);
            println!();
            println!("{} Cleanup log saved to: {}", "✓".green(), log_path.display());

            if let Some(script_path) = &args.undo_script {
                let script = RestoreScript::from_log(&log);
                if script.file_count() > 0 {
                    script.write(script_path)?;
                    println!(
                        "{} Restore script saved to: {}",
                        "→".dimmed(),
                        script_path.display()
                    );
                }
            }
        }
    }

    Ok(())
}
