use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use inseki::cli::{CaptureArgs, Cli, Commands, ScanArgs, TemplatesArgs};
use inseki::config::{Config, ConfigLoader, FileConfigLoader, ResolvedPaths, ensure_directories};
use inseki::crawler::CrawlOptions;
use inseki::detector::{DetectOptions, Detector};
use inseki::ignore_list::IgnoreList;
use inseki::index::IndexOptions;
use inseki::output::{
    ColorMode, ErrorOutput, JsonFormatter, OutputFormat, OutputFormatter, ScanProgress,
    TextFormatter,
};
use inseki::path_utils::{basename, expand_home};
use inseki::structure::{
    CaptureOptions, ImportReport, Structure, capture_directory, import_structures,
};
use inseki::verifier::Response;
use inseki::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, InsekiError};

fn main() {
    let cli = Cli::parse();
    inseki::logging::init(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Scan(args) => run_scan(args, &cli),
        Commands::Templates(args) => run_templates(args, &cli),
        Commands::Capture(args) => run_capture(args, &cli),
    };

    let exit_code = match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            ErrorOutput::new(cli.color.into()).report(&err);
            EXIT_CONFIG_ERROR
        }
    };

    std::process::exit(exit_code);
}

fn run_scan(args: &ScanArgs, cli: &Cli) -> inseki::Result<()> {
    let config = load_config(cli)?;
    let paths = config.paths.resolve();
    let errors = ErrorOutput::new(cli.color.into());

    let structures_dir = structures_dir(args.structures.as_deref(), &paths, cli.quiet)?;
    let ignore_file = args
        .ignore_file
        .as_deref()
        .map_or_else(|| paths.ignore_file.clone(), expand_home);
    let ignore = IgnoreList::load(&ignore_file)?;

    let report = load_library(&structures_dir, &ignore, &errors, cli.quiet)?;
    let root = resolve_root(&args.path)?;

    let detector = Detector::new(&report.library, detect_options(&config, args.jobs))?;
    let outcome = detector.crawl(&root, &ignore)?;
    if !cli.quiet {
        eprintln!(
            "Loaded {} templates, crawled {} entries, verifying {} candidates",
            report.library.len(),
            outcome.stats.entries_visited,
            outcome.stats.targets
        );
    }

    let total = u64::try_from(outcome.stats.targets).unwrap_or(u64::MAX);
    let progress = ScanProgress::new(total, cli.quiet);
    let detection = detector.verify(outcome, &|| progress.inc());
    progress.finish();

    let output = format_output(args.format, &detection.matches, cli.color.into(), cli.verbose)?;
    write_output(args.output.as_deref(), &output, cli.quiet)
}

fn run_templates(args: &TemplatesArgs, cli: &Cli) -> inseki::Result<()> {
    let config = load_config(cli)?;
    let paths = config.paths.resolve();
    let errors = ErrorOutput::new(cli.color.into());

    let structures_dir = structures_dir(args.structures.as_deref(), &paths, cli.quiet)?;
    let ignore = IgnoreList::load(&paths.ignore_file)?;
    let report = load_library(&structures_dir, &ignore, &errors, cli.quiet)?;

    if report.library.is_empty() {
        return Err(InsekiError::NoStructures {
            dir: structures_dir,
        });
    }

    let mut output = String::new();
    for structure in &report.library {
        output.push_str(&describe(structure));
    }
    write_output(None, &output, false)
}

fn run_capture(args: &CaptureArgs, cli: &Cli) -> inseki::Result<()> {
    let config = load_config(cli)?;
    let ignore = IgnoreList::load(&config.paths.resolve().ignore_file)?;

    let dir = expand_home(&args.dir);
    let options = CaptureOptions {
        root_pattern: args.root_pattern.clone(),
        max_depth: args.depth,
    };
    let root = capture_directory(&dir, &ignore, &options)?;
    let structure = Structure::new(basename(&dir), root);

    match args.output.as_deref() {
        Some(path) => {
            structure.export(path)?;
            if !cli.quiet {
                eprintln!(
                    "Captured {} nodes from {} into {}",
                    structure.root().node_count(),
                    dir.display(),
                    path.display()
                );
            }
            Ok(())
        }
        None => write_output(None, &format!("{}\n", structure.to_json()?), false),
    }
}

fn load_config(cli: &Cli) -> inseki::Result<Config> {
    if cli.no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    let result = match cli.config.as_deref() {
        Some(path) => loader.load_from_path(path)?,
        None => loader.load()?,
    };
    Ok(result.config)
}

/// Template directory: the command-line override, or the configured one
/// (created along with the inseki home when missing).
fn structures_dir(
    override_dir: Option<&Path>,
    paths: &ResolvedPaths,
    quiet: bool,
) -> inseki::Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(expand_home(dir));
    }

    for dir in ensure_directories(paths)? {
        if !quiet {
            eprintln!("Created {}", dir.display());
        }
    }
    Ok(paths.structures.clone())
}

fn load_library(
    dir: &Path,
    ignore: &IgnoreList,
    errors: &ErrorOutput,
    quiet: bool,
) -> inseki::Result<ImportReport> {
    let report = import_structures(dir, ignore)?;
    if !quiet {
        for warning in &report.warnings {
            errors.import_warning(warning);
        }
    }
    Ok(report)
}

fn detect_options(config: &Config, jobs: Option<usize>) -> DetectOptions {
    DetectOptions {
        jobs: jobs.unwrap_or(config.scan.jobs),
        index: IndexOptions {
            include_optional_anchors: config.scan.include_optional_anchors,
        },
        crawl: CrawlOptions {
            follow_links: config.scan.follow_links,
        },
    }
}

/// Expand `~` and make the scan root absolute so reported roots are too.
fn resolve_root(path: &Path) -> inseki::Result<PathBuf> {
    let expanded = expand_home(path);
    dunce::canonicalize(&expanded).map_err(|source| InsekiError::Walk {
        path: expanded,
        source,
    })
}

fn describe(structure: &Structure) -> String {
    format!(
        "{} ({})\n{}\n",
        structure.name(),
        structure.hash().short(),
        structure
    )
}

fn format_output(
    format: OutputFormat,
    matches: &[Response<'_>],
    color_mode: ColorMode,
    verbose: u8,
) -> inseki::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(matches),
        OutputFormat::Json => JsonFormatter.format(matches),
    }
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> inseki::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
