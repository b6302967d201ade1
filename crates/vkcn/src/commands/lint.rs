//! Lint command - Lint Vue SFC files

use crate::config::load_config;
use clap::Args;
use glob::glob;
use ignore::Walk;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use vkcn_patina::{
    apply_fixes, format_results, format_summary, LintResult, LintSummary, Linter, OutputFormat,
};

#[derive(Args)]
pub struct LintArgs {
    /// Glob pattern(s) or directories to search for .vue files
    #[arg(default_value = "./**/*.vue")]
    pub patterns: Vec<String>,

    /// Apply automatic fixes and write them back
    #[arg(long)]
    pub fix: bool,

    /// Config file path (defaults to ./vkcn.config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Maximum number of warnings before failing
    #[arg(long)]
    pub max_warnings: Option<usize>,

    /// Quiet mode - only show summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Default for LintArgs {
    fn default() -> Self {
        Self {
            patterns: vec!["./**/*.vue".to_string()],
            fix: false,
            config: None,
            format: OutputFormat::Text,
            max_warnings: None,
            quiet: false,
        }
    }
}

fn is_vue_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "vue")
        && !path.components().any(|c| c.as_os_str() == "node_modules")
}

/// Collect `.vue` files from glob patterns and directory walks
fn collect_files(patterns: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = patterns
        .iter()
        .flat_map(|pattern| {
            if pattern.contains(['*', '?', '[']) {
                match glob(pattern) {
                    Ok(paths) => paths.filter_map(Result::ok).collect::<Vec<_>>(),
                    Err(e) => {
                        eprintln!("Invalid pattern {pattern}: {e}");
                        Vec::new()
                    }
                }
            } else {
                // Directory walking respects .gitignore
                Walk::new(pattern)
                    .filter_map(Result::ok)
                    .map(|entry| entry.into_path())
                    .collect()
            }
        })
        .filter(|path| is_vue_file(path))
        .collect();

    files.sort();
    files.dedup();
    files
}

/// Lint one file, applying fixes first when asked.
///
/// Returns the source the result refers to and whether it was rewritten.
fn lint_file(linter: &Linter, path: &Path, fix: bool) -> Option<(String, LintResult, bool)> {
    let filename = path.to_string_lossy().to_string();
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    let lint = |source: &str| match linter.lint_sfc(source, &filename) {
        Ok(result) => Some(result),
        Err(e) => {
            eprintln!("Failed to analyze {filename}: {e}");
            None
        }
    };

    let result = lint(&source)?;
    if !fix || result.fixable_count() == 0 {
        return Some((source, result, false));
    }

    let fixed = apply_fixes(&source, &result.diagnostics);
    if fixed == source {
        return Some((source, result, false));
    }
    if let Err(e) = fs::write(path, &fixed) {
        eprintln!("Failed to write {}: {}", path.display(), e);
        return Some((source, result, false));
    }
    tracing::debug!(filename, fixes = result.fixable_count(), "wrote fixes");
    let remaining = lint(&fixed)?;
    Some((fixed, remaining, true))
}

/// Run the command and return the process exit code
pub fn run(args: LintArgs) -> i32 {
    let start = Instant::now();

    let config = load_config(args.config.as_deref());
    let linter = Linter::from_config(&config).unwrap_or_else(|e| {
        eprintln!("\x1b[33mWarning:\x1b[0m Invalid config: {e}");
        Linter::new()
    });

    let files = collect_files(&args.patterns);
    if files.is_empty() {
        eprintln!("No .vue files found matching patterns: {:?}", args.patterns);
        return 0;
    }
    tracing::debug!(files = files.len(), threads = rayon::current_num_threads(), "linting");

    // Each file is analyzed on its own; order is preserved by collect
    let linted: Vec<_> = files
        .par_iter()
        .filter_map(|path| lint_file(&linter, path, args.fix))
        .collect();

    let mut summary = LintSummary {
        file_count: files.len(),
        ..Default::default()
    };
    let mut fixed_files = 0;
    let mut results = Vec::with_capacity(linted.len());
    let mut sources = Vec::with_capacity(linted.len());
    for (source, result, fixed) in linted {
        for diagnostic in &result.diagnostics {
            summary.add(diagnostic);
        }
        fixed_files += usize::from(fixed);
        sources.push((result.filename.clone(), source));
        results.push(result);
    }

    if !args.quiet {
        let output = format_results(&results, &sources, args.format);
        if !output.trim().is_empty() {
            print!("{output}");
        }
    }

    if args.format == OutputFormat::Text {
        println!(
            "\n{}",
            format_summary(summary.error_count, summary.warning_count, summary.file_count)
        );
        if fixed_files > 0 {
            println!("Fixed {fixed_files} file(s)");
        } else if summary.fixable_count > 0 {
            println!(
                "{} problem(s) fixable with the `--fix` option",
                summary.fixable_count
            );
        }
        println!("Linted {} files in {:.4?}", summary.file_count, start.elapsed());
    }

    if summary.has_errors() {
        return 1;
    }
    if let Some(max) = args.max_warnings {
        if summary.warning_count > max {
            eprintln!("\nToo many warnings ({} > max {})", summary.warning_count, max);
            return 1;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vkcn-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("node_modules/pkg")).unwrap();
        dir
    }

    #[test]
    fn test_collect_files() {
        let dir = temp_dir("collect");
        fs::write(dir.join("A.vue"), "").unwrap();
        fs::write(dir.join("b.ts"), "").unwrap();
        fs::write(dir.join("node_modules/pkg/C.vue"), "").unwrap();

        let walked = collect_files(&[dir.to_string_lossy().to_string()]);
        assert_eq!(walked, vec![dir.join("A.vue")]);

        let globbed = collect_files(&[format!("{}/**/*.vue", dir.display())]);
        assert_eq!(globbed, vec![dir.join("A.vue")]);
    }

    #[test]
    fn test_fix_writes_back() {
        let dir = temp_dir("fix");
        let path = dir.join("Foo.vue");
        fs::write(&path, "<style lang=\"scss\">\n.Foo--a {}\n.foo--b {\n  &.Big {}\n}\n</style>").unwrap();
        let config = dir.join("vkcn.config.json");
        fs::write(
            &config,
            r#"{ "rules": { "vkcn/no-convention-violation": ["error", { "enableFix": true }] } }"#,
        )
        .unwrap();

        let code = run(LintArgs {
            patterns: vec![dir.to_string_lossy().to_string()],
            fix: true,
            config: Some(config),
            quiet: true,
            ..Default::default()
        });

        // `.Foo--a` has no automatic fix and stays an error
        assert_eq!(code, 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<style lang=\"scss\">\n.Foo--a {}\n.foo--b {\n  &.big {}\n}\n</style>"
        );
    }
}
