use crate::commands::common::CommandContext;
use crate::input::load_document;
use crate::{ExitCode, OutputFormat, OutputOptions};
use anyhow::Result;
use colored::Colorize;
use openapi_linter::{DiagnosticSeverity, LintDiagnostic, Linter, LinterError};
use std::path::PathBuf;

/// Options of the `lint` command
pub struct LintArgs {
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    pub fail_fast: bool,
    pub schema: Option<PathBuf>,
    pub skip_schema_check: bool,
}

/// A document that could not be linted at all
struct Failure {
    code: ExitCode,
    message: String,
}

/// Result of linting one document
struct FileReport {
    file: String,
    diagnostics: Vec<LintDiagnostic>,
    failure: Option<Failure>,
}

impl FileReport {
    fn errors(&self) -> impl Iterator<Item = &LintDiagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    fn warnings(&self) -> impl Iterator<Item = &LintDiagnostic> {
        self.diagnostics.iter().filter(|d| !d.severity.is_error())
    }

    fn exit_code(&self) -> ExitCode {
        if let Some(failure) = &self.failure {
            failure.code
        } else if self.errors().next().is_some() {
            ExitCode::LintError
        } else {
            ExitCode::Success
        }
    }
}

#[tracing::instrument(skip_all, fields(files = args.files.len(), fail_fast = args.fail_fast))]
pub fn run(
    config_path: Option<PathBuf>,
    args: LintArgs,
    output_opts: OutputOptions,
) -> Result<()> {
    let start_time = std::time::Instant::now();
    let ctx = CommandContext::load(config_path)?;

    let files = if args.files.is_empty() {
        ctx.config
            .find_documents(&ctx.base_dir)
            .unwrap_or_else(|e| {
                eprintln!("{} {}", "✗ Error finding documents:".red(), e);
                ExitCode::ConfigError.exit();
            })
    } else {
        args.files
    };

    if files.is_empty() {
        eprintln!(
            "{}",
            "✗ No documents to lint. Pass files or set `documents` in .openapilintrc".red()
        );
        ExitCode::ConfigError.exit();
    }

    let linter = ctx.linter(args.schema, args.skip_schema_check);

    let reports: Vec<FileReport> = files
        .iter()
        .map(|path| lint_file(&linter, path, args.fail_fast))
        .collect();

    match args.format {
        OutputFormat::Human => print_human(&reports, output_opts),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&render_json(&reports))?),
        OutputFormat::Github => {
            for line in render_github(&reports) {
                println!("{line}");
            }
        }
    }

    if matches!(args.format, OutputFormat::Human) && output_opts.show_info {
        println!(
            "  {} total: {:.2}s",
            "⏱".dimmed(),
            start_time.elapsed().as_secs_f64()
        );
    }

    let exit_code = reports
        .iter()
        .map(FileReport::exit_code)
        .max()
        .unwrap_or(ExitCode::Success);
    if exit_code != ExitCode::Success {
        tracing::debug!(%exit_code, "Lint failed");
        exit_code.exit();
    }

    Ok(())
}

#[tracing::instrument(skip(linter), fields(path = %path.display()))]
fn lint_file(linter: &Linter, path: &std::path::Path, fail_fast: bool) -> FileReport {
    let file = path.display().to_string();
    let failed = |code, message| FileReport {
        file: file.clone(),
        diagnostics: Vec::new(),
        failure: Some(Failure { code, message }),
    };

    let document = match load_document(path) {
        Ok(document) => document,
        Err(e) => return failed(e.exit_code(), e.to_string()),
    };

    let outcome = if fail_fast {
        linter.lint(&document).map(|()| Vec::new())
    } else {
        linter.check(&document)
    };

    match outcome {
        Ok(diagnostics) => FileReport {
            file: file.clone(),
            diagnostics,
            failure: None,
        },
        Err(LinterError::Rule { rule, message }) => FileReport {
            file: file.clone(),
            diagnostics: vec![LintDiagnostic::error(rule, message)],
            failure: None,
        },
        Err(e @ LinterError::Schema(_)) => failed(ExitCode::SchemaError, e.to_string()),
        Err(e @ LinterError::Defect { .. }) => failed(ExitCode::DefectError, e.to_string()),
    }
}

fn print_human(reports: &[FileReport], output_opts: OutputOptions) {
    for report in reports {
        if let Some(failure) = &report.failure {
            println!(
                "\n{}: {} {}",
                report.file,
                format!("{}:", failure.code).red().bold(),
                failure.message.red()
            );
            continue;
        }
        for diagnostic in &report.diagnostics {
            let (label, message) = match diagnostic.severity {
                DiagnosticSeverity::Error => ("error:".red().bold(), diagnostic.message.red()),
                DiagnosticSeverity::Warning => {
                    ("warning:".yellow().bold(), diagnostic.message.yellow())
                }
            };
            println!("\n{}: {label} {message}", report.file);
            println!("  {}: {}", "rule".dimmed(), diagnostic.rule.dimmed());
        }
    }

    if !output_opts.show_info {
        return;
    }

    let total_errors: usize = reports.iter().map(|r| r.errors().count()).sum();
    let total_warnings: usize = reports.iter().map(|r| r.warnings().count()).sum();
    let total_failures = reports.iter().filter(|r| r.failure.is_some()).count();

    println!();
    if total_failures > 0 {
        println!(
            "{}",
            format!("✗ {total_failures} document(s) could not be linted").red()
        );
    }
    if total_errors == 0 && total_warnings == 0 && total_failures == 0 {
        println!(
            "{}",
            format!("✓ No linting issues found in {} document(s)!", reports.len())
                .green()
                .bold()
        );
    } else if total_errors == 0 && total_failures == 0 {
        println!(
            "{}",
            format!("✓ Linting passed with {total_warnings} warning(s)")
                .yellow()
                .bold()
        );
    } else if total_errors > 0 {
        println!(
            "{}",
            format!("✗ Found {total_errors} error(s) and {total_warnings} warning(s)").red()
        );
    }
}

fn render_json(reports: &[FileReport]) -> serde_json::Value {
    let diagnostic_to_json = |d: &LintDiagnostic| {
        serde_json::json!({
            "rule": d.rule,
            "severity": d.severity.to_string(),
            "message": d.message,
        })
    };

    let files: Vec<serde_json::Value> = reports
        .iter()
        .map(|report| {
            let mut file = serde_json::json!({
                "file": report.file,
                "errors": report.errors().map(diagnostic_to_json).collect::<Vec<_>>(),
                "warnings": report.warnings().map(diagnostic_to_json).collect::<Vec<_>>(),
            });
            if let Some(failure) = &report.failure {
                file["failure"] = serde_json::json!({
                    "kind": failure.code.to_string(),
                    "exit_code": failure.code.code(),
                    "message": failure.message,
                });
            }
            file
        })
        .collect();

    let total_errors: usize = reports.iter().map(|r| r.errors().count()).sum();
    let total_warnings: usize = reports.iter().map(|r| r.warnings().count()).sum();
    let success = reports
        .iter()
        .all(|r| r.exit_code() == ExitCode::Success);

    serde_json::json!({
        "success": success,
        "files": files,
        "stats": {
            "total_files": reports.len(),
            "total_errors": total_errors,
            "total_warnings": total_warnings
        }
    })
}

/// GitHub Actions workflow commands for PR annotations
fn render_github(reports: &[FileReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        if let Some(failure) = &report.failure {
            lines.push(format!("::error file={}::{}", report.file, failure.message));
        }
        for diagnostic in &report.diagnostics {
            let level = match diagnostic.severity {
                DiagnosticSeverity::Error => "error",
                DiagnosticSeverity::Warning => "warning",
            };
            lines.push(format!(
                "::{level} file={}::{} [{}]",
                report.file, diagnostic.message, diagnostic.rule
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reports() -> Vec<FileReport> {
        vec![
            FileReport {
                file: "api/pets.yaml".to_string(),
                diagnostics: vec![
                    LintDiagnostic::error(
                        "require_description",
                        "Missing description in components.schemas.Pet",
                    ),
                    LintDiagnostic::warning(
                        "inherit_required",
                        "Property name of components.schemas.Dog must be required",
                    ),
                ],
                failure: None,
            },
            FileReport {
                file: "api/broken.json".to_string(),
                diagnostics: Vec::new(),
                failure: Some(Failure {
                    code: ExitCode::ParseError,
                    message: "Failed to parse api/broken.json: EOF".to_string(),
                }),
            },
            FileReport {
                file: "api/clean.yml".to_string(),
                diagnostics: Vec::new(),
                failure: None,
            },
        ]
    }

    #[test]
    fn test_report_exit_codes() {
        let codes: Vec<_> = reports().iter().map(FileReport::exit_code).collect();
        assert_eq!(
            codes,
            vec![ExitCode::LintError, ExitCode::ParseError, ExitCode::Success]
        );
    }

    #[test]
    fn test_warnings_alone_succeed() {
        let report = FileReport {
            file: "a.yaml".to_string(),
            diagnostics: vec![LintDiagnostic::warning("allof", "x")],
            failure: None,
        };
        assert_eq!(report.exit_code(), ExitCode::Success);
    }

    #[test]
    fn test_github_output() {
        assert_eq!(
            render_github(&reports()),
            vec![
                "::error file=api/pets.yaml::Missing description in components.schemas.Pet [require_description]",
                "::warning file=api/pets.yaml::Property name of components.schemas.Dog must be required [inherit_required]",
                "::error file=api/broken.json::Failed to parse api/broken.json: EOF",
            ]
        );
    }

    #[test]
    fn test_json_output() {
        let output = render_json(&reports());
        assert_eq!(output["success"], false);
        assert_eq!(output["stats"]["total_files"], 3);
        assert_eq!(output["stats"]["total_errors"], 1);
        assert_eq!(output["stats"]["total_warnings"], 1);
        assert_eq!(output["files"][0]["errors"][0]["rule"], "require_description");
        assert_eq!(output["files"][1]["failure"]["exit_code"], 5);
        assert!(output["files"][2].get("failure").is_none());
    }
}
