use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use importfix::defaults;
use importfix::strip::{self, FileFix};
use importfix::Error;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct StripArgs {
    /// Directory to scan (defaults to the UI components directory)
    #[arg(long)]
    pub path: Option<String>,

    /// Filename suffix a file must carry to be processed
    #[arg(long, default_value = defaults::CANDIDATE_EXTENSION)]
    pub ext: String,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Emit a JSON summary instead of per-file lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
pub struct StripOutput {
    pub directory: String,
    pub extension: String,
    pub dry_run: bool,
    pub fixes: Vec<FixSummary>,
    pub total_files: usize,
    pub total_replacements: usize,
    pub applied: bool,
}

#[derive(Serialize)]
pub struct FixSummary {
    pub file: String,
    pub replacements: usize,
}

pub fn run(args: StripArgs) -> CmdResult<StripOutput> {
    let dir = PathBuf::from(args.path.as_deref().unwrap_or(defaults::UI_COMPONENTS_DIR));

    if args.path.is_some() && !dir.is_dir() {
        return Err(Error::validation_invalid_argument(
            "path",
            format!("'{}' is not a directory", dir.display()),
            Some(dir.display().to_string()),
        )
        .with_hint("Pass --path pointing at the directory that holds the component files"));
    }

    let apply = !args.dry_run;
    let quiet = args.json;

    let report = strip::strip_directory(&dir, &args.ext, apply, |fix: &FileFix| {
        if quiet {
            return;
        }
        if apply {
            println!("Fixed: {}", fix.file);
        } else {
            println!("Would fix: {} ({} pins)", fix.file, fix.replacements);
        }
    })?;

    if !quiet {
        if apply {
            println!("All imports fixed!");
        } else {
            println!(
                "Dry run: {} pins across {} files",
                report.total_replacements, report.total_files
            );
        }
    }

    Ok((
        StripOutput {
            directory: dir.display().to_string(),
            extension: args.ext,
            dry_run: args.dry_run,
            fixes: report
                .fixes
                .iter()
                .map(|f| FixSummary {
                    file: f.file.clone(),
                    replacements: f.replacements,
                })
                .collect(),
            total_files: report.total_files,
            total_replacements: report.total_replacements,
            applied: report.applied,
        },
        0,
    ))
}
