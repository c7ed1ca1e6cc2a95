pub mod colors;
pub mod config;
pub mod confirm;
pub mod envfile;
pub mod error;
pub mod logging;
pub mod merge;
mod output;

pub use colors::{should_use_colors, Colors};
pub use config::{
    find_config_file, generate_init_file, load_config, merge_settings, CliMergeOptions,
    ConfigError, EnvMergeToml, Settings, SettingsError, CONFIG_FILE_NAME,
};
pub use confirm::{AssumeYes, Confirm, LinePrompt, DEFAULT_CONFIRM_TOKEN};
pub use envfile::{parse, parse_str, write_lines, Assignment, ConfigFile, ConfigLine};
pub use error::EnvMergeError;
pub use merge::{merge, merge_files, MergeReport, Merged, DEFAULT_EXTRAS_HEADER};
pub use output::{
    print_cancelled, print_diff, print_dry_run, print_error, print_written, render_diff,
    OutputContext, OutputMode,
};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The three paths of one merge run, as given by the user.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub template: PathBuf,
    pub prior: PathBuf,
    pub output: PathBuf,
}

/// How the run should treat the output file.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunOptions {
    /// Compute everything, prompt for nothing, write nothing
    pub dry_run: bool,
    /// Keep the previous output content around for diffing
    pub capture_previous: bool,
}

#[derive(Debug)]
pub struct RunResult {
    pub merged: Merged,
    /// Output content before the run, if requested and the file existed
    pub previous: Option<String>,
    pub written: bool,
}

/// Main entry point: validate the paths, confirm overwrites, merge, write.
///
/// Preconditions are checked in order (template, prior, name clash,
/// overwrite confirmation) and nothing is written unless all pass.
pub fn run(
    request: &MergeRequest,
    settings: &Settings,
    options: RunOptions,
    confirm: &mut dyn Confirm,
) -> Result<RunResult, EnvMergeError> {
    check_preconditions(request)?;

    let output_exists = request.output.exists();
    if output_exists && !options.dry_run {
        let question = format!("{} already exists, overwrite?", request.output.display());
        if !confirm.confirm(&question).map_err(EnvMergeError::Prompt)? {
            return Err(EnvMergeError::Cancelled(request.output.clone()));
        }
        tracing::info!(path = %request.output.display(), "overwrite confirmed");
    }

    let template = read_config(&request.template)?;
    let prior = read_config(&request.prior)?;
    let merged = merge_files(&template, &prior, &settings.extras_header);

    let previous = if output_exists && (options.capture_previous || options.dry_run) {
        Some(read_lossy(&request.output)?)
    } else {
        None
    };

    if options.dry_run {
        return Ok(RunResult {
            merged,
            previous,
            written: false,
        });
    }

    write_lines(&request.output, &merged.lines).map_err(|source| EnvMergeError::Write {
        path: request.output.clone(),
        source,
    })?;
    tracing::info!(
        path = %request.output.display(),
        lines = merged.lines.len(),
        "output written"
    );

    Ok(RunResult {
        merged,
        previous,
        written: true,
    })
}

fn check_preconditions(request: &MergeRequest) -> Result<(), EnvMergeError> {
    if !request.template.exists() {
        return Err(EnvMergeError::TemplateMissing(request.template.clone()));
    }
    if !request.prior.exists() {
        return Err(EnvMergeError::PriorMissing(request.prior.clone()));
    }
    // Exact spelling only; `./a` and `a` are different names here.
    if request.prior.as_os_str() == request.output.as_os_str() {
        return Err(EnvMergeError::SameFile(
            request.output.display().to_string(),
        ));
    }
    Ok(())
}

fn read_config(path: &Path) -> Result<ConfigFile, EnvMergeError> {
    parse(path).map_err(|source| EnvMergeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_lossy(path: &Path) -> Result<String, EnvMergeError> {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source: io::Error| EnvMergeError::Read {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Scripted confirmation that records whether it was asked.
    struct Scripted {
        answer: bool,
        asked: usize,
    }

    impl Scripted {
        fn new(answer: bool) -> Self {
            Self { answer, asked: 0 }
        }
    }

    impl Confirm for Scripted {
        fn confirm(&mut self, _question: &str) -> io::Result<bool> {
            self.asked += 1;
            Ok(self.answer)
        }
    }

    struct Fixture {
        dir: TempDir,
        request: MergeRequest,
    }

    fn fixture(template: Option<&str>, prior: Option<&str>) -> Fixture {
        let dir = TempDir::new().unwrap();
        let request = MergeRequest {
            template: dir.path().join(".env.example"),
            prior: dir.path().join(".env.old"),
            output: dir.path().join(".env"),
        };
        if let Some(content) = template {
            fs::write(&request.template, content).unwrap();
        }
        if let Some(content) = prior {
            fs::write(&request.prior, content).unwrap();
        }
        Fixture { dir, request }
    }

    #[test]
    fn test_run_writes_merged_output() {
        let fx = fixture(Some("A=1\n#comment\nB=2\n"), Some("A=9\nC=5\n"));
        let mut confirm = Scripted::new(false);

        let result = run(&fx.request, &Settings::default(), RunOptions::default(), &mut confirm)
            .unwrap();

        assert!(result.written);
        assert_eq!(confirm.asked, 0);
        assert_eq!(
            fs::read_to_string(&fx.request.output).unwrap(),
            "A=9\n#comment\nB=2\n\n# 示例文件中不存在的变量\nC=5\n"
        );
    }

    #[test]
    fn test_run_missing_template() {
        let fx = fixture(None, Some("A=1\n"));
        let err = run(
            &fx.request,
            &Settings::default(),
            RunOptions::default(),
            &mut Scripted::new(true),
        )
        .unwrap_err();

        assert!(matches!(err, EnvMergeError::TemplateMissing(_)));
        assert!(!fx.request.output.exists());
    }

    #[test]
    fn test_run_missing_prior() {
        let fx = fixture(Some("A=1\n"), None);
        let err = run(
            &fx.request,
            &Settings::default(),
            RunOptions::default(),
            &mut Scripted::new(true),
        )
        .unwrap_err();

        assert!(matches!(err, EnvMergeError::PriorMissing(_)));
        assert!(!fx.request.output.exists());
    }

    #[test]
    fn test_run_template_checked_before_prior() {
        let fx = fixture(None, None);
        let err = run(
            &fx.request,
            &Settings::default(),
            RunOptions::default(),
            &mut Scripted::new(true),
        )
        .unwrap_err();

        assert!(matches!(err, EnvMergeError::TemplateMissing(_)));
    }

    #[test]
    fn test_run_rejects_output_equal_to_prior() {
        let mut fx = fixture(Some("A=1\n"), Some("A=2\n"));
        fx.request.output = fx.request.prior.clone();
        let mut confirm = Scripted::new(true);

        let err = run(&fx.request, &Settings::default(), RunOptions::default(), &mut confirm)
            .unwrap_err();

        assert!(matches!(err, EnvMergeError::SameFile(_)));
        assert_eq!(confirm.asked, 0);
        assert_eq!(fs::read_to_string(&fx.request.prior).unwrap(), "A=2\n");
    }

    #[test]
    fn test_run_declined_overwrite_leaves_output() {
        let fx = fixture(Some("A=1\n"), Some("A=2\n"));
        fs::write(&fx.request.output, "keep me\n").unwrap();
        let mut confirm = Scripted::new(false);

        let err = run(&fx.request, &Settings::default(), RunOptions::default(), &mut confirm)
            .unwrap_err();

        assert!(err.is_cancellation());
        assert_eq!(confirm.asked, 1);
        assert_eq!(fs::read_to_string(&fx.request.output).unwrap(), "keep me\n");
    }

    #[test]
    fn test_run_unreadable_template_after_confirm_writes_nothing() {
        let fx = fixture(None, Some("A=2\n"));
        fs::write(&fx.request.template, b"A=\xff\xfe\n").unwrap();
        fs::write(&fx.request.output, "keep\n").unwrap();
        let mut confirm = Scripted::new(true);

        let err = run(&fx.request, &Settings::default(), RunOptions::default(), &mut confirm)
            .unwrap_err();

        assert_eq!(confirm.asked, 1);
        assert!(
            matches!(&err, EnvMergeError::Read { path, .. } if *path == fx.request.template),
            "{err}"
        );
        assert_eq!(fs::read_to_string(&fx.request.output).unwrap(), "keep\n");
    }

    #[test]
    fn test_run_confirmed_overwrite_captures_previous() {
        let fx = fixture(Some("A=1\n"), Some("A=2\n"));
        fs::write(&fx.request.output, "A=0\n").unwrap();
        let options = RunOptions {
            capture_previous: true,
            ..Default::default()
        };

        let result = run(&fx.request, &Settings::default(), options, &mut Scripted::new(true))
            .unwrap();

        assert_eq!(result.previous.as_deref(), Some("A=0\n"));
        assert_eq!(fs::read_to_string(&fx.request.output).unwrap(), "A=2\n");
    }

    #[test]
    fn test_run_dry_run_never_prompts_or_writes() {
        let fx = fixture(Some("A=1\n"), Some("A=2\nZ=3\n"));
        fs::write(&fx.request.output, "old\n").unwrap();
        let mut confirm = Scripted::new(true);
        let options = RunOptions {
            dry_run: true,
            ..Default::default()
        };

        let result = run(&fx.request, &Settings::default(), options, &mut confirm).unwrap();

        assert!(!result.written);
        assert_eq!(confirm.asked, 0);
        assert_eq!(result.previous.as_deref(), Some("old\n"));
        assert_eq!(result.merged.report.extras, vec!["Z".to_string()]);
        assert_eq!(fs::read_to_string(&fx.request.output).unwrap(), "old\n");
    }

    #[test]
    fn test_run_uses_configured_extras_header() {
        let fx = fixture(Some("A=1\n"), Some("B=2\n"));
        let settings = Settings {
            extras_header: "# local".to_string(),
            ..Default::default()
        };

        run(&fx.request, &settings, RunOptions::default(), &mut AssumeYes).unwrap();

        assert_eq!(
            fs::read_to_string(&fx.request.output).unwrap(),
            "A=1\n\n# local\nB=2\n"
        );
    }

    #[test]
    fn test_run_output_in_missing_directory_is_write_error() {
        let fx = fixture(Some("A=1\n"), Some("A=2\n"));
        let request = MergeRequest {
            output: fx.dir.path().join("missing").join(".env"),
            ..fx.request.clone()
        };

        let err = run(&request, &Settings::default(), RunOptions::default(), &mut AssumeYes)
            .unwrap_err();
        assert!(matches!(err, EnvMergeError::Write { .. }));
    }

    #[test]
    fn test_run_rerun_against_own_output_is_stable() {
        let fx = fixture(Some("# app\nA=1\nB=2\n"), Some("B=7\nX=1\n"));
        run(&fx.request, &Settings::default(), RunOptions::default(), &mut AssumeYes).unwrap();
        let first = fs::read_to_string(&fx.request.output).unwrap();

        let again = MergeRequest {
            template: fx.request.template.clone(),
            prior: fx.request.output.clone(),
            output: fx.dir.path().join(".env.next"),
        };
        run(&again, &Settings::default(), RunOptions::default(), &mut AssumeYes).unwrap();

        assert_eq!(fs::read_to_string(&again.output).unwrap(), first);
    }
}
