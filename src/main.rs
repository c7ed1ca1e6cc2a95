use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use envmerge::{
    find_config_file, generate_init_file, load_config, logging, merge_settings, print_cancelled,
    print_diff, print_dry_run, print_error, print_written, run, should_use_colors, AssumeYes,
    CliMergeOptions, Confirm, EnvMergeToml, LinePrompt, MergeRequest, OutputContext, OutputMode,
    RunOptions,
};

#[derive(Parser)]
#[command(name = "envmerge")]
#[command(
    version,
    about = "Rebuild a customized .env file from a new template, keeping local values"
)]
struct Cli {
    /// Template file listing the recognized variables (e.g. .env.example)
    #[arg(required_unless_present = "init")]
    template: Option<PathBuf>,

    /// Previously customized file whose values are kept
    #[arg(required_unless_present = "init")]
    prior: Option<PathBuf>,

    /// Destination of the merged file (must differ from PRIOR)
    #[arg(required_unless_present = "init")]
    output: Option<PathBuf>,

    /// Overwrite an existing output file without asking
    #[arg(short, long)]
    yes: bool,

    /// Show what would be written as a diff, without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show changes to the output file in diff format
    #[arg(short, long)]
    diff: bool,

    /// Print only the output path
    #[arg(short, long)]
    quiet: bool,

    /// Comment line placed above variables missing from the template
    #[arg(long, value_name = "TEXT")]
    extras_header: Option<String>,

    /// Answer that confirms overwriting an existing output file
    #[arg(long, value_name = "TOKEN")]
    confirm_token: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate a template envmerge.toml configuration file
    #[arg(long, conflicts_with_all = ["template", "prior", "output"])]
    init: bool,

    /// Specify config file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let ctx = OutputContext::new(mode, should_use_colors(cli.no_color));

    if cli.init {
        return handle_init(&ctx);
    }

    let (Some(template), Some(prior), Some(output)) =
        (cli.template.clone(), cli.prior.clone(), cli.output.clone())
    else {
        // clap enforces all three unless --init
        print_error("TEMPLATE, PRIOR and OUTPUT are required", &ctx);
        return ExitCode::from(2);
    };

    let toml_config = load_configuration(&cli.config, &ctx);
    let cli_options = CliMergeOptions {
        extras_header: cli.extras_header.clone(),
        confirm_token: cli.confirm_token.clone(),
    };
    let settings = match merge_settings(&cli_options, toml_config.as_ref()) {
        Ok(settings) => settings,
        Err(e) => {
            print_error(&e.to_string(), &ctx);
            return ExitCode::from(1);
        }
    };

    let request = MergeRequest {
        template,
        prior,
        output,
    };
    let options = RunOptions {
        dry_run: cli.dry_run,
        capture_previous: cli.diff,
    };

    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(LinePrompt::stdio(settings.confirm_token.clone()))
    };

    match run(&request, &settings, options, confirm.as_mut()) {
        Ok(result) => {
            let label = request.output.display().to_string();
            if cli.dry_run || cli.diff {
                let previous = result.previous.as_deref().unwrap_or("");
                print_diff(&label, previous, &result.merged.content(), &ctx);
            }
            if result.written {
                print_written(&request.output, &result.merged.report, &ctx);
            } else {
                print_dry_run(&request.output, &result.merged.report, &ctx);
            }
            ExitCode::SUCCESS
        }
        Err(e) if e.is_cancellation() => {
            print_cancelled(&e.to_string(), &ctx);
            ExitCode::from(1)
        }
        Err(e) => {
            print_error(&e.to_string(), &ctx);
            ExitCode::from(1)
        }
    }
}

fn handle_init(ctx: &OutputContext) -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e.to_string(), ctx);
            ExitCode::from(1)
        }
    }
}

fn load_configuration(explicit_path: &Option<PathBuf>, ctx: &OutputContext) -> Option<EnvMergeToml> {
    let config_path = explicit_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|d| find_config_file(&d))
    })?;

    match load_config(&config_path) {
        Ok(config) => {
            tracing::info!(path = %config_path.display(), "using config");
            Some(config)
        }
        Err(e) => {
            eprintln!(
                "{}Warning:{} failed to load {}: {e}",
                ctx.colors.warning,
                ctx.colors.reset(),
                config_path.display()
            );
            None
        }
    }
}
