//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use jobnote_core::{ExtractionService, RecordAssembler, load_template, render_template};
use jobnote_shared::{AppConfig, init_config, load_config};
use jobnote_techstack::pick_stack;
use tracing::info;
use url::Url;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// jobnote — turn saved job vacancy pages into structured Markdown notes.
#[derive(Parser)]
#[command(
    name = "jobnote",
    version,
    about = "Turn saved job vacancy pages into structured Markdown notes.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract a vacancy from a saved HTML page and write a note.
    Parse {
        /// Saved vacancy page.
        html_file: PathBuf,

        /// URL the page was saved from (selects the site adapter).
        #[arg(long)]
        url: String,

        /// Output directory (defaults to `[defaults].output_dir`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Custom note template (defaults to `[paths].template` or the built-in one).
        #[arg(long)]
        template: Option<PathBuf>,

        /// Print the note instead of writing it.
        #[arg(long)]
        stdout: bool,

        /// Print the canonical record as JSON instead of a note.
        #[arg(long)]
        json: bool,
    },

    /// Run the classifier on free text.
    Classify {
        /// Vacancy title.
        #[arg(long, default_value = "")]
        role: String,

        /// Structured level label, e.g. "Middle" or "Старший".
        #[arg(long, default_value = "")]
        level_hint: String,

        /// Salary text, e.g. "от 100 000 ₽ до вычета налогов".
        #[arg(long)]
        salary: Option<String>,

        /// Description text.
        text: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so notes can be piped.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "jobnote=info",
        1 => "jobnote=debug",
        _ => "jobnote=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse {
            html_file,
            url,
            out,
            template,
            stdout,
            json,
        } => cmd_parse(&html_file, &url, out.as_deref(), template.as_deref(), stdout, json),
        Command::Classify {
            role,
            level_hint,
            salary,
            text,
        } => cmd_classify(&role, &level_hint, salary.as_deref(), &text),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_parse(
    html_file: &Path,
    url: &str,
    out: Option<&Path>,
    template: Option<&Path>,
    stdout: bool,
    json: bool,
) -> Result<()> {
    Url::parse(url).map_err(|e| eyre!("invalid --url '{url}': {e}"))?;

    let config = load_config()?;
    let html = std::fs::read_to_string(html_file)
        .wrap_err_with(|| format!("failed to read {}", html_file.display()))?;

    let mut service = ExtractionService::from_config(&config)?;
    let record = service.parse_page(&html, url, Local::now())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let template_path = template.map(Path::to_path_buf).or_else(|| {
        config
            .paths
            .template
            .as_ref()
            .map(PathBuf::from)
    });
    let template = load_template(template_path.as_deref())?;
    let note = render_template(&template, &record)?;

    if stdout {
        print!("{note}");
        return Ok(());
    }

    let out_dir = output_dir(out, &config);
    std::fs::create_dir_all(&out_dir)
        .wrap_err_with(|| format!("failed to create {}", out_dir.display()))?;

    let path = out_dir.join(&record.filename);
    std::fs::write(&path, note).wrap_err_with(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "note written");
    println!("Note written to: {}", path.display());
    Ok(())
}

fn output_dir(flag: Option<&Path>, config: &AppConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.defaults.output_dir))
}

fn cmd_classify(role: &str, level_hint: &str, salary: Option<&str>, text: &str) -> Result<()> {
    let config = load_config()?;
    let assembler = RecordAssembler::from_config(&config)?;
    let classifier = assembler.classifier();

    let level = classifier.infer_level(role, text, level_hint);
    let work_mode = classifier.infer_work_mode(text);
    let skills = assembler.tech_stack().extract_skills(text);
    let stack = pick_stack(&skills, config.defaults.max_stack_items);

    let mut output = serde_json::json!({
        "role_norm": classifier.normalize_role(role),
        "level": level.map(|l| l.to_string()).unwrap_or_default(),
        "work_mode": work_mode.map(|m| m.to_string()).unwrap_or_default(),
        "skills": skills,
        "stack": stack,
    });

    if let Some(salary) = salary {
        let estimate = classifier.parse_salary(salary);
        output["salary_min_net"] = estimate.salary_min_net.into();
        output["salary_currency"] = estimate.salary_currency.into();
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_arguments() {
        let cli = Cli::try_parse_from([
            "jobnote",
            "-vv",
            "parse",
            "page.html",
            "--url",
            "https://hh.ru/vacancy/1",
            "--stdout",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Command::Parse {
            html_file,
            url,
            out,
            stdout,
            json,
            ..
        } = cli.command
        else {
            panic!("expected parse command");
        };
        assert_eq!(html_file, PathBuf::from("page.html"));
        assert_eq!(url, "https://hh.ru/vacancy/1");
        assert!(out.is_none());
        assert!(stdout);
        assert!(!json);
    }

    #[test]
    fn parse_requires_url() {
        assert!(Cli::try_parse_from(["jobnote", "parse", "page.html"]).is_err());
    }

    #[test]
    fn output_dir_prefers_flag() {
        let config = AppConfig::default();
        assert_eq!(output_dir(None, &config), PathBuf::from("."));
        assert_eq!(
            output_dir(Some(Path::new("notes")), &config),
            PathBuf::from("notes")
        );
    }
}
