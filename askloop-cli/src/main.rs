use std::fs;
use std::io::{StdinLock, Stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use askloop::questionnaire::answers_to_json;
use askloop::retry::{ExportTarget, RetryPolicy, ValidatedRetryLoop, Validation};
use askloop::utils::format::{
    Padding, RoundStyle, WithSpace, appended_unix_time, display_with_space, srounded, time_now,
};
use askloop::utils::{PromptSpec, Terminal, create_new_directory};
use askloop::Questionnaire;
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

type Console = Terminal<StdinLock<'static>, Stdout>;

#[derive(Parser)]
#[command(name = "askloop")]
#[command(version)]
#[command(about = "Interactive, validated terminal input")]
struct Cli {
    /// Give up on a prompt after this many failed attempts
    #[arg(long, value_name = "N")]
    max_attempts: Option<u32>,

    /// Give up on a prompt once a failed attempt lands after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Ask the prompts listed in this JSON file and print the answers as JSON
    #[arg(long, value_name = "FILE")]
    questions: Option<PathBuf>,

    /// Do not echo accepted values
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn policy(&self) -> RetryPolicy {
        let mut policy = RetryPolicy::forever();
        if let Some(n) = self.max_attempts {
            policy = policy.with_max_attempts(n);
        }
        if let Some(secs) = self.timeout_secs {
            policy = policy.with_timeout(Duration::from_secs(secs));
        }
        policy
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let mut terminal = Terminal::stdio();
    terminal.welcome_banner("askloop")?;

    match &cli.questions {
        Some(path) => run_questionnaire(&cli, path, &mut terminal),
        None => run_session(&cli, &mut terminal),
    }
}

fn run_questionnaire(cli: &Cli, path: &Path, terminal: &mut Console) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read questionnaire {}", path.display()))?;
    let mut questionnaire = Questionnaire::from_json(&text)
        .with_context(|| format!("invalid questionnaire {}", path.display()))?;

    let policy = cli.policy();
    if !policy.is_forever() {
        questionnaire = questionnaire.with_policy(policy);
    }
    if cli.quiet {
        for prompt in &mut questionnaire.prompts {
            prompt.echo = false;
        }
    }

    let answers = questionnaire.ask(terminal)?;
    terminal.say(serde_json::to_string_pretty(&answers_to_json(&answers))?)?;
    Ok(())
}

fn run_session(cli: &Cli, terminal: &mut Console) -> Result<()> {
    let policy = cli.policy();
    let echo = !cli.quiet;

    let count = terminal
        .acquire(
            &PromptSpec::int("sample count")
                .default(10)
                .int_range(1..=100)
                .echo(echo)
                .policy(policy),
        )?
        .as_int()
        .context("sample count is not an integer")?;

    let weight = terminal
        .acquire(
            &PromptSpec::double("weight")
                .default(1.0)
                .double_range(0.0..=1.0)
                .echo(echo)
                .policy(policy),
        )?
        .as_double()
        .context("weight is not a number")?;

    let list = ValidatedRetryLoop::new("line list")
        .policy(policy)
        .run_file(terminal, |path| {
            let text = fs::read_to_string(path)?;
            let entries: Vec<String> = text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();

            if entries.is_empty() {
                return Ok::<_, std::io::Error>(Validation::reject(
                    "No entries in file. Can not proceed.",
                ));
            }
            Ok(Validation::Accept(entries))
        })?;

    let take = usize::try_from(count).unwrap_or(usize::MAX);
    let selected: Vec<&String> = list.value.iter().take(take).collect();
    let width = selected.iter().map(|e| e.chars().count()).max().unwrap_or(0) + 2;

    let mut rows = Vec::with_capacity(selected.len());
    for (i, entry) in selected.iter().enumerate() {
        terminal.status_line(format_args!("Scoring {}/{}", i + 1, selected.len()))?;
        let score = entry.chars().count() as f64 * weight;
        rows.push(format!(
            "{}{}{}",
            display_with_space(i + 1, 6, Padding::Trailing),
            entry.with_space(width, Padding::Trailing),
            srounded(score, 2, RoundStyle::Fixed).with_space(10, Padding::Leading)
        ));
    }
    terminal.say("")?;

    let mut summary = vec![
        format!("Source: {} ({} entries)", list.file_name, list.value.len()),
        format!("Created: {}", time_now()),
        String::new(),
    ];
    summary.extend(rows);
    let summary = summary.join("\n");
    terminal.say(&summary)?;

    let target = ValidatedRetryLoop::for_export("Summary")
        .policy(policy)
        .run_export(terminal)?;

    if let ExportTarget::Directory(dir) = target {
        let run_name = appended_unix_time(&list.file_name, &Local::now(), "_");
        let created = create_new_directory(&run_name, &[], &dir, false)?;
        let file = created.root.join("summary.txt");
        fs::write(&file, format!("{}\n", summary))
            .with_context(|| format!("could not write {}", file.display()))?;
        tracing::info!(path = %file.display(), "summary exported");
        terminal.say(format_args!("Summary written to {}.", file.display()))?;
    }

    Ok(())
}
