#![warn(missing_docs)]
//! # soc-triage binary
//!
//! Terminal client for the alert analysis service.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use soc_triage_app::command::{Command, HELP_TEXT, parse_command};
use soc_triage_app::config::{ConfigOverrides, load_file_config, process_env, resolve_config};
use soc_triage_app::render::{render_history, render_samples, render_view};
use soc_triage_app::{
    APP_VERSION, AnalysisCompletion, AnalysisJob, Submission, SystemClock, TriageSession,
    build_client,
};
use soc_triage_ui::CompletionOutcome;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const TICK_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(
    name = "soc-triage",
    version = APP_VERSION,
    about = "Send security alerts to an analysis service and show the verdict"
)]
struct Args {
    /// Analysis service base URL (overrides SOC_TRIAGE_API_URL and the config file).
    #[arg(long)]
    api_url: Option<String>,
    /// Optional TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Delay between result arrival and display, in milliseconds.
    #[arg(long)]
    reveal_delay_ms: Option<u64>,
    /// Transport timeout in milliseconds; 0 disables it.
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Analyze this alert, print the verdict, and exit.
    #[arg(long)]
    alert: Option<String>,
    /// Write diagnostics to stderr.
    #[arg(long, default_value_t = false)]
    log_to_stderr: bool,
}

enum LoopEvent {
    Line(String),
    InputClosed,
    Completed(AnalysisCompletion),
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_to_stderr);

    let file = match &args.config {
        Some(path) => Some(load_file_config(path)?),
        None => None,
    };
    let overrides = ConfigOverrides {
        api_url: args.api_url.clone(),
        reveal_delay_ms: args.reveal_delay_ms,
        request_timeout_ms: args.timeout_ms,
    };
    let config = resolve_config(&overrides, file.as_ref(), process_env)?;
    tracing::info!(
        version = APP_VERSION,
        api_url = %config.api_url,
        reveal_delay_ms = config.reveal_delay_ms,
        request_timeout_ms = config.request_timeout_ms,
        "configuration resolved"
    );

    let client = build_client(&config).context("failed to build analysis client")?;

    match args.alert {
        Some(alert) => run_once(TriageSession::new(client, SystemClock::new(), 0), alert),
        None => run_interactive(TriageSession::new(
            client,
            SystemClock::new(),
            config.reveal_delay_ms,
        )),
    }
}

fn init_tracing(log_to_stderr: bool) {
    if !log_to_stderr {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

fn run_once(mut session: TriageSession<SystemClock>, alert: String) -> anyhow::Result<()> {
    session.set_input(alert);
    if session.analyze_blocking().is_none() {
        anyhow::bail!("alert text is empty; nothing was sent");
    }

    let rendered = render_view(&session.view()).unwrap_or_default();
    if session.state().error().is_some() {
        anyhow::bail!("{rendered}");
    }

    print!("{rendered}");
    Ok(())
}

fn run_interactive(mut session: TriageSession<SystemClock>) -> anyhow::Result<()> {
    println!("soc-triage {APP_VERSION}");
    println!("{HELP_TEXT}");
    print!("{}", render_samples());

    let (event_tx, event_rx) = mpsc::channel::<LoopEvent>();
    spawn_input_reader(event_tx.clone())?;
    let mut input_open = true;

    loop {
        match event_rx.recv_timeout(TICK_INTERVAL) {
            Ok(LoopEvent::Line(line)) => match parse_command(&line) {
                Command::Quit => break,
                Command::Help => println!("{HELP_TEXT}"),
                Command::History => print!("{}", render_history(session.state().history())),
                Command::Invalid(message) => println!("{message}"),
                Command::Sample(index) => {
                    if session.apply_sample(index) {
                        println!("input: {}", session.state().input());
                    } else {
                        println!("no such sample");
                    }
                }
                Command::Submit => submit(&mut session, &event_tx)?,
                Command::Alert(text) => {
                    session.set_input(text);
                    submit(&mut session, &event_tx)?;
                }
            },
            Ok(LoopEvent::Completed(completion)) => {
                if session.apply(completion) == CompletionOutcome::Applied
                    && let Some(rendered) = render_view(&session.view())
                {
                    print_block(&rendered);
                }
            }
            Ok(LoopEvent::InputClosed) => input_open = false,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if session.tick()
            && let Some(rendered) = render_view(&session.view())
        {
            print_block(&rendered);
        }

        let state = session.state();
        if !input_open && !state.loading() && state.reveal_deadline_ms().is_none() {
            break;
        }
    }

    Ok(())
}

fn submit(
    session: &mut TriageSession<SystemClock>,
    event_tx: &Sender<LoopEvent>,
) -> anyhow::Result<()> {
    let job = match session.submit_if_ready() {
        Submission::Started(job) => job,
        Submission::Busy => {
            println!("analysis already in progress");
            return Ok(());
        }
        Submission::Blank => {
            println!("nothing to analyze: input is empty");
            return Ok(());
        }
    };

    if let Some(rendered) = render_view(&session.view()) {
        println!("{rendered}");
    }
    spawn_analysis(job, event_tx.clone())
}

fn spawn_analysis(job: AnalysisJob, event_tx: Sender<LoopEvent>) -> anyhow::Result<()> {
    std::thread::Builder::new()
        .name(format!("soc-triage-request-{}", job.request_id()))
        .spawn(move || {
            let _ = event_tx.send(LoopEvent::Completed(job.run()));
        })
        .context("failed to spawn analysis worker")?;
    Ok(())
}

fn spawn_input_reader(event_tx: Sender<LoopEvent>) -> anyhow::Result<()> {
    std::thread::Builder::new()
        .name("soc-triage-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if event_tx.send(LoopEvent::Line(line)).is_err() {
                    return;
                }
            }
            let _ = event_tx.send(LoopEvent::InputClosed);
        })
        .context("failed to spawn input reader")?;
    Ok(())
}

fn print_block(rendered: &str) {
    println!("{}", rendered.trim_end());
}
