//! Interactive shell.
//!
//! Generation runs on a background task while the loop keeps reading
//! commands and animating a spinner; a second generate is refused until the
//! first one resolves.

use anyhow::{Context, Result};
use std::io::Write;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::error::GenerateError;
use crate::types::{Idea, Theme};
use crate::ui::app::{App, PendingGeneration};
use crate::ui::card::CardRef;
use crate::ui::render;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

const HELP: &str = "\
Commands:
  generate <topic> [| <style>]   ask for three new meme coin ideas
  surprise                       random topic and style
  pin <card>                     pin or unpin a card (p1, 2.3, ...)
  copy <card>                    copy a card to the clipboard
  show | pinned | history        redraw galleries
  clear history|pinned|all       forget saved ideas
  theme [light|dark]             switch or toggle the palette
  help                           this text
  quit                           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Generate { topic: String, style: Option<String> },
    Surprise,
    Pin(CardRef),
    Copy(CardRef),
    Show,
    Pinned,
    History,
    Clear(ClearTarget),
    Theme(Option<Theme>),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTarget {
    History,
    Pinned,
    All,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(v, r)| (v, r.trim()))
        .unwrap_or((line, ""));

    let card = |rest: &str| rest.parse::<CardRef>().map_err(|e| e.to_string());

    match verb.to_ascii_lowercase().as_str() {
        "" => Ok(ShellCommand::Empty),
        "generate" | "gen" | "g" => {
            let (topic, style) = match rest.split_once('|') {
                Some((topic, style)) => (topic.trim(), Some(style.trim().to_string())),
                None => (rest, None),
            };
            Ok(ShellCommand::Generate {
                topic: topic.to_string(),
                style,
            })
        }
        "surprise" => Ok(ShellCommand::Surprise),
        "pin" => card(rest).map(ShellCommand::Pin),
        "copy" => card(rest).map(ShellCommand::Copy),
        "show" | "ls" => Ok(ShellCommand::Show),
        "pinned" => Ok(ShellCommand::Pinned),
        "history" => Ok(ShellCommand::History),
        "clear" => match rest {
            "history" => Ok(ShellCommand::Clear(ClearTarget::History)),
            "pinned" => Ok(ShellCommand::Clear(ClearTarget::Pinned)),
            "all" => Ok(ShellCommand::Clear(ClearTarget::All)),
            _ => Err("usage: clear history|pinned|all".to_string()),
        },
        "theme" if rest.is_empty() => Ok(ShellCommand::Theme(None)),
        "theme" => rest.parse().map(|t| ShellCommand::Theme(Some(t))),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}', try `help`")),
    }
}

pub async fn run(app: &mut App) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<PendingGeneration> = None;
    let mut ticker = tokio::time::interval(SPINNER_INTERVAL);
    let mut frame = 0usize;
    let mut stdin_closed = false;

    let palette = app.palette();
    println!("{}", palette.title("✨ CoinSpark: meme coin ideas on demand"));
    println!("{}", palette.muted("Type `help` for commands."));
    println!("{}", app.render(Instant::now()));
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line(), if !stdin_closed => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    debug!("stdin closed");
                    stdin_closed = true;
                    if pending.is_none() {
                        break;
                    }
                    continue;
                };

                match parse_command(&line) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(command) => {
                        let output = execute(app, command, &mut pending).await;
                        if !output.is_empty() {
                            println!("{output}");
                        }
                    }
                    Err(message) => println!("{}", render::render_error(&message, &app.palette())),
                }
                prompt();
            }
            Some(result) = wait_pending(&mut pending), if pending.is_some() => {
                clear_spinner();
                if let Some(done) = pending.take() {
                    let now = Instant::now();
                    match app.finish_generation(done.into_request(), result).await {
                        Ok(()) => println!("{}", app.render_history(now)),
                        Err(e) => {
                            println!("{}", render::render_error(&e.to_string(), &app.palette()))
                        }
                    }
                }
                if stdin_closed {
                    break;
                }
                prompt();
            }
            _ = ticker.tick(), if pending.is_some() => {
                let topic = pending
                    .as_ref()
                    .map(|p| p.request().topic.as_str())
                    .unwrap_or_default();
                let spinner = SPINNER_FRAMES[frame % SPINNER_FRAMES.len()];
                eprint!("\r{} Generating ideas for '{}'...", spinner, topic);
                let _ = std::io::stderr().flush();
                frame = frame.wrapping_add(1);
            }
        }
    }

    Ok(())
}

async fn wait_pending(
    pending: &mut Option<PendingGeneration>,
) -> Option<Result<Vec<Idea>, GenerateError>> {
    match pending.as_mut() {
        Some(p) => Some(p.await),
        None => None,
    }
}

async fn execute(
    app: &mut App,
    command: ShellCommand,
    pending: &mut Option<PendingGeneration>,
) -> String {
    let now = Instant::now();
    let palette = app.palette();

    let started = match &command {
        ShellCommand::Generate { topic, style } => {
            Some(app.start_generation(topic, style.as_deref()))
        }
        ShellCommand::Surprise => Some(app.start_surprise()),
        _ => None,
    };
    if let Some(started) = started {
        return match started {
            Ok(p) => {
                let request = p.request();
                let label = match &request.style {
                    Some(style) => format!("Generating '{}' in {} style...", request.topic, style),
                    None => format!("Generating '{}'...", request.topic),
                };
                *pending = Some(p);
                palette.muted(&label)
            }
            Err(e) => render::render_error(&e.to_string(), &palette),
        };
    }

    match command {
        ShellCommand::Pin(card) => match app.toggle_pin(card).await {
            Ok(change) => format!("{card}: {change:?}\n{}", app.render_pinned(now)),
            Err(e) => render::render_error(&e.to_string(), &palette),
        },
        ShellCommand::Copy(card) => match app.copy(card, now) {
            Ok(true) => format!("[{card}] {}", palette.good(render::COPIED_LABEL)),
            Ok(false) => String::new(),
            Err(e) => render::render_error(&e.to_string(), &palette),
        },
        ShellCommand::Show => app.render(now),
        ShellCommand::Pinned => app.render_pinned(now),
        ShellCommand::History => app.render_history(now),
        ShellCommand::Clear(target) => {
            if matches!(target, ClearTarget::History | ClearTarget::All) {
                app.clear_history().await;
            }
            if matches!(target, ClearTarget::Pinned | ClearTarget::All) {
                app.clear_pinned().await;
            }
            palette.muted("Cleared.")
        }
        ShellCommand::Theme(theme) => {
            let theme = match theme {
                Some(theme) => {
                    app.set_theme(theme).await;
                    theme
                }
                None => app.toggle_theme().await,
            };
            format!("Theme set to {}.", theme.as_str())
        }
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Generate { .. }
        | ShellCommand::Surprise
        | ShellCommand::Quit
        | ShellCommand::Empty => String::new(),
    }
}

fn prompt() {
    print!("coinspark> ");
    let _ = std::io::stdout().flush();
}

fn clear_spinner() {
    eprint!("\r\x1b[2K");
    let _ = std::io::stderr().flush();
}
