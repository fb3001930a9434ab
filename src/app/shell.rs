use crate::nav::{Navigator, Screen};
use crate::poll::spawn_connectivity_poll;
use crate::view::{Controller, GoalForm};
use anyhow::{Context, Result};
use console::style;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Duration;

const HELP: &str = "\
commands:
  dashboard | goal | today | review | log | settings   switch screen
  refresh                                              reload the current screen
  submit <goal> [--by <deadline>] [--email <addr>] [--autonomy <level>]
  approve <task-id>...                                 approve pending tasks
  done <task-id> | undo <task-id>                      toggle completion
  set api <url> | set autonomy <level>                 change settings
  clear-session                                        forget the current session
  status                                               check connectivity now
  login                                                backend sign-in URL
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Noop,
    Navigate(Screen),
    Refresh,
    Submit(GoalForm),
    Approve(Vec<String>),
    Toggle { task_id: String, done: bool },
    SetApiBase(String),
    SetAutonomy(String),
    ClearSession,
    Status,
    Login,
    Help,
    Quit,
}

pub(crate) fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(h, r)| (h, r.trim()));

    if let Ok(screen) = Screen::from_str(head)
        && rest.is_empty()
    {
        return Ok(ShellCommand::Navigate(screen));
    }

    let command = match head {
        "" => ShellCommand::Noop,
        "go" => Screen::from_str(rest)
            .map(ShellCommand::Navigate)
            .map_err(|_| format!("unknown screen: {rest}"))?,
        "refresh" => ShellCommand::Refresh,
        "submit" => ShellCommand::Submit(parse_goal(rest)),
        "approve" => ShellCommand::Approve(rest.split_whitespace().map(String::from).collect()),
        "done" | "undo" if !rest.is_empty() => ShellCommand::Toggle {
            task_id: rest.to_string(),
            done: head == "done",
        },
        "done" | "undo" => return Err(format!("usage: {head} <task-id>")),
        "set" => match rest.split_once(char::is_whitespace) {
            Some(("api", value)) => ShellCommand::SetApiBase(value.trim().to_string()),
            Some(("autonomy", value)) => ShellCommand::SetAutonomy(value.trim().to_string()),
            _ => return Err("usage: set api <url> | set autonomy <level>".to_string()),
        },
        "clear-session" => ShellCommand::ClearSession,
        "status" => ShellCommand::Status,
        "login" => ShellCommand::Login,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(command)
}

const GOAL_FLAGS: [&str; 3] = ["--by", "--email", "--autonomy"];

/// `submit` arguments: goal text followed by optional `--by`, `--email`
/// and `--autonomy` flags. Any other `--word` stays part of the goal.
fn parse_goal(rest: &str) -> GoalForm {
    // (flag, flag start, value start)
    let mut flags = Vec::new();
    let mut offset = 0;
    for piece in rest.split_inclusive(char::is_whitespace) {
        if let Some(flag) = GOAL_FLAGS.iter().find(|f| piece.trim_end() == **f) {
            flags.push((*flag, offset, offset + piece.len()));
        }
        offset += piece.len();
    }

    let goal_end = flags.first().map_or(rest.len(), |(_, start, _)| *start);
    let mut form = GoalForm::new(rest[..goal_end].trim());
    for (i, (flag, _, value_start)) in flags.iter().enumerate() {
        let value_end = flags.get(i + 1).map_or(rest.len(), |(_, start, _)| *start);
        let value = Some(rest[*value_start..value_end].trim().to_string());
        match *flag {
            "--by" => form.deadline = value,
            "--email" => form.email = value,
            _ => form.autonomy = value,
        }
    }
    form
}

/// Interactive loop: one navigator, a background connectivity poll, and
/// commands read line by line from stdin.
pub async fn run_shell(controller: Arc<Controller>, poll_every: Duration) -> Result<()> {
    let poll = spawn_connectivity_poll(Arc::clone(&controller), poll_every);
    let mut nav = Navigator::new();

    navigate(&mut nav, &controller, Screen::Dashboard).await;
    println!("{}", style("Type `help` for commands.").dim());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style(format!("{}>", nav.active())).cyan());
        std::io::stdout().flush().context("failed to flush prompt")?;

        let Some(line) = lines.next_line().await.context("failed to read command")? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Noop => {}
            ShellCommand::Navigate(screen) => navigate(&mut nav, &controller, screen).await,
            ShellCommand::Refresh => {
                let screen = nav.active();
                navigate(&mut nav, &controller, screen).await;
            }
            ShellCommand::Submit(form) => {
                let _ = controller.submit_goal(form).await;
            }
            ShellCommand::Approve(ids) => {
                let _ = controller.approve(&ids).await;
            }
            ShellCommand::Toggle { task_id, done } => {
                let _ = controller.toggle_task(&task_id, done).await;
            }
            ShellCommand::SetApiBase(url) => {
                let _ = controller.save_settings(Some(&url), None);
            }
            ShellCommand::SetAutonomy(level) => {
                let _ = controller.save_settings(None, Some(&level));
            }
            ShellCommand::ClearSession => {
                let _ = controller.clear_session();
            }
            ShellCommand::Status => {
                controller.check_connectivity().await;
            }
            ShellCommand::Login => {
                controller.show_login();
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => break,
        }
    }

    poll.abort();
    Ok(())
}

/// Activate `screen`. The dashboard has no single loader of its own, so
/// both of its halves are re-fetched here.
pub async fn navigate(nav: &mut Navigator, controller: &Controller, screen: Screen) {
    nav.activate(screen, controller).await;
    if screen == Screen::Dashboard {
        let _ = controller.refresh_dashboard().await;
    }
}
