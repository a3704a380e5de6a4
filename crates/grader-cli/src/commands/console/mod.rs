//! `autograder console`: the grading console driven from stdin.
//!
//! Actions run on spawned tasks so input keeps flowing while a request is in
//! flight; their results come back over a channel and trigger a redraw.

mod repl;

use std::io::Write as _;

use anyhow::Context;
use grader_client::GradingClient;
use grader_console::{ActionOutcome, ConsoleError, GradingConsole, OutcomeStatus, render};
use grader_core::ActionKind;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::commands::shared::read_text;
use crate::context::AppContext;
use repl::ReplCommand;

type Console = GradingConsole<GradingClient>;

enum Event {
    Settled(Result<ActionOutcome, ConsoleError>),
    ToastExpired,
}

struct Session {
    console: Console,
    events: mpsc::UnboundedSender<Event>,
    tasks: JoinSet<()>,
}

/// Handle `autograder console`.
pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let (events, mut inbox) = mpsc::unbounded_channel();
    let mut session = Session {
        console: ctx.console(),
        events,
        tasks: JoinSet::new(),
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render(&session.console.snapshot()));
    println!("Backend: {}  (type `help` for commands)", ctx.client.base_url());
    prompt()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                match repl::parse(&line) {
                    Ok(ReplCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(error) = session.apply(command).await {
                            eprintln!("{error:#}");
                        }
                    }
                    Err(error) => eprintln!("{error:#}"),
                }
                prompt()?;
            }
            Some(event) = inbox.recv() => {
                if session.on_event(event) {
                    prompt()?;
                }
            }
        }
        while session.tasks.try_join_next().is_some() {}
    }

    session.console.teardown();
    tracing::debug!(pending = session.tasks.len(), "console closed");
    Ok(())
}

impl Session {
    async fn apply(&mut self, command: ReplCommand) -> anyhow::Result<()> {
        match command {
            ReplCommand::Set { field, value } => {
                self.console.edit(field, value)?;
                println!("{} updated.", field.label());
            }
            ReplCommand::LoadFile { field, path } => {
                let text = read_text(&path).await?;
                let chars = text.chars().count();
                self.console.edit(field, text)?;
                println!("{} loaded from {path} ({chars} chars).", field.label());
            }
            ReplCommand::Embed => self.spawn_action(ActionKind::EmbedRubric),
            ReplCommand::Grade => self.spawn_action(ActionKind::GradeAnswer),
            ReplCommand::Close => {
                self.console.close_dialog();
                self.redraw();
            }
            ReplCommand::Show => {
                self.console.tick();
                self.redraw();
            }
            ReplCommand::Help => println!("{}", repl::HELP),
            ReplCommand::Quit | ReplCommand::Nothing => {}
        }
        Ok(())
    }

    fn spawn_action(&mut self, action: ActionKind) {
        if self.console.is_busy(action) {
            println!("{} already in progress.", action.button_label(true));
            return;
        }
        let console = self.console.clone();
        let events = self.events.clone();
        self.tasks.spawn(async move {
            let result = console.run(action).await;
            let _ = events.send(Event::Settled(result));
        });
        println!("{}", action.button_label(true));
    }

    /// Returns `true` when something was printed.
    fn on_event(&mut self, event: Event) -> bool {
        match event {
            Event::Settled(Ok(outcome)) if outcome.status == OutcomeStatus::Discarded => false,
            Event::Settled(Ok(_)) => {
                self.schedule_toast_expiry();
                println!();
                self.redraw();
                true
            }
            Event::Settled(Err(error)) => {
                println!();
                eprintln!("{error}");
                true
            }
            Event::ToastExpired => {
                self.console.tick();
                false
            }
        }
    }

    fn schedule_toast_expiry(&mut self) {
        let ttl = self.console.toast_ttl();
        let events = self.events.clone();
        self.tasks.spawn(async move {
            tokio::time::sleep(ttl).await;
            let _ = events.send(Event::ToastExpired);
        });
    }

    fn redraw(&self) {
        println!("{}", render(&self.console.snapshot()));
    }
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    std::io::stdout().flush().context("failed to flush stdout")
}
