use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::{anyhow, Context};
use clap::Parser;
use desk_logging::{desk_debug, desk_info, desk_warn};
use newsdesk_core::{update, AppState, Msg};
use newsdesk_engine::{CardWriter, EngineHandle, ReqwestBackend};

use super::commands::{parse_command, Command, HELP_TEXT};
use super::config::Cli;
use super::effects::{EffectRunner, MsgSink};
use super::{logging, render};

/// Everything the controller loop reacts to.
pub enum AppInput {
    /// A line typed by the user.
    Line(String),
    /// Engine event already translated into a controller message.
    Engine(Msg),
    /// Stdin reached end of file.
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.validate()
        .map_err(|err| anyhow!(err))
        .context("invalid configuration")?;
    logging::initialize(cli.log);
    desk_info!("newsdesk starting, backend at {}", cli.base_url);

    let backend = ReqwestBackend::new(cli.backend_settings().context("invalid --base-url")?)
        .context("failed to build HTTP client")?;

    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let engine = EngineHandle::new(
        cli.engine_settings(),
        Arc::new(backend),
        Arc::new(MsgSink::new(input_tx.clone())),
    )
    .context("failed to start engine thread")?;
    let runner = EffectRunner::new(engine, CardWriter::new(&cli.output_dir));

    spawn_stdin_reader(input_tx).context("failed to start input thread")?;

    let mut controller = Controller {
        state: AppState::with_form(cli.form()),
        runner,
    };
    println!("{HELP_TEXT}");
    controller.print_panel();
    // Status is checked once at startup, then every sync period.
    controller.dispatch(Msg::SyncDue);

    while let Ok(input) = input_rx.recv() {
        match input {
            AppInput::Engine(msg) => controller.dispatch(msg),
            AppInput::Line(line) => match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(Command::Dispatch(msg))) => controller.dispatch(msg),
                Ok(Some(Command::Show)) => controller.print_panel(),
                Ok(Some(Command::Help)) => println!("{HELP_TEXT}"),
                Ok(Some(Command::Quit)) => break,
                Err(err) => println!("{err}"),
            },
            AppInput::InputClosed => {
                desk_debug!("stdin closed");
                break;
            }
        }
    }

    desk_info!("newsdesk shutting down");
    Ok(())
}

struct Controller {
    state: AppState,
    runner: EffectRunner,
}

impl Controller {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            self.print_panel();
        }
    }

    fn print_panel(&self) {
        let view = self.state.view();
        let lines = render::render(&view, &self.runner.card_path());
        let mut out = io::stdout().lock();
        for line in lines {
            let _ = writeln!(out, "{line}");
        }
        let _ = writeln!(out);
        let _ = out.flush();
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppInput>) -> io::Result<()> {
    thread::Builder::new()
        .name("newsdesk-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        desk_warn!("stdin read failed: {}", err);
                        break;
                    }
                };
                if tx.send(AppInput::Line(line)).is_err() {
                    return;
                }
            }
            let _ = tx.send(AppInput::InputClosed);
        })?;
    Ok(())
}
