use std::{
    io::{self, BufRead},
    path::PathBuf,
    sync::Arc,
    thread,
};

use anyhow::Result;
use clap::Parser;
use invoice_core::{
    DirectoryDownloadSink, HttpInvoiceTransport, InvoiceFormController, InvoiceTransport,
    PendingSave, SaveState, SubmitOutcome, TransportError,
};
use shared::domain::FormAction;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod presenter;

use commands::{UiCommand, HELP};
use config::load_settings;
use presenter::TerminalTable;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Build an invoice line by line and submit it for document generation"
)]
struct Args {
    /// TOML file with `server_url` and `output_dir` (defaults to ./invoice.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    /// Directory that receives downloaded invoice documents
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

type Completion = (PendingSave, Result<SubmitOutcome, TransportError>);

struct Session {
    controller: InvoiceFormController<TerminalTable<io::Stdout>>,
    transport: Arc<dyn InvoiceTransport>,
    sink: DirectoryDownloadSink,
    completions: mpsc::Sender<Completion>,
}

impl Session {
    /// Returns false once the session should end.
    fn handle(&mut self, command: UiCommand) -> bool {
        match command {
            UiCommand::Set { field, value } => self.controller.set_field(field, value),
            UiCommand::Action(FormAction::AddItem) => match self.controller.add_item() {
                Ok(item) => println!("ok: added {} ({})", item.description, item.total_cost),
                Err(err) => println!("{}", presenter::validation_notice(err)),
            },
            UiCommand::Action(FormAction::SaveInvoice) => self.start_save(),
            UiCommand::Action(FormAction::ClearAll) => {
                self.controller.clear_all();
                println!("ok: form cleared");
            }
            UiCommand::Show => {
                let mut out = io::stdout().lock();
                if let Err(err) = presenter::write_form(&mut out, &self.controller) {
                    warn!(error = %err, "failed to print form");
                }
            }
            UiCommand::Fields => println!("{}", presenter::fields_help()),
            UiCommand::Help => println!("{HELP}"),
            UiCommand::Quit => return false,
        }
        true
    }

    fn start_save(&mut self) {
        let pending = match self.controller.begin_save() {
            Ok(pending) => pending,
            Err(err) => {
                debug!(kind = ?err.kind(), "save not started");
                println!("{}", presenter::save_error_notice(&err));
                return;
            }
        };

        println!("[{}]", self.controller.save_state().save_label());
        let transport = Arc::clone(&self.transport);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = transport.submit(pending.payload()).await;
            let _ = completions.send((pending, outcome)).await;
        });
    }

    fn complete_save(&mut self, (pending, outcome): Completion) {
        match self
            .controller
            .finish_save(pending, outcome, &mut self.sink)
        {
            Ok(receipt) => println!("{}", presenter::save_success_notice(&receipt)),
            Err(err) => println!("{}", presenter::save_error_notice(&err)),
        }
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(64);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(output_dir) = args.output_dir {
        settings.output_dir = output_dir;
    }

    let transport = HttpInvoiceTransport::new(&settings.server_url)?;
    info!(
        endpoint = %transport.endpoint(),
        output_dir = %settings.output_dir.display(),
        "invoice form ready"
    );

    let (completion_tx, mut completion_rx) = mpsc::channel::<Completion>(1);
    let mut session = Session {
        controller: InvoiceFormController::new(TerminalTable::new(io::stdout())),
        transport: Arc::new(transport),
        sink: DirectoryDownloadSink::new(settings.output_dir),
        completions: completion_tx,
    };

    println!("{HELP}");
    let mut lines = spawn_stdin_reader();
    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<UiCommand>() {
                    Ok(command) => {
                        if !session.handle(command) {
                            break;
                        }
                    }
                    Err(err) => println!("error: {err}"),
                }
            }
            Some(completion) = completion_rx.recv() => session.complete_save(completion),
        }
    }

    if session.controller.save_state() == SaveState::Saving {
        info!("waiting for in-flight save before exit");
        if let Some(completion) = completion_rx.recv().await {
            session.complete_save(completion);
        }
    }

    Ok(())
}
