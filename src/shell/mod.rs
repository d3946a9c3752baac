pub mod command;

use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::clients::ApartmentApi;
use crate::display::{render_form, render_table};
use crate::sync::SyncController;

pub use command::{parse_command, Command, ParseError, HELP};

/// Prints the list again every time the store is replaced.
fn spawn_renderer<A: ApartmentApi + 'static>(controller: &SyncController<A>) -> JoinHandle<()> {
    let mut updates = controller.store().subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            println!("{}", render_table(&snapshot));
        }
    })
}

/// Runs one command. Mutations are spawned and not awaited, so the prompt stays
/// usable while a request is out. Returns `false` once the user asked to quit.
pub async fn handle_command<A: ApartmentApi + 'static>(
    controller: &Arc<SyncController<A>>,
    command: Command,
) -> bool {
    match command {
        Command::List => println!("{}", render_table(&controller.store().snapshot())),
        Command::Form => println!("{}", render_form(&controller.form().await)),
        Command::Set { field, value } => {
            if let Err(e) = controller.set_field(field, &value).await {
                println!("{e}");
            }
        }
        Command::Edit(id) => match controller.begin_edit(&id).await {
            Ok(()) => println!("{}", render_form(&controller.form().await)),
            Err(e) => println!("{e}"),
        },
        Command::Reset => controller.reset_form().await,
        Command::Submit => {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit().await });
        }
        Command::Delete(id) => {
            let controller = controller.clone();
            tokio::spawn(async move { controller.remove(&id).await });
        }
        Command::Toggle(id) => {
            let controller = controller.clone();
            tokio::spawn(async move { controller.toggle_status(&id).await });
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => return false,
    }
    true
}

pub async fn run<A: ApartmentApi + 'static>(controller: Arc<SyncController<A>>) -> Result<()> {
    let renderer = spawn_renderer(&controller);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, shutting down");
                None
            }
        };

        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(command) => {
                if !handle_command(&controller, command).await {
                    break;
                }
            }
            Err(e) => warn!("{e}"),
        }
    }

    renderer.abort();
    Ok(())
}
