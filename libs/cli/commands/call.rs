use clap::{Args, Subcommand};
use colored::Colorize;
use sugar_activity_dbus::{get_service, zbus::blocking::Connection, ActivityServiceProxyBlocking};

use crate::utils::log::{LogBuilder, LogType};

#[derive(Args, Debug)]
pub struct Command {
    /// Numeric handle of the window showing the activity
    #[arg(long)]
    xid: u32,

    #[command(subcommand)]
    method: Method,
}

#[derive(Subcommand, Debug)]
pub enum Method {
    /// Start the activity in unshared mode
    Start { activity_id: String },
    /// Join the activity published at a presence service path
    Join { activity_ps_path: String },
    /// Share the activity on the network
    Share,
    /// Print the activity identifier
    GetId,
    /// Print the activity type
    GetType,
    /// Print whether the activity is shared
    GetShared,
    /// Ask the activity to run a command
    Execute {
        command: String,
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
}

pub fn handle(command: Command) -> eyre::Result<()> {
    let connection = Connection::session().map_err(|e| {
        eyre::eyre!(
            "Failed to connect to the D-Bus session bus.\n\n\
            Please ensure the D-Bus user session is active.\n\n\
            Internal error: {e}"
        )
    })?;

    let proxy = get_service(&connection, command.xid)
        .map_err(|e| eyre::eyre!("Failed to reach the activity of window {}: {e}", command.xid))?;

    call(&proxy, command.xid, command.method)
}

fn call(proxy: &ActivityServiceProxyBlocking<'_>, xid: u32, method: Method) -> eyre::Result<()> {
    match method {
        Method::Start { activity_id } => {
            proxy.start(&activity_id)?;
            LogBuilder::new(LogType::Start, "Start requested")
                .with_branch("Window", xid)
                .with_branch("ID", activity_id)
                .print();
        }
        Method::Join { activity_ps_path } => {
            proxy.join(&activity_ps_path)?;
            LogBuilder::new(LogType::Start, "Join requested")
                .with_branch("Window", xid)
                .with_branch("Presence", activity_ps_path)
                .print();
        }
        Method::Share => {
            proxy.share()?;
            let shared = proxy.get_shared()?;
            LogBuilder::new(LogType::Success, "Share requested")
                .with_branch("Window", xid)
                .with_branch("Shared", shared)
                .print();
        }
        Method::GetId => {
            let mut id = proxy.get_id()?;
            match id.take() {
                Some(id) => println!("{id}"),
                None => eprintln!("{}", "The activity has not been started".dimmed()),
            }
        }
        Method::GetType => println!("{}", proxy.get_type()?),
        Method::GetShared => println!("{}", proxy.get_shared()?),
        Method::Execute { command, args } => {
            let handled = proxy.execute(&command, &args)?;
            let log_type = if handled {
                LogType::Success
            } else {
                LogType::Warning
            };
            LogBuilder::new(log_type, format!("Command '{command}'"))
                .with_branch("Window", xid)
                .with_branch("Handled", handled)
                .print();
        }
    }

    Ok(())
}
