use std::sync::Arc;

use clap::Args;
use signal_hook::{consts::TERM_SIGNALS, iterator::Signals};
use sugar_activity::{destroy, lock, Activity, LocalPresence};
use sugar_activity_dbus::ActivityEndpoint;
use tracing::info;

use crate::utils::log::{LogBuilder, LogType};
use crate::window::HeadlessWindow;

#[derive(Args, Debug)]
pub struct Command {
    /// Numeric handle of the window showing the activity
    #[arg(long)]
    xid: u32,

    /// Start the activity right away with this identifier
    #[arg(long)]
    activity_id: Option<String>,

    /// Share the activity on the network once started
    #[arg(long, requires = "activity_id")]
    share: bool,
}

pub fn handle(command: Command, config_path: &str) -> eyre::Result<()> {
    let config = sugar_config::load(config_path).map_err(|e| {
        eyre::eyre!("An error occured when trying to open the configuration file '{config_path}': {e}")
    })?;
    let bundle = config.bundle()?;

    let activity = Activity::builder()
        .presence(Arc::new(LocalPresence::new()))
        .bundle(Arc::new(bundle))
        .window(Box::new(HeadlessWindow::new(command.xid)))
        .build()
        .into_shared();

    ActivityEndpoint::register(&activity).map_err(|e| {
        eyre::eyre!(
            "Failed to expose the activity on the D-Bus session bus.\n\n\
            Please ensure the D-Bus user session is active and that no other activity \
            uses window {}.\n\n\
            Internal error: {e}",
            command.xid
        )
    })?;

    {
        let mut activity = lock(&activity);
        if let Some(activity_id) = command.activity_id {
            activity.start(activity_id);
            if command.share {
                activity.share();
            }
        }

        let bus_name = activity.bus().map(|bus| bus.name().to_owned());
        LogBuilder::new(LogType::Start, "Activity is running")
            .with_optional_branch("Bus name", bus_name)
            .with_branch("Type", activity.get_type().to_owned())
            .with_optional_branch("ID", activity.get_id().map(str::to_owned))
            .with_branch("Shared", activity.get_shared())
            .print();
    }

    wait_for_shutdown_signal()?;

    info!("Shutdown signal received, destroying the activity.");
    destroy(&activity);

    LogBuilder::new(LogType::Stop, "Activity destroyed").print();
    Ok(())
}

/// Blocks until SIGINT, SIGTERM or SIGQUIT is received.
fn wait_for_shutdown_signal() -> eyre::Result<()> {
    let mut signals = Signals::new(TERM_SIGNALS)
        .map_err(|e| eyre::eyre!("Unable to register signal handler: {e}"))?;

    if let Some(signal) = signals.forever().next() {
        info!("Received signal {signal}");
    }

    Ok(())
}
