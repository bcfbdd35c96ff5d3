use clap::Subcommand;

pub mod call;
pub mod serve;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Expose an activity on the session bus until interrupted
    Serve(serve::Command),
    /// Call a method of the activity shown in another window
    Call(call::Command),
}

impl Command {
    pub fn execute(self, config_path: &str) -> eyre::Result<()> {
        match self {
            Self::Serve(o) => serve::handle(o, config_path)?,
            Self::Call(o) => call::handle(o)?,
        };

        Ok(())
    }
}
