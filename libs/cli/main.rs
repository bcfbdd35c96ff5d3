use clap::Parser;
use directories_next::ProjectDirs;
use std::path::PathBuf;

mod commands;
mod tracing;
mod window;

mod utils {
    pub mod log;
}

// Note: for uniformity, we dont use clap `default_value` or `default_value_t` options
#[derive(Parser, Debug)]
#[command(
    name = "sugar-activity",
    version,
    long_about = Some("Expose a desktop activity on the session bus and drive it from the shell.")
)]
struct Args {
    /// Path of configuration file (default: "~/.config/sugar-activity/config.toml")
    #[arg(short, long)]
    config: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: commands::Command,
}

impl Args {
    fn get_config_path(&self) -> eyre::Result<String> {
        let config_path = match &self.config {
            Some(x) => Ok(x.clone()),
            None => {
                if let Some(proj_dirs) = ProjectDirs::from("org", "laptop", "sugar-activity") {
                    let config_path: PathBuf = proj_dirs.config_dir().join("config.toml");

                    config_path
                        .to_str()
                        .map(|t| t.to_owned())
                        .ok_or_else(|| eyre::eyre!("couldn't convert os path to string"))
                } else {
                    Err(eyre::eyre!("Project directories could not be found."))
                }
            }
        }?;

        Ok(shellexpand::full(&config_path)?.into_owned())
    }
}

fn main() -> eyre::Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    tracing::setup()?;

    let config_path = args.get_config_path()?;
    args.command.execute(&config_path)
}
