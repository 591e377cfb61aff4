use arcseek::config;
use arcseek::gui::app::AppModel;
use clap::Parser;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Read settings from this file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a commented default config file and print its path
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_default_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default(args.config.as_deref());
    log::info!(
        "Starting with start {} sweep {} max {}",
        config.start_angle,
        config.sweep_angle,
        config.max
    );

    // clap owns the command line, keep GTK from parsing it again
    let app = RelmApp::new("org.arcseek.demo").with_args(Vec::new());
    app.run::<AppModel>(config);

    Ok(())
}
