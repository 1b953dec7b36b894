use clap::Parser;

use inkstack::cli::{handle_config_action, run_preview, run_render, Args, Command};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.command {
        Command::Render(render_args) => run_render(&render_args),
        Command::Preview(preview_args) => run_preview(&preview_args),
        Command::Config { action } => handle_config_action(action),
    }
}
