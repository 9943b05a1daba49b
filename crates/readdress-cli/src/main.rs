mod cli;
mod config;
mod config_cmd;
mod dump_cmd;
mod mask_cmd;
mod replace_cmd;
mod search_cmd;
mod shared;
mod shift_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Search {
            ref file,
            ref query,
            ref format,
        } => search_cmd::run(file, query, format),
        cli::Commands::Replace {
            ref file,
            ref query,
            ref text,
            ref output,
            no_save,
        } => replace_cmd::run(
            file,
            query.as_deref(),
            text.as_deref(),
            output.as_deref(),
            no_save,
        ),
        cli::Commands::Mask {
            ref file,
            page,
            x,
            y,
            width,
            height,
            scale,
            ref text,
            ref output,
            no_save,
        } => mask_cmd::run(
            file,
            &mask_cmd::Selection {
                page,
                x,
                y,
                width,
                height,
                scale,
            },
            text.as_deref(),
            output.as_deref(),
            no_save,
        ),
        cli::Commands::Shift {
            ref file,
            dx,
            dy,
            ref output,
        } => shift_cmd::run(file, dx, dy, output.as_deref()),
        cli::Commands::Dump {
            ref file,
            ref format,
        } => dump_cmd::run(file, format),
        cli::Commands::Config { ref action } => config_cmd::run(action),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
