use clap::Parser;

mod commands;
mod output;

use commands::strip::StripArgs;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "importfix")]
#[command(version = VERSION)]
#[command(about = "Strip pinned version suffixes from UI component imports")]
struct Cli {
    #[command(flatten)]
    args: StripArgs,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let json = cli.args.json;

    match commands::strip::run(cli.args) {
        Ok((data, exit_code)) => {
            if json {
                if let Err(err) = output::print_result(Ok(data)) {
                    let _ = output::print_result::<serde_json::Value>(Err(err));
                    return std::process::ExitCode::from(1);
                }
            }
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
        Err(err) => {
            let exit_code = output::exit_code_for_error(err.code);
            let _ = output::print_result::<serde_json::Value>(Err(err));
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
