use std::process::ExitCode;

fn main() -> ExitCode {
    forkscout::cli::run()
}
