use std::io::{self, BufWriter};
use std::process::ExitCode;

use grid_path::{config::Config, run};

fn main() -> ExitCode {
    let config = Config::from_env();
    if let Err(err) = config.init_logging() {
        eprintln!("failed to initialise logging: {err}");
    }

    let stdin = io::stdin();
    let mut stdout = BufWriter::new(io::stdout().lock());

    match run(stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
