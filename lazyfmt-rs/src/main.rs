use std::io::{self, ErrorKind};

use lazyfmt::cli;

fn main() {
    // clap renders its own usage text, and `--help`/`--version` exit 0.
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => e.exit(),
    };

    let stdout = io::stdout();
    match cli::run(&args, &mut stdout.lock()) {
        Ok(()) => {}
        // `lazyfmt ... | head` closing the pipe early is not a failure.
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
        Err(e) => {
            eprintln!("lazyfmt: {e}");
            std::process::exit(1);
        }
    }
}
