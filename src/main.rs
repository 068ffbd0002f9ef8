mod cli;
mod config;
mod local_logger;
mod prelude;

fn main() {
    if let Err(err) = cli::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
