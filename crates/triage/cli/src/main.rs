#![deny(unsafe_code)]

fn main() {
    if let Err(e) = triage_cli::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
