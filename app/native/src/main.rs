//! Shade binary.
//!
//! `shade run` drives the coordinator from JSON-lines events on stdin;
//! `shade --help` lists the other commands.

fn main() {
    if let Err(err) = shade_lib::cli::run() {
        eprintln!("shade: {err}");
        std::process::exit(1);
    }
}
