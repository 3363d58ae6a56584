//! Selclip CLI entry point.

#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = selclip::run() {
        eprintln!("error: {}", selclip::error::error_chain(&e));
        std::process::exit(1);
    }
}
