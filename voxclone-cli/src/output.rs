use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::session::Reply;

pub fn print_system(msg: &str) {
    println!("\x1b[36m{msg}\x1b[0m");
}

pub fn print_success(msg: &str) {
    println!("\x1b[32m{msg}\x1b[0m");
}

pub fn print_error(msg: &str) {
    eprintln!("\x1b[31m[Error]\x1b[0m {msg}");
}

pub fn print_reply(reply: &Reply) {
    match reply {
        Reply::Info(msg) => println!("{msg}"),
        Reply::Success(msg) => print_success(msg),
        Reply::Error(msg) => print_error(msg),
    }
}

/// Spinner shown while a request is in flight. Call `finish_and_clear` when done.
pub fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
