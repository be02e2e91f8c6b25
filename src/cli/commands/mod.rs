pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};
use std::path::PathBuf;

pub const ARG_PORT: &str = "port";
pub const ARG_DATA_DIR: &str = "data-dir";
pub const ARG_FRONTEND_URL: &str = "frontend-url";
pub const ARG_SESSION_TTL: &str = "session-ttl";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("motoclub")
        .about("Motorcycle shop storefront, club membership and back-office API")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("MOTOCLUB_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DATA_DIR)
                .short('d')
                .long("data-dir")
                .help("Directory holding the flat JSON collections")
                .long_help(
                    "Directory holding the flat JSON collections. Created and seeded with the default catalog and demo club member when missing.",
                )
                .default_value("data")
                .env("MOTOCLUB_DATA_DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_FRONTEND_URL)
                .long("frontend-url")
                .help("Frontend origin allowed by CORS, example: https://shop.tld")
                .default_value("http://localhost:8080")
                .env("MOTOCLUB_FRONTEND_URL"),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL)
                .long("session-ttl")
                .help("Session lifetime in seconds")
                .default_value("86400")
                .env("MOTOCLUB_SESSION_TTL")
                .value_parser(clap::value_parser!(u64).range(60..)),
        );

    logging::with_args(command)
}
