use std::net::IpAddr;

use clap::Parser;

use crate::data::{Source, YearField};

#[derive(Parser, Debug)]
#[command(version, about = "Browse the books published by program alumni")]
pub struct Config {
    /// Dataset to serve, as a file path or an http(s) URL.
    #[arg(long, default_value = "static/books.json")]
    pub data: Source,

    #[arg(long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    #[arg(long, default_value_t = default_port())]
    pub port: u16,

    /// Field used for the year filter and year options.
    #[arg(long, value_enum, default_value_t = YearField::Class)]
    pub year_field: YearField,
}

#[cfg(debug_assertions)]
fn default_port() -> u16 {
    3000
}

#[cfg(not(debug_assertions))]
fn default_port() -> u16 {
    80
}
