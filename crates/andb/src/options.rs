// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Command-line options
//!
//! `andb [-h] [-i] [-e] [-f <file>]`. Interactive mode is the default;
//! `-f` switches to batch mode and wins over `-i`. An unknown flag exits
//! with status -1 and a single-line error.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "andb", about = "andb: a small experimental analytical SQL engine")]
pub struct Options {
    /// EXPLAIN each statement (prints plan text before results)
    #[arg(short = 'e')]
    pub explain: bool,

    /// Interactive mode, default. QUIT exits.
    #[arg(short = 'i')]
    pub interactive: bool,

    /// Batch mode: read statements from a file (disables -i)
    #[arg(short = 'f', value_name = "file")]
    pub file: Option<PathBuf>,
}

impl Options {
    pub fn batch(&self) -> bool {
        self.file.is_some()
    }
}

/// Parses argv; help exits 0, anything malformed exits -1 with one line.
pub fn parse() -> Options {
    match Options::try_parse() {
        Ok(options) => options,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            print!("{err}");
            process::exit(0);
        }
        Err(err) => {
            let first_line = err.to_string();
            let first_line = first_line.lines().next().unwrap_or("invalid arguments");
            eprintln!("andb: {first_line}");
            process::exit(-1);
        }
    }
}
