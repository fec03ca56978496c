//! posting-index CLI binary.

use clap::{CommandFactory, Parser};
use posting_index::{
    cli::{execute_command, PostingIndexArgs},
    Error,
};
use std::process;

fn main() {
    let args = PostingIndexArgs::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    if let Err(e) = execute_command(&args) {
        eprintln!("Error: {e}");
        match e {
            Error::InvalidArgument { .. } => {
                let _ = PostingIndexArgs::command().write_help(&mut std::io::stderr());
                process::exit(2);
            }
            _ => process::exit(1),
        }
    }
}
