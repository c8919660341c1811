// SPDX-License-Identifier: MIT

use super::*;

use clap::Parser;

#[test]
fn parses_add_with_path_and_model() {
    let cli = Cli::try_parse_from(["fmcp", "add", "/tmp/kb", "all-MiniLM-L6-v2"]).expect("parse");
    match cli.command {
        Command::Add { path, model } => {
            assert_eq!(path, PathBuf::from("/tmp/kb"));
            assert_eq!(model, "all-MiniLM-L6-v2");
        }
        _ => panic!("expected Add"),
    }
}

#[test]
fn status_and_watch_take_no_arguments() {
    assert!(Cli::try_parse_from(["fmcp", "status"]).is_ok());
    assert!(Cli::try_parse_from(["fmcp", "watch"]).is_ok());
    assert!(Cli::try_parse_from(["fmcp", "status", "extra"]).is_err());
}

#[test]
fn remove_requires_a_path() {
    assert!(Cli::try_parse_from(["fmcp", "remove"]).is_err());
    assert!(Cli::try_parse_from(["fmcp", "remove", "/tmp/kb"]).is_ok());
}
