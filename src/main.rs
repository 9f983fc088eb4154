//! sql2awk CLI binary
//!
//! A command-line tool for translating a restricted SQL `SELECT` statement
//! into a self-contained awk program.

use sql2awk::cli::run_cli;
use std::process;

fn main() {
    let exit_code = run_cli();
    process::exit(exit_code);
}
