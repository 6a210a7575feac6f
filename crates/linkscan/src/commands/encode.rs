//! `encode-password`: show the digest the login form posts.

use std::io::{self, IsTerminal};

use linkscan_core::encode_password;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

/// Reads the password from stdin when piped (or with `--password-stdin`),
/// otherwise prompts without echo.
pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let stdin = io::stdin();
    let password = if global.password_stdin || !stdin.is_terminal() {
        config::read_secret_line(stdin.lock())?
    } else {
        rpassword::prompt_password("Password: ")?
    };

    let encoded = encode_password(&password);
    output::print_output(encoded.expose(), global.quiet);
    Ok(())
}
