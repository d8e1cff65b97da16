//! Account command handlers: signup, login, logout.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use famconnect_core::AppContext;
use famconnect_core::auth::{LoginOutcome, SignUpForm};

pub fn signup(ctx: &AppContext, username: &str, email: &str) -> Result<()> {
    let mut input = io::stdin().lock();
    let password = read_secret(&mut input, "Password: ")?;
    let confirmation = if ctx.auth.policy().require_password_confirmation {
        read_secret(&mut input, "Confirm password: ")?
    } else {
        password.clone()
    };

    let form = SignUpForm {
        username: username.to_string(),
        email: email.to_string(),
        password,
        confirmation,
    };
    ctx.sign_up(&form)?;
    println!("Account created for {username}");
    Ok(())
}

pub fn login(ctx: &mut AppContext, username: &str, stay_signed_in: bool) -> Result<()> {
    let password = read_secret(&mut io::stdin().lock(), "Password: ")?;

    match ctx.login(username, &password)? {
        LoginOutcome::Authenticated => {
            if stay_signed_in {
                ctx.set_stay_signed_in(true)
                    .context("save stay-logged-in preference")?;
            }
            println!("Logged in as {username}");
            if ctx.session.stay_signed_in() {
                println!("You will stay logged in across restarts.");
            }
            Ok(())
        }
        outcome @ LoginOutcome::AuthenticationFailed => anyhow::bail!(outcome.message()),
    }
}

pub fn logout(ctx: &mut AppContext) -> Result<()> {
    ctx.log_out();
    ctx.set_stay_signed_in(false)
        .context("clear stay-logged-in preference")?;
    println!("Logged out");
    Ok(())
}

/// Reads one line, prompting on stderr when stdin is a terminal.
///
/// Only the line terminator is stripped; surrounding spaces are part of the
/// secret.
fn read_secret(input: &mut impl BufRead, prompt: &str) -> Result<String> {
    if io::stdin().is_terminal() {
        let mut err = io::stderr();
        write!(err, "{prompt}")?;
        err.flush()?;
    }

    let mut line = String::new();
    input.read_line(&mut line).context("read from stdin")?;
    Ok(strip_line_ending(&line).to_string())
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map_or(line, |l| l.strip_suffix('\r').unwrap_or(l))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_ending_keeps_spaces() {
        assert_eq!(strip_line_ending(" pw \n"), " pw ");
        assert_eq!(strip_line_ending("pw\r\n"), "pw");
        assert_eq!(strip_line_ending("pw"), "pw");
    }

    #[test]
    fn test_read_secret_reads_successive_lines() {
        let mut input = io::Cursor::new("first\nsecond\n");
        assert_eq!(read_secret(&mut input, "").unwrap(), "first");
        assert_eq!(read_secret(&mut input, "").unwrap(), "second");
        assert_eq!(read_secret(&mut input, "").unwrap(), "");
    }
}
