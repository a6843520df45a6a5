use std::io::{self, Write};

use anyhow::Result;

/// Prompt for a username, offering the last one used as the default
pub fn username(last: Option<&str>) -> Result<String> {
    match last {
        Some(last) => print!("Username [{}]: ", last),
        None => print!("Username: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(resolve_username(&input, last))
}

pub fn password() -> Result<String> {
    let password = rpassword::prompt_password("Password: ")?;
    Ok(password)
}

fn resolve_username(input: &str, last: Option<&str>) -> String {
    let input = input.trim();
    match last {
        Some(last) if input.is_empty() => last.to_string(),
        _ => input.to_string(),
    }
}
