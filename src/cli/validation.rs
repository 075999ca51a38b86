//! Value parsers for arguments clap cannot check on its own.

use std::net::Ipv4Addr;
use std::path::PathBuf;

const MAX_HOSTNAME_LEN: usize = 253;

const MAX_ROLLBACK_STEPS: u32 = 100;

pub fn validate_port(value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a valid number between 1 and 65535, got: '{value}'"
        )),
    }
}

/// The file must exist and be readable.
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{value}'"));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{value}'"));
    }

    std::fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{value}': {e}"))
}

pub fn validate_rollback_steps(value: &str) -> Result<u32, String> {
    let steps: u32 = value.parse().map_err(|_| {
        format!("Rollback steps must be a valid positive number, got: '{value}'")
    })?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        n if n > MAX_ROLLBACK_STEPS => Err(format!(
            "Rollback steps cannot exceed {MAX_ROLLBACK_STEPS}"
        )),
        n => Ok(n),
    }
}

/// Accepts `localhost`, dotted IPv4 addresses and hostnames.
pub fn validate_host_address(value: &str) -> Result<String, String> {
    let host = value.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.contains(char::is_whitespace) {
        return Err("Host address cannot contain spaces".to_string());
    }
    if host.len() > MAX_HOSTNAME_LEN {
        return Err(format!(
            "Host address is too long (maximum {MAX_HOSTNAME_LEN} characters)"
        ));
    }

    // All digits and dots: must be a real IPv4 address
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') && host.parse::<Ipv4Addr>().is_err()
    {
        return Err(format!("Invalid IPv4 address format: '{value}'"));
    }

    Ok(host.to_string())
}
