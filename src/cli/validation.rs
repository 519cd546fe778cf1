//! Custom clap value parsers.
//!
//! These run during argument parsing so a bad flag fails with a clap
//! error message instead of surfacing later as a configuration error.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::PathBuf;

/// Port 0 is rejected; it asks the OS for an ephemeral port.
pub fn validate_port(value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            value
        )),
    }
}

/// The file must exist and be a regular file at parse time so a typo'd
/// `--config` fails before any loading starts.
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => Ok(path),
        Ok(_) => Err(format!("Configuration path is not a file: '{}'", value)),
        Err(e) => Err(format!(
            "Cannot access configuration file '{}': {}",
            value, e
        )),
    }
}

/// Between 1 and 100 steps. The cap stops a mistyped number from
/// reverting an entire schema.
pub fn validate_rollback_steps(value: &str) -> Result<u32, String> {
    let steps = value.parse::<u32>().map_err(|_| {
        format!(
            "Rollback steps must be a valid positive number, got: '{}'",
            value
        )
    })?;

    if steps == 0 {
        return Err("Rollback steps must be greater than 0".to_string());
    }
    if steps > 100 {
        return Err("Rollback steps cannot exceed 100 for safety reasons".to_string());
    }

    Ok(steps)
}

/// Accepts IP literals and plausible hostnames.
pub fn validate_host_address(value: &str) -> Result<String, String> {
    let host = value.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.parse::<Ipv4Addr>().is_ok() || host.parse::<Ipv6Addr>().is_ok() {
        return Ok(host.to_string());
    }

    // Numeric-looking strings that failed IPv4 parsing are typos, not
    // hostnames
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address format: '{}'", value));
    }

    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }
    if host.contains(' ') {
        return Err("Host address cannot contain spaces".to_string());
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_bounds() {
        for port in ["1", "80", "3000", "65535"] {
            assert!(validate_port(port).is_ok(), "Port {} should be valid", port);
        }
        for port in ["0", "65536", "abc", "-1", ""] {
            assert!(
                validate_port(port).is_err(),
                "Port {} should be invalid",
                port
            );
        }
    }

    #[test]
    fn host_accepts_ip_literals_and_hostnames() {
        for host in [
            "localhost",
            "127.0.0.1",
            "0.0.0.0",
            "192.168.1.1",
            "::1",
            "example.com",
            "my-server.local",
        ] {
            assert!(
                validate_host_address(host).is_ok(),
                "Host {} should be valid",
                host
            );
        }
    }

    #[test]
    fn host_rejects_typos_and_garbage() {
        for host in [
            "",
            "   ",
            "host with spaces",
            "999.999.999.999",
            "10.0.0",
            &"x".repeat(300),
        ] {
            assert!(
                validate_host_address(host).is_err(),
                "Host '{}' should be invalid",
                host
            );
        }
    }

    #[test]
    fn host_is_trimmed() {
        assert_eq!(
            validate_host_address(" 0.0.0.0 ").unwrap(),
            "0.0.0.0".to_string()
        );
    }

    #[test]
    fn rollback_steps_bounds() {
        for steps in ["1", "50", "100"] {
            assert!(validate_rollback_steps(steps).is_ok());
        }
        for steps in ["0", "101", "abc", ""] {
            assert!(validate_rollback_steps(steps).is_err());
        }
    }

    #[test]
    fn config_file_path_must_exist() {
        assert!(validate_config_file_path("/nonexistent/disparo.toml").is_err());
    }
}
