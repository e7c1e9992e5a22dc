/// Centralized argument handling for the sweeper binary
///
/// Stores the process arguments once so every module can check flags without
/// re-reading the environment, and so tests can substitute their own set.
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

/// Verbose logging mode
pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_lookup_and_values() {
        set_cmd_args(vec![
            "solsweep".to_string(),
            "--verbose".to_string(),
            "--log-dir".to_string(),
            "logs".to_string(),
        ]);

        assert!(has_arg("--verbose"));
        assert!(!has_arg("--quiet"));
        assert_eq!(get_arg_value("--log-dir"), Some("logs".to_string()));
        assert_eq!(get_arg_value("--verbose"), Some("--log-dir".to_string()));
        assert_eq!(get_arg_value("--missing"), None);
    }
}
