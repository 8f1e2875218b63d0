//! CLI Exit Code Registry
//!
//! This is the single source of truth for all `qsv` exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | CLI usage error (bad args, conflicting options)      |
//! | 3    | File read/write failure                              |
//! | 4    | Input parse error (location or draft JSON)           |
//! | 5    | Heuristic config rejected                            |
//! | 6    | No location available to reconcile                   |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `CliError`

use qservicos_config::ConfigError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, conflicting options.
pub const EXIT_USAGE: u8 = 2;

/// Store, settings, or input file could not be read or written.
pub const EXIT_IO: u8 = 3;

/// A location or draft payload is not valid JSON of the expected shape.
pub const EXIT_PARSE: u8 = 4;

/// Heuristic TOML failed to parse or validate.
pub const EXIT_CONFIG: u8 = 5;

/// `reconcile` found neither an address argument, a location file,
/// nor a stored location.
pub const EXIT_NO_LOCATION: u8 = 6;

/// Map a config-layer error to its exit code.
pub fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::Io { .. } => EXIT_IO,
        ConfigError::Parse(_) => EXIT_PARSE,
        ConfigError::Heuristic(_) => EXIT_CONFIG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_IO,
            EXIT_PARSE,
            EXIT_CONFIG,
            EXIT_NO_LOCATION,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn config_errors_map_by_kind() {
        let io = ConfigError::Io { path: "x".into(), message: "denied".into() };
        assert_eq!(config_exit_code(&io), EXIT_IO);
        assert_eq!(config_exit_code(&ConfigError::Parse("bad".into())), EXIT_PARSE);
    }
}
