use env_logger::Env;

/// Default log filter for a given `-v` count
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize `env_logger`. `RUST_LOG` wins over the `-v` flags.
pub fn init_logging(verbose: u8) {
    let env = Env::default().default_filter_or(level_for_verbosity(verbose));
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(verbose > 1)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(5), "debug");
    }
}
