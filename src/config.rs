//! Command-line options shared by the binaries.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::TICK_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Fixed RNG seed; None picks one from the clock
    pub seed: Option<u32>,
    /// Frame length of the terminal loop
    pub tick_ms: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: TICK_MS,
        }
    }
}

impl RunConfig {
    /// The configured seed, or one derived from the system clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

/// Parse `--seed N` and `--tick-ms N` (program name already stripped).
pub fn parse_args(args: &[String]) -> Result<RunConfig> {
    let mut config = RunConfig::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .ok_or_else(|| anyhow!("missing value for {}", flag))
        };
        match arg.as_str() {
            "--seed" => {
                let v = value("--seed")?;
                config.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--tick-ms" => {
                let v = value("--tick-ms")?;
                config.tick_ms = v
                    .parse::<u32>()
                    .ok()
                    .filter(|&ms| ms > 0)
                    .ok_or_else(|| anyhow!("invalid --tick-ms value: {}", v))?;
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let cfg = parse_args(&[]).unwrap();
        assert_eq!(cfg, RunConfig::default());
        assert_eq!(cfg.tick_ms, 16);
    }

    #[test]
    fn parses_seed_and_tick() {
        let cfg = parse_args(&args(&["--seed", "42", "--tick-ms", "10"])).unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.tick_ms, 10);
        assert_eq!(cfg.resolve_seed(), 42);
    }

    #[test]
    fn rejects_bad_input() {
        let err = parse_args(&args(&["--seed"])).unwrap_err();
        assert!(err.to_string().contains("--seed"));

        let err = parse_args(&args(&["--seed", "-3"])).unwrap_err();
        assert!(err.to_string().contains("invalid --seed"));

        let err = parse_args(&args(&["--tick-ms", "0"])).unwrap_err();
        assert!(err.to_string().contains("--tick-ms"));

        let err = parse_args(&args(&["--fast"])).unwrap_err();
        assert!(err.to_string().contains("unknown argument: --fast"));
    }
}
