//! Output mode resolution: pretty text or JSON, mirroring the core crate's
//! dual `print`/`summary` capability.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` flag
//! 2. `FORMAT` env var -> `"pretty"` | `"json"`
//! 3. Default: `Pretty`

use std::io;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-readable summary table (`SeedMaster::print`).
    Pretty,
    /// Stable JSON (`SeedMaster::summary`).
    Json,
}

impl OutputMode {
    #[must_use]
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

fn resolve_inner(format_flag: Option<OutputMode>, format_env: Option<&str>) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }
    match format_env.map(str::to_lowercase).as_deref() {
        Some("json") => OutputMode::Json,
        _ => OutputMode::Pretty,
    }
}

#[must_use]
pub fn resolve_output_mode(format_flag: Option<OutputMode>) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    resolve_inner(format_flag, env_val.as_deref())
}

pub fn write_summary(master: &seedmaster_core::SeedMaster, mode: OutputMode, out: &mut impl io::Write) -> io::Result<()> {
    if mode.is_json() {
        let summary = master.summary();
        let json = serde_json::to_string_pretty(&summary).unwrap_or_else(|_| "{}".to_string());
        writeln!(out, "{json}")
    } else {
        master.print(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_wins_over_env() {
        assert_eq!(resolve_inner(Some(OutputMode::Json), Some("pretty")), OutputMode::Json);
    }

    #[test]
    fn env_var_is_used_when_no_flag() {
        assert_eq!(resolve_inner(None, Some("json")), OutputMode::Json);
    }

    #[test]
    fn defaults_to_pretty() {
        assert_eq!(resolve_inner(None, None), OutputMode::Pretty);
    }
}
