use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::Arc;

use chrono_tz::Tz;
use glodabin::{BinningConfig, ContactHistory, GlodaError, HistoryConfig, Interval, MessageIndex};
use glodabin_mock::MockIndex;

/// Return an index for demos.
///
/// With `GLODABIN_DEMOS_MISBEHAVE` set, the index also serves a failing and a
/// slow contact.
#[must_use]
pub fn get_index() -> Arc<dyn MessageIndex> {
    if std::env::var("GLODABIN_DEMOS_MISBEHAVE").is_ok() {
        println!("--- (Mock index with failing contacts) ---");
        Arc::new(MockIndex::new().with_misbehaving_contacts())
    } else {
        Arc::new(MockIndex::new())
    }
}

/// History configuration read from `GLODABIN_INTERVAL` and `GLODABIN_TZ`.
///
/// # Errors
/// Returns `InvalidInterval` or `InvalidArg` if a variable does not parse.
pub fn config_from_env() -> Result<HistoryConfig, GlodaError> {
    config_from(
        std::env::var("GLODABIN_INTERVAL").ok().as_deref(),
        std::env::var("GLODABIN_TZ").ok().as_deref(),
    )
}

/// History configuration from optional interval and time zone tokens.
///
/// # Errors
/// Returns `InvalidInterval` or `InvalidArg` if a token does not parse.
pub fn config_from(interval: Option<&str>, tz: Option<&str>) -> Result<HistoryConfig, GlodaError> {
    let mut cfg = HistoryConfig::default();
    if let Some(token) = interval {
        cfg.interval = Interval::from_str(token)?;
    }
    if let Some(name) = tz {
        let timezone = Tz::from_str(name)
            .map_err(|_| GlodaError::InvalidArg(format!("unknown time zone: {name}")))?;
        cfg.binning = BinningConfig {
            timezone,
            ..cfg.binning
        };
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Render histories as one line per contact interval.
#[must_use]
pub fn render(histories: &[ContactHistory]) -> String {
    let mut out = String::new();
    for h in histories {
        let _ = writeln!(
            out,
            "{} ({} sent, {} received)",
            h.contact.name,
            h.from_me.len(),
            h.to_me.len()
        );
        for bin in &h.by_interval {
            let _ = writeln!(
                out,
                "  {}  {:>3} -> {:>3} <-",
                bin.start_date.format("%Y-%m-%d %H:%M"),
                bin.from_me.len(),
                bin.to_me.len()
            );
        }
    }
    out
}
