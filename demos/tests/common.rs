use std::sync::Arc;

use glodabin::{GlodaError, Glodabin, Interval};
use glodabin_demos::common::{config_from, render};
use glodabin_mock::MockIndex;

#[test]
fn config_tokens_parse() {
    let cfg = config_from(Some("w"), Some("Europe/Berlin")).unwrap();
    assert_eq!(cfg.interval, Interval::Weeks);
    assert_eq!(cfg.binning.timezone, chrono_tz::Europe::Berlin);

    let cfg = config_from(None, None).unwrap();
    assert_eq!(cfg.interval, Interval::Months);
}

#[test]
fn bad_tokens_are_rejected() {
    assert!(matches!(
        config_from(Some("q"), None),
        Err(GlodaError::InvalidInterval { .. })
    ));
    assert!(matches!(
        config_from(None, Some("Mars/Olympus_Mons")),
        Err(GlodaError::InvalidArg(_))
    ));
}

#[tokio::test]
async fn render_lists_every_contact_interval() {
    let g = Glodabin::builder()
        .with_index(Arc::new(MockIndex::new()))
        .build()
        .unwrap();
    let text = render(&g.top_contacts_with_personal_history().await.unwrap());
    assert!(text.starts_with("Alice Liddell (2 sent, 3 received)\n"));
    assert!(text.contains("  2021-02-01 00:00    1 ->   0 <-\n"));
    assert!(text.contains("Dave Null (0 sent, 0 received)\n"));
}
