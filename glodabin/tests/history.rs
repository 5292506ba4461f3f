mod helpers;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use glodabin::{BinningConfig, EmptyBins, GlodaError, Glodabin, Interval};
use glodabin_mock::MockIndex;
use glodabin_mock::fixtures::contacts;
use helpers::{CountingIndex, contact, dt, message, mock_glodabin};

fn ids(msgs: &[glodabin::Message]) -> Vec<i64> {
    msgs.iter().map(|m| m.id).collect()
}

#[tokio::test]
async fn top_contacts_exclude_the_user_and_keep_index_order() {
    let g = mock_glodabin();
    let histories = g.top_contacts_with_personal_history().await.unwrap();
    let order: Vec<_> = histories.iter().map(|h| h.contact.id).collect();
    assert_eq!(
        order,
        vec![contacts::ALICE, contacts::BOB, contacts::CAROL, contacts::DAVE]
    );
    assert!(histories.iter().all(|h| h.contact.id != contacts::ME));
}

#[tokio::test]
async fn monthly_history_is_fused_by_direction() {
    let g = mock_glodabin();
    let histories = g.top_contacts_with_personal_history().await.unwrap();
    let alice = &histories[0];
    assert_eq!(ids(&alice.from_me), vec![4, 1]);
    assert_eq!(ids(&alice.to_me), vec![5, 3, 2]);

    let bins = &alice.by_interval;
    assert_eq!(bins.len(), 3);
    assert_eq!(bins[0].start_date, dt(2021, 1, 1, 0));
    assert_eq!(bins[0].end_date, dt(2021, 2, 1, 0));
    assert_eq!(ids(&bins[0].from_me), vec![1]);
    assert_eq!(ids(&bins[0].to_me), vec![3, 2]);
    assert_eq!(bins[1].start_date, dt(2021, 2, 1, 0));
    assert_eq!(ids(&bins[1].from_me), vec![4]);
    assert!(bins[1].to_me.is_empty());
    assert_eq!(bins[2].start_date, dt(2021, 3, 1, 0));
    assert!(bins[2].from_me.is_empty());
    assert_eq!(ids(&bins[2].to_me), vec![5]);

    let bob = &histories[1];
    let starts: Vec<_> = bob.by_interval.iter().map(|b| b.start_date).collect();
    assert_eq!(starts, vec![dt(2021, 1, 1, 0), dt(2021, 3, 1, 0)]);
    assert_eq!(bob.by_interval[1].total(), 2);
}

#[tokio::test]
async fn silent_contacts_have_empty_histories() {
    let g = mock_glodabin();
    let histories = g.top_contacts_with_personal_history().await.unwrap();
    for h in &histories[2..] {
        assert!(h.from_me.is_empty());
        assert!(h.to_me.is_empty());
        assert!(h.by_interval.is_empty());
    }
}

#[tokio::test]
async fn contact_limit_counts_the_user() {
    let g = Glodabin::builder()
        .with_index(Arc::new(MockIndex::new()))
        .contact_limit(3)
        .build()
        .unwrap();
    let histories = g.top_contacts_with_personal_history().await.unwrap();
    let order: Vec<_> = histories.iter().map(|h| h.contact.id).collect();
    assert_eq!(order, vec![contacts::ALICE, contacts::BOB]);
}

#[tokio::test]
async fn per_contact_limit_keeps_most_recent() {
    let g = Glodabin::builder()
        .with_index(Arc::new(MockIndex::new()))
        .per_contact_message_limit(1)
        .build()
        .unwrap();
    let alice = &g.top_contacts_with_personal_history().await.unwrap()[0];
    assert_eq!(ids(&alice.from_me), vec![4]);
    assert_eq!(ids(&alice.to_me), vec![5]);
    assert_eq!(alice.by_interval.len(), 2);
}

#[tokio::test]
async fn days_follow_the_configured_zone() {
    let g = Glodabin::builder()
        .with_index(Arc::new(MockIndex::new()))
        .interval(Interval::Days)
        .binning(BinningConfig {
            timezone: chrono_tz::Pacific::Auckland,
            ..BinningConfig::default()
        })
        .build()
        .unwrap();
    let alice = &g.top_contacts_with_personal_history().await.unwrap()[0];
    // Message 3 (2021-01-21 18:00Z) is on Jan 22 in Auckland (+13:00).
    let bin = alice
        .by_interval
        .iter()
        .find(|b| b.to_me.iter().any(|m| m.id == 3))
        .unwrap();
    assert_eq!(bin.start_date, dt(2021, 1, 21, 11));
    assert_eq!(bin.end_date, dt(2021, 1, 22, 11));
}

#[tokio::test]
async fn include_empty_bins_fills_quiet_months() {
    let g = Glodabin::builder()
        .with_index(Arc::new(MockIndex::new()))
        .binning(BinningConfig {
            empty_bins: EmptyBins::Include,
            ..BinningConfig::default()
        })
        .build()
        .unwrap();
    let bob = &g.top_contacts_with_personal_history().await.unwrap()[1];
    assert_eq!(bob.by_interval.len(), 3);
    assert_eq!(bob.by_interval[1].start_date, dt(2021, 2, 1, 0));
    assert_eq!(bob.by_interval[1].total(), 0);
}

#[tokio::test]
async fn single_contact_history_matches_top_list_entry() {
    let g = mock_glodabin();
    let all = g.top_contacts_with_personal_history().await.unwrap();
    let alice = g.contact_personal_history(&all[0].contact).await.unwrap();
    assert_eq!(alice, all[0]);
}

#[tokio::test]
async fn own_contact_history_is_rejected() {
    let g = mock_glodabin();
    let err = g
        .contact_personal_history(&contacts::me())
        .await
        .unwrap_err();
    assert!(matches!(err, GlodaError::InvalidArg(_)));
}

#[tokio::test]
async fn unknown_contact_is_not_found() {
    let g = mock_glodabin();
    let stranger = contact(999, "Stranger", &["stranger@example.org"]);
    let err = g.contact_personal_history(&stranger).await.unwrap_err();
    assert_eq!(err, GlodaError::not_found("contact 999"));
    assert!(err.is_actionable());
}

#[tokio::test]
async fn single_contact_history_uses_the_index_record() {
    let g = mock_glodabin();
    // Same id as Alice, but without the addresses the index knows about.
    let stale = contact(contacts::ALICE, "Alice", &[]);
    let h = g.contact_personal_history(&stale).await.unwrap();
    assert_eq!(h.contact.identities.len(), 2);
    assert_eq!(ids(&h.to_me), vec![5, 3, 2]);
}

#[tokio::test]
async fn failing_contact_fails_the_whole_request() {
    let g = Glodabin::builder()
        .with_index(Arc::new(MockIndex::new().with_contact(contacts::failing())))
        .build()
        .unwrap();
    let err = g.top_contacts_with_personal_history().await.unwrap_err();
    assert!(matches!(err, GlodaError::Index { ref index, .. } if index == "glodabin-mock"));
}

#[tokio::test(start_paused = true)]
async fn slow_index_call_times_out() {
    let g = Glodabin::builder()
        .with_index(Arc::new(MockIndex::new().with_contact(contacts::slow())))
        .index_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = g
        .contact_personal_history(&contacts::slow())
        .await
        .unwrap_err();
    assert_eq!(err, GlodaError::index_timeout("glodabin-mock", "messages"));
}

#[tokio::test(start_paused = true)]
async fn slow_index_call_succeeds_without_timeout() {
    let g = Glodabin::builder()
        .with_index(Arc::new(MockIndex::new().with_contact(contacts::slow())))
        .build()
        .unwrap();
    let h = g.contact_personal_history(&contacts::slow()).await.unwrap();
    assert_eq!(h.to_me.len(), 1);
}

#[tokio::test]
async fn contact_without_identities_never_queries_the_index() {
    let me = contact(1, "Me", &["me@x"]);
    let ghost = contact(2, "Ghost", &[]);
    let idx = CountingIndex::new(me.clone(), vec![me, ghost], Vec::new());
    let calls = idx.messages_calls.clone();
    let g = Glodabin::builder()
        .with_index(Arc::new(idx))
        .build()
        .unwrap();
    let histories = g.top_contacts_with_personal_history().await.unwrap();
    assert_eq!(histories.len(), 1);
    assert!(histories[0].by_interval.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn each_contact_issues_one_query_per_direction() {
    let me = contact(1, "Me", &["me@x", "me@y"]);
    let a = contact(2, "A", &["a@x"]);
    let b = contact(3, "B", &["b@x", "b@y"]);
    let msgs = vec![
        message(1, dt(2021, 5, 1, 0), "me@y", "b@y"),
        message(2, dt(2021, 5, 2, 0), "a@x", "me@x"),
    ];
    let idx = CountingIndex::new(me.clone(), vec![a, me, b], msgs);
    let calls = idx.messages_calls.clone();
    let limit = idx.last_limit.clone();
    let g = Glodabin::builder()
        .with_index(Arc::new(idx))
        .contact_limit(7)
        .build()
        .unwrap();
    let histories = g.top_contacts_with_personal_history().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(limit.load(Ordering::SeqCst), 7);
    assert_eq!(ids(&histories[0].to_me), vec![2]);
    // The pair (me@y, b@y) is found through the cartesian product.
    assert_eq!(ids(&histories[1].from_me), vec![1]);
}

#[tokio::test]
async fn history_serializes_with_snake_case_fields() {
    let g = mock_glodabin();
    let alice = g
        .top_contacts_with_personal_history()
        .await
        .unwrap()
        .remove(0);
    let json = serde_json::to_value(&alice).unwrap();
    assert!(json["by_interval"][0]["from_me"].is_array());
    let back: glodabin::ContactHistory = serde_json::from_value(json).unwrap();
    assert_eq!(back, alice);
}
