//! End-to-end command flow tests over an in-memory store.
#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

use rapport::services::{CommandDispatcher, CommandOutcome, LOG_LISTING_LIMIT};
use rapport::storage::{RecordStore, SqliteStore};
use rapport::{classify, extract, parse_log_request, AggregateMode, CommandKind, Error, Rating};
use std::sync::Arc;

fn dispatcher() -> (Arc<SqliteStore>, CommandDispatcher) {
    let store = Arc::new(SqliteStore::in_memory().expect("in-memory store"));
    let dispatcher = CommandDispatcher::new(Arc::clone(&store) as Arc<dyn RecordStore>);
    (store, dispatcher)
}

#[test]
fn test_classify_core_contract() {
    assert!(matches!(classify(""), Ok(CommandKind::Logs)));
    assert!(matches!(classify("clear"), Ok(CommandKind::Clear)));
    assert!(matches!(classify("help"), Ok(CommandKind::Help)));
    assert!(matches!(
        classify("help clear"),
        Err(Error::UnrecognizedCommand(_))
    ));
}

#[test]
fn test_extract_matches_classified_block_count() {
    let texts = [
        "<@U2398577> +",
        "<@U2398577> + <@U2498577> - <@U2598577> +",
        "Joseph Curtin +",
        "Joseph Curtin + <@U23787> - <@U298333> + Trisha -",
    ];
    let expected = [1, 3, 1, 4];

    for (text, count) in texts.iter().zip(expected) {
        assert!(matches!(classify(text), Ok(CommandKind::Create)));
        assert_eq!(extract(text).len(), count, "block count for {text:?}");
    }
}

#[test]
fn test_parse_log_request_contract() {
    let request = parse_log_request("90 time -");
    assert_eq!(request.days, 90);
    assert_eq!(request.aggregate, Some(AggregateMode::Time));
    assert_eq!(request.filter, Some(Rating::Negative));

    let request = parse_log_request("");
    assert_eq!(request.days, 30);
    assert_eq!(request.aggregate, None);
    assert_eq!(request.filter, None);
}

#[test]
fn test_full_flow_create_list_aggregate_clear() {
    let (_store, dispatcher) = dispatcher();

    // Record two batches.
    let outcome = dispatcher
        .dispatch("@U2147483697", "<@U2147483698> + <@U2147483699> -")
        .expect("create");
    assert!(matches!(outcome, CommandOutcome::Created(2)));

    let outcome = dispatcher
        .dispatch("@U2147483697", "Trisha +")
        .expect("create");
    assert!(matches!(outcome, CommandOutcome::Created(1)));

    // Plain listing, newest first, capped.
    let outcome = dispatcher.dispatch("@U2147483697", "30").expect("logs");
    match outcome {
        CommandOutcome::Logs(logs) => {
            assert_eq!(logs.len(), 3);
            assert!(logs.len() <= LOG_LISTING_LIMIT);
        },
        other => panic!("expected logs, got {other:?}"),
    }

    // Filtered listing.
    let outcome = dispatcher.dispatch("@U2147483697", "+").expect("logs");
    match outcome {
        CommandOutcome::Logs(logs) => {
            assert_eq!(logs.len(), 2);
            assert!(logs.iter().all(|i| i.rating == Rating::Positive));
        },
        other => panic!("expected logs, got {other:?}"),
    }

    // Person aggregation reproduces exact counts.
    let outcome = dispatcher
        .dispatch("@U2147483697", "30 person")
        .expect("aggregate");
    match outcome {
        CommandOutcome::Aggregated(aggregated) => {
            assert_eq!(aggregated.get("@U2147483698").map(|c| c.positive), Some(1));
            assert_eq!(aggregated.get("@U2147483699").map(|c| c.negative), Some(1));
            assert_eq!(aggregated.get("Trisha").map(|c| c.positive), Some(1));
        },
        other => panic!("expected aggregation, got {other:?}"),
    }

    // Time aggregation over a 90-day window puts everything somewhere.
    let outcome = dispatcher
        .dispatch("@U2147483697", "90 time")
        .expect("aggregate");
    match outcome {
        CommandOutcome::Aggregated(aggregated) => {
            assert_eq!(aggregated.total(), 3);
        },
        other => panic!("expected aggregation, got {other:?}"),
    }

    // Clear removes the rater's rows and further listings are empty.
    let outcome = dispatcher.dispatch("@U2147483697", "clear").expect("clear");
    assert!(matches!(outcome, CommandOutcome::Cleared(3)));

    let outcome = dispatcher.dispatch("@U2147483697", "").expect("logs");
    match outcome {
        CommandOutcome::Logs(logs) => assert!(logs.is_empty()),
        other => panic!("expected logs, got {other:?}"),
    }
}

#[test]
fn test_conversation_grouping_across_batches() {
    let (store, dispatcher) = dispatcher();

    dispatcher
        .dispatch("@rater", "<@U1> + <@U2> -")
        .expect("first batch");
    dispatcher.dispatch("@rater", "<@U1> -").expect("second batch");

    let rater = store.find_or_create_person("@rater").expect("person");
    let since = chrono::Utc::now() - chrono::Duration::days(1);
    let interactions = store
        .query_interactions(&rater, since, None)
        .expect("query");
    assert_eq!(interactions.len(), 3);

    let conversations: std::collections::HashSet<_> =
        interactions.iter().map(|i| i.conversation).collect();
    assert_eq!(conversations.len(), 2, "one conversation id per batch");
}

#[test]
fn test_huge_day_window_errors_instead_of_overflowing() {
    let (_store, dispatcher) = dispatcher();
    dispatcher.dispatch("@U1", "<@U2> +").expect("create");

    // The logs grammar admits any digit run, so windows far beyond what
    // chrono can subtract from now must come back as a plain error.
    let result = dispatcher.dispatch("@U1", "999999999999");
    assert!(matches!(result, Err(Error::InvalidInput(_))));

    let result = dispatcher.dispatch("@U1", "999999999999 person");
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn test_self_rating_is_atomic_across_the_batch() {
    let (_store, dispatcher) = dispatcher();

    let result = dispatcher.dispatch("@U1", "<@U2> + <@U1> -");
    assert!(matches!(result, Err(Error::SelfRatingRejected)));

    let outcome = dispatcher.dispatch("@U1", "").expect("logs");
    match outcome {
        CommandOutcome::Logs(logs) => {
            assert!(logs.is_empty(), "rejected batch must persist nothing");
        },
        other => panic!("expected logs, got {other:?}"),
    }
}

#[test]
fn test_on_disk_store_persists_between_opens() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("rapport.db");

    {
        let store = Arc::new(SqliteStore::new(&db_path).expect("open store"));
        let dispatcher = CommandDispatcher::new(store);
        dispatcher.dispatch("@rater", "<@U1> +").expect("create");
    }

    let store = Arc::new(SqliteStore::new(&db_path).expect("reopen store"));
    let dispatcher = CommandDispatcher::new(store);
    let outcome = dispatcher.dispatch("@rater", "").expect("logs");
    match outcome {
        CommandOutcome::Logs(logs) => assert_eq!(logs.len(), 1),
        other => panic!("expected logs, got {other:?}"),
    }
}
