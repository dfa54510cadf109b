//! Integration tests for the Store runtime
//!
//! These tests drive a small list-keeping reducer through the public API
//! only: concurrent senders, effect feedback, and shutdown draining.

use stockroom_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use stockroom_runtime::{Store, StoreConfig, StoreError};
use std::time::Duration;

#[derive(Clone, Debug, Default)]
struct ListState {
    entries: Vec<u32>,
    fetches: usize,
}

#[derive(Clone, Debug)]
enum ListAction {
    Append(u32),
    Fetch { value: u32, after: Duration },
    Fetched(u32),
}

#[derive(Clone)]
struct ListReducer;

impl Reducer for ListReducer {
    type State = ListState;
    type Action = ListAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ListAction::Append(value) => {
                state.entries.push(value);
                SmallVec::new()
            }
            ListAction::Fetch { value, after } => {
                state.fetches += 1;
                smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(after).await;
                    Some(ListAction::Fetched(value))
                }))]
            }
            ListAction::Fetched(value) => {
                state.entries.push(value);
                SmallVec::new()
            }
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("stockroom_runtime=trace")
        .try_init();
}

#[tokio::test]
async fn concurrent_sends_are_not_lost() {
    init_tracing();
    let store = Store::new(ListState::default(), ListReducer, ());

    let tasks: Vec<_> = (0..20)
        .map(|value| {
            let store = store.clone();
            tokio::spawn(async move {
                let _ = store.send(ListAction::Append(value)).await;
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await.is_ok());
    }

    let mut entries = store.state(|s| s.entries.clone()).await;
    entries.sort_unstable();
    assert_eq!(entries, (0..20).collect::<Vec<_>>());
}

#[tokio::test]
async fn handle_waits_for_feedback_action() {
    init_tracing();
    let store = Store::new(ListState::default(), ListReducer, ());

    let result = store
        .send(ListAction::Fetch {
            value: 7,
            after: Duration::from_millis(20),
        })
        .await;
    let Ok(mut handle) = result else {
        unreachable!("store accepts actions before shutdown");
    };

    // The fetch is in flight: counted, not yet applied
    assert_eq!(store.state(|s| s.fetches).await, 1);

    handle.wait().await;
    assert_eq!(store.state(|s| s.entries.clone()).await, vec![7]);
}

#[tokio::test]
async fn shutdown_drains_running_effects() {
    init_tracing();
    let store = Store::with_config(
        ListState::default(),
        ListReducer,
        (),
        StoreConfig::default().with_shutdown_timeout(Duration::from_secs(2)),
    );

    let _ = store
        .send(ListAction::Fetch {
            value: 1,
            after: Duration::from_millis(10),
        })
        .await;

    assert!(store.shutdown(None).await.is_ok());
    assert_eq!(store.pending_effects(), 0);
}

#[tokio::test]
async fn shutdown_times_out_on_slow_effects() {
    init_tracing();
    let store = Store::new(ListState::default(), ListReducer, ());

    let _ = store
        .send(ListAction::Fetch {
            value: 1,
            after: Duration::from_secs(5),
        })
        .await;

    let result = store.shutdown(Some(Duration::from_millis(20))).await;
    assert!(matches!(result, Err(StoreError::ShutdownTimeout(1))));
}
