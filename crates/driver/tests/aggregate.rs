use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;

use codrive_driver::prelude::*;

fn delayed(log: Arc<Mutex<Vec<String>>>, ms: u64, n: i64) -> Yieldable {
    Yieldable::future(async move {
        log.lock().unwrap().push(format!("start {n}"));
        tokio::time::sleep(Duration::from_millis(ms)).await;
        log.lock().unwrap().push(format!("done {n}"));
        Ok(Value::from(n))
    })
}

#[tokio::test(start_paused = true)]
async fn sequence_settles_children_one_at_a_time() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let children = vec![
        delayed(Arc::clone(&log), 30, 1),
        delayed(Arc::clone(&log), 20, 2),
        delayed(Arc::clone(&log), 10, 3),
    ];

    let task = drive(move |co| async move {
        let all = suspend!(co, Yieldable::seq(children));
        Ok(all)
    });

    assert_eq!(
        task.await,
        Ok(Value::Seq(vec![
            Value::from(1),
            Value::from(2),
            Value::from(3)
        ]))
    );

    // Each child is launched only once the one before it settled,
    // even though the later children would finish sooner.
    assert_eq!(
        *log.lock().unwrap(),
        ["start 1", "done 1", "start 2", "done 2", "start 3", "done 3"]
    );
}

#[tokio::test]
async fn sequence_keeps_positional_order_despite_settle_timing() {
    use futures::channel::oneshot;

    let (tx_a, rx_a) = oneshot::channel();
    let (tx_b, rx_b) = oneshot::channel();
    let (tx_c, rx_c) = oneshot::channel();

    // Settle in reverse order, before anything is awaited.
    tx_c.send(3i64).unwrap();
    tx_b.send(2i64).unwrap();
    tx_a.send(1i64).unwrap();

    let task = drive(move |co| async move {
        let all = suspend!(
            co,
            Yieldable::seq([
                Yieldable::future(async move { Ok(Value::from(rx_a.await.unwrap())) }),
                Yieldable::future(async move { Ok(Value::from(rx_b.await.unwrap())) }),
                Yieldable::future(async move { Ok(Value::from(rx_c.await.unwrap())) }),
            ])
        );
        Ok(all)
    });

    assert_eq!(
        task.await,
        Ok(Value::Seq(vec![
            Value::from(1),
            Value::from(2),
            Value::from(3)
        ]))
    );
}

#[tokio::test]
async fn sequence_results_destructure_in_order() {
    let task = drive(|co| async move {
        let pair = suspend!(
            co,
            Yieldable::seq([
                Yieldable::future(async { Ok(Value::from(1)) }),
                Yieldable::future(async { Ok(Value::from(2)) }),
            ])
        );

        let [a, b] = pair.as_seq().unwrap() else {
            return Err(Error::rejected("expected a pair"));
        };

        Ok(Value::from(a.as_int().unwrap() + b.as_int().unwrap()))
    });

    assert_eq!(task.await, Ok(Value::from(3)));
}

#[tokio::test]
async fn sequence_accepts_plain_values_as_immediate_successes() {
    let task = drive(|co| async move {
        let all = suspend!(
            co,
            Yieldable::seq([
                Yieldable::from(Value::Null),
                Yieldable::thunk(|cb| cb.ok("mixed")),
                Yieldable::from(Value::from(false)),
            ])
        );
        Ok(all)
    });

    assert_eq!(
        task.await,
        Ok(Value::Seq(vec![
            Value::Null,
            Value::from("mixed"),
            Value::from(false)
        ]))
    );
}

#[tokio::test]
async fn empty_sequence_resolves_to_an_empty_sequence() {
    let task = drive(|co| async move {
        let all = suspend!(co, Yieldable::seq(Vec::<Yieldable>::new()));
        Ok(all)
    });

    assert_eq!(task.await, Ok(Value::Seq(Vec::new())));
}

#[tokio::test(start_paused = true)]
async fn sequence_failure_aborts_the_children_after_it() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let first = delayed(Arc::clone(&log), 10, 1);
    let never = delayed(Arc::clone(&log), 10, 3);

    let task = drive(move |co| async move {
        let all = suspend!(
            co,
            Yieldable::seq([
                first,
                Yieldable::future(async { Err(Error::rejected("boom")) }),
                never,
            ])
        );
        Ok(all)
    });

    assert_eq!(task.await, Err(Error::rejected("boom")));

    // The child after the failure was never launched.
    assert_eq!(*log.lock().unwrap(), ["start 1", "done 1"]);
}

#[tokio::test]
async fn mapping_resolves_keys_in_insertion_order() {
    let task = drive(|co| async move {
        let all = suspend!(
            co,
            Yieldable::map([
                ("x", Yieldable::future(async { Ok(Value::from(1)) })),
                ("y", Yieldable::thunk(|cb| cb.ok(2))),
            ])
        );
        Ok(all)
    });

    let mut expected = Map::new();
    expected.insert("x", 1);
    expected.insert("y", 2);

    assert_eq!(task.await, Ok(Value::Map(expected)));
}

#[tokio::test]
async fn mapping_passes_plain_values_through_unchanged() {
    let task = drive(|co| async move {
        let all = suspend!(
            co,
            Yieldable::map([
                ("deferred", Yieldable::thunk(|cb| cb.ok("settled"))),
                ("plain", Yieldable::from(Value::from("as-is"))),
                ("nothing", Yieldable::from(Value::Null)),
            ])
        );
        Ok(all)
    });

    let mut expected = Map::new();
    expected.insert("deferred", "settled");
    expected.insert("plain", "as-is");
    expected.insert("nothing", Value::Null);

    assert_eq!(task.await, Ok(Value::Map(expected)));
}

#[tokio::test]
async fn empty_mapping_resolves_to_an_empty_mapping() {
    let task = drive(|co| async move {
        let all = suspend!(co, Yieldable::map(Vec::<(String, Yieldable)>::new()));
        Ok(all)
    });

    assert_eq!(task.await, Ok(Value::Map(Map::new())));
}

#[tokio::test]
async fn mapping_failure_rejects_the_whole_mapping() {
    let task = drive(|co| async move {
        let all = suspend!(
            co,
            Yieldable::map([
                ("ok", Yieldable::thunk(|cb| cb.ok(1))),
                (
                    "bad",
                    Yieldable::future(async { Err(Error::rejected("boom")) })
                ),
            ])
        );
        Ok(all)
    });

    assert_eq!(task.await, Err(Error::rejected("boom")));
}

#[tokio::test]
async fn nested_aggregates_normalize_recursively() {
    let task = drive(|co| async move {
        let all = suspend!(
            co,
            Yieldable::map([
                (
                    "pair",
                    Yieldable::seq([
                        Yieldable::future(async { Ok(Value::from(1)) }),
                        Yieldable::future(async { Ok(Value::from(2)) }),
                    ])
                ),
                (
                    "inner",
                    Yieldable::coroutine(|co| async move {
                        let n = suspend!(co, Yieldable::thunk(|cb| cb.ok(3)));
                        Ok(n)
                    })
                ),
            ])
        );
        Ok(all)
    });

    let mut expected = Map::new();
    expected.insert("pair", vec![Value::from(1), Value::from(2)]);
    expected.insert("inner", 3);

    assert_eq!(task.await, Ok(Value::Map(expected)));
}
