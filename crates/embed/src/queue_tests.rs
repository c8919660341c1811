// SPDX-License-Identifier: MIT

use super::*;

#[tokio::test]
async fn fifo_within_batch_class() {
    let (handle, mut dispatcher) = channel();
    let (reply1, rx1) = oneshot::channel();
    let (reply2, rx2) = oneshot::channel();
    handle.submit(Priority::Batch, EmbedJob { texts: vec!["first".into()], reply: reply1 });
    handle.submit(Priority::Batch, EmbedJob { texts: vec!["second".into()], reply: reply2 });

    let j1 = dispatcher.next().await.expect("job 1");
    assert_eq!(j1.texts, vec!["first".to_string()]);
    let j2 = dispatcher.next().await.expect("job 2");
    assert_eq!(j2.texts, vec!["second".to_string()]);

    drop((rx1, rx2));
}

#[tokio::test]
async fn immediate_submitted_after_batch_is_dispatched_first() {
    let (handle, mut dispatcher) = channel();
    handle.submit(Priority::Batch, EmbedJob { texts: vec!["batch".into()], reply: oneshot::channel().0 });
    handle.submit(
        Priority::Immediate,
        EmbedJob { texts: vec!["immediate".into()], reply: oneshot::channel().0 },
    );

    let first = dispatcher.next().await.expect("job");
    assert_eq!(first.texts, vec!["immediate".to_string()]);
    let second = dispatcher.next().await.expect("job");
    assert_eq!(second.texts, vec!["batch".to_string()]);
}

#[tokio::test]
async fn empty_closed_queue_yields_none() {
    let (handle, mut dispatcher) = channel();
    drop(handle);
    assert!(dispatcher.next().await.is_none());
}
