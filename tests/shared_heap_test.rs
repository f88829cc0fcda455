use crossbeam_utils::thread;
use maxheap::{HeapError, MaxHeap, SharedMaxHeap};

#[test]
fn test_shared_heap_basic_ops() {
    let heap = SharedMaxHeap::new();
    assert!(heap.is_empty());
    assert_eq!(heap.extract_max(), Err(HeapError::EmptyCollection));

    heap.build_heap(vec![3, 1, 4, 1, 5, 9, 2, 6]);
    assert_eq!(heap.len(), 8);
    assert_eq!(heap.peek(), Some(9));

    assert_eq!(heap.update(0, 0), Ok(9));
    assert_eq!(heap.peek(), Some(6));
    assert_eq!(heap.remove(100), Err(HeapError::IndexOutOfRange { index: 100, len: 8 }));
    assert!(heap.remove(3).is_ok());
    assert!(heap.is_heap_valid());

    let inner = heap.into_inner();
    assert_eq!(inner.len(), 7);
}

#[test]
fn test_concurrent_writers_then_drain() {
    let heap = SharedMaxHeap::new();

    thread::scope(|s| {
        for t in 0..4 {
            let heap = &heap;
            s.spawn(move |_| {
                for i in 0..250 {
                    heap.insert(t * 1000 + i);
                }
            });
        }
    })
    .unwrap();

    assert_eq!(heap.len(), 1000);
    assert!(heap.is_heap_valid());

    let mut drained = heap.into_inner().into_sorted_vec();
    drained.reverse();
    assert_eq!(drained.first(), Some(&3249));
    assert_eq!(drained.last(), Some(&0));
}

#[test]
fn test_readers_run_alongside_writer() {
    let heap: SharedMaxHeap<i64> = MaxHeap::from((0..1000).collect::<Vec<_>>()).into();

    thread::scope(|s| {
        s.spawn(|_| {
            for i in 0..500 {
                heap.insert(i * 7 % 1013);
                let _ = heap.extract_max();
            }
        });

        for _ in 0..3 {
            s.spawn(|_| {
                for _ in 0..200 {
                    // Every read sees a heap between two complete operations.
                    let guard = heap.read();
                    assert!(guard.is_heap_valid());
                    assert_eq!(guard.peek(), guard.iter().max());
                }
            });
        }
    })
    .unwrap();

    assert_eq!(heap.len(), 1000);
    assert!(heap.is_heap_valid());
    assert_eq!(heap.snapshot().len(), 1000);
}
