use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sgtree::{Natural, PriorityQueue, Reversed};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 3_000;

#[derive(Debug, Clone)]
enum QueueOp {
    Push(u8),
    Pop,
    PopLast,
}

fn queue_op_strategy() -> impl Strategy<Value = QueueOp> {
    prop_oneof![
        3 => (0u8..8).prop_map(QueueOp::Push),
        2 => Just(QueueOp::Pop),
        1 => Just(QueueOp::PopLast),
    ]
}

fn by_priority(a: &(u8, usize), b: &(u8, usize)) -> std::cmp::Ordering {
    a.0.cmp(&b.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Pushes `(priority, arrival)` pairs compared on priority alone, and checks that pops
    /// follow a stable sort of the pending pairs.
    #[test]
    fn pops_follow_a_stable_sort(ops in proptest::collection::vec(queue_op_strategy(), TEST_SIZE)) {
        let mut queue = PriorityQueue::with_comparator(by_priority);
        // Kept sorted by priority, arrival order within a priority.
        let mut model: Vec<(u8, usize)> = Vec::new();

        for (arrival, op) in ops.iter().enumerate() {
            match op {
                QueueOp::Push(priority) => {
                    queue.push((*priority, arrival));
                    let at = model.partition_point(|(existing, _)| existing <= priority);
                    model.insert(at, (*priority, arrival));
                }
                QueueOp::Pop => {
                    prop_assert_eq!(queue.peek(), model.first());
                    let expected = (!model.is_empty()).then(|| model.remove(0));
                    prop_assert_eq!(queue.pop(), expected);
                }
                QueueOp::PopLast => {
                    prop_assert_eq!(queue.peek_last(), model.last());
                    prop_assert_eq!(queue.pop_last(), model.pop());
                }
            }
            prop_assert_eq!(queue.len(), model.len());
        }

        prop_assert!(queue.iter().eq(model.iter()));
        prop_assert_eq!(queue.into_sorted_vec(), model);
    }
}

#[test]
fn equal_priorities_pop_in_push_order() {
    let mut queue = PriorityQueue::with_comparator(by_priority);
    queue.push((5, 0));
    queue.push((5, 1));
    assert_eq!(queue.pop(), Some((5, 0)));
    assert_eq!(queue.pop(), Some((5, 1)));
    assert_eq!(queue.pop(), None);
}

#[test]
fn natural_and_reversed_orders() {
    let mut low_first: PriorityQueue<i32> = [5, -1, 3].into_iter().collect();
    assert_eq!(low_first.pop(), Some(-1));

    let mut high_first = PriorityQueue::with_comparator(Reversed(Natural));
    high_first.extend([5, -1, 3]);
    assert_eq!(high_first.pop(), Some(5));
    assert_eq!(high_first.iter().copied().collect::<Vec<_>>(), [3, -1]);
    assert_eq!(format!("{high_first:?}"), "[3, -1]");
}

#[test]
fn interleaved_pushes_and_pops() {
    let mut queue = PriorityQueue::new();
    for round in 0..1000u32 {
        queue.push(round % 17);
        if round % 3 == 0 {
            queue.pop();
        }
    }
    let drained = queue.clone().into_sorted_vec();
    assert!(drained.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(drained.len(), queue.len());
}
