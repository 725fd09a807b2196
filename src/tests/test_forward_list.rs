use std::collections::VecDeque;
use std::convert::Infallible;

use fwdlist::infra::storage::{AllocError, Allocator, Arena, Bounded};
use fwdlist::{ForwardList, InsertError, ListError, Position};
use proptest::prelude::*;

fn values<T: Clone>(list: &ForwardList<T, impl Allocator>) -> Vec<T> {
    list.iter().cloned().collect()
}

#[test]
fn test_scenario() {
    let mut list = ForwardList::try_from_slice(&[1, 2, 3]).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.display().to_string(), "size = 3{1 2 3 }");

    list.push_front(0);
    assert_eq!(values(&list), vec![0, 1, 2, 3]);
    assert_eq!(list.len(), 4);

    list.pop_front();
    list.pop_front();
    assert_eq!(values(&list), vec![2, 3]);
    assert_eq!(list.len(), 2);

    let mut copy = list.clone();
    copy.push_front(9);
    assert_eq!(values(&list), vec![2, 3]);
    assert_eq!(values(&copy), vec![9, 2, 3]);
}

#[test]
fn test_range_constructor() {
    let source = vec![String::from("x"), String::from("y")];
    let list = ForwardList::try_from_iter_cloned(&source).unwrap();
    assert_eq!(values(&list), source);

    let list = ForwardList::try_from_iter(source.clone()).unwrap();
    assert_eq!(values(&list), source);

    let list: ForwardList<_> = (0..4).collect();
    assert_eq!(values(&list), vec![0, 1, 2, 3]);
}

#[test]
fn test_walk_and_insert_in_the_middle() {
    let mut list = ForwardList::from([1, 3, 5]);

    // insert an even number after every odd one
    let mut pos = list.begin();
    while !pos.is_end() {
        let value = *pos.get(&list).unwrap();
        let inserted = list.insert_after(pos, value + 1);
        pos = inserted.next(&list);
    }
    assert_eq!(values(&list), vec![1, 2, 3, 4, 5, 6]);

    // erase every even number again
    let mut pos = list.begin();
    while !pos.is_end() {
        pos = list.erase_after(pos);
    }
    assert_eq!(values(&list), vec![1, 3, 5]);
}

#[test]
fn test_invalid_dereference() {
    for len in 0..4 {
        let list: ForwardList<usize> = (0..len).collect();
        assert_eq!(list.before_begin().get(&list), Err(ListError::BeforeBegin));
        assert_eq!(list.end().get(&list), Err(ListError::End));
        assert_ne!(ListError::BeforeBegin, ListError::End);
    }
}

#[test]
fn test_front_on_empty() {
    let mut list = ForwardList::<u8>::new();
    assert_eq!(list.front(), Err(ListError::Empty));
    assert_eq!(list.front_mut(), Err(ListError::Empty));
    assert_eq!(list.pop_front(), None);
}

#[test]
fn test_failed_construction_keeps_list() {
    let mut list = ForwardList::from([1, 2, 3]);
    let before = values(&list);

    for pos in [list.before_begin(), list.begin(), list.begin().next(&list)] {
        let result = list.try_insert_after_with(pos, || "42x".parse::<i32>());
        assert!(matches!(result, Err(InsertError::Construct(_))));
        assert_eq!(values(&list), before);
        assert_eq!(list.len(), 3);
        assert_eq!(list.arena().len(), 3);
    }

    let pos = list
        .try_insert_after_with(list.before_begin(), || "42".parse::<i32>())
        .unwrap();
    assert_eq!(pos, list.begin());
    assert_eq!(list.front(), Ok(&42));
}

#[test]
fn test_bounded_policy() {
    let mut list = ForwardList::new_in(Bounded::new(3));
    let last = list.try_extend_after(list.before_begin(), 0..3).unwrap();
    assert_eq!(last.get(&list), Ok(&2));

    let err = ListError::Alloc(AllocError::Full { capacity: 3 });
    assert_eq!(list.try_insert_after(last, 3), Err(err));
    assert_eq!(
        list.try_insert_after_with(last, || Ok::<_, Infallible>(3)),
        Err(InsertError::List(err))
    );
    assert_eq!(values(&list), vec![0, 1, 2]);
    assert_eq!(list.allocator().capacity(), 3);
}

#[test]
fn test_move_semantics() {
    let mut source = ForwardList::from([1, 2, 3]);
    let dest = source.take();
    assert!(source.is_empty());
    assert_eq!(source.len(), 0);
    assert_eq!(values(&dest), vec![1, 2, 3]);

    let mut target = ForwardList::from([7]);
    let mut source = dest;
    target.assign_take(&mut source);
    assert_eq!(values(&target), vec![1, 2, 3]);
    assert!(source.is_empty());
}

#[test]
fn test_lists_compare_by_elements() {
    let global = ForwardList::from([1, 2]);
    let bounded = ForwardList::try_from_slice_in(&[1, 2], Bounded::new(8)).unwrap();
    assert!(global == bounded);
    assert_ne!(global, ForwardList::from([1]));
}

#[derive(Debug, Clone)]
enum Op {
    PushFront(i32),
    PopFront,
    InsertAfter(usize, i32),
    EraseAfter(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i32>().prop_map(Op::PushFront),
        2 => Just(Op::PopFront),
        3 => (0..16usize, any::<i32>()).prop_map(|(at, value)| Op::InsertAfter(at, value)),
        2 => (0..16usize).prop_map(Op::EraseAfter),
        1 => Just(Op::Clear),
    ]
}

/// The position `steps` advances after before-begin, clamped to the last
/// element.
fn position_at<T>(list: &ForwardList<T>, steps: usize) -> (Position<T>, usize) {
    let steps = steps.min(list.len());
    let mut pos = list.before_begin();
    for _ in 0..steps {
        pos.advance(list);
    }
    (pos, steps)
}

proptest! {
    #[test]
    fn prop_matches_model(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut list = ForwardList::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::PushFront(value) => {
                    list.push_front(value);
                    model.push_front(value);
                }
                Op::PopFront => {
                    prop_assert_eq!(list.pop_front(), model.pop_front());
                }
                Op::InsertAfter(at, value) => {
                    let (pos, index) = position_at(&list, at);
                    let inserted = list.insert_after(pos, value);
                    model.insert(index, value);
                    prop_assert_eq!(inserted.get(&list), Ok(&value));
                }
                Op::EraseAfter(at) => {
                    let (pos, index) = position_at(&list, at);
                    list.erase_after(pos);
                    if index < model.len() {
                        model.remove(index);
                    }
                }
                Op::Clear => {
                    list.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.is_empty(), model.is_empty());
            prop_assert_eq!(list.iter().count(), list.len());
            prop_assert_eq!(list.arena().len(), list.len());
            prop_assert_eq!(values(&list), model.iter().copied().collect::<Vec<_>>());
        }
    }

    #[test]
    fn prop_copy_is_independent(
        items in proptest::collection::vec(any::<i16>(), 0..32),
        extra in any::<i16>(),
    ) {
        let mut list = ForwardList::try_from_slice(&items).unwrap();
        let mut copy = list.try_clone().unwrap();
        prop_assert_eq!(&list, &copy);

        copy.push_front(extra);
        prop_assert_eq!(values(&list), items.clone());

        list.clear();
        prop_assert_eq!(copy.len(), items.len() + 1);
        prop_assert_eq!(copy.front(), Ok(&extra));
    }

    #[test]
    fn prop_take_empties_source(items in proptest::collection::vec(any::<u8>(), 0..32)) {
        let mut source = ForwardList::try_from_slice(&items).unwrap();
        let dest = source.take();
        prop_assert!(source.is_empty());
        prop_assert_eq!(source.begin(), source.end());
        prop_assert_eq!(values(&dest), items);
    }
}
