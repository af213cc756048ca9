use chain_collections::List;
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
enum Op {
    PushBack(u8),
    PushFront(u8),
    PopBack,
    PopFront,
    InsertAt(usize, u8),
    EraseAt(usize),
    Reverse,
    Sort,
    Unique,
    SpliceAt(usize, Vec<u8>),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u8>().prop_map(Op::PushBack),
        3 => any::<u8>().prop_map(Op::PushFront),
        2 => Just(Op::PopBack),
        2 => Just(Op::PopFront),
        2 => (0usize..32, any::<u8>()).prop_map(|(i, v)| Op::InsertAt(i, v)),
        2 => (0usize..32).prop_map(Op::EraseAt),
        1 => Just(Op::Reverse),
        1 => Just(Op::Sort),
        1 => Just(Op::Unique),
        1 => (0usize..32, proptest::collection::vec(0u8..8, 0..5))
            .prop_map(|(i, vs)| Op::SpliceAt(i, vs)),
    ]
}

// Model operations on List against VecDeque. Indices are clamped into the
// live range so positions are always produced by the list under test.
proptest! {
    #[test]
    fn prop_list_matches_deque(ops in proptest::collection::vec(arb_op(), 1..120)) {
        let mut sut: List<u8> = List::new();
        let mut model: VecDeque<u8> = VecDeque::new();

        for op in ops {
            match op {
                Op::PushBack(v) => {
                    sut.push_back(v);
                    model.push_back(v);
                }
                Op::PushFront(v) => {
                    sut.push_front(v);
                    model.push_front(v);
                }
                Op::PopBack => prop_assert_eq!(sut.pop_back().ok(), model.pop_back()),
                Op::PopFront => prop_assert_eq!(sut.pop_front().ok(), model.pop_front()),
                Op::InsertAt(i, v) => {
                    let i = i % (model.len() + 1);
                    let pos = sut.position(i).expect("in range");
                    let new = sut.insert(pos, v).expect("own position");
                    prop_assert_eq!(sut.get(new), Ok(&v));
                    model.insert(i, v);
                }
                Op::EraseAt(i) => {
                    if !model.is_empty() {
                        let i = i % model.len();
                        let pos = sut.position(i).expect("in range");
                        prop_assert_eq!(sut.erase(pos).ok(), model.remove(i));
                        prop_assert!(sut.get(pos).is_err());
                    }
                }
                Op::Reverse => {
                    sut.reverse();
                    model = model.into_iter().rev().collect();
                }
                Op::Sort => {
                    sut.sort();
                    model.make_contiguous().sort();
                }
                Op::Unique => {
                    sut.unique();
                    let mut v: Vec<u8> = model.into_iter().collect();
                    v.dedup();
                    model = v.into();
                }
                Op::SpliceAt(i, vs) => {
                    let i = i % (model.len() + 1);
                    let pos = sut.position(i).expect("in range");
                    let mut donor: List<u8> = vs.iter().copied().collect();
                    sut.splice(pos, &mut donor).expect("own position");
                    prop_assert!(donor.is_empty());
                    for (off, v) in vs.into_iter().enumerate() {
                        model.insert(i + off, v);
                    }
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            let forward: Vec<u8> = sut.iter().copied().collect();
            let backward: Vec<u8> = sut.iter().rev().copied().collect();
            let expected: Vec<u8> = model.iter().copied().collect();
            prop_assert_eq!(&forward, &expected);
            prop_assert_eq!(backward, expected.into_iter().rev().collect::<Vec<_>>());
        }
    }
}
