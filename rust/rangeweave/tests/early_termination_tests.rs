use rangeweave::{
    BreakOrContinue, ByIndex, GeneratorRange, GeneratorRangeExt, IndexRange, IndexRangeExt,
    from_iter,
    generator::from_iter_non_abortable,
    signal::{Flow, NonAbortable},
    storage::ByValue,
    traversal::{Forward, UseDefault},
};
use rangeweave_testkit::{
    adaptors::{EvenFilter, PassThrough, Scaled, TakeN},
    data_gen::random_sequence,
    ranges::ForwardList,
    recorder::Recorder,
};

fn is_abortable<R: GeneratorRange>(_: &R) -> bool {
    <R::Flow as Flow>::ABORTABLE
}

#[test]
fn test_break_at_third_element() {
    let base = vec![1i64, 2, 3, 4, 5];
    let derived = PassThrough::<_, UseDefault>::new(&base);
    let mut recorder = Recorder::breaking_after(3);
    let result = derived.for_each_item(|x| recorder.record(*x));
    assert_eq!(result, BreakOrContinue::Break);
    assert_eq!(recorder.seen(), &[1, 2, 3]);
}

#[test]
fn test_break_at_every_position() {
    let base = random_sequence(24, 99);
    let n = base.len();
    let derived = PassThrough::<_, UseDefault>::new(&base);
    for k in 1..=n + 1 {
        let mut recorder = Recorder::breaking_after(k);
        let result = derived.generate(|x| recorder.record(*x));
        if k <= n {
            assert_eq!(result, BreakOrContinue::Break);
            assert_eq!(recorder.calls(), k);
        } else {
            assert_eq!(result, BreakOrContinue::Continue);
            assert_eq!(recorder.calls(), n);
        }
        assert_eq!(recorder.seen(), &base[..recorder.calls()]);
    }
}

#[test]
fn test_break_through_filter_and_chain() {
    let mut rng = fastrand::Rng::with_seed(2985745485);
    for _ in 0..16 {
        let base = random_sequence(rng.usize(1..64), rng.u64(..));
        let evens = EvenFilter::new(&base);
        let outer = PassThrough::<_, UseDefault>::new(&evens);
        let expected: Vec<i64> = base.iter().copied().filter(|v| v % 2 == 0).collect();
        if expected.is_empty() {
            continue;
        }

        let k = rng.usize(1..=expected.len());
        let mut recorder = Recorder::breaking_after(k);
        let result = outer.for_each_item(|x| recorder.record(*x));
        assert_eq!(result, BreakOrContinue::Break);
        assert_eq!(recorder.seen(), &expected[..k]);
    }
}

#[test]
fn test_break_through_transform() {
    let base = vec![1i64, 2, 3, 4];
    let scaled = Scaled::new(ByValue(base), 3);
    let mut recorder = Recorder::breaking_after(2);
    let result = scaled.for_each_item(|x| recorder.record(x));
    assert_eq!(result, BreakOrContinue::Break);
    assert_eq!(recorder.into_seen(), vec![3, 6]);
}

#[test]
fn test_void_callback_runs_to_completion() {
    let list = ForwardList::new(vec![1, 2, 3]);
    let derived = PassThrough::<_, UseDefault>::new(&list);
    let mut recorder = Recorder::new();
    let result = derived.for_each_item(|x| recorder.observe(*x));
    assert_eq!(result, BreakOrContinue::Continue);
    assert_eq!(recorder.seen(), &[1, 2, 3]);
}

#[test]
fn test_non_abortable_base_delivers_everything() {
    let derived =
        PassThrough::<_, UseDefault>::new(ByValue(from_iter_non_abortable(vec![1, 2, 3, 4])));
    assert!(!is_abortable(&derived));
    fn flow_of<R: GeneratorRange<Flow = NonAbortable>>(_: &R) {}
    flow_of(&derived);

    let mut recorder = Recorder::new();
    derived.for_each_item(|x| recorder.observe(x));
    assert_eq!(recorder.into_seen(), vec![1, 2, 3, 4]);

    let abortable = PassThrough::<_, UseDefault>::new(ByValue(from_iter(vec![1, 2, 3, 4])));
    assert!(is_abortable(&abortable));
    assert_eq!(abortable.first_item(), Some(1));
}

#[test]
fn test_counting_range_base() {
    let derived = PassThrough::<_, UseDefault>::new(ByValue(0u32..10));
    let mut recorder = Recorder::breaking_after(4);
    let result = derived.for_each_item(|x| recorder.record(x));
    assert_eq!(result, BreakOrContinue::Break);
    assert_eq!(recorder.into_seen(), vec![0, 1, 2, 3]);
    assert_eq!(derived.count_items(), 10);
}

#[test]
fn test_take_n_stops_vec_base() {
    let base = random_sequence(20, 11);
    let taken = TakeN::new(&base, 5);
    let mut recorder = Recorder::new();
    let result = taken.for_each_item(|x| recorder.record(*x));
    assert_eq!(result, BreakOrContinue::Break);
    assert_eq!(recorder.seen(), &base[..5]);

    // Consumer breaks before the limit.
    let mut recorder = Recorder::breaking_after(2);
    let result = taken.for_each_item(|x| recorder.record(*x));
    assert_eq!(result, BreakOrContinue::Break);
    assert_eq!(recorder.calls(), 2);
}

#[test]
fn test_take_n_stops_iterator_base() {
    let calls = std::cell::Cell::new(0);
    let taken = TakeN::new(
        ByValue(from_iter((0..100).inspect(|_| calls.set(calls.get() + 1)))),
        3,
    );
    assert_eq!(taken.collect_items(), vec![0, 1, 2]);
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_take_n_restarts_every_generation() {
    let base = vec![1i64, 2, 3, 4];
    let taken = TakeN::new(&base, 2);
    assert_eq!(taken.collect_items(), vec![&1, &2]);
    assert_eq!(taken.collect_items(), vec![&1, &2]);
    assert_eq!(taken.count_items(), 2);

    let longer = TakeN::new(&base, 10);
    assert_eq!(longer.for_each_item(|_| ()), BreakOrContinue::Continue);
    assert_eq!(longer.count_items(), 4);
    assert_eq!(TakeN::new(&base, 0).first_item(), None);
}

/// Squares of `0..n`, pull protocol only.
struct Squares(u64);

impl IndexRange for Squares {
    type Index = u64;
    type Traversal = Forward;
    type Ref<'a> = u64;

    fn begin_index(&self) -> u64 {
        0
    }

    fn end_index(&self) -> u64 {
        self.0
    }

    fn at_end_index(&self, idx: &u64) -> bool {
        *idx >= self.0
    }

    fn equal_index(&self, lhs: &u64, rhs: &u64) -> bool {
        lhs == rhs
    }

    fn increment_index(&self, idx: &mut u64) {
        *idx += 1;
    }

    fn dereference_index<'a>(&'a self, idx: &u64) -> u64 {
        idx * idx
    }
}

#[test]
fn test_pull_only_range_gains_push_side() {
    let squares = PassThrough::<_, UseDefault>::new(ByValue(ByIndex(Squares(6))));
    let mut recorder = Recorder::breaking_after(3);
    let result = squares.for_each_item(|x| recorder.record(x));
    assert_eq!(result, BreakOrContinue::Break);
    assert_eq!(recorder.into_seen(), vec![0, 1, 4]);
    assert_eq!(squares.index_iter().last(), Some(25));

    let taken = TakeN::new(ByValue(ByIndex(Squares(100))), 4);
    assert_eq!(taken.collect_items(), vec![0, 1, 4, 9]);
}
