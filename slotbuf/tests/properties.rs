use proptest::prelude::*;
use slotbuf::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(isize, i32),
    InsertSlice(isize, Vec<i32>),
    InsertRange(isize, isize, isize),
    Erase(isize, isize),
    PushBack(i32),
    PushBackN(i32, usize),
    PopBack,
    PopBackN(usize),
    Reserve(usize),
    Resize(usize),
    Compact,
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-1isize..12, any::<i32>()).prop_map(|(p, v)| Op::Insert(p, v)),
        (-1isize..12, proptest::collection::vec(any::<i32>(), 0..5))
            .prop_map(|(p, vs)| Op::InsertSlice(p, vs)),
        (-1isize..12, -1isize..12, -1isize..12).prop_map(|(p, a, b)| Op::InsertRange(p, a, b)),
        (-1isize..12, -1isize..12).prop_map(|(a, b)| Op::Erase(a, b)),
        any::<i32>().prop_map(Op::PushBack),
        (any::<i32>(), 0usize..4).prop_map(|(v, n)| Op::PushBackN(v, n)),
        Just(Op::PopBack),
        (0usize..4).prop_map(Op::PopBackN),
        (0usize..6).prop_map(Op::Reserve),
        (0usize..12).prop_map(Op::Resize),
        Just(Op::Compact),
        Just(Op::Clear),
    ]
}

/// Contents and capacity a buffer must have after each operation.
#[derive(Default)]
struct Model {
    values: Vec<i32>,
    capacity: usize,
}

impl Model {
    fn position(&self, p: isize) -> Option<usize> {
        usize::try_from(p).ok().filter(|&i| i <= self.values.len())
    }

    fn spare(&self) -> usize {
        self.capacity - self.values.len()
    }

    fn make_room(&mut self, n: usize) {
        if self.spare() < n {
            self.capacity += n;
        }
    }

    /// Applies `op`, returning whether the buffer should accept it.
    fn apply(&mut self, op: &Op) -> bool {
        match op {
            Op::Insert(p, v) => match self.position(*p) {
                Some(i) => {
                    self.make_room(1);
                    self.values.insert(i, *v);
                    true
                }
                None => false,
            },
            Op::InsertSlice(p, vs) => match self.position(*p) {
                Some(i) => {
                    if !vs.is_empty() {
                        self.make_room(vs.len());
                        self.values.splice(i..i, vs.iter().copied());
                    }
                    true
                }
                None => false,
            },
            Op::InsertRange(p, a, b) => {
                match (self.position(*p), self.position(*a), self.position(*b)) {
                    (Some(i), Some(a), Some(b)) if a <= b => {
                        let copied = self.values[a..b].to_vec();
                        if !copied.is_empty() {
                            self.make_room(copied.len());
                            self.values.splice(i..i, copied);
                        }
                        true
                    }
                    _ => false,
                }
            }
            Op::Erase(a, b) => match (self.position(*a), self.position(*b)) {
                (Some(a), Some(b)) if a < b => {
                    self.values.drain(a..b);
                    true
                }
                _ => false,
            },
            Op::PushBack(v) => {
                self.make_room(1);
                self.values.push(*v);
                true
            }
            Op::PushBackN(v, n) => {
                if *n == 0 {
                    return false;
                }
                self.make_room(*n);
                self.values.extend(std::iter::repeat(*v).take(*n));
                true
            }
            Op::PopBack => self.pop(1),
            Op::PopBackN(n) => self.pop(*n),
            Op::Reserve(n) => {
                self.capacity += n;
                true
            }
            Op::Resize(n) => {
                self.capacity = *n;
                self.values.truncate(*n);
                true
            }
            Op::Compact => {
                self.capacity = self.values.len();
                true
            }
            Op::Clear => {
                self.values.clear();
                true
            }
        }
    }

    fn pop(&mut self, n: usize) -> bool {
        if n == 0 || n > self.values.len() {
            return false;
        }
        self.values.truncate(self.values.len() - n);
        true
    }
}

fn run(a: &mut Array<i32>, op: &Op) -> Result<(), BufferError> {
    let begin = a.begin();
    match op {
        Op::Insert(p, v) => a.insert(begin + *p, v).map(drop),
        Op::InsertSlice(p, vs) => a.insert_slice(begin + *p, vs).map(drop),
        Op::InsertRange(p, x, y) => a.insert_range(begin + *p, begin + *x, begin + *y).map(drop),
        Op::Erase(x, y) => a.erase(begin + *x, begin + *y).map(drop),
        Op::PushBack(v) => a.push_back(v).map(drop),
        Op::PushBackN(v, n) => a.push_back_n(v, *n).map(drop),
        Op::PopBack => a.pop_back(),
        Op::PopBackN(n) => a.pop_back_n(*n),
        Op::Reserve(n) => a.reserve(*n),
        Op::Resize(n) => a.resize(*n),
        Op::Compact => a.compact(),
        Op::Clear => {
            a.clear();
            Ok(())
        }
    }
}

proptest! {
    #[test]
    fn matches_vec_model(ops in proptest::collection::vec(op(), 0..40)) {
        let mut a = Array::new();
        let mut model = Model::default();
        for op in &ops {
            let capacity = a.capacity();
            let before = a.as_slice().to_vec();
            let accepted = model.apply(op);
            let result = run(&mut a, op);
            prop_assert_eq!(result.is_ok(), accepted, "{:?}", op);
            if !accepted {
                prop_assert_eq!(a.as_slice(), &before[..]);
                prop_assert_eq!(a.capacity(), capacity);
            }
            prop_assert_eq!(a.as_slice(), &model.values[..], "{:?}", op);
            prop_assert_eq!(a.capacity(), model.capacity, "{:?}", op);
            prop_assert!(a.len() <= a.capacity());
        }
    }

    #[test]
    fn resize_keeps_a_prefix(values in proptest::collection::vec(any::<u16>(), 0..20), cap in 0usize..25) {
        let mut a = Array::from_slice(&values).unwrap();
        a.resize(cap).unwrap();
        let keep = values.len().min(cap);
        prop_assert_eq!(a.capacity(), cap);
        prop_assert_eq!(a.as_slice(), &values[..keep]);
    }

    #[test]
    fn clones_are_independent(values in proptest::collection::vec(".{0,4}", 1..8), extra in ".{0,4}") {
        let strs: Vec<Str> = values.iter().map(|s| Str::from(s.as_str())).collect();
        let a = Array::from_slice(&strs).unwrap();
        let mut b = a.clone();
        prop_assert_eq!(b.capacity(), a.len());
        b.push_back(&Str::from(extra.as_str())).unwrap();
        b[0].push_str("!").unwrap();
        prop_assert_eq!(a.len(), values.len());
        prop_assert_eq!(a[0].to_string(), values[0].clone());
        prop_assert_eq!(b[0].to_string(), format!("{}!", values[0]));
    }

    #[test]
    fn strings_encode_like_std(s in "\\PC{0,12}") {
        let utf8: Str = Str::copy_from_str(&s).unwrap();
        prop_assert_eq!(utf8.as_slice(), s.as_bytes());
        prop_assert_eq!(utf8.as_str(), Ok(s.as_str()));

        let utf16 = Utf16Str::copy_from_str(&s).unwrap();
        let units: Vec<u16> = s.encode_utf16().collect();
        prop_assert_eq!(utf16.as_slice(), &units[..]);
        prop_assert_eq!(utf16.to_string(), s.clone());

        let utf32 = Utf32Str::copy_from_str(&s).unwrap();
        let chars: Vec<char> = s.chars().collect();
        prop_assert_eq!(utf32.as_slice(), &chars[..]);
    }

    #[test]
    fn concatenation_sizes_exactly(a in "\\PC{0,8}", b in "\\PC{0,8}") {
        let left: Str = Str::copy_from_str(&a).unwrap();
        let joined = left.try_concat(&b).unwrap();
        prop_assert_eq!(joined.capacity(), a.len() + b.len());
        prop_assert_eq!(joined.to_string(), format!("{}{}", a, b));
    }

    #[test]
    fn insert_then_erase_restores_contents(
        values in proptest::collection::vec(any::<i64>(), 0..12),
        range in proptest::collection::vec(any::<i64>(), 1..6),
        at in 0usize..12,
    ) {
        let at = at.min(values.len()) as isize;
        let mut a = Array::from_slice(&values).unwrap();
        let first = a.insert_slice(a.begin() + at, &range).unwrap();
        prop_assert_eq!(a.len(), values.len() + range.len());
        a.erase(first, first + range.len() as isize).unwrap();
        prop_assert_eq!(a.as_slice(), &values[..]);
    }

    #[test]
    fn compact_is_idempotent(values in proptest::collection::vec(any::<u8>(), 0..12), extra in 0usize..8) {
        let mut a = Array::from_slice(&values).unwrap();
        a.reserve(extra).unwrap();
        a.compact().unwrap();
        prop_assert_eq!(a.capacity(), a.len());
        a.compact().unwrap();
        prop_assert_eq!(a.capacity(), values.len());
        prop_assert_eq!(a.as_slice(), &values[..]);
    }
}
