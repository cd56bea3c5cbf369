use slotbuf::prelude::*;

#[derive(Clone, Element)]
#[element(relocate = "copy")]
struct Tagged<T, const N: usize> {
    tag: [u8; N],
    value: T,
}

#[derive(Clone, Element)]
enum Either<L, R> {
    Left(L),
    Right(R),
}

fn main() {
    assert_eq!(<Tagged<String, 2> as Element>::RELOCATION, Relocation::Copy);
    let mut a: Array<Either<u8, Str>> = Array::new();
    a.push_back(&Either::Left(1)).unwrap();
    a.push_back(&Either::Right("two".into())).unwrap();
    a.reserve(4).unwrap();
    assert_eq!(a.capacity(), 6);
    match &a[1] {
        Either::Right(s) => assert_eq!(*s, "two"),
        Either::Left(_) => unreachable!(),
    }
    let t = Tagged { tag: *b"ok", value: String::from("v") };
    let ts = Array::filled(&t, 1).unwrap();
    assert_eq!(&ts[0].tag, b"ok");
    assert_eq!(ts[0].value, "v");
}
