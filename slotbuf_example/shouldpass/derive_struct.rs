use slotbuf::prelude::*;

#[derive(Clone, Element)]
struct Reading {
    sensor: u16,
    values: Vec<f64>,
}

fn main() {
    let r = Reading { sensor: 3, values: vec![1.0, 2.0] };
    let mut a = Array::filled(&r, 2).unwrap();
    a.push_back(&r).unwrap();
    assert_eq!(a.len(), 3);
    assert_eq!(a[2].sensor, 3);
    assert_eq!(a[0].values.len(), 2);
}
