use slotbuf::prelude::*;

fn main() {
    let row = array![0u32; 3];
    let mut grid: Array<Array<u32>> = Array::filled(&row, 2).unwrap();
    grid[1][2] = 9;
    grid.insert(grid.begin(), &array![5, 6]).unwrap();
    assert_eq!(&grid[0][..], &[5, 6]);
    assert_eq!(grid[2][2], 9);

    let mut words: Array<Utf16Str> = Array::new();
    words.push_back(&Utf16Str::copy_from_str("héllo").unwrap()).unwrap();
    assert_eq!(words[0].len(), 5);
    assert_eq!(words[0].to_string(), "héllo");
}
