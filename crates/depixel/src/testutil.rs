//! Shared test fixtures: tiny rasters drawn as text.

use crate::raster::PixelGrid;

pub const EAR: &str = "
    ......
    ..XX..
    .X..X.
    .X..X.
    ....X.
    ....X.
    ......
";

pub const CIRCLE: &str = "
    ......
    ..XX..
    .X..X.
    .X..X.
    ..XX..
    ......
";

pub const PLUS: &str = "
    ..X..
    ..X..
    XXXXX
    ..X..
    ..X..
";

pub const ISLAND: &str = "
    ....
    .X..
    ..XX
";

pub const INVADER: &str = "
    ..............
    .....XXXX.....
    ..XXXXXXXXXX..
    .XXXXXXXXXXXX.
    .XXX..XX..XXX.
    .XXXXXXXXXXXX.
    ....XX..XX....
    ...XX.XX.XX...
    .XX........XX.
    ..............
";

/// Parse a text raster: `.` and `o` are 0, `X` is 1.
pub fn mkpixels(text: &str) -> PixelGrid<u8> {
    let rows: Vec<Vec<u8>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.chars()
                .map(|c| match c {
                    'X' => 1,
                    _ => 0,
                })
                .collect()
        })
        .collect();
    PixelGrid::from_rows(rows).expect("fixture rasters are rectangular")
}
