//! Variants carrying data have no tag.

#![allow(dead_code)]

use hostbridge::TagEnum;

#[derive(Clone, Copy, PartialEq, TagEnum)]
enum Shape {
    Point,
    Circle(f64),
}

fn main() {}
