//! Tags must not be empty.

#![allow(dead_code)]

use hostbridge::TagEnum;

#[derive(Clone, Copy, PartialEq, Eq, TagEnum)]
enum Level {
    #[hostbridge(tag = "")]
    Silent,
    Loud,
}

fn main() {}
