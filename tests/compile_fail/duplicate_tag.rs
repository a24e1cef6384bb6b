//! Two variants mapping to the same tag.

#![allow(dead_code)]

use hostbridge::TagEnum;

#[derive(Clone, Copy, PartialEq, Eq, TagEnum)]
enum Speed {
    #[hostbridge(tag = "fast")]
    Quick,
    #[hostbridge(tag = "fast")]
    Rapid,
}

fn main() {}
