//! Unknown enum-level options are rejected.

#![allow(dead_code)]

use hostbridge::TagEnum;

#[derive(Clone, Copy, PartialEq, Eq, TagEnum)]
#[hostbridge(rename_all = "lowercase")]
enum Mode {
    On,
    Off,
}

fn main() {}
