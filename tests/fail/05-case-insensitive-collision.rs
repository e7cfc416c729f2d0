#![allow(dead_code)]

use rust_data_shaping::Shape;

#[derive(Shape)]
#[shape(rename_all = "PascalCase")]
pub struct Clash {
    pub a_b: i64,
    pub ab: i64,
}

fn main() {}
