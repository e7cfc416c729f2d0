#![allow(dead_code)]

use rust_data_shaping::Shape;

#[derive(Shape)]
pub struct Pair(pub i64, pub String);

fn main() {}
