#![allow(dead_code)]

use rust_data_shaping::Shape;

#[derive(Shape)]
pub enum Kind {
    Course,
    Author,
}

fn main() {}
