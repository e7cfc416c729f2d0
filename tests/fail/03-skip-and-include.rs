#![allow(dead_code)]

use rust_data_shaping::Shape;

#[derive(Shape)]
pub struct Course {
    pub id: i64,
    #[shape(skip, include)]
    pub title: String,
}

fn main() {}
