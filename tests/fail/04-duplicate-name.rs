#![allow(dead_code)]

use rust_data_shaping::Shape;

#[derive(Shape)]
pub struct Author {
    pub id: i64,
    #[shape(rename = "id")]
    pub author_id: i64,
}

fn main() {}
