#![allow(non_snake_case)]

use rust_data_shaping::{project, Shape};

#[derive(Shape)]
#[shape(rename_all = "camelCase")]
pub struct Course {
    pub id: u32,
    pub author_id: u32,
    #[shape(include, rename = "Summary")]
    description: String,
    #[shape(skip)]
    pub Id: u32,
}

fn main() {
    let courses = vec![Course {
        id: 1,
        author_id: 7,
        description: "ships".to_string(),
        Id: 0,
    }];
    let shaped = project(&courses, Some("summary, ID")).unwrap();
    assert_eq!(shaped[0].keys().collect::<Vec<_>>(), vec!["Summary", "id"]);
}
