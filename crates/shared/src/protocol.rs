use serde::{Deserialize, Serialize};

use crate::domain::Person;

pub const HOMEBOARD_STUDENTS_PATH: &str = "/get-homeboard-students";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomeboardStudentsResponse {
    #[serde(default)]
    pub students: Vec<Person>,
}
