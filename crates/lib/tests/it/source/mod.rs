//! Document source integration tests

mod json;
