pub mod item;
pub mod report;

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;
