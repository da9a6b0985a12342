pub mod employee;
pub mod order;
pub mod place;
