pub mod sort;
pub mod value;
