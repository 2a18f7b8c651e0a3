pub mod greeting;
pub mod product;
