pub mod product;

pub use product::product_model;
