mod product;

pub use product::{Product, ProductWithRefs};
