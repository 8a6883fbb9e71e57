mod hit;

pub use hit::{CategoryHit, NavbarCategoryHit, ProductHit, SubcategoryHit};
