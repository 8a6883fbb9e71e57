pub mod navigation_dto;

pub use navigation_dto::{NavigationCategory, NavigationGroup, NavigationSubcategory};
