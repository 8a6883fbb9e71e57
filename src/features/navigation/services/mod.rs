mod hierarchy;
mod navigation_service;

pub use hierarchy::build_tree;
pub use navigation_service::NavigationService;
