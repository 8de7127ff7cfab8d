pub mod angle;
pub mod path;
pub mod rect;
pub mod site;
