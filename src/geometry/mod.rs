pub mod transform;
pub mod vector;
pub mod visibility;
