pub mod daily;
pub mod monthly;
pub mod update;
pub mod yearly;
