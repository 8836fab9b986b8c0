pub mod adjust;
pub mod dispatch;
pub mod history;
pub mod learning;
pub mod measure;
pub mod shared;
pub mod trace;
