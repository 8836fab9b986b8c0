pub mod points;
pub mod view;
pub mod photo;
pub mod record_id;
