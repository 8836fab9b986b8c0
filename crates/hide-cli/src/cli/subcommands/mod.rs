mod history;
mod learning;

pub use history::HistoryCommands;
pub use learning::LearningCommands;
