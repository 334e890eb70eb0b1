pub mod category;
pub mod rule;
pub mod settings;
pub mod usage;

pub use category::Category;
pub use rule::CategoryRule;
pub use settings::Settings;
pub use usage::{AppRecord, DailyTotal, SampleKey, UsageFacts, WindowTitleRecord};
