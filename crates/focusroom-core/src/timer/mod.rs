mod history;
mod machine;
mod mode;
mod scheme;
mod settings;

pub use history::{Rating, SessionRecord};
pub use machine::{Command, FocusState, Stamp, TimerStatus};
pub use mode::Mode;
pub use scheme::{Scheme, SchemeDraft, LONG_SCHEME_ID, STANDARD_SCHEME_ID};
pub use settings::{Settings, SettingsPatch};
