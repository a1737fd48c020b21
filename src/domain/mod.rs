pub mod common;
pub mod entry;
pub mod screen;
pub mod tag;

pub use common::{Displayable, NamedEntity};
pub use entry::{format_score, parse_score, Entry, EntryMode, MoodBand, FACTOR_SEPARATOR};
pub use screen::{PanelId, ScreenId, TabId};
pub use tag::{default_emotions, influence_factor, MoodCategory, Tag, INFLUENCE_FACTORS};
