mod borrowed;
mod nom_parser;
pub mod tags;

pub use self::borrowed::MessageRef;
pub use self::tags::{find_tag, tag_value, Tag};
