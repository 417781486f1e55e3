pub mod catalog;
pub mod flags;

pub use catalog::{SectionCatalog, SectionDecl, DEFAULT_SECTION_IDS};
pub use flags::{flag_enabled, resolve_section_flags, SectionFlags};
