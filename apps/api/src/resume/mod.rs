// Resume text handling: ASCII sanitization, section parsing, contact block.
// Pure functions only; nothing here touches the network.

pub mod contact;
pub mod sanitize;
pub mod sections;

pub use contact::ContactBlock;
pub use sanitize::sanitize;
pub use sections::{parse_sections, ResumeSections};
