pub mod crtsh;
pub mod normalize;

pub use crtsh::{CrtSh, SourceFormat};
pub use normalize::{extract, extract_into, validate_domain, DomainSet};
