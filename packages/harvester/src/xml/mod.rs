//! XML utilities for navigating eCFR full-title documents.

mod utils;

pub use utils::{
    find_descendants, find_first_descendant, get_tag_name, optional_text, required_attribute,
    text_content,
};
