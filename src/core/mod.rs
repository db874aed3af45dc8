pub mod config;
pub mod frontmatter;
pub mod note;
pub mod paths;
