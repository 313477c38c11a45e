pub mod catalog;
pub mod comments;
pub mod insight;
pub mod shows;
pub mod watched;
