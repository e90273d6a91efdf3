pub mod powerline;
pub mod statusline;
