mod call_screen;

pub use call_screen::*;
