pub mod call;
pub mod credentials;
pub mod room;

pub use call::*;
pub use credentials::*;
pub use room::*;
