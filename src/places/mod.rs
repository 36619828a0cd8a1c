mod candidate;
mod filter;
mod google;
mod phrase;

pub use candidate::*;
pub use filter::*;
pub use google::*;
pub use phrase::*;
