pub mod image;
pub mod iterator;
pub mod num;

pub mod prelude {
    pub use super::iterator::GridIterator;
    pub use super::num::Channel;
}
