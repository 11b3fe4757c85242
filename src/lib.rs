pub mod avlset;
pub mod node;

pub use self::avlset::AvlSet;
pub use self::node::Node;
