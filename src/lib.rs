//! Sequence containers hand crafted for performance: linked and
//! array-backed lists with a shared surface contract.

/// List data structures: a doubly linked list over a preallocated
/// node arena and an array-backed sibling with the same surface.
pub mod lists {
    pub use corvid_lists::arraylist::ArrayList;
    pub use corvid_lists::error::ListError;
    pub use corvid_lists::linkedlist::list::LinkedList;
    /// This module contains structs specific to the [`LinkedList`]
    pub mod linkedlist {
        pub use corvid_lists::linkedlist::cursor::Cursor;
        pub use corvid_lists::linkedlist::cursor::DescendingCursor;
        pub use corvid_lists::linkedlist::iter::IntoIter;
        pub use corvid_lists::linkedlist::iter::Iter;
        pub use corvid_lists::linkedlist::iter::IterMut;
        pub use corvid_lists::linkedlist::split::Batch;
        pub use corvid_lists::linkedlist::split::Splitter;
        pub use corvid_lists::linkedlist::split::BATCH_UNIT;
        pub use corvid_lists::linkedlist::split::MAX_BATCH;
    }
}
