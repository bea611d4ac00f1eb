mod view;

pub use view::FeedView;
