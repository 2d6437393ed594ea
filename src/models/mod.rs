mod holding;

pub use holding::Holding;
