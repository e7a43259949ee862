mod root;

pub use root::App;
