pub mod download;
pub mod series;
pub mod util;
